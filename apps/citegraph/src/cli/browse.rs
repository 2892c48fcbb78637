//! # Interactive Browse Loop
//!
//! A line-oriented front end over the session reducer. Each input line is
//! parsed into a `BrowseInput`; actions go through `reduce` and the new
//! view is printed.
//!
//! Rows are numbered from 1 on every page, as printed.

use super::FilterArgs;
use super::commands::{export_records, format_details, format_graph, format_results_page};
use crate::config::ExportConfig;
use citegraph_core::{
    Action, CiteError, RecordDetails, RecordStore, RowCommand, RowKind, ViewState, parse_depth,
    reduce,
};
use clap::Parser;
use std::fmt::Write as _;
use std::io::Write as _;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Commands:
  search [--title T] [--author A] [--field F] ...   new search (back to page 1)
  next | prev | page N                               move between pages
  details ROW | graph ROW                            open a row of the current page
  depth N | regen                                    change depth, rebuild the graph
  close [graph|details]                              close the graph or the details
  export [graph]                                     write results (or graph) as CSV
  show | help | quit";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseInput {
    Apply(Action),
    ExportResults,
    ExportGraph,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BrowseError {
    #[error("Unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No row {0} on this page")]
    NoSuchRow(usize),

    #[error("Unterminated quote")]
    UnterminatedQuote,
}

/// The filter flags of a `search` line.
#[derive(Parser, Debug)]
#[command(name = "search", disable_version_flag = true)]
struct SearchLine {
    #[command(flatten)]
    filter: FilterArgs,
}

/// Split a line into words; double quotes group words.
pub fn split_args(line: &str) -> Result<Vec<String>, BrowseError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut pending = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                pending = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if pending {
                    words.push(std::mem::take(&mut current));
                    pending = false;
                }
            }
            c => {
                current.push(c);
                pending = true;
            }
        }
    }

    if in_quotes {
        return Err(BrowseError::UnterminatedQuote);
    }
    if pending {
        words.push(current);
    }
    Ok(words)
}

fn parse_number(word: Option<&String>) -> Result<usize, BrowseError> {
    let word = word.ok_or_else(|| BrowseError::InvalidArgument("missing number".into()))?;
    word.parse::<usize>()
        .map_err(|_| BrowseError::InvalidArgument(format!("'{}' is not a number", word)))
}

fn row_command(
    state: &ViewState,
    kind: RowKind,
    word: Option<&String>,
) -> Result<BrowseInput, BrowseError> {
    let row = parse_number(word)?;
    row.checked_sub(1)
        .and_then(|index| RowCommand::for_row(state, kind, index))
        .map(|command| BrowseInput::Apply(Action::Row(command)))
        .ok_or(BrowseError::NoSuchRow(row))
}

/// Parse one input line against the current view.
pub fn parse_line(line: &str, state: &ViewState) -> Result<BrowseInput, BrowseError> {
    let words = split_args(line)?;
    let Some(command) = words.first() else {
        return Ok(BrowseInput::Show);
    };

    let input = match command.as_str() {
        "show" => BrowseInput::Show,
        "help" | "?" => BrowseInput::Help,
        "quit" | "exit" | "q" => BrowseInput::Quit,
        "next" | "n" => BrowseInput::Apply(Action::NextPage),
        "prev" | "p" => BrowseInput::Apply(Action::PrevPage),
        "page" => BrowseInput::Apply(Action::GotoPage(parse_number(words.get(1))?)),
        "search" => {
            let line = SearchLine::try_parse_from(&words)
                .map_err(|e| BrowseError::InvalidArgument(e.to_string()))?;
            BrowseInput::Apply(Action::Search(line.filter.to_config()))
        }
        "details" => row_command(state, RowKind::Details, words.get(1))?,
        "graph" => row_command(state, RowKind::Graph, words.get(1))?,
        "depth" => {
            let text = words.get(1).map(String::as_str).unwrap_or_default();
            BrowseInput::Apply(Action::SetDepth(parse_depth(text)))
        }
        "regen" => BrowseInput::Apply(Action::RegenerateGraph),
        "close" => match words.get(1).map(String::as_str) {
            Some("graph") => BrowseInput::Apply(Action::CloseGraph),
            Some("details") => BrowseInput::Apply(Action::CloseDetails),
            Some(other) => return Err(BrowseError::InvalidArgument(other.to_string())),
            None if state.details.is_some() => BrowseInput::Apply(Action::CloseDetails),
            None => BrowseInput::Apply(Action::CloseGraph),
        },
        "export" => match words.get(1).map(String::as_str) {
            Some("graph") => BrowseInput::ExportGraph,
            None | Some("results") => BrowseInput::ExportResults,
            Some(other) => return Err(BrowseError::InvalidArgument(other.to_string())),
        },
        other => return Err(BrowseError::UnknownCommand(other.to_string())),
    };
    Ok(input)
}

/// Render everything the state has open.
pub fn format_view(store: &RecordStore, state: &ViewState) -> Result<String, CiteError> {
    let rows = state.page_records(store)?;
    let mut out = format_results_page(
        &rows,
        state.results.len(),
        state.page,
        state.total_pages(),
    );
    if let Some(graph) = &state.graph {
        let _ = write!(out, "\n\n{}", format_graph(graph, false));
    }
    if let Some(record) = state.details_record(store) {
        let details = RecordDetails::from_record(record);
        let _ = write!(out, "\n\n{}", format_details(&details));
    }
    Ok(out)
}

/// Write the current results, or the open graph, to the configured CSV
/// file. Returns the message to show.
pub fn export_view(
    store: &RecordStore,
    state: &ViewState,
    of_graph: bool,
    exports: &ExportConfig,
) -> Result<String, CiteError> {
    let (path, records) = if of_graph {
        match &state.graph {
            Some(graph) => (&exports.graph_file, graph.records(store)),
            None => return Ok("No graph is open".to_string()),
        }
    } else {
        (&exports.search_file, state.result_records(store))
    };
    let written = export_records(path, &records)?;
    Ok(format!("Exported {} records to {}", written, path.display()))
}

/// Export failures are shown and the session goes on.
fn report(result: Result<String, CiteError>) {
    match result {
        Ok(message) => println!("{}", message),
        Err(e) => println!("{}", e),
    }
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

/// Run the interactive loop on stdin until `quit` or end of input.
pub async fn cmd_browse(
    store: &RecordStore,
    page_size: usize,
    depth: usize,
    exports: &ExportConfig,
) -> Result<(), CiteError> {
    let mut state = ViewState::new(store, page_size, depth);
    println!("{}", format_view(store, &state)?);
    prompt();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| CiteError::Io(e.to_string()))?
    {
        match parse_line(&line, &state) {
            Ok(BrowseInput::Quit) => break,
            Ok(BrowseInput::Help) => println!("{}", HELP),
            Ok(BrowseInput::Show) => println!("{}", format_view(store, &state)?),
            Ok(BrowseInput::Apply(action)) => {
                tracing::debug!(?action, "browse action");
                state = reduce(store, &state, action);
                println!("{}", format_view(store, &state)?);
            }
            Ok(BrowseInput::ExportResults) => report(export_view(store, &state, false, exports)),
            Ok(BrowseInput::ExportGraph) => report(export_view(store, &state, true, exports)),
            Err(e) => println!("{}", e),
        }
        prompt();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_group_words() {
        let words = split_args(r#"search --title "deep learning"  --state CA"#).expect("split");
        assert_eq!(
            words,
            vec!["search", "--title", "deep learning", "--state", "CA"]
        );
        assert_eq!(split_args(r#"say """#).expect("split"), vec!["say", ""]);
        assert_eq!(
            split_args(r#"search --title "open"#),
            Err(BrowseError::UnterminatedQuote)
        );
    }
}
