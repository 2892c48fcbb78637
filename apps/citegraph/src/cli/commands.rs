//! # CLI Command Implementations
//!
//! Each command runs one engine operation against the loaded store and
//! prints the result as text, or as JSON in `--json-mode`. The `format_*`
//! helpers build the text views and are shared with `browse`.

use citegraph_core::{
    CitationGraph, CiteError, FilterConfig, PageLink, Record, RecordDetails, RecordId,
    RecordStore, ResultRow, TopicFacets, build_graph_for, clamp_page, filter, page,
    parse_depth, state_facets, total_pages, visible_pages, write_csv,
};
use citegraph_core::primitives::MAX_GRAPH_DEPTH;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Output switches shared by every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    pub json: bool,
    pub verbose: bool,
    pub quiet: bool,
}

fn print_json(value: &serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}

// =============================================================================
// EXPORT FILES
// =============================================================================

/// Validate an output path: the parent directory must exist.
fn validate_output_path(path: &Path) -> Result<PathBuf, CiteError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        CiteError::Io(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(CiteError::Io(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| CiteError::Io("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

/// Write `records` as CSV to `path`. Returns the number of rows written.
pub fn export_records(path: &Path, records: &[&Record]) -> Result<usize, CiteError> {
    let validated = validate_output_path(path)?;
    let file = std::fs::File::create(&validated)
        .map_err(|e| CiteError::Io(format!("Create file: {}", e)))?;
    let rows = write_csv(records.iter().copied(), std::io::BufWriter::new(file))?;
    tracing::info!(path = %validated.display(), rows, "export written");
    Ok(rows)
}

// =============================================================================
// TEXT VIEWS
// =============================================================================

/// Render a pagination bar such as `1 … 4 [5] 6 … 12`.
pub fn format_page_bar(current: usize, total: usize) -> String {
    visible_pages(current, total)
        .into_iter()
        .map(|link| match link {
            PageLink::Page(n) if n == current => format!("[{}]", n),
            PageLink::Page(n) => n.to_string(),
            PageLink::Gap => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render one page of results with 1-based row numbers.
pub fn format_results_page(
    rows: &[&Record],
    matched: usize,
    current: usize,
    total: usize,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} records found", matched);
    for (index, record) in rows.iter().enumerate() {
        let row = ResultRow::from_record(record);
        let _ = writeln!(
            out,
            "{:>3}. {} ({}) | {} | cites: {} | OA: {} | {}",
            index + 1,
            row.title,
            row.year,
            row.authors,
            row.citations,
            row.open_access,
            row.kind
        );
    }
    let _ = write!(out, "Page {}/{}: {}", current, total, format_page_bar(current, total));
    out
}

/// Render a citation graph as node and edge lists.
pub fn format_graph(graph: &CitationGraph, verbose: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Citation graph of {} (depth {}): {} nodes, {} edges",
        graph.seed.short(),
        graph.max_depth,
        graph.nodes.len(),
        graph.edges.len()
    );
    let _ = writeln!(out, "Nodes:");
    for node in &graph.nodes {
        if verbose {
            let _ = writeln!(
                out,
                "  [{}] {} (level {}) {}",
                node.role,
                node.id,
                node.level,
                node.label
            );
        } else {
            let _ = writeln!(out, "  [{}] {} {}", node.role, node.id.short(), node.label);
        }
    }
    let _ = write!(out, "Edges:");
    for edge in &graph.edges {
        let _ = write!(out, "\n  {} -> {}", edge.source.short(), edge.target.short());
    }
    out
}

/// Render the detail view of a record.
pub fn format_details(details: &RecordDetails) -> String {
    format!(
        "ID: {}\nTitle: {}\nPublication Date: {}\nTopics: {}\nKeywords: {}\nStates: {}\nURL: {}",
        details.short_id,
        details.title,
        details.publication_date,
        details.topics,
        details.keywords,
        details.states,
        details.url
    )
}

// =============================================================================
// SEARCH COMMAND
// =============================================================================

/// Filter the store and show one page of the results.
pub fn cmd_search(
    store: &RecordStore,
    config: &FilterConfig,
    page_number: usize,
    page_size: usize,
    export: Option<&Path>,
    output: Output,
) -> Result<(), CiteError> {
    if page_size == 0 {
        return Err(CiteError::InvalidPageSize);
    }

    let results = filter(store, config);
    let total = total_pages(results.len(), page_size);
    let current = clamp_page(page_number, results.len(), page_size);
    if current != page_number {
        tracing::warn!(requested = page_number, shown = current, "page clamped");
    }
    tracing::debug!(matched = results.len(), pages = total, "search evaluated");

    let rows = page(&results, page_size, current)?;

    if output.json {
        let rows_json: Vec<serde_json::Value> = rows
            .iter()
            .map(|r| {
                serde_json::json!({
                    "id": r.id,
                    "row": ResultRow::from_record(r),
                })
            })
            .collect();
        print_json(&serde_json::json!({
            "matched": results.len(),
            "page": current,
            "total_pages": total,
            "rows": rows_json,
        }));
    } else {
        println!("{}", format_results_page(rows, results.len(), current, total));
    }

    if let Some(path) = export {
        let written = export_records(path, &results)?;
        if !output.quiet && !output.json {
            println!("Exported {} records to {}", written, path.display());
        }
    }

    Ok(())
}

// =============================================================================
// GRAPH COMMAND
// =============================================================================

/// Depth for a graph request: typed text is parsed, otherwise the
/// configured default is bounded to `1..=MAX_GRAPH_DEPTH`.
pub fn graph_depth(depth_text: Option<&str>, default_depth: usize) -> usize {
    depth_text
        .map(parse_depth)
        .unwrap_or_else(|| default_depth.clamp(1, MAX_GRAPH_DEPTH))
}

/// Build and print the citation graph around `id`.
pub fn cmd_graph(
    store: &RecordStore,
    id: &str,
    depth_text: Option<&str>,
    default_depth: usize,
    export: Option<&Path>,
    output: Output,
) -> Result<(), CiteError> {
    let depth = graph_depth(depth_text, default_depth);
    let seed = RecordId::new(id);
    let graph = build_graph_for(store, &seed, depth)?;
    tracing::info!(
        seed = %seed,
        depth,
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "graph built"
    );

    if output.json {
        let value = serde_json::to_value(&graph)
            .map_err(|e| CiteError::Export(e.to_string()))?;
        print_json(&value);
    } else {
        println!("{}", format_graph(&graph, output.verbose));
    }

    if let Some(path) = export {
        let written = export_records(path, &graph.records(store))?;
        if !output.quiet && !output.json {
            println!("Exported {} records to {}", written, path.display());
        }
    }

    Ok(())
}

// =============================================================================
// DETAILS COMMAND
// =============================================================================

/// Show one record.
pub fn cmd_details(store: &RecordStore, id: &str, output: Output) -> Result<(), CiteError> {
    let record = store.require(&RecordId::new(id))?;
    let details = RecordDetails::from_record(record);

    if output.json {
        let value = serde_json::to_value(&details)
            .map_err(|e| CiteError::Export(e.to_string()))?;
        print_json(&value);
    } else {
        println!("{}", format_details(&details));
    }
    Ok(())
}

// =============================================================================
// FACETS COMMAND
// =============================================================================

/// List the topic tree and the state tags.
pub fn cmd_facets(store: &RecordStore, output: Output) -> Result<(), CiteError> {
    let topics = TopicFacets::collect(store);
    let states = state_facets(store);

    if output.json {
        print_json(&serde_json::json!({
            "topic_count": topics.topic_count(),
            "fields": topics.fields,
            "state_count": states.len(),
            "states": states,
        }));
        return Ok(());
    }

    println!("Topics ({})", topics.topic_count());
    for (field, domains) in &topics.fields {
        println!("{}", field);
        for (domain, names) in domains {
            println!("  {}", domain);
            for name in names {
                println!("    {}", name);
            }
        }
    }
    println!();
    println!("States ({})", states.len());
    for state in &states {
        println!("  {}", state);
    }
    Ok(())
}
