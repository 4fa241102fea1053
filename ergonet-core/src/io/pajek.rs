//! Pajek-format network reader and writer.
//!
//! The accepted grammar is the subset the estimator needs: a
//! case-insensitive `*vertices N` header (with an optional second count
//! marking the size of the first bipartite mode), `N` node lines whose
//! content is ignored, an `*arcs` or `*edges` header selecting the graph
//! mode, and one tie per line as two 1-based node numbers. A third token
//! is ignored with a warning, duplicates are dropped, and a blank line
//! ends the tie section.

use std::{
    fs::File,
    io::{BufRead, BufReader, Write},
    path::Path,
};

use tracing::warn;

use crate::graph::{Graph, GraphMode, NodeId, TrackedList};

use super::error::{InputError, OutputError};

/// Reads a network from a Pajek file.
///
/// # Errors
/// Returns [`InputError`] for unreadable files or any grammar violation,
/// with the offending line number.
pub fn read_network(path: &Path) -> Result<Graph, InputError> {
    let file = File::open(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_network(BufReader::new(file), path)
}

/// Parses a network from any buffered reader; `path` is used only for
/// diagnostics.
///
/// # Errors
/// As [`read_network`].
pub fn parse_network<R: BufRead>(reader: R, path: &Path) -> Result<Graph, InputError> {
    let syntax = |line: usize, message: String| InputError::Syntax {
        path: path.to_path_buf(),
        line,
        message,
    };
    let mut lines = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        lines.push((index + 1, line));
    }
    let mut cursor = lines.iter().map(|(no, text)| (*no, text.as_str()));

    // Header: *vertices N [mode_a], skipping leading blank lines.
    let (header_line, header) = cursor
        .by_ref()
        .find(|(_, text)| !text.trim().is_empty())
        .ok_or_else(|| syntax(1, "expected `*vertices N` header".to_owned()))?;
    let mut tokens = header.split_whitespace();
    let keyword = tokens.next().unwrap_or("");
    if !keyword.eq_ignore_ascii_case("*vertices") {
        return Err(syntax(
            header_line,
            format!("expected `*vertices N`, got `{header}`"),
        ));
    }
    let node_count: u32 = tokens
        .next()
        .and_then(|raw| raw.parse().ok())
        .filter(|&n| n >= 1)
        .ok_or_else(|| {
            syntax(
                header_line,
                "`*vertices` needs a positive node count".to_owned(),
            )
        })?;
    let mode_a: Option<u32> = match tokens.next() {
        Some(raw) => Some(raw.parse().ok().filter(|&m| m <= node_count).ok_or_else(
            || {
                syntax(
                    header_line,
                    "second `*vertices` count must not exceed the node count".to_owned(),
                )
            },
        )?),
        None => None,
    };

    // N node lines; the ids and labels are positional, so only the count
    // matters.
    let mut seen_nodes = 0u32;
    let mut section = None;
    for (line_no, text) in cursor.by_ref() {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('*') {
            section = Some((line_no, trimmed.to_owned()));
            break;
        }
        seen_nodes += 1;
    }
    if seen_nodes != node_count {
        return Err(syntax(
            header_line,
            format!("expected {node_count} node lines, found {seen_nodes}"),
        ));
    }
    let (section_line, section) = section.ok_or_else(|| {
        syntax(header_line, "expected an `*arcs` or `*edges` section".to_owned())
    })?;
    let section_keyword = section.split_whitespace().next().unwrap_or("");
    let directed = if section_keyword.eq_ignore_ascii_case("*arcs") {
        true
    } else if section_keyword.eq_ignore_ascii_case("*edges") {
        false
    } else {
        return Err(syntax(
            section_line,
            format!("expected `*arcs` or `*edges`, got `{section}`"),
        ));
    };

    let mut graph = match (directed, mode_a) {
        (true, None) => Graph::directed(node_count),
        (false, None) => Graph::undirected(node_count),
        (false, Some(mode_a)) => Graph::bipartite(mode_a, node_count - mode_a),
        (true, Some(_)) => {
            return Err(syntax(
                section_line,
                "bipartite networks must use `*edges`".to_owned(),
            ));
        }
    };

    let mut weights_ignored = 0usize;
    for (line_no, text) in cursor {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            break;
        }
        let mut tokens = trimmed.split_whitespace();
        let from = parse_node(tokens.next(), node_count, path, line_no)?;
        let to = parse_node(tokens.next(), node_count, path, line_no)?;
        if tokens.next().is_some() {
            weights_ignored += 1;
        }
        if from == to {
            warn!(line = line_no, node = from + 1, "ignoring self-loop");
            continue;
        }
        if graph.has_tie(from, to) {
            continue;
        }
        graph
            .insert_dyad(from, to, TrackedList::All)
            .map_err(|error| syntax(line_no, error.to_string()))?;
    }
    if weights_ignored > 0 {
        warn!(
            path = %path.display(),
            count = weights_ignored,
            "ignoring weight tokens; the model is binary"
        );
    }
    graph.rebuild_tie_lists();
    Ok(graph)
}

fn parse_node(
    token: Option<&str>,
    node_count: u32,
    path: &Path,
    line: usize,
) -> Result<NodeId, InputError> {
    let raw = token.ok_or_else(|| InputError::Syntax {
        path: path.to_path_buf(),
        line,
        message: "expected two node numbers".to_owned(),
    })?;
    let id: i64 = raw.parse().map_err(|_| InputError::Syntax {
        path: path.to_path_buf(),
        line,
        message: format!("`{raw}` is not a node number"),
    })?;
    if id < 1 || id > i64::from(node_count) {
        return Err(InputError::NodeId {
            path: path.to_path_buf(),
            line,
            id,
            count: node_count,
        });
    }
    Ok((id - 1) as NodeId)
}

/// Writes a graph in the same Pajek grammar the reader accepts.
///
/// # Errors
/// Returns [`OutputError`] when the file cannot be created or written.
pub fn write_network(graph: &Graph, path: &Path) -> Result<(), OutputError> {
    let file = File::create(path).map_err(|source| OutputError::io(path, source))?;
    let mut writer = std::io::BufWriter::new(file);
    render_network(graph, &mut writer).map_err(|source| OutputError::io(path, source))
}

/// Renders a graph to any writer.
///
/// # Errors
/// Propagates the underlying I/O error.
pub fn render_network<W: Write>(graph: &Graph, writer: &mut W) -> std::io::Result<()> {
    match graph.mode() {
        GraphMode::Bipartite { mode_a, .. } => {
            writeln!(writer, "*vertices {} {}", graph.node_count(), mode_a)?;
        }
        _ => writeln!(writer, "*vertices {}", graph.node_count())?,
    }
    for node in 1..=graph.node_count() {
        writeln!(writer, "{node}")?;
    }
    if graph.is_directed() {
        writeln!(writer, "*arcs")?;
    } else {
        writeln!(writer, "*edges")?;
    }
    for (from, to) in graph.iter_ties() {
        writeln!(writer, "{} {}", from + 1, to + 1)?;
    }
    Ok(())
}
