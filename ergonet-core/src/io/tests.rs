//! Reader and writer tests against in-memory and temporary files.

use std::io::Cursor;
use std::path::Path;

use rstest::rstest;

use crate::graph::{AttributeKind, GraphMode, TrackedList};

use super::{
    InputError, TrajectoryWriter, parse_network, read_binary_attributes,
    read_categorical_attributes, read_continuous_attributes, read_network, read_set_attributes,
    read_terms, read_zones, render_network, write_observed_stats,
};

fn parse(text: &str) -> Result<crate::graph::Graph, InputError> {
    parse_network(Cursor::new(text), Path::new("test.net"))
}

fn write_temp(content: &str) -> tempfile::NamedTempFile {
    use std::io::Write;
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write");
    file
}

#[test]
fn parses_a_directed_network() {
    let graph = parse("*vertices 3\n1\n2\n3\n*arcs\n1 2\n2 3\n").expect("valid file");
    assert!(graph.is_directed());
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.tie_count(), 2);
    assert!(graph.is_arc(0, 1));
    assert!(graph.is_arc(1, 2));
    assert!(graph.list_is_synced(TrackedList::All));
}

#[test]
fn headers_are_case_insensitive_and_blank_lines_terminate() {
    let graph = parse("\n*VERTICES 3\n1\n2\n3\n*Edges\n1 2\n\n2 3\n").expect("valid file");
    assert!(!graph.is_directed());
    // The tie after the blank line is ignored.
    assert_eq!(graph.tie_count(), 1);
}

#[test]
fn second_vertices_count_selects_bipartite_mode() {
    let graph = parse("*vertices 5 2\n1\n2\n3\n4\n5\n*edges\n1 3\n2 5\n").expect("valid file");
    assert_eq!(graph.mode(), GraphMode::Bipartite { mode_a: 2, mode_b: 3 });
    assert!(graph.is_edge(0, 2));
}

#[test]
fn duplicates_and_weights_are_tolerated() {
    let graph = parse("*vertices 3\n1\n2\n3\n*arcs\n1 2 0.5\n1 2\n2 1\n").expect("valid file");
    assert_eq!(graph.tie_count(), 2);
}

#[rstest]
#[case("*vertices 0\n")]
#[case("*nodes 3\n")]
#[case("*vertices 3\n1\n2\n*arcs\n")]
#[case("*vertices 2 5\n1\n2\n*edges\n")]
#[case("*vertices 2 1\n1\n2\n*arcs\n1 2\n")]
fn malformed_headers_are_rejected(#[case] text: &str) {
    assert!(matches!(parse(text), Err(InputError::Syntax { .. })));
}

#[test]
fn out_of_range_nodes_carry_the_line_number() {
    let error = parse("*vertices 2\n1\n2\n*arcs\n1 5\n").expect_err("node 5 is invalid");
    assert!(matches!(
        error,
        InputError::NodeId { line: 5, id: 5, count: 2, .. }
    ));
}

#[test]
fn written_networks_parse_back_identically() {
    let graph = parse("*vertices 4\n1\n2\n3\n4\n*arcs\n1 2\n3 4\n4 1\n").expect("valid");
    let mut rendered = Vec::new();
    render_network(&graph, &mut rendered).expect("render");
    let reparsed =
        parse_network(Cursor::new(rendered), Path::new("roundtrip.net")).expect("reparse");
    assert_eq!(reparsed.tie_count(), graph.tie_count());
    for i in 0..4 {
        for j in 0..4 {
            if i != j {
                assert_eq!(graph.is_arc(i, j), reparsed.is_arc(i, j));
            }
        }
    }
}

#[test]
fn missing_network_files_surface_the_path() {
    let error = read_network(Path::new("no/such/file.net")).expect_err("file is absent");
    assert!(matches!(error, InputError::Io { .. }));
}

#[test]
fn binary_attributes_parse_values_and_missing_markers() {
    let file = write_temp("smoker drinker\n1 0\nNA 1\n0 na\n");
    let columns = read_binary_attributes(file.path(), 3).expect("valid");
    assert_eq!(columns.len(), 2);
    assert_eq!(columns[0].name(), "smoker");
    assert_eq!(columns[0].len(), 3);
    let mut attrs = crate::graph::AttributeStore::default();
    for column in columns {
        attrs.push_binary(column);
    }
    assert_eq!(attrs.binary(0, 0), Some(true));
    assert_eq!(attrs.binary(0, 1), None);
    assert_eq!(attrs.binary(1, 2), None);
    assert_eq!(attrs.find(AttributeKind::Binary, "DRINKER"), Some(1));
}

#[test]
fn categorical_attributes_reject_negatives() {
    let file = write_temp("region\n0\n-1\n2\n");
    assert!(matches!(
        read_categorical_attributes(file.path(), 3),
        Err(InputError::Syntax { line: 3, .. })
    ));
}

#[test]
fn continuous_attributes_store_na_as_nan() {
    let file = write_temp("score\n1.5\nNA\n-2e3\n");
    let columns = read_continuous_attributes(file.path(), 3).expect("valid");
    let mut attrs = crate::graph::AttributeStore::default();
    for column in columns {
        attrs.push_continuous(column);
    }
    assert!((attrs.continuous(0, 0) - 1.5).abs() < 1e-12);
    assert!(attrs.continuous(0, 1).is_nan());
    assert!((attrs.continuous(0, 2) + 2000.0).abs() < 1e-12);
}

#[test]
fn set_attributes_size_the_universe_to_the_largest_element() {
    let file = write_temp("tags\n0,2\nNONE\nNA\n5\n");
    let columns = read_set_attributes(file.path(), 4).expect("valid");
    let mut attrs = crate::graph::AttributeStore::default();
    for column in columns {
        attrs.push_set(column);
    }
    let first = attrs.set(0, 0).expect("value present");
    assert_eq!(first.len(), 6);
    assert!(first[0] && !first[1] && first[2]);
    let empty = attrs.set(0, 1).expect("NONE is the empty set");
    assert!(empty.not_any());
    assert!(attrs.set(0, 2).is_none());
}

#[test]
fn attribute_row_counts_must_match_the_network() {
    let file = write_temp("smoker\n1\n0\n");
    assert!(matches!(
        read_binary_attributes(file.path(), 3),
        Err(InputError::NodeCount { expected: 3, found: 2, .. })
    ));
}

#[test]
fn zones_must_be_contiguous_from_zero() {
    let file = write_temp("zone\n0\n2\n2\n");
    assert!(matches!(
        read_zones(file.path(), 3),
        Err(InputError::NonContiguousZones { missing: 1, .. })
    ));
}

#[test]
fn zone_files_require_the_zone_header() {
    let file = write_temp("wave\n0\n1\n");
    assert!(matches!(
        read_zones(file.path(), 2),
        Err(InputError::Syntax { line: 1, .. })
    ));
}

#[test]
fn term_files_load_periods() {
    let file = write_temp("term\n0\n0\n1\n");
    let terms = read_terms(file.path(), 3).expect("valid");
    assert_eq!(terms.max_term(), 1);
    assert_eq!(terms.max_term_nodes(), &[2]);
}

#[test]
fn trajectory_writer_emits_header_and_rows() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("theta.txt");
    let mut writer = TrajectoryWriter::create(&path, &["Arc", "Reciprocity"]).expect("create");
    writer.append(1, &[0.5, -1.0]).expect("append");
    writer.append(2, &[0.25, -0.5]).expect("append");
    writer.flush().expect("flush");
    let content = std::fs::read_to_string(&path).expect("read back");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "t Arc Reciprocity");
    assert_eq!(lines[1], "1 0.5 -1");
    assert_eq!(lines.len(), 3);
}

#[test]
fn observed_stats_file_holds_one_row() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("obs.txt");
    write_observed_stats(&path, &["Arc", "AltInStars"], &[12.0, 3.5]).expect("write");
    let content = std::fs::read_to_string(&path).expect("read back");
    assert_eq!(content, "Arc AltInStars\n12 3.5\n");
}
