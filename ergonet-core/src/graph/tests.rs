//! Tests for the graph store: mutation invariants, tie lists, overlays
//! and two-path cache consistency.

use proptest::prelude::*;
use rstest::rstest;

use crate::test_utils::{random_directed, random_undirected, snapshot};

use super::{
    CitationTerms, ConsistencyError, Graph, GraphChecker, SnowballZones, TrackedList,
};

fn assert_consistent(graph: &Graph) {
    let failures = GraphChecker::new(graph).check_all();
    assert!(failures.is_empty(), "invariant failures: {failures:?}");
}

#[test]
fn insert_arc_mirrors_adjacency_and_degrees() {
    let mut graph = Graph::directed(4);
    graph.insert_arc(0, 1, TrackedList::All).expect("insert must succeed");
    graph.insert_arc(2, 1, TrackedList::All).expect("insert must succeed");
    assert!(graph.is_arc(0, 1));
    assert!(!graph.is_arc(1, 0));
    assert_eq!(graph.out_degree(0), 1);
    assert_eq!(graph.in_degree(1), 2);
    assert_eq!(graph.tie_count(), 2);
    assert_eq!(graph.list_len(TrackedList::All), 2);
    assert_consistent(&graph);
}

#[test]
fn remove_arc_restores_the_original_state() {
    let mut graph = random_directed(9, 0.3, 7);
    let (i, j) = (0..9)
        .flat_map(|i| (0..9).map(move |j| (i, j)))
        .find(|&(i, j)| i != j && !graph.is_arc(i, j))
        .expect("a density-0.3 graph has absent dyads");
    let before = snapshot(&graph);
    graph.insert_arc(i, j, TrackedList::All).expect("arc must be absent");
    graph.remove_arc(i, j, TrackedList::All).expect("arc must be present");
    assert_eq!(snapshot(&graph), before);
    assert_consistent(&graph);
}

#[test]
fn duplicate_insert_is_rejected() {
    let mut graph = Graph::directed(3);
    graph.insert_arc(0, 1, TrackedList::None).expect("insert must succeed");
    assert_eq!(
        graph.insert_arc(0, 1, TrackedList::None),
        Err(ConsistencyError::DuplicateTie { from: 0, to: 1 })
    );
}

#[test]
fn removing_a_missing_arc_is_a_consistency_error() {
    let mut graph = Graph::directed(3);
    assert_eq!(
        graph.remove_arc(0, 1, TrackedList::None),
        Err(ConsistencyError::MissingTie { from: 0, to: 1 })
    );
}

#[rstest]
#[case(3, 0)]
#[case(0, 5)]
fn out_of_range_endpoints_are_rejected(#[case] i: u32, #[case] j: u32) {
    let mut graph = Graph::directed(3);
    assert!(matches!(
        graph.insert_arc(i, j, TrackedList::None),
        Err(ConsistencyError::NodeOutOfRange { .. })
    ));
}

#[test]
fn self_loops_are_rejected() {
    let mut graph = Graph::directed(3);
    assert_eq!(
        graph.insert_arc(1, 1, TrackedList::None),
        Err(ConsistencyError::SelfLoop { node: 1 })
    );
}

#[test]
fn arc_operations_do_not_apply_to_undirected_graphs() {
    let mut graph = Graph::undirected(3);
    assert!(matches!(
        graph.insert_arc(0, 1, TrackedList::None),
        Err(ConsistencyError::ModeMismatch { .. })
    ));
}

#[test]
fn bipartite_edges_must_join_distinct_modes() {
    let mut graph = Graph::bipartite(3, 3);
    assert!(matches!(
        graph.insert_edge(0, 1, TrackedList::None),
        Err(ConsistencyError::SameModeEdge { .. })
    ));
    graph.insert_edge(0, 4, TrackedList::None).expect("cross-mode edge must succeed");
    assert!(graph.is_edge(4, 0));
}

#[test]
fn dyad_count_matches_the_mode() {
    assert_eq!(Graph::directed(5).dyad_count(), 20);
    assert_eq!(Graph::undirected(5).dyad_count(), 10);
    assert_eq!(Graph::bipartite(3, 4).dyad_count(), 12);
}

#[test]
fn swap_removal_by_index_keeps_the_list_live() {
    let mut graph = Graph::directed(5);
    for (i, j) in [(0, 1), (1, 2), (2, 3), (3, 4)] {
        graph.insert_arc(i, j, TrackedList::All).expect("insert must succeed");
    }
    let removed = graph
        .remove_tie_at(TrackedList::All, 1)
        .expect("index 1 must exist");
    assert_eq!(removed, (1, 2));
    assert!(!graph.is_arc(1, 2));
    assert_eq!(graph.list_len(TrackedList::All), 3);
    assert!(graph.list_is_synced(TrackedList::All));
    assert_consistent(&graph);
}

#[test]
fn unlisted_mutation_marks_lists_stale_and_rebuild_restores_them() {
    let mut graph = random_undirected(8, 0.4, 3);
    assert!(graph.list_is_synced(TrackedList::All));
    graph.insert_edge(0, 7, TrackedList::None).ok();
    graph.remove_edge(0, 7, TrackedList::None).ok();
    assert!(!graph.list_is_synced(TrackedList::All));
    graph.rebuild_tie_lists();
    assert!(graph.list_is_synced(TrackedList::All));
    assert_consistent(&graph);
}

#[test]
fn zone_overlay_seeds_previous_wave_degrees() {
    let mut graph = Graph::undirected(5);
    for (i, j) in [(0, 1), (1, 2), (2, 3), (3, 4)] {
        graph.insert_edge(i, j, TrackedList::All).expect("insert must succeed");
    }
    // Waves 0-0-1-1-2 along a path: ties 1-2 and 3-4 span a wave.
    graph
        .set_zones(SnowballZones::new(vec![0, 0, 1, 1, 2]))
        .expect("zones must be adjacent");
    let zones = graph.zones().expect("overlay must be loaded");
    assert_eq!(zones.max_zone(), 2);
    assert_eq!(zones.prev_wave_degree(2), 1);
    assert_eq!(zones.prev_wave_degree(3), 0);
    assert_eq!(zones.prev_wave_degree(4), 1);
    assert_eq!(zones.inner_nodes(), &[0, 1, 2, 3]);
    assert_consistent(&graph);
}

#[test]
fn zone_overlay_rejects_ties_spanning_two_waves() {
    let mut graph = Graph::undirected(3);
    graph.insert_edge(0, 2, TrackedList::All).expect("insert must succeed");
    assert!(matches!(
        graph.set_zones(SnowballZones::new(vec![0, 1, 2])),
        Err(ConsistencyError::ZoneConstraint { .. })
    ));
}

#[test]
fn wave_degrees_follow_toggles() {
    let mut graph = Graph::undirected(4);
    graph
        .set_zones(SnowballZones::new(vec![0, 1, 1, 2]))
        .expect("zones must be adjacent");
    graph.insert_edge(0, 1, TrackedList::InnerZone).expect("inner insert");
    assert_eq!(graph.zones().expect("loaded").prev_wave_degree(1), 1);
    graph
        .remove_edge(0, 1, TrackedList::InnerZone)
        .expect("inner remove");
    assert_eq!(graph.zones().expect("loaded").prev_wave_degree(1), 0);
    assert_consistent(&graph);
}

#[test]
fn inner_zone_insert_requires_inner_adjacent_endpoints() {
    let mut graph = Graph::undirected(4);
    graph
        .set_zones(SnowballZones::new(vec![0, 1, 1, 2]))
        .expect("zones must be adjacent");
    // Node 3 is in the outermost wave.
    assert!(matches!(
        graph.insert_edge(2, 3, TrackedList::InnerZone),
        Err(ConsistencyError::ZoneConstraint { .. })
    ));
}

#[test]
fn max_term_list_tracks_last_period_senders() {
    let mut graph = Graph::directed(4);
    graph.insert_arc(0, 1, TrackedList::All).expect("insert must succeed");
    graph.insert_arc(3, 0, TrackedList::All).expect("insert must succeed");
    graph.set_terms(CitationTerms::new(vec![0, 0, 1, 1]));
    assert_eq!(graph.terms().expect("loaded").max_term_nodes(), &[2, 3]);
    assert_eq!(graph.list_len(TrackedList::MaxTermSender), 1);
    assert_eq!(graph.tie_at(TrackedList::MaxTermSender, 0), Some((3, 0)));
    graph.insert_arc(2, 1, TrackedList::MaxTermSender).expect("max-term insert");
    assert_eq!(graph.list_len(TrackedList::MaxTermSender), 2);
    // A sender outside the last period may not maintain this list.
    assert!(matches!(
        graph.insert_arc(1, 3, TrackedList::MaxTermSender),
        Err(ConsistencyError::TermConstraint { .. })
    ));
}

#[test]
fn two_path_counts_match_recounts_on_a_dense_directed_graph() {
    let graph = random_directed(12, 0.4, 11);
    assert_consistent(&graph);
    for u in 0..12 {
        for v in 0..12 {
            if u == v {
                continue;
            }
            assert_eq!(graph.mixed_two_paths(u, v), graph.count_mixed_two_paths(u, v));
            assert_eq!(graph.shared_targets(u, v), graph.count_shared_targets(u, v));
            assert_eq!(graph.shared_sources(u, v), graph.count_shared_sources(u, v));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Any toggle sequence leaves every cache equal to a recount.
    #[test]
    fn directed_toggles_preserve_consistency(
        toggles in proptest::collection::vec((0u32..8, 0u32..8), 1..60)
    ) {
        let mut graph = Graph::directed(8);
        for (i, j) in toggles {
            if i == j {
                continue;
            }
            if graph.is_arc(i, j) {
                graph.remove_arc(i, j, TrackedList::All).expect("tie present");
            } else {
                graph.insert_arc(i, j, TrackedList::All).expect("tie absent");
            }
        }
        prop_assert!(GraphChecker::new(&graph).check_all().is_empty());
    }

    #[test]
    fn undirected_toggles_preserve_consistency(
        toggles in proptest::collection::vec((0u32..8, 0u32..8), 1..60)
    ) {
        let mut graph = Graph::undirected(8);
        for (i, j) in toggles {
            if i == j {
                continue;
            }
            if graph.is_edge(i, j) {
                graph.remove_edge(i, j, TrackedList::All).expect("tie present");
            } else {
                graph.insert_edge(i, j, TrackedList::All).expect("tie absent");
            }
        }
        prop_assert!(GraphChecker::new(&graph).check_all().is_empty());
    }

    #[test]
    fn bipartite_toggles_preserve_consistency(
        toggles in proptest::collection::vec((0u32..4, 4u32..9), 1..50)
    ) {
        let mut graph = Graph::bipartite(4, 5);
        for (a, b) in toggles {
            if graph.is_edge(a, b) {
                graph.remove_edge(a, b, TrackedList::All).expect("tie present");
            } else {
                graph.insert_edge(a, b, TrackedList::All).expect("tie absent");
            }
        }
        prop_assert!(GraphChecker::new(&graph).check_all().is_empty());
    }
}
