//! Property-based tests for closure-on-insert, traversal and removal.
//!
//! Graphs are generated as random edge lists over a small name space so that
//! cycles, self-loops and parallel edges show up often.

use std::collections::{BTreeMap, BTreeSet};

use labgraph_core::graph::Graph;
use proptest::{
    collection::vec,
    prelude::{prop_assert, prop_assert_eq, Strategy},
    proptest,
    test_runner::Config as ProptestConfig,
};

const GRAPH_PROP_CASES: u32 = 128;
const MAX_NODES: u16 = 12;

type Adjacency = BTreeMap<u16, Vec<(u16, u8)>>;

fn adjacency_strategy() -> impl Strategy<Value = Adjacency> {
    vec((0..MAX_NODES, 0..MAX_NODES, 0_u8..3), 0..40).prop_map(|edges| {
        let mut adjacency = Adjacency::new();
        for (source, target, label) in edges {
            adjacency.entry(source).or_default().push((target, label));
        }
        adjacency
    })
}

fn build(adjacency: &Adjacency) -> Graph<u16, u8> {
    Graph::from_dict(adjacency.clone()).expect("from_dict without limits never fails")
}

/// Names reachable from `start` per the plain adjacency list.
fn reachable(adjacency: &Adjacency, start: u16) -> BTreeSet<u16> {
    let mut seen = BTreeSet::new();
    let mut stack = vec![start];
    while let Some(current) = stack.pop() {
        if !seen.insert(current) {
            continue;
        }
        if let Some(edges) = adjacency.get(&current) {
            stack.extend(edges.iter().map(|(target, _)| *target));
        }
    }
    seen
}

fn all_names(adjacency: &Adjacency) -> BTreeSet<u16> {
    adjacency
        .iter()
        .flat_map(|(source, edges)| {
            std::iter::once(*source).chain(edges.iter().map(|(target, _)| *target))
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(GRAPH_PROP_CASES))]

    #[test]
    fn prop_from_dict_closure(adjacency in adjacency_strategy()) {
        let graph = build(&adjacency);
        let members: BTreeSet<u16> = graph.names().copied().collect();
        prop_assert_eq!(members, all_names(&adjacency));

        for node in graph.nodes() {
            for neighbour in node.adjacent_nodes() {
                prop_assert!(graph.contains(&neighbour));
            }
        }
    }

    #[test]
    fn prop_depth_first_from_exactly_once(adjacency in adjacency_strategy()) {
        let graph = build(&adjacency);
        for start in graph.nodes() {
            let order: Vec<u16> = graph.depth_first_from(start).map(|n| n.name()).collect();
            let distinct: BTreeSet<u16> = order.iter().copied().collect();

            prop_assert_eq!(order.first().copied(), Some(start.name()));
            prop_assert_eq!(distinct.len(), order.len());
            prop_assert_eq!(distinct, reachable(&adjacency, start.name()));
        }
    }

    #[test]
    fn prop_depth_first_search_covers_graph(adjacency in adjacency_strategy()) {
        let graph = build(&adjacency);
        let order: Vec<u16> = graph.depth_first_search().map(|n| n.name()).collect();
        let distinct: BTreeSet<u16> = order.iter().copied().collect();

        prop_assert_eq!(order.len(), graph.len());
        prop_assert_eq!(distinct, graph.names().copied().collect::<BTreeSet<u16>>());
    }

    #[test]
    fn prop_remove_node_severs_edges(adjacency in adjacency_strategy(), pick in 0..MAX_NODES) {
        let mut graph = build(&adjacency);
        let Ok(victim) = graph.get_node(&pick) else {
            return Ok(());
        };
        let before = graph.len();

        graph.remove_node(&victim).expect("member removal succeeds");

        prop_assert_eq!(graph.len(), before - 1);
        prop_assert!(!graph.contains(&victim));
        prop_assert!(victim.adjacent_nodes().iter().all(|n| !graph.contains(n)));
        for node in graph.nodes() {
            prop_assert!(node.edges().iter().all(|edge| *edge.target_name() != pick));
        }
    }
}
