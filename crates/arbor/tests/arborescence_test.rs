use arbor::graphlib::{Edge, Error, Graph, Vertex};
use arbor::{Arborescence, solve};

fn graph(edges: &[(&str, &str, f64)]) -> Graph {
    let mut g = Graph::new();
    for &(v, w, weight) in edges {
        g.add_edge(Edge::new(v, w, weight).expect("valid edge"));
    }
    g
}

fn solve_at(g: &Graph, root: &str) -> Arborescence {
    solve(g, &Vertex::new(root)).expect("arborescence exists")
}

fn sorted_edges(a: &Arborescence) -> Vec<String> {
    let mut out: Vec<String> = a.edges().iter().map(ToString::to_string).collect();
    out.sort();
    out
}

#[test]
fn contracts_a_two_cycle_and_expands_it_again() {
    let g = graph(&[
        ("r", "a", 5.0),
        ("r", "b", 4.0),
        ("a", "b", 1.0),
        ("b", "a", 1.0),
        ("a", "c", 1.0),
        ("b", "c", 1.0),
    ]);
    let a = solve_at(&g, "r");

    assert_eq!(a.weight(), 6.0);
    assert_eq!(a.contractions(), 1);
    assert_eq!(
        sorted_edges(&a),
        vec!["a -> c 1.00", "b -> a 1.00", "r -> b 4.00"]
    );
    assert_eq!(a.root().name(), "r");
    assert_eq!(
        a.parent_of(&Vertex::new("a")).map(ToString::to_string).as_deref(),
        Some("b -> a 1.00")
    );
    assert!(a.parent_of(&Vertex::new("r")).is_none());
}

#[test]
fn acyclic_selection_is_returned_without_contraction() {
    let g = graph(&[
        ("r", "a", 2.0),
        ("r", "b", 7.0),
        ("a", "b", 3.0),
        ("b", "c", 1.0),
        ("a", "c", 4.0),
    ]);
    let a = solve_at(&g, "r");

    assert_eq!(a.contractions(), 0);
    assert_eq!(a.weight(), 6.0);
    assert_eq!(
        sorted_edges(&a),
        vec!["a -> b 3.00", "b -> c 1.00", "r -> a 2.00"]
    );
}

#[test]
fn edges_into_the_root_are_never_used() {
    let g = graph(&[("r", "a", 10.0), ("a", "r", 0.0), ("a", "b", 1.0)]);
    let a = solve_at(&g, "r");
    assert_eq!(sorted_edges(&a), vec!["a -> b 1.00", "r -> a 10.00"]);
    assert_eq!(a.weight(), 11.0);
}

#[test]
fn nested_cycles_need_several_contractions() {
    // {a, b} form a cycle; once contracted, {a,b} and c form another one.
    let g = graph(&[
        ("r", "a", 10.0),
        ("r", "c", 12.0),
        ("a", "b", 1.0),
        ("b", "a", 1.0),
        ("b", "c", 2.0),
        ("c", "a", 3.0),
        ("c", "b", 3.0),
    ]);
    let a = solve_at(&g, "r");

    assert_eq!(a.contractions(), 2);
    assert_eq!(a.weight(), 13.0);
    assert_eq!(
        sorted_edges(&a),
        vec!["a -> b 1.00", "b -> c 2.00", "r -> a 10.00"]
    );
}

#[test]
fn three_cycle_entered_at_its_cheapest_point() {
    let g = graph(&[
        ("r", "x", 9.0),
        ("r", "y", 5.0),
        ("r", "z", 8.0),
        ("x", "y", 1.0),
        ("y", "z", 1.0),
        ("z", "x", 1.0),
    ]);
    let a = solve_at(&g, "r");

    // Reduced entry costs into the cycle: x 8, y 4, z 7.
    assert_eq!(a.weight(), 7.0);
    assert_eq!(
        sorted_edges(&a),
        vec!["r -> y 5.00", "y -> z 1.00", "z -> x 1.00"]
    );
}

#[test]
fn disjoint_cycles_are_contracted_one_level_at_a_time() {
    let g = graph(&[
        ("r", "a", 4.0),
        ("r", "c", 6.0),
        ("a", "b", 1.0),
        ("b", "a", 1.0),
        ("c", "d", 2.0),
        ("d", "c", 2.0),
    ]);
    let a = solve_at(&g, "r");

    assert_eq!(a.contractions(), 2);
    assert_eq!(a.weight(), 4.0 + 1.0 + 6.0 + 2.0);
    assert_eq!(a.len(), 4);
}

#[test]
fn equal_weight_ties_go_to_the_first_incoming_edge() {
    let g = graph(&[("r", "a", 1.0), ("r", "b", 1.0), ("a", "c", 2.0), ("b", "c", 2.0)]);
    let a = solve_at(&g, "r");
    assert_eq!(
        a.parent_of(&Vertex::new("c")).map(ToString::to_string).as_deref(),
        Some("a -> c 2.00")
    );

    let swapped = graph(&[("r", "a", 1.0), ("r", "b", 1.0), ("b", "c", 2.0), ("a", "c", 2.0)]);
    let b = solve_at(&swapped, "r");
    assert_eq!(
        b.parent_of(&Vertex::new("c")).map(ToString::to_string).as_deref(),
        Some("b -> c 2.00")
    );
}

#[test]
fn repeated_solves_return_identical_results() {
    let g = graph(&[
        ("r", "a", 3.0),
        ("r", "b", 3.0),
        ("a", "b", 1.0),
        ("b", "a", 1.0),
        ("a", "c", 1.0),
        ("b", "c", 1.0),
        ("c", "a", 0.5),
    ]);
    let first = solve_at(&g, "r");
    for _ in 0..5 {
        assert_eq!(solve_at(&g, "r"), first);
    }
}

#[test]
fn self_loops_and_parallel_edges_are_handled() {
    let g = graph(&[
        ("r", "a", 3.0),
        ("r", "a", 2.0),
        ("a", "a", 0.0),
        ("a", "b", 1.0),
        ("b", "b", 0.0),
    ]);
    let a = solve_at(&g, "r");
    assert_eq!(sorted_edges(&a), vec!["a -> b 1.00", "r -> a 2.00"]);
    assert_eq!(a.weight(), 3.0);
}

#[test]
fn zero_weight_edges_are_allowed() {
    let g = graph(&[("r", "a", 0.0), ("a", "b", 0.0), ("b", "a", 0.0)]);
    let a = solve_at(&g, "r");
    assert_eq!(a.weight(), 0.0);
    assert_eq!(sorted_edges(&a), vec!["a -> b 0.00", "r -> a 0.00"]);
}

#[test]
fn root_only_graph_has_an_empty_arborescence() {
    let mut g = Graph::new();
    g.add_vertex("r");
    let a = solve_at(&g, "r");
    assert!(a.is_empty());
    assert_eq!(a.weight(), 0.0);
    assert_eq!(a.to_string(), "weight: 0.00");
}

#[test]
fn missing_root_is_rejected() {
    let g = graph(&[("a", "b", 1.0)]);
    let err = solve(&g, &Vertex::new("r")).unwrap_err();
    assert!(matches!(err, Error::RootNotInGraph { ref root } if root == "r"));
    assert!(err.is_infeasible());
}

#[test]
fn vertex_without_incoming_edges_is_unreachable() {
    let g = graph(&[("r", "a", 1.0), ("b", "a", 1.0)]);
    let err = solve(&g, &Vertex::new("r")).unwrap_err();
    assert!(matches!(err, Error::UnreachableVertex { ref vertex } if vertex == "b"));
}

#[test]
fn only_self_loops_do_not_make_a_vertex_reachable() {
    let g = graph(&[("r", "a", 1.0), ("b", "b", 1.0)]);
    let err = solve(&g, &Vertex::new("r")).unwrap_err();
    assert!(matches!(err, Error::UnreachableVertex { ref vertex } if vertex == "b"));
}

#[test]
fn cycle_detached_from_the_root_is_unreachable() {
    // Every non-root vertex has an incoming edge, but none can be reached from r.
    let g = graph(&[("a", "b", 1.0), ("b", "a", 1.0), ("a", "r", 1.0)]);
    let err = solve(&g, &Vertex::new("r")).unwrap_err();
    assert!(matches!(err, Error::UnreachableVertex { ref vertex } if vertex == "a"));
}

#[test]
fn atomic_vertex_named_like_a_contracted_cycle_stays_separate() {
    // Contracting {a, b} must not merge it with the input vertex literally named "a,b".
    let g = graph(&[
        ("r", "a,b", 1.0),
        ("b", "a", 1.0),
        ("a,b", "a", 1.0),
        ("a", "b", 1.0),
        ("r", "a", 10.0),
    ]);
    let a = solve_at(&g, "r");

    assert_eq!(a.contractions(), 1);
    assert_eq!(a.weight(), 3.0);
    assert_eq!(
        sorted_edges(&a),
        vec!["a -> b 1.00", "a,b -> a 1.00", "r -> a,b 1.00"]
    );
    assert_eq!(
        a.parent_of(&Vertex::new("a")).map(|e| e.from().is_composite()),
        Some(false)
    );
}

#[test]
fn display_lists_edges_then_weight() {
    let g = graph(&[("r", "a", 1.5)]);
    let a = solve_at(&g, "r");
    assert_eq!(a.to_string(), "r -> a 1.50\nweight: 1.50");
}

#[test]
fn solving_from_a_different_root_changes_the_tree() {
    let g = graph(&[("a", "b", 1.0), ("b", "a", 2.0), ("b", "c", 1.0), ("c", "a", 1.0)]);
    assert_eq!(solve_at(&g, "a").weight(), 2.0);
    assert_eq!(solve_at(&g, "b").weight(), 2.0);
    assert_eq!(
        sorted_edges(&solve_at(&g, "c")),
        vec!["a -> b 1.00", "c -> a 1.00"]
    );
}
