use arbor_graphlib::{Error, Graph, read_edge_list};

#[test]
fn reads_the_declared_number_of_edges() {
    let g = Graph::from_edge_list("3\nr a 5\nr b 4.5\na b 1\n").expect("valid input");
    assert_eq!(g.edge_count(), 3);
    let names: Vec<&str> = g.vertices().map(|v| v.name()).collect();
    assert_eq!(names, vec!["r", "a", "b"]);
    let listed: Vec<String> = g.edges().map(|(_, e)| e.to_string()).collect();
    assert_eq!(listed, vec!["r -> a 5.00", "r -> b 4.50", "a -> b 1.00"]);
}

#[test]
fn tolerates_extra_whitespace_and_blank_lines() {
    let g: Graph = "\n  2 \n\nr\ta   1.25\n   a   b 0\n".parse().expect("valid input");
    assert_eq!(g.edge_count(), 2);
    assert_eq!(g.vertex_count(), 3);
}

#[test]
fn zero_edges_yields_an_empty_graph() {
    let g = Graph::from_edge_list("0\n").expect("valid input");
    assert!(g.is_empty());
}

#[test]
fn ignores_lines_after_the_declared_edges() {
    let g = Graph::from_edge_list("1\nr a 1\nextra line here\n").expect("valid input");
    assert_eq!(g.edge_count(), 1);
}

#[test]
fn reads_from_a_buffered_reader() {
    let input = std::io::Cursor::new(b"1\nu v 2\n".to_vec());
    let g = read_edge_list(input).expect("valid input");
    assert_eq!(g.edge_count(), 1);
}

#[test]
fn reports_the_offending_line() {
    let cases = [
        ("", 1),
        ("two\n", 1),
        ("-1\n", 1),
        ("2\nr a 1\n", 3),
        ("1\nr a\n", 2),
        ("1\nr a 1 extra\n", 2),
        ("2\nr a 1\n\nr b x\n", 4),
    ];
    for (input, expected_line) in cases {
        match Graph::from_edge_list(input) {
            Err(Error::Parse { line, .. }) => {
                assert_eq!(line, expected_line, "input {input:?}");
            }
            other => panic!("input {input:?}: expected a parse error, got {other:?}"),
        }
    }
}

#[test]
fn rejects_negative_and_nan_weights_from_input() {
    for input in ["1\nr a -1\n", "1\nr a NaN\n"] {
        assert!(matches!(
            Graph::from_edge_list(input),
            Err(Error::InvalidEdgeWeight { .. })
        ));
    }
}
