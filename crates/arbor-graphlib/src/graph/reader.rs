//! Edge-list text input.
//!
//! ```text
//! <E>
//! <from> <to> <weight>     (E times)
//! ```
//!
//! Tokens are whitespace separated and blank lines are skipped.

use super::{Edge, Graph};
use crate::error::{Error, Result};
use std::io::BufRead;

pub fn read_edge_list<R: BufRead>(reader: R) -> Result<Graph> {
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(i, line)| line.map(|l| (i + 1, l)));

    let mut next_content_line = move || -> Result<Option<(usize, String)>> {
        for item in lines.by_ref() {
            let (line_no, line) = item?;
            if !line.trim().is_empty() {
                return Ok(Some((line_no, line)));
            }
        }
        Ok(None)
    };

    let Some((count_line, header)) = next_content_line()? else {
        return Err(Error::Parse {
            line: 1,
            message: "missing edge count".to_string(),
        });
    };
    let edge_count: usize = header.trim().parse().map_err(|_| Error::Parse {
        line: count_line,
        message: format!("expected a non-negative edge count, got `{}`", header.trim()),
    })?;

    let mut graph = Graph::with_capacity(edge_count.min(1 << 16), edge_count.min(1 << 16));
    let mut last_line = count_line;
    for read in 0..edge_count {
        let Some((line_no, line)) = next_content_line()? else {
            return Err(Error::Parse {
                line: last_line + 1,
                message: format!("expected {edge_count} edges, found {read}"),
            });
        };
        last_line = line_no;
        graph.add_edge(parse_edge(line_no, &line)?);
    }

    if let Some((line_no, _)) = next_content_line()? {
        tracing::warn!(
            line = line_no,
            declared = edge_count,
            "ignoring input after the declared edges"
        );
    }

    Ok(graph)
}

fn parse_edge(line_no: usize, line: &str) -> Result<Edge> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [from, to, weight] = tokens.as_slice() else {
        return Err(Error::Parse {
            line: line_no,
            message: format!(
                "expected `<from> <to> <weight>`, got {} token(s)",
                tokens.len()
            ),
        });
    };
    let weight: f64 = weight.parse().map_err(|_| Error::Parse {
        line: line_no,
        message: format!("invalid weight `{weight}`"),
    })?;
    Edge::new(*from, *to, weight)
}
