//! Adjacency-list text encoding.
//!
//! One line per vertex: the vertex id, then the ids of its neighbours.
//! The writer lists each edge once (on the line of its smaller endpoint) and
//! emits a line for every vertex, isolated ones included, so the vertex count
//! is always `max id + 1`. Lines starting with `#` are comments.

use super::{GraphState, MAX_VERTICES};
use crate::error::{RamseyError, RfResult};
use std::fmt::Write;

pub fn parse_adjlist(text: &str) -> RfResult<GraphState> {
    let mut edges: Vec<(usize, usize)> = Vec::new();
    let mut max_id: Option<usize> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = match raw.find('#') {
            Some(pos) => &raw[..pos],
            None => raw,
        };
        let mut tokens = line.split_whitespace();
        let Some(head) = tokens.next() else {
            continue;
        };

        let u = parse_vertex(head, line_no)?;
        max_id = Some(max_id.map_or(u, |m| m.max(u)));

        for tok in tokens {
            let v = parse_vertex(tok, line_no)?;
            if v == u {
                return Err(RamseyError::MalformedGraph {
                    line: line_no,
                    reason: format!("self-loop on vertex {}", u),
                });
            }
            max_id = Some(max_id.map_or(v, |m| m.max(v)));
            edges.push((u, v));
        }
    }

    let n = match max_id {
        Some(m) => m + 1,
        None => {
            return Err(RamseyError::MalformedGraph {
                line: 0,
                reason: "no vertices".to_string(),
            })
        }
    };

    let mut g = GraphState::empty(n);
    for (u, v) in edges {
        g.set_edge(u, v, true);
    }
    Ok(g)
}

fn parse_vertex(tok: &str, line: usize) -> RfResult<usize> {
    let id: usize = tok.parse().map_err(|_| RamseyError::MalformedGraph {
        line,
        reason: format!("invalid vertex id '{}'", tok),
    })?;
    if id >= MAX_VERTICES {
        return Err(RamseyError::MalformedGraph {
            line,
            reason: format!("vertex id {} exceeds the {}-vertex limit", id, MAX_VERTICES),
        });
    }
    Ok(id)
}

pub fn write_adjlist(graph: &GraphState) -> String {
    let n = graph.vertex_count();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "# ramseyforge adjacency list: {} vertices, {} edges",
        n,
        graph.edge_count()
    );
    for u in 0..n {
        let _ = write!(out, "{}", u);
        for v in (u + 1)..n {
            if graph.has_edge(u, v) {
                let _ = write!(out, " {}", v);
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_parse_preserves_isolated_vertices() {
        let g = GraphState::from_edges(6, &[(0, 1), (1, 2)]).unwrap();
        let text = write_adjlist(&g);
        assert!(text.contains("\n5\n"));
        let back = parse_adjlist(&text).unwrap();
        assert_eq!(back.vertex_count(), 6);
        assert_eq!(back, g);
    }

    #[test]
    fn test_parse_accepts_both_directions_and_duplicates() {
        let g = parse_adjlist("0 1 2\n1 0\n2\n3 1 # trailing comment\n").unwrap();
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.edge_count(), 3);
        assert!(g.has_edge(1, 3));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_adjlist("0 1\n1 x\n").unwrap_err();
        assert!(matches!(err, RamseyError::MalformedGraph { line: 2, .. }));
    }

    #[test]
    fn test_parse_rejects_self_loop() {
        assert!(matches!(
            parse_adjlist("0 0\n"),
            Err(RamseyError::MalformedGraph { line: 1, .. })
        ));
    }

    #[test]
    fn test_parse_rejects_empty_and_oversized() {
        assert!(parse_adjlist("# only comments\n\n").is_err());
        assert!(parse_adjlist("0 64\n").is_err());
    }
}
