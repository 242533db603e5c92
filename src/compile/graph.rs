use crate::foundation::error::{ScrollcueError, ScrollcueResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mark {
    Pending,
    InProgress,
    Done,
}

/// "Reads from" edges between entries, indexed by entry position.
#[derive(Debug, Default)]
pub(crate) struct DependencyGraph {
    edges: Vec<Vec<usize>>,
}

impl DependencyGraph {
    pub(crate) fn with_nodes(n: usize) -> Self {
        Self {
            edges: vec![Vec::new(); n],
        }
    }

    pub(crate) fn add_edge(&mut self, from: usize, to: usize) {
        let outs = &mut self.edges[from];
        if !outs.contains(&to) {
            outs.push(to);
        }
    }

    /// Dependencies-first order over every node.
    ///
    /// Roots are visited in index order and edges in insertion order, so the
    /// result is deterministic. Reaching a node that is still in progress is
    /// a cycle; `ids` names the nodes in the returned error.
    pub(crate) fn compile_order(&self, ids: &[String]) -> ScrollcueResult<Vec<usize>> {
        let n = self.edges.len();
        let mut marks = vec![Mark::Pending; n];
        let mut order = Vec::with_capacity(n);

        for root in 0..n {
            if marks[root] != Mark::Pending {
                continue;
            }
            marks[root] = Mark::InProgress;
            // (node, next edge to follow)
            let mut stack: Vec<(usize, usize)> = vec![(root, 0)];

            while let Some(top) = stack.last_mut() {
                let node = top.0;
                let next = self.edges[node].get(top.1).copied();
                top.1 += 1;

                let Some(next) = next else {
                    marks[node] = Mark::Done;
                    order.push(node);
                    stack.pop();
                    continue;
                };
                match marks[next] {
                    Mark::Pending => {
                        marks[next] = Mark::InProgress;
                        stack.push((next, 0));
                    }
                    Mark::InProgress => {
                        let from = stack.iter().position(|&(v, _)| v == next).unwrap_or(0);
                        let mut cycle: Vec<String> =
                            stack[from..].iter().map(|&(v, _)| ids[v].clone()).collect();
                        cycle.push(ids[next].clone());
                        return Err(ScrollcueError::CyclicReference { cycle });
                    }
                    Mark::Done => {}
                }
            }
        }

        Ok(order)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/graph.rs"]
mod tests;
