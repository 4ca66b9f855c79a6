//! A minimal directed graph over `Copy + Eq + Hash` vertex ids, with cycle
//! detection and topological sort — the two primitives the subtype graph
//! and the inheritance graph are both built from.

use rustc_hash::{FxHashMap, FxHashSet};
use std::hash::Hash;

#[derive(Debug, Clone)]
pub struct Graph<V> {
    vertices: Vec<V>,
    edges: FxHashMap<V, Vec<V>>,
}

impl<V: Copy + Eq + Hash> Default for Graph<V> {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            edges: FxHashMap::default(),
        }
    }
}

impl<V: Copy + Eq + Hash> Graph<V> {
    pub fn add_vertex(&mut self, v: V) {
        if !self.edges.contains_key(&v) {
            self.vertices.push(v);
            self.edges.insert(v, Vec::new());
        }
    }

    pub fn add_edge(&mut self, from: V, to: V) {
        self.add_vertex(from);
        self.add_vertex(to);
        self.edges.get_mut(&from).unwrap().push(to);
    }

    #[must_use]
    pub fn is_cyclic(&self) -> bool {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            InProgress,
            Done,
        }
        let mut marks: FxHashMap<V, Mark> = self
            .vertices
            .iter()
            .map(|v| (*v, Mark::Unvisited))
            .collect();

        fn visit<V: Copy + Eq + Hash>(
            v: V,
            edges: &FxHashMap<V, Vec<V>>,
            marks: &mut FxHashMap<V, Mark>,
        ) -> bool {
            match marks.get(&v) {
                Some(Mark::InProgress) => return true,
                Some(Mark::Done) => return false,
                _ => {}
            }
            marks.insert(v, Mark::InProgress);
            if let Some(succs) = edges.get(&v) {
                for &succ in succs {
                    if visit(succ, edges, marks) {
                        return true;
                    }
                }
            }
            marks.insert(v, Mark::Done);
            false
        }

        for &v in &self.vertices {
            if matches!(marks.get(&v), Some(Mark::Unvisited)) && visit(v, &self.edges, &mut marks)
            {
                return true;
            }
        }
        false
    }

    /// A topological order (edges point from earlier to later) via Kahn's
    /// algorithm. Callers only invoke this after `is_cyclic` returns
    /// `false`, so every vertex is guaranteed to be emitted.
    #[must_use]
    pub fn topological_sort(&self) -> Vec<V> {
        let mut in_degree: FxHashMap<V, usize> =
            self.vertices.iter().map(|v| (*v, 0)).collect();
        for succs in self.edges.values() {
            for succ in succs {
                *in_degree.entry(*succ).or_insert(0) += 1;
            }
        }
        let mut ready: Vec<V> = self
            .vertices
            .iter()
            .copied()
            .filter(|v| in_degree.get(v).copied().unwrap_or(0) == 0)
            .collect();
        let mut order = Vec::with_capacity(self.vertices.len());
        let mut visited: FxHashSet<V> = FxHashSet::default();
        while let Some(v) = ready.pop() {
            if !visited.insert(v) {
                continue;
            }
            order.push(v);
            if let Some(succs) = self.edges.get(&v) {
                for &succ in succs {
                    let entry = in_degree.get_mut(&succ).unwrap();
                    *entry -= 1;
                    if *entry == 0 {
                        ready.push(succ);
                    }
                }
            }
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acyclic_graph_is_not_cyclic() {
        let mut g: Graph<u32> = Graph::default();
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        assert!(!g.is_cyclic());
    }

    #[test]
    fn self_loop_is_cyclic() {
        let mut g: Graph<u32> = Graph::default();
        g.add_edge(0, 0);
        assert!(g.is_cyclic());
    }

    #[test]
    fn longer_cycle_is_cyclic() {
        let mut g: Graph<u32> = Graph::default();
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        g.add_edge(2, 0);
        assert!(g.is_cyclic());
    }

    #[test]
    fn topological_sort_respects_edge_direction() {
        let mut g: Graph<u32> = Graph::default();
        g.add_edge(0, 1);
        g.add_edge(0, 2);
        g.add_edge(1, 3);
        g.add_edge(2, 3);
        let order = g.topological_sort();
        let pos = |v: u32| order.iter().position(|&x| x == v).unwrap();
        assert!(pos(0) < pos(1));
        assert!(pos(0) < pos(2));
        assert!(pos(1) < pos(3));
        assert!(pos(2) < pos(3));
    }
}
