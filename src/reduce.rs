// Transitive Reduction — Remove edges implied by a longer path
//
// An edge p -> d is redundant when p has another direct child c from which d
// is reachable, i.e. a path p -> c -> ... -> d of length >= 2 exists. The pass
// runs in two phases:
//
//   1. Mark: every redundancy is judged against the ORIGINAL edge set. The
//      adjacency view and the reachability closure are built once up front
//      and never touched while marking.
//   2. Remove: every edge statement whose (from, to) pair was marked is
//      dropped, duplicates included.
//
// Removing while marking would make the result depend on the order in which
// edges are visited.
//
// Cycles: the witness child c must lie outside both the component of p and
// the component of d (a component being the set of nodes mutually reachable
// with a node). On acyclic input every component is a single node, so this
// reduces to "c is neither p nor d". On cyclic input it stops two edges from
// justifying each other around a cycle and both being removed, which would
// disconnect nodes that were reachable before. Self-loops are never marked
// and never act as the first step of a witness path.

use crate::graph::{Adjacency, Edge, Graph};
use std::collections::{HashMap, HashSet};

// Public API

/// Mark phase only: the edges `simplify` would remove, one per distinct
/// (from, to) pair, in statement order. The graph is not modified.
pub fn redundant_edges(graph: &Graph) -> Vec<Edge> {
    let marked = mark(graph);
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for edge in graph.edges() {
        let key = (edge.from.clone(), edge.to.clone());
        if marked.contains(&key) && seen.insert(key) {
            out.push(edge.clone());
        }
    }
    out
}

/// Remove every redundant edge from the graph in place. Returns the removed
/// edges, one per distinct (from, to) pair, in statement order.
pub fn simplify(graph: &mut Graph) -> Vec<Edge> {
    let removed = redundant_edges(graph);
    if removed.is_empty() {
        tracing::info!(graph = %graph.name, "no redundant edges");
        return removed;
    }

    let pairs: HashSet<(String, String)> = removed
        .iter()
        .map(|e| (e.from.clone(), e.to.clone()))
        .collect();
    let statements = graph.remove_edges(&pairs);

    tracing::info!(
        graph = %graph.name,
        pairs = removed.len(),
        statements,
        "removed redundant edges"
    );
    removed
}

impl Graph {
    /// See [`simplify`].
    pub fn simplify(&mut self) -> Vec<Edge> {
        simplify(self)
    }
}

// Mark phase

/// Reachability closure of the original adjacency view.
struct Closure<'a> {
    adj: &'a Adjacency,
    descendants: HashMap<&'a str, Vec<&'a str>>,
    reach: HashMap<&'a str, HashSet<&'a str>>,
}

impl<'a> Closure<'a> {
    fn new(adj: &'a Adjacency) -> Self {
        let descendants: HashMap<&str, Vec<&str>> =
            adj.nodes().map(|n| (n, adj.descendants(n))).collect();
        let reach = descendants
            .iter()
            .map(|(&n, ds)| (n, ds.iter().copied().collect()))
            .collect();
        Self {
            adj,
            descendants,
            reach,
        }
    }

    fn descendants(&self, node: &str) -> &[&'a str] {
        self.descendants.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    fn reaches(&self, from: &str, to: &str) -> bool {
        self.reach.get(from).is_some_and(|set| set.contains(to))
    }

    fn same_component(&self, a: &str, b: &str) -> bool {
        a == b || (self.reaches(a, b) && self.reaches(b, a))
    }
}

fn mark(graph: &Graph) -> HashSet<(String, String)> {
    let adj = graph.adjacency();
    let closure = Closure::new(&adj);
    let mut marked = HashSet::new();

    for parent in adj.nodes() {
        let children: Vec<&str> = closure
            .adj
            .successors(parent)
            .iter()
            .map(String::as_str)
            .collect();
        if children.len() < 2 {
            continue;
        }
        let child_set: HashSet<&str> = children.iter().copied().collect();
        let mut tried = HashSet::new();

        for &direct in &children {
            if !tried.insert(direct) || closure.same_component(parent, direct) {
                continue;
            }
            for &indirect in closure.descendants(direct) {
                if !child_set.contains(indirect) || closure.same_component(direct, indirect) {
                    continue;
                }
                if marked.insert((parent.to_string(), indirect.to_string())) {
                    tracing::debug!(
                        from = parent,
                        to = indirect,
                        via = direct,
                        "edge is redundant"
                    );
                }
            }
        }
    }
    marked
}
