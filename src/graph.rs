// Graph — In-memory model of a parsed graph description
//
// A Graph is a name plus an ordered list of statements, exactly as they
// appeared in the source. Statements are either node labels or directed
// edges; node names are plain strings, there are no node objects.
//
//   Parser ► Graph (this module) ► simplify() ► Display (renderer)
//
// The adjacency view used by the reducer is derived on demand from the edge
// statements and never stored on the Graph, so it cannot drift out of sync
// with the statement list.

use std::collections::{HashMap, HashSet};
use std::fmt;

// Statements

/// `name [label="text"];`. The label text keeps its surrounding quotes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label {
    pub name: String,
    pub label: String,
}

/// `from -> to;`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Statement {
    Label(Label),
    Edge(Edge),
}

impl Statement {
    pub fn label(name: impl Into<String>, label: impl Into<String>) -> Self {
        Statement::Label(Label {
            name: name.into(),
            label: label.into(),
        })
    }

    pub fn edge(from: impl Into<String>, to: impl Into<String>) -> Self {
        Statement::Edge(Edge::new(from, to))
    }

    pub fn as_edge(&self) -> Option<&Edge> {
        match self {
            Statement::Edge(e) => Some(e),
            Statement::Label(_) => None,
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Label(l) => write!(f, "{} [label={}];", l.name, l.label),
            Statement::Edge(e) => write!(f, "{} -> {};", e.from, e.to),
        }
    }
}

// Graph

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    /// Graph name from the `digraph <name>` header.
    pub name: String,
    pub(crate) statements: Vec<Statement>,
}

impl Graph {
    /// Create a new empty graph.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            statements: Vec::new(),
        }
    }

    pub fn add_statement(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    pub fn add_label(&mut self, name: impl Into<String>, label: impl Into<String>) {
        self.add_statement(Statement::label(name, label));
    }

    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.add_statement(Statement::edge(from, to));
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.statements.iter().filter_map(|s| match s {
            Statement::Label(l) => Some(l),
            Statement::Edge(_) => None,
        })
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.statements.iter().filter_map(Statement::as_edge)
    }

    /// Every node name mentioned by any statement, in order of first
    /// appearance.
    pub fn nodes(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut order = Vec::new();
        let names = self.statements.iter().flat_map(|s| match s {
            Statement::Label(l) => vec![l.name.as_str()],
            Statement::Edge(e) => vec![e.from.as_str(), e.to.as_str()],
        });
        for name in names {
            if seen.insert(name) {
                order.push(name);
            }
        }
        order
    }

    /// Label text of a node. With duplicate labels the first one wins.
    pub fn label_of(&self, node: &str) -> Option<&str> {
        self.labels()
            .find(|l| l.name == node)
            .map(|l| l.label.as_str())
    }

    /// Number of statements.
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Build the adjacency view of the current edge statements.
    pub fn adjacency(&self) -> Adjacency {
        Adjacency::from_edges(self.edges())
    }

    /// Drop every edge statement whose endpoints match one of `pairs`.
    /// Returns how many statements were removed.
    pub(crate) fn remove_edges(&mut self, pairs: &HashSet<(String, String)>) -> usize {
        let before = self.statements.len();
        self.statements.retain(|s| match s {
            Statement::Edge(e) => !pairs.contains(&(e.from.clone(), e.to.clone())),
            Statement::Label(_) => true,
        });
        before - self.statements.len()
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph {} {{", self.name)?;
        for statement in &self.statements {
            writeln!(f, "    {statement}")?;
        }
        writeln!(f, "}}")
    }
}

/// Serialize a graph back to description text.
pub fn render(graph: &Graph) -> String {
    graph.to_string()
}

// Adjacency view

/// Node → ordered direct successors, derived from a set of edges.
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    order: Vec<String>,
    succ: HashMap<String, Vec<String>>,
}

impl Adjacency {
    pub fn from_edges<'a>(edges: impl IntoIterator<Item = &'a Edge>) -> Self {
        let mut adj = Adjacency::default();
        for edge in edges {
            adj.touch(&edge.from);
            adj.touch(&edge.to);
            if let Some(list) = adj.succ.get_mut(&edge.from) {
                list.push(edge.to.clone());
            }
        }
        adj
    }

    fn touch(&mut self, node: &str) {
        if !self.succ.contains_key(node) {
            self.order.push(node.to_string());
            self.succ.insert(node.to_string(), Vec::new());
        }
    }

    /// Nodes in order of first appearance among the edges.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Direct successors in edge order. Duplicate edges show up twice.
    pub fn successors(&self, node: &str) -> &[String] {
        self.succ.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True iff a path of length >= 1 leads from `from` to `to`.
    pub fn reachable(&self, from: &str, to: &str) -> bool {
        let mut visited = HashSet::new();
        let mut stack: Vec<&str> = self.successors(from).iter().map(String::as_str).collect();
        while let Some(node) = stack.pop() {
            if node == to {
                return true;
            }
            if !visited.insert(node) {
                continue;
            }
            stack.extend(self.successors(node).iter().map(String::as_str));
        }
        false
    }

    /// All nodes reachable from `start` by a path of length >= 1, in
    /// depth-first discovery order. `start` itself is included only when it
    /// sits on a cycle.
    pub fn descendants(&self, start: &str) -> Vec<&str> {
        let mut visited = HashSet::new();
        let mut order = Vec::new();
        let mut stack: Vec<&str> = self
            .successors(start)
            .iter()
            .rev()
            .map(String::as_str)
            .collect();
        while let Some(node) = stack.pop() {
            if !visited.insert(node) {
                continue;
            }
            order.push(node);
            stack.extend(self.successors(node).iter().rev().map(String::as_str));
        }
        order
    }

    /// True iff `a` and `b` are mutually reachable (every node is in its own
    /// component).
    pub fn same_component(&self, a: &str, b: &str) -> bool {
        a == b || (self.reachable(a, b) && self.reachable(b, a))
    }
}
