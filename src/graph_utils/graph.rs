use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::error::InvalidGraphError;

// Basic type aliases for clarity
type Key = String;
type Value = String;

/// Ordered key/value mapping shown in the properties panel.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties(Vec<(Key, Value)>);

impl Properties {
    pub fn new() -> Self {
        Properties(Vec::new())
    }

    // Insert or replace, keeping the original position of an existing key
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.0.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.0.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Properties::new();
        for (k, v) in iter {
            props.insert(k, v);
        }
        props
    }
}

/// A node identifier the viewer can lay out and select.
///
/// Identity is whatever `Eq`/`Hash` say it is; the viewer never creates or
/// rewrites identifiers. The `Display` form is used as the node caption.
pub trait GraphNode: Clone + Eq + Hash + fmt::Display {
    /// Key/value properties surfaced when the node is selected, if any.
    fn properties(&self) -> Option<Properties> {
        None
    }

    fn type_name(&self) -> String {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Properties reported by a selection event.
    ///
    /// Falls back to `{type, name}` when the node exposes no mapping.
    fn selection_properties(&self) -> Properties {
        match self.properties() {
            Some(props) => props,
            None => [("type", self.type_name()), ("name", self.to_string())].into_iter().collect(),
        }
    }
}

// "alloc::string::String" -> "String", "core::option::Option<u8>" -> "Option"
fn short_type_name(full: &str) -> String {
    let base = full.split('<').next().unwrap_or(full);
    let prefix = if base.starts_with('&') { "&" } else { "" };
    let name = base.rsplit("::").next().unwrap_or(base).trim_start_matches('&');
    format!("{}{}", prefix, name)
}

impl GraphNode for String {}
impl GraphNode for &'static str {}

macro_rules! impl_graph_node_for_ints {
    ($($t:ty),*) => { $(impl GraphNode for $t {})* };
}
impl_graph_node_for_ints!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

/// Node loaded from a graph file: a string id plus ordered metadata.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LabeledNode {
    pub id: String,
    #[serde(default)]
    pub properties: Properties,
}

impl LabeledNode {
    pub fn new(id: impl Into<String>) -> Self {
        LabeledNode { id: id.into(), properties: Properties::new() }
    }

    pub fn with_property(mut self, key: impl Into<Key>, value: impl Into<Value>) -> Self {
        self.properties.insert(key, value);
        self
    }
}

// Identity is the id alone, metadata does not participate
impl PartialEq for LabeledNode {
    fn eq(&self, other: &Self) -> bool { self.id == other.id }
}
impl Eq for LabeledNode {}

impl Hash for LabeledNode {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for LabeledNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

impl GraphNode for LabeledNode {
    fn properties(&self) -> Option<Properties> {
        if self.properties.is_empty() { None } else { Some(self.properties.clone()) }
    }
}

/// Directed graph with stable, insertion-ordered node enumeration.
#[derive(Clone, Debug)]
pub struct DiGraph<N> {
    nodes: Vec<N>,
    index: HashMap<N, usize>,
    edges: Vec<(usize, usize)>,
}

impl<N: GraphNode> Default for DiGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: GraphNode> DiGraph<N> {
    // Instantiate a new, empty graph
    pub fn new() -> Self {
        DiGraph { nodes: Vec::new(), index: HashMap::new(), edges: Vec::new() }
    }

    // Add a node; returns false if an equal node is already present
    pub fn add_node(&mut self, node: N) -> bool {
        if self.index.contains_key(&node) {
            return false;
        }
        self.index.insert(node.clone(), self.nodes.len());
        self.nodes.push(node);
        true
    }

    // Add an edge if both ends exist
    pub fn add_edge(&mut self, from: &N, to: &N) -> Result<(), InvalidGraphError> {
        match (self.index.get(from), self.index.get(to)) {
            (Some(&a), Some(&b)) => {
                self.edges.push((a, b));
                Ok(())
            }
            _ => Err(InvalidGraphError::MissingEndpoint { from: from.to_string(), to: to.to_string() }),
        }
    }

    /// Build a graph from node and edge lists, rejecting dangling edges.
    pub fn from_edges<I, E>(nodes: I, edges: E) -> Result<Self, InvalidGraphError>
    where
        I: IntoIterator<Item = N>,
        E: IntoIterator<Item = (N, N)>,
    {
        let mut graph = Self::new();
        for n in nodes {
            graph.add_node(n);
        }
        for (a, b) in edges {
            graph.add_edge(&a, &b)?;
        }
        Ok(graph)
    }

    pub fn contains(&self, node: &N) -> bool { self.index.contains_key(node) }
    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.edges.len() }
    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    pub fn nodes(&self) -> std::slice::Iter<'_, N> {
        self.nodes.iter()
    }

    pub fn edges(&self) -> impl Iterator<Item = (&N, &N)> {
        self.edges.iter().map(|&(a, b)| (&self.nodes[a], &self.nodes[b]))
    }

    pub fn predecessors<'a>(&'a self, node: &'a N) -> impl Iterator<Item = &'a N> {
        let target = self.index.get(node).copied();
        self.edges
            .iter()
            .filter(move |(_, b)| Some(*b) == target)
            .map(move |&(a, _)| &self.nodes[a])
    }

    /// Partition nodes into topological generations.
    ///
    /// Generation 0 holds the nodes without incoming edges; every other node
    /// sits one generation below its deepest predecessor. Within a generation
    /// nodes keep insertion order.
    pub fn topological_generations(&self) -> Result<Vec<Vec<N>>, InvalidGraphError> {
        let n = self.nodes.len();
        let mut indegree = vec![0usize; n];
        let mut successors: Vec<Vec<usize>> = vec![Vec::new(); n];
        for &(a, b) in &self.edges {
            indegree[b] += 1;
            successors[a].push(b);
        }

        let mut current: Vec<usize> = (0..n).filter(|&i| indegree[i] == 0).collect();
        let mut generations = Vec::new();
        let mut placed = 0usize;
        while !current.is_empty() {
            let mut next = Vec::new();
            for &i in &current {
                for &s in &successors[i] {
                    indegree[s] -= 1;
                    if indegree[s] == 0 {
                        next.push(s);
                    }
                }
            }
            placed += current.len();
            current.sort_unstable();
            generations.push(current.iter().map(|&i| self.nodes[i].clone()).collect());
            current = next;
        }

        // Nodes on (or downstream of) a cycle never reach indegree zero
        if placed < n {
            return Err(InvalidGraphError::Cycle { unplaced: n - placed });
        }
        Ok(generations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_type_names() {
        assert_eq!(short_type_name("alloc::string::String"), "String");
        assert_eq!(short_type_name("&str"), "&str");
        assert_eq!(short_type_name("dag_viewer::graph_utils::graph::LabeledNode"), "LabeledNode");
        assert_eq!(short_type_name("core::option::Option<u8>"), "Option");
    }

    #[test]
    fn fallback_properties_use_type_and_name() {
        let props = 42u32.selection_properties();
        assert_eq!(props.get("type"), Some("u32"));
        assert_eq!(props.get("name"), Some("42"));
        assert_eq!(props.len(), 2);
    }

    #[test]
    fn properties_insert_keeps_order() {
        let mut p = Properties::new();
        p.insert("b", "1");
        p.insert("a", "2");
        p.insert("b", "3");
        let keys: Vec<&str> = p.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(p.get("b"), Some("3"));
    }

    #[test]
    fn self_edge_is_a_cycle() {
        let g = DiGraph::from_edges(["a"], [("a", "a")]).expect("edge endpoints exist");
        assert_eq!(g.topological_generations(), Err(InvalidGraphError::Cycle { unplaced: 1 }));
    }
}
