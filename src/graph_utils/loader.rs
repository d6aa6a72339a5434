use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, anyhow, bail};
use serde::{Deserialize, Serialize};

use super::graph::{DiGraph, LabeledNode};

/// On-disk graph description, either JSON or RON.
#[derive(Debug, Serialize, Deserialize)]
pub struct GraphFile {
    pub nodes: Vec<LabeledNode>,
    // store edges as (from id, to id) pairs
    #[serde(default)]
    pub edges: Vec<(String, String)>,
}

impl GraphFile {
    pub fn from_graph(graph: &DiGraph<LabeledNode>) -> Self {
        Self {
            nodes: graph.nodes().cloned().collect(),
            edges: graph.edges().map(|(a, b)| (a.id.clone(), b.id.clone())).collect(),
        }
    }

    /// Convert into a runtime graph.
    ///
    /// Duplicate ids are rejected here; dangling edges surface as
    /// `InvalidGraphError::MissingEndpoint`.
    pub fn into_graph(self) -> anyhow::Result<DiGraph<LabeledNode>> {
        let mut graph = DiGraph::new();
        for node in self.nodes {
            let id = node.id.clone();
            if !graph.add_node(node) {
                bail!("duplicate node id: {}", id);
            }
        }
        for (from, to) in self.edges {
            graph.add_edge(&LabeledNode::new(from), &LabeledNode::new(to))?;
        }
        Ok(graph)
    }
}

pub fn load_from_path(path: &Path) -> anyhow::Result<DiGraph<LabeledNode>> {
    let mut f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let ext = path.extension().and_then(|s| s.to_str()).map(|s| s.to_ascii_lowercase());
    let file: GraphFile = match ext.as_deref() {
        Some("json") => serde_json::from_str(&buf)?,
        Some("ron") => ron::from_str(&buf)?,
        other => return Err(anyhow!("unsupported graph file extension: {:?}", other)),
    };
    let graph = file.into_graph()?;
    log::info!(
        "loaded graph from {} ({} nodes, {} edges)",
        path.display(),
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Small build pipeline DAG shown when no graph file is given.
pub fn sample_graph() -> DiGraph<LabeledNode> {
    let nodes = [
        LabeledNode::new("fetch").with_property("stage", "source").with_property("owner", "ci"),
        LabeledNode::new("configure").with_property("stage", "prepare"),
        LabeledNode::new("codegen").with_property("stage", "prepare").with_property("tool", "build.rs"),
        LabeledNode::new("compile").with_property("stage", "build").with_property("profile", "release"),
        LabeledNode::new("docs").with_property("stage", "build"),
        LabeledNode::new("test").with_property("stage", "verify").with_property("runner", "cargo test"),
        LabeledNode::new("package"),
    ];
    let edges = [
        ("fetch", "configure"),
        ("fetch", "codegen"),
        ("configure", "compile"),
        ("codegen", "compile"),
        ("configure", "docs"),
        ("compile", "test"),
        ("test", "package"),
        ("docs", "package"),
    ];

    let mut graph = DiGraph::new();
    for n in nodes {
        graph.add_node(n);
    }
    for (a, b) in edges {
        // Endpoints are all listed above
        if let Err(e) = graph.add_edge(&LabeledNode::new(a), &LabeledNode::new(b)) {
            log::error!("sample graph: {}", e);
        }
    }
    graph
}
