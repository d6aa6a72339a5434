use thiserror::Error;

/// Raised when a graph cannot be laid out in generations.
///
/// `set_graph` is all-or-nothing: when this is returned the scene still holds
/// the previously accepted graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidGraphError {
    #[error("graph contains a directed cycle ({unplaced} node(s) never became ready)")]
    Cycle { unplaced: usize },

    #[error("edge {from} -> {to} references a node that is not in the graph")]
    MissingEndpoint { from: String, to: String },
}
