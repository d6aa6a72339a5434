use std::collections::HashMap;

use egui::{Pos2, pos2};

use crate::config::settings::ViewerConfig;
use crate::error::InvalidGraphError;
use crate::graph_utils::graph::{DiGraph, GraphNode};

/// Generation-based placement: one row per topological generation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayeredLayout {
    pub x_spacing: f32,
    pub y_spacing: f32,
}

/// Result of a layout pass.
#[derive(Clone, Debug)]
pub struct Layout<N> {
    pub generations: Vec<Vec<N>>,
    pub positions: HashMap<N, Pos2>,
}

impl<N: GraphNode> Layout<N> {
    pub fn position(&self, node: &N) -> Option<Pos2> {
        self.positions.get(node).copied()
    }

    pub fn generation_of(&self, node: &N) -> Option<usize> {
        self.generations.iter().position(|g| g.contains(node))
    }
}

impl LayeredLayout {
    pub fn new(x_spacing: f32, y_spacing: f32) -> Self {
        Self { x_spacing, y_spacing }
    }

    pub fn from_config(config: &ViewerConfig) -> Self {
        Self::new(config.x_spacing(), config.y_spacing())
    }

    /// Place every node of `graph`.
    ///
    /// Row `g` sits at `y = g * y_spacing`; inside a row nodes are spaced by
    /// `x_spacing` starting at `x = 0`, in the graph's enumeration order.
    pub fn compute<N: GraphNode>(&self, graph: &DiGraph<N>) -> Result<Layout<N>, InvalidGraphError> {
        let generations = graph.topological_generations()?;
        let mut positions = HashMap::with_capacity(graph.node_count());
        for (g, generation) in generations.iter().enumerate() {
            let y = g as f32 * self.y_spacing;
            for (i, node) in generation.iter().enumerate() {
                positions.insert(node.clone(), pos2(i as f32 * self.x_spacing, y));
            }
        }
        Ok(Layout { generations, positions })
    }
}

impl Default for LayeredLayout {
    fn default() -> Self {
        Self::from_config(&ViewerConfig::default())
    }
}
