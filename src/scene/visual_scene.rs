use std::collections::HashMap;

use egui::{Color32, Pos2, Rect, Stroke};

use super::painter::ScenePainter;
use super::visual_node::VisualNode;
use crate::config::settings::ViewerConfig;
use crate::error::InvalidGraphError;
use crate::graph_utils::graph::{DiGraph, GraphNode};
use crate::layout::geometry::{LineSegment, edge_arrow};
use crate::layout::layered::LayeredLayout;

#[derive(Clone, Debug)]
struct SceneStyle {
    node_fill: Color32,
    outline: Stroke,
    edge: Stroke,
    text_color: Color32,
    text_size: f32,
    arrow_length: f32,
    arrow_angle_deg: f32,
}

/// Owns the graph and one `VisualNode` per graph node.
///
/// The bounding box is recomputed eagerly after every mutation, so it is
/// always the union of the current node extents.
pub struct VisualScene<N> {
    graph: DiGraph<N>,
    nodes: HashMap<N, VisualNode<N>>,
    layout: LayeredLayout,
    node_size: f32,
    style: SceneStyle,
    bounding_rect: Rect,
}

impl<N: GraphNode> VisualScene<N> {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            graph: DiGraph::new(),
            nodes: HashMap::new(),
            layout: LayeredLayout::from_config(config),
            node_size: config.node_diameter,
            style: SceneStyle {
                node_fill: config.node_fill(),
                outline: config.outline_stroke(),
                edge: config.edge_stroke(),
                text_color: config.text_color(),
                text_size: config.text_size,
                arrow_length: config.arrow_length,
                arrow_angle_deg: config.arrow_angle_deg,
            },
            bounding_rect: Rect::NOTHING,
        }
    }

    /// Replace the whole graph.
    ///
    /// Layout runs before anything is discarded: on error the previous graph
    /// and its visual nodes are left untouched.
    pub fn set_graph(&mut self, graph: DiGraph<N>) -> Result<(), InvalidGraphError> {
        let layout = match self.layout.compute(&graph) {
            Ok(layout) => layout,
            Err(e) => {
                log::warn!("rejected graph with {} nodes: {}", graph.node_count(), e);
                return Err(e);
            }
        };
        let size = self.node_size;
        self.nodes = layout
            .positions
            .into_iter()
            .map(|(node, center)| (node.clone(), VisualNode::centered_at(node, center, size)))
            .collect();
        log::info!(
            "scene holds {} nodes, {} edges in {} generations",
            graph.node_count(),
            graph.edge_count(),
            layout.generations.len()
        );
        self.graph = graph;
        self.update_bounding_rect();
        Ok(())
    }

    pub fn graph(&self) -> &DiGraph<N> { &self.graph }
    pub fn node_size(&self) -> f32 { self.node_size }

    pub fn visual_node(&self, node: &N) -> Option<&VisualNode<N>> {
        self.nodes.get(node)
    }

    /// Visual nodes in graph enumeration order (paint order).
    pub fn visual_nodes(&self) -> impl Iterator<Item = &VisualNode<N>> {
        self.graph.nodes().filter_map(|n| self.nodes.get(n))
    }

    /// Empty scenes report `Rect::NOTHING`.
    pub fn bounding_rect(&self) -> Rect {
        self.bounding_rect
    }

    fn update_bounding_rect(&mut self) {
        self.bounding_rect = self.nodes.values().fold(Rect::NOTHING, |acc, vn| acc.union(vn.rect()));
    }

    /// Move `node` so its geometric center lands on `center`.
    pub fn set_node_center(&mut self, node: &N, center: Pos2) -> bool {
        match self.nodes.get_mut(node) {
            Some(vn) => {
                vn.set_center(center);
                self.update_bounding_rect();
                true
            }
            None => false,
        }
    }

    /// Topmost visual node under `scene_pos`, if any.
    pub fn node_at(&self, scene_pos: Pos2) -> Option<&N> {
        // Later nodes are painted over earlier ones
        self.graph
            .nodes()
            .rev()
            .find(|n| self.nodes.get(*n).is_some_and(|vn| vn.contains(scene_pos)))
    }

    /// Paint nodes, then edges on top of them.
    pub fn render(&self, painter: &mut impl ScenePainter) {
        self.render_nodes(painter);
        self.render_edges(painter);
    }

    pub fn render_nodes(&self, painter: &mut impl ScenePainter) {
        for vn in self.visual_nodes() {
            let center = vn.center();
            painter.circle(center, vn.size() / 2.0, self.style.node_fill, self.style.outline);
            painter.text(center, &vn.node().to_string(), self.style.text_size, self.style.text_color);
        }
    }

    /// One center-to-center line per edge plus a chevron at its midpoint.
    pub fn render_edges(&self, painter: &mut impl ScenePainter) {
        for (from, to) in self.graph.edges() {
            let (Some(a), Some(b)) = (self.nodes.get(from), self.nodes.get(to)) else {
                continue;
            };
            let edge = LineSegment::new(a.center(), b.center());
            painter.line(edge.p1, edge.p2, self.style.edge);
            if let Some(chevron) = edge_arrow(edge, self.style.arrow_length, self.style.arrow_angle_deg) {
                for stroke in chevron.strokes() {
                    painter.line(stroke.p1, stroke.p2, self.style.edge);
                }
            }
        }
    }
}
