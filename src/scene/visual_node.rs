use egui::{Pos2, Rect, Vec2};

use crate::graph_utils::graph::GraphNode;

/// Placement record for one graph node: a circle of fixed diameter.
///
/// `pos` is the top-left corner of the node's square extent.
#[derive(Clone, Debug)]
pub struct VisualNode<N> {
    node: N,
    pos: Pos2,
    size: f32,
}

impl<N: GraphNode> VisualNode<N> {
    /// Create a node whose geometric center is at `center`.
    pub fn centered_at(node: N, center: Pos2, size: f32) -> Self {
        Self { node, pos: center - Vec2::splat(size / 2.0), size }
    }

    pub fn node(&self) -> &N { &self.node }
    pub fn pos(&self) -> Pos2 { self.pos }
    pub fn size(&self) -> f32 { self.size }

    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.pos, Vec2::splat(self.size))
    }

    pub fn center(&self) -> Pos2 {
        self.rect().center()
    }

    pub fn set_center(&mut self, center: Pos2) {
        self.pos = center - Vec2::splat(self.size / 2.0);
    }

    // Hit test against the drawn circle, not the square extent
    pub fn contains(&self, scene_pos: Pos2) -> bool {
        let r = self.size / 2.0;
        self.center().distance_sq(scene_pos) <= r * r
    }
}
