use egui::Pos2;

use crate::graph_utils::graph::{GraphNode, Properties};
use crate::scene::visual_scene::VisualScene;
use crate::viewport::ViewportController;

/// Gesture state between pointer-down and pointer-up.
#[derive(Clone, Debug, PartialEq)]
pub enum InteractionState<N> {
    Idle,
    // Pointer went down on empty canvas; `last` is the previous device position
    Panning { last: Pos2 },
    DraggingNode { node: N },
}

impl<N> InteractionState<N> {
    pub fn name(&self) -> &'static str {
        match self {
            InteractionState::Idle => "idle",
            InteractionState::Panning { .. } => "panning",
            InteractionState::DraggingNode { .. } => "dragging",
        }
    }
}

/// Emitted when a gesture that started on a node ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionEvent {
    pub node_name: String,
    pub properties: Properties,
}

/// Turns raw pointer events into pans, node drags and selections.
///
/// A click on a node is a drag with zero movement: both end with a
/// `SelectionEvent`. Positions passed in are device coordinates.
#[derive(Clone, Debug)]
pub struct InteractionMachine<N> {
    state: InteractionState<N>,
}

impl<N: GraphNode> Default for InteractionMachine<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: GraphNode> InteractionMachine<N> {
    pub fn new() -> Self {
        Self { state: InteractionState::Idle }
    }

    pub fn state(&self) -> &InteractionState<N> { &self.state }

    /// Node currently held by a drag gesture.
    pub fn selection(&self) -> Option<&N> {
        match &self.state {
            InteractionState::DraggingNode { node } => Some(node),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, InteractionState::Idle)
    }

    /// Abandon any gesture without emitting a selection.
    pub fn reset(&mut self) {
        if !self.is_idle() {
            log::debug!("gesture '{}' abandoned", self.state.name());
        }
        self.state = InteractionState::Idle;
    }

    pub fn pointer_down(&mut self, device: Pos2, scene: &VisualScene<N>, viewport: &ViewportController) {
        // A second press mid-gesture does not restart it
        if !self.is_idle() {
            return;
        }
        let scene_pos = viewport.map_to_scene(device);
        self.state = match scene.node_at(scene_pos) {
            Some(node) => InteractionState::DraggingNode { node: node.clone() },
            None => InteractionState::Panning { last: device },
        };
        log::debug!("pointer down at {:?}: {}", device, self.state.name());
    }

    pub fn pointer_move(&mut self, device: Pos2, scene: &mut VisualScene<N>, viewport: &mut ViewportController) {
        match &mut self.state {
            InteractionState::Idle => {}
            InteractionState::Panning { last } => {
                viewport.pan(*last, device);
                *last = device;
            }
            InteractionState::DraggingNode { node } => {
                let target = viewport.map_to_scene(device);
                scene.set_node_center(node, target);
            }
        }
    }

    pub fn pointer_up(&mut self) -> Option<SelectionEvent> {
        let finished = std::mem::replace(&mut self.state, InteractionState::Idle);
        match finished {
            InteractionState::DraggingNode { node } => {
                let event = SelectionEvent { node_name: node.to_string(), properties: node.selection_properties() };
                log::debug!("selected {}", event.node_name);
                Some(event)
            }
            InteractionState::Panning { .. } | InteractionState::Idle => None,
        }
    }
}
