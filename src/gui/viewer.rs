use eframe::egui::{self, Color32, CursorIcon, PointerButton, Pos2, Sense, Vec2};

use crate::config::settings::ViewerConfig;
use crate::error::InvalidGraphError;
use crate::graph_utils::graph::{DiGraph, GraphNode};
use crate::interaction::{InteractionMachine, SelectionEvent};
use crate::scene::painter::EguiScenePainter;
use crate::scene::visual_scene::VisualScene;
use crate::viewport::ViewportController;

/// Pointer input in canvas-local device coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PointerInput {
    Down { pos: Pos2, button: PointerButton },
    Move { pos: Pos2 },
    Up { pos: Pos2, button: PointerButton },
    Wheel { pos: Pos2, delta: f32 },
}

/// Canvas widget: a scene, its viewport and the gesture state machine.
pub struct GraphViewer<N> {
    scene: VisualScene<N>,
    viewport: ViewportController,
    interaction: InteractionMachine<N>,
    background: Color32,
    view_size: Option<Vec2>,
}

impl<N: GraphNode> GraphViewer<N> {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            scene: VisualScene::new(config),
            viewport: ViewportController::new(config),
            interaction: InteractionMachine::new(),
            background: config.background(),
            view_size: None,
        }
    }

    pub fn scene(&self) -> &VisualScene<N> { &self.scene }
    pub fn viewport(&self) -> &ViewportController { &self.viewport }
    pub fn interaction(&self) -> &InteractionMachine<N> { &self.interaction }

    /// Replace the displayed graph. An in-flight gesture is dropped once
    /// the new graph is accepted.
    pub fn set_graph(&mut self, graph: DiGraph<N>) -> Result<(), InvalidGraphError> {
        self.scene.set_graph(graph)?;
        self.interaction.reset();
        Ok(())
    }

    /// Record the canvas size; the first call centers the scene origin.
    pub fn resize(&mut self, size: Vec2) {
        if self.view_size.is_none() {
            self.viewport.center_on_origin(size);
        }
        self.view_size = Some(size);
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
        if let Some(size) = self.view_size {
            self.viewport.center_on_origin(size);
        }
    }

    pub fn frame_content(&mut self) {
        if let Some(size) = self.view_size {
            self.viewport.frame(self.scene.bounding_rect(), size);
        }
    }

    pub fn handle(&mut self, input: PointerInput) -> Option<SelectionEvent> {
        match input {
            PointerInput::Down { pos, button: PointerButton::Primary } => {
                self.interaction.pointer_down(pos, &self.scene, &self.viewport);
                None
            }
            PointerInput::Move { pos } => {
                self.interaction.pointer_move(pos, &mut self.scene, &mut self.viewport);
                None
            }
            PointerInput::Up { button: PointerButton::Primary, .. } => self.interaction.pointer_up(),
            PointerInput::Wheel { pos, delta } => {
                self.viewport.zoom_at(pos, delta);
                None
            }
            // Only the primary button drives gestures
            PointerInput::Down { .. } | PointerInput::Up { .. } => None,
        }
    }

    /// End a gesture whose release was never delivered, e.g. when focus
    /// left the window mid-drag.
    pub fn release_if_button_up(&mut self, primary_down: bool) -> Option<SelectionEvent> {
        if primary_down || self.interaction.is_idle() {
            return None;
        }
        log::debug!("primary button no longer held, ending '{}'", self.interaction.state().name());
        self.interaction.pointer_up()
    }

    /// Draw the canvas into the remaining space and feed it this frame's input.
    pub fn show(&mut self, ui: &mut egui::Ui) -> Option<SelectionEvent> {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        self.resize(rect.size());
        let origin = rect.min.to_vec2();

        let mut selection = None;
        let events = ui.input(|i| i.events.clone());
        for event in events {
            let input = match event {
                egui::Event::PointerButton { pos, button, pressed: true, .. } => {
                    if !(rect.contains(pos) && response.contains_pointer()) {
                        continue;
                    }
                    PointerInput::Down { pos: pos - origin, button }
                }
                egui::Event::PointerButton { pos, button, pressed: false, .. } => {
                    PointerInput::Up { pos: pos - origin, button }
                }
                egui::Event::PointerMoved(pos) => PointerInput::Move { pos: pos - origin },
                _ => continue,
            };
            if let Some(event) = self.handle(input) {
                selection = Some(event);
            }
        }
        let primary_down = ui.input(|i| i.pointer.primary_down());
        if let Some(event) = self.release_if_button_up(primary_down) {
            selection = Some(event);
        }

        // Zoom with scroll only when pointer is over the canvas area
        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0
                && let Some(pointer) = response.hover_pos()
            {
                self.handle(PointerInput::Wheel { pos: pointer - origin, delta: scroll });
            }
        }

        if !self.interaction.is_idle() {
            ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
        } else if let Some(pointer) = response.hover_pos()
            && self.scene.node_at(self.viewport.map_to_scene(pointer - origin)).is_some()
        {
            ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
        }

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, self.background);
        let transform = egui::emath::TSTransform::from_translation(origin) * self.viewport.transform();
        let mut scene_painter = EguiScenePainter::new(&painter, transform);
        self.scene.render(&mut scene_painter);

        selection
    }
}
