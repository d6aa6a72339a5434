use egui::emath::TSTransform;
use egui::{Align2, Color32, FontId, Pos2, Stroke};

/// Drawing surface the scene paints onto, in scene coordinates.
///
/// Implementations apply the viewport transform themselves.
pub trait ScenePainter {
    fn circle(&mut self, center: Pos2, radius: f32, fill: Color32, stroke: Stroke);
    fn text(&mut self, center: Pos2, text: &str, size: f32, color: Color32);
    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke);
}

/// `ScenePainter` backed by an egui painter.
pub struct EguiScenePainter<'a> {
    painter: &'a egui::Painter,
    transform: TSTransform,
}

impl<'a> EguiScenePainter<'a> {
    pub fn new(painter: &'a egui::Painter, transform: TSTransform) -> Self {
        Self { painter, transform }
    }

    // Pens scale with the view, like the rest of the scene
    fn scaled(&self, stroke: Stroke) -> Stroke {
        Stroke::new(stroke.width * self.transform.scaling, stroke.color)
    }
}

impl ScenePainter for EguiScenePainter<'_> {
    fn circle(&mut self, center: Pos2, radius: f32, fill: Color32, stroke: Stroke) {
        let stroke = self.scaled(stroke);
        self.painter.circle(
            self.transform.mul_pos(center),
            radius * self.transform.scaling,
            fill,
            stroke,
        );
    }

    fn text(&mut self, center: Pos2, text: &str, size: f32, color: Color32) {
        let size = size * self.transform.scaling;
        // Below this the glyphs are unreadable anyway
        if size < 2.0 {
            return;
        }
        self.painter.text(
            self.transform.mul_pos(center),
            Align2::CENTER_CENTER,
            text,
            FontId::proportional(size),
            color,
        );
    }

    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke) {
        let stroke = self.scaled(stroke);
        self.painter.line_segment([self.transform.mul_pos(from), self.transform.mul_pos(to)], stroke);
    }
}
