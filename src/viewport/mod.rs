use egui::emath::TSTransform;
use egui::{Pos2, Rect, Vec2, pos2};

use crate::config::settings::ViewerConfig;

/// Owns the scene-to-device transform (translation + uniform scale).
///
/// Device coordinates are relative to the canvas' top-left corner.
#[derive(Copy, Clone, Debug)]
pub struct ViewportController {
    transform: TSTransform,
    zoom_step: f32,
}

impl ViewportController {
    pub fn new(config: &ViewerConfig) -> Self {
        Self { transform: TSTransform::IDENTITY, zoom_step: config.zoom_step }
    }

    pub fn transform(&self) -> TSTransform { self.transform }
    pub fn scale(&self) -> f32 { self.transform.scaling }
    pub fn zoom_step(&self) -> f32 { self.zoom_step }

    pub fn map_to_scene(&self, device: Pos2) -> Pos2 {
        self.transform.inverse().mul_pos(device)
    }

    pub fn map_from_scene(&self, scene: Pos2) -> Pos2 {
        self.transform.mul_pos(scene)
    }

    pub fn reset(&mut self) {
        self.transform = TSTransform::IDENTITY;
    }

    /// Shift the view by `scene_delta`, measured in scene units.
    pub fn translate(&mut self, scene_delta: Vec2) {
        self.transform.translation += self.transform.scaling * scene_delta;
    }

    /// Drag the canvas so the scene point under `from` ends up under `to`.
    pub fn pan(&mut self, from: Pos2, to: Pos2) {
        let delta = self.map_to_scene(to) - self.map_to_scene(from);
        self.translate(delta);
    }

    /// Wheel zoom: one step in for a positive delta, one step out otherwise.
    pub fn zoom_at(&mut self, cursor: Pos2, wheel_delta: f32) {
        let factor = if wheel_delta > 0.0 { self.zoom_step } else { 1.0 / self.zoom_step };
        self.scale_about(cursor, factor);
        log::debug!("zoom x{:.3} at {:?} -> scale {:.3}", factor, cursor, self.scale());
    }

    /// Scale by `factor` keeping the scene point under `anchor` fixed.
    ///
    /// The anchor only applies to this call; translation stays anchor-free.
    pub fn scale_about(&mut self, anchor: Pos2, factor: f32) {
        let scene_anchor = self.map_to_scene(anchor);
        self.transform.scaling *= factor;
        self.transform.translation = anchor.to_vec2() - self.transform.scaling * scene_anchor.to_vec2();
    }

    pub fn center_of_view(view_size: Vec2) -> Pos2 {
        pos2((view_size.x - 1.0) / 2.0, (view_size.y - 1.0) / 2.0)
    }

    /// Put `scene_point` at the middle of a view of `view_size`.
    pub fn center_on(&mut self, scene_point: Pos2, view_size: Vec2) {
        let c = self.map_to_scene(Self::center_of_view(view_size));
        self.translate(c - scene_point);
    }

    /// Initial placement: the scene origin goes to the view center,
    /// whatever the content bounds are.
    pub fn center_on_origin(&mut self, view_size: Vec2) {
        self.center_on(Pos2::ZERO, view_size);
    }

    /// Center the view on `bounds`. Empty bounds fall back to the origin.
    pub fn frame(&mut self, bounds: Rect, view_size: Vec2) {
        if bounds.is_finite() && bounds.is_positive() {
            self.center_on(bounds.center(), view_size);
        } else {
            self.center_on_origin(view_size);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::vec2;

    fn close(a: Pos2, b: Pos2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn zoom_keeps_point_under_cursor() {
        let mut vp = ViewportController::new(&ViewerConfig::default());
        vp.translate(vec2(37.0, -12.0));
        let cursor = pos2(210.0, 95.0);
        for delta in [120.0, 120.0, -120.0, 0.0, 40.0] {
            let before = vp.map_to_scene(cursor);
            vp.zoom_at(cursor, delta);
            assert!(close(vp.map_to_scene(cursor), before));
        }
    }

    #[test]
    fn zoom_direction_and_step() {
        let mut vp = ViewportController::new(&ViewerConfig::default());
        vp.zoom_at(Pos2::ZERO, 1.0);
        assert!((vp.scale() - 1.15).abs() < 1e-6);
        vp.zoom_at(Pos2::ZERO, -1.0);
        assert!((vp.scale() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn pan_follows_pointer_in_device_space() {
        let mut vp = ViewportController::new(&ViewerConfig::default());
        vp.scale_about(Pos2::ZERO, 2.0);
        let scene = pos2(10.0, 10.0);
        let device_before = vp.map_from_scene(scene);
        vp.pan(pos2(100.0, 100.0), pos2(130.0, 90.0));
        assert!(close(vp.map_from_scene(scene), device_before + vec2(30.0, -10.0)));
    }

    #[test]
    fn center_on_origin_ignores_content() {
        let mut vp = ViewportController::new(&ViewerConfig::default());
        let size = vec2(801.0, 601.0);
        vp.center_on_origin(size);
        assert!(close(vp.map_from_scene(Pos2::ZERO), pos2(400.0, 300.0)));

        vp.frame(Rect::from_min_max(pos2(0.0, 0.0), pos2(100.0, 50.0)), size);
        assert!(close(vp.map_from_scene(pos2(50.0, 25.0)), pos2(400.0, 300.0)));
    }
}
