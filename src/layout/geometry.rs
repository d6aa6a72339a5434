use egui::{Pos2, Vec2};

/// Straight segment between two scene points.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LineSegment {
    pub p1: Pos2,
    pub p2: Pos2,
}

impl LineSegment {
    pub fn new(p1: Pos2, p2: Pos2) -> Self {
        Self { p1, p2 }
    }

    pub fn delta(&self) -> Vec2 {
        self.p2 - self.p1
    }

    pub fn length(&self) -> f32 {
        self.delta().length()
    }

    pub fn center(&self) -> Pos2 {
        self.p1 + self.delta() * 0.5
    }

    /// Direction from `p1` to `p2` with length 1, or `None` for a degenerate segment.
    pub fn unit_vector(&self) -> Option<Vec2> {
        let d = self.delta();
        let len = d.length();
        if len <= f32::EPSILON { None } else { Some(d / len) }
    }
}

// Rotation by `radians` in screen space (y grows downwards)
pub fn rotate(v: Vec2, radians: f32) -> Vec2 {
    let (sin, cos) = radians.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Two short strokes meeting at `apex`, pointing along the edge direction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Chevron {
    pub apex: Pos2,
    pub left: Pos2,
    pub right: Pos2,
}

impl Chevron {
    pub fn strokes(&self) -> [LineSegment; 2] {
        [LineSegment::new(self.apex, self.left), LineSegment::new(self.apex, self.right)]
    }
}

/// Arrowhead for the edge `from -> to`, placed at the segment midpoint.
///
/// Each stroke is the reversed unit direction scaled to `length` and turned
/// by `±half_angle_deg`, so the open side of the chevron faces `from`.
pub fn edge_arrow(edge: LineSegment, length: f32, half_angle_deg: f32) -> Option<Chevron> {
    let u = edge.unit_vector()?;
    let apex = edge.center();
    let back = -u * length;
    let theta = half_angle_deg.to_radians();
    Some(Chevron {
        apex,
        left: apex + rotate(back, theta),
        right: apex + rotate(back, -theta),
    })
}
