use super::Vec2;

/// Axis-aligned screen rectangle in logical pixels (top-left origin).
///
/// Pickers capture one of these when a drag starts and map every later
/// pointer position through it, so layout changes mid-drag do not move the
/// reference frame.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let (x, w) = if self.size.x < 0.0 {
            (self.origin.x + self.size.x, -self.size.x)
        } else {
            (self.origin.x, self.size.x)
        };
        let (y, h) = if self.size.y < 0.0 {
            (self.origin.y + self.size.y, -self.size.y)
        } else {
            (self.origin.y, self.size.y)
        };
        Rect::new(x, y, w, h)
    }

    /// Position of `p` relative to the rectangle, clamped to the unit square.
    ///
    /// Points outside map to the nearest edge. A degenerate axis maps to 0.
    pub fn unit_position(self, p: Vec2) -> Vec2 {
        let r = self.normalized();
        let axis = |v: f32, o: f32, len: f32| if len > 0.0 { (v - o) / len } else { 0.0 };
        Vec2::new(axis(p.x, r.origin.x, r.size.x), axis(p.y, r.origin.y, r.size.y)).clamp_unit()
    }
}
