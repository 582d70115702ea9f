use super::color::Rgb8;
use super::spec::{PaintSpec, clamp01};

/// Per-channel tolerance for the scalar fields when comparing views.
pub const VIEW_EPSILON: f64 = 0.0005;

/// Editor-facing form of a [`PaintSpec`]: byte RGB plus unit scalars.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PaintView {
    pub color: Rgb8,
    pub alpha: f64,
    pub metallic: f64,
    pub roughness: f64,
    pub clearcoat: f64,
    pub clearcoat_roughness: f64,
}

impl Default for PaintView {
    fn default() -> Self {
        PaintSpec::default().to_view()
    }
}

impl PaintSpec {
    /// Quantizes RGB to bytes; the remaining channels stay clamped floats.
    pub fn to_view(&self) -> PaintView {
        let [r, g, b, a] = self.base_color;
        PaintView {
            color: Rgb8::from_unit(r, g, b),
            alpha: clamp01(a),
            metallic: clamp01(self.metallic),
            roughness: clamp01(self.roughness),
            clearcoat: clamp01(self.clearcoat),
            clearcoat_roughness: clamp01(self.clearcoat_roughness),
        }
    }

    pub fn from_view(view: &PaintView) -> Self {
        let [r, g, b] = view.color.to_unit();
        PaintSpec {
            base_color: [r, g, b, view.alpha],
            metallic: view.metallic,
            roughness: view.roughness,
            clearcoat: view.clearcoat,
            clearcoat_roughness: view.clearcoat_roughness,
        }
        .sanitized()
    }

    /// View-level equality: identical bytes and scalars within [`VIEW_EPSILON`].
    pub fn view_eq(&self, other: &PaintSpec) -> bool {
        self.to_view().approx_eq(&other.to_view())
    }
}

impl PaintView {
    pub fn to_spec(&self) -> PaintSpec {
        PaintSpec::from_view(self)
    }

    pub fn approx_eq(&self, other: &PaintView) -> bool {
        let near = |a: f64, b: f64| (a - b).abs() <= VIEW_EPSILON;
        self.color == other.color
            && near(self.alpha, other.alpha)
            && near(self.metallic, other.metallic)
            && near(self.roughness, other.roughness)
            && near(self.clearcoat, other.clearcoat)
            && near(self.clearcoat_roughness, other.clearcoat_roughness)
    }

    /// `rgba(r,g,b,a)` for swatch previews.
    pub fn css_rgba(&self) -> String {
        format!("rgba({},{},{},{})", self.color.r, self.color.g, self.color.b, clamp01(self.alpha))
    }

    pub fn hex(&self) -> String {
        self.color.to_hex()
    }
}

/// Compares two paint collections slot by slot at view precision.
///
/// The shorter side is padded with empty slots: two empty slots are equal, an
/// empty slot never equals a paint.
pub fn paints_equal(a: &[PaintSpec], b: &[PaintSpec]) -> bool {
    let len = a.len().max(b.len());
    (0..len).all(|i| match (a.get(i), b.get(i)) {
        (Some(x), Some(y)) => x.view_eq(y),
        (None, None) => true,
        _ => false,
    })
}

/// Views in two lists compare equal slot by slot, under the same padding rule.
pub fn views_equal(a: &[PaintView], b: &[PaintView]) -> bool {
    let len = a.len().max(b.len());
    (0..len).all(|i| match (a.get(i), b.get(i)) {
        (Some(x), Some(y)) => x.approx_eq(y),
        (None, None) => true,
        _ => false,
    })
}

/// Exactly `slots` editor views for a part.
///
/// Takes up to `slots` paints; when there are none, falls back to `fallback`
/// (the vehicle base paints). Missing trailing slots duplicate the last one.
/// Returns an empty list only when both sources are empty.
pub fn editor_slots(paints: &[PaintSpec], fallback: &[PaintSpec], slots: usize) -> Vec<PaintView> {
    let source = if paints.is_empty() { fallback } else { paints };
    let mut views: Vec<PaintView> = source.iter().take(slots).map(PaintSpec::to_view).collect();
    if let Some(last) = views.last().copied() {
        views.resize(slots, last);
    }
    views
}

pub fn views_to_paints(views: &[PaintView]) -> Vec<PaintSpec> {
    views.iter().map(PaintView::to_spec).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> PaintSpec {
        PaintSpec::rgba(1.0, 0.0, 0.0, 1.0)
    }

    fn blue() -> PaintSpec {
        PaintSpec::rgba(0.0, 0.0, 1.0, 1.0)
    }

    // ── round trip ────────────────────────────────────────────────────────

    #[test]
    fn view_round_trip_is_within_one_byte_step() {
        let mut x = 0.0;
        while x <= 1.0 {
            let p = PaintSpec::rgba(x, 1.0 - x, (x * 7.3).fract(), 0.37).with_finish(x, 0.5, 1.0 - x, 0.125);
            let back = PaintSpec::from_view(&p.to_view());
            for c in 0..3 {
                assert!((back.base_color[c] - p.base_color[c]).abs() <= 1.0 / 255.0);
            }
            assert_eq!(back.base_color[3], p.base_color[3]);
            assert_eq!(back.metallic, p.metallic);
            assert_eq!(back.roughness, p.roughness);
            assert_eq!(back.clearcoat, p.clearcoat);
            assert_eq!(back.clearcoat_roughness, p.clearcoat_roughness);
            x += 0.0137;
        }
    }

    #[test]
    fn view_round_trip_is_stable_after_first_pass() {
        let p = PaintSpec::rgba(0.123_456, 0.654_321, 0.999, 1.0);
        let once = PaintSpec::from_view(&p.to_view());
        let twice = PaintSpec::from_view(&once.to_view());
        assert_eq!(once, twice);
    }

    #[test]
    fn to_view_rounds_half_up() {
        let v = PaintSpec::rgba(0.5, 0.25, 128.0 / 255.0, 1.0).to_view();
        assert_eq!(v.color, Rgb8::new(128, 64, 128));
    }

    // ── equality ──────────────────────────────────────────────────────────

    #[test]
    fn float_noise_is_view_equal() {
        let a = PaintSpec::rgba(0.4, 0.6, 0.2, 1.0);
        let b = PaintSpec::rgba(0.4 + 1e-6, 0.6 - 1e-6, 0.2, 1.0 - 1e-5);
        assert!(a.view_eq(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn scalar_beyond_epsilon_differs() {
        let a = red();
        let b = red().with_finish(0.001, 0.0, 0.0, 0.0);
        assert!(!a.view_eq(&b));
    }

    #[test]
    fn padding_rules() {
        assert!(paints_equal(&[], &[]));
        assert!(paints_equal(&[red(), blue()], &[red(), blue()]));
        assert!(!paints_equal(&[red()], &[red(), blue()]));
        assert!(!paints_equal(&[red(), blue()], &[red()]));
        assert!(!paints_equal(&[red()], &[blue()]));
    }

    // ── editor slots ──────────────────────────────────────────────────────

    #[test]
    fn editor_slots_duplicate_last() {
        let views = editor_slots(&[red()], &[], 3);
        assert_eq!(views.len(), 3);
        assert!(views.iter().all(|v| v.color == Rgb8::new(255, 0, 0)));
    }

    #[test]
    fn editor_slots_fall_back_to_base() {
        let views = editor_slots(&[], &[blue(), red()], 3);
        assert_eq!(views.iter().map(|v| v.color).collect::<Vec<_>>(), vec![
            Rgb8::new(0, 0, 255),
            Rgb8::new(255, 0, 0),
            Rgb8::new(255, 0, 0),
        ]);
    }

    #[test]
    fn editor_slots_truncate_and_handle_empty() {
        let views = editor_slots(&[red(), blue(), red(), blue()], &[], 3);
        assert_eq!(views.len(), 3);
        assert!(editor_slots(&[], &[], 3).is_empty());
    }

    #[test]
    fn css_and_hex() {
        let v = PaintSpec::rgba(1.0, 0.5, 0.25, 0.5).to_view();
        assert_eq!(v.css_rgba(), "rgba(255,128,64,0.5)");
        assert_eq!(v.hex(), "#FF8040");
    }
}
