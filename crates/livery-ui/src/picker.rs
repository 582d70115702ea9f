use livery_engine::coords::{Rect, Vec2};
use livery_engine::input::PointerEvent;
use livery_engine::paint::{Hsv, PaintView, Rgb8, hsv_to_rgb, rgb_to_hsv};

use crate::event::EventResult;

/// Which control a drag started on.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DragTarget {
    /// Saturation on X, value on Y (top is bright).
    Surface,
    /// Hue on X.
    HueStrip,
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum DragState {
    Idle,
    /// Bounds are captured once at press time.
    Dragging { target: DragTarget, bounds: Rect },
}

/// HSV color picker editing a working copy of one paint.
///
/// Nothing reaches the caller's paint until [`commit`](Self::commit); a
/// [`cancel`](Self::cancel) discards the working copy. Hue is tracked
/// separately from the RGB color so dragging through grey does not lose it.
///
/// ```rust,ignore
/// let mut picker = HsvPicker::open(view);
/// picker.begin_drag(DragTarget::Surface, surface_rect, pointer);
/// while picker.wants_global_pointer() {
///     picker.handle_pointer(&next_event);
/// }
/// let edited = picker.commit();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HsvPicker {
    hsv: Hsv,
    working: PaintView,
    drag: DragState,
}

impl HsvPicker {
    pub fn open(view: PaintView) -> Self {
        Self { hsv: rgb_to_hsv(view.color), working: view, drag: DragState::Idle }
    }

    #[inline]
    pub fn working(&self) -> &PaintView {
        &self.working
    }

    #[inline]
    pub fn hsv(&self) -> Hsv {
        self.hsv
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// A host should route pointer events from the whole window to this
    /// picker only while this returns `true`, and detach as soon as it flips.
    #[inline]
    pub fn wants_global_pointer(&self) -> bool {
        self.is_dragging()
    }

    /// Idle → Dragging. Applies the press position immediately.
    pub fn begin_drag(&mut self, target: DragTarget, bounds: Rect, position: Vec2) -> bool {
        if self.is_dragging() || bounds.is_empty() {
            return false;
        }
        self.drag = DragState::Dragging { target, bounds };
        self.drag_to(target, bounds, position);
        true
    }

    /// Feeds a pointer event while dragging. Moves update the color; a
    /// release applies its position and ends the drag; leave and cancel just
    /// end it.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> EventResult {
        let DragState::Dragging { target, bounds } = self.drag else {
            return EventResult::Ignored;
        };
        if let PointerEvent::Moved(position) = event {
            self.drag_to(target, bounds, *position);
            return EventResult::Consumed;
        }
        if event.ends_gesture() {
            if let Some(position) = event.position() {
                self.drag_to(target, bounds, position);
            }
            self.drag = DragState::Idle;
            return EventResult::Consumed;
        }
        EventResult::Ignored
    }

    fn drag_to(&mut self, target: DragTarget, bounds: Rect, position: Vec2) {
        let unit = bounds.unit_position(position);
        match target {
            DragTarget::Surface => self.set_saturation_value(unit.x as f64, 1.0 - unit.y as f64),
            DragTarget::HueStrip => self.set_hue(unit.x as f64 * 360.0),
        }
    }

    // ── direct edits ──────────────────────────────────────────────────────

    pub fn set_hue(&mut self, h: f64) {
        self.hsv.h = if h.is_finite() { h.clamp(0.0, 360.0) } else { 0.0 };
        self.sync_color();
    }

    pub fn set_saturation_value(&mut self, s: f64, v: f64) {
        let unit = |x: f64| if x.is_finite() { x.clamp(0.0, 1.0) } else { 0.0 };
        self.hsv.s = unit(s);
        self.hsv.v = unit(v);
        self.sync_color();
    }

    pub fn set_rgb(&mut self, color: Rgb8) {
        let hsv = rgb_to_hsv(color);
        // Greys carry no hue; keep the one the user picked.
        self.hsv = if hsv.s == 0.0 { Hsv { h: self.hsv.h, ..hsv } } else { hsv };
        self.working.color = color;
    }

    /// Accepts `#RRGGBB` / `#RGB`. Returns `false` and changes nothing otherwise.
    pub fn set_hex(&mut self, text: &str) -> bool {
        match Rgb8::from_hex(text) {
            Some(color) => {
                self.set_rgb(color);
                true
            }
            None => false,
        }
    }

    fn sync_color(&mut self) {
        self.working.color = hsv_to_rgb(self.hsv);
    }

    // ── finish ────────────────────────────────────────────────────────────

    /// Ends any drag and hands back the working copy.
    pub fn commit(mut self) -> PaintView {
        self.drag = DragState::Idle;
        self.working
    }

    /// Ends any drag and discards the working copy.
    pub fn cancel(self) {}
}
