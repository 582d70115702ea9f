use crate::coords::Vec2;

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Pointer button event in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerButtonEvent {
    pub button: MouseButton,
    pub state: MouseButtonState,
    pub position: Vec2,
}

/// Platform-agnostic pointer input.
///
/// Hosts translate whatever their windowing layer reports into these. Only
/// the primary (left) button starts drags or hold gestures.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PointerEvent {
    Moved(Vec2),
    Button(PointerButtonEvent),
    /// Pointer left the surface the gesture started on.
    Left,
    /// The host aborted the interaction (focus loss, touch cancel).
    Cancelled,
}

impl PointerEvent {
    #[inline]
    pub fn press(x: f32, y: f32) -> Self {
        Self::button(MouseButtonState::Pressed, x, y)
    }

    #[inline]
    pub fn release(x: f32, y: f32) -> Self {
        Self::button(MouseButtonState::Released, x, y)
    }

    #[inline]
    pub fn moved(x: f32, y: f32) -> Self {
        PointerEvent::Moved(Vec2::new(x, y))
    }

    fn button(state: MouseButtonState, x: f32, y: f32) -> Self {
        PointerEvent::Button(PointerButtonEvent {
            button: MouseButton::Left,
            state,
            position: Vec2::new(x, y),
        })
    }

    /// True for a primary-button press.
    pub fn is_primary_press(&self) -> bool {
        matches!(
            self,
            PointerEvent::Button(PointerButtonEvent { button: MouseButton::Left, state: MouseButtonState::Pressed, .. })
        )
    }

    /// True for any event that ends a primary-button gesture.
    pub fn ends_gesture(&self) -> bool {
        match self {
            PointerEvent::Button(b) => b.button == MouseButton::Left && b.state == MouseButtonState::Released,
            PointerEvent::Left | PointerEvent::Cancelled => true,
            PointerEvent::Moved(_) => false,
        }
    }

    pub fn position(&self) -> Option<Vec2> {
        match self {
            PointerEvent::Moved(p) => Some(*p),
            PointerEvent::Button(b) => Some(b.position),
            _ => None,
        }
    }
}
