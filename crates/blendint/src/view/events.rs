//! Input events and the dispatch response.
//!
//! The platform layer turns native input into [`MouseEvent`] and [`KeyEvent`]
//! values and hands them to [`crate::Context`]. Events are plain values; the
//! "current event" only lives for the duration of one dispatch call.

use crate::geometry::Point;

/// How a handler treated an event.
///
/// `Accept` and `Finish` both stop propagation. `Accept` additionally means
/// the view wants to own the interaction (for a press: take keyboard focus).
/// `Ignore` lets the caller try the next candidate or bubble to the parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Response {
    Accept,
    #[default]
    Ignore,
    Finish,
}

impl Response {
    /// True for `Accept` and `Finish`.
    #[inline]
    pub fn is_consumed(self) -> bool {
        !matches!(self, Response::Ignore)
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(u8)]
pub enum MouseButton {
    /// Primary button (usually left).
    #[default]
    Left = 0,
    /// Secondary button (usually right).
    Right = 1,
    /// Middle button (scroll wheel click).
    Middle = 2,
}

/// Keyboard modifiers that may be held during input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
    };

    /// Alt modifier only.
    pub const ALT: Self = Self {
        shift: false,
        control: false,
        alt: true,
    };

    /// Check if any modifier is pressed.
    #[inline]
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt
    }
}

/// Keys the toolkit cares about. Printable input arrives as `Character`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Space,
    Character(char),
}

/// A mouse press, release or move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// Cursor position in context (window) coordinates.
    pub position: Point,
    /// Cursor position relative to the receiving view's bottom-left corner.
    pub local_position: Point,
    pub button: Option<MouseButton>,
    pub modifiers: KeyboardModifiers,
}

impl MouseEvent {
    /// A press of `button` at a context position.
    pub fn press(position: Point, button: MouseButton) -> Self {
        Self {
            position,
            local_position: position,
            button: Some(button),
            modifiers: KeyboardModifiers::NONE,
        }
    }

    /// A release of `button` at a context position.
    pub fn release(position: Point, button: MouseButton) -> Self {
        Self::press(position, button)
    }

    /// A cursor move to a context position.
    pub fn moved(position: Point) -> Self {
        Self {
            position,
            local_position: position,
            button: None,
            modifiers: KeyboardModifiers::NONE,
        }
    }

    /// Builder-style modifier override.
    pub fn with_modifiers(mut self, modifiers: KeyboardModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// The same event expressed relative to a view whose absolute origin is `origin`.
    pub fn localized(&self, origin: Point) -> Self {
        Self {
            local_position: self.position - origin,
            ..*self
        }
    }
}

/// A key press or release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: KeyboardModifiers,
    /// Text produced by the key, if any.
    pub text: Option<String>,
}

impl KeyEvent {
    /// A key with no modifiers and no text.
    pub fn new(key: Key) -> Self {
        let text = match key {
            Key::Character(c) => Some(c.to_string()),
            Key::Space => Some(" ".to_string()),
            _ => None,
        };
        Self {
            key,
            modifiers: KeyboardModifiers::NONE,
            text,
        }
    }

    /// Builder-style modifier override.
    pub fn with_modifiers(mut self, modifiers: KeyboardModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}
