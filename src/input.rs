//! Input model: tools, modifier keys, mouse buttons, and the gesture state machine.
//!
//! `Tool` and `Modifiers` capture the user's intent at the time of a pointer
//! event. `InputState` is the gesture being tracked between pointer-down and
//! pointer-up: either a stroke whose in-progress element is not yet on the
//! plan, or a drag that remembers the element as it was before the gesture
//! so the whole drag can be recorded as one undo step.
//!
//! The module also holds the two seams toward the host's property panel and
//! prompt: lenient numeric parsing ([`parse_number`]) and the [`TextPrompt`]
//! trait through which a finished label stroke asks for its text.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::doc::{Element, ElementId, ElementKind};

/// Which drawing tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Draw a wall segment (default).
    #[default]
    Line,
    /// Draw a door segment.
    Door,
    /// Draw a window segment.
    Window,
    /// Place a text label.
    Label,
}

impl Tool {
    /// The element kind this tool creates.
    #[must_use]
    pub fn kind(self) -> ElementKind {
        match self {
            Self::Line => ElementKind::Line,
            Self::Door => ElementKind::Door,
            Self::Window => ElementKind::Window,
            Self::Label => ElementKind::Label,
        }
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Command on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key as reported by the browser (e.g. `"Shift"`, `"z"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    /// Whether this key is the letter `letter`, ignoring case.
    #[must_use]
    pub fn is_letter(&self, letter: char) -> bool {
        let mut chars = self.0.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if c.eq_ignore_ascii_case(&letter))
    }
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Currently active drawing tool.
    pub tool: Tool,
    /// Ortho snap mode: the modifier key is held.
    pub ortho: bool,
    /// Tag of the element being dragged, drawn highlighted.
    pub highlighted_tag: Option<String>,
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is drawing a new element.
    Drawing {
        /// The provisional element; joins the plan on stroke end.
        element: Element,
    },
    /// The user is moving an existing element.
    Dragging {
        /// Id of the element being dragged.
        id: ElementId,
        /// Surface position of the pointer at the previous event.
        last_world: Point,
        /// The element before the gesture started, recorded as the undo target.
        before: Element,
    },
}

/// Asks the host for a label's text when a label stroke ends.
///
/// Returning `None` (or an empty string) discards the label.
pub trait TextPrompt {
    fn request_text(&mut self) -> Option<String>;
}

impl<F> TextPrompt for F
where
    F: FnMut() -> Option<String>,
{
    fn request_text(&mut self) -> Option<String> {
        self()
    }
}

/// Parse a numeric property-panel entry, coercing anything unusable to `0.0`.
#[must_use]
pub fn parse_number(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}
