//! Invisible filler for layouts.

use crate::geometry::Size;
use crate::view::{View, ViewRef};

/// Takes space in a layout and draws nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Spacer {
    preferred: Size,
    expand_x: bool,
    expand_y: bool,
}

impl Spacer {
    /// A spacer with a fixed preferred size that never expands.
    pub fn fixed(size: Size) -> Self {
        Self {
            preferred: size,
            expand_x: false,
            expand_y: false,
        }
    }

    /// A spacer that soaks up surplus space on both axes.
    pub fn expanding() -> Self {
        Self {
            preferred: Size::ZERO,
            expand_x: true,
            expand_y: true,
        }
    }

    /// A spacer that soaks up horizontal surplus only.
    pub fn horizontal() -> Self {
        Self::expanding().with_expand(true, false)
    }

    /// A spacer that soaks up vertical surplus only.
    pub fn vertical() -> Self {
        Self::expanding().with_expand(false, true)
    }

    pub fn with_preferred_size(mut self, size: Size) -> Self {
        self.preferred = size;
        self
    }

    pub fn with_expand(mut self, expand_x: bool, expand_y: bool) -> Self {
        self.expand_x = expand_x;
        self.expand_y = expand_y;
        self
    }
}

impl View for Spacer {
    fn type_name(&self) -> &'static str {
        "Spacer"
    }

    fn preferred_size(&self, _view: ViewRef<'_>) -> Size {
        self.preferred
    }

    fn is_expand_x(&self, _view: ViewRef<'_>) -> bool {
        self.expand_x
    }

    fn is_expand_y(&self, _view: ViewRef<'_>) -> bool {
        self.expand_y
    }
}
