//! Cursor placement relative to a frame, and the cursor shapes it implies.
//!
//! A frame splits its rectangle into an inner content area and a border band
//! `border_width` pixels wide. [`CursorPosition::classify`] tells which part
//! a point falls in; [`CursorPosition::cursor_shape`] picks the cursor the
//! platform should show there.

use cursor_icon::CursorIcon;

use crate::geometry::{Point, Size};

/// Where the cursor sits relative to a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorPosition {
    /// Not over the frame.
    #[default]
    Outside,
    /// Over the content area.
    Inside,
    OnLeftBorder,
    OnRightBorder,
    OnTopBorder,
    OnBottomBorder,
    OnTopLeftCorner,
    OnTopRightCorner,
    OnBottomLeftCorner,
    OnBottomRightCorner,
}

impl CursorPosition {
    /// Classify `local` (relative to the frame's bottom-left corner).
    ///
    /// With `border_width <= 0` the whole frame counts as `Inside`.
    pub fn classify(local: Point, size: Size, border_width: i32) -> Self {
        if local.x < 0 || local.y < 0 || local.x >= size.width || local.y >= size.height {
            return CursorPosition::Outside;
        }
        if border_width <= 0 {
            return CursorPosition::Inside;
        }

        let left = local.x < border_width;
        let right = local.x >= size.width - border_width;
        let bottom = local.y < border_width;
        let top = local.y >= size.height - border_width;

        match (left, right, bottom, top) {
            (true, _, _, true) => CursorPosition::OnTopLeftCorner,
            (_, true, _, true) => CursorPosition::OnTopRightCorner,
            (true, _, true, _) => CursorPosition::OnBottomLeftCorner,
            (_, true, true, _) => CursorPosition::OnBottomRightCorner,
            (true, _, _, _) => CursorPosition::OnLeftBorder,
            (_, true, _, _) => CursorPosition::OnRightBorder,
            (_, _, _, true) => CursorPosition::OnTopBorder,
            (_, _, true, _) => CursorPosition::OnBottomBorder,
            _ => CursorPosition::Inside,
        }
    }

    /// True for the four borders and four corners.
    #[inline]
    pub fn is_border(self) -> bool {
        !matches!(self, CursorPosition::Outside | CursorPosition::Inside)
    }

    /// The cursor the platform should show at this position.
    pub fn cursor_shape(self) -> CursorShape {
        match self {
            CursorPosition::Outside | CursorPosition::Inside => CursorShape::Arrow,
            CursorPosition::OnLeftBorder | CursorPosition::OnRightBorder => {
                CursorShape::ResizeHorizontal
            }
            CursorPosition::OnTopBorder | CursorPosition::OnBottomBorder => {
                CursorShape::ResizeVertical
            }
            CursorPosition::OnTopRightCorner | CursorPosition::OnBottomLeftCorner => {
                CursorShape::ResizeNeSw
            }
            CursorPosition::OnTopLeftCorner | CursorPosition::OnBottomRightCorner => {
                CursorShape::ResizeNwSe
            }
        }
    }
}

/// The shape of the mouse cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum CursorShape {
    /// The default arrow cursor.
    #[default]
    Arrow,
    /// A pointing hand, for clickable elements.
    Hand,
    /// An I-beam, for text.
    IBeam,
    /// Something can be moved.
    Move,
    /// East-west resize.
    ResizeHorizontal,
    /// North-south resize.
    ResizeVertical,
    /// Northeast-southwest resize.
    ResizeNeSw,
    /// Northwest-southeast resize.
    ResizeNwSe,
}

impl CursorShape {
    /// The platform-neutral cursor icon for this shape.
    pub fn to_cursor_icon(self) -> CursorIcon {
        match self {
            CursorShape::Arrow => CursorIcon::Default,
            CursorShape::Hand => CursorIcon::Pointer,
            CursorShape::IBeam => CursorIcon::Text,
            CursorShape::Move => CursorIcon::Move,
            CursorShape::ResizeHorizontal => CursorIcon::EwResize,
            CursorShape::ResizeVertical => CursorIcon::NsResize,
            CursorShape::ResizeNeSw => CursorIcon::NeswResize,
            CursorShape::ResizeNwSe => CursorIcon::NwseResize,
        }
    }

    /// Check if this is a resize cursor.
    pub fn is_resize_cursor(self) -> bool {
        matches!(
            self,
            CursorShape::ResizeHorizontal
                | CursorShape::ResizeVertical
                | CursorShape::ResizeNeSw
                | CursorShape::ResizeNwSe
        )
    }
}
