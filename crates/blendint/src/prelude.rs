//! Commonly used types.
//!
//! ```
//! use blendint::prelude::*;
//! ```

pub use crate::context::Context;
pub use crate::error::{BlendIntError, ViewResult};
pub use crate::frame::{CursorPosition, CursorShape, Dialog, Frame};
pub use crate::geometry::{Margin, Point, Rect, Size};
pub use crate::layout::{Alignment, HLayout, LinearLayout, Orientation, TableLayout, VLayout};
pub use crate::render::{DrawCommand, RenderContext};
pub use crate::theme::{Color, Palette, ThemeConfig};
pub use crate::view::{
    Key, KeyEvent, KeyboardModifiers, MouseButton, MouseEvent, Response, RoundType, View,
    ViewCtx, ViewId, ViewRef, ViewTree,
};
pub use crate::widgets::{Button, Label, Panel, Spacer};
pub use blendint_core::Signal;
