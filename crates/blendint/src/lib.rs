//! BlendInt - the widget-tree, layout and dispatch core of an OpenGL GUI
//! toolkit.
//!
//! The crate knows nothing about windows or GL. A platform layer creates a
//! [`Context`], feeds it input events and asks it for [`DrawCommand`]s.
//! Everything in between lives here:
//!
//! - [`view`] - The view tree and the two-phase Perform/Report update protocol
//! - [`layout`] - HLayout, VLayout and TableLayout solvers
//! - [`frame`] - Frames and dialogs: hover, focus, capture, drag-move/resize
//! - [`widgets`] - Small collaborator widgets (Button, Label, Spacer, Panel)
//! - [`theme`] - Explicit, TOML-loadable theme configuration
//!
//! Coordinates are y-up with the origin at the bottom-left; a view's
//! position is its bottom-left corner relative to its container.
//!
//! # Example
//!
//! ```
//! use blendint::prelude::*;
//!
//! let mut context = Context::new(Size::new(640, 480));
//! let frame = context.add_frame(Frame::new()).unwrap();
//!
//! let tree = context.tree_mut();
//! let row = tree.create(HLayout::horizontal());
//! let ok = tree.create(Button::new("OK"));
//! tree.push_back(row, ok).unwrap();
//! tree.push_back(frame, row).unwrap();
//! tree.resize(frame, Size::new(200, 40));
//!
//! assert_eq!(tree.size(row), Size::new(200, 40));
//! ```

pub mod context;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod layout;
pub mod prelude;
pub mod render;
pub mod theme;
pub mod view;
pub mod widgets;

pub use blendint_core::{ConnectionId, ObjectError, Signal};
pub use context::Context;
pub use error::{BlendIntError, ViewResult};
pub use render::{DrawCommand, RenderContext};
pub use theme::ThemeConfig;
