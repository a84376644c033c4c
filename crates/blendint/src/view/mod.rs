//! View tree and update-request protocol.
//!
//! Every widget, layout, panel and frame is a view: a node in a
//! [`ViewTree`] with a [`ViewBase`] (geometry, visibility, rounding, the
//! `destroyed` signal) and a boxed [`View`] behavior.
//!
//! # Key Types
//!
//! - [`ViewTree`] - The arena and the public update protocol
//! - [`View`] - Behavior hooks (preferred size, perform/report, draw, input)
//! - [`ViewBase`] - State shared by every view
//! - [`ViewCtx`] / [`ViewRef`] - Mutable and shared handles passed to hooks
//! - [`UpdateRequest`] - `{source, target, data}` travelling through the protocol
//! - [`Response`] - Accept / Ignore / Finish
//!
//! # Related
//!
//! - [`crate::layout`] - Containers that own their children's geometry
//! - [`crate::frame`] - Frames that route input into a subtree

mod access;
mod base;
mod events;
mod request;
mod round;
mod traits;
mod tree;

#[cfg(test)]
mod tests;

pub use access::{ViewCtx, ViewRef};
pub use base::ViewBase;
pub use events::{Key, KeyEvent, KeyboardModifiers, MouseButton, MouseEvent, Response};
pub use request::{
    PositionUpdateRequest, RoundRadiusUpdateRequest, RoundTypeUpdateRequest, SizeUpdateRequest,
    UpdateRequest, VisibilityUpdateRequest,
};
pub use round::RoundType;
pub use traits::View;
pub use tree::{ViewNode, ViewTree};

/// Identifier of a view in a [`ViewTree`].
pub type ViewId = blendint_core::ObjectId;
