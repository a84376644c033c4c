//! Collaborator widgets.
//!
//! The core's subject is the tree, the layouts and dispatch; these widgets
//! are the small set needed to exercise them.
//!
//! - [`Button`] - Focusable, accepts presses, emits `clicked`
//! - [`Label`] - One line of text
//! - [`Spacer`] - Invisible filler, optionally expanding
//! - [`Panel`] - Background plus one content view

mod button;
pub mod label;
mod panel;
mod spacer;

pub use button::Button;
pub use label::Label;
pub use panel::Panel;
pub use spacer::Spacer;
