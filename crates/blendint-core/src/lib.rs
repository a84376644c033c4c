//! Core systems for BlendInt.
//!
//! This crate provides the foundational pieces the BlendInt toolkit is built on:
//!
//! - **Object Tree**: Generational arena with ordered parent/child containment
//! - **Signal/Slot System**: Type-safe, re-entrant notification
//! - **Logging**: Tracing targets, tree dumps, and performance spans
//!
//! Geometry, layout, and event dispatch live in the `blendint` crate.
//!
//! # Signal/Slot Example
//!
//! ```
//! use blendint_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Object Tree Example
//!
//! ```
//! use blendint_core::ObjectTree;
//!
//! let mut tree = ObjectTree::new();
//! let frame = tree.insert("frame");
//! let button = tree.insert("button");
//! tree.push_back(frame, button).unwrap();
//!
//! assert_eq!(tree.child_count(frame), 1);
//! ```

pub mod error;
pub mod logging;
pub mod object;
pub mod signal;

pub use error::{CoreError, Result, SignalError};
pub use logging::{DescribeNode, ObjectTreeDebug, PerfSpan, TreeFormatOptions, TreeStyle};
pub use object::{Children, ObjectError, ObjectId, ObjectResult, ObjectTree};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
