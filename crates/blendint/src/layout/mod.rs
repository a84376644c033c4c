//! Layouts: containers that solve their children's geometry.
//!
//! A layout owns the size and position of every child while the child is
//! attached. Requests a child issues for itself are rejected by the layout's
//! `*_update_test` hooks; the layout assigns geometry during its solve pass,
//! which runs whenever
//!
//! - the layout itself is resized,
//! - a child is added, removed or reordered,
//! - a child reports a visibility change,
//! - margin, space or alignment change,
//! - a child's preferred size changes.
//!
//! When one of these moves the layout's own preferred size, the layout
//! tells its container, so nested layouts settle from the inside out.
//!
//! # Built-in Layouts
//!
//! - [`HLayout`] / [`VLayout`] - Row and column ([`LinearLayout`])
//! - [`TableLayout`] - Row-major grid
//!
//! # Related
//!
//! - [`distribute`] - The three-regime integer distributor both use
//! - [`crate::widgets::Panel`] - Single-content container

pub mod distribute;
mod linear;
mod table;

pub use linear::{align_in_cell, HLayout, LinearLayout, VLayout};
pub use table::TableLayout;

use blendint_core::logging::targets;

use crate::geometry::{Margin, Size};
use crate::view::{View, ViewCtx, ViewId, ViewRef};

/// Layout orientation for linear layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Items are arranged left to right.
    #[default]
    Horizontal,
    /// Items are arranged top to bottom.
    Vertical,
}

/// Cross-axis placement of children that neither expand nor overflow.
///
/// For rows, `Start` is the top and `End` the bottom. For columns, `Start`
/// is the left and `End` the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    Start,
    #[default]
    Center,
    End,
}

/// Settings shared by every layout.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutBase {
    pub margin: Margin,
    pub space: i32,
    pub alignment: Alignment,
    /// Preferred size last announced to the container.
    announced: Size,
}

/// Default gap between children.
pub const DEFAULT_SPACE: i32 = 4;

/// Default margin around layout content.
pub const DEFAULT_MARGIN: Margin = Margin::uniform(2);

impl Default for LayoutBase {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            space: DEFAULT_SPACE,
            alignment: Alignment::default(),
            announced: Size::ZERO,
        }
    }
}

impl LayoutBase {
    /// Record `preferred` as announced. Returns whether it moved.
    fn announce(&mut self, preferred: Size) -> bool {
        if self.announced == preferred {
            return false;
        }
        self.announced = preferred;
        true
    }

    /// Children that take part in the solve, in order.
    pub fn visible_children(&self, view: ViewRef<'_>) -> Vec<ViewId> {
        let tree = view.tree();
        view.children().filter(|&child| tree.is_visible(child)).collect()
    }

    pub fn any_child_expands_x(&self, view: ViewRef<'_>) -> bool {
        let tree = view.tree();
        view.children()
            .any(|child| tree.is_visible(child) && tree.is_expand_x(child))
    }

    pub fn any_child_expands_y(&self, view: ViewRef<'_>) -> bool {
        let tree = view.tree();
        view.children()
            .any(|child| tree.is_visible(child) && tree.is_expand_y(child))
    }

    /// Whether a request from `source` may proceed past this layout.
    ///
    /// Requests a direct child issues for itself are rejected: the layout is
    /// the only writer of its children's geometry.
    pub fn allows_request(view: ViewRef<'_>, source: ViewId) -> bool {
        if source != view.id() && view.is_child(source) {
            tracing::debug!(
                target: targets::LAYOUT,
                layout = ?view.id(),
                child = ?source,
                "rejected geometry request from layout-owned child"
            );
            return false;
        }
        true
    }
}

/// A layout that can re-solve itself and announce preferred-size changes.
pub(crate) trait Reflow: View {
    fn layout_base_mut(&mut self) -> &mut LayoutBase;

    fn solve_children(&self, cx: &mut ViewCtx<'_>);

    /// Re-solve, then tell the container if the preferred size moved.
    fn reflow(&mut self, cx: &mut ViewCtx<'_>) {
        self.solve_children(cx);
        let id = cx.id();
        let Some(preferred) = cx.view_ref(id).map(|view| self.preferred_size(view)) else {
            return;
        };
        if self.layout_base_mut().announce(preferred) {
            tracing::trace!(
                target: targets::LAYOUT,
                layout = ?id,
                ?preferred,
                "announcing preferred size"
            );
            cx.notify_preferred_size_changed(id);
        }
    }
}
