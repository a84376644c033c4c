//! Horizontal and vertical layouts.
//!
//! A [`LinearLayout`] places its visible children in a row ([`HLayout`]) or
//! a column ([`VLayout`]). The main axis is solved by
//! [`distribute`](super::distribute); the cross axis by [`align_in_cell`].
//! A vertical layout stacks its first child at the top.
//!
//! # Example
//!
//! ```
//! use blendint::prelude::*;
//!
//! let mut tree = ViewTree::new();
//! let row = tree.create(HLayout::horizontal().with_space(10).with_margin(Margin::ZERO));
//! let a = tree.create(Spacer::fixed(Size::new(100, 20)));
//! let b = tree.create(Spacer::fixed(Size::new(80, 20)));
//! tree.push_back(row, a).unwrap();
//! tree.push_back(row, b).unwrap();
//! tree.resize(row, Size::new(190, 20));
//!
//! assert_eq!(tree.position(b).x, 110);
//! ```

use blendint_core::logging::targets;

use super::distribute::{self, AxisItem};
use super::{Alignment, LayoutBase, Orientation, Reflow};
use crate::geometry::{Margin, Rect, Size};
use crate::view::{
    PositionUpdateRequest, SizeUpdateRequest, View, ViewCtx, ViewId, ViewRef,
    VisibilityUpdateRequest,
};

/// A layout that arranges children along one axis.
#[derive(Debug, Clone, Default)]
pub struct LinearLayout {
    base: LayoutBase,
    orientation: Orientation,
}

/// Row layout.
pub type HLayout = LinearLayout;

/// Column layout.
pub type VLayout = LinearLayout;

impl LinearLayout {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            base: LayoutBase::default(),
            orientation,
        }
    }

    /// A row: children left to right.
    pub fn horizontal() -> Self {
        Self::new(Orientation::Horizontal)
    }

    /// A column: children top to bottom.
    pub fn vertical() -> Self {
        Self::new(Orientation::Vertical)
    }

    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.base.margin = margin;
        self
    }

    pub fn with_space(mut self, space: i32) -> Self {
        self.base.space = space;
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.base.alignment = alignment;
        self
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[inline]
    pub fn base(&self) -> &LayoutBase {
        &self.base
    }

    pub fn set_margin(&mut self, cx: &mut ViewCtx<'_>, margin: Margin) {
        if self.base.margin != margin {
            self.base.margin = margin;
            self.reflow(cx);
        }
    }

    pub fn set_space(&mut self, cx: &mut ViewCtx<'_>, space: i32) {
        if self.base.space != space {
            self.base.space = space;
            self.reflow(cx);
        }
    }

    pub fn set_alignment(&mut self, cx: &mut ViewCtx<'_>, alignment: Alignment) {
        if self.base.alignment != alignment {
            self.base.alignment = alignment;
            self.solve(cx);
        }
    }

    // =========================================================================
    // Axis helpers
    // =========================================================================

    #[inline]
    fn main(&self, size: Size) -> i32 {
        match self.orientation {
            Orientation::Horizontal => size.width,
            Orientation::Vertical => size.height,
        }
    }

    #[inline]
    fn cross(&self, size: Size) -> i32 {
        match self.orientation {
            Orientation::Horizontal => size.height,
            Orientation::Vertical => size.width,
        }
    }

    fn main_expand(&self, view: ViewRef<'_>, child: ViewId) -> bool {
        match self.orientation {
            Orientation::Horizontal => view.tree().is_expand_x(child),
            Orientation::Vertical => view.tree().is_expand_y(child),
        }
    }

    fn cross_expand(&self, view: ViewRef<'_>, child: ViewId) -> bool {
        match self.orientation {
            Orientation::Horizontal => view.tree().is_expand_y(child),
            Orientation::Vertical => view.tree().is_expand_x(child),
        }
    }

    // =========================================================================
    // Solving
    // =========================================================================

    /// Compute every visible child's rectangle in the layout's coordinates.
    pub fn compute(&self, view: ViewRef<'_>) -> Vec<(ViewId, Rect)> {
        let tree = view.tree();
        let children = self.base.visible_children(view);
        if children.is_empty() {
            return Vec::new();
        }

        let content = view.local_rect().shrink(self.base.margin);
        let preferred: Vec<Size> = children.iter().map(|&c| tree.preferred_size(c)).collect();
        let items: Vec<AxisItem> = children
            .iter()
            .zip(&preferred)
            .map(|(&child, &size)| AxisItem::new(self.main(size), self.main_expand(view, child)))
            .collect();

        let main_available = self.main(content.size);
        let cross_available = self.cross(content.size);
        let lengths = distribute::distribute(&items, main_available, self.base.space);
        let offsets = distribute::offsets(&lengths, self.base.space);

        children
            .iter()
            .enumerate()
            .map(|(i, &child)| {
                let (cross_offset, cross_length) = align_in_cell(
                    self.cross(preferred[i]),
                    self.cross_expand(view, child),
                    cross_available,
                    self.base.alignment,
                    self.orientation == Orientation::Horizontal,
                );
                let rect = match self.orientation {
                    Orientation::Horizontal => Rect::new(
                        content.left() + offsets[i],
                        content.bottom() + cross_offset,
                        lengths[i],
                        cross_length,
                    ),
                    Orientation::Vertical => Rect::new(
                        content.left() + cross_offset,
                        content.top() - offsets[i] - lengths[i],
                        cross_length,
                        lengths[i],
                    ),
                };
                (child, rect)
            })
            .collect()
    }

    /// Re-solve and apply children's geometry.
    #[tracing::instrument(skip_all, target = "blendint::layout", level = "trace", fields(layout = ?cx.id()))]
    pub fn solve(&self, cx: &mut ViewCtx<'_>) {
        let id = cx.id();
        let Some(view) = cx.view_ref(id) else {
            return;
        };
        let placements = self.compute(view);
        tracing::trace!(target: targets::LAYOUT, children = placements.len(), "solved linear layout");
        for (child, rect) in placements {
            cx.set_subview_geometry(child, rect);
        }
    }
}

/// Place an item of preferred length `preferred` on the cross axis of a
/// cell of length `available`. Returns `(offset, length)` from the cell's
/// low edge.
///
/// Expanding items fill the cell. Others keep their preferred length,
/// clamped to the cell, and are placed per `alignment`. `start_is_high` is
/// true when "start" means the high end of the axis (top, in y-up vertical
/// coordinates).
pub fn align_in_cell(
    preferred: i32,
    expand: bool,
    available: i32,
    alignment: Alignment,
    start_is_high: bool,
) -> (i32, i32) {
    let available = available.max(0);
    if expand || preferred >= available {
        return (0, available);
    }
    let length = preferred.max(0);
    let free = available - length;
    let offset = match (alignment, start_is_high) {
        (Alignment::Center, _) => free / 2,
        (Alignment::Start, false) | (Alignment::End, true) => 0,
        (Alignment::Start, true) | (Alignment::End, false) => free,
    };
    (offset, length)
}

impl View for LinearLayout {
    fn type_name(&self) -> &'static str {
        match self.orientation {
            Orientation::Horizontal => "HLayout",
            Orientation::Vertical => "VLayout",
        }
    }

    fn preferred_size(&self, view: ViewRef<'_>) -> Size {
        let tree = view.tree();
        let children = self.base.visible_children(view);
        let mut main = 0;
        let mut cross = 0;
        for &child in &children {
            let preferred = tree.preferred_size(child);
            main += self.main(preferred);
            cross = cross.max(self.cross(preferred));
        }
        if children.len() > 1 {
            main += self.base.space * (children.len() as i32 - 1);
        }
        let margin = self.base.margin;
        match self.orientation {
            Orientation::Horizontal => {
                Size::new(main + margin.horizontal(), cross + margin.vertical())
            }
            Orientation::Vertical => {
                Size::new(cross + margin.horizontal(), main + margin.vertical())
            }
        }
    }

    fn is_expand_x(&self, view: ViewRef<'_>) -> bool {
        self.base.any_child_expands_x(view)
    }

    fn is_expand_y(&self, view: ViewRef<'_>) -> bool {
        self.base.any_child_expands_y(view)
    }

    fn size_update_test(&self, view: ViewRef<'_>, request: &SizeUpdateRequest) -> bool {
        LayoutBase::allows_request(view, request.source()) && view.container_size_update_test(request)
    }

    fn position_update_test(&self, view: ViewRef<'_>, request: &PositionUpdateRequest) -> bool {
        LayoutBase::allows_request(view, request.source())
            && view.container_position_update_test(request)
    }

    fn perform_size_update(&mut self, cx: &mut ViewCtx<'_>, request: &SizeUpdateRequest) {
        let id = cx.id();
        if request.target() == id {
            cx.apply_size(request.data());
            self.solve(cx);
        } else if cx.parent(request.target()) == Some(id) {
            self.solve(cx);
        }
        if request.source() == id {
            cx.report_size_update(request);
        }
    }

    fn perform_visibility_update(
        &mut self,
        cx: &mut ViewCtx<'_>,
        request: &VisibilityUpdateRequest,
    ) {
        let id = cx.id();
        if request.target() == id {
            cx.apply_visibility(request.data());
        } else if cx.parent(request.target()) == Some(id) {
            self.reflow(cx);
        }
        if request.source() == id {
            cx.report_visibility_update(request);
        }
    }

    fn subviews_changed(&mut self, cx: &mut ViewCtx<'_>) {
        self.reflow(cx);
    }

    fn preferred_size_changed(&mut self, cx: &mut ViewCtx<'_>, _child: ViewId) {
        self.reflow(cx);
    }
}

impl Reflow for LinearLayout {
    fn layout_base_mut(&mut self) -> &mut LayoutBase {
        &mut self.base
    }

    fn solve_children(&self, cx: &mut ViewCtx<'_>) {
        self.solve(cx);
    }
}
