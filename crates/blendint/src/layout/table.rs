//! Grid layout.
//!
//! [`TableLayout`] treats its children as a row-major `rows x columns` grid;
//! row 0 is the top row. Each column's preferred width is the widest
//! preferred width in it and the column expands if any cell expands
//! horizontally; rows work the same way vertically. Columns and rows are
//! then solved independently with the same distributor as linear layouts.
//!
//! Non-expanding content is placed inside its cell per the layout's
//! [`Alignment`], horizontally and vertically. Hidden children keep their
//! cell but contribute nothing to its size.
//! Children past `rows * columns` are not placed.

use blendint_core::logging::targets;

use super::distribute::{self, AxisItem};
use super::linear::align_in_cell;
use super::{Alignment, LayoutBase, Reflow};
use crate::geometry::{Margin, Rect, Size};
use crate::view::{
    PositionUpdateRequest, SizeUpdateRequest, View, ViewCtx, ViewId, ViewRef,
    VisibilityUpdateRequest,
};

/// A row-major grid layout.
#[derive(Debug, Clone)]
pub struct TableLayout {
    base: LayoutBase,
    rows: usize,
    columns: usize,
}

/// Per-axis demands of a grid.
struct Tracks {
    columns: Vec<AxisItem>,
    rows: Vec<AxisItem>,
}

impl TableLayout {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            base: LayoutBase::default(),
            rows,
            columns,
        }
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
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
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

    /// The cell children, row-major, with extra children cut off.
    fn cells(&self, view: ViewRef<'_>) -> Vec<ViewId> {
        let capacity = self.rows * self.columns;
        let children: Vec<ViewId> = view.children().collect();
        if children.len() > capacity {
            tracing::debug!(
                target: targets::LAYOUT,
                table = ?view.id(),
                extra = children.len() - capacity,
                "table has more children than cells, extra children are not placed"
            );
        }
        children.into_iter().take(capacity).collect()
    }

    fn tracks(&self, view: ViewRef<'_>, cells: &[ViewId]) -> Tracks {
        let tree = view.tree();
        let mut columns = vec![AxisItem::default(); self.columns];
        let mut rows = vec![AxisItem::default(); self.rows];

        for (index, &cell) in cells.iter().enumerate() {
            if !tree.is_visible(cell) {
                continue;
            }
            let (row, column) = (index / self.columns, index % self.columns);
            let preferred = tree.preferred_size(cell);

            let col = &mut columns[column];
            col.preferred = col.preferred.max(preferred.width);
            col.expand |= tree.is_expand_x(cell);

            let r = &mut rows[row];
            r.preferred = r.preferred.max(preferred.height);
            r.expand |= tree.is_expand_y(cell);
        }

        Tracks { columns, rows }
    }

    /// Compute every visible cell's rectangle in the layout's coordinates.
    pub fn compute(&self, view: ViewRef<'_>) -> Vec<(ViewId, Rect)> {
        if self.rows == 0 || self.columns == 0 {
            return Vec::new();
        }
        let tree = view.tree();
        let cells = self.cells(view);
        let tracks = self.tracks(view, &cells);
        let content = view.local_rect().shrink(self.base.margin);
        let space = self.base.space;

        let widths = distribute::distribute(&tracks.columns, content.size.width, space);
        let xs = distribute::offsets(&widths, space);
        let heights = distribute::distribute(&tracks.rows, content.size.height, space);
        let ys = distribute::offsets(&heights, space);

        cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| tree.is_visible(cell))
            .map(|(index, &cell)| {
                let (row, column) = (index / self.columns, index % self.columns);
                let preferred = tree.preferred_size(cell);
                let alignment = self.base.alignment;
                let (dx, width) = align_in_cell(
                    preferred.width,
                    tree.is_expand_x(cell),
                    widths[column],
                    alignment,
                    false,
                );
                let (dy, height) = align_in_cell(
                    preferred.height,
                    tree.is_expand_y(cell),
                    heights[row],
                    alignment,
                    true,
                );
                let cell_left = content.left() + xs[column];
                let cell_bottom = content.top() - ys[row] - heights[row];
                (cell, Rect::new(cell_left + dx, cell_bottom + dy, width, height))
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
        for (child, rect) in placements {
            cx.set_subview_geometry(child, rect);
        }
    }
}

impl View for TableLayout {
    fn type_name(&self) -> &'static str {
        "TableLayout"
    }

    fn preferred_size(&self, view: ViewRef<'_>) -> Size {
        let margin = self.base.margin;
        if self.rows == 0 || self.columns == 0 {
            return Size::new(margin.horizontal(), margin.vertical());
        }
        let cells = self.cells(view);
        let tracks = self.tracks(view, &cells);
        Size::new(
            distribute::total_preferred(&tracks.columns, self.base.space) + margin.horizontal(),
            distribute::total_preferred(&tracks.rows, self.base.space) + margin.vertical(),
        )
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

impl Reflow for TableLayout {
    fn layout_base_mut(&mut self) -> &mut LayoutBase {
        &mut self.base
    }

    fn solve_children(&self, cx: &mut ViewCtx<'_>) {
        self.solve(cx);
    }
}
