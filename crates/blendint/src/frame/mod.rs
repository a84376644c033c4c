//! Frames: top-level views that route input into their subtree.
//!
//! A [`Frame`] sits directly under the context root. It owns one content
//! view (its first child), which it keeps sized to its own rectangle, and
//! tracks three non-owning references into its subtree:
//!
//! - the **hovered** widget, under the cursor;
//! - the **focused** widget, receiving key events;
//! - the **captured** widget, receiving moves and the release after it
//!   accepted a press.
//!
//! Each reference subscribes to the widget's `destroyed` signal. When the
//! widget goes away the slot is cleared on the spot, so a handler that
//! destroys its own widget never leaves the frame pointing at a dead view.
//! References are also re-validated wherever they are read.
//!
//! # Dragging
//!
//! Pressing on empty frame background starts a move; pressing on the border
//! band starts a resize from that edge or corner. Drags apply through the
//! frame's own public `set_position` / `resize`, queued until the move
//! handler returns, and never shrink the frame below its minimum size.
//!
//! # Related
//!
//! - [`Dialog`] - A frame that closes itself on Escape
//! - [`crate::Context`] - Routes platform input to frames topmost-first

mod cursor;
mod dialog;

pub use cursor::{CursorPosition, CursorShape};
pub use dialog::Dialog;

use std::sync::{Arc, Weak};

use blendint_core::ConnectionId;
use blendint_core::logging::targets;
use parking_lot::Mutex;

use crate::geometry::{Point, Rect, Size};
use crate::render::RenderContext;
use crate::theme::{Color, ThemeConfig};
use crate::view::{
    KeyEvent, MouseEvent, PositionUpdateRequest, Response, SizeUpdateRequest, View, ViewCtx,
    ViewId, ViewRef, ViewTree,
};

// =============================================================================
// Tracked references
// =============================================================================

/// Which of the frame's references a connection belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Hovered,
    Focused,
    Captured,
}

/// A tracked view and its `destroyed` connection.
#[derive(Debug, Default)]
struct TrackedView {
    view: Option<ViewId>,
    connection: Option<ConnectionId>,
}

#[derive(Debug, Default)]
struct FrameRefs {
    hovered: TrackedView,
    focused: TrackedView,
    captured: TrackedView,
}

impl FrameRefs {
    fn slot(&self, slot: Slot) -> &TrackedView {
        match slot {
            Slot::Hovered => &self.hovered,
            Slot::Focused => &self.focused,
            Slot::Captured => &self.captured,
        }
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut TrackedView {
        match slot {
            Slot::Hovered => &mut self.hovered,
            Slot::Focused => &mut self.focused,
            Slot::Captured => &mut self.captured,
        }
    }
}

/// Clear `slot` if it still points at `destroyed`.
fn on_tracked_destroyed(refs: &Weak<Mutex<FrameRefs>>, slot: Slot, destroyed: ViewId) {
    let Some(refs) = refs.upgrade() else {
        return;
    };
    let mut refs = refs.lock();
    let tracked = refs.slot_mut(slot);
    debug_assert_eq!(
        tracked.view,
        Some(destroyed),
        "destroyed notification for a view the frame does not track"
    );
    if tracked.view == Some(destroyed) {
        *tracked = TrackedView::default();
        tracing::trace!(target: targets::FRAME, ?slot, view = ?destroyed, "tracked view destroyed, reference cleared");
    }
}

// =============================================================================
// Frame
// =============================================================================

/// A top-level container that dispatches input and can be moved and resized.
#[derive(Debug)]
pub struct Frame {
    refs: Arc<Mutex<FrameRefs>>,
    dragging: bool,
    /// Where the cursor was at the last press or move.
    cursor_position: CursorPosition,
    /// Drag-start snapshot: frame position, frame size and cursor point.
    last_position: Point,
    last_size: Size,
    cursor_point: Point,
    modal: bool,
    movable: bool,
    resizable: bool,
    border_width: i32,
    min_size: Size,
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl Frame {
    /// A movable, non-resizable frame with default theme settings.
    pub fn new() -> Self {
        Self::with_theme(&ThemeConfig::default())
    }

    /// A frame taking its border width and minimum size from `theme`.
    pub fn with_theme(theme: &ThemeConfig) -> Self {
        Self {
            refs: Arc::new(Mutex::new(FrameRefs::default())),
            dragging: false,
            cursor_position: CursorPosition::Outside,
            last_position: Point::ZERO,
            last_size: Size::ZERO,
            cursor_point: Point::ZERO,
            modal: false,
            movable: true,
            resizable: false,
            border_width: theme.border_width,
            min_size: theme.min_frame_size,
        }
    }

    pub fn with_modal(mut self, modal: bool) -> Self {
        self.modal = modal;
        self
    }

    pub fn with_movable(mut self, movable: bool) -> Self {
        self.movable = movable;
        self
    }

    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn with_border_width(mut self, border_width: i32) -> Self {
        self.border_width = border_width;
        self
    }

    pub fn with_min_size(mut self, min_size: Size) -> Self {
        self.min_size = min_size;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn is_movable(&self) -> bool {
        self.movable
    }

    #[inline]
    pub fn is_resizable(&self) -> bool {
        self.resizable
    }

    #[inline]
    pub fn border_width(&self) -> i32 {
        self.border_width
    }

    #[inline]
    pub fn min_size(&self) -> Size {
        self.min_size
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    #[inline]
    pub fn cursor_position(&self) -> CursorPosition {
        self.cursor_position
    }

    pub fn set_modal(&mut self, modal: bool) {
        self.modal = modal;
    }

    /// The widget under the cursor, as last resolved.
    pub fn hovered_widget(&self) -> Option<ViewId> {
        self.refs.lock().hovered.view
    }

    /// The widget receiving key events.
    pub fn focused_widget(&self) -> Option<ViewId> {
        self.refs.lock().focused.view
    }

    /// The widget holding the mouse until release.
    pub fn captured_widget(&self) -> Option<ViewId> {
        self.refs.lock().captured.view
    }

    /// The content view: the first child.
    pub fn content(&self, view: ViewRef<'_>) -> Option<ViewId> {
        view.tree().first_child(view.id())
    }

    // =========================================================================
    // Reference tracking
    // =========================================================================

    /// Point `slot` at `view`, moving the `destroyed` subscription along.
    ///
    /// The refs lock is only held for the slot swap, never across tree calls.
    fn track(&self, tree: &ViewTree, slot: Slot, view: Option<ViewId>) {
        if self.refs.lock().slot(slot).view == view {
            return;
        }
        let old = std::mem::take(self.refs.lock().slot_mut(slot));
        if let (Some(old_view), Some(connection)) = (old.view, old.connection)
            && let Some(signal) = tree.destroyed_signal(old_view)
        {
            signal.disconnect(connection);
        }

        let Some(view) = view else {
            return;
        };
        let Some(signal) = tree.destroyed_signal(view) else {
            tracing::warn!(target: targets::FRAME, ?slot, ?view, "cannot track a dead view");
            return;
        };
        let refs = Arc::downgrade(&self.refs);
        let connection = signal.connect(move |&destroyed: &ViewId| {
            on_tracked_destroyed(&refs, slot, destroyed);
        });
        *self.refs.lock().slot_mut(slot) = TrackedView {
            view: Some(view),
            connection: Some(connection),
        };
    }

    /// Read `slot`, dropping it if the view is no longer a live descendant.
    fn tracked(&self, cx: &ViewCtx<'_>, slot: Slot) -> Option<ViewId> {
        let view = self.refs.lock().slot(slot).view?;
        let frame = cx.id();
        if view != frame && cx.contains(view) && cx.is_ancestor_of(frame, view) {
            return Some(view);
        }
        tracing::warn!(target: targets::FRAME, ?frame, ?slot, ?view, "stale frame reference cleared at point of use");
        self.track(cx, slot, None);
        None
    }

    /// Change the hovered widget, sending hover-out and hover-in.
    fn set_hovered(&mut self, cx: &mut ViewCtx<'_>, widget: Option<ViewId>, event: &MouseEvent) {
        let old = self.tracked(cx, Slot::Hovered);
        if old == widget {
            return;
        }
        self.track(cx, Slot::Hovered, widget);
        tracing::trace!(target: targets::FRAME, frame = ?cx.id(), ?old, new = ?widget, "hover changed");

        if let Some(old) = old {
            if let Some(base) = cx.base_mut(old) {
                base.set_hovered(false);
            }
            let local = event.localized(cx.absolute_position(old));
            cx.invoke(old, |view, cx| view.mouse_hover_out(cx, &local));
        }
        if let Some(new) = widget
            && cx.contains(new)
        {
            if let Some(base) = cx.base_mut(new) {
                base.set_hovered(true);
            }
            let local = event.localized(cx.absolute_position(new));
            cx.invoke(new, |view, cx| view.mouse_hover_in(cx, &local));
        }
    }

    /// The deepest widget under the cursor, excluding the frame itself.
    fn resolve_hover(&self, cx: &ViewCtx<'_>, position: Point) -> Option<ViewId> {
        let frame = cx.id();
        cx.hit_test(frame, position).filter(|&hit| hit != frame)
    }

    /// Give keyboard focus to `widget`, or clear it.
    pub fn set_focus(&mut self, cx: &mut ViewCtx<'_>, widget: Option<ViewId>) {
        let widget = widget.filter(|&w| w != cx.id() && cx.is_ancestor_of(cx.id(), w));
        let old = self.tracked(cx, Slot::Focused);
        if old == widget {
            return;
        }
        self.track(cx, Slot::Focused, widget);
        tracing::debug!(target: targets::FRAME, frame = ?cx.id(), ?old, new = ?widget, "focus changed");

        if let Some(old) = old {
            if let Some(base) = cx.base_mut(old) {
                base.set_focused(false);
            }
            cx.invoke(old, |view, cx| view.focus_off(cx));
        }
        if let Some(new) = widget
            && cx.contains(new)
        {
            if let Some(base) = cx.base_mut(new) {
                base.set_focused(true);
            }
            cx.invoke(new, |view, cx| view.focus_on(cx));
        }
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    fn fill_content(&self, cx: &mut ViewCtx<'_>) {
        let id = cx.id();
        if let Some(content) = cx.first_child(id) {
            let rect = Rect::from_origin_size(Point::ZERO, cx.size());
            cx.set_subview_geometry(content, rect);
        }
    }

    fn begin_drag(&mut self, cx: &ViewCtx<'_>, event: &MouseEvent) {
        self.dragging = true;
        self.last_position = cx.position();
        self.last_size = cx.size();
        self.cursor_point = event.position;
        tracing::debug!(target: targets::FRAME, frame = ?cx.id(), mode = ?self.cursor_position, "drag started");
    }

    fn drag_to(&self, cx: &mut ViewCtx<'_>, cursor: Point) {
        let start = Rect::from_origin_size(self.last_position, self.last_size);
        let delta = cursor - self.cursor_point;
        let rect = drag_geometry(self.cursor_position, start, delta, self.min_size);
        let id = cx.id();
        cx.set_position(id, rect.origin);
        cx.resize(id, rect.size);
        cx.request_redraw();
    }

    /// `Finish` for modal frames, `response` otherwise.
    #[inline]
    fn modal_response(&self, response: Response) -> Response {
        if self.modal { Response::Finish } else { response }
    }

    fn classify(&self, cx: &ViewCtx<'_>, position: Point) -> CursorPosition {
        let local = position - cx.absolute_position(cx.id());
        let border = if self.resizable { self.border_width } else { 0 };
        CursorPosition::classify(local, cx.size(), border)
    }

    /// Fill the frame background.
    pub fn draw_background(&self, view: ViewRef<'_>, ctx: &mut RenderContext<'_>, color: Color) {
        let base = view.base();
        ctx.fill_round_rect(view.local_rect(), color, base.round_type(), base.round_radius());
    }
}

/// The frame rectangle after dragging by `delta` from `start` in `mode`.
///
/// Coordinates are y-up: the top edge is `y + height`. Resizing from the
/// left or bottom keeps the opposite edge fixed.
pub fn drag_geometry(mode: CursorPosition, start: Rect, delta: Point, min_size: Size) -> Rect {
    let (dx, dy) = (delta.x, delta.y);
    let mut x = start.origin.x;
    let mut y = start.origin.y;
    let mut width = start.size.width;
    let mut height = start.size.height;

    let left = matches!(
        mode,
        CursorPosition::OnLeftBorder
            | CursorPosition::OnTopLeftCorner
            | CursorPosition::OnBottomLeftCorner
    );
    let right = matches!(
        mode,
        CursorPosition::OnRightBorder
            | CursorPosition::OnTopRightCorner
            | CursorPosition::OnBottomRightCorner
    );
    let top = matches!(
        mode,
        CursorPosition::OnTopBorder
            | CursorPosition::OnTopLeftCorner
            | CursorPosition::OnTopRightCorner
    );
    let bottom = matches!(
        mode,
        CursorPosition::OnBottomBorder
            | CursorPosition::OnBottomLeftCorner
            | CursorPosition::OnBottomRightCorner
    );

    match mode {
        CursorPosition::Inside => {
            x += dx;
            y += dy;
        }
        CursorPosition::Outside => {}
        _ => {
            if left {
                width = (start.size.width - dx).max(min_size.width);
                x = start.right() - width;
            } else if right {
                width = (start.size.width + dx).max(min_size.width);
            }
            if bottom {
                height = (start.size.height - dy).max(min_size.height);
                y = start.top() - height;
            } else if top {
                height = (start.size.height + dy).max(min_size.height);
            }
        }
    }

    Rect::new(x, y, width, height)
}

impl View for Frame {
    fn type_name(&self) -> &'static str {
        "Frame"
    }

    fn preferred_size(&self, view: ViewRef<'_>) -> Size {
        match self.content(view) {
            Some(content) => view.tree().preferred_size(content).max(self.min_size),
            None => self.min_size,
        }
    }

    fn size_update_test(&self, view: ViewRef<'_>, request: &SizeUpdateRequest) -> bool {
        self.content(view) != Some(request.source()) && view.container_size_update_test(request)
    }

    fn position_update_test(&self, view: ViewRef<'_>, request: &PositionUpdateRequest) -> bool {
        self.content(view) != Some(request.source())
            && view.container_position_update_test(request)
    }

    fn perform_size_update(&mut self, cx: &mut ViewCtx<'_>, request: &SizeUpdateRequest) {
        let id = cx.id();
        if request.target() == id {
            cx.apply_size(request.data());
            self.fill_content(cx);
        }
        if request.source() == id {
            cx.report_size_update(request);
        }
    }

    fn subviews_changed(&mut self, cx: &mut ViewCtx<'_>) {
        self.fill_content(cx);
    }

    fn preferred_size_changed(&mut self, cx: &mut ViewCtx<'_>, child: ViewId) {
        if cx.first_child(cx.id()) == Some(child) {
            self.fill_content(cx);
        }
    }

    fn draw(&self, view: ViewRef<'_>, ctx: &mut RenderContext<'_>) -> Response {
        let color = ctx.theme().palette.frame;
        self.draw_background(view, ctx, color);
        Response::Ignore
    }

    #[tracing::instrument(skip_all, target = "blendint::dispatch", level = "trace", fields(frame = ?cx.id()))]
    fn mouse_press(&mut self, cx: &mut ViewCtx<'_>, event: &MouseEvent) -> Response {
        let frame = cx.id();
        self.cursor_position = self.classify(cx, event.position);

        match self.cursor_position {
            CursorPosition::Outside => return self.modal_response(Response::Ignore),
            position if position.is_border() => {
                self.begin_drag(cx, event);
                return Response::Finish;
            }
            _ => {}
        }

        let hovered = self.resolve_hover(cx, event.position);
        self.set_hovered(cx, hovered, event);

        // Bubble from the hovered widget up to the frame.
        let mut current = self.tracked(cx, Slot::Hovered);
        while let Some(widget) = current {
            if widget == frame || !cx.contains(widget) {
                break;
            }
            let parent = cx.parent(widget);
            let local = event.localized(cx.absolute_position(widget));
            let response = cx
                .invoke(widget, |view, cx| view.mouse_press(cx, &local))
                .unwrap_or_default();

            match response {
                Response::Accept => {
                    if cx.contains(widget) {
                        self.track(cx, Slot::Captured, Some(widget));
                        self.set_focus(cx, Some(widget));
                    }
                    return Response::Finish;
                }
                Response::Finish => {
                    if cx.contains(widget) {
                        self.track(cx, Slot::Captured, Some(widget));
                    }
                    return Response::Finish;
                }
                Response::Ignore => current = parent,
            }
        }

        if self.movable {
            self.begin_drag(cx, event);
        }
        Response::Finish
    }

    fn mouse_move(&mut self, cx: &mut ViewCtx<'_>, event: &MouseEvent) -> Response {
        if self.dragging {
            self.drag_to(cx, event.position);
            return Response::Finish;
        }

        if let Some(captured) = self.tracked(cx, Slot::Captured) {
            let local = event.localized(cx.absolute_position(captured));
            cx.invoke(captured, |view, cx| view.mouse_move(cx, &local));
            return Response::Finish;
        }

        self.cursor_position = self.classify(cx, event.position);
        if self.cursor_position == CursorPosition::Outside {
            self.set_hovered(cx, None, event);
            return self.modal_response(Response::Ignore);
        }

        let hovered = if self.cursor_position.is_border() {
            None
        } else {
            self.resolve_hover(cx, event.position)
        };
        self.set_hovered(cx, hovered, event);

        if let Some(hovered) = hovered
            && cx.contains(hovered)
        {
            let local = event.localized(cx.absolute_position(hovered));
            cx.invoke(hovered, |view, cx| view.mouse_move(cx, &local));
        }
        Response::Finish
    }

    fn mouse_release(&mut self, cx: &mut ViewCtx<'_>, event: &MouseEvent) -> Response {
        let was_dragging = std::mem::take(&mut self.dragging);
        if was_dragging {
            tracing::debug!(target: targets::FRAME, frame = ?cx.id(), "drag finished");
        }

        let captured = self.tracked(cx, Slot::Captured);
        let target = captured.or_else(|| self.tracked(cx, Slot::Focused));
        self.track(cx, Slot::Captured, None);

        if let Some(target) = target {
            let local = event.localized(cx.absolute_position(target));
            cx.invoke(target, |view, cx| view.mouse_release(cx, &local));
            return Response::Finish;
        }

        if was_dragging || self.classify(cx, event.position) != CursorPosition::Outside {
            Response::Finish
        } else {
            self.modal_response(Response::Ignore)
        }
    }

    fn mouse_hover_out(&mut self, cx: &mut ViewCtx<'_>, event: &MouseEvent) {
        self.cursor_position = CursorPosition::Outside;
        self.set_hovered(cx, None, event);
    }

    fn key_press(&mut self, cx: &mut ViewCtx<'_>, event: &KeyEvent) -> Response {
        let response = match self.tracked(cx, Slot::Focused) {
            Some(focused) => cx
                .invoke(focused, |view, cx| view.key_press(cx, event))
                .unwrap_or_default(),
            None => Response::Ignore,
        };
        self.modal_response(response)
    }

    fn key_release(&mut self, cx: &mut ViewCtx<'_>, event: &KeyEvent) -> Response {
        let response = match self.tracked(cx, Slot::Focused) {
            Some(focused) => cx
                .invoke(focused, |view, cx| view.key_release(cx, event))
                .unwrap_or_default(),
            None => Response::Ignore,
        };
        self.modal_response(response)
    }

    fn is_modal(&self) -> bool {
        self.modal
    }

    fn cursor_shape(&self) -> Option<CursorShape> {
        if self.dragging && self.cursor_position == CursorPosition::Inside {
            return Some(CursorShape::Move);
        }
        Some(self.cursor_position.cursor_shape())
    }

    fn as_frame(&self) -> Option<&Frame> {
        Some(self)
    }

    fn as_frame_mut(&mut self) -> Option<&mut Frame> {
        Some(self)
    }
}

static_assertions::assert_impl_all!(Frame: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    const START: Rect = Rect::new(100, 100, 200, 150);
    const MIN: Size = Size::new(40, 40);

    #[test]
    fn test_drag_move() {
        let rect = drag_geometry(CursorPosition::Inside, START, Point::new(15, -5), MIN);
        assert_eq!(rect, Rect::new(115, 95, 200, 150));
    }

    #[test]
    fn test_drag_left_keeps_right_edge() {
        let rect = drag_geometry(CursorPosition::OnLeftBorder, START, Point::new(30, 7), MIN);
        assert_eq!(rect, Rect::new(130, 100, 170, 150));
        assert_eq!(rect.right(), START.right());
    }

    #[test]
    fn test_drag_right_and_top() {
        let rect = drag_geometry(CursorPosition::OnRightBorder, START, Point::new(20, 0), MIN);
        assert_eq!(rect, Rect::new(100, 100, 220, 150));

        let rect = drag_geometry(CursorPosition::OnTopBorder, START, Point::new(0, 10), MIN);
        assert_eq!(rect, Rect::new(100, 100, 200, 160));
    }

    #[test]
    fn test_drag_bottom_keeps_top_edge() {
        let rect = drag_geometry(CursorPosition::OnBottomBorder, START, Point::new(0, 20), MIN);
        assert_eq!(rect, Rect::new(100, 120, 200, 130));
        assert_eq!(rect.top(), START.top());
    }

    #[test]
    fn test_drag_top_right_corner_only_resizes() {
        let rect = drag_geometry(CursorPosition::OnTopRightCorner, START, Point::new(10, 10), MIN);
        assert_eq!(rect, Rect::new(100, 100, 210, 160));
    }

    #[test]
    fn test_drag_bottom_left_corner() {
        let rect = drag_geometry(CursorPosition::OnBottomLeftCorner, START, Point::new(-10, -10), MIN);
        assert_eq!(rect, Rect::new(90, 90, 210, 160));
    }

    #[test]
    fn test_drag_clamps_to_min_size() {
        let rect = drag_geometry(CursorPosition::OnLeftBorder, START, Point::new(500, 0), MIN);
        assert_eq!(rect.size.width, 40);
        assert_eq!(rect.right(), START.right());

        let rect = drag_geometry(CursorPosition::OnTopBorder, START, Point::new(0, -500), MIN);
        assert_eq!(rect.size.height, 40);
        assert_eq!(rect.origin.y, 100);
    }

    #[test]
    fn test_frame_defaults_follow_theme() {
        let theme = ThemeConfig {
            border_width: 6,
            min_frame_size: Size::new(64, 48),
            ..ThemeConfig::default()
        };
        let frame = Frame::with_theme(&theme);
        assert_eq!(frame.border_width(), 6);
        assert_eq!(frame.min_size(), Size::new(64, 48));
        assert!(frame.is_movable());
        assert!(!frame.is_resizable());
        assert!(!frame.is_modal());
        assert_eq!(frame.hovered_widget(), None);
    }
}
