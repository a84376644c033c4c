//! The `View` trait.
//!
//! A view's behavior is a boxed `dyn View` stored in the tree next to its
//! [`ViewBase`](super::ViewBase). Every hook receives either a [`ViewRef`]
//! (read-only access to the whole tree, for queries and drawing) or a
//! [`ViewCtx`] (mutable access, for the update protocol and input).
//!
//! # Update protocol
//!
//! The `perform_*_update` hooks are called on the request's target first.
//! The default implementation is the standard two-phase shape:
//!
//! 1. if `request.target() == self`, apply the value to the base state;
//! 2. if `request.source() == self`, report the change to the container,
//!    which receives the same request through its own `perform_*_update`.
//!
//! Containers override the hooks to re-solve their children when the target
//! is one of them, and override the `*_update_test` hooks to reject
//! requests a child issues for itself.

use std::any::Any;

use super::access::{ViewCtx, ViewRef};
use super::events::{KeyEvent, MouseEvent, Response};
use super::ViewId;
use super::request::{
    PositionUpdateRequest, RoundRadiusUpdateRequest, RoundTypeUpdateRequest, SizeUpdateRequest,
    VisibilityUpdateRequest,
};
use crate::frame::{CursorShape, Frame};
use crate::geometry::Size;
use crate::render::RenderContext;

/// Behavior of a node in the view tree.
#[allow(unused_variables)]
pub trait View: Any + Send + Sync {
    /// Type name used in debug dumps and logs.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    // =========================================================================
    // Layout queries
    // =========================================================================

    /// Size this view would like to have. Must not mutate anything.
    fn preferred_size(&self, view: ViewRef<'_>) -> Size;

    /// Whether this view takes surplus horizontal space in a layout.
    fn is_expand_x(&self, view: ViewRef<'_>) -> bool {
        false
    }

    /// Whether this view takes surplus vertical space in a layout.
    fn is_expand_y(&self, view: ViewRef<'_>) -> bool {
        false
    }

    // =========================================================================
    // Update protocol
    // =========================================================================

    /// Whether a size request may proceed. Asked before any public resize.
    fn size_update_test(&self, view: ViewRef<'_>, request: &SizeUpdateRequest) -> bool {
        view.container_size_update_test(request)
    }

    /// Whether a position request may proceed.
    fn position_update_test(&self, view: ViewRef<'_>, request: &PositionUpdateRequest) -> bool {
        view.container_position_update_test(request)
    }

    fn perform_size_update(&mut self, cx: &mut ViewCtx<'_>, request: &SizeUpdateRequest) {
        let id = cx.id();
        if request.target() == id {
            cx.apply_size(request.data());
        }
        if request.source() == id {
            cx.report_size_update(request);
        }
    }

    fn perform_position_update(&mut self, cx: &mut ViewCtx<'_>, request: &PositionUpdateRequest) {
        let id = cx.id();
        if request.target() == id {
            cx.apply_position(request.data());
        }
        if request.source() == id {
            cx.report_position_update(request);
        }
    }

    fn perform_round_type_update(
        &mut self,
        cx: &mut ViewCtx<'_>,
        request: &RoundTypeUpdateRequest,
    ) {
        let id = cx.id();
        if request.target() == id {
            cx.apply_round_type(request.data());
        }
        if request.source() == id {
            cx.report_round_type_update(request);
        }
    }

    fn perform_round_radius_update(
        &mut self,
        cx: &mut ViewCtx<'_>,
        request: &RoundRadiusUpdateRequest,
    ) {
        let id = cx.id();
        if request.target() == id {
            cx.apply_round_radius(request.data());
        }
        if request.source() == id {
            cx.report_round_radius_update(request);
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
        }
        if request.source() == id {
            cx.report_visibility_update(request);
        }
    }

    /// Children were added, removed or reordered.
    fn subviews_changed(&mut self, cx: &mut ViewCtx<'_>) {}

    /// The preferred size of `child` changed.
    ///
    /// Containers that size their children from preferred sizes re-solve
    /// here and, when their own preferred size moves as a result, call
    /// [`super::ViewTree::notify_preferred_size_changed`] on themselves.
    fn preferred_size_changed(&mut self, cx: &mut ViewCtx<'_>, child: ViewId) {}

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Returning `false` skips `draw`, `post_draw` and the whole subtree.
    fn pre_draw(&self, view: ViewRef<'_>, ctx: &mut RenderContext<'_>) -> bool {
        true
    }

    /// Returning [`Response::Finish`] skips the children.
    fn draw(&self, view: ViewRef<'_>, ctx: &mut RenderContext<'_>) -> Response {
        Response::Ignore
    }

    fn post_draw(&self, view: ViewRef<'_>, ctx: &mut RenderContext<'_>) {}

    // =========================================================================
    // Input
    // =========================================================================

    fn mouse_press(&mut self, cx: &mut ViewCtx<'_>, event: &MouseEvent) -> Response {
        Response::Ignore
    }

    fn mouse_release(&mut self, cx: &mut ViewCtx<'_>, event: &MouseEvent) -> Response {
        Response::Ignore
    }

    fn mouse_move(&mut self, cx: &mut ViewCtx<'_>, event: &MouseEvent) -> Response {
        Response::Ignore
    }

    fn mouse_hover_in(&mut self, cx: &mut ViewCtx<'_>, event: &MouseEvent) {}

    fn mouse_hover_out(&mut self, cx: &mut ViewCtx<'_>, event: &MouseEvent) {}

    fn key_press(&mut self, cx: &mut ViewCtx<'_>, event: &KeyEvent) -> Response {
        Response::Ignore
    }

    fn key_release(&mut self, cx: &mut ViewCtx<'_>, event: &KeyEvent) -> Response {
        Response::Ignore
    }

    fn focus_on(&mut self, cx: &mut ViewCtx<'_>) {}

    fn focus_off(&mut self, cx: &mut ViewCtx<'_>) {}

    // =========================================================================
    // Roles
    // =========================================================================

    /// A modal view blocks input from reaching views beneath it.
    fn is_modal(&self) -> bool {
        false
    }

    /// Cursor the platform should show while this view is under the pointer.
    fn cursor_shape(&self) -> Option<CursorShape> {
        None
    }

    /// Frame state, for views that route input to descendants.
    fn as_frame(&self) -> Option<&Frame> {
        None
    }

    fn as_frame_mut(&mut self) -> Option<&mut Frame> {
        None
    }
}

impl dyn View {
    /// Downcast to a concrete view type.
    pub fn downcast_ref<V: View>(&self) -> Option<&V> {
        (self as &dyn Any).downcast_ref::<V>()
    }

    /// Mutably downcast to a concrete view type.
    pub fn downcast_mut<V: View>(&mut self) -> Option<&mut V> {
        (self as &mut dyn Any).downcast_mut::<V>()
    }
}
