//! Borrowed handles passed to view hooks.
//!
//! - [`ViewRef`] is a shared borrow of the tree focused on one view.
//! - [`ViewCtx`] is a mutable borrow of the tree focused on one view. It
//!   dereferences to [`ViewTree`], so handlers can call any tree operation;
//!   public geometry mutations issued from inside a handler are queued until
//!   the outermost propagation finishes.

use std::ops::{Deref, DerefMut};

use blendint_core::Children;
use blendint_core::logging::targets;

use super::base::ViewBase;
use super::request::{
    PositionUpdateRequest, RoundRadiusUpdateRequest, RoundTypeUpdateRequest, SizeUpdateRequest,
    UpdateRequest, VisibilityUpdateRequest,
};
use super::round::RoundType;
use super::tree::{ViewNode, ViewTree};
use super::ViewId;
use crate::geometry::{Point, Rect, Size};

// =============================================================================
// ViewRef
// =============================================================================

/// Read-only access to a live view and the tree around it.
#[derive(Clone, Copy)]
pub struct ViewRef<'a> {
    tree: &'a ViewTree,
    id: ViewId,
    base: &'a ViewBase,
}

impl<'a> ViewRef<'a> {
    pub(crate) fn new(tree: &'a ViewTree, id: ViewId, base: &'a ViewBase) -> Self {
        Self { tree, id, base }
    }

    #[inline]
    pub fn id(&self) -> ViewId {
        self.id
    }

    #[inline]
    pub fn tree(&self) -> &'a ViewTree {
        self.tree
    }

    #[inline]
    pub fn base(&self) -> &'a ViewBase {
        self.base
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.base.size()
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.base.position()
    }

    /// The view's rectangle in its own coordinate space (origin at zero).
    #[inline]
    pub fn local_rect(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.base.size())
    }

    /// The container (superview).
    #[inline]
    pub fn container(&self) -> Option<ViewId> {
        self.tree.parent(self.id)
    }

    pub fn children(&self) -> Children<'a, ViewNode> {
        self.tree.children(self.id)
    }

    /// Run the container's size test, or allow if there is no container.
    pub fn container_size_update_test(&self, request: &SizeUpdateRequest) -> bool {
        match self.container() {
            Some(container) => self.tree.size_update_test(container, request),
            None => true,
        }
    }

    /// Run the container's position test, or allow if there is no container.
    pub fn container_position_update_test(&self, request: &PositionUpdateRequest) -> bool {
        match self.container() {
            Some(container) => self.tree.position_update_test(container, request),
            None => true,
        }
    }

    /// True if `id` is one of this view's direct children.
    #[inline]
    pub fn is_child(&self, id: ViewId) -> bool {
        self.tree.parent(id) == Some(self.id)
    }
}

// =============================================================================
// ViewCtx
// =============================================================================

/// Mutable access to the tree while handling a hook for one view.
pub struct ViewCtx<'a> {
    tree: &'a mut ViewTree,
    id: ViewId,
}

impl<'a> ViewCtx<'a> {
    pub(crate) fn new(tree: &'a mut ViewTree, id: ViewId) -> Self {
        Self { tree, id }
    }

    /// The view this context was created for.
    #[inline]
    pub fn id(&self) -> ViewId {
        self.id
    }

    /// Whether the view is still alive. A handler may destroy its own view.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.tree.contains(self.id)
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.tree.size(self.id)
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.tree.position(self.id)
    }

    // =========================================================================
    // Local application
    // =========================================================================

    pub fn apply_size(&mut self, size: Size) {
        let id = self.id;
        if let Some(base) = self.tree.base_mut(id) {
            base.set_size(size);
        }
        self.tree.request_redraw();
    }

    pub fn apply_position(&mut self, position: Point) {
        let id = self.id;
        if let Some(base) = self.tree.base_mut(id) {
            base.set_position(position);
        }
        self.tree.request_redraw();
    }

    pub fn apply_round_type(&mut self, round_type: RoundType) {
        let id = self.id;
        if let Some(base) = self.tree.base_mut(id) {
            base.set_round_type(round_type);
        }
        self.tree.request_redraw();
    }

    pub fn apply_round_radius(&mut self, radius: f32) {
        let id = self.id;
        if let Some(base) = self.tree.base_mut(id) {
            base.set_round_radius(radius);
        }
        self.tree.request_redraw();
    }

    pub fn apply_visibility(&mut self, visible: bool) {
        let id = self.id;
        if let Some(base) = self.tree.base_mut(id) {
            base.set_visible(visible);
        }
        self.tree.request_redraw();
    }

    // =========================================================================
    // Reporting to the container
    // =========================================================================

    pub fn report_size_update(&mut self, request: &SizeUpdateRequest) {
        if let Some(container) = self.tree.parent(self.id) {
            self.tree
                .invoke(container, |view, cx| view.perform_size_update(cx, request));
        }
    }

    pub fn report_position_update(&mut self, request: &PositionUpdateRequest) {
        if let Some(container) = self.tree.parent(self.id) {
            self.tree
                .invoke(container, |view, cx| view.perform_position_update(cx, request));
        }
    }

    pub fn report_round_type_update(&mut self, request: &RoundTypeUpdateRequest) {
        if let Some(container) = self.tree.parent(self.id) {
            self.tree
                .invoke(container, |view, cx| view.perform_round_type_update(cx, request));
        }
    }

    pub fn report_round_radius_update(&mut self, request: &RoundRadiusUpdateRequest) {
        if let Some(container) = self.tree.parent(self.id) {
            self.tree
                .invoke(container, |view, cx| view.perform_round_radius_update(cx, request));
        }
    }

    pub fn report_visibility_update(&mut self, request: &VisibilityUpdateRequest) {
        if let Some(container) = self.tree.parent(self.id) {
            self.tree
                .invoke(container, |view, cx| view.perform_visibility_update(cx, request));
        }
    }

    // =========================================================================
    // Parent-driven updates
    // =========================================================================

    /// Resize a child. Applies immediately; the child's tests are not consulted.
    pub fn resize_subview(&mut self, child: ViewId, size: Size) {
        let size = size.clamp_non_negative();
        if !self.owns(child) || self.tree.size(child) == size {
            return;
        }
        let request = UpdateRequest::new(self.id, child, size);
        self.tree
            .invoke(child, |view, cx| view.perform_size_update(cx, &request));
    }

    /// Move a child. Applies immediately.
    pub fn move_subview(&mut self, child: ViewId, position: Point) {
        if !self.owns(child) || self.tree.position(child) == position {
            return;
        }
        let request = UpdateRequest::new(self.id, child, position);
        self.tree
            .invoke(child, |view, cx| view.perform_position_update(cx, &request));
    }

    /// Set a child's rectangle in this view's coordinate space.
    pub fn set_subview_geometry(&mut self, child: ViewId, rect: Rect) {
        self.move_subview(child, rect.origin);
        self.resize_subview(child, rect.size);
    }

    fn owns(&self, child: ViewId) -> bool {
        let owned = self.tree.parent(child) == Some(self.id);
        if !owned {
            tracing::warn!(target: targets::VIEW, parent = ?self.id, ?child, "subview update on a view that is not a child");
        }
        owned
    }
}

impl Deref for ViewCtx<'_> {
    type Target = ViewTree;

    fn deref(&self) -> &ViewTree {
        self.tree
    }
}

impl DerefMut for ViewCtx<'_> {
    fn deref_mut(&mut self) -> &mut ViewTree {
        self.tree
    }
}
