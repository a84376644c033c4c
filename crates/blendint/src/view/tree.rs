//! The view tree.
//!
//! [`ViewTree`] stores every view of a [`crate::Context`] in one
//! [`ObjectTree`]. Each node pairs a [`ViewBase`] with the view's boxed
//! behavior. While a hook runs, the behavior is taken out of its node so the
//! hook can borrow the rest of the tree mutably; it is put back afterwards
//! unless the view was destroyed in the meantime.
//!
//! # Re-entrancy
//!
//! Public geometry mutations ([`resize`](ViewTree::resize),
//! [`set_position`](ViewTree::set_position) and friends) issued while any
//! hook is running are queued and applied in order once the outermost hook
//! returns. Parent-driven updates through [`ViewCtx`] apply immediately.

use std::collections::VecDeque;

use blendint_core::logging::{targets, DescribeNode, ObjectTreeDebug, TreeFormatOptions};
use blendint_core::{Children, ObjectError, ObjectTree, Signal};

use super::access::{ViewCtx, ViewRef};
use super::base::ViewBase;
use super::request::{
    PendingUpdate, PositionUpdateRequest, SizeUpdateRequest, UpdateRequest,
};
use super::round::RoundType;
use super::traits::View;
use super::ViewId;
use crate::error::{BlendIntError, ViewResult};
use crate::geometry::{Point, Rect, Size};
use crate::render::RenderContext;
use crate::view::events::Response;

/// Upper bound on queued updates applied in one flush.
const MAX_PENDING_FLUSH: usize = 4096;

/// A node of the view tree: shared state plus behavior.
pub struct ViewNode {
    base: ViewBase,
    type_name: &'static str,
    behavior: Option<Box<dyn View>>,
}

impl ViewNode {
    pub fn base(&self) -> &ViewBase {
        &self.base
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The behavior, unless it is currently running a hook.
    pub fn behavior(&self) -> Option<&dyn View> {
        self.behavior.as_deref()
    }
}

impl DescribeNode for ViewNode {
    fn node_name(&self) -> &str {
        self.base.name()
    }

    fn node_type(&self) -> &str {
        self.type_name
    }

    fn node_detail(&self) -> Option<String> {
        let base = &self.base;
        let mut detail = format!(
            "pos=({}, {}) size={}x{}",
            base.position().x,
            base.position().y,
            base.size().width,
            base.size().height
        );
        if !base.is_visible() {
            detail.push_str(" hidden");
        }
        if !base.is_managed() {
            detail.push_str(" unmanaged");
        }
        if !base.round_type().is_empty() {
            detail.push_str(&format!(" round={:#x}", base.round_type().bits()));
        }
        Some(detail)
    }
}

/// Arena of views with the update-request protocol on top.
pub struct ViewTree {
    nodes: ObjectTree<ViewNode>,
    /// Number of hooks currently on the stack.
    busy: usize,
    pending: VecDeque<PendingUpdate>,
    flushing: bool,
    redraw: bool,
}

impl Default for ViewTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewTree {
    pub fn new() -> Self {
        Self {
            nodes: ObjectTree::new(),
            busy: 0,
            pending: VecDeque::new(),
            flushing: false,
            redraw: false,
        }
    }

    // =========================================================================
    // Creation and lookup
    // =========================================================================

    /// Add a detached view. Its initial size is its preferred size.
    pub fn create<V: View>(&mut self, view: V) -> ViewId {
        let type_name = view.type_name();
        let id = self.nodes.insert(ViewNode {
            base: ViewBase::new(),
            type_name,
            behavior: Some(Box::new(view)),
        });
        let size = self.preferred_size(id);
        if let Some(base) = self.base_mut(id) {
            base.set_size(size);
        }
        tracing::trace!(target: targets::VIEW, ?id, type_name, "created view");
        id
    }

    /// Add a detached, named view.
    pub fn create_named<V: View>(&mut self, name: impl Into<String>, view: V) -> ViewId {
        let id = self.create(view);
        if let Some(base) = self.base_mut(id) {
            base.set_name(name);
        }
        id
    }

    #[inline]
    pub fn contains(&self, id: ViewId) -> bool {
        self.nodes.contains(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: ViewId) -> Option<&ViewNode> {
        self.nodes.get(id)
    }

    pub fn base(&self, id: ViewId) -> Option<&ViewBase> {
        self.nodes.get(id).map(|node| &node.base)
    }

    pub fn base_mut(&mut self, id: ViewId) -> Option<&mut ViewBase> {
        self.nodes.get_mut(id).map(|node| &mut node.base)
    }

    /// Read-only handle for a live view.
    pub fn view_ref(&self, id: ViewId) -> Option<ViewRef<'_>> {
        self.base(id).map(|base| ViewRef::new(self, id, base))
    }

    /// Borrow a view's behavior as a concrete type.
    pub fn view<V: View>(&self, id: ViewId) -> Option<&V> {
        self.nodes.get(id)?.behavior.as_deref()?.downcast_ref::<V>()
    }

    /// Run `f` with a view's behavior as a concrete type and a context for it.
    pub fn with_view_mut<V: View, R>(
        &mut self,
        id: ViewId,
        f: impl FnOnce(&mut V, &mut ViewCtx<'_>) -> R,
    ) -> ViewResult<R> {
        if !self.contains(id) {
            return Err(ObjectError::InvalidObjectId.into());
        }
        self.invoke(id, |view, cx| view.downcast_mut::<V>().map(|view| f(view, cx)))
            .flatten()
            .ok_or_else(BlendIntError::wrong_type::<V>)
    }

    /// The signal fired when `id` is destroyed.
    pub fn destroyed_signal(&self, id: ViewId) -> Option<&Signal<ViewId>> {
        self.base(id).map(|base| base.destroyed())
    }

    // =========================================================================
    // Geometry queries
    // =========================================================================

    /// Current size, or zero for unknown ids.
    pub fn size(&self, id: ViewId) -> Size {
        self.base(id).map_or(Size::ZERO, |base| base.size())
    }

    /// Position relative to the container, or zero for unknown ids.
    pub fn position(&self, id: ViewId) -> Point {
        self.base(id).map_or(Point::ZERO, |base| base.position())
    }

    /// Visibility flag, `false` for unknown ids.
    pub fn is_visible(&self, id: ViewId) -> bool {
        self.base(id).is_some_and(|base| base.is_visible())
    }

    pub fn round_type(&self, id: ViewId) -> RoundType {
        self.base(id).map_or(RoundType::NONE, |base| base.round_type())
    }

    pub fn round_radius(&self, id: ViewId) -> f32 {
        self.base(id).map_or(0.0, |base| base.round_radius())
    }

    /// Position in context coordinates.
    pub fn absolute_position(&self, id: ViewId) -> Point {
        let mut position = Point::ZERO;
        let mut current = Some(id);
        while let Some(view) = current {
            position = position + self.position(view);
            current = self.parent(view);
        }
        position
    }

    /// Rectangle in context coordinates.
    pub fn absolute_rect(&self, id: ViewId) -> Rect {
        Rect::from_origin_size(self.absolute_position(id), self.size(id))
    }

    /// Preferred size. Falls back to the current size while the view is busy.
    pub fn preferred_size(&self, id: ViewId) -> Size {
        match self.nodes.get(id) {
            Some(node) => match node.behavior.as_deref() {
                Some(view) => view.preferred_size(ViewRef::new(self, id, &node.base)),
                None => node.base.size(),
            },
            None => Size::ZERO,
        }
    }

    pub fn is_expand_x(&self, id: ViewId) -> bool {
        self.query(id, false, |view, r| view.is_expand_x(r))
    }

    pub fn is_expand_y(&self, id: ViewId) -> bool {
        self.query(id, false, |view, r| view.is_expand_y(r))
    }

    pub fn is_modal(&self, id: ViewId) -> bool {
        self.query(id, false, |view, _| view.is_modal())
    }

    /// Ask `id` whether a size request may proceed.
    pub fn size_update_test(&self, id: ViewId, request: &SizeUpdateRequest) -> bool {
        self.query(id, true, |view, r| view.size_update_test(r, request))
    }

    /// Ask `id` whether a position request may proceed.
    pub fn position_update_test(&self, id: ViewId, request: &PositionUpdateRequest) -> bool {
        self.query(id, true, |view, r| view.position_update_test(r, request))
    }

    fn query<R>(&self, id: ViewId, fallback: R, f: impl FnOnce(&dyn View, ViewRef<'_>) -> R) -> R {
        match self.nodes.get(id) {
            Some(node) => match node.behavior.as_deref() {
                Some(view) => f(view, ViewRef::new(self, id, &node.base)),
                None => fallback,
            },
            None => fallback,
        }
    }

    /// The deepest visible view under `point` (context coordinates), starting at `root`.
    ///
    /// Later children are checked first, so the top-most sibling wins.
    pub fn hit_test(&self, root: ViewId, point: Point) -> Option<ViewId> {
        let origin = match self.parent(root) {
            Some(parent) => self.absolute_position(parent),
            None => Point::ZERO,
        };
        self.hit_test_from(root, origin, point)
    }

    fn hit_test_from(&self, id: ViewId, container_origin: Point, point: Point) -> Option<ViewId> {
        let base = self.base(id)?;
        if !base.is_visible() {
            return None;
        }
        let rect = base.rect().translated(container_origin.x, container_origin.y);
        if !rect.contains(point) {
            return None;
        }
        self.nodes
            .children(id)
            .rev()
            .find_map(|child| self.hit_test_from(child, rect.origin, point))
            .or(Some(id))
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// The container (superview).
    #[inline]
    pub fn parent(&self, id: ViewId) -> Option<ViewId> {
        self.nodes.parent(id)
    }

    pub fn children(&self, id: ViewId) -> Children<'_, ViewNode> {
        self.nodes.children(id)
    }

    #[inline]
    pub fn child_count(&self, id: ViewId) -> usize {
        self.nodes.child_count(id)
    }

    pub fn first_child(&self, id: ViewId) -> Option<ViewId> {
        self.nodes.first_child(id)
    }

    pub fn last_child(&self, id: ViewId) -> Option<ViewId> {
        self.nodes.last_child(id)
    }

    pub fn next_sibling(&self, id: ViewId) -> Option<ViewId> {
        self.nodes.next_sibling(id)
    }

    pub fn previous_sibling(&self, id: ViewId) -> Option<ViewId> {
        self.nodes.previous_sibling(id)
    }

    pub fn index_of(&self, id: ViewId) -> Option<usize> {
        self.nodes.index_of(id)
    }

    pub fn child_at(&self, parent: ViewId, index: usize) -> Option<ViewId> {
        self.nodes.child_at(parent, index)
    }

    /// True if `ancestor` is `id` or contains it.
    pub fn is_ancestor_of(&self, ancestor: ViewId, id: ViewId) -> bool {
        self.nodes.is_ancestor_of(ancestor, id)
    }

    // =========================================================================
    // Tree editing
    // =========================================================================

    /// Append `child` to `parent` (top of the z-order).
    pub fn push_back(&mut self, parent: ViewId, child: ViewId) -> ViewResult<()> {
        let old = self.nodes.parent(child);
        self.nodes.push_back(parent, child)?;
        self.after_edit(old, Some(parent), child);
        Ok(())
    }

    /// Prepend `child` to `parent` (bottom of the z-order).
    pub fn push_front(&mut self, parent: ViewId, child: ViewId) -> ViewResult<()> {
        let old = self.nodes.parent(child);
        self.nodes.push_front(parent, child)?;
        self.after_edit(old, Some(parent), child);
        Ok(())
    }

    /// Insert `child` at `index` in `parent`. Past-the-end appends.
    pub fn insert_at(&mut self, parent: ViewId, index: usize, child: ViewId) -> ViewResult<()> {
        let old = self.nodes.parent(child);
        self.nodes.insert_at(parent, index, child)?;
        self.after_edit(old, Some(parent), child);
        Ok(())
    }

    /// Insert `child` right after `anchor` in `anchor`'s container.
    pub fn insert_after(&mut self, anchor: ViewId, child: ViewId) -> ViewResult<()> {
        let old = self.nodes.parent(child);
        self.nodes.insert_after(anchor, child)?;
        let parent = self.nodes.parent(child);
        self.after_edit(old, parent, child);
        Ok(())
    }

    /// Insert `child` right before `anchor` in `anchor`'s container.
    pub fn insert_before(&mut self, anchor: ViewId, child: ViewId) -> ViewResult<()> {
        let old = self.nodes.parent(child);
        self.nodes.insert_before(anchor, child)?;
        let parent = self.nodes.parent(child);
        self.after_edit(old, parent, child);
        Ok(())
    }

    /// Unbind `child` from its container.
    ///
    /// A managed child nobody retains is destroyed; anything else survives
    /// as a root.
    pub fn remove(&mut self, child: ViewId) -> ViewResult<()> {
        let old = self.nodes.detach(child)?;
        self.after_edit(old, None, child);
        if old.is_some() && self.is_disposable(child) {
            self.destroy(child)?;
        }
        Ok(())
    }

    /// Keep `id` alive across [`Self::remove`] and container destruction.
    /// Returns the new reference count.
    pub fn retain(&mut self, id: ViewId) -> ViewResult<usize> {
        let base = self.base_mut(id).ok_or(ObjectError::InvalidObjectId)?;
        Ok(base.retain())
    }

    /// Drop a reference taken with [`Self::retain`]. Returns the new count.
    ///
    /// Releasing the last reference does not destroy the view by itself.
    pub fn release(&mut self, id: ViewId) -> ViewResult<usize> {
        let base = self.base_mut(id).ok_or(ObjectError::InvalidObjectId)?;
        Ok(base.release())
    }

    fn is_disposable(&self, id: ViewId) -> bool {
        self.base(id)
            .is_some_and(|base| base.is_managed() && base.reference_count() == 0)
    }

    /// Raise `id` to the top of its siblings.
    pub fn move_to_last(&mut self, id: ViewId) -> ViewResult<()> {
        let parent = self.nodes.parent(id);
        let unchanged = parent.is_some_and(|parent| self.nodes.last_child(parent) == Some(id));
        self.nodes.move_to_last(id)?;
        if !unchanged {
            self.after_edit(parent, parent, id);
        }
        Ok(())
    }

    /// Lower `id` to the bottom of its siblings.
    pub fn move_to_first(&mut self, id: ViewId) -> ViewResult<()> {
        let parent = self.nodes.parent(id);
        let unchanged = parent.is_some_and(|parent| self.nodes.first_child(parent) == Some(id));
        self.nodes.move_to_first(id)?;
        if !unchanged {
            self.after_edit(parent, parent, id);
        }
        Ok(())
    }

    fn after_edit(&mut self, old: Option<ViewId>, new: Option<ViewId>, child: ViewId) {
        tracing::trace!(target: targets::VIEW, ?child, ?old, ?new, "view tree edited");
        if let Some(old) = old
            && Some(old) != new
        {
            self.notify_subviews_changed(old);
        }
        if let Some(new) = new {
            self.notify_subviews_changed(new);
        }
        self.request_redraw();
    }

    fn notify_subviews_changed(&mut self, id: ViewId) {
        if self.base(id).is_none_or(|base| base.is_destroying()) {
            return;
        }
        if self.defer(PendingUpdate::SubviewsChanged(id)) {
            return;
        }
        self.invoke(id, |view, cx| view.subviews_changed(cx));
    }

    /// Tell the container of `id` that `id`'s preferred size changed.
    ///
    /// Nothing happens for roots. Queued if a hook is running.
    pub fn notify_preferred_size_changed(&mut self, id: ViewId) {
        if self.defer(PendingUpdate::PreferredSizeChanged(id)) {
            return;
        }
        let Some(container) = self.parent(id) else {
            return;
        };
        if self.base(container).is_none_or(|base| base.is_destroying()) {
            return;
        }
        tracing::trace!(target: targets::VIEW, ?id, ?container, "preferred size changed");
        self.invoke(container, |view, cx| view.preferred_size_changed(cx, id));
    }

    // =========================================================================
    // Destruction
    // =========================================================================

    /// Destroy a view.
    ///
    /// The `destroyed` signal fires first, while the view and its subtree are
    /// intact. Managed children without references are then destroyed; the
    /// rest are unbound and survive as roots.
    #[tracing::instrument(skip(self), target = "blendint::view", level = "trace")]
    pub fn destroy(&mut self, id: ViewId) -> ViewResult<()> {
        let base = self.base_mut(id).ok_or(ObjectError::InvalidObjectId)?;
        if base.is_destroying() {
            return Ok(());
        }
        base.mark_destroying();

        if let Some(base) = self.base(id) {
            base.destroyed().emit(id);
        }

        let children: Vec<ViewId> = self.nodes.children(id).collect();
        for child in children {
            if self.is_disposable(child) {
                self.destroy(child)?;
            } else {
                self.nodes.detach(child)?;
                tracing::trace!(target: targets::VIEW, ?child, "unbound surviving child");
            }
        }

        let parent = self.nodes.parent(id);
        self.nodes.remove(id)?;
        tracing::trace!(target: targets::VIEW, ?id, "destroyed view");

        if let Some(parent) = parent {
            self.notify_subviews_changed(parent);
        }
        self.request_redraw();
        Ok(())
    }

    // =========================================================================
    // Public update protocol
    // =========================================================================

    /// Request a new size for `id`.
    ///
    /// Ignored if unchanged or rejected by the size test (for instance when
    /// `id` is owned by a layout). Queued if a hook is running.
    pub fn resize(&mut self, id: ViewId, size: Size) {
        if self.defer(PendingUpdate::Size(id, size)) {
            return;
        }
        let size = size.clamp_non_negative();
        if !self.contains(id) || self.size(id) == size {
            return;
        }
        let request = UpdateRequest::new(id, id, size);
        if !self.size_update_test(id, &request) {
            tracing::debug!(target: targets::VIEW, ?id, ?size, "size update rejected");
            return;
        }
        self.invoke(id, |view, cx| view.perform_size_update(cx, &request));
    }

    /// Request a new position for `id`, relative to its container.
    pub fn set_position(&mut self, id: ViewId, position: Point) {
        if self.defer(PendingUpdate::Position(id, position)) {
            return;
        }
        if !self.contains(id) || self.position(id) == position {
            return;
        }
        let request = UpdateRequest::new(id, id, position);
        if !self.position_update_test(id, &request) {
            tracing::debug!(target: targets::VIEW, ?id, ?position, "position update rejected");
            return;
        }
        self.invoke(id, |view, cx| view.perform_position_update(cx, &request));
    }

    /// Request new corner rounding for `id`.
    pub fn set_round_type(&mut self, id: ViewId, round_type: RoundType) {
        if self.defer(PendingUpdate::RoundType(id, round_type)) {
            return;
        }
        let round_type = RoundType::from_bits(round_type.bits() as u32);
        if !self.contains(id) || self.round_type(id) == round_type {
            return;
        }
        let request = UpdateRequest::new(id, id, round_type);
        self.invoke(id, |view, cx| view.perform_round_type_update(cx, &request));
    }

    /// Request a new corner radius for `id`.
    pub fn set_round_radius(&mut self, id: ViewId, radius: f32) {
        if self.defer(PendingUpdate::RoundRadius(id, radius)) {
            return;
        }
        if !self.contains(id) || self.round_radius(id) == radius {
            return;
        }
        let request = UpdateRequest::new(id, id, radius);
        self.invoke(id, |view, cx| view.perform_round_radius_update(cx, &request));
    }

    /// Show or hide `id`. Layouts re-solve when a child's visibility changes.
    pub fn set_visible(&mut self, id: ViewId, visible: bool) {
        if self.defer(PendingUpdate::Visibility(id, visible)) {
            return;
        }
        if !self.contains(id) || self.is_visible(id) == visible {
            return;
        }
        let request = UpdateRequest::new(id, id, visible);
        self.invoke(id, |view, cx| view.perform_visibility_update(cx, &request));
    }

    /// Queue `update` if a hook is running. Returns whether it was queued.
    fn defer(&mut self, update: PendingUpdate) -> bool {
        if self.busy == 0 {
            return false;
        }
        tracing::debug!(target: targets::VIEW, ?update, "queued re-entrant update");
        self.pending.push_back(update);
        true
    }

    fn flush_pending(&mut self) {
        if self.flushing {
            return;
        }
        self.flushing = true;
        let mut applied = 0;
        while let Some(update) = self.pending.pop_front() {
            applied += 1;
            if applied > MAX_PENDING_FLUSH {
                tracing::warn!(
                    target: targets::VIEW,
                    dropped = self.pending.len() + 1,
                    "update queue did not settle, dropping remaining updates"
                );
                self.pending.clear();
                break;
            }
            match update {
                PendingUpdate::Size(id, size) => self.resize(id, size),
                PendingUpdate::Position(id, position) => self.set_position(id, position),
                PendingUpdate::RoundType(id, round_type) => self.set_round_type(id, round_type),
                PendingUpdate::RoundRadius(id, radius) => self.set_round_radius(id, radius),
                PendingUpdate::Visibility(id, visible) => self.set_visible(id, visible),
                PendingUpdate::SubviewsChanged(id) => self.notify_subviews_changed(id),
                PendingUpdate::PreferredSizeChanged(id) => self.notify_preferred_size_changed(id),
            }
        }
        self.flushing = false;
    }

    /// Whether a hook is currently running.
    #[inline]
    pub fn is_busy(&self) -> bool {
        self.busy > 0
    }

    // =========================================================================
    // Hook invocation
    // =========================================================================

    /// Run `f` with the behavior of `id` and a context for it.
    ///
    /// Returns `None` if `id` is dead or its behavior is already running a
    /// hook further up the stack.
    pub fn invoke<R>(
        &mut self,
        id: ViewId,
        f: impl FnOnce(&mut (dyn View + 'static), &mut ViewCtx<'_>) -> R,
    ) -> Option<R> {
        let node = self.nodes.get_mut(id)?;
        let Some(mut behavior) = node.behavior.take() else {
            tracing::warn!(target: targets::VIEW, ?id, "view is already handling a hook, call skipped");
            return None;
        };

        self.busy += 1;
        let result = {
            let mut cx = ViewCtx::new(self, id);
            f(behavior.as_mut(), &mut cx)
        };
        self.busy -= 1;

        match self.nodes.get_mut(id) {
            Some(node) => node.behavior = Some(behavior),
            None => {
                tracing::trace!(target: targets::VIEW, ?id, "view destroyed during its own hook");
            }
        }

        if self.busy == 0 {
            self.flush_pending();
        }
        Some(result)
    }

    // =========================================================================
    // Redraw and drawing
    // =========================================================================

    /// Mark the whole context dirty.
    #[inline]
    pub fn request_redraw(&mut self) {
        self.redraw = true;
    }

    #[inline]
    pub fn needs_redraw(&self) -> bool {
        self.redraw
    }

    /// Consume the redraw flag.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    /// Draw `id` and its visible subtree in paint order.
    pub fn draw(&self, id: ViewId, ctx: &mut RenderContext<'_>) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if !node.base.is_visible() {
            return;
        }
        let Some(behavior) = node.behavior.as_deref() else {
            return;
        };

        let view = ViewRef::new(self, id, &node.base);
        let saved = ctx.origin();
        ctx.set_origin(saved + node.base.position());

        if behavior.pre_draw(view, ctx) {
            if behavior.draw(view, ctx) != Response::Finish {
                for child in self.nodes.children(id) {
                    self.draw(child, ctx);
                }
            }
            behavior.post_draw(view, ctx);
        }

        ctx.set_origin(saved);
    }

    // =========================================================================
    // Debugging
    // =========================================================================

    /// Text dump of the subtree rooted at `root`, with geometry and flags.
    pub fn dump(&self, root: ViewId) -> ViewResult<String> {
        Ok(ObjectTreeDebug::with_options(TreeFormatOptions::detailed())
            .format_subtree(&self.nodes, root)?)
    }
}

impl std::fmt::Debug for ViewTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewTree")
            .field("views", &self.nodes.len())
            .field("busy", &self.busy)
            .field("pending", &self.pending.len())
            .finish()
    }
}
