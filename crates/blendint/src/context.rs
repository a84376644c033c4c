//! The context: the root of the view tree and the entry point for input.
//!
//! A [`Context`] owns the [`ViewTree`], a root view the size of the window,
//! and the theme. Frames are the root's children, bottom to top in paint
//! order. The platform layer feeds input into the context, which routes it
//! to frames topmost-first:
//!
//! - the first frame that does not ignore a press is raised and becomes the
//!   active frame until the release;
//! - moves and the release go to the active frame while a button is down;
//! - otherwise moves go topmost-first, and the frame that takes the move
//!   becomes the hovered frame (the previous one gets a hover-out);
//! - a modal frame stops routing to every frame beneath it.
//!
//! # Example
//!
//! ```
//! use blendint::prelude::*;
//!
//! let mut context = Context::new(Size::new(800, 600));
//! let frame = context.add_frame(Frame::new()).unwrap();
//! context.tree_mut().resize(frame, Size::new(200, 100));
//!
//! let response = context.mouse_press(&MouseEvent::press(Point::new(50, 50), MouseButton::Left));
//! assert_eq!(response, Response::Finish);
//! ```

use blendint_core::PerfSpan;
use blendint_core::logging::targets;

use crate::error::{BlendIntError, ViewResult};
use crate::frame::{CursorShape, Frame};
use crate::geometry::{Point, Size};
use crate::render::{DrawCommand, RenderContext};
use crate::theme::ThemeConfig;
use crate::view::{KeyEvent, MouseEvent, Response, View, ViewCtx, ViewId, ViewRef, ViewTree};

/// The root view: as large as the window, draws nothing.
struct RootView;

impl View for RootView {
    fn type_name(&self) -> &'static str {
        "Root"
    }

    fn preferred_size(&self, view: ViewRef<'_>) -> Size {
        view.size()
    }
}

/// Which input hook to run on a frame.
#[derive(Debug, Clone, Copy)]
enum MouseAction {
    Press,
    Release,
    Move,
}

impl MouseAction {
    fn run(self, view: &mut dyn View, cx: &mut ViewCtx<'_>, event: &MouseEvent) -> Response {
        match self {
            MouseAction::Press => view.mouse_press(cx, event),
            MouseAction::Release => view.mouse_release(cx, event),
            MouseAction::Move => view.mouse_move(cx, event),
        }
    }
}

/// Root of a view tree plus input routing.
pub struct Context {
    tree: ViewTree,
    root: ViewId,
    theme: ThemeConfig,
    /// Frame that took the last move.
    hovered_frame: Option<ViewId>,
    /// Frame that took the current press, until release.
    active_frame: Option<ViewId>,
    cursor_shape: CursorShape,
    last_cursor: Point,
}

impl Context {
    /// A context of `size` with the default theme.
    pub fn new(size: Size) -> Self {
        Self::with_theme(size, ThemeConfig::default())
    }

    pub fn with_theme(size: Size, theme: ThemeConfig) -> Self {
        let mut tree = ViewTree::new();
        let root = tree.create_named("root", RootView);
        tree.resize(root, size);
        tracing::debug!(target: targets::VIEW, ?root, ?size, "context created");
        Self {
            tree,
            root,
            theme,
            hovered_frame: None,
            active_frame: None,
            cursor_shape: CursorShape::Arrow,
            last_cursor: Point::ZERO,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn root(&self) -> ViewId {
        self.root
    }

    #[inline]
    pub fn tree(&self) -> &ViewTree {
        &self.tree
    }

    #[inline]
    pub fn tree_mut(&mut self) -> &mut ViewTree {
        &mut self.tree
    }

    #[inline]
    pub fn theme(&self) -> &ThemeConfig {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: ThemeConfig) {
        self.theme = theme;
        self.tree.request_redraw();
    }

    pub fn size(&self) -> Size {
        self.tree.size(self.root)
    }

    /// Resize the window area.
    pub fn resize(&mut self, size: Size) {
        self.tree.resize(self.root, size);
    }

    /// Cursor the platform should currently show.
    #[inline]
    pub fn cursor_shape(&self) -> CursorShape {
        self.cursor_shape
    }

    #[inline]
    pub fn hovered_frame(&self) -> Option<ViewId> {
        self.hovered_frame.filter(|&frame| self.tree.contains(frame))
    }

    #[inline]
    pub fn active_frame(&self) -> Option<ViewId> {
        self.active_frame.filter(|&frame| self.tree.contains(frame))
    }

    // =========================================================================
    // Frames
    // =========================================================================

    /// Create a frame view and put it on top of the other frames.
    pub fn add_frame<V: View>(&mut self, frame: V) -> ViewResult<ViewId> {
        let id = self.tree.create(frame);
        if let Err(error) = self.attach_frame(id) {
            let _ = self.tree.destroy(id);
            return Err(error);
        }
        Ok(id)
    }

    /// Put an existing frame view on top of the other frames.
    pub fn attach_frame(&mut self, id: ViewId) -> ViewResult<()> {
        if !self.tree.contains(id) {
            return Err(blendint_core::ObjectError::InvalidObjectId.into());
        }
        if self.frame(id).is_none() {
            return Err(BlendIntError::wrong_type::<Frame>());
        }
        self.tree.push_back(self.root, id)
    }

    /// Frames bottom to top.
    pub fn frames(&self) -> Vec<ViewId> {
        self.tree.children(self.root).collect()
    }

    /// Frame state of `id`, if it is a live frame not currently handling input.
    pub fn frame(&self, id: ViewId) -> Option<&Frame> {
        self.tree.node(id)?.behavior()?.as_frame()
    }

    pub fn focused_widget(&self, frame: ViewId) -> Option<ViewId> {
        self.frame(frame)?.focused_widget()
    }

    pub fn hovered_widget(&self, frame: ViewId) -> Option<ViewId> {
        self.frame(frame)?.hovered_widget()
    }

    /// Give keyboard focus to `widget` inside `frame`, or clear it.
    pub fn set_focus(&mut self, frame: ViewId, widget: Option<ViewId>) -> ViewResult<()> {
        if !self.tree.contains(frame) {
            return Err(blendint_core::ObjectError::InvalidObjectId.into());
        }
        self.tree
            .invoke(frame, |view, cx| {
                view.as_frame_mut().map(|frame| frame.set_focus(cx, widget))
            })
            .flatten()
            .ok_or_else(BlendIntError::wrong_type::<Frame>)
    }

    /// Destroy a view, dropping any routing state that pointed at it.
    pub fn destroy(&mut self, id: ViewId) -> ViewResult<()> {
        self.tree.destroy(id)?;
        self.forget_dead_frames();
        Ok(())
    }

    fn forget_dead_frames(&mut self) {
        if self.hovered_frame.is_some_and(|frame| !self.tree.contains(frame)) {
            self.hovered_frame = None;
        }
        if self.active_frame.is_some_and(|frame| !self.tree.contains(frame)) {
            self.active_frame = None;
        }
    }

    fn raise(&mut self, frame: ViewId) {
        if let Err(error) = self.tree.move_to_last(frame) {
            tracing::warn!(target: targets::DISPATCH, ?frame, %error, "failed to raise frame");
        }
    }

    fn update_cursor(&mut self, frame: ViewId) {
        self.cursor_shape = self
            .tree
            .node(frame)
            .and_then(|node| node.behavior())
            .and_then(|view| view.cursor_shape())
            .unwrap_or_default();
    }

    // =========================================================================
    // Input routing
    // =========================================================================

    fn send(&mut self, frame: ViewId, action: MouseAction, event: &MouseEvent) -> Response {
        let local = event.localized(self.tree.absolute_position(frame));
        self.tree
            .invoke(frame, |view, cx| action.run(view, cx, &local))
            .unwrap_or_default()
    }

    /// Offer `event` to frames topmost-first. Returns the frame that took it.
    fn route(&mut self, action: MouseAction, event: &MouseEvent) -> (Option<ViewId>, Response) {
        let frames: Vec<ViewId> = self.tree.children(self.root).rev().collect();
        for frame in frames {
            if !self.tree.is_visible(frame) {
                continue;
            }
            let modal = self.tree.is_modal(frame);
            let response = self.send(frame, action, event);
            if response.is_consumed() {
                return (Some(frame), response);
            }
            if modal {
                tracing::trace!(target: targets::DISPATCH, ?frame, "modal frame blocks frames beneath");
                return (Some(frame), Response::Finish);
            }
        }
        (None, Response::Ignore)
    }

    #[tracing::instrument(skip(self), target = "blendint::dispatch", level = "trace")]
    pub fn mouse_press(&mut self, event: &MouseEvent) -> Response {
        self.last_cursor = event.position;
        let (frame, response) = self.route(MouseAction::Press, event);
        self.forget_dead_frames();

        match frame {
            Some(frame) if self.tree.contains(frame) => {
                self.raise(frame);
                self.active_frame = Some(frame);
                self.update_cursor(frame);
            }
            _ => self.active_frame = None,
        }
        response
    }

    #[tracing::instrument(skip(self), target = "blendint::dispatch", level = "trace")]
    pub fn mouse_release(&mut self, event: &MouseEvent) -> Response {
        self.last_cursor = event.position;
        let active = self.active_frame();
        self.active_frame = None;
        let response = match active {
            Some(frame) => {
                let response = self.send(frame, MouseAction::Release, event);
                self.update_cursor(frame);
                response
            }
            None => self.route(MouseAction::Release, event).1,
        };
        self.forget_dead_frames();
        response
    }

    #[tracing::instrument(skip(self), target = "blendint::dispatch", level = "trace")]
    pub fn mouse_move(&mut self, event: &MouseEvent) -> Response {
        self.last_cursor = event.position;

        if let Some(frame) = self.active_frame() {
            let response = self.send(frame, MouseAction::Move, event);
            self.forget_dead_frames();
            self.update_cursor(frame);
            return response;
        }

        let (frame, response) = self.route(MouseAction::Move, event);
        self.forget_dead_frames();
        let frame = frame.filter(|&frame| self.tree.contains(frame));

        let previous = self.hovered_frame();
        if previous != frame
            && let Some(previous) = previous
        {
            let local = event.localized(self.tree.absolute_position(previous));
            self.tree
                .invoke(previous, |view, cx| view.mouse_hover_out(cx, &local));
        }
        self.hovered_frame = frame;

        match frame {
            Some(frame) => self.update_cursor(frame),
            None => self.cursor_shape = CursorShape::Arrow,
        }
        response
    }

    /// Re-resolve hover at the last cursor position, for geometry changes
    /// that happened without the mouse moving.
    pub fn refresh_hover(&mut self) {
        if self.active_frame().is_some() {
            return;
        }
        self.mouse_move(&MouseEvent::moved(self.last_cursor));
    }

    #[tracing::instrument(skip(self), target = "blendint::dispatch", level = "trace")]
    pub fn key_press(&mut self, event: &KeyEvent) -> Response {
        let response = self.route_key(event, |view, cx, event| view.key_press(cx, event));
        self.forget_dead_frames();
        response
    }

    pub fn key_release(&mut self, event: &KeyEvent) -> Response {
        let response = self.route_key(event, |view, cx, event| view.key_release(cx, event));
        self.forget_dead_frames();
        response
    }

    fn route_key(
        &mut self,
        event: &KeyEvent,
        hook: impl Fn(&mut dyn View, &mut ViewCtx<'_>, &KeyEvent) -> Response,
    ) -> Response {
        let frames: Vec<ViewId> = self.tree.children(self.root).rev().collect();
        for frame in frames {
            if !self.tree.is_visible(frame) {
                continue;
            }
            let modal = self.tree.is_modal(frame);
            let response = self
                .tree
                .invoke(frame, |view, cx| hook(view, cx, event))
                .unwrap_or_default();
            if response.is_consumed() {
                return response;
            }
            if modal {
                return Response::Finish;
            }
        }
        Response::Ignore
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Draw every visible frame in paint order.
    pub fn draw(&self, ctx: &mut RenderContext<'_>) {
        let _span = PerfSpan::new("draw");
        self.tree.draw(self.root, ctx);
    }

    /// Draw into a fresh command list using the context's theme.
    pub fn render(&self) -> Vec<DrawCommand> {
        let mut ctx = RenderContext::new(&self.theme);
        self.draw(&mut ctx);
        ctx.into_commands()
    }

    /// Consume the redraw flag.
    pub fn take_redraw_request(&mut self) -> bool {
        self.tree.take_redraw_request()
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("root", &self.root)
            .field("frames", &self.tree.child_count(self.root))
            .field("hovered_frame", &self.hovered_frame)
            .field("active_frame", &self.active_frame)
            .field("cursor_shape", &self.cursor_shape)
            .finish()
    }
}

static_assertions::assert_impl_all!(Context: Send, Sync);
