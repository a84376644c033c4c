//! Dialogs: frames that close themselves on Escape.

use blendint_core::logging::targets;

use super::{CursorShape, Frame};
use crate::geometry::Size;
use crate::render::RenderContext;
use crate::theme::ThemeConfig;
use crate::view::{
    Key, KeyEvent, MouseEvent, PositionUpdateRequest, Response, SizeUpdateRequest, View, ViewCtx,
    ViewId, ViewRef,
};

/// A resizable frame that destroys itself when Escape is pressed.
///
/// Escape is handled before the focused widget sees the key. Every other
/// event goes through the wrapped [`Frame`].
#[derive(Debug)]
pub struct Dialog {
    frame: Frame,
}

impl Default for Dialog {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialog {
    pub fn new() -> Self {
        Self::with_theme(&ThemeConfig::default())
    }

    pub fn with_theme(theme: &ThemeConfig) -> Self {
        Self {
            frame: Frame::with_theme(theme).with_resizable(true),
        }
    }

    pub fn with_modal(mut self, modal: bool) -> Self {
        self.frame.set_modal(modal);
        self
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }
}

impl View for Dialog {
    fn type_name(&self) -> &'static str {
        "Dialog"
    }

    fn preferred_size(&self, view: ViewRef<'_>) -> Size {
        self.frame.preferred_size(view)
    }

    fn size_update_test(&self, view: ViewRef<'_>, request: &SizeUpdateRequest) -> bool {
        self.frame.size_update_test(view, request)
    }

    fn position_update_test(&self, view: ViewRef<'_>, request: &PositionUpdateRequest) -> bool {
        self.frame.position_update_test(view, request)
    }

    fn perform_size_update(&mut self, cx: &mut ViewCtx<'_>, request: &SizeUpdateRequest) {
        self.frame.perform_size_update(cx, request);
    }

    fn subviews_changed(&mut self, cx: &mut ViewCtx<'_>) {
        self.frame.subviews_changed(cx);
    }

    fn preferred_size_changed(&mut self, cx: &mut ViewCtx<'_>, child: ViewId) {
        self.frame.preferred_size_changed(cx, child);
    }

    fn draw(&self, view: ViewRef<'_>, ctx: &mut RenderContext<'_>) -> Response {
        let color = ctx.theme().palette.dialog;
        self.frame.draw_background(view, ctx, color);
        Response::Ignore
    }

    fn mouse_press(&mut self, cx: &mut ViewCtx<'_>, event: &MouseEvent) -> Response {
        self.frame.mouse_press(cx, event)
    }

    fn mouse_release(&mut self, cx: &mut ViewCtx<'_>, event: &MouseEvent) -> Response {
        self.frame.mouse_release(cx, event)
    }

    fn mouse_move(&mut self, cx: &mut ViewCtx<'_>, event: &MouseEvent) -> Response {
        self.frame.mouse_move(cx, event)
    }

    fn mouse_hover_out(&mut self, cx: &mut ViewCtx<'_>, event: &MouseEvent) {
        self.frame.mouse_hover_out(cx, event);
    }

    fn key_press(&mut self, cx: &mut ViewCtx<'_>, event: &KeyEvent) -> Response {
        if event.key == Key::Escape {
            let id = cx.id();
            tracing::debug!(target: targets::FRAME, dialog = ?id, "escape pressed, closing dialog");
            if let Err(error) = cx.destroy(id) {
                tracing::warn!(target: targets::FRAME, dialog = ?id, %error, "failed to close dialog");
            }
            return Response::Finish;
        }
        self.frame.key_press(cx, event)
    }

    fn key_release(&mut self, cx: &mut ViewCtx<'_>, event: &KeyEvent) -> Response {
        self.frame.key_release(cx, event)
    }

    fn is_modal(&self) -> bool {
        self.frame.is_modal()
    }

    fn cursor_shape(&self) -> Option<CursorShape> {
        self.frame.cursor_shape()
    }

    fn as_frame(&self) -> Option<&Frame> {
        Some(&self.frame)
    }

    fn as_frame_mut(&mut self) -> Option<&mut Frame> {
        Some(&mut self.frame)
    }
}
