//! Push button.
//!
//! A [`Button`] accepts a left press (so its frame focuses and captures it),
//! and emits [`clicked`](Button::clicked) when the press is released over
//! the button. Enter or Space while focused also clicks.
//!
//! # Signals
//!
//! - `clicked()`: Emitted when the button is activated

use blendint_core::Signal;
use blendint_core::logging::targets;

use super::label::{text_size, LINE_HEIGHT};
use crate::geometry::{Point, Size};
use crate::render::RenderContext;
use crate::view::{Key, KeyEvent, MouseButton, MouseEvent, Response, View, ViewCtx, ViewRef};

/// Horizontal padding around the label text.
const PADDING_X: i32 = 8;

/// A clickable button with a text label.
pub struct Button {
    text: String,
    pressed: bool,
    hovered: bool,
    clicked: Signal<()>,
}

impl Button {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pressed: false,
            hovered: false,
            clicked: Signal::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Emitted when the button is activated.
    pub fn clicked(&self) -> &Signal<()> {
        &self.clicked
    }

    fn click(&self, cx: &ViewCtx<'_>) {
        tracing::trace!(target: targets::DISPATCH, button = ?cx.id(), "button clicked");
        self.clicked.emit(());
    }
}

impl std::fmt::Debug for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Button")
            .field("text", &self.text)
            .field("pressed", &self.pressed)
            .finish()
    }
}

impl View for Button {
    fn type_name(&self) -> &'static str {
        "Button"
    }

    fn preferred_size(&self, _view: ViewRef<'_>) -> Size {
        let text = text_size(&self.text, 0);
        Size::new(text.width + 2 * PADDING_X, LINE_HEIGHT + PADDING_X)
    }

    fn draw(&self, view: ViewRef<'_>, ctx: &mut RenderContext<'_>) -> Response {
        let palette = &ctx.theme().palette;
        let background = if self.pressed {
            palette.button_pressed
        } else if self.hovered {
            palette.button_hover
        } else {
            palette.button
        };
        let text_color = palette.text;
        let base = view.base();
        ctx.fill_round_rect(view.local_rect(), background, base.round_type(), base.round_radius());
        ctx.text(Point::new(PADDING_X, PADDING_X / 2), self.text.clone(), text_color);
        Response::Finish
    }

    fn mouse_press(&mut self, cx: &mut ViewCtx<'_>, event: &MouseEvent) -> Response {
        if event.button != Some(MouseButton::Left) {
            return Response::Ignore;
        }
        self.pressed = true;
        cx.request_redraw();
        Response::Accept
    }

    fn mouse_release(&mut self, cx: &mut ViewCtx<'_>, event: &MouseEvent) -> Response {
        if !std::mem::take(&mut self.pressed) {
            return Response::Ignore;
        }
        cx.request_redraw();
        let inside = cx
            .view_ref(cx.id())
            .is_some_and(|view| view.local_rect().contains(event.local_position));
        if inside {
            self.click(cx);
        }
        Response::Accept
    }

    fn mouse_move(&mut self, _cx: &mut ViewCtx<'_>, _event: &MouseEvent) -> Response {
        if self.pressed { Response::Accept } else { Response::Ignore }
    }

    fn mouse_hover_in(&mut self, cx: &mut ViewCtx<'_>, _event: &MouseEvent) {
        self.hovered = true;
        cx.request_redraw();
    }

    fn mouse_hover_out(&mut self, cx: &mut ViewCtx<'_>, _event: &MouseEvent) {
        self.hovered = false;
        cx.request_redraw();
    }

    fn key_press(&mut self, cx: &mut ViewCtx<'_>, event: &KeyEvent) -> Response {
        match event.key {
            Key::Enter | Key::Space => {
                self.click(cx);
                Response::Accept
            }
            _ => Response::Ignore,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::view::ViewTree;

    fn counter(tree: &ViewTree, button: crate::view::ViewId) -> Arc<AtomicUsize> {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        tree.view::<Button>(button).unwrap().clicked().connect(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        count
    }

    #[test]
    fn test_release_inside_clicks() {
        let mut tree = ViewTree::new();
        let button = tree.create(Button::new("OK"));
        let count = counter(&tree, button);

        let press = MouseEvent::press(Point::new(5, 5), MouseButton::Left);
        let response = tree.invoke(button, |view, cx| view.mouse_press(cx, &press));
        assert_eq!(response, Some(Response::Accept));
        assert!(tree.view::<Button>(button).unwrap().is_pressed());

        let release = MouseEvent::release(Point::new(5, 5), MouseButton::Left);
        tree.invoke(button, |view, cx| view.mouse_release(cx, &release));
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!tree.view::<Button>(button).unwrap().is_pressed());
    }

    #[test]
    fn test_release_outside_does_not_click() {
        let mut tree = ViewTree::new();
        let button = tree.create(Button::new("OK"));
        let count = counter(&tree, button);

        let press = MouseEvent::press(Point::new(5, 5), MouseButton::Left);
        tree.invoke(button, |view, cx| view.mouse_press(cx, &press));
        let release = MouseEvent::release(Point::new(500, 5), MouseButton::Left);
        tree.invoke(button, |view, cx| view.mouse_release(cx, &release));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_right_press_is_ignored() {
        let mut tree = ViewTree::new();
        let button = tree.create(Button::new("OK"));
        let press = MouseEvent::press(Point::new(5, 5), MouseButton::Right);
        let response = tree.invoke(button, |view, cx| view.mouse_press(cx, &press));
        assert_eq!(response, Some(Response::Ignore));
    }

    #[test]
    fn test_enter_clicks() {
        let mut tree = ViewTree::new();
        let button = tree.create(Button::new("OK"));
        let count = counter(&tree, button);
        let key = KeyEvent::new(Key::Enter);
        tree.invoke(button, |view, cx| view.key_press(cx, &key));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
