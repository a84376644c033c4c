//! Label widget for text display.
//!
//! Text measurement lives outside the core, so a label sizes itself from a
//! fixed character cell: [`CHAR_WIDTH`] per character and one
//! [`LINE_HEIGHT`] tall, plus [`PADDING`] on every side.
//!
//! # Example
//!
//! ```
//! use blendint::prelude::*;
//!
//! let mut tree = ViewTree::new();
//! let label = tree.create(Label::new("Hello"));
//! assert_eq!(tree.size(label), Size::new(5 * 8 + 4, 16 + 4));
//! ```

use crate::geometry::{Point, Size};
use crate::render::RenderContext;
use crate::view::{Response, View, ViewCtx, ViewRef};

/// Width of one character cell.
pub const CHAR_WIDTH: i32 = 8;

/// Height of one line of text.
pub const LINE_HEIGHT: i32 = 16;

/// Space between the text and the label's edges.
pub const PADDING: i32 = 2;

/// Preferred size of a single line of `text` with `padding` on every side.
pub fn text_size(text: &str, padding: i32) -> Size {
    let chars = text.chars().count() as i32;
    Size::new(chars * CHAR_WIDTH + 2 * padding, LINE_HEIGHT + 2 * padding)
}

/// A widget that displays one line of text.
#[derive(Debug, Clone, Default)]
pub struct Label {
    text: String,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text and ask for the new preferred size.
    ///
    /// A free label resizes itself. Inside a layout the resize request is
    /// rejected and the container re-solves from the new preferred size.
    pub fn set_text(&mut self, cx: &mut ViewCtx<'_>, text: impl Into<String>) {
        let text = text.into();
        if self.text == text {
            return;
        }
        self.text = text;
        let id = cx.id();
        let size = text_size(&self.text, PADDING);
        cx.resize(id, size);
        cx.notify_preferred_size_changed(id);
        cx.request_redraw();
    }
}

impl View for Label {
    fn type_name(&self) -> &'static str {
        "Label"
    }

    fn preferred_size(&self, _view: ViewRef<'_>) -> Size {
        text_size(&self.text, PADDING)
    }

    fn draw(&self, _view: ViewRef<'_>, ctx: &mut RenderContext<'_>) -> Response {
        let color = ctx.theme().palette.text;
        ctx.text(Point::new(PADDING, PADDING), self.text.clone(), color);
        Response::Finish
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Margin;
    use crate::layout::HLayout;
    use crate::view::ViewTree;
    use crate::widgets::Spacer;

    #[test]
    fn test_text_size_counts_chars() {
        assert_eq!(text_size("", 0), Size::new(0, LINE_HEIGHT));
        assert_eq!(text_size("héllo", 1), Size::new(5 * CHAR_WIDTH + 2, LINE_HEIGHT + 2));
    }

    #[test]
    fn test_set_text_resizes_free_label() {
        let mut tree = ViewTree::new();
        let label = tree.create(Label::new("ab"));
        tree.with_view_mut::<Label, _>(label, |label, cx| label.set_text(cx, "abcd"))
            .unwrap();

        assert_eq!(tree.view::<Label>(label).unwrap().text(), "abcd");
        assert_eq!(tree.size(label), text_size("abcd", PADDING));
    }

    #[test]
    fn test_set_text_reflows_enclosing_layout() {
        let mut tree = ViewTree::new();
        let row = tree.create(HLayout::horizontal().with_margin(Margin::ZERO).with_space(0));
        let label = tree.create(Label::new("ab"));
        let next = tree.create(Spacer::fixed(Size::new(10, 10)));
        tree.push_back(row, label).unwrap();
        tree.push_back(row, next).unwrap();
        tree.resize(row, Size::new(100, 20));
        assert_eq!(tree.position(next).x, text_size("ab", PADDING).width);

        tree.with_view_mut::<Label, _>(label, |label, cx| label.set_text(cx, "abcd"))
            .unwrap();

        assert_eq!(tree.size(label), text_size("abcd", PADDING));
        assert_eq!(tree.position(next).x, text_size("abcd", PADDING).width);
    }
}
