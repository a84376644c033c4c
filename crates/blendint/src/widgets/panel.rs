//! Single-content container with a background.

use crate::geometry::{Margin, Point, Rect, Size};
use crate::layout::DEFAULT_MARGIN;
use crate::render::RenderContext;
use crate::view::{
    PositionUpdateRequest, Response, SizeUpdateRequest, View, ViewCtx, ViewId, ViewRef,
};

/// Draws a background and keeps its content (the first child) sized to its
/// rectangle minus the margin.
///
/// Like a layout, a panel owns its content's geometry: the content's own
/// resize and move requests are rejected.
#[derive(Debug, Clone)]
pub struct Panel {
    margin: Margin,
    announced: Size,
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel {
    pub fn new() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            announced: Size::ZERO,
        }
    }

    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    #[inline]
    pub fn margin(&self) -> Margin {
        self.margin
    }

    pub fn set_margin(&mut self, cx: &mut ViewCtx<'_>, margin: Margin) {
        if self.margin != margin {
            self.margin = margin;
            self.refill(cx);
        }
    }

    pub fn content(&self, view: ViewRef<'_>) -> Option<ViewId> {
        view.tree().first_child(view.id())
    }

    fn fill_content(&self, cx: &mut ViewCtx<'_>) {
        let id = cx.id();
        if let Some(content) = cx.first_child(id) {
            let rect = Rect::from_origin_size(Point::ZERO, cx.size()).shrink(self.margin);
            cx.set_subview_geometry(content, rect);
        }
    }

    /// Fill the content, then tell the container if the preferred size moved.
    fn refill(&mut self, cx: &mut ViewCtx<'_>) {
        self.fill_content(cx);
        let id = cx.id();
        let Some(preferred) = cx.view_ref(id).map(|view| self.preferred_size(view)) else {
            return;
        };
        if preferred != self.announced {
            self.announced = preferred;
            cx.notify_preferred_size_changed(id);
        }
    }
}

impl View for Panel {
    fn type_name(&self) -> &'static str {
        "Panel"
    }

    fn preferred_size(&self, view: ViewRef<'_>) -> Size {
        let content = self
            .content(view)
            .map_or(Size::ZERO, |content| view.tree().preferred_size(content));
        Size::new(
            content.width + self.margin.horizontal(),
            content.height + self.margin.vertical(),
        )
    }

    fn is_expand_x(&self, view: ViewRef<'_>) -> bool {
        self.content(view)
            .is_some_and(|content| view.tree().is_expand_x(content))
    }

    fn is_expand_y(&self, view: ViewRef<'_>) -> bool {
        self.content(view)
            .is_some_and(|content| view.tree().is_expand_y(content))
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
        self.refill(cx);
    }

    fn preferred_size_changed(&mut self, cx: &mut ViewCtx<'_>, child: ViewId) {
        if cx.first_child(cx.id()) == Some(child) {
            self.refill(cx);
        }
    }

    fn draw(&self, view: ViewRef<'_>, ctx: &mut RenderContext<'_>) -> Response {
        let color = ctx.theme().palette.panel;
        let base = view.base();
        ctx.fill_round_rect(view.local_rect(), color, base.round_type(), base.round_radius());
        Response::Ignore
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::HLayout;
    use crate::widgets::Spacer;
    use crate::view::ViewTree;

    #[test]
    fn test_content_fills_panel_minus_margin() {
        let mut tree = ViewTree::new();
        let panel = tree.create(Panel::new().with_margin(Margin::uniform(5)));
        let content = tree.create(Spacer::fixed(Size::new(10, 10)));
        tree.push_back(panel, content).unwrap();
        tree.resize(panel, Size::new(100, 60));

        assert_eq!(tree.position(content), Point::new(5, 5));
        assert_eq!(tree.size(content), Size::new(90, 50));
    }

    #[test]
    fn test_content_cannot_resize_itself() {
        let mut tree = ViewTree::new();
        let panel = tree.create(Panel::new());
        let content = tree.create(Spacer::fixed(Size::new(10, 10)));
        tree.push_back(panel, content).unwrap();
        tree.resize(panel, Size::new(50, 50));

        let before = tree.size(content);
        tree.resize(content, Size::new(5, 5));
        assert_eq!(tree.size(content), before);
    }

    #[test]
    fn test_preferred_size_adds_margin() {
        let mut tree = ViewTree::new();
        let panel = tree.create(Panel::new().with_margin(Margin::new(1, 2, 3, 4)));
        let content = tree.create(Spacer::fixed(Size::new(10, 20)));
        tree.push_back(panel, content).unwrap();
        assert_eq!(tree.preferred_size(panel), Size::new(13, 27));
    }

    #[test]
    fn test_new_content_resizes_panel_inside_layout() {
        let mut tree = ViewTree::new();
        let row = tree.create(HLayout::horizontal().with_margin(Margin::ZERO));
        let panel = tree.create(Panel::new().with_margin(Margin::uniform(5)));
        tree.push_back(row, panel).unwrap();
        tree.resize(row, Size::new(200, 50));

        let content = tree.create(Spacer::fixed(Size::new(30, 10)));
        tree.push_back(panel, content).unwrap();

        assert_eq!(tree.size(panel), Size::new(40, 20));
        assert_eq!(tree.position(panel), Point::new(0, 15));
        assert_eq!(tree.size(content), Size::new(30, 10));
        assert_eq!(tree.position(content), Point::new(5, 5));
    }
}
