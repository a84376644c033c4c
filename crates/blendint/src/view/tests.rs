//! Tests for the view tree and the update protocol.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use super::*;
use crate::error::BlendIntError;
use crate::geometry::{Point, Size};
use crate::render::RenderContext;
use crate::theme::ThemeConfig;

type Log = Arc<Mutex<Vec<String>>>;

/// A view that records the protocol calls it receives.
struct Recorder {
    name: &'static str,
    preferred: Size,
    log: Log,
}

impl Recorder {
    fn new(name: &'static str, log: &Log) -> Self {
        Self {
            name,
            preferred: Size::new(10, 10),
            log: log.clone(),
        }
    }

    fn record(&self, entry: String) {
        self.log.lock().push(entry);
    }
}

impl View for Recorder {
    fn type_name(&self) -> &'static str {
        "Recorder"
    }

    fn preferred_size(&self, _view: ViewRef<'_>) -> Size {
        self.preferred
    }

    fn perform_size_update(&mut self, cx: &mut ViewCtx<'_>, request: &SizeUpdateRequest) {
        let id = cx.id();
        let role = if request.target() == id { "target" } else { "container" };
        self.record(format!("{}:size:{}", self.name, role));
        if request.target() == id {
            cx.apply_size(request.data());
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
        let role = if request.target() == id { "target" } else { "container" };
        self.record(format!("{}:visible:{}", self.name, role));
        if request.target() == id {
            cx.apply_visibility(request.data());
        }
        if request.source() == id {
            cx.report_visibility_update(request);
        }
    }

    fn subviews_changed(&mut self, _cx: &mut ViewCtx<'_>) {
        self.record(format!("{}:subviews", self.name));
    }
}

/// Resizes another view from inside its own resize handler.
struct Chain {
    next: Option<ViewId>,
}

impl View for Chain {
    fn preferred_size(&self, _view: ViewRef<'_>) -> Size {
        Size::ZERO
    }

    fn perform_size_update(&mut self, cx: &mut ViewCtx<'_>, request: &SizeUpdateRequest) {
        let id = cx.id();
        if request.target() == id {
            cx.apply_size(request.data());
            if let Some(next) = self.next {
                assert!(cx.is_busy());
                cx.resize(next, request.data());
                // Queued: not applied until the outermost hook returns.
                assert_eq!(ViewTree::size(cx, next), Size::ZERO);
            }
        }
    }
}

/// Destroys itself when pressed.
struct SelfDestruct;

impl View for SelfDestruct {
    fn preferred_size(&self, _view: ViewRef<'_>) -> Size {
        Size::new(5, 5)
    }

    fn mouse_press(&mut self, cx: &mut ViewCtx<'_>, _event: &MouseEvent) -> Response {
        let id = cx.id();
        cx.destroy(id).unwrap();
        assert!(!cx.is_alive());
        Response::Accept
    }
}

/// Draws a rectangle and optionally hides its children.
struct Painter {
    finish: bool,
    skip: bool,
}

impl View for Painter {
    fn preferred_size(&self, _view: ViewRef<'_>) -> Size {
        Size::new(10, 10)
    }

    fn pre_draw(&self, _view: ViewRef<'_>, _ctx: &mut RenderContext<'_>) -> bool {
        !self.skip
    }

    fn draw(&self, view: ViewRef<'_>, ctx: &mut RenderContext<'_>) -> Response {
        ctx.fill_rect(view.local_rect(), crate::theme::Color::WHITE);
        if self.finish { Response::Finish } else { Response::Ignore }
    }
}

fn painter() -> Painter {
    Painter {
        finish: false,
        skip: false,
    }
}

fn log() -> Log {
    Arc::new(Mutex::new(Vec::new()))
}

// =============================================================================
// Update protocol
// =============================================================================

#[test]
fn test_create_uses_preferred_size() {
    let log = log();
    let mut tree = ViewTree::new();
    let view = tree.create(Recorder {
        preferred: Size::new(30, 12),
        ..Recorder::new("a", &log)
    });
    assert_eq!(tree.size(view), Size::new(30, 12));
    assert!(tree.is_visible(view));
}

#[test]
fn test_resize_performs_then_reports_to_container() {
    let log = log();
    let mut tree = ViewTree::new();
    let parent = tree.create(Recorder::new("parent", &log));
    let child = tree.create(Recorder::new("child", &log));
    tree.push_back(parent, child).unwrap();
    log.lock().clear();

    tree.resize(child, Size::new(40, 20));

    assert_eq!(tree.size(child), Size::new(40, 20));
    assert_eq!(
        *log.lock(),
        vec!["child:size:target".to_string(), "parent:size:container".to_string()]
    );
}

#[test]
fn test_unchanged_request_is_not_performed() {
    let log = log();
    let mut tree = ViewTree::new();
    let view = tree.create(Recorder::new("a", &log));
    tree.resize(view, Size::new(10, 10));
    tree.set_visible(view, true);
    assert!(log.lock().is_empty());
}

#[test]
fn test_negative_size_is_clamped() {
    let log = log();
    let mut tree = ViewTree::new();
    let view = tree.create(Recorder::new("a", &log));
    tree.resize(view, Size::new(-5, 7));
    assert_eq!(tree.size(view), Size::new(0, 7));
}

#[test]
fn test_visibility_is_reported() {
    let log = log();
    let mut tree = ViewTree::new();
    let parent = tree.create(Recorder::new("parent", &log));
    let child = tree.create(Recorder::new("child", &log));
    tree.push_back(parent, child).unwrap();
    log.lock().clear();

    tree.set_visible(child, false);

    assert!(!tree.is_visible(child));
    assert_eq!(
        *log.lock(),
        vec!["child:visible:target".to_string(), "parent:visible:container".to_string()]
    );
}

#[test]
fn test_round_type_and_radius() {
    let mut tree = ViewTree::new();
    let view = tree.create(painter());

    tree.set_round_type(view, RoundType::from_bits(0xFF));
    assert_eq!(tree.round_type(view), RoundType::ALL);

    tree.set_round_type(view, RoundType::TOP_LEFT | RoundType::BOTTOM_RIGHT);
    assert!(tree.round_type(view).contains(RoundType::TOP_LEFT));
    assert!(!tree.round_type(view).contains(RoundType::TOP_RIGHT));

    tree.set_round_radius(view, 6.5);
    assert_eq!(tree.round_radius(view), 6.5);
    tree.set_round_radius(view, -1.0);
    assert_eq!(tree.round_radius(view), 0.0);
}

#[test]
fn test_reentrant_request_is_queued() {
    let mut tree = ViewTree::new();
    let last = tree.create(Chain { next: None });
    let first = tree.create(Chain { next: Some(last) });

    tree.resize(first, Size::new(25, 25));

    assert!(!tree.is_busy());
    assert_eq!(tree.size(first), Size::new(25, 25));
    assert_eq!(tree.size(last), Size::new(25, 25));
}

#[test]
fn test_requests_on_dead_views_are_ignored() {
    let mut tree = ViewTree::new();
    let view = tree.create(painter());
    tree.destroy(view).unwrap();

    tree.resize(view, Size::new(1, 1));
    tree.set_position(view, Point::new(1, 1));
    assert_eq!(tree.size(view), Size::ZERO);
    assert!(!tree.is_visible(view));
}

// =============================================================================
// Tree editing
// =============================================================================

#[test]
fn test_edits_notify_containers() {
    let log = log();
    let mut tree = ViewTree::new();
    let a = tree.create(Recorder::new("a", &log));
    let b = tree.create(Recorder::new("b", &log));
    let child = tree.create(Recorder::new("child", &log));

    tree.push_back(a, child).unwrap();
    tree.push_back(b, child).unwrap();

    assert_eq!(tree.parent(child), Some(b));
    assert_eq!(tree.child_count(a), 0);
    assert_eq!(
        *log.lock(),
        vec!["a:subviews".to_string(), "a:subviews".to_string(), "b:subviews".to_string()]
    );
}

#[test]
fn test_z_order_edits() {
    let mut tree = ViewTree::new();
    let parent = tree.create(painter());
    let a = tree.create(painter());
    let b = tree.create(painter());
    let c = tree.create(painter());
    tree.push_back(parent, a).unwrap();
    tree.push_back(parent, b).unwrap();
    tree.push_front(parent, c).unwrap();
    assert_eq!(tree.children(parent).collect::<Vec<_>>(), vec![c, a, b]);

    tree.move_to_last(c).unwrap();
    assert_eq!(tree.children(parent).collect::<Vec<_>>(), vec![a, b, c]);

    tree.move_to_first(b).unwrap();
    assert_eq!(tree.children(parent).collect::<Vec<_>>(), vec![b, a, c]);
    assert_eq!(tree.index_of(a), Some(1));
    assert_eq!(tree.child_at(parent, 2), Some(c));
    assert_eq!(tree.children(parent).rev().collect::<Vec<_>>(), vec![c, a, b]);

    tree.base_mut(a).unwrap().set_managed(false);
    tree.remove(a).unwrap();
    assert_eq!(tree.parent(a), None);
    assert!(tree.contains(a));
    assert_eq!(tree.children(parent).collect::<Vec<_>>(), vec![b, c]);
}

#[test]
fn test_remove_destroys_unreferenced_managed_child() {
    let mut tree = ViewTree::new();
    let parent = tree.create(painter());
    let child = tree.create(painter());
    let grandchild = tree.create(painter());
    tree.push_back(parent, child).unwrap();
    tree.push_back(child, grandchild).unwrap();

    tree.remove(child).unwrap();

    assert!(!tree.contains(child));
    assert!(!tree.contains(grandchild));
    assert_eq!(tree.child_count(parent), 0);
}

#[test]
fn test_remove_keeps_retained_child_alive() {
    let mut tree = ViewTree::new();
    let parent = tree.create(painter());
    let child = tree.create(painter());
    tree.push_back(parent, child).unwrap();

    assert_eq!(tree.retain(child).unwrap(), 1);
    tree.remove(child).unwrap();
    assert!(tree.contains(child));
    assert_eq!(tree.parent(child), None);

    // Back in a container with no references left: removal destroys it.
    tree.push_back(parent, child).unwrap();
    assert_eq!(tree.release(child).unwrap(), 0);
    assert_eq!(tree.release(child).unwrap(), 0);
    tree.remove(child).unwrap();
    assert!(!tree.contains(child));
}

#[test]
fn test_remove_root_is_a_no_op() {
    let mut tree = ViewTree::new();
    let root = tree.create(painter());
    tree.remove(root).unwrap();
    assert!(tree.contains(root));
}

#[test]
fn test_cycle_is_rejected() {
    let mut tree = ViewTree::new();
    let a = tree.create(painter());
    let b = tree.create(painter());
    tree.push_back(a, b).unwrap();

    let result = tree.push_back(b, a);
    assert!(matches!(
        result,
        Err(BlendIntError::Tree(blendint_core::ObjectError::CircularParentage))
    ));
}

// =============================================================================
// Destruction
// =============================================================================

#[test]
fn test_destroy_fires_once_and_cascades_to_managed_children() {
    let mut tree = ViewTree::new();
    let parent = tree.create(painter());
    let managed = tree.create(painter());
    let unmanaged = tree.create(painter());
    tree.base_mut(unmanaged).unwrap().set_managed(false);
    tree.push_back(parent, managed).unwrap();
    tree.push_back(parent, unmanaged).unwrap();

    let fired = Arc::new(AtomicUsize::new(0));
    let f = fired.clone();
    tree.destroyed_signal(parent).unwrap().connect(move |_| {
        f.fetch_add(1, Ordering::SeqCst);
    });

    tree.destroy(parent).unwrap();
    assert!(tree.destroy(parent).is_err());

    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert!(!tree.contains(parent));
    assert!(!tree.contains(managed));
    assert!(tree.contains(unmanaged));
    assert_eq!(tree.parent(unmanaged), None);
}

#[test]
fn test_destroy_unbinds_retained_managed_children() {
    let mut tree = ViewTree::new();
    let parent = tree.create(painter());
    let kept = tree.create(painter());
    let dropped = tree.create(painter());
    tree.push_back(parent, kept).unwrap();
    tree.push_back(parent, dropped).unwrap();
    tree.retain(kept).unwrap();

    tree.destroy(parent).unwrap();

    assert!(tree.contains(kept));
    assert_eq!(tree.parent(kept), None);
    assert_eq!(tree.base(kept).unwrap().reference_count(), 1);
    assert!(!tree.contains(dropped));
}

#[test]
fn test_destroyed_fires_while_subtree_is_intact() {
    let mut tree = ViewTree::new();
    let parent = tree.create(painter());
    let child = tree.create(painter());
    tree.push_back(parent, child).unwrap();

    let seen = Arc::new(Mutex::new(None));
    let s = seen.clone();
    tree.destroyed_signal(child).unwrap().connect(move |&id| {
        *s.lock() = Some(id);
    });
    tree.destroy(parent).unwrap();

    assert_eq!(*seen.lock(), Some(child));
}

#[test]
fn test_view_destroys_itself_in_handler() {
    let mut tree = ViewTree::new();
    let parent = tree.create(painter());
    let view = tree.create(SelfDestruct);
    tree.push_back(parent, view).unwrap();

    let event = MouseEvent::press(Point::ZERO, MouseButton::Left);
    let response = tree.invoke(view, |view, cx| view.mouse_press(cx, &event));

    assert_eq!(response, Some(Response::Accept));
    assert!(!tree.contains(view));
    assert_eq!(tree.child_count(parent), 0);
    assert!(tree.invoke(view, |_, _| ()).is_none());
}

// =============================================================================
// Queries
// =============================================================================

#[test]
fn test_hit_test_prefers_topmost_sibling() {
    let mut tree = ViewTree::new();
    let root = tree.create(painter());
    tree.resize(root, Size::new(100, 100));
    let below = tree.create(painter());
    let above = tree.create(painter());
    tree.push_back(root, below).unwrap();
    tree.push_back(root, above).unwrap();
    for view in [below, above] {
        tree.resize(view, Size::new(50, 50));
        tree.set_position(view, Point::new(10, 10));
    }

    assert_eq!(tree.hit_test(root, Point::new(20, 20)), Some(above));
    assert_eq!(tree.hit_test(root, Point::new(90, 90)), Some(root));
    assert_eq!(tree.hit_test(root, Point::new(150, 20)), None);

    tree.set_visible(above, false);
    assert_eq!(tree.hit_test(root, Point::new(20, 20)), Some(below));
}

#[test]
fn test_absolute_position_accumulates() {
    let mut tree = ViewTree::new();
    let root = tree.create(painter());
    let child = tree.create(painter());
    tree.push_back(root, child).unwrap();
    tree.set_position(root, Point::new(100, 50));
    tree.set_position(child, Point::new(5, 7));

    assert_eq!(tree.absolute_position(child), Point::new(105, 57));
    assert_eq!(tree.absolute_rect(child).size, Size::new(10, 10));
}

#[test]
fn test_with_view_mut_checks_type() {
    let log = log();
    let mut tree = ViewTree::new();
    let view = tree.create(Recorder::new("a", &log));

    let name = tree.with_view_mut::<Recorder, _>(view, |recorder, _| recorder.name).unwrap();
    assert_eq!(name, "a");

    let wrong = tree.with_view_mut::<Painter, _>(view, |_, _| ());
    assert!(matches!(wrong, Err(BlendIntError::WrongViewType { .. })));

    tree.destroy(view).unwrap();
    let dead = tree.with_view_mut::<Recorder, _>(view, |_, _| ());
    assert!(matches!(dead, Err(BlendIntError::Tree(_))));
}

#[test]
fn test_dump_shows_names_and_geometry() {
    let mut tree = ViewTree::new();
    let root = tree.create_named("root", painter());
    let child = tree.create_named("child", painter());
    tree.push_back(root, child).unwrap();
    tree.set_visible(child, false);

    let dump = tree.dump(root).unwrap();
    assert!(dump.contains("root"));
    assert!(dump.contains("child"));
    assert!(dump.contains("size=10x10"));
    assert!(dump.contains("hidden"));
}

// =============================================================================
// Drawing
// =============================================================================

#[test]
fn test_draw_walks_visible_subtree() {
    let theme = ThemeConfig::default();
    let mut tree = ViewTree::new();
    let root = tree.create(painter());
    let shown = tree.create(painter());
    let hidden = tree.create(painter());
    tree.push_back(root, shown).unwrap();
    tree.push_back(root, hidden).unwrap();
    tree.set_visible(hidden, false);
    tree.set_position(shown, Point::new(3, 4));

    let mut ctx = RenderContext::new(&theme);
    tree.draw(root, &mut ctx);

    assert_eq!(ctx.commands().len(), 2);
    match &ctx.commands()[1] {
        crate::render::DrawCommand::Rect { rect, .. } => assert_eq!(rect.origin, Point::new(3, 4)),
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_draw_finish_and_pre_draw_skip() {
    let theme = ThemeConfig::default();
    let mut tree = ViewTree::new();
    let root = tree.create(Painter {
        finish: true,
        skip: false,
    });
    let child = tree.create(painter());
    tree.push_back(root, child).unwrap();

    let mut ctx = RenderContext::new(&theme);
    tree.draw(root, &mut ctx);
    assert_eq!(ctx.commands().len(), 1);

    let skipped = tree.create(Painter {
        finish: false,
        skip: true,
    });
    let mut ctx = RenderContext::new(&theme);
    tree.draw(skipped, &mut ctx);
    assert!(ctx.commands().is_empty());
}

#[test]
fn test_redraw_flag() {
    let mut tree = ViewTree::new();
    let view = tree.create(painter());
    tree.take_redraw_request();
    tree.resize(view, Size::new(20, 20));
    assert!(tree.needs_redraw());
    assert!(tree.take_redraw_request());
    assert!(!tree.needs_redraw());
}
