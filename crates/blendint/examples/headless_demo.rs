//! Headless walkthrough: build a frame and a dialog, feed input, print the
//! tree and the draw commands.
//!
//! Run with: cargo run -p blendint --example headless_demo [theme.toml]
//!
//! Set `RUST_LOG=blendint=trace` to watch the update protocol and dispatch.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use blendint::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), BlendIntError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("blendint=info")),
        )
        .init();

    let theme = match std::env::args().nth(1) {
        Some(path) => ThemeConfig::load(path)?,
        None => ThemeConfig::default(),
    };
    let mut context = Context::with_theme(Size::new(640, 480), theme.clone());

    // A frame with a toolbar row and a 2x2 table below it.
    let frame = context.add_frame(Frame::with_theme(&theme))?;
    let clicks = Arc::new(AtomicUsize::new(0));
    let ok = {
        let tree = context.tree_mut();
        let column = tree.create_named("column", VLayout::vertical());
        let toolbar = tree.create_named("toolbar", HLayout::horizontal());
        let ok = tree.create_named("ok", Button::new("OK"));
        let cancel = tree.create_named("cancel", Button::new("Cancel"));
        tree.push_back(toolbar, ok)?;
        tree.push_back(toolbar, cancel)?;
        let filler = tree.create(Spacer::horizontal());
        tree.push_back(toolbar, filler)?;

        let table = tree.create_named("table", TableLayout::new(2, 2));
        for text in ["Name", "blendint", "Version", env!("CARGO_PKG_VERSION")] {
            let label = tree.create(Label::new(text));
            tree.push_back(table, label)?;
        }

        tree.push_back(column, toolbar)?;
        tree.push_back(column, table)?;
        tree.push_back(frame, column)?;
        tree.set_position(frame, Point::new(20, 20));
        tree.resize(frame, Size::new(360, 200));
        ok
    };

    let counter = clicks.clone();
    if let Some(button) = context.tree().view::<Button>(ok) {
        button.clicked().connect(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
    }

    // A modal dialog on top.
    let dialog = context.add_frame(Dialog::with_theme(&theme).with_modal(true))?;
    {
        let tree = context.tree_mut();
        let panel = tree.create(Panel::new());
        let message = tree.create(Label::new("Press Escape to close"));
        tree.push_back(panel, message)?;
        tree.push_back(dialog, panel)?;
        tree.set_position(dialog, Point::new(300, 250));
        tree.resize(dialog, Size::new(240, 80));
    }

    println!("{}", context.tree().dump(context.root())?);

    let ok_center = {
        let rect = context.tree().absolute_rect(ok);
        Point::new(rect.origin.x + rect.size.width / 2, rect.origin.y + rect.size.height / 2)
    };

    // Blocked by the modal dialog.
    click(&mut context, ok_center);
    tracing::info!(clicks = clicks.load(Ordering::SeqCst), "clicked while the dialog was open");

    context.key_press(&KeyEvent::new(Key::Escape));
    tracing::info!(frames = context.frames().len(), "dialog closed");

    click(&mut context, ok_center);
    tracing::info!(clicks = clicks.load(Ordering::SeqCst), "clicked after closing the dialog");

    // Labels and layouts ignore presses, so this drags the frame.
    let grab = Point::new(30, 22);
    context.mouse_press(&MouseEvent::press(grab, MouseButton::Left));
    context.mouse_move(&MouseEvent::moved(grab.offset(40, 10)));
    context.mouse_release(&MouseEvent::release(grab.offset(40, 10), MouseButton::Left));
    tracing::info!(position = ?context.tree().position(frame), "frame moved");

    if context.take_redraw_request() {
        for command in context.render() {
            println!("{command:?}");
        }
    }
    Ok(())
}

fn click(context: &mut Context, at: Point) {
    context.mouse_press(&MouseEvent::press(at, MouseButton::Left));
    context.mouse_release(&MouseEvent::release(at, MouseButton::Left));
}
