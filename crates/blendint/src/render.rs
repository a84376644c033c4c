//! Draw pass output.
//!
//! The core never talks to OpenGL. Views describe what they want drawn by
//! pushing [`DrawCommand`]s into a [`RenderContext`]; the platform layer
//! turns those into GL calls. Commands carry absolute (context) coordinates.

use crate::geometry::{Point, Rect};
use crate::theme::{Color, ThemeConfig};
use crate::view::RoundType;

/// One primitive produced by the draw pass.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// A filled, optionally rounded rectangle.
    Rect {
        rect: Rect,
        color: Color,
        round_type: RoundType,
        radius: f32,
    },
    /// A run of text whose baseline starts at `origin`.
    Text {
        origin: Point,
        text: String,
        color: Color,
    },
}

/// State threaded through one draw pass.
pub struct RenderContext<'a> {
    theme: &'a ThemeConfig,
    /// Absolute position of the view currently drawing.
    origin: Point,
    commands: Vec<DrawCommand>,
}

impl<'a> RenderContext<'a> {
    pub fn new(theme: &'a ThemeConfig) -> Self {
        Self {
            theme,
            origin: Point::ZERO,
            commands: Vec::new(),
        }
    }

    #[inline]
    pub fn theme(&self) -> &'a ThemeConfig {
        self.theme
    }

    /// Absolute bottom-left corner of the view being drawn.
    #[inline]
    pub fn origin(&self) -> Point {
        self.origin
    }

    pub(crate) fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Fill a rectangle given in the current view's coordinates.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.fill_round_rect(rect, color, RoundType::NONE, 0.0);
    }

    /// Fill a rounded rectangle given in the current view's coordinates.
    pub fn fill_round_rect(
        &mut self,
        rect: Rect,
        color: Color,
        round_type: RoundType,
        radius: f32,
    ) {
        self.commands.push(DrawCommand::Rect {
            rect: rect.translated(self.origin.x, self.origin.y),
            color,
            round_type,
            radius,
        });
    }

    /// Draw text at a point in the current view's coordinates.
    pub fn text(&mut self, at: Point, text: impl Into<String>, color: Color) {
        self.commands.push(DrawCommand::Text {
            origin: self.origin + at,
            text: text.into(),
            color,
        });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_are_translated() {
        let theme = ThemeConfig::default();
        let mut ctx = RenderContext::new(&theme);
        ctx.set_origin(Point::new(10, 20));
        ctx.fill_rect(Rect::new(1, 2, 3, 4), Color::WHITE);
        ctx.text(Point::new(5, 5), "hi", Color::BLACK);

        assert_eq!(
            ctx.commands()[0],
            DrawCommand::Rect {
                rect: Rect::new(11, 22, 3, 4),
                color: Color::WHITE,
                round_type: RoundType::NONE,
                radius: 0.0,
            }
        );
        assert_eq!(
            ctx.commands()[1],
            DrawCommand::Text {
                origin: Point::new(15, 25),
                text: "hi".into(),
                color: Color::BLACK,
            }
        );
    }
}
