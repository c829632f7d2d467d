use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::Block as BlockWidget,
};

pub(crate) mod widgets;

/// Colors used to draw the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Theme {
    pub(crate) background: Color,
    pub(crate) snake: Color,
    pub(crate) snake_head: Color,
    pub(crate) food: Color,
    pub(crate) text: Color,
    pub(crate) grid: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Rgb(0, 0, 0),
            snake: Color::Rgb(0, 255, 0),
            snake_head: Color::Rgb(255, 255, 0),
            food: Color::Rgb(255, 0, 0),
            text: Color::Rgb(255, 255, 255),
            grid: Color::Rgb(51, 51, 51),
        }
    }
}

impl Theme {
    pub(crate) const fn text_style(&self) -> Style {
        Style::new().fg(self.text).bg(self.background)
    }

    pub(crate) const fn fill(color: Color, background: Color) -> Style {
        Style::new().fg(color).bg(background)
    }
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
