use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use snake_engine::{Cell, CellKind, GridSize};

use crate::view::{self, Theme};

/// Terminal columns per board cell, so cells look roughly square.
const CELL_WIDTH: u16 = 2;

const FILLED: &str = "██";
const FOOD: &str = "()";
const GRID_DOT: &str = " ·";

#[derive(Debug)]
pub(crate) struct BoardDisplay<'a> {
    grid: GridSize,
    cells: &'a [(Cell, CellKind)],
    theme: &'a Theme,
    show_grid: bool,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub(crate) fn new(grid: GridSize, cells: &'a [(Cell, CellKind)], theme: &'a Theme) -> Self {
        Self {
            grid,
            cells,
            theme,
            show_grid: false,
            block: None,
        }
    }

    pub(crate) fn show_grid(self, show_grid: bool) -> Self {
        Self { show_grid, ..self }
    }

    pub(crate) fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub(crate) fn width(&self) -> u16 {
        let cells = u16::try_from(self.grid.width).unwrap_or(u16::MAX);
        cells
            .saturating_mul(CELL_WIDTH)
            .saturating_add(view::block_horizontal_margin(self.block.as_ref()))
    }

    pub(crate) fn height(&self) -> u16 {
        let cells = u16::try_from(self.grid.height).unwrap_or(u16::MAX);
        cells.saturating_add(view::block_vertical_margin(self.block.as_ref()))
    }

    /// Top-left terminal position of `cell`, if it is visible in `area`.
    fn position(area: Rect, cell: Cell) -> Option<(u16, u16)> {
        let x = u16::try_from(cell.x).ok()?.checked_mul(CELL_WIDTH)?;
        let y = u16::try_from(cell.y).ok()?;
        (x.checked_add(CELL_WIDTH)? <= area.width && y < area.height).then_some((area.x + x, area.y + y))
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let background = Theme::fill(theme.grid, theme.background);
        buf.set_style(area, background);
        for cell in self.grid.cells() {
            if let Some((x, y)) = Self::position(area, cell) {
                let dot = if self.show_grid { GRID_DOT } else { "  " };
                buf.set_string(x, y, dot, background);
            }
        }

        for &(cell, kind) in self.cells {
            let Some((x, y)) = Self::position(area, cell) else {
                continue;
            };
            let (symbol, color) = match kind {
                CellKind::SnakeHead => (FILLED, theme.snake_head),
                CellKind::SnakeBody => (FILLED, theme.snake),
                CellKind::Food => (FOOD, theme.food),
            };
            buf.set_string(x, y, symbol, Theme::fill(color, theme.background));
        }
    }
}
