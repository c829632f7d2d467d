use std::{io, mem, time::Duration};

use crossterm::event;
use ratatui::DefaultTerminal;
use snake_engine::{Cell, CellKind, Command, Hud, Renderer, SessionState};

use super::{
    keys,
    screen::{PlayScreen, ViewSettings},
};

/// Draws the game in the terminal and reads the keyboard.
pub(crate) struct TerminalRenderer<'a> {
    terminal: &'a mut DefaultTerminal,
    settings: ViewSettings,
    cells: Vec<(Cell, CellKind)>,
    state: SessionState,
}

impl<'a> TerminalRenderer<'a> {
    pub(crate) fn new(terminal: &'a mut DefaultTerminal, settings: ViewSettings) -> Self {
        Self {
            terminal,
            settings,
            cells: vec![],
            state: SessionState::Ready,
        }
    }
}

impl Renderer for TerminalRenderer<'_> {
    fn draw_cell(&mut self, cell: Cell, kind: CellKind) {
        self.cells.push((cell, kind));
    }

    fn present(&mut self, hud: &Hud<'_>) -> io::Result<()> {
        self.state = hud.state;
        let cells = mem::take(&mut self.cells);
        let screen = PlayScreen {
            hud,
            cells: &cells,
            settings: &self.settings,
        };
        self.terminal.draw(|frame| screen.draw(frame))?;
        Ok(())
    }

    fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<Command>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        let event = event::read()?;
        Ok(event
            .as_key_press_event()
            .and_then(|key| keys::command_for(key, self.state)))
    }
}
