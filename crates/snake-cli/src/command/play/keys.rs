use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use snake_engine::{Command, Direction, SessionState};

use crate::view::widgets::KeyBinding;

/// Maps a key press to a game command.
///
/// Space starts the game from the ready screen and toggles pause otherwise.
pub(crate) fn command_for(key: KeyEvent, state: SessionState) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    let command = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => Command::Turn(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => Command::Turn(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => Command::Turn(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => Command::Turn(Direction::Right),
        KeyCode::Char(' ') if state.is_ready() => Command::Start,
        KeyCode::Enter => Command::Start,
        KeyCode::Char(' ' | 'p' | 'P') => Command::TogglePause,
        KeyCode::Char('r' | 'R') => Command::Restart,
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Command::Quit,
        _ => return None,
    };
    Some(command)
}

/// Legend for the keys that do something in `state`.
pub(crate) fn bindings(state: SessionState) -> &'static [KeyBinding] {
    match state {
        SessionState::Ready => &[(&["Space", "Enter"], "Start"), (&["Q"], "Quit")],
        SessionState::Running => &[
            (&["←↑↓→", "WASD"], "Turn"),
            (&["Space", "P"], "Pause"),
            (&["Q"], "Quit"),
        ],
        SessionState::Paused => &[
            (&["Space", "P"], "Resume"),
            (&["←↑↓→", "WASD"], "Turn"),
            (&["Q"], "Quit"),
        ],
        SessionState::GameOver(_) => &[(&["R"], "Restart"), (&["Q"], "Quit")],
    }
}
