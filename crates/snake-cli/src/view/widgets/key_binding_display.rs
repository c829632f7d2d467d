use ratatui::{
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Keys and what they do, e.g. `(&["←", "A"], "Left")`.
pub(crate) type KeyBinding = (&'static [&'static str], &'static str);

/// One-line legend of the active key bindings.
#[derive(Debug)]
pub(crate) struct KeyBindingDisplay<'a> {
    bindings: &'a [KeyBinding],
}

impl<'a> KeyBindingDisplay<'a> {
    pub(crate) fn new(bindings: &'a [KeyBinding]) -> Self {
        Self { bindings }
    }

    fn line(&self) -> Line<'static> {
        let mut spans = vec![];
        for (i, (keys, desc)) in self.bindings.iter().copied().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", SEPARATOR_STYLE));
            }
            spans.push(Span::styled(keys.join("/"), KEY_STYLE));
            spans.push(Span::styled(format!(" {desc}"), DESCRIPTION_STYLE));
        }
        Line::from(spans).centered()
    }
}

const KEY_STYLE: Style = Style::new().fg(Color::Cyan);
const DESCRIPTION_STYLE: Style = Style::new().fg(Color::Gray);
const SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);

impl Widget for KeyBindingDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.line().render(area, buf);
    }
}
