//! Input Widget
//!
//! Text area for the active mode. The bottom title doubles as the submit
//! affordance and is dimmed when submitting is not possible. Text taller than
//! the box stays scrolled to its last line.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use super::output::wrapped_rows;
use crate::tui::app::Mode;
use crate::tui::theme::Theme;

pub const CHAT_PLACEHOLDER: &str = "Ask a question...";
pub const INGEST_PLACEHOLDER: &str =
    "Enter facts or information to start ingestion (e.g. 'Emalie went to Dubai')...";

/// Input widget for user text entry
pub struct InputWidget<'a> {
    content: &'a str,
    mode: Mode,
    loading: bool,
    can_submit: bool,
    theme: &'a Theme,
}

impl<'a> InputWidget<'a> {
    pub fn new(content: &'a str, theme: &'a Theme) -> Self {
        Self {
            content,
            mode: Mode::Chat,
            loading: false,
            can_submit: false,
            theme,
        }
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn can_submit(mut self, can_submit: bool) -> Self {
        self.can_submit = can_submit;
        self
    }

    /// Label of the submit affordance
    pub fn submit_label(&self) -> &'static str {
        match (self.mode, self.loading) {
            (Mode::Chat, false) => "Generate Response",
            (Mode::Chat, true) => "Thinking...",
            (Mode::Ingest, false) => "Ingest Data",
            (Mode::Ingest, true) => "Processing...",
        }
    }

    fn placeholder(&self) -> &'static str {
        match self.mode {
            Mode::Chat => CHAT_PLACEHOLDER,
            Mode::Ingest => INGEST_PLACEHOLDER,
        }
    }
}

impl Widget for InputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let accent = match self.mode {
            Mode::Chat => self.theme.chat_accent,
            Mode::Ingest => self.theme.ingest_accent,
        };
        let border_color = if self.loading {
            self.theme.border
        } else {
            accent
        };

        let submit_style = if self.can_submit {
            Style::default().fg(accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(self.theme.text_muted)
                .add_modifier(Modifier::DIM)
        };
        let submit = Line::from(Span::styled(
            format!(" Enter: {} ", self.submit_label()),
            submit_style,
        ))
        .alignment(Alignment::Right);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(format!(" {} ", self.mode.title()))
            .title_bottom(submit);

        let text: Vec<Line> = if self.content.is_empty() {
            vec![Line::from(Span::styled(
                self.placeholder(),
                Style::default().fg(self.theme.text_muted),
            ))]
        } else {
            let style = if self.loading {
                Style::default().fg(self.theme.text_muted)
            } else {
                Style::default().fg(self.theme.text_primary)
            };
            self.content
                .split('\n')
                .map(|l| Line::from(Span::styled(l, style)))
                .collect()
        };

        let inner_height = area.height.saturating_sub(2);
        let offset = wrapped_rows(&text, area.width.saturating_sub(2)).saturating_sub(inner_height);

        Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((offset, 0))
            .render(area, buf);
    }
}
