//! Header Widget
//!
//! Title, backend health, mode tabs and (in chat mode) the expertise selector

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::api::{ExpertiseLevel, HealthStatus};
use crate::lifecycle::RequestOutcome;
use crate::tui::app::Mode;
use crate::tui::theme::Theme;

/// Two-line header
pub struct Header<'a> {
    mode: Mode,
    expertise: ExpertiseLevel,
    health: &'a RequestOutcome<HealthStatus>,
    theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(health: &'a RequestOutcome<HealthStatus>, theme: &'a Theme) -> Self {
        Self {
            mode: Mode::Chat,
            expertise: ExpertiseLevel::Novice,
            health,
            theme,
        }
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn expertise(mut self, expertise: ExpertiseLevel) -> Self {
        self.expertise = expertise;
        self
    }

    fn health_span(&self) -> Span<'a> {
        match self.health {
            RequestOutcome::Idle => {
                Span::styled("backend: unknown", Style::default().fg(self.theme.text_muted))
            }
            RequestOutcome::Loading => {
                Span::styled("backend: checking...", Style::default().fg(self.theme.yellow))
            }
            RequestOutcome::Success(health) => Span::styled(
                format!("backend: {}", health.status),
                Style::default().fg(self.theme.green),
            ),
            RequestOutcome::Failure(message) => Span::styled(
                format!("backend: {}", message),
                Style::default().fg(self.theme.red),
            ),
        }
    }

    fn tab(&self, mode: Mode) -> Span<'a> {
        let accent = match mode {
            Mode::Chat => self.theme.chat_accent,
            Mode::Ingest => self.theme.ingest_accent,
        };
        if self.mode == mode {
            Span::styled(
                format!("[ {} ]", mode.title()),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                format!("  {}  ", mode.title()),
                Style::default().fg(self.theme.text_muted),
            )
        }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }

        let rows = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(area);

        let title = Line::from(vec![
            Span::styled("⚡ ", Style::default().fg(self.theme.cyan)),
            Span::styled(
                "Qast RAG Interface",
                Style::default()
                    .fg(self.theme.text_primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "  Privacy-preserving Knowledge Retrieval  ",
                Style::default().fg(self.theme.text_muted),
            ),
            self.health_span(),
        ]);
        Paragraph::new(title).render(rows[0], buf);

        if area.height < 2 {
            return;
        }

        let mut controls = vec![self.tab(Mode::Chat), self.tab(Mode::Ingest)];
        if self.mode == Mode::Chat {
            let level = match self.expertise {
                ExpertiseLevel::Novice => "Novice",
                ExpertiseLevel::Expert => "Expert",
            };
            controls.push(Span::styled(
                "   Level: ",
                Style::default().fg(self.theme.text_secondary),
            ));
            controls.push(Span::styled(
                level,
                Style::default()
                    .fg(self.theme.chat_accent)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        Paragraph::new(Line::from(controls)).render(rows[1], buf);
    }
}
