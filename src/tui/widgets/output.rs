//! Output Panel Widget
//!
//! Renders one outcome slot: empty prompt, loading indicator, error panel,
//! or the structured result for the active mode.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
        StatefulWidget, Widget, Wrap,
    },
};
use serde_json::Value;

use crate::api::AskResponse;
use crate::lifecycle::RequestOutcome;
use crate::tui::theme::Theme;

pub const CHAT_EMPTY_PROMPT: &str = "Ask a question about the knowledge base.";
pub const INGEST_EMPTY_PROMPT: &str = "Enter text to add to the knowledge graph.";
pub const CHAT_LOADING: &str = "Generating Response...";
pub const INGEST_LOADING: &str = "Ingesting Data...";

/// What the panel shows, derived from an outcome
#[derive(Debug, Clone, PartialEq)]
pub enum PanelView<'a> {
    Empty(&'static str),
    Loading(&'static str),
    Error(&'a str),
    Answer(&'a AskResponse),
    Ingested(&'a Value),
}

impl<'a> PanelView<'a> {
    pub fn for_chat(outcome: &'a RequestOutcome<AskResponse>) -> Self {
        match outcome {
            RequestOutcome::Idle => PanelView::Empty(CHAT_EMPTY_PROMPT),
            RequestOutcome::Loading => PanelView::Loading(CHAT_LOADING),
            RequestOutcome::Success(answer) => PanelView::Answer(answer),
            RequestOutcome::Failure(message) => PanelView::Error(message),
        }
    }

    pub fn for_ingest(outcome: &'a RequestOutcome<Value>) -> Self {
        match outcome {
            RequestOutcome::Idle => PanelView::Empty(INGEST_EMPTY_PROMPT),
            RequestOutcome::Loading => PanelView::Loading(INGEST_LOADING),
            RequestOutcome::Success(result) => PanelView::Ingested(result),
            RequestOutcome::Failure(message) => PanelView::Error(message),
        }
    }

    /// Number of unwrapped lines the panel draws for this view
    pub fn line_count(&self) -> usize {
        match self {
            PanelView::Empty(_) | PanelView::Loading(_) => 1,
            PanelView::Error(_) => 2,
            PanelView::Answer(response) => {
                let sources = if response.context.is_empty() {
                    0
                } else {
                    2 + response.context.len()
                };
                1 + response.answer.lines().count() + sources
            }
            PanelView::Ingested(result) => 2 + pretty_json(result).lines().count(),
        }
    }
}

fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Rows `lines` occupy once wrapped to `width` columns
pub(crate) fn wrapped_rows(lines: &[Line<'_>], width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = lines
        .iter()
        .map(|line| line.width().max(1).div_ceil(width))
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

/// Main content area
pub struct OutputPanel<'a> {
    view: PanelView<'a>,
    scroll_offset: u16,
    theme: &'a Theme,
}

impl<'a> OutputPanel<'a> {
    pub fn new(view: PanelView<'a>, theme: &'a Theme) -> Self {
        Self {
            view,
            scroll_offset: 0,
            theme,
        }
    }

    /// Set scroll offset in wrapped rows; clamped to the content at render time
    pub fn scroll(mut self, offset: u16) -> Self {
        self.scroll_offset = offset;
        self
    }

    fn heading(&self, text: &'static str) -> Line<'a> {
        Line::from(Span::styled(
            text,
            Style::default()
                .fg(self.theme.text_muted)
                .add_modifier(Modifier::BOLD),
        ))
    }

    fn lines(&self) -> Vec<Line<'a>> {
        match &self.view {
            PanelView::Empty(prompt) => vec![Line::from(Span::styled(
                *prompt,
                Style::default().fg(self.theme.text_muted),
            ))],
            PanelView::Loading(label) => vec![Line::from(vec![
                Span::styled("⚡ ", Style::default().fg(self.theme.yellow)),
                Span::styled(
                    *label,
                    Style::default()
                        .fg(self.theme.blue)
                        .add_modifier(Modifier::SLOW_BLINK),
                ),
            ])],
            PanelView::Error(message) => vec![
                Line::from(Span::styled(
                    "Error",
                    Style::default()
                        .fg(self.theme.red)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    message.to_string(),
                    Style::default().fg(self.theme.red),
                )),
            ],
            PanelView::Answer(response) => {
                let mut lines = vec![self.heading("ANSWER")];
                lines.extend(response.answer.lines().map(|l| {
                    Line::from(Span::styled(
                        l.to_string(),
                        Style::default().fg(self.theme.text_primary),
                    ))
                }));
                if !response.context.is_empty() {
                    lines.push(Line::default());
                    lines.push(self.heading("CONTEXT SOURCES"));
                    for (idx, ctx) in response.context.iter().enumerate() {
                        lines.push(Line::from(vec![
                            Span::styled(
                                format!("[{}] ", idx + 1),
                                Style::default().fg(self.theme.cyan),
                            ),
                            Span::styled(
                                ctx.clone(),
                                Style::default().fg(self.theme.text_secondary),
                            ),
                        ]));
                    }
                }
                lines
            }
            PanelView::Ingested(result) => {
                let mut lines = vec![
                    Line::from(Span::styled(
                        "✅ Ingestion Successful",
                        Style::default().fg(self.theme.green),
                    )),
                    Line::default(),
                ];
                let dump = pretty_json(result);
                lines.extend(dump.lines().map(|l| {
                    Line::from(Span::styled(
                        l.to_string(),
                        Style::default().fg(self.theme.text_secondary),
                    ))
                }));
                lines
            }
        }
    }
}

impl Widget for OutputPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = match self.view {
            PanelView::Error(_) => self.theme.red,
            _ => self.theme.border,
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border));

        let lines = self.lines();
        let inner_height = area.height.saturating_sub(2);
        let total = wrapped_rows(&lines, area.width.saturating_sub(2));
        let max_offset = total.saturating_sub(inner_height);
        let offset = self.scroll_offset.min(max_offset);

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((offset, 0))
            .render(area, buf);

        if max_offset > 0 {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight);
            let mut scrollbar_state =
                ScrollbarState::new(usize::from(max_offset)).position(usize::from(offset));

            let scrollbar_area = Rect {
                x: area.x + area.width.saturating_sub(1),
                y: area.y + 1,
                width: 1,
                height: inner_height,
            };
            StatefulWidget::render(scrollbar, scrollbar_area, buf, &mut scrollbar_state);
        }
    }
}
