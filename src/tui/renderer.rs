//! Frame layout
//!
//! `render` is a pure function of [`ChatApp`]: the same state always draws
//! the same frame.

use ratatui::{
    layout::{Constraint, Layout},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::app::{ChatApp, Mode};
use super::theme::Theme;
use super::widgets::{Header, InputWidget, OutputPanel, PanelView};

const HELP_TEXT: &str = concat!(
    "Enter submit · Shift+Enter newline · Tab mode · Ctrl+E level · ",
    "PgUp/PgDn scroll · Esc clear · Ctrl+C quit"
);

/// Draw the whole screen
pub fn render(frame: &mut Frame, app: &ChatApp, theme: &Theme) {
    let [header_area, output_area, input_area, help_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(5),
        Constraint::Length(5),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(
        Header::new(app.health_outcome(), theme)
            .mode(app.mode())
            .expertise(app.expertise()),
        header_area,
    );

    let view = match app.mode() {
        Mode::Chat => PanelView::for_chat(app.chat_outcome()),
        Mode::Ingest => PanelView::for_ingest(app.ingest_outcome()),
    };
    frame.render_widget(
        OutputPanel::new(view, theme).scroll(app.scroll()),
        output_area,
    );

    frame.render_widget(
        InputWidget::new(app.input(), theme)
            .mode(app.mode())
            .loading(app.is_loading())
            .can_submit(app.can_submit()),
        input_area,
    );

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            HELP_TEXT,
            Style::default().fg(theme.text_muted),
        ))),
        help_area,
    );
}
