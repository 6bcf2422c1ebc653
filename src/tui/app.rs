//! Chat/ingest application state
//!
//! `ChatApp` holds everything the view renders. It never performs I/O:
//! commands return the [`Request`] to issue, and the controller feeds results
//! back in as [`Completion`]s.

use serde_json::Value;

use crate::api::{ApiError, AskResponse, ExpertiseLevel, HealthStatus};
use crate::lifecycle::{OutcomeSlot, RequestOutcome, Ticket};
use crate::tui::widgets::PanelView;

/// Rows moved per PageUp/PageDown
pub const SCROLL_STEP: u16 = 5;

/// Which logical action the view is showing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Chat,
    Ingest,
}

impl Mode {
    pub fn toggle(self) -> Self {
        match self {
            Mode::Chat => Mode::Ingest,
            Mode::Ingest => Mode::Chat,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Mode::Chat => "Chat",
            Mode::Ingest => "Ingest",
        }
    }
}

/// User actions, already translated from key events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Insert(char),
    Backspace,
    ClearInput,
    Submit,
    ToggleMode,
    SetMode(Mode),
    CycleExpertise,
    ScrollUp,
    ScrollDown,
    Quit,
}

/// A backend call the controller should issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Health {
        ticket: Ticket,
    },
    Ask {
        ticket: Ticket,
        query: String,
        expertise: ExpertiseLevel,
    },
    Extract {
        ticket: Ticket,
        text: String,
    },
}

/// Result of a [`Request`], routed back to its slot
#[derive(Debug)]
pub enum Completion {
    Health {
        ticket: Ticket,
        result: Result<HealthStatus, ApiError>,
    },
    Ask {
        ticket: Ticket,
        result: Result<AskResponse, ApiError>,
    },
    Extract {
        ticket: Ticket,
        result: Result<Value, ApiError>,
    },
}

/// View state for the chat/ingest screen
#[derive(Debug, Clone)]
pub struct ChatApp {
    mode: Mode,
    expertise: ExpertiseLevel,
    chat_input: String,
    ingest_input: String,
    chat: OutcomeSlot<AskResponse>,
    ingest: OutcomeSlot<Value>,
    health: OutcomeSlot<HealthStatus>,
    chat_scroll: u16,
    ingest_scroll: u16,
    should_quit: bool,
}

impl Default for ChatApp {
    fn default() -> Self {
        Self::new(ExpertiseLevel::default())
    }
}

impl ChatApp {
    pub fn new(expertise: ExpertiseLevel) -> Self {
        Self {
            mode: Mode::Chat,
            expertise,
            chat_input: String::new(),
            ingest_input: String::new(),
            chat: OutcomeSlot::new("chat"),
            ingest: OutcomeSlot::new("ingest"),
            health: OutcomeSlot::new("health"),
            chat_scroll: 0,
            ingest_scroll: 0,
            should_quit: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn expertise(&self) -> ExpertiseLevel {
        self.expertise
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn chat_outcome(&self) -> &RequestOutcome<AskResponse> {
        self.chat.outcome()
    }

    pub fn ingest_outcome(&self) -> &RequestOutcome<Value> {
        self.ingest.outcome()
    }

    pub fn health_outcome(&self) -> &RequestOutcome<HealthStatus> {
        self.health.outcome()
    }

    /// Text of the input belonging to the active mode
    pub fn input(&self) -> &str {
        match self.mode {
            Mode::Chat => &self.chat_input,
            Mode::Ingest => &self.ingest_input,
        }
    }

    fn input_mut(&mut self) -> &mut String {
        match self.mode {
            Mode::Chat => &mut self.chat_input,
            Mode::Ingest => &mut self.ingest_input,
        }
    }

    /// Output scroll offset of the active mode, in rows
    pub fn scroll(&self) -> u16 {
        match self.mode {
            Mode::Chat => self.chat_scroll,
            Mode::Ingest => self.ingest_scroll,
        }
    }

    fn scroll_mut(&mut self) -> &mut u16 {
        match self.mode {
            Mode::Chat => &mut self.chat_scroll,
            Mode::Ingest => &mut self.ingest_scroll,
        }
    }

    /// Unwrapped line count of the active output, an upper bound for scrolling
    fn output_lines(&self) -> u16 {
        let view = match self.mode {
            Mode::Chat => PanelView::for_chat(self.chat.outcome()),
            Mode::Ingest => PanelView::for_ingest(self.ingest.outcome()),
        };
        u16::try_from(view.line_count()).unwrap_or(u16::MAX)
    }

    /// True while the active mode's request is in flight
    pub fn is_loading(&self) -> bool {
        match self.mode {
            Mode::Chat => self.chat.is_loading(),
            Mode::Ingest => self.ingest.is_loading(),
        }
    }

    /// Editing is locked while the active request is loading
    pub fn input_enabled(&self) -> bool {
        !self.is_loading()
    }

    pub fn can_submit(&self) -> bool {
        self.input_enabled() && !self.input().trim().is_empty()
    }

    /// Apply a command; returns the request to issue if one was accepted
    pub fn handle(&mut self, command: Command) -> Option<Request> {
        match command {
            Command::Insert(c) => {
                if self.input_enabled() {
                    self.input_mut().push(c);
                }
                None
            }
            Command::Backspace => {
                if self.input_enabled() {
                    self.input_mut().pop();
                }
                None
            }
            Command::ClearInput => {
                if self.input_enabled() {
                    self.input_mut().clear();
                }
                None
            }
            Command::Submit => self.submit(),
            Command::ToggleMode => {
                self.mode = self.mode.toggle();
                None
            }
            Command::SetMode(mode) => {
                self.mode = mode;
                None
            }
            Command::CycleExpertise => {
                // The selector is only shown in chat mode
                if self.mode == Mode::Chat {
                    self.expertise = self.expertise.next();
                }
                None
            }
            Command::ScrollUp => {
                let scroll = self.scroll_mut();
                *scroll = scroll.saturating_sub(SCROLL_STEP);
                None
            }
            Command::ScrollDown => {
                let limit = self.output_lines();
                let scroll = self.scroll_mut();
                *scroll = scroll.saturating_add(SCROLL_STEP).min(limit);
                None
            }
            Command::Quit => {
                self.should_quit = true;
                None
            }
        }
    }

    fn submit(&mut self) -> Option<Request> {
        match self.mode {
            Mode::Chat => {
                let ticket = self.chat.begin(&self.chat_input).ok()?;
                self.chat_scroll = 0;
                Some(Request::Ask {
                    ticket,
                    query: self.chat_input.clone(),
                    expertise: self.expertise,
                })
            }
            Mode::Ingest => {
                let ticket = self.ingest.begin(&self.ingest_input).ok()?;
                self.ingest_scroll = 0;
                Some(Request::Extract {
                    ticket,
                    text: self.ingest_input.clone(),
                })
            }
        }
    }

    /// Kick off the startup health check unless one is running
    pub fn start_health_check(&mut self) -> Option<Request> {
        let ticket = self.health.start().ok()?;
        Some(Request::Health { ticket })
    }

    /// Route a finished request to its slot
    ///
    /// A new result starts at the top of the panel; a successful ingest
    /// clears the ingest input.
    pub fn complete(&mut self, completion: Completion) {
        match completion {
            Completion::Health { ticket, result } => {
                self.health.resolve(ticket, result);
            }
            Completion::Ask { ticket, result } => {
                if self.chat.resolve(ticket, result) {
                    self.chat_scroll = 0;
                }
            }
            Completion::Extract { ticket, result } => {
                let succeeded = result.is_ok();
                if self.ingest.resolve(ticket, result) {
                    self.ingest_scroll = 0;
                    if succeeded {
                        self.ingest_input.clear();
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn type_text(app: &mut ChatApp, text: &str) {
        for c in text.chars() {
            app.handle(Command::Insert(c));
        }
    }

    fn ask_ticket(request: Option<Request>) -> Ticket {
        match request {
            Some(Request::Ask { ticket, .. }) => ticket,
            other => panic!("expected ask request, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_submit_issues_nothing() {
        let mut app = ChatApp::default();
        type_text(&mut app, "   ");
        assert!(!app.can_submit());
        assert_eq!(app.handle(Command::Submit), None);
        assert!(app.chat_outcome().is_idle());
    }

    #[test]
    fn test_submit_carries_query_and_expertise() {
        let mut app = ChatApp::default();
        app.handle(Command::CycleExpertise);
        type_text(&mut app, "What is Qast?");

        match app.handle(Command::Submit) {
            Some(Request::Ask {
                query, expertise, ..
            }) => {
                assert_eq!(query, "What is Qast?");
                assert_eq!(expertise, ExpertiseLevel::Expert);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(app.is_loading());
        assert!(!app.input_enabled());
    }

    #[test]
    fn test_second_submit_while_loading_is_dropped() {
        let mut app = ChatApp::default();
        type_text(&mut app, "q");
        assert!(app.handle(Command::Submit).is_some());
        assert_eq!(app.handle(Command::Submit), None);
    }

    #[test]
    fn test_input_locked_while_loading() {
        let mut app = ChatApp::default();
        type_text(&mut app, "q");
        app.handle(Command::Submit);
        type_text(&mut app, "more");
        app.handle(Command::Backspace);
        assert_eq!(app.input(), "q");
    }

    #[test]
    fn test_chat_failure_does_not_touch_ingest() {
        let mut app = ChatApp::default();
        type_text(&mut app, "q");
        let ticket = ask_ticket(app.handle(Command::Submit));

        app.handle(Command::ToggleMode);
        type_text(&mut app, "Emalie went to Dubai");
        assert!(app.can_submit());

        app.complete(Completion::Ask {
            ticket,
            result: Err(ApiError::HttpStatus {
                status: 500,
                message: "Internal Server Error".to_string(),
            }),
        });
        assert_eq!(app.chat_outcome().failure(), Some("Internal Server Error"));
        assert!(app.ingest_outcome().is_idle());
        assert_eq!(app.input(), "Emalie went to Dubai");
    }

    #[test]
    fn test_ingest_success_clears_input() {
        let mut app = ChatApp::default();
        app.handle(Command::SetMode(Mode::Ingest));
        type_text(&mut app, "Emalie went to Dubai");
        let ticket = match app.handle(Command::Submit) {
            Some(Request::Extract { ticket, text }) => {
                assert_eq!(text, "Emalie went to Dubai");
                ticket
            }
            other => panic!("unexpected {:?}", other),
        };

        app.complete(Completion::Extract {
            ticket,
            result: Ok(json!({"result": {"triples": 3}})),
        });
        assert_eq!(
            app.ingest_outcome().success(),
            Some(&json!({"result": {"triples": 3}}))
        );
        assert_eq!(app.input(), "");
    }

    #[test]
    fn test_ingest_failure_keeps_input() {
        let mut app = ChatApp::default();
        app.handle(Command::SetMode(Mode::Ingest));
        type_text(&mut app, "fact");
        let ticket = match app.handle(Command::Submit) {
            Some(Request::Extract { ticket, .. }) => ticket,
            other => panic!("unexpected {:?}", other),
        };
        app.complete(Completion::Extract {
            ticket,
            result: Err(ApiError::Transport("Connection failed".into())),
        });
        assert_eq!(app.input(), "fact");
        assert!(app.ingest_outcome().failure().is_some());
    }

    #[test]
    fn test_expertise_only_cycles_in_chat_mode() {
        let mut app = ChatApp::default();
        app.handle(Command::ToggleMode);
        app.handle(Command::CycleExpertise);
        assert_eq!(app.expertise(), ExpertiseLevel::Novice);
    }

    #[test]
    fn test_health_check_single_flight() {
        let mut app = ChatApp::default();
        let request = app.start_health_check();
        assert!(matches!(request, Some(Request::Health { .. })));
        assert!(app.start_health_check().is_none());
    }

    fn answered(context: usize) -> ChatApp {
        let mut app = ChatApp::default();
        type_text(&mut app, "q");
        let ticket = ask_ticket(app.handle(Command::Submit));
        app.complete(Completion::Ask {
            ticket,
            result: Ok(AskResponse {
                answer: "a".to_string(),
                context: (1..=context).map(|i| format!("doc{}", i)).collect(),
            }),
        });
        app
    }

    #[test]
    fn test_scroll_is_bounded_by_output() {
        let mut app = answered(40);
        app.handle(Command::ScrollUp);
        assert_eq!(app.scroll(), 0);

        app.handle(Command::ScrollDown);
        assert_eq!(app.scroll(), SCROLL_STEP);

        // ANSWER, answer, blank, heading, 40 sources
        for _ in 0..50 {
            app.handle(Command::ScrollDown);
        }
        assert_eq!(app.scroll(), 44);
    }

    #[test]
    fn test_scroll_is_per_mode_and_resets_on_submit() {
        let mut app = answered(40);
        app.handle(Command::ScrollDown);

        app.handle(Command::ToggleMode);
        assert_eq!(app.scroll(), 0);
        app.handle(Command::ToggleMode);
        assert_eq!(app.scroll(), SCROLL_STEP);

        app.handle(Command::Submit);
        assert!(app.chat_outcome().is_loading());
        assert_eq!(app.scroll(), 0);
    }

    #[test]
    fn test_quit() {
        let mut app = ChatApp::default();
        app.handle(Command::Quit);
        assert!(app.should_quit());
    }
}
