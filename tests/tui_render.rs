//! Rendered-frame tests for each outcome state
//!
//! Run: cargo test --test tui_render

use qast_client::api::{ApiError, AskResponse, ExpertiseLevel};
use qast_client::tui::{render, ChatApp, Command, Completion, Mode, Request, Theme};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use serde_json::json;

const WIDTH: u16 = 110;
const HEIGHT: u16 = 24;

/// Render the app and return the screen as text
fn screen(app: &ChatApp) -> String {
    let theme = Theme::default();
    let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
    terminal.draw(|f| render(f, app, &theme)).unwrap();

    let buf = terminal.backend().buffer();
    let mut result = String::new();
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            result.push_str(buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "));
        }
        result.push('\n');
    }
    result
}

fn submit(app: &mut ChatApp, text: &str) -> Request {
    for c in text.chars() {
        app.handle(Command::Insert(c));
    }
    app.handle(Command::Submit).expect("submission accepted")
}

#[test]
fn test_idle_chat_shows_prompt_and_level() {
    let app = ChatApp::new(ExpertiseLevel::Expert);
    let output = screen(&app);

    assert!(output.contains("Qast RAG Interface"));
    assert!(output.contains("Ask a question about the knowledge base."));
    assert!(output.contains("Ask a question..."));
    assert!(output.contains("Level: Expert"));
    assert!(output.contains("Generate Response"));
}

#[test]
fn test_idle_ingest_shows_prompt_without_level() {
    let mut app = ChatApp::default();
    app.handle(Command::SetMode(Mode::Ingest));
    let output = screen(&app);

    assert!(output.contains("Enter text to add to the knowledge graph."));
    assert!(output.contains("Ingest Data"));
    assert!(!output.contains("Level:"));
}

#[test]
fn test_loading_shows_indicator_and_busy_label() {
    let mut app = ChatApp::default();
    submit(&mut app, "What is Qast?");
    let output = screen(&app);

    assert!(output.contains("Generating Response..."));
    assert!(output.contains("Thinking..."));
    assert!(!output.contains("Ask a question about the knowledge base."));
}

#[test]
fn test_success_shows_answer_and_context() {
    let mut app = ChatApp::default();
    let ticket = match submit(&mut app, "What is Qast?") {
        Request::Ask { ticket, .. } => ticket,
        other => panic!("unexpected {:?}", other),
    };
    app.complete(Completion::Ask {
        ticket,
        result: Ok(AskResponse {
            answer: "Qast is a RAG system.".to_string(),
            context: vec!["doc1".to_string(), "doc2".to_string()],
        }),
    });
    let output = screen(&app);

    assert!(output.contains("ANSWER"));
    assert!(output.contains("Qast is a RAG system."));
    assert!(output.contains("CONTEXT SOURCES"));
    assert!(output.contains("[1] doc1"));
    assert!(output.contains("[2] doc2"));
}

#[test]
fn test_failure_shows_error_panel() {
    let mut app = ChatApp::default();
    let ticket = match submit(&mut app, "q") {
        Request::Ask { ticket, .. } => ticket,
        other => panic!("unexpected {:?}", other),
    };
    app.complete(Completion::Ask {
        ticket,
        result: Err(ApiError::HttpStatus {
            status: 500,
            message: "Internal Server Error".to_string(),
        }),
    });
    let output = screen(&app);

    assert!(output.contains("Error"));
    assert!(output.contains("Internal Server Error"));
}

#[test]
fn test_ingest_success_dumps_json() {
    let mut app = ChatApp::default();
    app.handle(Command::SetMode(Mode::Ingest));
    let ticket = match submit(&mut app, "Emalie went to Dubai") {
        Request::Extract { ticket, .. } => ticket,
        other => panic!("unexpected {:?}", other),
    };
    app.complete(Completion::Extract {
        ticket,
        result: Ok(json!({"result": {"triples": 3}})),
    });
    let output = screen(&app);

    assert!(output.contains("Ingestion Successful"));
    assert!(output.contains("\"triples\": 3"));
    // Input was reset, so the placeholder is back
    assert!(output.contains("Enter facts or information"));
}

#[test]
fn test_mode_switch_keeps_other_slot_result() {
    let mut app = ChatApp::default();
    let ticket = match submit(&mut app, "q") {
        Request::Ask { ticket, .. } => ticket,
        other => panic!("unexpected {:?}", other),
    };
    app.complete(Completion::Ask {
        ticket,
        result: Ok(AskResponse {
            answer: "kept".to_string(),
            context: vec![],
        }),
    });

    app.handle(Command::ToggleMode);
    assert!(!screen(&app).contains("kept"));

    app.handle(Command::ToggleMode);
    assert!(screen(&app).contains("kept"));
}

#[test]
fn test_long_context_list_scrolls_to_every_source() {
    let mut app = ChatApp::default();
    let ticket = match submit(&mut app, "What is Qast?") {
        Request::Ask { ticket, .. } => ticket,
        other => panic!("unexpected {:?}", other),
    };
    app.complete(Completion::Ask {
        ticket,
        result: Ok(AskResponse {
            answer: "Qast is a RAG system.".to_string(),
            context: (1..=40).map(|i| format!("doc{}", i)).collect(),
        }),
    });

    let output = screen(&app);
    assert!(output.contains("[1] doc1"));
    assert!(!output.contains("[40] doc40"));

    for _ in 0..20 {
        app.handle(Command::ScrollDown);
    }
    let output = screen(&app);
    assert!(output.contains("[40] doc40"));
    assert!(!output.contains("ANSWER"));

    for _ in 0..20 {
        app.handle(Command::ScrollUp);
    }
    assert!(screen(&app).contains("ANSWER"));
}
