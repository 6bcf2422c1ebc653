//! TUI Controller - event loop between the terminal, ChatApp and the backend
//!
//! Key events become commands on [`ChatApp`]. Accepted requests run on
//! spawned tokio tasks and report back over an mpsc channel, so the UI loop
//! never waits on the network.

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::panic;
use std::sync::Arc;
use tokio::sync::mpsc;

use super::app::{ChatApp, Command, Completion, Request};
use super::events::{key_to_command, Event, EventHandler};
use super::renderer::render;
use super::theme::Theme;
use crate::api::QastBackend;

/// Run one request against the backend and package the result
pub async fn execute_request(backend: &dyn QastBackend, request: Request) -> Completion {
    match request {
        Request::Health { ticket } => Completion::Health {
            ticket,
            result: backend.health().await,
        },
        Request::Ask {
            ticket,
            query,
            expertise,
        } => Completion::Ask {
            ticket,
            result: backend.ask(&query, expertise).await,
        },
        Request::Extract { ticket, text } => Completion::Extract {
            ticket,
            result: backend.extract(&text).await,
        },
    }
}

pub struct TuiController<B: Backend> {
    terminal: Terminal<B>,
    app: ChatApp,
    theme: Theme,
    backend: Arc<dyn QastBackend>,
    events: EventHandler,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
}

impl<B: Backend> TuiController<B> {
    pub fn new(
        terminal: Terminal<B>,
        app: ChatApp,
        backend: Arc<dyn QastBackend>,
        events: EventHandler,
    ) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            terminal,
            app,
            theme: Theme::default(),
            backend,
            events,
            completion_tx,
            completion_rx,
        }
    }

    pub fn app(&self) -> &ChatApp {
        &self.app
    }

    /// Get reference to terminal (for testing)
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn draw(&mut self) -> Result<()> {
        self.terminal
            .draw(|f| render(f, &self.app, &self.theme))
            .context("Failed to draw frame")?;
        Ok(())
    }

    /// Apply a command and spawn the request it produces, if any
    pub fn handle_command(&mut self, command: Command) {
        if let Some(request) = self.app.handle(command) {
            self.dispatch(request);
        }
    }

    pub fn check_health(&mut self) {
        if let Some(request) = self.app.start_health_check() {
            self.dispatch(request);
        }
    }

    fn dispatch(&self, request: Request) {
        tracing::debug!(?request, "dispatching request");
        let backend = Arc::clone(&self.backend);
        let tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let completion = execute_request(backend.as_ref(), request).await;
            if tx.send(completion).is_err() {
                tracing::debug!("UI loop gone, dropping completion");
            }
        });
    }

    /// Apply every completion that has arrived; returns how many
    pub fn drain_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completion_rx.try_recv() {
            self.app.complete(completion);
            applied += 1;
        }
        applied
    }

    /// Wait for the next completion and apply it
    pub async fn wait_for_completion(&mut self) -> bool {
        match self.completion_rx.recv().await {
            Some(completion) => {
                self.app.complete(completion);
                true
            }
            None => false,
        }
    }

    /// Main loop: draw, poll one event, repeat until quit
    pub async fn run(&mut self) -> Result<()> {
        self.check_health();

        loop {
            self.drain_completions();
            self.draw()?;

            if self.app.should_quit() {
                break;
            }

            // Polling blocks for up to one tick
            let event = tokio::task::block_in_place(|| self.events.next())
                .context("Failed to read terminal event")?;
            match event {
                Event::Key(key) => {
                    if let Some(command) = key_to_command(key) {
                        self.handle_command(command);
                    }
                }
                Event::Resize(..) | Event::Tick => {}
            }
        }

        Ok(())
    }
}

/// Set up the terminal, run the chat UI, and restore the terminal
pub async fn run_chat(
    app: ChatApp,
    backend: Arc<dyn QastBackend>,
    events: EventHandler,
) -> Result<()> {
    install_panic_hook();
    let terminal = setup_terminal()?;
    let mut controller = TuiController::new(terminal, app, backend, events);

    let result = controller.run().await;
    restore_terminal(&mut controller.terminal)?;
    result
}

/// Restore the terminal before the default panic output
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable terminal raw mode")?;
    let mut stdout = io::stdout();
    undo_on_error(execute!(stdout, EnterAlternateScreen), || {
        let _ = disable_raw_mode();
    })
    .context("Failed to enter alternate screen")?;

    let terminal = undo_on_error(Terminal::new(CrosstermBackend::new(stdout)), || {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    })
    .context("Failed to create terminal")?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run `undo` when a setup step failed, leaving the result untouched
fn undo_on_error<T, E>(result: Result<T, E>, undo: impl FnOnce()) -> Result<T, E> {
    if result.is_err() {
        undo();
    }
    result
}
