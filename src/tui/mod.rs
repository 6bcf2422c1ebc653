//! Terminal chat/ingest interface for the Qast RAG service
//!
//! - [`app`]: pure view state and command handling
//! - [`renderer`]: draws a frame from that state
//! - [`controller`]: terminal event loop and request dispatch

pub mod app;
pub mod controller;
mod events;
pub mod renderer;
pub mod theme;
pub mod widgets;

pub use app::{ChatApp, Command, Completion, Mode, Request};
pub use controller::{execute_request, run_chat, TuiController};
pub use events::{key_to_command, Event, EventHandler};
pub use renderer::render;
pub use theme::Theme;
