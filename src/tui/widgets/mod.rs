//! TUI widgets

mod header;
mod input;
mod output;

pub use header::Header;
pub use input::{InputWidget, CHAT_PLACEHOLDER, INGEST_PLACEHOLDER};
pub use output::{
    OutputPanel, PanelView, CHAT_EMPTY_PROMPT, CHAT_LOADING, INGEST_EMPTY_PROMPT, INGEST_LOADING,
};
