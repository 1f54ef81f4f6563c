//! Commands module - orchestration of permission synthesis over a whole service

mod compile;
mod reporter;

pub use compile::{compile_events, CompileSummary};
pub use reporter::{permission_added_message, LogReporter, Reporter};
