//! Core data models for JS Snippets
//!
//! This module defines the snippet, palette command and completion item
//! structures shared between the service and host adapters.

mod command;
mod completion;
mod snippet;

pub use command::{Command, CommandExec};
pub use completion::{CompletionContext, CompletionItem, SNIPPET_KIND};
pub use snippet::Snippet;
