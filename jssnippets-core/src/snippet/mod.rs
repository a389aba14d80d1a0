//! Snippet palette and autocomplete integration
//!
//! This module turns a loaded snippet list into host palette commands and an
//! autocomplete source, and handles inserting snippet code into the editor.

mod completion;
mod insert;
mod palette;
mod store;

pub use completion::SnippetCompleter;
pub use insert::{strip_placeholders, SnippetInserter, NO_EDITOR_NOTICE};
pub use palette::{command_name, sanitize_prefix, PaletteRegistrar};
pub use store::SnippetStore;
