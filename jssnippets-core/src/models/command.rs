//! Palette command model.

use std::fmt;
use std::sync::Arc;

/// Callback run when a palette command is invoked
pub type CommandExec = Arc<dyn Fn() + Send + Sync>;

/// A command definition handed to the host command registry
#[derive(Clone)]
pub struct Command {
    /// Action run on invocation
    pub exec: CommandExec,
    /// Label shown in the palette
    pub value: String,
}

impl Command {
    /// Creates a new command with the given action and label
    #[must_use]
    pub fn new(exec: CommandExec, value: impl Into<String>) -> Self {
        Self {
            exec,
            value: value.into(),
        }
    }

    /// Runs the command action
    pub fn run(&self) {
        (self.exec)();
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}
