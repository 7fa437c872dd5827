use crate::core::state::ShellState;

/// Prints how the last foreground or reaped background command ended.
#[derive(Clone, Default)]
pub struct StatusCommand;

impl StatusCommand {
    pub fn new() -> Self {
        Self
    }

    pub fn report(&self, state: &ShellState) -> String {
        state.last_status.to_string()
    }

    pub fn execute(&self, state: &ShellState) {
        println!("{}", self.report(state));
    }
}
