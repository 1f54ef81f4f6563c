//! Progress reporting for the compile pass

/// Line-oriented sink for human-readable progress messages.
pub trait Reporter {
    fn report(&mut self, message: &str);
}

/// Forwards every message to the `log` facade at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&mut self, message: &str) {
        log::info!("{}", message);
    }
}

/// Collects messages, mostly useful for callers that render them later.
impl Reporter for Vec<String> {
    fn report(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

/// Message reported after a permission was added for `rule` on `function_name`.
pub fn permission_added_message(rule: &str, function_name: &str) -> String {
    format!(
        "Added permission for existing event rule \"{}\" to invoke \"{}\"",
        rule, function_name
    )
}
