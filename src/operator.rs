/// Blocking dialogs shown to the operator. The caller suspends until the
/// operator answers.
pub trait Operator {
    /// Yes/no question. `true` means the operator agreed.
    fn confirm(&mut self, message: &str) -> bool;

    /// Notification the operator must acknowledge.
    fn alert(&mut self, message: &str);
}

/// Scripted operator for tests and non-interactive runs: answers confirmations
/// from a fixed value and records every prompt it was shown.
#[derive(Debug, Default)]
pub struct ScriptedOperator {
    pub answer: bool,
    pub confirmations: Vec<String>,
    pub alerts: Vec<String>,
}

impl ScriptedOperator {
    pub fn agreeing() -> Self {
        ScriptedOperator {
            answer: true,
            ..Default::default()
        }
    }

    pub fn declining() -> Self {
        ScriptedOperator::default()
    }
}

impl Operator for ScriptedOperator {
    fn confirm(&mut self, message: &str) -> bool {
        self.confirmations.push(message.to_string());
        self.answer
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}
