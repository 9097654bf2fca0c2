//! Diagnostic channel for advisory conditions that never fail an operation.

use std::sync::Mutex;

pub trait Reporter {
    fn warn(&self, message: &str);
    fn info(&self, message: &str);
}

/// Forwards diagnostics to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn warn(&self, message: &str) {
        log::warn!(target: "iban_check", "{}", message);
    }

    fn info(&self, message: &str) {
        log::info!(target: "iban_check", "{}", message);
    }
}

/// Keeps every diagnostic in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    entries: Mutex<Vec<(log::Level, String)>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(log::Level, String)> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn messages(&self, level: log::Level) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(entry_level, _)| *entry_level == level)
            .map(|(_, message)| message)
            .collect()
    }

    pub fn contains(&self, level: log::Level, needle: &str) -> bool {
        self.messages(level)
            .iter()
            .any(|message| message.contains(needle))
    }

    pub fn clear(&self) {
        match self.entries.lock() {
            Ok(mut entries) => entries.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }

    fn push(&self, level: log::Level, message: &str) {
        match self.entries.lock() {
            Ok(mut entries) => entries.push((level, message.to_string())),
            Err(poisoned) => poisoned.into_inner().push((level, message.to_string())),
        }
    }
}

impl Reporter for MemoryReporter {
    fn warn(&self, message: &str) {
        self.push(log::Level::Warn, message);
    }

    fn info(&self, message: &str) {
        self.push(log::Level::Info, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_reporter_keeps_levels_apart() {
        let reporter = MemoryReporter::new();
        reporter.warn("unknown country");
        reporter.info("bban mismatch");

        assert_eq!(reporter.messages(log::Level::Warn), vec!["unknown country"]);
        assert!(reporter.contains(log::Level::Info, "mismatch"));
        assert!(!reporter.contains(log::Level::Warn, "mismatch"));

        reporter.clear();
        assert!(reporter.entries().is_empty());
    }
}
