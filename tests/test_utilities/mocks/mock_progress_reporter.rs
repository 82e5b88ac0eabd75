use cve_store::prelude::*;
use std::sync::{Arc, Mutex};

/// ProgressReporter that records every line it is given, prefixed by kind.
///
/// Clones share the log, so a test can hand one clone to a use case and
/// inspect the other afterwards.
#[derive(Default, Clone)]
pub struct MockProgressReporter {
    log: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl MockProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_messages(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    pub fn message_count(&self) -> usize {
        self.log.lock().unwrap().len()
    }

    fn record(&self, line: String) {
        self.log.lock().unwrap().push(line);
    }
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.record(message.to_string());
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        self.record(match message {
            Some(cve_id) => format!("Progress: {}/{} - {}", current, total, cve_id),
            None => format!("Progress: {}/{}", current, total),
        });
    }

    fn report_error(&self, message: &str) {
        self.record(format!("Error: {}", message));
    }

    fn report_completion(&self, message: &str) {
        self.record(format!("Completed: {}", message));
    }
}
