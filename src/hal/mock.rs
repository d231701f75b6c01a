// src/hal/mock.rs
//! In-memory command link for tests and offline runs

use crate::hal::traits::CommandLink;
use crate::hal::types::LinkError;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

#[derive(Debug, Default)]
struct MockState {
    sent: Vec<String>,
    responses: VecDeque<Option<String>>,
    fail_next: bool,
}

/// Records every command; clones share the same log
#[derive(Debug, Clone, Default)]
pub struct MockLink {
    name: String,
    state: Arc<Mutex<MockState>>,
}

impl MockLink {
    /// Empty mock with no queued replies
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Arc::default(),
        }
    }

    /// Queue the reply for the next command
    pub fn push_response(&self, response: Option<&str>) {
        self.state.lock().responses.push_back(response.map(str::to_string));
    }

    /// Make the next command fail with an I/O error
    pub fn fail_next(&self) {
        self.state.lock().fail_next = true;
    }

    /// Commands received so far, in order
    pub fn sent(&self) -> Vec<String> {
        self.state.lock().sent.clone()
    }
}

impl CommandLink for MockLink {
    fn send_command(&mut self, command: &str) -> Result<Option<String>, LinkError> {
        if command.trim().is_empty() {
            return Err(LinkError::EmptyCommand);
        }

        let mut state = self.state.lock();
        if std::mem::take(&mut state.fail_next) {
            return Err(LinkError::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "mock link failure",
            )));
        }

        state.sent.push(command.to_string());
        Ok(state.responses.pop_front().flatten())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
