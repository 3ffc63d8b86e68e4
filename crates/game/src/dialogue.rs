//! Message dialogs shown when the player picks things up.

use std::collections::VecDeque;

/// Anything that can show a titled message to the player.
pub trait DialogSink {
    fn open_message(&mut self, message: &str, title: &str);
}

/// One titled message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogMessage {
    pub title: String,
    pub text: String,
}

/// Current dialog UI state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DialogueState {
    #[default]
    Closed,
    Open(DialogMessage),
}

impl DialogueState {
    pub fn is_open(&self) -> bool {
        matches!(self, DialogueState::Open(_))
    }
}

/// Shows one message at a time; messages opened while another is showing
/// wait their turn.
#[derive(Debug, Default)]
pub struct DialogManager {
    state: DialogueState,
    queue: VecDeque<DialogMessage>,
    shown: usize,
}

impl DialogManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Message currently on screen.
    pub fn current(&self) -> Option<&DialogMessage> {
        match &self.state {
            DialogueState::Open(message) => Some(message),
            DialogueState::Closed => None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Total messages that have been put on screen.
    pub fn shown_count(&self) -> usize {
        self.shown
    }

    /// Dismiss the current message and show the next queued one, if any.
    pub fn close(&mut self) {
        self.state = match self.queue.pop_front() {
            Some(next) => self.show(next),
            None => DialogueState::Closed,
        };
    }

    fn show(&mut self, message: DialogMessage) -> DialogueState {
        log::info!("[{}] {}", message.title, message.text);
        self.shown += 1;
        DialogueState::Open(message)
    }
}

impl DialogSink for DialogManager {
    fn open_message(&mut self, message: &str, title: &str) {
        let message = DialogMessage {
            title: title.to_string(),
            text: message.to_string(),
        };
        if self.state.is_open() {
            self.queue.push_back(message);
        } else {
            self.state = self.show(message);
        }
    }
}
