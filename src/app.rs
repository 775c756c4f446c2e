use crate::api::{ChatClient, SendError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub text: String,
    pub sender: Sender,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
    Error,
}

pub struct App {
    // Core state
    pub should_quit: bool,

    // Conversation: append-only, transient
    pub messages: Vec<ChatMessage>,

    // Draft state
    pub input: String,
    pub input_cursor: usize, // cursor position in input, in chars

    // Busy state: `loading` drives the UI, `pending` is the single request
    // slot that gates re-entry into the send pipeline
    pub loading: bool,
    pub pending: Option<tokio::task::JoinHandle<Result<String, SendError>>>,

    // Chat panel scroll state
    pub chat_scroll: u16,
    pub chat_height: u16, // Height of chat area for scroll calculations
    pub chat_width: u16,  // Width of chat area for wrap calculations

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation

    pub client: ChatClient,
    pub endpoint: String,
}

impl App {
    pub fn new(endpoint: &str) -> Self {
        Self {
            should_quit: false,
            messages: Vec::new(),
            input: String::new(),
            input_cursor: 0,
            loading: false,
            pending: None,
            chat_scroll: 0,
            chat_height: 0,
            chat_width: 0,
            animation_frame: 0,
            client: ChatClient::new(endpoint),
            endpoint: endpoint.to_string(),
        }
    }

    /// Entry point of the send pipeline. Rejects the draft when a request is
    /// already outstanding or the draft is blank (blank drafts are kept as
    /// typed). On acceptance the user message is recorded, the draft is
    /// cleared, the busy flag raised, and the text to send handed back.
    pub fn begin_send(&mut self) -> Option<String> {
        if self.loading || self.pending.is_some() {
            return None;
        }
        if self.input.trim().is_empty() {
            return None;
        }

        let text = std::mem::take(&mut self.input);
        self.input_cursor = 0;
        self.loading = true;
        self.push_message(ChatMessage {
            text: text.clone(),
            sender: Sender::User,
        });

        Some(text)
    }

    /// Completion of the send pipeline. The busy flag is released on every
    /// path before the reply is recorded.
    pub fn finish_send(&mut self, result: Result<String, SendError>) {
        self.loading = false;

        let message = match result {
            Ok(text) => ChatMessage {
                text,
                sender: Sender::Assistant,
            },
            Err(SendError::Server(msg)) => ChatMessage {
                text: msg,
                sender: Sender::Error,
            },
            Err(err @ SendError::Transport(_)) => ChatMessage {
                text: format!("Error: {}", err),
                sender: Sender::Error,
            },
        };

        self.push_message(message);
    }

    /// Collect the reply once the request task has finished. A panicked task
    /// counts as a transport failure; the conversation never loses a reply
    /// slot.
    pub async fn poll_pending(&mut self) {
        let finished = self
            .pending
            .as_ref()
            .is_some_and(|task| task.is_finished());
        if !finished {
            return;
        }

        if let Some(task) = self.pending.take() {
            let result = match task.await {
                Ok(result) => result,
                Err(err) => Err(SendError::Transport(err.into())),
            };
            self.finish_send(result);
        }
    }

    /// Append to the conversation and keep the newest entry visible.
    fn push_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
        self.scroll_to_bottom();
    }

    /// Scroll the chat panel so the latest message (and the "Thinking..."
    /// indicator while busy) is visible.
    pub fn scroll_to_bottom(&mut self) {
        // Use actual chat width for wrap calculation, default to 50 if not set
        let wrap_width = if self.chat_width > 0 {
            self.chat_width as usize
        } else {
            50
        };

        let mut total_lines: u16 = 0;

        for msg in &self.messages {
            if msg.sender != Sender::Error {
                total_lines += 1; // Label line ("You:" or "Bot:")
            }
            // Calculate wrapped lines for each line of content
            for line in msg.text.lines() {
                // Use character count, not byte length, for proper UTF-8 handling
                let char_count = line.chars().count();
                if char_count == 0 {
                    total_lines += 1; // Empty line still takes one line
                } else {
                    total_lines += ((char_count / wrap_width) + 1) as u16;
                }
            }
            total_lines += 1; // Blank line after message
        }

        if self.loading {
            total_lines += 2; // "Bot:" + "Thinking..."
        }

        let visible_height = if self.chat_height > 0 {
            self.chat_height
        } else {
            20
        };

        self.chat_scroll = total_lines.saturating_sub(visible_height);
    }

    pub fn scroll_up(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_add(1);
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.loading {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }
}
