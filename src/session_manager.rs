// session_manager.rs
use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use crate::responses::GREETING;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    fn greeting() -> Self {
        ChatMessage {
            role: Role::Assistant,
            content: GREETING.to_string(),
        }
    }
}

/// In-memory chat transcripts, one per widget session. Transcripts live for
/// the lifetime of the process only; nothing is persisted.
pub struct SessionManager {
    sessions: HashMap<Uuid, Vec<ChatMessage>>,
}

impl SessionManager {
    pub fn new() -> Self {
        SessionManager {
            sessions: HashMap::new(),
        }
    }

    /// Fresh transcript, seeded with the assistant greeting the widget shows.
    pub fn create_session(&mut self) -> Uuid {
        let session_id = Uuid::new_v4();
        self.sessions.insert(session_id, vec![ChatMessage::greeting()]);
        session_id
    }

    pub fn contains(&self, session_id: &Uuid) -> bool {
        self.sessions.contains_key(session_id)
    }

    /// Append a message to a transcript. Returns false for unknown sessions.
    pub fn append(&mut self, session_id: &Uuid, role: Role, content: &str) -> bool {
        match self.sessions.get_mut(session_id) {
            Some(transcript) => {
                transcript.push(ChatMessage {
                    role,
                    content: content.to_string(),
                });
                true
            }
            None => false,
        }
    }

    /// Drop everything except the greeting, like the widget's reset button.
    pub fn reset_session(&mut self, session_id: &Uuid) -> bool {
        match self.sessions.get_mut(session_id) {
            Some(transcript) => {
                transcript.clear();
                transcript.push(ChatMessage::greeting());
                true
            }
            None => false,
        }
    }

    pub fn transcript(&self, session_id: &Uuid) -> Option<&[ChatMessage]> {
        self.sessions.get(session_id).map(|t| t.as_slice())
    }
}
