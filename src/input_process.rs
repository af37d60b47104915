// input_process.rs
use std::sync::Mutex;
use std::time::Duration;

use log::{info, warn};
use rand::Rng;
use uuid::Uuid;

use crate::response_table::ResponseTable;
use crate::selector::select_response;
use crate::session_manager::{Role, SessionManager};

pub const THINKING_DELAY_MIN_MS: u64 = 1000;
pub const THINKING_DELAY_MAX_MS: u64 = 3000;

/// Trimmed message text, or None for empty input. The widget disables the
/// send button on empty input; the shells enforce the same rule so the
/// selector never sees an empty utterance.
pub fn validate_message(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Random "thinking" pause shown before a reply lands, standing in for the
/// widget's typing indicator.
pub fn thinking_delay() -> Duration {
    let ms = rand::thread_rng().gen_range(THINKING_DELAY_MIN_MS..THINKING_DELAY_MAX_MS);
    Duration::from_millis(ms)
}

/// Record the user message, wait out the thinking delay, then select and
/// record the reply. A second message arriving while an earlier one is still
/// waiting is not cancelled; transcript appends are serialized by the session
/// lock, so messages land in completion order.
pub async fn process_user_input(
    user_input: &str,
    table: &ResponseTable,
    session_manager: &Mutex<SessionManager>,
    session_id: Uuid,
) -> String {
    info!("Processing user input for session {}: {}", session_id, user_input);

    {
        let mut manager = session_manager.lock().expect("session lock poisoned");
        if !manager.append(&session_id, Role::User, user_input) {
            warn!("Session {} disappeared before user message was recorded", session_id);
        }
    }

    tokio::time::sleep(thinking_delay()).await;

    let reply = select_response(table, user_input).to_string();
    info!("AIMEN reply for session {}: {}", session_id, reply);

    {
        let mut manager = session_manager.lock().expect("session lock poisoned");
        if !manager.append(&session_id, Role::Assistant, &reply) {
            warn!("Session {} disappeared before reply was recorded", session_id);
        }
    }

    reply
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responses::builtin_table;

    #[test]
    fn test_validate_message_trims() {
        assert_eq!(validate_message("  hello  "), Some("hello"));
    }

    #[test]
    fn test_validate_message_rejects_empty() {
        assert_eq!(validate_message(""), None);
        assert_eq!(validate_message("   \t\n"), None);
    }

    #[test]
    fn test_thinking_delay_stays_in_bounds() {
        for _ in 0..200 {
            let delay = thinking_delay();
            assert!(delay >= Duration::from_millis(THINKING_DELAY_MIN_MS));
            assert!(delay < Duration::from_millis(THINKING_DELAY_MAX_MS));
        }
    }

    #[tokio::test]
    async fn test_process_records_both_sides_of_the_exchange() {
        let table = builtin_table().unwrap();
        let manager = Mutex::new(SessionManager::new());
        let session_id = manager.lock().unwrap().create_session();

        let reply = process_user_input("hello", &table, &manager, session_id).await;
        assert_eq!(reply, select_response(&table, "hello"));

        let manager = manager.lock().unwrap();
        let transcript = manager.transcript(&session_id).unwrap();
        // greeting, user message, reply
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[1].role, Role::User);
        assert_eq!(transcript[1].content, "hello");
        assert_eq!(transcript[2].role, Role::Assistant);
        assert_eq!(transcript[2].content, reply);
    }
}
