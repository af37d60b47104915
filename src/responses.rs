// responses.rs
//
// Canned content for the Aimen site assistant. Trigger phrases, the fallback
// chain and the wording all mirror the chat widget on the marketing site.
// Declaration order is meaningful (first containment match wins) and must not
// be reordered.

use lazy_static::lazy_static;

use crate::response_table::{Requirement, ResponseTable, TableError};

/// First message of every transcript; also what reset restores.
pub const GREETING: &str = "Hello! I'm Aimen, your AI assistant. How can I help you today? You can ask me about our services, pricing, or anything related to IT outsourcing.";

const DEFAULT_RESPONSE: &str = "I'm here to help! Could you please provide more details about what you're looking for? I can assist with information about our services, pricing, or project inquiries.";

lazy_static! {
    /// Prompt chips the widget shows under the input box. Each one is worded
    /// to land on a trigger phrase or fallback rule.
    pub static ref SUGGESTIONS: Vec<&'static str> = vec![
        "Tell me about your services",
        "How much does it cost?",
        "How can I reach you?",
        "Show me your portfolio",
    ];
}

/// The table compiled into the binary. A different table can be loaded at
/// startup via RESPONSES_PATH; this one is the site's stock mapping.
pub fn builtin_table() -> Result<ResponseTable, TableError> {
    let triggers = trigger_entries()
        .into_iter()
        .map(|(phrase, response)| (phrase.to_string(), response.to_string()))
        .collect();
    let fallbacks = fallback_rules()
        .into_iter()
        .map(|(requirement, key)| (requirement, key.to_string()))
        .collect();
    ResponseTable::new(triggers, fallbacks, DEFAULT_RESPONSE.to_string())
}

fn trigger_entries() -> Vec<(&'static str, &'static str)> {
    vec![
        ("hello", "Hello! Welcome to Aimen Tech Solutions. How can I help you today?"),
        ("hi", "Hi there! I'm here to assist you with any questions about our services."),
        ("services", "We offer a wide range of services including web development, mobile apps, AI solutions, and cloud services. Which service interests you most?"),
        ("pricing", "Our pricing varies based on project complexity and requirements. We offer flexible plans starting from $2,999/month. Would you like me to explain our pricing tiers?"),
        ("contact", "You can reach us at info@aimentech.com or call +1 (555) 123-4567. We're also available for a free consultation."),
        ("portfolio", "Check out our portfolio section to see examples of our recent projects. We've worked with clients across various industries."),
        ("timeline", "Project timelines depend on complexity, but typically range from 2-6 months. We follow an agile development process with regular updates."),
        ("support", "We provide comprehensive support including 24/7 monitoring, regular maintenance, and technical assistance. Our enterprise plans include priority support."),
        ("web development", "Our web development services include custom websites, e-commerce platforms, and web applications using modern technologies like React, Vue.js, and Node.js."),
        ("mobile apps", "We create native and cross-platform mobile apps for iOS and Android using React Native, Flutter, and native development approaches."),
        ("ai solutions", "Our AI services include machine learning, natural language processing, computer vision, and intelligent automation solutions."),
        ("cloud services", "We help with cloud migration, infrastructure setup, DevOps, and management across AWS, Azure, and Google Cloud platforms."),
        ("consulting", "Our technology consulting services include digital transformation strategy, architecture review, security audits, and process optimization."),
    ]
}

fn fallback_rules() -> Vec<(Requirement, &'static str)> {
    vec![
        (Requirement::AllOf(vec!["what".into(), "do".into()]), "services"),
        (Requirement::AnyOf(vec!["cost".into(), "price".into(), "fee".into()]), "pricing"),
        (Requirement::AnyOf(vec!["how long".into(), "timeline".into(), "time".into()]), "timeline"),
        (Requirement::AnyOf(vec!["help".into(), "support".into()]), "support"),
        (Requirement::AnyOf(vec!["work".into(), "project".into(), "example".into()]), "portfolio"),
        (Requirement::AnyOf(vec!["reach".into(), "call".into(), "email".into()]), "contact"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::select_response;

    #[test]
    fn test_builtin_table_validates() {
        let table = builtin_table().expect("builtin table must be valid");
        assert_eq!(table.trigger_count(), 13);
        assert_eq!(table.fallback_count(), 6);
    }

    #[test]
    fn test_suggestions_land_on_canned_responses() {
        let table = builtin_table().unwrap();
        for suggestion in SUGGESTIONS.iter() {
            let reply = select_response(&table, suggestion);
            assert_ne!(
                reply,
                table.default_response(),
                "suggestion '{}' fell through to the default response",
                suggestion
            );
        }
    }
}
