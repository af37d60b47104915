// selector.rs
use log::debug;

use crate::response_table::ResponseTable;

/// Pick the canned reply for a user utterance.
///
/// Scans the trigger table in declared order and returns the response of the
/// first phrase contained in the lowercased utterance; containment is plain
/// substring search, not word-boundary matching. If no trigger matches, the
/// fallback rules are tried in declared order, then the default response.
/// Total over all inputs: the validated table guarantees a non-empty default.
pub fn select_response<'a>(table: &'a ResponseTable, utterance: &str) -> &'a str {
    let lowered = utterance.to_lowercase();

    for (phrase, response) in table.triggers() {
        if lowered.contains(phrase.as_str()) {
            debug!("Trigger phrase matched: '{}'", phrase);
            return response;
        }
    }

    for rule in table.fallbacks() {
        if rule.requirement.matches(&lowered) {
            debug!("Fallback rule matched: {:?}", rule.requirement);
            return table.trigger_response(rule.response);
        }
    }

    debug!("No trigger or fallback matched; using default response");
    table.default_response()
}
