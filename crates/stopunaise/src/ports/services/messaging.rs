//! Messaging Handoff Port
//!
//! Builds the deep link that opens a conversation with the fulfillment team.

/// Messaging handoff interface
pub trait MessagingHandoff: Send + Sync {
    /// Deep link carrying `text` as its single message parameter
    fn link(&self, text: &str) -> String;

    /// Platform name (e.g., "whatsapp")
    fn name(&self) -> &str;
}
