use crate::types::MessageRole;

/// Wrap `text` in the chat-message envelope billed for its role
pub fn format_message(text: &str, role: &MessageRole) -> String {
    format!("<|im_start|>{}\n{}<|im_end|>", role.kind.as_str(), text)
}
