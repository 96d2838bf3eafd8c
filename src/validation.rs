//! Local input validation, done before anything reaches the server.
//!
//! Every validator trims its input and returns the cleaned value. Blank
//! input is the only thing rejected; the server owns every other rule.

fn non_blank(input: &str, empty_msg: &str) -> Result<String, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(empty_msg.to_string());
    }
    Ok(trimmed.to_string())
}

/// Login ID entered at the prompt.
pub fn validate_login_id(id: &str) -> Result<String, String> {
    non_blank(id, "ID required!")
}

pub fn validate_password(password: &str) -> Result<String, String> {
    non_blank(password, "Password required!")
}

/// Text of a dare or truth, for adding or editing.
pub fn validate_item_text(text: &str) -> Result<String, String> {
    non_blank(text, "Text cannot be empty")
}

pub fn validate_chat_message(msg: &str) -> Result<String, String> {
    non_blank(msg, "Message cannot be empty")
}

pub fn validate_username(name: &str) -> Result<String, String> {
    non_blank(name, "Username cannot be empty")
}
