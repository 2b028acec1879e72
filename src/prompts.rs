use crate::models::{FutureParameters, Message};

pub const CHAT_SYSTEM: &str = include_str!("../data/prompts/chat_system.txt");
pub const CHAT_USER: &str = include_str!("../data/prompts/chat_user.txt");
pub const IMAGE_DESCRIPTION: &str = include_str!("../data/prompts/image_description.txt");

/// Replace `{{key}}` placeholders in a template string.
///
/// Substituted values are never rescanned, so a value containing `{{...}}`
/// is inserted as-is. Unknown placeholders are left untouched.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        result.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        match after_open.find("}}") {
            Some(end) => {
                let key = &after_open[..end];
                match vars.iter().find(|(name, _)| *name == key) {
                    Some((_, value)) => result.push_str(value),
                    None => {
                        result.push_str("{{");
                        result.push_str(key);
                        result.push_str("}}");
                    }
                }
                rest = &after_open[end + 2..];
            }
            None => {
                result.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    result.push_str(rest);
    result
}

/// Build the user prompt asking for a reply written from `params.year`.
pub fn build_future_prompt(message: &Message, params: &FutureParameters) -> String {
    let year = params.year.to_string();
    let tone = params.tone.instruction();
    render(
        CHAT_USER,
        &[
            ("year", year.as_str()),
            ("message", message.as_str()),
            ("tone", tone.as_str()),
        ],
    )
}
