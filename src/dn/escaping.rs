//! Rendering distinguished-name attributes back into strings.


use std::borrow::Cow;

use crate::Attribute;


fn needs_escape(c: char) -> bool {
    matches!(c, ',' | '+' | '"' | '\\' | '<' | '>' | ';')
}


/// Escapes the special characters `,`, `+`, `"`, `\`, `<`, `>` and `;` in an attribute value by
/// prefixing them with a backslash.
///
/// Spaces and all other characters are passed through unchanged.
pub fn escape_value(value: &str) -> Cow<str> {
    if !value.chars().any(needs_escape) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        if needs_escape(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    Cow::Owned(escaped)
}

/// Renders a single attribute as `name=value`, trimming both parts and escaping the value.
///
/// Returns `None` if the name or the value is blank; otherwise the result equals the attribute's
/// `Display` output.
pub fn render_attribute(attribute: &Attribute) -> Option<String> {
    if attribute.name().trim().len() == 0 || attribute.value().trim().len() == 0 {
        return None;
    }
    Some(attribute.to_string())
}

/// Renders each non-blank attribute as `name=value`.
pub fn list_attributes(attributes: &[Attribute]) -> Vec<String> {
    attributes.iter()
        .filter_map(render_attribute)
        .collect()
}

/// Renders the non-blank attributes as `name=value` and joins them with the separator.
pub fn serialize(attributes: &[Attribute], separator: &str) -> String {
    list_attributes(attributes).join(separator)
}
