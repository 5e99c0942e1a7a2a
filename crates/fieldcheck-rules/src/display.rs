//! Field name humanization for generated messages.

/// Turn a raw field key into the name shown in generated messages.
///
/// Hyphens become spaces, camelCase humps start a new word, and every word
/// gets an upper-case first letter: `lessThan` → `Less Than`,
/// `first-name` → `First Name`.
pub fn display_name(key: &str) -> String {
    let mut spaced = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if c == '-' {
            spaced.push(' ');
            continue;
        }
        if i > 0 && c.is_uppercase() {
            spaced.push(' ');
        }
        spaced.push(c);
    }

    spaced
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
