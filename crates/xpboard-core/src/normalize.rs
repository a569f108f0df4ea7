//! Human-readable labels from raw object paths and skill types

/// Label used when a record has no path at all
pub const UNKNOWN_PROJECT: &str = "Unknown Project";

/// Label used when the path exists but yields no usable segment
pub const UNNAMED_PROJECT: &str = "Unnamed Project";

/// Label used for skill records with an empty type
pub const UNKNOWN_SKILL: &str = "Unknown Skill";

const PROJECT_PREFIXES: [&str; 2] = ["piscine-", "quest-"];
const SKILL_PREFIX: &str = "skill_";

/// Derive a project label from an object path
///
/// `/kisumu/module/piscine-go/ex00` → `Ex00`, `/kisumu/module/go-reloaded` →
/// `Go Reloaded`. A trailing empty or numeric segment (an id) falls back to
/// the segment before it.
pub fn normalize_project_name(path: &str) -> String {
    if path.is_empty() {
        return UNKNOWN_PROJECT.to_string();
    }

    let parts: Vec<&str> = path.split('/').collect();
    let mut name = parts[parts.len() - 1];
    if (name.is_empty() || is_all_digits(name)) && parts.len() > 1 {
        name = parts[parts.len() - 2];
    }

    for prefix in PROJECT_PREFIXES {
        if let Some(stripped) = name.strip_prefix(prefix) {
            name = stripped;
        }
    }

    if name.is_empty() {
        return UNNAMED_PROJECT.to_string();
    }

    name.split('-').map(capitalize).collect::<Vec<_>>().join(" ")
}

/// Derive a skill label from a transaction type
///
/// `skill_go_routines` → `Go Routines`. Empty types map to
/// [`UNKNOWN_SKILL`].
pub fn normalize_skill_name(skill_type: &str) -> String {
    let stripped = skill_type.strip_prefix(SKILL_PREFIX).unwrap_or(skill_type);
    if stripped.trim().is_empty() {
        return UNKNOWN_SKILL.to_string();
    }

    stripped
        .replace(['_', '-'], " ")
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Cut `label` to `keep_chars` characters plus `...` when it is longer
/// than `max_chars`. Counts chars, not bytes.
pub fn truncate_label(label: &str, max_chars: usize, keep_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let mut out: String = label.chars().take(keep_chars).collect();
    out.push_str("...");
    out
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Upper-case the first character, leave the rest untouched
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
