//! Number formatting shared by chart labels and the summary

/// Group the integer part with commas, keep up to three decimals
///
/// `1234567.0` → `1,234,567`, `1234.5` → `1,234.5`
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }

    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let negative = value < 0.0 && (int_part != "0" || !frac_part.is_empty());
    let sign = if negative { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}

/// Human-scaled XP amount
///
/// XP is counted in bytes upstream, so large totals read as `KB` / `MB`.
pub fn format_xp(xp: f64) -> String {
    if xp >= 1_000_000.0 {
        format!("{:.1} MB", xp / 1_000_000.0)
    } else if xp >= 1_000.0 {
        format!("{:.1} KB", xp / 1_000.0)
    } else {
        format!("{} XP", format_thousands(xp))
    }
}

/// Audit ratio with one decimal
pub fn format_ratio(ratio: f64) -> String {
    if ratio.is_finite() {
        format!("{:.1}", ratio)
    } else {
        "0.0".to_string()
    }
}
