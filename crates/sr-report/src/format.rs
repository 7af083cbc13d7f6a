//! Value formatting shared by the renderers.
//!
//! Every helper takes the placeholder to print for a missing value; a
//! missing value is never formatted as zero.

/// Win rate with one decimal, e.g. `55.0%`.
pub fn win_rate(value: Option<f64>, placeholder: &str) -> String {
    value.map_or_else(|| placeholder.to_string(), |v| format!("{v:.1}%"))
}

/// Payout rate with two decimals, e.g. `80.25%`.
pub fn payout(value: Option<f64>, placeholder: &str) -> String {
    value.map_or_else(|| placeholder.to_string(), |v| format!("{v:.2}%"))
}

/// Average machines per day with two decimals, e.g. `1.50`.
pub fn machines(value: Option<f64>, placeholder: &str) -> String {
    value.map_or_else(|| placeholder.to_string(), |v| format!("{v:.2}"))
}

/// Signed percentage-point delta, e.g. `+2.00%`.
pub fn signed_payout(value: Option<f64>, placeholder: &str) -> String {
    value.map_or_else(|| placeholder.to_string(), |v| format!("{v:+.2}%"))
}

/// Inline code span for a method name.
pub fn code(text: &str) -> String {
    format!("`{}`", text.replace('`', "'"))
}

/// Escape characters that would break a Markdown table cell.
pub fn md_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('|', "\\|").replace('\n', " ")
}
