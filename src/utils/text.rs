/// Render a user fraction as a human percentage: 0.2 -> "20%",
/// 0.005 -> "0.5%". Rounded to four decimal places to keep binary
/// float noise out of the message text.
pub fn fmt_percent(fraction: f64) -> String {
    let percent = (fraction * 100.0 * 10_000.0).round() / 10_000.0;
    format!("{}%", percent)
}

/// Comma-join version codes for table cells; "-" when empty
pub fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}
