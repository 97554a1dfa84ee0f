//! Human-readable byte sizes.

const SIZE_NAMES: [&str; 9] = ["B", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Formats `bytes` in the largest 1024-based unit that keeps the value at
/// or above 1, rounded to two decimals: `1536` is `1.5 KB`.
pub fn convert_size(bytes: u128) -> String {
    if bytes == 0 {
        return "0B".to_string();
    }

    let mut unit = 0;
    let mut divisor: u128 = 1;
    while unit + 1 < SIZE_NAMES.len() && bytes >= divisor * 1024 {
        divisor *= 1024;
        unit += 1;
    }

    let value = bytes as f64 / divisor as f64;
    format!("{} {}", format_rounded(value), SIZE_NAMES[unit])
}

/// Two decimals with trailing zeros dropped, keeping at least one.
fn format_rounded(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{}0", trimmed)
    } else {
        trimmed.to_string()
    }
}
