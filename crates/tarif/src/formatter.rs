//! Monetary amount formatting

/// Format an amount with thousand separators and two decimals
///
/// This is the display format used for every monetary cell on generated
/// documents. Values round only here; stored quantities and prices keep
/// their full precision.
///
/// # Examples
/// ```
/// use tarif::format_amount;
/// assert_eq!(format_amount(1234.56), "1,234.56");
/// assert_eq!(format_amount(1000000.0), "1,000,000.00");
/// assert_eq!(format_amount(-100.5), "-100.50");
/// ```
pub fn format_amount(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let cents = (n.abs() * 100.0).round() as i64;
    let sign = if n < 0.0 && cents > 0 { "-" } else { "" };

    format!("{sign}{}.{:02}", format_with_thousands(cents / 100), cents % 100)
}

/// Format an integer with comma thousand separators
fn format_with_thousands(n: i64) -> String {
    let s = n.to_string();
    let mut result = String::new();

    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }

    result
}
