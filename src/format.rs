//! Currency and percentage rendering for reports

/// Compact revenue: `$1.23M`, `$457K`, `$950`
pub fn format_revenue(value: f64) -> String {
    let abs = value.abs();
    let (digits, suffix) = if abs >= 1_000_000.0 {
        (format!("{:.2}", abs / 1_000_000.0), "M")
    } else if abs >= 1_000.0 {
        (format!("{:.0}", abs / 1_000.0), "K")
    } else {
        (format!("{:.0}", abs), "")
    };
    format!("{}${}{}", sign(value, &digits), digits, suffix)
}

/// Whole dollars with thousands separators: `$1,234,568`
pub fn format_currency(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}", sign(value, &digits), grouped)
}

/// Minus sign only when the rounded amount is not zero
fn sign(value: f64, digits: &str) -> &'static str {
    if value < 0.0 && digits.chars().any(|ch| matches!(ch, '1'..='9')) {
        "-"
    } else {
        ""
    }
}

/// One decimal place: `12.3%`
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value)
}
