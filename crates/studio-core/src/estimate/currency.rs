//! German-locale number formatting (`1.234,56 €`).

/// Formats `amount` as euros with exactly `decimals` fraction digits.
pub fn format_eur(amount: f64, decimals: usize) -> String {
    format!("{} €", format_decimal(amount, decimals))
}

/// Formats `amount` with `.` thousands separators and `,` as decimal mark.
pub fn format_decimal(amount: f64, decimals: usize) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }
    let fixed = format!("{:.*}", decimals, amount.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };
    let negative = amount < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');

    let mut out = String::with_capacity(fixed.len() + 4);
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push(',');
        out.push_str(frac);
    }
    out
}

/// Integer grouping as used for request counts (`5.000`).
pub fn format_grouped(value: f64) -> String {
    if value.fract() == 0.0 {
        format_decimal(value, 0)
    } else {
        let text = format_decimal(value, 3);
        text.trim_end_matches('0').trim_end_matches(',').to_string()
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
