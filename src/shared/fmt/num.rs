//! Number formatting for f64 display values.
//!
//! All amounts are USD. Currency always shows exactly two decimals, with
//! comma thousands separators and the sign ahead of the `$`.

/// Inserts comma thousands separators into a plain digit string.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format an amount as USD with two decimals, e.g. `$1,234.56`, `-$0.50`.
pub fn currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0.00".to_string();
    }

    let formatted = format!("{:.2}", amount.abs());
    let (integer, fraction) = formatted.split_once('.').unwrap_or((&formatted, "00"));
    // -0.004 rounds to 0.00 and must not print as "-$0.00"
    let negative = amount < 0.0 && formatted != "0.00";

    format!(
        "{}${}.{}",
        if negative { "-" } else { "" },
        group_thousands(integer),
        fraction
    )
}

/// Format a percentage with two decimals, e.g. `5.00%`, `-2.35%`.
pub fn percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Format a string-encoded market cap as currency.
///
/// A missing value reads as zero. A present but unparseable one is `N/A`.
pub fn market_cap(raw: Option<&str>) -> String {
    match raw.unwrap_or("0").trim().parse::<f64>() {
        Ok(v) if v.is_finite() => currency(v),
        _ => "N/A".to_string(),
    }
}
