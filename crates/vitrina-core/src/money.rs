//! Currency display for amounts expressed in minor units.
//!
//! The commerce backend reports every price as an integer count of minor
//! currency units (e.g. cents). The minor-to-major conversion happens here
//! and nowhere else; call sites must never divide amounts themselves.

/// Currency symbol for codes the storefront is expected to encounter.
///
/// Returns `None` for codes without a dedicated symbol; callers fall back
/// to suffixing the uppercased code.
#[must_use]
pub fn symbol_for(currency_code: &str) -> Option<&'static str> {
    match currency_code.to_ascii_uppercase().as_str() {
        "USD" | "MXN" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        _ => None,
    }
}

/// Formats an amount of minor currency units for display.
///
/// `1999` with `"USD"` renders as `"$19.99"`. Thousands are grouped with
/// commas (`123_456_789` → `"$1,234,567.89"`). Codes without a known symbol
/// render as `"19.99 XYZ"`. Negative amounts carry a leading minus sign.
#[must_use]
pub fn format_minor_units(amount_minor: i64, currency_code: &str) -> String {
    let sign = if amount_minor < 0 { "-" } else { "" };
    let abs = amount_minor.unsigned_abs();
    let major = group_thousands(abs / 100);
    let cents = abs % 100;

    match symbol_for(currency_code) {
        Some(symbol) => format!("{sign}{symbol}{major}.{cents:02}"),
        None => format!(
            "{sign}{major}.{cents:02} {}",
            currency_code.to_ascii_uppercase()
        ),
    }
}

/// Renders an unsigned integer with comma thousands separators.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
