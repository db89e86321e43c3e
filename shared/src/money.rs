//! Money helpers
//!
//! Amounts travel in currency units as `f64`; arithmetic that must not
//! accumulate float drift goes through integer cents.

/// Convert currency units to cents (round half up)
///
/// # Examples
///
/// ```
/// use shared::money::to_cents;
///
/// assert_eq!(to_cents(12.50), 1250);
/// assert_eq!(to_cents(0.01), 1);
/// assert_eq!(to_cents(100.00), 10000);
/// ```
pub fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Convert cents back to currency units
///
/// # Examples
///
/// ```
/// use shared::money::from_cents;
///
/// assert!((from_cents(1250) - 12.50).abs() < 0.001);
/// assert!((from_cents(1) - 0.01).abs() < 0.001);
/// ```
pub fn from_cents(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Round an amount to whole cents
pub fn round_currency(amount: f64) -> f64 {
    from_cents(to_cents(amount))
}

/// A line total: unit price times quantity, rounded to cents
pub fn line_total(unit_price: f64, quantity: i32) -> f64 {
    round_currency(unit_price * quantity as f64)
}

/// Format an amount as a euro string
///
/// # Examples
///
/// ```
/// use shared::money::format_eur;
///
/// assert_eq!(format_eur(12.5), "12.50€");
/// assert_eq!(format_eur(100.0), "100.00€");
/// ```
pub fn format_eur(amount: f64) -> String {
    format!("{:.2}€", amount)
}
