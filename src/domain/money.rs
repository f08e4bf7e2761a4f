use rust_decimal::Decimal;

/// Longest digit string accepted as a cash amount.
const MAX_CASH_DIGITS: usize = 9;

/// Formats an amount as `Rp30,000`. A fractional part, if any, follows a dot.
pub fn format_rupiah(amount: Decimal) -> String {
    let amount = amount.normalize();
    let sign = if amount.is_sign_negative() && !amount.is_zero() { "-" } else { "" };
    let abs = amount.abs();
    let whole = abs.trunc().normalize();
    let fraction = abs - whole;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if fraction.is_zero() {
        format!("{sign}Rp{grouped}")
    } else {
        let fraction = fraction.to_string();
        let decimals = fraction.trim_start_matches('0').trim_start_matches('.');
        format!("{sign}Rp{grouped}.{decimals}")
    }
}

/// Parses what a cashier types for the cash handed over, e.g. `50000`, `50.000`,
/// `Rp 50,000`. Returns `None` for anything that is not a plain amount.
pub fn parse_cash_amount(input: &str) -> Option<Decimal> {
    let cleaned: String = input
        .to_lowercase()
        .replace("rp", "")
        .chars()
        .filter(|c| !matches!(c, '.' | ',' | ' '))
        .collect();
    if cleaned.is_empty()
        || cleaned.len() > MAX_CASH_DIGITS
        || !cleaned.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }
    cleaned.parse::<u64>().ok().map(Decimal::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rupiah() {
        assert_eq!(format_rupiah(Decimal::ZERO), "Rp0");
        assert_eq!(format_rupiah(Decimal::from(500)), "Rp500");
        assert_eq!(format_rupiah(Decimal::from(30000)), "Rp30,000");
        assert_eq!(format_rupiah(Decimal::from(1234567)), "Rp1,234,567");
        assert_eq!(format_rupiah(Decimal::new(149950, 2)), "Rp1,499.5");
        assert_eq!(format_rupiah(Decimal::from(-2000)), "-Rp2,000");
    }

    #[test]
    fn test_parse_cash_amount() {
        assert_eq!(parse_cash_amount("50000"), Some(Decimal::from(50000)));
        assert_eq!(parse_cash_amount("50.000"), Some(Decimal::from(50000)));
        assert_eq!(parse_cash_amount("Rp 50,000"), Some(Decimal::from(50000)));
        assert_eq!(parse_cash_amount("rp20000"), Some(Decimal::from(20000)));
        assert_eq!(parse_cash_amount(""), None);
        assert_eq!(parse_cash_amount("lima puluh"), None);
        assert_eq!(parse_cash_amount("-5000"), None);
        assert_eq!(parse_cash_amount("1234567890"), None);
    }
}
