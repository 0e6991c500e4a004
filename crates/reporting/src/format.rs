//! Number formatting shared by every report renderer.

/// Format an amount with a currency prefix, two decimals, and thousands
/// separators: `$1,975.00`, `$-1,285.00`.
pub fn format_currency(symbol: &str, amount: f64) -> String {
    let rounded = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{symbol}{sign}{grouped}.{frac_part}")
}

/// Percentage with one decimal place: `100.0%`.
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_thousands_grouping() {
        assert_eq!(format_currency("$", 1975.0), "$1,975.00");
        assert_eq!(format_currency("$", 1_400_000.0), "$1,400,000.00");
        assert_eq!(format_currency("$", 690.0), "$690.00");
        assert_eq!(format_currency("$", 0.0), "$0.00");
    }

    #[test]
    fn test_currency_negative_amounts() {
        assert_eq!(format_currency("$", -1285.0), "$-1,285.00");
        assert_eq!(format_currency("$", -35.0), "$-35.00");
        assert_eq!(format_currency("$", -0.004), "$-0.00");
    }

    #[test]
    fn test_currency_rounds_to_cents() {
        assert_eq!(format_currency("$", 174.996), "$175.00");
        assert_eq!(format_currency("€", 1234.567), "€1,234.57");
    }

    #[test]
    fn test_percent() {
        assert_eq!(format_percent(100.0), "100.0%");
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_percent(12.34), "12.3%");
    }
}
