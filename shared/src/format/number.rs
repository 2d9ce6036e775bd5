/// Grouping and decimal separators for a locale's language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberSymbols {
    pub group: char,
    pub decimal: char,
}

impl NumberSymbols {
    pub fn for_locale(locale: &str) -> Self {
        let language = locale
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_lowercase();

        match language.as_str() {
            "de" | "es" | "it" | "nl" | "pt" | "id" | "tr" | "da" => Self { group: '.', decimal: ',' },
            "fr" | "ru" | "pl" | "cs" | "sv" | "nb" | "fi" | "uk" => Self { group: ' ', decimal: ',' },
            _ => Self { group: ',', decimal: '.' },
        }
    }
}

impl Default for NumberSymbols {
    fn default() -> Self {
        Self { group: ',', decimal: '.' }
    }
}

/// Formats `value` with a fixed number of decimals and thousands grouping
pub fn format_grouped(value: f64, decimals: usize, symbols: NumberSymbols) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }

    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(symbols.group);
        }
        grouped.push(digit);
    }
    if let Some(frac_part) = frac_part {
        grouped.push(symbols.decimal);
        grouped.push_str(frac_part);
    }

    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    if value < 0.0 && !is_zero {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Rounded integer with English grouping, e.g. `1,234`
pub fn format_number(value: f64) -> String {
    format_grouped(value, 0, NumberSymbols::default())
}

/// Rounded integer with the locale's grouping
pub fn format_number_locale(value: f64, locale: &str) -> String {
    format_grouped(value, 0, NumberSymbols::for_locale(locale))
}

fn trim_decimals(text: String) -> String {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

/// Abbreviates large values: `1.5K`, `12.3K`, `250K`, `4.2M`, `1.1B`
pub fn format_long_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }

    let n = value.abs();
    let abbreviated = if n >= 1_000_000_000.0 {
        format!("{:.1}B", n / 1_000_000_000.0)
    } else if n >= 1_000_000.0 {
        format!("{:.1}M", n / 1_000_000.0)
    } else if n >= 100_000.0 {
        format!("{:.0}K", n / 1_000.0)
    } else if n >= 10_000.0 {
        format!("{:.1}K", n / 1_000.0)
    } else if n >= 1_000.0 {
        format!("{}K", trim_decimals(format!("{:.2}", n / 1_000.0)))
    } else {
        return format_number(value);
    };

    if value < 0.0 {
        format!("-{}", abbreviated)
    } else {
        abbreviated
    }
}

/// Symbol and minor-unit digits for common ISO 4217 codes
fn currency_info(code: &str) -> Option<(&'static str, usize)> {
    Some(match code {
        "USD" => ("$", 2),
        "EUR" => ("€", 2),
        "GBP" => ("£", 2),
        "JPY" => ("¥", 0),
        "CNY" => ("CN¥", 2),
        "INR" => ("₹", 2),
        "KRW" => ("₩", 0),
        "CAD" => ("CA$", 2),
        "AUD" => ("A$", 2),
        "BRL" => ("R$", 2),
        "CHF" => ("CHF ", 2),
        "MXN" => ("MX$", 2),
        _ => return None,
    })
}

/// Formats a monetary amount, e.g. `$1,234.50`. Unknown codes render as `XYZ 1,234.50`.
pub fn format_currency(value: f64, currency: &str, locale: &str) -> String {
    let code = currency.trim().to_uppercase();
    let symbols = NumberSymbols::for_locale(locale);
    let value = if value.is_finite() { value } else { 0.0 };

    let (prefix, decimals) = match currency_info(&code) {
        Some((symbol, decimals)) => (symbol.to_string(), decimals),
        None => (format!("{} ", code), 2),
    };

    let amount = format_grouped(value.abs(), decimals, symbols);
    if value < 0.0 && amount.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-{}{}", prefix, amount)
    } else {
        format!("{}{}", prefix, amount)
    }
}

/// Currency with K/M/B scaling, e.g. `$12.50K`
pub fn format_long_currency(value: f64, currency: &str, locale: &str) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let n = value.abs();

    if n >= 1_000_000_000.0 {
        format!("{}B", format_currency(value / 1_000_000_000.0, currency, locale))
    } else if n >= 1_000_000.0 {
        format!("{}M", format_currency(value / 1_000_000.0, currency, locale))
    } else if n >= 1_000.0 {
        format!("{}K", format_currency(value / 1_000.0, currency, locale))
    } else {
        format_currency(value, currency, locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, "0")]
    #[case(999.0, "999")]
    #[case(999.6, "1,000")]
    #[case(1_234.0, "1,234")]
    #[case(-1_234_567.0, "-1,234,567")]
    #[case(f64::NAN, "0")]
    fn test_format_number(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_number(value), expected);
    }

    #[rstest]
    #[case(12.0, "12")]
    #[case(1_000.0, "1K")]
    #[case(1_500.0, "1.5K")]
    #[case(1_234.0, "1.23K")]
    #[case(12_345.0, "12.3K")]
    #[case(250_000.0, "250K")]
    #[case(4_200_000.0, "4.2M")]
    #[case(1_100_000_000.0, "1.1B")]
    #[case(-1_500.0, "-1.5K")]
    #[case(f64::INFINITY, "0")]
    fn test_format_long_number(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_long_number(value), expected);
    }

    #[test_log::test]
    fn test_locale_grouping() {
        assert_eq!(format_number_locale(1_234_567.0, "de-DE"), "1.234.567");
        assert_eq!(format_number_locale(1_234_567.0, "fr"), "1 234 567");
        assert_eq!(format_number_locale(1_234_567.0, "en-US"), "1,234,567");
    }

    #[rstest]
    #[case(1_234.5, "USD", "$1,234.50")]
    #[case(-3.0, "eur", "-€3.00")]
    #[case(1_500.0, "JPY", "¥1,500")]
    #[case(2.0, "XYZ", "XYZ 2.00")]
    fn test_format_currency(#[case] value: f64, #[case] code: &str, #[case] expected: &str) {
        assert_eq!(format_currency(value, code, "en-US"), expected);
    }

    #[test_log::test]
    fn test_format_currency_locale_separators() {
        assert_eq!(format_currency(1_234.5, "EUR", "de-DE"), "€1.234,50");
    }

    #[test_log::test]
    fn test_format_long_currency() {
        assert_eq!(format_long_currency(12_500.0, "USD", "en-US"), "$12.50K");
        assert_eq!(format_long_currency(3_000_000.0, "USD", "en-US"), "$3.00M");
        assert_eq!(format_long_currency(42.0, "USD", "en-US"), "$42.00");
    }

    #[test_log::test]
    fn test_negative_zero_has_no_sign() {
        assert_eq!(format_number(-0.2), "0");
        assert_eq!(format_currency(-0.001, "USD", "en-US"), "$0.00");
    }
}
