//! Number formatting for metric cards and table cells.

/// Format a number with comma thousands separators and the given number
/// of decimal places. Halfway values round away from zero, like
/// `toLocaleString`, not to-even like `format!` alone.
pub fn format_with_commas(value: f64, decimals: u8) -> String {
    let scale = 10f64.powi(i32::from(decimals.min(2)));
    let rounded = (value * scale).round() / scale;
    let formatted = match decimals {
        0 => format!("{:.0}", rounded),
        1 => format!("{:.1}", rounded),
        _ => format!("{:.2}", rounded),
    };

    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };

    let mut result = String::new();
    let chars: Vec<char> = integer_part.chars().rev().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && i % 3 == 0 && *c != '-' {
            result.push(',');
        }
        result.push(*c);
    }
    let grouped: String = result.chars().rev().collect();

    match decimal_part {
        Some(d) => format!("{}.{}", grouped, d),
        None => grouped,
    }
}

/// Dollar amount with cents: 1234567.891 -> "$1,234,567.89"
pub fn format_currency(value: f64) -> String {
    if value < 0.0 {
        format!("-${}", format_with_commas(-value, 2))
    } else {
        format!("${}", format_with_commas(value, 2))
    }
}

/// Dollar amount rounded to whole dollars, for summary cards.
pub fn format_currency_whole(value: f64) -> String {
    if value < 0.0 {
        format!("-${}", format_with_commas(-value, 0))
    } else {
        format!("${}", format_with_commas(value, 0))
    }
}

/// Integer count with separators: 1234567 -> "1,234,567"
pub fn format_count(value: i64) -> String {
    format_with_commas(value as f64, 0)
}

/// Ratio such as inventory turnover, two decimals.
pub fn format_ratio(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_with_commas() {
        assert_eq!(format_with_commas(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_with_commas(1234.567, 1), "1,234.6");
        assert_eq!(format_with_commas(0.0, 0), "0");
    }

    #[test]
    fn test_halfway_values_round_away_from_zero() {
        assert_eq!(format_with_commas(1234.5, 0), "1,235");
        assert_eq!(format_with_commas(-1234.5, 0), "-1,235");
        assert_eq!(format_with_commas(2.5, 0), "3");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
        assert_eq!(format_currency(-42.5), "-$42.50");
        assert_eq!(format_currency_whole(1234567.89), "$1,234,568");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(1234567), "1,234,567");
        assert_eq!(format_count(0), "0");
    }

    #[test]
    fn test_format_ratio() {
        assert_eq!(format_ratio(1.0), "1.00");
        assert_eq!(format_ratio(2.345), "2.35");
    }
}
