//! Display formatting for amounts and percentages

/// Narrow no-break space, the fr-FR thousands separator
const FR_GROUP_SEPARATOR: char = '\u{202F}';

/// Spreadsheet cell format: `"1234.50 €"`
pub fn format_euro_cell(value: f64) -> String {
    format!("{:.2} €", value)
}

/// fr-FR currency display: `"1 234,50 €"`
pub fn format_euro(value: f64) -> String {
    if !value.is_finite() {
        return format!("{} €", value);
    }

    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(FR_GROUP_SEPARATOR);
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{},{} €", sign, grouped, frac_part)
}

/// Signed percentage with one decimal: `"+50.0%"`, `"-12.5%"`, `"0.0%"`
pub fn format_percent(value: f64) -> String {
    if value > 0.0 {
        format!("+{:.1}%", value)
    } else {
        format!("{:.1}%", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_euro_cell() {
        assert_eq!(format_euro_cell(1234.5), "1234.50 €");
        assert_eq!(format_euro_cell(0.0), "0.00 €");
        assert_eq!(format_euro_cell(-50.0), "-50.00 €");
        assert_eq!(format_euro_cell(f64::NAN), "NaN €");
    }

    #[test]
    fn test_format_euro_grouping() {
        assert_eq!(format_euro(1234.5), "1\u{202F}234,50 €");
        assert_eq!(format_euro(1234567.891), "1\u{202F}234\u{202F}567,89 €");
        assert_eq!(format_euro(12.0), "12,00 €");
        assert_eq!(format_euro(-999.999), "-1\u{202F}000,00 €");
    }

    #[test]
    fn test_format_euro_non_finite() {
        assert_eq!(format_euro(f64::NAN), "NaN €");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(50.0), "+50.0%");
        assert_eq!(format_percent(-12.54), "-12.5%");
        assert_eq!(format_percent(0.0), "0.0%");
    }
}
