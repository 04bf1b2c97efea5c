/// Share of `part` over `total` as a percentage, `None` when `total` is zero.
pub fn percentage(part: usize, total: usize) -> Option<f64> {
    if total == 0 {
        None
    } else {
        Some(part as f64 / total as f64 * 100.0)
    }
}

/// Renders a value with at most `precision` decimals, trailing zeros trimmed.
pub fn format_decimal(mut value: f64, precision: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_sign_negative() && value.abs() < f64::EPSILON {
        value = 0.0;
    }
    let mut out = format!("{:.*}", precision, value);
    if out.contains('.') {
        while out.ends_with('0') {
            out.pop();
        }
        if out.ends_with('.') {
            out.pop();
        }
    }
    if out.is_empty() || out == "-0" {
        "0".to_string()
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_of_empty_total_is_none() {
        assert_eq!(percentage(0, 0), None);
        assert_eq!(percentage(1, 4), Some(25.0));
    }

    #[test]
    fn format_trims_trailing_zeros() {
        assert_eq!(format_decimal(50.0, 2), "50");
        assert_eq!(format_decimal(100.0, 2), "100");
        assert_eq!(format_decimal(33.333333, 2), "33.33");
        assert_eq!(format_decimal(66.666666, 2), "66.67");
        assert_eq!(format_decimal(12.5, 2), "12.5");
        assert_eq!(format_decimal(0.0, 2), "0");
    }
}
