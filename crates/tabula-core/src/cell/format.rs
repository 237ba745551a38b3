//! Number formatting for display

/// Significant digits shown for a number
const PRECISION: i32 = 6;

/// Format a number for display in the `%g` style: six significant digits,
/// trailing zeros dropped, exponent notation below `1e-4` and from `1e6` up
///
/// # Example
/// ```rust
/// use tabula_core::format_number;
///
/// assert_eq!(format_number(3.0), "3");
/// assert_eq!(format_number(1.0 / 3.0), "0.333333");
/// assert_eq!(format_number(1e20), "1e+20");
/// ```
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "nan".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if n == 0.0 {
        return if n.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // The exponent after rounding to PRECISION digits picks the notation
    let scientific = format!("{:.*e}", (PRECISION - 1) as usize, n);
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= PRECISION {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (PRECISION - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, n)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_integers() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-42.0), "-42");
        assert_eq!(format_number(123456.0), "123456");
        assert_eq!(format_number(1234567.0), "1.23457e+06");
    }

    #[test]
    fn test_format_fractions() {
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(-1.5), "-1.5");
        assert_eq!(format_number(1.0 / 3.0), "0.333333");
        assert_eq!(format_number(2.0 / 3.0), "0.666667");
        assert_eq!(format_number(0.1 + 0.2), "0.3");
    }

    #[test]
    fn test_format_exponents() {
        assert_eq!(format_number(1e20), "1e+20");
        assert_eq!(format_number(1e6), "1e+06");
        assert_eq!(format_number(999999.5), "1e+06");
        assert_eq!(format_number(0.0001), "0.0001");
        assert_eq!(format_number(0.00001), "1e-05");
        assert_eq!(format_number(-1.5e-7), "-1.5e-07");
        assert_eq!(format_number(1.25e300), "1.25e+300");
    }
}
