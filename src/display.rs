/// Formats `x` with at most `digits` significant digits, the way a C++
/// stream with `setprecision(digits)` prints a double: fixed notation for
/// moderate exponents, `1.5e+20` style otherwise, trailing zeros dropped.
pub fn format_number(x: f64, digits: u32) -> String {
    if x == 0.0 {
        return "0".to_string();
    }
    if !x.is_finite() {
        return x.to_string();
    }

    let precision = digits.max(1) as usize;
    let scientific = format!("{:.*e}", precision - 1, x);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = match exponent.parse() {
        Ok(exponent) => exponent,
        Err(_) => return scientific,
    };

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.unsigned_abs());
    }

    let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
    trim_fraction(&format!("{:.*}", decimals, x)).to_string()
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

/// Normalizes spacing of an arithmetic expression for display: one blank
/// around binary operators, none after a unary sign or inside parentheses.
///
/// Blanks between digits are dropped, so `1 2` is shown as the `12` it
/// evaluates to.
pub fn format_with_spaces(expr: &str) -> String {
    let mut result = String::new();
    let mut last: Option<char> = None;
    let mut after_binary = false;

    for c in expr.chars().filter(|c| !c.is_whitespace()) {
        let is_operator = matches!(c, '+' | '-' | '*' | '/');
        let unary = is_operator && matches!(last, None | Some('(' | '+' | '-' | '*' | '/'));
        if after_binary || (is_operator && !unary) {
            result.push(' ');
        }
        result.push(c);
        after_binary = is_operator && !unary;
        last = Some(c);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_notation_within_precision() {
        assert_eq!(format_number(1.0 / 3.0, 15), "0.333333333333333");
        assert_eq!(format_number(2.5, 15), "2.5");
        assert_eq!(format_number(-32.0, 15), "-32");
        assert_eq!(format_number(123456789.0, 15), "123456789");
        assert_eq!(format_number(-0.0001234, 3), "-0.000123");
        assert_eq!(format_number(0.0, 12), "0");
    }

    #[test]
    fn scientific_notation_outside_precision() {
        assert_eq!(format_number(1e20, 15), "1e+20");
        assert_eq!(format_number(1e15, 15), "1e+15");
        assert_eq!(format_number(1.5e-7, 12), "1.5e-07");
        assert_eq!(format_number(-2.25e300, 12), "-2.25e+300");
    }

    #[test]
    fn spaces_binary_operators_only() {
        assert_eq!(format_with_spaces("3+4*2"), "3 + 4 * 2");
        assert_eq!(format_with_spaces("-5+ 3"), "-5 + 3");
        assert_eq!(format_with_spaces("2*-3"), "2 * -3");
        assert_eq!(format_with_spaces("( -8 )*+--4"), "(-8) * +--4");
        assert_eq!(format_with_spaces("2(1/2)"), "2(1 / 2)");
        assert_eq!(format_with_spaces("1 2"), "12");
    }
}
