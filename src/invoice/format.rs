//! Number formatting for invoice cells: grouped thousands, fixed decimals.

/// `1234.5` → `"1,234.50"`.
pub fn amount(value: f64) -> String {
    grouped(value, 2, 2)
}

/// Zero to two decimals: `3` → `"3"`, `1.5` → `"1.5"`, `1200` → `"1,200"`.
pub fn quantity(value: f64) -> String {
    grouped(value, 0, 2)
}

/// `21` → `"21%"`, `5.5` → `"5.50%"`.
pub fn percent(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}%")
    } else {
        format!("{value:.2}%")
    }
}

fn grouped(value: f64, min_decimals: usize, max_decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.*}", max_decimals, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut frac = frac_part.to_string();
    while frac.len() > min_decimals && frac.ends_with('0') {
        frac.pop();
    }

    let digits = int_part.len();
    let mut out = String::with_capacity(fixed.len() + digits / 3 + 1);
    let negative = value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
    if negative {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if !frac.is_empty() {
        out.push('.');
        out.push_str(&frac);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_group_thousands() {
        assert_eq!(amount(0.0), "0.00");
        assert_eq!(amount(999.999), "1,000.00");
        assert_eq!(amount(1234.5), "1,234.50");
        assert_eq!(amount(1_234_567.891), "1,234,567.89");
        assert_eq!(amount(-42.1), "-42.10");
        assert_eq!(amount(-0.001), "0.00");
    }

    #[test]
    fn quantities_drop_trailing_zeros() {
        assert_eq!(quantity(3.0), "3");
        assert_eq!(quantity(1.5), "1.5");
        assert_eq!(quantity(2.126), "2.13");
        assert_eq!(quantity(1200.0), "1,200");
    }

    #[test]
    fn percents() {
        assert_eq!(percent(21.0), "21%");
        assert_eq!(percent(0.0), "0%");
        assert_eq!(percent(5.5), "5.50%");
    }
}
