//! Rupee formatting with Indian digit grouping (lakh/crore).

/// Format an amount as whole rupees, e.g. `1,20,000` becomes `₹1,20,000`.
pub fn format_inr(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let sign = if rounded < 0 { "-" } else { "" };
    format!("{}₹{}", sign, group_indian(rounded.unsigned_abs()))
}

/// Group digits as 12,34,56,789: last three, then pairs.
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Format a year count with one decimal, dropping a trailing `.0`.
pub fn format_years(years: f64) -> String {
    let tenths = (years * 10.0).round() / 10.0;
    if tenths.fract() == 0.0 {
        format!("{}", tenths as i64)
    } else {
        format!("{:.1}", tenths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_amounts() {
        assert_eq!(format_inr(0.0), "₹0");
        assert_eq!(format_inr(500.0), "₹500");
        assert_eq!(format_inr(999.6), "₹1,000");
    }

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_inr(12000.0), "₹12,000");
        assert_eq!(format_inr(120000.0), "₹1,20,000");
        assert_eq!(format_inr(15000000.0), "₹1,50,00,000");
        assert_eq!(format_inr(-2500.0), "-₹2,500");
    }

    #[test]
    fn test_format_years() {
        assert_eq!(format_years(6.0), "6");
        assert_eq!(format_years(72.0 / 7.0), "10.3");
        assert_eq!(format_years(9.5), "9.5");
    }
}
