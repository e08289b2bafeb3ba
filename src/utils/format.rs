/// Rupee amount with Indian digit grouping and no fraction, e.g.
/// `₹4,80,00,00,000`.
pub fn format_inr(amount: f64) -> String {
    if !amount.is_finite() {
        return "n/a".to_string();
    }

    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    // 最後三位一組，其餘每兩位一組
    let (head, tail) = digits.split_at(digits.len().saturating_sub(3));
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (left, right) = rest.split_at(rest.len() - 2);
        groups.push(right);
        rest = left;
    }
    if !rest.is_empty() {
        groups.push(rest);
    }
    groups.reverse();
    groups.push(tail);

    format!("{}₹{}", sign, groups.join(","))
}

pub fn format_optional(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_inr(0.0), "₹0");
        assert_eq!(format_inr(999.0), "₹999");
        assert_eq!(format_inr(1_000.0), "₹1,000");
        assert_eq!(format_inr(80_000_000.0), "₹8,00,00,000");
        assert_eq!(format_inr(4_000_000_000.0), "₹4,00,00,00,000");
        assert_eq!(format_inr(-1_500_000.4), "-₹15,00,000");
    }

    #[test]
    fn test_optional_values() {
        assert_eq!(format_optional(Some(16.6666), 1), "16.7");
        assert_eq!(format_optional(None, 1), "n/a");
    }
}
