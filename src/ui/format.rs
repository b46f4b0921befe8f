/// Peso amount with en-PH digit grouping and two decimals: `₱10,000.00`.
pub fn format_peso(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();

    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("₱{}{}.{:02}", sign, grouped, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_peso(0.0), "₱0.00");
        assert_eq!(format_peso(25.0), "₱25.00");
        assert_eq!(format_peso(2250.0), "₱2,250.00");
        assert_eq!(format_peso(10000.0), "₱10,000.00");
        assert_eq!(format_peso(1234567.891), "₱1,234,567.89");
    }

    #[test]
    fn keeps_sign_and_rounds_cents() {
        assert_eq!(format_peso(-1500.5), "₱-1,500.50");
        assert_eq!(format_peso(0.005), "₱0.01");
    }
}
