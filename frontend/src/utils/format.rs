/// Money rounded to two decimals for display.
pub fn format_money(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let sign = if rounded < 0.0 { "-" } else { "" };
    let abs = rounded.abs();
    let whole = abs.trunc() as u64;
    let cents = ((abs - abs.trunc()) * 100.0).round() as u64;
    let (whole, cents) = if cents == 100 { (whole + 1, 0) } else { (whole, cents) };
    format!("{}{}.{:02}", sign, group_thousands(whole), cents)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_is_rounded_and_grouped() {
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(1234567.891), "1,234,567.89");
        assert_eq!(format_money(97.2), "97.20");
        assert_eq!(format_money(-5.5), "-5.50");
        assert_eq!(format_money(0.999), "1.00");
    }

    #[test]
    fn percent_has_one_decimal() {
        assert_eq!(format_percent(66.666), "66.7%");
    }
}
