//! Currency formatting in the Indonesian style (`Rp 12.500`, `Rp 1.250,50`).

use rust_decimal::Decimal;

/// Format an amount with `.` thousands grouping and `,` decimal separator.
/// Trailing zero fractions are dropped.
pub fn format_amount(amount: Decimal) -> String {
    let normalized = amount.normalize();
    let negative = normalized.is_sign_negative() && !normalized.is_zero();
    let text = normalized.abs().to_string();

    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (text, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push(',');
        out.push_str(&frac);
    }
    out
}

pub fn format_money(symbol: &str, amount: Decimal) -> String {
    format!("{} {}", symbol, format_amount(amount))
}
