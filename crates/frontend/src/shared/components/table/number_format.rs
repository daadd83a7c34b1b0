//! Утилиты форматирования чисел для таблиц (формат es-AR: точка для тысяч, запятая для дробной части)

/// Форматирует число с разделителем тысяч и указанным количеством знаков после запятой.
/// `1234.567` с 2 знаками → `1.234,57`
pub fn format_number_with_decimals(value: f64, decimals: u8) -> String {
    let decimals = decimals.min(4) as usize;
    let formatted = format!("{:.*}", decimals, value.abs());

    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };

    // Точка каждые 3 цифры с конца целой части
    let mut grouped = String::with_capacity(integer_part.len() + integer_part.len() / 3);
    for (i, c) in integer_part.chars().enumerate() {
        if i > 0 && (integer_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    // -0,00 не показываем
    let is_zero = formatted.chars().all(|c| c == '0' || c == '.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    match decimal_part {
        Some(d) => format!("{}{},{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// Денежное значение: `$ 1.234,56`
pub fn format_money(value: f64) -> String {
    let body = format_number_with_decimals(value, 2);
    match body.strip_prefix('-') {
        Some(rest) => format!("-$ {}", rest),
        None => format!("$ {}", body),
    }
}

/// Денежное значение со знаком: `+$ 10,00` / `-$ 10,00`
pub fn format_money_signed(value: f64) -> String {
    if value > 0.0 && format_number_with_decimals(value, 2) != "0,00" {
        format!("+{}", format_money(value))
    } else {
        format_money(value)
    }
}

/// Целое число с разделителем тысяч
pub fn format_number_int(value: f64) -> String {
    format_number_with_decimals(value, 0)
}

/// Процент с одним знаком: `12,5 %`
pub fn format_percent(value: f64) -> String {
    format!("{} %", format_number_with_decimals(value, 1))
}

/// Разбор суммы, введённой пользователем: `1.234,56`, `1234,56`, `1234.56`.
/// Без запятой точка перед ровно тремя цифрами считается разделителем тысяч (`5.000`).
/// Точка после запятой (`1,234.56`) даёт `None`.
pub fn parse_amount(input: &str) -> Option<f64> {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '$')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    let normalized = if let Some(comma) = cleaned.find(',') {
        // Точка после запятой ("1,234.56"): формат не es-AR, не угадываем
        if cleaned[comma..].contains('.') {
            return None;
        }
        cleaned.replace('.', "").replace(',', ".")
    } else if is_thousands_grouping(&cleaned) {
        cleaned.replace('.', "")
    } else {
        cleaned
    };
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn is_thousands_grouping(value: &str) -> bool {
    let mut groups = value.trim_start_matches('-').split('.');
    let Some(head) = groups.next() else {
        return false;
    };
    let rest: Vec<&str> = groups.collect();
    !rest.is_empty()
        && (1..=3).contains(&head.len())
        && rest.iter().all(|g| g.len() == 3 && g.chars().all(|c| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234.56), "$ 1.234,56");
        assert_eq!(format_money(1234567.89), "$ 1.234.567,89");
        assert_eq!(format_money(0.0), "$ 0,00");
        assert_eq!(format_money(-1234.56), "-$ 1.234,56");
        assert_eq!(format_money(999.999), "$ 1.000,00");
    }

    #[test]
    fn test_negative_zero() {
        assert_eq!(format_money(-0.001), "$ 0,00");
        assert_eq!(format_number_int(-0.2), "0");
    }

    #[test]
    fn test_format_money_signed() {
        assert_eq!(format_money_signed(10.0), "+$ 10,00");
        assert_eq!(format_money_signed(-10.0), "-$ 10,00");
        assert_eq!(format_money_signed(0.0), "$ 0,00");
    }

    #[test]
    fn test_format_number_int() {
        assert_eq!(format_number_int(1234567.0), "1.234.567");
        assert_eq!(format_number_int(999.0), "999");
        assert_eq!(format_number_int(-1000.0), "-1.000");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(12.46), "12,5 %");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1.234,56"), Some(1234.56));
        assert_eq!(parse_amount("$ 1234,5"), Some(1234.5));
        assert_eq!(parse_amount("1234.56"), Some(1234.56));
        assert_eq!(parse_amount("5.000"), Some(5000.0));
        assert_eq!(parse_amount("1.250.000"), Some(1250000.0));
        assert_eq!(parse_amount("12.5"), Some(12.5));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
    }

    #[test]
    fn test_parse_amount_rejects_dot_after_comma() {
        assert_eq!(parse_amount("1,234.56"), None);
        assert_eq!(parse_amount("$ 12,5.0"), None);
        assert_eq!(parse_amount("1,2,3"), None);
        assert_eq!(parse_amount("1.234.567,8"), Some(1234567.8));
    }
}
