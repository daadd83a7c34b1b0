//! Календарные периоды для фильтров и месячных закрытий

use chrono::{Datelike, NaiveDate};

const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// Первый и последний день месяца. None для некорректного месяца.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next.pred_opt()?))
}

/// Границы месяца в виде строк YYYY-MM-DD (для query string)
pub fn month_bounds_iso(year: i32, month: u32) -> Option<(String, String)> {
    month_bounds(year, month).map(|(from, to)| {
        (
            from.format("%Y-%m-%d").to_string(),
            to.format("%Y-%m-%d").to_string(),
        )
    })
}

/// Название месяца (1..=12)
pub fn month_name(month: u32) -> Option<&'static str> {
    MONTH_NAMES.get((month as usize).wrapping_sub(1)).copied()
}

/// "Marzo 2024"
pub fn month_label(year: i32, month: u32) -> String {
    match month_name(month) {
        Some(name) => format!("{} {}", name, year),
        None => format!("{:02}/{}", month, year),
    }
}

/// Предыдущий месяц: (2024, 1) -> (2023, 12)
pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// Период не позже текущего месяца
pub fn is_future_period(year: i32, month: u32, today: NaiveDate) -> bool {
    (year, month) > (today.year(), today.month())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_bounds() {
        let (from, to) = month_bounds(2024, 2).unwrap();
        assert_eq!(from, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(to, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let (_, to) = month_bounds(2023, 12).unwrap();
        assert_eq!(to, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());

        assert!(month_bounds(2024, 13).is_none());
        assert!(month_bounds(2024, 0).is_none());
    }

    #[test]
    fn test_month_bounds_iso() {
        assert_eq!(
            month_bounds_iso(2024, 4),
            Some(("2024-04-01".to_string(), "2024-04-30".to_string()))
        );
    }

    #[test]
    fn test_month_label() {
        assert_eq!(month_label(2024, 3), "Marzo 2024");
        assert_eq!(month_label(2024, 0), "00/2024");
    }

    #[test]
    fn test_previous_month_and_future() {
        assert_eq!(previous_month(2024, 1), (2023, 12));
        assert_eq!(previous_month(2024, 7), (2024, 6));

        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert!(!is_future_period(2024, 6, today));
        assert!(!is_future_period(2023, 12, today));
        assert!(is_future_period(2024, 7, today));
        assert!(is_future_period(2025, 1, today));
    }
}
