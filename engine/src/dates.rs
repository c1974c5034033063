//! Date, age and zodiac helpers over loosely formatted date strings
//!
//! Accepted forms: empty (unknown), `YYYY` (year precision) and
//! `D.M.YYYY` / `DD.MM.YYYY` (full precision). Anything else is unknown.

use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static YEAR_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})$").unwrap());

static FULL_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})\.(\d{1,2})\.(\d{4})$").unwrap());

// ============================================================================
// Parsing
// ============================================================================

/// Parse a stored date. A bare year maps to January 1st of that year.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Some(caps) = YEAR_ONLY.captures(value) {
        let year: i32 = caps[1].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }

    let caps = FULL_DATE.captures(value)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// True only for the day-month-year form.
pub fn is_full_date(value: &str) -> bool {
    FULL_DATE.is_match(value.trim())
}

/// Full-precision date, or `None` for year-only, empty or invalid input.
pub fn parse_full_date(value: &str) -> Option<NaiveDate> {
    if is_full_date(value) {
        parse_date(value)
    } else {
        None
    }
}

// ============================================================================
// Age
// ============================================================================

/// Age in whole years, or -1 when it cannot be determined.
///
/// With a death day the age is taken at death, otherwise at today.
pub fn calculate_age_number(birth: &str, death: &str) -> i32 {
    calculate_age_number_at(birth, death, Local::now().date_naive())
}

pub fn calculate_age_number_at(birth: &str, death: &str, today: NaiveDate) -> i32 {
    let Some(born) = parse_date(birth) else {
        return -1;
    };

    let end = if death.trim().is_empty() {
        today
    } else {
        match parse_date(death) {
            Some(died) => died,
            None => return -1,
        }
    };

    let mut years = end.year() - born.year();
    if (end.month(), end.day()) < (born.month(), born.day()) {
        years -= 1;
    }

    if years < 0 {
        -1
    } else {
        years
    }
}

/// Age with its Russian unit, e.g. "2 года" or "11 лет".
pub fn calculate_age(birth: &str, death: &str) -> Option<String> {
    format_age(calculate_age_number(birth, death))
}

pub fn calculate_age_at(birth: &str, death: &str, today: NaiveDate) -> Option<String> {
    format_age(calculate_age_number_at(birth, death, today))
}

fn format_age(years: i32) -> Option<String> {
    if years < 0 {
        return None;
    }
    Some(format!("{} {}", years, years_suffix(years as u64)))
}

/// "год" / "года" / "лет" for the given number.
pub fn years_suffix(n: u64) -> &'static str {
    plural_ru(n, "год", "года", "лет")
}

/// Russian numeral agreement: 1 → `one`, 2–4 → `few`, else `many`,
/// with 11–14 always taking `many`.
pub fn plural_ru<'a>(n: u64, one: &'a str, few: &'a str, many: &'a str) -> &'a str {
    let last_two = n % 100;
    if (11..=14).contains(&last_two) {
        return many;
    }
    match n % 10 {
        1 => one,
        2..=4 => few,
        _ => many,
    }
}

// ============================================================================
// Zodiac
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Zodiac {
    pub name: &'static str,
    pub icon: &'static str,
}

/// First day (month, day) of each sign, in calendar order.
const ZODIAC_STARTS: &[(u32, u32, &str, &str)] = &[
    (1, 20, "Водолей", "♒"),
    (2, 19, "Рыбы", "♓"),
    (3, 21, "Овен", "♈"),
    (4, 20, "Телец", "♉"),
    (5, 21, "Близнецы", "♊"),
    (6, 21, "Рак", "♋"),
    (7, 23, "Лев", "♌"),
    (8, 23, "Дева", "♍"),
    (9, 23, "Весы", "♎"),
    (10, 23, "Скорпион", "♏"),
    (11, 22, "Стрелец", "♐"),
    (12, 22, "Козерог", "♑"),
];

/// Western zodiac sign for a full date. Year-only dates have none.
pub fn get_zodiac(date: &str) -> Option<Zodiac> {
    let date = parse_full_date(date)?;
    let key = (date.month(), date.day());

    // Before Aquarius starts the year is still in Capricorn.
    let (_, _, name, icon) = ZODIAC_STARTS
        .iter()
        .rev()
        .find(|(m, d, _, _)| key >= (*m, *d))
        .unwrap_or(&ZODIAC_STARTS[ZODIAC_STARTS.len() - 1]);

    Some(Zodiac {
        name: *name,
        icon: *icon,
    })
}

/// Zero-padded `DD.MM` of a full date.
pub fn get_day_month(date: &str) -> Option<String> {
    let date = parse_full_date(date)?;
    Some(format!("{:02}.{:02}", date.day(), date.month()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date_forms() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("1990"), Some(ymd(1990, 1, 1)));
        assert_eq!(parse_date("5.3.1990"), Some(ymd(1990, 3, 5)));
        assert_eq!(parse_date("05.03.1990"), Some(ymd(1990, 3, 5)));
        assert_eq!(parse_date("31.02.1990"), None);
        assert_eq!(parse_date("1990-03-05"), None);
        assert_eq!(parse_date("около 1900"), None);
    }

    #[test]
    fn test_is_full_date() {
        assert!(is_full_date("1.1.1900"));
        assert!(is_full_date("01.01.1900"));
        assert!(!is_full_date("1900"));
        assert!(!is_full_date(""));
    }

    #[test]
    fn test_age_pluralization() {
        assert_eq!(calculate_age("01.01.1998", "01.01.2000").as_deref(), Some("2 года"));
        assert_eq!(calculate_age("01.01.1999", "01.01.2000").as_deref(), Some("1 год"));
        assert_eq!(calculate_age("01.01.1989", "01.01.2000").as_deref(), Some("11 лет"));
        assert_eq!(calculate_age("01.01.1979", "01.01.2000").as_deref(), Some("21 год"));
        assert_eq!(calculate_age("01.01.1888", "01.01.2000").as_deref(), Some("112 лет"));
        assert_eq!(calculate_age("01.01.1995", "01.01.2000").as_deref(), Some("5 лет"));
    }

    #[test]
    fn test_age_before_birthday_in_death_year() {
        assert_eq!(calculate_age_number("15.06.1950", "14.06.2000"), 49);
        assert_eq!(calculate_age_number("15.06.1950", "15.06.2000"), 50);
        assert_eq!(calculate_age_number("1950", "2000"), 50);
    }

    #[test]
    fn test_age_unknown_inputs() {
        assert_eq!(calculate_age_number("", "2000"), -1);
        assert_eq!(calculate_age_number("1950", "не помню"), -1);
        assert_eq!(calculate_age_number("2000", "1950"), -1);
        assert_eq!(calculate_age("", ""), None);
    }

    #[test]
    fn test_age_of_living_person_uses_today() {
        let today = ymd(2024, 3, 1);
        assert_eq!(calculate_age_number_at("02.03.2000", "", today), 23);
        assert_eq!(calculate_age_at("01.03.2000", " ", today).as_deref(), Some("24 года"));
    }

    #[test]
    fn test_zodiac() {
        assert_eq!(get_zodiac("1990"), None);
        assert_eq!(get_zodiac("25.12.1990").unwrap().name, "Козерог");
        assert_eq!(get_zodiac("5.1.1990").unwrap().name, "Козерог");
        assert_eq!(get_zodiac("20.01.1990").unwrap().name, "Водолей");
        assert_eq!(get_zodiac("21.03.1990").unwrap().name, "Овен");
        assert_eq!(get_zodiac("22.08.1990").unwrap().name, "Лев");
        assert_eq!(get_zodiac("23.08.1990").unwrap().icon, "♍");
    }

    #[test]
    fn test_day_month() {
        assert_eq!(get_day_month("5.3.1990").as_deref(), Some("05.03"));
        assert_eq!(get_day_month("1990"), None);
    }
}
