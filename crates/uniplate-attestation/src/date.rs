//! Birth dates from two-digit years

use chrono::{Datelike, NaiveDate};

/// Russian month names in the genitive case, as used in "5 мая"
const MONTHS_GENITIVE: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

/// How far back the century pivot sits from the current year
const PIVOT_OFFSET: i32 = 50;

/// Years a birth date may fall in
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1..=9999;

/// Expand a two-digit year relative to `current_year - 50`
///
/// With pivot `p`, century `c = p / 100` and `yy = p % 100`, a year above
/// `yy` belongs to century `c`, anything else to `c + 1`. `None` when the
/// arithmetic overflows.
pub fn infer_year(two_digit: i32, current_year: i32) -> Option<i32> {
    let pivot = current_year.checked_sub(PIVOT_OFFSET)?;
    let mut century = pivot / 100;
    if two_digit <= pivot % 100 {
        century = century.checked_add(1)?;
    }
    century.checked_mul(100)?.checked_add(two_digit)
}

/// Format `DD <month> YYYY года`, or `None` for an impossible date
pub fn format_birth_date(year: &str, month: &str, day: &str, current_year: i32) -> Option<String> {
    let year = infer_year(year.trim().parse().ok()?, current_year)?;
    if !YEAR_RANGE.contains(&year) {
        return None;
    }
    let date = NaiveDate::from_ymd_opt(year, month.trim().parse().ok()?, day.trim().parse().ok()?)?;

    let month = MONTHS_GENITIVE[date.month0() as usize];
    Some(format!("{:02} {} {} года", date.day(), month, date.year()))
}
