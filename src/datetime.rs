use chrono::{Datelike, Month, NaiveDate, Weekday};
use nom::{
    character::complete::{char, digit1},
    combinator::{all_consuming, map_res, verify},
    sequence::{preceded, tuple},
    IResult,
};
use serde_with::DeserializeFromStr;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use crate::error::{Error, ErrorKind, Result};

pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_of_month(month: &Month, year: i32) -> u32 {
    match month {
        Month::February if is_leap_year(year) => 29,
        Month::February => 28,
        Month::April | Month::June | Month::September | Month::November => 30,
        _ => 31,
    }
}

/// Weekday of a proleptic Gregorian date, counted from Sunday (0) to Saturday (6).
///
/// Plain arithmetic, so it stays total for every year reachable by navigating
/// month by month.
pub fn days_from_sunday(year: i32, month: &Month, day: u32) -> u32 {
    const OFFSETS: [i64; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];

    let number = month.number_from_month();
    let y = if number < 3 {
        year as i64 - 1
    } else {
        year as i64
    };

    (y + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400)
        + OFFSETS[(number - 1) as usize]
        + day as i64)
        .rem_euclid(7) as u32
}

/// Column of the first of `month` in a week starting on `week_start`.
pub fn first_weekday_offset(month: &Month, year: i32, week_start: Weekday) -> u32 {
    (days_from_sunday(year, month, 1) + 7 - week_start.num_days_from_sunday()) % 7
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, DeserializeFromStr)]
pub struct MonthIndex {
    index: Month,
    year: i32,
}

impl MonthIndex {
    pub fn new(index: Month, year: i32) -> Self {
        MonthIndex { index, year }
    }

    /// `month0` is taken modulo 12 and carries into the year.
    pub fn from_month0(year: i32, month0: i32) -> Self {
        Self::from_months(year as i64 * 12 + month0 as i64)
    }

    /// Months counted from January of year 0, saturating at the first and
    /// last month a year in `i32` can hold.
    fn from_months(total: i64) -> Self {
        let first = i32::MIN as i64 * 12;
        let last = i32::MAX as i64 * 12 + 11;
        let total = total.max(first).min(last);

        MonthIndex {
            index: MONTHS[total.rem_euclid(12) as usize],
            year: total.div_euclid(12) as i32,
        }
    }

    fn months(&self) -> i64 {
        self.year as i64 * 12 + self.month0() as i64
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.index
    }

    pub fn month0(&self) -> u32 {
        self.index.number_from_month() - 1
    }

    pub fn num_days(&self) -> u32 {
        days_of_month(&self.index, self.year)
    }

    pub fn shifted(&self, delta: i32) -> Self {
        Self::from_months(self.months() + delta as i64)
    }

    pub fn next(&self) -> Self {
        self.shifted(1)
    }

    pub fn prev(&self) -> Self {
        self.shifted(-1)
    }

    pub fn contains<T: Datelike>(&self, date: &T) -> bool {
        date.year() == self.year && date.month0() == self.month0()
    }
}

impl<T: Datelike> From<T> for MonthIndex {
    fn from(m: T) -> Self {
        MonthIndex::new(MONTHS[m.month0() as usize], m.year())
    }
}

impl Add<i32> for MonthIndex {
    type Output = MonthIndex;
    fn add(self, rhs: i32) -> Self::Output {
        self.shifted(rhs)
    }
}

impl Sub<i32> for MonthIndex {
    type Output = MonthIndex;
    fn sub(self, rhs: i32) -> Self::Output {
        Self::from_months(self.months() - rhs as i64)
    }
}

impl PartialOrd for MonthIndex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.months().cmp(&other.months()))
    }
}

impl fmt::Display for MonthIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.index.number_from_month())
    }
}

impl FromStr for MonthIndex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (_, (year, month)) =
            all_consuming(tuple((parse_year, preceded(char('-'), number::<u32>))))(s).map_err(
                |_| {
                    Error::new(
                        ErrorKind::MonthParse,
                        &format!("'{}' is not a month of the form YYYY-M", s),
                    )
                },
            )?;

        if !(1..=12).contains(&month) {
            return Err(Error::new(
                ErrorKind::MonthParse,
                &format!("'{}' has no month {}", s, month),
            ));
        }

        Ok(MonthIndex::from_month0(year, month as i32 - 1))
    }
}

/// Calendar date as written in the event table: `YYYY-M-D`, 1-based month,
/// no leading zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, DeserializeFromStr)]
pub struct DateKey {
    year: i32,
    month: u32,
    day: u32,
}

impl DateKey {
    /// Panics unless `day` exists in `month` of `year`.
    pub fn new(year: i32, month: Month, day: u32) -> Self {
        let num_days = days_of_month(&month, year);
        assert!(
            (1..=num_days).contains(&day),
            "day {} out of range for {} {}",
            day,
            month.name(),
            year
        );

        DateKey {
            year,
            month: month.number_from_month(),
            day,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn matches<T: Datelike>(&self, date: &T) -> bool {
        date.year() == self.year && date.month() == self.month && date.day() == self.day
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        DateKey {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.year, self.month, self.day)
    }
}

impl FromStr for DateKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (_, (year, month, day)) = all_consuming(date_key)(s)?;

        let valid = (1..=12).contains(&month)
            && (1..=days_of_month(&MONTHS[month as usize - 1], year)).contains(&day);

        if !valid {
            return Err(Error::new(
                ErrorKind::DateParse,
                &format!("'{}' is not a valid calendar date", s),
            ));
        }

        Ok(DateKey { year, month, day })
    }
}

fn number<T: FromStr>(input: &str) -> IResult<&str, T> {
    map_res(
        verify(digit1, |digits: &str| digits.len() == 1 || !digits.starts_with('0')),
        str::parse::<T>,
    )(input)
}

fn parse_year(input: &str) -> IResult<&str, i32> {
    number::<i32>(input)
}

fn date_key(input: &str) -> IResult<&str, (i32, u32, u32)> {
    tuple((
        parse_year,
        preceded(char('-'), number::<u32>),
        preceded(char('-'), number::<u32>),
    ))(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gregorian_february() {
        assert_eq!(days_of_month(&Month::February, 2028), 29);
        assert_eq!(days_of_month(&Month::February, 2026), 28);
        assert_eq!(days_of_month(&Month::February, 2000), 29);
        assert_eq!(days_of_month(&Month::February, 1900), 28);
    }

    #[test]
    fn days_of_month_agrees_with_chrono() {
        for year in [1899, 1900, 1999, 2000, 2024, 2026, 2100] {
            for (m0, month) in MONTHS.iter().enumerate() {
                let first = NaiveDate::from_ymd_opt(year, m0 as u32 + 1, 1).unwrap();
                let next = MonthIndex::from_month0(year, m0 as i32 + 1);
                let next_first =
                    NaiveDate::from_ymd_opt(next.year(), next.month0() + 1, 1).unwrap();
                let expected = next_first.signed_duration_since(first).num_days() as u32;

                assert_eq!(days_of_month(month, year), expected, "{} {}", year, m0 + 1);
            }
        }
    }

    #[test]
    fn weekday_agrees_with_chrono() {
        for year in [1600, 1900, 1970, 2026, 2027, 2400] {
            for (m0, month) in MONTHS.iter().enumerate() {
                for day in [1, 13, 28] {
                    let date = NaiveDate::from_ymd_opt(year, m0 as u32 + 1, day).unwrap();
                    assert_eq!(
                        days_from_sunday(year, month, day),
                        date.weekday().num_days_from_sunday()
                    );
                }
            }
        }
    }

    #[test]
    fn first_weekday_depends_on_week_start() {
        // 2026-02-01 is a Sunday
        assert_eq!(first_weekday_offset(&Month::February, 2026, Weekday::Sun), 0);
        assert_eq!(first_weekday_offset(&Month::February, 2026, Weekday::Mon), 6);
        // 2026-10-01 is a Thursday
        assert_eq!(first_weekday_offset(&Month::October, 2026, Weekday::Sun), 4);
        assert_eq!(first_weekday_offset(&Month::October, 2026, Weekday::Mon), 3);
    }

    #[test]
    fn month_index_rolls_over_years() {
        let dec = MonthIndex::new(Month::December, 2026);
        assert_eq!(dec.next(), MonthIndex::new(Month::January, 2027));
        assert_eq!(dec.next().prev(), dec);

        let jan = MonthIndex::new(Month::January, 2026);
        assert_eq!(jan.prev(), MonthIndex::new(Month::December, 2025));
        assert_eq!(jan - 13, MonthIndex::new(Month::December, 2024));
        assert_eq!(jan + 25, MonthIndex::new(Month::February, 2028));
    }

    #[test]
    fn next_then_prev_is_identity() {
        for m0 in -30..30 {
            let start = MonthIndex::from_month0(2026, m0);
            assert_eq!(start.next().prev(), start);
            assert_eq!(start.prev().next(), start);
        }
    }

    #[test]
    fn shifting_by_any_delta_stays_in_range() {
        let feb = MonthIndex::new(Month::February, 2026);

        assert_eq!(feb + i32::MAX, MonthIndex::new(Month::September, 178_958_996));
        assert_eq!(feb + i32::MIN, MonthIndex::new(Month::June, -178_954_945));
        assert_eq!(feb + i32::MAX - i32::MAX, feb);
        assert_eq!(feb + i32::MIN - i32::MIN, feb);
    }

    #[test]
    fn shifting_saturates_at_year_bounds() {
        let last = MonthIndex::new(Month::December, i32::MAX);
        assert_eq!(last.next(), last);
        assert_eq!(last + i32::MAX, last);

        let first = MonthIndex::new(Month::January, i32::MIN);
        assert_eq!(first.prev(), first);
        assert_eq!(first + i32::MIN, first);
    }

    #[test]
    fn weekday_at_extreme_years() {
        // weekdays repeat every 400 years
        for year in [i32::MAX, i32::MIN + 400] {
            for (m0, month) in MONTHS.iter().enumerate() {
                assert_eq!(
                    days_from_sunday(year, month, 1),
                    days_from_sunday(year - 400, month, 1),
                    "{} {}",
                    year,
                    m0 + 1
                );
                assert!(first_weekday_offset(month, year, Weekday::Mon) < 7);
            }
        }
    }

    #[test]
    fn month_index_ordering() {
        let a = MonthIndex::new(Month::December, 2025);
        let b = MonthIndex::new(Month::January, 2026);
        assert!(a < b);
        assert!(b.next() > b);
    }

    #[test]
    fn parse_month_index() {
        assert_eq!(
            "2026-2".parse::<MonthIndex>().unwrap(),
            MonthIndex::new(Month::February, 2026)
        );
        assert!("2026-13".parse::<MonthIndex>().is_err());
        assert!("2026-02".parse::<MonthIndex>().is_err());
        assert!("2026".parse::<MonthIndex>().is_err());

        for malformed in ["2026-02", "2026", "Feb 2026", "2026-13"] {
            let err = malformed.parse::<MonthIndex>().unwrap_err();
            assert!(matches!(err.kind, ErrorKind::MonthParse), "{}", malformed);
        }
    }

    #[test]
    fn parse_date_keys() {
        let key: DateKey = "2026-2-14".parse().unwrap();
        assert_eq!((key.year(), key.month(), key.day()), (2026, 2, 14));
        assert_eq!(key.to_string(), "2026-2-14");

        assert!("2028-2-29".parse::<DateKey>().is_ok());
    }

    #[test]
    fn reject_malformed_date_keys() {
        assert!("2026-02-14".parse::<DateKey>().is_err());
        assert!("2026-2-30".parse::<DateKey>().is_err());
        assert!("2026-2-0".parse::<DateKey>().is_err());
        assert!("2026-0-1".parse::<DateKey>().is_err());
        assert!("2026-2-14 ".parse::<DateKey>().is_err());
        assert!("14.2.2026".parse::<DateKey>().is_err());
    }

    #[test]
    #[should_panic]
    fn date_key_rejects_day_out_of_range() {
        DateKey::new(2026, Month::February, 29);
    }

    #[test]
    fn date_key_matches_dates() {
        let key = DateKey::new(2026, Month::February, 14);
        assert!(key.matches(&NaiveDate::from_ymd_opt(2026, 2, 14).unwrap()));
        assert!(!key.matches(&NaiveDate::from_ymd_opt(2027, 2, 14).unwrap()));
        assert_eq!(DateKey::from(NaiveDate::from_ymd_opt(2026, 2, 14).unwrap()), key);
    }
}
