use chrono::{Month, Weekday};
use phf::phf_map;
use serde_with::DeserializeFromStr;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, ErrorKind, Result};

/// Fixed display tables. Day names are ordered starting at `week_start`.
#[derive(Debug, PartialEq, Eq)]
pub struct LocaleTable {
    pub code: &'static str,
    pub day_names: [&'static str; 7],
    pub month_names: [&'static str; 12],
    pub today_suffix: &'static str,
    pub week_start: Weekday,
}

pub const INDONESIAN: LocaleTable = LocaleTable {
    code: "id",
    day_names: ["Min", "Sen", "Sel", "Rab", "Kam", "Jum", "Sab"],
    month_names: [
        "Januari",
        "Februari",
        "Maret",
        "April",
        "Mei",
        "Juni",
        "Juli",
        "Agustus",
        "September",
        "Oktober",
        "November",
        "Desember",
    ],
    today_suffix: "(hari ini)",
    week_start: Weekday::Sun,
};

pub const ENGLISH: LocaleTable = LocaleTable {
    code: "en",
    day_names: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
    month_names: [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ],
    today_suffix: "(today)",
    week_start: Weekday::Sun,
};

pub const GERMAN: LocaleTable = LocaleTable {
    code: "de",
    day_names: ["Mo", "Di", "Mi", "Do", "Fr", "Sa", "So"],
    month_names: [
        "Januar",
        "Februar",
        "März",
        "April",
        "Mai",
        "Juni",
        "Juli",
        "August",
        "September",
        "Oktober",
        "November",
        "Dezember",
    ],
    today_suffix: "(heute)",
    week_start: Weekday::Mon,
};

static LOCALES: phf::Map<&'static str, &'static LocaleTable> = phf_map! {
    "id" => &INDONESIAN,
    "en" => &ENGLISH,
    "de" => &GERMAN,
};

#[derive(Clone, Copy, DeserializeFromStr)]
pub struct Locale(&'static LocaleTable);

impl Locale {
    pub fn table(&self) -> &'static LocaleTable {
        self.0
    }

    pub fn code(&self) -> &'static str {
        self.0.code
    }

    pub fn day_names(&self) -> &'static [&'static str; 7] {
        &self.0.day_names
    }

    pub fn month_name(&self, month: &Month) -> &'static str {
        self.0.month_names[month.number_from_month() as usize - 1]
    }

    pub fn today_suffix(&self) -> &'static str {
        self.0.today_suffix
    }

    pub fn week_start(&self) -> Weekday {
        self.0.week_start
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale(&INDONESIAN)
    }
}

impl PartialEq for Locale {
    fn eq(&self, other: &Self) -> bool {
        self.0.code == other.0.code
    }
}

impl fmt::Debug for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Locale").field(&self.0.code).finish()
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        LOCALES
            .get(s)
            .map(|table| Locale(*table))
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::UnknownLocale,
                    &format!("'{}' (known: id, en, de)", s),
                )
            })
    }
}
