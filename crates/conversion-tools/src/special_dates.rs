//! Named holidays resolved to their next occurrence.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};

/// Holidays the resolver recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialDate {
    Christmas,
    NewYear,
    Halloween,
    Valentines,
    Thanksgiving,
}

impl SpecialDate {
    /// Match a holiday name: case-insensitive, apostrophes and a trailing
    /// "day" ignored.
    pub fn from_name(name: &str) -> Option<Self> {
        let key = name.trim().to_lowercase().replace(['\'', '’'], "");
        let key = key.strip_suffix(" day").unwrap_or(&key).trim();
        match key {
            "christmas" | "xmas" => Some(SpecialDate::Christmas),
            "new year" | "new years" => Some(SpecialDate::NewYear),
            "halloween" => Some(SpecialDate::Halloween),
            "valentine" | "valentines" => Some(SpecialDate::Valentines),
            "thanksgiving" => Some(SpecialDate::Thanksgiving),
            _ => None,
        }
    }

    /// This holiday's date in `year`.
    pub fn in_year(self, year: i32) -> Option<NaiveDate> {
        match self {
            SpecialDate::Christmas => NaiveDate::from_ymd_opt(year, 12, 25),
            SpecialDate::NewYear => NaiveDate::from_ymd_opt(year, 1, 1),
            SpecialDate::Halloween => NaiveDate::from_ymd_opt(year, 10, 31),
            SpecialDate::Valentines => NaiveDate::from_ymd_opt(year, 2, 14),
            SpecialDate::Thanksgiving => fourth_thursday_of_november(year),
        }
    }

    /// Next occurrence relative to `now`.
    ///
    /// New Year is always January 1 of next year. Other holidays use this
    /// year's date unless its midnight is already behind `now`, in which case
    /// the rule is re-run for exactly one year later.
    pub fn next_occurrence(self, now: NaiveDateTime) -> Option<NaiveDate> {
        let year = now.year();
        if self == SpecialDate::NewYear {
            return self.in_year(year + 1);
        }
        let this_year = self.in_year(year)?;
        if this_year.and_hms_opt(0, 0, 0)? < now {
            self.in_year(year + 1)
        } else {
            Some(this_year)
        }
    }
}

/// US Thanksgiving: locate November's first Thursday, then add three weeks.
fn fourth_thursday_of_november(year: i32) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, 11, 1)?;
    let weekday = first.weekday().num_days_from_sunday();
    let offset = (4 + 7 - weekday) % 7;
    NaiveDate::from_ymd_opt(year, 11, 1 + offset + 21)
}

/// Resolve a holiday name against the local clock.
pub fn resolve_special_date(name: &str) -> Option<NaiveDate> {
    resolve_special_date_at(name, Local::now().naive_local())
}

/// Resolve a holiday name against an explicit `now`.
pub fn resolve_special_date_at(name: &str, now: NaiveDateTime) -> Option<NaiveDate> {
    SpecialDate::from_name(name)?.next_occurrence(now)
}
