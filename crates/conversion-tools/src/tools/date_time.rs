//! Date arithmetic, weekday lookup and timezone conversion.
//!
//! Every operation takes its reference instant explicitly; only the
//! [`Tool`] implementation reads the system clock.

use std::sync::OnceLock;

use async_trait::async_trait;
use chrono::{
    DateTime, Datelike, Days, FixedOffset, Local, Months, NaiveDate, NaiveDateTime, NaiveTime,
    TimeZone, Utc,
};
use chrono_tz::Tz;
use regex::Regex;
use tracing::debug;

use crate::error::ToolError;
use crate::extract::{extract_date_time_intent, ConversionIntent, DateTimeIntent, Direction, Domain};
use crate::normalize::normalize_timezone;
use crate::result::{ConversionResult, DayOperation, ResultDetails};
use crate::special_dates::resolve_special_date_at;
use crate::tool::{wrong_domain, Tool};

const DATE_FORMAT: &str = "%A, %B %-d, %Y";

/// Unit for [`DateTimeCalculator::calculate_difference`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifferenceUnit {
    Days,
    Weeks,
    Months,
    Years,
    Hours,
    Minutes,
    Seconds,
}

impl DifferenceUnit {
    pub fn parse(unit: &str) -> Result<Self, ToolError> {
        match unit.trim().to_lowercase().as_str() {
            "d" | "day" | "days" => Ok(Self::Days),
            "w" | "wk" | "week" | "weeks" => Ok(Self::Weeks),
            "mo" | "month" | "months" => Ok(Self::Months),
            "y" | "yr" | "year" | "years" => Ok(Self::Years),
            "h" | "hr" | "hour" | "hours" => Ok(Self::Hours),
            "min" | "minute" | "minutes" => Ok(Self::Minutes),
            "s" | "sec" | "second" | "seconds" => Ok(Self::Seconds),
            other => Err(ToolError::UnknownDifferenceUnit(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Days => "days",
            Self::Weeks => "weeks",
            Self::Months => "months",
            Self::Years => "years",
            Self::Hours => "hours",
            Self::Minutes => "minutes",
            Self::Seconds => "seconds",
        }
    }
}

/// Shift a date by whole days.
pub fn shift_date(date: NaiveDate, days: i64, op: DayOperation) -> Result<NaiveDate, ToolError> {
    let signed = match op {
        DayOperation::Add => days,
        DayOperation::Subtract => days.checked_neg().ok_or(ToolError::DateOutOfRange)?,
    };
    let shifted = if signed >= 0 {
        date.checked_add_days(Days::new(signed.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(signed.unsigned_abs()))
    };
    shifted.ok_or(ToolError::DateOutOfRange)
}

/// Whole calendar months from `from` to `to`, truncated toward zero.
fn months_between(from: NaiveDateTime, to: NaiveDateTime) -> Result<i64, ToolError> {
    let mut months =
        i64::from(to.year() - from.year()) * 12 + i64::from(to.month()) - i64::from(from.month());
    let step = |m: i64| -> Result<NaiveDateTime, ToolError> {
        let n = u32::try_from(m.unsigned_abs()).map_err(|_| ToolError::DateOutOfRange)?;
        let shifted = if m >= 0 {
            from.checked_add_months(Months::new(n))
        } else {
            from.checked_sub_months(Months::new(n))
        };
        shifted.ok_or(ToolError::DateOutOfRange)
    };
    if to >= from && step(months)? > to {
        months -= 1;
    } else if to < from && step(months)? < to {
        months += 1;
    }
    Ok(months)
}

/// Signed `to - from` in `unit`, truncated toward zero.
pub fn signed_difference(
    from: NaiveDateTime,
    to: NaiveDateTime,
    unit: DifferenceUnit,
) -> Result<i64, ToolError> {
    let delta = to - from;
    Ok(match unit {
        DifferenceUnit::Days => delta.num_days(),
        DifferenceUnit::Weeks => delta.num_weeks(),
        DifferenceUnit::Hours => delta.num_hours(),
        DifferenceUnit::Minutes => delta.num_minutes(),
        DifferenceUnit::Seconds => delta.num_seconds(),
        DifferenceUnit::Months => months_between(from, to)?,
        DifferenceUnit::Years => months_between(from, to)? / 12,
    })
}

/// Parse a clock expression: `3pm`, `3:30 PM`, `12 am`, `15:00`.
///
/// With AM/PM the hour must be 1-12: 12 AM is midnight, PM adds 12 below
/// noon.
pub fn parse_clock(expr: &str) -> Option<NaiveTime> {
    static CLOCK: OnceLock<Regex> = OnceLock::new();
    let re = CLOCK.get_or_init(|| {
        Regex::new(r"(?i)^(\d{1,2})(?::(\d{2}))?\s*(am|pm|a\.m\.|p\.m\.)?$").expect("valid clock pattern")
    });
    let caps = re.captures(expr.trim())?;
    let mut hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps.get(2).map_or(Some(0), |m| m.as_str().parse().ok())?;
    if let Some(meridiem) = caps.get(3) {
        if !(1..=12).contains(&hour) {
            return None;
        }
        let pm = meridiem.as_str().to_lowercase().starts_with('p');
        if !pm && hour == 12 {
            hour = 0;
        } else if pm && hour < 12 {
            hour += 12;
        }
    }
    NaiveTime::from_hms_opt(hour, minute, 0)
}

fn month_from_name(name: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
        "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
    ];
    let lower = name.to_lowercase();
    let prefix = lower.get(..3)?;
    MONTHS
        .iter()
        .position(|m| *m == prefix)
        .and_then(|i| u32::try_from(i + 1).ok())
}

struct DatePatterns {
    iso: Regex,
    slash: Regex,
    month_day: Regex,
    day_month: Regex,
}

fn date_patterns() -> &'static DatePatterns {
    static PATTERNS: OnceLock<DatePatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        const MONTH: &str = r"(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)";
        DatePatterns {
            // 2026-12-25
            iso: Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").expect("valid iso pattern"),
            // 12/25/2026, 12/25
            slash: Regex::new(r"^(\d{1,2})/(\d{1,2})(?:/(\d{4}))?$").expect("valid slash pattern"),
            // December 25th, 2026
            month_day: Regex::new(&format!(
                r"(?i)^{MONTH}\.?\s+(\d{{1,2}})(?:st|nd|rd|th)?(?:,?\s+(\d{{4}}))?$"
            ))
            .expect("valid month-day pattern"),
            // 25 December 2026, 25th of dec
            day_month: Regex::new(&format!(
                r"(?i)^(\d{{1,2}})(?:st|nd|rd|th)?\s+(?:of\s+)?{MONTH}\.?(?:,?\s+(\d{{4}}))?$"
            ))
            .expect("valid day-month pattern"),
        }
    })
}

/// Parse a free-form date. A missing year means the year of `today`.
pub fn parse_date_expression(expr: &str, today: NaiveDate) -> Option<NaiveDate> {
    let trimmed = expr.trim().trim_end_matches(['?', '.', '!']).trim();
    let lower = trimmed.to_lowercase();
    let text = lower.strip_prefix("the ").unwrap_or(&lower);

    match text {
        "today" => return Some(today),
        "tomorrow" => return today.succ_opt(),
        "yesterday" => return today.pred_opt(),
        _ => {}
    }

    let patterns = date_patterns();
    let year_or_current = |m: Option<regex::Match<'_>>| -> Option<i32> {
        match m {
            Some(y) => y.as_str().parse().ok(),
            None => Some(today.year()),
        }
    };

    if let Some(c) = patterns.iso.captures(text) {
        return NaiveDate::from_ymd_opt(c[1].parse().ok()?, c[2].parse().ok()?, c[3].parse().ok()?);
    }
    if let Some(c) = patterns.slash.captures(text) {
        let year = year_or_current(c.get(3))?;
        return NaiveDate::from_ymd_opt(year, c[1].parse().ok()?, c[2].parse().ok()?);
    }
    if let Some(c) = patterns.month_day.captures(text) {
        let year = year_or_current(c.get(3))?;
        return NaiveDate::from_ymd_opt(year, month_from_name(&c[1])?, c[2].parse().ok()?);
    }
    if let Some(c) = patterns.day_month.captures(text) {
        let year = year_or_current(c.get(3))?;
        return NaiveDate::from_ymd_opt(year, month_from_name(&c[2])?, c[1].parse().ok()?);
    }
    None
}

/// Resolve a zone alias or IANA name.
pub fn resolve_zone(token: &str) -> Result<Tz, ToolError> {
    normalize_timezone(token)
        .parse::<Tz>()
        .map_err(|_| ToolError::UnknownTimezone(token.trim().to_string()))
}

fn format_zoned(dt: &DateTime<Tz>) -> String {
    format!("{} ({})", dt.format("%-I:%M %p %Z"), dt.timezone().name())
}

/// Format one wall-clock time in both zones.
fn zoned_pair(
    label: &str,
    date_time: NaiveDateTime,
    from_zone: &str,
    to_zone: &str,
) -> Result<(String, String), ToolError> {
    let from_tz = resolve_zone(from_zone)?;
    let to_tz = resolve_zone(to_zone)?;
    // Ambiguous local times (DST fall-back) take the earlier instant.
    let source = from_tz
        .from_local_datetime(&date_time)
        .earliest()
        .ok_or_else(|| ToolError::UnparseableTime(label.to_string()))?;
    let target = source.with_timezone(&to_tz);
    Ok((format_zoned(&source), format_zoned(&target)))
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Date and time calculator and tool.
pub struct DateTimeCalculator;

impl DateTimeCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Add or subtract whole days; the result carries its weekday.
    pub fn add_subtract_days(&self, date: NaiveDate, days: i64, op: DayOperation) -> ConversionResult {
        let details = |result_date: Option<NaiveDate>| ResultDetails::DayShift {
            date,
            days,
            operation: op,
            result_date,
            day_of_week: result_date.map(|d| d.format("%A").to_string()),
        };
        match shift_date(date, days, op) {
            Ok(result) => {
                let verb = match op {
                    DayOperation::Add => "plus",
                    DayOperation::Subtract => "minus",
                };
                let formatted = format!(
                    "{} {} {} days is {}",
                    date.format(DATE_FORMAT),
                    verb,
                    days,
                    result.format(DATE_FORMAT)
                );
                ConversionResult::ok(details(Some(result)), formatted)
            }
            Err(e) => ConversionResult::failed(details(None), e),
        }
    }

    /// Difference `d2 - d1` in `unit`: magnitude plus direction.
    pub fn calculate_difference(
        &self,
        d1: NaiveDateTime,
        d2: NaiveDateTime,
        unit: &str,
    ) -> ConversionResult {
        let outcome = DifferenceUnit::parse(unit)
            .and_then(|u| signed_difference(d1, d2, u).map(|diff| (u, diff)));
        match outcome {
            Ok((u, diff)) => {
                let formatted = format!(
                    "{} {} from {} to {}",
                    diff.abs(),
                    u.as_str(),
                    d1.format("%Y-%m-%d %H:%M"),
                    d2.format("%Y-%m-%d %H:%M")
                );
                ConversionResult::ok(
                    ResultDetails::Difference {
                        from: d1,
                        to: d2,
                        unit: u.as_str().to_string(),
                        difference: Some(diff.abs()),
                        is_in_future: Some(d2 > d1),
                    },
                    formatted,
                )
            }
            Err(e) => ConversionResult::failed(
                ResultDetails::Difference {
                    from: d1,
                    to: d2,
                    unit: unit.to_string(),
                    difference: None,
                    is_in_future: None,
                },
                e,
            ),
        }
    }

    /// Weekday name and index, 0 = Sunday.
    pub fn find_day_of_week(&self, date: NaiveDate) -> ConversionResult {
        let day_name = date.format("%A").to_string();
        let formatted = format!("{} is a {}", date.format("%B %-d, %Y"), day_name);
        ConversionResult::ok(
            ResultDetails::DayOfWeek {
                date,
                day_name,
                day_index: date.weekday().num_days_from_sunday(),
            },
            formatted,
        )
    }

    /// Show the wall-clock time `date_time` in `from_zone` as seen in `to_zone`.
    pub fn convert_timezone(
        &self,
        date_time: NaiveDateTime,
        from_zone: &str,
        to_zone: &str,
    ) -> ConversionResult {
        let label = date_time.format("%Y-%m-%d %H:%M").to_string();
        self.convert_timezone_labelled(&label, date_time, from_zone, to_zone)
    }

    fn convert_timezone_labelled(
        &self,
        label: &str,
        date_time: NaiveDateTime,
        from_zone: &str,
        to_zone: &str,
    ) -> ConversionResult {
        match zoned_pair(label, date_time, from_zone, to_zone) {
            Ok((from_time, to_time)) => {
                let formatted = format!("{} = {}", from_time, to_time);
                ConversionResult::ok(
                    ResultDetails::Timezone {
                        time_expression: label.to_string(),
                        from_zone: normalize_timezone(from_zone),
                        to_zone: normalize_timezone(to_zone),
                        from_time: Some(from_time),
                        to_time: Some(to_time),
                    },
                    formatted,
                )
            }
            Err(e) => ConversionResult::failed(
                ResultDetails::Timezone {
                    time_expression: label.to_string(),
                    from_zone: from_zone.to_string(),
                    to_zone: to_zone.to_string(),
                    from_time: None,
                    to_time: None,
                },
                e,
            ),
        }
    }

    /// Current wall-clock time in a zone.
    pub fn current_time_in(&self, zone: &str, now: DateTime<Utc>) -> ConversionResult {
        match resolve_zone(zone) {
            Ok(tz) => {
                let local = now.with_timezone(&tz);
                let time = format!("{}, {}", local.format(DATE_FORMAT), format_zoned(&local));
                ConversionResult::ok(
                    ResultDetails::CurrentTime {
                        zone: tz.name().to_string(),
                        time: Some(time.clone()),
                    },
                    format!("It is currently {}", time),
                )
            }
            Err(e) => ConversionResult::failed(
                ResultDetails::CurrentTime {
                    zone: zone.to_string(),
                    time: None,
                },
                e,
            ),
        }
    }

    /// Parse and answer a date/time query relative to `now`.
    pub fn handle_date_time_request_at(
        &self,
        query: &str,
        now: DateTime<FixedOffset>,
    ) -> ConversionResult {
        match extract_date_time_intent(query) {
            Some(intent) => self.execute_intent(&intent, now),
            None => ConversionResult::failed(
                ResultDetails::Unparsed {
                    query: query.to_string(),
                },
                format!("Could not understand date/time request: {}", query),
            ),
        }
    }

    /// [`handle_date_time_request_at`](Self::handle_date_time_request_at) against the local clock.
    pub fn handle_date_time_request(&self, query: &str) -> ConversionResult {
        self.handle_date_time_request_at(query, Local::now().fixed_offset())
    }

    /// Execute a parsed intent relative to `now`.
    pub fn execute_intent(&self, intent: &DateTimeIntent, now: DateTime<FixedOffset>) -> ConversionResult {
        debug!(kind = intent.kind(), "Executing date/time intent");
        let today = now.date_naive();
        match intent {
            DateTimeIntent::RelativeDay {
                offset_days,
                direction,
            } => {
                let op = match direction {
                    Direction::Future => DayOperation::Add,
                    Direction::Past => DayOperation::Subtract,
                };
                let mut result = self.add_subtract_days(today, *offset_days, op);
                if let ResultDetails::DayShift {
                    result_date: Some(date),
                    ..
                } = &result.details
                {
                    result.formatted = Some(relative_summary(*offset_days, *direction, *date));
                }
                result
            }
            DateTimeIntent::DaysUntil {
                target_date_expression,
            } => self.days_until(target_date_expression, now.naive_local()),
            DateTimeIntent::TimezoneConvert {
                time_expression,
                from_zone,
                to_zone,
            } => match parse_clock(time_expression) {
                Some(time) => self.convert_timezone_labelled(
                    time_expression,
                    today.and_time(time),
                    from_zone,
                    to_zone,
                ),
                None => ConversionResult::failed(
                    ResultDetails::Timezone {
                        time_expression: time_expression.clone(),
                        from_zone: from_zone.clone(),
                        to_zone: to_zone.clone(),
                        from_time: None,
                        to_time: None,
                    },
                    ToolError::UnparseableTime(time_expression.clone()),
                ),
            },
            DateTimeIntent::CurrentTimeIn { zone } => {
                self.current_time_in(zone, now.with_timezone(&Utc))
            }
        }
    }

    /// Whole days from today to a holiday or date expression.
    fn days_until(&self, target: &str, now: NaiveDateTime) -> ConversionResult {
        let today = now.date();
        let resolved = resolve_special_date_at(target, now)
            .or_else(|| parse_date_expression(target, today));

        let Some(date) = resolved else {
            return ConversionResult::failed(
                ResultDetails::DaysUntil {
                    target: target.to_string(),
                    date: None,
                    days: None,
                    is_in_future: None,
                },
                ToolError::UnparseableDate(target.to_string()),
            );
        };

        match signed_difference(midnight(today), midnight(date), DifferenceUnit::Days) {
            Ok(days) => {
                let when = date.format(DATE_FORMAT);
                let formatted = match days {
                    0 => format!("{} ({}) is today", target, when),
                    d if d > 0 => format!("{} days until {} ({})", d, target, when),
                    d => format!("{} ({}) was {} days ago", target, when, -d),
                };
                ConversionResult::ok(
                    ResultDetails::DaysUntil {
                        target: target.to_string(),
                        date: Some(date),
                        days: Some(days.abs()),
                        is_in_future: Some(days > 0),
                    },
                    formatted,
                )
            }
            Err(e) => ConversionResult::failed(
                ResultDetails::DaysUntil {
                    target: target.to_string(),
                    date: Some(date),
                    days: None,
                    is_in_future: None,
                },
                e,
            ),
        }
    }
}

fn relative_summary(offset: i64, direction: Direction, date: NaiveDate) -> String {
    let when = date.format(DATE_FORMAT);
    match (direction, offset) {
        (_, 0) => format!("Today is {}", when),
        (Direction::Future, 1) => format!("Tomorrow is {}", when),
        (Direction::Past, 1) => format!("Yesterday was {}", when),
        (Direction::Future, n) => format!("{} days from today is {}", n, when),
        (Direction::Past, n) => format!("{} days ago was {}", n, when),
    }
}

impl Default for DateTimeCalculator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for DateTimeCalculator {
    fn name(&self) -> &str {
        "date_time"
    }

    fn description(&self) -> &str {
        "Answers relative-day, days-until, weekday and timezone questions."
    }

    fn domain(&self) -> Domain {
        Domain::DateTime
    }

    async fn calculate(&self, intent: ConversionIntent) -> ConversionResult {
        match intent {
            ConversionIntent::DateTime(dt) => {
                self.execute_intent(&dt, Local::now().fixed_offset())
            }
            other => wrong_domain(self.name(), &other),
        }
    }
}
