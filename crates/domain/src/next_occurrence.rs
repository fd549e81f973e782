use crate::ReminderKind;
use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Timelike, Weekday};
use chrono_tz::Tz;
use std::str::FromStr;
use thiserror::Error;

/// Hour of the day at which review, anniversary and birthday reminders go out
const FIXED_SEND_HOUR: u32 = 9;

#[derive(Error, Debug, PartialEq)]
pub enum InvalidScheduleError {
    #[error("`{0}` is not a valid HH:MM time of day")]
    TimeOfDay(String),
    #[error("`{0}` is not a valid weekday")]
    Weekday(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
}

impl FromStr for TimeOfDay {
    type Err = InvalidScheduleError;

    /// Accepts `HH:MM`, anything after a second `:` is ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || InvalidScheduleError::TimeOfDay(s.to_string());
        let mut parts = s.trim().split(':');
        let hour = parts
            .next()
            .and_then(|h| h.trim().parse::<u32>().ok())
            .ok_or_else(err)?;
        let minute = parts
            .next()
            .and_then(|m| m.trim().parse::<u32>().ok())
            .ok_or_else(err)?;
        if hour > 23 || minute > 59 {
            return Err(err());
        }
        Ok(Self { hour, minute })
    }
}

/// Parses a weekday name, Spanish or English, ignoring case and accents
pub fn parse_weekday(name: &str) -> Result<Weekday, InvalidScheduleError> {
    let normalized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' => 'u',
            c => c,
        })
        .collect();

    let weekday = match normalized.as_str() {
        "domingo" | "sunday" => Weekday::Sun,
        "lunes" | "monday" => Weekday::Mon,
        "martes" | "tuesday" => Weekday::Tue,
        "miercoles" | "wednesday" => Weekday::Wed,
        "jueves" | "thursday" => Weekday::Thu,
        "viernes" | "friday" => Weekday::Fri,
        "sabado" | "saturday" => Weekday::Sat,
        _ => return Err(InvalidScheduleError::Weekday(name.to_string())),
    };
    Ok(weekday)
}

/// Computes when a reminder should go out next, as a timestamp in millis.
///
/// * `Weekly`: next `weekday` at `time`, always strictly after `now`.
/// * `Monthly`: same day of month in the next month at `time`. Days that do
///   not exist in that month overflow into the following one, so Jan 31
///   becomes Mar 3 (or Mar 2 in leap years) and Mar 31 becomes May 1.
/// * `Review`, `Anniversary`, `Birthday`: tomorrow at 09:00.
/// * `OneTime`: `send_at` when given, otherwise `now`.
///
/// Weekly and monthly reminders without a valid time (or weekly ones without
/// a valid weekday) have no next occurrence.
pub fn compute_next(
    kind: ReminderKind,
    weekday: Option<&str>,
    time: Option<&str>,
    send_at: Option<i64>,
    now_millis: i64,
    tz: &Tz,
) -> Option<i64> {
    let now = tz.timestamp_millis_opt(now_millis).single()?;

    let next = match kind {
        ReminderKind::OneTime => return Some(send_at.unwrap_or(now_millis)),
        ReminderKind::Weekly => {
            let time = time?.parse::<TimeOfDay>().ok()?;
            let weekday = parse_weekday(weekday?).ok()?;
            next_weekday(&now, weekday, time)
        }
        ReminderKind::Monthly => {
            let time = time?.parse::<TimeOfDay>().ok()?;
            next_month(&now, time)
        }
        ReminderKind::Review | ReminderKind::Anniversary | ReminderKind::Birthday => {
            let tomorrow = now.date_naive() + Duration::days(1);
            at_local_time(
                tz,
                tomorrow,
                TimeOfDay {
                    hour: FIXED_SEND_HOUR,
                    minute: 0,
                },
            )
        }
    };

    next.map(|dt| dt.timestamp_millis())
}

fn next_weekday(now: &DateTime<Tz>, weekday: Weekday, time: TimeOfDay) -> Option<DateTime<Tz>> {
    let today = now.weekday().num_days_from_sunday() as i64;
    let target = weekday.num_days_from_sunday() as i64;

    let time_passed =
        now.hour() > time.hour || (now.hour() == time.hour && now.minute() >= time.minute);
    let mut days_until = target - today;
    if days_until < 0 || (days_until == 0 && time_passed) {
        days_until += 7;
    }

    at_local_time(
        &now.timezone(),
        now.date_naive() + Duration::days(days_until),
        time,
    )
}

fn next_month(now: &DateTime<Tz>, time: TimeOfDay) -> Option<DateTime<Tz>> {
    let (year, month) = if now.month() == 12 {
        (now.year() + 1, 1)
    } else {
        (now.year(), now.month() + 1)
    };
    let first_of_month = NaiveDate::from_ymd_opt(year, month, 1)?;
    let date = first_of_month + Duration::days(now.day() as i64 - 1);

    at_local_time(&now.timezone(), date, time)
}

// Wall-clock times skipped by a DST jump are moved one hour ahead
fn at_local_time(tz: &Tz, date: NaiveDate, time: TimeOfDay) -> Option<DateTime<Tz>> {
    let naive = date.and_hms_opt(time.hour, time.minute, 0)?;
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
}
