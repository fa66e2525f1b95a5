/*
MIT License
Copyright (c) 2021 Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

use crate::error::CalendarError;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::str::FromStr;

/// A timestamp as written by EnergyPlus in its `eplusout.csv` files
///
/// These have no year and use a 1-24 clock, meaning that the
/// last timestep of a day is reported as `24:00:00`. Rows reporting daily
/// values contain only the `MM/DD` part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EPlusTimestamp {
    /// Month, 1 to 12
    pub month: u32,
    /// Day of month, 1 to 31
    pub day: u32,
    /// Hour, 0 to 24
    pub hour: u32,
    /// Minute, 0 to 59
    pub minute: u32,
    /// Second, 0 to 59
    pub second: u32,
}

fn malformed(text: &str, reason: &str) -> CalendarError {
    CalendarError::MalformedTimestamp {
        text: text.to_string(),
        reason: reason.to_string(),
    }
}

/// Parses a numeric piece of a timestamp, tolerating padding
fn parse_piece(text: &str, piece: &str, what: &str) -> Result<u32, CalendarError> {
    piece
        .trim()
        .parse::<u32>()
        .map_err(|_| malformed(text, &format!("could not read {} from '{}'", what, piece)))
}

impl FromStr for EPlusTimestamp {
    type Err = CalendarError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(malformed(text, "empty timestamp"));
        }

        // "MM/DD  HH:MM:SS" -> ["MM/DD", "HH:MM:SS"]
        let mut parts = trimmed.split_whitespace();
        let date = parts.next().ok_or_else(|| malformed(text, "no date"))?;
        let time = parts.next();
        if parts.next().is_some() {
            return Err(malformed(text, "too many elements"));
        }

        let (month, day) = date
            .split_once('/')
            .ok_or_else(|| malformed(text, "date should look like MM/DD"))?;
        let month = parse_piece(text, month, "month")?;
        let day = parse_piece(text, day, "day")?;
        if !(1..=12).contains(&month) {
            return Err(malformed(text, "month out of range"));
        }
        if !(1..=31).contains(&day) {
            return Err(malformed(text, "day out of range"));
        }

        let (hour, minute, second) = match time {
            // Daily values
            None => (0, 0, 0),
            Some(time) => {
                let mut pieces = time.split(':');
                let hour = pieces
                    .next()
                    .ok_or_else(|| malformed(text, "no hour"))?;
                let hour = parse_piece(text, hour, "hour")?;
                let minute = match pieces.next() {
                    Some(m) => parse_piece(text, m, "minute")?,
                    None => 0,
                };
                let second = match pieces.next() {
                    Some(s) => parse_piece(text, s, "second")?,
                    None => 0,
                };
                if pieces.next().is_some() {
                    return Err(malformed(text, "time should look like HH:MM:SS"));
                }
                (hour, minute, second)
            }
        };

        if hour > 24 || minute > 59 || second > 59 {
            return Err(malformed(text, "time out of range"));
        }
        if hour == 24 && (minute > 0 || second > 0) {
            return Err(malformed(text, "nothing can happen after 24:00:00"));
        }

        Ok(Self {
            month,
            day,
            hour,
            minute,
            second,
        })
    }
}

impl EPlusTimestamp {
    /// Places this timestamp in `year`.
    ///
    /// A `24:00:00` timestamp is the midnight that starts the following
    /// day, so `12/31 24:00:00` in 2009 becomes `2010-01-01 00:00:00`.
    pub fn to_datetime(&self, year: i32) -> Result<NaiveDateTime, CalendarError> {
        let date = NaiveDate::from_ymd_opt(year, self.month, self.day).ok_or(
            CalendarError::InvalidDate {
                year,
                month: self.month,
                day: self.day,
            },
        )?;

        let (date, hour) = if self.hour == 24 {
            (date + Duration::days(1), 0)
        } else {
            (date, self.hour)
        };

        date.and_hms_opt(hour, self.minute, self.second)
            .ok_or_else(|| malformed(&format!("{:?}", self), "invalid time"))
    }

    /// Checks whether this timestamp comes before `other` within the
    /// same year
    pub fn is_before(&self, other: &Self) -> bool {
        (self.month, self.day, self.hour, self.minute, self.second)
            < (other.month, other.day, other.hour, other.minute, other.second)
    }
}

/// Parses an EnergyPlus timestamp and places it in `year`.
///
/// `24:00:00` is understood as `00:00:00` of the next day.
pub fn parse_eplus_timestamp(text: &str, year: i32) -> Result<NaiveDateTime, CalendarError> {
    let stamp = EPlusTimestamp::from_str(text)?;
    stamp.to_datetime(year)
}
