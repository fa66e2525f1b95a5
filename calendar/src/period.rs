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
use chrono::{Datelike, NaiveDateTime};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The time span covered by a simulation.
///
/// Unlike EnergyPlus run periods, the start and the stop carry a year, which
/// is the reference year used when reading results back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Period {
    /// First instant of the simulation
    start: NaiveDateTime,

    /// Last instant of the simulation
    stop: NaiveDateTime,
}

impl Period {
    /// Creates a new `Period`, checking that `start` comes before `stop`
    ///
    /// ```
    /// use calendar::Period;
    /// use chrono::NaiveDate;
    ///
    /// let start = NaiveDate::from_ymd_opt(2009, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    /// let stop = NaiveDate::from_ymd_opt(2009, 12, 31).unwrap().and_hms_opt(23, 0, 0).unwrap();
    ///
    /// assert!(Period::new(start, stop).is_ok());
    /// assert!(Period::new(stop, start).is_err());
    /// ```
    pub fn new(start: NaiveDateTime, stop: NaiveDateTime) -> Result<Self, CalendarError> {
        if start >= stop {
            return Err(CalendarError::InvalidPeriod { start, stop });
        }
        Ok(Self { start, stop })
    }

    /// Borrows the start of the period
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Borrows the end of the period
    pub fn stop(&self) -> NaiveDateTime {
        self.stop
    }

    /// The reference year (i.e., the year of the start)
    pub fn year(&self) -> i32 {
        self.start.year()
    }

    /// The English name of the week day on which the period starts
    /// (e.g., `"Thursday"`)
    pub fn start_weekday_name(&self) -> String {
        self.start.format("%A").to_string()
    }

    /// Number of calendar days touched by the period, counting both ends
    pub fn n_days(&self) -> i64 {
        (self.stop.date() - self.start.date()).num_days() + 1
    }

    /// Checks whether `date` falls within the period (both ends included)
    pub fn contains(&self, date: NaiveDateTime) -> bool {
        date >= self.start && date <= self.stop
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_new() {
        let p = Period::new(dt(2009, 1, 1, 0), dt(2009, 12, 31, 23)).unwrap();
        assert_eq!(p.year(), 2009);
        assert_eq!(p.start(), dt(2009, 1, 1, 0));
        assert_eq!(p.stop(), dt(2009, 12, 31, 23));

        let e = Period::new(dt(2009, 1, 1, 0), dt(2009, 1, 1, 0));
        assert!(matches!(e, Err(CalendarError::InvalidPeriod { .. })));
    }

    #[test]
    fn test_weekday() {
        // January 1st, 2009, was a Thursday
        let p = Period::new(dt(2009, 1, 1, 0), dt(2009, 1, 7, 23)).unwrap();
        assert_eq!(p.start_weekday_name(), "Thursday");
    }

    #[test]
    fn test_n_days() {
        let p = Period::new(dt(2009, 1, 1, 0), dt(2009, 12, 31, 23)).unwrap();
        assert_eq!(p.n_days(), 365);

        let p = Period::new(dt(2012, 1, 1, 0), dt(2012, 12, 31, 23)).unwrap();
        assert_eq!(p.n_days(), 366);

        let p = Period::new(dt(2009, 3, 1, 0), dt(2009, 3, 1, 23)).unwrap();
        assert_eq!(p.n_days(), 1);
    }

    #[test]
    fn test_contains() {
        let p = Period::new(dt(2009, 3, 1, 0), dt(2009, 3, 10, 0)).unwrap();
        assert!(p.contains(dt(2009, 3, 1, 0)));
        assert!(p.contains(dt(2009, 3, 5, 12)));
        assert!(p.contains(dt(2009, 3, 10, 0)));
        assert!(!p.contains(dt(2009, 3, 10, 1)));
        assert!(!p.contains(dt(2008, 3, 5, 0)));
    }
}
