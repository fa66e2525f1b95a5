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

use chrono::NaiveDateTime;
use thiserror::Error;

/// Everything that can go wrong when building dates
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CalendarError {
    /// The text does not look like an EnergyPlus timestamp
    #[error("Malformed EnergyPlus timestamp '{text}': {reason}")]
    MalformedTimestamp {
        /// The text that was being parsed
        text: String,
        /// What was wrong with it
        reason: String,
    },

    /// The timestamp looks fine but the date does not exist
    /// in the reference year (e.g., February 29 in 2009)
    #[error("Date {month:02}/{day:02} does not exist in year {year}")]
    InvalidDate {
        /// The year used as reference
        year: i32,
        /// The month
        month: u32,
        /// The day
        day: u32,
    },

    /// The start of a period is not before its end
    #[error("Inconsistent period: start ({start}) must be before stop ({stop})")]
    InvalidPeriod {
        /// Start of the period
        start: NaiveDateTime,
        /// End of the period
        stop: NaiveDateTime,
    },
}
