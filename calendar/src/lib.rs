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

#![deny(missing_docs)]

//! Calendar utilities for post-processing EnergyPlus results.
//!
//! EnergyPlus reports its timestamps with a 1-24h clock and no year
//! (e.g., `" 01/01  24:00:00"`). This crate turns those into proper
//! `chrono` date-times on a caller-supplied reference year, so that
//! `24:00:00` becomes `00:00:00` of the **next** day (and not `23:00:00`
//! of the same day).
//!
//! It also contains the [`Period`] of a simulation (i.e., when it starts
//! and when it stops).
//!
//! ```
//! use calendar::parse_eplus_timestamp;
//! use chrono::NaiveDate;
//!
//! let d = parse_eplus_timestamp(" 12/31  24:00:00", 2009).unwrap();
//! let expected = NaiveDate::from_ymd_opt(2010, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! assert_eq!(d, expected);
//! ```

/// Errors produced when reading dates
mod error;
pub use crate::error::CalendarError;

/// Parsing of the 1-24h timestamps written by EnergyPlus
mod eplus_timestamp;
pub use crate::eplus_timestamp::{parse_eplus_timestamp, EPlusTimestamp};

/// The start and end of a simulation
mod period;
pub use crate::period::Period;
