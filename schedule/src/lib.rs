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

//! Schedules added to EnergyPlus models before simulating them: hourly
//! series written into `Schedule:File` objects, and a small library of
//! `Schedule:Compact` used by the systems (e.g., always on, or setpoints
//! that disable heating or cooling).

/// Errors produced by this crate
mod error;
pub use crate::error::ScheduleError;

/// Hourly schedules
mod hourly;
pub use crate::hourly::{
    add_hourly_schedules, schedule_file_path, HourlySchedule, ScheduleFileOptions, ScheduleType,
    HOURS_IN_LEAP_YEAR, HOURS_IN_YEAR,
};

/// Schedules that can be copied into any model
pub mod library;
