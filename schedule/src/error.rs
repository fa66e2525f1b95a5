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

use model::ModelError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced when adding schedules to a model
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// Hourly schedules must have one value per hour of the year
    #[error("Schedule '{name}' has {found} values, but hourly schedules need 8760 or 8784")]
    WrongLength {
        /// The schedule
        name: String,
        /// Number of values found
        found: usize,
    },

    /// Not all schedules have the same length as the index
    #[error("Schedule '{name}' has {found} values, expected {expected}")]
    InconsistentLength {
        /// The schedule
        name: String,
        /// Number of values expected
        expected: usize,
        /// Number of values found
        found: usize,
    },

    /// The schedule type is not known by EnergyPlus
    #[error("'{0}' is not a valid schedule type")]
    UnknownType(String),

    /// A `Schedule:File` with this name exists already
    #[error("There is already a Schedule:File called '{0}'")]
    AlreadyExists(String),

    /// No schedule was given
    #[error("No schedules were given")]
    Empty,

    /// The schedule could not be written to the model
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The schedule file could not be written
    #[error("Could not write schedule file '{path}': {source}")]
    Io {
        /// The file
        path: PathBuf,
        /// The underlying error
        #[source]
        source: std::io::Error,
    },

    /// The schedule file could not be written
    #[error(transparent)]
    Csv(#[from] csv::Error),
}
