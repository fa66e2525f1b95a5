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

use crate::simulate::RunReport;
use calendar::CalendarError;
use model::ModelError;
use results::ResultsError;
use schedule::ScheduleError;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong when preparing, running or
/// post-processing simulations
#[derive(Debug, Error)]
pub enum Error {
    /// Errors in the building model
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Errors reading or selecting results
    #[error(transparent)]
    Results(#[from] ResultsError),

    /// Errors adding schedules
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    /// Errors handling dates
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    /// The simulation engine failed
    #[error("Simulation in '{}' failed: {msg}", .dir.display())]
    Engine {
        /// The directory of the simulation
        dir: PathBuf,
        /// What happened
        msg: String,
    },

    /// A file or directory could not be accessed
    #[error("Could not access '{}': {source}", .path.display())]
    Io {
        /// The file or directory
        path: PathBuf,
        /// The underlying error
        #[source]
        source: std::io::Error,
    },

    /// The configuration could not be understood
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A system is not in the building
    #[error("There is no system called '{0}'")]
    SystemNotFound(String),

    /// Two systems would have the same name
    #[error("There is already a system called '{0}'")]
    DuplicateSystem(String),

    /// A system does not have such a parameter
    #[error("System '{system}' has no parameter called '{parameter}'")]
    UnknownParameter {
        /// The system
        system: String,
        /// The parameter
        parameter: String,
    },

    /// A batch of simulations failed and the run stopped. Batches
    /// before it kept their results.
    #[error("Batch {batch} failed: {source}")]
    BatchFailed {
        /// The position of the batch
        batch: usize,
        /// The state every batch was left in
        report: RunReport,
        /// What went wrong
        #[source]
        source: Box<Error>,
    },

    /// Results were needed before simulating
    #[error("No simulation results available for this building")]
    NoResults,

    /// Bad input
    #[error("{0}")]
    Value(String),
}

impl Error {
    pub(crate) fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
