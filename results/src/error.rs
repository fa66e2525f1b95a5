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

use calendar::CalendarError;
use chrono::NaiveDateTime;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced when reading, selecting or combining results
#[derive(Debug, Error)]
pub enum ResultsError {
    /// The simulation did not produce its result file
    #[error("EnergyPlus result file not found: '{}'", .0.display())]
    ResultFileNotFound(PathBuf),

    /// The result file could not be read
    #[error("Could not read result file '{}': {source}", .path.display())]
    Csv {
        /// The file
        path: PathBuf,
        /// The underlying error
        #[source]
        source: csv::Error,
    },

    /// A row of a result file could not be understood
    #[error("Error in '{}' [line {line}]: {msg}", .path.display())]
    MalformedRow {
        /// The file
        path: PathBuf,
        /// The line
        line: usize,
        /// What went wrong
        msg: String,
    },

    /// A timestamp could not be understood
    #[error(transparent)]
    Timestamp(#[from] CalendarError),

    /// Tables must be indexed by strictly increasing timestamps
    #[error("The index must be strictly increasing, but {found} comes after {previous}")]
    NonMonotonicIndex {
        /// The timestamp before
        previous: NaiveDateTime,
        /// The offending timestamp
        found: NaiveDateTime,
    },

    /// A column does not have one value per row of the table
    #[error("Column '{column}' has {found} values, but the table has {expected} rows")]
    LengthMismatch {
        /// The column
        column: String,
        /// Rows in the table
        expected: usize,
        /// Values in the column
        found: usize,
    },

    /// Two columns would have the same name
    #[error("There is already a column called '{0}'")]
    DuplicateColumn(String),

    /// Tables with different indices cannot be combined
    #[error("Cannot combine tables with different indices")]
    IndexMismatch,

    /// The selection selected nothing, and that was not allowed
    #[error("No column matches variables {variables:?} for keys {keys:?}")]
    EmptySelection {
        /// The requested variables
        variables: Vec<String>,
        /// The requested keys
        keys: Vec<String>,
    },

    /// Bad input
    #[error("{0}")]
    Value(String),

    /// A regular expression could not be built
    #[error(transparent)]
    Regex(#[from] regex::Error),

    /// Results could not be written
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
