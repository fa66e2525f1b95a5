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

use std::path::PathBuf;
use thiserror::Error;

/// The errors produced when reading, querying or editing a [`crate::Model`]
#[derive(Debug, Error)]
pub enum ModelError {
    /// The object type is neither in the schema nor in the model
    #[error("Unknown object type '{0}'")]
    UnknownObjectType(String),

    /// There is no object of this type with this name
    #[error("Could not find {object_type} called '{name}'")]
    ObjectNotFound {
        /// The type of object that was being searched
        object_type: String,
        /// The name that was not found
        name: String,
    },

    /// The object type has no such field
    #[error("{object_type} objects have no field called '{field}'")]
    UnknownField {
        /// The type of object
        object_type: String,
        /// The requested field
        field: String,
    },

    /// An object of this type and name already exists
    #[error("There is already a {object_type} called '{name}'")]
    DuplicateName {
        /// The type of object
        object_type: String,
        /// The repeated name
        name: String,
    },

    /// Objects of this type do not have a name, so they cannot be
    /// selected by name
    #[error("{0} objects have no name, so they cannot be selected by name")]
    Unnamed(String),

    /// A list of values does not match the list of names it is applied to
    #[error("Expected {expected} values (one per selected object) but found {found}")]
    LengthMismatch {
        /// Number of objects selected
        expected: usize,
        /// Number of values given
        found: usize,
    },

    /// A value could not be used (e.g., a text where a number was expected)
    #[error("{0}")]
    Value(String),

    /// The IDF (or IDD) text is malformed
    #[error("Syntax error [in line {line}]: {msg}")]
    Syntax {
        /// The line where the error was found
        line: usize,
        /// What went wrong
        msg: String,
    },

    /// A file could not be read or written
    #[error("Could not access file '{path}': {source}")]
    Io {
        /// The file
        path: PathBuf,
        /// The underlying error
        #[source]
        source: std::io::Error,
    },
}
