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

use crate::error::ModelError;
use crate::Float;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The value of a single field in an IDF object.
///
/// Values read from IDF files are kept as written (i.e., as `Text`),
/// while values set through the API keep the type they were given. In
/// both cases, [`FieldValue::as_number`] returns the numerical
/// interpretation of the field, if there is one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum FieldValue {
    /// A number
    Number(Float),

    /// Any text, including numbers as written in an IDF file
    Text(String),

    /// A field left blank
    #[default]
    Empty,
}

impl FieldValue {
    /// Builds a value from a piece of IDF text. Blank text becomes
    /// [`FieldValue::Empty`]
    pub fn from_idf<S: AsRef<str>>(text: S) -> Self {
        let text = text.as_ref().trim();
        if text.is_empty() {
            FieldValue::Empty
        } else {
            FieldValue::Text(text.to_string())
        }
    }

    /// Checks whether the field was left blank
    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Empty)
    }

    /// Gets the numerical value of the field, parsing text if needed
    ///
    /// ```
    /// use model::FieldValue;
    ///
    /// assert_eq!(FieldValue::from(2.5).as_number(), Some(2.5));
    /// assert_eq!(FieldValue::from_idf(" 12 ").as_number(), Some(12.));
    /// assert_eq!(FieldValue::from("Zone 1").as_number(), None);
    /// assert_eq!(FieldValue::Empty.as_number(), None);
    /// ```
    pub fn as_number(&self) -> Option<Float> {
        match self {
            FieldValue::Number(v) => Some(*v),
            FieldValue::Text(t) => t.trim().parse::<Float>().ok().filter(|v| v.is_finite()),
            FieldValue::Empty => None,
        }
    }

    /// Gets the value as text, if it is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Checks that the value can be written into an IDF file and read
    /// back unchanged. Text cannot contain separators, comments or line
    /// breaks, and numbers must be finite.
    ///
    /// ```
    /// use model::FieldValue;
    ///
    /// assert!(FieldValue::from("Until: 24:00").check_writable().is_ok());
    /// assert!(FieldValue::from("a,b; Zone, Ghost").check_writable().is_err());
    /// assert!(FieldValue::from(f64::NAN as model::Float).check_writable().is_err());
    /// ```
    pub fn check_writable(&self) -> Result<(), ModelError> {
        match self {
            FieldValue::Number(v) if !v.is_finite() => Err(ModelError::Value(format!(
                "Cannot write the number '{}' into an IDF file",
                v
            ))),
            FieldValue::Text(t) if t.contains([',', ';', '!', '\n', '\r']) => {
                Err(ModelError::Value(format!(
                    "Cannot write '{}' into an IDF file: it contains a separator, a comment or a line break",
                    t
                )))
            }
            _ => Ok(()),
        }
    }

    /// Compares the text representation of both values, ignoring case
    pub fn eq_ignore_case(&self, other: &str) -> bool {
        self.to_string().eq_ignore_ascii_case(other.trim())
    }
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Number(v) => write!(f, "{}", v),
            FieldValue::Text(t) => write!(f, "{}", t),
            FieldValue::Empty => Ok(()),
        }
    }
}

impl From<Float> for FieldValue {
    fn from(v: Float) -> Self {
        FieldValue::Number(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Number(v as Float)
    }
}

impl From<u32> for FieldValue {
    fn from(v: u32) -> Self {
        FieldValue::Number(v as Float)
    }
}

impl From<usize> for FieldValue {
    fn from(v: usize) -> Self {
        FieldValue::Number(v as Float)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl From<&String> for FieldValue {
    fn from(v: &String) -> Self {
        FieldValue::Text(v.clone())
    }
}

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(FieldValue::from(1.0).to_string(), "1");
        assert_eq!(FieldValue::from(0.7).to_string(), "0.7");
        assert_eq!(FieldValue::from("AirChanges/Hour").to_string(), "AirChanges/Hour");
        assert_eq!(FieldValue::Empty.to_string(), "");
    }

    #[test]
    fn test_from_idf() {
        assert_eq!(FieldValue::from_idf("   "), FieldValue::Empty);
        assert_eq!(
            FieldValue::from_idf(" Block1:Zone1 "),
            FieldValue::Text("Block1:Zone1".to_string())
        );
    }

    #[test]
    fn test_as_number() {
        assert_eq!(FieldValue::from("nan").as_number(), None);
        assert_eq!(FieldValue::from("autosize").as_number(), None);
        assert_eq!(FieldValue::from("1e3").as_number(), Some(1000.));
    }

    #[test]
    fn test_check_writable() {
        assert!(FieldValue::Empty.check_writable().is_ok());
        assert!(FieldValue::from(-60.).check_writable().is_ok());
        assert!(FieldValue::from("Block1:Zone1").check_writable().is_ok());
        assert!(FieldValue::from("a,b").check_writable().is_err());
        assert!(FieldValue::from("end;").check_writable().is_err());
        assert!(FieldValue::from("x ! comment").check_writable().is_err());
        assert!(FieldValue::from("two\nlines").check_writable().is_err());
        assert!(FieldValue::Number(Float::INFINITY).check_writable().is_err());
    }

    #[test]
    fn test_deserialize() {
        let v: Vec<FieldValue> = serde_json::from_str(r#"[1.5, "Watts/Area", null]"#).unwrap();
        assert_eq!(
            v,
            vec![
                FieldValue::Number(1.5),
                FieldValue::Text("Watts/Area".to_string()),
                FieldValue::Empty
            ]
        );
    }
}
