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

use crate::field_value::FieldValue;
use crate::Float;
use serde::{Deserialize, Serialize};

/// Selects objects of a certain type by name
///
/// ```
/// use model::Names;
///
/// assert_eq!(Names::from("*"), Names::All);
/// assert_eq!(Names::from("Zone 1"), Names::Only(vec!["Zone 1".to_string()]));
/// assert_eq!(Names::from(vec!["a", "b"]).len(), Some(2));
/// ```
///
/// When deserialized, `"*"` means all objects, while a string or a list of
/// strings selects some of them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "NamesRepr", into = "NamesRepr")]
pub enum Names {
    /// Every object of the type
    #[default]
    All,
    /// Only the objects with these names, in this order
    Only(Vec<String>),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum NamesRepr {
    One(String),
    Many(Vec<String>),
}

impl From<NamesRepr> for Names {
    fn from(r: NamesRepr) -> Self {
        match r {
            NamesRepr::One(s) => Names::from(s),
            NamesRepr::Many(v) => Names::from(v),
        }
    }
}

impl From<Names> for NamesRepr {
    fn from(n: Names) -> Self {
        match n {
            Names::All => NamesRepr::One("*".to_string()),
            Names::Only(v) => NamesRepr::Many(v),
        }
    }
}

impl Names {
    /// The number of names, or `None` if this selects all objects
    pub fn len(&self) -> Option<usize> {
        match self {
            Names::All => None,
            Names::Only(v) => Some(v.len()),
        }
    }

    /// Checks whether this selects no object at all
    pub fn is_empty(&self) -> bool {
        matches!(self, Names::Only(v) if v.is_empty())
    }
}

impl From<&str> for Names {
    fn from(s: &str) -> Self {
        if s.trim() == "*" {
            Names::All
        } else {
            Names::Only(vec![s.to_string()])
        }
    }
}

impl From<String> for Names {
    fn from(s: String) -> Self {
        Names::from(s.as_str())
    }
}

impl From<&String> for Names {
    fn from(s: &String) -> Self {
        Names::from(s.as_str())
    }
}

impl From<Vec<String>> for Names {
    fn from(v: Vec<String>) -> Self {
        if v.len() == 1 && v[0].trim() == "*" {
            return Names::All;
        }
        Names::Only(v)
    }
}

impl From<Vec<&str>> for Names {
    fn from(v: Vec<&str>) -> Self {
        Names::from(v.into_iter().map(|s| s.to_string()).collect::<Vec<String>>())
    }
}

impl From<&[String]> for Names {
    fn from(v: &[String]) -> Self {
        Names::from(v.to_vec())
    }
}

impl From<&Names> for Names {
    fn from(n: &Names) -> Self {
        n.clone()
    }
}

/// The values to set in a field: a single value for every selected
/// object, or one value per selected object.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValues {
    /// The same value for all
    Broadcast(FieldValue),
    /// One value per object, in the order of the names
    PerName(Vec<FieldValue>),
}

impl From<FieldValue> for FieldValues {
    fn from(v: FieldValue) -> Self {
        FieldValues::Broadcast(v)
    }
}

impl From<Float> for FieldValues {
    fn from(v: Float) -> Self {
        FieldValues::Broadcast(v.into())
    }
}

impl From<i32> for FieldValues {
    fn from(v: i32) -> Self {
        FieldValues::Broadcast(v.into())
    }
}

impl From<usize> for FieldValues {
    fn from(v: usize) -> Self {
        FieldValues::Broadcast(v.into())
    }
}

impl From<&str> for FieldValues {
    fn from(v: &str) -> Self {
        FieldValues::Broadcast(v.into())
    }
}

impl From<String> for FieldValues {
    fn from(v: String) -> Self {
        FieldValues::Broadcast(v.into())
    }
}

impl From<&String> for FieldValues {
    fn from(v: &String) -> Self {
        FieldValues::Broadcast(v.into())
    }
}

impl From<Vec<FieldValue>> for FieldValues {
    fn from(v: Vec<FieldValue>) -> Self {
        FieldValues::PerName(v)
    }
}

impl From<Vec<Float>> for FieldValues {
    fn from(v: Vec<Float>) -> Self {
        FieldValues::PerName(v.into_iter().map(FieldValue::from).collect())
    }
}

impl From<Vec<&str>> for FieldValues {
    fn from(v: Vec<&str>) -> Self {
        FieldValues::PerName(v.into_iter().map(FieldValue::from).collect())
    }
}
