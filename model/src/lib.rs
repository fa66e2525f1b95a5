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

//! This crate contains the data structure utilized for describing
//! and editing an EnergyPlus building model (i.e., an IDF file).
//!
//! # Introduction
//!
//! A [`Model`] is a set of [`IdfObject`], grouped by type (e.g., `Zone`,
//! `People`, `Schedule:Compact`). Objects of most types have a unique
//! name, and both names and types are case insensitive. The fields of
//! each type of object are described by a [`schema::Schema`].
//!
//! The API is built around four operations:
//!
//! * [`Model::get_field_values`], for reading a field from some objects
//! * [`Model::set_field_values`], for writing a field in some objects
//! * [`Model::delete_by_names`], for removing objects
//! * [`copy_named_object`], for moving objects between models
//!
//! Objects are selected through [`Names`] (i.e., all of them or
//! a list of names), and values are given as [`FieldValues`] (i.e.,
//! one for all or one for each).
//!
//! # Example
//!
//! ```
//! use model::{Model, FieldValue};
//!
//! let mut model = Model::from_idf_str("
//!     Zone, Kitchen;
//!     Zone, Bedroom;
//!     Lights, Kitchen Lights, Kitchen, Lights Schedule, Watts/Area, , 5;
//! ").unwrap();
//!
//! model.set_field_values("Lights", "Watts_per_Zone_Floor_Area", "*", 3.).unwrap();
//! let v = model.get_field_values("Lights", "Watts_per_Zone_Floor_Area", "Kitchen Lights").unwrap();
//! assert_eq!(v, vec![FieldValue::Number(3.)]);
//! ```

/// The kind of Floating point number used in the
/// library... the `"float"` feature means it becomes `f32`
/// and `f64` is used otherwise.
#[cfg(feature = "float")]
pub type Float = f32;

/// The kind of Floating point number used in the library
#[cfg(not(feature = "float"))]
pub type Float = f64;

/// Errors produced by this crate
mod error;
pub use crate::error::ModelError;

/// Values of the fields
mod field_value;
pub use crate::field_value::FieldValue;

/// The objects in a model
mod object;
pub use crate::object::IdfObject;

/// Selecting objects and assigning values to them
mod selector;
pub use crate::selector::{FieldValues, Names};

/// Reads IDF files
mod scanner;

pub mod schema;

/// The model itself
mod model;
pub use crate::model::{copy_named_object, Model};

pub mod idf_utils;

pub mod modifier;
