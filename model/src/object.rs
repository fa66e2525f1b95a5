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
use crate::field_value::FieldValue;
use crate::schema::ObjectSchema;
use crate::Float;
use std::fmt::Display;

/// An object in an IDF model (e.g., a `Zone`, a `People`, a `Schedule:Compact`)
///
/// Values are stored by position. Their names come from the [`ObjectSchema`].
#[derive(Debug, Clone, PartialEq)]
pub struct IdfObject {
    /// The type of object, as written by the user
    object_type: String,

    /// The fields of this type of object
    schema: &'static ObjectSchema,

    /// The values, in order
    values: Vec<FieldValue>,
}

impl IdfObject {
    /// Creates a new object with no values
    pub(crate) fn new<S: Into<String>>(object_type: S, schema: &'static ObjectSchema) -> Self {
        Self {
            object_type: object_type.into(),
            schema,
            values: Vec::new(),
        }
    }

    /// Creates a new object with some values already set (e.g., when reading an IDF file)
    pub(crate) fn with_values<S: Into<String>>(
        object_type: S,
        schema: &'static ObjectSchema,
        values: Vec<FieldValue>,
    ) -> Self {
        Self {
            object_type: object_type.into(),
            schema,
            values,
        }
    }

    /// The type of object
    pub fn object_type(&self) -> &str {
        &self.object_type
    }

    /// The name of the object, if this type of object has names
    /// and it is not blank
    pub fn name(&self) -> Option<String> {
        if !self.schema.is_named() {
            return None;
        }
        match self.values.first() {
            None | Some(FieldValue::Empty) => None,
            Some(v) => Some(v.to_string()),
        }
    }

    /// Checks whether this type of object has names
    pub fn is_named(&self) -> bool {
        self.schema.is_named()
    }

    /// Finds the position of `field`
    pub fn field_index(&self, field: &str) -> Result<usize, ModelError> {
        self.schema
            .field_index(field)
            .ok_or_else(|| ModelError::UnknownField {
                object_type: self.object_type.clone(),
                field: field.to_string(),
            })
    }

    /// Gets the value of a field. Fields that exist but were not
    /// written are [`FieldValue::Empty`].
    pub fn get(&self, field: &str) -> Result<FieldValue, ModelError> {
        let i = self.field_index(field)?;
        Ok(self.get_at(i))
    }

    /// Gets the value at a certain position
    pub(crate) fn get_at(&self, index: usize) -> FieldValue {
        self.values.get(index).cloned().unwrap_or_default()
    }

    /// Gets the numerical value of a field, failing if it is not a number
    pub fn get_number(&self, field: &str) -> Result<Float, ModelError> {
        let v = self.get(field)?;
        v.as_number().ok_or_else(|| {
            ModelError::Value(format!(
                "Field '{}' of {} '{}' should be a number, found '{}'",
                field,
                self.object_type,
                self.name().unwrap_or_default(),
                v
            ))
        })
    }

    /// Sets the value of a field, padding with [`FieldValue::Empty`]
    /// if the object had fewer values.
    ///
    /// Names are indexed by the [`crate::Model`], so they can only be changed
    /// through [`crate::Model::set_field_values`].
    pub fn set<V: Into<FieldValue>>(&mut self, field: &str, value: V) -> Result<(), ModelError> {
        let i = self.field_index(field)?;
        let value = value.into();
        value.check_writable()?;
        if i == 0 && self.schema.is_named() {
            return Err(ModelError::Value(format!(
                "The name of {} '{}' can only be changed through the Model",
                self.object_type,
                self.name().unwrap_or_default()
            )));
        }
        self.set_at(i, value);
        Ok(())
    }

    pub(crate) fn set_at(&mut self, index: usize, value: FieldValue) {
        if index >= self.values.len() {
            self.values.resize(index + 1, FieldValue::Empty);
        }
        self.values[index] = value;
    }

    /// The values of the object, in order
    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    /// Iterates over the `(field name, value)` pairs of the object
    pub fn fields(&self) -> impl Iterator<Item = (String, &FieldValue)> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| (self.schema.field_name(i), v))
    }
}

impl Display for IdfObject {
    /// Writes the object in IDF format, with the field names as comments
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Trailing blanks are not needed
        let n = self
            .values
            .iter()
            .rposition(|v| !v.is_empty())
            .map(|i| i + 1)
            .unwrap_or(0);

        if n == 0 {
            return writeln!(f, "{};", self.object_type);
        }

        writeln!(f, "{},", self.object_type)?;
        for (i, v) in self.values[..n].iter().enumerate() {
            let sep = if i + 1 == n { ';' } else { ',' };
            let value = format!("{}{}", v, sep);
            let field = self.schema.field_name(i).replace('_', " ");
            writeln!(f, "    {:<26}!- {}", value, field)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::schema;

    fn zone_schema() -> &'static ObjectSchema {
        schema::global().object("Zone").unwrap()
    }

    #[test]
    fn test_get_set() {
        let mut zone = IdfObject::new("Zone", zone_schema());
        assert!(zone.name().is_none());
        zone.set_at(0, "Kitchen".into());
        assert_eq!(zone.name(), Some("Kitchen".to_string()));
        assert!(zone.set("Name", "Bedroom").is_err());

        // Not set yet
        assert_eq!(zone.get("Floor_Area").unwrap(), FieldValue::Empty);
        zone.set("Floor Area", 12.5).unwrap();
        assert_eq!(zone.get("floor_area").unwrap(), FieldValue::Number(12.5));
        assert_eq!(zone.values().len(), 10);
        assert!((zone.get_number("Floor_Area").unwrap() - 12.5).abs() < 1e-9);

        assert!(matches!(
            zone.set("Number_of_Dogs", 2),
            Err(ModelError::UnknownField { .. })
        ));
        assert!(zone.get_number("X_Origin").is_err());
    }

    #[test]
    fn test_display() {
        let mut zone = IdfObject::new("Zone", zone_schema());
        zone.set_at(0, "Kitchen".into());
        zone.set("Multiplier", 1).unwrap();
        let s = zone.to_string();
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "Zone,");
        assert!(lines[1].trim_start().starts_with("Kitchen,"));
        assert!(lines[1].ends_with("!- Name"));
        assert!(lines[7].trim_start().starts_with("1;"));
        assert!(lines[7].ends_with("!- Multiplier"));
    }

    #[test]
    fn test_display_empty() {
        let obj = IdfObject::new("Output:Diagnostics", &schema::ANONYMOUS);
        assert_eq!(obj.to_string(), "Output:Diagnostics;\n");
    }
}
