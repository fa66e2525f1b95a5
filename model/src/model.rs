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
use crate::object::IdfObject;
use crate::scanner::IdfScanner;
use crate::schema::{self, normalize_key, ObjectSchema, Schema, ANONYMOUS};
use crate::selector::{FieldValues, Names};
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::fs;
use std::path::Path;

/// All the objects of one type, with an index for finding
/// them by name
#[derive(Debug, Clone, Default)]
struct ObjectGroup {
    objects: Vec<IdfObject>,

    /// Upper-case name -> position in `objects`
    index: HashMap<String, usize>,
}

impl ObjectGroup {
    fn find(&self, name: &str) -> Option<usize> {
        self.index.get(&normalize_key(name)).copied()
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (i, obj) in self.objects.iter().enumerate() {
            if let Some(name) = obj.name() {
                self.index.entry(normalize_key(&name)).or_insert(i);
            }
        }
    }
}

/// An EnergyPlus model: a set of named objects, grouped by type
///
/// Both object types and object names are case insensitive. Objects keep
/// the order in which they were loaded or added.
///
/// Cloning a `Model` produces a fully independent copy: all values are
/// owned, and the only thing shared is the (immutable, `'static`) schema.
#[derive(Debug, Clone)]
pub struct Model {
    schema: &'static Schema,

    /// Upper-case object type -> objects
    groups: IndexMap<String, ObjectGroup>,
}

impl Default for Model {
    fn default() -> Self {
        Self::with_schema(schema::global())
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for group in self.groups.values() {
            for obj in group.objects.iter() {
                writeln!(f, "{}", obj)?;
            }
        }
        Ok(())
    }
}

impl Model {
    /// Creates an empty model using a specific schema
    pub fn with_schema(schema: &'static Schema) -> Self {
        Self {
            schema,
            groups: IndexMap::new(),
        }
    }

    /// Parses a `Model` from IDF text
    ///
    /// ```
    /// use model::Model;
    ///
    /// let idf = "
    ///     Version, 9.4;
    ///     Zone, Kitchen, 0, 0, 0, 0, , 1, , , 12.5;
    /// ";
    /// let model = Model::from_idf_str(idf).unwrap();
    /// assert_eq!(model.get_names("Zone").unwrap(), vec!["Kitchen"]);
    /// assert_eq!(model.version().unwrap(), "9-4-0");
    /// ```
    pub fn from_idf_str(idf: &str) -> Result<Self, ModelError> {
        Self::from_bytes(idf.as_bytes())
    }

    /// Parses a `Model` from an array of bytes (i.e., a `Vec<u8>`)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ModelError> {
        let mut scanner = IdfScanner::new(bytes, 1);
        scanner.parse_model()
    }

    /// Reads a `Model` from an IDF file
    pub fn from_file<P: AsRef<Path>>(filename: P) -> Result<Self, ModelError> {
        let bytes = fs::read(filename.as_ref()).map_err(|source| ModelError::Io {
            path: filename.as_ref().to_path_buf(),
            source,
        })?;
        Self::from_bytes(&bytes)
    }

    /// Writes the `Model` into an IDF file
    pub fn save<P: AsRef<Path>>(&self, filename: P) -> Result<(), ModelError> {
        fs::write(filename.as_ref(), self.to_string()).map_err(|source| ModelError::Io {
            path: filename.as_ref().to_path_buf(),
            source,
        })
    }

    /// The schema used by this model
    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// Gets the fields of an object type. Types that are not in the
    /// schema get an anonymous one.
    pub(crate) fn object_schema(&self, object_type: &str) -> &'static ObjectSchema {
        self.schema.object(object_type).unwrap_or(&ANONYMOUS)
    }

    /// Checks whether an object type is known, either because
    /// it is in the schema or because the model contains objects of it
    pub fn is_known_type(&self, object_type: &str) -> bool {
        self.schema.contains(object_type) || self.groups.contains_key(&normalize_key(object_type))
    }

    fn check_known(&self, object_type: &str) -> Result<(), ModelError> {
        if self.is_known_type(object_type) {
            Ok(())
        } else {
            Err(ModelError::UnknownObjectType(object_type.to_string()))
        }
    }

    /// The object types in the model, in the order in which they first
    /// appeared
    pub fn object_types(&self) -> Vec<&str> {
        self.groups
            .values()
            .filter_map(|g| g.objects.first().map(|o| o.object_type()))
            .collect()
    }

    /// Number of objects of a certain type
    pub fn count(&self, object_type: &str) -> usize {
        self.groups
            .get(&normalize_key(object_type))
            .map(|g| g.objects.len())
            .unwrap_or(0)
    }

    /// Adds an object. If `strict`, repeated names are an error; otherwise, they
    /// produce a warning and the object is added (but it cannot be found by name).
    pub(crate) fn push_object(&mut self, object: IdfObject, strict: bool) -> Result<(), ModelError> {
        let group = self
            .groups
            .entry(normalize_key(object.object_type()))
            .or_default();

        if let Some(name) = object.name() {
            let key = normalize_key(&name);
            if group.index.contains_key(&key) {
                if strict {
                    return Err(ModelError::DuplicateName {
                        object_type: object.object_type().to_string(),
                        name,
                    });
                }
                log::warn!(
                    "There is already a {} called '{}'",
                    object.object_type(),
                    name
                );
            } else {
                group.index.insert(key, group.objects.len());
            }
        }
        group.objects.push(object);
        Ok(())
    }

    /// Creates a new object from `(field, value)` pairs, returning a mutable
    /// reference to it.
    ///
    /// Objects that have names must be given one, and it must be unique within
    /// their type.
    ///
    /// ```
    /// use model::{Model, FieldValue};
    ///
    /// let mut model = Model::default();
    /// model.new_object("Zone", &[("Name", "Kitchen".into()), ("Floor_Area", 12.5.into())]).unwrap();
    /// assert_eq!(model.get_object("ZONE", "kitchen").unwrap().get("Floor_Area").unwrap(), FieldValue::Number(12.5));
    ///
    /// // Repeated names are not allowed
    /// assert!(model.new_object("Zone", &[("Name", "KITCHEN".into())]).is_err());
    /// ```
    pub fn new_object(
        &mut self,
        object_type: &str,
        fields: &[(&str, FieldValue)],
    ) -> Result<&mut IdfObject, ModelError> {
        let schema = self.object_schema(object_type);
        let object_type = if schema.name().is_empty() {
            object_type.trim().to_string()
        } else {
            schema.name().to_string()
        };

        let mut object = IdfObject::new(object_type.clone(), schema);
        for (field, value) in fields {
            let i = object.field_index(field)?;
            value.check_writable()?;
            object.set_at(i, value.clone());
        }
        if object.is_named() && object.name().is_none() {
            return Err(ModelError::Value(format!(
                "{} objects need a Name",
                object_type
            )));
        }

        self.push_object(object, true)?;
        let group = self
            .groups
            .get_mut(&normalize_key(&object_type))
            .ok_or_else(|| ModelError::UnknownObjectType(object_type.clone()))?;
        group
            .objects
            .last_mut()
            .ok_or(ModelError::UnknownObjectType(object_type))
    }

    /// Borrows all the objects of a type. Known types with no objects
    /// return an empty slice.
    pub fn objects(&self, object_type: &str) -> Result<&[IdfObject], ModelError> {
        self.check_known(object_type)?;
        Ok(self
            .groups
            .get(&normalize_key(object_type))
            .map(|g| g.objects.as_slice())
            .unwrap_or(&[]))
    }

    /// Borrows all the objects of a type, mutably. This is how unnamed
    /// objects are edited. Names cannot be changed through these references.
    pub fn objects_mut(&mut self, object_type: &str) -> Result<&mut [IdfObject], ModelError> {
        self.check_known(object_type)?;
        Ok(self
            .groups
            .get_mut(&normalize_key(object_type))
            .map(|g| g.objects.as_mut_slice())
            .unwrap_or_default())
    }

    /// Borrows an object by type and name
    pub fn get_object(&self, object_type: &str, name: &str) -> Result<&IdfObject, ModelError> {
        self.check_known(object_type)?;
        if !self.object_schema(object_type).is_named() {
            return Err(ModelError::Unnamed(object_type.to_string()));
        }
        self.groups
            .get(&normalize_key(object_type))
            .and_then(|g| g.find(name).map(|i| &g.objects[i]))
            .ok_or_else(|| ModelError::ObjectNotFound {
                object_type: object_type.to_string(),
                name: name.to_string(),
            })
    }

    /// Borrows an object by type and name, mutably.
    ///
    /// The name of the object cannot be changed through this reference;
    /// use [`Model::set_field_values`] for that.
    pub fn get_object_mut(
        &mut self,
        object_type: &str,
        name: &str,
    ) -> Result<&mut IdfObject, ModelError> {
        self.check_known(object_type)?;
        if !self.object_schema(object_type).is_named() {
            return Err(ModelError::Unnamed(object_type.to_string()));
        }
        self.groups
            .get_mut(&normalize_key(object_type))
            .and_then(|g| match g.find(name) {
                Some(i) => g.objects.get_mut(i),
                None => None,
            })
            .ok_or_else(|| ModelError::ObjectNotFound {
                object_type: object_type.to_string(),
                name: name.to_string(),
            })
    }

    /// Gets the names of all the objects of a type, in the order
    /// they were loaded or added
    ///
    /// ```
    /// use model::Model;
    ///
    /// let model = Model::from_idf_str("Zone, B; Zone, A; Zone, C;").unwrap();
    /// assert_eq!(model.get_names("zone").unwrap(), vec!["B", "A", "C"]);
    ///
    /// // Known types with no objects
    /// assert!(model.get_names("People").unwrap().is_empty());
    ///
    /// // Unknown types
    /// assert!(model.get_names("Walrus").is_err());
    /// ```
    pub fn get_names(&self, object_type: &str) -> Result<Vec<String>, ModelError> {
        self.check_known(object_type)?;
        if !self.object_schema(object_type).is_named() {
            return Err(ModelError::Unnamed(object_type.to_string()));
        }
        Ok(self
            .groups
            .get(&normalize_key(object_type))
            .map(|g| g.objects.iter().filter_map(|o| o.name()).collect())
            .unwrap_or_default())
    }

    /// Finds the position of the objects selected by `names`
    fn targets(&self, object_type: &str, names: &Names) -> Result<Vec<usize>, ModelError> {
        self.check_known(object_type)?;
        let group = self.groups.get(&normalize_key(object_type));
        match names {
            Names::All => Ok((0..group.map(|g| g.objects.len()).unwrap_or(0)).collect()),
            Names::Only(list) => {
                if !list.is_empty() && !self.object_schema(object_type).is_named() {
                    return Err(ModelError::Unnamed(object_type.to_string()));
                }
                list.iter()
                    .map(|name| {
                        group
                            .and_then(|g| g.find(name))
                            .ok_or_else(|| ModelError::ObjectNotFound {
                                object_type: object_type.to_string(),
                                name: name.to_string(),
                            })
                    })
                    .collect()
            }
        }
    }

    fn field_index(&self, object_type: &str, field: &str) -> Result<usize, ModelError> {
        self.object_schema(object_type)
            .field_index(field)
            .ok_or_else(|| ModelError::UnknownField {
                object_type: object_type.to_string(),
                field: field.to_string(),
            })
    }

    /// Gets the value of `field` in the objects selected by `names`.
    ///
    /// Unknown object types are an error. Known types with no objects
    /// return an empty list when selecting all of them.
    ///
    /// ```
    /// use model::{Model, FieldValue, Names};
    ///
    /// let model = Model::from_idf_str("
    ///     Zone, Kitchen, 0, 0, 0, 0, , 1, , , 12.5;
    ///     Zone, Bedroom, 0, 0, 0, 0, , 1, , , 9;
    /// ").unwrap();
    ///
    /// let areas: Vec<f64> = model.get_field_values("Zone", "Floor_Area", "*")
    ///     .unwrap()
    ///     .iter()
    ///     .filter_map(|v| v.as_number())
    ///     .map(|v| v as f64)
    ///     .collect();
    /// assert_eq!(areas, vec![12.5, 9.0]);
    ///
    /// let v = model.get_field_values("Zone", "Floor_Area", vec!["bedroom"]).unwrap();
    /// assert_eq!(v, vec![FieldValue::Text("9".to_string())]);
    ///
    /// assert!(model.get_field_values("People", "Name", Names::All).unwrap().is_empty());
    /// assert!(model.get_field_values("Walrus", "Name", Names::All).is_err());
    /// ```
    pub fn get_field_values<N: Into<Names>>(
        &self,
        object_type: &str,
        field: &str,
        names: N,
    ) -> Result<Vec<FieldValue>, ModelError> {
        let names: Names = names.into();
        let targets = self.targets(object_type, &names)?;
        let field_index = self.field_index(object_type, field)?;

        let group = match self.groups.get(&normalize_key(object_type)) {
            Some(g) => g,
            None => return Ok(Vec::new()),
        };
        Ok(targets
            .into_iter()
            .map(|i| group.objects[i].get_at(field_index))
            .collect())
    }

    /// Sets the value of `field` in the objects selected by `names`.
    ///
    /// `values` can be a single value (applied to all the selected
    /// objects) or a list with one value per selected object. Everything
    /// is validated before anything is modified.
    ///
    /// ```
    /// use model::{Model, FieldValue, FieldValues};
    ///
    /// let mut model = Model::from_idf_str("Zone, Kitchen; Zone, Bedroom; Zone, Hall;").unwrap();
    ///
    /// // Broadcast
    /// model.set_field_values("Zone", "Multiplier", "*", 2).unwrap();
    ///
    /// // Paired
    /// model.set_field_values("Zone", "Floor_Area", vec!["Kitchen", "Hall"], vec![12.5, 4.]).unwrap();
    /// let v = model.get_field_values("Zone", "Floor_Area", "*").unwrap();
    /// assert_eq!(v, vec![FieldValue::Number(12.5), FieldValue::Empty, FieldValue::Number(4.)]);
    ///
    /// // Mismatched lengths
    /// assert!(model.set_field_values("Zone", "Floor_Area", vec!["Kitchen"], vec![1., 2.]).is_err());
    /// ```
    pub fn set_field_values<N: Into<Names>, V: Into<FieldValues>>(
        &mut self,
        object_type: &str,
        field: &str,
        names: N,
        values: V,
    ) -> Result<(), ModelError> {
        let names: Names = names.into();
        let targets = self.targets(object_type, &names)?;
        let field_index = self.field_index(object_type, field)?;

        let values = match values.into() {
            FieldValues::Broadcast(v) => vec![v; targets.len()],
            FieldValues::PerName(v) => {
                if v.len() != targets.len() {
                    return Err(ModelError::LengthMismatch {
                        expected: targets.len(),
                        found: v.len(),
                    });
                }
                v
            }
        };
        for v in values.iter() {
            v.check_writable()?;
        }
        if targets.is_empty() {
            return Ok(());
        }

        let renaming = field_index == 0 && self.object_schema(object_type).is_named();
        if renaming {
            self.check_new_names(object_type, &targets, &values)?;
        }

        let group = self
            .groups
            .get_mut(&normalize_key(object_type))
            .ok_or_else(|| ModelError::UnknownObjectType(object_type.to_string()))?;
        for (i, v) in targets.into_iter().zip(values) {
            group.objects[i].set_at(field_index, v);
        }
        if renaming {
            group.reindex();
        }
        Ok(())
    }

    /// Checks that renaming the objects at `targets` as `values` would
    /// leave no blank or repeated names
    fn check_new_names(
        &self,
        object_type: &str,
        targets: &[usize],
        values: &[FieldValue],
    ) -> Result<(), ModelError> {
        let group = match self.groups.get(&normalize_key(object_type)) {
            Some(g) => g,
            None => return Ok(()),
        };
        let targeted: HashSet<usize> = targets.iter().copied().collect();
        let mut taken: HashSet<String> = group
            .objects
            .iter()
            .enumerate()
            .filter(|(i, _)| !targeted.contains(i))
            .filter_map(|(_, o)| o.name().map(|n| normalize_key(&n)))
            .collect();

        for v in values {
            if v.is_empty() {
                return Err(ModelError::Value(format!(
                    "{} objects need a Name",
                    object_type
                )));
            }
            let name = v.to_string();
            if !taken.insert(normalize_key(&name)) {
                return Err(ModelError::DuplicateName {
                    object_type: object_type.to_string(),
                    name,
                });
            }
        }
        Ok(())
    }

    /// Removes the objects selected by `names`, returning how many
    /// were removed. `"*"` removes every object of the type.
    ///
    /// ```
    /// use model::Model;
    ///
    /// let mut model = Model::from_idf_str("Zone, Kitchen; Zone, Bedroom; Zone, Hall;").unwrap();
    /// assert_eq!(model.delete_by_names("Zone", "bedroom").unwrap(), 1);
    /// assert_eq!(model.get_names("Zone").unwrap(), vec!["Kitchen", "Hall"]);
    /// assert!(model.get_object("Zone", "Hall").is_ok());
    ///
    /// assert_eq!(model.delete_by_names("Zone", "*").unwrap(), 2);
    /// assert!(model.get_names("Zone").unwrap().is_empty());
    /// ```
    pub fn delete_by_names<N: Into<Names>>(
        &mut self,
        object_type: &str,
        names: N,
    ) -> Result<usize, ModelError> {
        let names: Names = names.into();
        let targets: HashSet<usize> = self.targets(object_type, &names)?.into_iter().collect();
        let group = match self.groups.get_mut(&normalize_key(object_type)) {
            Some(g) => g,
            None => return Ok(0),
        };

        let before = group.objects.len();
        let mut i = 0;
        group.objects.retain(|_| {
            let keep = !targets.contains(&i);
            i += 1;
            keep
        });
        group.reindex();
        Ok(before - group.objects.len())
    }

    /// Removes every object of a type for which `predicate` returns `true`,
    /// returning how many were removed. This is how unnamed objects
    /// (e.g., `Output:Variable`) are deleted.
    pub fn delete_where<F: FnMut(&IdfObject) -> bool>(
        &mut self,
        object_type: &str,
        mut predicate: F,
    ) -> Result<usize, ModelError> {
        self.check_known(object_type)?;
        let group = match self.groups.get_mut(&normalize_key(object_type)) {
            Some(g) => g,
            None => return Ok(0),
        };
        let before = group.objects.len();
        group.objects.retain(|o| !predicate(o));
        group.reindex();
        Ok(before - group.objects.len())
    }

    /// Gets the EnergyPlus version of the model, formatted as `X-Y-Z`
    /// (e.g., `9-4-0`)
    pub fn version(&self) -> Result<String, ModelError> {
        let obj = self
            .groups
            .get(&normalize_key("Version"))
            .and_then(|g| g.objects.first())
            .ok_or_else(|| ModelError::Value("The model has no Version object".to_string()))?;
        let v = obj.get_at(0).to_string();
        let mut parts: Vec<&str> = v.split('.').map(|p| p.trim()).collect();
        if parts.iter().any(|p| p.is_empty() || !p.chars().all(|c| c.is_ascii_digit())) {
            return Err(ModelError::Value(format!(
                "Could not understand version '{}'",
                v
            )));
        }
        while parts.len() < 3 {
            parts.push("0");
        }
        Ok(parts.join("-"))
    }
}

/// Copies the object of type `object_type` called `name` from `src`
/// into `dst`.
///
/// Nothing happens if `dst` already has an object of that type and name.
/// Returns `true` if the object was copied.
///
/// ```
/// use model::{Model, copy_named_object};
///
/// let src = Model::from_idf_str("Schedule:Compact, On, Any Number, Through: 12/31, For: AllDays, Until: 24:00, 1;").unwrap();
/// let mut dst = Model::default();
/// assert!(copy_named_object(&src, &mut dst, "Schedule:Compact", "On").unwrap());
/// assert!(!copy_named_object(&src, &mut dst, "Schedule:Compact", "On").unwrap());
/// assert_eq!(dst.count("Schedule:Compact"), 1);
/// ```
pub fn copy_named_object(
    src: &Model,
    dst: &mut Model,
    object_type: &str,
    name: &str,
) -> Result<bool, ModelError> {
    let obj = src.get_object(object_type, name)?;
    if dst.get_object(object_type, name).is_ok() {
        return Ok(false);
    }
    let copy = IdfObject::with_values(
        obj.object_type(),
        dst.object_schema(object_type),
        obj.values().to_vec(),
    );
    dst.push_object(copy, true)?;
    Ok(true)
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::Float;

    const IDF: &str = "
        Version, 9.4;
        Zone, Zone 1, 0, 0, 0, 0, , 1, , , 10;
        Zone, Zone 2, 0, 0, 0, 0, , 1, , , 20;
        Zone, Zone 3, 0, 0, 0, 0, , 1, , , 30;
        People, People Zone 1, Zone 1, Occ, People, 2;
        Output:Variable, *, Zone Mean Air Temperature, Hourly;
        SimulationControl, No, No, No, Yes, Yes;
    ";

    fn model() -> Model {
        Model::from_idf_str(IDF).unwrap()
    }

    fn numbers(v: Vec<FieldValue>) -> Vec<Option<Float>> {
        v.iter().map(|v| v.as_number()).collect()
    }

    #[test]
    fn test_round_trip() {
        let mut m = model();
        m.set_field_values("Zone", "Ceiling_Height", "*", 2.7).unwrap();
        let v = m.get_field_values("Zone", "Ceiling_Height", "*").unwrap();
        assert_eq!(v, vec![FieldValue::Number(2.7); 3]);

        let names = vec!["Zone 3", "Zone 1"];
        m.set_field_values("Zone", "Type", names.clone(), vec!["a", "b"])
            .unwrap();
        let v = m.get_field_values("Zone", "Type", names).unwrap();
        assert_eq!(v, vec![FieldValue::from("a"), FieldValue::from("b")]);
    }

    #[test]
    fn test_values_cannot_break_the_file() {
        let mut m = model();
        let e = m.set_field_values("Zone", "Type", "Zone 1", "a,b; Zone, Ghost");
        assert!(matches!(e, Err(ModelError::Value(_))));
        let e = m.set_field_values("Zone", "Type", vec!["Zone 1", "Zone 2"], vec!["ok", "no!"]);
        assert!(e.is_err());
        assert!(m.get_field_values("Zone", "Type", "*").unwrap().iter().all(|v| v.is_empty()));
        assert!(m
            .set_field_values("Zone", "Floor_Area", "*", Float::NAN)
            .is_err());
        assert!(m
            .new_object("Zone", &[("Name", "Ghost;".into())])
            .is_err());
        assert!(m
            .get_object_mut("Zone", "Zone 1")
            .unwrap()
            .set("Type", "x\ny")
            .is_err());

        let again = Model::from_idf_str(&m.to_string()).unwrap();
        assert_eq!(again.get_names("Zone").unwrap(), m.get_names("Zone").unwrap());
    }

    #[test]
    fn test_paired_leaves_others_alone() {
        let mut m = model();
        m.set_field_values("Zone", "Floor_Area", vec!["Zone 2"], vec![99.])
            .unwrap();
        let v = numbers(m.get_field_values("Zone", "Floor_Area", "*").unwrap());
        assert_eq!(v, vec![Some(10.), Some(99.), Some(30.)]);
    }

    #[test]
    fn test_length_mismatch_does_not_mutate() {
        let mut m = model();
        let e = m.set_field_values("Zone", "Floor_Area", "*", vec![1., 2.]);
        assert!(matches!(
            e,
            Err(ModelError::LengthMismatch {
                expected: 3,
                found: 2
            })
        ));
        let v = numbers(m.get_field_values("Zone", "Floor_Area", "*").unwrap());
        assert_eq!(v, vec![Some(10.), Some(20.), Some(30.)]);
    }

    #[test]
    fn test_lookup_errors() {
        let mut m = model();
        assert!(matches!(
            m.get_field_values("Walrus", "Name", "*"),
            Err(ModelError::UnknownObjectType(_))
        ));
        assert!(matches!(
            m.get_field_values("Zone", "Dogs", "*"),
            Err(ModelError::UnknownField { .. })
        ));
        assert!(matches!(
            m.get_field_values("Zone", "Floor_Area", "Zone 9"),
            Err(ModelError::ObjectNotFound { .. })
        ));
        // Nothing is changed when one of the names does not exist
        assert!(m
            .set_field_values("Zone", "Floor_Area", vec!["Zone 1", "Zone 9"], 1.)
            .is_err());
        assert_eq!(
            m.get_field_values("Zone", "Floor_Area", "Zone 1").unwrap(),
            vec![FieldValue::from("10")]
        );
        assert!(matches!(
            m.get_field_values("Output:Variable", "Key_Value", "Zone 1"),
            Err(ModelError::Unnamed(_))
        ));
    }

    #[test]
    fn test_case_insensitive() {
        let m = model();
        assert!(m.get_object("ZONE", "zone 2").is_ok());
        assert_eq!(
            m.get_field_values("zone", "floor area", "ZONE 3").unwrap(),
            vec![FieldValue::from("30")]
        );
    }

    #[test]
    fn test_unknown_types_from_file() {
        let m = model();
        assert_eq!(m.count("SimulationControl"), 1);
        let v = m
            .get_field_values("SimulationControl", "Field_4", "*")
            .unwrap();
        assert_eq!(v, vec![FieldValue::from("Yes")]);
    }

    #[test]
    fn test_rename() {
        let mut m = model();
        m.set_field_values("Zone", "Name", "Zone 1", "Kitchen").unwrap();
        assert!(m.get_object("Zone", "Kitchen").is_ok());
        assert!(m.get_object("Zone", "Zone 1").is_err());
        assert!(matches!(
            m.set_field_values("Zone", "Name", "Zone 2", "zone 3"),
            Err(ModelError::DuplicateName { .. })
        ));
        // Swapping is fine
        m.set_field_values("Zone", "Name", vec!["Zone 2", "Zone 3"], vec!["Zone 3", "Zone 2"])
            .unwrap();
        assert_eq!(m.get_names("Zone").unwrap(), vec!["Kitchen", "Zone 3", "Zone 2"]);
    }

    #[test]
    fn test_delete() {
        let mut m = model();
        assert!(m.delete_by_names("Zone", vec!["Zone 1", "Zone 4"]).is_err());
        assert_eq!(m.count("Zone"), 3);
        assert_eq!(m.delete_by_names("Zone", vec!["Zone 1", "Zone 3"]).unwrap(), 2);
        assert_eq!(m.get_names("Zone").unwrap(), vec!["Zone 2"]);
        assert_eq!(m.delete_by_names("Output:Variable", "*").unwrap(), 1);
        assert_eq!(m.count("Output:Variable"), 0);
        // Still a known type
        assert!(m.objects("Output:Variable").unwrap().is_empty());
    }

    #[test]
    fn test_copy_named_object() {
        let src = model();
        let mut dst = Model::default();
        assert!(copy_named_object(&src, &mut dst, "Zone", "Zone 2").unwrap());
        assert!(!copy_named_object(&src, &mut dst, "zone", "ZONE 2").unwrap());
        assert_eq!(dst.count("Zone"), 1);
        assert_eq!(
            dst.get_object("Zone", "Zone 2").unwrap(),
            src.get_object("Zone", "Zone 2").unwrap()
        );
        assert!(copy_named_object(&src, &mut dst, "Zone", "Zone 9").is_err());
    }

    #[test]
    fn test_clone_is_independent() {
        let original = model();
        let mut copy = original.clone();

        // Text, number and empty fields
        copy.set_field_values("Zone", "Type", "*", "Changed").unwrap();
        copy.set_field_values("Zone", "Floor_Area", "*", 1.).unwrap();
        copy.set_field_values("Zone", "Volume", "*", FieldValue::Empty)
            .unwrap();
        copy.set_field_values("People", "Number_of_People", "*", 100.)
            .unwrap();
        copy.delete_by_names("Output:Variable", "*").unwrap();
        copy.new_object("Zone", &[("Name", "Zone 4".into())]).unwrap();

        let fresh = model();
        for field in ["Type", "Floor_Area", "Volume", "Name"] {
            assert_eq!(
                original.get_field_values("Zone", field, "*").unwrap(),
                fresh.get_field_values("Zone", field, "*").unwrap()
            );
        }
        assert_eq!(
            original
                .get_field_values("People", "Number_of_People", "*")
                .unwrap(),
            vec![FieldValue::from("2")]
        );
        assert_eq!(original.count("Output:Variable"), 1);
        assert_eq!(original.count("Zone"), 3);
    }

    #[test]
    fn test_write_and_read() {
        let m = model();
        let text = m.to_string();
        let back = Model::from_idf_str(&text).unwrap();
        assert_eq!(back.object_types(), m.object_types());
        for t in m.object_types() {
            assert_eq!(back.objects(t).unwrap(), m.objects(t).unwrap());
        }
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.idf");
        let m = model();
        m.save(&path).unwrap();
        let back = Model::from_file(&path).unwrap();
        assert_eq!(back.get_names("Zone").unwrap(), m.get_names("Zone").unwrap());
        assert!(matches!(
            Model::from_file(dir.path().join("nothing.idf")),
            Err(ModelError::Io { .. })
        ));
    }

    #[test]
    fn test_version() {
        assert_eq!(model().version().unwrap(), "9-4-0");
        let m = Model::from_idf_str("Version, 22.1.0;").unwrap();
        assert_eq!(m.version().unwrap(), "22-1-0");
        assert!(Model::default().version().is_err());
    }
}
