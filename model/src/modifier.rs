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

//! Envelope variants: changing the construction of opaque surfaces,
//! the glazing of windows and how much the openings of an airflow
//! network open.
//!
//! Every function here checks its inputs and everything it needs from
//! the model before editing it, so a failed call leaves the model as it was.

use crate::error::ModelError;
use crate::field_value::FieldValue;
use crate::idf_utils::{check_fields, select_in_list};
use crate::model::Model;
use crate::object::IdfObject;
use crate::schema::normalize_key;
use crate::selector::Names;
use crate::Float;
use std::collections::HashSet;

/// Object type of the opaque (and host) surfaces
pub const BUILDING_SURFACE: &str = "BuildingSurface:Detailed";

/// Object type of windows, doors and glass doors
pub const FENESTRATION_SURFACE: &str = "FenestrationSurface:Detailed";

/// Object type of the glazing replaced by [`set_external_windows`]
pub const SIMPLE_GLAZING: &str = "WindowMaterial:SimpleGlazingSystem";

/// Object type of the openings of an airflow network
pub const AFN_SURFACE: &str = "AirflowNetwork:MultiZone:Surface";

/// The accepted values of `Surface_Type` in `BuildingSurface:Detailed`
pub const SURFACE_TYPES: &[&str] = &["Floor", "Wall", "Ceiling", "Roof"];

/// The accepted values of `Outside_Boundary_Condition` in `BuildingSurface:Detailed`
pub const BOUNDARY_CONDITIONS: &[&str] = &[
    "Adiabatic",
    "Surface",
    "Zone",
    "Outdoors",
    "Foundation",
    "Ground",
    "GroundFCfactorMethod",
    "OtherSideCoefficients",
    "OtherSideConditionsModel",
    "GroundSlabPreprocessorAverage",
    "GroundSlabPreprocessorCore",
    "GroundSlabPreprocessorPerimeter",
    "GroundBasementPreprocessorAverageWall",
    "GroundBasementPreprocessorAverageFloor",
    "GroundBasementPreprocessorUpperWall",
    "GroundBasementPreprocessorLowerWall",
];

/// A `Construction` has an outside layer and up to nine more
const MAX_LAYERS: usize = 10;

fn check_choice(what: &str, value: &str, options: &[&str]) -> Result<(), ModelError> {
    if options.iter().any(|o| o.eq_ignore_ascii_case(value.trim())) {
        Ok(())
    } else {
        Err(ModelError::Value(format!(
            "{} must be one of {:?}, found '{}'",
            what, options, value
        )))
    }
}

/// Finds the `Name` among some `(field, value)` pairs
fn name_of(object_type: &str, fields: &[(&str, FieldValue)]) -> Result<String, ModelError> {
    fields
        .iter()
        .find(|(f, _)| f.trim().eq_ignore_ascii_case("Name"))
        .map(|(_, v)| v.to_string())
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| ModelError::Value(format!("{} objects need a Name", object_type)))
}

/// Checks whether `name` is selected by `names`
fn is_selected(name: &str, names: &Names) -> bool {
    !select_in_list(&[name.to_string()], names).is_empty()
}

/// Selects the `BuildingSurface:Detailed` objects whose construction
/// is replaced by [`set_opaque_surface_construction`]
#[derive(Debug, Clone)]
pub struct SurfaceFilter {
    /// Surfaces whose name contains any of these (ignoring case)
    pub names: Names,

    /// The `Surface_Type` (e.g., `Wall`)
    pub surface_type: String,

    /// The `Outside_Boundary_Condition` (e.g., `Outdoors`)
    pub outside_boundary_condition: String,
}

impl Default for SurfaceFilter {
    /// All the external walls
    fn default() -> Self {
        Self {
            names: Names::All,
            surface_type: "Wall".to_string(),
            outside_boundary_condition: "Outdoors".to_string(),
        }
    }
}

impl SurfaceFilter {
    /// Creates a filter for all the surfaces of a type and boundary condition
    pub fn new(surface_type: &str, outside_boundary_condition: &str) -> Self {
        Self {
            names: Names::All,
            surface_type: surface_type.to_string(),
            outside_boundary_condition: outside_boundary_condition.to_string(),
        }
    }

    /// Only surfaces whose name contains any of `names`
    pub fn with_names<N: Into<Names>>(mut self, names: N) -> Self {
        self.names = names.into();
        self
    }

    fn validate(&self) -> Result<(), ModelError> {
        check_choice("Surface_Type", &self.surface_type, SURFACE_TYPES)?;
        check_choice(
            "Outside_Boundary_Condition",
            &self.outside_boundary_condition,
            BOUNDARY_CONDITIONS,
        )
    }

    fn matches(&self, surface: &IdfObject) -> Result<bool, ModelError> {
        Ok(surface
            .get("Surface_Type")?
            .eq_ignore_case(&self.surface_type)
            && surface
                .get("Outside_Boundary_Condition")?
                .eq_ignore_case(&self.outside_boundary_condition)
            && is_selected(&surface.name().unwrap_or_default(), &self.names))
    }
}

/// Replaces the construction of the surfaces selected by `filter` by a
/// `Construction` called `construction` made of `layers` (outside first),
/// returning how many surfaces were changed.
///
/// Each layer is given as the fields of a `Material`, which must include its
/// `Name`. Materials that are not in the model are added (as `Rough`, unless
/// a `Roughness` is given); those already there are used as they are. The
/// same goes for the construction itself.
///
/// ```
/// use model::{FieldValue, Model};
/// use model::modifier::{set_opaque_surface_construction, SurfaceFilter};
///
/// let mut model = Model::from_idf_str("
///     Material, Concrete, Rough, 0.2, 1.75, 2400, 880;
///     Construction, Old Wall, Concrete;
///     BuildingSurface:Detailed, South, Wall, Old Wall, Living, Outdoors;
///     BuildingSurface:Detailed, Slab, Floor, Old Wall, Living, Ground;
/// ").unwrap();
///
/// let layers: Vec<Vec<(&str, FieldValue)>> = vec![
///     vec![("Name", "Brick".into()), ("Thickness", 0.1.into()), ("Conductivity", 0.8.into())],
///     vec![("Name", "Concrete".into())],
/// ];
/// let n = set_opaque_surface_construction(&mut model, "New Wall", &layers, &SurfaceFilter::default()).unwrap();
/// assert_eq!(n, 1);
///
/// let south = model.get_object("BuildingSurface:Detailed", "South").unwrap();
/// assert!(south.get("Construction_Name").unwrap().eq_ignore_case("New Wall"));
/// assert_eq!(model.get_names("Material").unwrap(), vec!["Concrete", "Brick"]);
/// ```
pub fn set_opaque_surface_construction(
    model: &mut Model,
    construction: &str,
    layers: &[Vec<(&str, FieldValue)>],
    filter: &SurfaceFilter,
) -> Result<usize, ModelError> {
    filter.validate()?;
    if layers.is_empty() || layers.len() > MAX_LAYERS {
        return Err(ModelError::Value(format!(
            "Construction '{}' must have between 1 and {} layers, found {}",
            construction,
            MAX_LAYERS,
            layers.len()
        )));
    }
    let construction_name = FieldValue::from(construction.trim());
    construction_name.check_writable()?;
    if construction_name.is_empty() {
        return Err(ModelError::Value("Construction objects need a Name".to_string()));
    }

    let mut layer_names = Vec::with_capacity(layers.len());
    let mut new_materials: Vec<(String, Vec<(&str, FieldValue)>)> = Vec::new();
    for fields in layers {
        let name = name_of("Material", fields)?;
        check_fields(model, "Material", fields)?;
        let exists = model.get_object("Material", &name).is_ok()
            || new_materials.iter().any(|(n, _)| n.eq_ignore_ascii_case(&name));
        if !exists {
            let mut fields = fields.clone();
            if !fields
                .iter()
                .any(|(f, _)| f.trim().eq_ignore_ascii_case("Roughness"))
            {
                fields.push(("Roughness", "Rough".into()));
            }
            new_materials.push((name.clone(), fields));
        }
        layer_names.push(name);
    }

    let mut targets: Vec<String> = Vec::new();
    for surface in model.objects(BUILDING_SURFACE)? {
        if filter.matches(surface)? {
            targets.extend(surface.name());
        }
    }

    for (_, fields) in new_materials {
        model.new_object("Material", &fields)?;
    }
    if model.get_object("Construction", construction).is_err() {
        let mut fields = vec![("Name", construction_name.clone())];
        let layer_fields = [
            "Outside_Layer",
            "Layer_2",
            "Layer_3",
            "Layer_4",
            "Layer_5",
            "Layer_6",
            "Layer_7",
            "Layer_8",
            "Layer_9",
            "Layer_10",
        ];
        for (field, name) in layer_fields.iter().zip(layer_names.iter()) {
            fields.push((*field, name.into()));
        }
        model.new_object("Construction", &fields)?;
    }

    if !targets.is_empty() {
        model.set_field_values(
            BUILDING_SURFACE,
            "Construction_Name",
            targets.clone(),
            construction_name,
        )?;
    }
    log::debug!(
        "Construction '{}' assigned to {} surfaces",
        construction,
        targets.len()
    );
    Ok(targets.len())
}

/// The layers of a `Construction` (i.e., everything after its name)
fn layers_of(construction: &IdfObject) -> impl Iterator<Item = String> + '_ {
    construction
        .values()
        .iter()
        .skip(1)
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}

/// Replaces the glazing of the windows whose host surface has the
/// `boundary_condition` (and whose name contains any of `names`).
///
/// `glazing` holds the fields of the new `WindowMaterial:SimpleGlazingSystem`,
/// including its `Name`. It takes the place of every simple glazing found in
/// the constructions of those windows, and in the shaded constructions of
/// the `WindowShadingControl` objects that act on them. A glazing with the
/// same name is replaced. Afterwards, simple glazings that no `Construction`
/// uses are removed from the model.
///
/// Returns the number of constructions that were changed.
pub fn set_external_windows<N: Into<Names>>(
    model: &mut Model,
    glazing: &[(&str, FieldValue)],
    names: N,
    boundary_condition: &str,
) -> Result<usize, ModelError> {
    let names: Names = names.into();
    check_choice("Outside_Boundary_Condition", boundary_condition, BOUNDARY_CONDITIONS)?;
    let glazing_name = name_of(SIMPLE_GLAZING, glazing)?;
    check_fields(model, SIMPLE_GLAZING, glazing)?;

    // Host surfaces facing the boundary condition
    let mut hosts = HashSet::new();
    for surface in model.objects(BUILDING_SURFACE)? {
        if surface
            .get("Outside_Boundary_Condition")?
            .eq_ignore_case(boundary_condition)
        {
            if let Some(name) = surface.name() {
                hosts.insert(normalize_key(&name));
            }
        }
    }

    let mut windows = HashSet::new();
    let mut constructions: Vec<String> = Vec::new();
    let mut add_construction = |name: String| {
        if !name.trim().is_empty()
            && !constructions
                .iter()
                .any(|c| c.eq_ignore_ascii_case(name.trim()))
        {
            constructions.push(name.trim().to_string());
        }
    };
    for window in model.objects(FENESTRATION_SURFACE)? {
        let name = window.name().unwrap_or_default();
        let host = window.get("Building_Surface_Name")?.to_string();
        if hosts.contains(&normalize_key(&host)) && is_selected(&name, &names) {
            windows.insert(normalize_key(&name));
            add_construction(window.get("Construction_Name")?.to_string());
        }
    }

    // Shading controls list their windows from this field onwards
    if let Some(schema) = model.schema().object("WindowShadingControl") {
        if let Some(first) = schema.field_index("Fenestration_Surface_1_Name") {
            for control in model.objects("WindowShadingControl")? {
                let controls_window = control
                    .values()
                    .iter()
                    .skip(first)
                    .any(|v| windows.contains(&normalize_key(&v.to_string())));
                if controls_window {
                    add_construction(control.get("Construction_with_Shading_Name")?.to_string());
                }
            }
        }
    }

    // Find the glazings to replace, and where they are
    let glazings: HashSet<String> = model
        .get_names(SIMPLE_GLAZING)?
        .iter()
        .map(|n| normalize_key(n))
        .collect();
    let mut edits: Vec<(String, Vec<String>)> = Vec::new();
    for name in constructions.iter() {
        let construction = model.get_object("Construction", name)?;
        let fields: Vec<String> = construction
            .fields()
            .skip(1)
            .filter(|(_, v)| glazings.contains(&normalize_key(&v.to_string())))
            .map(|(f, _)| f)
            .collect();
        if !fields.is_empty() {
            edits.push((name.clone(), fields));
        }
    }

    if model.get_object(SIMPLE_GLAZING, &glazing_name).is_ok() {
        model.delete_by_names(SIMPLE_GLAZING, glazing_name.as_str())?;
    }
    model.new_object(SIMPLE_GLAZING, glazing)?;
    for (construction, fields) in edits.iter() {
        let obj = model.get_object_mut("Construction", construction)?;
        for field in fields {
            obj.set(field, glazing_name.as_str())?;
        }
    }

    let used: HashSet<String> = model
        .objects("Construction")?
        .iter()
        .flat_map(layers_of)
        .map(|n| normalize_key(&n))
        .collect();
    let purged = model.delete_where(SIMPLE_GLAZING, |g| {
        g.name()
            .map(|n| !used.contains(&normalize_key(&n)))
            .unwrap_or(true)
    })?;
    log::debug!(
        "Glazing '{}' set in {} constructions ({} unused glazings removed)",
        glazing_name,
        edits.len(),
        purged
    );
    Ok(edits.len())
}

/// Sets the `WindowDoor_Opening_Factor_or_Crack_Factor` of the
/// `AirflowNetwork:MultiZone:Surface` objects whose `Surface_Name`
/// contains any of `names`, returning how many were changed.
///
/// ```
/// use model::Model;
/// use model::modifier::set_afn_surface_opening_factor;
///
/// let mut model = Model::from_idf_str("
///     AirflowNetwork:MultiZone:Surface, South Window, Opening, , 0.5;
///     AirflowNetwork:MultiZone:Surface, North Window, Opening, , 0.5;
/// ").unwrap();
/// assert_eq!(set_afn_surface_opening_factor(&mut model, 0.8, "south").unwrap(), 1);
/// assert!(set_afn_surface_opening_factor(&mut model, 1.2, "*").is_err());
/// ```
pub fn set_afn_surface_opening_factor<N: Into<Names>>(
    model: &mut Model,
    factor: Float,
    names: N,
) -> Result<usize, ModelError> {
    let names: Names = names.into();
    if !(factor > 0. && factor <= 1.) {
        return Err(ModelError::Value(format!(
            "Opening factors must be greater than 0 and up to 1, found {}",
            factor
        )));
    }
    let mut n = 0;
    for opening in model.objects_mut(AFN_SURFACE)? {
        let surface = opening.get("Surface_Name")?.to_string();
        if is_selected(&surface, &names) {
            opening.set("WindowDoor_Opening_Factor_or_Crack_Factor", factor)?;
            n += 1;
        }
    }
    Ok(n)
}
