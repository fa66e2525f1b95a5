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

//! The schema tells the [`crate::Model`] which fields each type of
//! object has (i.e., what EnergyPlus calls the IDD).
//!
//! There is a single schema per process. It can be registered explicitly
//! through [`initialize`] (e.g., with a full `Energy+.idd` parsed with
//! [`Schema::from_idd_str`]) before any model is created; otherwise
//! the [`Schema::builtin`] one is used.

use crate::error::ModelError;
use std::collections::HashMap;
use std::sync::OnceLock;

static GLOBAL_SCHEMA: OnceLock<Schema> = OnceLock::new();

/// The schema used for object types that the [`Schema`] does not know. Their
/// first field is taken as the name, and all other fields are called
/// `Field_<n>`.
pub(crate) static ANONYMOUS: ObjectSchema = ObjectSchema {
    name: String::new(),
    fields: Vec::new(),
    named: true,
};

/// Registers the process-wide schema.
///
/// Only the first call has an effect. Returns `true` if `schema` was
/// registered, and `false` if a schema was already in place (which is not
/// an error).
pub fn initialize(schema: Schema) -> bool {
    GLOBAL_SCHEMA.set(schema).is_ok()
}

/// Borrows the process-wide schema, registering the built-in one
/// if nothing was registered before.
pub fn global() -> &'static Schema {
    GLOBAL_SCHEMA.get_or_init(Schema::builtin)
}

/// Normalizes field names so that `"Floor Area"`, `"floor_area"`
/// and `"Floor_Area"` are all the same.
pub(crate) fn normalize_field(field: &str) -> String {
    field
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Normalizes object types and object names, which are case insensitive
pub(crate) fn normalize_key(key: &str) -> String {
    key.trim().to_uppercase()
}

/// The fields of one type of object
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSchema {
    /// The type of object, as spelled in the IDD
    name: String,

    /// The declared fields, in order
    fields: Vec<String>,

    /// Whether the first field is the `Name`
    named: bool,
}

impl ObjectSchema {
    /// Creates a new `ObjectSchema`. Objects are named when their
    /// first field is called `Name`.
    pub fn new<S: Into<String>>(name: S, fields: Vec<String>) -> Self {
        let named = fields
            .first()
            .map(|f| normalize_field(f) == "NAME")
            .unwrap_or(false);
        Self {
            name: name.into(),
            fields,
            named,
        }
    }

    /// The type of object
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared fields
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Checks whether objects of this type have a name
    pub fn is_named(&self) -> bool {
        self.named
    }

    /// Gets the position of a field. Fields beyond the declared ones
    /// can be reached as `Field_1`, `Field_2`, and so on.
    ///
    /// ```
    /// use model::schema::ObjectSchema;
    ///
    /// let s = ObjectSchema::new("Schedule:Compact", vec!["Name".into(), "Schedule_Type_Limits_Name".into()]);
    /// assert_eq!(s.field_index("name"), Some(0));
    /// assert_eq!(s.field_index("Schedule Type Limits Name"), Some(1));
    /// assert_eq!(s.field_index("Field_1"), Some(2));
    /// assert_eq!(s.field_index("Field_0"), None);
    /// assert_eq!(s.field_index("Floor_Area"), None);
    /// ```
    pub fn field_index(&self, field: &str) -> Option<usize> {
        let field = normalize_field(field);
        if let Some(i) = self.fields.iter().position(|f| normalize_field(f) == field) {
            return Some(i);
        }
        if self.fields.is_empty() && self.named && field == "NAME" {
            return Some(0);
        }
        let n: usize = field.strip_prefix("FIELD_")?.parse().ok()?;
        if n == 0 {
            return None;
        }
        Some(self.fields.len() + n - 1)
    }

    /// Gets the name of the field at a certain position
    pub fn field_name(&self, index: usize) -> String {
        if index == 0 && self.fields.is_empty() && self.named {
            return "Name".to_string();
        }
        match self.fields.get(index) {
            Some(f) => f.clone(),
            None => format!("Field_{}", index + 1 - self.fields.len()),
        }
    }
}

/// A registry of [`ObjectSchema`], by type of object
#[derive(Debug, Clone, Default)]
pub struct Schema {
    objects: HashMap<String, ObjectSchema>,
}

/// Object types and their fields, for the objects read and written by
/// the systems in this workspace (EnergyPlus 9.x).
const BUILTIN: &[(&str, &[&str])] = &[
    ("Version", &["Version_Identifier"]),
    ("Timestep", &["Number_of_Timesteps_per_Hour"]),
    (
        "RunPeriod",
        &[
            "Name",
            "Begin_Month",
            "Begin_Day_of_Month",
            "Begin_Year",
            "End_Month",
            "End_Day_of_Month",
            "End_Year",
            "Day_of_Week_for_Start_Day",
            "Use_Weather_File_Holidays_and_Special_Days",
            "Use_Weather_File_Daylight_Saving_Period",
            "Apply_Weekend_Holiday_Rule",
            "Use_Weather_File_Rain_Indicators",
            "Use_Weather_File_Snow_Indicators",
            "Treat_Weather_as_Actual",
        ],
    ),
    (
        "Zone",
        &[
            "Name",
            "Direction_of_Relative_North",
            "X_Origin",
            "Y_Origin",
            "Z_Origin",
            "Type",
            "Multiplier",
            "Ceiling_Height",
            "Volume",
            "Floor_Area",
            "Zone_Inside_Convection_Algorithm",
            "Zone_Outside_Convection_Algorithm",
            "Part_of_Total_Floor_Area",
        ],
    ),
    (
        "People",
        &[
            "Name",
            "Zone_or_ZoneList_Name",
            "Number_of_People_Schedule_Name",
            "Number_of_People_Calculation_Method",
            "Number_of_People",
            "People_per_Zone_Floor_Area",
            "Zone_Floor_Area_per_Person",
            "Fraction_Radiant",
            "Sensible_Heat_Fraction",
            "Activity_Level_Schedule_Name",
            "Carbon_Dioxide_Generation_Rate",
            "Enable_ASHRAE_55_Comfort_Warnings",
            "Mean_Radiant_Temperature_Calculation_Type",
            "Surface_NameAngle_Factor_List_Name",
            "Work_Efficiency_Schedule_Name",
            "Clothing_Insulation_Calculation_Method",
            "Clothing_Insulation_Calculation_Method_Schedule_Name",
            "Clothing_Insulation_Schedule_Name",
            "Air_Velocity_Schedule_Name",
        ],
    ),
    (
        "Lights",
        &[
            "Name",
            "Zone_or_ZoneList_Name",
            "Schedule_Name",
            "Design_Level_Calculation_Method",
            "Lighting_Level",
            "Watts_per_Zone_Floor_Area",
            "Watts_per_Person",
            "Return_Air_Fraction",
            "Fraction_Radiant",
            "Fraction_Visible",
            "Fraction_Replaceable",
            "EndUse_Subcategory",
        ],
    ),
    (
        "OtherEquipment",
        &[
            "Name",
            "Fuel_Type",
            "Zone_or_ZoneList_Name",
            "Schedule_Name",
            "Design_Level_Calculation_Method",
            "Design_Level",
            "Power_per_Zone_Floor_Area",
            "Power_per_Person",
            "Fraction_Latent",
            "Fraction_Radiant",
            "Fraction_Lost",
            "Carbon_Dioxide_Generation_Rate",
            "EndUse_Subcategory",
        ],
    ),
    (
        "ZoneHVAC:IdealLoadsAirSystem",
        &[
            "Name",
            "Availability_Schedule_Name",
            "Zone_Supply_Air_Node_Name",
            "Zone_Exhaust_Air_Node_Name",
            "System_Inlet_Air_Node_Name",
            "Maximum_Heating_Supply_Air_Temperature",
            "Minimum_Cooling_Supply_Air_Temperature",
            "Maximum_Heating_Supply_Air_Humidity_Ratio",
            "Minimum_Cooling_Supply_Air_Humidity_Ratio",
            "Heating_Limit",
            "Maximum_Heating_Air_Flow_Rate",
            "Maximum_Sensible_Heating_Capacity",
            "Cooling_Limit",
            "Maximum_Cooling_Air_Flow_Rate",
            "Maximum_Total_Cooling_Capacity",
            "Heating_Availability_Schedule_Name",
            "Cooling_Availability_Schedule_Name",
            "Dehumidification_Control_Type",
            "Cooling_Sensible_Heat_Ratio",
            "Humidification_Control_Type",
            "Design_Specification_Outdoor_Air_Object_Name",
            "Outdoor_Air_Inlet_Node_Name",
            "Demand_Controlled_Ventilation_Type",
            "Outdoor_Air_Economizer_Type",
            "Heat_Recovery_Type",
            "Sensible_Heat_Recovery_Effectiveness",
            "Latent_Heat_Recovery_Effectiveness",
        ],
    ),
    (
        "ZoneHVAC:EquipmentConnections",
        &[
            "Zone_Name",
            "Zone_Conditioning_Equipment_List_Name",
            "Zone_Air_Inlet_Node_or_NodeList_Name",
            "Zone_Air_Exhaust_Node_or_NodeList_Name",
            "Zone_Air_Node_Name",
            "Zone_Return_Air_Node_or_NodeList_Name",
        ],
    ),
    (
        "DesignSpecification:OutdoorAir",
        &[
            "Name",
            "Outdoor_Air_Method",
            "Outdoor_Air_Flow_per_Person",
            "Outdoor_Air_Flow_per_Zone_Floor_Area",
            "Outdoor_Air_Flow_per_Zone",
            "Outdoor_Air_Flow_Air_Changes_per_Hour",
            "Outdoor_Air_Schedule_Name",
        ],
    ),
    (
        "ThermostatSetpoint:DualSetpoint",
        &[
            "Name",
            "Heating_Setpoint_Temperature_Schedule_Name",
            "Cooling_Setpoint_Temperature_Schedule_Name",
        ],
    ),
    (
        "ZoneControl:Thermostat",
        &[
            "Name",
            "Zone_or_ZoneList_Name",
            "Control_Type_Schedule_Name",
            "Control_1_Object_Type",
            "Control_1_Name",
            "Control_2_Object_Type",
            "Control_2_Name",
            "Control_3_Object_Type",
            "Control_3_Name",
            "Control_4_Object_Type",
            "Control_4_Name",
        ],
    ),
    ("Schedule:Compact", &["Name", "Schedule_Type_Limits_Name"]),
    (
        "Schedule:File",
        &[
            "Name",
            "Schedule_Type_Limits_Name",
            "File_Name",
            "Column_Number",
            "Rows_to_Skip_at_Top",
            "Number_of_Hours_of_Data",
            "Column_Separator",
            "Interpolate_to_Timestep",
            "Minutes_per_Item",
            "Adjust_Schedule_for_Daylight_Savings",
        ],
    ),
    (
        "ScheduleTypeLimits",
        &[
            "Name",
            "Lower_Limit_Value",
            "Upper_Limit_Value",
            "Numeric_Type",
            "Unit_Type",
        ],
    ),
    (
        "ZoneVentilation:DesignFlowRate",
        &[
            "Name",
            "Zone_or_ZoneList_Name",
            "Schedule_Name",
            "Design_Flow_Rate_Calculation_Method",
            "Design_Flow_Rate",
            "Flow_Rate_per_Zone_Floor_Area",
            "Flow_Rate_per_Person",
            "Air_Changes_per_Hour",
            "Ventilation_Type",
            "Fan_Pressure_Rise",
            "Fan_Total_Efficiency",
            "Constant_Term_Coefficient",
            "Temperature_Term_Coefficient",
            "Velocity_Term_Coefficient",
            "Velocity_Squared_Term_Coefficient",
            "Minimum_Indoor_Temperature",
            "Minimum_Indoor_Temperature_Schedule_Name",
            "Maximum_Indoor_Temperature",
            "Maximum_Indoor_Temperature_Schedule_Name",
            "Delta_Temperature",
            "Delta_Temperature_Schedule_Name",
            "Minimum_Outdoor_Temperature",
            "Minimum_Outdoor_Temperature_Schedule_Name",
            "Maximum_Outdoor_Temperature",
            "Maximum_Outdoor_Temperature_Schedule_Name",
            "Maximum_Wind_Speed",
        ],
    ),
    (
        "Output:Variable",
        &[
            "Key_Value",
            "Variable_Name",
            "Reporting_Frequency",
            "Schedule_Name",
        ],
    ),
    (
        "Material",
        &[
            "Name",
            "Roughness",
            "Thickness",
            "Conductivity",
            "Density",
            "Specific_Heat",
            "Thermal_Absorptance",
            "Solar_Absorptance",
            "Visible_Absorptance",
        ],
    ),
    (
        "Construction",
        &[
            "Name",
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
        ],
    ),
    (
        "WindowMaterial:SimpleGlazingSystem",
        &[
            "Name",
            "UFactor",
            "Solar_Heat_Gain_Coefficient",
            "Visible_Transmittance",
        ],
    ),
    (
        "BuildingSurface:Detailed",
        &[
            "Name",
            "Surface_Type",
            "Construction_Name",
            "Zone_Name",
            "Outside_Boundary_Condition",
            "Outside_Boundary_Condition_Object",
            "Sun_Exposure",
            "Wind_Exposure",
            "View_Factor_to_Ground",
            "Number_of_Vertices",
        ],
    ),
    (
        "FenestrationSurface:Detailed",
        &[
            "Name",
            "Surface_Type",
            "Construction_Name",
            "Building_Surface_Name",
            "Outside_Boundary_Condition_Object",
            "View_Factor_to_Ground",
            "Frame_and_Divider_Name",
            "Multiplier",
            "Number_of_Vertices",
        ],
    ),
    (
        "WindowShadingControl",
        &[
            "Name",
            "Zone_Name",
            "Shading_Control_Sequence_Number",
            "Shading_Type",
            "Construction_with_Shading_Name",
            "Shading_Control_Type",
            "Schedule_Name",
            "Setpoint",
            "Shading_Control_Is_Scheduled",
            "Glare_Control_Is_Active",
            "Shading_Device_Material_Name",
            "Type_of_Slat_Angle_Control_for_Blinds",
            "Slat_Angle_Schedule_Name",
            "Setpoint_2",
            "Daylighting_Control_Object_Name",
            "Multiple_Surface_Control_Type",
            "Fenestration_Surface_1_Name",
        ],
    ),
    (
        "AirflowNetwork:MultiZone:Surface",
        &[
            "Surface_Name",
            "Leakage_Component_Name",
            "External_Node_Name",
            "WindowDoor_Opening_Factor_or_Crack_Factor",
            "Ventilation_Control_Mode",
            "Ventilation_Control_Zone_Temperature_Setpoint_Schedule_Name",
            "Minimum_Venting_Open_Factor",
            "Indoor_and_Outdoor_Temperature_Difference_Lower_Limit_For_Maximum_Venting_Open_Factor",
            "Indoor_and_Outdoor_Temperature_Difference_Upper_Limit_for_Minimum_Venting_Open_Factor",
            "Indoor_and_Outdoor_Enthalpy_Difference_Lower_Limit_For_Maximum_Venting_Open_Factor",
            "Indoor_and_Outdoor_Enthalpy_Difference_Upper_Limit_for_Minimum_Venting_Open_Factor",
            "Venting_Availability_Schedule_Name",
            "Occupant_Ventilation_Control_Name",
            "Equivalent_Rectangle_Method",
            "Equivalent_Rectangle_Aspect_Ratio",
        ],
    ),
];

/// Maximum number of equipment in a `ZoneHVAC:EquipmentList`
pub const MAX_ZONE_EQUIPMENT: usize = 18;

impl Schema {
    /// Creates the built-in schema, which covers the objects that
    /// this workspace reads and writes
    pub fn builtin() -> Self {
        let mut schema = Schema::default();
        for (name, fields) in BUILTIN {
            let fields = fields.iter().map(|f| f.to_string()).collect();
            schema.insert(ObjectSchema::new(*name, fields));
        }

        // Extensible, so we write it down
        let mut fields = vec!["Name".to_string(), "Load_Distribution_Scheme".to_string()];
        for i in 1..=MAX_ZONE_EQUIPMENT {
            fields.push(format!("Zone_Equipment_{}_Object_Type", i));
            fields.push(format!("Zone_Equipment_{}_Name", i));
            fields.push(format!("Zone_Equipment_{}_Cooling_Sequence", i));
            fields.push(format!("Zone_Equipment_{}_Heating_or_NoLoad_Sequence", i));
            fields.push(format!(
                "Zone_Equipment_{}_Sequential_Cooling_Fraction_Schedule_Name",
                i
            ));
            fields.push(format!(
                "Zone_Equipment_{}_Sequential_Heating_Fraction_Schedule_Name",
                i
            ));
        }
        schema.insert(ObjectSchema::new("ZoneHVAC:EquipmentList", fields));
        schema
    }

    /// Adds an [`ObjectSchema`], replacing any previous one for the same type
    pub fn insert(&mut self, object: ObjectSchema) {
        self.objects.insert(normalize_key(&object.name), object);
    }

    /// Gets the [`ObjectSchema`] of a type of object, if known
    pub fn object(&self, object_type: &str) -> Option<&ObjectSchema> {
        self.objects.get(&normalize_key(object_type))
    }

    /// Checks whether a type of object is known
    pub fn contains(&self, object_type: &str) -> bool {
        self.objects.contains_key(&normalize_key(object_type))
    }

    /// Number of object types in the schema
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Checks whether the schema is empty
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Parses an EnergyPlus Input Data Dictionary (i.e., `Energy+.idd`).
    ///
    /// Only object types and their `\field` annotations are read. Field
    /// names have their spaces and symbols replaced by `_`.
    ///
    /// ```
    /// use model::schema::Schema;
    ///
    /// let idd = r#"
    /// \group Simulation Parameters
    /// Timestep,
    ///       \memo Specifies the number of timesteps per hour
    ///   N1 ; \field Number of Timesteps per Hour
    ///       \default 6
    ///
    /// Zone,
    ///   A1 , \field Name
    ///   N1 , \field Direction of Relative North
    ///   N2 ; \field X Origin
    /// "#;
    /// let schema = Schema::from_idd_str(idd).unwrap();
    /// assert_eq!(schema.len(), 2);
    /// let zone = schema.object("ZONE").unwrap();
    /// assert!(zone.is_named());
    /// assert_eq!(zone.fields()[1], "Direction_of_Relative_North");
    /// ```
    pub fn from_idd_str(idd: &str) -> Result<Self, ModelError> {
        let mut schema = Schema::default();
        let mut current: Option<(String, Vec<String>)> = None;
        let mut awaiting_name = false;

        for (i, line) in idd.lines().enumerate() {
            let line = match line.split_once('!') {
                Some((before, _)) => before,
                None => line,
            }
            .trim();
            if line.is_empty() {
                continue;
            }

            if let Some(annotation) = line.strip_prefix('\\') {
                if awaiting_name {
                    if let Some(field) = annotation.strip_prefix("field") {
                        if let Some((_, fields)) = current.as_mut() {
                            if let Some(last) = fields.last_mut() {
                                *last = idd_field_name(field);
                            }
                        }
                        awaiting_name = false;
                    }
                }
                continue;
            }

            let (code, annotation) = match line.split_once('\\') {
                Some((c, a)) => (c.trim(), Some(a)),
                None => (line, None),
            };

            if is_field_code(code) {
                let (_, fields) = current.as_mut().ok_or_else(|| ModelError::Syntax {
                    line: i + 1,
                    msg: format!("field '{}' found before any object", code),
                })?;
                match annotation.and_then(|a| a.strip_prefix("field")) {
                    Some(name) => {
                        fields.push(idd_field_name(name));
                        awaiting_name = false;
                    }
                    None => {
                        fields.push(format!("Field_{}", fields.len() + 1));
                        awaiting_name = true;
                    }
                }
            } else {
                let name = code.trim_end_matches([',', ';']).trim();
                if name.is_empty() {
                    return Err(ModelError::Syntax {
                        line: i + 1,
                        msg: format!("could not understand line '{}'", line),
                    });
                }
                if let Some((prev, fields)) = current.take() {
                    schema.insert(ObjectSchema::new(prev, fields));
                }
                current = Some((name.to_string(), Vec::new()));
                awaiting_name = false;
            }
        }
        if let Some((prev, fields)) = current.take() {
            schema.insert(ObjectSchema::new(prev, fields));
        }
        Ok(schema)
    }
}

/// Checks whether a piece of IDD looks like `A1,` or `N12;`
fn is_field_code(code: &str) -> bool {
    let code = code.trim_end_matches([',', ';']).trim();
    let mut chars = code.chars();
    match chars.next() {
        Some('A') | Some('N') => {
            let rest = chars.as_str();
            !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit())
        }
        _ => false,
    }
}

fn idd_field_name(raw: &str) -> String {
    raw.trim()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|s| !s.is_empty())
        .collect::<Vec<&str>>()
        .join("_")
}
