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

//! Common edits and queries over EnergyPlus models, used by the
//! systems before a simulation (e.g., requesting outputs, setting the
//! run period, finding the HVAC of a zone).

use crate::error::ModelError;
use crate::field_value::FieldValue;
use crate::model::Model;
use crate::object::IdfObject;
use crate::schema::MAX_ZONE_EQUIPMENT;
use crate::selector::Names;
use crate::Float;
use calendar::Period;
use chrono::Datelike;
use indexmap::IndexMap;

/// The name of the always-on schedule added by [`add_natural_ventilation`]
pub const ALWAYS_ON_SCHEDULE: &str = "On 24/7";

/// Object type written by [`add_natural_ventilation`]
pub const NATURAL_VENTILATION: &str = "ZoneVentilation:DesignFlowRate";

/// Object type of the ideal loads air systems
pub const IDEAL_LOADS: &str = "ZoneHVAC:IdealLoadsAirSystem";

/// Lists the zones selected by `zones`, checking that they exist
pub fn zone_names(model: &Model, zones: &Names) -> Result<Vec<String>, ModelError> {
    match zones {
        Names::All => model.get_names("Zone"),
        Names::Only(list) => list
            .iter()
            .map(|z| model.get_object("Zone", z).map(|_| z.clone()))
            .collect(),
    }
}

/// Replaces the `RunPeriod` of the model by one matching `period`
pub fn set_run_period(model: &mut Model, period: &Period) -> Result<(), ModelError> {
    let start = period.start();
    let stop = period.stop();
    model.delete_by_names("RunPeriod", Names::All)?;
    model.new_object(
        "RunPeriod",
        &[
            ("Name", "run_period".into()),
            ("Begin_Month", start.month().into()),
            ("Begin_Day_of_Month", start.day().into()),
            ("Begin_Year", start.year().into()),
            ("End_Month", stop.month().into()),
            ("End_Day_of_Month", stop.day().into()),
            ("End_Year", stop.year().into()),
            ("Day_of_Week_for_Start_Day", period.start_weekday_name().into()),
            ("Use_Weather_File_Holidays_and_Special_Days", "No".into()),
            ("Use_Weather_File_Daylight_Saving_Period", "No".into()),
            ("Apply_Weekend_Holiday_Rule", "Yes".into()),
            ("Use_Weather_File_Rain_Indicators", "Yes".into()),
            ("Use_Weather_File_Snow_Indicators", "Yes".into()),
            ("Treat_Weather_as_Actual", "No".into()),
        ],
    )?;
    Ok(())
}

/// Replaces the `Timestep` of the model
pub fn set_timestep(model: &mut Model, timesteps_per_hour: usize) -> Result<(), ModelError> {
    if !(1..=60).contains(&timesteps_per_hour) || 60 % timesteps_per_hour != 0 {
        return Err(ModelError::Value(format!(
            "The number of timesteps per hour must divide 60, found {}",
            timesteps_per_hour
        )));
    }
    model.delete_by_names("Timestep", Names::All)?;
    model.new_object(
        "Timestep",
        &[("Number_of_Timesteps_per_Hour", timesteps_per_hour.into())],
    )?;
    Ok(())
}

fn is_key(obj: &IdfObject, key: &str) -> bool {
    obj.get("Key_Value")
        .map(|k| k.eq_ignore_case(key))
        .unwrap_or(false)
}

fn is_variable(obj: &IdfObject, variable: &str) -> bool {
    obj.get("Variable_Name")
        .map(|v| v.eq_ignore_case(variable))
        .unwrap_or(false)
}

/// Checks whether `variable` is already reported for `key` (either
/// explicitly or through a `*` key)
pub fn output_variable_present(model: &Model, key: &str, variable: &str) -> bool {
    model
        .objects("Output:Variable")
        .map(|objs| {
            objs.iter()
                .any(|o| (is_key(o, key) || is_key(o, "*")) && is_variable(o, variable))
        })
        .unwrap_or(false)
}

/// Requests `variables` for each of the `keys`, at `frequency` (e.g., `"Hourly"`)
///
/// Variables that are already requested are not added again. Adding a
/// variable for `*` replaces the requests of that variable for specific keys.
///
/// ```
/// use model::{Model, Names};
/// use model::idf_utils::add_output_variable;
///
/// let mut model = Model::default();
/// add_output_variable(&mut model, &Names::from(vec!["Zone 1", "Zone 2"]), &["Zone Mean Air Temperature"], "Hourly").unwrap();
/// assert_eq!(model.count("Output:Variable"), 2);
///
/// add_output_variable(&mut model, &Names::All, &["Zone Mean Air Temperature"], "Hourly").unwrap();
/// assert_eq!(model.count("Output:Variable"), 1);
///
/// // Already covered by '*'
/// add_output_variable(&mut model, &Names::from("Zone 3"), &["Zone Mean Air Temperature"], "Hourly").unwrap();
/// assert_eq!(model.count("Output:Variable"), 1);
/// ```
pub fn add_output_variable<S: AsRef<str>>(
    model: &mut Model,
    keys: &Names,
    variables: &[S],
    frequency: &str,
) -> Result<(), ModelError> {
    let keys: Vec<String> = match keys {
        Names::All => vec!["*".to_string()],
        Names::Only(k) => k.clone(),
    };

    for key in keys.iter() {
        for variable in variables.iter() {
            let variable = variable.as_ref();
            if output_variable_present(model, key, variable) {
                continue;
            }
            if key == "*" {
                model.delete_where("Output:Variable", |o| is_variable(o, variable))?;
            }
            model.new_object(
                "Output:Variable",
                &[
                    ("Key_Value", key.into()),
                    ("Variable_Name", variable.into()),
                    ("Reporting_Frequency", frequency.into()),
                ],
            )?;
        }
    }
    Ok(())
}

/// Gets the names of the `ZoneHVAC:IdealLoadsAirSystem` serving the
/// selected zones, through their `ZoneHVAC:EquipmentConnections` and
/// `ZoneHVAC:EquipmentList`.
///
/// Zones with no equipment connections are an error.
pub fn get_zones_ideal_loads(model: &Model, zones: &Names) -> Result<Vec<String>, ModelError> {
    let zones = zone_names(model, zones)?;
    let connections = model.objects("ZoneHVAC:EquipmentConnections")?;

    let mut ret = Vec::new();
    for zone in zones {
        let conn = connections
            .iter()
            .find(|c| {
                c.get("Zone_Name")
                    .map(|z| z.eq_ignore_case(&zone))
                    .unwrap_or(false)
            })
            .ok_or_else(|| ModelError::ObjectNotFound {
                object_type: "ZoneHVAC:EquipmentConnections".to_string(),
                name: zone.clone(),
            })?;

        let list_name = conn.get("Zone_Conditioning_Equipment_List_Name")?;
        let list = model.get_object("ZoneHVAC:EquipmentList", &list_name.to_string())?;
        for i in 1..=MAX_ZONE_EQUIPMENT {
            let object_type = list.get(&format!("Zone_Equipment_{}_Object_Type", i))?;
            if !object_type.eq_ignore_case(IDEAL_LOADS) {
                continue;
            }
            let name = list.get(&format!("Zone_Equipment_{}_Name", i))?.to_string();
            // Check that it exists
            let obj = model.get_object(IDEAL_LOADS, &name)?;
            ret.push(obj.name().unwrap_or(name));
        }
    }
    Ok(ret)
}

/// Calculates the number of people in a `People` object in `zone`.
/// `floor_area` is the `Floor_Area` of the zone, if it is a number.
fn people_in(people: &IdfObject, zone: &str, floor_area: Option<Float>) -> Result<Float, ModelError> {
    let method = people.get("Number_of_People_Calculation_Method")?.to_string();
    let method = method.to_ascii_lowercase();
    let area = || {
        floor_area.ok_or_else(|| {
            ModelError::Value(format!(
                "People '{}' is given per floor area, but the Floor_Area of Zone '{}' is not a number",
                people.name().unwrap_or_default(),
                zone
            ))
        })
    };
    let n = match method.as_str() {
        "people/area" => people.get_number("People_per_Zone_Floor_Area")? * area()?,
        "people" => people.get_number("Number_of_People")?,
        "area/person" => {
            let area_per_person = people.get_number("Zone_Floor_Area_per_Person")?;
            if area_per_person <= 0. {
                return Err(ModelError::Value(format!(
                    "People '{}' has a non-positive Zone_Floor_Area_per_Person",
                    people.name().unwrap_or_default()
                )));
            }
            area()? / area_per_person
        }
        _ => {
            return Err(ModelError::Value(format!(
                "Unknown Number_of_People_Calculation_Method '{}' in People '{}'",
                method,
                people.name().unwrap_or_default()
            )))
        }
    };
    Ok(n)
}

/// Gets the `People` objects in a zone
fn zone_people<'a>(model: &'a Model, zone: &str) -> Result<Vec<&'a IdfObject>, ModelError> {
    Ok(model
        .objects("People")?
        .iter()
        .filter(|p| {
            p.get("Zone_or_ZoneList_Name")
                .map(|z| z.eq_ignore_case(zone))
                .unwrap_or(false)
        })
        .collect())
}

/// Counts the people in the selected zones
pub fn get_number_of_people(model: &Model, zones: &Names) -> Result<Float, ModelError> {
    let mut occupation = 0.;
    for zone in zone_names(model, zones)? {
        occupation += zone_occupation(model, &zone)?;
    }
    Ok(occupation)
}

/// Counts the people in a single zone
pub fn zone_occupation(model: &Model, zone: &str) -> Result<Float, ModelError> {
    let zone_obj = model.get_object("Zone", zone)?;
    let people = zone_people(model, zone)?;
    if people.is_empty() {
        return Ok(0.);
    }
    let floor_area = zone_obj.get("Floor_Area")?.as_number();
    let mut n = 0.;
    for p in people {
        n += people_in(p, zone, floor_area)?;
    }
    Ok(n)
}

/// Options for [`add_natural_ventilation`]
#[derive(Debug, Clone)]
pub struct NaturalVentilationOptions {
    /// Air changes per hour
    pub ach: Float,

    /// The zones to ventilate
    pub zones: Names,

    /// If `true`, ventilation follows the occupancy schedule
    /// of each zone with `People` (zones without them are not ventilated).
    /// Otherwise, all zones are ventilated all the time.
    pub occupancy_schedule: bool,

    /// Indoor temperature under which windows are not opened
    pub minimum_indoor_temperature: Float,

    /// Windows are opened only when indoor air is this much
    /// warmer than outdoor air
    pub delta_temperature: Float,

    /// Any other field of the `ZoneVentilation:DesignFlowRate`
    pub extra_fields: Vec<(String, FieldValue)>,
}

impl Default for NaturalVentilationOptions {
    fn default() -> Self {
        Self {
            ach: 0.7,
            zones: Names::All,
            occupancy_schedule: true,
            minimum_indoor_temperature: 22.,
            delta_temperature: 0.,
            extra_fields: Vec::new(),
        }
    }
}

/// Adds a `Schedule:Compact` equal to 1 all year long, unless it exists
pub fn add_always_on_schedule(model: &mut Model) -> Result<(), ModelError> {
    if model.get_object("Schedule:Compact", ALWAYS_ON_SCHEDULE).is_ok() {
        return Ok(());
    }
    model.new_object(
        "Schedule:Compact",
        &[
            ("Name", ALWAYS_ON_SCHEDULE.into()),
            ("Schedule_Type_Limits_Name", "Any Number".into()),
            ("Field_1", "Through: 12/31".into()),
            ("Field_2", "For: AllDays".into()),
            ("Field_3", "Until: 24:00".into()),
            ("Field_4", 1.into()),
        ],
    )?;
    Ok(())
}

/// Adds one `ZoneVentilation:DesignFlowRate` called `Natvent_<zone>` per
/// ventilated zone, replacing those that already exist. Returns
/// the names of the ventilated zones.
///
/// Everything is checked before the model is modified.
pub fn add_natural_ventilation(
    model: &mut Model,
    options: &NaturalVentilationOptions,
) -> Result<Vec<String>, ModelError> {
    let zones = zone_names(model, &options.zones)?;

    // zone -> schedule
    let mut schedules: IndexMap<String, String> = IndexMap::new();
    if options.occupancy_schedule {
        for zone in zones.iter() {
            if let Some(p) = zone_people(model, zone)?.first() {
                let schedule = p.get("Number_of_People_Schedule_Name")?.to_string();
                schedules.insert(zone.clone(), schedule);
            }
        }
    } else {
        for zone in zones.iter() {
            schedules.insert(zone.clone(), ALWAYS_ON_SCHEDULE.to_string());
        }
    }

    let mut objects: Vec<(String, Vec<(&str, FieldValue)>)> = Vec::with_capacity(schedules.len());
    for (zone, schedule) in schedules.iter() {
        let name = format!("Natvent_{}", zone);
        let mut fields: Vec<(&str, FieldValue)> = vec![
            ("Name", name.as_str().into()),
            ("Zone_or_ZoneList_Name", zone.into()),
            ("Schedule_Name", schedule.into()),
            ("Design_Flow_Rate_Calculation_Method", "AirChanges/Hour".into()),
            ("Design_Flow_Rate", options.ach.into()),
            ("Air_Changes_per_Hour", options.ach.into()),
            (
                "Minimum_Indoor_Temperature",
                options.minimum_indoor_temperature.into(),
            ),
            ("Delta_Temperature", options.delta_temperature.into()),
        ];
        for (field, value) in options.extra_fields.iter() {
            fields.push((field.as_str(), value.clone()));
        }
        check_fields(model, NATURAL_VENTILATION, &fields)?;
        objects.push((name, fields));
    }

    if !options.occupancy_schedule {
        add_always_on_schedule(model)?;
    }
    for (name, fields) in objects.iter() {
        if model.get_object(NATURAL_VENTILATION, name).is_ok() {
            model.delete_by_names(NATURAL_VENTILATION, name.as_str())?;
        }
        model.new_object(NATURAL_VENTILATION, fields)?;
    }

    Ok(schedules.into_keys().collect())
}

/// Checks that `fields` could be written into a new `object_type`
pub fn check_fields(
    model: &Model,
    object_type: &str,
    fields: &[(&str, FieldValue)],
) -> Result<(), ModelError> {
    let schema = model
        .schema()
        .object(object_type)
        .ok_or_else(|| ModelError::UnknownObjectType(object_type.to_string()))?;
    for (field, value) in fields {
        if schema.field_index(field).is_none() {
            return Err(ModelError::UnknownField {
                object_type: object_type.to_string(),
                field: field.to_string(),
            });
        }
        value.check_writable()?;
    }
    Ok(())
}

/// Selects the `candidates` whose name contains any of the `targets`
/// (ignoring case). `Names::All` selects all of them.
///
/// ```
/// use model::Names;
/// use model::idf_utils::select_in_list;
///
/// let candidates = vec!["Zone1 OA".to_string(), "Zone2 OA".to_string()];
/// assert_eq!(select_in_list(&candidates, &Names::from("zone2")), vec!["Zone2 OA"]);
/// assert_eq!(select_in_list(&candidates, &Names::All).len(), 2);
/// ```
pub fn select_in_list(candidates: &[String], targets: &Names) -> Vec<String> {
    match targets {
        Names::All => candidates.to_vec(),
        Names::Only(targets) => {
            let targets: Vec<String> = targets.iter().map(|t| t.to_uppercase()).collect();
            candidates
                .iter()
                .filter(|c| {
                    let c = c.to_uppercase();
                    targets.iter().any(|t| c.contains(t.as_str()))
                })
                .cloned()
                .collect()
        }
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use chrono::NaiveDate;

    const IDF: &str = "
        Version, 9.4;
        Zone, Zone 1, 0, 0, 0, 0, , 1, , , 10;
        Zone, Zone 2, 0, 0, 0, 0, , 1, , , 20;
        Zone, Zone 3, 0, 0, 0, 0, , 1, , , 40;
        People, P1, Zone 1, Occ 1, People, 2;
        People, P2, Zone 2, Occ 2, People/Area, , 0.1;
        People, P3, Zone 3, Occ 3, Area/Person, , , 0;
        ZoneHVAC:EquipmentConnections, Zone 1, Zone 1 Equipment, Zone 1 Inlet, , Zone 1 Node, Zone 1 Return;
        ZoneHVAC:EquipmentList, Zone 1 Equipment, SequentialLoad, ZoneHVAC:IdealLoadsAirSystem, Zone 1 Ideal Loads, 1, 1, , ;
        ZoneHVAC:IdealLoadsAirSystem, Zone 1 Ideal Loads, , Zone 1 Inlet;
        RunPeriod, old, 1, 1, , 12, 31;
    ";

    fn model() -> Model {
        Model::from_idf_str(IDF).unwrap()
    }

    #[test]
    fn test_set_run_period() {
        let mut m = model();
        let start = NaiveDate::from_ymd_opt(2009, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let stop = NaiveDate::from_ymd_opt(2009, 3, 31)
            .unwrap()
            .and_hms_opt(23, 0, 0)
            .unwrap();
        set_run_period(&mut m, &Period::new(start, stop).unwrap()).unwrap();
        assert_eq!(m.get_names("RunPeriod").unwrap(), vec!["run_period"]);
        let rp = m.get_object("RunPeriod", "run_period").unwrap();
        assert_eq!(rp.get_number("End_Month").unwrap(), 3.);
        assert_eq!(rp.get_number("Begin_Year").unwrap(), 2009.);
        assert_eq!(
            rp.get("Day_of_Week_for_Start_Day").unwrap(),
            FieldValue::from("Thursday")
        );
    }

    #[test]
    fn test_set_timestep() {
        let mut m = model();
        set_timestep(&mut m, 6).unwrap();
        set_timestep(&mut m, 4).unwrap();
        let v = m
            .get_field_values("Timestep", "Number_of_Timesteps_per_Hour", "*")
            .unwrap();
        assert_eq!(v, vec![FieldValue::from(4)]);
        assert!(set_timestep(&mut m, 7).is_err());
        assert!(set_timestep(&mut m, 0).is_err());
    }

    #[test]
    fn test_ideal_loads() {
        let m = model();
        let il = get_zones_ideal_loads(&m, &Names::from("zone 1")).unwrap();
        assert_eq!(il, vec!["Zone 1 Ideal Loads"]);

        // Zone 2 has no equipment
        assert!(matches!(
            get_zones_ideal_loads(&m, &Names::All),
            Err(ModelError::ObjectNotFound { .. })
        ));
        // Zone 9 does not exist
        assert!(get_zones_ideal_loads(&m, &Names::from("Zone 9")).is_err());
    }

    #[test]
    fn test_number_of_people() {
        let mut m = model();
        // Zone 3 has Area/Person = 0
        assert!(get_number_of_people(&m, &Names::All).is_err());
        let n = get_number_of_people(&m, &Names::from(vec!["Zone 1", "Zone 2"])).unwrap();
        assert!((n - 4.).abs() < 1e-9);

        m.set_field_values("People", "Zone_Floor_Area_per_Person", "P3", 10.)
            .unwrap();
        let n = get_number_of_people(&m, &Names::All).unwrap();
        assert!((n - 8.).abs() < 1e-9);
    }

    #[test]
    fn test_natural_ventilation_occupied() {
        let mut m = model();
        m.new_object("Zone", &[("Name", "Empty zone".into())]).unwrap();
        m.set_field_values("People", "Zone_Floor_Area_per_Person", "P3", 10.)
            .unwrap();

        let options = NaturalVentilationOptions::default();
        let zones = add_natural_ventilation(&mut m, &options).unwrap();
        assert_eq!(zones, vec!["Zone 1", "Zone 2", "Zone 3"]);
        assert_eq!(m.count("ZoneVentilation:DesignFlowRate"), 3);
        let v = m
            .get_field_values("ZoneVentilation:DesignFlowRate", "Design_Flow_Rate", "*")
            .unwrap();
        assert_eq!(v, vec![FieldValue::Number(0.7); 3]);
        let s = m
            .get_field_values(
                "ZoneVentilation:DesignFlowRate",
                "Schedule_Name",
                "Natvent_Zone 2",
            )
            .unwrap();
        assert_eq!(s, vec![FieldValue::from("Occ 2")]);

        // Again: replaced, not duplicated
        add_natural_ventilation(&mut m, &options).unwrap();
        assert_eq!(m.count("ZoneVentilation:DesignFlowRate"), 3);
    }

    #[test]
    fn test_natural_ventilation_always_on() {
        let mut m = model();
        let options = NaturalVentilationOptions {
            ach: 2.,
            zones: Names::from(vec!["Zone 2", "Zone 3"]),
            occupancy_schedule: false,
            extra_fields: vec![("Ventilation_Type".to_string(), "Natural".into())],
            ..NaturalVentilationOptions::default()
        };
        add_natural_ventilation(&mut m, &options).unwrap();
        assert!(m
            .get_object("Schedule:Compact", ALWAYS_ON_SCHEDULE)
            .is_ok());
        let v = m
            .get_field_values("ZoneVentilation:DesignFlowRate", "Ventilation_Type", "*")
            .unwrap();
        assert_eq!(v, vec![FieldValue::from("Natural"); 2]);

        let bad = NaturalVentilationOptions {
            zones: Names::from("Zone 9"),
            ..NaturalVentilationOptions::default()
        };
        assert!(add_natural_ventilation(&mut m, &bad).is_err());
    }

    #[test]
    fn test_autocalculated_floor_area() {
        let mut m = Model::from_idf_str(
            "
            Zone, Living, 0, 0, 0, 0, , 1, , , autocalculate;
            Zone, Bedroom;
            People, Living People, Living, Occ, People/Area, , 0.1;
            People, Bedroom People, Bedroom, Occ, People, 0;
        ",
        )
        .unwrap();
        let e = get_number_of_people(&m, &Names::from("Living"));
        match &e {
            Err(ModelError::Value(msg)) => assert!(msg.contains("Living")),
            _ => panic!("Expecting an error, found {:?}", e),
        }
        assert_eq!(get_number_of_people(&m, &Names::from("Bedroom")).unwrap(), 0.);

        // Zones with People are ventilated, whatever their area
        let zones = add_natural_ventilation(&mut m, &NaturalVentilationOptions::default()).unwrap();
        assert_eq!(zones, vec!["Living", "Bedroom"]);
        assert_eq!(m.count(NATURAL_VENTILATION), 2);
    }

    #[test]
    fn test_natural_ventilation_checks_before_editing() {
        let mut m = model();
        add_natural_ventilation(&mut m, &NaturalVentilationOptions::default()).unwrap();
        assert_eq!(m.count(NATURAL_VENTILATION), 3);

        let bad = NaturalVentilationOptions {
            extra_fields: vec![("Walrus".to_string(), 1.into())],
            ..NaturalVentilationOptions::default()
        };
        assert!(matches!(
            add_natural_ventilation(&mut m, &bad),
            Err(ModelError::UnknownField { .. })
        ));
        assert_eq!(m.count(NATURAL_VENTILATION), 3);

        let bad = NaturalVentilationOptions {
            occupancy_schedule: false,
            extra_fields: vec![("Ventilation_Type".to_string(), "Natural, Exhaust".into())],
            ..NaturalVentilationOptions::default()
        };
        assert!(add_natural_ventilation(&mut m, &bad).is_err());
        assert_eq!(m.count(NATURAL_VENTILATION), 3);
        assert!(m.get_object("Schedule:Compact", ALWAYS_ON_SCHEDULE).is_err());
    }

    #[test]
    fn test_select_in_list() {
        let c: Vec<String> = vec!["ZONE11 OA".into(), "Zone1 OA".into(), "Hall".into()];
        assert_eq!(
            select_in_list(&c, &Names::from(vec!["zone1"])),
            vec!["ZONE11 OA", "Zone1 OA"]
        );
        assert!(select_in_list(&c, &Names::from("Kitchen")).is_empty());
    }
}
