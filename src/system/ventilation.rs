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

use crate::system::{
    energy_sum, keys, unknown_parameter, ScheduleSource, System, SystemBehaviour,
    SystemCategory, REPORTING_FREQUENCY,
};
use crate::{Error, Float};
use model::idf_utils::{
    add_natural_ventilation, add_output_variable, select_in_list, zone_names,
    NaturalVentilationOptions, IDEAL_LOADS,
};
use model::{FieldValue, Model, Names};
use results::OutputTable;
use schedule::library::ALWAYS_ON;
use serde::{Deserialize, Serialize};

/// Variable holding the air moved by the mechanical ventilation
pub const VENTILATION_FLOW: &str = "Zone Mechanical Ventilation Standard Density Volume Flow Rate";

const OUTDOOR_AIR: &str = "DesignSpecification:OutdoorAir";

fn default_fan_energy_coefficient() -> Float {
    0.23
}

fn default_natural_ach() -> Float {
    0.7
}

fn default_true() -> bool {
    true
}

/// Names of the `objects_type` objects whose names contain one of the zones
fn objects_of_zones(model: &Model, object_type: &str, zones: &Names) -> Result<Names, Error> {
    let candidates = model.get_names(object_type)?;
    Ok(Names::Only(select_in_list(&candidates, zones)))
}

/// A single or double flow air handling unit.
///
/// The energy consumed by the fans is proportional to the air moved by
/// the `DesignSpecification:OutdoorAir` of the zones:
/// `flow [m3/s] * 3600 [s/h] * fan_energy_coefficient [Wh/m3] * 3600 [J/Wh]`.
///
/// The air change rate and the effectiveness of the heat recovery can
/// optionally be set. The names of the `DesignSpecification:OutdoorAir` and
/// of the `ZoneHVAC:IdealLoadsAirSystem` must contain the names of their
/// zones for this to work.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AirHandlingUnit {
    /// The name of the system
    pub name: String,

    /// The ventilated zones
    #[serde(default)]
    pub zones: Names,

    /// Energy consumed by the fans per m3 of air, in Wh/m3
    #[serde(default = "default_fan_energy_coefficient")]
    pub fan_energy_coefficient: Float,

    /// Effectiveness of the sensible and latent heat recovery
    #[serde(default)]
    pub heat_recovery_efficiency: Option<Float>,

    /// Air changes per hour
    #[serde(default)]
    pub ach: Option<Float>,
}

impl AirHandlingUnit {
    /// Creates a unit ventilating all the zones, leaving the model's
    /// flow rates and heat recovery as they are
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            zones: Names::All,
            fan_energy_coefficient: default_fan_energy_coefficient(),
            heat_recovery_efficiency: None,
            ach: None,
        }
    }

    /// Sets the zones
    pub fn with_zones<N: Into<Names>>(mut self, zones: N) -> Self {
        self.zones = zones.into();
        self
    }

    /// Sets the air changes per hour
    pub fn with_ach(mut self, ach: Float) -> Self {
        self.ach = Some(ach);
        self
    }

    /// Sets the heat recovery effectiveness
    pub fn with_heat_recovery(mut self, efficiency: Float) -> Self {
        self.heat_recovery_efficiency = Some(efficiency);
        self
    }

    /// Wraps the `AirHandlingUnit` in a `System` enum
    pub fn wrap(self) -> System {
        System::AirHandlingUnit(self)
    }
}

impl SystemBehaviour for AirHandlingUnit {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> SystemCategory {
        SystemCategory::Ventilation
    }

    fn pre_process(&self, model: &mut Model) -> Result<(), Error> {
        zone_names(model, &self.zones)?;
        add_output_variable(model, &self.zones, &[VENTILATION_FLOW], REPORTING_FREQUENCY)?;

        if let Some(ach) = self.ach {
            let targets = objects_of_zones(model, OUTDOOR_AIR, &self.zones)?;
            model.set_field_values(
                OUTDOOR_AIR,
                "Outdoor_Air_Flow_Air_Changes_per_Hour",
                &targets,
                ach,
            )?;
            model.set_field_values(OUTDOOR_AIR, "Outdoor_Air_Method", &targets, "AirChanges/Hour")?;
        }

        if let Some(efficiency) = self.heat_recovery_efficiency {
            let targets = objects_of_zones(model, IDEAL_LOADS, &self.zones)?;
            model.set_field_values(IDEAL_LOADS, "Heat_Recovery_Type", &targets, "Sensible")?;
            model.set_field_values(
                IDEAL_LOADS,
                "Sensible_Heat_Recovery_Effectiveness",
                &targets,
                efficiency,
            )?;
            model.set_field_values(
                IDEAL_LOADS,
                "Latent_Heat_Recovery_Effectiveness",
                &targets,
                efficiency,
            )?;
        }
        Ok(())
    }

    fn post_process(
        &self,
        _model: &Model,
        eplus_results: &OutputTable,
    ) -> Result<Option<OutputTable>, Error> {
        let coef = self.fan_energy_coefficient;
        let ret = energy_sum(
            &self.name,
            eplus_results,
            &keys(&self.zones),
            VENTILATION_FLOW,
            |v| v * 3600. * coef * 3600.,
        )?;
        Ok(Some(ret))
    }

    fn get_parameter(&self, parameter: &str) -> Result<Float, Error> {
        let v = match parameter {
            "fan_energy_coefficient" => Some(self.fan_energy_coefficient),
            "ach" => self.ach,
            "heat_recovery_efficiency" => self.heat_recovery_efficiency,
            _ => return Err(unknown_parameter(&self.name, parameter)),
        };
        v.ok_or_else(|| {
            Error::Value(format!(
                "Parameter '{}' of '{}' has not been set",
                parameter, self.name
            ))
        })
    }

    fn set_parameter(&mut self, parameter: &str, value: Float) -> Result<(), Error> {
        match parameter {
            "fan_energy_coefficient" => self.fan_energy_coefficient = value,
            "ach" => self.ach = Some(value),
            "heat_recovery_efficiency" => self.heat_recovery_efficiency = Some(value),
            _ => return Err(unknown_parameter(&self.name, parameter)),
        }
        Ok(())
    }
}

fn always_on() -> ScheduleSource {
    ScheduleSource::Library(ALWAYS_ON.to_string())
}

/// Sets the schedule of the outdoor air of the zones (i.e., when the
/// mechanical ventilation runs).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AHUControl {
    /// The name of the system
    pub name: String,

    /// The controlled zones
    #[serde(default)]
    pub zones: Names,

    /// The schedule. Defaults to always on.
    #[serde(default = "always_on")]
    pub schedule: ScheduleSource,
}

impl AHUControl {
    /// Creates a control running the ventilation of all zones all the time
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            zones: Names::All,
            schedule: always_on(),
        }
    }

    /// Sets the zones
    pub fn with_zones<N: Into<Names>>(mut self, zones: N) -> Self {
        self.zones = zones.into();
        self
    }

    /// Sets the schedule
    pub fn with_schedule(mut self, schedule: ScheduleSource) -> Self {
        self.schedule = schedule;
        self
    }

    /// Wraps the `AHUControl` in a `System` enum
    pub fn wrap(self) -> System {
        System::AHUControl(self)
    }
}

impl SystemBehaviour for AHUControl {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> SystemCategory {
        SystemCategory::Ventilation
    }

    fn pre_process(&self, model: &mut Model) -> Result<(), Error> {
        zone_names(model, &self.zones)?;
        let schedule = self.schedule.install(model)?;
        let targets = objects_of_zones(model, OUTDOOR_AIR, &self.zones)?;
        model.set_field_values(OUTDOOR_AIR, "Outdoor_Air_Schedule_Name", &targets, schedule)?;
        Ok(())
    }

    fn post_process(&self, _: &Model, _: &OutputTable) -> Result<Option<OutputTable>, Error> {
        Ok(None)
    }

    fn get_parameter(&self, parameter: &str) -> Result<Float, Error> {
        Err(unknown_parameter(&self.name, parameter))
    }

    fn set_parameter(&mut self, parameter: &str, _value: Float) -> Result<(), Error> {
        Err(unknown_parameter(&self.name, parameter))
    }
}

/// Natural ventilation by the occupants opening the windows, as one
/// `ZoneVentilation:DesignFlowRate` per zone.
///
/// By default, only occupied zones are ventilated, following the
/// schedule of their occupants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NaturalVentilation {
    /// The name of the system
    pub name: String,

    /// The ventilated zones
    #[serde(default)]
    pub zones: Names,

    /// Air changes per hour
    #[serde(default = "default_natural_ach")]
    pub ach: Float,

    /// Ventilate when the zones are occupied. Otherwise, ventilate all
    /// the time.
    #[serde(default = "default_true")]
    pub occupancy_schedule: bool,

    /// Other fields of the `ZoneVentilation:DesignFlowRate` objects
    #[serde(default)]
    pub ventilation_fields: Vec<(String, FieldValue)>,
}

impl NaturalVentilation {
    /// Creates a natural ventilation of 0.7 air changes per hour in
    /// the occupied zones
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            zones: Names::All,
            ach: default_natural_ach(),
            occupancy_schedule: true,
            ventilation_fields: Vec::new(),
        }
    }

    /// Sets the zones
    pub fn with_zones<N: Into<Names>>(mut self, zones: N) -> Self {
        self.zones = zones.into();
        self
    }

    /// Sets the air changes per hour
    pub fn with_ach(mut self, ach: Float) -> Self {
        self.ach = ach;
        self
    }

    /// Ventilates all the time instead of when the zones are occupied
    pub fn always(mut self) -> Self {
        self.occupancy_schedule = false;
        self
    }

    /// Wraps the `NaturalVentilation` in a `System` enum
    pub fn wrap(self) -> System {
        System::NaturalVentilation(self)
    }
}

impl SystemBehaviour for NaturalVentilation {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> SystemCategory {
        SystemCategory::Ventilation
    }

    fn pre_process(&self, model: &mut Model) -> Result<(), Error> {
        let options = NaturalVentilationOptions {
            ach: self.ach,
            zones: self.zones.clone(),
            occupancy_schedule: self.occupancy_schedule,
            extra_fields: self.ventilation_fields.clone(),
            ..NaturalVentilationOptions::default()
        };
        let zones = add_natural_ventilation(model, &options)?;
        log::debug!("'{}' ventilates zones {:?}", self.name, zones);
        Ok(())
    }

    fn post_process(&self, _: &Model, _: &OutputTable) -> Result<Option<OutputTable>, Error> {
        Ok(None)
    }

    fn get_parameter(&self, parameter: &str) -> Result<Float, Error> {
        match parameter {
            "ach" => Ok(self.ach),
            _ => Err(unknown_parameter(&self.name, parameter)),
        }
    }

    fn set_parameter(&mut self, parameter: &str, value: Float) -> Result<(), Error> {
        match parameter {
            "ach" => self.ach = value,
            _ => return Err(unknown_parameter(&self.name, parameter)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use chrono::NaiveDate;

    const MODEL: &str = "
        Zone, Zone1, 0, 0, 0, 0, , 1, , , 10;
        Zone, Zone2, 0, 0, 0, 0, , 1, , , 20;
        Schedule:Compact, Occupancy, , Through: 12/31, For: AllDays, Until: 24:00, 1;
        People, Zone1 People, Zone1, Occupancy, People/Area, , 0.1;
        DesignSpecification:OutdoorAir, Zone1 OA, Flow/Person, 0.01;
        DesignSpecification:OutdoorAir, Zone2 OA, Flow/Person, 0.01;
        ZoneHVAC:IdealLoadsAirSystem, Zone1 Ideal Loads;
        ZoneHVAC:IdealLoadsAirSystem, Zone2 Ideal Loads;
    ";

    #[test]
    fn test_ahu_pre_process() {
        let mut model = Model::from_idf_str(MODEL).unwrap();
        AirHandlingUnit::new("AHU")
            .with_zones("Zone2")
            .with_ach(1.5)
            .with_heat_recovery(0.8)
            .pre_process(&mut model)
            .unwrap();

        let method = model
            .get_field_values(OUTDOOR_AIR, "Outdoor_Air_Method", "*")
            .unwrap();
        assert_eq!(method[0].to_string(), "Flow/Person");
        assert_eq!(method[1].to_string(), "AirChanges/Hour");
        let ach = model
            .get_field_values(OUTDOOR_AIR, "Outdoor_Air_Flow_Air_Changes_per_Hour", "Zone2 OA")
            .unwrap();
        assert_eq!(ach[0].as_number(), Some(1.5));

        let hr = model
            .get_field_values(IDEAL_LOADS, "Sensible_Heat_Recovery_Effectiveness", "*")
            .unwrap();
        assert!(hr[0].is_empty());
        assert_eq!(hr[1].as_number(), Some(0.8));
        assert_eq!(model.count("Output:Variable"), 1);
    }

    #[test]
    fn test_ahu_post_process() {
        let t0 = NaiveDate::from_ymd_opt(2009, 1, 1)
            .unwrap()
            .and_hms_opt(1, 0, 0)
            .unwrap();
        let mut t = OutputTable::new(vec![t0]).unwrap();
        t.push_column(format!("ZONE1:{} [m3/s](Hourly)", VENTILATION_FLOW), vec![0.01])
            .unwrap();
        t.push_column(format!("ZONE2:{} [m3/s](Hourly)", VENTILATION_FLOW), vec![0.02])
            .unwrap();
        let model = Model::from_idf_str(MODEL).unwrap();
        let r = AirHandlingUnit::new("AHU")
            .post_process(&model, &t)
            .unwrap()
            .unwrap();
        let expected = 0.03 * 3600. * 0.23 * 3600.;
        assert!((r.column("AHU_Energy_[J]").unwrap()[0] - expected).abs() < 1e-6);
    }

    #[test]
    fn test_ahu_control() {
        let mut model = Model::from_idf_str(MODEL).unwrap();
        AHUControl::new("Control")
            .pre_process(&mut model)
            .unwrap();
        let s = model
            .get_field_values(OUTDOOR_AIR, "Outdoor_Air_Schedule_Name", "*")
            .unwrap();
        assert!(s.iter().all(|v| v.to_string() == ALWAYS_ON));
        assert!(model.get_object("Schedule:Compact", ALWAYS_ON).is_ok());

        let r = AHUControl::new("Control")
            .with_schedule(ScheduleSource::Compact("Not there".to_string()))
            .pre_process(&mut model);
        assert!(r.is_err());
    }

    #[test]
    fn test_natural_ventilation() {
        let mut model = Model::from_idf_str(MODEL).unwrap();
        let natvent = NaturalVentilation::new("Windows");
        natvent.pre_process(&mut model).unwrap();
        assert_eq!(
            model.get_names("ZoneVentilation:DesignFlowRate").unwrap(),
            vec!["Natvent_Zone1"]
        );
        // Running it again replaces the objects
        natvent.pre_process(&mut model).unwrap();
        assert_eq!(model.count("ZoneVentilation:DesignFlowRate"), 1);

        NaturalVentilation::new("Windows")
            .always()
            .pre_process(&mut model)
            .unwrap();
        assert_eq!(model.count("ZoneVentilation:DesignFlowRate"), 2);
    }

    #[test]
    fn test_natural_ventilation_autocalculated_area() {
        let mut model = Model::from_idf_str(
            "
            Zone, Living, 0, 0, 0, 0, , 1, , , autocalculate;
            Zone, Attic;
            People, Living People, Living, Occupancy, People/Area, , 0.1;
        ",
        )
        .unwrap();
        NaturalVentilation::new("Windows")
            .pre_process(&mut model)
            .unwrap();
        assert_eq!(
            model.get_names("ZoneVentilation:DesignFlowRate").unwrap(),
            vec!["Natvent_Living"]
        );
    }
}
