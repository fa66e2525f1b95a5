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
    unknown_parameter, ScheduleSource, System, SystemBehaviour, SystemCategory,
    REPORTING_FREQUENCY,
};
use crate::{Error, Float};
use model::idf_utils::{
    add_output_variable, get_zones_ideal_loads, select_in_list, zone_names, IDEAL_LOADS,
};
use model::{Model, Names};
use results::OutputTable;
use schedule::library::{add_library_schedule, ALWAYS_ON, COOLING_OFF, HEATING_OFF};
use serde::{Deserialize, Serialize};

const DUAL_SETPOINT: &str = "ThermostatSetpoint:DualSetpoint";

fn heating_off() -> ScheduleSource {
    ScheduleSource::Library(HEATING_OFF.to_string())
}

fn cooling_off() -> ScheduleSource {
    ScheduleSource::Library(COOLING_OFF.to_string())
}

/// Sets the heating and cooling setpoints of the zones, through the
/// `ThermostatSetpoint:DualSetpoint` whose names contain the name of
/// one of the zones.
///
/// By default heating and cooling are disabled (i.e., setpoints of
/// -60C and 100C).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZoneThermostat {
    /// The name of the system
    pub name: String,

    /// The controlled zones
    #[serde(default)]
    pub zones: Names,

    /// The heating setpoint schedule
    #[serde(default = "heating_off")]
    pub heating_schedule: ScheduleSource,

    /// The cooling setpoint schedule
    #[serde(default = "cooling_off")]
    pub cooling_schedule: ScheduleSource,

    /// Makes the ideal loads of the zones available for heating all
    /// the time
    #[serde(default)]
    pub overwrite_heating_availability: bool,

    /// Makes the ideal loads of the zones available for cooling all
    /// the time
    #[serde(default)]
    pub overwrite_cooling_availability: bool,

    /// Reports the values of the setpoint schedules
    #[serde(default)]
    pub add_schedules_output_variables: bool,
}

impl ZoneThermostat {
    /// Creates a thermostat that disables heating and cooling in all the zones
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            zones: Names::All,
            heating_schedule: heating_off(),
            cooling_schedule: cooling_off(),
            overwrite_heating_availability: false,
            overwrite_cooling_availability: false,
            add_schedules_output_variables: false,
        }
    }

    /// Sets the zones
    pub fn with_zones<N: Into<Names>>(mut self, zones: N) -> Self {
        self.zones = zones.into();
        self
    }

    /// Sets the heating setpoint
    pub fn with_heating(mut self, schedule: ScheduleSource) -> Self {
        self.heating_schedule = schedule;
        self
    }

    /// Sets the cooling setpoint
    pub fn with_cooling(mut self, schedule: ScheduleSource) -> Self {
        self.cooling_schedule = schedule;
        self
    }

    /// Wraps the `ZoneThermostat` in a `System` enum
    pub fn wrap(self) -> System {
        System::ZoneThermostat(self)
    }
}

impl SystemBehaviour for ZoneThermostat {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> SystemCategory {
        SystemCategory::Other
    }

    fn pre_process(&self, model: &mut Model) -> Result<(), Error> {
        zone_names(model, &self.zones)?;

        let heating = self.heating_schedule.install(model)?;
        let cooling = self.cooling_schedule.install(model)?;

        if self.overwrite_heating_availability || self.overwrite_cooling_availability {
            add_library_schedule(model, ALWAYS_ON)?;
            let ideal_loads = Names::Only(get_zones_ideal_loads(model, &self.zones)?);
            if self.overwrite_heating_availability {
                model.set_field_values(
                    IDEAL_LOADS,
                    "Heating_Availability_Schedule_Name",
                    &ideal_loads,
                    ALWAYS_ON,
                )?;
            }
            if self.overwrite_cooling_availability {
                model.set_field_values(
                    IDEAL_LOADS,
                    "Cooling_Availability_Schedule_Name",
                    &ideal_loads,
                    ALWAYS_ON,
                )?;
            }
        }

        let thermostats = Names::Only(select_in_list(
            &model.get_names(DUAL_SETPOINT)?,
            &self.zones,
        ));
        model.set_field_values(
            DUAL_SETPOINT,
            "Heating_Setpoint_Temperature_Schedule_Name",
            &thermostats,
            heating.as_str(),
        )?;
        model.set_field_values(
            DUAL_SETPOINT,
            "Cooling_Setpoint_Temperature_Schedule_Name",
            &thermostats,
            cooling.as_str(),
        )?;

        if self.add_schedules_output_variables {
            add_output_variable(
                model,
                &Names::Only(vec![heating, cooling]),
                &["Schedule Value"],
                REPORTING_FREQUENCY,
            )?;
        }
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

#[cfg(test)]
mod testing {
    use super::*;

    const MODEL: &str = "
        Zone, Zone1;
        Zone, Zone2;
        ZoneHVAC:EquipmentConnections, Zone1, Zone1 Equipment, Zone1 Inlet, , Zone1 Node, Zone1 Return;
        ZoneHVAC:EquipmentConnections, Zone2, Zone2 Equipment, Zone2 Inlet, , Zone2 Node, Zone2 Return;
        ZoneHVAC:EquipmentList, Zone1 Equipment, SequentialLoad, ZoneHVAC:IdealLoadsAirSystem, Zone1 Ideal Loads, 1, 1;
        ZoneHVAC:EquipmentList, Zone2 Equipment, SequentialLoad, ZoneHVAC:IdealLoadsAirSystem, Zone2 Ideal Loads, 1, 1;
        ZoneHVAC:IdealLoadsAirSystem, Zone1 Ideal Loads;
        ZoneHVAC:IdealLoadsAirSystem, Zone2 Ideal Loads;
        ThermostatSetpoint:DualSetpoint, Zone1 Dual SP, Heating SP, Cooling SP;
        ThermostatSetpoint:DualSetpoint, Zone2 Dual SP, Heating SP, Cooling SP;
        Schedule:Compact, Winter, Temperature, Through: 12/31, For: AllDays, Until: 24:00, 19;
    ";

    #[test]
    fn test_defaults() {
        let mut model = Model::from_idf_str(MODEL).unwrap();
        ZoneThermostat::new("Thermostat")
            .with_zones("Zone2")
            .pre_process(&mut model)
            .unwrap();
        let h = model
            .get_field_values(
                DUAL_SETPOINT,
                "Heating_Setpoint_Temperature_Schedule_Name",
                "*",
            )
            .unwrap();
        assert_eq!(h[0].to_string(), "Heating SP");
        assert_eq!(h[1].to_string(), HEATING_OFF);
        let c = model
            .get_field_values(
                DUAL_SETPOINT,
                "Cooling_Setpoint_Temperature_Schedule_Name",
                "Zone2 Dual SP",
            )
            .unwrap();
        assert_eq!(c[0].to_string(), COOLING_OFF);
        assert!(model.get_object("Schedule:Compact", HEATING_OFF).is_ok());
        assert!(model.get_object("Schedule:Compact", COOLING_OFF).is_ok());
    }

    #[test]
    fn test_compact_and_availability() {
        let mut model = Model::from_idf_str(MODEL).unwrap();
        let mut t = ZoneThermostat::new("Thermostat")
            .with_heating(ScheduleSource::Compact("Winter".to_string()));
        t.overwrite_heating_availability = true;
        t.add_schedules_output_variables = true;
        t.pre_process(&mut model).unwrap();

        let h = model
            .get_field_values(
                DUAL_SETPOINT,
                "Heating_Setpoint_Temperature_Schedule_Name",
                "*",
            )
            .unwrap();
        assert!(h.iter().all(|v| v.to_string() == "Winter"));
        let a = model
            .get_field_values(IDEAL_LOADS, "Heating_Availability_Schedule_Name", "*")
            .unwrap();
        assert!(a.iter().all(|v| v.to_string() == ALWAYS_ON));
        let a = model
            .get_field_values(IDEAL_LOADS, "Cooling_Availability_Schedule_Name", "*")
            .unwrap();
        assert!(a.iter().all(|v| v.is_empty()));
        assert_eq!(model.count("Output:Variable"), 2);
    }
}
