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
    energy_sum, unknown_parameter, ScheduleSource, System, SystemBehaviour, SystemCategory,
    REPORTING_FREQUENCY,
};
use crate::{Error, Float};
use model::idf_utils::{add_output_variable, zone_names};
use model::{FieldValue, Model, Names};
use results::OutputTable;
use schedule::library::ALWAYS_ON;
use serde::{Deserialize, Serialize};

/// Variable holding the heat released by an `OtherEquipment`
pub const OTHER_EQUIPMENT_ENERGY: &str = "Other Equipment Total Heating Energy";

fn default_cop() -> Float {
    1.
}

fn default_fraction_radiant() -> Float {
    0.2
}

fn always_on() -> ScheduleSource {
    ScheduleSource::Library(ALWAYS_ON.to_string())
}

fn default_category() -> SystemCategory {
    SystemCategory::Other
}

/// Equipment releasing heat in the zones (e.g., electric heaters)
///
/// One `OtherEquipment` called `<zone>_<name>_equipment` is created
/// per zone, with a design level of `design_level_power * cop`. When
/// `distribute_load` is set, the power is split between the zones in
/// proportion to their floor area (read from the `Floor_Area` of the
/// `Zone` objects).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OtherEquipment {
    /// The name of the system
    pub name: String,

    /// The zones where the equipment is
    #[serde(default)]
    pub zones: Names,

    /// Split `design_level_power` according to the floor area of the zones
    #[serde(default)]
    pub distribute_load: bool,

    /// Coefficient of performance
    #[serde(default = "default_cop")]
    pub cop: Float,

    /// The power of the equipment, in W
    pub design_level_power: Float,

    /// The fraction of the heat released as radiation
    #[serde(default = "default_fraction_radiant")]
    pub fraction_radiant: Float,

    /// When the equipment works
    #[serde(default = "always_on")]
    pub schedule: ScheduleSource,

    /// Report the energy consumed by the equipment
    #[serde(default)]
    pub add_output_variables: bool,

    /// The category its consumption is added to
    #[serde(default = "default_category")]
    pub category: SystemCategory,
}

impl OtherEquipment {
    /// Creates an always-on equipment of `design_level_power` W in all zones
    pub fn new<S: Into<String>>(name: S, design_level_power: Float) -> Self {
        Self {
            name: name.into(),
            zones: Names::All,
            distribute_load: false,
            cop: default_cop(),
            design_level_power,
            fraction_radiant: default_fraction_radiant(),
            schedule: always_on(),
            add_output_variables: false,
            category: default_category(),
        }
    }

    /// Sets the zones
    pub fn with_zones<N: Into<Names>>(mut self, zones: N) -> Self {
        self.zones = zones.into();
        self
    }

    /// Splits the power between the zones
    pub fn distributed(mut self) -> Self {
        self.distribute_load = true;
        self
    }

    /// Sets the COP
    pub fn with_cop(mut self, cop: Float) -> Self {
        self.cop = cop;
        self
    }

    /// Sets the schedule
    pub fn with_schedule(mut self, schedule: ScheduleSource) -> Self {
        self.schedule = schedule;
        self
    }

    /// Reports the energy consumed
    pub fn with_output_variables(mut self) -> Self {
        self.add_output_variables = true;
        self
    }

    /// Wraps the `OtherEquipment` in a `System` enum
    pub fn wrap(self) -> System {
        System::OtherEquipment(self)
    }

    fn equipment_name(&self, zone: &str) -> String {
        format!("{}_{}_equipment", zone, self.name)
    }

    /// The share of the power installed in each of `zones`
    fn load_ratios(&self, model: &Model, zones: &[String]) -> Result<Vec<Float>, Error> {
        if !self.distribute_load {
            return Ok(vec![1.; zones.len()]);
        }
        let mut areas = Vec::with_capacity(zones.len());
        for zone in zones {
            let area = model
                .get_object("Zone", zone)?
                .get("Floor_Area")?
                .as_number()
                .unwrap_or(0.);
            if area <= 0. {
                return Err(Error::Value(format!(
                    "Cannot distribute the load of '{}': zone '{}' has no Floor_Area",
                    self.name, zone
                )));
            }
            areas.push(area);
        }
        let total: Float = areas.iter().sum();
        Ok(areas.into_iter().map(|a| a / total).collect())
    }
}

impl SystemBehaviour for OtherEquipment {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> SystemCategory {
        self.category
    }

    fn pre_process(&self, model: &mut Model) -> Result<(), Error> {
        let zones = zone_names(model, &self.zones)?;
        let ratios = self.load_ratios(model, &zones)?;
        let schedule = self.schedule.install(model)?;

        let mut names = Vec::with_capacity(zones.len());
        for (zone, ratio) in zones.iter().zip(ratios) {
            let name = self.equipment_name(zone);
            if model.get_object("OtherEquipment", &name).is_ok() {
                model.delete_by_names("OtherEquipment", name.as_str())?;
            }
            model.new_object(
                "OtherEquipment",
                &[
                    ("Name", name.as_str().into()),
                    ("Zone_or_ZoneList_Name", zone.into()),
                    ("Schedule_Name", schedule.as_str().into()),
                    ("Design_Level_Calculation_Method", "EquipmentLevel".into()),
                    (
                        "Design_Level",
                        FieldValue::from(ratio * self.design_level_power * self.cop),
                    ),
                    ("Fraction_Radiant", self.fraction_radiant.into()),
                ],
            )?;
            names.push(name);
        }

        if self.add_output_variables {
            add_output_variable(
                model,
                &Names::Only(names),
                &[OTHER_EQUIPMENT_ENERGY],
                REPORTING_FREQUENCY,
            )?;
        }
        Ok(())
    }

    fn post_process(
        &self,
        model: &Model,
        eplus_results: &OutputTable,
    ) -> Result<Option<OutputTable>, Error> {
        if !self.add_output_variables {
            return Ok(None);
        }
        let names: Vec<String> = zone_names(model, &self.zones)?
            .iter()
            .map(|z| self.equipment_name(z))
            .collect();
        let cop = self.cop;
        let ret = energy_sum(
            &self.name,
            eplus_results,
            &names,
            OTHER_EQUIPMENT_ENERGY,
            |v| v / cop,
        )?;
        Ok(Some(ret))
    }

    fn get_parameter(&self, parameter: &str) -> Result<Float, Error> {
        match parameter {
            "cop" => Ok(self.cop),
            "design_level_power" => Ok(self.design_level_power),
            "fraction_radiant" => Ok(self.fraction_radiant),
            _ => Err(unknown_parameter(&self.name, parameter)),
        }
    }

    fn set_parameter(&mut self, parameter: &str, value: Float) -> Result<(), Error> {
        match parameter {
            "cop" => self.cop = value,
            "design_level_power" => self.design_level_power = value,
            "fraction_radiant" => self.fraction_radiant = value,
            _ => return Err(unknown_parameter(&self.name, parameter)),
        }
        Ok(())
    }
}
