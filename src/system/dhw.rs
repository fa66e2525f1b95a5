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

use crate::system::{energy_column, unknown_parameter, System, SystemBehaviour, SystemCategory};
use crate::{Error, Float};
use model::idf_utils::{get_number_of_people, zone_names};
use model::{Model, Names};
use results::OutputTable;
use serde::{Deserialize, Serialize};

fn default_cop() -> Float {
    0.95
}
fn default_setpoint() -> Float {
    60.
}
fn default_cold_water() -> Float {
    15.
}
fn default_volume() -> Float {
    50.
}
fn default_cp_water() -> Float {
    4183.2
}

/// Domestic hot water produced outside of the model.
///
/// The daily consumption is
/// `cp_water * (t_dhw_set_point - t_cold_water) * daily_volume_occupant`
/// per occupant, and it is spread evenly over the timesteps of the
/// results:
///
/// ```text
/// E = daily * n_days * n_people / cop
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DHWIdealExternal {
    /// The name of the system
    pub name: String,

    /// The zones whose occupants use hot water
    #[serde(default)]
    pub zones: Names,

    /// Coefficient of performance
    #[serde(default = "default_cop")]
    pub cop: Float,

    /// Temperature of the hot water, in C
    #[serde(default = "default_setpoint")]
    pub t_dhw_set_point: Float,

    /// Temperature of the water from the network, in C
    #[serde(default = "default_cold_water")]
    pub t_cold_water: Float,

    /// Litres of hot water per occupant per day
    #[serde(default = "default_volume")]
    pub daily_volume_occupant: Float,

    /// Specific heat of water, in J/(L.K)
    #[serde(default = "default_cp_water")]
    pub cp_water: Float,
}

impl DHWIdealExternal {
    /// Creates a hot water system for all the zones, with
    /// default values
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            zones: Names::All,
            cop: default_cop(),
            t_dhw_set_point: default_setpoint(),
            t_cold_water: default_cold_water(),
            daily_volume_occupant: default_volume(),
            cp_water: default_cp_water(),
        }
    }

    /// Sets the zones
    pub fn with_zones<N: Into<Names>>(mut self, zones: N) -> Self {
        self.zones = zones.into();
        self
    }

    /// Energy needed by one occupant in one day, in J
    pub fn daily_consumption_per_occupant(&self) -> Float {
        self.cp_water * (self.t_dhw_set_point - self.t_cold_water) * self.daily_volume_occupant
    }

    /// Wraps the `DHWIdealExternal` in a `System` enum
    pub fn wrap(self) -> System {
        System::DHWIdealExternal(self)
    }
}

impl SystemBehaviour for DHWIdealExternal {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> SystemCategory {
        SystemCategory::Dhw
    }

    fn pre_process(&self, model: &mut Model) -> Result<(), Error> {
        zone_names(model, &self.zones)?;
        Ok(())
    }

    fn post_process(
        &self,
        model: &Model,
        eplus_results: &OutputTable,
    ) -> Result<Option<OutputTable>, Error> {
        if self.cop <= 0. {
            return Err(Error::Value(format!(
                "The COP of '{}' must be positive, found {}",
                self.name, self.cop
            )));
        }
        let n_people = get_number_of_people(model, &self.zones)?;
        let n_days = eplus_results.n_days() as Float;
        let n_entries = eplus_results.len();

        let total = self.daily_consumption_per_occupant() * n_days * n_people / self.cop;
        let per_entry = if n_entries > 0 {
            total / n_entries as Float
        } else {
            0.
        };
        let ret =
            eplus_results.single_column(energy_column(&self.name), vec![per_entry; n_entries])?;
        Ok(Some(ret))
    }

    fn get_parameter(&self, parameter: &str) -> Result<Float, Error> {
        match parameter {
            "cop" => Ok(self.cop),
            "t_dhw_set_point" => Ok(self.t_dhw_set_point),
            "t_cold_water" => Ok(self.t_cold_water),
            "daily_volume_occupant" => Ok(self.daily_volume_occupant),
            "cp_water" => Ok(self.cp_water),
            _ => Err(unknown_parameter(&self.name, parameter)),
        }
    }

    fn set_parameter(&mut self, parameter: &str, value: Float) -> Result<(), Error> {
        match parameter {
            "cop" => self.cop = value,
            "t_dhw_set_point" => self.t_dhw_set_point = value,
            "t_cold_water" => self.t_cold_water = value,
            "daily_volume_occupant" => self.daily_volume_occupant = value,
            "cp_water" => self.cp_water = value,
            _ => return Err(unknown_parameter(&self.name, parameter)),
        }
        Ok(())
    }
}
