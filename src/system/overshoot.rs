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
    keys, unknown_parameter, OutputKind, System, SystemBehaviour, SystemCategory,
    REPORTING_FREQUENCY,
};
use crate::{Error, Float};
use model::idf_utils::{add_output_variable, zone_names};
use model::{Model, Names};
use results::{OutputSelector, OutputTable};
use serde::{Deserialize, Serialize};

/// Operative temperature of the zones
pub const OPERATIVE_TEMPERATURE: &str = "Zone Operative Temperature";

/// Number of people in the zones
pub const OCCUPANT_COUNT: &str = "Zone People Occupant Count";

fn default_threshold() -> Float {
    28.
}

/// Flags the timesteps in which a zone is occupied and its operative
/// temperature is at or above `temperature_threshold`.
///
/// Reports one `<name>_discomfort_<ZONE>` column (1 or 0) per zone, and one
/// `<name>_occupancy_<ZONE>` column (1 when occupied) if `occupancy_in_output`
/// is set. Only zones for which EnergyPlus reported both the
/// temperature and the occupancy are considered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Overshoot {
    /// The name of the system
    pub name: String,

    /// The zones to check
    #[serde(default)]
    pub zones: Names,

    /// Temperature above which occupants are uncomfortable, in C
    #[serde(default = "default_threshold")]
    pub temperature_threshold: Float,

    /// Also report when the zones are occupied
    #[serde(default)]
    pub occupancy_in_output: bool,
}

impl Overshoot {
    /// Checks all zones against a 28C threshold
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            zones: Names::All,
            temperature_threshold: default_threshold(),
            occupancy_in_output: false,
        }
    }

    /// Sets the zones
    pub fn with_zones<N: Into<Names>>(mut self, zones: N) -> Self {
        self.zones = zones.into();
        self
    }

    /// Sets the threshold
    pub fn with_threshold(mut self, threshold: Float) -> Self {
        self.temperature_threshold = threshold;
        self
    }

    /// Reports the occupancy as well
    pub fn with_occupancy(mut self) -> Self {
        self.occupancy_in_output = true;
        self
    }

    /// Wraps the `Overshoot` in a `System` enum
    pub fn wrap(self) -> System {
        System::Overshoot(self)
    }

    fn select(&self, eplus_results: &OutputTable, variable: &str) -> Result<OutputTable, Error> {
        Ok(OutputSelector::new(&[variable])
            .key_values(&keys(&self.zones))
            .drop_suffix(true)
            .apply(eplus_results)?)
    }
}

impl SystemBehaviour for Overshoot {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> SystemCategory {
        SystemCategory::Other
    }

    fn output_kind(&self) -> OutputKind {
        OutputKind::Indicator
    }

    fn pre_process(&self, model: &mut Model) -> Result<(), Error> {
        zone_names(model, &self.zones)?;
        add_output_variable(
            model,
            &self.zones,
            &[OPERATIVE_TEMPERATURE, OCCUPANT_COUNT],
            REPORTING_FREQUENCY,
        )?;
        Ok(())
    }

    fn post_process(
        &self,
        _model: &Model,
        eplus_results: &OutputTable,
    ) -> Result<Option<OutputTable>, Error> {
        let temperatures = self.select(eplus_results, OPERATIVE_TEMPERATURE)?;
        let occupancy = self.select(eplus_results, OCCUPANT_COUNT)?;

        let mut discomfort = eplus_results.empty_like();
        let mut occupied = eplus_results.empty_like();
        for (zone, temperature) in temperatures.iter_columns() {
            let people = match occupancy
                .iter_columns()
                .find(|(z, _)| z.eq_ignore_ascii_case(zone))
            {
                Some((_, p)) => p,
                None => {
                    log::warn!(
                        "'{}' found no occupancy reported for zone '{}'",
                        self.name,
                        zone
                    );
                    continue;
                }
            };
            let flags = temperature
                .iter()
                .zip(people.iter())
                .map(|(t, p)| {
                    if *t >= self.temperature_threshold && *p > 0. {
                        1.
                    } else {
                        0.
                    }
                })
                .collect();
            discomfort.push_column(format!("{}_discomfort_{}", self.name, zone), flags)?;
            if self.occupancy_in_output {
                let flags = people
                    .iter()
                    .map(|p| if *p > 0. { 1. } else { 0. })
                    .collect();
                occupied.push_column(format!("{}_occupancy_{}", self.name, zone), flags)?;
            }
        }

        if discomfort.n_columns() == 0 {
            return Err(Error::Value(format!(
                "'{}' found no zone with both '{}' and '{}'",
                self.name, OPERATIVE_TEMPERATURE, OCCUPANT_COUNT
            )));
        }
        discomfort.concat(&occupied)?;
        Ok(Some(discomfort))
    }

    fn get_parameter(&self, parameter: &str) -> Result<Float, Error> {
        match parameter {
            "temperature_threshold" => Ok(self.temperature_threshold),
            _ => Err(unknown_parameter(&self.name, parameter)),
        }
    }

    fn set_parameter(&mut self, parameter: &str, value: Float) -> Result<(), Error> {
        match parameter {
            "temperature_threshold" => self.temperature_threshold = value,
            _ => return Err(unknown_parameter(&self.name, parameter)),
        }
        Ok(())
    }
}
