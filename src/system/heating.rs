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
    energy_sum, unknown_parameter, System, SystemBehaviour, SystemCategory, REPORTING_FREQUENCY,
};
use crate::{Error, Float};
use model::idf_utils::{add_output_variable, get_zones_ideal_loads};
use model::{Model, Names};
use results::OutputTable;
use serde::{Deserialize, Serialize};

/// Variable holding the heating delivered by ideal loads
pub const IDEAL_HEATING_ENERGY: &str = "Zone Ideal Loads Supply Air Total Heating Energy";

fn default_cop() -> Float {
    1.
}

fn default_ratio() -> Float {
    0.05
}

/// Requests the heating energy of the ideal loads serving `zones`
fn request_ideal_heating(model: &mut Model, zones: &Names) -> Result<(), Error> {
    let ideal_loads = get_zones_ideal_loads(model, zones)?;
    add_output_variable(
        model,
        &Names::Only(ideal_loads),
        &[IDEAL_HEATING_ENERGY],
        REPORTING_FREQUENCY,
    )?;
    Ok(())
}

/// A simple heating system with a Coefficient of Performance.
///
/// Zones are heated by `ZoneHVAC:IdealLoadsAirSystem`, and the energy
/// consumed is the heating they deliver divided by the COP, added up
/// over all the zones.
///
/// ```json5
/// {
///     type: "HeaterSimple",
///     name: "Main boiler",
///     zones: ["Kitchen", "Bedroom"], // or "*"
///     cop: 0.86,
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeaterSimple {
    /// The name of the system
    pub name: String,

    /// The heated zones
    #[serde(default)]
    pub zones: Names,

    /// Coefficient of performance
    #[serde(default = "default_cop")]
    pub cop: Float,
}

impl HeaterSimple {
    /// Creates a heater with a COP of 1 for all the zones
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            zones: Names::All,
            cop: default_cop(),
        }
    }

    /// Sets the heated zones
    pub fn with_zones<N: Into<Names>>(mut self, zones: N) -> Self {
        self.zones = zones.into();
        self
    }

    /// Sets the COP
    pub fn with_cop(mut self, cop: Float) -> Self {
        self.cop = cop;
        self
    }

    /// Wraps the `HeaterSimple` in a `System` enum
    pub fn wrap(self) -> System {
        System::HeaterSimple(self)
    }
}

impl SystemBehaviour for HeaterSimple {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> SystemCategory {
        SystemCategory::Heating
    }

    fn pre_process(&self, model: &mut Model) -> Result<(), Error> {
        request_ideal_heating(model, &self.zones)
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
        let ideal_loads = get_zones_ideal_loads(model, &self.zones)?;
        let cop = self.cop;
        let ret = energy_sum(
            &self.name,
            eplus_results,
            &ideal_loads,
            IDEAL_HEATING_ENERGY,
            |v| v / cop,
        )?;
        Ok(Some(ret))
    }

    fn get_parameter(&self, parameter: &str) -> Result<Float, Error> {
        match parameter {
            "cop" => Ok(self.cop),
            _ => Err(unknown_parameter(&self.name, parameter)),
        }
    }

    fn set_parameter(&mut self, parameter: &str, value: Float) -> Result<(), Error> {
        match parameter {
            "cop" => self.cop = value,
            _ => return Err(unknown_parameter(&self.name, parameter)),
        }
        Ok(())
    }
}

/// Auxiliary consumption of a heating system (e.g., pumps), as a
/// ratio of the heating delivered by the ideal loads of the zones.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeatingAuxiliary {
    /// The name of the system
    pub name: String,

    /// The heated zones
    #[serde(default)]
    pub zones: Names,

    /// Auxiliary consumption per unit of heating
    #[serde(default = "default_ratio")]
    pub ratio: Float,
}

impl HeatingAuxiliary {
    /// Creates an auxiliary consumption of 5% for all the zones
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            zones: Names::All,
            ratio: default_ratio(),
        }
    }

    /// Sets the zones
    pub fn with_zones<N: Into<Names>>(mut self, zones: N) -> Self {
        self.zones = zones.into();
        self
    }

    /// Sets the ratio
    pub fn with_ratio(mut self, ratio: Float) -> Self {
        self.ratio = ratio;
        self
    }

    /// Wraps the `HeatingAuxiliary` in a `System` enum
    pub fn wrap(self) -> System {
        System::HeatingAuxiliary(self)
    }
}

impl SystemBehaviour for HeatingAuxiliary {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> SystemCategory {
        SystemCategory::Auxiliary
    }

    fn pre_process(&self, model: &mut Model) -> Result<(), Error> {
        request_ideal_heating(model, &self.zones)
    }

    fn post_process(
        &self,
        model: &Model,
        eplus_results: &OutputTable,
    ) -> Result<Option<OutputTable>, Error> {
        let ideal_loads = get_zones_ideal_loads(model, &self.zones)?;
        let ratio = self.ratio;
        let ret = energy_sum(
            &self.name,
            eplus_results,
            &ideal_loads,
            IDEAL_HEATING_ENERGY,
            |v| v * ratio,
        )?;
        Ok(Some(ret))
    }

    fn get_parameter(&self, parameter: &str) -> Result<Float, Error> {
        match parameter {
            "ratio" => Ok(self.ratio),
            _ => Err(unknown_parameter(&self.name, parameter)),
        }
    }

    fn set_parameter(&mut self, parameter: &str, value: Float) -> Result<(), Error> {
        match parameter {
            "ratio" => self.ratio = value,
            _ => return Err(unknown_parameter(&self.name, parameter)),
        }
        Ok(())
    }
}
