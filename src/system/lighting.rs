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
    energy_sum, keys, unknown_parameter, System, SystemBehaviour, SystemCategory,
    REPORTING_FREQUENCY,
};
use crate::{Error, Float};
use model::idf_utils::{add_output_variable, select_in_list, zone_names};
use model::{Model, Names};
use results::OutputTable;
use serde::{Deserialize, Serialize};

/// Variable holding the electricity consumed by the lights
pub const LIGHTS_ENERGY: &str = "Zone Lights Electricity Energy";

fn default_power_ratio() -> Float {
    3.
}

fn default_cop() -> Float {
    1.
}

/// Artificial lighting, with a power density in W/m2. It modifies the
/// `Lights` objects whose names contain the name of one of the zones.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArtificialLighting {
    /// The name of the system
    pub name: String,

    /// The lit zones
    #[serde(default)]
    pub zones: Names,

    /// Lighting power density, in W/m2
    #[serde(default = "default_power_ratio")]
    pub power_ratio: Float,

    /// Coefficient of performance
    #[serde(default = "default_cop")]
    pub cop: Float,
}

impl ArtificialLighting {
    /// Creates a lighting system of 3 W/m2 in all the zones
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            zones: Names::All,
            power_ratio: default_power_ratio(),
            cop: default_cop(),
        }
    }

    /// Sets the zones
    pub fn with_zones<N: Into<Names>>(mut self, zones: N) -> Self {
        self.zones = zones.into();
        self
    }

    /// Sets the power density
    pub fn with_power_ratio(mut self, power_ratio: Float) -> Self {
        self.power_ratio = power_ratio;
        self
    }

    /// Wraps the `ArtificialLighting` in a `System` enum
    pub fn wrap(self) -> System {
        System::ArtificialLighting(self)
    }
}

impl SystemBehaviour for ArtificialLighting {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> SystemCategory {
        SystemCategory::Lighting
    }

    fn pre_process(&self, model: &mut Model) -> Result<(), Error> {
        zone_names(model, &self.zones)?;
        add_output_variable(model, &self.zones, &[LIGHTS_ENERGY], REPORTING_FREQUENCY)?;

        let lights = Names::Only(select_in_list(&model.get_names("Lights")?, &self.zones));
        model.set_field_values(
            "Lights",
            "Design_Level_Calculation_Method",
            &lights,
            "Watts/Area",
        )?;
        model.set_field_values(
            "Lights",
            "Watts_per_Zone_Floor_Area",
            &lights,
            self.power_ratio,
        )?;
        Ok(())
    }

    fn post_process(
        &self,
        _model: &Model,
        eplus_results: &OutputTable,
    ) -> Result<Option<OutputTable>, Error> {
        if self.cop <= 0. {
            return Err(Error::Value(format!(
                "The COP of '{}' must be positive, found {}",
                self.name, self.cop
            )));
        }
        let cop = self.cop;
        let ret = energy_sum(
            &self.name,
            eplus_results,
            &keys(&self.zones),
            LIGHTS_ENERGY,
            |v| v / cop,
        )?;
        Ok(Some(ret))
    }

    fn get_parameter(&self, parameter: &str) -> Result<Float, Error> {
        match parameter {
            "power_ratio" => Ok(self.power_ratio),
            "cop" => Ok(self.cop),
            _ => Err(unknown_parameter(&self.name, parameter)),
        }
    }

    fn set_parameter(&mut self, parameter: &str, value: Float) -> Result<(), Error> {
        match parameter {
            "power_ratio" => self.power_ratio = value,
            "cop" => self.cop = value,
            _ => return Err(unknown_parameter(&self.name, parameter)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use model::FieldValue;

    #[test]
    fn test_lighting() {
        let mut model = Model::from_idf_str(
            "
            Zone, Kitchen;
            Zone, Bedroom;
            Lights, Kitchen Lights, Kitchen, Always, LightingLevel, 100;
            Lights, Bedroom Lights, Bedroom, Always, LightingLevel, 60;
        ",
        )
        .unwrap();
        ArtificialLighting::new("Lights")
            .with_zones("kitchen")
            .with_power_ratio(4.)
            .pre_process(&mut model)
            .unwrap();

        let methods = model
            .get_field_values("Lights", "Design_Level_Calculation_Method", "*")
            .unwrap();
        assert_eq!(methods[0].to_string(), "Watts/Area");
        assert_eq!(methods[1].to_string(), "LightingLevel");
        let density = model
            .get_field_values("Lights", "Watts_per_Zone_Floor_Area", "Kitchen Lights")
            .unwrap();
        assert_eq!(density, vec![FieldValue::Number(4.)]);
        assert!(model.count("Output:Variable") == 1);
    }

    #[test]
    fn test_non_positive_cop() {
        let model = Model::from_idf_str("Zone, Kitchen;").unwrap();
        let lights = ArtificialLighting {
            cop: 0.,
            ..ArtificialLighting::new("Lights")
        };
        assert!(matches!(
            lights.post_process(&model, &OutputTable::default()),
            Err(Error::Value(_))
        ));
    }
}
