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

//! The systems of a building.
//!
//! A system is either a piece of equipment (e.g., a boiler, the lights)
//! or an indicator (e.g., thermal discomfort). Every system can modify
//! the model before it is simulated ([`SystemBehaviour::pre_process`]) and
//! derive results from what EnergyPlus reported
//! ([`SystemBehaviour::post_process`]).
//!
//! Systems that consume energy report a single column called
//! `<name>_Energy_[J]`.

use crate::{Error, Float};
use model::{Model, Names};
use results::{OutputSelector, OutputTable};
use serde::{Deserialize, Serialize};

mod schedule_source;
pub use schedule_source::ScheduleSource;

mod heating;
pub use heating::{HeaterSimple, HeatingAuxiliary};

mod ventilation;
pub use ventilation::{AHUControl, AirHandlingUnit, NaturalVentilation};

mod dhw;
pub use dhw::DHWIdealExternal;

mod lighting;
pub use lighting::ArtificialLighting;

mod thermostat;
pub use thermostat::ZoneThermostat;

mod equipment;
pub use equipment::OtherEquipment;

mod sensor;
pub use sensor::Sensor;

mod overshoot;
pub use overshoot::{Overshoot, OCCUPANT_COUNT, OPERATIVE_TEMPERATURE};

/// Suffix of the columns reporting energy consumption
pub const ENERGY_SUFFIX: &str = "Energy_[J]";

/// Frequency of the `Output:Variable` requested by the systems
pub const REPORTING_FREQUENCY: &str = "Hourly";

/// Name of the column reporting the energy consumed by `name`
pub fn energy_column(name: &str) -> String {
    format!("{}_{}", name, ENERGY_SUFFIX)
}

/// What kind of system this is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SystemCategory {
    /// Heating
    Heating,
    /// Cooling
    Cooling,
    /// Ventilation
    Ventilation,
    /// Lighting
    Lighting,
    /// Auxiliary consumption (e.g., pumps)
    Auxiliary,
    /// Domestic hot water
    #[serde(rename = "DHW")]
    Dhw,
    /// Photovoltaic production
    #[serde(rename = "PV")]
    Pv,
    /// Anything else
    Other,
}

impl SystemCategory {
    /// All the categories, in the order they are reported
    pub const ALL: [SystemCategory; 8] = [
        SystemCategory::Heating,
        SystemCategory::Cooling,
        SystemCategory::Ventilation,
        SystemCategory::Lighting,
        SystemCategory::Auxiliary,
        SystemCategory::Dhw,
        SystemCategory::Pv,
        SystemCategory::Other,
    ];
}

impl std::fmt::Display for SystemCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SystemCategory::Heating => "HEATING",
            SystemCategory::Cooling => "COOLING",
            SystemCategory::Ventilation => "VENTILATION",
            SystemCategory::Lighting => "LIGHTING",
            SystemCategory::Auxiliary => "AUXILIARY",
            SystemCategory::Dhw => "DHW",
            SystemCategory::Pv => "PV",
            SystemCategory::Other => "OTHER",
        };
        write!(f, "{}", s)
    }
}

/// What the results of a system represent. Only [`OutputKind::Energy`]
/// results are added up into category totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// Energy consumption, in Joules
    Energy,
    /// Anything else (temperatures, comfort flags...)
    Indicator,
}

/// The behaviour shared by all systems
pub trait SystemBehaviour {
    /// The name of the system. It must be unique within a building.
    fn name(&self) -> &str;

    /// The category of the system
    fn category(&self) -> SystemCategory;

    /// What the results of [`SystemBehaviour::post_process`] represent
    fn output_kind(&self) -> OutputKind {
        OutputKind::Energy
    }

    /// Modifies the model before simulating it
    fn pre_process(&self, model: &mut Model) -> Result<(), Error>;

    /// Derives results from the outputs of EnergyPlus. Systems that only
    /// modify the model return `None`.
    fn post_process(
        &self,
        model: &Model,
        eplus_results: &OutputTable,
    ) -> Result<Option<OutputTable>, Error>;

    /// Gets the value of a numeric parameter
    fn get_parameter(&self, parameter: &str) -> Result<Float, Error>;

    /// Sets the value of a numeric parameter
    fn set_parameter(&mut self, parameter: &str, value: Float) -> Result<(), Error>;
}

/// Builds the error returned for parameters a system does not have
pub(crate) fn unknown_parameter(system: &str, parameter: &str) -> Error {
    Error::UnknownParameter {
        system: system.to_string(),
        parameter: parameter.to_string(),
    }
}

/// Keys used for selecting outputs
pub(crate) fn keys(names: &Names) -> Vec<String> {
    match names {
        Names::All => vec!["*".to_string()],
        Names::Only(v) => v.clone(),
    }
}

/// Selects `variable` for `keys`, scales it and adds up all the
/// selected columns into a single `<name>_Energy_[J]` column
pub(crate) fn energy_sum<F: Fn(Float) -> Float>(
    name: &str,
    eplus_results: &OutputTable,
    keys: &[String],
    variable: &str,
    scale: F,
) -> Result<OutputTable, Error> {
    let selected = OutputSelector::new(&[variable])
        .key_values(keys)
        .apply(eplus_results)?;
    let values = selected.sum_rows().into_iter().map(scale).collect();
    Ok(eplus_results.single_column(energy_column(name), values)?)
}

/// A system, as stored in a `Building`
///
/// ```
/// use energytool::{System, SystemBehaviour};
///
/// let heater: System = json5::from_str("{
///     type: 'HeaterSimple',
///     name: 'Boiler',
///     cop: 0.9,
/// }").unwrap();
/// assert_eq!(heater.name(), "Boiler");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
#[allow(clippy::upper_case_acronyms)]
pub enum System {
    /// Heating from ideal loads, divided by a COP
    HeaterSimple(HeaterSimple),
    /// Auxiliary consumption as a ratio of the heating needs
    HeatingAuxiliary(HeatingAuxiliary),
    /// Fans of a ventilation system
    AirHandlingUnit(AirHandlingUnit),
    /// Domestic hot water produced outside the model
    DHWIdealExternal(DHWIdealExternal),
    /// Electric lights
    ArtificialLighting(ArtificialLighting),
    /// Schedule of the mechanical ventilation
    AHUControl(AHUControl),
    /// Windows opened by the occupants
    NaturalVentilation(NaturalVentilation),
    /// Heating and cooling setpoints
    ZoneThermostat(ZoneThermostat),
    /// Equipment heating the zones
    OtherEquipment(OtherEquipment),
    /// Raw EnergyPlus outputs
    Sensor(Sensor),
    /// Thermal discomfort
    Overshoot(Overshoot),
}

impl System {
    fn inner(&self) -> &dyn SystemBehaviour {
        match self {
            System::HeaterSimple(s) => s,
            System::HeatingAuxiliary(s) => s,
            System::AirHandlingUnit(s) => s,
            System::DHWIdealExternal(s) => s,
            System::ArtificialLighting(s) => s,
            System::AHUControl(s) => s,
            System::NaturalVentilation(s) => s,
            System::ZoneThermostat(s) => s,
            System::OtherEquipment(s) => s,
            System::Sensor(s) => s,
            System::Overshoot(s) => s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn SystemBehaviour {
        match self {
            System::HeaterSimple(s) => s,
            System::HeatingAuxiliary(s) => s,
            System::AirHandlingUnit(s) => s,
            System::DHWIdealExternal(s) => s,
            System::ArtificialLighting(s) => s,
            System::AHUControl(s) => s,
            System::NaturalVentilation(s) => s,
            System::ZoneThermostat(s) => s,
            System::OtherEquipment(s) => s,
            System::Sensor(s) => s,
            System::Overshoot(s) => s,
        }
    }
}

impl SystemBehaviour for System {
    fn name(&self) -> &str {
        self.inner().name()
    }

    fn category(&self) -> SystemCategory {
        self.inner().category()
    }

    fn output_kind(&self) -> OutputKind {
        self.inner().output_kind()
    }

    fn pre_process(&self, model: &mut Model) -> Result<(), Error> {
        self.inner().pre_process(model)
    }

    fn post_process(
        &self,
        model: &Model,
        eplus_results: &OutputTable,
    ) -> Result<Option<OutputTable>, Error> {
        self.inner().post_process(model, eplus_results)
    }

    fn get_parameter(&self, parameter: &str) -> Result<Float, Error> {
        self.inner().get_parameter(parameter)
    }

    fn set_parameter(&mut self, parameter: &str, value: Float) -> Result<(), Error> {
        self.inner_mut().set_parameter(parameter, value)
    }
}

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn test_category_serde() {
        let c: SystemCategory = serde_json::from_str("\"DHW\"").unwrap();
        assert_eq!(c, SystemCategory::Dhw);
        let c: SystemCategory = serde_json::from_str("\"HEATING\"").unwrap();
        assert_eq!(c, SystemCategory::Heating);
        for c in SystemCategory::ALL {
            let s = serde_json::to_string(&c).unwrap();
            assert_eq!(s, format!("\"{}\"", c));
        }
    }

    #[test]
    fn test_serde_system() {
        // Hardcode a reference
        let rust_reference = HeaterSimple::new("Bedrooms heater")
            .with_zones(vec!["Bedroom"])
            .with_cop(0.5)
            .wrap();

        // Deserialize from hardcoded string and check they are the same
        let json5_heater: System = json5::from_str(
            "{
            type: 'HeaterSimple',
            name: \"Bedrooms heater\",
            zones: ['Bedroom'],
            cop: 0.5,
        }",
        )
        .unwrap();
        assert_eq!(
            format!("{:?}", rust_reference),
            format!("{:?}", json5_heater)
        );

        // Serialize and deserialize again
        let rust_json = serde_json::to_string(&rust_reference).unwrap();
        let again: System = serde_json::from_str(&rust_json).unwrap();
        assert_eq!(format!("{:?}", rust_reference), format!("{:?}", again));

        // Unknown fields are rejected
        let r: Result<System, _> =
            json5::from_str("{type: 'HeaterSimple', name: 'a', walrus: 2}");
        assert!(r.is_err());
    }

    #[test]
    fn test_parameters() {
        let mut s = HeaterSimple::new("Boiler").wrap();
        assert_eq!(s.get_parameter("cop").unwrap(), 1.);
        s.set_parameter("cop", 0.8).unwrap();
        assert_eq!(s.get_parameter("cop").unwrap(), 0.8);
        assert!(matches!(
            s.set_parameter("walrus", 1.),
            Err(Error::UnknownParameter { .. })
        ));
        assert_eq!(s.category(), SystemCategory::Heating);
        assert_eq!(s.output_kind(), OutputKind::Energy);
    }
}
