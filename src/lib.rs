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

#![deny(missing_docs)]

//! Orchestration of EnergyPlus simulations.
//!
//! A [`Building`] is an IDF [`Model`] plus a set of [`System`]s. Systems
//! modify the model before it is simulated (e.g., requesting outputs,
//! setting schedules) and turn what EnergyPlus reports into energy
//! consumption or comfort indicators afterwards. Buildings are wrapped
//! into [`SimulationRequest`]s and run in batches by a
//! [`SimulationsRunner`].
//!
//! ```no_run
//! use energytool::*;
//!
//! let mut building = Building::from_file("house.idf").unwrap();
//! building.add_system(HeaterSimple::new("Boiler").with_cop(0.86).wrap()).unwrap();
//!
//! let mut requests = vec![SimulationRequest::full_year(building, "paris.epw").unwrap()];
//! let runner = SimulationsRunner::new(EnergyPlus::default(), RunnerOptions::default());
//! runner.run(&mut requests).unwrap();
//!
//! let results = requests[0].results().unwrap();
//! println!("{:?}", results.column_total(TOTAL_ENERGY));
//! ```

/// The kind of Floating point number used in the
/// library... the `"float"` feature means it becomes `f32`
/// and `f64` is used otherwise.
#[cfg(feature = "float")]
pub type Float = f32;

/// The kind of Floating point number used in the
/// library... the `"float"` feature means it becomes `f32`
/// and `f64` is used otherwise.
#[cfg(not(feature = "float"))]
pub type Float = f64;

/// The errors of this crate
mod error;
pub use error::Error;

/// The systems that can be installed in a building
pub mod system;
pub use system::{
    AHUControl, AirHandlingUnit, ArtificialLighting, DHWIdealExternal, HeaterSimple,
    HeatingAuxiliary, NaturalVentilation, OtherEquipment, OutputKind, Overshoot, ScheduleSource,
    Sensor, System, SystemBehaviour, SystemCategory, ZoneThermostat,
};

/// A model plus its systems
mod building;
pub use building::{Building, TOTAL_ENERGY};

/// Running EnergyPlus
pub mod engine;
pub use engine::{EnergyPlus, Engine, EngineJob};

/// Running many simulations
pub mod simulate;
pub use simulate::{
    BatchState, RunReport, RunnerOptions, SimulationRequest, SimulationsRunner,
};

/// Uncertain parameters and sampling
pub mod parameter;

/// Indicators over many simulations
pub mod indicators;

/// The configuration read by the `energytool` binary
mod config;
pub use config::RunConfig;

// Re-exports
pub use calendar::Period;
pub use model::{FieldValue, FieldValues, Model, Names};
pub use results::{read_eplus_res, OutputSelector, OutputTable};
