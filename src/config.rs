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

use crate::building::Building;
use crate::engine::EnergyPlus;
use crate::simulate::{default_period, RunnerOptions, SimulationRequest};
use crate::system::System;
use crate::Error;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_start() -> NaiveDateTime {
    default_period().0
}

fn default_stop() -> NaiveDateTime {
    default_period().1
}

fn default_timestep() -> usize {
    6
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Everything needed for simulating one building, as read from a
/// JSON5 file.
///
/// Relative paths in a file read through [`RunConfig::from_file`] are
/// relative to that file.
///
/// ```
/// use energytool::RunConfig;
///
/// let config = RunConfig::from_json5("{
///     model: 'house.idf',
///     weather: 'paris.epw',
///     start: '2009-06-01T00:00:00',
///     stop: '2009-08-31T23:00:00',
///     timestep_per_hour: 4,
///     systems: [
///         { type: 'HeaterSimple', name: 'Boiler', cop: 0.9 },
///         { type: 'ArtificialLighting', name: 'Lights', zones: '*' },
///     ],
/// }").unwrap();
/// assert_eq!(config.systems.len(), 2);
/// assert_eq!(config.runner.batch_size, 10);
/// assert!(config.energyplus.readvars);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// The IDF file
    pub model: PathBuf,

    /// The EPW file
    pub weather: PathBuf,

    /// Start of the simulation
    #[serde(default = "default_start")]
    pub start: NaiveDateTime,

    /// End of the simulation
    #[serde(default = "default_stop")]
    pub stop: NaiveDateTime,

    /// Number of timesteps per hour
    #[serde(default = "default_timestep")]
    pub timestep_per_hour: usize,

    /// How to call EnergyPlus
    #[serde(default)]
    pub energyplus: EnergyPlus,

    /// How to run the simulations
    #[serde(default)]
    pub runner: RunnerOptions,

    /// The systems in the building, in the order they are processed
    #[serde(default)]
    pub systems: Vec<System>,

    /// Where to write the results of the building. If not given, they
    /// go to the standard output.
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// `trace`, `debug`, `info`, `warn` or `error`
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl RunConfig {
    /// Reads a configuration from JSON5 text
    pub fn from_json5(text: &str) -> Result<Self, Error> {
        json5::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    /// Reads a configuration from a JSON5 file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let mut ret: Self = json5::from_str(&text)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        if let Some(dir) = path.parent() {
            ret.resolve_paths(dir);
        }
        Ok(ret)
    }

    /// Makes relative paths relative to `dir`
    pub fn resolve_paths(&mut self, dir: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = dir.join(&*p);
            }
        };
        resolve(&mut self.model);
        resolve(&mut self.weather);
        if let Some(output) = self.output.as_mut() {
            resolve(output);
        }
    }

    /// Loads the model and adds the systems
    pub fn building(&self) -> Result<Building, Error> {
        let mut building = Building::from_file(&self.model)?;
        for system in self.systems.iter() {
            building.add_system(system.clone())?;
        }
        Ok(building)
    }

    /// Builds the request simulating this configuration
    pub fn request(&self) -> Result<SimulationRequest, Error> {
        SimulationRequest::new(
            self.building()?,
            self.weather.clone(),
            self.start,
            self.stop,
            self.timestep_per_hour,
        )
    }
}
