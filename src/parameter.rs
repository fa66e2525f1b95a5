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

//! Uncertain parameters and sampling.
//!
//! An [`UncertainParameter`] changes one or more inputs of a building:
//! numeric fields of the model or numeric parameters of its systems.
//! Values are either set as they are (`absolute`) or multiply the
//! nominal values found in the building.
//!
//! The [`SimulationSampler`] draws a Latin hypercube sample of the
//! parameters, builds one independent copy of the building per
//! sample and simulates them all.

use crate::building::Building;
use crate::engine::Engine;
use crate::simulate::{default_period, RunReport, SimulationRequest, SimulationsRunner};
use crate::system::SystemBehaviour;
use crate::{Error, Float};
use chrono::NaiveDateTime;
use model::{FieldValues, Names};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// An input of the building changed by an [`UncertainParameter`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "target", rename_all = "snake_case", deny_unknown_fields)]
pub enum ParameterTarget {
    /// A numeric field of some objects of the model
    ModelField {
        /// The type of the objects (e.g., `Material`)
        object_type: String,
        /// The objects
        #[serde(default)]
        names: Names,
        /// The field (e.g., `Conductivity`)
        field: String,
    },

    /// A numeric parameter of a system
    System {
        /// The name of the system
        name: String,
        /// The parameter (e.g., `cop`)
        parameter: String,
    },
}

/// The values of the targets of a parameter before changing them:
/// one list per target (a single value for system targets)
pub type NominalValues = Vec<Vec<Float>>;

/// A parameter whose value is not known precisely
///
/// ```
/// use energytool::parameter::{ParameterTarget, UncertainParameter};
///
/// let p: UncertainParameter = json5::from_str("{
///     name: 'Boiler efficiency',
///     bounds: [0.8, 1.1],
///     targets: [
///         { target: 'system', name: 'Boiler', parameter: 'cop' },
///     ],
/// }").unwrap();
/// assert!(!p.absolute);
/// assert_eq!(p.bounds, (0.8, 1.1));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UncertainParameter {
    /// The name of the parameter
    pub name: String,

    /// Lower and upper bounds
    pub bounds: (Float, Float),

    /// What the parameter changes
    pub targets: Vec<ParameterTarget>,

    /// If `true`, values are set as they are. Otherwise, they
    /// multiply the nominal values.
    #[serde(default)]
    pub absolute: bool,
}

impl UncertainParameter {
    /// Creates a relative parameter without targets
    pub fn new<S: Into<String>>(name: S, bounds: (Float, Float)) -> Self {
        Self {
            name: name.into(),
            bounds,
            targets: Vec::new(),
            absolute: false,
        }
    }

    /// Adds a model field target
    pub fn with_model_field<N: Into<Names>>(
        mut self,
        object_type: &str,
        names: N,
        field: &str,
    ) -> Self {
        self.targets.push(ParameterTarget::ModelField {
            object_type: object_type.to_string(),
            names: names.into(),
            field: field.to_string(),
        });
        self
    }

    /// Adds a system parameter target
    pub fn with_system_parameter(mut self, name: &str, parameter: &str) -> Self {
        self.targets.push(ParameterTarget::System {
            name: name.to_string(),
            parameter: parameter.to_string(),
        });
        self
    }

    /// Makes the parameter absolute
    pub fn absolute(mut self) -> Self {
        self.absolute = true;
        self
    }

    /// Checks the bounds and the targets
    pub fn validate(&self) -> Result<(), Error> {
        let (lo, hi) = self.bounds;
        if !lo.is_finite() || !hi.is_finite() || lo > hi {
            return Err(Error::Value(format!(
                "Parameter '{}' has invalid bounds ({}, {})",
                self.name, lo, hi
            )));
        }
        if self.targets.is_empty() {
            return Err(Error::Value(format!(
                "Parameter '{}' has no targets",
                self.name
            )));
        }
        Ok(())
    }

    /// Maps `u`, between 0 and 1, into the bounds
    pub fn scale(&self, u: Float) -> Float {
        let (lo, hi) = self.bounds;
        lo + u * (hi - lo)
    }

    /// Reads the current values of the targets in `building`
    pub fn nominal_values(&self, building: &Building) -> Result<NominalValues, Error> {
        let mut ret = Vec::with_capacity(self.targets.len());
        for target in self.targets.iter() {
            match target {
                ParameterTarget::ModelField {
                    object_type,
                    names,
                    field,
                } => {
                    let values = building
                        .model()
                        .get_field_values(object_type, field, names)?;
                    let mut numbers = Vec::with_capacity(values.len());
                    for v in values {
                        let n = v.as_number().ok_or_else(|| {
                            Error::Value(format!(
                                "Parameter '{}' targets '{}' of {}, which is not a number ('{}')",
                                self.name, field, object_type, v
                            ))
                        })?;
                        numbers.push(n);
                    }
                    ret.push(numbers);
                }
                ParameterTarget::System { name, parameter } => {
                    ret.push(vec![building.system(name)?.get_parameter(parameter)?]);
                }
            }
        }
        Ok(ret)
    }

    /// Sets `value` into the targets of `building`. `nominal` must come
    /// from [`UncertainParameter::nominal_values`], and is only used by
    /// relative parameters.
    pub fn set_value(
        &self,
        building: &mut Building,
        nominal: &NominalValues,
        value: Float,
    ) -> Result<(), Error> {
        if nominal.len() != self.targets.len() {
            return Err(Error::Value(format!(
                "Parameter '{}' has {} targets but {} nominal values were given",
                self.name,
                self.targets.len(),
                nominal.len()
            )));
        }
        for (target, nominal) in self.targets.iter().zip(nominal.iter()) {
            match target {
                ParameterTarget::ModelField {
                    object_type,
                    names,
                    field,
                } => {
                    let values: FieldValues = if self.absolute {
                        value.into()
                    } else {
                        nominal.iter().map(|n| n * value).collect::<Vec<Float>>().into()
                    };
                    building
                        .model_mut()
                        .set_field_values(object_type, field, names, values)?;
                }
                ParameterTarget::System { name, parameter } => {
                    let v = if self.absolute {
                        value
                    } else {
                        nominal.first().copied().unwrap_or(0.) * value
                    };
                    building.system_mut(name)?.set_parameter(parameter, v)?;
                }
            }
        }
        Ok(())
    }
}

/// Draws `n` points of a Latin hypercube in `dimensions` dimensions,
/// with coordinates between 0 and 1. Each dimension is split in `n`
/// intervals, and each interval gets exactly one point.
pub fn latin_hypercube<R: Rng>(rng: &mut R, n: usize, dimensions: usize) -> Vec<Vec<Float>> {
    let mut ret = vec![vec![0.0; dimensions]; n];
    let mut strata: Vec<usize> = (0..n).collect();
    for d in 0..dimensions {
        strata.shuffle(rng);
        for (point, stratum) in ret.iter_mut().zip(strata.iter()) {
            let u: Float = rng.gen();
            point[d] = (*stratum as Float + u) / n as Float;
        }
    }
    ret
}

/// Simulates a building for samples of uncertain parameters
pub struct SimulationSampler {
    building: Building,
    parameters: Vec<UncertainParameter>,
    nominal: Vec<NominalValues>,
    weather: PathBuf,
    start: NaiveDateTime,
    stop: NaiveDateTime,
    timestep_per_hour: usize,
    sample: Vec<Vec<Float>>,
    requests: Vec<SimulationRequest>,
}

impl SimulationSampler {
    /// Creates a sampler over the whole of 2009, with 6 timesteps per
    /// hour. Nominal values are read from `building` here.
    pub fn new<P: Into<PathBuf>>(
        building: Building,
        parameters: Vec<UncertainParameter>,
        weather: P,
    ) -> Result<Self, Error> {
        let mut nominal = Vec::with_capacity(parameters.len());
        for p in parameters.iter() {
            p.validate()?;
            nominal.push(p.nominal_values(&building)?);
        }
        let (start, stop) = default_period();
        Ok(Self {
            building,
            parameters,
            nominal,
            weather: weather.into(),
            start,
            stop,
            timestep_per_hour: 6,
            sample: Vec::new(),
            requests: Vec::new(),
        })
    }

    /// Sets the simulated period
    pub fn with_period(mut self, start: NaiveDateTime, stop: NaiveDateTime) -> Self {
        self.start = start;
        self.stop = stop;
        self
    }

    /// Sets the number of timesteps per hour
    pub fn with_timestep(mut self, timestep_per_hour: usize) -> Self {
        self.timestep_per_hour = timestep_per_hour;
        self
    }

    /// The parameters
    pub fn parameters(&self) -> &[UncertainParameter] {
        &self.parameters
    }

    /// The parameter values simulated so far, one row per simulation
    pub fn sample(&self) -> &[Vec<Float>] {
        &self.sample
    }

    /// The simulations run so far, in the same order as [`SimulationSampler::sample`]
    pub fn requests(&self) -> &[SimulationRequest] {
        &self.requests
    }

    /// Builds the request simulating `values` (one per parameter)
    pub fn request_for(&self, values: &[Float]) -> Result<SimulationRequest, Error> {
        if values.len() != self.parameters.len() {
            return Err(Error::Value(format!(
                "Expecting {} parameter values, found {}",
                self.parameters.len(),
                values.len()
            )));
        }
        let mut building = self.building.clone();
        for ((p, nominal), v) in self
            .parameters
            .iter()
            .zip(self.nominal.iter())
            .zip(values.iter())
        {
            p.set_value(&mut building, nominal, *v)?;
        }
        SimulationRequest::new(
            building,
            self.weather.clone(),
            self.start,
            self.stop,
            self.timestep_per_hour,
        )
    }

    /// Draws `size` new parameter combinations and simulates them.
    /// The same `seed` always gives the same sample.
    pub fn add_sample<E: Engine>(
        &mut self,
        size: usize,
        seed: Option<u64>,
        runner: &SimulationsRunner<E>,
    ) -> Result<RunReport, Error> {
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let values: Vec<Vec<Float>> = latin_hypercube(&mut rng, size, self.parameters.len())
            .into_iter()
            .map(|u| {
                u.iter()
                    .zip(self.parameters.iter())
                    .map(|(u, p)| p.scale(*u))
                    .collect()
            })
            .collect();

        let mut requests = Vec::with_capacity(size);
        for v in values.iter() {
            requests.push(self.request_for(v)?);
        }
        log::info!("Simulating {} new samples", size);
        let report = runner.run(&mut requests)?;

        self.sample.extend(values);
        self.requests.extend(requests);
        Ok(report)
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::system::HeaterSimple;
    use model::Model;

    fn building() -> Building {
        let model = Model::from_idf_str(
            "
            Version, 9.4;
            Zone, Kitchen;
            Material, Brick, Rough, 0.1, 0.8, 1900, 800;
            Material, Wool, Rough, 0.1, 0.04, 30, 1000;
        ",
        )
        .unwrap();
        let mut b = Building::new(model);
        b.add_system(HeaterSimple::new("Boiler").with_cop(0.9).wrap())
            .unwrap();
        b
    }

    fn conductivities(b: &Building) -> Vec<Float> {
        b.model()
            .get_field_values("Material", "Conductivity", "*")
            .unwrap()
            .iter()
            .map(|v| v.as_number().unwrap())
            .collect()
    }

    #[test]
    fn test_relative() {
        let reference = building();
        let p = UncertainParameter::new("Conductivity", (0.5, 1.5))
            .with_model_field("Material", "*", "Conductivity")
            .with_system_parameter("Boiler", "cop");
        let nominal = p.nominal_values(&reference).unwrap();
        assert_eq!(nominal, vec![vec![0.8, 0.04], vec![0.9]]);

        let mut b = reference.clone();
        p.set_value(&mut b, &nominal, 2.).unwrap();
        assert_eq!(conductivities(&b), vec![1.6, 0.08]);
        assert_eq!(b.system("Boiler").unwrap().get_parameter("cop").unwrap(), 1.8);

        // The reference is untouched
        assert_eq!(conductivities(&reference), vec![0.8, 0.04]);
    }

    #[test]
    fn test_absolute() {
        let reference = building();
        let p = UncertainParameter::new("Wool", (0.03, 0.05))
            .with_model_field("Material", "Wool", "Conductivity")
            .absolute();
        let nominal = p.nominal_values(&reference).unwrap();
        let mut b = reference.clone();
        p.set_value(&mut b, &nominal, 0.035).unwrap();
        assert_eq!(conductivities(&b), vec![0.8, 0.035]);
    }

    #[test]
    fn test_invalid() {
        let b = building();
        let p = UncertainParameter::new("Nothing", (0., 1.));
        assert!(p.validate().is_err());
        let p = UncertainParameter::new("Backwards", (1., 0.)).with_system_parameter("Boiler", "cop");
        assert!(p.validate().is_err());
        let p = UncertainParameter::new("Walrus", (0., 1.)).with_system_parameter("Walrus", "cop");
        assert!(matches!(p.nominal_values(&b), Err(Error::SystemNotFound(_))));
        let p = UncertainParameter::new("Roughness", (0., 1.))
            .with_model_field("Material", "*", "Roughness");
        assert!(p.nominal_values(&b).is_err());
    }

    #[test]
    fn test_latin_hypercube() {
        let mut rng = StdRng::seed_from_u64(42);
        let n = 10;
        let sample = latin_hypercube(&mut rng, n, 3);
        assert_eq!(sample.len(), n);
        for d in 0..3 {
            let mut strata: Vec<usize> = sample
                .iter()
                .map(|p| {
                    assert!((0.0..1.0).contains(&p[d]));
                    (p[d] * n as Float).floor() as usize
                })
                .collect();
            strata.sort();
            assert_eq!(strata, (0..n).collect::<Vec<usize>>());
        }

        let mut again = StdRng::seed_from_u64(42);
        assert_eq!(sample, latin_hypercube(&mut again, n, 3));
    }

    #[test]
    fn test_request_for() {
        let p = UncertainParameter::new("Boiler", (0.5, 1.)).with_system_parameter("Boiler", "cop");
        let sampler = SimulationSampler::new(building(), vec![p], "w.epw").unwrap();
        let r = sampler.request_for(&[0.5]).unwrap();
        assert_eq!(
            r.building()
                .system("Boiler")
                .unwrap()
                .get_parameter("cop")
                .unwrap(),
            0.45
        );
        assert!(sampler.request_for(&[0.5, 1.]).is_err());
    }
}
