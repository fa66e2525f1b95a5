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

//! Indicators computed over the results of many simulations.

use crate::simulate::SimulationRequest;
use crate::system::{keys, OCCUPANT_COUNT, OPERATIVE_TEMPERATURE};
use crate::{Error, Float};
use chrono::{Datelike, NaiveDateTime};
use indexmap::IndexMap;
use model::Names;
use results::{OutputSelector, OutputTable};
use serde::{Deserialize, Serialize};

/// Which results of a building to look at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultsGroup {
    /// The results of the systems and categories
    Building,
    /// The results as reported by EnergyPlus
    EnergyPlus,
}

/// How the values of an indicator are turned into a single number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Adds up the values
    Sum,
    /// Averages the values
    Mean,
    /// Mean squared difference with a reference series
    MeanSquaredError,
    /// Mean absolute difference with a reference series
    MeanAbsoluteError,
}

impl Aggregation {
    /// Whether a reference series is needed
    pub fn needs_reference(&self) -> bool {
        matches!(
            self,
            Aggregation::MeanSquaredError | Aggregation::MeanAbsoluteError
        )
    }

    fn apply(&self, values: &[Float], reference: Option<&[Float]>) -> Result<Float, Error> {
        let n = values.len() as Float;
        if values.is_empty() {
            return Err(Error::Value("Cannot aggregate an empty series".to_string()));
        }
        let ret = match self {
            Aggregation::Sum => values.iter().sum(),
            Aggregation::Mean => values.iter().sum::<Float>() / n,
            Aggregation::MeanSquaredError | Aggregation::MeanAbsoluteError => {
                let reference = reference.ok_or_else(|| {
                    Error::Value(format!("{:?} needs a reference series", self))
                })?;
                if reference.len() != values.len() {
                    return Err(Error::Value(format!(
                        "The reference has {} values, but the indicator has {}",
                        reference.len(),
                        values.len()
                    )));
                }
                let squared = *self == Aggregation::MeanSquaredError;
                values
                    .iter()
                    .zip(reference.iter())
                    .map(|(v, r)| {
                        let d = v - r;
                        if squared {
                            d * d
                        } else {
                            d.abs()
                        }
                    })
                    .sum::<Float>()
                    / n
            }
        };
        Ok(ret)
    }
}

/// Aggregates the column `indicator` of each request into one number
/// per request.
///
/// When a `window` is given, only the rows within it (both ends
/// included) are used. The `reference`, needed by the error
/// aggregations, must match the rows that are used.
pub fn aggregated_indicator(
    requests: &[SimulationRequest],
    group: ResultsGroup,
    indicator: &str,
    aggregation: Aggregation,
    reference: Option<&[Float]>,
    window: Option<(NaiveDateTime, NaiveDateTime)>,
) -> Result<Vec<Float>, Error> {
    if requests.is_empty() {
        return Err(Error::Value(
            "Cannot aggregate indicators of an empty list of simulations".to_string(),
        ));
    }
    let mut ret = Vec::with_capacity(requests.len());
    for request in requests {
        let building = request.building();
        let table = match group {
            ResultsGroup::Building => building.building_results()?,
            ResultsGroup::EnergyPlus => building.energyplus_results().ok_or(Error::NoResults)?,
        };
        let table = match window {
            Some((start, end)) => table.slice_between(start, end),
            None => table.clone(),
        };
        let values = table.column(indicator).ok_or_else(|| {
            Error::Value(format!(
                "Indicator '{}' is not in the {:?} results",
                indicator, group
            ))
        })?;
        ret.push(aggregation.apply(values, reference)?);
    }
    Ok(ret)
}

/// Percentage of the occupied timesteps during which the operative
/// temperature of each zone is at or above `threshold`, considering
/// only the months from `months.0` to `months.1` (both included).
///
/// Zones that are never occupied within those months get 0.
pub fn discomfort_percentage(
    eplus_results: &OutputTable,
    zones: &Names,
    threshold: Float,
    months: (u32, u32),
) -> Result<IndexMap<String, Float>, Error> {
    let keys = keys(zones);
    let select = |variable: &str| -> Result<OutputTable, Error> {
        Ok(OutputSelector::new(&[variable])
            .key_values(&keys)
            .drop_suffix(true)
            .apply(eplus_results)?)
    };
    let temperatures = select(OPERATIVE_TEMPERATURE)?;
    let occupancy = select(OCCUPANT_COUNT)?;

    let in_window: Vec<bool> = eplus_results
        .index()
        .iter()
        .map(|d| d.month() >= months.0 && d.month() <= months.1)
        .collect();

    let mut ret = IndexMap::new();
    for (zone, temperature) in temperatures.iter_columns() {
        let people = match occupancy
            .iter_columns()
            .find(|(z, _)| z.eq_ignore_ascii_case(zone))
        {
            Some((_, p)) => p,
            None => continue,
        };
        let mut occupied = 0usize;
        let mut hot = 0usize;
        for ((t, p), w) in temperature.iter().zip(people.iter()).zip(in_window.iter()) {
            if !*w || *p <= 0. {
                continue;
            }
            occupied += 1;
            if *t >= threshold {
                hot += 1;
            }
        }
        let percentage = if occupied == 0 {
            0.
        } else {
            100. * hot as Float / occupied as Float
        };
        ret.insert(zone.to_string(), percentage);
    }
    Ok(ret)
}

/// [`discomfort_percentage`] with a 28C threshold, from May to August
pub fn summer_discomfort_percentage(
    eplus_results: &OutputTable,
    zones: &Names,
) -> Result<IndexMap<String, Float>, Error> {
    discomfort_percentage(eplus_results, zones, 28., (5, 8))
}
