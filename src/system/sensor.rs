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
use model::idf_utils::add_output_variable;
use model::{Model, Names};
use results::{OutputSelector, OutputTable};
use serde::{Deserialize, Serialize};

/// Reports EnergyPlus outputs untouched.
///
/// Each selected column is renamed `<name>_<KEY>_<variable>`, where `KEY` is
/// the key value as written by EnergyPlus (i.e., uppercase).
///
/// ```json5
/// {
///     type: "Sensor",
///     name: "Temperatures",
///     variables: ["Zone Mean Air Temperature"],
///     key_values: ["Kitchen", "Bedroom"], // or "*"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Sensor {
    /// The name of the system
    pub name: String,

    /// The EnergyPlus variables to report
    pub variables: Vec<String>,

    /// The keys of the variables
    #[serde(default)]
    pub key_values: Names,
}

impl Sensor {
    /// Creates a sensor reporting `variables` for all keys
    pub fn new<S: Into<String>, V: AsRef<str>>(name: S, variables: &[V]) -> Self {
        Self {
            name: name.into(),
            variables: variables.iter().map(|v| v.as_ref().to_string()).collect(),
            key_values: Names::All,
        }
    }

    /// Sets the key values
    pub fn with_key_values<N: Into<Names>>(mut self, key_values: N) -> Self {
        self.key_values = key_values.into();
        self
    }

    /// Wraps the `Sensor` in a `System` enum
    pub fn wrap(self) -> System {
        System::Sensor(self)
    }
}

impl SystemBehaviour for Sensor {
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
        if self.variables.is_empty() {
            return Err(Error::Value(format!(
                "Sensor '{}' has no variables",
                self.name
            )));
        }
        add_output_variable(model, &self.key_values, &self.variables, REPORTING_FREQUENCY)?;
        Ok(())
    }

    fn post_process(
        &self,
        _model: &Model,
        eplus_results: &OutputTable,
    ) -> Result<Option<OutputTable>, Error> {
        let keys = keys(&self.key_values);
        let mut ret = eplus_results.empty_like();
        for variable in self.variables.iter() {
            let selected = OutputSelector::new(&[variable])
                .key_values(&keys)
                .drop_suffix(true)
                .apply(eplus_results)?
                .rename_columns(|key| format!("{}_{}_{}", self.name, key, variable))?;
            ret.concat(&selected)?;
        }
        Ok(Some(ret))
    }

    fn get_parameter(&self, parameter: &str) -> Result<Float, Error> {
        Err(unknown_parameter(&self.name, parameter))
    }

    fn set_parameter(&mut self, parameter: &str, _value: Float) -> Result<(), Error> {
        Err(unknown_parameter(&self.name, parameter))
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use chrono::NaiveDate;

    fn results() -> OutputTable {
        let index = (1..=3)
            .map(|h| {
                NaiveDate::from_ymd_opt(2009, 6, 1)
                    .unwrap()
                    .and_hms_opt(h, 0, 0)
                    .unwrap()
            })
            .collect();
        let mut t = OutputTable::new(index).unwrap();
        t.push_column(
            "ZONE1:Zone Mean Air Temperature [C](Hourly)",
            vec![20., 21., 22.],
        )
        .unwrap();
        t.push_column(
            "ZONE2:Zone Mean Air Temperature [C](Hourly)",
            vec![18., 19., 20.],
        )
        .unwrap();
        t.push_column(
            "ZONE1:Zone Air Relative Humidity [%](Hourly)",
            vec![50., 51., 52.],
        )
        .unwrap();
        t
    }

    #[test]
    fn test_pre_process() {
        let mut model = Model::default();
        let sensor = Sensor::new(
            "Sensors",
            &["Zone Mean Air Temperature", "Zone Air Relative Humidity"],
        )
        .with_key_values("Zone1");
        sensor.pre_process(&mut model).unwrap();
        assert_eq!(model.count("Output:Variable"), 2);

        let empty = Sensor::new::<_, &str>("Nothing", &[]);
        assert!(empty.pre_process(&mut model).is_err());
    }

    #[test]
    fn test_post_process() {
        let sensor = Sensor::new(
            "Sensors",
            &["Zone Mean Air Temperature", "Zone Air Relative Humidity"],
        );
        let out = sensor
            .post_process(&Model::default(), &results())
            .unwrap()
            .unwrap();
        assert_eq!(
            out.columns(),
            vec![
                "Sensors_ZONE1_Zone Mean Air Temperature",
                "Sensors_ZONE2_Zone Mean Air Temperature",
                "Sensors_ZONE1_Zone Air Relative Humidity",
            ]
        );
        assert_eq!(
            out.column("Sensors_ZONE2_Zone Mean Air Temperature").unwrap(),
            &[18., 19., 20.]
        );
        assert_eq!(sensor.output_kind(), OutputKind::Indicator);

        let one = Sensor::new("Sensors", &["Zone Mean Air Temperature"]).with_key_values("zone2");
        let out = one.post_process(&Model::default(), &results()).unwrap().unwrap();
        assert_eq!(out.columns(), vec!["Sensors_ZONE2_Zone Mean Air Temperature"]);
    }
}
