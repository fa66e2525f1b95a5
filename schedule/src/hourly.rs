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

use crate::error::ScheduleError;
use chrono::{Datelike, NaiveDateTime, Timelike};
use model::{FieldValue, Float, Model};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Hours in a regular year
pub const HOURS_IN_YEAR: usize = 8760;

/// Hours in a leap year
pub const HOURS_IN_LEAP_YEAR: usize = 8784;

/// The kinds of value a schedule can hold, as understood by EnergyPlus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ScheduleType {
    /// No units
    #[default]
    Dimensionless,
    /// A temperature in C
    Temperature,
    /// A temperature difference in K
    DeltaTemperature,
    /// Precipitation rate
    PrecipitationRate,
    /// An angle in degrees
    Angle,
    /// A convection coefficient
    ConvectionCoefficient,
    /// Activity level
    ActivityLevel,
    /// A velocity
    Velocity,
    /// A capacity
    Capacity,
    /// A power
    Power,
    /// On/Off
    Availability,
    /// A percentage
    Percent,
    /// A control type
    Control,
    /// A mode
    Mode,
}

impl ScheduleType {
    /// All the valid schedule types
    pub const ALL: [ScheduleType; 14] = [
        ScheduleType::Dimensionless,
        ScheduleType::Temperature,
        ScheduleType::DeltaTemperature,
        ScheduleType::PrecipitationRate,
        ScheduleType::Angle,
        ScheduleType::ConvectionCoefficient,
        ScheduleType::ActivityLevel,
        ScheduleType::Velocity,
        ScheduleType::Capacity,
        ScheduleType::Power,
        ScheduleType::Availability,
        ScheduleType::Percent,
        ScheduleType::Control,
        ScheduleType::Mode,
    ];
}

impl Display for ScheduleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ScheduleType::Dimensionless => "Dimensionless",
            ScheduleType::Temperature => "Temperature",
            ScheduleType::DeltaTemperature => "DeltaTemperature",
            ScheduleType::PrecipitationRate => "PrecipitationRate",
            ScheduleType::Angle => "Angle",
            ScheduleType::ConvectionCoefficient => "ConvectionCoefficient",
            ScheduleType::ActivityLevel => "ActivityLevel",
            ScheduleType::Velocity => "Velocity",
            ScheduleType::Capacity => "Capacity",
            ScheduleType::Power => "Power",
            ScheduleType::Availability => "Availability",
            ScheduleType::Percent => "Percent",
            ScheduleType::Control => "Control",
            ScheduleType::Mode => "Mode",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ScheduleType {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScheduleType::ALL
            .iter()
            .find(|t| t.to_string().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| ScheduleError::UnknownType(s.to_string()))
    }
}

/// A schedule with one value per hour of the year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySchedule {
    /// The name of the `Schedule:File`
    pub name: String,

    /// What the values are
    #[serde(default)]
    pub schedule_type: ScheduleType,

    /// One value per hour
    pub values: Vec<Float>,
}

impl HourlySchedule {
    /// Creates a new `HourlySchedule`, checking that it has 8760 (or 8784) values
    pub fn new<S: Into<String>>(
        name: S,
        schedule_type: ScheduleType,
        values: Vec<Float>,
    ) -> Result<Self, ScheduleError> {
        let ret = Self {
            name: name.into(),
            schedule_type,
            values,
        };
        ret.validate()?;
        Ok(ret)
    }

    /// Creates an `HourlySchedule` with the same value all year long
    pub fn constant<S: Into<String>>(name: S, schedule_type: ScheduleType, value: Float) -> Self {
        Self {
            name: name.into(),
            schedule_type,
            values: vec![value; HOURS_IN_YEAR],
        }
    }

    /// Checks the number of values
    pub fn validate(&self) -> Result<(), ScheduleError> {
        let n = self.values.len();
        if n != HOURS_IN_YEAR && n != HOURS_IN_LEAP_YEAR {
            return Err(ScheduleError::WrongLength {
                name: self.name.clone(),
                found: n,
            });
        }
        Ok(())
    }
}

/// Where to write the CSV file read by the `Schedule:File` objects
#[derive(Debug, Clone, Default)]
pub struct ScheduleFileOptions {
    /// The directory. Defaults to a folder in the system's temporary directory
    pub directory: Option<PathBuf>,

    /// The name of the file. Defaults to a random name
    pub file_name: Option<String>,
}

fn io_error(path: &Path, source: std::io::Error) -> ScheduleError {
    ScheduleError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Writes hourly schedules into a CSV file (one column per schedule) and adds
/// one `Schedule:File` per schedule to the model. Returns the path to the
/// CSV file.
///
/// If an `index` is given (one timestamp per value), rows are sorted by month,
/// day and time, so that data spanning two years becomes a single year.
///
/// Everything is validated before touching the model.
pub fn add_hourly_schedules(
    model: &mut Model,
    schedules: &[HourlySchedule],
    index: Option<&[NaiveDateTime]>,
    options: &ScheduleFileOptions,
) -> Result<PathBuf, ScheduleError> {
    let first = schedules.first().ok_or(ScheduleError::Empty)?;
    let n = first.values.len();

    let mut names: Vec<String> = Vec::with_capacity(schedules.len());
    for s in schedules {
        s.validate()?;
        if s.values.len() != n {
            return Err(ScheduleError::InconsistentLength {
                name: s.name.clone(),
                expected: n,
                found: s.values.len(),
            });
        }
        let upper = s.name.to_uppercase();
        if names.contains(&upper) || model.get_object("Schedule:File", &s.name).is_ok() {
            return Err(ScheduleError::AlreadyExists(s.name.clone()));
        }
        names.push(upper);
    }

    let mut order: Vec<usize> = (0..n).collect();
    if let Some(index) = index {
        if index.len() != n {
            return Err(ScheduleError::InconsistentLength {
                name: "index".to_string(),
                expected: n,
                found: index.len(),
            });
        }
        order.sort_by_key(|i| {
            let d = index[*i];
            (d.month(), d.day(), d.hour(), d.minute())
        });
    }

    // Write the file
    let directory = match &options.directory {
        Some(d) => d.clone(),
        None => std::env::temp_dir().join("energytool-schedules"),
    };
    std::fs::create_dir_all(&directory).map_err(|e| io_error(&directory, e))?;
    let file_name = match &options.file_name {
        Some(f) => f.clone(),
        None => format!("{}.csv", uuid::Uuid::new_v4()),
    };
    let path = directory.join(file_name);

    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record(schedules.iter().map(|s| s.name.as_str()))?;
    for i in order {
        writer.write_record(schedules.iter().map(|s| s.values[i].to_string()))?;
    }
    writer.flush().map_err(|e| io_error(&path, e))?;
    let full_path = std::fs::canonicalize(&path).map_err(|e| io_error(&path, e))?;
    log::debug!(
        "Wrote {} hourly schedules into '{}'",
        schedules.len(),
        full_path.display()
    );

    for (i, s) in schedules.iter().enumerate() {
        model.new_object(
            "Schedule:File",
            &[
                ("Name", s.name.as_str().into()),
                ("Schedule_Type_Limits_Name", s.schedule_type.to_string().into()),
                ("File_Name", full_path.display().to_string().into()),
                ("Column_Number", (i + 1).into()),
                ("Rows_to_Skip_at_Top", 1.into()),
                ("Number_of_Hours_of_Data", n.into()),
                ("Column_Separator", "Comma".into()),
                ("Interpolate_to_Timestep", "No".into()),
            ],
        )?;
    }

    Ok(full_path)
}

/// Gets the CSV file read by a `Schedule:File`
pub fn schedule_file_path(model: &Model, name: &str) -> Result<PathBuf, ScheduleError> {
    let obj = model.get_object("Schedule:File", name)?;
    match obj.get("File_Name")? {
        FieldValue::Empty => Err(ScheduleError::Model(model::ModelError::Value(format!(
            "Schedule:File '{}' has no File_Name",
            name
        )))),
        v => Ok(PathBuf::from(v.to_string())),
    }
}
