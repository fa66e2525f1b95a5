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

use crate::Error;
use model::Model;
use schedule::library::add_library_schedule;
use schedule::{add_hourly_schedules, HourlySchedule, ScheduleFileOptions};
use serde::{Deserialize, Serialize};

/// Where the schedule used by a system comes from
///
/// ```json5
/// { library: "ON_24h24h_FULL_YEAR" }
/// { compact: "My existing schedule" }
/// { hourly: { name: "Heating setpoint", schedule_type: "Temperature", values: [ /* 8760 values */ ] } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleSource {
    /// A `Schedule:Compact` from the library in `schedule::library`,
    /// copied into the model if needed
    Library(String),

    /// A `Schedule:Compact` that must already be in the model
    Compact(String),

    /// A series of hourly values, written into a `Schedule:File`. An existing
    /// `Schedule:File` with the same name is replaced.
    Hourly(HourlySchedule),
}

impl ScheduleSource {
    /// Makes sure the schedule is in `model`, returning its name
    pub fn install(&self, model: &mut Model) -> Result<String, Error> {
        match self {
            ScheduleSource::Library(name) => {
                add_library_schedule(model, name)?;
                Ok(name.clone())
            }
            ScheduleSource::Compact(name) => {
                model.get_object("Schedule:Compact", name)?;
                Ok(name.clone())
            }
            ScheduleSource::Hourly(schedule) => {
                schedule.validate()?;
                if model.get_object("Schedule:File", &schedule.name).is_ok() {
                    model.delete_by_names("Schedule:File", schedule.name.as_str())?;
                }
                add_hourly_schedules(
                    model,
                    std::slice::from_ref(schedule),
                    None,
                    &ScheduleFileOptions::default(),
                )?;
                Ok(schedule.name.clone())
            }
        }
    }

    /// The name of the schedule
    pub fn name(&self) -> &str {
        match self {
            ScheduleSource::Library(name) | ScheduleSource::Compact(name) => name,
            ScheduleSource::Hourly(s) => &s.name,
        }
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use schedule::library::ALWAYS_ON;
    use schedule::ScheduleType;

    #[test]
    fn test_library() {
        let mut model = Model::default();
        let s = ScheduleSource::Library(ALWAYS_ON.to_string());
        assert_eq!(s.install(&mut model).unwrap(), ALWAYS_ON);
        assert_eq!(s.install(&mut model).unwrap(), ALWAYS_ON);
        assert_eq!(model.count("Schedule:Compact"), 1);

        let s = ScheduleSource::Library("Not in the library".to_string());
        assert!(s.install(&mut model).is_err());
    }

    #[test]
    fn test_compact() {
        let mut model =
            Model::from_idf_str("Schedule:Compact, Mine, , Through: 12/31, For: AllDays, Until: 24:00, 1;")
                .unwrap();
        assert!(ScheduleSource::Compact("mine".to_string())
            .install(&mut model)
            .is_ok());
        assert!(ScheduleSource::Compact("Yours".to_string())
            .install(&mut model)
            .is_err());
    }

    #[test]
    fn test_hourly_replaces() {
        let mut model = Model::default();
        model
            .new_object(
                "Schedule:File",
                &[("Name", "Setpoint".into()), ("File_Name", "old.csv".into())],
            )
            .unwrap();

        let s = HourlySchedule::constant("Setpoint", ScheduleType::Temperature, 21.);
        let source = ScheduleSource::Hourly(s);
        assert_eq!(source.install(&mut model).unwrap(), "Setpoint");
        assert_eq!(model.count("Schedule:File"), 1);
        let file = model
            .get_field_values("Schedule:File", "File_Name", "Setpoint")
            .unwrap();
        assert_ne!(file[0].to_string(), "old.csv");
        let _ = std::fs::remove_file(file[0].to_string());
    }

    #[test]
    fn test_serde() {
        let s: ScheduleSource = json5::from_str("{library: 'ON_24h24h_FULL_YEAR'}").unwrap();
        assert_eq!(s, ScheduleSource::Library(ALWAYS_ON.to_string()));
        assert_eq!(s.name(), ALWAYS_ON);
    }
}
