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
use model::{copy_named_object, Model, ModelError};

/// Equal to 1 all year long
pub const ALWAYS_ON: &str = "ON_24h24h_FULL_YEAR";

/// A heating setpoint so low that heating never happens
pub const HEATING_OFF: &str = "-60C_heating_setpoint";

/// A cooling setpoint so high that cooling never happens
pub const COOLING_OFF: &str = "100C_cooling_setpoint";

const RESOURCES: &str = "
ScheduleTypeLimits,
    Any Number;              !- Name

ScheduleTypeLimits,
    Fraction,                !- Name
    0,                       !- Lower Limit Value
    1,                       !- Upper Limit Value
    Continuous;              !- Numeric Type

ScheduleTypeLimits,
    Temperature,             !- Name
    -100,                    !- Lower Limit Value
    200,                     !- Upper Limit Value
    Continuous,              !- Numeric Type
    Temperature;             !- Unit Type

Schedule:Compact,
    ON_24h24h_FULL_YEAR,     !- Name
    Fraction,                !- Schedule Type Limits Name
    Through: 12/31,          !- Field 1
    For: AllDays,            !- Field 2
    Until: 24:00,            !- Field 3
    1;                       !- Field 4

Schedule:Compact,
    -60C_heating_setpoint,   !- Name
    Temperature,             !- Schedule Type Limits Name
    Through: 12/31,          !- Field 1
    For: AllDays,            !- Field 2
    Until: 24:00,            !- Field 3
    -60;                     !- Field 4

Schedule:Compact,
    100C_cooling_setpoint,   !- Name
    Temperature,             !- Schedule Type Limits Name
    Through: 12/31,          !- Field 1
    For: AllDays,            !- Field 2
    Until: 24:00,            !- Field 3
    100;                     !- Field 4
";

/// A model containing the schedules that systems add to the models
/// they modify
pub fn resources() -> Result<Model, ModelError> {
    Model::from_idf_str(RESOURCES)
}

/// Copies a `Schedule:Compact` from the [`resources`] into `model`, along
/// with its `ScheduleTypeLimits`. Returns `true` if the schedule was
/// not there already.
///
/// ```
/// use model::Model;
/// use schedule::library::{add_library_schedule, ALWAYS_ON};
///
/// let mut model = Model::default();
/// assert!(add_library_schedule(&mut model, ALWAYS_ON).unwrap());
/// assert!(!add_library_schedule(&mut model, ALWAYS_ON).unwrap());
/// assert!(model.get_object("ScheduleTypeLimits", "Fraction").is_ok());
/// ```
pub fn add_library_schedule(model: &mut Model, name: &str) -> Result<bool, ScheduleError> {
    let resources = resources()?;
    let schedule = resources.get_object("Schedule:Compact", name)?;
    let limits = schedule.get("Schedule_Type_Limits_Name")?;
    if !limits.is_empty() {
        copy_named_object(&resources, model, "ScheduleTypeLimits", &limits.to_string())?;
    }
    Ok(copy_named_object(
        &resources,
        model,
        "Schedule:Compact",
        name,
    )?)
}
