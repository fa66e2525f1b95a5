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

use crate::system::{energy_column, OutputKind, System, SystemBehaviour, SystemCategory};
use crate::Error;
use indexmap::IndexMap;
use model::Model;
use results::OutputTable;
use std::path::Path;

/// Name of the column adding up the energy of all systems
pub const TOTAL_ENERGY: &str = "TOTAL_SYSTEM_Energy_[J]";

/// A building model plus the systems installed in it.
///
/// Cloning a `Building` produces a fully independent copy, model
/// and systems included.
///
/// ```
/// use energytool::{Building, HeaterSimple, SystemCategory};
/// use model::Model;
///
/// let model = Model::from_idf_str("Zone, Kitchen;").unwrap();
/// let mut building = Building::new(model);
/// building.add_system(HeaterSimple::new("Boiler").wrap()).unwrap();
/// assert!(building.add_system(HeaterSimple::new("Boiler").wrap()).is_err());
/// assert_eq!(building.systems(SystemCategory::Heating).len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Building {
    model: Model,

    /// In the order they were added
    systems: Vec<System>,

    energyplus_results: Option<OutputTable>,

    system_results: IndexMap<(SystemCategory, String), OutputTable>,

    building_results: Option<OutputTable>,
}

impl Building {
    /// Creates a building without systems
    pub fn new(model: Model) -> Self {
        Self {
            model,
            systems: Vec::new(),
            energyplus_results: None,
            system_results: IndexMap::new(),
            building_results: None,
        }
    }

    /// Reads the model from an IDF file
    pub fn from_file<P: AsRef<Path>>(idf: P) -> Result<Self, Error> {
        Ok(Self::new(Model::from_file(idf)?))
    }

    /// Borrows the model
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Borrows the model mutably
    pub fn model_mut(&mut self) -> &mut Model {
        &mut self.model
    }

    /// Adds a system. Its name must not be used by any other system.
    pub fn add_system(&mut self, system: System) -> Result<(), Error> {
        if self.position(system.name()).is_some() {
            return Err(Error::DuplicateSystem(system.name().to_string()));
        }
        log::debug!(
            "Adding {} system '{}'",
            system.category(),
            system.name()
        );
        self.systems.push(system);
        Ok(())
    }

    /// Removes a system, returning it
    pub fn del_system(&mut self, name: &str) -> Result<System, Error> {
        let i = self
            .position(name)
            .ok_or_else(|| Error::SystemNotFound(name.to_string()))?;
        Ok(self.systems.remove(i))
    }

    /// Borrows a system
    pub fn system(&self, name: &str) -> Result<&System, Error> {
        self.systems
            .iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| Error::SystemNotFound(name.to_string()))
    }

    /// Borrows a system mutably
    pub fn system_mut(&mut self, name: &str) -> Result<&mut System, Error> {
        self.systems
            .iter_mut()
            .find(|s| s.name() == name)
            .ok_or_else(|| Error::SystemNotFound(name.to_string()))
    }

    /// The systems of a category, in the order they were added
    pub fn systems(&self, category: SystemCategory) -> Vec<&System> {
        self.systems
            .iter()
            .filter(|s| s.category() == category)
            .collect()
    }

    /// All the systems, in the order they were added
    pub fn all_systems(&self) -> &[System] {
        &self.systems
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.systems.iter().position(|s| s.name() == name)
    }

    /// Lets every system modify the model, in the order they were added
    pub fn pre_process(&mut self) -> Result<(), Error> {
        for system in self.systems.iter() {
            log::debug!("Pre-processing system '{}'", system.name());
            system.pre_process(&mut self.model)?;
        }
        Ok(())
    }

    /// Stores the results produced by EnergyPlus, discarding the
    /// post-processed ones
    pub fn set_energyplus_results(&mut self, results: OutputTable) {
        self.energyplus_results = Some(results);
        self.system_results.clear();
        self.building_results = None;
    }

    /// The results produced by EnergyPlus
    pub fn energyplus_results(&self) -> Option<&OutputTable> {
        self.energyplus_results.as_ref()
    }

    /// Lets every system derive its results from those of EnergyPlus,
    /// and then builds the building results: the columns of every
    /// system followed by the energy of each category
    /// (`<CATEGORY>_Energy_[J]`) and [`TOTAL_ENERGY`].
    ///
    /// Only categories with at least one energy-reporting system get
    /// a column.
    pub fn post_process(&mut self) -> Result<(), Error> {
        let eplus = self.energyplus_results.as_ref().ok_or(Error::NoResults)?;

        let mut system_results = IndexMap::new();
        for system in self.systems.iter() {
            log::debug!("Post-processing system '{}'", system.name());
            if let Some(table) = system.post_process(&self.model, eplus)? {
                if table.index() != eplus.index() {
                    return Err(Error::Value(format!(
                        "System '{}' returned results with an index different from EnergyPlus'",
                        system.name()
                    )));
                }
                system_results.insert((system.category(), system.name().to_string()), table);
            }
        }

        let mut building_results = eplus.empty_like();
        for table in system_results.values() {
            building_results.concat(table)?;
        }
        let categories = category_sums(&self.systems, &system_results, eplus)?;
        building_results.concat(&categories)?;

        self.system_results = system_results;
        self.building_results = Some(building_results);
        Ok(())
    }

    /// The results of each system, by category and name
    pub fn system_results(&self) -> &IndexMap<(SystemCategory, String), OutputTable> {
        &self.system_results
    }

    /// The results of the building, available after [`Building::post_process`]
    pub fn building_results(&self) -> Result<&OutputTable, Error> {
        self.building_results.as_ref().ok_or(Error::NoResults)
    }

    /// The energy of each category plus [`TOTAL_ENERGY`]
    pub fn category_results(&self) -> Result<OutputTable, Error> {
        let eplus = self.energyplus_results.as_ref().ok_or(Error::NoResults)?;
        category_sums(&self.systems, &self.system_results, eplus)
    }
}

/// Adds up the energy-reporting systems of every category
fn category_sums(
    systems: &[System],
    system_results: &IndexMap<(SystemCategory, String), OutputTable>,
    eplus: &OutputTable,
) -> Result<OutputTable, Error> {
    let mut ret = eplus.empty_like();
    let mut total = vec![0.0; eplus.len()];
    for category in SystemCategory::ALL {
        let mut sum = vec![0.0; eplus.len()];
        let mut any = false;
        for system in systems.iter() {
            if system.category() != category || system.output_kind() != OutputKind::Energy {
                continue;
            }
            let key = (category, system.name().to_string());
            if let Some(table) = system_results.get(&key) {
                any = true;
                for (s, v) in sum.iter_mut().zip(table.sum_rows()) {
                    *s += v;
                }
            }
        }
        if any {
            for (t, v) in total.iter_mut().zip(sum.iter()) {
                *t += v;
            }
            ret.push_column(energy_column(&category.to_string()), sum)?;
        }
    }
    ret.push_column(TOTAL_ENERGY, total)?;
    Ok(ret)
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::system::{HeaterSimple, HeatingAuxiliary, Overshoot};
    use chrono::NaiveDate;

    const MODEL: &str = "
        Zone, Living;
        People, Living People, Living, Occupancy, People, 2;
        ZoneHVAC:EquipmentConnections, Living, Living Equipment, Living Inlet, , Living Node, Living Return;
        ZoneHVAC:EquipmentList, Living Equipment, SequentialLoad, ZoneHVAC:IdealLoadsAirSystem, Living Ideal Loads, 1, 1;
        ZoneHVAC:IdealLoadsAirSystem, Living Ideal Loads;
    ";

    fn eplus_results() -> OutputTable {
        let index = (1..=2)
            .map(|h| {
                NaiveDate::from_ymd_opt(2009, 7, 1)
                    .unwrap()
                    .and_hms_opt(h, 0, 0)
                    .unwrap()
            })
            .collect();
        let mut t = OutputTable::new(index).unwrap();
        t.push_column(
            "LIVING IDEAL LOADS:Zone Ideal Loads Supply Air Total Heating Energy [J](Hourly)",
            vec![100., 200.],
        )
        .unwrap();
        t.push_column(
            "LIVING:Zone Operative Temperature [C](Hourly)",
            vec![25., 30.],
        )
        .unwrap();
        t.push_column(
            "LIVING:Zone People Occupant Count [](Hourly)",
            vec![2., 2.],
        )
        .unwrap();
        t
    }

    fn building() -> Building {
        let mut b = Building::new(Model::from_idf_str(MODEL).unwrap());
        b.add_system(HeaterSimple::new("Boiler").with_cop(0.5).wrap())
            .unwrap();
        b.add_system(HeatingAuxiliary::new("Pumps").wrap()).unwrap();
        b.add_system(Overshoot::new("Comfort").wrap()).unwrap();
        b
    }

    #[test]
    fn test_registry() {
        let mut b = building();
        assert!(matches!(
            b.add_system(HeaterSimple::new("Pumps").wrap()),
            Err(Error::DuplicateSystem(_))
        ));
        assert_eq!(b.systems(SystemCategory::Heating).len(), 1);
        assert_eq!(b.systems(SystemCategory::Auxiliary).len(), 1);
        assert!(b.systems(SystemCategory::Cooling).is_empty());

        b.system_mut("Boiler").unwrap().set_parameter("cop", 2.).unwrap();
        assert_eq!(b.system("Boiler").unwrap().get_parameter("cop").unwrap(), 2.);

        let removed = b.del_system("Pumps").unwrap();
        assert_eq!(removed.name(), "Pumps");
        assert!(b.del_system("Pumps").is_err());
        assert!(b.system_mut("Pumps").is_err());
        assert_eq!(b.all_systems().len(), 2);
    }

    #[test]
    fn test_pre_process() {
        let mut b = building();
        b.pre_process().unwrap();
        // Heating once for both heating systems + 2 for the overshoot
        assert_eq!(b.model().count("Output:Variable"), 3);
    }

    #[test]
    fn test_post_process() {
        let mut b = building();
        assert!(matches!(b.post_process(), Err(Error::NoResults)));
        assert!(b.building_results().is_err());

        b.set_energyplus_results(eplus_results());
        b.post_process().unwrap();

        let keys: Vec<(SystemCategory, String)> = b.system_results().keys().cloned().collect();
        assert_eq!(
            keys,
            vec![
                (SystemCategory::Heating, "Boiler".to_string()),
                (SystemCategory::Auxiliary, "Pumps".to_string()),
                (SystemCategory::Other, "Comfort".to_string()),
            ]
        );

        let res = b.building_results().unwrap();
        assert_eq!(
            res.columns(),
            vec![
                "Boiler_Energy_[J]",
                "Pumps_Energy_[J]",
                "Comfort_discomfort_LIVING",
                "HEATING_Energy_[J]",
                "AUXILIARY_Energy_[J]",
                TOTAL_ENERGY,
            ]
        );
        assert_eq!(res.column("HEATING_Energy_[J]").unwrap(), &[200., 400.]);
        assert_eq!(res.column("AUXILIARY_Energy_[J]").unwrap(), &[5., 10.]);
        // The discomfort flags are not energy
        assert_eq!(res.column(TOTAL_ENERGY).unwrap(), &[205., 410.]);

        let categories = b.category_results().unwrap();
        assert_eq!(categories.n_columns(), 3);
    }

    #[test]
    fn test_two_indicators_of_the_same_kind() {
        let mut b = building();
        b.add_system(Overshoot::new("Hot").with_threshold(30.).wrap())
            .unwrap();
        b.set_energyplus_results(eplus_results());
        b.post_process().unwrap();
        let res = b.building_results().unwrap();
        assert!(res.column("Comfort_discomfort_LIVING").is_some());
        assert!(res.column("Hot_discomfort_LIVING").is_some());
    }

    #[test]
    fn test_clone_is_independent() {
        let mut a = building();
        let mut b = a.clone();
        b.system_mut("Boiler").unwrap().set_parameter("cop", 3.).unwrap();
        b.model_mut()
            .set_field_values("Zone", "Floor_Area", "*", 12.)
            .unwrap();
        b.set_energyplus_results(eplus_results());

        assert_eq!(a.system("Boiler").unwrap().get_parameter("cop").unwrap(), 0.5);
        assert!(a
            .model()
            .get_field_values("Zone", "Floor_Area", "*")
            .unwrap()[0]
            .is_empty());
        assert!(a.energyplus_results().is_none());
        a.del_system("Comfort").unwrap();
        assert_eq!(b.all_systems().len(), 3);
    }
}
