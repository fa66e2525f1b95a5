mod mock;
mod runner;
mod systems;

use energytool::{Building, Model};

/// Two occupied zones and an empty one, all heated by ideal loads
pub const HOUSE: &str = "
Version, 9.4;

Zone, Living;
Zone, Bedroom;
Zone, Storage;

People, Living People, Living, Occupancy, People, 3;
People, Bedroom People, Bedroom, Occupancy, People, 2;

Material, Wool, Rough, 0.1, 0.04, 30, 1000;

ZoneHVAC:EquipmentConnections, Living, Living Equipment, Living Inlet, , Living Node, Living Return;
ZoneHVAC:EquipmentConnections, Bedroom, Bedroom Equipment, Bedroom Inlet, , Bedroom Node, Bedroom Return;
ZoneHVAC:EquipmentList, Living Equipment, SequentialLoad, ZoneHVAC:IdealLoadsAirSystem, Living Ideal Loads, 1, 1;
ZoneHVAC:EquipmentList, Bedroom Equipment, SequentialLoad, ZoneHVAC:IdealLoadsAirSystem, Bedroom Ideal Loads, 1, 1;
ZoneHVAC:IdealLoadsAirSystem, Living Ideal Loads;
ZoneHVAC:IdealLoadsAirSystem, Bedroom Ideal Loads;

Schedule:Compact, Occupancy, Fraction, Through: 12/31, For: AllDays, Until: 24:00, 1;
";

pub fn house() -> Building {
    Building::new(Model::from_idf_str(HOUSE).unwrap())
}
