use crate::mock::{MockEngine, HEATING_PER_HOUR};
use crate::{house, HOUSE};
use energytool::*;

fn options(dir: &std::path::Path) -> RunnerOptions {
    RunnerOptions {
        run_dir: dir.to_path_buf(),
        batch_size: 2,
        n_processes: 2,
        progress_bar: false,
    }
}

#[test]
fn test_heater_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let mut b = house();
    b.add_system(
        HeaterSimple::new("Boiler")
            .with_zones(vec!["Living", "Bedroom"])
            .with_cop(0.5)
            .wrap(),
    )
    .unwrap();
    b.add_system(
        HeatingAuxiliary::new("Pumps")
            .with_zones(vec!["Living", "Bedroom"])
            .wrap(),
    )
    .unwrap();
    b.add_system(
        Overshoot::new("Comfort")
            .with_zones(vec!["Living", "Bedroom"])
            .with_threshold(28.)
            .wrap(),
    )
    .unwrap();

    let mut requests = vec![SimulationRequest::full_year(b, "weather.epw").unwrap()];
    SimulationsRunner::new(MockEngine::default(), options(dir.path()))
        .run(&mut requests)
        .unwrap();

    let building = requests[0].building();
    let results = building.building_results().unwrap();
    assert_eq!(results.len(), 24);

    // Wool conductivity is 0.04
    let per_zone = HEATING_PER_HOUR * 0.04;
    for v in results.column("Boiler_Energy_[J]").unwrap() {
        assert!((v - 2. * per_zone / 0.5).abs() < 1e-9);
    }
    for v in results.column("Pumps_Energy_[J]").unwrap() {
        assert!((v - 2. * per_zone * 0.05).abs() < 1e-9);
    }
    let total = results.column(TOTAL_ENERGY).unwrap();
    let heating = results.column("HEATING_Energy_[J]").unwrap();
    let auxiliary = results.column("AUXILIARY_Energy_[J]").unwrap();
    for i in 0..total.len() {
        assert!((total[i] - heating[i] - auxiliary[i]).abs() < 1e-9);
    }

    // Temperature goes from 20.5 to 32 C, reaching 28 at 16:00
    let discomfort = results.column("Comfort_discomfort_LIVING").unwrap();
    assert_eq!(discomfort.iter().sum::<Float>(), 9.);
    assert_eq!(discomfort[14], 0.);
    assert_eq!(discomfort[15], 1.);
    assert!(results.column("Comfort_discomfort_STORAGE").is_none());

    let eplus = building.energyplus_results().unwrap();
    let summer = indicators::discomfort_percentage(
        eplus,
        &Names::from(vec!["Living", "Bedroom"]),
        28.,
        (1, 1),
    )
    .unwrap();
    assert!((summer["LIVING"] - 9. / 24. * 100.).abs() < 1e-9);
}

#[test]
fn test_natural_ventilation() {
    let mut b = house();
    b.add_system(NaturalVentilation::new("Windows").with_ach(0.7).wrap())
        .unwrap();
    b.pre_process().unwrap();

    let model = b.model();
    let mut names = model.get_names("ZoneVentilation:DesignFlowRate").unwrap();
    names.sort();
    assert_eq!(names, vec!["Natvent_Bedroom", "Natvent_Living"]);
    let flow = model
        .get_field_values("ZoneVentilation:DesignFlowRate", "Design_Flow_Rate", "*")
        .unwrap();
    assert!(flow.iter().all(|v| v.as_number() == Some(0.7)));
    let schedules = model
        .get_field_values("ZoneVentilation:DesignFlowRate", "Schedule_Name", "*")
        .unwrap();
    assert!(schedules.iter().all(|s| s.to_string() == "Occupancy"));

    // Running it again replaces the objects
    b.pre_process().unwrap();
    assert_eq!(b.model().count("ZoneVentilation:DesignFlowRate"), 2);
}

#[test]
fn test_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("house.idf"), HOUSE).unwrap();
    let run_dir = dir.path().join("runs");
    let config_file = dir.path().join("config.json5");
    std::fs::write(
        &config_file,
        format!(
            "{{
                model: 'house.idf',
                weather: 'weather.epw',
                start: '2009-01-01T00:00:00',
                stop: '2009-01-02T00:00:00',
                timestep_per_hour: 4,
                runner: {{ run_dir: '{}', batch_size: 1, progress_bar: false }},
                systems: [
                    {{ type: 'HeaterSimple', name: 'Boiler', zones: ['Living', 'Bedroom'], cop: 0.8 }},
                    {{ type: 'Sensor', name: 'Temperatures', variables: ['Zone Mean Air Temperature'] }},
                ],
                output: 'results.csv',
            }}",
            run_dir.display()
        ),
    )
    .unwrap();

    let config = RunConfig::from_file(&config_file).unwrap();
    assert_eq!(config.model, dir.path().join("house.idf"));
    assert_eq!(
        config.output.as_deref(),
        Some(dir.path().join("results.csv").as_path())
    );

    let mut requests = vec![config.request().unwrap()];
    assert_eq!(requests[0].timestep_per_hour(), 4);
    SimulationsRunner::new(MockEngine::default(), config.runner.clone())
        .run(&mut requests)
        .unwrap();

    let results = requests[0].results().unwrap();
    let boiler = results.column("Boiler_Energy_[J]").unwrap();
    assert!((boiler[0] - 2. * HEATING_PER_HOUR * 0.04 / 0.8).abs() < 1e-9);
    assert_eq!(
        results.column("Temperatures_LIVING_Zone Mean Air Temperature").unwrap()[0],
        20.5
    );
    assert!(results.column("Temperatures_STORAGE_Zone Mean Air Temperature").is_some());

    let mut csv = Vec::new();
    results.to_csv(&mut csv).unwrap();
    let csv = String::from_utf8(csv).unwrap();
    assert_eq!(csv.lines().count(), 25);
}
