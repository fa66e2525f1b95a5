use crate::house;
use crate::mock::{MockEngine, HEATING_PER_HOUR};
use energytool::indicators::{aggregated_indicator, Aggregation, ResultsGroup};
use energytool::parameter::{SimulationSampler, UncertainParameter};
use energytool::simulate::default_period;
use energytool::*;
use results::ResultsError;

fn heated_house() -> Building {
    let mut b = house();
    b.add_system(
        HeaterSimple::new("Boiler")
            .with_zones(vec!["Living", "Bedroom"])
            .wrap(),
    )
    .unwrap();
    b
}

/// Five houses whose wool conductivities are 0.04, 0.08... 0.2
fn requests() -> Vec<SimulationRequest> {
    (1..=5)
        .map(|i| {
            let mut b = heated_house();
            b.model_mut()
                .set_field_values("Material", "Conductivity", "Wool", 0.04 * i as Float)
                .unwrap();
            SimulationRequest::full_year(b, "weather.epw").unwrap()
        })
        .collect()
}

fn options(dir: &std::path::Path, batch_size: usize) -> RunnerOptions {
    RunnerOptions {
        run_dir: dir.to_path_buf(),
        batch_size,
        n_processes: 2,
        progress_bar: false,
    }
}

fn boiler_totals(requests: &[SimulationRequest]) -> Vec<Float> {
    requests
        .iter()
        .map(|r| r.results().unwrap().column_total("Boiler_Energy_[J]").unwrap())
        .collect()
}

#[test]
fn test_batch_size_does_not_matter() {
    let dir = tempfile::tempdir().unwrap();

    let mut one_by_one = requests();
    let report = SimulationsRunner::new(MockEngine::default(), options(dir.path(), 1))
        .run(&mut one_by_one)
        .unwrap();
    assert_eq!(report.batches.len(), 5);
    assert!(report.all_done());

    let mut all_at_once = requests();
    let report = SimulationsRunner::new(MockEngine::default(), options(dir.path(), 5))
        .run(&mut all_at_once)
        .unwrap();
    assert_eq!(report.batches.len(), 1);
    assert_eq!(report.batches[0].requests, vec![0, 1, 2, 3, 4]);

    for (a, b) in one_by_one.iter().zip(all_at_once.iter()) {
        assert_eq!(a.results().unwrap(), b.results().unwrap());
    }
}

#[test]
fn test_results_are_not_mixed() {
    let dir = tempfile::tempdir().unwrap();
    let mut requests = requests();
    let runner = SimulationsRunner::new(MockEngine::default(), options(dir.path(), 2));
    let report = runner.run(&mut requests).unwrap();
    assert_eq!(
        report
            .batches
            .iter()
            .map(|b| b.requests.clone())
            .collect::<Vec<_>>(),
        vec![vec![0, 1], vec![2, 3], vec![4]]
    );

    // 2 zones, 24 hours
    let totals = boiler_totals(&requests);
    for (i, total) in totals.iter().enumerate() {
        let expected = 2. * 24. * HEATING_PER_HOUR * 0.04 * (i + 1) as Float;
        assert!((total - expected).abs() < 1e-6, "{} vs {}", total, expected);
    }
    for i in 0..totals.len() {
        for j in (i + 1)..totals.len() {
            assert!(totals[i] != totals[j]);
        }
    }

    // One directory per request, named after its position
    for i in 0..5 {
        let dir = runner.pool_dir().join(i.to_string());
        assert!(dir.join("in.idf").is_file());
        assert!(dir.join("eplusout.csv").is_file());
    }
}

#[test]
fn test_each_request_is_simulated_once() {
    let dir = tempfile::tempdir().unwrap();
    let mut requests = requests();
    let runner = SimulationsRunner::new(MockEngine::default(), options(dir.path(), 3));
    runner.run(&mut requests).unwrap();
    assert_eq!(runner.engine().n_calls(), 5);
    for r in requests.iter() {
        assert_eq!(r.building().system_results().len(), 1);
    }
}

#[test]
fn test_stale_results_are_removed() {
    let dir = tempfile::tempdir().unwrap();
    let stale = dir.path().join("pool_path").join("7");
    std::fs::create_dir_all(&stale).unwrap();
    std::fs::write(stale.join("eplusout.csv"), "walrus").unwrap();

    let mut requests = requests();
    SimulationsRunner::new(MockEngine::default(), options(dir.path(), 5))
        .run(&mut requests)
        .unwrap();
    assert!(!stale.exists());
}

#[test]
fn test_missing_results() {
    let dir = tempfile::tempdir().unwrap();
    let mut requests = requests();
    let engine = MockEngine::silent();
    let runner = SimulationsRunner::new(engine, options(dir.path(), 5));
    match runner.run(&mut requests).unwrap_err() {
        Error::BatchFailed { source, .. } => assert!(matches!(
            *source,
            Error::Results(ResultsError::ResultFileNotFound(_))
        )),
        other => panic!("Expecting a failed batch, found {}", other),
    }
    assert!(requests[0].results().is_err());
}

#[test]
fn test_failed_batch_keeps_earlier_results() {
    let dir = tempfile::tempdir().unwrap();
    let mut requests = requests();
    // The third house cannot be simulated
    requests[2]
        .building_mut()
        .add_system(HeaterSimple::new("Ghost").with_zones("Attic").wrap())
        .unwrap();

    let runner = SimulationsRunner::new(MockEngine::default(), options(dir.path(), 2));
    match runner.run(&mut requests).unwrap_err() {
        Error::BatchFailed { batch, report, .. } => {
            assert_eq!(batch, 1);
            let states: Vec<BatchState> = report.batches.iter().map(|b| b.state).collect();
            assert_eq!(
                states,
                vec![BatchState::Done, BatchState::Failed, BatchState::Pending]
            );
            assert!(!report.all_done());
        }
        other => panic!("Expecting a failed batch, found {}", other),
    }
    for r in requests[..2].iter() {
        assert!(r.results().is_ok());
    }
    for r in requests[2..].iter() {
        assert!(r.results().is_err());
    }
    // The engine never saw the failed batch
    assert_eq!(runner.engine().n_calls(), 2);
}

#[test]
fn test_sampler() {
    let dir = tempfile::tempdir().unwrap();
    let runner = SimulationsRunner::new(MockEngine::default(), options(dir.path(), 5));

    let wool = UncertainParameter::new("Wool conductivity", (0.5, 2.))
        .with_model_field("Material", "Wool", "Conductivity");
    let (start, stop) = default_period();
    let mut sampler = SimulationSampler::new(heated_house(), vec![wool], "weather.epw")
        .unwrap()
        .with_period(start, stop)
        .with_timestep(4);
    sampler.add_sample(6, Some(7), &runner).unwrap();
    assert_eq!(sampler.sample().len(), 6);
    assert_eq!(sampler.requests().len(), 6);

    for (values, request) in sampler.sample().iter().zip(sampler.requests()) {
        assert!(values[0] >= 0.5 && values[0] <= 2.);
        let total = request
            .results()
            .unwrap()
            .column_total("Boiler_Energy_[J]")
            .unwrap();
        let expected = 2. * 24. * HEATING_PER_HOUR * 0.04 * values[0];
        assert!((total - expected).abs() < 1e-6);
        assert_eq!(request.timestep_per_hour(), 4);
    }

    let totals = aggregated_indicator(
        sampler.requests(),
        ResultsGroup::Building,
        TOTAL_ENERGY,
        Aggregation::Sum,
        None,
        None,
    )
    .unwrap();
    for (a, b) in totals.iter().zip(boiler_totals(sampler.requests())) {
        assert!((a - b).abs() < 1e-6);
    }

    // Same seed, same sample
    let mut again = SimulationSampler::new(
        heated_house(),
        sampler.parameters().to_vec(),
        "weather.epw",
    )
    .unwrap();
    again.add_sample(6, Some(7), &runner).unwrap();
    assert_eq!(again.sample(), sampler.sample());
}

#[test]
fn test_aggregated_indicator_errors() {
    assert!(aggregated_indicator(
        &[],
        ResultsGroup::Building,
        TOTAL_ENERGY,
        Aggregation::Sum,
        None,
        None
    )
    .is_err());

    let dir = tempfile::tempdir().unwrap();
    let mut requests = requests();
    SimulationsRunner::new(MockEngine::default(), options(dir.path(), 5))
        .run(&mut requests)
        .unwrap();
    assert!(aggregated_indicator(
        &requests,
        ResultsGroup::Building,
        "Walrus",
        Aggregation::Sum,
        None,
        None
    )
    .is_err());

    // Compared with the first house
    let reference: Vec<Float> = requests[0]
        .results()
        .unwrap()
        .column(TOTAL_ENERGY)
        .unwrap()
        .to_vec();
    let errors = aggregated_indicator(
        &requests,
        ResultsGroup::Building,
        TOTAL_ENERGY,
        Aggregation::MeanAbsoluteError,
        Some(&reference[..]),
        None,
    )
    .unwrap();
    assert_eq!(errors[0], 0.);
    assert!(errors[1] > 0.);
}
