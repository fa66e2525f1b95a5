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

//! Running many simulations.
//!
//! Each [`SimulationRequest`] owns its [`Building`], so requests can be
//! simulated in parallel without sharing anything. The
//! [`SimulationsRunner`] splits the requests into batches and, for each
//! batch:
//!
//! 1. creates one directory per request, named after the position of
//!    the request in the list, and writes the pre-processed model there;
//! 2. runs the [`Engine`] on every request of the batch, in parallel;
//! 3. reads `eplusout.csv` back and post-processes each building.
//!
//! A failure stops the whole run. Batches finished before that keep
//! their results.

use crate::building::Building;
use crate::engine::{Engine, EngineJob};
use crate::Error;
use calendar::Period;
use chrono::{NaiveDate, NaiveDateTime};
use model::idf_utils::{set_run_period, set_timestep};
use rayon::prelude::*;
use results::{read_eplus_res, OutputTable};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use utils::ProgressBar;

/// Name of the directory, within the run directory, holding one
/// directory per simulation
pub const POOL_DIR: &str = "pool_path";

/// Name of the model written in the directory of each simulation
pub const MODEL_FILE: &str = "in.idf";

/// Name of the results written by EnergyPlus (through ReadVarsESO)
pub const RESULTS_FILE: &str = "eplusout.csv";

/// One simulation to run: a building, a weather file and a period
#[derive(Debug, Clone)]
pub struct SimulationRequest {
    building: Building,
    weather: PathBuf,
    period: Period,
    timestep_per_hour: usize,
}

impl SimulationRequest {
    /// Creates a request, writing the run period and the timestep
    /// into the model of `building`
    pub fn new<P: Into<PathBuf>>(
        mut building: Building,
        weather: P,
        start: NaiveDateTime,
        stop: NaiveDateTime,
        timestep_per_hour: usize,
    ) -> Result<Self, Error> {
        let period = Period::new(start, stop)?;
        set_run_period(building.model_mut(), &period)?;
        set_timestep(building.model_mut(), timestep_per_hour)?;
        Ok(Self {
            building,
            weather: weather.into(),
            period,
            timestep_per_hour,
        })
    }

    /// Creates a request for the whole of 2009, with 6 timesteps per hour
    pub fn full_year<P: Into<PathBuf>>(building: Building, weather: P) -> Result<Self, Error> {
        let (start, stop) = default_period();
        Self::new(building, weather, start, stop, 6)
    }

    /// The building
    pub fn building(&self) -> &Building {
        &self.building
    }

    /// The building, mutably. Changes made to the run period or the
    /// timestep of its model are not reflected in this request.
    pub fn building_mut(&mut self) -> &mut Building {
        &mut self.building
    }

    /// The weather file
    pub fn weather(&self) -> &Path {
        &self.weather
    }

    /// The simulated period
    pub fn period(&self) -> Period {
        self.period
    }

    /// The number of timesteps per hour
    pub fn timestep_per_hour(&self) -> usize {
        self.timestep_per_hour
    }

    /// The results of the building, once simulated
    pub fn results(&self) -> Result<&OutputTable, Error> {
        self.building.building_results()
    }
}

/// January 1st to December 31st 2009, hourly
pub fn default_period() -> (NaiveDateTime, NaiveDateTime) {
    let start = NaiveDate::from_ymd_opt(2009, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default();
    let stop = NaiveDate::from_ymd_opt(2009, 12, 31)
        .and_then(|d| d.and_hms_opt(23, 0, 0))
        .unwrap_or_default();
    (start, stop)
}

fn default_run_dir() -> PathBuf {
    std::env::temp_dir().join(format!("energytool-{}", uuid::Uuid::new_v4()))
}

fn default_batch_size() -> usize {
    10
}

fn default_n_processes() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// How to run simulations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunnerOptions {
    /// Where simulations are run. Defaults to a new directory in the
    /// temporary directory.
    #[serde(default = "default_run_dir")]
    pub run_dir: PathBuf,

    /// Number of simulations per batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Maximum number of simulations running at the same time
    #[serde(default = "default_n_processes")]
    pub n_processes: usize,

    /// Show a progress bar in the console
    #[serde(default)]
    pub progress_bar: bool,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            run_dir: default_run_dir(),
            batch_size: default_batch_size(),
            n_processes: default_n_processes(),
            progress_bar: false,
        }
    }
}

/// Where a batch is in its life
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    /// Not started
    Pending,
    /// Its requests have been assigned to it
    Batched,
    /// Preparing the models and running the engine
    Running,
    /// Reading and post-processing results
    Parsing,
    /// Finished
    Done,
    /// Something went wrong while running or parsing
    Failed,
}

impl std::fmt::Display for BatchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BatchState::Pending => "PENDING",
            BatchState::Batched => "BATCHED",
            BatchState::Running => "RUNNING",
            BatchState::Parsing => "PARSING",
            BatchState::Done => "DONE",
            BatchState::Failed => "FAILED",
        };
        write!(f, "{}", s)
    }
}

/// What happened to a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// The position of the requests of the batch
    pub requests: Vec<usize>,

    /// The state it ended in
    pub state: BatchState,
}

/// What happened in a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// One per batch, in order
    pub batches: Vec<BatchReport>,
}

impl RunReport {
    /// Checks whether every batch finished
    pub fn all_done(&self) -> bool {
        self.batches.iter().all(|b| b.state == BatchState::Done)
    }
}

/// Runs batches of [`SimulationRequest`] through an [`Engine`]
pub struct SimulationsRunner<E: Engine> {
    engine: E,
    options: RunnerOptions,
}

impl<E: Engine> SimulationsRunner<E> {
    /// Creates a new runner
    pub fn new(engine: E, options: RunnerOptions) -> Self {
        Self { engine, options }
    }

    /// The engine running the simulations
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The options of the runner
    pub fn options(&self) -> &RunnerOptions {
        &self.options
    }

    /// The directory containing one directory per request
    pub fn pool_dir(&self) -> PathBuf {
        self.options.run_dir.join(POOL_DIR)
    }

    /// Simulates all the `requests`, leaving the results in their
    /// buildings.
    ///
    /// If a batch fails, the run stops and [`Error::BatchFailed`] carries
    /// the [`RunReport`], with the failed batch marked as
    /// [`BatchState::Failed`] and the following ones still pending.
    ///
    /// The pool directory is deleted and created again, so two runs
    /// must not share a run directory at the same time.
    pub fn run(&self, requests: &mut [SimulationRequest]) -> Result<RunReport, Error> {
        if self.options.batch_size == 0 {
            return Err(Error::Config("The batch size must be positive".to_string()));
        }
        if self.options.n_processes == 0 {
            return Err(Error::Config(
                "The number of processes must be positive".to_string(),
            ));
        }

        let pool_dir = self.pool_dir();
        if pool_dir.exists() {
            std::fs::remove_dir_all(&pool_dir).map_err(|e| Error::io(&pool_dir, e))?;
        }
        std::fs::create_dir_all(&pool_dir).map_err(|e| Error::io(&pool_dir, e))?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.options.n_processes)
            .build()
            .map_err(|e| Error::Config(format!("Could not build thread pool: {}", e)))?;

        let batch_size = self.options.batch_size;
        let n_batches = requests.len().div_ceil(batch_size);
        let mut report = RunReport {
            batches: (0..n_batches)
                .map(|b| BatchReport {
                    requests: (b * batch_size..requests.len().min((b + 1) * batch_size)).collect(),
                    state: BatchState::Pending,
                })
                .collect(),
        };
        log::info!(
            "Running {} simulations in {} batches, in '{}'",
            requests.len(),
            n_batches,
            pool_dir.display()
        );

        let bar = if self.options.progress_bar {
            Some(ProgressBar::new(n_batches))
        } else {
            None
        };

        for (b, batch) in requests.chunks_mut(batch_size).enumerate() {
            let first = b * batch_size;
            let state = &mut report.batches[b].state;
            let ret = self.run_batch(&pool, &pool_dir, first, batch, state);
            if let Err(e) = ret {
                log::error!("Batch {} failed ({}): {}", b, state, e);
                *state = BatchState::Failed;
                return Err(Error::BatchFailed {
                    batch: b,
                    report,
                    source: Box::new(e),
                });
            }
            log::info!("Batch {}/{} done", b + 1, n_batches);
            if let Some(bar) = &bar {
                bar.tic();
            }
        }

        if let Some(bar) = &bar {
            bar.done();
        }
        Ok(report)
    }

    fn set_state(state: &mut BatchState, new_state: BatchState, first: usize) {
        log::debug!("Batch starting at request {}: {} -> {}", first, state, new_state);
        *state = new_state;
    }

    fn run_batch(
        &self,
        pool: &rayon::ThreadPool,
        pool_dir: &Path,
        first: usize,
        batch: &mut [SimulationRequest],
        state: &mut BatchState,
    ) -> Result<(), Error> {
        Self::set_state(state, BatchState::Batched, first);

        // Models are prepared right before launching the engine
        Self::set_state(state, BatchState::Running, first);
        let mut jobs = Vec::with_capacity(batch.len());
        for (i, request) in batch.iter_mut().enumerate() {
            let dir = pool_dir.join((first + i).to_string());
            std::fs::create_dir(&dir).map_err(|e| Error::io(&dir, e))?;

            request.building.pre_process()?;
            let model = request.building.model();
            let idf = dir.join(MODEL_FILE);
            model.save(&idf)?;
            jobs.push(EngineJob {
                idf,
                weather: request.weather.clone(),
                output_dir: dir,
                version: model.version()?,
            });
        }
        let outcomes: Vec<Result<(), Error>> =
            pool.install(|| jobs.par_iter().map(|job| self.engine.run(job)).collect());
        for outcome in outcomes {
            outcome?;
        }

        Self::set_state(state, BatchState::Parsing, first);
        for (request, job) in batch.iter_mut().zip(jobs.iter()) {
            let results = read_eplus_res(job.output_dir.join(RESULTS_FILE), request.period.year())?;
            request.building.set_energyplus_results(results);
            request.building.post_process()?;
        }

        Self::set_state(state, BatchState::Done, first);
        Ok(())
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use model::Model;

    struct NoEngine;

    impl Engine for NoEngine {
        fn run(&self, job: &EngineJob) -> Result<(), Error> {
            Err(Error::Engine {
                dir: job.output_dir.clone(),
                msg: "not installed".to_string(),
            })
        }
    }

    #[test]
    fn test_request() {
        let model = Model::from_idf_str("Version, 9.4; Zone, Kitchen;").unwrap();
        let r = SimulationRequest::full_year(Building::new(model), "weather.epw").unwrap();
        assert_eq!(r.period().year(), 2009);
        assert_eq!(r.timestep_per_hour(), 6);
        assert_eq!(r.weather(), Path::new("weather.epw"));
        let m = r.building().model();
        assert_eq!(m.count("RunPeriod"), 1);
        let v = m
            .get_field_values("Timestep", "Number_of_Timesteps_per_Hour", "*")
            .unwrap();
        assert_eq!(v[0].as_number(), Some(6.));
        assert!(r.results().is_err());

        let (start, stop) = default_period();
        let model = Model::from_idf_str("Zone, Kitchen;").unwrap();
        assert!(SimulationRequest::new(Building::new(model), "w.epw", stop, start, 6).is_err());
    }

    #[test]
    fn test_options() {
        let o: RunnerOptions = json5::from_str("{ batch_size: 3 }").unwrap();
        assert_eq!(o.batch_size, 3);
        assert!(o.n_processes >= 1);
        assert!(!o.progress_bar);
        assert!(o
            .run_dir
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("energytool-"));
    }

    #[test]
    fn test_engine_failure() {
        let dir = tempfile::tempdir().unwrap();
        let model = Model::from_idf_str("Version, 9.4; Zone, Kitchen;").unwrap();
        let mut requests =
            vec![SimulationRequest::full_year(Building::new(model), "w.epw").unwrap()];
        let runner = SimulationsRunner::new(
            NoEngine,
            RunnerOptions {
                run_dir: dir.path().to_path_buf(),
                ..RunnerOptions::default()
            },
        );
        match runner.run(&mut requests) {
            Err(Error::BatchFailed {
                batch,
                report,
                source,
            }) => {
                assert_eq!(batch, 0);
                assert!(matches!(*source, Error::Engine { .. }));
                assert_eq!(report.batches[0].state, BatchState::Failed);
                assert!(!report.all_done());
            }
            other => panic!("Expecting a failed batch, found {:?}", other),
        }
        // The model was written before running
        assert!(runner.pool_dir().join("0").join(MODEL_FILE).is_file());

        let bad = SimulationsRunner::new(
            NoEngine,
            RunnerOptions {
                run_dir: dir.path().to_path_buf(),
                batch_size: 0,
                ..RunnerOptions::default()
            },
        );
        assert!(matches!(bad.run(&mut requests), Err(Error::Config(_))));
    }
}
