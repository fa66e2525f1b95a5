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

//! Running EnergyPlus.
//!
//! The runner only knows about the [`Engine`] trait, so simulations can
//! be run by something other than a local EnergyPlus installation
//! (e.g., a fake engine in tests).

use crate::Error;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Everything an engine needs to simulate one model
#[derive(Debug, Clone)]
pub struct EngineJob {
    /// The IDF file to simulate
    pub idf: PathBuf,

    /// The EPW weather file
    pub weather: PathBuf,

    /// Where results are written. `eplusout.csv` is expected there
    /// after the run.
    pub output_dir: PathBuf,

    /// The EnergyPlus version of the model, as `X-Y-Z`
    pub version: String,
}

/// Something that simulates IDF models
pub trait Engine: Sync {
    /// Runs one simulation, returning once it is finished
    fn run(&self, job: &EngineJob) -> Result<(), Error>;
}

fn default_readvars() -> bool {
    true
}

/// A local EnergyPlus installation, called through its command line
///
/// ```
/// use energytool::EnergyPlus;
///
/// let eplus = EnergyPlus::default();
/// assert!(eplus.readvars);
/// let args = eplus.arguments(
///     "in.idf".as_ref(),
///     "weather.epw".as_ref(),
///     "run/0".as_ref(),
/// );
/// assert_eq!(args, vec![
///     "--weather", "weather.epw",
///     "--output-directory", "run/0",
///     "--readvars",
///     "in.idf",
/// ]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnergyPlus {
    /// The `energyplus` executable. If not given, it is searched for
    /// based on the version of each model.
    #[serde(default)]
    pub executable: Option<PathBuf>,

    /// Run ExpandObjects before simulating
    #[serde(default)]
    pub expand_objects: bool,

    /// Run EPMacro before simulating
    #[serde(default)]
    pub epmacro: bool,

    /// Simulate design days only
    #[serde(default)]
    pub design_day: bool,

    /// Force an annual simulation
    #[serde(default)]
    pub annual: bool,

    /// Run ReadVarsESO after simulating, producing `eplusout.csv`
    #[serde(default = "default_readvars")]
    pub readvars: bool,

    /// Log the output of EnergyPlus
    #[serde(default)]
    pub verbose: bool,
}

impl Default for EnergyPlus {
    fn default() -> Self {
        Self {
            executable: None,
            expand_objects: false,
            epmacro: false,
            design_day: false,
            annual: false,
            readvars: default_readvars(),
            verbose: false,
        }
    }
}

impl EnergyPlus {
    /// Where EnergyPlus `version` (`X-Y-Z`) is installed by default
    pub fn install_candidates(version: &str) -> Vec<PathBuf> {
        let mut ret = vec![
            PathBuf::from(format!("C:/EnergyPlusV{}/energyplus.exe", version)),
            PathBuf::from(format!("/Applications/EnergyPlus-{}/energyplus", version)),
            PathBuf::from(format!("/usr/local/EnergyPlus-{}/energyplus", version)),
        ];
        if let Ok(home) = std::env::var("HOME") {
            ret.push(
                Path::new(&home)
                    .join(format!("EnergyPlus-{}", version))
                    .join("energyplus"),
            );
        }
        ret
    }

    /// Finds the executable to use for a model of `version`. Falls
    /// back to whatever `energyplus` is in the `PATH`.
    pub fn executable_for(&self, version: &str) -> PathBuf {
        if let Some(exe) = &self.executable {
            return exe.clone();
        }
        Self::install_candidates(version)
            .into_iter()
            .find(|p| p.is_file())
            .unwrap_or_else(|| PathBuf::from("energyplus"))
    }

    /// The command line arguments for simulating `idf`
    pub fn arguments(&self, idf: &Path, weather: &Path, output_dir: &Path) -> Vec<String> {
        let mut args = vec![
            "--weather".to_string(),
            weather.display().to_string(),
            "--output-directory".to_string(),
            output_dir.display().to_string(),
        ];
        if self.readvars {
            args.push("--readvars".to_string());
        }
        if self.expand_objects {
            args.push("--expandobjects".to_string());
        }
        if self.epmacro {
            args.push("--epmacro".to_string());
        }
        if self.design_day {
            args.push("--design-day".to_string());
        }
        if self.annual {
            args.push("--annual".to_string());
        }
        args.push(idf.display().to_string());
        args
    }
}

impl Engine for EnergyPlus {
    fn run(&self, job: &EngineJob) -> Result<(), Error> {
        let exe = self.executable_for(&job.version);
        let args = self.arguments(&job.idf, &job.weather, &job.output_dir);
        log::debug!("Running {} {}", exe.display(), args.join(" "));

        let output = Command::new(&exe)
            .args(&args)
            .output()
            .map_err(|e| Error::Engine {
                dir: job.output_dir.clone(),
                msg: format!("could not start '{}': {}", exe.display(), e),
            })?;

        if self.verbose {
            log::info!("{}", String::from_utf8_lossy(&output.stdout));
        }
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Engine {
                dir: job.output_dir.clone(),
                msg: format!("EnergyPlus exited with {}: {}", output.status, stderr.trim()),
            });
        }
        Ok(())
    }
}
