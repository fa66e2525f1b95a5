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

use clap::Parser;
use energytool::{RunConfig, SimulationsRunner};

/// Simulates a building with EnergyPlus and writes the results of its systems
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Options {
    /// The JSON5 configuration of the run
    #[clap(short = 'c')]
    config: String,

    /// Where to write the results. Overrides the configuration;
    /// if none is given, STDOUT is used
    #[clap(short = 'o')]
    output: Option<String>,

    /// The log level (trace, debug, info, warn, error). Overrides
    /// the configuration
    #[clap(short = 'l')]
    log_level: Option<String>,
}

fn run(options: &Options) -> Result<(), energytool::Error> {
    let config = RunConfig::from_file(&options.config)?;
    let level = options.log_level.as_deref().unwrap_or(&config.log_level);
    utils::logging::init_logger(level);

    let mut requests = vec![config.request()?];
    let runner = SimulationsRunner::new(config.energyplus.clone(), config.runner.clone());
    runner.run(&mut requests)?;
    let results = requests[0].results()?;

    let output = options
        .output
        .as_ref()
        .map(std::path::PathBuf::from)
        .or(config.output);
    match output {
        Some(path) => {
            let file = std::fs::File::create(&path).map_err(|source| energytool::Error::Io {
                path: path.clone(),
                source,
            })?;
            results.to_csv(file)?;
            log::info!("Results written to '{}'", path.display());
        }
        None => results.to_csv(std::io::stdout().lock())?,
    }
    Ok(())
}

fn main() {
    let options = Options::parse();
    if let Err(e) = run(&options) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
