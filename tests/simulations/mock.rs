use energytool::{Engine, EngineJob, Error, Float, Model};
use std::fmt::Write;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Heat delivered by each ideal loads system, per hour, when the
/// model has no `Material`
pub const HEATING_PER_HOUR: Float = 1000.;

/// Pretends to be EnergyPlus: reads the model written by the runner
/// and writes 24 hourly rows for every requested `Output:Variable`.
///
/// Heating energy is `HEATING_PER_HOUR` times the sum of the
/// conductivities of the materials in the model (or 1), so changing
/// them changes the results.
#[derive(Default)]
pub struct MockEngine {
    pub calls: AtomicUsize,
    /// Do not write results
    pub silent: bool,
}

impl MockEngine {
    pub fn silent() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            silent: true,
        }
    }

    pub fn n_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn scale(model: &Model) -> Float {
    let conductivities: Vec<Float> = model
        .get_field_values("Material", "Conductivity", "*")
        .unwrap()
        .iter()
        .filter_map(|v| v.as_number())
        .collect();
    if conductivities.is_empty() {
        1.
    } else {
        conductivities.iter().sum()
    }
}

fn value(variable: &str, hour: usize, scale: Float) -> Float {
    if variable.contains("Heating Energy") {
        HEATING_PER_HOUR * scale
    } else if variable.contains("Occupant Count") {
        1.
    } else if variable.contains("Temperature") {
        20. + hour as Float / 2.
    } else {
        hour as Float
    }
}

impl Engine for MockEngine {
    fn run(&self, job: &EngineJob) -> Result<(), Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(job.version, "9-4-0");
        assert!(job.output_dir.is_dir());
        if self.silent {
            return Ok(());
        }

        let model = Model::from_file(&job.idf)?;
        let scale = scale(&model);
        let zones = model.get_names("Zone")?;

        let mut columns: Vec<(String, String)> = Vec::new();
        for obj in model.objects("Output:Variable")? {
            let key = obj.get("Key_Value")?.to_string();
            let variable = obj.get("Variable_Name")?.to_string();
            let keys = if key == "*" { zones.clone() } else { vec![key] };
            for k in keys {
                columns.push((k.to_uppercase(), variable.clone()));
            }
        }

        let mut csv = "Date/Time".to_string();
        for (key, variable) in columns.iter() {
            write!(csv, ",{}:{} [J](Hourly)", key, variable).unwrap();
        }
        csv.push('\n');
        for hour in 1..=24 {
            write!(csv, " 01/01  {:02}:00:00", hour).unwrap();
            for (_, variable) in columns.iter() {
                write!(csv, ",{}", value(variable, hour, scale)).unwrap();
            }
            csv.push('\n');
        }
        std::fs::write(job.output_dir.join("eplusout.csv"), csv).unwrap();
        Ok(())
    }
}
