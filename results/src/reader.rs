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

use crate::error::ResultsError;
use crate::table::OutputTable;
use crate::Float;
use calendar::EPlusTimestamp;
use std::path::Path;
use std::str::FromStr;

/// Reads an `eplusout.csv` file, placing its rows in `ref_year`.
///
/// The first column holds EnergyPlus timestamps (e.g., ` 01/01  24:00:00`)
/// and every other column becomes a column of the returned table, keeping
/// its full EnergyPlus name (e.g., `ZONE1:Zone Mean Air Temperature [C](Hourly)`).
/// The year is bumped whenever the timestamps wrap around (i.e., going from
/// December to January), so simulations crossing new year keep a strictly
/// increasing index. Empty cells are read as `NaN`.
///
/// A missing file is always an error.
pub fn read_eplus_res<P: AsRef<Path>>(path: P, ref_year: i32) -> Result<OutputTable, ResultsError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(ResultsError::ResultFileNotFound(path.to_path_buf()));
    }
    let csv_err = |source: csv::Error| ResultsError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_err)?;

    let headers: Vec<String> = rdr
        .headers()
        .map_err(csv_err)?
        .iter()
        .skip(1)
        .map(|h| h.to_string())
        .collect();

    let mut index = Vec::new();
    let mut data: Vec<Vec<Float>> = vec![Vec::new(); headers.len()];
    let mut year = ref_year;
    let mut previous: Option<EPlusTimestamp> = None;

    for record in rdr.records() {
        let record = record.map_err(csv_err)?;
        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
        let malformed = |msg: String| ResultsError::MalformedRow {
            path: path.to_path_buf(),
            line,
            msg,
        };

        let mut fields = record.iter();
        let stamp_str = fields
            .next()
            .ok_or_else(|| malformed("empty row".to_string()))?;
        let stamp = EPlusTimestamp::from_str(stamp_str).map_err(|e| malformed(e.to_string()))?;
        if let Some(prev) = previous {
            if stamp.is_before(&prev) {
                year += 1;
            }
        }
        previous = Some(stamp);
        index.push(stamp.to_datetime(year)?);

        for (col, value) in data.iter_mut().zip(fields) {
            let v = if value.is_empty() {
                Float::NAN
            } else {
                value.parse::<Float>().map_err(|_| {
                    malformed(format!("could not read a number from '{}'", value))
                })?
            };
            col.push(v);
        }
    }

    let mut table = OutputTable::new(index)?;
    for (name, values) in headers.into_iter().zip(data.into_iter()) {
        table.push_column(name, values)?;
    }
    log::debug!(
        "Read {} rows and {} columns from '{}'",
        table.len(),
        table.n_columns(),
        path.display()
    );
    Ok(table)
}

#[cfg(test)]
mod testing {
    use super::*;
    use chrono::{Datelike, NaiveDate, Timelike};
    use std::io::Write;

    fn write(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_read() {
        let f = write(
            "Date/Time,ZONE1:Zone Mean Air Temperature [C](Hourly),ZONE2:Zone Mean Air Temperature [C](Hourly) \n \
            01/01  01:00:00,20.5,21\n \
            01/01  02:00:00,20.0,21.5\n \
            01/01  24:00:00,19.0,\n",
        );
        let table = read_eplus_res(f.path(), 2009).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.columns(),
            vec![
                "ZONE1:Zone Mean Air Temperature [C](Hourly)",
                "ZONE2:Zone Mean Air Temperature [C](Hourly)"
            ]
        );
        let zone1 = table
            .column("ZONE1:Zone Mean Air Temperature [C](Hourly)")
            .unwrap();
        assert_eq!(zone1, &[20.5, 20.0, 19.0]);
        let zone2 = table
            .column("ZONE2:Zone Mean Air Temperature [C](Hourly)")
            .unwrap();
        assert!(zone2[2].is_nan());

        let last = table.index()[2];
        assert_eq!(last.day(), 2);
        assert_eq!(last.hour(), 0);
    }

    #[test]
    fn test_year_wrap() {
        let f = write(
            "Date/Time,A:B [J](Hourly)\n\
            12/31  23:00:00,1\n\
            12/31  24:00:00,2\n\
            01/01  01:00:00,3\n",
        );
        let table = read_eplus_res(f.path(), 2009).unwrap();
        let idx = table.index();
        assert_eq!(idx[0].year(), 2009);
        assert_eq!(
            idx[1],
            NaiveDate::from_ymd_opt(2010, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
        assert_eq!(
            idx[2],
            NaiveDate::from_ymd_opt(2010, 1, 1)
                .unwrap()
                .and_hms_opt(1, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_full_year() {
        let mut content = "Date/Time,A:B [J](Hourly)\n".to_string();
        let start = NaiveDate::from_ymd_opt(2009, 1, 1).unwrap();
        for d in 0..365 {
            let date = start + chrono::Duration::days(d);
            for h in 1..=24 {
                content.push_str(&format!(
                    " {:02}/{:02}  {:02}:00:00,1\n",
                    date.month(),
                    date.day(),
                    h
                ));
            }
        }
        let f = write(&content);
        let table = read_eplus_res(f.path(), 2009).unwrap();
        assert_eq!(table.len(), 8760);
        assert_eq!(table.frequency(), Some(chrono::Duration::hours(1)));
        assert_eq!(table.n_days(), 365);
        assert_eq!(table.column_total("A:B [J](Hourly)"), Some(8760.));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eplusout.csv");
        assert!(matches!(
            read_eplus_res(&path, 2009),
            Err(ResultsError::ResultFileNotFound(_))
        ));
    }

    #[test]
    fn test_malformed() {
        let f = write("Date/Time,A:B [J](Hourly)\n01/01  01:00:00,1\n01/01  02:00:00,abc\n");
        match read_eplus_res(f.path(), 2009) {
            Err(ResultsError::MalformedRow { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected a malformed row, found {:?}", other),
        }

        let f = write("Date/Time,A:B [J](Hourly)\nnot a date,1\n");
        assert!(read_eplus_res(f.path(), 2009).is_err());
    }
}
