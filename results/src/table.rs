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
use crate::Float;
use chrono::{Duration, NaiveDateTime};
use indexmap::IndexMap;
use std::io::Write;

/// The format used for the index when writing tables
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A time-indexed table: one row per timestep, one column per variable.
///
/// The index is strictly increasing, and all the columns have one value
/// per row. Columns keep the order in which they were added.
///
/// ```
/// use results::OutputTable;
/// use chrono::NaiveDate;
///
/// let t0 = NaiveDate::from_ymd_opt(2009, 1, 1).unwrap().and_hms_opt(1, 0, 0).unwrap();
/// let t1 = NaiveDate::from_ymd_opt(2009, 1, 1).unwrap().and_hms_opt(2, 0, 0).unwrap();
///
/// let mut table = OutputTable::new(vec![t0, t1]).unwrap();
/// table.push_column("a", vec![1., 2.]).unwrap();
/// table.push_column("b", vec![10., 20.]).unwrap();
///
/// assert_eq!(table.sum_rows(), vec![11., 22.]);
/// assert!(table.push_column("a", vec![0., 0.]).is_err());
/// assert!(table.push_column("c", vec![0.]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutputTable {
    index: Vec<NaiveDateTime>,
    columns: IndexMap<String, Vec<Float>>,
}

impl OutputTable {
    /// Creates a table with no columns, checking that `index` is
    /// strictly increasing
    pub fn new(index: Vec<NaiveDateTime>) -> Result<Self, ResultsError> {
        for w in index.windows(2) {
            if w[1] <= w[0] {
                return Err(ResultsError::NonMonotonicIndex {
                    previous: w[0],
                    found: w[1],
                });
            }
        }
        Ok(Self {
            index,
            columns: IndexMap::new(),
        })
    }

    /// Creates an empty table with the same index as this one
    pub fn empty_like(&self) -> Self {
        Self {
            index: self.index.clone(),
            columns: IndexMap::new(),
        }
    }

    /// Creates a table with the same index as this one and a single column
    pub fn single_column<S: Into<String>>(
        &self,
        name: S,
        values: Vec<Float>,
    ) -> Result<Self, ResultsError> {
        let mut ret = self.empty_like();
        ret.push_column(name, values)?;
        Ok(ret)
    }

    /// The index of the table
    pub fn index(&self) -> &[NaiveDateTime] {
        &self.index
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Checks whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of columns
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// The names of the columns, in order
    pub fn columns(&self) -> Vec<&str> {
        self.columns.keys().map(|k| k.as_str()).collect()
    }

    /// Borrows a column by name
    pub fn column(&self, name: &str) -> Option<&[Float]> {
        self.columns.get(name).map(|c| c.as_slice())
    }

    /// Iterates over the `(name, values)` of the columns
    pub fn iter_columns(&self) -> impl Iterator<Item = (&str, &[Float])> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Adds a column at the end of the table
    pub fn push_column<S: Into<String>>(
        &mut self,
        name: S,
        values: Vec<Float>,
    ) -> Result<(), ResultsError> {
        let name: String = name.into();
        if values.len() != self.index.len() {
            return Err(ResultsError::LengthMismatch {
                column: name,
                expected: self.index.len(),
                found: values.len(),
            });
        }
        if self.columns.contains_key(&name) {
            return Err(ResultsError::DuplicateColumn(name));
        }
        self.columns.insert(name, values);
        Ok(())
    }

    /// Removes a column, returning its values
    pub fn remove_column(&mut self, name: &str) -> Option<Vec<Float>> {
        self.columns.shift_remove(name)
    }

    /// Renames the columns through `f`. Fails if two columns end up
    /// with the same name.
    pub fn rename_columns<F: Fn(&str) -> String>(&self, f: F) -> Result<Self, ResultsError> {
        let mut ret = self.empty_like();
        for (k, v) in self.columns.iter() {
            ret.push_column(f(k), v.clone())?;
        }
        Ok(ret)
    }

    /// Builds a new table with the same index, applying `f` to every value
    pub fn map_values<F: Fn(Float) -> Float>(&self, f: F) -> Self {
        let mut ret = self.empty_like();
        for (k, v) in self.columns.iter() {
            ret.columns
                .insert(k.clone(), v.iter().map(|x| f(*x)).collect());
        }
        ret
    }

    /// Adds up the columns, row by row
    pub fn sum_rows(&self) -> Vec<Float> {
        let mut ret = vec![0.0; self.index.len()];
        for col in self.columns.values() {
            for (r, v) in ret.iter_mut().zip(col.iter()) {
                *r += v;
            }
        }
        ret
    }

    /// Adds up all the values of a column
    pub fn column_total(&self, name: &str) -> Option<Float> {
        self.column(name).map(|c| c.iter().sum())
    }

    /// The time between rows, if it is the same for all of them
    pub fn frequency(&self) -> Option<Duration> {
        if self.index.len() < 2 {
            return None;
        }
        let dt = self.index[1] - self.index[0];
        if self.index.windows(2).all(|w| w[1] - w[0] == dt) {
            Some(dt)
        } else {
            None
        }
    }

    /// Number of calendar days covered by the table.
    ///
    /// Each row closes a timestep, so the covered time goes from one
    /// timestep before the first row up to the last row. A full year
    /// of hourly results covers 365 days.
    pub fn n_days(&self) -> i64 {
        if self.index.is_empty() {
            return 0;
        }
        let step = if self.index.len() > 1 {
            self.index[1] - self.index[0]
        } else {
            Duration::days(1)
        };
        let covered = (self.index[self.index.len() - 1] - self.index[0]) + step;
        let day = Duration::days(1).num_seconds();
        let seconds = covered.num_seconds();
        (seconds + day - 1) / day
    }

    /// Gets the rows between `start` and `end`, both included
    pub fn slice_between(&self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        let from = self.index.partition_point(|d| *d < start);
        let to = self.index.partition_point(|d| *d <= end).max(from);
        let mut ret = Self {
            index: self.index[from..to].to_vec(),
            columns: IndexMap::new(),
        };
        for (k, v) in self.columns.iter() {
            ret.columns.insert(k.clone(), v[from..to].to_vec());
        }
        ret
    }

    /// Appends the columns of `other`, which must have the same index
    pub fn concat(&mut self, other: &OutputTable) -> Result<(), ResultsError> {
        if other.n_columns() == 0 {
            return Ok(());
        }
        if self.index != other.index {
            return Err(ResultsError::IndexMismatch);
        }
        if let Some(dup) = other.columns.keys().find(|k| self.columns.contains_key(*k)) {
            return Err(ResultsError::DuplicateColumn(dup.clone()));
        }
        for (k, v) in other.columns.iter() {
            self.columns.insert(k.clone(), v.clone());
        }
        Ok(())
    }

    /// Writes the table as CSV, with a `Date/Time` column first
    pub fn to_csv<W: Write>(&self, writer: W) -> Result<(), ResultsError> {
        let mut wtr = csv::Writer::from_writer(writer);
        let mut header = vec!["Date/Time"];
        header.extend(self.columns.keys().map(|k| k.as_str()));
        wtr.write_record(&header)
            .map_err(|e| ResultsError::Value(e.to_string()))?;

        for (i, date) in self.index.iter().enumerate() {
            let mut row = vec![date.format(DATE_FORMAT).to_string()];
            row.extend(self.columns.values().map(|c| c[i].to_string()));
            wtr.write_record(&row)
                .map_err(|e| ResultsError::Value(e.to_string()))?;
        }
        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use chrono::NaiveDate;

    fn hourly(n: usize) -> Vec<NaiveDateTime> {
        let start = NaiveDate::from_ymd_opt(2009, 1, 1)
            .unwrap()
            .and_hms_opt(1, 0, 0)
            .unwrap();
        (0..n)
            .map(|i| start + Duration::hours(i as i64))
            .collect()
    }

    #[test]
    fn test_non_monotonic() {
        let mut index = hourly(3);
        index.swap(1, 2);
        assert!(matches!(
            OutputTable::new(index),
            Err(ResultsError::NonMonotonicIndex { .. })
        ));
        let mut index = hourly(3);
        index[2] = index[1];
        assert!(OutputTable::new(index).is_err());
    }

    #[test]
    fn test_n_days() {
        assert_eq!(OutputTable::new(hourly(8760)).unwrap().n_days(), 365);
        assert_eq!(OutputTable::new(hourly(24)).unwrap().n_days(), 1);
        assert_eq!(OutputTable::new(hourly(25)).unwrap().n_days(), 2);
        assert_eq!(OutputTable::new(hourly(1)).unwrap().n_days(), 1);
        assert_eq!(OutputTable::default().n_days(), 0);
    }

    #[test]
    fn test_frequency() {
        let t = OutputTable::new(hourly(10)).unwrap();
        assert_eq!(t.frequency(), Some(Duration::hours(1)));
        let mut index = hourly(10);
        index.pop();
        index.push(index[8] + Duration::hours(3));
        assert_eq!(OutputTable::new(index).unwrap().frequency(), None);
    }

    #[test]
    fn test_slice_between() {
        let mut t = OutputTable::new(hourly(48)).unwrap();
        t.push_column("a", (0..48).map(|i| i as Float).collect())
            .unwrap();
        let s = t.slice_between(t.index()[10], t.index()[20]);
        assert_eq!(s.len(), 11);
        assert_eq!(s.column("a").unwrap()[0], 10.);
        assert_eq!(s.column("a").unwrap()[10], 20.);

        // Nothing in there
        let s = t.slice_between(t.index()[20], t.index()[10]);
        assert!(s.is_empty());
    }

    #[test]
    fn test_concat() {
        let mut a = OutputTable::new(hourly(3)).unwrap();
        a.push_column("a", vec![1., 2., 3.]).unwrap();
        let b = a.single_column("b", vec![4., 5., 6.]).unwrap();
        a.concat(&b).unwrap();
        assert_eq!(a.columns(), vec!["a", "b"]);
        assert!(matches!(a.concat(&b), Err(ResultsError::DuplicateColumn(_))));

        let mut c = OutputTable::new(hourly(4)).unwrap();
        c.push_column("c", vec![1., 2., 3., 4.]).unwrap();
        assert!(matches!(a.concat(&c), Err(ResultsError::IndexMismatch)));
    }

    #[test]
    fn test_rename_and_map() {
        let mut a = OutputTable::new(hourly(2)).unwrap();
        a.push_column("ZONE1:X", vec![1., 2.]).unwrap();
        a.push_column("ZONE2:X", vec![3., 4.]).unwrap();
        let b = a.rename_columns(|c| c.replace(":X", "")).unwrap();
        assert_eq!(b.columns(), vec!["ZONE1", "ZONE2"]);
        assert!(a.rename_columns(|_| "same".to_string()).is_err());

        let c = a.map_values(|v| v * 2.);
        assert_eq!(c.column("ZONE2:X").unwrap(), &[6., 8.]);
        assert_eq!(c.column_total("ZONE1:X"), Some(6.));
    }

    #[test]
    fn test_to_csv() {
        let mut a = OutputTable::new(hourly(2)).unwrap();
        a.push_column("a", vec![1., 2.5]).unwrap();
        let mut buf: Vec<u8> = Vec::new();
        a.to_csv(&mut buf).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert_eq!(
            s,
            "Date/Time,a\n2009-01-01 01:00:00,1\n2009-01-01 02:00:00,2.5\n"
        );
    }
}
