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
use regex::Regex;

/// Selects columns of an [`OutputTable`] by key (e.g., a zone name) and
/// variable name.
///
/// A column called `ZONE1:Zone Mean Air Temperature [C](Hourly)` has key
/// `ZONE1` and variable `Zone Mean Air Temperature`. Keys must match the
/// whole prefix before the `:`, while variables only need to be contained
/// in the rest of the name. Matching ignores case, and `*` as a key
/// matches every column.
///
/// ```
/// use results::{OutputTable, OutputSelector};
/// use chrono::NaiveDate;
///
/// let t0 = NaiveDate::from_ymd_opt(2009, 1, 1).unwrap().and_hms_opt(1, 0, 0).unwrap();
/// let mut table = OutputTable::new(vec![t0]).unwrap();
/// table.push_column("ZONE1:Zone Mean Air Temperature [C](Hourly)", vec![21.]).unwrap();
/// table.push_column("ZONE1:Zone Lights Electricity Energy [J](Hourly)", vec![9.]).unwrap();
/// table.push_column("ZONE2:Zone Mean Air Temperature [C](Hourly)", vec![22.]).unwrap();
///
/// let temps = OutputSelector::new(&["Zone Mean Air Temperature"])
///     .drop_suffix(true)
///     .apply(&table)
///     .unwrap();
/// assert_eq!(temps.columns(), vec!["ZONE1", "ZONE2"]);
///
/// let zone2 = OutputSelector::new(&["zone mean air temperature"])
///     .key_values(&["Zone2"])
///     .apply(&table)
///     .unwrap();
/// assert_eq!(zone2.n_columns(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSelector {
    variables: Vec<String>,
    /// `None` means every key
    keys: Option<Vec<String>>,
    drop_suffix: bool,
    allow_empty: bool,
}

impl OutputSelector {
    /// Selects the columns containing any of `variables`, for every key
    pub fn new<S: AsRef<str>>(variables: &[S]) -> Self {
        Self {
            variables: variables.iter().map(|v| v.as_ref().to_string()).collect(),
            keys: None,
            drop_suffix: false,
            allow_empty: false,
        }
    }

    /// Restricts the selection to some keys. A `*` among them selects
    /// every key.
    pub fn key_values<S: AsRef<str>>(mut self, keys: &[S]) -> Self {
        if keys.iter().any(|k| k.as_ref().trim() == "*") {
            self.keys = None;
        } else {
            self.keys = Some(keys.iter().map(|k| k.as_ref().to_string()).collect());
        }
        self
    }

    /// Whether to rename the selected columns to their key only. Only
    /// valid when selecting a single variable.
    pub fn drop_suffix(mut self, drop: bool) -> Self {
        self.drop_suffix = drop;
        self
    }

    /// Whether selecting no columns is acceptable
    pub fn allow_empty(mut self, allow: bool) -> Self {
        self.allow_empty = allow;
        self
    }

    fn alternatives(items: &[String]) -> String {
        items
            .iter()
            .map(|i| regex::escape(i.trim()))
            .collect::<Vec<String>>()
            .join("|")
    }

    /// The pattern used for matching column names
    pub fn regex(&self) -> String {
        let variables = Self::alternatives(&self.variables);
        match &self.keys {
            None => format!("(?i)^.*(?:{})", variables),
            Some(keys) => format!("(?i)^(?:{}):.*(?:{})", Self::alternatives(keys), variables),
        }
    }

    fn empty_selection(&self) -> ResultsError {
        ResultsError::EmptySelection {
            variables: self.variables.clone(),
            keys: self
                .keys
                .clone()
                .unwrap_or_else(|| vec!["*".to_string()]),
        }
    }

    /// Builds a new table with the selected columns, in the order they
    /// appear in `table`. The index is kept as is.
    pub fn apply(&self, table: &OutputTable) -> Result<OutputTable, ResultsError> {
        if self.variables.is_empty() {
            return Err(ResultsError::Value(
                "At least one variable must be selected".to_string(),
            ));
        }
        if self.drop_suffix && self.variables.len() != 1 {
            return Err(ResultsError::Value(format!(
                "Cannot drop the suffix when selecting several variables ({:?})",
                self.variables
            )));
        }
        if let Some(keys) = &self.keys {
            if keys.is_empty() {
                if self.allow_empty {
                    return Ok(table.empty_like());
                }
                return Err(self.empty_selection());
            }
        }

        let re = Regex::new(&self.regex())?;
        let var_re = Regex::new(&format!("(?i){}", regex::escape(self.variables[0].trim())))?;

        let mut ret = table.empty_like();
        for (name, values) in table.iter_columns() {
            if !re.is_match(name) {
                continue;
            }
            let new_name = if self.drop_suffix {
                match var_re.find(name) {
                    Some(m) => name[..m.start()].trim_end_matches(':').to_string(),
                    None => name.to_string(),
                }
            } else {
                name.to_string()
            };
            ret.push_column(new_name, values.to_vec())?;
        }

        if ret.n_columns() == 0 && !self.allow_empty {
            return Err(self.empty_selection());
        }
        Ok(ret)
    }
}
