//! CSV ingestion, preprocessing, and the immutable record set.
//!
//! The preprocessing pipeline reproduces the canonical cleanup the analysis
//! engine assumes:
//!
//! 1. Impute missing ages and fares with the dataset median
//! 2. Impute missing embarkation ports with the dataset mode (Southampton
//!    when the whole column is empty)
//! 3. Derive title, family size, alone flag, and fare per person
//! 4. Bucket ages into fixed right-closed bins and fares into
//!    equal-frequency quartiles
//!
//! The resulting [`RecordSet`] is immutable and may be shared freely across
//! concurrent callers.

use std::{fs::File, io::Read, path::Path};

use maiden_stats::descriptive::{median_of_sorted, quantile_of_sorted};
use serde::Deserialize;
use tracing::debug;

use crate::{
    DataSchemaError,
    passenger::{AgeGroup, FareGroup, PassengerRecord, Port, Sex, Title},
};

/// Column names required in the source CSV (after lowercasing headers).
const REQUIRED_COLUMNS: [&str; 11] = [
    "survived", "pclass", "name", "sex", "age", "sibsp", "parch", "ticket", "fare", "cabin",
    "embarked",
];

/// One raw passenger row before preprocessing.
///
/// This is the loader's parse target and the constructor input for tests:
/// optional fields model the missing values the preprocessing step imputes.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPassenger {
    pub survived: bool,
    pub pclass: u8,
    pub name: String,
    pub sex: Sex,
    pub age: Option<f64>,
    pub sibsp: u32,
    pub parch: u32,
    pub ticket: String,
    pub fare: Option<f64>,
    pub cabin: Option<String>,
    pub embarked: Option<Port>,
}

/// Serde target for one CSV record; headers are lowercased before
/// deserialization so the original dataset's capitalized headers work.
#[derive(Debug, Deserialize)]
struct CsvRow {
    survived: u8,
    pclass: u8,
    name: String,
    sex: String,
    age: Option<f64>,
    sibsp: u32,
    parch: u32,
    ticket: String,
    fare: Option<f64>,
    cabin: Option<String>,
    embarked: Option<String>,
}

/// Fare quartile edges computed over the whole dataset.
///
/// Buckets are right-closed, so a fare exactly on an edge falls in the lower
/// bucket; everything at or below the first quartile is `Low`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FareQuartiles {
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
}

impl FareQuartiles {
    /// Computes equal-frequency quartile edges from the (imputed) fares.
    ///
    /// Returns `None` for an empty dataset.
    #[must_use]
    pub fn from_fares(fares: &[f64]) -> Option<Self> {
        let mut sorted = fares.to_vec();
        sorted.sort_by(f64::total_cmp);
        Some(Self {
            q1: quantile_of_sorted(&sorted, 0.25)?,
            q2: quantile_of_sorted(&sorted, 0.50)?,
            q3: quantile_of_sorted(&sorted, 0.75)?,
        })
    }

    /// Assigns a fare to its quartile bucket.
    #[must_use]
    pub fn assign(&self, fare: f64) -> FareGroup {
        if fare <= self.q1 {
            FareGroup::Low
        } else if fare <= self.q2 {
            FareGroup::MediumLow
        } else if fare <= self.q3 {
            FareGroup::MediumHigh
        } else {
            FareGroup::High
        }
    }
}

/// The canonical, fully preprocessed passenger table.
///
/// Immutable once constructed; every invariant of the data contract (no
/// missing values, `family_size >= 1`, total age/fare bucketing) holds for
/// each contained record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSet {
    records: Vec<PassengerRecord>,
}

impl RecordSet {
    /// Loads and preprocesses the dataset from a CSV file.
    pub fn from_csv_path(path: &Path) -> Result<Self, DataSchemaError> {
        Self::from_reader(File::open(path)?)
    }

    /// Loads and preprocesses the dataset from any CSV reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataSchemaError> {
        let mut csv_reader = csv::Reader::from_reader(reader);

        let headers = csv_reader
            .headers()?
            .iter()
            .map(|header| header.trim().to_lowercase())
            .collect::<csv::StringRecord>();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|header| header == column) {
                return Err(DataSchemaError::MissingColumn { column });
            }
        }
        csv_reader.set_headers(headers);

        let mut rows = Vec::new();
        for row in csv_reader.deserialize::<CsvRow>() {
            rows.push(Self::raw_from_csv(row?)?);
        }
        Self::preprocess(rows)
    }

    fn raw_from_csv(row: CsvRow) -> Result<RawPassenger, DataSchemaError> {
        let sex = row
            .sex
            .trim()
            .parse::<Sex>()
            .map_err(|_| DataSchemaError::InvalidValue {
                column: "sex",
                message: format!("expected 'male' or 'female', got '{}'", row.sex),
            })?;
        let embarked = match row.embarked.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(code) => Some(Port::from_code(code).ok_or_else(|| {
                DataSchemaError::InvalidValue {
                    column: "embarked",
                    message: format!("unknown port code '{code}'"),
                }
            })?),
        };
        let cabin = row.cabin.filter(|cabin| !cabin.trim().is_empty());

        Ok(RawPassenger {
            survived: row.survived != 0,
            pclass: row.pclass,
            name: row.name,
            sex,
            age: row.age,
            sibsp: row.sibsp,
            parch: row.parch,
            ticket: row.ticket,
            fare: row.fare,
            cabin,
            embarked,
        })
    }

    /// Preprocesses raw rows into the canonical record set.
    ///
    /// This is the single place where imputation happens; aggregation code
    /// downstream assumes it already ran.
    pub fn preprocess(rows: Vec<RawPassenger>) -> Result<Self, DataSchemaError> {
        for row in &rows {
            if !(1..=3).contains(&row.pclass) {
                return Err(DataSchemaError::InvalidValue {
                    column: "pclass",
                    message: format!("expected class 1-3, got {}", row.pclass),
                });
            }
            if row.age.is_some_and(|age| !(0.0..=150.0).contains(&age)) {
                return Err(DataSchemaError::InvalidValue {
                    column: "age",
                    message: format!("age out of range: {:?}", row.age),
                });
            }
            if row.fare.is_some_and(|fare| fare < 0.0 || !fare.is_finite()) {
                return Err(DataSchemaError::InvalidValue {
                    column: "fare",
                    message: format!("fare out of range: {:?}", row.fare),
                });
            }
        }

        if rows.is_empty() {
            return Ok(Self { records: vec![] });
        }

        let age_median = column_median(rows.iter().filter_map(|row| row.age), "age")?;
        let fare_median = column_median(rows.iter().filter_map(|row| row.fare), "fare")?;
        let embarked_mode = port_mode(&rows);

        let imputed_ages = rows.iter().filter(|row| row.age.is_none()).count();
        let imputed_fares = rows.iter().filter(|row| row.fare.is_none()).count();
        let imputed_ports = rows.iter().filter(|row| row.embarked.is_none()).count();

        let fares = rows
            .iter()
            .map(|row| row.fare.unwrap_or(fare_median))
            .collect::<Vec<_>>();
        let quartiles =
            FareQuartiles::from_fares(&fares).expect("non-empty rows produce quartiles");

        let records = rows
            .into_iter()
            .zip(fares)
            .map(|(row, fare)| {
                let age = row.age.unwrap_or(age_median);
                let family_size = row.sibsp + row.parch + 1;
                PassengerRecord {
                    survived: row.survived,
                    pclass: row.pclass,
                    title: Title::from_name(&row.name),
                    name: row.name,
                    sex: row.sex,
                    age,
                    sibsp: row.sibsp,
                    parch: row.parch,
                    ticket: row.ticket,
                    fare,
                    cabin: row.cabin,
                    embarked: row.embarked.unwrap_or(embarked_mode),
                    family_size,
                    is_alone: family_size == 1,
                    fare_per_person: fare / f64::from(family_size),
                    age_group: AgeGroup::from_age(age),
                    fare_group: quartiles.assign(fare),
                }
            })
            .collect::<Vec<_>>();

        debug!(
            rows = records.len(),
            imputed_ages, imputed_fares, imputed_ports, "preprocessed passenger records"
        );

        Ok(Self { records })
    }

    /// All records, in source order.
    #[must_use]
    pub fn records(&self) -> &[PassengerRecord] {
        &self.records
    }

    /// Number of passengers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over records in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, PassengerRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a PassengerRecord;
    type IntoIter = std::slice::Iter<'a, PassengerRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Median of the known values of a numeric column, for imputation.
///
/// The column must have at least one known value, otherwise there is
/// nothing to impute from.
fn column_median<I>(values: I, column: &'static str) -> Result<f64, DataSchemaError>
where
    I: Iterator<Item = f64>,
{
    let mut known = values.collect::<Vec<_>>();
    known.sort_by(f64::total_cmp);
    median_of_sorted(&known).ok_or_else(|| DataSchemaError::InvalidValue {
        column,
        message: "column has no known values to impute from".to_owned(),
    })
}

/// Most frequent embarkation port, defaulting to Southampton.
fn port_mode(rows: &[RawPassenger]) -> Port {
    let counts = maiden_stats::grouping::group_counts(rows.iter().filter_map(|row| row.embarked));
    counts
        .into_iter()
        .max_by_key(|&(_, count)| count)
        .map_or(Port::Southampton, |(port, _)| port)
}
