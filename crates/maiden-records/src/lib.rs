//! Canonical passenger record set for the Maiden analysis engine.
//!
//! This crate owns the data contract every aggregation function relies on: a
//! fully preprocessed, immutable table of passenger records with imputation
//! and derived fields already applied. Consumers never clean or impute data
//! themselves.
//!
//! # Overview
//!
//! - [`passenger`]: the [`PassengerRecord`](passenger::PassengerRecord)
//!   row type and its categorical enums
//! - [`dataset`]: CSV ingestion, preprocessing, and the immutable
//!   [`RecordSet`](dataset::RecordSet)
//!
//! # Examples
//!
//! ```no_run
//! use maiden_records::dataset::RecordSet;
//!
//! # fn main() -> Result<(), maiden_records::DataSchemaError> {
//! let records = RecordSet::from_csv_path("data/titanic.csv".as_ref())?;
//! println!("loaded {} passengers", records.len());
//! # Ok(())
//! # }
//! ```

pub use self::{dataset::RecordSet, passenger::PassengerRecord};

pub mod dataset;
pub mod passenger;

/// Errors raised while loading or validating the passenger dataset.
///
/// All of these are fatal: a record set is either fully valid or not
/// constructed at all.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum DataSchemaError {
    /// The dataset file could not be read.
    #[display("failed to read dataset: {_0}")]
    Io(std::io::Error),
    /// The CSV structure itself is malformed.
    #[display("malformed csv record: {_0}")]
    Csv(csv::Error),
    /// A required column is absent from the header row.
    #[display("required column '{column}' is missing from the dataset")]
    #[from(skip)]
    MissingColumn { column: &'static str },
    /// A cell could not be interpreted as the required type or domain.
    #[display("invalid value in column '{column}': {message}")]
    #[from(skip)]
    InvalidValue {
        column: &'static str,
        message: String,
    },
}
