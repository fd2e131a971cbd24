//! Statistical analysis utilities for the Maiden project.
//!
//! This crate provides the numeric building blocks used by the query analysis
//! engine:
//!
//! - **Descriptive statistics**: mean, median, min, max, standard deviation
//! - **Grouping**: event rates and count/percentage breakdowns over
//!   categorical groupings
//! - **Correlation**: Pearson correlation coefficient for paired samples
//! - **Hypothesis tests**: Welch's t-test and the chi-squared test of
//!   independence
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`grouping`]: Rates and percentage breakdowns per group
//! - [`correlation`]: Pearson correlation for paired samples
//! - [`hypothesis`]: Welch t-test and chi-squared independence test
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use maiden_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! assert_eq!(stats.median, 3.0);
//! ```
//!
//! ## Computing an event rate
//!
//! ```
//! use maiden_stats::grouping::rate_percent;
//!
//! let survived = [true, false, false, true];
//! assert_eq!(rate_percent(survived), Some(50.0));
//! ```
//!
//! ## Testing independence of two categoricals
//!
//! ```
//! use maiden_stats::hypothesis::chi_squared_test;
//!
//! // Contingency table: rows = groups, columns = outcomes.
//! let table = [[100.0, 50.0], [30.0, 120.0]];
//! let result = chi_squared_test(&table.map(|row| row.to_vec())).unwrap();
//! assert!(result.significant);
//! ```

pub mod correlation;
pub mod descriptive;
pub mod grouping;
pub mod hypothesis;
