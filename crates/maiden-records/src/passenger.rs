//! The passenger row type and its categorical enums.
//!
//! A [`PassengerRecord`] is immutable once constructed and carries both the
//! raw columns of the source dataset and the derived fields (title, family
//! size, fare per person, age/fare bins) the aggregations depend on.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Passenger sex as recorded in the dataset.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Deserialize,
    Serialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[display("female")]
    Female,
    #[display("male")]
    Male,
}

/// Port of embarkation.
///
/// Variants are declared in code order (C, Q, S) so ordered maps keyed by
/// port iterate the way the source dataset's groupings do.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
pub enum Port {
    #[serde(rename = "C")]
    Cherbourg,
    #[serde(rename = "Q")]
    Queenstown,
    #[serde(rename = "S")]
    Southampton,
}

impl Port {
    /// Parses the single-letter port code used by the dataset.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "C" | "c" => Some(Self::Cherbourg),
            "Q" | "q" => Some(Self::Queenstown),
            "S" | "s" => Some(Self::Southampton),
            _ => None,
        }
    }

    /// The single-letter code of this port.
    #[must_use]
    pub fn code(self) -> char {
        match self {
            Self::Cherbourg => 'C',
            Self::Queenstown => 'Q',
            Self::Southampton => 'S',
        }
    }

    /// The full town name, used for chart payloads and prose.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Cherbourg => "Cherbourg",
            Self::Queenstown => "Queenstown",
            Self::Southampton => "Southampton",
        }
    }
}

/// Honorific extracted from the passenger name, with rare titles collapsed
/// into broader buckets.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Deserialize,
    Serialize,
    derive_more::Display,
)]
pub enum Title {
    Mr,
    Mrs,
    Miss,
    Master,
    Officer,
    Royalty,
}

static HONORIFIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" ([A-Za-z]+)\.").expect("honorific pattern is valid"));

impl Title {
    /// Derives the title from a raw passenger name.
    ///
    /// Names in the dataset follow the form `"Surname, Title. Given names"`.
    /// Rare honorifics collapse into `Officer`/`Royalty`; anything unmapped
    /// (or a name with no honorific at all) defaults to `Mr`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use maiden_records::passenger::Title;
    /// assert_eq!(Title::from_name("Heikkinen, Miss. Laina"), Title::Miss);
    /// assert_eq!(Title::from_name("Simonius-Blumer, Col. Oberst Alfons"), Title::Officer);
    /// assert_eq!(Title::from_name("no honorific here"), Title::Mr);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let Some(captures) = HONORIFIC.captures(name) else {
            return Self::Mr;
        };
        match &captures[1] {
            "Mr" => Self::Mr,
            "Mrs" | "Mme" | "Ms" => Self::Mrs,
            "Miss" | "Mlle" => Self::Miss,
            "Master" => Self::Master,
            "Dr" | "Rev" | "Col" | "Major" | "Capt" => Self::Officer,
            "Don" | "Lady" | "Countess" | "Jonkheer" | "Sir" => Self::Royalty,
            _ => Self::Mr,
        }
    }
}

/// Age bucket with right-closed edges at 12, 18, 35, 60, and 100 years.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
pub enum AgeGroup {
    Child,
    Teenager,
    YoungAdult,
    Adult,
    Senior,
}

impl AgeGroup {
    /// Buckets an age in years.
    ///
    /// The bins are right-closed; an age of exactly 12 is still a child.
    /// Ages of 0 (infants recorded with fractional ages rounded down) fall
    /// in `Child` so the mapping stays total.
    ///
    /// # Examples
    ///
    /// ```
    /// # use maiden_records::passenger::AgeGroup;
    /// assert_eq!(AgeGroup::from_age(12.0), AgeGroup::Child);
    /// assert_eq!(AgeGroup::from_age(12.5), AgeGroup::Teenager);
    /// assert_eq!(AgeGroup::from_age(74.0), AgeGroup::Senior);
    /// ```
    #[must_use]
    pub fn from_age(age: f64) -> Self {
        if age <= 12.0 {
            Self::Child
        } else if age <= 18.0 {
            Self::Teenager
        } else if age <= 35.0 {
            Self::YoungAdult
        } else if age <= 60.0 {
            Self::Adult
        } else {
            Self::Senior
        }
    }

    /// Human-readable bucket label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Child => "Child",
            Self::Teenager => "Teenager",
            Self::YoungAdult => "Young Adult",
            Self::Adult => "Adult",
            Self::Senior => "Senior",
        }
    }
}

/// Equal-frequency fare quartile, computed over the whole dataset at load
/// time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
pub enum FareGroup {
    Low,
    MediumLow,
    MediumHigh,
    High,
}

impl FareGroup {
    /// Human-readable bucket label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::MediumLow => "Medium-Low",
            Self::MediumHigh => "Medium-High",
            Self::High => "High",
        }
    }
}

/// One fully preprocessed passenger row.
///
/// Every field is populated: missing ages and fares were imputed with the
/// dataset median, missing embarkation ports with the dataset mode, and all
/// derived fields computed, before this value could exist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassengerRecord {
    /// Whether the passenger survived.
    pub survived: bool,
    /// Cabin class, 1 (highest) through 3.
    pub pclass: u8,
    /// Full name as recorded; used only to derive `title`.
    pub name: String,
    pub sex: Sex,
    /// Age in years; never negative.
    pub age: f64,
    /// Siblings and spouses aboard.
    pub sibsp: u32,
    /// Parents and children aboard.
    pub parch: u32,
    /// Ticket number; carried through but unused by analysis.
    pub ticket: String,
    /// Ticket fare in pounds.
    pub fare: f64,
    /// Cabin identifier; carried through but unused by analysis.
    pub cabin: Option<String>,
    pub embarked: Port,
    pub title: Title,
    /// `sibsp + parch + 1`; always at least 1.
    pub family_size: u32,
    /// Whether the passenger travelled with no family aboard.
    pub is_alone: bool,
    /// `fare / family_size`.
    pub fare_per_person: f64,
    pub age_group: AgeGroup,
    pub fare_group: FareGroup,
}
