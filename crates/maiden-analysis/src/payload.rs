//! Visualization descriptors handed to the external chart renderer.
//!
//! The engine never draws pixels. Each aggregation produces a
//! [`VisualizationKind`] tag, a small [`TablePayload`] sized for direct
//! charting, and a title; the renderer owns everything after that.

use serde::Serialize;

/// Chart type tag understood by the external renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum VisualizationKind {
    #[display("bar")]
    Bar,
    #[display("pie")]
    Pie,
    #[display("histogram")]
    Histogram,
    #[display("violin")]
    Violin,
    #[display("kde")]
    Kde,
    #[display("heatmap")]
    Heatmap,
}

/// One cell of a chart payload.
#[derive(Debug, Clone, PartialEq, Serialize, derive_more::From)]
#[serde(untagged)]
pub enum Cell {
    Bool(bool),
    Int(i64),
    Float(f64),
    #[from(String, &str)]
    Text(String),
}

/// A small ordered table: named columns and typed rows.
///
/// Grouped charts carry one row per group; distribution charts (histogram,
/// violin, kde) carry the relevant columns of the full record set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TablePayload {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl TablePayload {
    /// Creates an empty payload with the given column names.
    #[must_use]
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: vec![],
        }
    }

    /// Appends a row.
    ///
    /// # Panics
    ///
    /// Panics if the row width does not match the column count.
    pub fn push_row<I>(&mut self, row: I)
    where
        I: IntoIterator<Item = Cell>,
    {
        let row = row.into_iter().collect::<Vec<_>>();
        assert_eq!(
            row.len(),
            self.columns.len(),
            "payload row width must match column count"
        );
        self.rows.push(row);
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }
}

/// The complete result of one aggregation function.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    /// Chart payload for the renderer.
    pub payload: TablePayload,
    /// Chart type for the renderer.
    pub visualization: VisualizationKind,
    /// Chart title.
    pub title: String,
    /// Computed summary prose with numbers interpolated; the narrative
    /// module wraps this with headings, context, and follow-ups.
    pub summary: String,
}
