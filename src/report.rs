//! Report data model
//!
//! Agents produce [`Report`]s made of plain tables; turning them into text is
//! left to [`crate::output`].

/// A single table cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Count(u64),
    /// Percentage in `0.0..=100.0`
    Percent(f64),
    /// Unitless ratio such as count per keyspace
    Ratio(f64),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// True for cells the renderer aligns to the right
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Self::Text(_))
    }
}

/// An ordered table of rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub heading: Option<String>,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            heading: None,
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    pub fn push(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }
}

/// Output of one agent
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub title: String,
    pub tables: Vec<Table>,
    /// Summary lines printed after the tables
    pub notes: Vec<String>,
}

impl Report {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// No rows and no notes: nothing worth rendering
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty() && self.tables.iter().all(|t| t.rows.is_empty())
    }
}

/// `count` as a percentage of `total`; 0 when `total` is 0
pub fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(1, 4), 25.0);
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(5, 0), 0.0);
        assert!((percentage(2, 3) - 66.6667).abs() < 1e-3);
    }

    #[test]
    fn test_empty_report() {
        let report = Report::new("Empty").table(Table::new(["Key", "Count"]));
        assert!(report.is_empty());

        let report = report.note("0 entries");
        assert!(!report.is_empty());
    }
}
