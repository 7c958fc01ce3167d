//! Table output formatting using the `tabled` crate

use tabled::{builder::Builder, settings::Style};

/// Table output formatter
pub struct TableOutput;

impl TableOutput {
    /// Format rows under the given headers. Empty input renders a placeholder.
    pub fn format_rows<R, C>(headers: &[&str], rows: R) -> String
    where
        R: IntoIterator<Item = Vec<C>>,
        C: Into<String>,
    {
        let mut builder = Builder::default();
        builder.push_record(headers.iter().map(|h| h.to_string()));

        let mut count = 0;
        for row in rows {
            builder.push_record(row.into_iter().map(Into::<String>::into));
            count += 1;
        }

        if count == 0 {
            return "(no results)".to_string();
        }

        let mut table = builder.build();
        table.with(Style::rounded());
        table.to_string()
    }
}
