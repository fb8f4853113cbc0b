use tabled::{Table, Tabled, settings::Style};

use crate::{
    domain::{AlignedDataset, AlignedRow, DatasetSummary},
    utils::format_utc,
};

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "Time (UTC)")]
    time: String,
    #[tabled(rename = "Close")]
    close: String,
    #[tabled(rename = "Volume")]
    volume: String,
    #[tabled(rename = "Funding %")]
    funding_pct: String,
    #[tabled(rename = "Open Interest")]
    open_interest: String,
    #[tabled(rename = "Notional")]
    notional_value: String,
}

impl From<&AlignedRow> for ReportRow {
    fn from(row: &AlignedRow) -> Self {
        Self {
            time: format_utc(&row.time),
            close: format!("{:.4}", row.close),
            volume: format!("{:.2}", row.volume),
            funding_pct: format!("{:.4}", row.funding_rate * 100.0),
            open_interest: format!("{:.2}", row.open_interest),
            notional_value: format!("{:.0}", row.notional_value),
        }
    }
}

/// Table of the last `tail` rows (all rows if `None`).
pub fn render_table(dataset: &AlignedDataset, tail: Option<usize>) -> String {
    let rows = match tail {
        Some(n) => dataset.tail(n),
        None => dataset.rows(),
    };
    let mut table = Table::new(rows.iter().map(ReportRow::from));
    table.with(Style::rounded());
    table.to_string()
}

pub fn render_summary(symbol: &str, interval: &str, summary: &DatasetSummary) -> String {
    format!(
        "{} {}: {} aligned rows from {} to {}\n  close range: {:.4} .. {:.4}\n  open interest range: {:.2} .. {:.2}",
        symbol,
        interval,
        summary.rows,
        format_utc(&summary.first),
        format_utc(&summary.last),
        summary.close_range.0,
        summary.close_range.1,
        summary.open_interest_range.0,
        summary.open_interest_range.1,
    )
}
