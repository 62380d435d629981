//! Aggregated report CSV export.

use rust_decimal::Decimal;

use crate::tournaments::{
    ballots::export::{ExportError, finish, writer},
    standings::compute::AggregatedReport,
};

pub const REPORT_HEADER: [&str; 8] = [
    "side",
    "role",
    "name",
    "avgDirect",
    "avgCross",
    "avgStatement",
    "statementPickup",
    "crossPickup",
];

fn cell(value: Option<Decimal>) -> String {
    value.map(|v| v.normalize().to_string()).unwrap_or_default()
}

/// One row per (side, role) in the report. Missing statistics are written
/// as empty fields.
pub fn report_to_csv(report: &AggregatedReport) -> Result<String, ExportError> {
    let mut wtr = writer();
    wtr.write_record(REPORT_HEADER)?;

    for side in &report.sides {
        for entry in &side.entries {
            wtr.write_record([
                side.side.to_string(),
                entry.role.clone(),
                entry.name.clone(),
                cell(entry.avg_direct),
                cell(entry.avg_cross),
                cell(entry.avg_statement),
                cell(entry.statement_pickup),
                cell(entry.cross_pickup),
            ])?;
        }
    }

    finish(wtr)
}
