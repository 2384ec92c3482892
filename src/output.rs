//! CSV export of projection timelines and scenario summaries

use crate::metrics::RevenueMetrics;
use crate::projection::MonthlyProjection;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// One line of a batch summary
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryRow<'a> {
    name: &'a str,
    horizon_months: u32,
    #[serde(rename = "projectedARR")]
    projected_arr: f64,
    #[serde(rename = "endingMRR")]
    ending_mrr: f64,
    total_revenue_window: f64,
    total_revenue_horizon: f64,
    recurring_percentage: f64,
    project_percentage: f64,
    monthly_growth_rate: f64,
    current_run_rate: f64,
}

impl<'a> SummaryRow<'a> {
    fn new(name: &'a str, m: &RevenueMetrics) -> Self {
        Self {
            name,
            horizon_months: m.horizon_months,
            projected_arr: m.projected_arr,
            ending_mrr: m.ending_mrr,
            total_revenue_window: m.total_revenue_window,
            total_revenue_horizon: m.total_revenue_horizon,
            recurring_percentage: m.recurring_percentage,
            project_percentage: m.project_percentage,
            monthly_growth_rate: m.monthly_growth_rate,
            current_run_rate: m.current_run_rate,
        }
    }
}

/// Write one row per month, headers in camelCase
pub fn write_projection_csv<W: Write>(writer: W, rows: &[MonthlyProjection]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the monthly timeline to a file
pub fn write_projection_csv_path<P: AsRef<Path>>(path: P, rows: &[MonthlyProjection]) -> Result<(), csv::Error> {
    let file = std::fs::File::create(path)?;
    write_projection_csv(file, rows)
}

/// Write one metrics line per named scenario
pub fn write_summary_csv<'a, W, I>(writer: W, summaries: I) -> Result<(), csv::Error>
where
    W: Write,
    I: IntoIterator<Item = (&'a str, &'a RevenueMetrics)>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (name, metrics) in summaries {
        csv_writer.serialize(SummaryRow::new(name, metrics))?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::SimpleInputs;
    use crate::projection::project_revenue;
    use chrono::NaiveDate;

    #[test]
    fn test_projection_csv_has_row_per_month() {
        let as_of = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let result = project_revenue(&SimpleInputs::default().into(), as_of).unwrap();

        let mut buffer = Vec::new();
        write_projection_csv(&mut buffer, &result.projections).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 25);
        assert!(lines[0].starts_with("month,monthLabel,existingMRR,newMRR"));
        assert!(lines[1].starts_with("1,Feb 2026,100000"));
    }

    #[test]
    fn test_summary_csv() {
        let as_of = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let result = project_revenue(&SimpleInputs::default().into(), as_of).unwrap();

        let mut buffer = Vec::new();
        write_summary_csv(&mut buffer, [("Base", &result.metrics)]).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.starts_with("name,horizonMonths,projectedARR"));
        assert!(text.lines().nth(1).unwrap().starts_with("Base,24,"));
    }
}
