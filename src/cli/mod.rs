use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::services::Aggregator;
use crate::types::{AggregateRow, BucketField, DatepivotError, Record, Result};

/// Pivot time-stamped JSON records into calendar buckets
#[derive(Parser)]
#[command(name = "datepivot")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a JSON array of record objects
    input: PathBuf,

    /// Calendar bucket to group by
    #[arg(long, value_enum, default_value_t = BucketField::Month)]
    group_by: BucketField,

    /// Keep only the group whose key matches exactly
    #[arg(long)]
    filter: Option<String>,

    /// Record field holding the date to decompose
    #[arg(long, default_value = "out_of_service_date")]
    date_field: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let records = load_records(&self.input)?;
        let rows = Aggregator::pivot(
            records,
            &self.date_field,
            self.group_by,
            self.filter.as_deref(),
        );

        if self.json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        } else {
            print_table(self.group_by, &rows);
        }
        Ok(())
    }
}

/// Load a JSON array of schema-free records from disk.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|e| DatepivotError::Parse(e.to_string()))
}

fn print_table(bucket: BucketField, rows: &[AggregateRow]) {
    println!("{:<12} {:>16}", bucket, "total");
    for row in rows {
        println!("{:<12} {:>16}", row.label, row.value);
    }
}
