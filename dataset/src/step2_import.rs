use crate::step1_fetch::FetchStepOutput;
use log::info;
use polars::prelude::*;
use std::fmt;
use std::fmt::Display;

/// Columns every downstream consumer relies on. Import fails fast when
/// one is missing instead of letting a drifted schema surface later as
/// a join against nothing.
pub const REQUIRED_COLUMNS: [&str; 16] = [
    "area name",
    "outcode",
    "ward",
    "district",
    "latitude",
    "longitude",
    "median_price",
    "bedrooms",
    "bathrooms",
    "livingrooms",
    "propertytype_converted",
    "tenure",
    "crime_level",
    "num_good",
    "num_outstanding",
    "nearest_station",
];

pub fn import_properties(prev_step_out: FetchStepOutput) -> Result<DataFrame, ImportError> {
    let FetchStepOutput { dataset, path } = prev_step_out;

    let frame = LazyCsvReader::new(path).finish()?;

    // Column names arrive in mixed case with stray whitespace
    let schema = frame.clone().collect_schema()?;
    let existing: Vec<String> = schema.iter_names().map(|name| name.to_string()).collect();
    let normalized: Vec<String> = existing.iter().map(|name| name.trim().to_lowercase()).collect();

    for column in REQUIRED_COLUMNS {
        if !normalized.iter().any(|name| name == column) {
            return Err(ImportError::MissingColumn(column));
        }
    }

    let renamed: Vec<Expr> = existing.iter()
        .zip(&normalized)
        .map(|(old, new)| col(old.as_str()).alias(new.as_str()))
        .collect();

    let table = frame
        .select(renamed)
        .with_columns([
            col("latitude").cast(DataType::Float64),
            col("longitude").cast(DataType::Float64),
            col("median_price").cast(DataType::Float64),
            col("bedrooms").cast(DataType::Int64),
            col("bathrooms").cast(DataType::Int64),
            col("livingrooms").cast(DataType::Int64),
            // Missing school counts mean "no info", which filters treat as zero
            col("num_good").fill_null(lit(0)).cast(DataType::Int64),
            col("num_outstanding").fill_null(lit(0)).cast(DataType::Int64),
        ])
        .collect()?;

    info!(
        target: "dataset",
        "Imported dataset '{}' with {} rows", dataset.id, table.height()
    );

    Ok(table)
}

#[derive(thiserror::Error, Debug)]
pub enum ImportError {
    Polars(#[from] PolarsError),
    MissingColumn(&'static str),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ImportError::Polars(err) => err.fmt(f),
            ImportError::MissingColumn(name) => {
                write!(f, "Property table is missing required column '{}'", name)
            }
        }
    }
}
