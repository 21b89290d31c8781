use std::collections::BTreeMap;
use std::io::Read;

use serde_json::{Map, Number, Value};

use super::domain::VehicleInput;
use super::validation::{validate_payload, ValidationError};

const TEXT_COLUMNS: [&str; 2] = ["unit_name", "segment"];

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("failed to read batch csv: {0}")]
    Csv(#[from] csv::Error),
}

/// One CSV data row after the validation gate. `row` is 1-based and excludes
/// the header line.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRow {
    pub row: usize,
    pub outcome: Result<VehicleInput, ValidationError>,
}

/// Read a fleet CSV whose headers use the payload field names. Malformed CSV
/// aborts the read; rows that fail validation are kept with their details.
pub fn read_batch<R: Read>(reader: R) -> Result<Vec<BatchRow>, BatchError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for (index, record) in csv_reader
        .deserialize::<BTreeMap<String, String>>()
        .enumerate()
    {
        let cells = record?;
        rows.push(BatchRow {
            row: index + 1,
            outcome: validate_payload(&row_payload(cells)),
        });
    }

    Ok(rows)
}

fn row_payload(cells: BTreeMap<String, String>) -> Value {
    let mut object = Map::new();
    for (column, cell) in cells {
        if cell.is_empty() {
            continue;
        }
        let value = if TEXT_COLUMNS.contains(&column.as_str()) {
            Value::String(cell)
        } else if column == "uses_leasing" {
            match cell.to_ascii_lowercase().as_str() {
                "true" | "ya" | "1" => Value::Bool(true),
                "false" | "tidak" | "0" => Value::Bool(false),
                _ => Value::String(cell),
            }
        } else {
            cell.parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .unwrap_or(Value::String(cell))
        };
        object.insert(column, value);
    }
    Value::Object(object)
}
