use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, Float64Array, LargeStringArray, StringArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::model::{LaunchDataset, LaunchRecord, Outcome};
use super::{COL_BOOSTER, COL_CLASS, COL_PAYLOAD, COL_SITE};
use crate::error::{DataFormatError, LoadError};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with `Launch Site`, `Payload Mass (kg)`,
///   `Booster Version Category` and `class` (extra columns are ignored)
/// * `.json`    – `[{ "Launch Site": ..., "class": 1, ... }, ...]`
/// * `.parquet` – the same four columns
pub fn load_file(path: &Path) -> Result<LaunchDataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => {
            let file = open(path)?;
            load_csv_reader(file)?
        }
        "json" => {
            let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            load_json_str(&text)?
        }
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    log::info!(
        "Loaded {} launch records from {}: sites {:?}, payload {}..={} kg",
        dataset.len(),
        path.display(),
        dataset
            .catalog()
            .sites()
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>(),
        dataset.bounds().min,
        dataset.bounds().max,
    );
    Ok(dataset)
}

fn open(path: &Path) -> Result<std::fs::File, LoadError> {
    std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Read CSV launch data from any reader.
pub fn load_csv_reader<R: Read>(source: R) -> Result<LaunchDataset, LoadError> {
    let mut reader = csv::Reader::from_reader(source);
    let headers = reader.headers()?.clone();

    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or(DataFormatError::MissingColumn { column: name })
    };
    let site_idx = column(COL_SITE)?;
    let payload_idx = column(COL_PAYLOAD)?;
    let booster_idx = column(COL_BOOSTER)?;
    let class_idx = column(COL_CLASS)?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result?;
        let cell = |idx: usize| row.get(idx).unwrap_or("");

        let payload = parse_payload(cell(payload_idx), row_no)?;
        let outcome = parse_outcome(cell(class_idx), row_no)?;
        records.push(LaunchRecord::new(
            row_no,
            cell(site_idx),
            payload,
            cell(booster_idx),
            outcome,
        )?);
    }

    LaunchDataset::from_records(records)
}

fn parse_payload(s: &str, row: usize) -> Result<f64, DataFormatError> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| DataFormatError::InvalidValue {
            row,
            column: COL_PAYLOAD,
            value: s.to_string(),
            reason: "is not a number",
        })
}

fn parse_outcome(s: &str, row: usize) -> Result<Outcome, DataFormatError> {
    Outcome::parse(s).ok_or_else(|| invalid_class(row, s))
}

fn invalid_class(row: usize, value: impl ToString) -> DataFormatError {
    DataFormatError::InvalidValue {
        row,
        column: COL_CLASS,
        value: value.to_string(),
        reason: "is not a 0/1 class",
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 525.0,
///     "Booster Version Category": "v1.0",
///     "class": 0
///   },
///   ...
/// ]
/// ```
pub fn load_json_str(text: &str) -> Result<LaunchDataset, LoadError> {
    let root: JsonValue = serde_json::from_str(text)?;

    let rows = root.as_array().ok_or_else(|| DataFormatError::Malformed {
        row: 0,
        reason: "expected a top-level JSON array".to_string(),
    })?;

    let mut records = Vec::with_capacity(rows.len());

    for (i, rec) in rows.iter().enumerate() {
        let obj = rec.as_object().ok_or_else(|| DataFormatError::Malformed {
            row: i,
            reason: "not a JSON object".to_string(),
        })?;

        let site = json_field(obj, COL_SITE)?;
        let booster = json_field(obj, COL_BOOSTER)?;
        let payload = match json_field(obj, COL_PAYLOAD)? {
            JsonValue::Number(n) => n.as_f64(),
            JsonValue::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
        .ok_or_else(|| DataFormatError::InvalidValue {
            row: i,
            column: COL_PAYLOAD,
            value: obj[COL_PAYLOAD].to_string(),
            reason: "is not a number",
        })?;
        let outcome = match json_field(obj, COL_CLASS)? {
            JsonValue::Number(n) => Outcome::parse(&n.to_string()),
            JsonValue::String(s) => Outcome::parse(s),
            _ => None,
        }
        .ok_or_else(|| invalid_class(i, &obj[COL_CLASS]))?;

        records.push(LaunchRecord::new(
            i,
            json_text(site),
            payload,
            json_text(booster),
            outcome,
        )?);
    }

    LaunchDataset::from_records(records)
}

fn json_field<'a>(
    obj: &'a Map<String, JsonValue>,
    column: &'static str,
) -> Result<&'a JsonValue, DataFormatError> {
    obj.get(column)
        .ok_or(DataFormatError::MissingColumn { column })
}

/// Non-string values become the empty string and fail record validation.
fn json_text(val: &JsonValue) -> &str {
    val.as_str().unwrap_or("")
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the four launch columns.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`): strings may be `Utf8` or `LargeUtf8`,
/// payload and class any numeric or boolean type (class must hold 0 or 1).
fn load_parquet(path: &Path) -> Result<LaunchDataset, LoadError> {
    let file = open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    // Checked on the file schema so a file without row groups still reports
    // the missing column rather than an empty dataset.
    let schema = builder.schema().clone();
    let column = |name: &'static str| {
        schema
            .index_of(name)
            .map_err(|_| DataFormatError::MissingColumn { column: name })
    };
    let site_idx = column(COL_SITE)?;
    let payload_idx = column(COL_PAYLOAD)?;
    let booster_idx = column(COL_BOOSTER)?;
    let class_idx = column(COL_CLASS)?;

    let reader = builder.build()?;

    let mut records = Vec::new();
    let mut row_offset = 0;

    for batch_result in reader {
        let batch = batch_result?;
        let site_col = batch.column(site_idx);
        let booster_col = batch.column(booster_idx);
        let payload_col = as_float64(batch.column(payload_idx), COL_PAYLOAD, row_offset)?;
        let class_col = as_float64(batch.column(class_idx), COL_CLASS, row_offset)?;

        for i in 0..batch.num_rows() {
            let row = row_offset + i;
            let site = string_at(site_col, i).ok_or_else(|| null_cell(row, COL_SITE))?;
            let booster =
                string_at(booster_col, i).ok_or_else(|| null_cell(row, COL_BOOSTER))?;
            let payload = float_at(&payload_col, i).ok_or_else(|| null_cell(row, COL_PAYLOAD))?;
            let class = float_at(&class_col, i).ok_or_else(|| null_cell(row, COL_CLASS))?;
            let outcome = Outcome::from_f64(class).ok_or_else(|| invalid_class(row, class))?;

            records.push(LaunchRecord::new(row, site, payload, booster, outcome)?);
        }
        row_offset += batch.num_rows();
    }

    LaunchDataset::from_records(records)
}

fn null_cell(row: usize, column: &'static str) -> DataFormatError {
    DataFormatError::InvalidValue {
        row,
        column,
        value: "<null>".to_string(),
        reason: "is null or has an unsupported type",
    }
}

// -- Arrow helpers --

fn string_at(col: &Arc<dyn Array>, row: usize) -> Option<&str> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .map(|a| a.value(row)),
        DataType::LargeUtf8 => col
            .as_any()
            .downcast_ref::<LargeStringArray>()
            .map(|a| a.value(row)),
        _ => None,
    }
}

/// Widen any numeric or boolean column to `Float64`.
fn as_float64(
    col: &Arc<dyn Array>,
    column: &'static str,
    row: usize,
) -> Result<Float64Array, LoadError> {
    let data_type = col.data_type();
    if !(data_type.is_numeric() || *data_type == DataType::Boolean) {
        return Err(DataFormatError::Malformed {
            row,
            reason: format!("column '{column}' has non-numeric type {data_type}"),
        }
        .into());
    }
    let widened = cast(col, &DataType::Float64)?;
    widened
        .as_any()
        .downcast_ref::<Float64Array>()
        .cloned()
        .ok_or_else(|| {
            DataFormatError::Malformed {
                row,
                reason: format!("column '{column}' could not be read as Float64"),
            }
            .into()
        })
}

fn float_at(col: &Float64Array, row: usize) -> Option<f64> {
    if col.is_null(row) {
        None
    } else {
        Some(col.value(row))
    }
}
