//! Spreadsheet inventory loader.
//!
//! Parses a dealer inventory export into loosely typed records, then
//! coerces each record into an `InventoryRow`. Expected columns (matched
//! case-insensitively, ignoring spaces, underscores and `#`):
//!   Stock Number, Year, Make, Model, Exterior Color, Trim, Model Number,
//!   Cylinders, Age, MSRP, Status, VIN, Body
//!
//! Coercion never fails: unparsable numbers become 0 and missing text
//! becomes the empty string. Only records without a stock number are
//! dropped.

use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{LoadError, LoadResult};
use crate::types::{InventoryRow, LotStatus};
use crate::util::parse_lenient_number;

/// One populated spreadsheet row, keyed by header text.
pub type RawRecord = Map<String, Value>;

const STOCK_NUMBER_KEYS: &[&str] = &["stocknumber", "stock", "stockno"];
const YEAR_KEYS: &[&str] = &["year"];
const MAKE_KEYS: &[&str] = &["make"];
const MODEL_KEYS: &[&str] = &["model"];
const EXTERIOR_COLOR_KEYS: &[&str] = &["exteriorcolor", "extcolor", "color"];
const TRIM_KEYS: &[&str] = &["trim"];
const MODEL_NUMBER_KEYS: &[&str] = &["modelnumber", "modelno", "modelcode"];
const CYLINDERS_KEYS: &[&str] = &["cylinders", "cyl"];
const AGE_KEYS: &[&str] = &["age", "daysinstock"];
const MSRP_KEYS: &[&str] = &["msrp"];
const STATUS_KEYS: &[&str] = &["status"];
const VIN_KEYS: &[&str] = &["vin"];
const BODY_KEYS: &[&str] = &["body", "bodydescription", "bodystyle"];

/// Parse the first sheet of a CSV export into raw records.
///
/// Rows whose every cell is blank are not records.
pub fn parse_spreadsheet<R: Read>(reader: R) -> LoadResult<Vec<RawRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader.headers()?.iter().map(String::from).collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::EmptySheet);
    }

    let mut records = Vec::new();
    for result in csv_reader.records() {
        let row = result?;
        if row.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        let record: RawRecord = headers
            .iter()
            .zip(row.iter())
            .filter(|(header, _)| !header.is_empty())
            .map(|(header, cell)| (header.clone(), Value::String(cell.to_string())))
            .collect();
        records.push(record);
    }

    Ok(records)
}

/// Coerce raw records into rows, skipping records without a stock number.
pub fn ingest_records(records: &[RawRecord]) -> Vec<InventoryRow> {
    let rows: Vec<InventoryRow> = records.iter().filter_map(coerce_record).collect();
    let skipped = records.len() - rows.len();
    if skipped > 0 {
        log::debug!("skipped {} records without a stock number", skipped);
    }
    let duplicates = duplicate_stock_numbers(&rows);
    if !duplicates.is_empty() {
        log::debug!(
            "kept {} duplicated stock numbers: {}",
            duplicates.len(),
            duplicates.join(", ")
        );
    }
    rows
}

/// Stock numbers that appear on more than one row, each listed once in
/// order of first repeat. Rows are kept as-is; selection by stock number
/// resolves to the first occurrence.
pub fn duplicate_stock_numbers(rows: &[InventoryRow]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();
    for row in rows {
        let stock = row.stock_number.as_str();
        if !seen.insert(stock) && reported.insert(stock) {
            duplicates.push(stock.to_string());
        }
    }
    duplicates
}

/// Coerce a single record. Returns `None` when the stock number is blank.
pub fn coerce_record(record: &RawRecord) -> Option<InventoryRow> {
    let fields: HashMap<String, &Value> = record
        .iter()
        .map(|(key, value)| (normalize_key(key), value))
        .collect();
    let lookup = |keys: &[&str]| keys.iter().find_map(|k| fields.get(*k).copied());

    let stock_number = text_field(lookup(STOCK_NUMBER_KEYS));
    if stock_number.is_empty() {
        return None;
    }

    let status = text_field(lookup(STATUS_KEYS));
    let body = text_field(lookup(BODY_KEYS));

    Some(InventoryRow {
        stock_number,
        year: number_field(lookup(YEAR_KEYS)).trunc() as i32,
        make: text_field(lookup(MAKE_KEYS)),
        model: text_field(lookup(MODEL_KEYS)),
        exterior_color: text_field(lookup(EXTERIOR_COLOR_KEYS)),
        trim: text_field(lookup(TRIM_KEYS)),
        model_number: text_field(lookup(MODEL_NUMBER_KEYS)),
        cylinders: number_field(lookup(CYLINDERS_KEYS)).max(0.0).trunc() as u32,
        age: number_field(lookup(AGE_KEYS)).max(0.0).trunc() as u32,
        msrp: number_field(lookup(MSRP_KEYS)).max(0.0),
        lot_status: LotStatus::from_status_text(&status),
        status,
        vin: text_field(lookup(VIN_KEYS)),
        body: if body.is_empty() { None } else { Some(body) },
    })
}

/// Load inventory rows from a CSV reader.
pub fn load_inventory<R: Read>(reader: R) -> LoadResult<Vec<InventoryRow>> {
    let records = parse_spreadsheet(reader)?;
    Ok(ingest_records(&records))
}

/// Load inventory rows from a CSV file path.
pub fn load_inventory_file(path: impl AsRef<Path>) -> LoadResult<Vec<InventoryRow>> {
    let file = std::fs::File::open(path)?;
    load_inventory(file)
}

fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '#' | '-' | '.'))
        .flat_map(char::to_lowercase)
        .collect()
}

fn text_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn number_field(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => parse_lenient_number(s),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}
