//! Model display names.
//!
//! Full-size pickups are stocked in many body configurations, so for a
//! fixed set of "split" models the dealer groups and filters by model
//! number as well as model name. This module maps a row's
//! `(model, model_number)` pair to the name shown in dropdowns and group
//! headers, and parses that name back into the pair it came from.
//!
//! Body-style text is not unique across models: a Silverado 1500 and a
//! Sierra 1500 crew cab on the 157" wheelbase read identically but carry
//! different codes (`CK10743` vs `TK10743`). Reverse lookups are therefore
//! always scoped to the code table of the model named in the prefix.

use serde::Serialize;

use crate::types::InventoryRow;

/// Models whose inventory is split into sub-groups by model number.
pub const SPLIT_MODELS: [&str; 6] = [
    "SILVERADO 1500",
    "SILVERADO 2500HD",
    "SILVERADO 3500HD",
    "SIERRA 1500",
    "SIERRA 2500HD",
    "SIERRA 3500HD",
];

/// A known factory model-number code and the body style it denotes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModelNumberEntry {
    pub model: &'static str,
    pub code: &'static str,
    pub body_style: &'static str,
}

const fn entry(
    model: &'static str,
    code: &'static str,
    body_style: &'static str,
) -> ModelNumberEntry {
    ModelNumberEntry {
        model,
        code,
        body_style,
    }
}

/// Factory model-number codes per split model.
///
/// Within one model every body style is distinct, which is what makes
/// `parse_display_name` an exact inverse of `display_name`.
pub static MODEL_NUMBER_TABLE: &[ModelNumberEntry] = &[
    entry("SILVERADO 1500", "CC10543", "2WD CREW CAB 147\" WB"),
    entry("SILVERADO 1500", "CC10743", "2WD CREW CAB 157\" WB"),
    entry("SILVERADO 1500", "CC10753", "2WD DOUBLE CAB 147\" WB"),
    entry("SILVERADO 1500", "CC10703", "2WD REG CAB 140\" WB"),
    entry("SILVERADO 1500", "CK10543", "4WD CREW CAB 147\" WB"),
    entry("SILVERADO 1500", "CK10743", "4WD CREW CAB 157\" WB"),
    entry("SILVERADO 1500", "CK10753", "4WD DOUBLE CAB 147\" WB"),
    entry("SILVERADO 1500", "CK10703", "4WD REG CAB 140\" WB"),
    entry("SILVERADO 2500HD", "CC20743", "2WD CREW CAB 159\" WB"),
    entry("SILVERADO 2500HD", "CK20743", "4WD CREW CAB 159\" WB"),
    entry("SILVERADO 2500HD", "CK20753", "4WD DOUBLE CAB 162\" WB"),
    entry("SILVERADO 2500HD", "CK20903", "4WD REG CAB 142\" WB"),
    entry("SILVERADO 3500HD", "CK30743", "4WD CREW CAB 159\" WB"),
    entry("SILVERADO 3500HD", "CK30943", "4WD CREW CAB 172\" WB"),
    entry("SILVERADO 3500HD", "CK30903", "4WD REG CAB 142\" WB"),
    entry("SIERRA 1500", "TC10543", "2WD CREW CAB 147\" WB"),
    entry("SIERRA 1500", "TC10743", "2WD CREW CAB 157\" WB"),
    entry("SIERRA 1500", "TK10543", "4WD CREW CAB 147\" WB"),
    entry("SIERRA 1500", "TK10743", "4WD CREW CAB 157\" WB"),
    entry("SIERRA 1500", "TK10753", "4WD DOUBLE CAB 147\" WB"),
    entry("SIERRA 1500", "TK10703", "4WD REG CAB 140\" WB"),
    entry("SIERRA 2500HD", "TK20743", "4WD CREW CAB 159\" WB"),
    entry("SIERRA 2500HD", "TK20753", "4WD DOUBLE CAB 162\" WB"),
    entry("SIERRA 2500HD", "TK20903", "4WD REG CAB 142\" WB"),
    entry("SIERRA 3500HD", "TK30743", "4WD CREW CAB 159\" WB"),
    entry("SIERRA 3500HD", "TK30943", "4WD CREW CAB 172\" WB"),
];

/// A display name parsed back into the row fields it selects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParsedModel {
    pub model: String,
    /// `None` means "match on model name alone".
    pub model_number: Option<String>,
}

pub fn is_split_model(model: &str) -> bool {
    SPLIT_MODELS.contains(&model)
}

/// Body-style phrase for a model-number code, or the code itself when the
/// code is not in the table.
pub fn model_number_display(model_number: &str) -> &str {
    MODEL_NUMBER_TABLE
        .iter()
        .find(|e| e.code == model_number)
        .map(|e| e.body_style)
        .unwrap_or(model_number)
}

/// Name shown for a `(model, model_number)` pair.
pub fn display_name(model: &str, model_number: &str) -> String {
    if !is_split_model(model) || model_number.is_empty() {
        return model.to_string();
    }
    format!("{} {}", model, model_number_display(model_number))
}

/// Display name for a row.
pub fn row_display_name(row: &InventoryRow) -> String {
    display_name(&row.model, &row.model_number)
}

/// Recover the `(model, model_number)` pair a display name was built from.
///
/// Text after a split-model prefix that matches none of that model's body
/// styles is taken to be a raw code, so hand-written filters such as
/// `SILVERADO 1500 CK99999` still select rows.
pub fn parse_display_name(name: &str) -> ParsedModel {
    for model in SPLIT_MODELS {
        let Some(rest) = name
            .strip_prefix(model)
            .and_then(|rest| rest.strip_prefix(' '))
        else {
            continue;
        };
        let model_number = MODEL_NUMBER_TABLE
            .iter()
            .find(|e| e.model == model && e.body_style == rest)
            .map(|e| e.code.to_string())
            .unwrap_or_else(|| rest.to_string());
        return ParsedModel {
            model: model.to_string(),
            model_number: Some(model_number),
        };
    }

    ParsedModel {
        model: name.to_string(),
        model_number: None,
    }
}

/// Whether a row is selected by a model dropdown entry.
pub fn row_matches_model_filter(row: &InventoryRow, filter: &str) -> bool {
    let parsed = parse_display_name(filter);
    if row.model != parsed.model {
        return false;
    }
    match parsed.model_number {
        Some(code) => row.model_number == code,
        None => true,
    }
}
