use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// Whether a unit is physically on the lot or still on its way.
///
/// Derived once at ingestion from the free-text status column so call
/// sites never re-scan the status string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LotStatus {
    OnLot,
    InTransit,
}

impl LotStatus {
    /// A status string flips the unit into transit iff it contains
    /// "TRANSIT" in any case.
    pub fn from_status_text(status: &str) -> Self {
        if status.to_uppercase().contains("TRANSIT") {
            LotStatus::InTransit
        } else {
            LotStatus::OnLot
        }
    }

    pub fn is_in_transit(self) -> bool {
        self == LotStatus::InTransit
    }
}

impl fmt::Display for LotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LotStatus::OnLot => write!(f, "On Lot"),
            LotStatus::InTransit => write!(f, "In Transit"),
        }
    }
}

/// One vehicle unit on the dealer's lot or in transit to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InventoryRow {
    /// Unique within one loaded snapshot.
    pub stock_number: String,
    pub year: i32,
    pub make: String,
    pub model: String,
    pub exterior_color: String,
    pub trim: String,
    /// Manufacturer body-style code, e.g. "CK10543".
    pub model_number: String,
    pub cylinders: u32,
    /// Days since the unit entered the tracked lot/transit state.
    pub age: u32,
    pub msrp: f64,
    /// Raw lot status text as exported.
    pub status: String,
    pub lot_status: LotStatus,
    pub vin: String,
    /// Free-text factory body/cab description.
    pub body: Option<String>,
}

impl InventoryRow {
    pub fn is_in_transit(&self) -> bool {
        self.lot_status.is_in_transit()
    }

    /// Last eight characters of the VIN, the form staff read off a windshield.
    pub fn short_vin(&self) -> &str {
        let len = self.vin.chars().count();
        if len <= 8 {
            return &self.vin;
        }
        let start = self
            .vin
            .char_indices()
            .nth(len - 8)
            .map(|(i, _)| i)
            .unwrap_or(0);
        &self.vin[start..]
    }
}

impl Default for InventoryRow {
    fn default() -> Self {
        Self {
            stock_number: String::new(),
            year: 0,
            make: String::new(),
            model: String::new(),
            exterior_color: String::new(),
            trim: String::new(),
            model_number: String::new(),
            cylinders: 0,
            age: 0,
            msrp: 0.0,
            status: String::new(),
            lot_status: LotStatus::OnLot,
            vin: String::new(),
            body: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Filter types
// ---------------------------------------------------------------------------

/// Year filter value meaning "any year".
pub const ALL_YEARS: &str = "ALL";

/// Current filter selections. Empty strings mean "no constraint".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// A model dropdown entry, i.e. a normalizer display name.
    pub model: String,
    /// "ALL" or a four-digit year.
    pub year: String,
    pub price_min: String,
    pub price_max: String,
    pub stock_number: String,
    pub search_term: String,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            model: String::new(),
            year: ALL_YEARS.to_string(),
            price_min: String::new(),
            price_max: String::new(),
            stock_number: String::new(),
            search_term: String::new(),
        }
    }
}

impl FilterSpec {
    /// True when no field narrows the row set.
    pub fn is_unconstrained(&self) -> bool {
        self.model.trim().is_empty()
            && self.year_constraint().is_none()
            && self.price_min.trim().is_empty()
            && self.price_max.trim().is_empty()
            && self.stock_number.trim().is_empty()
            && self.search_term.trim().is_empty()
    }

    /// The year to match, or `None` for "ALL" and empty input.
    pub fn year_constraint(&self) -> Option<&str> {
        let year = self.year.trim();
        if year.is_empty() || year.eq_ignore_ascii_case(ALL_YEARS) {
            None
        } else {
            Some(year)
        }
    }
}

// ---------------------------------------------------------------------------
// Derived view types
// ---------------------------------------------------------------------------

/// Fixed age cohorts for on-lot units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgingBucket {
    Days0To30,
    Days31To60,
    Days61To90,
    Over90,
}

impl AgingBucket {
    pub const ALL: [AgingBucket; 4] = [
        AgingBucket::Days0To30,
        AgingBucket::Days31To60,
        AgingBucket::Days61To90,
        AgingBucket::Over90,
    ];

    pub fn for_age(age: u32) -> Self {
        match age {
            0..=30 => AgingBucket::Days0To30,
            31..=60 => AgingBucket::Days31To60,
            61..=90 => AgingBucket::Days61To90,
            _ => AgingBucket::Over90,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AgingBucket::Days0To30 => "0-30",
            AgingBucket::Days31To60 => "31-60",
            AgingBucket::Days61To90 => "61-90",
            AgingBucket::Over90 => "90+",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        AgingBucket::ALL
            .into_iter()
            .find(|bucket| bucket.label() == label.trim())
    }
}

impl fmt::Display for AgingBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} days", self.label())
    }
}

/// Coarse selector for the drill-down table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrillSelector {
    Total,
    New,
    Aging(AgingBucket),
    InTransit,
}

impl DrillSelector {
    /// Parses the selector keys used by KPI cards: `total`, `new`,
    /// `in_transit`, or an aging bucket label such as `31-60`.
    pub fn parse(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "total" => Some(DrillSelector::Total),
            "new" => Some(DrillSelector::New),
            "in_transit" | "transit" => Some(DrillSelector::InTransit),
            other => AgingBucket::from_label(other).map(DrillSelector::Aging),
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            DrillSelector::Total => "total",
            DrillSelector::New => "new",
            DrillSelector::Aging(bucket) => bucket.label(),
            DrillSelector::InTransit => "in_transit",
        }
    }
}

impl fmt::Display for DrillSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrillSelector::Total => write!(f, "All Vehicles"),
            DrillSelector::New => write!(f, "New Arrivals"),
            DrillSelector::Aging(bucket) => write!(f, "Aged {}", bucket),
            DrillSelector::InTransit => write!(f, "In Transit"),
        }
    }
}

/// Rows sharing (year, model) and, for split models, the model number.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ModelGroup {
    pub year: i32,
    pub model: String,
    /// Present only for split models.
    pub model_number: Option<String>,
    pub display_name: String,
    /// Formatted body text of the group's first row. Cosmetic only.
    pub body_label: Option<String>,
    /// Ordered transit-last, age descending.
    pub rows: Vec<InventoryRow>,
}

impl ModelGroup {
    /// Heading shown above the group in tables, e.g.
    /// `2024 SILVERADO 1500 4WD CREW CAB 147" WB`.
    pub fn heading(&self) -> String {
        match &self.body_label {
            Some(label) if !self.display_name.ends_with(label.as_str()) => {
                format!("{} {} ({})", self.year, self.display_name, label)
            }
            _ => format!("{} {}", self.year, self.display_name),
        }
    }
}

/// Headline counts for the KPI cards.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct InventoryKpis {
    pub total_vehicles: usize,
    pub in_stock: usize,
    pub in_transit: usize,
    pub new_arrivals: usize,
    /// Mean age over on-lot units; 0 when there are none.
    pub average_age: f64,
    pub total_msrp: f64,
}
