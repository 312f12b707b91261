//! Factory body description formatting.
//!
//! Turns free-text body strings from the export ("4WD Crew Cab 157\" w/3SB",
//! "RWD 2500 135\"", "2dr Stingray Cpe w/") into short upper-case labels.
//! The label is descriptive only; filtering uses model numbers.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Trailing package marker: `w/3SB`, `w/1WT`, or a bare `w/`.
static PACKAGE_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s*w/\S*\s*$").expect("valid regex"));
/// Trailing commercial cab-to-axle marker: `, 60" CA`.
static CAB_TO_AXLE_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i),\s*\d+"?\s*CA\s*$"#).expect("valid regex"));
static TRAILING_QUOTES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"["\s]+$"#).expect("valid regex"));

static TRUCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\b(4WD|2WD|AWD|RWD|FWD)\s+(Crew Cab|Double Cab|Reg Cab|Regular Cab)\s+(\d{2,3})"?"#)
        .expect("valid regex")
});
static VAN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)^(?:(4WD|2WD|AWD|RWD|FWD)\s+)?(?:(Van)\s+)?(?:(\d{4})\s+)?(\d{2,3})"?$"#)
        .expect("valid regex")
});

/// The recognised shapes of a cleaned body description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BodyShape {
    /// Pickup: drive type, cab style and wheelbase are all present.
    Truck {
        drive: String,
        cab: String,
        wheelbase: String,
    },
    /// Cargo/passenger van or cutaway: only the wheelbase is required.
    Van {
        drive: Option<String>,
        van: bool,
        payload_class: Option<String>,
        wheelbase: String,
    },
    /// Anything else (coupes, sedans, SUVs), shown as cleaned text.
    Other(String),
}

impl BodyShape {
    /// Classify an already-cleaned body description.
    pub fn classify(cleaned: &str) -> Self {
        if let Some(caps) = TRUCK_RE.captures(cleaned) {
            let cab = caps[2].to_uppercase();
            let cab = if cab == "REGULAR CAB" {
                "REG CAB".to_string()
            } else {
                cab
            };
            return BodyShape::Truck {
                drive: caps[1].to_uppercase(),
                cab,
                wheelbase: caps[3].to_string(),
            };
        }

        if let Some(caps) = VAN_RE.captures(cleaned) {
            return BodyShape::Van {
                drive: caps.get(1).map(|m| m.as_str().to_uppercase()),
                van: caps.get(2).is_some(),
                payload_class: caps.get(3).map(|m| m.as_str().to_string()),
                wheelbase: caps[4].to_string(),
            };
        }

        BodyShape::Other(cleaned.to_uppercase())
    }
}

impl fmt::Display for BodyShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyShape::Truck {
                drive,
                cab,
                wheelbase,
            } => write!(f, "{} {} {}\" WB", drive, cab, wheelbase),
            BodyShape::Van {
                drive,
                van,
                payload_class,
                wheelbase,
            } => {
                let mut tokens: Vec<&str> = Vec::new();
                if let Some(drive) = drive {
                    tokens.push(drive);
                }
                if *van {
                    tokens.push("VAN");
                }
                if let Some(class) = payload_class {
                    tokens.push(class);
                }
                tokens.push(wheelbase);
                write!(f, "{}\" WB", tokens.join(" "))
            }
            BodyShape::Other(text) => write!(f, "{}", text),
        }
    }
}

/// Strip package, cab-to-axle and stray quote suffixes.
///
/// The two markers may appear in either order, so both are stripped
/// repeatedly until neither matches.
pub fn clean_body_description(body: &str) -> String {
    let mut text = body.trim().to_string();
    loop {
        let without_ca = CAB_TO_AXLE_SUFFIX_RE.replace(&text, "");
        let without_package = PACKAGE_SUFFIX_RE.replace(&without_ca, "").into_owned();
        if without_package == text {
            break;
        }
        text = without_package;
    }
    TRAILING_QUOTES_RE.replace(&text, "").trim().to_string()
}

/// Short canonical label for a body description. Blank input yields "".
pub fn format_body_description(body: Option<&str>) -> String {
    let cleaned = match body {
        Some(text) => clean_body_description(text),
        None => return String::new(),
    };
    if cleaned.is_empty() {
        return String::new();
    }
    BodyShape::classify(&cleaned).to_string()
}
