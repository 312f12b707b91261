//! Grouping rows into table sections.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::body_description::format_body_description;
use crate::components::age_selector::AgeSelector;
use crate::model_normalizer::{display_name, is_split_model};
use crate::selector::{compare_model_names, Selector};
use crate::types::{InventoryRow, ModelGroup};

/// Grouping key: year and model, plus the model number for split models.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub year: i32,
    pub model: String,
    pub model_number: Option<String>,
}

impl GroupKey {
    pub fn for_row(row: &InventoryRow) -> Self {
        let model_number = if is_split_model(&row.model) {
            Some(row.model_number.clone())
        } else {
            None
        };
        Self {
            year: row.year,
            model: row.model.clone(),
            model_number,
        }
    }

    /// Year descending, then model ascending, then model number ascending.
    fn display_order(&self, other: &Self) -> Ordering {
        other
            .year
            .cmp(&self.year)
            .then_with(|| compare_model_names(&self.model, &other.model))
            .then_with(|| self.model_number.cmp(&other.model_number))
    }
}

/// Group rows for table rendering. Groups are rebuilt from scratch on
/// every call; rows inside each group are sorted transit-last, oldest first.
pub fn group_rows(rows: &[InventoryRow]) -> Vec<ModelGroup> {
    let mut groups: HashMap<GroupKey, Vec<InventoryRow>> = HashMap::new();
    for row in rows {
        groups
            .entry(GroupKey::for_row(row))
            .or_default()
            .push(row.clone());
    }

    let mut keyed: Vec<(GroupKey, Vec<InventoryRow>)> = groups.into_iter().collect();
    keyed.sort_by(|(a, _), (b, _)| a.display_order(b));

    keyed
        .into_iter()
        .map(|(key, rows)| {
            let rows = AgeSelector.sort(rows);
            let display_name = match &key.model_number {
                Some(code) => display_name(&key.model, code),
                None => key.model.clone(),
            };
            let body_label = rows
                .first()
                .map(|row| format_body_description(row.body.as_deref()))
                .filter(|label| !label.is_empty());
            ModelGroup {
                year: key.year,
                model: key.model,
                model_number: key.model_number,
                display_name,
                body_label,
                rows,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LotStatus;

    fn row(stock: &str, year: i32, model: &str, model_number: &str, age: u32) -> InventoryRow {
        InventoryRow {
            stock_number: stock.into(),
            year,
            model: model.into(),
            model_number: model_number.into(),
            age,
            ..InventoryRow::default()
        }
    }

    #[test]
    fn split_models_group_by_model_number() {
        let rows = vec![
            row("A", 2024, "SILVERADO 1500", "CK10543", 10),
            row("B", 2024, "SILVERADO 1500", "CK10743", 20),
            row("C", 2024, "SILVERADO 1500", "CK10543", 30),
        ];
        let groups = group_rows(&rows);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].model_number.as_deref(), Some("CK10543"));
        assert_eq!(groups[0].display_name, "SILVERADO 1500 4WD CREW CAB 147\" WB");
        let stocks: Vec<_> = groups[0].rows.iter().map(|r| r.stock_number.as_str()).collect();
        assert_eq!(stocks, vec!["C", "A"]);
        assert_eq!(groups[1].display_name, "SILVERADO 1500 4WD CREW CAB 157\" WB");
    }

    #[test]
    fn other_models_ignore_model_number() {
        let rows = vec![
            row("A", 2024, "TAHOE", "CK10706", 10),
            row("B", 2024, "TAHOE", "CK10906", 20),
        ];
        let groups = group_rows(&rows);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].model_number, None);
        assert_eq!(groups[0].display_name, "TAHOE");
        assert_eq!(groups[0].rows.len(), 2);
    }

    #[test]
    fn groups_sorted_year_desc_then_model() {
        let rows = vec![
            row("A", 2024, "TAHOE", "", 1),
            row("B", 2025, "TRAVERSE", "", 1),
            row("C", 2025, "EQUINOX", "", 1),
            row("D", 2024, "COLORADO", "", 1),
        ];
        let order: Vec<(i32, String)> = group_rows(&rows)
            .into_iter()
            .map(|g| (g.year, g.model))
            .collect();
        assert_eq!(
            order,
            vec![
                (2025, "EQUINOX".to_string()),
                (2025, "TRAVERSE".to_string()),
                (2024, "COLORADO".to_string()),
                (2024, "TAHOE".to_string()),
            ]
        );
    }

    #[test]
    fn transit_rows_sink_within_group() {
        let mut transit = row("T", 2024, "TAHOE", "", 200);
        transit.lot_status = LotStatus::InTransit;
        let rows = vec![transit, row("L", 2024, "TAHOE", "", 3)];
        let groups = group_rows(&rows);
        let stocks: Vec<_> = groups[0].rows.iter().map(|r| r.stock_number.as_str()).collect();
        assert_eq!(stocks, vec!["L", "T"]);
    }

    #[test]
    fn body_label_comes_from_first_row() {
        let mut old = row("OLD", 2024, "CORVETTE", "1YC07", 90);
        old.body = Some("2dr Stingray Cpe w/".into());
        let mut new = row("NEW", 2024, "CORVETTE", "1YC07", 2);
        new.body = Some("2dr Stingray Conv w/".into());
        let groups = group_rows(&[new, old]);
        assert_eq!(groups[0].body_label.as_deref(), Some("2DR STINGRAY CPE"));
        assert_eq!(groups[0].heading(), "2024 CORVETTE (2DR STINGRAY CPE)");
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(group_rows(&[]).is_empty());
    }
}
