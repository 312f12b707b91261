//! CSV export of the rows currently on screen.

use crate::error::DashboardResult;
use crate::types::InventoryRow;

pub const EXPORT_HEADER: [&str; 12] = [
    "Stock Number",
    "Year",
    "Make",
    "Model",
    "Model Number",
    "Exterior Color",
    "Trim",
    "Cylinders",
    "Age",
    "MSRP",
    "Status",
    "VIN",
];

/// Render rows as CSV with every field double-quoted. MSRP is written in
/// whole currency units.
pub fn export_csv(rows: &[InventoryRow]) -> DashboardResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(EXPORT_HEADER)?;
    for row in rows {
        writer.write_record([
            row.stock_number.clone(),
            row.year.to_string(),
            row.make.clone(),
            row.model.clone(),
            row.model_number.clone(),
            row.exterior_color.clone(),
            row.trim.clone(),
            row.cylinders.to_string(),
            row.age.to_string(),
            format!("{:.0}", row.msrp.round()),
            row.status.clone(),
            row.vin.clone(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LotStatus;

    #[test]
    fn every_field_is_quoted() {
        let rows = vec![InventoryRow {
            stock_number: "T24101".into(),
            year: 2024,
            make: "Chevrolet".into(),
            model: "SILVERADO 1500".into(),
            model_number: "CK10543".into(),
            exterior_color: "Summit \"Pearl\" White".into(),
            trim: "LT".into(),
            cylinders: 8,
            age: 45,
            msrp: 58240.6,
            status: "ON DEALER LOT".into(),
            lot_status: LotStatus::OnLot,
            vin: "1GCUDDED5RZ100001".into(),
            body: None,
        }];
        let csv = export_csv(&rows).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "\"Stock Number\",\"Year\",\"Make\",\"Model\",\"Model Number\",\"Exterior Color\",\"Trim\",\"Cylinders\",\"Age\",\"MSRP\",\"Status\",\"VIN\""
        );
        assert_eq!(
            lines.next().unwrap(),
            "\"T24101\",\"2024\",\"Chevrolet\",\"SILVERADO 1500\",\"CK10543\",\"Summit \"\"Pearl\"\" White\",\"LT\",\"8\",\"45\",\"58241\",\"ON DEALER LOT\",\"1GCUDDED5RZ100001\""
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn empty_rows_still_have_header() {
        let csv = export_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
