/// Extract a short type name from the full module path.
///
/// Given `"my_crate::some_module::MyType"`, returns `"MyType"`.
pub fn short_type_name(full: &str) -> &str {
    full.rsplit("::").next().unwrap_or(full)
}

/// Parse user- or spreadsheet-entered numeric text.
///
/// Currency symbols, thousands separators and surrounding whitespace are
/// ignored. Returns `None` for anything that is not a finite number.
pub fn parse_lenient_number(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_type_name_strips_module_path() {
        assert_eq!(short_type_name("lotview_pipeline::components::ModelFilter"), "ModelFilter");
        assert_eq!(short_type_name("Plain"), "Plain");
    }

    #[test]
    fn lenient_number_accepts_currency_text() {
        assert_eq!(parse_lenient_number("45"), Some(45.0));
        assert_eq!(parse_lenient_number(" $52,340.00 "), Some(52340.0));
        assert_eq!(parse_lenient_number("-3.5"), Some(-3.5));
    }

    #[test]
    fn lenient_number_rejects_garbage() {
        assert_eq!(parse_lenient_number(""), None);
        assert_eq!(parse_lenient_number("abc"), None);
        assert_eq!(parse_lenient_number("NaN"), None);
        assert_eq!(parse_lenient_number("inf"), None);
        assert_eq!(parse_lenient_number("$"), None);
    }
}
