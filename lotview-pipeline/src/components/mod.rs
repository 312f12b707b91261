pub mod age_selector;
pub mod file_source;
pub mod model_age_selector;
pub mod model_filter;
pub mod oldest_units_selector;
pub mod price_range_filter;
pub mod search_term_filter;
pub mod stock_number_filter;
pub mod url_query_side_effect;
pub mod year_filter;
