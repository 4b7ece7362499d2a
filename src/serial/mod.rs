pub mod range;
pub mod sort;

pub use range::{expand_search_expression, parse_search_expression, SearchToken, SerialRange};
pub use sort::{compare_serials, locale_compare, sort_by_serial, sorted_by_serial, SerialKey};
