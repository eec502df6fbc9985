//! Column-name normalization.

use std::sync::LazyLock;

use regex::Regex;

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9a-zA-Z\s_]").expect("static regex"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("static regex"));

/// Normalize a single column name.
///
/// Steps, in order:
///
/// 1. trim leading/trailing whitespace
/// 2. lowercase
/// 3. remove characters other than ASCII alphanumerics, whitespace and `_`
/// 4. replace each whitespace run with a single `_`
///
/// Punctuation is removed after trimming, so a name such as `"Price ($)"` keeps the space that
/// preceded the punctuation and becomes `price_`.
///
/// ```rust
/// use daily_sales_etl::extract::normalize_column_name;
///
/// assert_eq!(normalize_column_name(" Transaction ID! "), "transaction_id");
/// ```
pub fn normalize_column_name(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let stripped = DISALLOWED.replace_all(&lowered, "");
    WHITESPACE.replace_all(&stripped, "_").into_owned()
}

/// Normalize every name in `names`, preserving order.
pub fn normalize_column_names<'a, I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    names.into_iter().map(normalize_column_name).collect()
}

#[cfg(test)]
mod tests {
    use super::{normalize_column_name, normalize_column_names};

    #[test]
    fn strips_punctuation_case_and_padding() {
        assert_eq!(normalize_column_name(" Transaction ID! "), "transaction_id");
        assert_eq!(normalize_column_name("Product-ID"), "productid");
        assert_eq!(normalize_column_name("QUANTITY"), "quantity");
        assert_eq!(normalize_column_name("transaction   date"), "transaction_date");
    }

    #[test]
    fn keeps_underscores_and_digits() {
        assert_eq!(normalize_column_name("total_revenue_2024"), "total_revenue_2024");
    }

    #[test]
    fn punctuation_removed_after_trim_leaves_trailing_underscore() {
        assert_eq!(normalize_column_name("Price ($)"), "price_");
    }

    #[test]
    fn tabs_and_newlines_collapse_to_one_underscore() {
        assert_eq!(normalize_column_name("unit\t \nprice"), "unit_price");
    }

    #[test]
    fn normalization_is_idempotent() {
        let raw = [
            " Transaction ID! ",
            "Product ID",
            "Quantity",
            "Price ($)",
            "Transaction   Date",
            "weird__name",
        ];
        let once = normalize_column_names(raw);
        let twice = normalize_column_names(once.iter().map(String::as_str));
        assert_eq!(once, twice);
    }
}
