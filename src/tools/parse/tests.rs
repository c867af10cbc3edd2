#[cfg(test)]
mod tests {
    use crate::tools::parse::*;
    use serde_json::json;

    #[test]
    fn parse_price_handles_storefront_formats() {
        assert_eq!(parse_price("1 234,50 РУБ"), Some(1234.50));
        assert_eq!(parse_price("2500"), Some(2500.0));
        assert_eq!(parse_price("2 500 ₽"), Some(2500.0));
        assert_eq!(parse_price("1199.90"), Some(1199.90));
    }

    #[test]
    fn parse_price_rejects_garbage() {
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("цена по запросу"), None);
        // Two separators survive stripping and fail the parse.
        assert_eq!(parse_price("1.234,50"), None);
    }

    #[test]
    fn parse_price_roundtrips_its_own_output() {
        let first = parse_price("1 234,50 РУБ").unwrap();
        assert_eq!(parse_price(&format!("{first}")), Some(first));
    }

    #[test]
    fn extract_number_takes_first_digit_run() {
        assert_eq!(extract_number("Year 2020 Volume 750"), Some(2020));
        assert_eq!(extract_number("12 шт"), Some(12));
        assert_eq!(extract_number("нет данных"), None);
        assert_eq!(extract_number(""), None);
    }

    #[test]
    fn extract_float_takes_first_token() {
        assert_eq!(extract_float("40% vol"), Some(40.0));
        assert_eq!(extract_float("Крепость: 12.5%"), Some(12.5));
        assert_eq!(extract_float("4."), Some(4.0));
        assert_eq!(extract_float("abv"), None);
    }

    #[test]
    fn clean_title_collapses_whitespace() {
        assert_eq!(clean_title("  A \t B \n C  "), "A B C");
        assert_eq!(clean_title("single"), "single");
        assert_eq!(clean_title("   "), "");
    }

    #[test]
    fn normalize_bool_covers_all_shapes() {
        assert!(normalize_bool(&json!(true)));
        assert!(!normalize_bool(&json!(false)));
        assert!(normalize_bool(&json!(3)));
        assert!(!normalize_bool(&json!(0)));
        assert!(normalize_bool(&json!(" In Stock ")));
        assert!(normalize_bool(&json!("YES")));
        assert!(!normalize_bool(&json!("нет в наличии")));
        assert!(!normalize_bool(&json!(null)));
        assert!(!normalize_bool(&json!(["available"])));
    }

    #[test]
    fn discount_truncates_and_clamps() {
        assert_eq!(calculate_discount(1000.0, 750.0), Some(25));
        assert_eq!(calculate_discount(1000.0, 1000.0), Some(0));
        assert_eq!(calculate_discount(3.0, 2.0), Some(33));
        // Current above original clamps to zero rather than going negative.
        assert_eq!(calculate_discount(1000.0, 1500.0), Some(0));
    }

    #[test]
    fn discount_refuses_empty_operands() {
        assert_eq!(calculate_discount(0.0, 750.0), None);
        assert_eq!(calculate_discount(-10.0, 5.0), None);
        assert_eq!(calculate_discount(1000.0, 0.0), None);
    }
}
