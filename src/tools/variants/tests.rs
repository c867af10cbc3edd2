#[cfg(test)]
mod tests {
    use crate::page::ProductPage;
    use crate::tools::variants::{detect_variants, is_plausible_variant};

    fn page(html: &str) -> ProductPage {
        ProductPage::parse(html, "https://alkoteka.com/product/whisky-15y/").unwrap()
    }

    #[test]
    fn plausible_variants_pass() {
        assert!(is_plausible_variant("500ml"));
        assert!(is_plausible_variant("0.7 л"));
        assert!(is_plausible_variant("Красное"));
    }

    #[test]
    fn implausible_variants_fail() {
        assert!(!is_plausible_variant(""));
        assert!(!is_plausible_variant("   "));
        assert!(!is_plausible_variant("XL"));
        assert!(!is_plausible_variant(" xs "));
        assert!(!is_plausible_variant("Size XL"));
        assert!(!is_plausible_variant("xl size"));
        assert!(!is_plausible_variant("Размер 42"));
        assert!(!is_plausible_variant("Cotton shirt"));
        assert!(!is_plausible_variant("select"));
        assert!(!is_plausible_variant("Выбрать"));
        assert!(!is_plausible_variant(&"ж".repeat(101)));
    }

    #[test]
    fn counts_volume_options_dedup_case_insensitive() {
        let html = r#"
            <select class="volume-selector">
                <option>Выбрать</option>
                <option>0.5 Л</option>
                <option>0.5 л</option>
                <option>0.7 л</option>
            </select>
        "#;
        assert_eq!(detect_variants(&page(html)), 2);
    }

    #[test]
    fn buttons_and_options_combine() {
        let html = r#"
            <select class="volume-selector">
                <option>0.5 л</option>
            </select>
            <a class="volume-btn">0.7 л</a>
            <a class="volume-btn">1 л</a>
        "#;
        assert_eq!(detect_variants(&page(html)), 3);
    }

    #[test]
    fn clothing_sizes_are_filtered_out() {
        let html = r#"
            <select class="volume-selector">
                <option>S</option>
                <option>M</option>
                <option>XL</option>
                <option>0.7 л</option>
            </select>
        "#;
        assert_eq!(detect_variants(&page(html)), 1);
    }

    #[test]
    fn color_options_need_a_color_context() {
        // No color in URL and no "цвет" in the labels: options do not count.
        let html = r#"
            <select class="color-selector">
                <option>Vanilla</option>
                <option>Caramel</option>
            </select>
        "#;
        assert_eq!(detect_variants(&page(html)), 0);

        let html = r#"
            <select class="color-selector">
                <option>Цвет: янтарный</option>
                <option>Цвет: золотой</option>
            </select>
        "#;
        assert_eq!(detect_variants(&page(html)), 2);
    }

    #[test]
    fn data_color_attributes_count() {
        let html = r#"
            <div data-available-colors='["Янтарный", "Золотой", "XL"]'></div>
        "#;
        assert_eq!(detect_variants(&page(html)), 2);
    }

    #[test]
    fn embedded_json_supersedes_markup() {
        let html = r#"
            <select class="volume-selector">
                <option>0.5 л</option>
                <option>0.7 л</option>
            </select>
            <script type="application/json">
                {"variants": ["0.5 л", "0.7 л", "1 л", "1.5 л", "XL"]}
            </script>
        "#;
        // The JSON block is authoritative; its entries still get validated.
        assert_eq!(detect_variants(&page(html)), 4);
    }

    #[test]
    fn unparseable_variant_json_falls_back_to_markup() {
        let html = r#"
            <select class="volume-selector">
                <option>0.5 л</option>
            </select>
            <script type="application/json">{variants: broken</script>
        "#;
        assert_eq!(detect_variants(&page(html)), 1);
    }

    #[test]
    fn options_list_in_json_counts_too() {
        let html = r#"
            <div data-variants='{"options": ["0.5 л", "0.7 л"]}'></div>
        "#;
        assert_eq!(detect_variants(&page(html)), 2);
    }
}
