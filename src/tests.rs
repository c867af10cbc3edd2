#[cfg(test)]
mod tests {
    use crate::{extract, normalize, ProductPage};
    use serde_json::json;

    const PRODUCT_URL: &str = "https://alkoteka.com/product/konyak-5-zvezd/";

    const PRODUCT_PAGE: &str = r#"
        <html><body>
            <nav class="breadcrumb">
                <a href="/">Главная</a>
                <a href="/catalog/konyak/">Коньяк</a>
            </nav>
            <div data-product-id="777">
                <h1 class="product-title">Коньяк Пять Звёздочек</h1>
                <span data-volume="0.5 л"></span>
                <span class="brand-name">Пять Звёздочек</span>
                <span class="product-tag">Хит</span>
                <span class="product-tag">Хит</span>
                <span class="product-tag">Акция</span>
                <div class="price-current">1 500 ₽</div>
                <div class="price-old">2 000 ₽</div>
                <button class="buy-btn">В корзину</button>
                <p>Осталось 3 шт</p>
                <span class="rating-value">4.8</span>
                <span class="review-count">12 отзывов</span>
                <div class="product-description">Мягкий вкус,
                    долгое послевкусие</div>
                <div class="product-image-main"><img src="/i/main.jpg"></div>
                <div class="product-gallery">
                    <img src="/i/2.jpg">
                    <img src="/i/1.jpg">
                    <img src="/i/2.jpg">
                </div>
                <select class="volume-selector">
                    <option>0.5 л</option>
                    <option>0.7 л</option>
                </select>
                <table class="characteristics">
                    <tr><td>Объем</td><td>0.5 л</td></tr>
                    <tr><td>Крепость</td><td>40%</td></tr>
                    <tr><td>Страна</td><td>Россия</td></tr>
                    <tr><td>Выдержка</td><td>5 лет</td></tr>
                </table>
            </div>
        </body></html>
    "#;

    #[test]
    fn extract_then_normalize_end_to_end() {
        let page = ProductPage::parse(PRODUCT_PAGE, PRODUCT_URL).unwrap();
        assert!(page.has_product_markup());

        let record = normalize(extract(&page)).unwrap();

        assert_eq!(record.product_id, "777");
        assert_eq!(record.name, "Коньяк Пять Звёздочек 0.5 л");
        assert_eq!(record.product_url, PRODUCT_URL);
        assert!(record.scraped_at > 0);
        assert_eq!(record.category.as_deref(), Some("Коньяк"));
        assert_eq!(record.brand.as_deref(), Some("Пять Звёздочек"));

        assert_eq!(record.price, Some(1500.0));
        assert_eq!(record.original_price, Some(2000.0));
        assert_eq!(record.discount_percentage, Some(25));
        assert_eq!(record.currency, "RUB");
        let price_data = record.price_data.as_ref().unwrap();
        assert_eq!(price_data.sale_tag.as_deref(), Some("Скидка 25%"));

        assert!(record.in_stock);
        assert_eq!(record.stock_quantity, 3);
        assert_eq!(
            record.stock_data.as_ref().unwrap().status.as_deref(),
            Some("unknown"),
            "no explicit status markup, so the default fills in"
        );

        assert_eq!(record.rating, Some(4.8));
        assert_eq!(record.review_count, 12);

        assert_eq!(record.marketing_tags, vec!["Акция", "Хит"]);
        assert_eq!(
            record.image_urls,
            vec![
                "https://alkoteka.com/i/1.jpg".to_string(),
                "https://alkoteka.com/i/2.jpg".to_string(),
            ]
        );

        assert_eq!(record.volume.as_deref(), Some("0.5 л"));
        assert_eq!(record.alcohol_content, Some(40.0));
        assert_eq!(record.country.as_deref(), Some("Россия"));
        assert_eq!(record.attributes["Выдержка"], json!("5 лет"));
        assert_eq!(record.attributes["variants_count"], json!(2));

        assert_eq!(record.description.as_deref(), Some("Мягкий вкус, долгое послевкусие"));

        assert_eq!(record.region, "krasnodar");
        assert_eq!(record.source, "alkoteka.com");
        assert!(record.is_valid);
    }

    #[test]
    fn non_product_page_is_rejected_by_the_pipeline() {
        let page = ProductPage::parse(
            "<html><body><p>Страница не найдена</p></body></html>",
            "https://alkoteka.com/product/gone/",
        )
        .unwrap();
        assert!(!page.has_product_markup());

        let rejected = normalize(extract(&page)).unwrap_err();
        assert_eq!(rejected.missing, vec!["name"]);
    }
}
