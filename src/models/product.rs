use serde::{Deserialize, Serialize};

/// Number of upstream results kept per search.
pub const MAX_RESULTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub title: String,
    pub price: f64,
    pub link: String,
    pub category_id: String,
    pub condition: String,
    pub seller_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub results: Vec<Product>,
    pub query: String,
    pub count: usize,
}

impl SearchResult {
    pub fn new(query: impl Into<String>, results: Vec<Product>) -> Self {
        Self {
            count: results.len(),
            query: query.into(),
            results,
        }
    }
}

// ==================== UPSTREAM PAYLOAD ====================
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamSearchResponse {
    #[serde(default)]
    pub results: Vec<UpstreamProduct>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamProduct {
    /// Marketplace item id; not part of the reshaped `Product`.
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub price: f64,
    pub permalink: String,
    pub category_id: String,
    pub condition: String,
    pub seller: UpstreamSeller,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamSeller {
    pub id: u64,
}

impl From<UpstreamProduct> for Product {
    fn from(item: UpstreamProduct) -> Self {
        Self {
            title: item.title,
            price: item.price,
            link: item.permalink,
            category_id: item.category_id,
            condition: item.condition,
            seller_id: item.seller.id.to_string(),
        }
    }
}

impl UpstreamSearchResponse {
    /// First [`MAX_RESULTS`] items in upstream order, reshaped.
    pub fn into_products(self) -> Vec<Product> {
        self.results
            .into_iter()
            .take(MAX_RESULTS)
            .map(Product::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn upstream_item_maps_to_product() {
        let payload = json!({
            "results": [{
                "id": "MLB123",
                "title": "Bicicleta Elétrica 750W",
                "price": 5999.9,
                "permalink": "https://produto.mercadolivre.com.br/MLB-123",
                "category_id": "MLB1292",
                "condition": "new",
                "seller": { "id": 98765, "nickname": "LOJA" },
                "thumbnail": "ignored"
            }]
        });
        let response: UpstreamSearchResponse = serde_json::from_value(payload).unwrap();
        let products = response.into_products();

        assert_eq!(
            products,
            vec![Product {
                title: "Bicicleta Elétrica 750W".to_string(),
                price: 5999.9,
                link: "https://produto.mercadolivre.com.br/MLB-123".to_string(),
                category_id: "MLB1292".to_string(),
                condition: "new".to_string(),
                seller_id: "98765".to_string(),
            }]
        );
    }

    #[test]
    fn missing_results_array_is_empty() {
        let response: UpstreamSearchResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.into_products().is_empty());
    }

    #[test]
    fn product_serializes_with_camel_case_keys() {
        let result = SearchResult::new(
            "tv",
            vec![Product {
                title: "TV".into(),
                price: 1.5,
                link: "https://example.com".into(),
                category_id: "MLB1".into(),
                condition: "used".into(),
                seller_id: "7".into(),
            }],
        );
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["count"], 1);
        assert_eq!(value["query"], "tv");
        assert_eq!(value["results"][0]["categoryId"], "MLB1");
        assert_eq!(value["results"][0]["sellerId"], "7");
    }
}
