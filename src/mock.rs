//! Fixed catalogue served when the marketplace rejects our credentials and
//! tolerant auth is enabled.

use crate::models::Product;

fn product(title: String, price: f64, id: u32, category: &str, condition: &str, seller: &str) -> Product {
    Product {
        title,
        price,
        link: format!("https://example.com/product/{}", id),
        category_id: category.to_string(),
        condition: condition.to_string(),
        seller_id: seller.to_string(),
    }
}

/// Three deterministic products picked by keyword (case-insensitive).
pub fn mock_products(query: &str) -> Vec<Product> {
    let lower = query.to_lowercase();

    if lower.contains("smartphone") || lower.contains("celular") {
        vec![
            product("[MOCK] Smartphone XYZ Pro Max".into(), 1299.99, 123, "MLB1055", "new", "456"),
            product("[MOCK] Smartphone ABC Plus".into(), 899.99, 124, "MLB1055", "used", "789"),
            product("[MOCK] Smartphone DEF Ultra".into(), 1499.99, 125, "MLB1055", "new", "101"),
        ]
    } else if lower.contains("laptop") || lower.contains("notebook") {
        vec![
            product("[MOCK] Laptop ThinkPower X1".into(), 3499.99, 323, "MLB1648", "new", "222"),
            product("[MOCK] Notebook UltraSlim S7".into(), 2799.99, 324, "MLB1648", "new", "333"),
            product("[MOCK] Laptop GamerPro RTX".into(), 5999.99, 325, "MLB1648", "new", "444"),
        ]
    } else {
        vec![
            product(format!("[MOCK] Product related to \"{}\"", query), 499.99, 991, "MLB1234", "new", "555"),
            product(format!("[MOCK] Another item matching \"{}\"", query), 299.99, 992, "MLB1234", "used", "666"),
            product(format!("[MOCK] Best selling \"{}\" product", query), 799.99, 993, "MLB1234", "new", "777"),
        ]
    }
}
