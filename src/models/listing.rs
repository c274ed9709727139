//! Full marketplace item model.
//!
//! `/buscar` only needs the handful of fields in [`super::product`], but
//! item detail payloads carry much more. [`to_simplified`] and
//! [`extract_product_attributes`] turn a [`ListingDetail`] into the shapes a
//! listing page or recommendation feed would show.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingDetail {
    pub id: String,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub currency_id: String,
    pub permalink: String,
    #[serde(default)]
    pub thumbnail: String,
    pub condition: String,
    #[serde(default)]
    pub available_quantity: u32,
    #[serde(default)]
    pub sold_quantity: u32,
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub seller: Option<ListingSeller>,
    #[serde(default)]
    pub seller_address: Option<SellerAddress>,
    #[serde(default)]
    pub shipping: Option<Shipping>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingSeller {
    pub id: u64,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub seller_reputation: Option<SellerReputation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SellerReputation {
    #[serde(default)]
    pub level_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SellerAddress {
    #[serde(default)]
    pub city: Option<NamedPlace>,
    #[serde(default)]
    pub state: Option<NamedPlace>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamedPlace {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Shipping {
    #[serde(default)]
    pub free_shipping: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Attribute {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value_name: Option<String>,
    #[serde(default)]
    pub value_struct: Option<ValueStruct>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ValueStruct {
    pub number: f64,
    pub unit: String,
}

// ==================== SIMPLIFIED VIEW ====================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimplifiedProduct {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub discount_percentage: Option<i64>,
    pub permalink: String,
    pub thumbnail: String,
    pub condition: String,
    pub free_shipping: bool,
    pub available_quantity: u32,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub color: Option<String>,
    pub seller: SimplifiedSeller,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimplifiedSeller {
    pub id: Option<u64>,
    pub nickname: String,
    pub reputation_level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub city: String,
    pub state: String,
}

/// `value_name` of the first attribute with the given id.
pub fn extract_attribute<'a>(detail: &'a ListingDetail, attribute_id: &str) -> Option<&'a str> {
    detail
        .attributes
        .iter()
        .find(|attr| attr.id == attribute_id)
        .and_then(|attr| attr.value_name.as_deref())
        .filter(|v| !v.is_empty())
}

fn discount_percentage(price: f64, original_price: Option<f64>) -> Option<i64> {
    match original_price {
        Some(original) if original > 0.0 && price != 0.0 => {
            Some((((original - price) / original) * 100.0).round() as i64)
        }
        _ => None,
    }
}

pub fn to_simplified(detail: &ListingDetail) -> SimplifiedProduct {
    let seller = detail.seller.as_ref();
    let address = detail.seller_address.as_ref();
    let place_name = |place: Option<&NamedPlace>| place.map(|p| p.name.clone()).unwrap_or_default();

    SimplifiedProduct {
        id: detail.id.clone(),
        title: detail.title.clone(),
        price: detail.price,
        original_price: detail.original_price,
        discount_percentage: discount_percentage(detail.price, detail.original_price),
        permalink: detail.permalink.clone(),
        thumbnail: detail.thumbnail.clone(),
        condition: detail.condition.clone(),
        free_shipping: detail.shipping.as_ref().is_some_and(|s| s.free_shipping),
        available_quantity: detail.available_quantity,
        brand: extract_attribute(detail, "BRAND").map(str::to_string),
        model: extract_attribute(detail, "MODEL").map(str::to_string),
        color: extract_attribute(detail, "COLOR").map(str::to_string),
        seller: SimplifiedSeller {
            id: seller.map(|s| s.id),
            nickname: seller.and_then(|s| s.nickname.clone()).unwrap_or_default(),
            reputation_level: seller
                .and_then(|s| s.seller_reputation.as_ref())
                .and_then(|r| r.level_id.clone())
                .unwrap_or_default(),
        },
        location: Location {
            city: place_name(address.and_then(|a| a.city.as_ref())),
            state: place_name(address.and_then(|a| a.state.as_ref())),
        },
    }
}

// ==================== STRUCTURED ATTRIBUTES ====================
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Measure {
    pub value: Option<f64>,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dimensions {
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductAttributes {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub material: Option<String>,
    pub weight: Measure,
    pub dimensions: Dimensions,
    pub voltage: Option<String>,
    pub warranty_time: Measure,
    pub gender: Option<String>,
    /// Attributes without a dedicated field, keyed by lowercase attribute id.
    pub extra: BTreeMap<String, String>,
}

fn leading_integer(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['-', '+']));
    let digits = trimmed[sign_len..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .count();
    if digits == 0 {
        return None;
    }
    trimmed[..sign_len + digits].parse::<i64>().ok().map(|n| n as f64)
}

pub fn extract_product_attributes(detail: &ListingDetail) -> ProductAttributes {
    let mut attrs = ProductAttributes::default();

    for attr in &detail.attributes {
        let name = attr.value_name.clone();
        let measure = attr.value_struct.as_ref();
        match attr.id.as_str() {
            "BRAND" => attrs.brand = name,
            "MODEL" => attrs.model = name,
            "COLOR" => attrs.color = name,
            "SIZE" => attrs.size = name,
            "MATERIAL" => attrs.material = name,
            "VOLTAGE" => attrs.voltage = name,
            "GENDER" => attrs.gender = name,
            "WEIGHT" => {
                if let Some(m) = measure {
                    attrs.weight = Measure {
                        value: Some(m.number),
                        unit: Some(m.unit.clone()),
                    };
                }
            }
            "LENGTH" | "WIDTH" | "HEIGHT" => {
                if let Some(m) = measure {
                    let slot = match attr.id.as_str() {
                        "LENGTH" => &mut attrs.dimensions.length,
                        "WIDTH" => &mut attrs.dimensions.width,
                        _ => &mut attrs.dimensions.height,
                    };
                    *slot = Some(m.number);
                    attrs.dimensions.unit = Some(m.unit.clone());
                }
            }
            "WARRANTY_TIME" => {
                if let Some(m) = measure {
                    attrs.warranty_time = Measure {
                        value: Some(m.number),
                        unit: Some(m.unit.clone()),
                    };
                } else if let Some(raw) = name.as_deref().filter(|v| !v.is_empty()) {
                    attrs.warranty_time = Measure {
                        value: leading_integer(raw),
                        unit: Some("days".to_string()),
                    };
                }
            }
            other => {
                if let Some(value) = name.filter(|v| !v.is_empty()) {
                    attrs.extra.insert(other.to_lowercase(), value);
                }
            }
        }
    }

    attrs
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_detail() -> ListingDetail {
        serde_json::from_value(json!({
            "id": "MLB3001",
            "title": "Notebook UltraSlim 14",
            "price": 2700.0,
            "original_price": 3000.0,
            "currency_id": "BRL",
            "permalink": "https://produto.mercadolivre.com.br/MLB-3001",
            "thumbnail": "http://http2.mlstatic.com/D_3001.jpg",
            "condition": "new",
            "available_quantity": 12,
            "sold_quantity": 40,
            "category_id": "MLB1652",
            "seller": {
                "id": 1234,
                "nickname": "TECHSTORE",
                "seller_reputation": { "level_id": "5_green" }
            },
            "seller_address": {
                "city": { "id": "C1", "name": "São Paulo" },
                "state": { "id": "BR-SP", "name": "São Paulo" }
            },
            "shipping": { "free_shipping": true },
            "attributes": [
                { "id": "BRAND", "name": "Marca", "value_name": "Acme" },
                { "id": "MODEL", "name": "Modelo", "value_name": "US14" },
                { "id": "WEIGHT", "name": "Peso", "value_name": "1.2 kg",
                  "value_struct": { "number": 1.2, "unit": "kg" } },
                { "id": "LENGTH", "value_struct": { "number": 32.0, "unit": "cm" } },
                { "id": "HEIGHT", "value_struct": { "number": 1.5, "unit": "mm" } },
                { "id": "WARRANTY_TIME", "value_name": "90 dias" },
                { "id": "PROCESSOR_BRAND", "value_name": "Intel" },
                { "id": "ITEM_CONDITION", "value_name": null }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn simplified_view_computes_discount_and_flattens_seller() {
        let simplified = to_simplified(&sample_detail());
        assert_eq!(simplified.discount_percentage, Some(10));
        assert!(simplified.free_shipping);
        assert_eq!(simplified.brand.as_deref(), Some("Acme"));
        assert_eq!(simplified.color, None);
        assert_eq!(simplified.seller.id, Some(1234));
        assert_eq!(simplified.seller.reputation_level, "5_green");
        assert_eq!(simplified.location.state, "São Paulo");
    }

    #[test]
    fn simplified_view_tolerates_sparse_items() {
        let detail = ListingDetail {
            id: "MLB1".into(),
            title: "Item".into(),
            price: 10.0,
            permalink: "https://example.com/1".into(),
            condition: "used".into(),
            ..Default::default()
        };
        let simplified = to_simplified(&detail);
        assert_eq!(simplified.discount_percentage, None);
        assert!(!simplified.free_shipping);
        assert_eq!(simplified.seller.id, None);
        assert_eq!(simplified.seller.nickname, "");
        assert_eq!(simplified.location.city, "");
    }

    #[test]
    fn attributes_are_structured_with_unknown_ids_kept_as_extra() {
        let attrs = extract_product_attributes(&sample_detail());
        assert_eq!(attrs.model.as_deref(), Some("US14"));
        assert_eq!(attrs.weight.value, Some(1.2));
        assert_eq!(attrs.dimensions.length, Some(32.0));
        assert_eq!(attrs.dimensions.width, None);
        assert_eq!(attrs.dimensions.unit.as_deref(), Some("mm"));
        assert_eq!(attrs.warranty_time.value, Some(90.0));
        assert_eq!(attrs.warranty_time.unit.as_deref(), Some("days"));
        assert_eq!(attrs.extra.get("processor_brand").map(String::as_str), Some("Intel"));
        assert!(!attrs.extra.contains_key("item_condition"));
    }

    #[test]
    fn leading_integer_parses_prefix_only() {
        assert_eq!(leading_integer("12 meses"), Some(12.0));
        assert_eq!(leading_integer("sem garantia"), None);
    }
}
