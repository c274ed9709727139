//! Data shapes exchanged with the marketplace and returned to clients.
//!
//! - **`product`**: search results as served by `/buscar` and the raw
//!   upstream search payload they are derived from.
//! - **`listing`**: the full upstream item model, its simplified view and
//!   structured attribute extraction.

pub mod listing;
pub mod product;

pub use listing::{
    ListingDetail, ProductAttributes, SimplifiedProduct, extract_attribute,
    extract_product_attributes, to_simplified,
};
pub use product::{
    Product, SearchResult, UpstreamProduct, UpstreamSearchResponse, UpstreamSeller,
};
