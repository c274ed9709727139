//! Query validation and the search orchestrator.

use anyhow::Result;
use tracing::{debug, error, info, warn};

use crate::adapters::MarketplaceClient;
use crate::config::AppConfig;
use crate::error::{ApiError, SearchError};
use crate::mock::mock_products;
use crate::models::SearchResult;

// ==================== QUERY VALIDATOR ====================
/// A non-empty search term, passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn parse(raw: Option<String>) -> Result<Self, ApiError> {
        match raw {
            Some(q) if !q.is_empty() => Ok(Self(q)),
            _ => {
                warn!("Search request missing query parameter");
                Err(ApiError::MissingParameter)
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ==================== SEARCH ORCHESTRATOR ====================
#[derive(Clone)]
pub struct SearchService {
    client: MarketplaceClient,
    tolerant_auth: bool,
}

impl SearchService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            client: MarketplaceClient::new(config)?,
            tolerant_auth: config.tolerant_auth,
        })
    }

    pub async fn search_products(&self, query: &SearchQuery) -> Result<SearchResult, SearchError> {
        let query = query.as_str();
        info!("Searching Mercado Livre for: {:?}", query);

        if self.client.sends_token() {
            info!("Using Mercado Livre authorization token");
        } else {
            warn!("No valid Mercado Livre token configured, calling API unauthenticated");
        }

        match self.client.search(query).await {
            Ok(response) => {
                debug!(total_results = response.results.len(), "API response received");
                let result = SearchResult::new(query, response.into_products());
                info!("Found {} products for {:?}", result.count, query);
                Ok(result)
            }
            Err(err) => {
                error!(error = %err, "Error fetching from Mercado Livre API");
                let classified = SearchError::from(err);
                if self.tolerant_auth && matches!(classified, SearchError::Unauthorized) {
                    let products = mock_products(query);
                    info!("Returning {} mock products for {:?}", products.len(), query);
                    return Ok(SearchResult::new(query, products));
                }
                Err(classified)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_or_empty_query_is_rejected() {
        assert!(matches!(SearchQuery::parse(None), Err(ApiError::MissingParameter)));
        assert!(matches!(
            SearchQuery::parse(Some(String::new())),
            Err(ApiError::MissingParameter)
        ));
    }

    #[test]
    fn present_query_passes_through_unchanged() {
        let query = SearchQuery::parse(Some("  bicicleta elétrica 750W ".into())).unwrap();
        assert_eq!(query.as_str(), "  bicicleta elétrica 750W ");
    }
}
