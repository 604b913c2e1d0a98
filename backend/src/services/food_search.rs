//! Food search service
//!
//! Search goes cache -> Nutritionix -> built-in fallback table. Search never
//! fails from the caller's point of view; nutrition detail lookups do.

use crate::cache::SearchCache;
use crate::clients::{NutritionixClient, NutritionixError};
use crate::error::ApiError;
use calorie_tracker_shared::types::{FoodSearchResult, NutritionDetail};
use tracing::warn;

/// Queries shorter than this return nothing
pub const MIN_QUERY_LEN: usize = 2;

/// Foods served when Nutritionix is unavailable
pub fn fallback_table() -> Vec<FoodSearchResult> {
    vec![
        FoodSearchResult {
            id: 1,
            name: "Apple".to_string(),
            calories: 95.0,
            protein: 0.5,
            carbs: 25.0,
            fat: 0.3,
            serving_size: "1 medium apple".to_string(),
            full_nutrients: None,
        },
        FoodSearchResult {
            id: 2,
            name: "Chicken Breast".to_string(),
            calories: 165.0,
            protein: 31.0,
            carbs: 0.0,
            fat: 3.6,
            serving_size: "3 oz cooked".to_string(),
            full_nutrients: None,
        },
    ]
}

/// Fallback foods whose name contains the query, ignoring case
pub fn fallback_foods(query: &str) -> Vec<FoodSearchResult> {
    let needle = query.to_lowercase();
    fallback_table()
        .into_iter()
        .filter(|food| food.name.to_lowercase().contains(&needle))
        .collect()
}

/// Food search service
pub struct FoodSearchService;

impl FoodSearchService {
    /// Search foods by name
    pub async fn search(
        client: &NutritionixClient,
        cache: &SearchCache,
        query: &str,
    ) -> Vec<FoodSearchResult> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            return Vec::new();
        }

        if let Some(cached) = cache.get(query).await {
            return cached;
        }

        match client.instant_search(query).await {
            Ok(results) => {
                cache.put(query, &results).await;
                results
            }
            Err(e) => {
                warn!(error = %e, query, "Nutritionix search failed, using fallback foods");
                fallback_foods(query)
            }
        }
    }

    /// Detailed nutrition for a natural-language query
    pub async fn nutrition_detail(
        client: &NutritionixClient,
        query: &str,
    ) -> Result<NutritionDetail, ApiError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ApiError::BadRequest("Query is required".to_string()));
        }

        match client.natural_nutrients(query).await {
            Ok(Some(detail)) => Ok(detail),
            Ok(None) => Err(ApiError::NotFound("Food not found".to_string())),
            // Nutritionix answers 404 when nothing in the phrase is recognised
            Err(NutritionixError::Status { status, .. })
                if status == reqwest::StatusCode::NOT_FOUND =>
            {
                Err(ApiError::NotFound("Food not found".to_string()))
            }
            Err(e) => {
                warn!(error = %e, query, "Nutritionix nutrition lookup failed");
                Err(ApiError::ExternalService(
                    "Failed to get nutrition info".to_string(),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NutritionixConfig;
    use rstest::rstest;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> NutritionixClient {
        NutritionixClient::new(&NutritionixConfig {
            base_url: server.uri(),
            app_id: "test-id".to_string(),
            app_key: "test-key".to_string(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[rstest]
    #[case("apple", &["Apple"])]
    #[case("CHICK", &["Chicken Breast"])]
    #[case("e", &["Apple", "Chicken Breast"])]
    #[case("banana", &[])]
    fn test_fallback_filter(#[case] query: &str, #[case] expected: &[&str]) {
        let names: Vec<String> = fallback_foods(query).into_iter().map(|f| f.name).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_fallback_has_no_full_nutrients() {
        assert!(fallback_table().iter().all(|f| f.full_nutrients.is_none()));
    }

    #[tokio::test]
    async fn test_short_query_skips_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let results =
            FoodSearchService::search(&client_for(&server), &SearchCache::disabled(), " a ").await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_upstream_failure_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/search/instant"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let results =
            FoodSearchService::search(&client_for(&server), &SearchCache::disabled(), "apple").await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Apple");
        assert_eq!(results[0].serving_size, "1 medium apple");
    }

    #[tokio::test]
    async fn test_body_without_common_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/search/instant"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let results =
            FoodSearchService::search(&client_for(&server), &SearchCache::disabled(), "chicken").await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Chicken Breast");
    }

    #[tokio::test]
    async fn test_upstream_results_returned() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/search/instant"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "common": [
                    {"food_name": "banana", "serving_unit": "medium",
                     "full_nutrients": [{"attr_id": 208, "value": 105.02}]},
                    {"food_name": "banana bread", "serving_unit": "slice",
                     "full_nutrients": [{"attr_id": 208, "value": 196.0}]}
                ]
            })))
            .mount(&server)
            .await;

        let results =
            FoodSearchService::search(&client_for(&server), &SearchCache::disabled(), "banana").await;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].calories, 105.0);
        assert_eq!(results[1].id, 2);
    }

    #[tokio::test]
    async fn test_nutrition_detail_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/natural/nutrients"))
            .and(body_partial_json(serde_json::json!({"query": "xyzzy"})))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "message": "We couldn't match any of your foods"
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v2/natural/nutrients"))
            .and(body_partial_json(serde_json::json!({"query": "rice"})))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = FoodSearchService::nutrition_detail(&client, "xyzzy").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err = FoodSearchService::nutrition_detail(&client, "rice").await.unwrap_err();
        assert!(matches!(err, ApiError::ExternalService(_)));

        let err = FoodSearchService::nutrition_detail(&client, "   ").await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
