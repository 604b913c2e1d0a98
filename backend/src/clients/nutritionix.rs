//! Nutritionix HTTP client
//!
//! Wraps the two Nutritionix v2 endpoints the tracker uses:
//! - `GET /v2/search/instant` for type-ahead food search
//! - `POST /v2/natural/nutrients` for detailed nutrition of a phrase
//!
//! Responses are reshaped into the API's own types here so the rest of the
//! backend never sees Nutritionix wire formats.

use crate::config::NutritionixConfig;
use anyhow::{anyhow, Result};
use calorie_tracker_shared::types::{FoodSearchResult, NutrientValue, NutritionDetail};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Nutrient attribute ids used in `full_nutrients`
pub const ATTR_ENERGY_KCAL: u32 = 208;
pub const ATTR_PROTEIN: u32 = 203;
pub const ATTR_FAT: u32 = 204;
pub const ATTR_CARBOHYDRATE: u32 = 205;

const DEFAULT_SERVING: &str = "1 serving";

/// Errors talking to Nutritionix
#[derive(Error, Debug)]
pub enum NutritionixError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("unexpected response body: {0}")]
    Decode(String),
}

// ----------------------------------------------------------------------------
// Wire types
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct InstantSearchResponse {
    pub common: Vec<CommonFood>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommonFood {
    pub food_name: String,
    #[serde(default)]
    pub serving_unit: Option<String>,
    #[serde(default)]
    pub full_nutrients: Option<Vec<NutrientValue>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NaturalNutrientsResponse {
    #[serde(default)]
    pub foods: Vec<NaturalFood>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NaturalFood {
    pub food_name: String,
    #[serde(default)]
    pub nf_calories: Option<f64>,
    #[serde(default)]
    pub nf_protein: Option<f64>,
    #[serde(default)]
    pub nf_total_carbohydrate: Option<f64>,
    #[serde(default)]
    pub nf_total_fat: Option<f64>,
    #[serde(default)]
    pub nf_dietary_fiber: Option<f64>,
    #[serde(default)]
    pub nf_sugars: Option<f64>,
    #[serde(default)]
    pub nf_sodium: Option<f64>,
    #[serde(default)]
    pub serving_qty: Option<f64>,
    #[serde(default)]
    pub serving_unit: Option<String>,
}

// ----------------------------------------------------------------------------
// Reshaping
// ----------------------------------------------------------------------------

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn nutrient(nutrients: Option<&[NutrientValue]>, attr_id: u32) -> f64 {
    nutrients
        .and_then(|list| list.iter().find(|n| n.attr_id == attr_id))
        .map(|n| n.value)
        .unwrap_or(0.0)
}

/// Convert instant-search hits to API results, numbering them from 1
pub fn map_common_foods(foods: Vec<CommonFood>) -> Vec<FoodSearchResult> {
    foods
        .into_iter()
        .enumerate()
        .map(|(index, food)| {
            let nutrients = food.full_nutrients.as_deref();
            FoodSearchResult {
                id: index as u32 + 1,
                calories: nutrient(nutrients, ATTR_ENERGY_KCAL).round(),
                protein: round1(nutrient(nutrients, ATTR_PROTEIN)),
                carbs: round1(nutrient(nutrients, ATTR_CARBOHYDRATE)),
                fat: round1(nutrient(nutrients, ATTR_FAT)),
                serving_size: food
                    .serving_unit
                    .filter(|unit| !unit.is_empty())
                    .unwrap_or_else(|| DEFAULT_SERVING.to_string()),
                name: food.food_name,
                full_nutrients: food.full_nutrients,
            }
        })
        .collect()
}

/// Convert a natural-language nutrients hit to an API result
pub fn map_natural_food(food: NaturalFood) -> NutritionDetail {
    let serving_qty = food.serving_qty.unwrap_or(1.0);
    let serving_unit = food.serving_unit.unwrap_or_else(|| "serving".to_string());

    NutritionDetail {
        name: food.food_name,
        calories: food.nf_calories.unwrap_or(0.0).round(),
        protein: round1(food.nf_protein.unwrap_or(0.0)),
        carbs: round1(food.nf_total_carbohydrate.unwrap_or(0.0)),
        fat: round1(food.nf_total_fat.unwrap_or(0.0)),
        fiber: round1(food.nf_dietary_fiber.unwrap_or(0.0)),
        sugar: round1(food.nf_sugars.unwrap_or(0.0)),
        sodium: food.nf_sodium.unwrap_or(0.0).round(),
        serving_size: format!("{} {}", serving_qty, serving_unit),
        serving_qty,
        serving_unit,
    }
}

// ----------------------------------------------------------------------------
// Client
// ----------------------------------------------------------------------------

/// Nutritionix API client
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct NutritionixClient {
    client: reqwest::Client,
    base_url: String,
}

impl NutritionixClient {
    /// Build a client with the app credentials as default headers
    pub fn new(config: &NutritionixConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-app-id",
            HeaderValue::from_str(&config.app_id)
                .map_err(|_| anyhow!("Nutritionix app id contains invalid characters"))?,
        );
        headers.insert(
            "x-app-key",
            HeaderValue::from_str(&config.app_key)
                .map_err(|_| anyhow!("Nutritionix app key contains invalid characters"))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| anyhow!("Failed to build Nutritionix HTTP client: {}", e))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, NutritionixError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(NutritionixError::Status { status, body });
        }
        Ok(resp)
    }

    /// Common (unbranded) foods matching a query
    pub async fn instant_search(&self, query: &str) -> Result<Vec<FoodSearchResult>, NutritionixError> {
        let url = format!("{}/v2/search/instant", self.base_url);
        debug!(query, "Nutritionix instant search");

        let resp = self
            .client
            .get(&url)
            .query(&[("query", query), ("branded", "false"), ("detailed", "true")])
            .send()
            .await?;
        let resp = Self::check_status(resp).await?;

        let body: InstantSearchResponse = resp
            .json()
            .await
            .map_err(|e| NutritionixError::Decode(e.to_string()))?;

        Ok(map_common_foods(body.common))
    }

    /// Detailed nutrition for the first food recognised in a phrase
    pub async fn natural_nutrients(&self, query: &str) -> Result<Option<NutritionDetail>, NutritionixError> {
        let url = format!("{}/v2/natural/nutrients", self.base_url);
        debug!(query, "Nutritionix natural nutrients");

        let resp = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "query": query }))
            .send()
            .await?;
        let resp = Self::check_status(resp).await?;

        let body: NaturalNutrientsResponse = resp
            .json()
            .await
            .map_err(|e| NutritionixError::Decode(e.to_string()))?;

        Ok(body.foods.into_iter().next().map(map_natural_food))
    }
}
