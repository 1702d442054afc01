use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use crate::{
    CharterError,
    airports::AirportResolver,
    estimator::{self, EstimateSource},
    models::{AircraftClass, CanonicalAirport, Itinerary, Quote},
    quotes::QuoteSource,
    submission::LeadSubmitter,
    wizard::check_itinerary,
};

/// Services shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub resolver: AirportResolver,
    pub quote_source: Arc<dyn QuoteSource>,
    pub submitter: Arc<dyn LeadSubmitter>,
}

#[derive(Deserialize)]
pub struct AirportQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Deserialize)]
pub struct EstimateQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub class: Option<String>,
}

#[derive(Serialize)]
pub struct ApiEstimate {
    pub duration: String,
    pub minutes: u32,
    pub source: EstimateSource,
    pub class: AircraftClass,
}

#[derive(Serialize)]
pub struct ApiQuotes {
    pub quotes: Vec<Quote>,
}

/// Error reply in the `{ success: false, error }` envelope
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<CharterError> for ApiError {
    fn from(err: CharterError) -> Self {
        let status = match err {
            CharterError::Validation { .. } => StatusCode::BAD_REQUEST,
            CharterError::Lookup { .. }
            | CharterError::Submission { .. }
            | CharterError::Quote { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        warn!("API request failed: {}", err);
        Self {
            status,
            message: err.user_message(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "success": false, "error": self.message }));
        (self.status, body).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/airports", get(get_airports))
        .route("/estimate", get(get_estimate))
        .route("/quotes", post(post_quotes))
        .route("/leads", post(post_lead))
        .with_state(state)
}

async fn get_airports(
    State(state): State<AppState>,
    Query(query): Query<AirportQuery>,
) -> Json<Vec<CanonicalAirport>> {
    Json(state.resolver.suggest(&query.q).await)
}

async fn get_estimate(Query(query): Query<EstimateQuery>) -> Result<Json<ApiEstimate>, ApiError> {
    let class = match query.class.as_deref() {
        Some(class) => class.parse::<AircraftClass>()?,
        None => AircraftClass::Light,
    };
    let estimate =
        estimator::estimate_detailed(query.from.as_deref(), query.to.as_deref(), class);
    Ok(Json(ApiEstimate {
        duration: estimate.duration.to_string(),
        minutes: estimate.duration.minutes(),
        source: estimate.source,
        class,
    }))
}

fn validated(itinerary: &Itinerary) -> Result<(), CharterError> {
    check_itinerary(itinerary).map_err(|reason| CharterError::validation(reason.to_string()))
}

async fn post_quotes(
    State(state): State<AppState>,
    Json(itinerary): Json<Itinerary>,
) -> Result<Json<serde_json::Value>, ApiError> {
    validated(&itinerary)?;
    let quotes = state.quote_source.quotes(&itinerary).await?;
    Ok(Json(json!({ "success": true, "data": ApiQuotes { quotes } })))
}

async fn post_lead(
    State(state): State<AppState>,
    Json(itinerary): Json<Itinerary>,
) -> Result<Json<serde_json::Value>, ApiError> {
    validated(&itinerary)?;
    state.submitter.submit(&itinerary).await?;
    Ok(Json(json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airports::{AirportDirectory, DirectoryRequest};
    use crate::quotes::SyntheticQuotes;
    use crate::submission::LogSubmitter;
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    struct AustinDirectory;

    #[async_trait]
    impl AirportDirectory for AustinDirectory {
        async fn fetch(&self, _request: &DirectoryRequest) -> crate::Result<Value> {
            Ok(json!({ "airportsByCities": [
                { "nameAirport": "Austin-Bergstrom International", "codeIataAirport": "AUS", "nameCountry": "United States" }
            ]}))
        }
    }

    fn app() -> Router {
        router(AppState {
            resolver: AirportResolver::new(Arc::new(AustinDirectory)),
            quote_source: Arc::new(SyntheticQuotes::new("USD")),
            submitter: Arc::new(LogSubmitter),
        })
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn itinerary_json() -> Value {
        json!({
            "from": "Austin-Bergstrom International (AUS)",
            "to": "Louis Armstrong New Orleans (MSY)",
            "departDate": "2026-11-02",
            "departTime": "09:30:00",
            "returnDate": null,
            "returnTime": null,
            "passengerCount": 3,
            "tripType": "one-way",
            "contactEmail": "jane@example.com",
            "contactName": "Jane Doe"
        })
    }

    fn post(uri: &str, body: &Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_airports_endpoint() {
        let response = app()
            .oneshot(Request::get("/airports?q=austin").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body[0]["iataCode"], "AUS");

        let short = app()
            .oneshot(Request::get("/airports?q=a").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(body_json(short).await, json!([]));
    }

    #[tokio::test]
    async fn test_estimate_endpoint() {
        let response = app()
            .oneshot(
                Request::get("/estimate?from=Austin%20(AUS)&to=New%20Orleans%20(MSY)&class=midsize")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["duration"], "1h 40m");
        assert_eq!(body["minutes"], 100);
        assert_eq!(body["source"], "route-table");
    }

    #[tokio::test]
    async fn test_estimate_rejects_unknown_class() {
        let response = app()
            .oneshot(Request::get("/estimate?class=blimp").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["success"], false);
    }

    #[tokio::test]
    async fn test_quotes_endpoint() {
        let response = app().oneshot(post("/quotes", &itinerary_json())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["quotes"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_leads_endpoint() {
        let response = app().oneshot(post("/leads", &itinerary_json())).await.unwrap();
        assert_eq!(body_json(response).await, json!({ "success": true }));
    }

    #[tokio::test]
    async fn test_incomplete_itineraries_rejected() {
        let mut crowded = itinerary_json();
        crowded["passengerCount"] = json!(500);
        let response = app().oneshot(post("/quotes", &crowded)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("Passengers"));

        let mut no_return = itinerary_json();
        no_return["tripType"] = json!("round-trip");
        let response = app().oneshot(post("/quotes", &no_return)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let mut bad_email = itinerary_json();
        bad_email["contactEmail"] = json!("jane-at-example");
        let response = app().oneshot(post("/leads", &bad_email)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["success"], false);
    }
}
