use axum::{
    body::Bytes,
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{debug, info};

use crate::{
    error::AppError,
    models::{
        catalog::{preset_airports, preset_destinations, Airport},
        itinerary::{
            ItineraryList, ItineraryResponse, SaveItineraryRequest, SaveItineraryResponse,
            BLANK_NAME_MESSAGE,
        },
        trip::{TripRequest, TripResponse},
    },
    state::AppState,
    validation,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/airports", get(airports))
        .route("/destinations", get(destinations))
        .route("/trip", post(create_trip))
        .route("/itineraries", get(list_itineraries))
        .route("/itineraries/save", post(save_itinerary))
        .route("/itineraries/:name", get(load_itinerary))
}

async fn airports() -> Json<Vec<Airport>> {
    Json(preset_airports())
}

async fn destinations() -> Json<Vec<String>> {
    Json(preset_destinations())
}

/// Malformed bodies are planned as an empty request.
async fn create_trip(State(state): State<AppState>, body: Bytes) -> Result<Json<TripResponse>, AppError> {
    let mut trip: TripRequest = serde_json::from_slice(&body).unwrap_or_else(|err| {
        debug!("unreadable trip payload, using defaults: {err}");
        TripRequest::default()
    });
    trip.departure_date = trip.departure_date.trim().to_string();
    trip.return_date = trip.return_date.trim().to_string();

    validation::check_submitted(&trip.departure_date, &trip.return_date, validation::today())
        .map_err(|message| AppError::BadRequest(message.to_string()))?;

    let trip_id = state.storage.record_trip(trip.clone()).await;
    let planned = state.planner.plan_trip(&trip).await;
    info!(trip_id, destination = %trip.destination, "trip created");

    Ok(Json(TripResponse {
        success: true,
        plan: Some(planned.plan),
        message: None,
        output: Some(planned.output),
        trip_id: Some(trip_id),
    }))
}

async fn list_itineraries(State(state): State<AppState>) -> Json<ItineraryList> {
    Json(ItineraryList {
        names: state.storage.itinerary_names().await,
    })
}

async fn load_itinerary(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ItineraryResponse>, AppError> {
    let plan = state
        .storage
        .load_itinerary(&name)
        .await
        .ok_or_else(|| AppError::NotFound("Itinerary not found.".into()))?;
    Ok(Json(ItineraryResponse {
        success: true,
        plan: Some(plan),
        message: None,
    }))
}

async fn save_itinerary(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SaveItineraryResponse>, AppError> {
    let request: SaveItineraryRequest = serde_json::from_slice(&body)
        .map_err(|err| AppError::BadRequest(format!("Invalid itinerary payload: {err}")))?;
    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest(BLANK_NAME_MESSAGE.into()));
    }

    let replaced = state.storage.save_itinerary(name, request.plan).await;
    info!(name, replaced, "itinerary saved");
    Ok(Json(SaveItineraryResponse {
        success: true,
        message: Some(format!("Saved \"{name}\".")),
    }))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use chrono::Duration;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::routes::tests::test_app;

    async fn call(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn date_in(days: i64) -> String {
        (crate::validation::today() + Duration::days(days))
            .format("%Y-%m-%d")
            .to_string()
    }

    #[tokio::test]
    async fn catalog_endpoints() {
        let (app, _) = test_app();
        let (status, airports) = call(app.clone(), get("/api/airports")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(airports[0], json!({"code": "SFO", "name": "San Francisco (SFO)"}));
        let (_, destinations) = call(app, get("/api/destinations")).await;
        assert_eq!(destinations.as_array().map(Vec::len), Some(26));
    }

    #[tokio::test]
    async fn trip_with_past_date_is_rejected() {
        let (app, storage) = test_app();
        let body = json!({"home_airport": "SFO", "departure_date": "2024-01-01", "destination": "Tokyo"});
        let (status, value) = call(app, post_json("/api/trip", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["success"], json!(false));
        assert_eq!(value["message"], json!(crate::validation::PAST_DATE_MESSAGE));
        assert_eq!(storage.trip_count().await, 0);
    }

    #[tokio::test]
    async fn trip_with_unordered_dates_is_rejected() {
        let (app, _) = test_app();
        let body = json!({"departure_date": date_in(10), "return_date": date_in(5)});
        let (status, value) = call(app, post_json("/api/trip", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["message"], json!(crate::validation::DATE_ORDER_MESSAGE));
    }

    #[tokio::test]
    async fn valid_trip_returns_plan() {
        let (app, storage) = test_app();
        let body = json!({
            "home_airport": "SFO",
            "departure_date": date_in(7),
            "destination": "Honolulu",
            "return_date": date_in(9),
            "budget": 4000,
            "activity_types": ["beach"],
            "prefer_red_eyes": true,
        });
        let (status, value) = call(app, post_json("/api/trip", body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["success"], json!(true));
        assert_eq!(value["trip_id"], json!(1));
        assert_eq!(value["plan"]["total_budget"], json!(4000.0));
        assert_eq!(value["plan"]["days"].as_array().map(Vec::len), Some(3));
        assert!(value["output"].as_str().unwrap().contains("Prefer red-eye flights: Yes"));
        assert_eq!(storage.trip_count().await, 1);
    }

    #[tokio::test]
    async fn mistyped_field_does_not_skip_date_check() {
        let (app, storage) = test_app();
        let body = json!({"home_airport": null, "departure_date": "2020-01-01", "return_date": "2020-01-05"});
        let (status, value) = call(app, post_json("/api/trip", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["message"], json!(crate::validation::PAST_DATE_MESSAGE));
        assert_eq!(storage.trip_count().await, 0);
    }

    #[tokio::test]
    async fn overlong_trip_is_rejected() {
        let (app, storage) = test_app();
        let body = json!({"departure_date": date_in(10), "return_date": "9999-12-31"});
        let (status, value) = call(app, post_json("/api/trip", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["message"], json!(crate::validation::TRIP_TOO_LONG_MESSAGE));
        assert_eq!(storage.trip_count().await, 0);
    }

    #[tokio::test]
    async fn malformed_trip_body_is_planned_empty() {
        let (app, _) = test_app();
        let request = Request::post("/api/trip").body(Body::from("not json")).unwrap();
        let (status, value) = call(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["plan"]["days"], json!([]));
    }

    #[tokio::test]
    async fn itineraries_save_list_load() {
        let (app, _) = test_app();
        let plan = json!({"total_budget": 1500, "flights": [], "days": []});

        let (status, value) = call(
            app.clone(),
            post_json("/api/itineraries/save", json!({"name": "  ", "plan": plan})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["message"], json!(super::BLANK_NAME_MESSAGE));

        let (status, value) = call(
            app.clone(),
            post_json("/api/itineraries/save", json!({"name": "Spring break/2027", "plan": plan})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["success"], json!(true));

        let (_, list) = call(app.clone(), get("/api/itineraries")).await;
        assert_eq!(list, json!({"names": ["Spring break/2027"]}));

        let (status, loaded) = call(app.clone(), get("/api/itineraries/Spring%20break%2F2027")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(loaded["plan"]["total_budget"], json!(1500.0));

        let (status, missing) = call(app, get("/api/itineraries/nowhere")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(missing["success"], json!(false));
    }
}
