use askama::Template;
use askama_axum::IntoResponse as AskamaTemplateResponse;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use axum_extra::extract::Form;

use crate::{
    client::itineraries::load_failed_message,
    error::AppError,
    form::{FormControls, TripForm, BUDGET_MAX, BUDGET_MIN, BUDGET_STEP},
    models::catalog::{preset_airports, preset_destinations, Airport},
    render::{Region, ResultsPanel},
    state::AppState,
    validation,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(welcome))
        .route("/trip", get(trip_form).post(trip_submit))
        .route("/itineraries/:name", get(itinerary_page))
}

#[derive(Template)]
#[template(path = "welcome.html")]
struct WelcomeTemplate;

async fn welcome() -> impl IntoResponse {
    AskamaTemplateResponse::into_response(WelcomeTemplate)
}

#[derive(Template)]
#[template(path = "trip.html")]
struct TripTemplate {
    airports: Vec<Airport>,
    destinations: Vec<String>,
    form: FormControls,
    budget_min: i64,
    budget_max: i64,
    budget_step: i64,
    date_error: String,
    show_placeholder: bool,
    show_content: bool,
    show_error: bool,
    placeholder_text: &'static str,
    content_html: String,
    error_message: String,
    saved: Vec<String>,
}

impl TripTemplate {
    fn new(form: FormControls, date_error: String, results: &ResultsPanel, saved: Vec<String>) -> Self {
        let region = results.visible_region();
        Self {
            airports: preset_airports(),
            destinations: preset_destinations(),
            form,
            budget_min: BUDGET_MIN,
            budget_max: BUDGET_MAX,
            budget_step: BUDGET_STEP,
            date_error,
            show_placeholder: region == Region::Placeholder,
            show_content: region == Region::Content,
            show_error: region == Region::Error,
            placeholder_text: results.placeholder_text(),
            content_html: results.content_html().to_string(),
            error_message: results.error_message().to_string(),
            saved,
        }
    }
}

fn render_trip(status: StatusCode, page: TripTemplate) -> Response {
    (status, AskamaTemplateResponse::into_response(page)).into_response()
}

/// Entering the trip view always starts from a blank form and empty results.
async fn trip_form(State(state): State<AppState>) -> Response {
    let saved = state.storage.itinerary_names().await;
    render_trip(
        StatusCode::OK,
        TripTemplate::new(FormControls::default(), String::new(), &ResultsPanel::default(), saved),
    )
}

async fn trip_submit(
    State(state): State<AppState>,
    Form(form): Form<TripForm>,
) -> Result<Response, AppError> {
    let controls = FormControls::from_form(&form);
    let trip = form.to_request();
    let today = validation::today();
    let saved = state.storage.itinerary_names().await;
    let mut results = ResultsPanel::default();

    let check = validation::validate(&trip.departure_date, &trip.return_date, today);
    if !check.ok {
        return Ok(render_trip(
            StatusCode::BAD_REQUEST,
            TripTemplate::new(controls, check.message, &results, saved),
        ));
    }

    if let Err(message) = validation::check_submitted(&trip.departure_date, &trip.return_date, today) {
        results.show_error(message);
        let date_error = if validation::mentions_departure(message) {
            message.to_string()
        } else {
            String::new()
        };
        return Ok(render_trip(
            StatusCode::BAD_REQUEST,
            TripTemplate::new(controls, date_error, &results, saved),
        ));
    }

    state.storage.record_trip(trip.clone()).await;
    let planned = state.planner.plan_trip(&trip).await;
    results.render(&planned.plan)?;
    Ok(render_trip(
        StatusCode::OK,
        TripTemplate::new(controls, String::new(), &results, saved),
    ))
}

async fn itinerary_page(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, AppError> {
    let saved = state.storage.itinerary_names().await;
    let mut results = ResultsPanel::default();
    let status = match state.storage.load_itinerary(&name).await {
        Some(plan) => {
            results.render(&plan)?;
            StatusCode::OK
        }
        None => {
            results.show_error(load_failed_message(&name));
            StatusCode::NOT_FOUND
        }
    };
    Ok(render_trip(
        status,
        TripTemplate::new(FormControls::default(), String::new(), &results, saved),
    ))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use chrono::Duration;
    use tower::ServiceExt;

    use crate::{models::plan::Plan, routes::tests::test_app, validation};

    async fn page(app: axum::Router, request: Request<Body>) -> (StatusCode, String) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn submit(body: String) -> Request<Body> {
        Request::post("/trip")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    fn date_in(days: i64) -> String {
        (validation::today() + Duration::days(days))
            .format("%Y-%m-%d")
            .to_string()
    }

    #[tokio::test]
    async fn fresh_trip_form() {
        let (app, _) = test_app();
        let (status, html) = page(app, Request::get("/trip").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("San Francisco (SFO)"));
        assert!(html.contains("$3,000"));
        assert!(html.contains("Fill in your trip details"));
    }

    #[tokio::test]
    async fn past_dates_are_shown_inline() {
        let (app, storage) = test_app();
        let body = "home_airport=SFO&departure_date=2024-01-01&return_date=2024-01-10&destination=Tokyo&budget=3000&activity_types=beach".to_string();
        let (status, html) = page(app, submit(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(html.contains(validation::PAST_DATE_MESSAGE));
        assert_eq!(storage.trip_count().await, 0);
    }

    #[tokio::test]
    async fn valid_submission_renders_plan() {
        let (app, storage) = test_app();
        let body = format!(
            "home_airport=SFO&departure_date={}&return_date={}&destination=Miami&budget=2000&activity_types=beach&activity_types=food&prefer_red_eyes=on",
            date_in(3),
            date_in(5)
        );
        let (status, html) = page(app, submit(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Total budget $2,000"));
        assert!(html.contains("Day 3"));
        assert_eq!(storage.trip_count().await, 1);
    }

    #[tokio::test]
    async fn saved_itinerary_page() {
        let (app, storage) = test_app();
        let plan = Plan {
            total_budget: 4200.0,
            ..Plan::default()
        };
        storage.save_itinerary("Big trip", plan).await;
        let request = Request::get("/itineraries/Big%20trip").body(Body::empty()).unwrap();
        let (status, html) = page(app.clone(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Total budget $4,200"));

        let request = Request::get("/itineraries/Other").body(Body::empty()).unwrap();
        let (status, html) = page(app, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(html.contains("Could not load itinerary &quot;Other&quot;."));
    }
}
