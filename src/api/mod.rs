use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    GoalSolveConfig, ProjectionInput, YearResult, run_projection, solve_required_contribution,
};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    initial_amount: Option<f64>,
    annual_contribution: Option<f64>,
    expected_return: Option<f64>,
    duration: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SolvePayload {
    initial_amount: Option<f64>,
    expected_return: Option<f64>,
    duration: Option<i32>,
    target_amount: Option<f64>,
    search_min: Option<f64>,
    search_max: Option<f64>,
    tolerance: Option<f64>,
    max_iterations: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    years: Vec<YearResult>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// Every form field defaults to zero until the user edits it, so an absent
/// payload key reads as zero on the way into the calculator as well.
fn default_form_input() -> ProjectionInput {
    ProjectionInput {
        initial_amount: 0.0,
        annual_contribution: 0.0,
        expected_return: 0.0,
        duration: 0,
    }
}

fn input_from_payload(payload: ProjectPayload) -> ProjectionInput {
    let mut input = default_form_input();

    if let Some(v) = payload.initial_amount {
        input.initial_amount = v;
    }
    if let Some(v) = payload.annual_contribution {
        input.annual_contribution = v;
    }
    if let Some(v) = payload.expected_return {
        input.expected_return = v;
    }
    if let Some(v) = payload.duration {
        input.duration = v;
    }

    input
}

fn solve_config_from_payload(payload: SolvePayload) -> GoalSolveConfig {
    let mut config = GoalSolveConfig {
        initial_amount: 0.0,
        expected_return: 0.0,
        duration: 0,
        target_amount: 0.0,
        search_min: 0.0,
        search_max: 100_000.0,
        tolerance: 0.01,
        max_iterations: 48,
    };

    if let Some(v) = payload.initial_amount {
        config.initial_amount = v;
    }
    if let Some(v) = payload.expected_return {
        config.expected_return = v;
    }
    if let Some(v) = payload.duration {
        config.duration = v;
    }
    if let Some(v) = payload.target_amount {
        config.target_amount = v;
    }
    if let Some(v) = payload.search_min {
        config.search_min = v;
    }
    if let Some(v) = payload.search_max {
        config.search_max = v;
    }
    if let Some(v) = payload.tolerance {
        config.tolerance = v;
    }
    if let Some(v) = payload.max_iterations {
        config.max_iterations = v;
    }

    config
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .route("/api/solve", get(solve_get_handler).post(solve_post_handler))
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    println!("Investment calculator listening on http://{addr}");
    println!("Local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn project_get_handler(Query(payload): Query<ProjectPayload>) -> Response {
    project_handler_impl(payload)
}

async fn project_post_handler(Json(payload): Json<ProjectPayload>) -> Response {
    project_handler_impl(payload)
}

// Validation failures are results the form renders inline, not transport
// errors, so they ship with 200 alongside successful projections.
fn project_handler_impl(payload: ProjectPayload) -> Response {
    let input = input_from_payload(payload);
    match run_projection(&input) {
        Ok(years) => json_response(StatusCode::OK, ProjectResponse { years }),
        Err(msg) => json_response(StatusCode::OK, ErrorResponse { error: msg }),
    }
}

async fn solve_get_handler(Query(payload): Query<SolvePayload>) -> Response {
    solve_handler_impl(payload)
}

async fn solve_post_handler(Json(payload): Json<SolvePayload>) -> Response {
    solve_handler_impl(payload)
}

fn solve_handler_impl(payload: SolvePayload) -> Response {
    let config = solve_config_from_payload(payload);
    match solve_required_contribution(&config) {
        Ok(result) => json_response(StatusCode::OK, result),
        Err(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn payload_from_json(json: &str) -> ProjectPayload {
        serde_json::from_str(json).expect("payload should parse")
    }

    #[test]
    fn payload_parses_web_form_keys() {
        let payload = payload_from_json(
            r#"{
              "initialAmount": 5000,
              "annualContribution": 500,
              "expectedReturn": 0.08,
              "duration": 10
            }"#,
        );
        let input = input_from_payload(payload);

        assert_approx(input.initial_amount, 5_000.0);
        assert_approx(input.annual_contribution, 500.0);
        assert_approx(input.expected_return, 0.08);
        assert_eq!(input.duration, 10);
    }

    #[test]
    fn missing_payload_fields_default_to_zero() {
        let payload = payload_from_json(r#"{ "initialAmount": 1000 }"#);
        let input = input_from_payload(payload);

        assert_approx(input.initial_amount, 1_000.0);
        assert_approx(input.annual_contribution, 0.0);
        assert_approx(input.expected_return, 0.0);
        assert_eq!(input.duration, 0);
    }

    #[test]
    fn empty_payload_yields_duration_error_like_the_untouched_form() {
        let input = input_from_payload(ProjectPayload::default());
        assert_eq!(
            run_projection(&input),
            Err("No valid amount of years provided.".to_string())
        );
    }

    #[test]
    fn non_numeric_field_is_rejected_before_the_calculator() {
        let parsed = serde_json::from_str::<ProjectPayload>(r#"{ "initialAmount": "abc" }"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn project_response_serializes_camel_case_fields() {
        let payload = payload_from_json(
            r#"{
              "initialAmount": 5000,
              "annualContribution": 500,
              "expectedReturn": 0.08,
              "duration": 10
            }"#,
        );
        let years = run_projection(&input_from_payload(payload)).expect("valid input");
        let json = serde_json::to_string(&ProjectResponse { years }).expect("should serialize");

        assert!(json.contains("\"years\""));
        assert!(json.contains("\"year\":1"));
        assert!(json.contains("\"totalAmount\""));
        assert!(json.contains("\"totalContributions\""));
        assert!(json.contains("\"totalInterestEarned\""));
    }

    #[test]
    fn validation_failure_serializes_as_error_field() {
        let input = input_from_payload(payload_from_json(r#"{ "initialAmount": -1 }"#));
        let err = run_projection(&input).expect_err("must fail validation");
        let json = serde_json::to_string(&ErrorResponse { error: err }).expect("should serialize");
        assert_eq!(
            json,
            "{\"error\":\"Initial investment amount must be at least zero.\"}"
        );
    }

    #[test]
    fn solve_payload_parses_and_solves() {
        let payload: SolvePayload = serde_json::from_str(
            r#"{
              "initialAmount": 1000,
              "expectedReturn": 0,
              "duration": 10,
              "targetAmount": 6000,
              "searchMax": 2000
            }"#,
        )
        .expect("payload should parse");
        let config = solve_config_from_payload(payload);
        let result = solve_required_contribution(&config).expect("must solve");

        assert!(result.feasible);
        let solved = result.solved_contribution.expect("value expected");
        assert!((solved - 500.0).abs() <= config.tolerance + 0.01);
    }
}
