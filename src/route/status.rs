use chrono::{SecondsFormat, Utc};
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::{Request, State};
use serde::Serialize;
use serde_json::{json, Value};
use utoipa::ToSchema;

use crate::config::Config;
use crate::resp::problem::{problems, Problem};

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: String,
    pub environment: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HelloResponse {
    pub message: &'static str,
}

/// Liveness check
#[utoipa::path(
    context_path = "/api",
    responses(
        (status = 200, description = "Server is running", body = HealthResponse),
    )
)]
#[get("/health")]
#[tracing::instrument(skip(c))]
pub fn health(c: &State<Config>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        message: "Server is running",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        environment: c.environment.clone(),
    })
}

/// Greeting used by the frontend to check connectivity
#[utoipa::path(
    context_path = "/api",
    responses(
        (status = 200, description = "Greeting", body = HelloResponse),
    )
)]
#[get("/hello")]
pub fn hello() -> Json<HelloResponse> {
    Json(HelloResponse {
        message: "Hello from the backend!",
    })
}

fn api_not_found_body() -> Value {
    json!({ "error": "API endpoint not found" })
}

/// Ranked ahead of the frontend fallback so unknown API paths never get `index.html`.
#[get("/<_..>", rank = 5)]
pub fn api_not_found() -> Custom<Json<Value>> {
    Custom(Status::NotFound, Json(api_not_found_body()))
}

#[catch(404)]
pub fn api_not_found_catcher() -> Json<Value> {
    Json(api_not_found_body())
}

#[catch(400)]
pub fn bad_request(req: &Request<'_>) -> Problem {
    problems::parse_problem()
        .detail("The request body is not valid JSON or could not be read.")
        .instance_uri(req.uri().path().to_string())
        .to_owned()
}

#[catch(422)]
pub fn unprocessable(req: &Request<'_>) -> Problem {
    problems::unprocessable()
        .detail("Check field names and value types against the API document.")
        .instance_uri(req.uri().path().to_string())
        .to_owned()
}

#[catch(500)]
pub fn internal_error(req: &Request<'_>) -> Json<Value> {
    tracing::error!("request to {} failed", req.uri());
    Json(json!({ "error": "Something went wrong!" }))
}

#[cfg(test)]
mod tests {
    use rocket::http::{ContentType, Status};
    use rocket::local::asynchronous::Client;
    use serde_json::Value;

    use crate::route::test_client;

    #[rocket::async_test]
    async fn health_reports_environment() {
        let client = test_client().await;

        let response = client.get("/api/health").dispatch().await;

        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.content_type(), Some(ContentType::JSON));
        let body: Value = response.into_json().await.expect("invalid response json");
        assert_eq!(body["status"], "OK");
        assert_eq!(body["message"], "Server is running");
        assert_eq!(body["environment"], "test");
        let timestamp = body["timestamp"].as_str().expect("timestamp string");
        assert!(timestamp.ends_with('Z'), "{}", timestamp);
        assert_eq!(timestamp.len(), "2024-01-01T00:00:00.000Z".len());
    }

    #[rocket::async_test]
    async fn hello_greets() {
        let client = test_client().await;

        let response = client.get("/api/hello").dispatch().await;

        let body: Value = response.into_json().await.expect("invalid response json");
        assert_eq!(body["message"], "Hello from the backend!");
    }

    #[rocket::async_test]
    async fn unknown_api_paths_are_json_404s() {
        let client: Client = test_client().await;

        for uri in &["/api/nope", "/api/v1/does/not/exist"] {
            let response = client.get(*uri).dispatch().await;
            assert_eq!(response.status(), Status::NotFound, "{}", uri);
            let body: Value = response.into_json().await.expect("invalid response json");
            assert_eq!(body["error"], "API endpoint not found");
        }

        let response = client.post("/api/nope").dispatch().await;
        assert_eq!(response.status(), Status::NotFound);
        let body: Value = response.into_json().await.expect("invalid response json");
        assert_eq!(body["error"], "API endpoint not found");
    }

    #[rocket::async_test]
    async fn malformed_bodies_are_problems() {
        let client = test_client().await;

        let response = client
            .post("/api/v1/login")
            .header(ContentType::JSON)
            .body("{ not json")
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::BadRequest);
        assert_eq!(
            response.content_type(),
            Some(ContentType::new("application", "problem+json"))
        );
        let body: Value = response.into_json().await.expect("invalid response json");
        assert_eq!(body["status"], 400);
        assert_eq!(body["instance"], "/api/v1/login");
    }

    #[rocket::async_test]
    async fn misshapen_bodies_are_problems() {
        let client = test_client().await;

        let response = client
            .post("/api/v1/login")
            .header(ContentType::JSON)
            .body(r#"{"email": 42}"#)
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::UnprocessableEntity);
        let body: Value = response.into_json().await.expect("invalid response json");
        assert_eq!(body["status"], 422);
        assert!(body["detail"].is_string());
    }
}
