use rocket::serde::json::Json;
use rocket::State;

use crate::auth::{self, AuthBackend, Credentials, Landing};
use crate::resp::problem::Problem;

/// Log in through the auth backend
#[utoipa::path(
    request_body = Credentials,
    responses(
        (status = 200, description = "Screen to land on", body = Landing),
        (status = 400, description = "Email or password missing", body = Problem),
        (status = 401, description = "Credentials rejected", body = Problem),
        (status = 502, description = "Auth backend unreachable", body = Problem),
    )
)]
#[post("/login", format = "json", data = "<credentials>")]
#[tracing::instrument(skip(backend))]
pub async fn login_submit(
    credentials: Json<Credentials>,
    backend: &State<AuthBackend>,
) -> Result<Json<Landing>, Problem> {
    let landing = auth::login(backend.api(), &credentials).await?;
    tracing::info!(role = %landing.role, "logged in");
    Ok(Json(landing))
}

/// Create an account through the auth backend
#[utoipa::path(
    request_body = Credentials,
    responses(
        (status = 200, description = "Screen to land on", body = Landing),
        (status = 400, description = "Email or password missing", body = Problem),
        (status = 401, description = "Signup rejected", body = Problem),
        (status = 502, description = "Auth backend unreachable", body = Problem),
    )
)]
#[post("/signup", format = "json", data = "<credentials>")]
#[tracing::instrument(skip(backend))]
pub async fn signup_submit(
    credentials: Json<Credentials>,
    backend: &State<AuthBackend>,
) -> Result<Json<Landing>, Problem> {
    let landing = auth::signup(backend.api(), &credentials).await?;
    tracing::info!(role = %landing.role, "signed up");
    Ok(Json(landing))
}

#[cfg(test)]
mod tests {
    use rocket::http::{ContentType, Status};
    use serde_json::{json, Value};

    use crate::auth::stub::StubAuthApi;
    use crate::auth::{AuthReply, AuthUser, INVALID_CREDENTIALS, MISSING_CREDENTIALS, SERVER_ERROR};
    use crate::role::Role;
    use crate::route::{test_client_using, test_config};

    async fn submit(api: StubAuthApi, uri: &str, body: Value) -> (Status, Value) {
        let client = test_client_using(test_config(), api).await;
        let response = client
            .post(uri)
            .header(ContentType::JSON)
            .body(body.to_string())
            .dispatch()
            .await;
        let status = response.status();
        (status, response.into_json().await.expect("invalid response json"))
    }

    fn ada(role: &str) -> Value {
        json!({ "email": "ada@example.com", "password": "hunter2", "role": role })
    }

    #[rocket::async_test]
    async fn teacher_lands_on_dashboard() {
        let api = StubAuthApi::replying(AuthReply {
            success: Some(true),
            ..Default::default()
        });

        let (status, body) = submit(api, "/api/v1/login", ada("teacher")).await;

        assert_eq!(status, Status::Ok);
        assert_eq!(body["route"], "/dashboard");
        assert_eq!(body["role"], "Teacher");
    }

    #[rocket::async_test]
    async fn student_signup_lands_on_onboarding() {
        let api = StubAuthApi::replying(AuthReply {
            user: Some(AuthUser {
                role: Role::Student,
            }),
            ..Default::default()
        });

        let (status, body) = submit(api, "/api/v1/signup", ada("student")).await;

        assert_eq!(status, Status::Ok);
        assert_eq!(body["route"], "/onboarding");
    }

    #[rocket::async_test]
    async fn empty_password_never_reaches_the_backend() {
        let (status, body) = submit(
            StubAuthApi::failing(),
            "/api/v1/login",
            json!({ "email": "ada@example.com", "password": "" }),
        )
        .await;

        assert_eq!(status, Status::BadRequest);
        assert_eq!(body["title"], MISSING_CREDENTIALS);
    }

    #[rocket::async_test]
    async fn rejected_login_uses_backend_message() {
        let api = StubAuthApi::replying(AuthReply {
            success: Some(false),
            message: Some("Account locked".to_string()),
            ..Default::default()
        });
        let (status, body) = submit(api, "/api/v1/login", ada("teacher")).await;
        assert_eq!(status, Status::Unauthorized);
        assert_eq!(body["title"], "Account locked");

        let api = StubAuthApi::replying(AuthReply::default());
        let (_, body) = submit(api, "/api/v1/login", ada("teacher")).await;
        assert_eq!(body["title"], INVALID_CREDENTIALS);
    }

    #[rocket::async_test]
    async fn unreachable_backend_is_a_bad_gateway() {
        let (status, body) = submit(StubAuthApi::failing(), "/api/v1/login", ada("teacher")).await;

        assert_eq!(status, Status::BadGateway);
        assert_eq!(body["title"], SERVER_ERROR);
    }
}
