//! Login and signup against the external authentication backend.
//!
//! This crate keeps no tokens and no sessions. A successful call only decides
//! which screen the user lands on.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::role::Role;
use crate::screen::Screen;

pub mod http;

pub use http::HttpAuthApi;

pub const MISSING_CREDENTIALS: &str = "Please enter both email and password.";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const SERVER_ERROR: &str = "Server error. Please try again later.";

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Credentials {
    #[schema(format = "email")]
    pub email: String,
    #[schema(format = "password")]
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Credentials:{}:{}", self.role, self.email)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthUser {
    pub role: Role,
}

/// Reply shape of the auth backend. Either field set may be present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthReply {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<AuthUser>,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("auth backend answered {0} without a readable body")]
    Status(u16),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("{}", MISSING_CREDENTIALS)]
    MissingCredentials,
    #[error("{0}")]
    Rejected(String),
    #[error("{}", SERVER_ERROR)]
    Server,
}

/// Where a successful login or signup sends the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Landing {
    #[schema(value_type = String, example = "/dashboard")]
    pub route: Screen,
    pub role: Role,
}

impl Landing {
    pub fn for_role(role: Role) -> Landing {
        Landing {
            route: role.landing_screen(),
            role,
        }
    }
}

#[rocket::async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<AuthReply, AuthError>;
    async fn signup(&self, credentials: &Credentials) -> Result<AuthReply, AuthError>;
}

/// The auth backend handed to request handlers through managed state.
pub struct AuthBackend(pub Box<dyn AuthApi>);

impl AuthBackend {
    pub fn new(api: impl AuthApi + 'static) -> AuthBackend {
        AuthBackend(Box::new(api))
    }

    pub fn api(&self) -> &dyn AuthApi {
        self.0.as_ref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Login,
    Signup,
}

pub async fn login(api: &dyn AuthApi, credentials: &Credentials) -> Result<Landing, LoginError> {
    submit(api, credentials, Action::Login).await
}

pub async fn signup(api: &dyn AuthApi, credentials: &Credentials) -> Result<Landing, LoginError> {
    submit(api, credentials, Action::Signup).await
}

async fn submit(
    api: &dyn AuthApi,
    credentials: &Credentials,
    action: Action,
) -> Result<Landing, LoginError> {
    if credentials.email.trim().is_empty() || credentials.password.is_empty() {
        return Err(LoginError::MissingCredentials);
    }

    let reply = match action {
        Action::Login => api.login(credentials).await,
        Action::Signup => api.signup(credentials).await,
    };

    match reply {
        Ok(reply) => interpret(reply, credentials.role),
        Err(e) => {
            tracing::warn!("auth backend call failed: {}", e);
            Err(LoginError::Server)
        }
    }
}

/// Turns a backend reply into a landing screen or the error to show.
pub fn interpret(reply: AuthReply, requested: Role) -> Result<Landing, LoginError> {
    if let Some(user) = reply.user {
        return Ok(Landing::for_role(user.role));
    }

    match reply.success {
        Some(true) => Ok(Landing::for_role(requested)),
        _ => Err(LoginError::Rejected(
            reply
                .message
                .filter(|it| !it.trim().is_empty())
                .unwrap_or_else(|| INVALID_CREDENTIALS.to_string()),
        )),
    }
}

#[cfg(test)]
pub(crate) mod stub {
    use super::*;
    use std::sync::Mutex;

    /// Answers every call with a fixed reply and records what it was asked.
    pub struct StubAuthApi {
        reply: Option<AuthReply>,
        pub calls: Mutex<Vec<Credentials>>,
    }

    impl StubAuthApi {
        pub fn replying(reply: AuthReply) -> StubAuthApi {
            StubAuthApi {
                reply: Some(reply),
                calls: Mutex::new(vec![]),
            }
        }

        pub fn failing() -> StubAuthApi {
            StubAuthApi {
                reply: None,
                calls: Mutex::new(vec![]),
            }
        }

        fn answer(&self, credentials: &Credentials) -> Result<AuthReply, AuthError> {
            self.calls.lock().unwrap().push(credentials.clone());
            self.reply.clone().ok_or(AuthError::Status(503))
        }
    }

    #[rocket::async_trait]
    impl AuthApi for StubAuthApi {
        async fn login(&self, credentials: &Credentials) -> Result<AuthReply, AuthError> {
            self.answer(credentials)
        }

        async fn signup(&self, credentials: &Credentials) -> Result<AuthReply, AuthError> {
            self.answer(credentials)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::stub::StubAuthApi;
    use super::*;

    fn credentials(role: Role) -> Credentials {
        Credentials {
            email: "ada@example.com".to_string(),
            password: "hunter2".to_string(),
            role,
        }
    }

    #[rocket::async_test]
    async fn teacher_success_lands_on_dashboard() {
        let api = StubAuthApi::replying(AuthReply {
            success: Some(true),
            ..Default::default()
        });

        let landing = login(&api, &credentials(Role::Teacher)).await.unwrap();

        assert_eq!(landing.route, Screen::Dashboard);
        assert_eq!(api.calls.lock().unwrap().len(), 1);
    }

    #[rocket::async_test]
    async fn reported_user_role_wins() {
        let api = StubAuthApi::replying(AuthReply {
            user: Some(AuthUser {
                role: Role::Student,
            }),
            ..Default::default()
        });

        let landing = login(&api, &credentials(Role::Teacher)).await.unwrap();

        assert_eq!(landing, Landing::for_role(Role::Student));
        assert_eq!(landing.route, Screen::Onboarding);
    }

    #[rocket::async_test]
    async fn rejection_surfaces_backend_message() {
        let api = StubAuthApi::replying(AuthReply {
            success: Some(false),
            message: Some("Wrong password".to_string()),
            ..Default::default()
        });

        let error = login(&api, &credentials(Role::Teacher)).await.unwrap_err();
        assert_eq!(error.to_string(), "Wrong password");
    }

    #[rocket::async_test]
    async fn rejection_without_message_is_generic() {
        let api = StubAuthApi::replying(AuthReply {
            success: Some(false),
            ..Default::default()
        });

        let error = signup(&api, &credentials(Role::Student)).await.unwrap_err();
        assert_eq!(error.to_string(), INVALID_CREDENTIALS);
    }

    #[rocket::async_test]
    async fn transport_failure_is_a_server_error() {
        let api = StubAuthApi::failing();

        let error = login(&api, &credentials(Role::Teacher)).await.unwrap_err();
        assert_eq!(error, LoginError::Server);
        assert_eq!(error.to_string(), SERVER_ERROR);
    }

    #[rocket::async_test]
    async fn blank_credentials_never_reach_the_backend() {
        let api = StubAuthApi::failing();
        let mut blank = credentials(Role::Teacher);
        blank.password = String::new();

        let error = login(&api, &blank).await.unwrap_err();

        assert_eq!(error.to_string(), MISSING_CREDENTIALS);
        assert!(api.calls.lock().unwrap().is_empty());
    }
}
