#[macro_use]
extern crate rocket;
#[macro_use]
extern crate serde;

use rocket::http::Method;
use rocket::{Build, Rocket};
use rocket_cors::{AllowedHeaders, AllowedOrigins};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::auth::{AuthBackend, HttpAuthApi};
use crate::config::Config;
use crate::data::store::{ClassroomStore, DraftStore, Limits, SessionStore};
use crate::error::{BackendError, ConfigurationError};
use crate::route::mount_api;

pub mod auth;
pub mod config;
pub mod data;
pub mod error;
pub mod middleware;
pub mod resp;
pub mod role;
pub mod route;
pub mod screen;
pub mod util;

pub async fn create(log_level: Option<Level>) -> Result<Rocket<Build>, BackendError> {
    if let Some(l) = log_level {
        let subscriber = FmtSubscriber::builder().with_max_level(l).finish();

        if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
            eprintln!("Unable to set global logger: {}", err);
        };
        if let Err(err) = tracing_log::LogTracer::init() {
            eprintln!("Unable to forward log records: {}", err);
        }
    }

    tracing::info!("Reading .env file...");
    if dotenv::dotenv().is_err() {
        tracing::warn!("Unable to load .env file.");
    }

    tracing::info!("Loading configuration...");
    let c = match Config::load() {
        Ok(c) => {
            tracing::info!("Configuration loaded.");
            c
        }
        Err(ConfigurationError::NotFound(_)) => {
            let c = Config::default();
            if c.save().is_err() {
                tracing::warn!("Unable to save generated configuration.");
            }
            c
        }
        Err(other) => {
            tracing::error!("Configuration error: {}", other);
            return Err(other.into());
        }
    };

    match c.static_root() {
        Some(root) => tracing::info!("Serving static files from {}", root.display()),
        None => tracing::warn!(
            "No static files folder found, looked in: {:?}",
            c.static_roots
        ),
    }

    tracing::info!("Using auth backend: {}", c.auth_api_url);
    let auth = HttpAuthApi::from_config(&c)?;

    build(c, AuthBackend::new(auth))
}

/// Assembles the server around an already loaded configuration.
pub fn build(c: Config, auth: AuthBackend) -> Result<Rocket<Build>, BackendError> {
    tracing::info!("Starting HTTP server in {} mode...", c.environment);
    let figment = rocket::Config::figment()
        .merge(("port", c.port))
        .merge(("address", c.address.clone()));

    let limits = Limits::from_config(&c);
    let mut r = rocket::custom(figment)
        .manage(c)
        .manage(ClassroomStore::new())
        .manage(DraftStore::with_limits(limits))
        .manage(SessionStore::with_limits(limits))
        .manage(auth);

    tracing::info!("Setting up CORS...");
    let cors = rocket_cors::CorsOptions {
        allowed_origins: AllowedOrigins::All,
        allowed_methods: vec![
            Method::Get,
            Method::Put,
            Method::Post,
            Method::Patch,
            Method::Delete,
        ]
        .into_iter()
        .map(From::from)
        .collect(),
        allowed_headers: AllowedHeaders::All,
        allow_credentials: true,
        ..Default::default()
    }
    .to_cors()?;

    r = r.attach(cors);
    r = mount_api(r);

    Ok(r)
}
