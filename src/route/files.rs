use std::path::{Path, PathBuf};

use rocket::fs::NamedFile;
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::State;

use crate::config::Config;
use crate::screen::Screen;
use crate::util;

pub const NOT_BUILT_MESSAGE: &str = "Frontend not built. Run the frontend build first.";

#[derive(Debug, Responder)]
pub enum AppFile {
    File(NamedFile),
    NotBuilt(Custom<&'static str>),
}

/// `index.html` from the first static root that has one.
pub async fn app_index_file(c: &Config) -> AppFile {
    let index = util::find_in_roots(&c.static_roots, "index.html", Path::is_file);

    match index {
        Some(path) => match NamedFile::open(&path).await {
            Ok(file) => AppFile::File(file),
            Err(e) => {
                tracing::warn!("unable to open '{}': {}", path.display(), e);
                AppFile::NotBuilt(Custom(Status::NotFound, NOT_BUILT_MESSAGE))
            }
        },
        None => AppFile::NotBuilt(Custom(Status::NotFound, NOT_BUILT_MESSAGE)),
    }
}

#[get("/")]
pub async fn app(c: &State<Config>) -> AppFile {
    app_index_file(c).await
}

#[get("/<path..>", rank = 10)]
pub async fn app_path(path: PathBuf, c: &State<Config>) -> AppFile {
    if let Some(root) = c.static_root() {
        let candidate = root.join(&path);
        if candidate.is_file() {
            if let Ok(file) = NamedFile::open(&candidate).await {
                return AppFile::File(file);
            }
        }
    }

    let route = format!("/{}", path.display());
    match Screen::from_path(&route) {
        Some(screen) => tracing::debug!("serving frontend for {:?}", screen),
        None => tracing::debug!("serving frontend for unknown path {}", route),
    }

    app_index_file(c).await
}

#[cfg(test)]
mod tests {
    use rocket::http::{ContentType, Status};

    use super::NOT_BUILT_MESSAGE;
    use crate::route::{test_client, test_client_with, test_config};

    #[rocket::async_test]
    async fn static_files_are_served() {
        let client = test_client().await;

        let response = client.get("/app.js").dispatch().await;

        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.content_type(), Some(ContentType::JavaScript));
        assert_eq!(
            response.into_string().await.as_deref(),
            Some("console.log('edumon');")
        );
    }

    #[rocket::async_test]
    async fn frontend_routes_fall_back_to_index() {
        let client = test_client().await;

        for uri in &["/", "/dashboard", "/classroom/7", "/not/a/screen"] {
            let response = client.get(*uri).dispatch().await;
            assert_eq!(response.status(), Status::Ok, "{}", uri);
            assert_eq!(response.content_type(), Some(ContentType::HTML), "{}", uri);
        }
    }

    #[rocket::async_test]
    async fn missing_build_reports_not_built() {
        let mut config = test_config();
        config.static_roots = vec!["./no-such-dist".into(), "./no-such-public".into()];
        let client = test_client_with(config).await;

        let response = client.get("/dashboard").dispatch().await;

        assert_eq!(response.status(), Status::NotFound);
        assert_eq!(response.into_string().await.as_deref(), Some(NOT_BUILT_MESSAGE));
    }
}
