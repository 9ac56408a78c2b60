use rocket::serde::json::Json;
use rocket::State;
use uuid::Uuid;

use crate::data::classroom::{ClassCatalog, Classroom};
use crate::data::store::ClassroomStore;
use crate::middleware::paging::PageState;
use crate::resp::problem::{problems, Problem};

/// Subjects, grade levels and backgrounds offered by the create-class form
#[utoipa::path(
    responses(
        (status = 200, description = "Form catalog", body = ClassCatalog),
    )
)]
#[get("/catalog")]
pub fn class_catalog() -> Json<ClassCatalog> {
    Json(ClassCatalog::default())
}

/// List created classrooms
#[utoipa::path(
    params(
        ("page" = Option<u32>, Query, description = "zero based page index"),
        ("len" = Option<u32>, Query, description = "page length, at most 100"),
    ),
    responses(
        (status = 200, description = "One page of classrooms", body = Vec<Classroom>),
    )
)]
#[get("/classrooms")]
#[tracing::instrument(skip(store))]
pub async fn classroom_list(page: PageState, store: &State<ClassroomStore>) -> Json<Vec<Classroom>> {
    Json(store.page(page).await)
}

/// Get a single classroom
#[utoipa::path(
    params(
        ("id", description = "classroom ID")
    ),
    responses(
        (status = 200, description = "The classroom", body = Classroom),
        (status = 404, description = "Queried classroom doesn't exist", body = Problem),
    )
)]
#[get("/classrooms/<id>")]
#[tracing::instrument(skip(store))]
pub async fn classroom_info(id: Uuid, store: &State<ClassroomStore>) -> Result<Json<Classroom>, Problem> {
    store
        .get(id)
        .await
        .map(Json)
        .ok_or_else(|| problems::not_found(format!("Classroom {}", id)))
}
