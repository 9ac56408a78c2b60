use rocket::serde::json::Json;
use rocket::State;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::data::store::SessionStore;
use crate::data::student::{EdumonCollection, Pet, StudentSession, PETS};
use crate::resp::problem::Problem;
use crate::screen::Screen;

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct PetChoice {
    pub pet_id: u8,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct EdumonName {
    pub name: String,
}

/// Next frontend screen for the student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Navigation {
    #[schema(value_type = String, example = "/enter-code")]
    pub route: Screen,
}

/// Starter pets offered during onboarding
#[utoipa::path(
    responses(
        (status = 200, description = "All selectable pets", body = Vec<Pet>),
    )
)]
#[get("/pets")]
pub fn pet_list() -> Json<Vec<Pet>> {
    Json(PETS.to_vec())
}

/// A fresh edumon collection
#[utoipa::path(
    responses(
        (status = 200, description = "Starter collection", body = EdumonCollection),
    )
)]
#[get("/edumon")]
pub fn edumon_collection() -> Json<EdumonCollection> {
    Json(EdumonCollection::starter())
}

/// Start a student session with no pet and the starter collection
#[utoipa::path(
    responses(
        (status = 200, description = "New session", body = StudentSession),
    )
)]
#[post("/sessions")]
#[tracing::instrument(skip(sessions))]
pub async fn session_create(sessions: &State<SessionStore>) -> Json<StudentSession> {
    Json(sessions.open().await)
}

/// Get a student session
#[utoipa::path(
    params(("id", description = "session ID")),
    responses(
        (status = 200, description = "Current session state", body = StudentSession),
        (status = 404, description = "Session doesn't exist", body = Problem),
    )
)]
#[get("/sessions/<id>")]
#[tracing::instrument(skip(sessions))]
pub async fn session_info(
    id: Uuid,
    sessions: &State<SessionStore>,
) -> Result<Json<StudentSession>, Problem> {
    Ok(Json(sessions.get(id).await?))
}

/// End a student session
#[utoipa::path(
    params(("id", description = "session ID")),
    responses(
        (status = 200, description = "ID of the ended session", body = String),
        (status = 404, description = "Session doesn't exist", body = Problem),
    )
)]
#[delete("/sessions/<id>")]
#[tracing::instrument(skip(sessions))]
pub async fn session_delete(id: Uuid, sessions: &State<SessionStore>) -> Result<String, Problem> {
    Ok(sessions.remove(id).await?.id.to_string())
}

/// Pick a pet and open the confirmation
#[utoipa::path(
    params(("id", description = "session ID")),
    request_body = PetChoice,
    responses(
        (status = 200, description = "Session awaiting confirmation", body = StudentSession),
        (status = 404, description = "Pet doesn't exist", body = Problem),
    )
)]
#[post("/sessions/<id>/pet/select", format = "json", data = "<choice>")]
#[tracing::instrument(skip(sessions))]
pub async fn pet_select(
    id: Uuid,
    choice: Json<PetChoice>,
    sessions: &State<SessionStore>,
) -> Result<Json<StudentSession>, Problem> {
    let session = sessions
        .modify(id, |session| {
            session.pets.select(choice.pet_id)?;
            Ok(session.clone())
        })
        .await?;
    Ok(Json(session))
}

/// Confirm the selected pet and start the celebration
#[utoipa::path(
    params(("id", description = "session ID")),
    responses(
        (status = 200, description = "Session with a confirmed pet", body = StudentSession),
        (status = 409, description = "No pet selected", body = Problem),
    )
)]
#[post("/sessions/<id>/pet/confirm")]
#[tracing::instrument(skip(sessions))]
pub async fn pet_confirm(
    id: Uuid,
    sessions: &State<SessionStore>,
) -> Result<Json<StudentSession>, Problem> {
    let session = sessions
        .modify(id, |session| {
            session.pets.confirm()?;
            Ok(session.clone())
        })
        .await?;
    Ok(Json(session))
}

/// Close the confirmation without choosing
#[utoipa::path(
    params(("id", description = "session ID")),
    responses((status = 200, description = "Session without a selection", body = StudentSession))
)]
#[post("/sessions/<id>/pet/cancel")]
pub async fn pet_cancel(
    id: Uuid,
    sessions: &State<SessionStore>,
) -> Result<Json<StudentSession>, Problem> {
    let session = sessions
        .modify(id, |session| {
            session.pets.cancel();
            Ok(session.clone())
        })
        .await?;
    Ok(Json(session))
}

/// Dismiss the celebration overlay
#[utoipa::path(
    params(("id", description = "session ID")),
    responses((status = 200, description = "Session after the celebration", body = StudentSession))
)]
#[post("/sessions/<id>/pet/celebration/end")]
pub async fn pet_celebration_end(
    id: Uuid,
    sessions: &State<SessionStore>,
) -> Result<Json<StudentSession>, Problem> {
    let session = sessions
        .modify(id, |session| {
            session.pets.end_celebration();
            Ok(session.clone())
        })
        .await?;
    Ok(Json(session))
}

/// Move on from pet selection
#[utoipa::path(
    params(("id", description = "session ID")),
    responses(
        (status = 200, description = "Screen to continue on", body = Navigation),
        (status = 409, description = "No pet confirmed yet", body = Problem),
    )
)]
#[post("/sessions/<id>/pet/continue")]
#[tracing::instrument(skip(sessions))]
pub async fn pet_continue(
    id: Uuid,
    sessions: &State<SessionStore>,
) -> Result<Json<Navigation>, Problem> {
    let route = sessions
        .modify(id, |session| Ok(session.pets.continue_journey()?))
        .await?;
    Ok(Json(Navigation { route }))
}

/// Leave pet selection
#[utoipa::path(
    params(("id", description = "session ID")),
    responses((status = 200, description = "Screen to go back to", body = Navigation))
)]
#[post("/sessions/<id>/pet/back")]
pub async fn pet_back(
    id: Uuid,
    sessions: &State<SessionStore>,
) -> Result<Json<Navigation>, Problem> {
    let route = sessions.modify(id, |session| Ok(session.pets.back())).await?;
    Ok(Json(Navigation { route }))
}

/// Evolve an edumon one stage, spending brain berries
#[utoipa::path(
    params(("id", description = "session ID"), ("edumon", description = "edumon ID")),
    responses(
        (status = 200, description = "Session after evolving", body = StudentSession),
        (status = 404, description = "Edumon doesn't exist", body = Problem),
        (status = 409, description = "Final stage or not enough berries", body = Problem),
    )
)]
#[post("/sessions/<id>/edumon/<edumon>/evolve")]
#[tracing::instrument(skip(sessions))]
pub async fn edumon_evolve(
    id: Uuid,
    edumon: u8,
    sessions: &State<SessionStore>,
) -> Result<Json<StudentSession>, Problem> {
    let session = sessions
        .modify(id, |session| {
            let evolved = session.edumon.evolve(edumon)?;
            tracing::debug!(edumon, stage = evolved.stage, "evolved edumon");
            Ok(session.clone())
        })
        .await?;
    Ok(Json(session))
}

/// Give an edumon a custom name; a blank name restores the default
#[utoipa::path(
    params(("id", description = "session ID"), ("edumon", description = "edumon ID")),
    request_body = EdumonName,
    responses(
        (status = 200, description = "Session after renaming", body = StudentSession),
        (status = 404, description = "Edumon doesn't exist", body = Problem),
    )
)]
#[put("/sessions/<id>/edumon/<edumon>/name", format = "json", data = "<name>")]
#[tracing::instrument(skip(sessions))]
pub async fn edumon_rename(
    id: Uuid,
    edumon: u8,
    name: Json<EdumonName>,
    sessions: &State<SessionStore>,
) -> Result<Json<StudentSession>, Problem> {
    let session = sessions
        .modify(id, |session| {
            session.edumon.rename(edumon, &name.name)?;
            Ok(session.clone())
        })
        .await?;
    Ok(Json(session))
}

/// Show the next edumon, wrapping around
#[utoipa::path(
    params(("id", description = "session ID")),
    responses((status = 200, description = "Session on the next page", body = StudentSession))
)]
#[post("/sessions/<id>/edumon/next")]
pub async fn edumon_next(
    id: Uuid,
    sessions: &State<SessionStore>,
) -> Result<Json<StudentSession>, Problem> {
    let session = sessions
        .modify(id, |session| {
            session.edumon.next_page();
            Ok(session.clone())
        })
        .await?;
    Ok(Json(session))
}

/// Show the previous edumon, wrapping around
#[utoipa::path(
    params(("id", description = "session ID")),
    responses((status = 200, description = "Session on the previous page", body = StudentSession))
)]
#[post("/sessions/<id>/edumon/prev")]
pub async fn edumon_prev(
    id: Uuid,
    sessions: &State<SessionStore>,
) -> Result<Json<StudentSession>, Problem> {
    let session = sessions
        .modify(id, |session| {
            session.edumon.prev_page();
            Ok(session.clone())
        })
        .await?;
    Ok(Json(session))
}
