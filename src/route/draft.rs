use chrono::{DateTime, Utc};
use rocket::serde::json::Json;
use rocket::State;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::data::classroom::draft::ClassroomFields;
use crate::data::classroom::{ClassroomDraft, ClassroomFieldsUpdate, Classroom};
use crate::data::mission::{
    ContentKind, ContentUpdate, EditorMode, FileRef, Mission, MissionContent, MissionDraft,
    MissionDraftUpdate, MoveDirection,
};
use crate::data::store::{ClassroomStore, DraftStore};
use crate::resp::problem::Problem;

/// Client view of a classroom draft and its mission editor.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DraftView {
    pub id: Uuid,
    pub fields: ClassroomFields,
    pub missions: Vec<Mission>,
    #[schema(value_type = Object)]
    pub editor: EditorMode,
    /// Present while a mission is being created or edited.
    pub mission_draft: Option<MissionDraft>,
    pub started: DateTime<Utc>,
}

impl From<&ClassroomDraft> for DraftView {
    fn from(draft: &ClassroomDraft) -> Self {
        DraftView {
            id: draft.id,
            fields: draft.fields.clone(),
            missions: draft.editor.missions().to_vec(),
            editor: draft.editor.mode(),
            mission_draft: if draft.editor.is_editing() {
                Some(draft.editor.draft().clone())
            } else {
                None
            },
            started: draft.started,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct NewContent {
    pub kind: ContentKind,
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct MoveRequest {
    pub direction: MoveDirection,
}

/// Start a new classroom draft
#[utoipa::path(
    responses(
        (status = 200, description = "Blank draft with form defaults", body = DraftView),
    )
)]
#[post("/drafts")]
#[tracing::instrument(skip(drafts))]
pub async fn draft_create(drafts: &State<DraftStore>) -> Json<DraftView> {
    let draft = drafts.open().await;
    Json(DraftView::from(&draft))
}

/// Get a classroom draft
#[utoipa::path(
    params(("id", description = "draft ID")),
    responses(
        (status = 200, description = "Current draft state", body = DraftView),
        (status = 404, description = "Draft doesn't exist", body = Problem),
    )
)]
#[get("/drafts/<id>")]
#[tracing::instrument(skip(drafts))]
pub async fn draft_info(id: Uuid, drafts: &State<DraftStore>) -> Result<Json<DraftView>, Problem> {
    let draft = drafts.get(id).await?;
    Ok(Json(DraftView::from(&draft)))
}

/// Update classroom fields of a draft
#[utoipa::path(
    params(("id", description = "draft ID")),
    request_body = ClassroomFieldsUpdate,
    responses(
        (status = 200, description = "Updated draft", body = DraftView),
        (status = 400, description = "Unknown background", body = Problem),
        (status = 404, description = "Draft doesn't exist", body = Problem),
    )
)]
#[patch("/drafts/<id>", format = "json", data = "<update>")]
#[tracing::instrument(skip(drafts))]
pub async fn draft_update(
    id: Uuid,
    update: Json<ClassroomFieldsUpdate>,
    drafts: &State<DraftStore>,
) -> Result<Json<DraftView>, Problem> {
    let view = drafts
        .modify(id, |draft| {
            draft.update(update.into_inner())?;
            Ok(DraftView::from(&*draft))
        })
        .await?;
    Ok(Json(view))
}

/// Add one student to the planned class size
#[utoipa::path(
    params(("id", description = "draft ID")),
    responses((status = 200, description = "Updated draft", body = DraftView))
)]
#[post("/drafts/<id>/students/increment")]
pub async fn draft_students_increment(
    id: Uuid,
    drafts: &State<DraftStore>,
) -> Result<Json<DraftView>, Problem> {
    let view = drafts
        .modify(id, |draft| {
            draft.increment_students();
            Ok(DraftView::from(&*draft))
        })
        .await?;
    Ok(Json(view))
}

/// Remove one student from the planned class size
#[utoipa::path(
    params(("id", description = "draft ID")),
    responses((status = 200, description = "Updated draft", body = DraftView))
)]
#[post("/drafts/<id>/students/decrement")]
pub async fn draft_students_decrement(
    id: Uuid,
    drafts: &State<DraftStore>,
) -> Result<Json<DraftView>, Problem> {
    let view = drafts
        .modify(id, |draft| {
            draft.decrement_students();
            Ok(DraftView::from(&*draft))
        })
        .await?;
    Ok(Json(view))
}

/// Discard a draft
#[utoipa::path(
    params(("id", description = "draft ID")),
    responses(
        (status = 200, description = "ID of the discarded draft", body = String),
        (status = 404, description = "Draft doesn't exist", body = Problem),
    )
)]
#[delete("/drafts/<id>")]
#[tracing::instrument(skip(drafts))]
pub async fn draft_delete(id: Uuid, drafts: &State<DraftStore>) -> Result<String, Problem> {
    let removed = drafts.remove(id).await?;
    Ok(removed.id.to_string())
}

/// Create the classroom described by a draft
#[utoipa::path(
    params(("id", description = "draft ID")),
    responses(
        (status = 200, description = "Created classroom", body = Classroom),
        (status = 400, description = "Missing class name or subject", body = Problem),
        (status = 404, description = "Draft doesn't exist", body = Problem),
    )
)]
#[post("/drafts/<id>/submit")]
#[tracing::instrument(skip(drafts, classrooms))]
pub async fn draft_submit(
    id: Uuid,
    drafts: &State<DraftStore>,
    classrooms: &State<ClassroomStore>,
) -> Result<Json<Classroom>, Problem> {
    let classroom = drafts.submit(id, classrooms).await?;
    Ok(Json(classroom))
}

/// Start creating a new mission
#[utoipa::path(
    params(("id", description = "draft ID")),
    responses((status = 200, description = "Draft in creating mode", body = DraftView))
)]
#[post("/drafts/<id>/missions")]
#[tracing::instrument(skip(drafts))]
pub async fn mission_create(id: Uuid, drafts: &State<DraftStore>) -> Result<Json<DraftView>, Problem> {
    let view = drafts
        .modify(id, |draft| {
            draft.editor.create();
            Ok(DraftView::from(&*draft))
        })
        .await?;
    Ok(Json(view))
}

/// Load a saved mission into the editor
#[utoipa::path(
    params(("id", description = "draft ID"), ("mission", description = "mission ID")),
    responses(
        (status = 200, description = "Draft in editing mode", body = DraftView),
        (status = 404, description = "Mission doesn't exist", body = Problem),
    )
)]
#[post("/drafts/<id>/missions/<mission>/edit")]
#[tracing::instrument(skip(drafts))]
pub async fn mission_edit(
    id: Uuid,
    mission: Uuid,
    drafts: &State<DraftStore>,
) -> Result<Json<DraftView>, Problem> {
    let view = drafts
        .modify(id, |draft| {
            draft.editor.edit(mission)?;
            Ok(DraftView::from(&*draft))
        })
        .await?;
    Ok(Json(view))
}

/// Delete a saved mission
#[utoipa::path(
    params(("id", description = "draft ID"), ("mission", description = "mission ID")),
    responses(
        (status = 200, description = "Draft without the mission", body = DraftView),
        (status = 404, description = "Mission doesn't exist", body = Problem),
    )
)]
#[delete("/drafts/<id>/missions/<mission>")]
#[tracing::instrument(skip(drafts))]
pub async fn mission_delete(
    id: Uuid,
    mission: Uuid,
    drafts: &State<DraftStore>,
) -> Result<Json<DraftView>, Problem> {
    let view = drafts
        .modify(id, |draft| {
            draft.editor.delete(mission)?;
            Ok(DraftView::from(&*draft))
        })
        .await?;
    Ok(Json(view))
}

/// Update title, description or settings of the mission under edit
#[utoipa::path(
    params(("id", description = "draft ID")),
    request_body = MissionDraftUpdate,
    responses(
        (status = 200, description = "Updated draft", body = DraftView),
        (status = 409, description = "No mission is being edited", body = Problem),
    )
)]
#[patch("/drafts/<id>/mission", format = "json", data = "<update>")]
#[tracing::instrument(skip(drafts))]
pub async fn mission_update(
    id: Uuid,
    update: Json<MissionDraftUpdate>,
    drafts: &State<DraftStore>,
) -> Result<Json<DraftView>, Problem> {
    let view = drafts
        .modify(id, |draft| {
            draft.editor.update_draft(update.into_inner())?;
            Ok(DraftView::from(&*draft))
        })
        .await?;
    Ok(Json(view))
}

/// Save the mission under edit
#[utoipa::path(
    params(("id", description = "draft ID")),
    responses(
        (status = 200, description = "Saved mission", body = Mission),
        (status = 400, description = "Missing title or invalid settings", body = Problem),
        (status = 409, description = "No mission is being edited", body = Problem),
    )
)]
#[post("/drafts/<id>/mission/save")]
#[tracing::instrument(skip(drafts))]
pub async fn mission_save(id: Uuid, drafts: &State<DraftStore>) -> Result<Json<Mission>, Problem> {
    let mission = drafts
        .modify(id, |draft| Ok(draft.editor.save()?.clone()))
        .await?;
    Ok(Json(mission))
}

/// Throw away the mission under edit
#[utoipa::path(
    params(("id", description = "draft ID")),
    responses((status = 200, description = "Draft back in idle mode", body = DraftView))
)]
#[post("/drafts/<id>/mission/cancel")]
#[tracing::instrument(skip(drafts))]
pub async fn mission_cancel(id: Uuid, drafts: &State<DraftStore>) -> Result<Json<DraftView>, Problem> {
    let view = drafts
        .modify(id, |draft| {
            draft.editor.cancel();
            Ok(DraftView::from(&*draft))
        })
        .await?;
    Ok(Json(view))
}

/// Append a content item to the mission under edit
#[utoipa::path(
    params(("id", description = "draft ID")),
    request_body = NewContent,
    responses(
        (status = 200, description = "New content item", body = MissionContent),
        (status = 409, description = "No mission is being edited", body = Problem),
    )
)]
#[post("/drafts/<id>/mission/content", format = "json", data = "<content>")]
#[tracing::instrument(skip(drafts))]
pub async fn content_add(
    id: Uuid,
    content: Json<NewContent>,
    drafts: &State<DraftStore>,
) -> Result<Json<MissionContent>, Problem> {
    let added = drafts
        .modify(id, |draft| Ok(draft.editor.add_content(content.kind)?.clone()))
        .await?;
    Ok(Json(added))
}

/// Merge fields into a content item
#[utoipa::path(
    params(("id", description = "draft ID"), ("content", description = "content ID")),
    request_body = ContentUpdate,
    responses(
        (status = 200, description = "Updated content item", body = MissionContent),
        (status = 404, description = "Content doesn't exist", body = Problem),
    )
)]
#[patch("/drafts/<id>/mission/content/<content>", format = "json", data = "<update>")]
#[tracing::instrument(skip(drafts))]
pub async fn content_update(
    id: Uuid,
    content: Uuid,
    update: Json<ContentUpdate>,
    drafts: &State<DraftStore>,
) -> Result<Json<MissionContent>, Problem> {
    let updated = drafts
        .modify(id, |draft| {
            Ok(draft
                .editor
                .update_content(content, update.into_inner())?
                .clone())
        })
        .await?;
    Ok(Json(updated))
}

/// Attach an uploaded file to a content item
#[utoipa::path(
    params(("id", description = "draft ID"), ("content", description = "content ID")),
    request_body = FileRef,
    responses(
        (status = 200, description = "Content item titled after the file", body = MissionContent),
        (status = 404, description = "Content doesn't exist", body = Problem),
    )
)]
#[put("/drafts/<id>/mission/content/<content>/file", format = "json", data = "<file>")]
#[tracing::instrument(skip(drafts))]
pub async fn content_attach_file(
    id: Uuid,
    content: Uuid,
    file: Json<FileRef>,
    drafts: &State<DraftStore>,
) -> Result<Json<MissionContent>, Problem> {
    let updated = drafts
        .modify(id, |draft| {
            Ok(draft.editor.attach_file(content, file.into_inner())?.clone())
        })
        .await?;
    Ok(Json(updated))
}

/// Remove a content item
#[utoipa::path(
    params(("id", description = "draft ID"), ("content", description = "content ID")),
    responses(
        (status = 200, description = "Draft without the item", body = DraftView),
        (status = 404, description = "Content doesn't exist", body = Problem),
    )
)]
#[delete("/drafts/<id>/mission/content/<content>")]
#[tracing::instrument(skip(drafts))]
pub async fn content_remove(
    id: Uuid,
    content: Uuid,
    drafts: &State<DraftStore>,
) -> Result<Json<DraftView>, Problem> {
    let view = drafts
        .modify(id, |draft| {
            draft.editor.remove_content(content)?;
            Ok(DraftView::from(&*draft))
        })
        .await?;
    Ok(Json(view))
}

/// Move a content item one place up or down
#[utoipa::path(
    params(("id", description = "draft ID"), ("content", description = "content ID")),
    request_body = MoveRequest,
    responses(
        (status = 200, description = "Draft with reordered content", body = DraftView),
        (status = 404, description = "Content doesn't exist", body = Problem),
    )
)]
#[post("/drafts/<id>/mission/content/<content>/move", format = "json", data = "<request>")]
#[tracing::instrument(skip(drafts))]
pub async fn content_move(
    id: Uuid,
    content: Uuid,
    request: Json<MoveRequest>,
    drafts: &State<DraftStore>,
) -> Result<Json<DraftView>, Problem> {
    let view = drafts
        .modify(id, |draft| {
            draft.editor.move_content(content, request.direction)?;
            Ok(DraftView::from(&*draft))
        })
        .await?;
    Ok(Json(view))
}
