use std::collections::BTreeMap;

use rocket::{Build, Rocket, Route};

pub mod classroom;
pub mod draft;
pub mod files;
pub mod login;
pub mod status;
pub mod student;

use classroom::*;
use draft::*;
use files::*;
use login::*;
use status::*;
use student::*;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{AuthUser, Credentials, Landing},
    data::{
        classroom::{
            draft::ClassroomFields, Background, ClassCatalog, ClassOptions, ClassVisibility,
            Classroom, ClassroomFieldsUpdate,
        },
        mission::{
            ContentKind, ContentUpdate, FileRef, Mission, MissionContent, MissionDraft,
            MissionDraftUpdate, MissionSettings, MoveDirection,
        },
        student::{edumon::Edumon, EdumonCollection, Pet, PetSelector, StudentSession},
    },
    resp::problem::Problem,
    role::Role,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        hello,
        class_catalog,
        classroom_list,
        classroom_info,
        draft_create,
        draft_info,
        draft_update,
        draft_students_increment,
        draft_students_decrement,
        draft_delete,
        draft_submit,
        mission_create,
        mission_edit,
        mission_delete,
        mission_update,
        mission_save,
        mission_cancel,
        content_add,
        content_update,
        content_attach_file,
        content_remove,
        content_move,
        login_submit,
        signup_submit,
        pet_list,
        edumon_collection,
        session_create,
        session_info,
        session_delete,
        pet_select,
        pet_confirm,
        pet_cancel,
        pet_celebration_end,
        pet_continue,
        pet_back,
        edumon_evolve,
        edumon_rename,
        edumon_next,
        edumon_prev
    ),
    components(schemas(
        Role,
        HealthResponse,
        HelloResponse,
        ClassCatalog,
        Background,
        ClassVisibility,
        ClassOptions,
        Classroom,
        ClassroomFields,
        ClassroomFieldsUpdate,
        DraftView,
        NewContent,
        MoveRequest,
        ContentKind,
        ContentUpdate,
        FileRef,
        Mission,
        MissionContent,
        MissionDraft,
        MissionDraftUpdate,
        MissionSettings,
        MoveDirection,
        Credentials,
        AuthUser,
        Landing,
        Pet,
        Edumon,
        EdumonCollection,
        PetSelector,
        StudentSession,
        PetChoice,
        EdumonName,
        Navigation,
        Problem
    )),
    modifiers(&V1_PREFIX)
)]
pub struct ApiDocV1;

/// Prefixes every path that isn't already under `/api`.
pub struct PathPrefix(pub &'static str);
static V1_PREFIX: PathPrefix = PathPrefix("/api/v1");

impl utoipa::Modify for PathPrefix {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut new_paths = BTreeMap::new();

        for (path, item) in std::mem::take(&mut openapi.paths.paths) {
            if path.starts_with("/api/") {
                new_paths.insert(path, item);
            } else {
                new_paths.insert(self.0.to_string() + path.as_ref(), item);
            }
        }

        openapi.paths.paths = new_paths;
    }
}

pub fn api_v1() -> Vec<Route> {
    routes![
        class_catalog,
        classroom_list,
        classroom_info,
        draft_create,
        draft_info,
        draft_update,
        draft_students_increment,
        draft_students_decrement,
        draft_delete,
        draft_submit,
        mission_create,
        mission_edit,
        mission_delete,
        mission_update,
        mission_save,
        mission_cancel,
        content_add,
        content_update,
        content_attach_file,
        content_remove,
        content_move,
        login_submit,
        signup_submit,
        pet_list,
        edumon_collection,
        session_create,
        session_info,
        session_delete,
        pet_select,
        pet_confirm,
        pet_cancel,
        pet_celebration_end,
        pet_continue,
        pet_back,
        edumon_evolve,
        edumon_rename,
        edumon_next,
        edumon_prev
    ]
}

pub fn mount_api(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket
        .mount("/api", routes![health, hello, api_not_found])
        .mount("/api/v1", api_v1())
        .mount(
            "/",
            SwaggerUi::new("/swagger/<_..>").url("/api/v1/openapi.json", ApiDocV1::openapi()),
        )
        .mount("/", routes![app, app_path])
        .register("/api", catchers![api_not_found_catcher, bad_request, unprocessable])
        .register("/", catchers![internal_error])
}

#[cfg(test)]
pub(crate) fn test_config() -> crate::config::Config {
    let root = std::env::temp_dir().join(format!("edumon-static-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&root).expect("unable to create static root");
    std::fs::write(
        root.join("index.html"),
        "<!doctype html><html><body><div id=\"root\"></div></body></html>",
    )
    .expect("unable to write index.html");
    std::fs::write(root.join("app.js"), "console.log('edumon');").expect("unable to write app.js");

    let mut config = crate::config::Config::default();
    config.environment = "test".to_string();
    config.static_roots = vec![root];
    config
}

#[cfg(test)]
pub(crate) async fn test_client_using(
    config: crate::config::Config,
    api: impl crate::auth::AuthApi + 'static,
) -> rocket::local::asynchronous::Client {
    let rocket = crate::build(config, crate::auth::AuthBackend::new(api))
        .expect("unable to build rocket");
    rocket::local::asynchronous::Client::tracked(rocket)
        .await
        .expect("valid rocket instance")
}

#[cfg(test)]
pub(crate) async fn test_client_with(
    config: crate::config::Config,
) -> rocket::local::asynchronous::Client {
    test_client_using(config, crate::auth::stub::StubAuthApi::failing()).await
}

#[cfg(test)]
pub(crate) async fn test_client() -> rocket::local::asynchronous::Client {
    test_client_with(test_config()).await
}
