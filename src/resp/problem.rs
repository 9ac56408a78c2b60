use std::io::Cursor;

use rocket::http::ContentType;
use rocket::http::Status;
use rocket::response::Responder;
use rocket::{response, Request, Response};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};
use utoipa::ToSchema;

use crate::auth::LoginError;
use crate::data::classroom::DraftError;
use crate::data::mission::EditorError;
use crate::data::student::{EvolveError, PetError, SessionError};

/// Implements [RFC7807](https://tools.ietf.org/html/rfc7807).
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Problem {
    #[serde(skip)]
    pub status: Status,
    pub type_uri: String,
    pub title: String,

    pub detail: Option<String>,
    pub instance_uri: Option<String>,

    #[schema(value_type = Object)]
    pub body: Map<String, Value>,
}

impl Default for Problem {
    fn default() -> Self {
        Problem {
            status: Status::InternalServerError,
            type_uri: "about:blank".to_string(),
            title: "Problem".to_string(),
            detail: None,
            instance_uri: None,
            body: Map::new(),
        }
    }
}

impl Problem {
    pub fn new_untyped(status: Status, title: impl ToString) -> Problem {
        Problem {
            status,
            type_uri: "about:blank".to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    pub fn detail(&mut self, value: impl ToString) -> &mut Problem {
        self.detail = Some(value.to_string());
        self
    }

    pub fn instance_uri(&mut self, value: String) -> &mut Problem {
        self.instance_uri = Some(value);
        self
    }

    pub fn insert_str(&mut self, key: impl ToString, value: impl ToString) -> &mut Problem {
        self.body
            .insert(key.to_string(), Value::String(value.to_string()));
        self
    }

    /// The JSON document sent to clients.
    pub fn to_json(&self) -> Value {
        let mut body = self.body.clone();

        // Following are required by rfc7807
        body.insert(String::from("type"), Value::from(self.type_uri.clone()));
        body.insert(String::from("title"), Value::from(self.title.clone()));

        // Optional parameters as specified by rfc7807
        if let Some(detail) = &self.detail {
            body.insert(String::from("detail"), Value::from(detail.clone()));
        }
        body.insert(String::from("status"), Value::from(self.status.code));
        if let Some(instance) = &self.instance_uri {
            body.insert(String::from("instance"), Value::from(instance.clone()));
        }

        Value::Object(body)
    }
}

impl Display for Problem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.title)
    }
}

impl std::error::Error for Problem {}

impl<'r> Responder<'r, 'static> for Problem {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let body_string = self.to_json().to_string();

        Response::build()
            .status(self.status)
            .header(ContentType::new("application", "problem+json"))
            .raw_header("Content-Language", "en")
            .sized_body(body_string.len(), Cursor::new(body_string))
            .ok()
    }
}

pub mod problems {
    use crate::resp::problem::Problem;
    use rocket::http::Status;

    #[inline]
    pub fn parse_problem() -> Problem {
        Problem::new_untyped(
            Status::BadRequest,
            "There was a problem parsing part of the request.",
        )
    }

    #[inline]
    pub fn unprocessable() -> Problem {
        Problem::new_untyped(
            Status::UnprocessableEntity,
            "The request body doesn't match the expected shape.",
        )
    }

    #[inline]
    pub fn not_found(what: impl ToString) -> Problem {
        Problem::new_untyped(Status::NotFound, format!("{} doesn't exist.", what.to_string()))
    }
}

impl From<EditorError> for Problem {
    fn from(e: EditorError) -> Self {
        let status = match e {
            EditorError::EmptyTitle | EditorError::InvalidPassingScore(_) => Status::BadRequest,
            EditorError::NotEditing => Status::Conflict,
            EditorError::MissionNotFound(_) | EditorError::ContentNotFound(_) => {
                Status::NotFound
            }
        };
        Problem::new_untyped(status, e)
    }
}

impl From<DraftError> for Problem {
    fn from(e: DraftError) -> Self {
        match e {
            DraftError::Editor(inner) => Problem::from(inner),
            DraftError::NotFound(id) => {
                Problem::new_untyped(Status::NotFound, format!("Draft {} doesn't exist.", id))
                    .insert_str("id", id)
                    .to_owned()
            }
            DraftError::MissingName
            | DraftError::MissingSubject
            | DraftError::UnknownBackground(_) => Problem::new_untyped(Status::BadRequest, e),
        }
    }
}

impl From<LoginError> for Problem {
    fn from(e: LoginError) -> Self {
        let status = match e {
            LoginError::MissingCredentials => Status::BadRequest,
            LoginError::Rejected(_) => Status::Unauthorized,
            LoginError::Server => Status::BadGateway,
        };
        Problem::new_untyped(status, e)
    }
}

impl From<SessionError> for Problem {
    fn from(e: SessionError) -> Self {
        let status = match &e {
            SessionError::NotFound(_)
            | SessionError::Pet(PetError::UnknownPet(_))
            | SessionError::Evolve(EvolveError::UnknownEdumon(_)) => Status::NotFound,
            SessionError::Pet(_) | SessionError::Evolve(_) => Status::Conflict,
        };
        let mut problem = Problem::new_untyped(status, &e);
        if let SessionError::Evolve(EvolveError::NotEnoughBerries { needed, available }) = e {
            problem
                .insert_str("needed", needed)
                .insert_str("available", available);
        }
        problem
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn json_carries_rfc7807_members() {
        let problem = Problem::new_untyped(Status::Conflict, "No mission is being edited.")
            .detail("open a mission first")
            .to_owned();

        let json = problem.to_json();

        assert_eq!(json["type"], "about:blank");
        assert_eq!(json["title"], "No mission is being edited.");
        assert_eq!(json["status"], 409);
        assert_eq!(json["detail"], "open a mission first");
        assert!(json.get("instance").is_none());
    }

    #[test]
    fn domain_errors_map_to_statuses() {
        let id = Uuid::new_v4();

        assert_eq!(Problem::from(EditorError::EmptyTitle).status, Status::BadRequest);
        assert_eq!(Problem::from(EditorError::NotEditing).status, Status::Conflict);
        assert_eq!(
            Problem::from(DraftError::Editor(EditorError::ContentNotFound(id))).status,
            Status::NotFound
        );
        assert_eq!(Problem::from(DraftError::MissingName).status, Status::BadRequest);
        assert_eq!(
            Problem::from(LoginError::Rejected("nope".to_string())).status,
            Status::Unauthorized
        );
        assert_eq!(Problem::from(LoginError::Server).status, Status::BadGateway);
    }

    #[test]
    fn session_errors_map_to_statuses() {
        assert_eq!(
            Problem::from(SessionError::Pet(PetError::UnknownPet(9))).status,
            Status::NotFound
        );
        assert_eq!(
            Problem::from(SessionError::Pet(PetError::NotConfirmed)).status,
            Status::Conflict
        );

        let problem = Problem::from(SessionError::Evolve(EvolveError::NotEnoughBerries {
            needed: 100,
            available: 40,
        }));
        assert_eq!(problem.status, Status::Conflict);
        assert_eq!(problem.body["needed"], "100");
        assert_eq!(problem.body["available"], "40");
    }

    #[test]
    fn missing_draft_reports_its_id() {
        let id = Uuid::new_v4();
        let problem = Problem::from(DraftError::NotFound(id));

        assert_eq!(problem.status, Status::NotFound);
        assert_eq!(problem.body["id"], id.to_string());
    }
}
