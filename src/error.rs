use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use rocket::response::{Responder, Response};
use rocket::{
    http::{ContentType, Status},
    response,
    serde::json::Json,
    Request,
};
use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct ApiError {
    err: String,
}

impl ApiError {
    pub(crate) fn new(err: String) -> ApiError {
        ApiError { err }
    }
}

#[derive(Debug)]
pub(crate) struct ErrorResponse<T = ApiError> {
    json: Json<T>,
    status: Status,
}

impl ErrorResponse<ApiError> {
    pub(crate) fn new(status: Status, err: String) -> ErrorResponse<ApiError> {
        ErrorResponse {
            json: Json(ApiError { err }),
            status,
        }
    }
}

#[cfg(test)]
impl<T> ErrorResponse<T> {
    pub(crate) fn status(&self) -> Status {
        self.status
    }
}

#[cfg(test)]
impl ErrorResponse<ApiError> {
    pub(crate) fn message(&self) -> &str {
        &self.json.err
    }
}

impl From<DieselError> for ErrorResponse {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => {
                ErrorResponse::new(Status { code: 404 }, "Not found".to_string())
            }
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                ErrorResponse::new(Status { code: 409 }, info.message().to_string())
            }
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                ErrorResponse::new(
                    Status { code: 422 },
                    "Referenced record doesn't exist".to_string(),
                )
            }
            err => {
                tracing::error!(%err, "database error");
                ErrorResponse::new(
                    Status { code: 500 },
                    format!("Database error: {}", err),
                )
            }
        }
    }
}

impl<'r, T: serde::Serialize> Responder<'r, 'static> for ErrorResponse<T> {
    fn respond_to(self, req: &'r Request) -> response::Result<'static> {
        Response::build_from(self.json.respond_to(req)?)
            .status(self.status)
            .header(ContentType::JSON)
            .ok()
    }
}

#[catch(401)]
pub(crate) fn unauthorised() -> ErrorResponse {
    ErrorResponse::new(Status { code: 401 }, "Login required".to_string())
}

#[catch(default)]
pub(crate) fn default_catcher(status: Status, _req: &Request) -> ErrorResponse {
    ErrorResponse::new(status, status.reason_lossy().to_string())
}
