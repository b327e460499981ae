//! Method and target routing.
//!
//! ```text
//! invalid start line            -> 400
//! GET  + body                   -> 400
//! GET  + nothing acceptable     -> 415
//! GET  + servable type          -> static file (200 / 404)
//! POST + wrong Content-Type     -> 400
//! POST login|register + bad body-> 400
//! POST login                    -> 200 / 404
//! POST register                 -> 201 / 500
//! POST anything else            -> 404
//! other methods                 -> 501
//! ```

use std::sync::Arc;

use thiserror::Error;
use tokio::task::JoinError;

use crate::http::mime::{self, MediaType};
use crate::http::request::{HttpRequest, Method};
use crate::http::response::{Response, StatusCode};
use crate::http::static_files::StaticFiles;
use crate::store::{CredentialStore, StoreError};

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("malformed start line")]
    MalformedStartLine,
    #[error("missing or invalid body")]
    MissingOrInvalidBody,
    #[error("unsupported media type")]
    UnsupportedMediaType,
    #[error("unknown user or wrong password")]
    UnauthorizedOrNotFound,
    #[error("no route for {0:?}")]
    NotFound(String),
    #[error("credential store failure: {0}")]
    StoreFailure(#[from] StoreError),
    #[error("credential store task failed: {0}")]
    StoreTask(#[from] JoinError),
    #[error("method {0:?} not supported")]
    MethodNotSupported(String),
}

impl DispatchError {
    pub fn status(&self) -> StatusCode {
        match self {
            DispatchError::MalformedStartLine | DispatchError::MissingOrInvalidBody => {
                StatusCode::BadRequest
            }
            DispatchError::UnsupportedMediaType => StatusCode::UnsupportedMediaType,
            DispatchError::UnauthorizedOrNotFound | DispatchError::NotFound(_) => {
                StatusCode::NotFound
            }
            DispatchError::StoreFailure(_) | DispatchError::StoreTask(_) => {
                StatusCode::InternalServerError
            }
            DispatchError::MethodNotSupported(_) => StatusCode::NotImplemented,
        }
    }
}

/// Validated `username`/`password` pair from a JSON body.
struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    fn from_request(req: &HttpRequest) -> Result<Self, DispatchError> {
        let username = req
            .body_str("username")
            .filter(|s| !s.is_empty())
            .ok_or(DispatchError::MissingOrInvalidBody)?;
        let password = req
            .body_str("password")
            .filter(|s| !s.is_empty())
            .ok_or(DispatchError::MissingOrInvalidBody)?;
        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

#[derive(Clone)]
pub struct Dispatcher {
    files: StaticFiles,
    store: Arc<dyn CredentialStore>,
}

impl Dispatcher {
    pub fn new(files: StaticFiles, store: Arc<dyn CredentialStore>) -> Self {
        Self { files, store }
    }

    /// Produces the response for one request. Never fails: every error is
    /// mapped onto a canned status response.
    pub async fn dispatch(&self, req: &HttpRequest) -> Response {
        match self.route(req).await {
            Ok(response) => response,
            Err(e) => {
                let status = e.status();
                if status == StatusCode::InternalServerError {
                    tracing::error!(error = %e, "Request failed");
                } else {
                    tracing::warn!(error = %e, status = status.as_u16(), "Request rejected");
                }
                Response::canned(status)
            }
        }
    }

    async fn route(&self, req: &HttpRequest) -> Result<Response, DispatchError> {
        if !req.is_valid() {
            return Err(DispatchError::MalformedStartLine);
        }

        match req.method() {
            Some(Method::GET) => self.handle_get(req).await,
            Some(Method::POST) => self.handle_post(req).await,
            _ => Err(DispatchError::MethodNotSupported(
                req.start_line.method.clone(),
            )),
        }
    }

    async fn handle_get(&self, req: &HttpRequest) -> Result<Response, DispatchError> {
        if req.body.is_some() {
            return Err(DispatchError::MissingOrInvalidBody);
        }

        let media = mime::negotiate(req.header("Accept"))
            .filter(MediaType::is_servable)
            .ok_or(DispatchError::UnsupportedMediaType)?;

        Ok(self.files.serve(req.target(), media).await)
    }

    async fn handle_post(&self, req: &HttpRequest) -> Result<Response, DispatchError> {
        if req.header("Content-Type") != Some(MediaType::ApplicationJson.as_str()) {
            tracing::warn!(content_type = ?req.header("Content-Type"), "Invalid Content-Type header");
            return Err(DispatchError::MissingOrInvalidBody);
        }

        match req.target().file_name.as_str() {
            "login" => {
                let creds = Credentials::from_request(req)?;
                let store = Arc::clone(&self.store);
                let username = creds.username.clone();
                let found = tokio::task::spawn_blocking(move || {
                    store.verify(&creds.username, &creds.password)
                })
                .await??;

                if !found {
                    return Err(DispatchError::UnauthorizedOrNotFound);
                }
                tracing::info!(username = %username, "User logged in");
                Ok(Response::canned(StatusCode::Ok))
            }
            "register" => {
                let creds = Credentials::from_request(req)?;
                let store = Arc::clone(&self.store);
                tokio::task::spawn_blocking(move || {
                    store.create(&creds.username, &creds.password)
                })
                .await??;
                Ok(Response::canned(StatusCode::Created))
            }
            other => Err(DispatchError::NotFound(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_error_maps_to_a_canned_status() {
        let cases = [
            (DispatchError::MalformedStartLine, 400),
            (DispatchError::MissingOrInvalidBody, 400),
            (DispatchError::UnsupportedMediaType, 415),
            (DispatchError::UnauthorizedOrNotFound, 404),
            (DispatchError::NotFound("x".into()), 404),
            (DispatchError::StoreFailure(StoreError::Poisoned), 500),
            (DispatchError::MethodNotSupported("PUT".into()), 501),
        ];

        for (err, code) in cases {
            assert_eq!(err.status().as_u16(), code, "{err}");
        }
    }
}
