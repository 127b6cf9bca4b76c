//! Error types for the `domain` layer.
use entity_api::error::{EntityApiErrorKind, Error as EntityApiError};
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure
/// with `domain::error::Error` as the root type holding a tree of `error_kind`
/// enums that represent the kinds of errors that can occur in the domain layer or
/// in lower layers. The `source` field is used to hold the original error that caused
/// the domain error. The intent is to translate errors between layers while maintaining
/// layer boundaries: `domain` depends on `entity_api`, and `web` depends on `domain`,
/// but `web` should not depend, directly, on `entity_api`. The various `error_kind`s are
/// ultimately used by `web` to return appropriate HTTP status codes and messages to the client.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    Internal(InternalErrorKind),
    External(ExternalErrorKind),
}

/// Enum representing the various kinds of internal errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    Entity(EntityErrorKind),
    /// Caller-input rejection; the message is surfaced verbatim to the caller.
    Validation(String),
    Config(String),
    Other(String),
}

/// Enum representing the various kinds of entity errors that can bubble up from the "Entity"
/// layer (`entity_api` and `entity`). These errors are translated from the `entity_api` layer
/// and reduced to the subset of kinds that are relevant here.
#[derive(Debug, PartialEq)]
pub enum EntityErrorKind {
    /// Carries the missing resource's display name ("Meeting", "Translation").
    NotFound(String),
    Unavailable,
    Other(String),
}

/// Enum representing the various kinds of external errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum ExternalErrorKind {
    Network,
    /// Remote AI provider reported a failure for this request.
    Provider(String),
    Other(String),
}

impl Error {
    /// A caller-input rejection that never reaches a remote capability or the store.
    pub fn validation(message: impl Into<String>) -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Validation(message.into())),
        }
    }

    /// A terminal "no such resource" error named after the missing resource.
    pub fn not_found(resource: &str) -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(
                EntityErrorKind::NotFound(resource.to_string()),
            )),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Config(message.into())),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Domain Error: {self:?}")
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

// This is where we translate errors from the `entity_api` layer to the `domain` layer.
impl From<EntityApiError> for Error {
    fn from(err: EntityApiError) -> Self {
        let entity_error_kind = match err.error_kind {
            EntityApiErrorKind::RecordNotFound => EntityErrorKind::NotFound("Record".to_string()),
            EntityApiErrorKind::SystemError => EntityErrorKind::Unavailable,
            _ => EntityErrorKind::Other("EntityApiErrorKind".to_string()),
        };

        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(entity_error_kind)),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // Errors that result from issues building the reqwest::Client instance. This
        // type of error will occur prior to any network calls being made.
        if err.is_builder() {
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                    "Failed to build reqwest client".to_string(),
                )),
            }
        // Errors that result from issues with the network call itself.
        } else {
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
            }
        }
    }
}

// Remote AI capability failures are translated here. The provider crate's
// universal variants are reduced to the three kinds `web` can act on.
impl From<notes_ai::Error> for Error {
    fn from(err: notes_ai::Error) -> Self {
        let error_kind = match &err {
            notes_ai::Error::Network(_) | notes_ai::Error::Timeout(_) => {
                DomainErrorKind::External(ExternalErrorKind::Network)
            }
            notes_ai::Error::RateLimited {
                retry_after_seconds,
            } => DomainErrorKind::External(ExternalErrorKind::Provider(format!(
                "rate limited; retry after {retry_after_seconds}s"
            ))),
            notes_ai::Error::Authentication(msg) | notes_ai::Error::Provider(msg) => {
                DomainErrorKind::External(ExternalErrorKind::Provider(msg.clone()))
            }
            notes_ai::Error::Deserialization(msg) => {
                DomainErrorKind::External(ExternalErrorKind::Other(msg.clone()))
            }
            notes_ai::Error::Configuration(msg) => {
                DomainErrorKind::Internal(InternalErrorKind::Config(msg.clone()))
            }
            notes_ai::Error::Other(_) => DomainErrorKind::External(ExternalErrorKind::Other(
                "provider error".to_string(),
            )),
        };
        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}
