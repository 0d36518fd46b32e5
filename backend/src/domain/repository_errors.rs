//! Translation of driven-port failures into domain errors.
//!
//! Raw adapter messages are logged here and never copied into the error
//! returned to callers.

use tracing::{debug, error};

use super::Error;
use super::ports::{
    CollectionRepositoryError, ParameterRepositoryError, RiverRepositoryError,
    UserRepositoryError,
};

fn unavailable(repository: &str, message: &str) -> Error {
    error!(repository, %message, "repository connection failed");
    Error::service_unavailable(format!("{repository} repository unavailable"))
}

fn failed_read(repository: &str, message: &str) -> Error {
    error!(repository, %message, "repository query failed");
    Error::internal(format!("{repository} repository error"))
}

fn failed_write(repository: &str, message: &str) -> Error {
    debug!(repository, %message, "repository write rejected");
    Error::invalid_request(format!("{repository} could not be stored"))
}

/// Map read failures; connection loss is `service_unavailable`, anything else
/// is `internal_error`.
pub(crate) fn river_read_error(err: RiverRepositoryError) -> Error {
    match err {
        RiverRepositoryError::Connection { message } => unavailable("river", &message),
        RiverRepositoryError::Query { message } => failed_read("river", &message),
        RiverRepositoryError::DuplicateCode { code } => duplicate_code(&code),
    }
}

/// Map write failures; rejected statements become `invalid_request`.
pub(crate) fn river_write_error(err: RiverRepositoryError) -> Error {
    match err {
        RiverRepositoryError::Connection { message } => unavailable("river", &message),
        RiverRepositoryError::Query { message } => failed_write("river", &message),
        RiverRepositoryError::DuplicateCode { code } => duplicate_code(&code),
    }
}

fn duplicate_code(code: &str) -> Error {
    Error::invalid_request(format!("a river with code {code} already exists"))
}

pub(crate) fn parameter_read_error(err: ParameterRepositoryError) -> Error {
    match err {
        ParameterRepositoryError::Connection { message } => unavailable("parameter", &message),
        ParameterRepositoryError::Query { message } => failed_read("parameter", &message),
    }
}

pub(crate) fn parameter_write_error(err: ParameterRepositoryError) -> Error {
    match err {
        ParameterRepositoryError::Connection { message } => unavailable("parameter", &message),
        ParameterRepositoryError::Query { message } => failed_write("parameter", &message),
    }
}

pub(crate) fn collection_read_error(err: CollectionRepositoryError) -> Error {
    match err {
        CollectionRepositoryError::Connection { message } => unavailable("collection", &message),
        CollectionRepositoryError::Query { message } => failed_read("collection", &message),
        CollectionRepositoryError::MissingReference { message } => missing_reference(&message),
    }
}

pub(crate) fn collection_write_error(err: CollectionRepositoryError) -> Error {
    match err {
        CollectionRepositoryError::Connection { message } => unavailable("collection", &message),
        CollectionRepositoryError::Query { message } => failed_write("collection", &message),
        CollectionRepositoryError::MissingReference { message } => missing_reference(&message),
    }
}

fn missing_reference(message: &str) -> Error {
    debug!(%message, "collection insert hit a missing reference");
    Error::not_found("river or parameter not found")
}

pub(crate) fn user_read_error(err: UserRepositoryError) -> Error {
    match err {
        UserRepositoryError::Connection { message } => unavailable("user", &message),
        UserRepositoryError::Query { message } => failed_read("user", &message),
        UserRepositoryError::DuplicateEmail { email } => duplicate_email(&email),
    }
}

pub(crate) fn user_write_error(err: UserRepositoryError) -> Error {
    match err {
        UserRepositoryError::Connection { message } => unavailable("user", &message),
        UserRepositoryError::Query { message } => failed_write("user", &message),
        UserRepositoryError::DuplicateEmail { email } => duplicate_email(&email),
    }
}

fn duplicate_email(email: &str) -> Error {
    Error::invalid_request(format!("a user with email {email} already exists"))
}
