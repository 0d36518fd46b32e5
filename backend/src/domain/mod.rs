//! Domain primitives, aggregates and services.
//!
//! Purpose: define the monitoring entities (rivers, parameters, collections,
//! users), their validated drafts and change sets, the read models returned by
//! analytics lookups, and the services that implement the driving ports.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic error payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - River, Parameter, Collection, User: stored entities.
//! - RiverService, ParameterService, CollectionService, UserService:
//!   driving-port implementations over the driven ports in [`ports`].

pub mod analytics;
pub mod api_key;
pub mod collection;
pub mod collection_service;
pub mod error;
pub mod lookup;
pub mod parameter;
pub mod parameter_service;
pub mod ports;
pub mod prediction;
pub(crate) mod repository_errors;
pub mod river;
pub mod river_service;
pub mod trace_id;
pub mod user;
pub mod user_service;
pub mod validation;

pub use self::analytics::{
    MeasurementPoint, MeasurementStats, ParameterCoverage, RiverCoverage, RiverParameterSeries,
    RiverParameterSummary, RiverParameterValues, RiverSample,
};
pub use self::api_key::{ApiKeyHash, ApiKeyHashError};
pub use self::collection::{Collection, CollectionDraft, CollectionFields, Measurement};
pub use self::collection_service::CollectionService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::lookup::Matches;
pub use self::parameter::{Parameter, ParameterChanges, ParameterDraft};
pub use self::parameter_service::ParameterService;
pub use self::prediction::{FEATURE_COUNT, Features, ForestError, ForestModel};
pub use self::river::{River, RiverChanges, RiverDraft};
pub use self::river_service::RiverService;
pub use self::trace_id::TraceId;
pub use self::user::{Email, NewUser, PasswordHash, User, UserDraft};
pub use self::user_service::UserService;
pub use self::validation::{FieldError, FieldErrorCode};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use riverwq::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<i32> {
///     Err(Error::not_found("nothing here"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
