//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Query`, `*Command`, [`Predictor`]) are what inbound
//! adapters call. Driven ports (`*Repository`) are implemented by the
//! persistence adapters and report failures through strongly typed errors
//! that services translate into [`crate::domain::Error`].

mod macros;
pub(crate) use macros::define_port_error;

mod collection_repository;
mod collections_command;
mod collections_query;
mod parameter_repository;
mod parameters_command;
mod parameters_query;
mod predictor;
mod river_repository;
mod rivers_command;
mod rivers_query;
mod user_repository;
mod users_command;
mod users_query;

#[cfg(test)]
pub use collection_repository::MockCollectionRepository;
pub use collection_repository::{CollectionRepository, CollectionRepositoryError};
#[cfg(test)]
pub use collections_command::MockCollectionsCommand;
pub use collections_command::CollectionsCommand;
#[cfg(test)]
pub use collections_query::MockCollectionsQuery;
pub use collections_query::CollectionsQuery;
#[cfg(test)]
pub use parameter_repository::MockParameterRepository;
pub use parameter_repository::{ParameterRepository, ParameterRepositoryError};
#[cfg(test)]
pub use parameters_command::MockParametersCommand;
pub use parameters_command::ParametersCommand;
#[cfg(test)]
pub use parameters_query::MockParametersQuery;
pub use parameters_query::ParametersQuery;
#[cfg(test)]
pub use predictor::MockPredictor;
pub use predictor::{Predictor, UnavailablePredictor};
#[cfg(test)]
pub use river_repository::MockRiverRepository;
pub use river_repository::{RiverRepository, RiverRepositoryError};
#[cfg(test)]
pub use rivers_command::MockRiversCommand;
pub use rivers_command::RiversCommand;
#[cfg(test)]
pub use rivers_query::MockRiversQuery;
pub use rivers_query::RiversQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::UsersCommand;
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
