//! Test utilities for the crate.
//!
//! [`InMemoryMonitoringStore`] implements every driven repository port over a
//! single mutex-guarded state, mirroring the database constraints that matter
//! to the services: unique river codes and emails, foreign keys on
//! collections, and cascading parameter deletes. Integration tests wire it
//! through the real services with [`InMemoryMonitoringStore::http_state`].

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    CollectionRepository, CollectionRepositoryError, ParameterRepository,
    ParameterRepositoryError, Predictor, RiverRepository, RiverRepositoryError, UserRepository,
    UserRepositoryError,
};
use crate::domain::{
    ApiKeyHash, Collection, CollectionDraft, CollectionService, MeasurementPoint,
    MeasurementStats, NewUser, Parameter, ParameterChanges, ParameterDraft, ParameterService,
    PasswordHash, River, RiverChanges, RiverDraft, RiverSample, RiverService, User, UserService,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

const POISONED: &str = "in-memory store lock poisoned";

#[derive(Debug, Default)]
struct StoreState {
    rivers: Vec<River>,
    parameters: Vec<Parameter>,
    collections: Vec<Collection>,
    users: Vec<(User, PasswordHash)>,
    next_id: i32,
}

impl StoreState {
    fn allocate_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn river(&self, id: i32) -> Option<&River> {
        self.rivers.iter().find(|river| river.id == id)
    }

    fn parameter(&self, id: i32) -> Option<&Parameter> {
        self.parameters.iter().find(|parameter| parameter.id == id)
    }

    /// Values of one parameter measured on one river, in insertion order.
    fn measurements(
        &self,
        river_id: i32,
        parameter_id: i32,
    ) -> impl Iterator<Item = (&Collection, f64)> {
        self.collections
            .iter()
            .filter(move |collection| collection.river_id == river_id)
            .flat_map(move |collection| {
                collection
                    .measurements
                    .iter()
                    .filter(move |measurement| measurement.parameter_id == parameter_id)
                    .map(move |measurement| (collection, measurement.value))
            })
    }
}

/// Mean, maximum and minimum, or `None` for no values.
#[expect(clippy::float_arithmetic, reason = "the in-memory store computes AVG itself")]
fn summarise(values: &[f64]) -> Option<MeasurementStats> {
    if values.is_empty() {
        return None;
    }
    let (sum, count) = values
        .iter()
        .fold((0.0, 0.0), |(total, seen), value| (total + value, seen + 1.0));
    Some(MeasurementStats {
        mean: sum / count,
        maximum: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        minimum: values.iter().copied().fold(f64::INFINITY, f64::min),
    })
}

fn contains_ignoring_case(haystack: &str, fragment: &str) -> bool {
    haystack.to_lowercase().contains(&fragment.to_lowercase())
}

/// Shared in-memory backing store for all repositories.
#[derive(Debug, Default)]
pub struct InMemoryMonitoringStore {
    state: Mutex<StoreState>,
}

impl InMemoryMonitoringStore {
    /// Empty store, shared so one instance can back every port.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, &'static str> {
        self.state.lock().map_err(|_| POISONED)
    }

    /// Stored password digest for `email`, if such a user exists.
    #[must_use]
    pub fn password_hash_for(&self, email: &str) -> Option<PasswordHash> {
        let state = self.lock().ok()?;
        state
            .users
            .iter()
            .find(|(user, _)| user.email.as_str() == email)
            .map(|(_, hash)| hash.clone())
    }

    /// HTTP state running the real services over this store.
    #[must_use]
    pub fn http_state(
        self: &Arc<Self>,
        api_key: &str,
        predictor: Arc<dyn Predictor>,
    ) -> HttpState {
        let rivers = Arc::new(RiverService::new(
            Arc::clone(self),
            Arc::clone(self),
            Arc::clone(self),
        ));
        let parameters = Arc::new(ParameterService::new(Arc::clone(self)));
        let collections = Arc::new(CollectionService::new(
            Arc::clone(self),
            Arc::clone(self),
            Arc::clone(self),
        ));
        let users = Arc::new(UserService::new(Arc::clone(self)));
        let ports = HttpStatePorts {
            rivers: rivers.clone(),
            rivers_command: rivers,
            parameters: parameters.clone(),
            parameters_command: parameters,
            collections: collections.clone(),
            collections_command: collections,
            users: users.clone(),
            users_command: users,
            predictor,
        };
        HttpState::new(ports, ApiKeyHash::of_key(api_key))
    }
}

#[async_trait]
impl RiverRepository for InMemoryMonitoringStore {
    async fn list(&self) -> Result<Vec<River>, RiverRepositoryError> {
        let state = self.lock().map_err(RiverRepositoryError::connection)?;
        Ok(state.rivers.clone())
    }

    async fn create(&self, draft: &RiverDraft) -> Result<River, RiverRepositoryError> {
        let mut state = self.lock().map_err(RiverRepositoryError::connection)?;
        if state.rivers.iter().any(|river| river.code == draft.code()) {
            return Err(RiverRepositoryError::duplicate_code(draft.code()));
        }
        let river = River {
            id: state.allocate_id(),
            name: draft.name().to_owned(),
            code: draft.code().to_owned(),
            description: draft.description().to_owned(),
        };
        state.rivers.push(river.clone());
        Ok(river)
    }

    async fn update_by_code(
        &self,
        code: &str,
        changes: &RiverChanges,
    ) -> Result<Option<River>, RiverRepositoryError> {
        let mut state = self.lock().map_err(RiverRepositoryError::connection)?;
        if let Some(new_code) = changes.code().filter(|new_code| *new_code != code) {
            if state.rivers.iter().any(|river| river.code == new_code) {
                return Err(RiverRepositoryError::duplicate_code(new_code));
            }
        }
        Ok(state
            .rivers
            .iter_mut()
            .find(|river| river.code == code)
            .map(|river| {
                changes.apply_to(river);
                river.clone()
            }))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<River>, RiverRepositoryError> {
        let state = self.lock().map_err(RiverRepositoryError::connection)?;
        Ok(state.rivers.iter().find(|river| river.code == code).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<River>, RiverRepositoryError> {
        let state = self.lock().map_err(RiverRepositoryError::connection)?;
        Ok(state.rivers.iter().find(|river| river.name == name).cloned())
    }

    async fn search_by_name(&self, fragment: &str) -> Result<Vec<River>, RiverRepositoryError> {
        let state = self.lock().map_err(RiverRepositoryError::connection)?;
        Ok(state
            .rivers
            .iter()
            .filter(|river| contains_ignoring_case(&river.name, fragment))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<River>, RiverRepositoryError> {
        let state = self.lock().map_err(RiverRepositoryError::connection)?;
        Ok(state.river(id).cloned())
    }
}

#[async_trait]
impl ParameterRepository for InMemoryMonitoringStore {
    async fn list(&self) -> Result<Vec<Parameter>, ParameterRepositoryError> {
        let state = self.lock().map_err(ParameterRepositoryError::connection)?;
        Ok(state.parameters.clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Parameter>, ParameterRepositoryError> {
        let state = self.lock().map_err(ParameterRepositoryError::connection)?;
        Ok(state.parameter(id).cloned())
    }

    async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Parameter>, ParameterRepositoryError> {
        let state = self.lock().map_err(ParameterRepositoryError::connection)?;
        Ok(state
            .parameters
            .iter()
            .find(|parameter| parameter.name == name)
            .cloned())
    }

    async fn search_by_name(
        &self,
        fragment: &str,
    ) -> Result<Vec<Parameter>, ParameterRepositoryError> {
        let state = self.lock().map_err(ParameterRepositoryError::connection)?;
        Ok(state
            .parameters
            .iter()
            .filter(|parameter| contains_ignoring_case(&parameter.name, fragment))
            .cloned()
            .collect())
    }

    async fn create(&self, draft: &ParameterDraft) -> Result<Parameter, ParameterRepositoryError> {
        let mut state = self.lock().map_err(ParameterRepositoryError::connection)?;
        let parameter = Parameter {
            id: state.allocate_id(),
            name: draft.name().to_owned(),
            category: draft.category().to_owned(),
        };
        state.parameters.push(parameter.clone());
        Ok(parameter)
    }

    async fn update(
        &self,
        id: i32,
        changes: &ParameterChanges,
    ) -> Result<Option<Parameter>, ParameterRepositoryError> {
        let mut state = self.lock().map_err(ParameterRepositoryError::connection)?;
        Ok(state
            .parameters
            .iter_mut()
            .find(|parameter| parameter.id == id)
            .map(|parameter| {
                changes.apply_to(parameter);
                parameter.clone()
            }))
    }

    async fn delete(&self, id: i32) -> Result<Option<Parameter>, ParameterRepositoryError> {
        let mut state = self.lock().map_err(ParameterRepositoryError::connection)?;
        let Some(position) = state.parameters.iter().position(|parameter| parameter.id == id)
        else {
            return Ok(None);
        };
        let removed = state.parameters.remove(position);
        for collection in &mut state.collections {
            collection
                .measurements
                .retain(|measurement| measurement.parameter_id != id);
        }
        Ok(Some(removed))
    }

    async fn find_existing_ids(&self, ids: &[i32]) -> Result<Vec<i32>, ParameterRepositoryError> {
        let state = self.lock().map_err(ParameterRepositoryError::connection)?;
        let existing: BTreeSet<i32> = ids
            .iter()
            .copied()
            .filter(|id| state.parameter(*id).is_some())
            .collect();
        Ok(existing.into_iter().collect())
    }
}

#[async_trait]
impl CollectionRepository for InMemoryMonitoringStore {
    async fn create(
        &self,
        draft: &CollectionDraft,
    ) -> Result<Collection, CollectionRepositoryError> {
        let mut state = self.lock().map_err(CollectionRepositoryError::connection)?;
        if state.river(draft.river_id()).is_none() {
            return Err(CollectionRepositoryError::missing_reference(
                "collections_river_id_fkey",
            ));
        }
        if draft
            .measurements()
            .iter()
            .any(|measurement| state.parameter(measurement.parameter_id).is_none())
        {
            return Err(CollectionRepositoryError::missing_reference(
                "collection_parameters_parameter_id_fkey",
            ));
        }
        let collection = Collection {
            id: state.allocate_id(),
            code: draft.code().to_owned(),
            location: draft.location().to_owned(),
            river_id: draft.river_id(),
            sampled_on: draft.sampled_on(),
            latitude: draft.latitude(),
            longitude: draft.longitude(),
            measurements: draft.measurements().to_vec(),
        };
        state.collections.push(collection.clone());
        Ok(collection)
    }

    async fn list_with_measurements(&self) -> Result<Vec<Collection>, CollectionRepositoryError> {
        let state = self.lock().map_err(CollectionRepositoryError::connection)?;
        Ok(state.collections.clone())
    }

    async fn measurement_stats(
        &self,
        river_id: i32,
        parameter_id: i32,
    ) -> Result<Option<MeasurementStats>, CollectionRepositoryError> {
        let state = self.lock().map_err(CollectionRepositoryError::connection)?;
        let values: Vec<f64> = state
            .measurements(river_id, parameter_id)
            .map(|(_, value)| value)
            .collect();
        Ok(summarise(&values))
    }

    async fn measurement_points(
        &self,
        river_id: i32,
        parameter_id: i32,
    ) -> Result<Vec<MeasurementPoint>, CollectionRepositoryError> {
        let state = self.lock().map_err(CollectionRepositoryError::connection)?;
        Ok(state
            .measurements(river_id, parameter_id)
            .map(|(collection, value)| MeasurementPoint {
                sampled_on: collection.sampled_on,
                value,
            })
            .collect())
    }

    async fn river_names_for_parameter(
        &self,
        parameter_id: i32,
    ) -> Result<Vec<String>, CollectionRepositoryError> {
        let state = self.lock().map_err(CollectionRepositoryError::connection)?;
        let names: BTreeSet<String> = state
            .collections
            .iter()
            .filter(|collection| {
                collection
                    .measurements
                    .iter()
                    .any(|measurement| measurement.parameter_id == parameter_id)
            })
            .filter_map(|collection| state.river(collection.river_id))
            .map(|river| river.name.clone())
            .collect();
        Ok(names.into_iter().collect())
    }

    async fn parameter_names_for_river(
        &self,
        river_id: i32,
    ) -> Result<Vec<String>, CollectionRepositoryError> {
        let state = self.lock().map_err(CollectionRepositoryError::connection)?;
        let names: BTreeSet<String> = state
            .collections
            .iter()
            .filter(|collection| collection.river_id == river_id)
            .flat_map(|collection| collection.measurements.iter())
            .filter_map(|measurement| state.parameter(measurement.parameter_id))
            .map(|parameter| parameter.name.clone())
            .collect();
        Ok(names.into_iter().collect())
    }

    async fn river_measurements(
        &self,
        river_id: i32,
        parameter_id: i32,
    ) -> Result<Vec<RiverSample>, CollectionRepositoryError> {
        let state = self.lock().map_err(CollectionRepositoryError::connection)?;
        let mut samples: Vec<RiverSample> = state
            .measurements(river_id, parameter_id)
            .map(|(collection, value)| RiverSample {
                sampled_on: collection.sampled_on,
                location: collection.location.clone(),
                value,
                latitude: collection.latitude,
                longitude: collection.longitude,
            })
            .collect();
        samples.sort_by_key(|sample| sample.sampled_on);
        Ok(samples)
    }
}

#[async_trait]
impl UserRepository for InMemoryMonitoringStore {
    async fn create(&self, user: &NewUser) -> Result<User, UserRepositoryError> {
        let mut state = self.lock().map_err(UserRepositoryError::connection)?;
        if state
            .users
            .iter()
            .any(|(existing, _)| existing.email == user.email)
        {
            return Err(UserRepositoryError::duplicate_email(user.email.as_str()));
        }
        let stored = User {
            id: state.allocate_id(),
            name: user.name.clone(),
            email: user.email.clone(),
        };
        state
            .users
            .push((stored.clone(), user.password_hash.clone()));
        Ok(stored)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, UserRepositoryError> {
        let state = self.lock().map_err(UserRepositoryError::connection)?;
        Ok(state
            .users
            .iter()
            .find(|(user, _)| user.id == id)
            .map(|(user, _)| user.clone()))
    }
}
