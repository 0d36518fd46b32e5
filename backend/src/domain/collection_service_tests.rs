//! Tests for the collection service.

use std::sync::Arc;

use chrono::NaiveDate;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    CollectionRepositoryError, MockCollectionRepository, MockParameterRepository,
    MockRiverRepository,
};
use crate::domain::{CollectionFields, ErrorCode, Measurement, Parameter, RiverSample};

type Service =
    CollectionService<MockRiverRepository, MockParameterRepository, MockCollectionRepository>;

fn service(
    rivers: MockRiverRepository,
    parameters: MockParameterRepository,
    collections: MockCollectionRepository,
) -> Service {
    CollectionService::new(Arc::new(rivers), Arc::new(parameters), Arc::new(collections))
}

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).expect("valid date")
}

fn doce() -> River {
    River {
        id: 1,
        name: "Rio Doce".to_owned(),
        code: "RD-01".to_owned(),
        description: String::new(),
    }
}

fn ph() -> Parameter {
    Parameter {
        id: 7,
        name: "pH".to_owned(),
        category: "fisico".to_owned(),
    }
}

#[fixture]
fn draft() -> CollectionDraft {
    CollectionDraft::try_from(CollectionFields {
        code: "C-001".to_owned(),
        location: "Ponte Velha".to_owned(),
        river_id: 1,
        sampled_on: date(3, 1),
        latitude: -19.5,
        longitude: -42.6,
        measurements: vec![
            Measurement {
                parameter_id: 7,
                value: 7.1,
            },
            Measurement {
                parameter_id: 8,
                value: 5.0,
            },
        ],
    })
    .expect("valid draft")
}

fn stored(draft: &CollectionDraft) -> Collection {
    Collection {
        id: 10,
        code: draft.code().to_owned(),
        location: draft.location().to_owned(),
        river_id: draft.river_id(),
        sampled_on: draft.sampled_on(),
        latitude: draft.latitude(),
        longitude: draft.longitude(),
        measurements: draft.measurements().to_vec(),
    }
}

fn rivers_finding(river: Option<River>) -> MockRiverRepository {
    let mut rivers = MockRiverRepository::new();
    rivers
        .expect_find_by_id()
        .withf(|id| *id == 1)
        .times(1)
        .return_once(move |_| Ok(river));
    rivers
}

fn parameters_existing(ids: Vec<i32>) -> MockParameterRepository {
    let mut parameters = MockParameterRepository::new();
    parameters
        .expect_find_existing_ids()
        .withf(|requested| requested == [7, 8])
        .times(1)
        .return_once(move |_| Ok(ids));
    parameters
}

#[rstest]
#[tokio::test]
async fn create_persists_when_every_reference_exists(draft: CollectionDraft) {
    let expected = stored(&draft);
    let mut collections = MockCollectionRepository::new();
    collections
        .expect_create()
        .times(1)
        .return_once(move |_| Ok(expected));

    let created = service(
        rivers_finding(Some(doce())),
        parameters_existing(vec![7, 8]),
        collections,
    )
    .create_collection(draft)
    .await
    .expect("create succeeds");

    assert_eq!(created.id, 10);
    assert_eq!(created.measurements.len(), 2);
}

#[rstest]
#[tokio::test]
async fn create_rejects_a_missing_river(draft: CollectionDraft) {
    let mut parameters = MockParameterRepository::new();
    parameters.expect_find_existing_ids().times(0);
    let mut collections = MockCollectionRepository::new();
    collections.expect_create().times(0);

    let error = service(rivers_finding(None), parameters, collections)
        .create_collection(draft)
        .await
        .expect_err("missing river");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn create_rejects_missing_parameters(draft: CollectionDraft) {
    let mut collections = MockCollectionRepository::new();
    collections.expect_create().times(0);

    let error = service(
        rivers_finding(Some(doce())),
        parameters_existing(vec![7]),
        collections,
    )
    .create_collection(draft)
    .await
    .expect_err("missing parameter");

    assert_eq!(error.code(), ErrorCode::NotFound);
    let missing = error
        .details()
        .and_then(|details| details.get("missing"))
        .cloned();
    assert_eq!(missing, Some(serde_json::json!([8])));
}

#[rstest]
#[case(CollectionRepositoryError::missing_reference("fk"), ErrorCode::NotFound)]
#[case(CollectionRepositoryError::query("value out of range"), ErrorCode::InvalidRequest)]
#[case(CollectionRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[tokio::test]
async fn create_maps_insert_failures(
    draft: CollectionDraft,
    #[case] failure: CollectionRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut collections = MockCollectionRepository::new();
    collections
        .expect_create()
        .times(1)
        .return_once(move |_| Err(failure));

    let error = service(
        rivers_finding(Some(doce())),
        parameters_existing(vec![7, 8]),
        collections,
    )
    .create_collection(draft)
    .await
    .expect_err("insert fails");

    assert_eq!(error.code(), expected);
}

#[tokio::test]
async fn parameter_values_are_sorted_by_date() {
    let mut rivers = MockRiverRepository::new();
    rivers
        .expect_find_by_code()
        .withf(|code| code == "RD-01")
        .times(1)
        .return_once(|_| Ok(Some(doce())));
    let mut parameters = MockParameterRepository::new();
    parameters
        .expect_find_by_name()
        .times(1)
        .return_once(|_| Ok(Some(ph())));
    let mut collections = MockCollectionRepository::new();
    collections
        .expect_river_measurements()
        .withf(|river_id, parameter_id| *river_id == 1 && *parameter_id == 7)
        .times(1)
        .return_once(|_, _| {
            Ok([date(6, 1), date(1, 15), date(3, 3)]
                .into_iter()
                .map(|sampled_on| RiverSample {
                    sampled_on,
                    location: "Ponte Velha".to_owned(),
                    value: 7.0,
                    latitude: -19.5,
                    longitude: -42.6,
                })
                .collect())
        });

    let values = service(rivers, parameters, collections)
        .parameter_values("RD-01", "pH")
        .await
        .expect("values");

    let dates: Vec<_> = values.samples.iter().map(|s| s.sampled_on).collect();
    assert_eq!(dates, vec![date(1, 15), date(3, 3), date(6, 1)]);
    assert_eq!(values.river, "Rio Doce");
    assert_eq!(values.parameter, "pH");
}

#[tokio::test]
async fn rivers_for_parameter_uses_the_first_name_match() {
    let mut parameters = MockParameterRepository::new();
    parameters.expect_search_by_name().times(1).return_once(|_| {
        Ok(vec![
            ph(),
            Parameter {
                id: 9,
                name: "pH de campo".to_owned(),
                category: "fisico".to_owned(),
            },
        ])
    });
    let mut collections = MockCollectionRepository::new();
    collections
        .expect_river_names_for_parameter()
        .withf(|id| *id == 7)
        .times(1)
        .return_once(|_| Ok(vec!["Rio Doce".to_owned(), "Rio Pardo".to_owned()]));

    let coverage = service(MockRiverRepository::new(), parameters, collections)
        .rivers_for_parameter("ph")
        .await
        .expect("coverage");

    assert_eq!(coverage.parameter, "pH");
    assert_eq!(coverage.rivers, vec!["Rio Doce", "Rio Pardo"]);
}

#[tokio::test]
async fn river_without_collections_has_no_parameters() {
    let mut rivers = MockRiverRepository::new();
    rivers
        .expect_find_by_code()
        .times(1)
        .return_once(|_| Ok(Some(doce())));
    let mut collections = MockCollectionRepository::new();
    collections
        .expect_parameter_names_for_river()
        .times(1)
        .return_once(|_| Ok(Vec::new()));

    let error = service(rivers, MockParameterRepository::new(), collections)
        .parameters_for_river("RD-01")
        .await
        .expect_err("nothing collected");

    assert_eq!(error.code(), ErrorCode::NotFound);
}
