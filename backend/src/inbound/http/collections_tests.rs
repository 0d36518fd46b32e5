//! Tests for collection HTTP handlers.

use super::*;
use crate::domain::Error;
use crate::inbound::http::api_key::API_KEY_HEADER;
use crate::inbound::http::test_utils::{MockPorts, TEST_API_KEY, test_app};
use actix_web::http::StatusCode;
use actix_web::test;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, day).expect("valid date")
}

#[fixture]
fn payload() -> Value {
    json!({
        "codigo": "C-1",
        "locali": "Ponte Velha",
        "rio_id": 1,
        "datas": "2024-03-01",
        "latitude": -19.5,
        "longitude": -42.6,
        "coletas_parametros": [{ "parametro_id": 7, "valor": 7.2 }]
    })
}

fn stored() -> Collection {
    Collection {
        id: 11,
        code: "C-1".to_owned(),
        location: "Ponte Velha".to_owned(),
        river_id: 1,
        sampled_on: date(1),
        latitude: -19.5,
        longitude: -42.6,
        measurements: vec![Measurement {
            parameter_id: 7,
            value: 7.2,
        }],
    }
}

#[rstest]
#[actix_web::test]
async fn create_returns_created_without_id(payload: Value) {
    let mut ports = MockPorts::default();
    ports
        .collections_command
        .expect_create_collection()
        .withf(|draft| draft.river_id() == 1 && draft.parameter_ids() == vec![7])
        .times(1)
        .return_once(|_| Ok(stored()));
    let app = test::init_service(test_app(ports).service(create_collection)).await;

    let request = test::TestRequest::post()
        .uri("/coletas")
        .insert_header((API_KEY_HEADER, TEST_API_KEY))
        .set_json(&payload)
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body, payload);
    assert!(body.get("id").is_none());
}

#[rstest]
#[actix_web::test]
async fn create_requires_api_key(payload: Value) {
    let app = test::init_service(test_app(MockPorts::default()).service(create_collection)).await;

    let request = test::TestRequest::post()
        .uri("/coletas")
        .insert_header((API_KEY_HEADER, "not-the-key"))
        .set_json(&payload)
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[case("/coletas_parametros", json!([]), "coletas_parametros")]
#[case("/latitude", json!(91.0), "latitude")]
#[case("/longitude", json!(-181.0), "longitude")]
#[case("/locali", json!("  "), "locali")]
#[actix_web::test]
async fn create_rejects_invalid_fields(
    mut payload: Value,
    #[case] pointer: &str,
    #[case] replacement: Value,
    #[case] field: &str,
) {
    *payload.pointer_mut(pointer).expect("field present") = replacement;
    let app = test::init_service(test_app(MockPorts::default()).service(create_collection)).await;

    let request = test::TestRequest::post()
        .uri("/coletas")
        .insert_header((API_KEY_HEADER, TEST_API_KEY))
        .set_json(&payload)
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body.pointer("/details/field"), Some(&json!(field)));
}

#[rstest]
#[actix_web::test]
async fn create_rejects_malformed_date(mut payload: Value) {
    *payload.pointer_mut("/datas").expect("field present") = json!("01/03/2024");
    let app = test::init_service(test_app(MockPorts::default()).service(create_collection)).await;

    let request = test::TestRequest::post()
        .uri("/coletas")
        .insert_header((API_KEY_HEADER, TEST_API_KEY))
        .set_json(&payload)
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn missing_river_is_not_found(payload: Value) {
    let mut ports = MockPorts::default();
    ports
        .collections_command
        .expect_create_collection()
        .return_once(|_| Err(Error::not_found("river 1 not found")));
    let app = test::init_service(test_app(ports).service(create_collection)).await;

    let request = test::TestRequest::post()
        .uri("/coletas")
        .insert_header((API_KEY_HEADER, TEST_API_KEY))
        .set_json(&payload)
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn list_includes_nested_measurements() {
    let mut ports = MockPorts::default();
    ports
        .collections
        .expect_list_collections()
        .return_once(|| Ok(vec![stored()]));
    let app = test::init_service(test_app(ports).service(list_collections)).await;

    let body: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/coletas").to_request())
            .await;
    assert_eq!(
        body.pointer("/0/coletas_parametros"),
        Some(&json!([{ "parametro_id": 7, "valor": 7.2 }]))
    );
}

#[actix_web::test]
async fn coverage_endpoints_use_wire_keys() {
    let mut ports = MockPorts::default();
    ports
        .collections
        .expect_rivers_for_parameter()
        .withf(|fragment| fragment == "ph")
        .return_once(|_| {
            Ok(ParameterCoverage {
                parameter: "pH".to_owned(),
                rivers: vec!["Rio Doce".to_owned()],
            })
        });
    ports
        .collections
        .expect_parameters_for_river()
        .withf(|code| code == "RD-01")
        .return_once(|_| {
            Ok(RiverCoverage {
                river: "Rio Doce".to_owned(),
                parameters: vec!["pH".to_owned(), "Turbidez".to_owned()],
            })
        });
    let app = test::init_service(
        test_app(ports)
            .service(rivers_for_parameter)
            .service(parameters_for_river),
    )
    .await;

    let by_parameter: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/coletas/parametro/ph")
            .to_request(),
    )
    .await;
    assert_eq!(by_parameter, json!({ "parametro": "pH", "rios": ["Rio Doce"] }));

    let by_river: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/coletas/rio/RD-01").to_request(),
    )
    .await;
    assert_eq!(
        by_river,
        json!({ "rio": "Rio Doce", "parametros": ["pH", "Turbidez"] })
    );
}

#[actix_web::test]
async fn values_carry_location_and_coordinates() {
    let mut ports = MockPorts::default();
    ports
        .collections
        .expect_parameter_values()
        .withf(|code, name| code == "RD-01" && name == "pH")
        .return_once(|_, _| {
            Ok(RiverParameterValues {
                river: "Rio Doce".to_owned(),
                parameter: "pH".to_owned(),
                samples: vec![RiverSample {
                    sampled_on: date(2),
                    location: "Ponte Velha".to_owned(),
                    value: 7.1,
                    latitude: -19.5,
                    longitude: -42.6,
                }],
            })
        });
    let app = test::init_service(test_app(ports).service(parameter_values)).await;

    let body: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/coletas/rio/RD-01/parametro/pH")
            .to_request(),
    )
    .await;
    assert_eq!(
        body,
        json!({
            "rio": "Rio Doce",
            "parametro": "pH",
            "valores": [{
                "data": "2024-03-02",
                "local": "Ponte Velha",
                "valor": 7.1,
                "latitude": -19.5,
                "longitude": -42.6
            }]
        })
    );
}
