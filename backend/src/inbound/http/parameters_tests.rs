//! Tests for parameter HTTP handlers.

use super::*;
use crate::domain::Error;
use crate::inbound::http::test_utils::{MockPorts, test_app};
use actix_web::http::StatusCode;
use actix_web::test;
use rstest::rstest;
use serde_json::{Value, json};

fn ph() -> Parameter {
    Parameter {
        id: 7,
        name: "pH".to_owned(),
        category: "físico-químico".to_owned(),
    }
}

#[actix_web::test]
async fn get_parameter_maps_wire_names() {
    let mut ports = MockPorts::default();
    ports
        .parameters
        .expect_parameter_by_id()
        .withf(|id| *id == 7)
        .return_once(|_| Ok(ph()));
    let app = test::init_service(test_app(ports).service(get_parameter)).await;

    let body: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/parametros/7").to_request(),
    )
    .await;
    assert_eq!(
        body,
        json!({ "id": 7, "nome": "pH", "categoria": "físico-químico" })
    );
}

#[actix_web::test]
async fn non_numeric_id_is_invalid_request() {
    let app = test::init_service(test_app(MockPorts::default()).service(get_parameter)).await;

    let response = test::call_service(
        &app,
        test::TestRequest::get().uri("/parametros/abc").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body.pointer("/details/code"), Some(&json!("invalid_path")));
}

#[actix_web::test]
async fn update_forwards_partial_changes() {
    let mut ports = MockPorts::default();
    ports
        .parameters_command
        .expect_update_parameter()
        .withf(|id, changes| *id == 7 && changes.name() == Some("pH (campo)") && changes.category().is_none())
        .return_once(|_, _| {
            let mut updated = ph();
            updated.name = "pH (campo)".to_owned();
            Ok(updated)
        });
    let app = test::init_service(test_app(ports).service(update_parameter)).await;

    let request = test::TestRequest::put()
        .uri("/parametros/7")
        .set_json(json!({ "nome": "pH (campo)" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(body.get("categoria"), Some(&json!("físico-químico")));
    assert_eq!(body.get("nome"), Some(&json!("pH (campo)")));
}

#[rstest]
#[case(Ok(ph()), StatusCode::OK)]
#[case(Err(Error::not_found("parameter 7 not found")), StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn delete_reports_outcome(
    #[case] outcome: Result<Parameter, Error>,
    #[case] expected: StatusCode,
) {
    let mut ports = MockPorts::default();
    ports
        .parameters_command
        .expect_delete_parameter()
        .return_once(move |_| outcome);
    let app = test::init_service(test_app(ports).service(delete_parameter)).await;

    let response = test::call_service(
        &app,
        test::TestRequest::delete().uri("/parametros/7").to_request(),
    )
    .await;
    assert_eq!(response.status(), expected);
}

#[actix_web::test]
async fn create_rejects_missing_category() {
    let app = test::init_service(test_app(MockPorts::default()).service(create_parameter)).await;

    let request = test::TestRequest::post()
        .uri("/parametros")
        .set_json(json!({ "nome": "pH" }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn email_lookup_is_not_found() {
    let mut ports = MockPorts::default();
    ports
        .parameters
        .expect_parameter_by_email()
        .return_once(|_| Err(Error::not_found("parameters have no email attribute")));
    let app = test::init_service(test_app(ports).service(parameter_by_email)).await;

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/parametros/email/ana@example.com")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn single_name_match_is_an_object() {
    let mut ports = MockPorts::default();
    ports
        .parameters
        .expect_parameters_by_name()
        .withf(|fragment| fragment == "PH")
        .return_once(|_| Ok(crate::domain::Matches::One(ph())));
    let app = test::init_service(test_app(ports).service(parameters_by_name)).await;

    let body: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/parametros/nome/PH").to_request(),
    )
    .await;
    assert_eq!(body.get("id"), Some(&json!(7)));
}
