//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every REST endpoint from the inbound layer, the error
//! schema wrappers from [`crate::inbound::http::schemas`] and the `X-API-Key`
//! security scheme guarding the write endpoints. Health probes stay out of
//! the document.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, ParameterLookupSchema, RiverLookupSchema,
};

/// Register the shared-secret header scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "ApiKey",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "X-API-Key",
                "Shared secret required to create rivers, collections and users.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "River water-quality API",
        description = "Rivers, parameters, sampling collections, users and a regression model."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::rivers::list_rivers,
        crate::inbound::http::rivers::create_river,
        crate::inbound::http::rivers::rivers_by_name,
        crate::inbound::http::rivers::get_river,
        crate::inbound::http::rivers::update_river,
        crate::inbound::http::rivers::parameter_summary,
        crate::inbound::http::rivers::parameter_series,
        crate::inbound::http::parameters::list_parameters,
        crate::inbound::http::parameters::create_parameter,
        crate::inbound::http::parameters::parameters_by_name,
        crate::inbound::http::parameters::parameter_by_email,
        crate::inbound::http::parameters::get_parameter,
        crate::inbound::http::parameters::update_parameter,
        crate::inbound::http::parameters::delete_parameter,
        crate::inbound::http::collections::create_collection,
        crate::inbound::http::collections::list_collections,
        crate::inbound::http::collections::rivers_for_parameter,
        crate::inbound::http::collections::parameters_for_river,
        crate::inbound::http::collections::parameter_values,
        crate::inbound::http::users::register_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::predict::predict,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        RiverLookupSchema,
        ParameterLookupSchema
    )),
    tags(
        (name = "rivers", description = "Monitored rivers and per-parameter analytics"),
        (name = "parameters", description = "Water-quality parameters"),
        (name = "collections", description = "Sampling events and their measurements"),
        (name = "users", description = "Registered users"),
        (name = "prediction", description = "Regression model inference")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;
    use utoipa::openapi::security::SecurityScheme;

    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    #[rstest]
    fn error_schema_lists_envelope_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let Some(RefOr::T(Schema::Object(error))) = schemas.get(ERROR_SCHEMA_NAME) else {
            panic!("expected Error object schema");
        };
        for field in ["code", "message", "traceId", "details"] {
            assert!(error.properties.contains_key(field), "missing {field}");
        }
    }

    #[rstest]
    fn api_key_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let scheme = doc
            .components
            .as_ref()
            .and_then(|components| components.security_schemes.get("ApiKey"))
            .expect("ApiKey scheme");
        assert!(matches!(scheme, SecurityScheme::ApiKey(ApiKey::Header(_))));
    }

    #[rstest]
    #[case("/rios")]
    #[case("/rios/{codigo}")]
    #[case("/rio/{nome}/coletas/{parametro}/resumo")]
    #[case("/parametros/{id}")]
    #[case("/coletas/rio/{codigo}/parametro/{nome}")]
    #[case("/usuarios")]
    #[case("/predict")]
    fn documents_route(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "{path} undocumented");
    }

    #[rstest]
    #[case("/rios/nome/{nome}", "RiverLookupSchema", "RiverResponse")]
    #[case("/parametros/nome/{nome}", "ParameterLookupSchema", "ParameterResponse")]
    fn name_lookups_document_object_or_array(
        #[case] path: &str,
        #[case] schema_name: &str,
        #[case] item: &str,
    ) {
        let doc = serde_json::to_value(ApiDoc::openapi()).expect("serialise document");
        let response_pointer = format!(
            "/paths/{}/get/responses/200/content/application~1json/schema/$ref",
            path.replace('/', "~1")
        );
        let reference = doc
            .pointer(&response_pointer)
            .and_then(serde_json::Value::as_str)
            .expect("200 body references a schema");
        assert_eq!(reference, format!("#/components/schemas/{schema_name}"));

        let variants = doc
            .pointer(&format!("/components/schemas/{schema_name}/oneOf"))
            .and_then(serde_json::Value::as_array)
            .expect("lookup schema is a oneOf");
        assert_eq!(variants.len(), 2);
        let one = variants.first().expect("object variant").to_string();
        let many = variants.get(1).expect("array variant").to_string();
        assert!(one.contains(item) && !one.contains("\"array\""), "{one}");
        assert!(many.contains(item) && many.contains("\"array\""), "{many}");
    }

    #[rstest]
    fn health_probes_are_not_documented() {
        let doc = ApiDoc::openapi();
        assert!(!doc.paths.paths.contains_key("/health/ready"));
    }
}
