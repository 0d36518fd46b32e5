//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod api_key;
pub mod collections;
pub mod error;
pub mod health;
pub mod parameters;
pub mod predict;
pub mod rivers;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Register every API route plus the JSON and path error handlers.
///
/// Handlers read [`state::HttpState`] from app data; callers register it.
///
/// # Examples
/// ```no_run
/// use actix_web::{App, web};
/// use riverwq::inbound::http::{configure, state::HttpState};
///
/// fn app(state: HttpState) {
///     let _app = App::new()
///         .app_data(web::Data::new(state))
///         .configure(configure);
/// }
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .app_data(validation::path_config())
        .service(rivers::list_rivers)
        .service(rivers::create_river)
        .service(rivers::rivers_by_name)
        .service(rivers::get_river)
        .service(rivers::update_river)
        .service(rivers::parameter_summary)
        .service(rivers::parameter_series)
        .service(parameters::list_parameters)
        .service(parameters::create_parameter)
        .service(parameters::parameters_by_name)
        .service(parameters::parameter_by_email)
        .service(parameters::get_parameter)
        .service(parameters::update_parameter)
        .service(parameters::delete_parameter)
        .service(collections::create_collection)
        .service(collections::list_collections)
        .service(collections::rivers_for_parameter)
        .service(collections::parameters_for_river)
        .service(collections::parameter_values)
        .service(users::register_user)
        .service(users::get_user)
        .service(predict::predict);
}
