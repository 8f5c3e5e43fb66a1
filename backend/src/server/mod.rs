//! Server construction and middleware wiring.

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::auth::{csrf, login, register};
use crate::inbound::http::emergency::{add_contact, delete_contact, list_contacts, trigger_sos};
use crate::inbound::http::error::json_error_handler;
use crate::inbound::http::gas::{leak_status, level_data, trigger_scan};
use crate::inbound::http::home::dashboard;
use crate::inbound::http::pipeline::health;
use crate::inbound::http::profile::{get_profile, update_profile, upload_image};
use crate::inbound::http::regulator::{control, state as regulator_state};
use crate::inbound::http::state::AppState;
use crate::middleware::Trace;

/// Assemble the application with every route and middleware attached.
pub fn build_app(
    state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(Trace)
        .service(register)
        .service(login)
        .service(csrf)
        .service(dashboard)
        .service(leak_status)
        .service(trigger_scan)
        .service(level_data)
        .service(health)
        .service(regulator_state)
        .service(control)
        .service(list_contacts)
        .service(add_contact)
        .service(delete_contact)
        .service(trigger_sos)
        .service(get_profile)
        .service(update_profile)
        .service(upload_image);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server bound to `bind_addr`.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(state: AppState, bind_addr: &str) -> std::io::Result<Server> {
    let state = web::Data::new(state);
    let server = HttpServer::new(move || build_app(state.clone()))
        .bind(bind_addr)?
        .run();
    Ok(server)
}
