//! OpenAPI documentation configuration.
//!
//! Defines [`ApiDoc`], the generated specification covering every REST
//! endpoint plus the bearer security scheme. Swagger UI serves it in debug
//! builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some("Access token issued by POST /auth/login/."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "SafeGas backend API",
        description = "HTTP interface for gas safety monitoring: auth, telemetry, and emergency response."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::csrf,
        crate::inbound::http::home::dashboard,
        crate::inbound::http::gas::leak_status,
        crate::inbound::http::gas::trigger_scan,
        crate::inbound::http::gas::level_data,
        crate::inbound::http::pipeline::health,
        crate::inbound::http::regulator::state,
        crate::inbound::http::regulator::control,
        crate::inbound::http::emergency::list_contacts,
        crate::inbound::http::emergency::add_contact,
        crate::inbound::http::emergency::delete_contact,
        crate::inbound::http::emergency::trigger_sos,
        crate::inbound::http::profile::get_profile,
        crate::inbound::http::profile::update_profile,
        crate::inbound::http::profile::upload_image,
    ),
    tags(
        (name = "auth", description = "Account registration and login"),
        (name = "home", description = "Dashboard summary"),
        (name = "gas", description = "Leak detection and level monitoring"),
        (name = "pipeline", description = "Pipeline health"),
        (name = "regulator", description = "Regulator status and control"),
        (name = "emergency", description = "Emergency contacts and SOS"),
        (name = "profile", description = "Account profile")
    )
)]
pub struct ApiDoc;
