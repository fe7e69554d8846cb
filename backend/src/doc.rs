//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects the registration page, the form endpoint, and the
//! health probes. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` exports it for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::registration::RegistrationRequest;

/// OpenAPI document for the HTTP interface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Registration service",
        description = "HTML registration form, its submission endpoint, and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::pages::index,
        crate::inbound::http::registration::register,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(RegistrationRequest)),
    tags(
        (name = "registration", description = "Registration page and form submission"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
