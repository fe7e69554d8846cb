//! Server construction and middleware wiring.

mod config;
mod shutdown;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use registration::Trace;
#[cfg(debug_assertions)]
use registration::doc::ApiDoc;
use registration::domain::RegistrationService;
use registration::domain::ports::RegistrationCommand;
use registration::inbound::http::configure;
use registration::inbound::http::health::HealthState;
use registration::inbound::http::state::HttpState;
use registration::outbound::hashing::Argon2PasswordHasher;
use registration::outbound::persistence::{
    DbPool, DieselRegistrationRepository, InMemoryRegistrationRepository,
};

/// Build the registration use-case over the configured store.
///
/// PostgreSQL is used when a pool is configured; otherwise registrations live
/// in a process-local map for the lifetime of the server.
fn build_registration_command(db_pool: Option<DbPool>) -> Arc<dyn RegistrationCommand> {
    let hasher = Arc::new(Argon2PasswordHasher::default());
    match db_pool {
        Some(pool) => Arc::new(RegistrationService::new(
            Arc::new(DieselRegistrationRepository::new(pool)),
            hasher,
        )),
        None => Arc::new(RegistrationService::new(
            Arc::new(InMemoryRegistrationRepository::new()),
            hasher,
        )),
    }
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
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
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// The readiness flag is raised once the listener is bound. On Ctrl-C or
/// SIGTERM both probes start failing before the listener drains.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig { bind_addr, db_pool } = config;
    let http_state = web::Data::new(HttpState::new(build_registration_command(db_pool)));
    let server_health_state = health_state.clone();

    let server =
        HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
            .disable_signals()
            .bind(bind_addr)?
            .run();

    let handle = server.handle();
    actix_web::rt::spawn(shutdown::drain_on(
        shutdown::shutdown_signal(),
        health_state.clone(),
        move || handle.stop(true),
    ));

    health_state.mark_ready();
    Ok(server)
}
