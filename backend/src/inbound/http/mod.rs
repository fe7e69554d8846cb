//! HTTP inbound adapter: the registration page, the form handler, and
//! health probes.

pub mod health;
pub mod html;
pub mod pages;
pub mod registration;
pub mod state;

use actix_web::web;

/// Register every route served by the application.
///
/// Callers supply [`state::HttpState`] and [`health::HealthState`] as app
/// data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(registration::registration_form_config())
        .service(pages::index)
        .service(pages::stylesheet)
        .service(pages::script)
        .service(registration::register)
        .service(health::ready)
        .service(health::live);
}
