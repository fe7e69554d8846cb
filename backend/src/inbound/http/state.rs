//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see domain ports, so
//! tests can swap in doubles without touching storage.

use std::sync::Arc;

use crate::domain::ports::RegistrationCommand;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registration use-case invoked by `POST /register`.
    pub registration: Arc<dyn RegistrationCommand>,
}

impl HttpState {
    /// Construct state around the registration use-case.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use registration::domain::ports::FixtureRegistrationCommand;
    /// use registration::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixtureRegistrationCommand));
    /// let _registration = state.registration.clone();
    /// ```
    pub fn new(registration: Arc<dyn RegistrationCommand>) -> Self {
        Self { registration }
    }
}
