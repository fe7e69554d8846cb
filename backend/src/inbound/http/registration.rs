//! Registration form handler.
//!
//! ```text
//! POST /register  name=Ann&email=ann%40x.com&password=Abc123
//! ```
//!
//! Every outcome is a `200 OK` HTML fragment: the greeting, one of the three
//! validation messages, or the generic failure message.

use actix_web::error::{InternalError, UrlencodedError};
use actix_web::{HttpResponse, post, web};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::domain::{Error, Registration, RegistrationField, RegistrationValidationError};
use crate::inbound::http::html;
use crate::inbound::http::state::HttpState;

/// Form body for `POST /register`.
///
/// Absent fields deserialise as empty strings so they fail the presence
/// check rather than the extractor.
#[derive(Default, Deserialize, utoipa::ToSchema)]
pub struct RegistrationRequest {
    /// Registrant's name, shown in the greeting.
    #[serde(default)]
    #[schema(example = "Ann")]
    pub name: String,
    /// Email address; identifies the stored record.
    #[serde(default)]
    #[schema(example = "ann@x.com")]
    pub email: String,
    /// Plaintext password; hashed before it is stored.
    #[serde(default)]
    #[schema(example = "Abc123", format = Password)]
    pub password: String,
}

impl RegistrationRequest {
    /// Whether any field held a percent-escape that was not valid UTF-8.
    ///
    /// Form decoding replaces such bytes with U+FFFD instead of failing.
    fn has_invalid_encoding(&self) -> bool {
        [&self.name, &self.email, &self.password]
            .iter()
            .any(|field| field.contains(char::REPLACEMENT_CHARACTER))
    }
}

impl TryFrom<RegistrationRequest> for Registration {
    type Error = RegistrationValidationError;

    fn try_from(value: RegistrationRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.name, &value.email, &value.password)
    }
}

fn map_registration_validation_error(err: RegistrationValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": err.field().as_str(),
        "code": err.code(),
    }))
}

/// Largest accepted form body, in bytes.
pub const FORM_LIMIT: usize = 100 * 1024;

fn malformed_submission() -> HttpResponse {
    html::html_response(html::error_fragment(html::GENERIC_FAILURE))
}

/// Form extractor settings for `POST /register`.
///
/// A body sent with another content type is treated like an empty
/// submission and answered with the missing-field fragment. A form body that
/// is too large or cannot be decoded gets the generic failure fragment.
pub fn registration_form_config() -> web::FormConfig {
    web::FormConfig::default()
        .limit(FORM_LIMIT)
        .error_handler(|err, _req| {
            debug!(error = %err, "unreadable registration form");
            let response = match err {
                UrlencodedError::ContentType => {
                    let missing =
                        RegistrationValidationError::MissingField(RegistrationField::Name);
                    html::html_response(html::fragment_for_error(
                        &map_registration_validation_error(missing),
                    ))
                }
                _ => malformed_submission(),
            };
            InternalError::from_response(err, response).into()
        })
}

/// Validate a submission and register the user.
#[utoipa::path(
    post,
    path = "/register",
    request_body(
        content = RegistrationRequest,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (
            status = 200,
            description = "HTML fragment: greeting, validation message, or generic failure",
            body = String,
            content_type = "text/html"
        )
    ),
    tags = ["registration"],
    operation_id = "register"
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    form: web::Form<RegistrationRequest>,
) -> HttpResponse {
    let request = form.into_inner();
    if request.has_invalid_encoding() {
        debug!("registration form field is not valid UTF-8");
        return malformed_submission();
    }

    let outcome = match Registration::try_from(request) {
        Ok(registration) => state.registration.register(registration).await,
        Err(err) => Err(map_registration_validation_error(err)),
    };

    match outcome {
        Ok(user) => html::html_response(html::success_fragment(user.name().as_ref())),
        Err(err) => html::html_response(html::fragment_for_error(&err)),
    }
}
