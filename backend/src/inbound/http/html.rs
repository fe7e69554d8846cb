//! HTML fragments returned by the registration form endpoint.
//!
//! Every fragment is a single `<h2>` element. User-supplied text is escaped
//! before interpolation.

use std::borrow::Cow;

use actix_web::HttpResponse;
use actix_web::http::header::ContentType;

use crate::domain::Error;

/// Message shown for any failure the registrant cannot fix.
pub const GENERIC_FAILURE: &str = "There was an issue with registration. Please try again later.";

/// Escape text for inclusion in HTML element content or attribute values.
///
/// Borrows the input when nothing needs escaping.
///
/// # Examples
/// ```
/// use registration::inbound::http::html::escape;
///
/// assert_eq!(escape("Ann"), "Ann");
/// assert_eq!(escape("<b>&</b>"), "&lt;b&gt;&amp;&lt;/b&gt;");
/// ```
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Greeting shown after a successful registration.
pub fn success_fragment(name: &str) -> String {
    format!("<h2>Thank you for registering, {}!</h2>", escape(name))
}

/// Error fragment carrying `message`.
pub fn error_fragment(message: &str) -> String {
    format!("<h2>Error: {}</h2>", escape(message))
}

/// Fragment for a domain error.
///
/// Validation messages are shown verbatim; anything else collapses to
/// [`GENERIC_FAILURE`] so backend details never reach the browser.
pub fn fragment_for_error(error: &Error) -> String {
    if error.code().is_user_correctable() {
        error_fragment(error.message())
    } else {
        error_fragment(GENERIC_FAILURE)
    }
}

/// Wrap a fragment in a `200 OK` HTML response.
pub fn html_response(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use rstest::rstest;

    #[rstest]
    fn success_greets_by_name() {
        assert_snapshot!(success_fragment("Ann"), @"<h2>Thank you for registering, Ann!</h2>");
    }

    #[rstest]
    fn success_escapes_markup_in_name() {
        assert_snapshot!(
            success_fragment("<script>alert('x')</script>"),
            @"<h2>Thank you for registering, &lt;script&gt;alert(&#x27;x&#x27;)&lt;/script&gt;!</h2>"
        );
    }

    #[rstest]
    fn backend_failures_are_generic() {
        let fragment = fragment_for_error(&Error::service_unavailable("pool timed out"));
        assert!(!fragment.contains("pool"));
        assert_snapshot!(
            fragment,
            @"<h2>Error: There was an issue with registration. Please try again later.</h2>"
        );
    }

    #[rstest]
    fn validation_failures_show_message() {
        let fragment = fragment_for_error(&Error::invalid_request("Invalid email format!"));
        assert_snapshot!(fragment, @"<h2>Error: Invalid email format!</h2>");
    }

    #[rstest]
    #[case("plain", false)]
    #[case("a & b", true)]
    #[case("\"quoted\"", true)]
    fn escape_borrows_when_clean(#[case] input: &str, #[case] owned: bool) {
        assert_eq!(matches!(escape(input), Cow::Owned(_)), owned);
    }
}
