//! The registration page and its assets, compiled into the binary.

use actix_web::http::header::{CACHE_CONTROL, ContentType};
use actix_web::{HttpResponse, get, mime};

const INDEX_HTML: &str = include_str!("../../../static/index.html");
const STYLES_CSS: &str = include_str!("../../../static/styles.css");
const SCRIPT_JS: &str = include_str!("../../../static/script.js");

fn asset(content_type: ContentType, body: &'static str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(content_type)
        .insert_header((CACHE_CONTROL, "no-cache"))
        .body(body)
}

/// Registration form.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Registration page", body = String, content_type = "text/html")
    ),
    tags = ["registration"],
    operation_id = "index"
)]
#[get("/")]
pub async fn index() -> HttpResponse {
    asset(ContentType::html(), INDEX_HTML)
}

/// Page stylesheet.
#[get("/styles.css")]
pub async fn stylesheet() -> HttpResponse {
    asset(ContentType(mime::TEXT_CSS_UTF_8), STYLES_CSS)
}

/// Clock script filling the `#date-time` element.
#[get("/script.js")]
pub async fn script() -> HttpResponse {
    asset(ContentType(mime::APPLICATION_JAVASCRIPT_UTF_8), SCRIPT_JS)
}
