use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Request},
    middleware::Next,
    response::Response,
};

/// Every route in this app renders HTML (or a redirect), so the
/// content-type is stamped here once instead of in each handler.
pub async fn set_html_content_type<B>(
    request: Request<B>,
    next: Next<B>,
) -> Response {
    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("text/html"));

    response
}
