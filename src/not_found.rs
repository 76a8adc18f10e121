//! Defines the template and route handler for the 404 not found page.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

pub fn get_404_not_found_response() -> Response {
    let page = error_view(
        "Página no encontrada",
        "404",
        "Lo sentimos, no encontramos esa página.",
        "Revisa la dirección o vuelve al panel.",
    );

    (StatusCode::NOT_FOUND, Html(page.into_string())).into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::endpoints;

    use super::get_404_not_found;

    #[tokio::test]
    async fn returns_not_found_status() {
        let response = get_404_not_found().await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn renders_localized_copy_with_a_dashboard_link() {
        let response = get_404_not_found().await;

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Could not get response body");
        let text = String::from_utf8_lossy(&body);

        assert!(text.contains("no encontramos esa página"), "got {text}");
        assert!(text.contains("Volver al panel"), "got {text}");
        assert!(
            text.contains(&format!("href=\"{}\"", endpoints::DASHBOARD_VIEW)),
            "got {text}"
        );
    }
}
