use axum::{
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::state::ApiState;

pub fn app() -> Router<ApiState> {
    Router::<ApiState>::new()
        .route(
            "/books",
            get(super::list_books::list_books)
                .post(super::create_book::create_book)
                .put(super::update_book::update_book),
        )
        .route(
            "/books/:bookId",
            get(super::get_book::get_book).delete(super::delete_book::delete_book),
        )
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        ))
}
