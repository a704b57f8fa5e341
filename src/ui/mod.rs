pub mod client;
pub mod handlers;
pub mod views;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use client::StudentsApi;

#[derive(Clone)]
pub struct UiState {
    pub api: Arc<dyn StudentsApi>,
}

/// One route per page mode: Create at `/`, List at `/students`, Edit at
/// `/edit`. Form submissions post to dedicated actions rather than being
/// dispatched off whichever elements happen to exist on the page.
pub fn router() -> Router<UiState> {
    Router::new()
        .route("/", get(handlers::create_page))
        .route("/students/new", post(handlers::submit_create))
        .route("/students", get(handlers::list_page))
        .route("/delete", post(handlers::delete_action))
        .route("/edit", get(handlers::edit_page).post(handlers::submit_edit))
}
