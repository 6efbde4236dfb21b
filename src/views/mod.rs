pub mod admin;
pub mod builder;
pub mod forms;

use axum::Router;
use axum::routing::get;

use crate::state::SharedState;

pub fn view_routes() -> Router<SharedState> {
    Router::new()
        // Builder and viewer shells
        .route("/", get(builder::new_form))
        .route("/{form_id}/", get(builder::edit_form))
        .route("/{form_id}/view/", get(builder::view_form))
        // Saved forms
        .route("/forms/", get(forms::list))
        .route("/forms/{id}/", get(forms::detail))
        // Admin
        .route("/admin/forms/", get(admin::forms_page))
        .route("/admin/forms/{id}/", get(admin::form_page))
}

/// Comma separated component types for table cells.
fn join_types(types: impl IntoIterator<Item = String>) -> String {
    types.into_iter().collect::<Vec<_>>().join(", ")
}
