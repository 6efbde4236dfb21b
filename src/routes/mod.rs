pub mod body;
pub mod forms;
pub mod submissions;

use axum::Router;
use axum::routing::get;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Forms
        .route("/api/forms/", get(forms::list).post(forms::create))
        .route(
            "/api/forms/{id}/",
            get(forms::get).put(forms::update).delete(forms::delete),
        )
        .route(
            "/api/forms/{id}/submissions/",
            get(submissions::list_by_form),
        )
        // Submissions
        .route(
            "/api/submissions/",
            get(submissions::list).post(submissions::create),
        )
}
