use crate::handler::user::{get_current_user, get_current_user_events, update_current_user};
use axum::{
    routing::{get, put},
    Router,
};
use registry::AppRegistry;

pub fn build_user_routers() -> Router<AppRegistry> {
    let user_routers = Router::new()
        .route("/me", get(get_current_user))
        .route("/me", put(update_current_user))
        .route("/me/events", get(get_current_user_events));

    Router::new().nest("/users", user_routers)
}
