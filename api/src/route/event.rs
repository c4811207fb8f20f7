use axum::{
    routing::{delete, get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::{
    booking::{book_event, cancel_booking},
    event::{
        delete_event, register_event, show_attendees, show_discover_list, show_event,
        show_event_list, update_event,
    },
};

pub fn build_event_routers() -> Router<AppRegistry> {
    let events_routers = Router::new()
        .route("/", post(register_event))
        .route("/", get(show_event_list))
        .route("/discover", get(show_discover_list))
        .route("/:event_id", get(show_event))
        .route("/:event_id", put(update_event))
        .route("/:event_id", delete(delete_event))
        .route("/:event_id/bookings", post(book_event))
        .route("/:event_id/bookings", delete(cancel_booking))
        .route("/:event_id/attendees", get(show_attendees));

    Router::new().nest("/events", events_routers)
}
