use axum::Router;
use std::sync::Arc;

use crate::AppState;

pub mod biodatas;
pub mod checkout;
pub mod contact;
pub mod favourites;
pub mod payments;
pub mod premium;
pub mod stats;
pub mod stories;
pub mod users;

/// Every collection endpoint, mounted at the paths clients already use.
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/users", users::router())
        .nest("/biodatas", biodatas::router())
        .nest("/stories", stories::router())
        .nest("/premium", premium::router())
        .nest("/favourites", favourites::router())
        .nest("/contact", contact::router())
        .nest("/checkout", checkout::router())
        .merge(payments::router())
        .merge(stats::router())
}
