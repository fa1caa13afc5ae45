use axum::Router;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{
        AdminStats, AlreadyExists, BiodataQuery, CheckoutTotal, CreatePaymentIntent,
        DeleteResult, InsertOneResult, PaymentIntentResponse, UpdateResult,
    },
    AppState,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        // User endpoints
        crate::routes::users::list_users,
        crate::routes::users::get_user,
        crate::routes::users::create_user,
        crate::routes::users::make_admin,
        crate::routes::users::make_premium,
        // Biodata endpoints
        crate::routes::biodatas::list_biodatas,
        crate::routes::biodatas::get_biodata,
        crate::routes::biodatas::list_by_category,
        crate::routes::biodatas::get_biodata_by_user,
        crate::routes::biodatas::get_biodata_for_checkout,
        crate::routes::biodatas::save_biodata,
        // Story endpoints
        crate::routes::stories::list_stories,
        crate::routes::stories::create_story,
        // Premium endpoints
        crate::routes::premium::list_premium_requests,
        crate::routes::premium::create_premium_request,
        crate::routes::premium::delete_premium_requests,
        // Favourite endpoints
        crate::routes::favourites::list_favourites,
        crate::routes::favourites::create_favourite,
        crate::routes::favourites::delete_favourite,
        // Contact endpoints
        crate::routes::contact::list_contact_requests,
        crate::routes::contact::list_contact_requests_by_email,
        crate::routes::contact::create_contact_request,
        crate::routes::contact::approve_contact_request,
        crate::routes::contact::delete_contact_request,
        // Checkout and payment endpoints
        crate::routes::checkout::checkout_totals,
        crate::routes::checkout::create_checkout,
        crate::routes::payments::create_payment_intent,
        crate::routes::stats::admin_stats,
    ),
    components(
        schemas(
            InsertOneResult, AlreadyExists, UpdateResult, DeleteResult, BiodataQuery,
            CheckoutTotal, CreatePaymentIntent, PaymentIntentResponse, AdminStats
        )
    ),
    tags(
        (name = "users", description = "User accounts and roles"),
        (name = "biodatas", description = "Biodata profiles and search"),
        (name = "stories", description = "Success stories"),
        (name = "premium", description = "Premium membership requests"),
        (name = "favourites", description = "Saved biodatas"),
        (name = "contact", description = "Contact information requests"),
        (name = "checkout", description = "Completed payments"),
        (name = "payments", description = "Payment intent creation"),
        (name = "stats", description = "Admin dashboard"),
    ),
    info(
        title = "Wedlock API",
        version = "0.3.1",
        description = "Matrimony service backend"
    )
)]
pub struct ApiDoc;

pub fn create_swagger_router() -> Router<Arc<AppState>> {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_collection_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/users",
            "/users/{email}",
            "/users/admin/{id}",
            "/biodatas",
            "/biodatas/checkout/{id}",
            "/stories",
            "/premium/{id}",
            "/favourites/{id}",
            "/contact/{id}",
            "/checkout",
            "/create-payment-intent",
            "/admin-stats",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
