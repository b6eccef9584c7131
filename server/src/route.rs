mod rental;
mod returns;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handler::{AppModule, Modules};

pub use self::{rental::RentalRouter, returns::ReturnRouter};

pub fn router<M: Modules>(module: AppModule<M>) -> Router {
    let api = Router::<AppModule<M>>::new()
        .route_returns()
        .route_rentals();

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new())
        .with_state(module)
}
