//! In-memory backend speaking the `/api/products` contract. Used for local
//! demos and by the integration tests; it is not a production service.

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{error, web, App, HttpServer};
use tracing::info;

use crate::settings::StubSettings;

pub mod handlers;
pub mod store;

pub use store::ProductStore;

pub struct AppState {
    pub store: ProductStore,
}

pub fn app_state(store: ProductStore) -> web::Data<AppState> {
    web::Data::new(AppState { store })
}

/// Routes for `/api/products`. Non-numeric ids are rejected with 400.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::PathConfig::default().error_handler(|err, _| error::ErrorBadRequest(err)),
    )
    .service(
        web::scope("/api/products")
            .route("", web::get().to(handlers::get_products))
            .route("", web::post().to(handlers::create_product))
            .route("/{id}", web::get().to(handlers::get_product))
            .route("/{id}", web::put().to(handlers::update_product))
            .route("/{id}", web::delete().to(handlers::delete_product)),
    );
}

fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec!["origin", "content-type", "accept", "authorization"])
        .expose_headers(vec!["content-length"])
        .max_age(12 * 60 * 60)
}

pub async fn run(settings: &StubSettings) -> std::io::Result<()> {
    let state = app_state(ProductStore::seeded());
    let address = settings.address();

    info!(%address, "starting stub product backend");
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind(&address)?
    .run()
    .await
}
