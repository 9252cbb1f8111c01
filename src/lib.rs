pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::cart_service::CartService;
use application::catalog_service::{CollectionService, ProductService, ReviewService};
use application::customer_service::CustomerService;
use application::order_service::OrderService;
use errors::AppError;
use infrastructure::cart_repo::DieselCartRepository;
use infrastructure::catalog_repo::{
    DieselCollectionRepository, DieselProductRepository, DieselReviewRepository,
};
use infrastructure::customer_repo::DieselCustomerRepository;
use infrastructure::order_repo::DieselOrderRepository;

pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub type Products = ProductService<DieselProductRepository>;
pub type Collections = CollectionService<DieselCollectionRepository>;
pub type Reviews = ReviewService<DieselReviewRepository, DieselProductRepository>;
pub type Carts = CartService<DieselCartRepository, DieselProductRepository>;
pub type Customers = CustomerService<DieselCustomerRepository>;
pub type Orders = OrderService<DieselOrderRepository>;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::products::delete_product,
        handlers::reviews::list_reviews,
        handlers::reviews::get_review,
        handlers::reviews::create_review,
        handlers::reviews::update_review,
        handlers::reviews::delete_review,
        handlers::collections::list_collections,
        handlers::collections::get_collection,
        handlers::collections::create_collection,
        handlers::collections::update_collection,
        handlers::collections::delete_collection,
        handlers::carts::create_cart,
        handlers::carts::get_cart,
        handlers::carts::delete_cart,
        handlers::cart_items::list_items,
        handlers::cart_items::get_item,
        handlers::cart_items::add_item,
        handlers::cart_items::update_item,
        handlers::cart_items::remove_item,
        handlers::customers::list_customers,
        handlers::customers::get_customer,
        handlers::customers::create_customer,
        handlers::customers::update_customer,
        handlers::customers::delete_customer,
        handlers::orders::list_orders,
        handlers::orders::get_order,
        handlers::orders::create_order,
        handlers::orders::update_order,
    ),
    tags(
        (name = "products"),
        (name = "reviews"),
        (name = "collections"),
        (name = "carts"),
        (name = "cart items"),
        (name = "customers"),
        (name = "orders"),
    )
)]
pub struct ApiDoc;

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    log::info!("applied {} pending migration(s)", applied.len());
    Ok(())
}

/// Register services and the route table on an actix `App`.
///
/// Shared by [`build_server`] and the HTTP tests.
pub fn configure(pool: DbPool) -> impl Fn(&mut web::ServiceConfig) + Clone + Send + 'static {
    move |cfg: &mut web::ServiceConfig| {
        let catalog = || DieselProductRepository::new(pool.clone());

        cfg.app_data(web::Data::new(Products::new(catalog())))
            .app_data(web::Data::new(Collections::new(
                DieselCollectionRepository::new(pool.clone()),
            )))
            .app_data(web::Data::new(Reviews::new(
                DieselReviewRepository::new(pool.clone()),
                catalog(),
            )))
            .app_data(web::Data::new(Carts::new(
                DieselCartRepository::new(pool.clone()),
                catalog(),
            )))
            .app_data(web::Data::new(Customers::new(
                DieselCustomerRepository::new(pool.clone()),
            )))
            .app_data(web::Data::new(Orders::new(DieselOrderRepository::new(
                pool.clone(),
            ))))
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                AppError::BadRequest(err.to_string()).into()
            }))
            .app_data(web::PathConfig::default().error_handler(|err, _req| {
                AppError::NotFound(err.to_string()).into()
            }))
            .service(
                web::scope("/products")
                    .route("", web::get().to(handlers::products::list_products))
                    .route("", web::post().to(handlers::products::create_product))
                    .route("/{id}", web::get().to(handlers::products::get_product))
                    .route("/{id}", web::put().to(handlers::products::update_product))
                    .route("/{id}", web::delete().to(handlers::products::delete_product))
                    .route(
                        "/{product_id}/reviews",
                        web::get().to(handlers::reviews::list_reviews),
                    )
                    .route(
                        "/{product_id}/reviews",
                        web::post().to(handlers::reviews::create_review),
                    )
                    .route(
                        "/{product_id}/reviews/{id}",
                        web::get().to(handlers::reviews::get_review),
                    )
                    .route(
                        "/{product_id}/reviews/{id}",
                        web::put().to(handlers::reviews::update_review),
                    )
                    .route(
                        "/{product_id}/reviews/{id}",
                        web::delete().to(handlers::reviews::delete_review),
                    ),
            )
            .service(
                web::scope("/collections")
                    .route("", web::get().to(handlers::collections::list_collections))
                    .route("", web::post().to(handlers::collections::create_collection))
                    .route("/{id}", web::get().to(handlers::collections::get_collection))
                    .route("/{id}", web::put().to(handlers::collections::update_collection))
                    .route(
                        "/{id}",
                        web::delete().to(handlers::collections::delete_collection),
                    ),
            )
            .service(
                web::scope("/carts")
                    .route("", web::post().to(handlers::carts::create_cart))
                    .route("/{id}", web::get().to(handlers::carts::get_cart))
                    .route("/{id}", web::delete().to(handlers::carts::delete_cart))
                    .route(
                        "/{cart_id}/items",
                        web::get().to(handlers::cart_items::list_items),
                    )
                    .route(
                        "/{cart_id}/items",
                        web::post().to(handlers::cart_items::add_item),
                    )
                    .route(
                        "/{cart_id}/items/{id}",
                        web::get().to(handlers::cart_items::get_item),
                    )
                    .route(
                        "/{cart_id}/items/{id}",
                        web::patch().to(handlers::cart_items::update_item),
                    )
                    .route(
                        "/{cart_id}/items/{id}",
                        web::delete().to(handlers::cart_items::remove_item),
                    ),
            )
            .service(
                web::scope("/customers")
                    .route("", web::get().to(handlers::customers::list_customers))
                    .route("", web::post().to(handlers::customers::create_customer))
                    .route("/{id}", web::get().to(handlers::customers::get_customer))
                    .route("/{id}", web::put().to(handlers::customers::update_customer))
                    .route("/{id}", web::delete().to(handlers::customers::delete_customer)),
            )
            .service(
                web::scope("/orders")
                    .route("", web::get().to(handlers::orders::list_orders))
                    .route("", web::post().to(handlers::orders::create_order))
                    .route("/{id}", web::get().to(handlers::orders::get_order))
                    .route("/{id}", web::patch().to(handlers::orders::update_order)),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            );
    }
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    pool: DbPool,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let routes = configure(pool);
    Ok(HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .configure(routes.clone())
    })
    .bind((host.to_string(), port))?
    .run())
}
