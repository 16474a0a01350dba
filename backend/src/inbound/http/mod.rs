//! HTTP inbound adapter exposing REST endpoints.

pub mod books;
pub mod error;
pub mod health;
pub mod lending;
pub mod schemas;
pub mod state;
pub mod users;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register every library endpoint on an app or scope.
///
/// Health probes are registered separately because they depend on
/// [`health::HealthState`] rather than the domain ports.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use library_backend::inbound::http::routes;
///
/// let app = App::new().configure(routes);
/// ```
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .service(users::create_user)
        .service(users::list_users)
        .service(users::get_user)
        .service(books::create_book)
        .service(books::list_books)
        .service(books::get_book)
        .service(lending::borrow_book)
        .service(lending::return_book);
}
