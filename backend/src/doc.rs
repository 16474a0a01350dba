//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer along with
//! the request and response bodies and the domain error wrappers
//! ([`ErrorSchema`], [`ErrorCodeSchema`]) that describe failures without
//! coupling domain types to utoipa.
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::books::{BookDetailResponse, BookSummaryResponse, CreateBookRequest};
use crate::inbound::http::lending::ReturnRequest;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{CreateUserRequest, UserDetailResponse, UserSummaryResponse};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library backend API",
        description = "Register users and books, lend and return books, and read ratings."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::books::create_book,
        crate::inbound::http::books::list_books,
        crate::inbound::http::books::get_book,
        crate::inbound::http::lending::borrow_book,
        crate::inbound::http::lending::return_book,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreateUserRequest,
        UserSummaryResponse,
        UserDetailResponse,
        CreateBookRequest,
        BookSummaryResponse,
        BookDetailResponse,
        ReturnRequest,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "users", description = "Library members"),
        (name = "books", description = "Lendable books and their ratings"),
        (name = "lending", description = "Borrowing and returning books"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
