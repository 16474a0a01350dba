//! Books API handlers.
//!
//! ```text
//! POST /books {"name":"Dune"}
//! GET /books
//! GET /books/{id}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::BookDetail;
use crate::domain::{BookSummary, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{ID, book_name, parse_book_id};

/// Request body for `POST /books`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateBookRequest {
    /// Title, 1–255 characters.
    #[schema(example = "Dune")]
    pub name: String,
}

/// Book identifier and title.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookSummaryResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Dune")]
    pub name: String,
}

impl From<BookSummary> for BookSummaryResponse {
    fn from(value: BookSummary) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into(),
        }
    }
}

/// Book title with its presented average rating.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookDetailResponse {
    pub name: String,
    /// Mean rating to one decimal place, or `"No ratings."`.
    #[schema(example = "8.0")]
    pub average_rating: String,
}

impl From<BookDetail> for BookDetailResponse {
    fn from(value: BookDetail) -> Self {
        Self {
            name: value.name.into(),
            average_rating: value.average_rating.to_string(),
        }
    }
}

/// Register a book with no ratings.
#[utoipa::path(
    post,
    path = "/books",
    request_body = CreateBookRequest,
    responses(
        (status = 201, description = "Book created", body = BookSummaryResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["books"],
    operation_id = "createBook"
)]
#[post("/books")]
pub async fn create_book(
    state: web::Data<HttpState>,
    payload: web::Json<CreateBookRequest>,
) -> ApiResult<HttpResponse> {
    let name = book_name(payload.into_inner().name)?;
    let created = state.books.create_book(name).await?;
    Ok(HttpResponse::Created().json(BookSummaryResponse::from(created)))
}

/// List all books in identifier order.
#[utoipa::path(
    get,
    path = "/books",
    responses(
        (status = 200, description = "Books", body = [BookSummaryResponse]),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["books"],
    operation_id = "listBooks"
)]
#[get("/books")]
pub async fn list_books(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<BookSummaryResponse>>> {
    let books = state.books_query.list_books().await?;
    Ok(web::Json(books.into_iter().map(Into::into).collect()))
}

/// Fetch a book with its average rating.
#[utoipa::path(
    get,
    path = "/books/{id}",
    params(("id" = i32, Path, description = "Book identifier")),
    responses(
        (status = 200, description = "Book detail", body = BookDetailResponse),
        (status = 400, description = "Invalid identifier", body = Error),
        (status = 404, description = "Book not found", body = Error),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["books"],
    operation_id = "getBookDetail"
)]
#[get("/books/{id}")]
pub async fn get_book(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<BookDetailResponse>> {
    let id = parse_book_id(&path.into_inner(), ID)?;
    let detail = state.books_query.get_book_detail(id).await?;
    Ok(web::Json(detail.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        MockBooksCommand, MockBooksQuery, MockLendingCommand, MockUsersCommand, MockUsersQuery,
    };
    use crate::domain::{AverageRating, BookId, BookName};
    use crate::inbound::http::state::HttpStatePorts;
    use crate::inbound::http::validation::json_config;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn state_with_books(books: MockBooksCommand, books_query: MockBooksQuery) -> HttpState {
        HttpState::new(HttpStatePorts {
            users: Arc::new(MockUsersCommand::new()),
            users_query: Arc::new(MockUsersQuery::new()),
            books: Arc::new(books),
            books_query: Arc::new(books_query),
            lending: Arc::new(MockLendingCommand::new()),
        })
    }

    async fn call(state: HttpState, request: actix_test::TestRequest) -> (StatusCode, Value) {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .app_data(json_config())
                .service(create_book)
                .service(list_books)
                .service(get_book),
        )
        .await;
        let response = actix_test::call_service(&app, request.to_request()).await;
        let status = response.status();
        let body = actix_test::read_body(response).await;
        let value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).expect("JSON body")
        };
        (status, value)
    }

    #[actix_web::test]
    async fn create_book_returns_created_summary() {
        let mut books = MockBooksCommand::new();
        books
            .expect_create_book()
            .withf(|name| name.as_ref() == "Dune")
            .times(1)
            .returning(|name| {
                Ok(BookSummary {
                    id: BookId::new(4),
                    name,
                })
            });

        let (status, body) = call(
            state_with_books(books, MockBooksQuery::new()),
            actix_test::TestRequest::post()
                .uri("/books")
                .set_json(json!({ "name": "Dune" })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!({ "id": 4, "name": "Dune" }));
    }

    #[rstest]
    #[case(json!({ "name": "" }), "empty_name")]
    #[case(json!({ "name": "b".repeat(256) }), "name_too_long")]
    #[case(json!({}), "invalid_body")]
    #[case(json!({ "name": "Dune", "author": "Herbert" }), "invalid_body")]
    #[case(json!({ "name": 7 }), "invalid_body")]
    #[actix_web::test]
    async fn create_book_rejects_invalid_bodies(#[case] payload: Value, #[case] code: &str) {
        let mut books = MockBooksCommand::new();
        books.expect_create_book().never();

        let (status, body) = call(
            state_with_books(books, MockBooksQuery::new()),
            actix_test::TestRequest::post()
                .uri("/books")
                .set_json(payload),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["details"]["code"], code);
    }

    #[rstest]
    #[case(AverageRating::Mean(8.0), "8.0")]
    #[case(AverageRating::NoRatings, "No ratings.")]
    #[actix_web::test]
    async fn book_detail_renders_average_rating(
        #[case] rating: AverageRating,
        #[case] expected: &str,
    ) {
        let mut query = MockBooksQuery::new();
        query
            .expect_get_book_detail()
            .withf(|id| *id == BookId::new(1))
            .returning(move |_| {
                Ok(BookDetail {
                    name: BookName::new("Dune").expect("valid title"),
                    average_rating: rating,
                })
            });

        let (status, body) = call(
            state_with_books(MockBooksCommand::new(), query),
            actix_test::TestRequest::get().uri("/books/1"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "name": "Dune", "averageRating": expected }));
    }

    #[actix_web::test]
    async fn book_detail_rejects_non_integer_id() {
        let mut query = MockBooksQuery::new();
        query.expect_get_book_detail().never();

        let (status, body) = call(
            state_with_books(MockBooksCommand::new(), query),
            actix_test::TestRequest::get().uri("/books/dune"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["details"],
            json!({ "field": "id", "value": "dune", "code": "invalid_integer" })
        );
    }

    #[actix_web::test]
    async fn missing_book_is_not_found() {
        let mut query = MockBooksQuery::new();
        query
            .expect_get_book_detail()
            .returning(|_| Err(Error::not_found("book not found")));

        let (status, body) = call(
            state_with_books(MockBooksCommand::new(), query),
            actix_test::TestRequest::get().uri("/books/9"),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "book not found");
    }

    #[actix_web::test]
    async fn list_books_preserves_port_order() {
        let mut query = MockBooksQuery::new();
        query.expect_list_books().returning(|| {
            Ok(["Dune", "Emma"]
                .into_iter()
                .zip(1..)
                .map(|(name, id)| BookSummary {
                    id: BookId::new(id),
                    name: BookName::new(name).expect("valid title"),
                })
                .collect())
        });

        let (status, body) = call(
            state_with_books(MockBooksCommand::new(), query),
            actix_test::TestRequest::get().uri("/books"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{ "id": 1, "name": "Dune" }, { "id": 2, "name": "Emma" }])
        );
    }
}
