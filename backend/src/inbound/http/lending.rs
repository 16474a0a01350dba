//! Lending API handlers.
//!
//! ```text
//! POST /users/{userId}/borrow/{bookId}
//! POST /users/{userId}/return/{bookId} {"score":8}
//! ```
//!
//! The return body is optional: an empty body returns the book without a
//! rating.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{BookId, Error, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    BOOK_ID, USER_ID, optional_json, parse_book_id, parse_user_id, score,
};

/// Optional request body for `POST /users/{userId}/return/{bookId}`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ReturnRequest {
    /// Rating between 0 and 10 inclusive.
    #[serde(default)]
    #[schema(example = 8, minimum = 0, maximum = 10)]
    pub score: Option<f64>,
}

fn lending_target(path: web::Path<(String, String)>) -> Result<(UserId, BookId), Error> {
    let (user_id, book_id) = path.into_inner();
    Ok((
        parse_user_id(&user_id, USER_ID)?,
        parse_book_id(&book_id, BOOK_ID)?,
    ))
}

/// Lend a book to a user.
#[utoipa::path(
    post,
    path = "/users/{userId}/borrow/{bookId}",
    params(
        ("userId" = i32, Path, description = "Borrowing user"),
        ("bookId" = i32, Path, description = "Book to lend")
    ),
    responses(
        (status = 204, description = "Book borrowed"),
        (status = 400, description = "Invalid identifier or book already borrowed", body = Error),
        (status = 404, description = "User or book not found", body = Error),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["lending"],
    operation_id = "borrowBook"
)]
#[post("/users/{userId}/borrow/{bookId}")]
pub async fn borrow_book(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (user_id, book_id) = lending_target(path)?;
    state.lending.borrow(user_id, book_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Take a book back from a user, optionally recording a rating.
#[utoipa::path(
    post,
    path = "/users/{userId}/return/{bookId}",
    params(
        ("userId" = i32, Path, description = "Returning user"),
        ("bookId" = i32, Path, description = "Book being returned")
    ),
    request_body(content = Option<ReturnRequest>, description = "Optional rating"),
    responses(
        (status = 204, description = "Book returned"),
        (status = 400, description = "Invalid request or book not borrowed", body = Error),
        (status = 404, description = "User or book not found", body = Error),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["lending"],
    operation_id = "returnBook"
)]
#[post("/users/{userId}/return/{bookId}")]
pub async fn return_book(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let (user_id, book_id) = lending_target(path)?;
    let request = optional_json::<ReturnRequest>(&body)?.unwrap_or_default();
    let score = score(request.score)?;
    state.lending.return_book(user_id, book_id, score).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        MockBooksCommand, MockBooksQuery, MockLendingCommand, MockUsersCommand, MockUsersQuery,
    };
    use crate::domain::Score;
    use crate::inbound::http::state::HttpStatePorts;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn state_with(lending: MockLendingCommand) -> HttpState {
        HttpState::new(HttpStatePorts {
            users: Arc::new(MockUsersCommand::new()),
            users_query: Arc::new(MockUsersQuery::new()),
            books: Arc::new(MockBooksCommand::new()),
            books_query: Arc::new(MockBooksQuery::new()),
            lending: Arc::new(lending),
        })
    }

    async fn send(
        lending: MockLendingCommand,
        request: actix_test::TestRequest,
    ) -> actix_web::dev::ServiceResponse {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state_with(lending)))
                .service(borrow_book)
                .service(return_book),
        )
        .await;
        actix_test::call_service(&app, request.to_request()).await
    }

    async fn error_body(response: actix_web::dev::ServiceResponse) -> Value {
        let body = actix_test::read_body(response).await;
        serde_json::from_slice(&body).expect("error payload")
    }

    #[actix_web::test]
    async fn borrow_returns_no_content() {
        let mut lending = MockLendingCommand::new();
        lending
            .expect_borrow()
            .withf(|user, book| *user == UserId::new(1) && *book == BookId::new(2))
            .times(1)
            .returning(|_, _| Ok(()));

        let response = send(
            lending,
            actix_test::TestRequest::post().uri("/users/1/borrow/2"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[rstest]
    #[case("/users/x/borrow/2", "userId", "x")]
    #[case("/users/1/borrow/2.5", "bookId", "2.5")]
    #[case("/users/1/return/b", "bookId", "b")]
    #[actix_web::test]
    async fn non_integer_path_ids_are_rejected(
        #[case] uri: &str,
        #[case] field: &str,
        #[case] value: &str,
    ) {
        let mut lending = MockLendingCommand::new();
        lending.expect_borrow().never();
        lending.expect_return_book().never();

        let response = send(lending, actix_test::TestRequest::post().uri(uri)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            error_body(response).await["details"],
            json!({ "field": field, "value": value, "code": "invalid_integer" })
        );
    }

    #[rstest]
    #[case::empty_body(None, None)]
    #[case::empty_object(Some(json!({})), None)]
    #[case::null_score(Some(json!({ "score": null })), None)]
    #[case::scored(Some(json!({ "score": 8 })), Some(8.0))]
    #[case::fractional(Some(json!({ "score": 7.5 })), Some(7.5))]
    #[case::lower_bound(Some(json!({ "score": 0 })), Some(0.0))]
    #[actix_web::test]
    async fn return_passes_optional_score(
        #[case] payload: Option<Value>,
        #[case] expected: Option<f64>,
    ) {
        let mut lending = MockLendingCommand::new();
        lending
            .expect_return_book()
            .withf(move |_, _, score| score.map(Score::get) == expected)
            .times(1)
            .returning(|_, _, _| Ok(()));

        let request = actix_test::TestRequest::post().uri("/users/1/return/2");
        let request = match payload {
            Some(payload) => request.set_json(payload),
            None => request,
        };
        let response = send(lending, request).await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[rstest]
    #[case(json!({ "score": 11 }), "score_out_of_range")]
    #[case(json!({ "score": -0.5 }), "score_out_of_range")]
    #[case(json!({ "score": "8" }), "invalid_body")]
    #[case(json!({ "score": 8, "comment": "great" }), "invalid_body")]
    #[actix_web::test]
    async fn invalid_scores_are_rejected_before_the_core(
        #[case] payload: Value,
        #[case] code: &str,
    ) {
        let mut lending = MockLendingCommand::new();
        lending.expect_return_book().never();

        let response = send(
            lending,
            actix_test::TestRequest::post()
                .uri("/users/1/return/2")
                .set_json(payload),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = error_body(response).await;
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["details"]["code"], code);
    }

    fn duplicate_borrow_error() -> Error {
        Error::already_borrowed("book already borrowed by the user")
    }

    fn borrow_failing_with(rejection: Error) -> MockLendingCommand {
        let mut lending = MockLendingCommand::new();
        lending
            .expect_borrow()
            .withf(|user, book| *user == UserId::new(1) && *book == BookId::new(2))
            .times(1)
            .return_once(move |_, _| Err(rejection));
        lending
    }

    fn assert_already_borrowed(status: StatusCode, body: &Value) {
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "already_borrowed");
        assert_eq!(body["message"], "book already borrowed by the user");
    }

    #[rstest]
    #[actix_web::test]
    async fn duplicate_borrow_is_reported_to_the_client() {
        let lending = borrow_failing_with(duplicate_borrow_error());
        let response = send(
            lending,
            actix_test::TestRequest::post().uri("/users/1/borrow/2"),
        )
        .await;
        let status = response.status();
        assert_already_borrowed(status, &error_body(response).await);
    }

    #[actix_web::test]
    async fn returning_a_book_not_held_is_bad_request() {
        let mut lending = MockLendingCommand::new();
        lending
            .expect_return_book()
            .returning(|_, _, _| Err(Error::not_borrowed("book not borrowed by the user")));

        let response = send(
            lending,
            actix_test::TestRequest::post().uri("/users/1/return/2"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_body(response).await["code"], "not_borrowed");
    }

    #[actix_web::test]
    async fn collapsed_not_found_is_404() {
        let mut lending = MockLendingCommand::new();
        lending
            .expect_borrow()
            .returning(|_, _| Err(Error::not_found("user or book not found")));

        let response = send(
            lending,
            actix_test::TestRequest::post().uri("/users/1/borrow/99"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(error_body(response).await["message"], "user or book not found");
    }
}
