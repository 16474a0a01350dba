//! Users API handlers.
//!
//! ```text
//! POST /users {"name":"Alice"}
//! GET /users
//! GET /users/{id}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, UserSummary};
use crate::domain::ports::UserDetail;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{ID, parse_user_id, user_name};

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
    /// Display name, 1–255 characters.
    #[schema(example = "Alice")]
    pub name: String,
}

/// User identifier and name.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserSummaryResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Alice")]
    pub name: String,
}

impl From<UserSummary> for UserSummaryResponse {
    fn from(value: UserSummary) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into(),
        }
    }
}

/// User with the titles they hold and have returned.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailResponse {
    pub id: i32,
    pub name: String,
    #[schema(example = json!(["Dune"]))]
    pub borrowed_books: Vec<String>,
    pub returned_books: Vec<String>,
}

impl From<UserDetail> for UserDetailResponse {
    fn from(value: UserDetail) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into(),
            borrowed_books: value.borrowed_books.into_iter().map(Into::into).collect(),
            returned_books: value.returned_books.into_iter().map(Into::into).collect(),
        }
    }
}

/// Register a user with no holdings.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserSummaryResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let name = user_name(payload.into_inner().name)?;
    let created = state.users.create_user(name).await?;
    Ok(HttpResponse::Created().json(UserSummaryResponse::from(created)))
}

/// List all users in identifier order.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use library_backend::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users", body = [UserSummaryResponse]),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<UserSummaryResponse>>> {
    let users = state.users_query.list_users().await?;
    Ok(web::Json(users.into_iter().map(Into::into).collect()))
}

/// Fetch a user with borrowed and returned titles.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User detail", body = UserDetailResponse),
        (status = 400, description = "Invalid identifier", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUserDetail"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserDetailResponse>> {
    let id = parse_user_id(&path.into_inner(), ID)?;
    let detail = state.users_query.get_user_detail(id).await?;
    Ok(web::Json(detail.into()))
}
