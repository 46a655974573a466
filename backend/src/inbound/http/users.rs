//! Users API handlers.
//!
//! ```text
//! GET    /users
//! GET    /users/{id}
//! POST   /users        {"name":"Ada","email":"ada@example.com"}
//! PUT    /users/{id}   {"name":"Ada","email":"ada@example.com"}
//! DELETE /users/{id}
//! ```
//!
//! Handlers only unwrap extractors and delegate to the ports held in
//! [`HttpState`]; validation and store access live in the domain.

use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::{User, UserDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Body returned by a successful delete.
pub const USER_DELETED: &str = "User deleted";

/// Body returned when a known path is requested with an unsupported method.
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";

/// List every user.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users", body = [User]),
        (status = 500, description = "Internal server error", body = String),
        (status = 503, description = "Database unavailable", body = String)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(users))
}

/// Fetch one user by identifier.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 400, description = "Invalid user id", body = String),
        (status = 404, description = "User not found", body = String),
        (status = 500, description = "Internal server error", body = String)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let user = state.users.get_user(&id).await?;
    Ok(web::Json(user))
}

/// Create a user. A `null` body is treated as an empty draft.
#[utoipa::path(
    post,
    path = "/users",
    request_body = UserDraft,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid payload or input", body = String),
        (status = 409, description = "Name or email already taken", body = String),
        (status = 500, description = "Internal server error", body = String)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<Option<UserDraft>>,
) -> ApiResult<HttpResponse> {
    let draft = payload.into_inner().unwrap_or_default();
    let user = state.users_command.create_user(draft).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Replace a user's name and email.
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    request_body = UserDraft,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Invalid payload, input or id; or no changes", body = String),
        (status = 404, description = "User not found", body = String),
        (status = 409, description = "Name or email in use by another user", body = String),
        (status = 500, description = "Internal server error", body = String)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    id: web::Path<String>,
    payload: web::Json<Option<UserDraft>>,
) -> ApiResult<web::Json<User>> {
    let draft = payload.into_inner().unwrap_or_default();
    let user = state.users_command.update_user(&id, draft).await?;
    Ok(web::Json(user))
}

/// Delete a user. Deleting an unknown id still succeeds.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Always the string \"User deleted\"", body = String),
        (status = 400, description = "Invalid user id", body = String),
        (status = 500, description = "Internal server error", body = String)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<&'static str>> {
    state.users_command.delete_user(&id).await?;
    Ok(web::Json(USER_DELETED))
}

async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(METHOD_NOT_ALLOWED)
}

/// Register the users routes on a scope or app.
///
/// The method-guarded handlers come first; the unguarded resources behind
/// them answer any other method on the same paths with a 405.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_users)
        .service(get_user)
        .service(create_user)
        .service(update_user)
        .service(delete_user)
        .service(web::resource("/users").to(method_not_allowed))
        .service(web::resource("/users/{id}").to(method_not_allowed));
}
