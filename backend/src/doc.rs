//! OpenAPI documentation for the users API.
//!
//! [`ApiDoc`] backs Swagger UI in debug builds and the `openapi-dump` binary.

use utoipa::OpenApi;

use crate::domain::{User, UserDraft};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User service API",
        description = "CRUD over users identified by a numeric id, with unique names and emails."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
    ),
    components(schemas(User, UserDraft)),
    tags(
        (name = "users", description = "Operations related to users")
    )
)]
pub struct ApiDoc;
