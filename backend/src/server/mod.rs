//! Server construction and middleware wiring.

mod config;
mod settings;

pub use config::ServerConfig;
pub use settings::{DEFAULT_BIND_ADDR, ServerSettings, SettingsError};

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::UserService;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{json_config, users};
use crate::middleware::{JsonContentType, Trace};
use crate::outbound::persistence::DieselUserRepository;

/// Build the application around `http_state`.
///
/// The users routes live in an unprefixed scope wrapped by
/// [`JsonContentType`], so unmatched paths fall through to that scope's
/// default 404 and are labelled JSON too. Swagger UI (debug builds only) is
/// registered first and keeps its own content types.
pub fn build_app(
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("")
        .wrap(JsonContentType)
        .configure(users::configure);

    let app = App::new()
        .app_data(http_state)
        .app_data(json_config())
        .wrap(Trace);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    app.service(api)
}

/// Construct an Actix HTTP server from `config`.
///
/// # Returns
/// A [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let ServerConfig { bind_addr, db_pool } = config;
    let service = UserService::new(Arc::new(DieselUserRepository::new(db_pool)));
    let http_state = web::Data::new(HttpState::from_service(Arc::new(service)));

    let server = HttpServer::new(move || build_app(http_state.clone()))
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, "listening");
    Ok(server)
}
