//! Middleware attaching a request-scoped trace identifier.
//!
//! Every request runs inside [`TraceId::scope`] and every response carries the
//! identifier in the `trace-id` header, so log lines can be correlated with
//! what the client saw.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{Instrument, info_span, warn};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Tracing middleware.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_service::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

/// Service produced by [`Trace`]; not used directly.
pub struct TraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = TraceId::generate();
        let span = info_span!(
            "request",
            %trace_id,
            method = %req.method(),
            path = %req.path(),
        );
        // Extractors and the handler body run when this future is polled.
        let fut = TraceId::scope(trace_id, self.service.call(req));
        Box::pin(
            async move {
                let mut res = fut.await?;
                match HeaderValue::from_str(&trace_id.to_string()) {
                    Ok(value) => {
                        res.headers_mut()
                            .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                    }
                    Err(error) => warn!(%error, "trace id is not a valid header value"),
                }
                Ok(res)
            }
            .instrument(span),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Error as DomainError;
    use actix_web::{App, HttpResponse, test, web};

    #[actix_web::test]
    async fn response_carries_trace_header() {
        let app = test::init_service(
            App::new()
                .wrap(Trace)
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        let header = res
            .headers()
            .get(TRACE_ID_HEADER)
            .expect("trace id header")
            .to_str()
            .expect("ascii header");
        assert!(header.parse::<TraceId>().is_ok());
    }

    #[actix_web::test]
    async fn handler_errors_carry_the_request_trace_id() {
        let app = test::init_service(App::new().wrap(Trace).route(
            "/",
            web::get().to(|| async {
                let error = DomainError::conflict("taken");
                let captured = error.trace_id().map(str::to_owned);
                HttpResponse::Ok().json(captured)
            }),
        ))
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let header = res
            .headers()
            .get(TRACE_ID_HEADER)
            .expect("trace id header")
            .to_str()
            .expect("ascii header")
            .to_owned();
        let captured: Option<String> = test::read_body_json(res).await;

        assert_eq!(captured.as_deref(), Some(header.as_str()));
    }

    #[actix_web::test]
    async fn error_bodies_carry_only_the_message() {
        let app = test::init_service(App::new().wrap(Trace).route(
            "/",
            web::get().to(|| async { Err::<HttpResponse, _>(DomainError::conflict("taken")) }),
        ))
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert!(res.headers().contains_key(TRACE_ID_HEADER));
        let body: String = test::read_body_json(res).await;

        assert_eq!(body, "taken");
    }
}
