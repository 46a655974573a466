//! Request correlation identifier.
//!
//! A `TraceId` is minted per request by the [`Trace`](crate::Trace)
//! middleware and kept in Tokio task-local storage, so domain code (errors,
//! log events) can read it without threading it through every call.
//! Task-locals do not follow `tokio::spawn`; wrap spawned work in
//! [`TraceId::scope`] to carry the identifier across.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

/// Response header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static CURRENT: TraceId;
}

/// Per-request trace identifier.
///
/// # Examples
/// ```
/// use user_service::domain::TraceId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let id: TraceId = "00000000-0000-0000-0000-000000000000".parse().expect("uuid");
/// let seen = TraceId::scope(id, async { TraceId::current() }).await;
/// assert_eq!(seen, Some(id));
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Mint a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The identifier in scope for the running task, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` in scope.
    pub async fn scope<Fut>(trace_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        CURRENT.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scope_exposes_identifier_to_nested_futures() {
        let id = TraceId::generate();
        let seen = TraceId::scope(id, async { async { TraceId::current() }.await }).await;
        assert_eq!(seen, Some(id));
    }

    #[tokio::test]
    async fn no_identifier_outside_scope() {
        assert!(TraceId::current().is_none());
    }

    #[test]
    fn parse_rejects_non_uuid_text() {
        assert!("not-a-uuid".parse::<TraceId>().is_err());
    }

    #[test]
    fn display_matches_parsed_input() {
        let raw = "6f1c1a2e-8a43-4d3b-9c55-0e2f4ef0d7a1";
        let id: TraceId = raw.parse().expect("valid uuid");
        assert_eq!(id.to_string(), raw);
    }
}
