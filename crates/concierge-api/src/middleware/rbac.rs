//! Role guard for route subtrees.

use axum::Router;
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use tracing::warn;

use concierge_auth::rbac::{Decision, RoutePolicy};
use concierge_auth::token::Principal;
use concierge_entity::user::Role;

use crate::error::ApiError;

/// Attaches a role requirement to every route already added to a router.
pub trait RouterExt {
    /// Requires the authenticated principal to hold one of `roles`.
    ///
    /// Must be applied after the routes it guards and inside the
    /// authentication layer. An empty `roles` lets every request through.
    fn authorize<I>(self, roles: I) -> Self
    where
        I: IntoIterator<Item = Role>;
}

impl<S> RouterExt for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn authorize<I>(self, roles: I) -> Self
    where
        I: IntoIterator<Item = Role>,
    {
        let policy = RoutePolicy::new(roles);
        self.route_layer(middleware::from_fn_with_state(policy, enforce_policy))
    }
}

/// Evaluates the route's policy once and either forwards or answers 403.
async fn enforce_policy(
    State(policy): State<RoutePolicy>,
    request: Request,
    next: Next,
) -> Response {
    let principal = request.extensions().get::<Principal>();
    let role = principal.map(Principal::role);

    match policy.evaluate(role) {
        Decision::Allowed => next.run(request).await,
        Decision::Rejected(message) => {
            warn!(
                user_id = principal.map(Principal::user_id),
                role = role.map(|r| r.as_str()),
                path = %request.uri().path(),
                "{message}"
            );
            ApiError::Forbidden(message).into_response()
        }
    }
}
