//! Authentication middleware that validates bearer tokens on protected routes.

use axum::{
    extract::{FromRef, Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::DecodingKey;

use crate::{AppState, Error, auth::verify_token, user::UserID};

/// The state needed for the auth middleware.
#[derive(Clone)]
pub struct AuthState {
    /// The key for verifying presented tokens.
    pub decoding_key: DecodingKey,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            decoding_key: state.jwt_keys.decoding.clone(),
        }
    }
}

/// Middleware function that checks for a valid bearer token.
///
/// The user ID from the token is placed into the request and then the request
/// executed normally if the token is valid, otherwise a 401 envelope is
/// returned.
///
/// **Note**: Route handlers can use the function argument
/// `Extension(user_id): Extension<UserID>` to receive the user ID.
pub async fn auth_guard(
    State(state): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(request.headers()) else {
        return Error::TokenMissing.into_response();
    };

    let claims = match verify_token(token, &state.decoding_key) {
        Ok(claims) => claims,
        Err(error) => return error.into_response(),
    };

    request.extensions_mut().insert(UserID::new(claims.sub));

    next.run(request).await
}

/// Extract the token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[cfg(test)]
mod auth_guard_tests {
    use axum::{
        Extension, Router,
        http::{HeaderMap, StatusCode, header::AUTHORIZATION},
        middleware,
        routing::get,
    };
    use axum_test::TestServer;
    use time::Duration;

    use crate::{
        app_state::test_utils::test_state,
        auth::{auth_guard, issue_token},
        user::UserID,
    };

    use super::bearer_token;

    async fn test_handler(Extension(user_id): Extension<UserID>) -> String {
        format!("user {}", user_id.as_i64())
    }

    const TEST_PROTECTED_ROUTE: &str = "/protected";

    fn get_test_server() -> (TestServer, String) {
        let state = test_state();
        let token = issue_token(
            UserID::new(1),
            "foo@bar.baz",
            Duration::days(7),
            &state.jwt_keys.encoding,
        )
        .unwrap();

        let router = Router::new()
            .route(TEST_PROTECTED_ROUTE, get(test_handler))
            .layer(middleware::from_fn_with_state(state.clone(), auth_guard))
            .with_state(state);

        (TestServer::new(router), token)
    }

    #[tokio::test]
    async fn request_without_token_is_unauthorized() {
        let (server, _token) = get_test_server();

        let response = server.get(TEST_PROTECTED_ROUTE).await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn request_with_garbage_token_is_unauthorized() {
        let (server, _token) = get_test_server();

        let response = server
            .get(TEST_PROTECTED_ROUTE)
            .authorization_bearer("not.a.token")
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn request_with_valid_token_reaches_handler() {
        let (server, token) = get_test_server();

        let response = server
            .get(TEST_PROTECTED_ROUTE)
            .authorization_bearer(&token)
            .await;

        response.assert_status_ok();
        response.assert_text("user 1");
    }

    #[test]
    fn bearer_token_requires_bearer_prefix() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Basic Zm9vOmJhcg==".parse().unwrap());

        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn bearer_token_strips_prefix() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Bearer abc.def.ghi".parse().unwrap());

        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));
    }
}
