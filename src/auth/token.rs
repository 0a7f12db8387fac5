//! Issues and verifies the signed session tokens carried in the
//! `Authorization: Bearer` header.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{Error, user::UserID};

/// The claims embedded in a session token.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// The ID of the authenticated user.
    pub sub: i64,
    /// The email address of the authenticated user.
    pub email: String,
    /// When the token was issued, as a unix timestamp.
    pub iat: i64,
    /// When the token expires, as a unix timestamp.
    pub exp: i64,
}

/// Sign a session token for `user_id` that expires after `duration`.
///
/// Tokens are stateless: there is no server-side session table, so expiry is
/// the only invalidation mechanism.
///
/// # Errors
/// Returns [Error::TokenCreation] if the signing operation fails.
pub fn issue_token(
    user_id: UserID,
    email: &str,
    duration: Duration,
    encoding_key: &EncodingKey,
) -> Result<String, Error> {
    let now = OffsetDateTime::now_utc();
    let claims = Claims {
        sub: user_id.as_i64(),
        email: email.to_owned(),
        iat: now.unix_timestamp(),
        exp: (now + duration).unix_timestamp(),
    };

    encode(&Header::default(), &claims, encoding_key)
        .map_err(|error| Error::TokenCreation(error.to_string()))
}

/// Verify a presented token and return its claims.
///
/// # Errors
/// Returns [Error::TokenExpired] if the token's expiry has passed, and
/// [Error::TokenInvalid] for any other verification failure (bad signature,
/// malformed token, wrong algorithm).
pub fn verify_token(token: &str, decoding_key: &DecodingKey) -> Result<Claims, Error> {
    decode::<Claims>(token, decoding_key, &Validation::default())
        .map(|token_data| token_data.claims)
        .map_err(|error| match error.kind() {
            ErrorKind::ExpiredSignature => Error::TokenExpired,
            _ => Error::TokenInvalid,
        })
}

#[cfg(test)]
mod token_tests {
    use time::Duration;

    use crate::{Error, app_state::JwtKeys, user::UserID};

    use super::{issue_token, verify_token};

    fn test_keys() -> JwtKeys {
        JwtKeys::from_secret("nafstenoas")
    }

    #[test]
    fn issued_token_round_trips() {
        let keys = test_keys();

        let token = issue_token(
            UserID::new(1),
            "foo@bar.baz",
            Duration::days(7),
            &keys.encoding,
        )
        .unwrap();
        let claims = verify_token(&token, &keys.decoding).unwrap();

        assert_eq!(claims.sub, 1);
        assert_eq!(claims.email, "foo@bar.baz");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = test_keys();

        // Two days in the past, well beyond the default validation leeway.
        let token = issue_token(
            UserID::new(1),
            "foo@bar.baz",
            Duration::days(-2),
            &keys.encoding,
        )
        .unwrap();
        let result = verify_token(&token, &keys.decoding);

        assert_eq!(result, Err(Error::TokenExpired));
    }

    #[test]
    fn token_signed_with_different_secret_is_rejected() {
        let keys = test_keys();
        let other_keys = JwtKeys::from_secret("a different secret");

        let token = issue_token(
            UserID::new(1),
            "foo@bar.baz",
            Duration::days(7),
            &other_keys.encoding,
        )
        .unwrap();
        let result = verify_token(&token, &keys.decoding);

        assert_eq!(result, Err(Error::TokenInvalid));
    }

    #[test]
    fn garbage_token_is_rejected() {
        let keys = test_keys();

        let result = verify_token("not.a.token", &keys.decoding);

        assert_eq!(result, Err(Error::TokenInvalid));
    }
}
