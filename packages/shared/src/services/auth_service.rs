use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use subtle::ConstantTimeEq;
use tracing::{debug, error, warn};

use crate::config::{Config, Credentials};
use crate::models::auth::claims::{TokenClaims, GET_TIME};
use crate::services::errors::auth_service_errors::AuthServiceError;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Issues and verifies HS256 tokens for the single configured account.
pub struct AuthService {
    credentials: Credentials,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AuthService {
    pub fn new(credentials: Credentials, jwt_secret: &str) -> Self {
        // Tokens carry no registered claims, so nothing is required and
        // there is no expiry to check. The algorithm is pinned.
        let mut validation = Validation::new(ALGORITHM);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;

        AuthService {
            credentials,
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            validation,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.credentials.clone(), config.jwt_secret())
    }

    /// Returns a token granting `get_time` when both values match the
    /// configured account, `None` otherwise.
    pub fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<String>, AuthServiceError> {
        debug!("Login attempt for user: {}", username);

        if !self.credentials_match(username, password) {
            warn!("Login rejected for user: {}", username);
            return Ok(None);
        }

        let token = self.encode_token(&TokenClaims::new(username, GET_TIME))?;
        debug!("Issued token for user: {}", username);
        Ok(Some(token))
    }

    pub fn encode_token(&self, claims: &TokenClaims) -> Result<String, AuthServiceError> {
        encode(&Header::new(ALGORITHM), claims, &self.encoding_key).map_err(|e| {
            error!("Failed to sign token: {:#?}", e);
            AuthServiceError::JwtError(e.to_string())
        })
    }

    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, AuthServiceError> {
        match decode::<TokenClaims>(token, &self.decoding_key, &self.validation) {
            Ok(token_data) => Ok(token_data.claims),
            Err(err) => match err.kind() {
                ErrorKind::InvalidToken
                | ErrorKind::InvalidSignature
                | ErrorKind::InvalidAlgorithm
                | ErrorKind::InvalidAlgorithmName
                | ErrorKind::MissingRequiredClaim(_)
                | ErrorKind::ExpiredSignature
                | ErrorKind::ImmatureSignature
                | ErrorKind::InvalidIssuer
                | ErrorKind::InvalidAudience
                | ErrorKind::InvalidSubject
                | ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_) => {
                    debug!("Token verification failed: {:?}", err.kind());
                    Err(AuthServiceError::InvalidToken)
                }
                _ => {
                    error!("Unexpected token verification failure: {:#?}", err);
                    Err(AuthServiceError::JwtError(err.to_string()))
                }
            },
        }
    }

    // Both fields are always compared so the result does not reveal which
    // one was wrong.
    fn credentials_match(&self, username: &str, password: &str) -> bool {
        let username_ok = username
            .as_bytes()
            .ct_eq(self.credentials.username.as_bytes());
        let password_ok = password
            .as_bytes()
            .ct_eq(self.credentials.password().as_bytes());

        (username_ok & password_ok).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::claims::Privileges;
    use proptest::prelude::*;
    use test_case::test_case;

    const SECRET: &str = "test-secret-key";

    fn auth_service() -> AuthService {
        AuthService::new(Credentials::new("admin", "hunter2"), SECRET)
    }

    #[test]
    fn test_login_success_grants_get_time() {
        let auth_service = auth_service();

        let token = auth_service.login("admin", "hunter2").unwrap().unwrap();
        assert!(!token.is_empty());
        assert_eq!(token.split('.').count(), 3);

        let claims = auth_service.verify_token(&token).unwrap();
        assert_eq!(claims.user, "admin");
        assert!(claims.privileges.contains(GET_TIME));
    }

    #[test_case("admin", "wrong" ; "wrong password")]
    #[test_case("root", "hunter2" ; "wrong username")]
    #[test_case("root", "wrong" ; "both wrong")]
    #[test_case("", "" ; "empty")]
    #[test_case("admin ", "hunter2" ; "trailing space")]
    #[test_case("ADMIN", "hunter2" ; "case differs")]
    #[test_case("admin", "hunter" ; "password prefix")]
    fn test_login_mismatch_returns_none(username: &str, password: &str) {
        assert!(auth_service().login(username, password).unwrap().is_none());
    }

    #[test]
    fn test_encode_is_deterministic() {
        let auth_service = auth_service();
        let claims = TokenClaims::new("admin", GET_TIME);

        assert_eq!(
            auth_service.encode_token(&claims).unwrap(),
            auth_service.encode_token(&claims).unwrap()
        );
    }

    #[test]
    fn test_verify_token_invalid() {
        let result = auth_service().verify_token("invalid-token");
        assert!(matches!(result, Err(AuthServiceError::InvalidToken)));

        let result = auth_service().verify_token("invalid.jwt.token");
        assert!(matches!(result, Err(AuthServiceError::InvalidToken)));

        let result = auth_service().verify_token("");
        assert!(matches!(result, Err(AuthServiceError::InvalidToken)));
    }

    #[test]
    fn test_different_secrets_reject_each_other() {
        let auth_service1 = AuthService::new(Credentials::new("admin", "hunter2"), "secret1");
        let auth_service2 = AuthService::new(Credentials::new("admin", "hunter2"), "secret2");

        let token1 = auth_service1.login("admin", "hunter2").unwrap().unwrap();
        let token2 = auth_service2.login("admin", "hunter2").unwrap().unwrap();

        assert_ne!(token1, token2);
        assert!(auth_service1.verify_token(&token1).is_ok());
        assert!(matches!(
            auth_service2.verify_token(&token1),
            Err(AuthServiceError::InvalidToken)
        ));
        assert!(matches!(
            auth_service1.verify_token(&token2),
            Err(AuthServiceError::InvalidToken)
        ));
    }

    #[test_case(Algorithm::HS384 ; "hs384")]
    #[test_case(Algorithm::HS512 ; "hs512")]
    fn test_other_algorithms_are_rejected_even_with_right_secret(algorithm: Algorithm) {
        let token = encode(
            &Header::new(algorithm),
            &TokenClaims::new("admin", GET_TIME),
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            auth_service().verify_token(&token),
            Err(AuthServiceError::InvalidToken)
        ));
    }

    #[test]
    fn test_unsigned_token_is_rejected() {
        // {"alg":"none","typ":"JWT"} . {"user":"admin","privileges":"get_time"} .
        let token = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.\
                     eyJ1c2VyIjoiYWRtaW4iLCJwcml2aWxlZ2VzIjoiZ2V0X3RpbWUifQ.";

        assert!(matches!(
            auth_service().verify_token(token),
            Err(AuthServiceError::InvalidToken)
        ));
    }

    #[test]
    fn test_token_with_wrong_claims_shape_is_rejected() {
        #[derive(serde::Serialize)]
        struct OtherClaims {
            sub: String,
        }

        let token = encode(
            &Header::new(ALGORITHM),
            &OtherClaims {
                sub: "admin".to_string(),
            },
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            auth_service().verify_token(&token),
            Err(AuthServiceError::InvalidToken)
        ));
    }

    fn claims_strategy() -> impl Strategy<Value = TokenClaims> {
        (
            "[a-zA-Z0-9@._-]{0,32}",
            prop::collection::btree_set("[a-z_]{1,12}", 0..4),
        )
            .prop_map(|(user, caps)| TokenClaims {
                user,
                privileges: caps.into_iter().collect::<Privileges>(),
            })
    }

    proptest! {
        #[test]
        fn prop_encode_decode_roundtrip(claims in claims_strategy()) {
            let auth_service = auth_service();
            let token = auth_service.encode_token(&claims).unwrap();

            prop_assert_eq!(auth_service.verify_token(&token).unwrap(), claims);
        }

        #[test]
        fn prop_foreign_secret_is_rejected(
            claims in claims_strategy(),
            other_secret in "[a-zA-Z0-9]{1,32}",
        ) {
            prop_assume!(other_secret != SECRET);
            let foreign = AuthService::new(Credentials::new("admin", "hunter2"), &other_secret);
            let token = foreign.encode_token(&claims).unwrap();

            prop_assert!(matches!(
                auth_service().verify_token(&token),
                Err(AuthServiceError::InvalidToken)
            ));
        }

        #[test]
        fn prop_tampered_signature_is_rejected(
            claims in claims_strategy(),
            index in any::<prop::sample::Index>(),
            replacement in "[A-Za-z0-9_-]",
        ) {
            let auth_service = auth_service();
            let token = auth_service.encode_token(&claims).unwrap();

            let signature_start = token.rfind('.').unwrap() + 1;
            let signature_len = token.len() - signature_start;
            let position = signature_start + index.index(signature_len);
            prop_assume!(token[position..position + 1] != replacement);

            let mut tampered = token.clone();
            tampered.replace_range(position..position + 1, &replacement);

            prop_assert!(matches!(
                auth_service.verify_token(&tampered),
                Err(AuthServiceError::InvalidToken)
            ));
        }
    }
}
