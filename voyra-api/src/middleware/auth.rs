use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;
use voyra_core::user::Role;

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// JWT Claims
// ============================================================================

/// Bearer token payload. This service only verifies tokens; accounts sign in
/// elsewhere, and operator tooling mints tokens with [`Claims::new`] and
/// [`Claims::sign`] against the same shared secret.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub role: Role,
    pub exp: usize,
}

impl Claims {
    /// Claims for `user_id` expiring `ttl` from now.
    pub fn new(user_id: Uuid, role: Role, ttl: Duration) -> Self {
        Self {
            sub: user_id,
            role,
            exp: (Utc::now() + ttl).timestamp().max(0) as usize,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// HS256 token signed with the shared secret.
    pub fn sign(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        encode(&Header::default(), self, &EncodingKey::from_secret(secret.as_bytes()))
    }
}

fn bearer_token(req: &Request) -> Result<String, AppError> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string)
        .ok_or_else(|| AppError::AuthenticationError("Not authorized, no token".into()))
}

/// Validates the bearer token and the account behind it.
async fn authenticate(state: &AppState, token: &str) -> Result<Claims, AppError> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.auth.secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        warn!(error = %e, "rejected bearer token");
        AppError::AuthenticationError("Not authorized, token failed".into())
    })?
    .claims;

    match state.users.account(claims.sub).await? {
        None => Err(AppError::AuthenticationError("User not found".into())),
        Some(user) if !user.is_active => {
            warn!(user_id = %user.id, "deactivated account tried to authenticate");
            Err(AppError::AuthorizationError("Account is deactivated".into()))
        }
        Some(_) => Ok(claims),
    }
}

// ============================================================================
// Traveller Authentication Middleware
// ============================================================================

pub async fn user_auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&req)?;
    let claims = authenticate(&state, &token).await?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

// ============================================================================
// Admin Authentication Middleware
// ============================================================================

pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&req)?;
    let claims = authenticate(&state, &token).await?;
    if !claims.is_admin() {
        warn!(user_id = %claims.sub, path = %req.uri().path(), "admin route refused");
        return Err(AppError::AuthorizationError("Not authorized as an admin".into()));
    }
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_claims_decode_with_same_secret() {
        let claims = Claims::new(Uuid::new_v4(), Role::Admin, Duration::hours(1));
        let token = claims.sign("secret").unwrap();

        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"secret"),
            &Validation::default(),
        )
        .unwrap()
        .claims;
        assert_eq!(decoded.sub, claims.sub);
        assert!(decoded.is_admin());

        assert!(decode::<Claims>(&token, &DecodingKey::from_secret(b"other"), &Validation::default()).is_err());
    }

    #[test]
    fn test_expired_claims_are_rejected() {
        let token = Claims::new(Uuid::new_v4(), Role::User, Duration::hours(-2))
            .sign("secret")
            .unwrap();
        assert!(decode::<Claims>(&token, &DecodingKey::from_secret(b"secret"), &Validation::default()).is_err());
    }
}
