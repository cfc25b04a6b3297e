//! Authentication middleware

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::debug;
use uuid::Uuid;

use crate::{
    db::repositories::UserRepository, error::AppError, models::Role, services::AuthService,
    state::AppState,
};

/// Authenticated user resolved from the bearer token and the user store
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub username: String,
    pub role: Role,
    pub token_id: Uuid,
    pub expires_at: i64,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Only admins may continue
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Admin access required".to_string()))
        }
    }

    /// The named user themself, or an admin
    pub fn require_self_or_admin(&self, username: &str) -> Result<(), AppError> {
        if self.is_admin() || self.username == username {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "You can only access your own account".to_string(),
            ))
        }
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Authentication middleware.
///
/// The token proves identity only; role and account status are read from
/// the store on every request so changes take effect immediately.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();

    let Some(auth_header) = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    else {
        debug!(path = %path, "Auth failed: No Authorization header");
        return Err(AppError::Unauthorized);
    };

    let Some(token) = auth_header.strip_prefix("Bearer ") else {
        debug!(path = %path, "Auth failed: expected 'Bearer <token>'");
        return Err(AppError::Unauthorized);
    };

    let claims = AuthService::verify_token(token, &state.config().jwt.secret).inspect_err(|e| {
        debug!(path = %path, error = ?e, "Auth failed: Token verification failed");
    })?;

    if state.revoked_tokens().is_revoked(&claims.jti) {
        debug!(path = %path, username = %claims.sub, "Auth failed: token was logged out");
        return Err(AppError::InvalidToken);
    }

    let account = state
        .store()
        .read(|db| UserRepository::find(db, &claims.sub).map(|u| (u.role, u.disabled)))
        .await;

    let role = match account {
        Some((_, true)) => return Err(AppError::UserDisabled),
        Some((role, false)) => role,
        None => {
            debug!(path = %path, username = %claims.sub, "Auth failed: user no longer exists");
            return Err(AppError::Unauthorized);
        }
    };

    debug!(path = %path, username = %claims.sub, role = %role, "User authenticated");

    let user = AuthenticatedUser {
        username: claims.sub,
        role,
        token_id: claims.jti,
        expires_at: claims.exp,
    };
    request.extensions_mut().insert(user.clone());

    // Exposed to the request logger, which runs outside this layer
    let mut response = next.run(request).await;
    response.extensions_mut().insert(user);
    Ok(response)
}
