use crate::{
    AppState,
    config::TokenConfig,
    db::models::auth::AuthUser,
    db::repositories::users::UsersRepo,
    error::{AppError, AppResult},
};
use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::{HeaderMap, Request, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const ACCESS_TOKEN: &str = "access";
const REFRESH_TOKEN: &str = "refresh";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: uuid::Uuid, // user_id
    pub email: String,
    pub username: String,
    pub typ: String,
    pub exp: u64,    // expiration time
    pub iat: u64,    // issued at
    pub jti: String, // JWT ID
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: uuid::Uuid, // user_id
    pub typ: String,
    pub exp: u64,
    pub iat: u64,
    pub jti: String,
}

/// Issues and verifies HS256 access/refresh tokens.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_expires_in: u64,
    refresh_expires_in: u64,
}

impl TokenService {
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_expires_in: config.access_token_expires_in,
            refresh_expires_in: config.refresh_token_expires_in,
        }
    }

    pub fn access_expires_in(&self) -> u64 {
        self.access_expires_in
    }

    pub fn generate_access_token(&self, user: &AuthUser) -> AppResult<String> {
        let now = now_secs();
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            typ: ACCESS_TOKEN.to_string(),
            exp: now + self.access_expires_in,
            iat: now,
            jti: uuid::Uuid::new_v4().to_string(),
        };
        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    pub fn generate_refresh_token(&self, user_id: uuid::Uuid) -> AppResult<String> {
        let now = now_secs();
        let claims = RefreshClaims {
            sub: user_id,
            typ: REFRESH_TOKEN.to_string(),
            exp: now + self.refresh_expires_in,
            iat: now,
            jti: uuid::Uuid::new_v4().to_string(),
        };
        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    pub fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let claims = decode::<Claims>(token, &self.decoding_key, &Validation::default())?.claims;
        if claims.typ != ACCESS_TOKEN {
            return Err(AppError::unauthenticated("Invalid token type"));
        }
        Ok(claims)
    }

    pub fn verify_refresh_token(&self, token: &str) -> AppResult<RefreshClaims> {
        let claims =
            decode::<RefreshClaims>(token, &self.decoding_key, &Validation::default())?.claims;
        if claims.typ != REFRESH_TOKEN {
            return Err(AppError::unauthenticated("Invalid token type"));
        }
        Ok(claims)
    }
}

fn now_secs() -> u64 {
    chrono::Utc::now().timestamp().max(0) as u64
}

/// `Authorization: Bearer <token>` 中的 token
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Resolves the bearer token to a stored user and inserts it into the
/// request extensions as `AuthUser`.
pub async fn auth_middleware<B>(
    State(state): State<Arc<AppState>>,
    mut request: Request<B>,
    next: Next<B>,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())
        .ok_or_else(|| AppError::unauthenticated("Missing bearer token"))?;

    // 验证token
    let claims = state.tokens.verify_token(token)?;

    // 从数据库获取用户信息
    let user_id = claims.sub;
    let user = crate::db::transact(&state.db, move |conn| Ok(UsersRepo::find_by_id(conn, user_id)?))
        .await?
        .ok_or_else(|| AppError::unauthenticated("User no longer exists"))?;

    request.extensions_mut().insert(AuthUser::from(user));
    Ok(next.run(request).await)
}

/// 提取器，用于从请求中获取当前用户
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| AppError::unauthenticated("Authentication required"))
    }
}
