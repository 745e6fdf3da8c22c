use bcrypt::{hash, verify};
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::models::api::error_codes,
    db::models::auth::{
        AuthUser, LoginRequest, LoginResponse, NewUser, RefreshTokenResponse, RegisterRequest,
    },
    db::repositories::users::UsersRepo,
    error::{AppError, AppResult},
    middleware::auth::TokenService,
};

pub struct AuthService;

impl AuthService {
    /// Creates an account. Pending invitations addressed to the email stay
    /// pending.
    pub fn register(
        conn: &mut PgConnection,
        req: &RegisterRequest,
        bcrypt_cost: u32,
    ) -> AppResult<AuthUser> {
        let username = req.username.trim();
        let email = req.email.trim();

        // Check if username already exists
        if UsersRepo::exists_username(conn, username)? {
            return Err(username_taken());
        }

        // Check if email already exists
        if UsersRepo::exists_email(conn, email)? {
            return Err(email_taken());
        }

        let password_hash = hash(&req.password, bcrypt_cost)?;
        let new_user = NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
        };

        let user = UsersRepo::insert(conn, &new_user)
            .map_err(|e| registration_conflict(AppError::from(e)))?;
        tracing::info!(user_id = %user.id, "User registered");
        Ok(AuthUser::from(user))
    }

    pub fn login(
        conn: &mut PgConnection,
        tokens: &TokenService,
        req: &LoginRequest,
    ) -> AppResult<LoginResponse> {
        let user = UsersRepo::find_by_username(conn, req.username.trim())?
            .ok_or_else(|| AppError::unauthenticated("Invalid username or password"))?;

        if !verify(&req.password, &user.password_hash)? {
            return Err(AppError::unauthenticated("Invalid username or password"));
        }

        let user = AuthUser::from(user);
        Ok(LoginResponse {
            access_token: tokens.generate_access_token(&user)?,
            refresh_token: tokens.generate_refresh_token(user.id)?,
            token_type: "Bearer".to_string(),
            expires_in: tokens.access_expires_in(),
            user,
        })
    }

    pub fn refresh(
        conn: &mut PgConnection,
        tokens: &TokenService,
        refresh_token: &str,
    ) -> AppResult<RefreshTokenResponse> {
        let claims = tokens.verify_refresh_token(refresh_token)?;
        let user = Self::current(conn, claims.sub)?;

        Ok(RefreshTokenResponse {
            access_token: tokens.generate_access_token(&user)?,
            token_type: "Bearer".to_string(),
            expires_in: tokens.access_expires_in(),
        })
    }

    pub fn current(conn: &mut PgConnection, user_id: Uuid) -> AppResult<AuthUser> {
        UsersRepo::find_by_id(conn, user_id)?
            .map(AuthUser::from)
            .ok_or_else(|| AppError::unauthenticated("User no longer exists"))
    }
}

fn username_taken() -> AppError {
    AppError::conflict_with_code(
        "Username already exists",
        Some("username".to_string()),
        error_codes::USER_USERNAME_EXISTS,
    )
}

fn email_taken() -> AppError {
    AppError::conflict_with_code(
        "Email already exists",
        Some("email".to_string()),
        error_codes::USER_EMAIL_EXISTS,
    )
}

/// A concurrent registration can pass the existence checks and lose on the
/// `users` unique constraints; report that as the same conflict.
fn registration_conflict(err: AppError) -> AppError {
    if !err.is_unique_violation() {
        return err;
    }
    let on_username = matches!(
        &err,
        AppError::Database(diesel::result::Error::DatabaseError(_, info))
            if info.constraint_name() == Some(USERNAME_CONSTRAINT)
    );
    if on_username { username_taken() } else { email_taken() }
}

const USERNAME_CONSTRAINT: &str = "users_username_key";
