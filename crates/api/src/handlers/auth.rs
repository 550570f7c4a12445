//! Handlers for the `/auth` resource (signup, confirm, login, refresh,
//! logout, me).

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use codeprogress_core::error::CoreError;
use codeprogress_core::types::DbId;
use codeprogress_db::is_unique_violation;
use codeprogress_db::models::session::CreateSession;
use codeprogress_db::models::user::{CreateUser, User, UserResponse};
use codeprogress_db::repositories::{ProfileRepo, SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::{generate_access_token, generate_opaque_token, hash_opaque_token};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// Display name used when a user never supplied one.
const ANONYMOUS_NAME: &str = "Anonymous";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub password: String,
    pub full_name: Option<String>,
}

/// Query parameters for `GET /auth/confirm`.
#[derive(Debug, Deserialize)]
pub struct ConfirmParams {
    pub token: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public user info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub email: String,
    pub full_name: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Register a new account. The account stays unconfirmed (and unable to
/// sign in) until the emailed confirmation link is followed, so this
/// never auto-authenticates. No profile row is created here -- that
/// happens on the first signed-in transition.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let email = input.email.trim().to_lowercase();
    let full_name = input
        .full_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let (confirm_token, confirm_token_hash) = generate_opaque_token();

    let create = CreateUser {
        email: email.clone(),
        password_hash,
        full_name,
        confirmation_token_hash: confirm_token_hash,
    };

    let user = match UserRepo::create(&state.pool, &create).await {
        Ok(user) => user,
        Err(err) if is_unique_violation(&err) => {
            return Err(AppError::Core(CoreError::Conflict(
                "An account with this email already exists".into(),
            )));
        }
        Err(err) => return Err(err.into()),
    };

    let link = format!(
        "{}/api/v1/auth/confirm?token={confirm_token}",
        state.config.public_base_url
    );
    state.mailer.send_confirmation(&user.email, &link).await;

    tracing::info!(user_id = user.id, "User registered, confirmation pending");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Please check your email to confirm your account before signing in."
                .to_string(),
        }),
    ))
}

/// GET /api/v1/auth/confirm?token=...
///
/// Follow a confirmation link. The token is single-use.
pub async fn confirm(
    State(state): State<AppState>,
    Query(params): Query<ConfirmParams>,
) -> AppResult<Json<MessageResponse>> {
    let token_hash = hash_opaque_token(&params.token);

    let user = UserRepo::confirm_by_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or already used confirmation token".into(),
            ))
        })?;

    tracing::info!(user_id = user.id, "Email confirmed");

    Ok(Json(MessageResponse {
        message: "Email confirmed. You can now sign in.".to_string(),
    }))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let email = input.email.trim().to_lowercase();

    // One message for both unknown email and wrong password.
    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    if !user.is_confirmed() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Email not confirmed. Check your inbox for the confirmation link.".into(),
        )));
    }

    let response = create_auth_response(&state, &user).await?;
    tracing::info!(user_id = user.id, "User signed in");

    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let token_hash = hash_opaque_token(&input.refresh_token);

    let session = SessionRepo::find_by_refresh_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    // Token rotation: the old session dies with its first use.
    SessionRepo::revoke(&state.pool, session.id).await?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let response = create_auth_response(&state, &user).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the authenticated user. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    tracing::info!(user_id = auth_user.user_id, "User signed out");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
///
/// Current-session query: who am I?
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    Ok(Json(DataResponse { data: user.into() }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Ensure the profile row, generate access + refresh tokens, persist a
/// session row, and build the response.
///
/// Every signed-in transition (login and refresh alike) runs through
/// here, which is what keeps the profile-ensure side effect idempotent
/// and universal.
async fn create_auth_response(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let display_name = user.full_name.as_deref().unwrap_or(ANONYMOUS_NAME);
    ProfileRepo::ensure(&state.pool, user.id, display_name).await?;

    let access_token = generate_access_token(user.id, &user.email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_opaque_token();

    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    let session_input = CreateSession {
        user_id: user.id,
        refresh_token_hash: refresh_hash,
        expires_at,
    };
    SessionRepo::create(&state.pool, &session_input).await?;

    let expires_in = state.config.jwt.access_token_expiry_mins * 60;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in,
        user: UserInfo {
            id: user.id,
            email: user.email.clone(),
            full_name: display_name.to_string(),
        },
    })
}
