//! Handlers for the `/users` resource (registration).

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use userhub_core::error::CoreError;
use userhub_core::registration::{validate_registration, RegistrationInput};
use userhub_db::models::user::{CreateUser, User, UserResponse};
use userhub_db::repositories::UserRepo;
use userhub_events::{EventPublisher, UserCreated};

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/users/register
///
/// Validate input, hash the password, insert the user inside a
/// transaction, and publish `user.created` only after the commit has
/// succeeded. The publish runs detached: its failure is logged and never
/// affects the HTTP outcome of the already-committed write.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegistrationInput>,
) -> AppResult<impl IntoResponse> {
    // 1. Structural validation (required fields, password rules, email shape).
    validate_registration(&input)?;

    // 2. Duplicate pre-checks for friendly messages. The uq_ constraints
    //    on the users table still catch races; those surface as 409 too.
    if UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Username already exists".into(),
        )));
    }

    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Email already exists".into(),
        )));
    }

    // 3. Hash the password; plaintext never leaves this function.
    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // 4. Insert inside a transaction so the publish below is strictly
    //    post-commit: never before, never on rollback.
    let mut tx = state.pool.begin().await?;
    let user = UserRepo::create(
        &mut *tx,
        &CreateUser {
            username: input.username,
            email: input.email,
            password_hash,
        },
    )
    .await?;
    tx.commit().await?;

    // 5. Fire the post-commit event.
    publish_user_created(Arc::clone(&state.publisher), &user);

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(user),
        }),
    ))
}

/// Publish `user.created` for a freshly committed user row.
///
/// Spawned as a detached task: the caller's response must not wait on
/// broker backoff, and a delivery failure cannot fail the committed
/// registration. Exhausted retries are logged with full event context.
fn publish_user_created(publisher: Arc<EventPublisher>, user: &User) {
    let event = UserCreated {
        user_id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
    };

    tokio::spawn(async move {
        if let Err(e) = publisher.publish(UserCreated::ROUTING_KEY, &event).await {
            tracing::error!(
                user_id = event.user_id,
                routing_key = UserCreated::ROUTING_KEY,
                error = %e,
                "Failed to publish user.created event after commit"
            );
        }
    });
}
