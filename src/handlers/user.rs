use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;
use serde_json::json;

use crate::errors::{AppError, AppResult};
use crate::models::{LoginForm, RegisterForm, UpdateUserForm, User, UserView};
use crate::services::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(form): Json<RegisterForm>,
) -> AppResult<Response> {
    tracing::info!("Registration attempt for email: {}", form.email);

    if state.users.find_by_email(&form.email).await?.is_some() {
        return Err(AppError::InvalidInput("User already exist!".to_string()));
    }

    let password_hash = hash(form.password.as_bytes(), DEFAULT_COST)?;
    let now = Utc::now();
    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        name: form.name,
        email: form.email,
        password: password_hash,
        created_at: now,
        updated_at: now,
    };

    state.users.create(&user).await?;

    tracing::info!("Registered user {}", user.id);
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User Register Successfully!" })),
    )
        .into_response())
}

pub async fn login(
    State(state): State<AppState>,
    Json(form): Json<LoginForm>,
) -> AppResult<Response> {
    tracing::info!("Login attempt for email: {}", form.email);

    // Unknown email and wrong password produce the same answer
    let user = state
        .users
        .find_by_email(&form.email)
        .await?
        .ok_or_else(|| AppError::InvalidInput("Wrong email or password".to_string()))?;

    if !verify(&form.password, &user.password)? {
        tracing::debug!("Password mismatch for user {}", user.id);
        return Err(AppError::InvalidInput("Wrong email or password".to_string()));
    }

    let token = state.tokens.issue(&user.id)?;
    Ok(Json(json!({ "token": token })).into_response())
}

pub async fn list_users(State(state): State<AppState>) -> AppResult<Response> {
    let users = state.users.list().await?;
    let views: Vec<UserView> = users.into_iter().map(UserView::from).collect();
    Ok(Json(views).into_response())
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let user = state
        .users
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(UserView::from(user)).into_response())
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<UpdateUserForm>,
) -> AppResult<Response> {
    let mut user = state
        .users
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    // A new value equal to the stored one is rejected rather than ignored
    if let Some(name) = &form.name {
        if *name == user.name {
            return Err(AppError::InvalidInput(
                "Name already exists.Please provide different name".to_string(),
            ));
        }
    }
    if let Some(email) = &form.email {
        if *email == user.email {
            return Err(AppError::InvalidInput(
                "Email already exists.Please provide different email".to_string(),
            ));
        }
    }

    // A password change needs the old password verified first
    if let (Some(new_password), Some(old_password)) = (&form.new_password, &form.old_password) {
        if !verify(old_password, &user.password)? {
            return Err(AppError::InvalidInput(
                "Old password is incorrect".to_string(),
            ));
        }
        if verify(new_password, &user.password)? {
            return Err(AppError::Conflict(
                "New password cannot be the same as the old password. Please provide a unique password.".to_string(),
            ));
        }
        user.password = hash(new_password.as_bytes(), DEFAULT_COST)?;
    }

    if let Some(name) = form.name {
        user.name = name;
    }
    if let Some(email) = form.email {
        user.email = email;
    }
    user.updated_at = Utc::now();

    state.users.save(&user).await?;

    tracing::info!("Updated profile for user {}", user.id);
    Ok(Json(json!({ "message": "User information updated successfully!" })).into_response())
}
