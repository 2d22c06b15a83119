//! 用户相关接口

use crate::models::err::AppError;
use crate::models::users::{UserCreate, UserCreated, UserInfo, UserList, UserSearch, UserUpdate, UserUpdated};
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;
use validator::Validate;

/// 根据查询参数搜索用户
#[utoipa::path(get,
    path = "/users",
    tag = "users",
    params(UserSearch),
    responses(
        (status = 200, description = "Search results", body = UserList),
        (status = 400, description = "Invalid filter parameters")
    )
)]
pub async fn find_users(
    State(state): State<AppState>,
    Query(search): Query<UserSearch>,
) -> Result<Json<UserList>, AppError> {
    debug!("🔍 搜索用户 {:#?}", search);

    let filter = search.into_filter()?;
    let result = state.user_service.search_by_filter_params(filter).await?;

    Ok(Json(UserList { count: result.count, users: result.users.into_iter().map(Into::into).collect() }))
}

#[utoipa::path(post,
    path = "/users",
    tag = "users",
    params(UserCreate),
    responses(
        (status = 201, description = "Create user result", body = UserCreated),
        (status = 400, description = "Invalid user parameters")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    Query(user): Query<UserCreate>,
) -> Result<(StatusCode, Json<UserCreated>), AppError> {
    debug!("Creating user {:#?}", user);

    user.validate()?;
    let user = state.user_service.create(user.into()).await?;

    Ok((StatusCode::CREATED, Json(UserCreated { id: user.id, name: user.fullname })))
}

/// 查询指定用户，包含被指派和负责的项目ID
#[utoipa::path(get,
    path = "/user/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "用户ID")),
    responses(
        (status = 200, description = "User info", body = UserInfo),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(State(state): State<AppState>, Path(user_id): Path<i64>) -> Result<Json<UserInfo>, AppError> {
    debug!("Getting user id {:#?}", user_id);

    let user = state.user_service.get(user_id).await?;

    Ok(Json(user.into()))
}

#[utoipa::path(put,
    path = "/user/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "用户ID")),
    request_body = UserUpdate,
    responses(
        (status = 200, description = "User updated", body = UserUpdated),
        (status = 400, description = "Invalid user parameters"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(info): Json<UserUpdate>,
) -> Result<Json<UserUpdated>, AppError> {
    debug!("Updating user {} with {:#?}", user_id, info);

    info.validate()?;
    let user = state.user_service.update(user_id, info.into()).await?;

    Ok(Json(UserUpdated { user_id: user.id }))
}

/// 删除用户
///
/// 引用该用户的项目会把指派人/负责人置空；如果该用户还发表过评论，返回409。
#[utoipa::path(delete,
    path = "/user/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "用户ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found"),
        (status = 409, description = "User is still referenced by comments")
    )
)]
pub async fn delete_user(State(state): State<AppState>, Path(user_id): Path<i64>) -> Result<StatusCode, AppError> {
    debug!("delete user {:#?}", user_id);

    state.user_service.delete(user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
