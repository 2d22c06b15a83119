//! 项目相关接口
//!

use crate::models::comments::{CommentCreate, CommentInfo};
use crate::models::err::AppError;
use crate::models::projects::{
    ProjectCreate, ProjectCreated, ProjectDetailInfo, ProjectList, ProjectSearch, ProjectUpdate, ProjectUpdated,
};
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;
use validator::Validate;

/// 根据查询参数搜索项目
///
/// 查询参数由 [`ProjectSearch`] 决定，全部为可选参数，返回全部符合条件的项目（不分页）。
///
/// ## 参数
///
/// - state: 从路由函数传递过来的共享数据
/// - search: 通过`Query(search): Query<ProjectSearch>`从查询字符串反序列化，格式不正确（比如日期非法）时框架直接返回400
///
/// ## 返回值
///
/// 1. [`ProjectList`] 包含过滤后的总数和项目列表
/// 2. [`AppError`] 是错误时返回的Error类型，未知的状态/排序字段/排序方向会转换为400
#[utoipa::path(get,
    path = "/projects",
    tag = "projects",
    params(ProjectSearch),
    responses(
        (status = 200, description = "Search results", body = ProjectList),
        (status = 400, description = "Invalid filter parameters")
    ),
)]
pub async fn find_projects(
    State(state): State<AppState>,
    Query(search): Query<ProjectSearch>,
) -> Result<Json<ProjectList>, AppError> {
    debug!("🔍 搜索项目 {:#?}", search);

    let filter = search.into_filter()?;
    let result = state.project_service.search_by_filter_params(filter).await?;

    Ok(Json(ProjectList {
        count: result.count,
        projects: result.projects.into_iter().map(Into::into).collect(),
    }))
}

/// 创建项目
///
/// 根据查询字符串中的参数创建项目，状态默认为 `analysis`
#[utoipa::path(post,
    path = "/projects",
    tag = "projects",
    params(ProjectCreate),
    responses(
        (status = 201, description = "Create project result", body = ProjectCreated),
        (status = 400, description = "Invalid project parameters")
    )
)]
pub async fn create_project(
    State(state): State<AppState>,
    Query(project): Query<ProjectCreate>,
) -> Result<(StatusCode, Json<ProjectCreated>), AppError> {
    debug!("Creating project {:#?}", project);

    project.validate()?;
    let project = state.project_service.create(project.into()).await?;

    Ok((StatusCode::CREATED, Json(ProjectCreated { id: project.id, title: project.title })))
}

/// 查询指定项目信息，包含评论
#[utoipa::path(get,
    path = "/project/{id}",
    tag = "projects",
    params(("id" = i64, Path, description = "项目ID")),
    responses(
        (status = 200, description = "Project with comments", body = ProjectDetailInfo),
        (status = 404, description = "Project not found")
    )
)]
pub async fn get_project(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
) -> Result<Json<ProjectDetailInfo>, AppError> {
    debug!("Getting project id {:#?}", project_id);

    let detail = state.project_service.get(project_id).await?;

    Ok(Json(detail.into()))
}

/// 更新项目信息
///
/// 根据用户指定的 `id` 和 修改信息 [`ProjectUpdate`] 来整体覆盖项目信息。
#[utoipa::path(put,
    path = "/project/{id}",
    tag = "projects",
    params(("id" = i64, Path, description = "项目ID")),
    request_body = ProjectUpdate,
    responses(
        (status = 200, description = "Project updated", body = ProjectUpdated),
        (status = 400, description = "Invalid project parameters"),
        (status = 404, description = "Project not found")
    )
)]
pub async fn update_project(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
    Json(info): Json<ProjectUpdate>,
) -> Result<Json<ProjectUpdated>, AppError> {
    debug!("Updating project {} with {:#?}", project_id, info);

    info.validate()?;
    let project = state.project_service.update(project_id, info.into()).await?;

    Ok(Json(ProjectUpdated { project_id: project.id }))
}

/// 删除指定的项目，评论一并删除
#[utoipa::path(delete,
    path = "/project/{id}",
    tag = "projects",
    params(("id" = i64, Path, description = "项目ID")),
    responses(
        (status = 204, description = "Project deleted"),
        (status = 404, description = "Project not found")
    )
)]
pub async fn delete_project(State(state): State<AppState>, Path(project_id): Path<i64>) -> Result<StatusCode, AppError> {
    debug!("delete project {:#?}", project_id);

    state.project_service.delete(project_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// 给项目新增评论
#[utoipa::path(post,
    path = "/project/{id}/comments",
    tag = "projects",
    params(("id" = i64, Path, description = "项目ID")),
    request_body = CommentCreate,
    responses(
        (status = 201, description = "Comment created", body = CommentInfo),
        (status = 400, description = "Invalid comment or unknown reporter"),
        (status = 404, description = "Project not found")
    )
)]
pub async fn create_project_comment(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
    Json(comment): Json<CommentCreate>,
) -> Result<(StatusCode, Json<CommentInfo>), AppError> {
    debug!("Commenting project {} with {:#?}", project_id, comment);

    comment.validate()?;
    let comment = state.comment_service.create(comment.into_create(project_id)).await?;

    Ok((StatusCode::CREATED, Json(comment.into())))
}
