use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use server_api::{
    add_course, course_route, courses_route, delete_course, list_courses, update_course,
    ApiContext,
};
use shared::{
    domain::{Course, CourseId},
    error::{ApiError, ErrorCode},
    protocol::{AddCourseRequest, DeleteCourseResponse, UpdateCourseRequest},
};
use tower_http::trace::TraceLayer;
use tracing::error;

mod app_state;
pub mod config;

use app_state::AppState;

/// Largest accepted JSON body. Bigger bodies fail extraction and come back as
/// `413` with an `InvalidInput` error body.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

/// The full HTTP surface over one course store.
pub fn router(api: ApiContext) -> Router {
    build_router(Arc::new(AppState { api }))
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(courses_route(), get(http_list_courses).post(http_add_course))
        .route(
            course_route(),
            put(http_update_course).delete(http_delete_course),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz(State(state): State<Arc<AppState>>) -> ApiResult<&'static str> {
    state.api.storage.health_check().await.map_err(|e| {
        error!(error = %e, "storage health check failed");
        api_error(ApiError::new(ErrorCode::Internal, e.to_string()))
    })?;
    Ok("ok")
}

async fn http_list_courses(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Course>>> {
    let courses = list_courses(&state.api).await.map_err(api_error)?;
    Ok(Json(courses))
}

async fn http_add_course(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AddCourseRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Course>)> {
    let Json(req) = body.map_err(rejection)?;
    let course = add_course(&state.api, req).await.map_err(api_error)?;
    Ok((StatusCode::CREATED, Json(course)))
}

async fn http_update_course(
    State(state): State<Arc<AppState>>,
    Path(course_id): Path<String>,
    body: Result<Json<UpdateCourseRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(req) = body.map_err(rejection)?;
    let updated = update_course(&state.api, &CourseId::new(course_id), req)
        .await
        .map_err(api_error)?;
    Ok(match updated {
        Some(course) => Json(course).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

async fn http_delete_course(
    State(state): State<Arc<AppState>>,
    Path(course_id): Path<String>,
) -> ApiResult<Json<DeleteCourseResponse>> {
    let deleted = delete_course(&state.api, &CourseId::new(course_id))
        .await
        .map_err(api_error)?;
    Ok(Json(deleted))
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::DuplicateId => StatusCode::CONFLICT,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn api_error(err: ApiError) -> (StatusCode, Json<ApiError>) {
    (status_for(err.code), Json(err))
}

fn rejection(err: JsonRejection) -> (StatusCode, Json<ApiError>) {
    let status = match err.status() {
        StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
        _ => StatusCode::BAD_REQUEST,
    };
    (
        status,
        Json(ApiError::new(ErrorCode::InvalidInput, err.body_text())),
    )
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
