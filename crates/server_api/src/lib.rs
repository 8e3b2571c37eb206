use shared::{
    domain::{Course, CourseId},
    error::ApiError,
    protocol::{AddCourseRequest, DeleteCourseResponse, UpdateCourseRequest},
};
use storage::Storage;
use tracing::info;

#[derive(Clone, Default)]
pub struct ApiContext {
    pub storage: Storage,
}

pub fn courses_route() -> &'static str {
    "/courses"
}

pub fn course_route() -> &'static str {
    "/courses/:course_id"
}

pub async fn add_course(ctx: &ApiContext, req: AddCourseRequest) -> Result<Course, ApiError> {
    let credit_score = req.credit_score.resolve()?;
    let course = ctx
        .storage
        .add_course(req.course_id, &req.course_name, credit_score)
        .await?;
    info!(course_id = %course.course_id, "course added");
    Ok(course)
}

/// `Ok(None)` means no course matched and the storage policy tolerates it.
pub async fn update_course(
    ctx: &ApiContext,
    course_id: &CourseId,
    req: UpdateCourseRequest,
) -> Result<Option<Course>, ApiError> {
    let credit_score = req.credit_score.resolve()?;
    let updated = ctx
        .storage
        .update_course(course_id, &req.course_name, credit_score)
        .await?;
    info!(%course_id, matched = updated.is_some(), "course update");
    Ok(updated)
}

pub async fn delete_course(
    ctx: &ApiContext,
    course_id: &CourseId,
) -> Result<DeleteCourseResponse, ApiError> {
    let removed = ctx
        .storage
        .delete_course(course_id)
        .await?;
    info!(%course_id, removed, "course delete");
    Ok(DeleteCourseResponse { removed })
}

pub async fn list_courses(ctx: &ApiContext) -> Result<Vec<Course>, ApiError> {
    Ok(ctx.storage.list_courses().await)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
