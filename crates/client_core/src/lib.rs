use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use shared::{
    domain::{Course, CourseId},
    error::{ApiError, ApiException},
    protocol::{AddCourseRequest, CreditScoreInput, DeleteCourseResponse, UpdateCourseRequest},
};
use storage::Storage;
use tracing::debug;
use url::Url;

mod table;

pub use table::{CourseForm, CourseRow, CourseTable};

/// Anything that can hold the course list on behalf of the presentation
/// layer: the in-process [`Storage`] or a remote server via [`CourseClient`].
#[async_trait]
pub trait CourseBackend: Send + Sync {
    async fn add_course(
        &self,
        course_id: CourseId,
        course_name: &str,
        credit_score: i32,
    ) -> Result<()>;

    async fn update_course(
        &self,
        course_id: &CourseId,
        course_name: &str,
        credit_score: i32,
    ) -> Result<()>;

    async fn delete_course(&self, course_id: &CourseId) -> Result<()>;

    async fn list_courses(&self) -> Result<Vec<Course>>;
}

#[async_trait]
impl CourseBackend for Storage {
    async fn add_course(
        &self,
        course_id: CourseId,
        course_name: &str,
        credit_score: i32,
    ) -> Result<()> {
        Storage::add_course(self, course_id, course_name, credit_score)
            .await
            .map_err(|e| ApiException::from(ApiError::from(e)))?;
        Ok(())
    }

    async fn update_course(
        &self,
        course_id: &CourseId,
        course_name: &str,
        credit_score: i32,
    ) -> Result<()> {
        Storage::update_course(self, course_id, course_name, credit_score)
            .await
            .map_err(|e| ApiException::from(ApiError::from(e)))?;
        Ok(())
    }

    async fn delete_course(&self, course_id: &CourseId) -> Result<()> {
        Storage::delete_course(self, course_id)
            .await
            .map_err(|e| ApiException::from(ApiError::from(e)))?;
        Ok(())
    }

    async fn list_courses(&self) -> Result<Vec<Course>> {
        Ok(Storage::list_courses(self).await)
    }
}

/// HTTP client for the course server.
#[derive(Clone)]
pub struct CourseClient {
    http: Client,
    server_url: Url,
}

impl CourseClient {
    pub fn new(server_url: &str) -> Result<Self> {
        let server_url =
            Url::parse(server_url).with_context(|| format!("invalid server url '{server_url}'"))?;
        if server_url.cannot_be_a_base() {
            return Err(anyhow!("server url '{server_url}' cannot be a base url"));
        }
        Ok(Self {
            http: Client::new(),
            server_url,
        })
    }

    pub fn server_url(&self) -> &Url {
        &self.server_url
    }

    pub async fn health(&self) -> Result<()> {
        let res = self.http.get(self.endpoint(&["healthz"])?).send().await?;
        check(res).await?;
        Ok(())
    }

    pub async fn create_course(&self, req: &AddCourseRequest) -> Result<Course> {
        let res = self
            .http
            .post(self.endpoint(&["courses"])?)
            .json(req)
            .send()
            .await?;
        Ok(check(res).await?.json().await?)
    }

    /// `Ok(None)` when the server matched nothing and tolerated it.
    pub async fn modify_course(
        &self,
        course_id: &CourseId,
        req: &UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        let res = self
            .http
            .put(self.endpoint(&["courses", course_id.as_str()])?)
            .json(req)
            .send()
            .await?;
        let res = check(res).await?;
        if res.status() == StatusCode::NO_CONTENT {
            debug!(%course_id, "update matched no course");
            return Ok(None);
        }
        Ok(Some(res.json().await?))
    }

    pub async fn remove_course(&self, course_id: &CourseId) -> Result<usize> {
        let res = self
            .http
            .delete(self.endpoint(&["courses", course_id.as_str()])?)
            .send()
            .await?;
        let body: DeleteCourseResponse = check(res).await?.json().await?;
        Ok(body.removed)
    }

    pub async fn fetch_courses(&self) -> Result<Vec<Course>> {
        let res = self.http.get(self.endpoint(&["courses"])?).send().await?;
        Ok(check(res).await?.json().await?)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.server_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("server url '{}' cannot be a base url", self.server_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl CourseBackend for CourseClient {
    async fn add_course(
        &self,
        course_id: CourseId,
        course_name: &str,
        credit_score: i32,
    ) -> Result<()> {
        self.create_course(&AddCourseRequest {
            course_id,
            course_name: course_name.to_string(),
            credit_score: CreditScoreInput::Number(credit_score),
        })
        .await?;
        Ok(())
    }

    async fn update_course(
        &self,
        course_id: &CourseId,
        course_name: &str,
        credit_score: i32,
    ) -> Result<()> {
        self.modify_course(
            course_id,
            &UpdateCourseRequest {
                course_name: course_name.to_string(),
                credit_score: CreditScoreInput::Number(credit_score),
            },
        )
        .await?;
        Ok(())
    }

    async fn delete_course(&self, course_id: &CourseId) -> Result<()> {
        self.remove_course(course_id).await?;
        Ok(())
    }

    async fn list_courses(&self) -> Result<Vec<Course>> {
        self.fetch_courses().await
    }
}

/// Passes successful responses through; turns an `ApiError` body into an
/// [`ApiException`] so callers can downcast to the error code.
async fn check(res: Response) -> Result<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    match serde_json::from_str::<ApiError>(&body) {
        Ok(api_error) => Err(ApiException::from(api_error).into()),
        Err(_) => Err(anyhow!("server returned {status}: {body}")),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
