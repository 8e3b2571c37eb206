use super::*;

use server_api::ApiContext;
use shared::error::ErrorCode;
use storage::CoursePolicy;
use tokio::net::TcpListener;

async fn start_test_server(policy: CoursePolicy) -> anyhow::Result<String> {
    let app = server::router(ApiContext {
        storage: Storage::new(policy),
    });

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

fn add_request(id: &str, name: &str, credits: i32) -> AddCourseRequest {
    AddCourseRequest {
        course_id: CourseId::new(id),
        course_name: name.to_string(),
        credit_score: CreditScoreInput::Number(credits),
    }
}

#[test]
fn rejects_urls_that_cannot_be_a_base() {
    assert!(CourseClient::new("not a url").is_err());
    assert!(CourseClient::new("mailto:someone@example.com").is_err());
}

#[test]
fn endpoint_encodes_course_id_as_one_segment() {
    let client = CourseClient::new("http://localhost:8080/api/").expect("client");
    let url = client.endpoint(&["courses", "CS 101/a"]).expect("url");
    assert_eq!(url.as_str(), "http://localhost:8080/api/courses/CS%20101%2Fa");
}

#[tokio::test]
async fn client_round_trips_crud_against_server() -> anyhow::Result<()> {
    let server_url = start_test_server(CoursePolicy::Lenient).await?;
    let client = CourseClient::new(&server_url)?;
    client.health().await?;

    assert!(client.fetch_courses().await?.is_empty());
    client.create_course(&add_request("A1", "Intro", 3)).await?;
    client.create_course(&add_request("A2", "Data", 4)).await?;

    let updated = client
        .modify_course(
            &CourseId::new("A1"),
            &UpdateCourseRequest {
                course_name: "Intro II".into(),
                credit_score: CreditScoreInput::Text("3".into()),
            },
        )
        .await?;
    assert_eq!(updated, Some(Course::new("A1", "Intro II", 3)));

    assert_eq!(client.remove_course(&CourseId::new("A2")).await?, 1);
    assert_eq!(
        client.fetch_courses().await?,
        vec![Course::new("A1", "Intro II", 3)]
    );
    Ok(())
}

#[tokio::test]
async fn lenient_update_of_missing_course_returns_none() -> anyhow::Result<()> {
    let server_url = start_test_server(CoursePolicy::Lenient).await?;
    let client = CourseClient::new(&server_url)?;
    let updated = client
        .modify_course(
            &CourseId::new("missing"),
            &UpdateCourseRequest {
                course_name: "X".into(),
                credit_score: CreditScoreInput::Number(1),
            },
        )
        .await?;
    assert_eq!(updated, None);
    Ok(())
}

#[tokio::test]
async fn server_errors_surface_as_api_exceptions() -> anyhow::Result<()> {
    let server_url = start_test_server(CoursePolicy::Strict).await?;
    let client = CourseClient::new(&server_url)?;
    client.create_course(&add_request("C1", "Math", 3)).await?;

    let err = client
        .create_course(&add_request("C1", "Physics", 4))
        .await
        .expect_err("duplicate");
    let exception = err.downcast_ref::<ApiException>().expect("api exception");
    assert_eq!(exception.code, ErrorCode::DuplicateId);

    let err = client
        .remove_course(&CourseId::new("missing"))
        .await
        .expect_err("missing");
    let exception = err.downcast_ref::<ApiException>().expect("api exception");
    assert_eq!(exception.code, ErrorCode::NotFound);
    Ok(())
}

#[tokio::test]
async fn rejected_requests_surface_as_invalid_input() -> anyhow::Result<()> {
    let server_url = start_test_server(CoursePolicy::Lenient).await?;
    let client = CourseClient::new(&server_url)?;

    let err = client
        .create_course(&add_request("", "Nameless", 1))
        .await
        .expect_err("empty id");
    let exception = err.downcast_ref::<ApiException>().expect("api exception");
    assert_eq!(exception.code, ErrorCode::InvalidInput);

    let name = "x".repeat(server::MAX_BODY_BYTES + 1);
    let err = client
        .create_course(&add_request("C1", &name, 3))
        .await
        .expect_err("oversized");
    let exception = err.downcast_ref::<ApiException>().expect("api exception");
    assert_eq!(exception.code, ErrorCode::InvalidInput);

    assert!(client.fetch_courses().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn table_drives_remote_backend() -> anyhow::Result<()> {
    let server_url = start_test_server(CoursePolicy::Lenient).await?;
    let client = CourseClient::new(&server_url)?;
    let mut table = CourseTable::load(client.clone()).await?;

    table.form.course_id = "A1".into();
    table.form.course_name = "Intro".into();
    table.form.credit_score = "3".into();
    table.add().await?;

    table.select(0)?;
    table.form.credit_score = "5".into();
    assert!(table.edit().await?);

    assert_eq!(client.fetch_courses().await?, vec![Course::new("A1", "Intro", 5)]);
    Ok(())
}
