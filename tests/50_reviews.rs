mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::TestServer;

#[tokio::test]
async fn review_post_requires_auth() -> Result<()> {
    let server = TestServer::spawn().await?;
    let school = server.seed_school("Alpha").await?;

    let res = server
        .client
        .post(server.url("/reviews"))
        .json(&json!({ "school_id": school.id, "sport": "fb", "head_coach_name": "Coach A" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn posted_review_is_listed_and_filterable() -> Result<()> {
    let server = TestServer::spawn().await?;
    let school = server.seed_school("Alpha").await?;
    let login = server.signup_and_login("reviewer@example.com").await?;
    let token = login["access"].as_str().unwrap_or_default().to_string();

    let res = server
        .client
        .post(server.url("/reviews"))
        .bearer_auth(&token)
        .json(&json!({
            "school_id": school.id,
            "sport": "fb",
            "head_coach_name": "Coach Posted",
            "review_message": "Great staff",
            "head_coach": 9,
            "team_culture": 7
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await?;
    assert_eq!(created["head_coach"], 9);
    assert_eq!(created["campus_life"], 0);

    let res = server
        .client
        .get(server.url(&format!("/schools/{}/reviews", school.id)))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let reviews: Vec<Value> = res.json().await?;
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["head_coach_name"], "Coach Posted");

    assert_eq!(server.filter_names("?coach=posted&team_culture=7").await?, vec!["Alpha"]);
    Ok(())
}

#[tokio::test]
async fn review_for_missing_school_is_not_found() -> Result<()> {
    let server = TestServer::spawn().await?;
    let login = server.signup_and_login("ghost@example.com").await?;

    let res = server
        .client
        .post(server.url("/reviews"))
        .bearer_auth(login["access"].as_str().unwrap_or_default())
        .json(&json!({
            "school_id": uuid::Uuid::new_v4(),
            "sport": "fb",
            "head_coach_name": "Coach A"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn review_rating_out_of_range_is_rejected() -> Result<()> {
    let server = TestServer::spawn().await?;
    let school = server.seed_school("Alpha").await?;
    let login = server.signup_and_login("range@example.com").await?;

    let res = server
        .client
        .post(server.url("/reviews"))
        .bearer_auth(login["access"].as_str().unwrap_or_default())
        .json(&json!({
            "school_id": school.id,
            "sport": "fb",
            "head_coach_name": "Coach A",
            "nil_opportunity": 11
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["field"], "nil_opportunity");
    Ok(())
}

#[tokio::test]
async fn reviews_of_unknown_school_is_not_found() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .client
        .get(server.url(&format!("/schools/{}/reviews", uuid::Uuid::new_v4())))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
