use crate::{
    error::AppError,
    models::Post,
    params::Field,
    repository::{NewPost, PostChanges, PostRepository},
};
use axum::{
    Json,
    body::Bytes,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;

#[derive(Deserialize, Debug, Default)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
}

impl From<CreatePostRequest> for NewPost {
    fn from(request: CreatePostRequest) -> Self {
        Self {
            title: request.title,
            content: request.content,
            author: request.author,
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub title: Field<String>,
    #[serde(default)]
    pub content: Field<String>,
    #[serde(default)]
    pub author: Field<String>,
    #[serde(default)]
    pub published: Field<bool>,
}

impl From<UpdatePostRequest> for PostChanges {
    fn from(request: UpdatePostRequest) -> Self {
        Self {
            title: request.title,
            content: request.content,
            author: request.author,
            published: request.published,
        }
    }
}

// Only plain digit strings name a row; anything else is treated as missing.
fn parse_id(identifier: &str) -> Result<i64, AppError> {
    if identifier.is_empty() || !identifier.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::NotFound);
    }
    identifier.parse::<i64>().map_err(|_| AppError::NotFound)
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    let Json(body) = payload.map_err(|e| AppError::validation(e.body_text()))?;
    Ok(body)
}

pub async fn get_posts(State(repo): State<PostRepository>) -> Result<Json<Vec<Post>>, AppError> {
    Ok(Json(repo.list().await?))
}

pub async fn get_one_post(
    State(repo): State<PostRepository>,
    Path(identifier): Path<String>,
) -> Result<Json<Post>, AppError> {
    let id = parse_id(&identifier)?;
    Ok(Json(repo.get(id).await?))
}

pub async fn create_post(
    State(repo): State<PostRepository>,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Post>), AppError> {
    let request = json_body(payload)?;
    let post = repo.create(request.into()).await?;

    Ok((StatusCode::CREATED, Json(post)))
}

// An empty body is an update that changes nothing.
fn update_body(body: &Bytes) -> Result<UpdatePostRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(UpdatePostRequest::default());
    }
    json_body(Json::<UpdatePostRequest>::from_bytes(body))
}

pub async fn update_post(
    State(repo): State<PostRepository>,
    Path(identifier): Path<String>,
    body: Bytes,
) -> Result<Json<Post>, AppError> {
    let id = parse_id(&identifier)?;
    // The post must exist before the body is looked at.
    let current = repo.get(id).await?;
    let request = update_body(&body)?;

    Ok(Json(repo.apply_changes(current, request.into()).await?))
}

pub async fn toggle_publish(
    State(repo): State<PostRepository>,
    Path(identifier): Path<String>,
) -> Result<Json<Post>, AppError> {
    let id = parse_id(&identifier)?;
    Ok(Json(repo.toggle_publish(id).await?))
}

pub async fn delete_post(
    State(repo): State<PostRepository>,
    Path(identifier): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&identifier)?;
    repo.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
