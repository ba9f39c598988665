//! Post persistence.
//!
//! Each operation is a single statement against the pool and reports failures
//! as [`AppError`] so the route layer only has to pick a status code.

use crate::{
    error::AppError,
    models::{Post, PostFields, timestamp},
    params::Field,
};
use chrono::Utc;
use sqlx::SqlitePool;

const POST_COLUMNS: &str = "id, title, content, author, published, created_at, updated_at";

/// Create input as received; every field is still optional here.
#[derive(Debug, Default, Clone)]
pub struct NewPost {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct PostChanges {
    pub title: Field<String>,
    pub content: Field<String>,
    pub author: Field<String>,
    pub published: Field<bool>,
}

#[derive(Clone)]
pub struct PostRepository {
    pool: SqlitePool,
}

impl PostRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All posts, newest first.
    pub async fn list(&self) -> Result<Vec<Post>, AppError> {
        let query = format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY created_at DESC, id DESC"
        );
        let posts = sqlx::query_as::<_, Post>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(posts)
    }

    pub async fn get(&self, id: i64) -> Result<Post, AppError> {
        let query = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = ?1");
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn create(&self, new_post: NewPost) -> Result<Post, AppError> {
        let (Some(title), Some(content), Some(author)) =
            (new_post.title, new_post.content, new_post.author)
        else {
            return Err(required_fields());
        };
        if title.is_empty() || content.is_empty() || author.is_empty() {
            return Err(required_fields());
        }

        let fields = PostFields {
            title,
            content,
            author,
            published: false,
        };
        check(&fields)?;

        let now = timestamp(Utc::now());
        let query = format!(
            r#"
            INSERT INTO posts (title, content, author, published, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?5)
            RETURNING {POST_COLUMNS}
            "#
        );
        let post = sqlx::query_as::<_, Post>(&query)
            .bind(&fields.title)
            .bind(&fields.content)
            .bind(&fields.author)
            .bind(fields.published)
            .bind(&now)
            .fetch_one(&self.pool)
            .await?;

        tracing::info!(id = post.id, "Created post");
        Ok(post)
    }

    /// Applies only the fields that were sent; the rest keep their stored value.
    pub async fn update(&self, id: i64, changes: PostChanges) -> Result<Post, AppError> {
        let current = self.get(id).await?;
        self.apply_changes(current, changes).await
    }

    /// Like [`update`](Self::update), for a post the caller already loaded.
    pub async fn apply_changes(&self, current: Post, changes: PostChanges) -> Result<Post, AppError> {
        let id = current.id;
        let current = PostFields::from(current);
        let fields = PostFields {
            title: changes.title.or_keep(current.title),
            content: changes.content.or_keep(current.content),
            author: changes.author.or_keep(current.author),
            published: changes.published.or_keep(current.published),
        };
        check(&fields)?;

        let query = format!(
            r#"
            UPDATE posts
            SET
                title = ?1,
                content = ?2,
                author = ?3,
                published = ?4,
                updated_at = ?5
            WHERE id = ?6
            RETURNING {POST_COLUMNS}
            "#
        );
        let post = sqlx::query_as::<_, Post>(&query)
            .bind(&fields.title)
            .bind(&fields.content)
            .bind(&fields.author)
            .bind(fields.published)
            .bind(timestamp(Utc::now()))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound)?;

        tracing::info!(id, "Updated post");
        Ok(post)
    }

    pub async fn toggle_publish(&self, id: i64) -> Result<Post, AppError> {
        let query = format!(
            r#"
            UPDATE posts
            SET
                published = NOT published,
                updated_at = ?1
            WHERE id = ?2
            RETURNING {POST_COLUMNS}
            "#
        );
        let post = sqlx::query_as::<_, Post>(&query)
            .bind(timestamp(Utc::now()))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound)?;

        tracing::info!(id, published = post.published, "Toggled post");
        Ok(post)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        tracing::info!(id, "Deleted post");
        Ok(())
    }
}

fn required_fields() -> AppError {
    AppError::validation("Title, content, and author are required")
}

fn check(fields: &PostFields) -> Result<(), AppError> {
    let violations = fields.violations();
    if violations.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(violations.join(", ")))
    }
}
