use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub const TITLE_MAX_LEN: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The writable part of a post, checked against the column constraints
/// before it reaches the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFields {
    pub title: String,
    pub content: String,
    pub author: String,
    pub published: bool,
}

impl PostFields {
    /// Every violated constraint, in column order.
    pub fn violations(&self) -> Vec<String> {
        let mut violations = Vec::new();

        let title_len = self.title.chars().count();
        if title_len == 0 {
            violations.push("Title cannot be empty".to_string());
        } else if title_len > TITLE_MAX_LEN {
            violations.push(format!(
                "Title must be between 1 and {TITLE_MAX_LEN} characters"
            ));
        }
        if self.content.is_empty() {
            violations.push("Content cannot be empty".to_string());
        }
        if self.author.is_empty() {
            violations.push("Author cannot be empty".to_string());
        }

        violations
    }
}

impl From<Post> for PostFields {
    fn from(post: Post) -> Self {
        Self {
            title: post.title,
            content: post.content,
            author: post.author,
            published: post.published,
        }
    }
}

// Fixed-width text keeps the column's lexical order chronological.
pub fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: &str, content: &str, author: &str) -> PostFields {
        PostFields {
            title: title.to_string(),
            content: content.to_string(),
            author: author.to_string(),
            published: false,
        }
    }

    #[test]
    fn valid_fields_have_no_violations() {
        assert!(fields("A", "B", "C").violations().is_empty());
        assert!(fields(&"t".repeat(TITLE_MAX_LEN), "B", "C")
            .violations()
            .is_empty());
    }

    #[test]
    fn title_length_is_counted_in_characters() {
        let title = "é".repeat(TITLE_MAX_LEN);
        assert!(fields(&title, "B", "C").violations().is_empty());

        let too_long = "é".repeat(TITLE_MAX_LEN + 1);
        assert_eq!(
            fields(&too_long, "B", "C").violations(),
            vec!["Title must be between 1 and 200 characters"]
        );
    }

    #[test]
    fn all_empty_fields_are_reported() {
        assert_eq!(
            fields("", "", "").violations(),
            vec![
                "Title cannot be empty",
                "Content cannot be empty",
                "Author cannot be empty",
            ]
        );
    }

    #[test]
    fn timestamps_are_fixed_width() {
        let whole = DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let fractional = DateTime::parse_from_rfc3339("2024-05-01T10:00:00.5Z")
            .unwrap()
            .with_timezone(&Utc);

        assert_eq!(timestamp(whole), "2024-05-01T10:00:00.000000Z");
        assert_eq!(timestamp(fractional), "2024-05-01T10:00:00.500000Z");
        assert!(timestamp(whole) < timestamp(fractional));
    }
}
