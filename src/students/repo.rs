use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::dto::StudentFields;

/// One student's stored field set plus its identifier. Every field except
/// `id` is optional: the service stores whatever the caller submitted and
/// leaves the rest absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
    pub course: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
}

/// Seam between the service and the persistent store.
///
/// `update` and `delete` report whether the id existed, so handlers can
/// answer NotFound instead of silently acknowledging a no-op.
#[async_trait]
pub trait StudentRepo: Send + Sync {
    async fn list(&self) -> anyhow::Result<Vec<Student>>;
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Student>>;
    async fn create(&self, fields: StudentFields) -> anyhow::Result<Student>;
    async fn update(&self, id: Uuid, fields: StudentFields) -> anyhow::Result<bool>;
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}

pub struct PgStudentRepo {
    db: PgPool,
}

impl PgStudentRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StudentRepo for PgStudentRepo {
    async fn list(&self) -> anyhow::Result<Vec<Student>> {
        let rows = sqlx::query_as::<_, Student>(
            r#"
            SELECT id, name, email, age, course, gender, address
            FROM students
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Student>> {
        let row = sqlx::query_as::<_, Student>(
            r#"
            SELECT id, name, email, age, course, gender, address
            FROM students
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn create(&self, fields: StudentFields) -> anyhow::Result<Student> {
        let row = sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (name, email, age, course, gender, address)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, email, age, course, gender, address
            "#,
        )
        .bind(fields.name)
        .bind(fields.email)
        .bind(fields.age)
        .bind(fields.course)
        .bind(fields.gender)
        .bind(fields.address)
        .fetch_one(&self.db)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: Uuid, fields: StudentFields) -> anyhow::Result<bool> {
        // Full overwrite: absent fields in the submission clear stored ones.
        let result = sqlx::query(
            r#"
            UPDATE students
            SET name = $2, email = $3, age = $4, course = $5, gender = $6, address = $7
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(fields.name)
        .bind(fields.email)
        .bind(fields.age)
        .bind(fields.course)
        .bind(fields.gender)
        .bind(fields.address)
        .execute(&self.db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
