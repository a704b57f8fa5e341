use anyhow::Context;
use async_trait::async_trait;

use crate::students::dto::StudentFields;
use crate::students::repo::Student;

/// The UI's view of the record service. Ids are opaque strings here; only
/// the service knows (or cares) what shape they have.
#[async_trait]
pub trait StudentsApi: Send + Sync {
    async fn list(&self) -> anyhow::Result<Vec<Student>>;
    async fn get(&self, id: &str) -> anyhow::Result<Option<Student>>;
    async fn create(&self, fields: &StudentFields) -> anyhow::Result<Student>;
    async fn update(&self, id: &str, fields: &StudentFields) -> anyhow::Result<()>;
    async fn delete(&self, id: &str) -> anyhow::Result<()>;
}

pub struct HttpStudentsApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpStudentsApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, id: &str) -> String {
        format!("{}/students/{}", self.base_url, id)
    }
}

#[async_trait]
impl StudentsApi for HttpStudentsApi {
    async fn list(&self) -> anyhow::Result<Vec<Student>> {
        let students = self
            .client
            .get(format!("{}/students", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Student>>()
            .await
            .context("decode student list")?;
        Ok(students)
    }

    async fn get(&self, id: &str) -> anyhow::Result<Option<Student>> {
        let res = self.client.get(self.url(id)).send().await?;
        if res.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let student = res
            .error_for_status()?
            .json::<Student>()
            .await
            .context("decode student")?;
        Ok(Some(student))
    }

    async fn create(&self, fields: &StudentFields) -> anyhow::Result<Student> {
        let student = self
            .client
            .post(format!("{}/students", self.base_url))
            .json(fields)
            .send()
            .await?
            .error_for_status()?
            .json::<Student>()
            .await
            .context("decode created student")?;
        Ok(student)
    }

    async fn update(&self, id: &str, fields: &StudentFields) -> anyhow::Result<()> {
        self.client
            .put(self.url(id))
            .json(fields)
            .send()
            .await?
            .error_for_status()
            .with_context(|| format!("update student {id}"))?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> anyhow::Result<()> {
        self.client
            .delete(self.url(id))
            .send()
            .await?
            .error_for_status()
            .with_context(|| format!("delete student {id}"))?;
        Ok(())
    }
}
