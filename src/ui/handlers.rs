use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use maud::Markup;
use serde::Deserialize;
use tracing::instrument;

use crate::students::dto::StudentFields;

use super::views::{self, FormValues, Page};
use super::UiState;

const AGE_HINT: &str = "Please enter a valid non-negative age.";

/// Validated before any API call; invalid age means zero network traffic.
fn validate_age(raw: &str) -> Result<i32, &'static str> {
    match raw.trim().parse::<i32>() {
        Ok(age) if age >= 0 => Ok(age),
        _ => Err(AGE_HINT),
    }
}

fn text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn form_to_fields(values: &FormValues) -> Result<StudentFields, &'static str> {
    let age = validate_age(&values.age)?;
    Ok(StudentFields {
        name: text(&values.name),
        email: text(&values.email),
        age: Some(age),
        course: text(&values.course),
        gender: text(&values.gender),
        address: text(&values.address),
    })
}

#[derive(Debug, Deserialize)]
pub struct EditTarget {
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteTarget {
    pub id: String,
}

fn create_view(values: &FormValues, error: Option<&str>) -> Markup {
    views::page(
        Page::Create,
        "Add Student",
        views::student_form("/students/new", "Add Student", values, error),
    )
}

fn edit_view(id: &str, values: &FormValues, error: Option<&str>) -> Markup {
    views::page(
        Page::Edit,
        "Edit Student",
        views::student_form(&format!("/edit?id={id}"), "Save Changes", values, error),
    )
}

pub async fn create_page() -> Markup {
    create_view(&FormValues::default(), None)
}

#[instrument(skip(state, values))]
pub async fn submit_create(
    State(state): State<UiState>,
    Form(values): Form<FormValues>,
) -> Response {
    let fields = match form_to_fields(&values) {
        Ok(fields) => fields,
        Err(message) => return create_view(&values, Some(message)).into_response(),
    };
    match state.api.create(&fields).await {
        Ok(student) => {
            tracing::info!(id = %student.id, "student created");
            Redirect::to("/students").into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "create failed");
            create_view(&values, Some("Failed to add student")).into_response()
        }
    }
}

#[instrument(skip(state))]
pub async fn list_page(State(state): State<UiState>) -> Markup {
    match state.api.list().await {
        Ok(students) => views::page(Page::List, "Students", views::students_table(&students)),
        Err(e) => {
            tracing::error!(error = %e, "list failed");
            views::page(Page::List, "Students", views::alert("Failed to load students"))
        }
    }
}

#[instrument(skip(state))]
pub async fn delete_action(
    State(state): State<UiState>,
    Query(target): Query<DeleteTarget>,
) -> Response {
    match state.api.delete(&target.id).await {
        Ok(()) => Redirect::to("/students").into_response(),
        Err(e) => {
            tracing::error!(error = %e, id = %target.id, "delete failed");
            views::page(Page::List, "Students", views::alert("Failed to delete student"))
                .into_response()
        }
    }
}

#[instrument(skip(state))]
pub async fn edit_page(
    State(state): State<UiState>,
    Query(target): Query<EditTarget>,
) -> Markup {
    let Some(id) = target.id else {
        return views::page(Page::Edit, "Edit Student", views::alert("No student id provided"));
    };
    match state.api.get(&id).await {
        Ok(Some(student)) => edit_view(&id, &FormValues::from(&student), None),
        Ok(None) => views::page(Page::Edit, "Edit Student", views::alert("Student not found")),
        Err(e) => {
            tracing::error!(error = %e, %id, "load for edit failed");
            views::page(Page::Edit, "Edit Student", views::alert("Failed to load student"))
        }
    }
}

#[instrument(skip(state, values))]
pub async fn submit_edit(
    State(state): State<UiState>,
    Query(target): Query<EditTarget>,
    Form(values): Form<FormValues>,
) -> Response {
    let Some(id) = target.id else {
        return views::page(Page::Edit, "Edit Student", views::alert("No student id provided"))
            .into_response();
    };
    let fields = match form_to_fields(&values) {
        Ok(fields) => fields,
        Err(message) => return edit_view(&id, &values, Some(message)).into_response(),
    };
    match state.api.update(&id, &fields).await {
        Ok(()) => Redirect::to("/students").into_response(),
        Err(e) => {
            tracing::error!(error = %e, %id, "update failed");
            edit_view(&id, &values, Some("Failed to update student")).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::http::StatusCode;
    use uuid::Uuid;

    use crate::students::repo::Student;
    use crate::ui::client::StudentsApi;

    use super::*;

    /// Counts every network call and records create/update payloads.
    #[derive(Default)]
    struct MockApi {
        existing: Option<Student>,
        calls: AtomicUsize,
        created: Mutex<Vec<StudentFields>>,
        updated: Mutex<Vec<(String, StudentFields)>>,
    }

    #[async_trait]
    impl StudentsApi for MockApi {
        async fn list(&self) -> anyhow::Result<Vec<Student>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.existing.clone().into_iter().collect())
        }

        async fn get(&self, _id: &str) -> anyhow::Result<Option<Student>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.existing.clone())
        }

        async fn create(&self, fields: &StudentFields) -> anyhow::Result<Student> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.created.lock().unwrap().push(fields.clone());
            Ok(Student {
                id: Uuid::new_v4(),
                name: fields.name.clone(),
                email: fields.email.clone(),
                age: fields.age,
                course: fields.course.clone(),
                gender: fields.gender.clone(),
                address: fields.address.clone(),
            })
        }

        async fn update(&self, id: &str, fields: &StudentFields) -> anyhow::Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.updated
                .lock()
                .unwrap()
                .push((id.to_string(), fields.clone()));
            Ok(())
        }

        async fn delete(&self, _id: &str) -> anyhow::Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Every call fails, standing in for a down or unreachable service.
    struct FailingApi;

    #[async_trait]
    impl StudentsApi for FailingApi {
        async fn list(&self) -> anyhow::Result<Vec<Student>> {
            anyhow::bail!("connection refused")
        }

        async fn get(&self, _id: &str) -> anyhow::Result<Option<Student>> {
            anyhow::bail!("connection refused")
        }

        async fn create(&self, _fields: &StudentFields) -> anyhow::Result<Student> {
            anyhow::bail!("connection refused")
        }

        async fn update(&self, _id: &str, _fields: &StudentFields) -> anyhow::Result<()> {
            anyhow::bail!("connection refused")
        }

        async fn delete(&self, _id: &str) -> anyhow::Result<()> {
            anyhow::bail!("connection refused")
        }
    }

    fn state_with(api: Arc<MockApi>) -> UiState {
        UiState { api }
    }

    fn failing_state() -> UiState {
        UiState {
            api: Arc::new(FailingApi),
        }
    }

    fn ada_form() -> FormValues {
        FormValues {
            name: "Ada".into(),
            email: "ada@x.com".into(),
            age: "30".into(),
            course: "CS".into(),
            gender: "F".into(),
            address: "1 Lane".into(),
        }
    }

    async fn body_of(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn age_validation_accepts_only_non_negative_integers() {
        assert_eq!(validate_age("30"), Ok(30));
        assert_eq!(validate_age(" 0 "), Ok(0));
        assert!(validate_age("-1").is_err());
        assert!(validate_age("abc").is_err());
        assert!(validate_age("").is_err());
        assert!(validate_age("3.5").is_err());
    }

    #[tokio::test]
    async fn non_numeric_age_blocks_create_with_zero_api_calls() {
        let api = Arc::new(MockApi::default());
        let mut values = ada_form();
        values.age = "abc".into();

        let response = submit_create(State(state_with(api.clone())), Form(values)).await;

        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
        let body = body_of(response).await;
        assert!(body.contains(AGE_HINT));
    }

    #[tokio::test]
    async fn negative_age_blocks_create_and_keeps_form_state() {
        let api = Arc::new(MockApi::default());
        let mut values = ada_form();
        values.age = "-3".into();

        let response = submit_create(State(state_with(api.clone())), Form(values)).await;

        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
        let body = body_of(response).await;
        // Entered values survive the rejected submission.
        assert!(body.contains("Ada"));
        assert!(body.contains("ada@x.com"));
    }

    #[tokio::test]
    async fn valid_create_calls_api_once_and_redirects_to_list() {
        let api = Arc::new(MockApi::default());

        let response = submit_create(State(state_with(api.clone())), Form(ada_form())).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
        let created = api.created.lock().unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].name.as_deref(), Some("Ada"));
        assert_eq!(created[0].age, Some(30));
    }

    #[tokio::test]
    async fn edit_page_without_id_aborts_with_alert() {
        let api = Arc::new(MockApi::default());

        let markup = edit_page(
            State(state_with(api.clone())),
            Query(EditTarget { id: None }),
        )
        .await;

        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
        assert!(markup.into_string().contains("No student id provided"));
    }

    #[tokio::test]
    async fn edit_page_with_unknown_id_aborts_with_alert() {
        let api = Arc::new(MockApi::default());

        let markup = edit_page(
            State(state_with(api)),
            Query(EditTarget {
                id: Some(Uuid::new_v4().to_string()),
            }),
        )
        .await;

        assert!(markup.into_string().contains("Student not found"));
    }

    #[tokio::test]
    async fn edit_page_prefills_form_from_fetched_record() {
        let student = Student {
            id: Uuid::new_v4(),
            name: Some("Grace".into()),
            email: Some("grace@x.com".into()),
            age: Some(45),
            course: Some("Compilers".into()),
            gender: None,
            address: None,
        };
        let api = Arc::new(MockApi {
            existing: Some(student),
            ..Default::default()
        });

        let markup = edit_page(
            State(state_with(api)),
            Query(EditTarget {
                id: Some("whatever".into()),
            }),
        )
        .await
        .into_string();

        assert!(markup.contains("Grace"));
        assert!(markup.contains("grace@x.com"));
        assert!(markup.contains("45"));
    }

    #[tokio::test]
    async fn submit_edit_revalidates_age_before_calling_api() {
        let api = Arc::new(MockApi::default());
        let mut values = ada_form();
        values.age = "-1".into();

        submit_edit(
            State(state_with(api.clone())),
            Query(EditTarget {
                id: Some("some-id".into()),
            }),
            Form(values),
        )
        .await;

        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
        assert!(api.updated.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn submit_edit_updates_and_redirects() {
        let api = Arc::new(MockApi::default());

        let response = submit_edit(
            State(state_with(api.clone())),
            Query(EditTarget {
                id: Some("some-id".into()),
            }),
            Form(ada_form()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let updated = api.updated.lock().unwrap();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].0, "some-id");
        assert_eq!(updated[0].1.age, Some(30));
    }

    #[tokio::test]
    async fn create_failure_alerts_and_keeps_form_state() {
        let response = submit_create(State(failing_state()), Form(ada_form())).await;

        let body = body_of(response).await;
        assert!(body.contains("Failed to add student"));
        // Entered values survive the failed call.
        assert!(body.contains("Ada"));
        assert!(body.contains("ada@x.com"));
    }

    #[tokio::test]
    async fn list_failure_renders_alert() {
        let markup = list_page(State(failing_state())).await;
        assert!(markup.into_string().contains("Failed to load students"));
    }

    #[tokio::test]
    async fn edit_page_load_failure_renders_alert() {
        let markup = edit_page(
            State(failing_state()),
            Query(EditTarget {
                id: Some("some-id".into()),
            }),
        )
        .await;
        assert!(markup.into_string().contains("Failed to load student"));
    }

    #[tokio::test]
    async fn edit_failure_alerts_and_keeps_form_state() {
        let response = submit_edit(
            State(failing_state()),
            Query(EditTarget {
                id: Some("some-id".into()),
            }),
            Form(ada_form()),
        )
        .await;

        let body = body_of(response).await;
        assert!(body.contains("Failed to update student"));
        assert!(body.contains("Ada"));
    }

    #[tokio::test]
    async fn delete_failure_renders_alert() {
        let response = delete_action(
            State(failing_state()),
            Query(DeleteTarget {
                id: "some-id".into(),
            }),
        )
        .await;

        let body = body_of(response).await;
        assert!(body.contains("Failed to delete student"));
    }

    #[tokio::test]
    async fn delete_action_redirects_back_to_list() {
        let api = Arc::new(MockApi::default());

        let response = delete_action(
            State(state_with(api.clone())),
            Query(DeleteTarget {
                id: "some-id".into(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
    }
}
