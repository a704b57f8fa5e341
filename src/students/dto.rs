use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Field set accepted by create and update. Unknown keys are ignored,
/// missing keys are stored as absent; the service does not require any
/// particular field to be present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentFields {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub course: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl StudentFields {
    /// The one server-side rule: a submitted age must be non-negative.
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(age) = self.age {
            if age < 0 {
                return Err(ApiError::Validation(format!(
                    "age must be non-negative, got {age}"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct Ack {
    pub message: &'static str,
}
