use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use super::dto::StudentFields;
use super::repo::{Student, StudentRepo};

/// In-memory stand-in for the document store. Backs the test suite and any
/// environment without a database; iteration order is whatever the map
/// yields, mirroring the store's "natural order, not guaranteed stable"
/// contract.
#[derive(Default)]
pub struct MemoryStudentRepo {
    records: RwLock<HashMap<Uuid, Student>>,
}

impl MemoryStudentRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

fn materialize(id: Uuid, fields: StudentFields) -> Student {
    Student {
        id,
        name: fields.name,
        email: fields.email,
        age: fields.age,
        course: fields.course,
        gender: fields.gender,
        address: fields.address,
    }
}

#[async_trait]
impl StudentRepo for MemoryStudentRepo {
    async fn list(&self) -> anyhow::Result<Vec<Student>> {
        let records = self.records.read().expect("records lock poisoned");
        Ok(records.values().cloned().collect())
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Student>> {
        let records = self.records.read().expect("records lock poisoned");
        Ok(records.get(&id).cloned())
    }

    async fn create(&self, fields: StudentFields) -> anyhow::Result<Student> {
        let student = materialize(Uuid::new_v4(), fields);
        let mut records = self.records.write().expect("records lock poisoned");
        records.insert(student.id, student.clone());
        Ok(student)
    }

    async fn update(&self, id: Uuid, fields: StudentFields) -> anyhow::Result<bool> {
        let mut records = self.records.write().expect("records lock poisoned");
        if !records.contains_key(&id) {
            return Ok(false);
        }
        records.insert(id, materialize(id, fields));
        Ok(true)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut records = self.records.write().expect("records lock poisoned");
        Ok(records.remove(&id).is_some())
    }
}
