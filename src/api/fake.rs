use crate::{
    api::{ApiError, ApiResult, StudentsApi},
    data::student::{NewStudent, Student},
};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct FakeState {
    pub students: Vec<Student>,
    pub next_id: usize,
    pub fail_list: bool,
    pub fail_delete: bool,
    pub fail_create: bool,
    pub list_calls: usize,
    pub get_calls: usize,
    pub delete_calls: usize,
    pub create_calls: usize,
}

/// An in-process stand-in for the students API.
#[derive(Debug, Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
}

pub fn student(id: &str, first_name: &str, last_name: &str) -> Student {
    Student {
        id: id.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        dob: "2001-05-15".to_string(),
        class: "9".to_string(),
        session: "2023-2024".to_string(),
        created_date: None,
    }
}

fn unavailable() -> ApiError {
    ApiError::Server {
        status: 503,
        body: "service unavailable".into(),
    }
}

impl FakeApi {
    pub fn with_students(students: Vec<Student>) -> Self {
        let api = Self::default();
        api.state().students = students;
        api
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().expect("fake api poisoned")
    }
}

#[async_trait]
impl StudentsApi for FakeApi {
    async fn list(&self) -> ApiResult<Vec<Student>> {
        let mut state = self.state();
        state.list_calls += 1;
        if state.fail_list {
            return Err(unavailable());
        }
        Ok(state.students.clone())
    }

    async fn get(&self, id: &str) -> ApiResult<Student> {
        let mut state = self.state();
        state.get_calls += 1;
        state
            .students
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound { id: id.to_string() })
    }

    async fn delete(&self, id: &str) -> ApiResult<()> {
        let mut state = self.state();
        state.delete_calls += 1;
        if state.fail_delete {
            return Err(unavailable());
        }
        let before = state.students.len();
        state.students.retain(|s| s.id != id);
        if state.students.len() == before {
            return Err(ApiError::NotFound { id: id.to_string() });
        }
        Ok(())
    }

    async fn create(&self, new_student: &NewStudent) -> ApiResult<Student> {
        let mut state = self.state();
        state.create_calls += 1;
        if state.fail_create {
            return Err(unavailable());
        }
        state.next_id += 1;
        let created = Student {
            id: format!("new-{}", state.next_id),
            first_name: new_student.first_name.clone(),
            last_name: new_student.last_name.clone(),
            dob: new_student.dob.clone(),
            class: new_student.class.clone(),
            session: new_student.session.clone(),
            created_date: None,
        };
        state.students.push(created.clone());
        Ok(created)
    }
}
