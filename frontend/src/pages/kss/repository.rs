use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use uuid::Uuid;

use crate::api::{
    ApiClient, ApiError, AssignmentQuery, CreateAssignmentPayload, Employee, EmployeeQuery,
    KssAssignment, KssLesson, KssLessonPayload, KssModule, KssModulePayload, KssQuestion,
    KssQuestionPayload, QuizResult, SubmitQuizPayload, UpdateAssignmentPayload,
};

/// Everything the training overview needs in one load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KssSnapshot {
    pub modules: Vec<KssModule>,
    pub lessons: Vec<KssLesson>,
    pub assignments: Vec<KssAssignment>,
    pub employees: Vec<Employee>,
}

/// Writes issued from the training page. Each resolves to the message
/// shown in the success toast.
#[derive(Debug, Clone, PartialEq)]
pub enum KssCommand {
    SaveModule(Option<Uuid>, KssModulePayload),
    DeleteModule(Uuid),
    SaveLesson {
        id: Option<Uuid>,
        module_id: Uuid,
        payload: KssLessonPayload,
    },
    DeleteLesson(Uuid),
    AddQuestion(Uuid, KssQuestionPayload),
    DeleteQuestion(Uuid),
    Assign(CreateAssignmentPayload),
    UpdateAssignment(Uuid, UpdateAssignmentPayload),
    DeleteAssignment(Uuid),
}

#[derive(Clone)]
pub struct KssRepository {
    client: Rc<ApiClient>,
}

impl KssRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn load(&self) -> Result<KssSnapshot, ApiError> {
        let assignment_query = AssignmentQuery::default();
        let directory = EmployeeQuery::default();
        let (modules, assignments, employees) = futures::join!(
            self.client.get_kss_modules(),
            self.client.get_kss_assignments(&assignment_query),
            self.client.get_employees(&directory)
        );
        let modules = modules?;
        let lessons = try_join_all(
            modules
                .iter()
                .map(|module| self.client.get_kss_lessons(module.id)),
        )
        .await?
        .into_iter()
        .flatten()
        .collect();
        Ok(KssSnapshot {
            modules,
            lessons,
            assignments: assignments?,
            employees: employees?,
        })
    }

    pub async fn questions(&self, lesson_id: Option<Uuid>) -> Result<Vec<KssQuestion>, ApiError> {
        match lesson_id {
            Some(id) => self.client.get_kss_questions(id).await,
            None => Ok(Vec::new()),
        }
    }

    pub async fn submit_quiz(
        &self,
        lesson_id: Uuid,
        payload: SubmitQuizPayload,
    ) -> Result<QuizResult, ApiError> {
        self.client.submit_kss_quiz(lesson_id, &payload).await
    }

    pub async fn execute(&self, command: KssCommand) -> Result<String, ApiError> {
        let client = &self.client;
        let message = match command {
            KssCommand::SaveModule(Some(id), payload) => {
                let module = client.update_kss_module(id, &payload).await?;
                format!("Module \"{}\" updated", module.title)
            }
            KssCommand::SaveModule(None, payload) => {
                let module = client.create_kss_module(&payload).await?;
                format!("Module \"{}\" created", module.title)
            }
            KssCommand::DeleteModule(id) => {
                client.delete_kss_module(id).await?;
                "Module deleted".to_string()
            }
            KssCommand::SaveLesson {
                id: Some(id),
                payload,
                ..
            } => {
                let lesson = client.update_kss_lesson(id, &payload).await?;
                format!("Lesson \"{}\" updated", lesson.title)
            }
            KssCommand::SaveLesson {
                id: None,
                module_id,
                payload,
            } => {
                let lesson = client.create_kss_lesson(module_id, &payload).await?;
                format!("Lesson \"{}\" added", lesson.title)
            }
            KssCommand::DeleteLesson(id) => {
                client.delete_kss_lesson(id).await?;
                "Lesson deleted".to_string()
            }
            KssCommand::AddQuestion(lesson_id, payload) => {
                client.create_kss_question(lesson_id, &payload).await?;
                "Question added".to_string()
            }
            KssCommand::DeleteQuestion(id) => {
                client.delete_kss_question(id).await?;
                "Question deleted".to_string()
            }
            KssCommand::Assign(payload) => {
                client.create_kss_assignment(&payload).await?;
                "Module assigned".to_string()
            }
            KssCommand::UpdateAssignment(id, payload) => {
                let assignment = client.update_kss_assignment(id, &payload).await?;
                format!("Assignment marked {}", assignment.status)
            }
            KssCommand::DeleteAssignment(id) => {
                client.delete_kss_assignment(id).await?;
                "Assignment removed".to_string()
            }
        };
        Ok(message)
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::api::test_support::mock::*;
    use serde_json::json;

    const MODULE_ID: &str = "11111111-1111-4111-8111-111111111111";
    const LESSON_ID: &str = "22222222-2222-4222-8222-222222222222";

    #[tokio::test]
    async fn load_fetches_lessons_for_every_module() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/kss/modules");
            then.status(200).json_body(ok(json!([{
                "id": MODULE_ID,
                "title": "Safety",
                "is_published": true,
                "created_at": "2025-03-01T00:00:00Z",
                "updated_at": "2025-03-01T00:00:00Z"
            }])));
        });
        server.mock(|when, then| {
            when.method(GET)
                .path(&format!("/api/kss/modules/{}/lessons", MODULE_ID));
            then.status(200).json_body(ok(json!([{
                "id": LESSON_ID,
                "module_id": MODULE_ID,
                "title": "Helmets",
                "position": 1,
                "duration_minutes": 15,
                "created_at": "2025-03-01T00:00:00Z"
            }])));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/kss/assignments");
            then.status(200).json_body(ok(json!([])));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/employees");
            then.status(200).json_body(ok(json!([])));
        });
        let repo = KssRepository::new_with_client(Rc::new(ApiClient::new_with_base_url(
            server.url("/api"),
        )));

        let snapshot = repo.load().await.unwrap();
        assert_eq!(snapshot.modules.len(), 1);
        assert_eq!(snapshot.lessons.len(), 1);
        assert_eq!(snapshot.lessons[0].title, "Helmets");
    }

    #[tokio::test]
    async fn delete_command_surfaces_not_found() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(DELETE)
                .path(&format!("/api/kss/modules/{}", MODULE_ID));
            then.status(404).json_body(failure("NOT_FOUND", "Module not found"));
        });
        let repo = KssRepository::new_with_client(Rc::new(ApiClient::new_with_base_url(
            server.url("/api"),
        )));

        let err = repo
            .execute(KssCommand::DeleteModule(Uuid::parse_str(MODULE_ID).unwrap()))
            .await
            .unwrap_err();
        assert_eq!(err.code, "NOT_FOUND");
    }
}
