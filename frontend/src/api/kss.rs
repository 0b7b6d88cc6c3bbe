use uuid::Uuid;

use super::{
    client::{with_query, ApiClient},
    types::{
        ApiError, AssignmentQuery, CreateAssignmentPayload, KssAssignment, KssLesson,
        KssLessonPayload, KssModule, KssModulePayload, KssQuestion, KssQuestionPayload, QuizResult,
        SubmitQuizPayload, UpdateAssignmentPayload,
    },
};

impl ApiClient {
    pub async fn get_kss_modules(&self) -> Result<Vec<KssModule>, ApiError> {
        self.get("/kss/modules").await
    }

    pub async fn create_kss_module(
        &self,
        payload: &KssModulePayload,
    ) -> Result<KssModule, ApiError> {
        self.post("/kss/modules", payload).await
    }

    pub async fn update_kss_module(
        &self,
        id: Uuid,
        payload: &KssModulePayload,
    ) -> Result<KssModule, ApiError> {
        self.put(&format!("/kss/modules/{}", id), payload).await
    }

    pub async fn delete_kss_module(&self, id: Uuid) -> Result<(), ApiError> {
        self.delete(&format!("/kss/modules/{}", id)).await
    }

    pub async fn get_kss_lessons(&self, module_id: Uuid) -> Result<Vec<KssLesson>, ApiError> {
        self.get(&format!("/kss/modules/{}/lessons", module_id)).await
    }

    pub async fn create_kss_lesson(
        &self,
        module_id: Uuid,
        payload: &KssLessonPayload,
    ) -> Result<KssLesson, ApiError> {
        self.post(&format!("/kss/modules/{}/lessons", module_id), payload)
            .await
    }

    pub async fn update_kss_lesson(
        &self,
        id: Uuid,
        payload: &KssLessonPayload,
    ) -> Result<KssLesson, ApiError> {
        self.put(&format!("/kss/lessons/{}", id), payload).await
    }

    pub async fn delete_kss_lesson(&self, id: Uuid) -> Result<(), ApiError> {
        self.delete(&format!("/kss/lessons/{}", id)).await
    }

    pub async fn get_kss_questions(&self, lesson_id: Uuid) -> Result<Vec<KssQuestion>, ApiError> {
        self.get(&format!("/kss/lessons/{}/questions", lesson_id))
            .await
    }

    pub async fn create_kss_question(
        &self,
        lesson_id: Uuid,
        payload: &KssQuestionPayload,
    ) -> Result<KssQuestion, ApiError> {
        self.post(&format!("/kss/lessons/{}/questions", lesson_id), payload)
            .await
    }

    pub async fn delete_kss_question(&self, id: Uuid) -> Result<(), ApiError> {
        self.delete(&format!("/kss/questions/{}", id)).await
    }

    pub async fn submit_kss_quiz(
        &self,
        lesson_id: Uuid,
        payload: &SubmitQuizPayload,
    ) -> Result<QuizResult, ApiError> {
        self.post(&format!("/kss/lessons/{}/submit", lesson_id), payload)
            .await
    }

    pub async fn get_kss_assignments(
        &self,
        query: &AssignmentQuery,
    ) -> Result<Vec<KssAssignment>, ApiError> {
        let path = with_query(
            "/kss/assignments",
            &[
                ("employee_id", query.employee_id.map(|id| id.to_string())),
                ("module_id", query.module_id.map(|id| id.to_string())),
            ],
        );
        self.get(&path).await
    }

    pub async fn create_kss_assignment(
        &self,
        payload: &CreateAssignmentPayload,
    ) -> Result<KssAssignment, ApiError> {
        self.post("/kss/assignments", payload).await
    }

    pub async fn update_kss_assignment(
        &self,
        id: Uuid,
        payload: &UpdateAssignmentPayload,
    ) -> Result<KssAssignment, ApiError> {
        self.put(&format!("/kss/assignments/{}", id), payload).await
    }

    pub async fn delete_kss_assignment(&self, id: Uuid) -> Result<(), ApiError> {
        self.delete(&format!("/kss/assignments/{}", id)).await
    }
}
