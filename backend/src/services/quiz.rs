//! Quiz grading and the assignment progress it drives.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::kss::{AssignmentStatus, KssAssignment, KssQuestion, QuizAnswer, QuizResult},
    repositories::{
        transaction::{begin_transaction, commit_transaction},
        KssAssignmentRepository, KssLessonRepository, KssQuestionRepository, Repository,
    },
    types::{KssAssignmentId, KssLessonId, KssQuestionId},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuizGrade {
    pub correct: usize,
    pub total: usize,
    /// Percentage rounded to one decimal.
    pub score: f64,
    pub passed: bool,
}

/// Grades answers against the lesson's questions. Unknown or repeated
/// question ids never add to the score; a lesson without questions passes
/// with 100.
pub fn grade(questions: &[KssQuestion], answers: &[QuizAnswer], pass_threshold: f64) -> QuizGrade {
    let total = questions.len();
    if total == 0 {
        return QuizGrade {
            correct: 0,
            total: 0,
            score: 100.0,
            passed: true,
        };
    }
    let selected: HashMap<KssQuestionId, i32> = answers
        .iter()
        .map(|answer| (answer.question_id, answer.selected_option))
        .collect();
    let correct = questions
        .iter()
        .filter(|q| selected.get(&q.id) == Some(&q.correct_option))
        .count();
    let raw = correct as f64 / total as f64 * 100.0;
    let score = (raw * 10.0).round() / 10.0;
    QuizGrade {
        correct,
        total,
        score,
        passed: score >= pass_threshold,
    }
}

/// Marks `lesson_id` complete on the assignment. The assignment becomes
/// `completed` once every module lesson is done, `in-progress` otherwise.
pub fn record_lesson_pass(
    assignment: &mut KssAssignment,
    lesson_id: KssLessonId,
    module_lessons: &[KssLessonId],
    score: f64,
    now: DateTime<Utc>,
) {
    let lesson_uuid = *lesson_id.as_uuid();
    if !assignment.completed_lesson_ids.contains(&lesson_uuid) {
        assignment.completed_lesson_ids.push(lesson_uuid);
    }
    assignment.score = Some(score);

    let done: HashSet<&Uuid> = assignment.completed_lesson_ids.iter().collect();
    let all_done = !module_lessons.is_empty()
        && module_lessons
            .iter()
            .all(|lesson| done.contains(lesson.as_uuid()));
    let status = if all_done {
        AssignmentStatus::Completed
    } else {
        AssignmentStatus::InProgress
    };
    assignment.set_status(status, now);
}

/// Records a failed attempt. A fresh assignment starts progressing; any
/// other status is kept.
pub fn record_lesson_fail(assignment: &mut KssAssignment, score: f64, now: DateTime<Utc>) {
    assignment.score = Some(score);
    if assignment.status == AssignmentStatus::Assigned {
        assignment.set_status(AssignmentStatus::InProgress, now);
    }
}

#[derive(Clone)]
pub struct QuizService {
    pool: PgPool,
    pass_threshold: f64,
}

impl QuizService {
    pub fn new(pool: PgPool, pass_threshold: f64) -> Self {
        Self {
            pool,
            pass_threshold,
        }
    }

    pub async fn submit(
        &self,
        lesson_id: KssLessonId,
        assignment_id: KssAssignmentId,
        answers: &[QuizAnswer],
    ) -> Result<QuizResult, AppError> {
        let lesson = KssLessonRepository::new()
            .find_by_id(&self.pool, lesson_id)
            .await?;
        let questions = KssQuestionRepository::new()
            .list_by_lesson(&self.pool, lesson_id)
            .await?;
        let module_lessons: Vec<KssLessonId> = KssLessonRepository::new()
            .list_by_module(&self.pool, lesson.module_id)
            .await?
            .into_iter()
            .map(|l| l.id)
            .collect();

        let graded = grade(&questions, answers, self.pass_threshold);
        let assignments = KssAssignmentRepository::new();
        let mut tx = begin_transaction(&self.pool).await?;
        let mut assignment = assignments.find_for_update(&mut tx, assignment_id).await?;
        if assignment.module_id != lesson.module_id {
            return Err(AppError::BadRequest(
                "Assignment does not belong to the lesson's module".into(),
            ));
        }

        if graded.passed {
            record_lesson_pass(
                &mut assignment,
                lesson_id,
                &module_lessons,
                graded.score,
                Utc::now(),
            );
        } else {
            record_lesson_fail(&mut assignment, graded.score, Utc::now());
        }
        let assignment = assignments.save_progress(&mut tx, &assignment).await?;
        commit_transaction(tx).await?;

        tracing::info!(
            lesson_id = %lesson_id,
            assignment_id = %assignment.id,
            score = graded.score,
            passed = graded.passed,
            "Quiz submitted"
        );

        Ok(QuizResult {
            lesson_id,
            correct: graded.correct,
            total: graded.total,
            score: graded.score,
            passed: graded.passed,
            assignment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::kss::CreateAssignmentPayload;
    use crate::types::{EmployeeId, KssModuleId};

    fn question(correct_option: i32) -> KssQuestion {
        KssQuestion {
            id: KssQuestionId::new(),
            lesson_id: KssLessonId::new(),
            prompt: "?".into(),
            options: vec!["a".into(), "b".into(), "c".into()],
            correct_option,
            created_at: Utc::now(),
        }
    }

    fn answer(question: &KssQuestion, selected_option: i32) -> QuizAnswer {
        QuizAnswer {
            question_id: question.id,
            selected_option,
        }
    }

    fn assignment() -> KssAssignment {
        KssAssignment::new(CreateAssignmentPayload {
            module_id: KssModuleId::new(),
            employee_id: EmployeeId::new(),
            due_date: None,
        })
    }

    #[test]
    fn grade_rounds_to_one_decimal() {
        let questions = vec![question(0), question(1), question(2)];
        let answers = vec![answer(&questions[0], 0), answer(&questions[1], 1)];
        let graded = grade(&questions, &answers, 70.0);
        assert_eq!(graded.correct, 2);
        assert_eq!(graded.total, 3);
        assert_eq!(graded.score, 66.7);
        assert!(!graded.passed);
    }

    #[test]
    fn grade_passes_at_threshold() {
        let questions: Vec<KssQuestion> = (0..10).map(|_| question(0)).collect();
        let answers: Vec<QuizAnswer> = questions
            .iter()
            .enumerate()
            .map(|(i, q)| answer(q, if i < 7 { 0 } else { 1 }))
            .collect();
        let graded = grade(&questions, &answers, 70.0);
        assert_eq!(graded.score, 70.0);
        assert!(graded.passed);
    }

    #[test]
    fn lesson_without_questions_passes() {
        let graded = grade(&[], &[], 70.0);
        assert_eq!(graded.score, 100.0);
        assert!(graded.passed);
    }

    #[test]
    fn answers_to_unknown_questions_are_ignored() {
        let questions = vec![question(0)];
        let stray = QuizAnswer {
            question_id: KssQuestionId::new(),
            selected_option: 0,
        };
        assert_eq!(grade(&questions, &[stray], 70.0).correct, 0);
    }

    #[test]
    fn pass_moves_assignment_to_in_progress_then_completed() {
        let first = KssLessonId::new();
        let second = KssLessonId::new();
        let lessons = vec![first, second];
        let mut assignment = assignment();

        record_lesson_pass(&mut assignment, first, &lessons, 80.0, Utc::now());
        assert_eq!(assignment.status, AssignmentStatus::InProgress);
        assert!(assignment.completed_at.is_none());

        record_lesson_pass(&mut assignment, first, &lessons, 90.0, Utc::now());
        assert_eq!(assignment.completed_lesson_ids.len(), 1);

        record_lesson_pass(&mut assignment, second, &lessons, 100.0, Utc::now());
        assert_eq!(assignment.status, AssignmentStatus::Completed);
        assert!(assignment.completed_at.is_some());
        assert_eq!(assignment.score, Some(100.0));
    }

    #[test]
    fn failed_attempt_starts_a_fresh_assignment() {
        let mut assignment = assignment();
        assert_eq!(assignment.status, AssignmentStatus::Assigned);

        record_lesson_fail(&mut assignment, 40.0, Utc::now());
        assert_eq!(assignment.status, AssignmentStatus::InProgress);
        assert_eq!(assignment.score, Some(40.0));
        assert!(assignment.completed_lesson_ids.is_empty());
    }

    #[test]
    fn failed_attempt_keeps_completed_status() {
        let lesson = KssLessonId::new();
        let mut assignment = assignment();
        record_lesson_pass(&mut assignment, lesson, &[lesson], 100.0, Utc::now());
        let completed_at = assignment.completed_at;

        record_lesson_fail(&mut assignment, 20.0, Utc::now());
        assert_eq!(assignment.status, AssignmentStatus::Completed);
        assert_eq!(assignment.completed_at, completed_at);
        assert_eq!(assignment.score, Some(20.0));
    }
}
