use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::{
    api::{
        CreateAssignmentPayload, KssAssignment, KssLesson, KssLessonPayload, KssModule,
        KssModulePayload, KssQuestion, KssQuestionPayload, QuizAnswer, SubmitQuizPayload,
        UpdateAssignmentPayload, ASSIGNMENT_STATUSES,
    },
    utils::time::parse_date_input,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentState {
    NotStarted,
    InProgress,
    Completed,
}

impl AssignmentState {
    pub fn label(&self) -> &'static str {
        match self {
            AssignmentState::NotStarted => "Not started",
            AssignmentState::InProgress => "In progress",
            AssignmentState::Completed => "Completed",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            AssignmentState::NotStarted => "gray",
            AssignmentState::InProgress => "yellow",
            AssignmentState::Completed => "green",
        }
    }
}

pub fn lesson_ids(lessons: &[KssLesson], module_id: Uuid) -> HashSet<Uuid> {
    lessons
        .iter()
        .filter(|lesson| lesson.module_id == module_id)
        .map(|lesson| lesson.id)
        .collect()
}

/// Share of the module's lessons the assignment has completed, in percent.
/// Ids of lessons that no longer exist are not counted.
pub fn assignment_progress(assignment: &KssAssignment, lesson_ids: &HashSet<Uuid>) -> f64 {
    if lesson_ids.is_empty() {
        return 0.0;
    }
    let done: HashSet<&Uuid> = assignment
        .completed_lesson_ids
        .iter()
        .filter(|id| lesson_ids.contains(id))
        .collect();
    done.len() as f64 / lesson_ids.len() as f64 * 100.0
}

pub fn assignment_state(assignment: &KssAssignment, lesson_ids: &HashSet<Uuid>) -> AssignmentState {
    let progress = assignment_progress(assignment, lesson_ids);
    if assignment.status == "completed" || (!lesson_ids.is_empty() && progress >= 100.0) {
        AssignmentState::Completed
    } else if progress == 0.0 && assignment.status == "assigned" {
        AssignmentState::NotStarted
    } else {
        AssignmentState::InProgress
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModuleStats {
    pub module_id: Uuid,
    pub title: String,
    pub lesson_count: usize,
    pub total_minutes: i64,
    pub assigned: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub not_started: usize,
    pub completion_rate: f64,
    pub average_progress: f64,
}

pub fn module_stats(
    module: &KssModule,
    lessons: &[KssLesson],
    assignments: &[KssAssignment],
) -> ModuleStats {
    let ids = lesson_ids(lessons, module.id);
    let total_minutes = lessons
        .iter()
        .filter(|lesson| lesson.module_id == module.id)
        .map(|lesson| i64::from(lesson.duration_minutes.max(0)))
        .sum();

    let mine: Vec<&KssAssignment> = assignments
        .iter()
        .filter(|a| a.module_id == module.id)
        .collect();
    let (mut completed, mut in_progress, mut not_started) = (0, 0, 0);
    let mut progress_sum = 0.0;
    for assignment in &mine {
        progress_sum += assignment_progress(assignment, &ids);
        match assignment_state(assignment, &ids) {
            AssignmentState::Completed => completed += 1,
            AssignmentState::InProgress => in_progress += 1,
            AssignmentState::NotStarted => not_started += 1,
        }
    }
    let assigned = mine.len();
    ModuleStats {
        module_id: module.id,
        title: module.title.clone(),
        lesson_count: ids.len(),
        total_minutes,
        assigned,
        completed,
        in_progress,
        not_started,
        completion_rate: rate(completed, assigned),
        average_progress: if assigned == 0 {
            0.0
        } else {
            progress_sum / assigned as f64
        },
    }
}

fn rate(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverallStats {
    pub modules: usize,
    pub lessons: usize,
    pub total_minutes: i64,
    pub assigned: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub not_started: usize,
    pub completion_rate: f64,
}

pub fn overall_stats(per_module: &[ModuleStats]) -> OverallStats {
    let mut overall = per_module.iter().fold(
        OverallStats {
            modules: per_module.len(),
            ..OverallStats::default()
        },
        |mut acc, stats| {
            acc.lessons += stats.lesson_count;
            acc.total_minutes += stats.total_minutes;
            acc.assigned += stats.assigned;
            acc.completed += stats.completed;
            acc.in_progress += stats.in_progress;
            acc.not_started += stats.not_started;
            acc
        },
    );
    overall.completion_rate = rate(overall.completed, overall.assigned);
    overall
}

pub fn all_module_stats(
    modules: &[KssModule],
    lessons: &[KssLesson],
    assignments: &[KssAssignment],
) -> Vec<ModuleStats> {
    modules
        .iter()
        .map(|module| module_stats(module, lessons, assignments))
        .collect()
}

pub fn sorted_lessons(lessons: &[KssLesson], module_id: Uuid) -> Vec<KssLesson> {
    let mut rows: Vec<KssLesson> = lessons
        .iter()
        .filter(|lesson| lesson.module_id == module_id)
        .cloned()
        .collect();
    rows.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.title.cmp(&b.title)));
    rows
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleFormState {
    pub title: String,
    pub description: String,
    pub category: String,
    pub is_published: bool,
    pub document_url: String,
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl ModuleFormState {
    pub fn from_module(module: &KssModule) -> Self {
        Self {
            title: module.title.clone(),
            description: module.description.clone().unwrap_or_default(),
            category: module.category.clone().unwrap_or_default(),
            is_published: module.is_published,
            document_url: module.document_url.clone().unwrap_or_default(),
        }
    }

    pub fn to_payload(&self) -> Result<KssModulePayload, String> {
        if self.title.trim().is_empty() {
            return Err("Title is required".into());
        }
        Ok(KssModulePayload {
            title: self.title.trim().to_string(),
            description: optional(&self.description),
            category: optional(&self.category),
            is_published: self.is_published,
            document_url: optional(&self.document_url),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonFormState {
    pub title: String,
    pub content: String,
    pub position: String,
    pub duration_minutes: String,
}

impl LessonFormState {
    pub fn next_for(existing: &[KssLesson]) -> Self {
        let next = existing.iter().map(|l| l.position).max().unwrap_or(0) + 1;
        Self {
            position: next.to_string(),
            duration_minutes: "15".to_string(),
            ..Self::default()
        }
    }

    pub fn from_lesson(lesson: &KssLesson) -> Self {
        Self {
            title: lesson.title.clone(),
            content: lesson.content.clone().unwrap_or_default(),
            position: lesson.position.to_string(),
            duration_minutes: lesson.duration_minutes.to_string(),
        }
    }

    pub fn to_payload(&self) -> Result<KssLessonPayload, String> {
        if self.title.trim().is_empty() {
            return Err("Title is required".into());
        }
        let position: i32 = self
            .position
            .trim()
            .parse()
            .map_err(|_| "Position must be a whole number".to_string())?;
        let duration_minutes: i32 = self
            .duration_minutes
            .trim()
            .parse()
            .map_err(|_| "Duration must be a whole number of minutes".to_string())?;
        if position < 1 {
            return Err("Position starts at 1".into());
        }
        if duration_minutes < 0 {
            return Err("Duration cannot be negative".into());
        }
        Ok(KssLessonPayload {
            title: self.title.trim().to_string(),
            content: optional(&self.content),
            position,
            duration_minutes,
        })
    }
}

/// Options are entered one per line; the correct option is 1-based.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFormState {
    pub prompt: String,
    pub options: String,
    pub correct_option: String,
}

impl QuestionFormState {
    pub fn to_payload(&self) -> Result<KssQuestionPayload, String> {
        if self.prompt.trim().is_empty() {
            return Err("Prompt is required".into());
        }
        let options: Vec<String> = self
            .options
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        if options.len() < 2 {
            return Err("Enter at least two options".into());
        }
        let correct: usize = self
            .correct_option
            .trim()
            .parse()
            .map_err(|_| "Correct option must be a number".to_string())?;
        if correct == 0 || correct > options.len() {
            return Err(format!("Correct option must be between 1 and {}", options.len()));
        }
        Ok(KssQuestionPayload {
            prompt: self.prompt.trim().to_string(),
            options,
            correct_option: (correct - 1) as i32,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignFormState {
    pub employee_id: String,
    pub due_date: String,
}

impl AssignFormState {
    pub fn to_payload(&self, module_id: Uuid) -> Result<CreateAssignmentPayload, String> {
        let employee_id =
            Uuid::parse_str(self.employee_id.trim()).map_err(|_| "Select an employee".to_string())?;
        Ok(CreateAssignmentPayload {
            module_id,
            employee_id,
            due_date: parse_date_input(&self.due_date)?,
        })
    }
}

/// Status change for an assignment; lesson progress is left untouched.
pub fn status_update(assignment: &KssAssignment, status: &str) -> Result<UpdateAssignmentPayload, String> {
    if !ASSIGNMENT_STATUSES.contains(&status) {
        return Err(format!("Unknown assignment status {:?}", status));
    }
    Ok(UpdateAssignmentPayload {
        status: status.to_string(),
        due_date: assignment.due_date,
        completed_lesson_ids: None,
    })
}

/// Selected option per question of the lesson being taken.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizState {
    pub assignment_id: Option<Uuid>,
    pub answers: HashMap<Uuid, i32>,
}

impl QuizState {
    pub fn select(&mut self, question_id: Uuid, option: i32) {
        self.answers.insert(question_id, option);
    }

    pub fn to_payload(&self, questions: &[KssQuestion]) -> Result<SubmitQuizPayload, String> {
        let assignment_id = self
            .assignment_id
            .ok_or_else(|| "Choose the assignment this attempt belongs to".to_string())?;
        let answers = questions
            .iter()
            .map(|question| {
                self.answers
                    .get(&question.id)
                    .map(|selected| QuizAnswer {
                        question_id: question.id,
                        selected_option: *selected,
                    })
                    .ok_or_else(|| format!("Answer \"{}\"", question.prompt))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SubmitQuizPayload {
            assignment_id,
            answers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixtures::{assignment, id, lesson, stamp};

    fn module(n: u128, title: &str) -> KssModule {
        KssModule {
            id: id(n),
            title: title.to_string(),
            description: None,
            category: None,
            is_published: true,
            document_url: None,
            created_at: stamp(),
            updated_at: stamp(),
        }
    }

    fn question(n: u128, lesson_id: u128) -> KssQuestion {
        KssQuestion {
            id: id(n),
            lesson_id: id(lesson_id),
            prompt: format!("Question {}", n),
            options: vec!["a".into(), "b".into()],
            correct_option: 0,
        }
    }

    #[test]
    fn progress_ignores_lessons_that_no_longer_exist() {
        let lessons = vec![lesson(11, 1, 10), lesson(12, 1, 20), lesson(13, 1, 30), lesson(14, 1, 5)];
        let ids = lesson_ids(&lessons, id(1));
        let a = assignment(100, 1, "in-progress", &[11, 12, 99]);
        assert_eq!(assignment_progress(&a, &ids), 50.0);
    }

    #[test]
    fn progress_is_zero_without_lessons() {
        let a = assignment(100, 1, "in-progress", &[11]);
        assert_eq!(assignment_progress(&a, &HashSet::new()), 0.0);
        assert_eq!(assignment_state(&a, &HashSet::new()), AssignmentState::InProgress);
    }

    #[test]
    fn state_classification_follows_status_and_progress() {
        let lessons = vec![lesson(11, 1, 10), lesson(12, 1, 20)];
        let ids = lesson_ids(&lessons, id(1));
        assert_eq!(
            assignment_state(&assignment(1, 1, "assigned", &[]), &ids),
            AssignmentState::NotStarted
        );
        assert_eq!(
            assignment_state(&assignment(2, 1, "assigned", &[11]), &ids),
            AssignmentState::InProgress
        );
        assert_eq!(
            assignment_state(&assignment(3, 1, "in-progress", &[]), &ids),
            AssignmentState::InProgress
        );
        assert_eq!(
            assignment_state(&assignment(4, 1, "in-progress", &[11, 12]), &ids),
            AssignmentState::Completed
        );
        assert_eq!(
            assignment_state(&assignment(5, 1, "completed", &[]), &ids),
            AssignmentState::Completed
        );
    }

    #[test]
    fn module_stats_reduce_lessons_and_assignments() {
        let m = module(1, "Safety");
        let lessons = vec![lesson(11, 1, 10), lesson(12, 1, 20), lesson(21, 2, 99)];
        let assignments = vec![
            assignment(1, 1, "assigned", &[]),
            assignment(2, 1, "in-progress", &[11]),
            assignment(3, 1, "completed", &[11, 12]),
            assignment(4, 2, "completed", &[21]),
        ];
        let stats = module_stats(&m, &lessons, &assignments);
        assert_eq!(stats.lesson_count, 2);
        assert_eq!(stats.total_minutes, 30);
        assert_eq!(stats.assigned, 3);
        assert_eq!((stats.completed, stats.in_progress, stats.not_started), (1, 1, 1));
        assert!((stats.completion_rate - 100.0 / 3.0).abs() < 1e-9);
        assert!((stats.average_progress - 50.0).abs() < 1e-9);
    }

    #[test]
    fn unassigned_module_has_zero_rates() {
        let stats = module_stats(&module(1, "Empty"), &[], &[]);
        assert_eq!(stats.assigned, 0);
        assert_eq!(stats.completion_rate, 0.0);
        assert_eq!(stats.average_progress, 0.0);
    }

    #[test]
    fn overall_stats_sum_modules() {
        let modules = vec![module(1, "Safety"), module(2, "Quality")];
        let lessons = vec![lesson(11, 1, 10), lesson(21, 2, 5)];
        let assignments = vec![
            assignment(1, 1, "completed", &[11]),
            assignment(2, 2, "assigned", &[]),
            assignment(3, 2, "in-progress", &[]),
            assignment(4, 2, "completed", &[21]),
        ];
        let overall = overall_stats(&all_module_stats(&modules, &lessons, &assignments));
        assert_eq!(overall.modules, 2);
        assert_eq!(overall.lessons, 2);
        assert_eq!(overall.total_minutes, 15);
        assert_eq!(overall.assigned, 4);
        assert_eq!(overall.completed, 2);
        assert_eq!(overall.completion_rate, 50.0);
        assert_eq!(overall_stats(&[]).completion_rate, 0.0);
    }

    #[test]
    fn lessons_are_ordered_by_position() {
        let mut a = lesson(11, 1, 10);
        a.position = 3;
        let mut b = lesson(12, 1, 10);
        b.position = 1;
        let other = lesson(21, 2, 10);
        let ordered = sorted_lessons(&[a, b, other], id(1));
        assert_eq!(ordered.iter().map(|l| l.id).collect::<Vec<_>>(), vec![id(12), id(11)]);
        assert_eq!(LessonFormState::next_for(&ordered).position, "4");
    }

    #[test]
    fn lesson_form_validates_numbers() {
        let mut form = LessonFormState {
            title: "Intro".into(),
            position: "one".into(),
            duration_minutes: "10".into(),
            ..LessonFormState::default()
        };
        assert!(form.to_payload().unwrap_err().contains("Position"));
        form.position = "2".into();
        form.duration_minutes = "-5".into();
        assert!(form.to_payload().unwrap_err().contains("negative"));
        form.duration_minutes = "25".into();
        let payload = form.to_payload().unwrap();
        assert_eq!((payload.position, payload.duration_minutes), (2, 25));
    }

    #[test]
    fn question_form_converts_to_zero_based_index() {
        let form = QuestionFormState {
            prompt: "Which is safe?".into(),
            options: "Helmet\n\n  Sandals \n".into(),
            correct_option: "1".into(),
        };
        let payload = form.to_payload().unwrap();
        assert_eq!(payload.options, vec!["Helmet", "Sandals"]);
        assert_eq!(payload.correct_option, 0);

        let out_of_range = QuestionFormState {
            correct_option: "3".into(),
            ..form
        };
        assert!(out_of_range.to_payload().unwrap_err().contains("between 1 and 2"));
    }

    #[test]
    fn module_form_requires_title() {
        assert!(ModuleFormState::default().to_payload().is_err());
        let form = ModuleFormState {
            title: " Safety ".into(),
            category: "  ".into(),
            ..ModuleFormState::default()
        };
        let payload = form.to_payload().unwrap();
        assert_eq!(payload.title, "Safety");
        assert!(payload.category.is_none());
    }

    #[test]
    fn status_update_keeps_progress_untouched() {
        let a = assignment(1, 1, "assigned", &[11]);
        let payload = status_update(&a, "in-progress").unwrap();
        assert!(payload.completed_lesson_ids.is_none());
        assert!(status_update(&a, "archived").is_err());
    }

    #[test]
    fn quiz_requires_assignment_and_every_answer() {
        let questions = vec![question(1, 11), question(2, 11)];
        let mut quiz = QuizState::default();
        assert!(quiz.to_payload(&questions).unwrap_err().contains("assignment"));
        quiz.assignment_id = Some(id(100));
        quiz.select(id(1), 1);
        assert_eq!(quiz.to_payload(&questions).unwrap_err(), "Answer \"Question 2\"");
        quiz.select(id(2), 0);
        let payload = quiz.to_payload(&questions).unwrap();
        assert_eq!(payload.answers.len(), 2);
        assert_eq!(payload.answers[0].selected_option, 1);
    }

    #[test]
    fn assign_form_requires_employee() {
        let form = AssignFormState::default();
        assert!(form.to_payload(id(1)).is_err());
        let form = AssignFormState {
            employee_id: id(7).to_string(),
            due_date: "2025-04-01".into(),
        };
        assert_eq!(form.to_payload(id(1)).unwrap().employee_id, id(7));
    }
}
