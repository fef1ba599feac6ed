//! Ledger tools and their dispatch onto the shared service.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use learnpath_core::{CourseId, Identifier, LedgerError, Milestone, OperationResult, ProgressResult};
use learnpath_guide::Quiz;
use learnpath_progress::{ProgressService, SharedLedger};

use crate::protocol::McpTool;

fn tool(name: &str, description: &str, input_schema: Value) -> McpTool {
    McpTool {
        name: name.to_string(),
        description: description.to_string(),
        input_schema,
    }
}

fn course_only() -> Value {
    json!({
        "type": "object",
        "properties": {
            "courseId": {"type": "integer", "description": "Catalog course id"}
        },
        "required": ["courseId"]
    })
}

fn no_args() -> Value {
    json!({"type": "object", "properties": {}})
}

/// Tools served by the ledger, in listing order.
pub fn builtin_tools() -> Vec<McpTool> {
    vec![
        tool("register", "Register the caller (no-op if already registered)", no_args()),
        tool("get_profile", "Get the caller's profile", no_args()),
        tool("list_courses", "List the course catalog", no_args()),
        tool("enroll", "Enroll the caller in a course", course_only()),
        tool("list_my_progress", "List the caller's progress per enrolled course", no_args()),
        tool("get_points", "Get the caller's total points", no_args()),
        tool(
            "get_profile_by_identifier",
            "Look up any user's points and enrollments",
            json!({
                "type": "object",
                "properties": {
                    "identifier": {"type": "string", "description": "User identifier"}
                },
                "required": ["identifier"]
            }),
        ),
        tool(
            "update_milestones",
            "Replace the milestone list of a course",
            json!({
                "type": "object",
                "properties": {
                    "courseId": {"type": "integer"},
                    "milestones": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "threshold": {"type": "integer", "minimum": 1},
                                "bonusPoints": {"type": "integer", "minimum": 0}
                            },
                            "required": ["threshold", "bonusPoints"]
                        }
                    }
                },
                "required": ["courseId", "milestones"]
            }),
        ),
        tool(
            "update_course_progress",
            "Record completed lessons and passed quizzes for an enrolled course",
            json!({
                "type": "object",
                "properties": {
                    "courseId": {"type": "integer"},
                    "lessonsCompleted": {"type": "integer", "minimum": 0},
                    "quizzesPassed": {"type": "integer", "minimum": 0}
                },
                "required": ["courseId", "lessonsCompleted", "quizzesPassed"]
            }),
        ),
        tool("get_milestones", "Get the milestones of a course", course_only()),
        tool(
            "submit_quiz",
            "Grade a generated quiz and credit it to an enrolled course",
            json!({
                "type": "object",
                "properties": {
                    "courseId": {"type": "integer"},
                    "quiz": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "question": {"type": "string"},
                                "choices": {"type": "array", "items": {"type": "string"}},
                                "correct_answer": {"type": "string"}
                            }
                        }
                    },
                    "answers": {"type": "array", "items": {"type": "string"}}
                },
                "required": ["courseId", "quiz", "answers"]
            }),
        ),
    ]
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CourseArgs {
    course_id: CourseId,
}

#[derive(Deserialize)]
struct IdentifierArgs {
    identifier: Identifier,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MilestoneArgs {
    course_id: CourseId,
    milestones: Vec<Milestone>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProgressArgs {
    course_id: CourseId,
    lessons_completed: i64,
    quizzes_passed: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuizArgs {
    course_id: CourseId,
    #[serde(flatten)]
    quiz: Quiz,
    answers: Vec<String>,
}

fn decode<T: DeserializeOwned>(arguments: Value) -> Result<T, LedgerError> {
    let arguments = if arguments.is_null() { json!({}) } else { arguments };
    serde_json::from_value(arguments)
        .map_err(|e| LedgerError::invalid(format!("Invalid arguments: {}", e)))
}

fn to_json<T: Serialize>(value: T) -> Value {
    serde_json::to_value(value)
        .unwrap_or_else(|e| json!({"success": false, "message": e.to_string()}))
}

/// Run one tool as `caller`.
///
/// Returns `None` for an unknown tool. Argument errors come back as a failed
/// result with `InvalidInput`.
pub async fn call_tool(
    ledger: &SharedLedger,
    caller: &Identifier,
    name: &str,
    arguments: Value,
) -> Option<Value> {
    debug!("Tool call {} by {}", name, caller);

    let value = match name {
        "register" => to_json(ledger.with(|s| s.register(caller)).await),
        "get_profile" => to_json(ledger.read(|s| s.get_profile(caller)).await),
        "list_courses" => to_json(ledger.read(|s| s.list_courses().to_vec()).await),
        "list_my_progress" => to_json(ledger.read(|s| s.list_my_progress(caller)).await),
        "get_points" => to_json(ledger.read(|s| s.get_points(caller)).await),

        "enroll" => match decode::<CourseArgs>(arguments) {
            Ok(args) => to_json(ledger.with(|s| s.enroll(caller, args.course_id)).await),
            Err(e) => to_json(OperationResult::failed(&e)),
        },

        "get_profile_by_identifier" => match decode::<IdentifierArgs>(arguments) {
            Ok(args) => to_json(ledger.read(|s| s.get_profile_by_identifier(&args.identifier)).await),
            Err(e) => to_json(OperationResult::failed(&e)),
        },

        "update_milestones" => match decode::<MilestoneArgs>(arguments) {
            Ok(args) => to_json(
                ledger
                    .with(|s| s.update_milestones_for_course(args.course_id, args.milestones))
                    .await,
            ),
            Err(e) => to_json(OperationResult::failed(&e)),
        },

        "get_milestones" => match decode::<CourseArgs>(arguments) {
            Ok(args) => to_json(ledger.read(|s| s.get_milestones(args.course_id)).await),
            Err(e) => to_json(OperationResult::failed(&e)),
        },

        "update_course_progress" => match decode::<ProgressArgs>(arguments) {
            Ok(args) => to_json(
                ledger
                    .with(|s| {
                        s.update_course_progress(
                            caller,
                            args.course_id,
                            args.lessons_completed,
                            args.quizzes_passed,
                        )
                    })
                    .await,
            ),
            Err(e) => progress_failure(ledger, caller, &e).await,
        },

        "submit_quiz" => match decode::<QuizArgs>(arguments) {
            Ok(args) => submit_quiz(ledger, caller, args).await,
            Err(e) => progress_failure(ledger, caller, &e).await,
        },

        _ => return None,
    };

    Some(value)
}

async fn progress_failure(ledger: &SharedLedger, caller: &Identifier, err: &LedgerError) -> Value {
    let total = ledger.read(|s| s.get_points(caller)).await;
    to_json(ProgressResult::failed(err, total))
}

fn unpassed_quiz(service: &ProgressService, caller: &Identifier, course: CourseId) -> ProgressResult {
    let total = service.get_points(caller);
    if !service.is_registered(caller) {
        return ProgressResult::failed(&LedgerError::NotRegistered(caller.clone()), total);
    }
    if !service.get_progress(caller).contains_key(&course) {
        return ProgressResult::failed(&LedgerError::NotEnrolled(course), total);
    }
    ProgressResult {
        success: true,
        message: "Quiz not passed; no progress recorded.".to_string(),
        new_points: 0,
        total_points: total,
        error: None,
    }
}

async fn submit_quiz(ledger: &SharedLedger, caller: &Identifier, args: QuizArgs) -> Value {
    let outcome = match args.quiz.grade(&args.answers) {
        Ok(outcome) => outcome,
        Err(e) => return progress_failure(ledger, caller, &LedgerError::invalid(e.to_string())).await,
    };

    let course = args.course_id;
    let result = if outcome.passed() {
        ledger
            .with(|s| s.update_course_progress(caller, course, 0, outcome.quizzes_passed()))
            .await
    } else {
        // A failed quiz writes nothing, so no milestone can match again.
        ledger.read(|s| unpassed_quiz(s, caller, course)).await
    };

    let mut value = to_json(result);
    if let Some(fields) = value.as_object_mut() {
        fields.insert(
            "quiz".to_string(),
            json!({
                "correct": outcome.correct(),
                "total": outcome.total(),
                "passed": outcome.passed(),
            }),
        );
    }
    value
}
