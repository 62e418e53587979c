use super::create_app;
use crate::db;
use axum::Router;
use axum::body::{Body, to_bytes};
use homeroom_core::account::{TeacherAccount, ensure_teacher_account};
use homeroom_test_helpers::{SqliteDb, TestDb};
use http::{Method, Request, StatusCode, header};
use sea_orm::Database;
use serde_json::{Value, json};
use test_log::test;
use tower::ServiceExt;
use url::Url;

const TEACHER_EMAIL: &str = "teacher@school.edu";
const TEACHER_PASSWORD: &str = "teacher-pass";

struct TestApp {
    _db: SqliteDb,
    app: Router,
}

impl TestApp {
    async fn new() -> Self {
        let db = SqliteDb::new().unwrap();
        db::migration(&Url::parse(&db.db_uri()).unwrap()).unwrap();
        let conn = Database::connect(db.db_uri().as_ref()).await.unwrap();
        let teacher = TeacherAccount::builder()
            .email(TEACHER_EMAIL)
            .password(TEACHER_PASSWORD)
            .first_name("Ana")
            .last_name("Cruz")
            .build();
        ensure_teacher_account(&conn, &teacher).await.unwrap();
        let app = create_app(&["http://localhost:5173".to_owned()], conn).unwrap();
        Self { _db: db, app }
    }

    async fn call(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, body)
    }

    async fn signin(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .call(
                Method::POST,
                "/signin",
                None,
                Some(json!({ "email": email, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["access_token"].as_str().unwrap().to_owned()
    }

    async fn signup(&self, email: &str) -> String {
        let (status, body) = self.call(Method::POST, "/signup", None, Some(signup_form(email))).await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        assert_eq!(body["role"], "student");
        body["access_token"].as_str().unwrap().to_owned()
    }
}

fn signup_form(email: &str) -> Value {
    json!({
        "first_name": "Maria",
        "last_name": "Santos",
        "email": email,
        "password": "student-pass",
        "confirm_password": "student-pass",
        "year": "1st Year",
        "section": "A",
        "group": "1",
    })
}

fn id(value: &Value) -> String {
    value["id"].as_str().unwrap().to_owned()
}

#[test(tokio::test)]
async fn test_status_and_metrics() {
    let app = TestApp::new().await;

    let (status, body) = app.call(Method::GET, "/api/v0/status", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "database": "ok" }));

    let (status, _) = app.call(Method::GET, "/metrics", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[test(tokio::test)]
async fn test_signup_validation() {
    let app = TestApp::new().await;

    let mut form = signup_form("not-an-email");
    form["confirm_password"] = json!("something-else");
    form["section"] = json!("Z");
    let (status, body) = app.call(Method::POST, "/signup", None, Some(form)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation");
    assert!(body["data"]["email"].is_array());
    assert_eq!(body["data"]["confirm_password"], json!(["Passwords do not match."]));
    assert_eq!(
        body["data"]["section"],
        json!(["Select a valid choice. Z is not one of the available choices."])
    );

    app.signup("maria@school.edu").await;
    let (status, body) = app
        .call(Method::POST, "/signup", None, Some(signup_form("Maria@School.edu")))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["email"], json!(["An account with this email already exists."]));
}

#[test(tokio::test)]
async fn test_signin_and_logout() {
    let app = TestApp::new().await;

    let (status, body) = app
        .call(
            Method::POST,
            "/signin",
            None,
            Some(json!({ "email": TEACHER_EMAIL, "password": "wrong" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_credentials");
    assert_eq!(body["error_description"], "Invalid email or password.");

    let token = app.signin(" Teacher@School.EDU ", TEACHER_PASSWORD).await;
    let (status, body) = app.call(Method::GET, "/whoami", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], TEACHER_EMAIL);
    assert_eq!(body["role"], "teacher");
    assert!(body.get("profile").is_none());

    let (status, _) = app.call(Method::POST, "/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.call(Method::GET, "/whoami", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[test(tokio::test)]
async fn test_permissions() {
    let app = TestApp::new().await;
    let student = app.signup("maria@school.edu").await;
    let teacher = app.signin(TEACHER_EMAIL, TEACHER_PASSWORD).await;

    let (status, _) = app.call(Method::GET, "/api/v0/surveys", None, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.call(Method::GET, "/api/v0/surveys", Some(&student), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.call(Method::GET, "/api/v0/sections", Some(&student), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app
        .call(Method::GET, "/api/v0/student/assignments", Some(&teacher), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.call(Method::GET, "/api/v0/surveys", Some(&teacher), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    let (status, body) = app
        .call(Method::GET, "/api/v0/student/assignments", Some(&student), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[test(tokio::test)]
async fn test_survey_workflow() {
    let app = TestApp::new().await;
    let student = app.signup("maria@school.edu").await;
    let teacher = app.signin(TEACHER_EMAIL, TEACHER_PASSWORD).await;

    let draft = json!({
        "title": "Weekly check-in",
        "questions": [
            { "prompt": "How was your week?", "kind": "likert", "scale_min": 1, "scale_max": 5, "min_label": "Bad", "max_label": "Great" },
            { "prompt": "Favourite subject", "kind": "multiple_choice", "choices": ["Math", "Science", "Art"] },
            { "prompt": "Anything else?", "kind": "short_answer", "required": false },
        ],
    });
    let (status, survey) = app.call(Method::POST, "/api/v0/surveys", Some(&teacher), Some(draft)).await;
    assert_eq!(status, StatusCode::CREATED, "{survey}");
    assert_eq!(survey["status"], "draft");
    let survey_id = id(&survey);
    let likert = &survey["questions"][0];
    let mcq = &survey["questions"][1];
    let short_answer = &survey["questions"][2];
    assert_eq!(likert["choices"].as_array().unwrap().len(), 5);
    assert_eq!(mcq["choices"][2]["label"], "Art");

    let (status, body) = app
        .call(
            Method::PUT,
            &format!("/api/v0/surveys/{survey_id}/status"),
            Some(&teacher),
            Some(json!({ "status": "closed" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "invalid_transition");

    let (status, body) = app
        .call(
            Method::PUT,
            &format!("/api/v0/surveys/{survey_id}/status"),
            Some(&teacher),
            Some(json!({ "status": "published" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["status"], "published");
    assert_eq!(body["question_count"], 3);

    let (status, sections) = app.call(Method::GET, "/api/v0/sections", Some(&teacher), None).await;
    assert_eq!(status, StatusCode::OK);
    let section = sections
        .as_array()
        .unwrap()
        .iter()
        .find(|section| section["year"] == "1st Year" && section["letter"] == "A")
        .unwrap();
    assert_eq!(section["student_count"], 1);

    let (status, assignments) = app
        .call(
            Method::POST,
            &format!("/api/v0/surveys/{survey_id}/assignments"),
            Some(&teacher),
            Some(json!({ "section_ids": [section["id"]] })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{assignments}");
    assert_eq!(assignments[0]["status"], "open");

    let (status, dashboard) = app
        .call(Method::GET, "/api/v0/student/assignments", Some(&student), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dashboard.as_array().unwrap().len(), 1);
    assert_eq!(dashboard[0]["student_status"], "not_started");
    assert_eq!(dashboard[0]["accepting_responses"], true);
    let assignment_id = dashboard[0]["assignment_id"].as_str().unwrap().to_owned();

    let (status, take) = app
        .call(
            Method::GET,
            &format!("/api/v0/student/assignments/{assignment_id}"),
            Some(&student),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(take["questions"].as_array().unwrap().len(), 3);
    assert_eq!(take["answers"], json!([]));

    let likert_answer = json!({ "question_id": likert["id"], "type": "choice", "choice_id": likert["choices"][3]["id"] });
    let (status, saved) = app
        .call(
            Method::PUT,
            &format!("/api/v0/student/assignments/{assignment_id}/draft"),
            Some(&student),
            Some(json!({ "answers": [likert_answer] })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{saved}");
    assert_eq!(saved["is_submitted"], false);

    let (status, body) = app
        .call(
            Method::POST,
            &format!("/api/v0/student/assignments/{assignment_id}/submit"),
            Some(&student),
            Some(json!({ "answers": [likert_answer] })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let mcq_key = format!("answers[{}]", id(mcq));
    assert_eq!(body["data"][mcq_key.as_str()], json!(["This question is required."]));

    let answers = json!({ "answers": [
        likert_answer,
        { "question_id": mcq["id"], "type": "choice", "choice_id": mcq["choices"][2]["id"] },
        { "question_id": short_answer["id"], "type": "text", "text": "More art classes please" },
    ]});
    let (status, submitted) = app
        .call(
            Method::POST,
            &format!("/api/v0/student/assignments/{assignment_id}/submit"),
            Some(&student),
            Some(answers.clone()),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{submitted}");
    assert_eq!(submitted["is_submitted"], true);

    let (status, body) = app
        .call(
            Method::POST,
            &format!("/api/v0/student/assignments/{assignment_id}/submit"),
            Some(&student),
            Some(answers),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "already_submitted");

    let (status, view) = app
        .call(
            Method::GET,
            &format!("/api/v0/student/submissions/{}", id(&submitted)),
            Some(&student),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["answers"].as_array().unwrap().len(), 3);

    let (status, results) = app
        .call(
            Method::GET,
            &format!("/api/v0/surveys/{survey_id}/results"),
            Some(&teacher),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{results}");
    assert_eq!(results["students"], 1);
    assert_eq!(results["submitted"], 1);
    assert_eq!(results["response_rate"], 1.0);
    assert_eq!(results["questions"].as_array().unwrap().len(), 3);

    let (status, cloud) = app
        .call(
            Method::GET,
            &format!(
                "/api/v0/surveys/{survey_id}/questions/{}/word-cloud?max_words=2",
                id(short_answer)
            ),
            Some(&teacher),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{cloud}");
    assert_eq!(cloud["responses"], 1);
    assert_eq!(cloud["words"].as_array().unwrap().len(), 2);

    let (status, body) = app
        .call(
            Method::GET,
            &format!("/api/v0/surveys/{survey_id}/questions/{}/word-cloud", id(mcq)),
            Some(&teacher),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "not_short_answer");

    let (status, body) = app
        .call(
            Method::DELETE,
            &format!("/api/v0/surveys/{survey_id}/assignments/{assignment_id}"),
            Some(&teacher),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "assignment_in_use");

    let (status, body) = app
        .call(
            Method::PATCH,
            &format!("/api/v0/surveys/{survey_id}/assignments/{assignment_id}"),
            Some(&teacher),
            Some(json!({ "status": "closed" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["status"], "closed");
    assert_eq!(body["submitted_count"], 1);

    let (status, _) = app
        .call(Method::DELETE, &format!("/api/v0/surveys/{survey_id}"), Some(&teacher), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = app
        .call(Method::GET, &format!("/api/v0/surveys/{survey_id}"), Some(&teacher), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[test(tokio::test)]
async fn test_draft_survey_validation() {
    let app = TestApp::new().await;
    let teacher = app.signin(TEACHER_EMAIL, TEACHER_PASSWORD).await;

    let draft = json!({
        "title": " ",
        "questions": [{ "prompt": "Pick one", "kind": "multiple_choice", "choices": ["Only"] }],
    });
    let (status, body) = app.call(Method::POST, "/api/v0/surveys", Some(&teacher), Some(draft)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["title"], json!(["Title is required."]));
    assert_eq!(body["data"]["questions[0].choices"], json!(["Add at least two choices."]));

    let (status, survey) = app
        .call(
            Method::POST,
            "/api/v0/surveys",
            Some(&teacher),
            Some(json!({ "title": "Empty for now" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = app
        .call(
            Method::PUT,
            &format!("/api/v0/surveys/{}/status", id(&survey)),
            Some(&teacher),
            Some(json!({ "status": "published" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "no_questions");
}
