//! Fake PHP attendance backend
//!
//! Serves `students.php?action=validate` and `attendance.php?action=add` on
//! a random local port, answering the way the real scripts do. Recorded
//! submissions can be inspected after the request.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::{Value, json};
use tiny_http::{Header, Method, Request, Response, Server};

/// A running fake backend
pub struct FakeBackend {
    base_url: String,
    submissions: Arc<Mutex<Vec<Value>>>,
}

impl FakeBackend {
    /// Start serving the given `(id, name, [(course_id, course_name)])` students
    pub fn start(students: Vec<(&str, &str, Vec<(&str, &str)>)>) -> Self {
        let roster: HashMap<String, Value> = students
            .into_iter()
            .map(|(id, name, courses)| {
                let courses: Vec<Value> = courses
                    .iter()
                    .map(|(cid, cname)| json!({"course_id": cid, "course_name": cname}))
                    .collect();
                // PHP hands numeric IDs back as numbers
                let student_id = id.parse::<i64>().map_or_else(|_| json!(id), |n| json!(n));
                (
                    id.to_string(),
                    json!({"student_id": student_id, "student_name": name, "courses": courses}),
                )
            })
            .collect();

        let server = Server::http("127.0.0.1:0").expect("failed to bind fake backend");
        let addr = server.server_addr().to_ip().expect("fake backend has no IP address");
        let submissions = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&submissions);
        std::thread::spawn(move || {
            for mut request in server.incoming_requests() {
                let reply = handle(&mut request, &roster, &recorded);
                let response = Response::from_data(reply.to_string().into_bytes()).with_header(
                    Header::from_bytes("Content-Type", "application/json").unwrap(),
                );
                let _ = request.respond(response);
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            submissions,
        }
    }

    /// Base URL to put in `[backend] base_url`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Bodies received by `attendance.php?action=add`
    pub fn submissions(&self) -> Vec<Value> {
        self.submissions.lock().unwrap().clone()
    }
}

fn handle(
    request: &mut Request,
    roster: &HashMap<String, Value>,
    submissions: &Mutex<Vec<Value>>,
) -> Value {
    let method = request.method().clone();
    let url = request.url().to_string();
    let (path, query) = url.split_once('?').unwrap_or((url.as_str(), ""));
    let params: HashMap<&str, &str> = query.split('&').filter_map(|p| p.split_once('=')).collect();

    match (&method, path, params.get("action").copied()) {
        (&Method::Get, "/students.php", Some("validate")) => {
            match params.get("student_id").and_then(|id| roster.get(*id)) {
                Some(student) => json!({"status": "success", "student": student}),
                None => json!({"status": "error", "message": "Student not found"}),
            }
        },
        (&Method::Post, "/attendance.php", Some("add")) => {
            let mut body = String::new();
            let _ = request.as_reader().read_to_string(&mut body);
            match serde_json::from_str::<Value>(&body) {
                Ok(submission) => {
                    submissions.lock().unwrap().push(submission);
                    json!({"status": "success", "message": "Attendance submitted successfully"})
                },
                Err(_) => json!({"status": "error", "message": "Invalid request body"}),
            }
        },
        _ => json!({"status": "error", "message": "Invalid action"}),
    }
}
