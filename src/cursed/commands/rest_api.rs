use crate::commands::{CmdMessage, CmdResult, DemoContext};
use crate::error::Result;
use serde::Serialize;
use serde_json::{json, Map, Value};

/// What the single endpoint sends back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: json!({ "error": message }),
        }
    }
}

/// Every CRUD operation squeezed through one `POST /api` endpoint. The
/// operation lives in the body's `action` field and every success answers
/// with the entire item map.
#[derive(Debug, Default)]
pub struct ItemsApi {
    items: Map<String, Value>,
}

impl ItemsApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &Map<String, Value> {
        &self.items
    }

    pub fn handle(&mut self, body: &str) -> ApiResponse {
        let request = match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(map)) if !map.is_empty() => map,
            _ => return ApiResponse::error(400, "invalid json"),
        };
        tracing::debug!(action = ?request.get("action"), "single endpoint hit");

        match request.get("action").and_then(Value::as_str) {
            Some("create") => self.create(&request),
            Some("update") => self.update(&request),
            Some("delete") => self.delete(&request),
            Some("list") => ApiResponse::ok(json!({ "items": self.items })),
            _ => ApiResponse::error(400, "unknown action"),
        }
    }

    fn create(&mut self, request: &Map<String, Value>) -> ApiResponse {
        let name = request.get("name").filter(|v| truthy(v));
        let (Some(id), Some(name)) = (item_id(request).filter(|id| !id.is_empty()), name) else {
            return ApiResponse::error(400, "id and name required");
        };
        // overwrites silently, there is no conflict check
        self.items.insert(id, name.clone());
        ApiResponse::ok(json!({ "message": "created", "items": self.items }))
    }

    fn update(&mut self, request: &Map<String, Value>) -> ApiResponse {
        let Some(id) = item_id(request).filter(|id| self.items.contains_key(id)) else {
            return ApiResponse::error(404, "item not found");
        };
        let name = request.get("name").cloned().unwrap_or(Value::Null);
        self.items.insert(id, name);
        ApiResponse::ok(json!({ "message": "updated", "items": self.items }))
    }

    fn delete(&mut self, request: &Map<String, Value>) -> ApiResponse {
        let removed = item_id(request).and_then(|id| self.items.remove(&id));
        if removed.is_none() {
            return ApiResponse::error(404, "item not found");
        }
        ApiResponse::ok(json!({ "message": "deleted", "items": self.items }))
    }
}

/// Strings are used as is, numbers by their text. Zero counts as missing.
fn item_id(request: &Map<String, Value>) -> Option<String> {
    match request.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// The route and method an action would have had in a resource-oriented API.
pub fn conventional_route(action: &str) -> Option<&'static str> {
    match action {
        "create" => Some("POST /api/items -> 201 Created"),
        "read" => Some("GET /api/items/{id}"),
        "update" => Some("PUT /api/items/{id}"),
        "delete" => Some("DELETE /api/items/{id} -> 204 No Content"),
        "list" => Some("GET /api/items"),
        _ => None,
    }
}

const SCRIPT: [&str; 8] = [
    r#"{"action":"create","id":"1","name":"item1"}"#,
    r#"{"action":"create","id":"2","name":"item2"}"#,
    r#"{"action":"list"}"#,
    r#"{"action":"update","id":"1","name":"updated"}"#,
    r#"{"action":"update","id":"99","name":"ghost"}"#,
    r#"{"action":"delete","id":"2"}"#,
    r#"{"action":"explode"}"#,
    r#"{not json"#,
];

/// Feeds `bodies` to a fresh router, one request each.
pub fn replay<B: AsRef<str>>(bodies: &[B]) -> CmdResult {
    let mut result = CmdResult::default();
    let mut api = ItemsApi::new();

    for body in bodies {
        let body = body.as_ref();
        let response = api.handle(body);
        result.line(format!("POST /api {}", body));
        result.line(format!("  -> {} {}", response.status, response.body));

        let action = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v.get("action").and_then(Value::as_str).map(str::to_string));
        if let Some(route) = action.as_deref().and_then(conventional_route) {
            result.line(format!("     should have been: {}", route));
        }
    }
    result
}

pub fn run(_ctx: &DemoContext) -> Result<CmdResult> {
    let mut result = replay(&SCRIPT);

    result.add_message(CmdMessage::warning(
        "Every response returns the whole database, and reads are POSTs nothing can cache.",
    ));
    result.add_message(CmdMessage::info(
        "Put the resource in the URL and the operation in the HTTP method.",
    ));
    Ok(result)
}
