#![allow(dead_code)] // Each test binary uses a different subset.

use std::sync::{Arc, Mutex};

use axum::Json;
use axum::Router;
use axum::extract::{Multipart, State};
use axum::http::header::COOKIE;
use axum::http::{HeaderMap, StatusCode};
use serde_json::{Value, json};

type Reply = dyn Fn(&Value) -> Value + Send + Sync;

/// Serve `app` on an ephemeral port from a background runtime and return its base URL.
pub fn serve(app: Router) -> String {
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });
    format!("http://{}", rx.recv().unwrap())
}

#[derive(Debug, Clone)]
pub struct RecordedField {
    pub name: String,
    pub file_name: Option<String>,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct RecordedRequest {
    pub cookie: Option<String>,
    pub fields: Vec<RecordedField>,
    pub body: Option<Value>,
}

impl RecordedRequest {
    pub fn json_field(&self, name: &str) -> Value {
        let field = self
            .fields
            .iter()
            .find(|f| f.name == name)
            .unwrap_or_else(|| panic!("no field {name}"));
        serde_json::from_slice(&field.data).unwrap()
    }
}

/// Records GraphQL requests and answers them with a canned reply.
#[derive(Clone)]
pub struct Recorder {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    reply: Arc<Reply>,
    status: StatusCode,
}

impl Recorder {
    pub fn replying(reply: impl Fn(&Value) -> Value + Send + Sync + 'static) -> Self {
        Self::replying_with_status(StatusCode::OK, reply)
    }

    pub fn replying_with_status(
        status: StatusCode,
        reply: impl Fn(&Value) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            reply: Arc::new(reply),
            status,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn single_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }

    fn answer(&self, request: RecordedRequest, operations: &Value) -> (StatusCode, Json<Value>) {
        let reply = (self.reply)(operations);
        self.requests.lock().unwrap().push(request);
        (self.status, Json(reply))
    }
}

fn cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Handler for multipart GraphQL requests.
pub async fn record_multipart(
    State(recorder): State<Recorder>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> (StatusCode, Json<Value>) {
    let mut fields = Vec::new();
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                let name = field.name().unwrap_or_default().to_string();
                let file_name = field.file_name().map(str::to_string);
                match field.bytes().await {
                    Ok(data) => fields.push(RecordedField {
                        name,
                        file_name,
                        data: data.to_vec(),
                    }),
                    Err(_) => return (StatusCode::BAD_REQUEST, Json(json!({}))),
                }
            }
            Ok(None) => break,
            Err(_) => return (StatusCode::BAD_REQUEST, Json(json!({}))),
        }
    }

    let request = RecordedRequest {
        cookie: cookie(&headers),
        fields,
        body: None,
    };
    let operations = request.json_field("operations");
    recorder.answer(request, &operations)
}

/// Handler for plain JSON GraphQL requests.
pub async fn record_json(
    State(recorder): State<Recorder>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let request = RecordedRequest {
        cookie: cookie(&headers),
        fields: Vec::new(),
        body: Some(body.clone()),
    };
    recorder.answer(request, &body)
}
