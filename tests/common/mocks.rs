use async_trait::async_trait;
use query_form::{
    Error, Result,
    api::{QueryClient, QueryRequest, QueryResponse},
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

/// Mock query client that records requests and replays canned answers
#[derive(Debug)]
pub struct MockQueryClient {
    pub answers: Arc<Mutex<Vec<String>>>,
    pub requests: Arc<Mutex<Vec<QueryRequest>>>,
    pub error: Option<String>,
}

impl MockQueryClient {
    pub fn new() -> Self {
        Self {
            answers: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            error: None,
        }
    }

    pub fn with_answers(self, answers: Vec<&str>) -> Self {
        *self.answers.lock().unwrap() = answers.into_iter().map(String::from).collect();
        self
    }

    pub fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn get_requests(&self) -> Vec<QueryRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryClient for MockQueryClient {
    async fn ask(&self, request: QueryRequest) -> Result<QueryResponse> {
        self.requests.lock().unwrap().push(request);

        if let Some(ref error) = self.error {
            return Err(Error::request(error.clone()));
        }

        let mut answers = self.answers.lock().unwrap();
        if answers.is_empty() {
            return Err(Error::request("No more mock answers available"));
        }

        Ok(QueryResponse {
            answer: json!(answers.remove(0)),
        })
    }
}

impl Default for MockQueryClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Query client whose answers are held back until the test releases them,
/// keyed by question.
#[derive(Default)]
pub struct GatedQueryClient {
    gates: Mutex<HashMap<String, oneshot::Receiver<Option<String>>>>,
}

impl GatedQueryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a question and returns the sender that settles it.
    /// Sending `None` fails the request.
    pub fn gate(&self, question: &str) -> oneshot::Sender<Option<String>> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(question.to_string(), rx);
        tx
    }
}

#[async_trait]
impl QueryClient for GatedQueryClient {
    async fn ask(&self, request: QueryRequest) -> Result<QueryResponse> {
        let gate = self.gates.lock().unwrap().remove(&request.question);
        let Some(gate) = gate else {
            return Err(Error::request(format!("No gate for '{}'", request.question)));
        };

        match gate.await {
            Ok(Some(answer)) => Ok(QueryResponse {
                answer: json!(answer),
            }),
            Ok(None) => Err(Error::request("gate failed the request")),
            Err(_) => Err(Error::request("gate dropped")),
        }
    }
}
