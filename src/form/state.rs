use super::fsm::{FormEvent, FormState, FormStateMachine};
use crate::{
    Error, Result,
    api::{QueryClient, QueryRequest},
    session::SessionId,
};
use std::{
    future::{Future, IntoFuture},
    pin::Pin,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};
use tracing::{debug, error};

/// What the answer area shows after any failed request.
pub const ERROR_MESSAGE: &str = "Error fetching response";

/// Point-in-time copy of the form's state cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    pub input: String,
    pub answer: String,
    pub loading: bool,
}

#[derive(Debug, Default)]
struct FormCells {
    input: String,
    answer: String,
    fsm: FormStateMachine,
}

/// Input field plus submit button bound to a query backend.
///
/// Clones share the same state cells.
#[derive(Clone)]
pub struct QueryForm {
    client: Arc<dyn QueryClient>,
    session_id: SessionId,
    cells: Arc<Mutex<FormCells>>,
}

impl QueryForm {
    pub fn new(client: Arc<dyn QueryClient>, session_id: SessionId) -> Self {
        Self {
            client,
            session_id,
            cells: Arc::new(Mutex::new(FormCells::default())),
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn on_input_change(&self, new_text: impl Into<String>) {
        self.cells().input = new_text.into();
    }

    pub fn input(&self) -> String {
        self.cells().input.clone()
    }

    pub fn answer(&self) -> String {
        self.cells().answer.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.cells().fsm.is_loading()
    }

    pub fn state(&self) -> FormState {
        self.cells().fsm.current_state()
    }

    pub fn snapshot(&self) -> FormSnapshot {
        let cells = self.cells();
        FormSnapshot {
            input: cells.input.clone(),
            answer: cells.answer.clone(),
            loading: cells.fsm.is_loading(),
        }
    }

    /// Starts a submission: captures the current input, raises the loading
    /// flag and hands back the request still to be sent.
    ///
    /// Nothing is sent for an empty input. Earlier submissions are left
    /// running. Dropping the returned submission, or cancelling it while its
    /// request is out, settles it without touching the answer.
    pub fn begin_submit(&self) -> Result<PendingSubmit> {
        let mut cells = self.cells();
        if cells.input.is_empty() {
            return Err(Error::EmptyInput);
        }

        let request = QueryRequest::new(self.session_id.clone(), cells.input.clone());
        cells.fsm.transition(FormEvent::Submit);
        debug!("Submitting question for session {}", self.session_id);

        Ok(PendingSubmit {
            client: Arc::clone(&self.client),
            guard: SettleGuard {
                cells: Arc::clone(&self.cells),
                settled: false,
            },
            request,
        })
    }

    /// Submits the current input and waits for the answer to be applied.
    pub async fn on_submit(&self) -> Result<()> {
        self.begin_submit()?.await;
        Ok(())
    }

    fn cells(&self) -> MutexGuard<'_, FormCells> {
        lock(&self.cells)
    }
}

/// A submission whose request has not been sent yet.
///
/// Awaiting it sends the request and writes the outcome into the form it
/// came from. The output is the text this submission wrote.
pub struct PendingSubmit {
    client: Arc<dyn QueryClient>,
    guard: SettleGuard,
    request: QueryRequest,
}

impl PendingSubmit {
    pub fn request(&self) -> &QueryRequest {
        &self.request
    }

    async fn settle(self) -> String {
        let PendingSubmit {
            client,
            guard,
            request,
        } = self;

        let answer = match client.ask(request).await {
            Ok(response) => response.answer_text(),
            Err(e) => {
                error!("Error: {}", e);
                ERROR_MESSAGE.to_string()
            }
        };

        guard.settle(Some(answer.clone()));
        answer
    }
}

/// Lowers the loading flag exactly once per submission, even when the
/// submission never completes.
struct SettleGuard {
    cells: Arc<Mutex<FormCells>>,
    settled: bool,
}

impl SettleGuard {
    fn settle(mut self, answer: Option<String>) {
        self.apply(answer);
    }

    fn apply(&mut self, answer: Option<String>) {
        if self.settled {
            return;
        }
        self.settled = true;

        let mut cells = lock(&self.cells);
        if let Some(answer) = answer {
            cells.answer = answer;
        }
        cells.fsm.transition(FormEvent::Settled);
    }
}

impl Drop for SettleGuard {
    fn drop(&mut self) {
        if !self.settled {
            debug!("Submission abandoned before settling");
            self.apply(None);
        }
    }
}

impl IntoFuture for PendingSubmit {
    type Output = String;
    type IntoFuture = Pin<Box<dyn Future<Output = String> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.settle())
    }
}

fn lock(cells: &Mutex<FormCells>) -> MutexGuard<'_, FormCells> {
    // Cells hold plain strings; a panic elsewhere cannot leave them torn.
    cells.lock().unwrap_or_else(PoisonError::into_inner)
}
