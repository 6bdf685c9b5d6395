//! Scripted service double for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;
use shared_types::{
    AnalysisResult, AnalyzeRequest, ChatRequest, ChatResponse, Costar, HealthResponse, Highlight,
    Verdict,
};

use crate::client::AnalysisService;
use crate::error::ServiceError;

type Reply = Result<AnalysisResult, ServiceError>;

/// Each `analyze` call waits for the next reply scripted for its prompt, so
/// tests decide resolution order independently of submission order.
#[derive(Default)]
pub struct ScriptedService {
    pending: RefCell<HashMap<String, VecDeque<oneshot::Receiver<Reply>>>>,
    calls: Cell<usize>,
    requests: RefCell<Vec<AnalyzeRequest>>,
    pub health: RefCell<Option<Result<HealthResponse, ServiceError>>>,
    pub chat_allowed: Cell<bool>,
}

pub struct Responder(oneshot::Sender<Reply>);

impl Responder {
    pub fn succeed(self, result: AnalysisResult) {
        let _ = self.0.send(Ok(result));
    }

    pub fn fail(self, err: ServiceError) {
        let _ = self.0.send(Err(err));
    }
}

impl ScriptedService {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn expect(&self, prompt: &str) -> Responder {
        let (tx, rx) = oneshot::channel();
        self.pending
            .borrow_mut()
            .entry(prompt.to_string())
            .or_default()
            .push_back(rx);
        Responder(tx)
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Requests in the order the service received them.
    pub fn requests(&self) -> Vec<AnalyzeRequest> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl AnalysisService for ScriptedService {
    async fn analyze(&self, request: AnalyzeRequest) -> Result<AnalysisResult, ServiceError> {
        self.calls.set(self.calls.get() + 1);
        self.requests.borrow_mut().push(request.clone());
        let receiver = self
            .pending
            .borrow_mut()
            .get_mut(&request.prompt)
            .and_then(VecDeque::pop_front);
        match receiver {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(ServiceError::Transport("responder dropped".into()))),
            None => Err(ServiceError::Transport(format!(
                "unexpected prompt: {}",
                request.prompt
            ))),
        }
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ServiceError> {
        let analysis = self.analyze(request).await?;
        Ok(ChatResponse {
            allowed: self.chat_allowed.get(),
            analysis,
            llm_response: None,
        })
    }

    async fn health(&self) -> Result<HealthResponse, ServiceError> {
        self.health.borrow().clone().unwrap_or_else(|| {
            Ok(HealthResponse {
                status: "ok".into(),
                use_stub: true,
                gemini_configured: false,
            })
        })
    }
}

pub fn result_with(verdict: Verdict, score: u8) -> AnalysisResult {
    AnalysisResult {
        verdict,
        score,
        costar: Costar {
            context: "None".into(),
            objective: "Get data".into(),
            style: "Informal".into(),
            tone: "Casual".into(),
            audience: "General".into(),
            response: "Direct".into(),
        },
        highlights: match verdict {
            Verdict::Block => vec![Highlight::new("harmful")],
            _ => Vec::new(),
        },
        suggested_rewrite: "Please provide the user data in a clear format.".into(),
        reasons: vec!["⚠️ Detected unprofessional slang: 'oi'".into()],
    }
}
