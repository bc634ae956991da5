// src/learning/server.rs — Async message passing for the learning engine
//
// The SQLite connection is single-threaded, so the engine lives on one task
// and everything else talks to it through a channel. Commands run to
// completion in arrival order, which also serializes feedback folds against
// the same pattern rows.

use tokio::sync::{mpsc, oneshot};

use crate::infra::errors::LessonsmithError;
use crate::learning::engine::{AnalysisReport, LearningEngine};
use crate::learning::feedback::{FeedbackInput, FeedbackOutcome};
use crate::learning::ranker::Suggestion;
use crate::storage::store::{LessonRow, PatternRow};

#[derive(Debug)]
pub enum EngineCommand {
    CreateLesson {
        title: String,
        content: String,
        resp: oneshot::Sender<Result<String, LessonsmithError>>,
    },
    GetLesson {
        id: String,
        resp: oneshot::Sender<Result<Option<LessonRow>, LessonsmithError>>,
    },
    UpdateLesson {
        id: String,
        content: String,
        resp: oneshot::Sender<Result<(), LessonsmithError>>,
    },
    AnalyzeLesson {
        id: String,
        resp: oneshot::Sender<Result<AnalysisReport, LessonsmithError>>,
    },
    SubmitFeedback {
        lesson_id: String,
        input: FeedbackInput,
        resp: oneshot::Sender<Result<FeedbackOutcome, LessonsmithError>>,
    },
    Suggest {
        content: String,
        resp: oneshot::Sender<Result<Vec<Suggestion>, LessonsmithError>>,
    },
    ListPatterns {
        resp: oneshot::Sender<Result<Vec<PatternRow>, LessonsmithError>>,
    },
}

/// A cloneable handle to the engine task.
#[derive(Clone)]
pub struct EngineHandle {
    tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(tx: mpsc::Sender<EngineCommand>) -> Self {
        Self { tx }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<T, LessonsmithError>>) -> EngineCommand,
    ) -> Result<T, LessonsmithError> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx
            .send(build(resp_tx))
            .await
            .map_err(|_| LessonsmithError::EngineUnavailable)?;
        resp_rx
            .await
            .map_err(|_| LessonsmithError::EngineUnavailable)?
    }

    pub async fn create_lesson(
        &self,
        title: String,
        content: String,
    ) -> Result<String, LessonsmithError> {
        self.request(|resp| EngineCommand::CreateLesson {
            title,
            content,
            resp,
        })
        .await
    }

    pub async fn get_lesson(&self, id: String) -> Result<Option<LessonRow>, LessonsmithError> {
        self.request(|resp| EngineCommand::GetLesson { id, resp }).await
    }

    pub async fn update_lesson(
        &self,
        id: String,
        content: String,
    ) -> Result<(), LessonsmithError> {
        self.request(|resp| EngineCommand::UpdateLesson { id, content, resp })
            .await
    }

    pub async fn analyze_lesson(&self, id: String) -> Result<AnalysisReport, LessonsmithError> {
        self.request(|resp| EngineCommand::AnalyzeLesson { id, resp })
            .await
    }

    pub async fn submit_feedback(
        &self,
        lesson_id: String,
        input: FeedbackInput,
    ) -> Result<FeedbackOutcome, LessonsmithError> {
        self.request(|resp| EngineCommand::SubmitFeedback {
            lesson_id,
            input,
            resp,
        })
        .await
    }

    pub async fn suggest(&self, content: String) -> Result<Vec<Suggestion>, LessonsmithError> {
        self.request(|resp| EngineCommand::Suggest { content, resp })
            .await
    }

    pub async fn list_patterns(&self) -> Result<Vec<PatternRow>, LessonsmithError> {
        self.request(|resp| EngineCommand::ListPatterns { resp }).await
    }
}

/// Spawn the engine task and return a handle to it.
pub fn spawn_engine_server(engine: LearningEngine) -> (EngineHandle, tokio::task::JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(100);
    let handle = EngineHandle::new(tx);
    let join_handle = tokio::spawn(run_engine_server(engine, rx));
    (handle, join_handle)
}

/// The background task that owns the engine (and with it, the store).
pub async fn run_engine_server(engine: LearningEngine, mut rx: mpsc::Receiver<EngineCommand>) {
    while let Some(cmd) = rx.recv().await {
        match cmd {
            EngineCommand::CreateLesson {
                title,
                content,
                resp,
            } => {
                let _ = resp.send(engine.create_lesson(&title, &content));
            }
            EngineCommand::GetLesson { id, resp } => {
                let _ = resp.send(engine.get_lesson(&id));
            }
            EngineCommand::UpdateLesson { id, content, resp } => {
                let _ = resp.send(engine.update_lesson(&id, &content));
            }
            EngineCommand::AnalyzeLesson { id, resp } => {
                let _ = resp.send(engine.analyze_lesson(&id));
            }
            EngineCommand::SubmitFeedback {
                lesson_id,
                input,
                resp,
            } => {
                let _ = resp.send(engine.submit_feedback(&lesson_id, input));
            }
            EngineCommand::Suggest { content, resp } => {
                let _ = resp.send(engine.suggest(&content));
            }
            EngineCommand::ListPatterns { resp } => {
                let _ = resp.send(engine.list_patterns());
            }
        }
    }
}
