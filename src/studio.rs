//! Application shell: wires input validation, generation, history and
//! forwarding around one current result.

use chrono::Utc;
use thiserror::Error;
use tracing::info;

use crate::forwarder::{ForwardError, SheetForwarder};
use crate::generator::{GenerationError, PostGenerator};
use crate::history::HistoryStore;
use crate::models::{GenerationRequest, HistoryRecord, ImageAttachment};

#[derive(Debug, Error)]
pub enum StudioError {
    /// Empty request: neither text nor images were provided
    #[error("Пожалуйста, введите текст рецепта или загрузите изображение.")]
    EmptyRequest,

    #[error("there is no generated post to forward")]
    NothingToForward,

    #[error("this post has already been forwarded to the sheet")]
    AlreadyForwarded,

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Forward(#[from] ForwardError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GenerationState {
    Idle,
    Generating,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ForwardState {
    NotForwarded,
    Forwarding,
    Forwarded,
    ForwardFailed,
}

/// One logical generation session. Methods take `&mut self`, so a second
/// submission cannot start while one is in flight.
pub struct Studio {
    generator: PostGenerator,
    history: HistoryStore,
    forwarder: SheetForwarder,
    current: Option<HistoryRecord>,
    last_error: Option<String>,
    last_id: i64,
    generation_state: GenerationState,
    forward_state: ForwardState,
}

impl Studio {
    pub fn new(generator: PostGenerator, history: HistoryStore, forwarder: SheetForwarder) -> Self {
        Self {
            generator,
            history,
            forwarder,
            current: None,
            last_error: None,
            last_id: 0,
            generation_state: GenerationState::Idle,
            forward_state: ForwardState::NotForwarded,
        }
    }

    /// Run one generation: validate, call the model, record the result.
    ///
    /// Entering a generation clears the previous error and result. An empty
    /// request is rejected before any network call. A successful result is
    /// prepended to the history and becomes the current record.
    pub async fn generate(
        &mut self,
        free_text: String,
        attachments: Vec<ImageAttachment>,
    ) -> Result<&HistoryRecord, StudioError> {
        self.generation_state = GenerationState::Generating;
        self.last_error = None;
        self.current = None;
        self.forward_state = ForwardState::NotForwarded;

        let request = GenerationRequest {
            free_text,
            attachments,
        };

        if request.is_empty() {
            return Err(self.fail(StudioError::EmptyRequest));
        }

        match self
            .generator
            .generate(&request.free_text, &request.attachments)
            .await
        {
            Ok(result) => {
                let now = Utc::now();
                let record = HistoryRecord {
                    id: self.next_id(now.timestamp_millis()),
                    created_at: now,
                    request,
                    result,
                };

                self.history.append(record.clone()).await;
                self.generation_state = GenerationState::Succeeded;
                info!(id = record.id, "post generated");
                Ok(&*self.current.insert(record))
            }
            Err(error) => Err(self.fail(error.into())),
        }
    }

    /// Forward the current result to the sheet. Blocked once a forward has
    /// succeeded; a failed forward may be retried.
    pub async fn forward(&mut self) -> Result<(), StudioError> {
        if self.forward_state == ForwardState::Forwarded {
            return Err(StudioError::AlreadyForwarded);
        }

        let Some(record) = self.current.as_ref() else {
            return Err(StudioError::NothingToForward);
        };

        self.forward_state = ForwardState::Forwarding;
        match self.forwarder.send(&record.result).await {
            Ok(()) => {
                self.forward_state = ForwardState::Forwarded;
                Ok(())
            }
            Err(error) => {
                self.forward_state = ForwardState::ForwardFailed;
                Err(error.into())
            }
        }
    }

    /// Replay a past generation: the stored request and result become
    /// current, without re-invoking the generator
    pub async fn load_record(&mut self, id: i64) -> Option<&HistoryRecord> {
        let record = self
            .history
            .load()
            .await
            .into_iter()
            .find(|record| record.id == id)?;

        self.last_error = None;
        self.generation_state = GenerationState::Succeeded;
        self.forward_state = ForwardState::NotForwarded;
        Some(&*self.current.insert(record))
    }

    pub async fn list_history(&self) -> Vec<HistoryRecord> {
        self.history.load().await
    }

    pub async fn clear_history(&self) {
        self.history.clear().await;
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Record ids are creation millis, bumped when two generations land in
    /// the same millisecond so ids stay unique and increasing
    fn next_id(&mut self, candidate: i64) -> i64 {
        let id = candidate.max(self.last_id + 1);
        self.last_id = id;
        id
    }

    fn fail(&mut self, error: StudioError) -> StudioError {
        self.generation_state = GenerationState::Failed;
        self.last_error = Some(error.to_string());
        error
    }
}
