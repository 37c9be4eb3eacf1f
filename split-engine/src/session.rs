//! SplitSession - presentation-facing state machine
//!
//! Wraps [`SplitEngine`] with the recognition phase and publishes a single
//! immutable [`SessionState`] after every transition.
//!
//! ```text
//!            begin_recognition          deliver(Ok)
//!   Idle ─────────────────────▶ Loading ───────────▶ Success ◀─┐
//!    ▲                             │                   │  mutations
//!    │          reset              │ deliver(Err)      └────────┘
//!    └──────────────────────── Error ◀┘
//! ```
//!
//! Deliveries are applied in arrival order: if two recognitions are in
//! flight, the last one delivered wins.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{BillSplit, Receipt, ReceiptImage, ReceiptRecognizer, RecognitionError};
use tokio::sync::broadcast;

use crate::config::Config;
use crate::engine::{SplitEngine, SplitSnapshot};

/// State broadcast channel capacity
const STATE_CHANNEL_CAPACITY: usize = 64;

/// Where the user is in the capture → split flow
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Everything the presentation layer renders
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionState {
    pub phase: SessionPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<Receipt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_split: Option<BillSplit>,
    pub tip_percentage: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl SessionState {
    fn idle(tip_percentage: Decimal) -> Self {
        Self {
            phase: SessionPhase::Idle,
            receipt: None,
            bill_split: None,
            tip_percentage,
            error_message: None,
        }
    }

    fn loading(tip_percentage: Decimal) -> Self {
        Self {
            phase: SessionPhase::Loading,
            ..Self::idle(tip_percentage)
        }
    }

    fn success(snapshot: SplitSnapshot) -> Self {
        Self {
            phase: SessionPhase::Success,
            receipt: Some(snapshot.receipt),
            bill_split: Some(snapshot.bill_split),
            tip_percentage: snapshot.tip_percentage,
            error_message: None,
        }
    }

    fn error(message: String, tip_percentage: Decimal) -> Self {
        Self {
            phase: SessionPhase::Error,
            error_message: Some(message),
            ..Self::idle(tip_percentage)
        }
    }
}

/// Single-writer session owning the engine and the published state
pub struct SplitSession {
    engine: SplitEngine,
    state: SessionState,
    state_tx: broadcast::Sender<SessionState>,
}

impl std::fmt::Debug for SplitSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SplitSession")
            .field("engine", &self.engine)
            .field("state", &self.state)
            .field("state_tx", &"<broadcast::Sender>")
            .finish()
    }
}

impl Default for SplitSession {
    fn default() -> Self {
        Self::with_engine(SplitEngine::default())
    }
}

impl SplitSession {
    /// Create a session using the configured default tip
    pub fn new(config: &Config) -> Self {
        Self::with_engine(SplitEngine::new(config.default_tip_percentage))
    }

    /// Create a session around an existing engine
    pub fn with_engine(engine: SplitEngine) -> Self {
        let (state_tx, _) = broadcast::channel(STATE_CHANNEL_CAPACITY);
        let state = match engine.snapshot() {
            Some(snapshot) => SessionState::success(snapshot),
            None => SessionState::idle(engine.tip_percentage()),
        };
        Self {
            engine,
            state,
            state_tx,
        }
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> broadcast::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    /// Latest published state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    /// Read-only access to the engine
    pub fn engine(&self) -> &SplitEngine {
        &self.engine
    }

    // ==================== Recognition ====================

    /// An image was obtained and sent for recognition
    pub fn begin_recognition(&mut self) {
        tracing::info!("Receipt recognition started");
        self.publish(SessionState::loading(self.engine.tip_percentage()));
    }

    /// Hand a recognition result back to the session
    ///
    /// Applied regardless of the current phase: the most recent delivery
    /// always wins.
    pub fn deliver_recognition(&mut self, result: Result<Receipt, RecognitionError>) {
        if self.state.phase != SessionPhase::Loading {
            tracing::warn!(phase = ?self.state.phase, "Recognition result delivered outside Loading phase");
        }

        match result {
            Ok(receipt) => {
                tracing::info!(
                    receipt_id = %receipt.id,
                    items = receipt.items.len(),
                    confidence = receipt.confidence_score,
                    "Receipt recognized"
                );
                match self.engine.load_receipt(receipt) {
                    Some(snapshot) => self.publish(SessionState::success(snapshot)),
                    None => self.publish(SessionState::idle(self.engine.tip_percentage())),
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "Receipt recognition failed");
                self.engine.unload();
                self.publish(SessionState::error(
                    err.message().to_string(),
                    self.engine.tip_percentage(),
                ));
            }
        }
    }

    /// Recognize an image and deliver the result
    pub async fn process_image(&mut self, recognizer: &dyn ReceiptRecognizer, image: ReceiptImage) {
        self.begin_recognition();
        let result = recognizer.recognize(image).await;
        self.deliver_recognition(result);
    }

    /// Return to the capture screen, dropping the receipt but keeping the tip
    pub fn reset(&mut self) {
        self.engine.unload();
        self.publish(SessionState::idle(self.engine.tip_percentage()));
    }

    // ==================== Split mutations ====================

    pub fn toggle_item_selection(&mut self, item_id: &str) {
        self.mutate(|engine| engine.toggle_item_selection(item_id));
    }

    pub fn update_item_quantity(&mut self, item_id: &str, quantity: i32) {
        self.mutate(|engine| engine.update_item_quantity(item_id, quantity));
    }

    pub fn increment_item(&mut self, item_id: &str) {
        self.mutate(|engine| engine.increment_item(item_id));
    }

    pub fn decrement_item(&mut self, item_id: &str) {
        self.mutate(|engine| engine.decrement_item(item_id));
    }

    pub fn select_all(&mut self) {
        self.mutate(SplitEngine::select_all);
    }

    pub fn clear_selection(&mut self) {
        self.mutate(SplitEngine::clear_selection);
    }

    pub fn update_tip_percentage(&mut self, tip_percentage: Decimal) {
        self.mutate(|engine| engine.update_tip_percentage(tip_percentage));
    }

    /// Shareable summary of the current split, if a receipt is shown
    pub fn share_text(&self) -> Option<String> {
        if self.state.phase != SessionPhase::Success {
            return None;
        }
        self.engine.snapshot().map(|s| s.share_text())
    }

    /// Apply a mutation only while a receipt is on screen
    fn mutate(&mut self, op: impl FnOnce(&mut SplitEngine) -> Option<SplitSnapshot>) {
        if self.state.phase != SessionPhase::Success {
            tracing::debug!(phase = ?self.state.phase, "Mutation ignored outside Success phase");
            return;
        }
        if let Some(snapshot) = op(&mut self.engine) {
            self.publish(SessionState::success(snapshot));
        }
    }

    fn publish(&mut self, state: SessionState) {
        self.state = state.clone();
        // No receivers is fine: state() still holds the latest value
        let _ = self.state_tx.send(state);
    }
}
