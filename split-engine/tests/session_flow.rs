use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::{Receipt, ReceiptImage, ReceiptItem, ReceiptRecognizer, RecognitionError};
use split_engine::{Config, SessionPhase, SplitSession, clamp_tip_percentage};
use std::sync::Mutex;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

/// Recognizer returning canned results in order
struct ScriptedRecognizer {
    results: Mutex<Vec<Result<Receipt, RecognitionError>>>,
    seen: Mutex<Vec<String>>,
}

impl ScriptedRecognizer {
    fn new(mut results: Vec<Result<Receipt, RecognitionError>>) -> Self {
        results.reverse();
        Self {
            results: Mutex::new(results),
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ReceiptRecognizer for ScriptedRecognizer {
    async fn recognize(&self, image: ReceiptImage) -> Result<Receipt, RecognitionError> {
        self.seen.lock().unwrap().push(image.file_name);
        self.results
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(RecognitionError::new("no more results")))
    }
}

fn lunch_receipt() -> Receipt {
    Receipt {
        id: "lunch".to_string(),
        raw_text: "PREMIUM LAGER 10 6.90 69.00".to_string(),
        items: vec![
            ReceiptItem::new("lager", "Premium Lager", 10, dec("6.90"), dec("69.00")),
            ReceiptItem::new("steak", "Picanha", 1, dec("89.90"), dec("89.90")),
        ],
        subtotal: dec("158.90"),
        total: dec("174.79"),
        confidence_score: 0.95,
        establishment_name: Some("Churrascaria".to_string()),
        date: Some("2025-03-12".to_string()),
    }
}

fn image() -> ReceiptImage {
    ReceiptImage::jpeg("receipt.jpg", vec![0xFF, 0xD8, 0xFF])
}

#[tokio::test]
async fn test_capture_split_and_share() {
    let recognizer = ScriptedRecognizer::new(vec![Ok(lunch_receipt())]);
    let mut session = SplitSession::new(&Config::default());
    let mut rx = session.subscribe();

    session.process_image(&recognizer, image()).await;
    assert_eq!(session.phase(), SessionPhase::Success);
    assert_eq!(*recognizer.seen.lock().unwrap(), vec!["receipt.jpg".to_string()]);

    // Shared beers: three of ten are mine
    session.update_item_quantity("lager", 3);
    session.toggle_item_selection("steak");
    session.update_tip_percentage(clamp_tip_percentage(dec("10")));

    let split = session.state().bill_split.clone().unwrap();
    assert_eq!(split.items_subtotal, dec("110.60"));
    assert_eq!(split.tip_amount, dec("11.06"));
    assert_eq!(split.total, dec("121.66"));

    let text = session.share_text().unwrap();
    assert!(text.contains("Churrascaria"));
    assert!(text.contains("- Premium Lager (3x) - 20.70"));
    assert!(text.ends_with("TOTAL: 121.66"));

    let phases: Vec<SessionPhase> = std::iter::from_fn(|| rx.try_recv().ok())
        .map(|s| s.phase)
        .collect();
    assert_eq!(
        phases,
        vec![
            SessionPhase::Loading,
            SessionPhase::Success,
            SessionPhase::Success,
            SessionPhase::Success,
            SessionPhase::Success,
        ]
    );
}

#[tokio::test]
async fn test_failure_then_retry() {
    let recognizer = ScriptedRecognizer::new(vec![
        Err(RecognitionError::new("Connection failed: connection refused")),
        Ok(lunch_receipt()),
    ]);
    let mut session = SplitSession::new(&Config::default().with_default_tip(dec("0")));

    session.process_image(&recognizer, image()).await;
    assert_eq!(session.phase(), SessionPhase::Error);
    assert_eq!(
        session.state().error_message.as_deref(),
        Some("Connection failed: connection refused")
    );

    // No automatic retry: the user goes back to capture
    session.select_all();
    assert_eq!(session.phase(), SessionPhase::Error);
    session.reset();
    assert_eq!(session.phase(), SessionPhase::Idle);

    session.process_image(&recognizer, image()).await;
    session.select_all();
    let split = session.state().bill_split.clone().unwrap();
    assert_eq!(split.tip_percentage, Decimal::ZERO);
    assert_eq!(split.total, dec("158.90"));
}

#[tokio::test]
async fn test_new_receipt_clears_previous_selection() {
    let recognizer = ScriptedRecognizer::new(vec![Ok(lunch_receipt()), Ok(lunch_receipt())]);
    let mut session = SplitSession::default();

    session.process_image(&recognizer, image()).await;
    session.select_all();
    session.update_tip_percentage(dec("15"));

    session.process_image(&recognizer, image()).await;
    let state = session.state();
    assert!(state.bill_split.as_ref().unwrap().is_empty());
    assert_eq!(state.tip_percentage, dec("15"));
}
