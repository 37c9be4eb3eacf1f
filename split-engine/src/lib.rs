//! DivUp split engine
//!
//! # Overview
//!
//! Turns a recognized receipt into the current user's share of the bill:
//!
//! - **Engine** (`engine`): sparse per-item selection, tip, derived `BillSplit`
//! - **Session** (`session`): Idle / Loading / Success / Error phases and
//!   state broadcasting for the presentation layer
//! - **Share** (`share`): plain-text summary of the split
//! - **Tip** (`tip`): presets and boundary clamping for user input
//!
//! # Module structure
//!
//! ```text
//! split-engine/src/
//! ├── engine/        # selection mapping + derivation
//! ├── session.rs     # phase state machine, broadcast
//! ├── share.rs       # summary text
//! ├── tip.rs         # tip presets / clamp
//! ├── config.rs      # environment configuration
//! └── logger.rs      # tracing setup
//! ```
//!
//! No I/O happens in the engine or the session; recognition is supplied by
//! a [`shared::ReceiptRecognizer`] implementation.

pub mod config;
pub mod engine;
pub mod logger;
pub mod session;
pub mod share;
pub mod tip;

// Re-export public types
pub use config::{Config, ConfigError, load_dotenv};
pub use engine::{DEFAULT_TIP_PERCENTAGE, SplitEngine, SplitSnapshot};
pub use session::{SessionPhase, SessionState, SplitSession};
pub use tip::{TIP_PRESETS, clamp_tip_percentage};

// Re-export logger functions
pub use logger::{init_from_config, init_logger, init_logger_with_file};
