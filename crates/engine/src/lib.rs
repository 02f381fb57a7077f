//! Recommendation state engine for the swipe app.
//!
//! This crate owns everything that changes while a user swipes:
//! - `pools`: all, suggested, liked, disliked and untouched movies
//! - `selector`: picks the best untouched movie for a freed slot
//! - `refill`: decides when and which catalog pages to fetch next
//! - `engine`: runs each ingest or feedback event to completion
//! - `session`: drives an engine from a `CatalogFetcher`

pub mod config;
pub mod engine;
pub mod error;
pub mod pools;
pub mod refill;
pub mod selector;
pub mod session;

pub use config::{AppConfig, EngineConfig};
pub use engine::{FeedbackReport, IngestReport, RecommendationEngine, SlotOutcome};
pub use error::{ConfigError, PoolError, Result};
pub use pools::MoviePools;
pub use refill::PageRange;
pub use selector::{ScoredCandidate, SelectionPolicy, SuggestionSelector};
pub use session::{CatalogSession, RefillStatus, SessionFeedback};
