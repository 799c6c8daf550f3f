//! maze-players: Player path submissions
//!
//! Players draw a path through the maze and attach a picture and a sound.
//! This crate holds the request handling behind the submission endpoints:
//! body validation, a per-client quota and a storage handle that is opened
//! and closed explicitly by whoever runs the service.

mod rate;
mod service;
mod store;
mod submission;

pub use rate::{RateDecision, RateLimitConfig, RateLimiter, RateRecord};
pub use service::{ApiResponse, PlayerService, SAMPLE_SIZE};
pub use store::{FileStore, MemoryStore, PlayerStore, StoreError};
pub use submission::{PathPoint, PlayerRecord, SubmissionError, validate_submission};
