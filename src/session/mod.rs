//! Operator session management
//!
//! This module provides the `OperatorSession` abstraction that holds:
//! - Ad-hoc custom parameters added on the form
//! - The chronological call history with retrieved transcripts
//! - Session statistics

mod history;
mod session;
mod stats;

pub use history::CallHistory;
pub use session::OperatorSession;
pub use stats::SessionStats;
