use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Statistics about an operator session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    pub session_id: String,

    /// When the operator session was opened
    pub created_at: DateTime<Utc>,

    /// Calls placed successfully
    pub calls_count: usize,

    /// Calls whose transcript has been retrieved
    pub completed_count: usize,

    /// Custom parameters currently defined
    pub custom_params_count: usize,
}
