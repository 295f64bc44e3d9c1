use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::Urgency;

/// Notification raised when a case enters emergency urgency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub case_id: Uuid,
    pub urgency: Urgency,
    pub message: String,
}
