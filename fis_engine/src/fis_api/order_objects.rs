use serde::{Deserialize, Serialize};

use crate::db_types::Order;

/// An order together with the chat summary shown on the admin listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithChat {
    #[serde(flatten)]
    pub order: Order,
    pub message_count: i64,
    pub last_message: Option<String>,
}
