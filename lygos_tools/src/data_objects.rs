use fis_common::Fcfa;
use serde::{Deserialize, Serialize};

/// The request body for `POST /v1/gateway`.
#[derive(Debug, Clone, Serialize)]
pub struct NewPaymentSession {
    pub amount: Fcfa,
    pub shop_name: String,
    pub message: String,
    pub success_url: String,
    pub failure_url: String,
    pub order_id: String,
}

/// A successfully created payment session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSession {
    pub order_id: String,
    pub link: String,
}

/// The webhook body Lygos posts when a payment settles or fails.
///
/// `status` is kept verbatim for audit storage; [`PaymentEvent::status_kind`] gives the
/// interpreted value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentEvent {
    pub order_id: String,
    pub status: String,
    #[serde(default)]
    pub amount: Option<Fcfa>,
    #[serde(default)]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentEventStatus {
    Successful,
    Failed,
    Unknown,
}

impl From<&str> for PaymentEventStatus {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "successful" | "success" => Self::Successful,
            "failed" | "failure" => Self::Failed,
            _ => Self::Unknown,
        }
    }
}

impl PaymentEvent {
    pub fn status_kind(&self) -> PaymentEventStatus {
        PaymentEventStatus::from(self.status.as_str())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn webhook_body_parses() {
        let body = r#"{"order_id": "abc-123", "status": "successful", "amount": 9000, "reference": "LYGOS_REF_42"}"#;
        let event: PaymentEvent = serde_json::from_str(body).unwrap();
        assert_eq!(event.status_kind(), PaymentEventStatus::Successful);
        assert_eq!(event.amount, Some(Fcfa::from(9000)));
        assert_eq!(event.reference.as_deref(), Some("LYGOS_REF_42"));
    }

    #[test]
    fn unknown_statuses_are_tolerated() {
        let event: PaymentEvent =
            serde_json::from_str(r#"{"order_id": "abc", "status": "processing"}"#).unwrap();
        assert_eq!(event.status_kind(), PaymentEventStatus::Unknown);
        assert_eq!(event.status, "processing");
    }
}
