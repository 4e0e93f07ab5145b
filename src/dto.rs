use serde::{Deserialize, Serialize};

pub const DEFAULT_SUBJECT: &str = "CryptoRecover Alert";
pub const DEFAULT_MESSAGE: &str = "No message provided";

pub const HEALTH_STATUS: &str = "healthy";
pub const SERVICE_NAME: &str = "CryptoRecover Email Service";

/// Every field is optional; `null` and absent both fall back to a default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendEmailRequest {
    pub to: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SendEmailResponse {
    Sent { success: bool, message: String },
    Failed { success: bool, error: String },
}

impl SendEmailResponse {
    pub const fn sent(message: String) -> Self {
        Self::Sent {
            success: true,
            message,
        }
    }

    pub const fn failed(error: String) -> Self {
        Self::Failed {
            success: false,
            error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: HEALTH_STATUS.to_string(),
            service: SERVICE_NAME.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_fields_are_absent() {
        let req: SendEmailRequest =
            serde_json::from_value(json!({ "to": null, "subject": "Hi" })).unwrap();
        assert!(req.to.is_none());
        assert_eq!(req.subject.as_deref(), Some("Hi"));
        assert!(req.message.is_none());
    }

    #[test]
    fn wrong_field_type_rejected() {
        let res = serde_json::from_value::<SendEmailRequest>(json!({ "to": 42 }));
        assert!(res.is_err());
    }

    #[test]
    fn response_shapes() {
        assert_eq!(
            serde_json::to_value(SendEmailResponse::sent("ok".into())).unwrap(),
            json!({ "success": true, "message": "ok" })
        );
        assert_eq!(
            serde_json::to_value(SendEmailResponse::failed("boom".into())).unwrap(),
            json!({ "success": false, "error": "boom" })
        );
    }
}
