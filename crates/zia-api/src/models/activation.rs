use serde::{Deserialize, Serialize};

/// Configuration activation state (`GET /status`, `POST /status/activate`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activation {
    #[serde(default)]
    pub status: String,
}

impl Activation {
    pub const ACTIVE: &'static str = "ACTIVE";
    pub const PENDING: &'static str = "PENDING";

    pub fn is_active(&self) -> bool {
        self.status == Self::ACTIVE
    }
}
