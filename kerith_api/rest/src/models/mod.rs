use serde::Serialize;

pub mod diagnostics;
pub mod inquiry;

#[derive(Serialize)]
pub struct ApiSuccess {
    pub success: bool,
    pub message: String,
}

impl ApiSuccess {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
