use std::sync::Arc;

use kerith_email_contracts::MockEmailService;
use kerith_shared_contracts::time::MockTimeService;
use kerith_templates_contracts::MockTemplateService;

use crate::{InquiryServiceConfig, InquiryServiceImpl};

mod appointment;
mod contact;

type Sut = InquiryServiceImpl<MockTimeService, MockEmailService, MockTemplateService>;

impl Default for InquiryServiceConfig {
    fn default() -> Self {
        Self {
            recipient: Some(Arc::new("team@example.com".parse().unwrap())),
        }
    }
}
