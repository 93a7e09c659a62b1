use chrono::{DateTime, Local, NaiveDate, Utc};
use kerith_shared_contracts::time::TimeService;

#[derive(Debug, Clone, Copy, Default)]
pub struct TimeServiceImpl;

impl TimeService for TimeServiceImpl {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
