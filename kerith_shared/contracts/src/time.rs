use chrono::{DateTime, NaiveDate, Utc};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TimeService: Send + Sync + 'static {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current local date.
    fn today(&self) -> NaiveDate;
}

#[cfg(feature = "mock")]
impl MockTimeService {
    pub fn with_now(mut self, time: DateTime<Utc>) -> Self {
        self.expect_now().once().return_const(time);
        self
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.expect_today().once().return_const(today);
        self
    }
}
