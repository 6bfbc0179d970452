use chrono::{DateTime, Utc};

/// Represents an entity responsible for providing dates across application. Entries are stamped
/// through it so tests can pin the time.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Sync + Send + 'static {
    fn time(&self) -> DateTime<Utc>;
}

pub struct DefaultClock;

impl Clock for DefaultClock {
    fn time(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
