use chrono::{DateTime, Utc};
use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

pub struct TimeService {
    clock: Arc<dyn Clock>,
}

impl TimeService {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        TimeService { clock }
    }

    pub fn with_system_clock() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    /// Seconds since the Unix epoch.
    pub fn unix_timestamp(&self) -> i64 {
        self.clock.now().timestamp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_unix_timestamp_reads_clock() {
        let mut clock = MockClock::new();
        clock
            .expect_now()
            .times(1)
            .returning(|| Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());

        let time_service = TimeService::new(Arc::new(clock));
        assert_eq!(time_service.unix_timestamp(), 1_704_067_200);
    }

    #[test]
    fn test_unix_timestamp_truncates_subseconds() {
        let mut clock = MockClock::new();
        clock
            .expect_now()
            .returning(|| Utc.timestamp_opt(1_700_000_000, 999_000_000).unwrap());

        let time_service = TimeService::new(Arc::new(clock));
        assert_eq!(time_service.unix_timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_system_clock_is_close_to_now() {
        let before = Utc::now().timestamp();
        let stamp = TimeService::with_system_clock().unix_timestamp();
        let after = Utc::now().timestamp();

        assert!(before <= stamp && stamp <= after);
    }
}
