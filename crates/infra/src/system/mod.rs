use chrono::Utc;

// Mocking out time so that it is possible to run tests that depend on time.
pub trait ISys: Send + Sync {
    /// The current timestamp in millis
    fn get_timestamp_millis(&self) -> i64;
}

/// System that gets the real time and is used when not testing
pub struct RealSys {}
impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A clock that stands still until it is moved, used when testing
pub struct FixedSys {
    now: std::sync::Mutex<i64>,
}

impl FixedSys {
    pub fn new(now: i64) -> Self {
        Self {
            now: std::sync::Mutex::new(now),
        }
    }

    pub fn set_timestamp_millis(&self, now: i64) {
        *self.now.lock().unwrap() = now;
    }

    pub fn advance_millis(&self, millis: i64) {
        *self.now.lock().unwrap() += millis;
    }
}

impl ISys for FixedSys {
    fn get_timestamp_millis(&self) -> i64 {
        *self.now.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_sys_moves_only_when_told() {
        let sys = FixedSys::new(1000);
        assert_eq!(sys.get_timestamp_millis(), 1000);
        sys.advance_millis(500);
        assert_eq!(sys.get_timestamp_millis(), 1500);
        sys.set_timestamp_millis(10);
        assert_eq!(sys.get_timestamp_millis(), 10);
    }
}
