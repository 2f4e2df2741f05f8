/// Per-run state of the command loop
///
/// Created when the loop starts and dropped when it ends. Nothing outside the
/// command service holds a reference to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    ping_count: u64,
    timer_seconds: u64,
}

impl Session {
    pub fn new(timer_seconds: u64) -> Self {
        Self {
            ping_count: 0,
            timer_seconds,
        }
    }

    /// Count one more ping and return the new total
    pub fn record_ping(&mut self) -> u64 {
        self.ping_count += 1;
        self.ping_count
    }

    pub fn ping_count(&self) -> u64 {
        self.ping_count
    }

    pub fn timer_seconds(&self) -> u64 {
        self.timer_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ping_counter_is_monotonic() {
        let mut session = Session::new(10);
        assert_eq!(session.ping_count(), 0);
        assert_eq!(session.record_ping(), 1);
        assert_eq!(session.record_ping(), 2);
        assert_eq!(session.record_ping(), 3);
        assert_eq!(session.timer_seconds(), 10);
    }
}
