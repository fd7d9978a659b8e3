/// Doubling retry delay, capped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    initial_ms: u64,
    max_ms: u64,
    next_ms: u64,
}

impl Backoff {
    pub const fn new(initial_ms: u64, max_ms: u64) -> Self {
        Self {
            initial_ms,
            max_ms,
            next_ms: initial_ms,
        }
    }

    /// Delay to wait before the upcoming retry.
    pub fn next_delay_ms(&mut self) -> u64 {
        let delay = self.next_ms;
        self.next_ms = self.next_ms.saturating_mul(2).min(self.max_ms);
        delay
    }

    pub fn reset(&mut self) {
        self.next_ms = self.initial_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{WIFI_RECONNECT_DELAY_MS, WIFI_RECONNECT_MAX_DELAY_MS};

    #[test]
    fn doubles_until_capped() {
        let mut backoff = Backoff::new(5_000, 60_000);
        let delays: [u64; 6] = core::array::from_fn(|_| backoff.next_delay_ms());
        assert_eq!(delays, [5_000, 10_000, 20_000, 40_000, 60_000, 60_000]);
    }

    #[test]
    fn reset_starts_over() {
        let mut backoff = Backoff::new(WIFI_RECONNECT_DELAY_MS, WIFI_RECONNECT_MAX_DELAY_MS);
        backoff.next_delay_ms();
        backoff.next_delay_ms();
        backoff.reset();
        assert_eq!(backoff.next_delay_ms(), WIFI_RECONNECT_DELAY_MS);
    }

    #[test]
    fn huge_delays_do_not_overflow() {
        let mut backoff = Backoff::new(u64::MAX / 2 + 1, u64::MAX);
        backoff.next_delay_ms();
        assert_eq!(backoff.next_delay_ms(), u64::MAX);
    }
}
