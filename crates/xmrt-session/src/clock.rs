use std::time::{SystemTime, UNIX_EPOCH};

/// Wall clock in epoch milliseconds.
pub trait Clock {
    fn now_epoch_ms(&self) -> u64;
}

/// Host clock. Not available on `wasm32-unknown-unknown`; browsers supply
/// their own `Clock`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_past_2023() {
        assert!(SystemClock.now_epoch_ms() > 1_700_000_000_000);
    }
}
