//! Browser clock and timer.

use async_trait::async_trait;
use std::time::Duration;
use xmrt_chain_starknet::Delay;
use xmrt_session::Clock;

/// `Date.now()`; `SystemTime` is unavailable in the browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_epoch_ms(&self) -> u64 {
        js_sys::Date::now() as u64
    }
}

/// `setTimeout`-backed delay for the simulated submitter.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimeoutDelay;

#[async_trait(?Send)]
impl Delay for TimeoutDelay {
    async fn wait(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}
