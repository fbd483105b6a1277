use std::{cell::RefCell, time::Duration};

use async_trait::async_trait;

/// Timer facilities of the host environment.
#[async_trait(?Send)]
pub trait Timer {
    /// Complete after `duration`.
    async fn sleep(&self, duration: Duration);

    /// Complete once the host is idle. Hosts without an idle signal wait for `fallback` instead.
    async fn idle(&self, fallback: Duration) {
        self.sleep(fallback).await
    }
}

/// A [`Timer`] whose sleeps complete immediately. It records every requested duration.
#[derive(Default)]
pub struct ImmediateTimer {
    slept: RefCell<Vec<Duration>>,
}

impl ImmediateTimer {
    /// The durations slept so far, in order.
    pub fn slept(&self) -> Vec<Duration> {
        self.slept.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Timer for ImmediateTimer {
    async fn sleep(&self, duration: Duration) {
        self.slept.borrow_mut().push(duration);
    }
}
