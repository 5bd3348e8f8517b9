//! Request pacing
//!
//! The target site's anti-automation defenses make rapid or concurrent
//! requests from one identity counterproductive, so the crawler trades
//! throughput for reliability: a single worker, a short randomized delay
//! after every leaf unit of work, and a longer fixed cooldown after every
//! batch of units.

use crate::config::CrawlConfig;
use rand::Rng;
use std::time::Duration;

pub struct Pacer {
    delay_min: Duration,
    delay_max: Duration,
    batch_size: u64,
    batch_cooldown: Duration,
    units_done: u64,
}

impl Pacer {
    pub fn new(
        delay_min: Duration,
        delay_max: Duration,
        batch_size: u64,
        batch_cooldown: Duration,
    ) -> Self {
        Self {
            delay_min,
            delay_max,
            batch_size,
            batch_cooldown,
            units_done: 0,
        }
    }

    pub fn from_config(config: &CrawlConfig) -> Self {
        Self::new(
            Duration::from_millis(config.page_delay_min_ms),
            Duration::from_millis(config.page_delay_max_ms),
            config.batch_size,
            Duration::from_millis(config.batch_cooldown_ms),
        )
    }

    /// Counts one finished unit of work and sleeps the randomized per-unit
    /// delay, plus the batch cooldown when a batch boundary is crossed.
    pub async fn pause(&mut self) {
        tokio::time::sleep(self.unit_delay()).await;

        self.units_done += 1;
        if self.batch_size > 0 && self.units_done % self.batch_size == 0 {
            tracing::info!(
                "Processed {} units, cooling down for {:?} to avoid blocks",
                self.units_done,
                self.batch_cooldown
            );
            tokio::time::sleep(self.batch_cooldown).await;
        }
    }

    pub fn units_done(&self) -> u64 {
        self.units_done
    }

    fn unit_delay(&self) -> Duration {
        if self.delay_max <= self.delay_min {
            return self.delay_min;
        }
        let min = self.delay_min.as_millis() as u64;
        let max = self.delay_max.as_millis() as u64;
        Duration::from_millis(rand::thread_rng().gen_range(min..=max))
    }
}
