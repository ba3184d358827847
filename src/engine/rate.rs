use rand::{thread_rng, Rng};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::{sleep, Instant};

/// Token bucket limiting how many probe connections start per second.
#[derive(Clone)]
pub struct RateLimiter {
    permits: Arc<Semaphore>,
    fill_rate: u32,
    last_refill: Arc<tokio::sync::Mutex<Instant>>,
}

impl RateLimiter {
    pub fn new(fill_rate: u32) -> Self {
        let fill_rate = fill_rate.max(1);
        Self {
            permits: Arc::new(Semaphore::new(fill_rate as usize)),
            fill_rate,
            last_refill: Arc::new(tokio::sync::Mutex::new(Instant::now())),
        }
    }

    /// Waits for a token, then adds a little jitter so probes do not start
    /// in lockstep.
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut last = self.last_refill.lock().await;
                if last.elapsed() >= Duration::from_secs(1) {
                    let to_add = self
                        .fill_rate
                        .saturating_sub(self.permits.available_permits() as u32);
                    self.permits.add_permits(to_add as usize);
                    *last = Instant::now();
                }
                match self.permits.try_acquire() {
                    Ok(permit) => {
                        permit.forget();
                        break;
                    }
                    Err(_) => Duration::from_secs(1).saturating_sub(last.elapsed()),
                }
            };
            sleep(wait.max(Duration::from_millis(1))).await;
        }
        self.sleep_jitter().await;
    }

    async fn sleep_jitter(&self) {
        let jitter_ms: u64 = thread_rng().gen_range(5..20);
        sleep(Duration::from_millis(jitter_ms)).await;
    }
}
