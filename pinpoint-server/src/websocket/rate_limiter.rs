use std::time::{Duration, Instant};

/// Token bucket limiting how many commands one socket may send.
#[derive(Debug, Clone)]
pub struct CommandLimiter {
    available: u32,
    capacity: u32,
    refill_every: Duration,
    last_refill: Instant,
}

impl CommandLimiter {
    pub fn new(capacity: u32, refill_every: Duration) -> Self {
        Self {
            available: capacity,
            capacity,
            refill_every,
            last_refill: Instant::now(),
        }
    }

    /// Takes one token, or returns false when the bucket is empty.
    pub fn try_acquire(&mut self) -> bool {
        self.refill();
        if self.available == 0 {
            return false;
        }
        self.available -= 1;
        true
    }

    pub fn available(&mut self) -> u32 {
        self.refill();
        self.available
    }

    fn refill(&mut self) {
        if self.refill_every.is_zero() {
            self.available = self.capacity;
            return;
        }
        let earned = self.last_refill.elapsed().as_nanos() / self.refill_every.as_nanos();
        if earned == 0 {
            return;
        }
        if earned >= u128::from(self.capacity - self.available) {
            self.available = self.capacity;
            self.last_refill = Instant::now();
        } else {
            let earned = earned as u32;
            self.available += earned;
            self.last_refill += self.refill_every * earned;
        }
    }
}

impl Default for CommandLimiter {
    fn default() -> Self {
        Self::new(20, Duration::from_millis(500))
    }
}
