use crate::domain::ports::NumberSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// 使用每個執行緒各自的 `thread_rng`，多執行緒呼叫不需要同步
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngSource;

impl NumberSource for ThreadRngSource {
    fn draw(&self, low: u32, high: u32) -> u32 {
        rand::thread_rng().gen_range(low..=high)
    }
}

/// 固定種子的亂數來源，相同種子產生相同序列
#[derive(Debug)]
pub struct SeededSource {
    rng: Mutex<StdRng>,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl NumberSource for SeededSource {
    fn draw(&self, low: u32, high: u32) -> u32 {
        // 其他執行緒 panic 不影響亂數狀態本身
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(low..=high)
    }
}
