//! 解析中インジケータの文言

/// 1200msごとに切り替える
pub const STEP_INTERVAL_MS: u64 = 1200;

pub const PROCESSING_STEPS: [&str; 5] = [
    "Analyzing food…",
    "Detecting ingredients…",
    "Estimating quantity…",
    "Calculating macros…",
    "Finalizing nutrition details…",
];

/// 解析ステップの文言を順番に返す（末尾の次は先頭へ戻る）
#[derive(Debug, Clone, Default)]
pub struct ProcessingTicker {
    index: usize,
}

impl ProcessingTicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &'static str {
        PROCESSING_STEPS[self.index]
    }

    pub fn advance(&mut self) -> &'static str {
        self.index = (self.index + 1) % PROCESSING_STEPS.len();
        self.current()
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_wraps() {
        let mut ticker = ProcessingTicker::new();
        assert_eq!(ticker.current(), "Analyzing food…");
        for _ in 0..PROCESSING_STEPS.len() - 1 {
            ticker.advance();
        }
        assert_eq!(ticker.current(), "Finalizing nutrition details…");
        assert_eq!(ticker.advance(), "Analyzing food…");
    }

    #[test]
    fn test_reset() {
        let mut ticker = ProcessingTicker::new();
        ticker.advance();
        ticker.reset();
        assert_eq!(ticker.current(), PROCESSING_STEPS[0]);
    }
}
