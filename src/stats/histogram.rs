//! 探测次数直方图

/// 直方图桶数：下标 0..=100，超过 100 次的探测计入最后一个桶
pub const HISTOGRAM_BUCKETS: usize = 101;

/// 探测次数 -> 需要该次数的键数量
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeHistogram {
    buckets: [u64; HISTOGRAM_BUCKETS],
}

impl Default for ProbeHistogram {
    fn default() -> Self {
        Self {
            buckets: [0; HISTOGRAM_BUCKETS],
        }
    }
}

impl ProbeHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一次探测
    pub fn record(&mut self, probes: usize) {
        self.buckets[probes.min(HISTOGRAM_BUCKETS - 1)] += 1;
    }

    pub fn count(&self, probes: usize) -> u64 {
        self.buckets.get(probes).copied().unwrap_or(0)
    }

    /// 非零行 `(探测次数, 键数量)`，从 1 开始升序
    pub fn rows(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.buckets
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, &count)| count > 0)
            .map(|(probes, &count)| (probes, count))
    }

    pub fn total(&self) -> u64 {
        self.buckets.iter().sum()
    }

    pub fn reset(&mut self) {
        self.buckets = [0; HISTOGRAM_BUCKETS];
    }
}
