//! 加载阶段统计 - 只由批量加载的插入更新

use crate::stats::histogram::ProbeHistogram;

/// 加载阶段计数器
#[derive(Debug, Default, Clone)]
pub struct LoadStats {
    pub total_probes: u64,
    pub max_probes: usize,
    /// 新放置的条目数（合并不计入）
    pub item_count: u64,
    pub merged_count: u64,
    /// 因表满未能放置的条目数
    pub not_hashed: u64,
    pub histogram: ProbeHistogram,
}

impl LoadStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一次成功插入
    pub fn record(&mut self, probes: usize, placed: bool) {
        self.total_probes += probes as u64;
        self.max_probes = self.max_probes.max(probes);
        self.histogram.record(probes);
        if placed {
            self.item_count += 1;
        } else {
            self.merged_count += 1;
        }
    }

    /// 记录一次失败插入
    pub fn record_failure(&mut self) {
        self.not_hashed += 1;
    }

    /// 平均探测次数 = 总探测 / 条目数
    pub fn average_probes(&self) -> f64 {
        if self.item_count == 0 {
            0.0
        } else {
            self.total_probes as f64 / self.item_count as f64
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
