//! 交互阶段统计 - 由交互命令和所有查找/删除更新

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InteractiveStats {
    pub ops: u64,
    pub probes: u64,
}

impl InteractiveStats {
    pub fn record(&mut self, probes: usize) {
        self.ops += 1;
        self.probes += probes as u64;
    }

    /// 每次操作的平均探测次数
    pub fn average_probes(&self) -> f64 {
        if self.ops == 0 {
            0.0
        } else {
            self.probes as f64 / self.ops as f64
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
