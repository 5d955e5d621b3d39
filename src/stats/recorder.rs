// src/stats/recorder.rs
//! 统计记录器 - 按操作来源把探测次数路由到加载或交互计数器

use std::fmt::Write as _;

use crate::{
    stats::{interactive::InteractiveStats, load::LoadStats, StatsSnapshot},
    types::Origin,
};

/// 统计记录器，由哈希表独占持有
#[derive(Debug, Default, Clone)]
pub struct StatsRecorder {
    load: LoadStats,
    interactive: InteractiveStats,
}

impl StatsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一次成功插入；`placed` 为 false 表示合并到已有条目
    pub fn record_insert(&mut self, origin: Origin, probes: usize, placed: bool) {
        match origin {
            Origin::Load => self.load.record(probes, placed),
            Origin::Interactive => self.interactive.record(probes),
        }
    }

    /// 记录一次表满导致的失败插入
    pub fn record_insert_failure(&mut self, origin: Origin, probes: usize) {
        match origin {
            Origin::Load => self.load.record_failure(),
            Origin::Interactive => self.interactive.record(probes),
        }
    }

    /// 记录一次查找；查找总是计入交互统计
    pub fn record_lookup(&mut self, probes: usize) {
        self.interactive.record(probes);
    }

    /// 获取统计快照
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            avg_load_probes: self.load.average_probes(),
            max_probes: self.load.max_probes,
            total_probes: self.load.total_probes,
            item_count: self.load.item_count,
            merged_count: self.load.merged_count,
            not_hashed: self.load.not_hashed,
            histogram: self.load.histogram.clone(),
            user_ops: self.interactive.ops,
            user_probes: self.interactive.probes,
            avg_interactive_probes: self.interactive.average_probes(),
        }
    }

    /// 重置所有统计
    pub fn reset(&mut self) {
        self.load.reset();
        self.interactive.reset();
    }

    /// 导出Prometheus格式指标
    pub fn export_prometheus(&self) -> String {
        let mut output = String::new();

        let counters = [
            ("load_total_probes", "Total probes during bulk load", self.load.total_probes),
            ("load_items", "Entries placed during bulk load", self.load.item_count),
            ("load_merged", "Duplicate keys merged during bulk load", self.load.merged_count),
            ("load_not_hashed", "Entries rejected because the table was full", self.load.not_hashed),
            ("interactive_ops", "Interactive operations", self.interactive.ops),
            ("interactive_probes", "Total probes of interactive operations", self.interactive.probes),
        ];
        for (name, help, value) in counters {
            let _ = writeln!(output, "# HELP dict_{} {}", name, help);
            let _ = writeln!(output, "# TYPE dict_{} counter", name);
            let _ = writeln!(output, "dict_{} {}", name, value);
        }

        output.push_str("# HELP dict_load_max_probes Longest probe run during bulk load\n");
        output.push_str("# TYPE dict_load_max_probes gauge\n");
        let _ = writeln!(output, "dict_load_max_probes {}", self.load.max_probes);

        output.push_str("# HELP dict_load_probe_histogram Keys by probe count during bulk load\n");
        output.push_str("# TYPE dict_load_probe_histogram gauge\n");
        for (probes, count) in self.load.histogram.rows() {
            let _ = writeln!(output, "dict_load_probe_histogram{{probes=\"{}\"}} {}", probes, count);
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_routing() {
        let mut recorder = StatsRecorder::new();
        recorder.record_insert(Origin::Load, 3, true);
        recorder.record_insert(Origin::Interactive, 5, true);
        recorder.record_lookup(2);

        let snap = recorder.snapshot();
        assert_eq!(snap.total_probes, 3);
        assert_eq!(snap.item_count, 1);
        assert_eq!(snap.user_ops, 2);
        assert_eq!(snap.user_probes, 7);
    }

    #[test]
    fn test_failure_routing() {
        let mut recorder = StatsRecorder::new();
        recorder.record_insert_failure(Origin::Load, 11);
        recorder.record_insert_failure(Origin::Interactive, 11);

        let snap = recorder.snapshot();
        assert_eq!(snap.not_hashed, 1);
        assert_eq!(snap.total_probes, 0);
        assert_eq!(snap.user_ops, 1);
        assert_eq!(snap.user_probes, 11);
    }

    #[test]
    fn test_reset() {
        let mut recorder = StatsRecorder::new();
        recorder.record_insert(Origin::Load, 1, true);
        recorder.record_lookup(1);
        recorder.reset();
        let snap = recorder.snapshot();
        assert_eq!(snap.item_count, 0);
        assert_eq!(snap.user_ops, 0);
    }

    #[test]
    fn test_export_prometheus() {
        let mut recorder = StatsRecorder::new();
        recorder.record_insert(Origin::Load, 2, true);
        recorder.record_lookup(4);

        let metrics = recorder.export_prometheus();
        assert!(metrics.contains("dict_load_total_probes 2\n"));
        assert!(metrics.contains("dict_interactive_probes 4\n"));
        assert!(metrics.contains("dict_load_probe_histogram{probes=\"2\"} 1\n"));
        assert!(metrics.contains("# TYPE dict_load_max_probes gauge\n"));
    }
}
