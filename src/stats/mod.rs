//! 统计模块 - 加载阶段与交互阶段的探测指标

pub mod recorder;
pub mod load;
pub mod interactive;
pub mod histogram;

pub use recorder::StatsRecorder;
pub use load::LoadStats;
pub use interactive::InteractiveStats;
pub use histogram::{ProbeHistogram, HISTOGRAM_BUCKETS};

/// 统计快照（按值拷贝）
#[derive(Debug, Default, Clone)]
pub struct StatsSnapshot {
    pub avg_load_probes: f64,
    pub max_probes: usize,
    pub total_probes: u64,
    pub item_count: u64,
    pub merged_count: u64,
    pub not_hashed: u64,
    pub histogram: ProbeHistogram,
    pub user_ops: u64,
    pub user_probes: u64,
    pub avg_interactive_probes: f64,
}
