//! 双哈希词典索引
//!
//! 固定容量、开放寻址（双哈希）的键值表，用作双语词典索引，
//! 并分别统计批量加载阶段与交互阶段的探测次数。
//!
//! ## 主要特性
//! - 探测序列 `(h1 + i * h2) mod N`，容量 N 为素数，步长永不为 0
//! - 墓碑删除；插入时越过墓碑查找同键条目，避免同一个键出现两个存活条目
//! - 表满时返回 `TableFull`，超长单词/译文返回 `KeyTooLong`/`ValueTooLong`
//! - 加载统计（总探测、最长探测、直方图）与交互统计互不干扰
//!
//! ## 快速开始
//!
//! ```rust
//! use double_hash_dict::*;
//!
//! let mut map = DictMap::new(DictMapConfig::with_capacity(11)).expect("配置无效");
//!
//! map.insert("Cat", "gato", Origin::Load).expect("插入失败");
//! map.insert("cat", "felino", Origin::Load).expect("插入失败");
//!
//! let found = map.search("cat").expect("查找失败");
//! assert_eq!(found.entry.unwrap().value().to_string_lossy(), "gato;felino");
//!
//! map.delete("cat").expect("删除失败");
//! assert!(!map.search("cat").unwrap().is_found());
//!
//! println!("{:?}", map.stats());
//! ```

#![warn(clippy::all)]

#[cfg(feature = "logging")]
#[doc(hidden)]
pub use log as __log;

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::__log::debug!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::__log::info!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::__log::warn!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::__log::error!($($arg)*)
    };
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {};
}

// 核心模块导出
pub mod error;
pub mod types;
pub mod hash;
pub mod map;
pub mod stats;
pub mod loader;
pub mod command;
pub mod report;

#[cfg(test)]
mod proptests;

// 公共接口导出
pub use crate::{
    command::{CommandProcessor, Command, Line, Request},
    error::DictError,
    hash::{
        default_hash_strategy, DoubleHashStrategy, HashAlgorithm, HashStrategy, ProbeSequence,
        ProbeStart,
    },
    loader::{load_dictionary, load_file, LoadReport},
    map::{
        DeleteOutcome, DictMap, DictMapConfig, Entry, InsertKind, InsertOutcome, SearchOutcome,
        Slot, DEFAULT_CAPACITY,
    },
    report::{render_load_report, write_load_report, write_session_report},
    stats::{ProbeHistogram, StatsRecorder, StatsSnapshot},
    types::{Origin, Translation, Word, MAX_TRANSLATION_LEN, MAX_WORD_LEN},
};

/// 批量插入，返回成功条数
///
/// 失败的条目（表满、超长）被跳过。
pub fn batch_insert<'a>(
    map: &mut DictMap,
    items: impl IntoIterator<Item = (&'a str, &'a str)>,
    origin: Origin,
) -> usize {
    let mut count = 0;
    for (word, translation) in items {
        if map.insert(word, translation, origin).is_ok() {
            count += 1;
        }
    }
    count
}
