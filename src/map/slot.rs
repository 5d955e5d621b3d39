// src/map/slot.rs
//! 槽位实现 - 空 / 占用 / 墓碑 三态

use std::fmt;

use crate::types::{Translation, Word};

/// 词典条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub(crate) key: Word,
    pub(crate) value: Translation,
}

impl Entry {
    pub fn new(key: Word, value: Translation) -> Self {
        Self { key, value }
    }

    pub fn key(&self) -> &Word {
        &self.key
    }

    pub fn value(&self) -> &Translation {
        &self.value
    }
}

/// 槽位状态
///
/// 状态迁移：Empty -> Occupied -> Tombstone -> Occupied；
/// 没有任何操作会让槽位回到 Empty。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Slot {
    #[default]
    Empty,
    Occupied(Entry),
    /// 已删除；探测经过时继续向后走，插入时可复用
    Tombstone,
}

impl Slot {
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied(_))
    }

    pub fn is_tombstone(&self) -> bool {
        matches!(self, Slot::Tombstone)
    }

    pub fn entry(&self) -> Option<&Entry> {
        match self {
            Slot::Occupied(entry) => Some(entry),
            _ => None,
        }
    }

    /// 是否为持有该键的存活条目
    pub fn holds(&self, key: &Word) -> bool {
        matches!(self, Slot::Occupied(entry) if entry.key == *key)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Empty => f.write_str("Empty"),
            Slot::Occupied(entry) => write!(f, "Occupied({})", entry.key),
            Slot::Tombstone => f.write_str("Tombstone"),
        }
    }
}
