//! 哈希表核心模块 - 词典哈希表及其槽位

pub mod dict_map;
pub mod slot;

pub use dict_map::{
    DeleteOutcome, DictMap, DictMapConfig, InsertKind, InsertOutcome, SearchOutcome,
    DEFAULT_CAPACITY,
};
pub use slot::{Entry, Slot};
