//! 词典哈希表核心实现 - 双哈希开放寻址 + 墓碑删除 + 探测统计

use std::fmt;

use crate::{
    error::DictError,
    hash::{is_prime, DoubleHashStrategy, HashAlgorithm, HashStrategy},
    map::slot::{Entry, Slot},
    stats::{StatsRecorder, StatsSnapshot},
    types::{Origin, Translation, Word, MAX_TRANSLATION_LEN, MAX_WORD_LEN},
};

/// 默认容量（素数，约为常用词典行数的两倍）
pub const DEFAULT_CAPACITY: usize = 20011;

/// 哈希表配置
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DictMapConfig {
    /// 槽位数，必须为素数，构造后不再改变
    pub capacity: usize,
    pub max_word_len: usize,
    pub max_translation_len: usize,
    pub hash_algorithm: HashAlgorithm,
}

impl Default for DictMapConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            max_word_len: MAX_WORD_LEN,
            max_translation_len: MAX_TRANSLATION_LEN,
            hash_algorithm: HashAlgorithm::default(),
        }
    }
}

impl DictMapConfig {
    /// 使用指定容量，其余取默认值
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// 校验配置
    pub fn validate(&self) -> Result<(), DictError> {
        if !is_prime(self.capacity) {
            return Err(DictError::InvalidConfig {
                reason: format!("容量 {} 不是素数", self.capacity),
            });
        }
        if self.max_word_len == 0 {
            return Err(DictError::InvalidConfig {
                reason: "max_word_len 必须大于 0".to_string(),
            });
        }
        if self.max_translation_len == 0 {
            return Err(DictError::InvalidConfig {
                reason: "max_translation_len 必须大于 0".to_string(),
            });
        }
        Ok(())
    }
}

/// 插入结果类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertKind {
    /// 放入空槽或墓碑槽
    Placed,
    /// 追加到已有条目
    Merged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertOutcome {
    pub kind: InsertKind,
    pub index: usize,
    pub probes: usize,
    pub reused_tombstone: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub entry: Option<Entry>,
    pub probes: usize,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        self.entry.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub deleted: bool,
    pub probes: usize,
}

/// 插入目标
enum Target {
    Existing(usize),
    Vacant { index: usize, tombstone: bool },
}

/// 固定容量的词典哈希表
pub struct DictMap {
    slots: Vec<Slot>,
    hasher: Box<dyn HashStrategy>,
    config: DictMapConfig,
    len: usize,
    tombstones: usize,
    stats: StatsRecorder,
}

impl DictMap {
    /// 按配置创建新哈希表
    pub fn new(config: DictMapConfig) -> Result<Self, DictError> {
        config.validate()?;
        let hasher = Box::new(DoubleHashStrategy::new(config.capacity, config.hash_algorithm));
        Self::with_strategy(config, hasher)
    }

    /// 使用自定义哈希策略创建
    pub fn with_strategy(
        config: DictMapConfig,
        hasher: Box<dyn HashStrategy>,
    ) -> Result<Self, DictError> {
        config.validate()?;
        if hasher.capacity() != config.capacity {
            return Err(DictError::InvalidConfig {
                reason: format!(
                    "哈希策略容量 {} 与表容量 {} 不一致",
                    hasher.capacity(),
                    config.capacity
                ),
            });
        }

        log_info!(
            "dictionary table created: capacity {}, hash {}",
            config.capacity,
            hasher.name()
        );

        Ok(Self {
            slots: vec![Slot::Empty; config.capacity],
            hasher,
            config,
            len: 0,
            tombstones: 0,
            stats: StatsRecorder::new(),
        })
    }

    /// 插入键值对
    ///
    /// 沿探测序列前进时记住第一个墓碑但继续向后找同键条目：
    /// 找到则合并译文，遇到空槽或走完整个序列则放入第一个墓碑（没有墓碑时放入空槽）。
    pub fn insert(
        &mut self,
        key: impl AsRef<[u8]>,
        value: impl AsRef<[u8]>,
        origin: Origin,
    ) -> Result<InsertOutcome, DictError> {
        let word = Word::new(key, self.config.max_word_len)?;
        let translation = Translation::new(value, self.config.max_translation_len)?;

        let mut probes = 0;
        let mut first_tombstone = None;
        let mut target = None;

        for index in self.hasher.probe_sequence(word.as_bytes()) {
            probes += 1;
            match &self.slots[index] {
                Slot::Empty => {
                    target = Some(match first_tombstone {
                        Some(reuse) => Target::Vacant { index: reuse, tombstone: true },
                        None => Target::Vacant { index, tombstone: false },
                    });
                    break;
                }
                Slot::Tombstone => {
                    first_tombstone.get_or_insert(index);
                }
                Slot::Occupied(entry) if entry.key == word => {
                    target = Some(Target::Existing(index));
                    break;
                }
                Slot::Occupied(_) => {}
            }
        }

        let target = target.or_else(|| {
            first_tombstone.map(|index| Target::Vacant { index, tombstone: true })
        });

        match target {
            Some(Target::Existing(index)) => {
                if let Slot::Occupied(entry) = &mut self.slots[index] {
                    // 长度越界与其他输入校验一样不计入统计
                    if let Err(err) = entry.value.append(&translation, self.config.max_translation_len) {
                        log_warn!("merge into '{}' rejected: {}", word, err);
                        return Err(err);
                    }
                }
                self.stats.record_insert(origin, probes, false);
                Ok(InsertOutcome {
                    kind: InsertKind::Merged,
                    index,
                    probes,
                    reused_tombstone: false,
                })
            }
            Some(Target::Vacant { index, tombstone }) => {
                if tombstone {
                    log_debug!("'{}' reuses tombstone at slot {}", word, index);
                    self.tombstones -= 1;
                }
                self.slots[index] = Slot::Occupied(Entry::new(word, translation));
                self.len += 1;
                self.stats.record_insert(origin, probes, true);
                Ok(InsertOutcome {
                    kind: InsertKind::Placed,
                    index,
                    probes,
                    reused_tombstone: tombstone,
                })
            }
            None => {
                log_warn!(
                    "table full: '{}' not placed after {} probes ({} origin)",
                    word,
                    probes,
                    origin.as_str()
                );
                self.stats.record_insert_failure(origin, probes);
                Err(DictError::TableFull {
                    capacity: self.config.capacity,
                    probes,
                })
            }
        }
    }

    /// 查找键，计入交互统计
    pub fn search(&mut self, key: impl AsRef<[u8]>) -> Result<SearchOutcome, DictError> {
        let word = Word::new(key, self.config.max_word_len)?;
        let (found, probes) = self.locate(&word);
        self.stats.record_lookup(probes);

        Ok(SearchOutcome {
            entry: found.and_then(|index| self.slots[index].entry().cloned()),
            probes,
        })
    }

    /// 删除键：命中时把槽位标记为墓碑
    pub fn delete(&mut self, key: impl AsRef<[u8]>) -> Result<DeleteOutcome, DictError> {
        let word = Word::new(key, self.config.max_word_len)?;
        let (found, probes) = self.locate(&word);
        self.stats.record_lookup(probes);

        let deleted = match found {
            Some(index) => {
                self.slots[index] = Slot::Tombstone;
                self.len -= 1;
                self.tombstones += 1;
                true
            }
            None => false,
        };
        Ok(DeleteOutcome { deleted, probes })
    }

    /// 沿探测序列定位存活条目，返回 (槽位, 探测次数)
    ///
    /// 遇到空槽即停止；墓碑和其他键的槽位跳过但计入探测次数。
    fn locate(&self, word: &Word) -> (Option<usize>, usize) {
        let mut probes = 0;
        for index in self.hasher.probe_sequence(word.as_bytes()) {
            probes += 1;
            match &self.slots[index] {
                Slot::Empty => return (None, probes),
                slot if slot.holds(word) => return (Some(index), probes),
                _ => {}
            }
        }
        (None, probes)
    }

    /// 不计统计的只读查找
    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&Entry> {
        let word = Word::new(key, self.config.max_word_len).ok()?;
        let (found, _) = self.locate(&word);
        found.and_then(|index| self.slots[index].entry())
    }

    /// 查找该键时会依次访问的槽位
    pub fn probe_path(&self, key: impl AsRef<[u8]>) -> Vec<usize> {
        let word = match Word::new(key, self.config.max_word_len) {
            Ok(word) => word,
            Err(_) => return Vec::new(),
        };
        let (_, probes) = self.locate(&word);
        self.hasher.probe_sequence(word.as_bytes()).take(probes).collect()
    }

    /// 遍历存活条目（按槽位顺序）
    pub fn iter(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.slots.iter().filter_map(Slot::entry)
    }

    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// 存活条目数
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    pub fn load_factor(&self) -> f32 {
        self.len as f32 / self.config.capacity as f32
    }

    pub fn config(&self) -> &DictMapConfig {
        &self.config
    }

    /// 获取统计信息
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// 导出Prometheus格式指标
    pub fn export_prometheus(&self) -> String {
        self.stats.export_prometheus()
    }
}

impl fmt::Debug for DictMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DictMap")
            .field("len", &self.len)
            .field("capacity", &self.config.capacity)
            .field("tombstones", &self.tombstones)
            .field("hash", &self.hasher.name())
            .finish()
    }
}
