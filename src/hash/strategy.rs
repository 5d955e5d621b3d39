//! 哈希策略模块 - 定义探测起点的计算方式

use std::fmt;

use crate::hash::probe::{ProbeSequence, ProbeStart};

/// 哈希算法选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashAlgorithm {
    /// 乘法字符串哈希（h1 种子 5381 乘 33，h2 乘 131 后取奇数）
    #[default]
    Multiplicative,
    AHash,
    XxHash,
}

impl HashAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Multiplicative => "multiplicative",
            HashAlgorithm::AHash => "ahash",
            HashAlgorithm::XxHash => "xxhash",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 哈希策略特征
pub trait HashStrategy: Send + Sync {
    /// 计算键的探测起点
    fn probe_start(&self, key: &[u8]) -> ProbeStart;

    /// 表容量（探测序列长度上限）
    fn capacity(&self) -> usize;

    /// 策略名称，用于日志
    fn name(&self) -> &'static str;

    /// 键的完整探测序列
    fn probe_sequence(&self, key: &[u8]) -> ProbeSequence {
        ProbeSequence::new(self.probe_start(key), self.capacity())
    }
}

/// 哈希函数特征
pub trait HasherFunction: Send + Sync {
    fn hash_bytes(&self, data: &[u8]) -> u64;
}

impl<T> HasherFunction for T
where
    T: Fn(&[u8]) -> u64 + Send + Sync,
{
    fn hash_bytes(&self, data: &[u8]) -> u64 {
        self(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 固定起点的测试策略
    struct FixedStrategy {
        start: ProbeStart,
        capacity: usize,
    }

    impl HashStrategy for FixedStrategy {
        fn probe_start(&self, _key: &[u8]) -> ProbeStart {
            self.start
        }

        fn capacity(&self) -> usize {
            self.capacity
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    #[test]
    fn test_default_probe_sequence() {
        let strategy = FixedStrategy {
            start: ProbeStart { home: 2, step: 3 },
            capacity: 7,
        };
        let indices: Vec<usize> = strategy.probe_sequence(b"any").collect();
        assert_eq!(indices, vec![2, 5, 1, 4, 0, 3, 6]);
    }

    #[test]
    fn test_closure_as_hasher_function() {
        let f = |data: &[u8]| data.len() as u64;
        assert_eq!(f.hash_bytes(b"abcd"), 4);
    }

    #[test]
    fn test_algorithm_names() {
        assert_eq!(HashAlgorithm::default(), HashAlgorithm::Multiplicative);
        assert_eq!(HashAlgorithm::XxHash.to_string(), "xxhash");
    }
}
