//! 哈希模块 - 统一管理哈希与探测序列

pub mod strategy;
pub mod double_hash;
pub mod probe;

pub use strategy::{HashAlgorithm, HashStrategy, HasherFunction};
pub use double_hash::DoubleHashStrategy;
pub use probe::{ProbeSequence, ProbeStart};

/// 默认哈希策略
pub fn default_hash_strategy(capacity: usize) -> Box<dyn HashStrategy> {
    Box::new(DoubleHashStrategy::new(capacity, HashAlgorithm::default()))
}

/// 判断是否为素数（试除法，容量构造时调用一次）
pub fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

/// 不小于 `n` 的最小素数
pub fn next_prime(n: usize) -> usize {
    let mut candidate = n.max(2);
    while !is_prime(candidate) {
        candidate += 1;
    }
    candidate
}
