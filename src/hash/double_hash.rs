//! 双哈希策略 - 使用两个独立哈希函数生成探测序列

use crate::hash::{
    probe::ProbeStart,
    strategy::{HashAlgorithm, HashStrategy, HasherFunction},
};
use ahash::RandomState;
use std::{
    fmt,
    hash::{BuildHasher, Hash, Hasher},
    sync::Arc,
};

const PRIMARY_SEED: u64 = 42;
const SECONDARY_SEED: u64 = 123;

/// 由单个种子展开 ahash 的四个密钥
///
/// `RandomState::with_seed` 会混入进程级随机种子，这里必须用 `with_seeds`。
const fn ahash_keys(seed: u64) -> [u64; 4] {
    [
        seed,
        seed.rotate_left(16) ^ 0x243f_6a88_85a3_08d3,
        seed.rotate_left(32) ^ 0x1319_8a2e_0370_7344,
        seed.rotate_left(48) ^ 0xa409_3822_299f_31d0,
    ]
}

/// 乘法字符串哈希 h1：`h = h * 33 + c`，种子 5381
///
/// 字节按有符号 char 参与运算（>= 0x80 时符号扩展），
/// 已有报表中的探测分布依赖这一点。
pub fn multiplicative_h1(key: &[u8]) -> u64 {
    key.iter()
        .fold(5381u64, |h, &b| h.wrapping_mul(33).wrapping_add(signed_byte(b)))
}

/// 乘法字符串哈希 h2：`h = h * 131 + c`，结果取 `2h + 1`
pub fn multiplicative_h2(key: &[u8]) -> u64 {
    let h = key
        .iter()
        .fold(0u64, |h, &b| h.wrapping_mul(131).wrapping_add(signed_byte(b)));
    h.wrapping_mul(2).wrapping_add(1)
}

#[inline]
fn signed_byte(b: u8) -> u64 {
    b as i8 as u64
}

/// 双哈希策略
#[derive(Clone)]
pub struct DoubleHashStrategy {
    primary_hasher: Arc<dyn HasherFunction>,
    secondary_hasher: Arc<dyn HasherFunction>,
    algorithm: HashAlgorithm,
    capacity: usize,
}

impl DoubleHashStrategy {
    /// 创建新双哈希策略
    pub fn new(capacity: usize, algorithm: HashAlgorithm) -> Self {
        let (primary_hasher, secondary_hasher) = match algorithm {
            HashAlgorithm::Multiplicative => {
                let primary: Arc<dyn HasherFunction> = Arc::new(multiplicative_h1);
                let secondary: Arc<dyn HasherFunction> = Arc::new(multiplicative_h2);
                (primary, secondary)
            }
            // 使用不同种子创建两个哈希函数
            HashAlgorithm::AHash => (
                Self::ahash_function(PRIMARY_SEED),
                Self::ahash_function(SECONDARY_SEED),
            ),
            HashAlgorithm::XxHash => (
                Self::xxhash_function(PRIMARY_SEED),
                Self::xxhash_function(SECONDARY_SEED),
            ),
        };

        Self {
            primary_hasher,
            secondary_hasher,
            algorithm,
            capacity,
        }
    }

    /// 固定密钥的 ahash，跨进程结果一致
    fn ahash_function(seed: u64) -> Arc<dyn HasherFunction> {
        let [k0, k1, k2, k3] = ahash_keys(seed);
        let state = RandomState::with_seeds(k0, k1, k2, k3);
        Arc::new(move |data: &[u8]| {
            let mut hasher = state.build_hasher();
            data.hash(&mut hasher);
            hasher.finish()
        })
    }

    fn xxhash_function(seed: u64) -> Arc<dyn HasherFunction> {
        Arc::new(move |data: &[u8]| {
            let mut hasher = twox_hash::XxHash64::with_seed(seed);
            data.hash(&mut hasher);
            hasher.finish()
        })
    }
}

impl fmt::Debug for DoubleHashStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DoubleHashStrategy")
            .field("algorithm", &self.algorithm)
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl HashStrategy for DoubleHashStrategy {
    fn probe_start(&self, key: &[u8]) -> ProbeStart {
        ProbeStart::new(
            self.primary_hasher.hash_bytes(key),
            self.secondary_hasher.hash_bytes(key),
            self.capacity,
        )
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn name(&self) -> &'static str {
        self.algorithm.as_str()
    }
}
