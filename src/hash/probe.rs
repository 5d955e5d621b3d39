//! 探测序列 - 双哈希开放寻址的槽位遍历

/// 探测起点：首个槽位与步长
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeStart {
    pub home: usize,
    pub step: usize,
}

impl ProbeStart {
    /// 由两个原始哈希值构造
    ///
    /// 步长对容量取模后为 0 时强制为 1，否则序列会停在同一个槽位上。
    pub fn new(h1: u64, h2: u64, capacity: usize) -> Self {
        let modulus = capacity as u64;
        let home = (h1 % modulus) as usize;
        let step = match (h2 % modulus) as usize {
            0 => 1,
            step => step,
        };
        Self { home, step }
    }
}

/// 第 i 次探测位于 `(home + i * step) mod capacity`，最多产生 `capacity` 个下标
///
/// 容量为素数时任意非零步长都与之互素，序列恰好覆盖全部槽位一次。
#[derive(Debug, Clone)]
pub struct ProbeSequence {
    next: usize,
    step: usize,
    capacity: usize,
    remaining: usize,
}

impl ProbeSequence {
    pub fn new(start: ProbeStart, capacity: usize) -> Self {
        Self {
            next: start.home,
            step: start.step,
            capacity,
            remaining: capacity,
        }
    }
}

impl Iterator for ProbeSequence {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.next;
        self.next = (self.next + self.step) % self.capacity;
        self.remaining -= 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ProbeSequence {}
