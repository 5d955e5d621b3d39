//! 统一错误处理 - 词典哈希表可能出现的错误及恢复建议

use std::{io, path::PathBuf};

/// 词典哈希表可能发生的错误
#[derive(Debug, thiserror::Error)]
pub enum DictError {
    #[error("表已满，无法插入新条目 (容量: {capacity}, 探测次数: {probes})")]
    TableFull {
        capacity: usize,
        probes: usize,
    },

    #[error("键过长: {len} 字节 (上限: {max})")]
    KeyTooLong {
        len: usize,
        max: usize,
    },

    #[error("值过长: {len} 字节 (上限: {max})")]
    ValueTooLong {
        len: usize,
        max: usize,
    },

    #[error("无效配置: {reason}")]
    InvalidConfig {
        reason: String,
    },

    #[error("无法打开数据源 {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("读取失败: {0}")]
    Io(#[from] io::Error),
}

impl DictError {
    /// 获取错误恢复建议
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            Self::TableFull { .. } => Some("使用更大的素数容量重新构建表"),
            Self::KeyTooLong { .. } => Some("缩短单词或调大 max_word_len"),
            Self::ValueTooLong { .. } => Some("缩短译文或调大 max_translation_len"),
            Self::InvalidConfig { .. } => Some("检查配置参数"),
            Self::SourceUnavailable { .. } => Some("确认文件路径和读取权限"),
            Self::Io(_) => None,
        }
    }

    /// 判断错误是否可恢复（调用方可跳过当前条目继续）
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::SourceUnavailable { .. } | Self::InvalidConfig { .. }
        )
    }

    /// 是否为输入长度越界
    pub fn is_input_violation(&self) -> bool {
        matches!(self, Self::KeyTooLong { .. } | Self::ValueTooLong { .. })
    }
}
