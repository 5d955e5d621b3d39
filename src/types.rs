//! 核心类型定义 - 有界单词/译文与操作来源

use std::borrow::Cow;
use std::fmt::{self, Display};

use crate::error::DictError;

/// 单词最大字节数
pub const MAX_WORD_LEN: usize = 99;

/// 译文最大字节数（含合并后的分隔符）
pub const MAX_TRANSLATION_LEN: usize = 9999;

/// 重复插入时译文之间的分隔符
pub const TRANSLATION_SEPARATOR: u8 = b';';

/// 词典键 - 小写化、有长度上限的单词
///
/// 按原始字节保存与比较，不要求是合法 UTF-8。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word(Vec<u8>);

impl Word {
    /// 创建新单词
    ///
    /// 只做 ASCII 小写化；超过 `max_len` 字节时返回 `KeyTooLong`。
    pub fn new(raw: impl AsRef<[u8]>, max_len: usize) -> Result<Self, DictError> {
        let raw = raw.as_ref();
        if raw.len() > max_len {
            return Err(DictError::KeyTooLong {
                len: raw.len(),
                max: max_len,
            });
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    /// 获取单词的字节表示（用于哈希）
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// 文本形式，非法 UTF-8 字节显示为替换字符
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }
}

impl Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl AsRef<[u8]> for Word {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// 词典值 - 一条或多条以 `;` 连接的译文，按原始字节保存
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Translation(Vec<u8>);

impl Translation {
    /// 创建新译文，超过 `max_len` 字节时返回 `ValueTooLong`
    pub fn new(raw: impl AsRef<[u8]>, max_len: usize) -> Result<Self, DictError> {
        let raw = raw.as_ref();
        if raw.len() > max_len {
            return Err(DictError::ValueTooLong {
                len: raw.len(),
                max: max_len,
            });
        }
        Ok(Self(raw.to_vec()))
    }

    /// 追加一条译文，不去重
    ///
    /// 合并结果超出上限时原值保持不变。
    pub fn append(&mut self, other: &Translation, max_len: usize) -> Result<(), DictError> {
        let len = self.0.len() + 1 + other.0.len();
        if len > max_len {
            return Err(DictError::ValueTooLong { len, max: max_len });
        }
        self.0.push(TRANSLATION_SEPARATOR);
        self.0.extend_from_slice(&other.0);
        Ok(())
    }

    /// 按插入顺序遍历各条译文
    pub fn components(&self) -> impl Iterator<Item = &[u8]> {
        self.0.split(|&b| b == TRANSLATION_SEPARATOR)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// 文本形式，非法 UTF-8 字节显示为替换字符
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

/// 操作来源 - 决定探测次数计入哪一组统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// 批量加载（词典文件）
    Load,
    /// 交互命令
    Interactive,
}

impl Origin {
    /// 转换为字符串表示
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Load => "load",
            Origin::Interactive => "interactive",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_is_lowercased() {
        let word = Word::new("GaTo", MAX_WORD_LEN).unwrap();
        assert_eq!(word.as_bytes(), b"gato");
        assert_eq!(word.to_string(), "gato");
    }

    #[test]
    fn test_word_keeps_non_ascii_bytes() {
        // 非 ASCII 字符不做大小写折叠
        let word = Word::new("ÑANDÚ", MAX_WORD_LEN).unwrap();
        assert_eq!(word.to_string_lossy(), "ÑANDÚ");
    }

    #[test]
    fn test_word_compares_raw_bytes() {
        // Latin-1 编码的 ñ 与 é 是不同的单字节，不能折叠成同一个键
        let nino = Word::new(b"NI\xF1O", MAX_WORD_LEN).unwrap();
        let nieo = Word::new(b"ni\xE9o", MAX_WORD_LEN).unwrap();
        assert_eq!(nino.as_bytes(), b"ni\xF1o");
        assert_ne!(nino, nieo);
        assert_eq!(nino.to_string(), "ni\u{FFFD}o");
    }

    #[test]
    fn test_word_length_limit() {
        let ok = "a".repeat(MAX_WORD_LEN);
        assert!(Word::new(&ok, MAX_WORD_LEN).is_ok());

        let too_long = "a".repeat(MAX_WORD_LEN + 1);
        match Word::new(&too_long, MAX_WORD_LEN) {
            Err(DictError::KeyTooLong { len, max }) => {
                assert_eq!(len, 100);
                assert_eq!(max, 99);
            }
            other => panic!("expected KeyTooLong, got {:?}", other),
        }
    }

    #[test]
    fn test_translation_append_preserves_order() {
        let mut t = Translation::new("gato", MAX_TRANSLATION_LEN).unwrap();
        t.append(&Translation::new("felino", MAX_TRANSLATION_LEN).unwrap(), MAX_TRANSLATION_LEN)
            .unwrap();
        t.append(&Translation::new("gato", MAX_TRANSLATION_LEN).unwrap(), MAX_TRANSLATION_LEN)
            .unwrap();
        assert_eq!(t.to_string_lossy(), "gato;felino;gato");
        assert_eq!(
            t.components().collect::<Vec<_>>(),
            vec![&b"gato"[..], &b"felino"[..], &b"gato"[..]]
        );
    }

    #[test]
    fn test_translation_append_overflow_leaves_value() {
        let mut t = Translation::new("abcd", 8).unwrap();
        let extra = Translation::new("efgh", 8).unwrap();
        assert!(matches!(
            t.append(&extra, 8),
            Err(DictError::ValueTooLong { len: 9, max: 8 })
        ));
        assert_eq!(t.as_bytes(), b"abcd");
    }

    #[test]
    fn test_origin_as_str() {
        assert_eq!(Origin::Load.as_str(), "load");
        assert_eq!(Origin::Interactive.as_str(), "interactive");
    }
}
