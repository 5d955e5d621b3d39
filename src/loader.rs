//! 词典加载 - 把 `单词<TAB>译文` 行批量插入哈希表

use std::{
    fs::File,
    io::{self, BufRead, BufReader, Read},
    path::Path,
};

use crate::{
    error::DictError,
    map::{DictMap, InsertKind},
    types::Origin,
};

/// 加载结果汇总
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub lines: u64,
    pub inserted: u64,
    pub merged: u64,
    /// 没有 TAB 的行
    pub skipped: u64,
    /// 单词或译文超长的行（包括读取时即超出整行上限的行）
    pub rejected: u64,
    /// 表满未能放置的行
    pub not_hashed: u64,
}

/// 读取一行的结果
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum LineRead {
    /// 输入结束
    Eof,
    /// 完整的一行（可能不含结尾换行）
    Line,
    /// 超过上限，已丢弃到行尾
    Overlong,
}

/// 读取一行原始字节，最多缓冲 `limit` 字节
///
/// 超过上限的行不会整行读入内存：读满 `limit` 仍未见换行时，其余部分被逐块丢弃。
pub(crate) fn read_bounded_line<R: BufRead>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    limit: usize,
) -> io::Result<LineRead> {
    buf.clear();
    let read = reader.by_ref().take(limit as u64).read_until(b'\n', buf)?;
    if read == 0 {
        return Ok(LineRead::Eof);
    }
    if buf.len() < limit || buf.last() == Some(&b'\n') {
        return Ok(LineRead::Line);
    }

    loop {
        let (found, used) = {
            let available = reader.fill_buf()?;
            if available.is_empty() {
                break;
            }
            match available.iter().position(|&b| b == b'\n') {
                Some(pos) => (true, pos + 1),
                None => (false, available.len()),
            }
        };
        reader.consume(used);
        if found {
            break;
        }
    }
    buf.clear();
    Ok(LineRead::Overlong)
}

/// 拆分一行为 (单词, 译文)
///
/// 去掉行尾换行（以及其前的 `\r`），按第一个 TAB 切分；没有 TAB 返回 `None`。
pub fn parse_line(line: &[u8]) -> Option<(&[u8], &[u8])> {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    let tab = line.iter().position(|&b| b == b'\t')?;
    Some((&line[..tab], &line[tab + 1..]))
}

/// 从任意 `BufRead` 加载词典
///
/// 单词与译文按原始字节插入，不做编码转换。超长行和表满行被跳过并计数，只有读取错误会中止加载。
pub fn load_dictionary<R: BufRead>(map: &mut DictMap, mut reader: R) -> Result<LoadReport, DictError> {
    let mut report = LoadReport::default();
    let mut buf = Vec::new();
    // 单词 + TAB + 译文 + CRLF
    let limit = map.config().max_word_len + map.config().max_translation_len + 3;

    loop {
        match read_bounded_line(&mut reader, &mut buf, limit)? {
            LineRead::Eof => break,
            LineRead::Overlong => {
                report.lines += 1;
                log_warn!("line {} rejected: longer than {} bytes", report.lines, limit);
                report.rejected += 1;
                continue;
            }
            LineRead::Line => report.lines += 1,
        }

        let Some((word, translation)) = parse_line(&buf) else {
            report.skipped += 1;
            continue;
        };

        match map.insert(word, translation, Origin::Load) {
            Ok(outcome) => match outcome.kind {
                InsertKind::Placed => report.inserted += 1,
                InsertKind::Merged => report.merged += 1,
            },
            Err(err) if err.is_input_violation() => {
                log_warn!("line {} rejected: {}", report.lines, err);
                report.rejected += 1;
            }
            Err(err @ DictError::TableFull { .. }) => {
                log_warn!("line {} not hashed: {}", report.lines, err);
                report.not_hashed += 1;
            }
            Err(err) => return Err(err),
        }
    }

    log_info!(
        "loaded {} lines: {} inserted, {} merged, {} skipped, {} rejected, {} not hashed",
        report.lines,
        report.inserted,
        report.merged,
        report.skipped,
        report.rejected,
        report.not_hashed
    );
    Ok(report)
}

/// 打开文件并加载；打开失败返回 `SourceUnavailable`
pub fn load_file<P: AsRef<Path>>(map: &mut DictMap, path: P) -> Result<LoadReport, DictError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DictError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    log_debug!("loading dictionary from {}", path.display());
    load_dictionary(map, BufReader::new(file))
}
