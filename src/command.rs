//! 交互命令 - 解析 `s`/`d`/`i`/`q` 行并驱动哈希表

use std::io::{BufRead, Write};

use crate::{
    error::DictError,
    loader::{read_bounded_line, LineRead},
    map::DictMap,
    types::Origin,
};

const INDENT: &str = "        ";

/// 命令行中单词与译文之外的字节（动作、空白、换行）上限
const COMMAND_SLACK: usize = 64;

/// 命令动作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search,
    Delete,
    /// 插入，携带译文
    Insert(Vec<u8>),
    /// 无法识别或参数个数不对：只回显，不执行
    Unknown,
}

/// 一条交互请求，各字段保留原始字节
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub op: Vec<u8>,
    /// 已做 ASCII 小写化的单词
    pub word: Vec<u8>,
    pub command: Command,
}

/// 一行输入的解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Quit,
    Request(Request),
}

/// 解析一行命令
///
/// 以首个 token 的首字符判断动作；`i` 需要恰好 3 个 token。
/// 空行以及除 `q` 外只有一个 token 的行返回 `None`。
pub fn parse_line(line: &[u8]) -> Option<Line> {
    let tokens: Vec<&[u8]> = line
        .split(|b| b.is_ascii_whitespace())
        .filter(|token| !token.is_empty())
        .collect();
    let op = *tokens.first()?;
    if op.starts_with(b"q") {
        return Some(Line::Quit);
    }
    let word = tokens.get(1)?.to_ascii_lowercase();

    let command = match op.first() {
        Some(b's') => Command::Search,
        Some(b'd') => Command::Delete,
        Some(b'i') if tokens.len() == 3 => Command::Insert(tokens[2].to_vec()),
        _ => Command::Unknown,
    };

    Some(Line::Request(Request {
        op: op.to_vec(),
        word,
        command,
    }))
}

/// 交互命令处理器，输出写入 `out`
///
/// 单词与译文按原始字节回显。
pub struct CommandProcessor<W: Write> {
    out: W,
}

impl<W: Write> CommandProcessor<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// 逐行执行直到 `q` 或输入结束，返回执行的请求数
    pub fn run<R: BufRead>(&mut self, map: &mut DictMap, mut input: R) -> Result<usize, DictError> {
        let mut executed = 0;
        let mut buf = Vec::new();
        let limit = map.config().max_word_len + map.config().max_translation_len + COMMAND_SLACK;

        loop {
            match read_bounded_line(&mut input, &mut buf, limit)? {
                LineRead::Eof => break,
                LineRead::Overlong => {
                    log_warn!("command line longer than {} bytes ignored", limit);
                    continue;
                }
                LineRead::Line => {}
            }
            match parse_line(&buf) {
                Some(Line::Quit) => break,
                Some(Line::Request(request)) => {
                    self.execute(map, &request)?;
                    executed += 1;
                }
                None => {}
            }
        }

        self.out.flush()?;
        Ok(executed)
    }

    /// 执行单条请求
    pub fn execute(&mut self, map: &mut DictMap, request: &Request) -> Result<(), DictError> {
        self.out.write_all(b"READ op:")?;
        self.out.write_all(&request.op)?;
        self.out.write_all(b" query:")?;
        self.out.write_all(&request.word)?;
        self.out.write_all(b"\n")?;

        match &request.command {
            Command::Search => match map.search(&request.word) {
                Ok(outcome) => {
                    writeln!(self.out, "{}{} probes", INDENT, outcome.probes)?;
                    match outcome.entry {
                        Some(entry) => {
                            write!(self.out, "{}Translation: ", INDENT)?;
                            self.out.write_all(entry.value().as_bytes())?;
                            writeln!(self.out)?;
                        }
                        None => writeln!(self.out, "{}NOT found", INDENT)?,
                    }
                }
                Err(err) if err.is_input_violation() => {
                    writeln!(self.out, "{}Key too long => not searched.", INDENT)?;
                }
                Err(err) => return Err(err),
            },
            Command::Delete => match map.delete(&request.word) {
                Ok(outcome) => {
                    writeln!(self.out, "{}{} probes", INDENT, outcome.probes)?;
                    if outcome.deleted {
                        writeln!(self.out, "{}Item was deleted.", INDENT)?;
                    } else {
                        writeln!(self.out, "{}Item not found => no deletion.", INDENT)?;
                    }
                }
                Err(err) if err.is_input_violation() => {
                    writeln!(self.out, "{}Key too long => no deletion.", INDENT)?;
                }
                Err(err) => return Err(err),
            },
            Command::Insert(translation) => {
                write!(self.out, "{}Will insert pair [", INDENT)?;
                self.out.write_all(&request.word)?;
                self.out.write_all(b",")?;
                self.out.write_all(translation)?;
                self.out.write_all(b"]\n")?;
                match map.insert(&request.word, translation, Origin::Interactive) {
                    Ok(outcome) => writeln!(self.out, "{}{} probes", INDENT, outcome.probes)?,
                    Err(DictError::TableFull { probes, .. }) => {
                        writeln!(self.out, "{}{} probes", INDENT, probes)?;
                        writeln!(self.out, "{}Table full => not inserted.", INDENT)?;
                    }
                    Err(DictError::KeyTooLong { .. }) => {
                        writeln!(self.out, "{}Key too long => not inserted.", INDENT)?;
                    }
                    Err(DictError::ValueTooLong { .. }) => {
                        writeln!(self.out, "{}Value too long => not inserted.", INDENT)?;
                    }
                    Err(err) => return Err(err),
                }
            }
            Command::Unknown => {}
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
