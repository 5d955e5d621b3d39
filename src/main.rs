// 词典查询程序 - 加载词典文件，打印探测统计，然后处理交互命令
//
// 用法:
//   cargo run -- [FILE] [--capacity 20011] [--hash multiplicative|ahash|xxhash]

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use double_hash_dict::{
    load_file, log_debug, log_error, log_info, write_load_report, write_session_report,
    CommandProcessor, DictError, DictMap, DictMapConfig, HashAlgorithm, DEFAULT_CAPACITY,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum HashArg {
    Multiplicative,
    Ahash,
    Xxhash,
}

impl From<HashArg> for HashAlgorithm {
    fn from(arg: HashArg) -> Self {
        match arg {
            HashArg::Multiplicative => HashAlgorithm::Multiplicative,
            HashArg::Ahash => HashAlgorithm::AHash,
            HashArg::Xxhash => HashAlgorithm::XxHash,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "double-hash-dict")]
#[command(about = "双哈希词典索引：加载词典并统计探测次数", long_about = None)]
struct Args {
    /// 词典文件（每行 `单词<TAB>译文`），省略时从标准输入读取文件名
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// 哈希表容量（必须为素数）
    #[arg(short, long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,

    /// 哈希算法
    #[arg(long, value_enum, default_value = "multiplicative")]
    hash: HashArg,
}

fn main() -> ExitCode {
    #[cfg(feature = "logging")]
    env_logger::init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log_error!("{}", err);
            match err {
                DictError::SourceUnavailable { .. } => println!("Failed to open file."),
                other => {
                    eprintln!("error: {}", other);
                    if let Some(hint) = other.recovery_suggestion() {
                        eprintln!("hint: {}", hint);
                    }
                }
            }
            ExitCode::from(1)
        }
    }
}

fn run(args: Args) -> Result<(), DictError> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let path = match args.file {
        Some(path) => path,
        None => prompt_for_filename(&mut input, &mut out)?,
    };

    let config = DictMapConfig {
        capacity: args.capacity,
        hash_algorithm: args.hash.into(),
        ..DictMapConfig::default()
    };
    let mut map = DictMap::new(config)?;

    let report = load_file(&mut map, &path)?;
    log_info!("{} loaded: {:?}", path.display(), report);

    write_load_report(&mut out, &map.stats())?;
    writeln!(out)?;
    writeln!(out, "Enter words to look-up. Enter q to stop.")?;

    {
        let mut processor = CommandProcessor::new(&mut out);
        processor.run(&mut map, &mut input)?;
    }

    write_session_report(&mut out, &map.stats())?;
    out.flush()?;
    log_debug!("final metrics:\n{}", map.export_prometheus());
    Ok(())
}

/// 提示并读取文件名（取第一段非空白文本）
fn prompt_for_filename<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<PathBuf> {
    writeln!(
        out,
        "Enter the filename with the dictionary data (include the extension e.g. Spanish.txt):"
    )?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(PathBuf::from(line.split_whitespace().next().unwrap_or("")))
}
