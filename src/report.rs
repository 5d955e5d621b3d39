//! 统计报表 - 把统计快照渲染成文本

use std::io::{self, Write};

use crate::stats::StatsSnapshot;

const ROW_SEPARATOR: &str = "-------------";

/// 写出加载阶段报表与探测次数直方图
pub fn write_load_report<W: Write>(out: &mut W, snapshot: &StatsSnapshot) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Hash Table")?;
    writeln!(
        out,
        "  average number of probes:               {:.2}",
        snapshot.avg_load_probes
    )?;
    writeln!(
        out,
        "  max_run of probes:                      {}",
        snapshot.max_probes
    )?;
    writeln!(
        out,
        "  total PROBES (for {} items) :     {}",
        snapshot.item_count, snapshot.total_probes
    )?;
    writeln!(
        out,
        "  items NOT hashed (out of {}):         {}",
        snapshot.item_count + snapshot.not_hashed,
        snapshot.not_hashed
    )?;
    writeln!(out)?;

    writeln!(out, "Probes|Count of keys")?;
    writeln!(out, "{}", ROW_SEPARATOR)?;
    for (probes, count) in snapshot.histogram.rows() {
        writeln!(out, "{:6}|{:6}", probes, count)?;
        writeln!(out, "{}", ROW_SEPARATOR)?;
    }
    Ok(())
}

/// 写出交互阶段的平均探测次数
pub fn write_session_report<W: Write>(out: &mut W, snapshot: &StatsSnapshot) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Average probes per operation:     {:.2}",
        snapshot.avg_interactive_probes
    )
}

/// 加载报表的字符串形式
pub fn render_load_report(snapshot: &StatsSnapshot) -> String {
    let mut buf = Vec::new();
    // 写入 Vec 不会失败
    let _ = write_load_report(&mut buf, snapshot);
    String::from_utf8_lossy(&buf).into_owned()
}
