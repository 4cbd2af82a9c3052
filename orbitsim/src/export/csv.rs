//! CSV export of recorded runs
//!
//! Rows are written in the order they were recorded; nothing is sorted.

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::analysis::resonance::RunningRatio;
use crate::simulation::sampler::TrajectorySample;

/// `step,time_s,<name>_x,<name>_y,<name>_vx,<name>_vy,...` for every body in system order
///
/// Column names are quoted when a body name holds a comma, quote or line break.
pub fn trajectory_header(names: &[String]) -> String {
    let mut header = String::from("step,time_s");
    for name in names {
        for suffix in ["x", "y", "vx", "vy"] {
            header.push(',');
            header.push_str(&quote_field(&format!("{}_{}", name, suffix)));
        }
    }
    header
}

/// RFC 4180 field quoting: wrap in quotes and double inner quotes when needed
pub fn quote_field(field: &str) -> Cow<'_, str> {
    if field.contains(|c: char| matches!(c, ',' | '"' | '\n' | '\r')) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

pub fn write_trajectory<W: Write>(mut w: W, names: &[String], samples: &[TrajectorySample]) -> io::Result<()> {
    writeln!(w, "{}", trajectory_header(names))?;
    for s in samples {
        write!(w, "{},{}", s.step, s.time_s)?;
        for (x, v) in s.positions.iter().zip(s.velocities.iter()) {
            write!(w, ",{},{},{},{}", x.x, x.y, v.x, v.y)?;
        }
        writeln!(w)?;
    }
    w.flush()
}

/// `sample_index,time_s,revolutions_a,revolutions_b,ratio`; the ratio cell is
/// empty while undefined
pub fn write_ratio_history<W: Write>(mut w: W, history: &[RunningRatio], sample_interval: f64) -> io::Result<()> {
    writeln!(w, "sample_index,time_s,revolutions_a,revolutions_b,ratio")?;
    for r in history {
        let ratio = r.ratio.map(|x| x.to_string()).unwrap_or_default();
        writeln!(
            w,
            "{},{},{},{},{}",
            r.sample_index,
            r.sample_index as f64 * sample_interval,
            r.revolutions_a,
            r.revolutions_b,
            ratio
        )?;
    }
    w.flush()
}

pub fn save_trajectory(path: &Path, names: &[String], samples: &[TrajectorySample]) -> io::Result<()> {
    create_parent(path)?;
    write_trajectory(BufWriter::new(File::create(path)?), names, samples)
}

pub fn save_ratio_history(path: &Path, history: &[RunningRatio], sample_interval: f64) -> io::Result<()> {
    create_parent(path)?;
    write_ratio_history(BufWriter::new(File::create(path)?), history, sample_interval)
}

fn create_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
