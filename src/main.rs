use std::{env, path::PathBuf, time::Instant};

use anyhow::{bail, Result};
use doc_similarity::DocumentVector;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "DOC_SIMILARITY_LOG";

/// 比較対象の指定方法
enum Source {
    File(PathBuf),
    Text(String),
}

impl Source {
    fn label(&self) -> String {
        match self {
            Source::File(path) => path.display().to_string(),
            Source::Text(text) => format!("{text:?}"),
        }
    }

    fn load(&self) -> DocumentVector {
        match self {
            Source::File(path) => DocumentVector::from_path(path),
            Source::Text(text) => DocumentVector::from_text(text.as_str()),
        }
    }
}

struct Config {
    left: Source,
    right: Source,
    degrees: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_args() -> Result<Option<Config>> {
    // ---- 簡易 CLI 引数処理 ----
    // --text     : 位置引数をファイルパスではなく文字列として扱う
    // --degrees  : 角度を度数で出力
    let mut args = env::args().skip(1);
    let mut as_text = false;
    let mut degrees = false;
    let mut positional = Vec::new();
    while let Some(a) = args.next() {
        match a.as_str() {
            "--text" => as_text = true,
            "--degrees" => degrees = true,
            "-h" | "--help" => {
                print_usage();
                return Ok(None);
            }
            other if other.starts_with("--") => bail!("unknown option: {other}"),
            other => positional.push(other.to_string()),
        }
    }
    if positional.len() != 2 {
        print_usage();
        bail!("expected 2 sources, got {}", positional.len());
    }
    let mut sources = positional.into_iter().map(|s| {
        if as_text { Source::Text(s) } else { Source::File(PathBuf::from(s)) }
    });
    // len は上で確認済み
    let (Some(left), Some(right)) = (sources.next(), sources.next()) else {
        bail!("expected 2 sources");
    };
    Ok(Some(Config { left, right, degrees }))
}

fn print_usage() {
    eprintln!("Usage: doc-similarity [--text] [--degrees] <A> <B>");
    eprintln!("A and B are file paths, or literal strings with --text.");
    eprintln!("Log level is read from {LOG_ENV} (default: warn).");
}

fn report(name: &str, source: &Source, doc: &DocumentVector) {
    println!("{name}: {}", source.label());
    println!("  lines:          {}", doc.line_count());
    println!("  words:          {}", doc.total_token_count());
    println!("  distinct words: {}", doc.distinct_token_count());
    println!("  euclidean norm: {:.6}", doc.euclidean_norm());
}

fn main() -> Result<()> {
    init_logging();
    let Some(config) = parse_args()? else {
        return Ok(());
    };

    let start = Instant::now();
    let left = config.left.load();
    let right = config.right.load();
    report("A", &config.left, &left);
    report("B", &config.right, &right);

    let distance = left.angular_distance(right.counts());
    if distance.is_nan() {
        warn!("a side has zero norm, distance is undefined");
    }
    println!("dot product:      {}", left.dot_product(right.counts()));
    if config.degrees {
        println!("distance:         {:.6} deg", distance.to_degrees());
    } else {
        println!("distance:         {:.6} rad", distance);
    }
    info!(elapsed_ms = start.elapsed().as_secs_f64() * 1000.0, "comparison done");
    Ok(())
}
