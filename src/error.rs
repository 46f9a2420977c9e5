use std::{io, path::PathBuf};

/// 入力ソースの読み込みに関するエラー
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// ソースが見つからない、もしくは開けない
    #[error("cannot open source {}: {source}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// 開いた後の読み込み失敗
    #[error("read failed after {lines} lines: {source}")]
    Read {
        lines: usize,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SourceError>;
