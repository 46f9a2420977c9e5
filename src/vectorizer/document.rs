use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use num::{BigUint, Zero};
use tracing::{debug, warn};

use crate::{
    error::{Result, SourceError},
    utils::latin1::Latin1Lines,
    vectorizer::{
        compare,
        token::{TermCounts, TokenFrequency},
    },
};

/// DocumentVector
/// 1つの入力ソースから作られる bag-of-words 頻度ベクトル
///
/// 構築時に入力を読み切り、以後は読み取り専用。
/// 内部状態は全て所有データなのでスレッド間で共有して問い合わせできる。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentVector {
    counts: TermCounts,
    line_count: usize,
    total_token_count: BigUint,
}

/// 構築
impl DocumentVector {
    /// 空のベクトル
    /// 入力が無い場合はこれ
    pub fn new() -> Self {
        Self::default()
    }

    /// 文字列から構築する
    /// `None` は空のベクトルになる。line_count は常に 0
    pub fn from_text<'a>(text: impl Into<Option<&'a str>>) -> Self {
        let mut freq = TokenFrequency::new();
        if let Some(text) = text.into() {
            freq.add_text(text);
        }
        Self::from_frequency(freq, 0)
    }

    /// 行単位のバイト列から構築する
    ///
    /// 1byte = 1文字 (ISO-8859-1) としてデコードし、行ごとに tokenize する。
    /// 途中で読み込みに失敗した場合は warn を出し、それまでの結果を返す。
    pub fn from_reader<R: Read>(reader: R) -> Self {
        let mut freq = TokenFrequency::new();
        let line_count = match read_lines(reader, &mut freq) {
            Ok(lines) => lines,
            Err(e) => {
                warn!("{e}");
                match e {
                    SourceError::Read { lines, .. } => lines,
                    SourceError::Unavailable { .. } => 0,
                }
            }
        };
        Self::from_frequency(freq, line_count)
    }

    /// ファイルから構築する
    ///
    /// 開けない場合は warn を出して空のベクトルを返す。呼び出し側にはエラーを返さない。
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let file = match open(path) {
            Ok(file) => file,
            Err(e) => {
                warn!("{e}");
                return Self::new();
            }
        };
        Self::from_reader(file)
    }

    /// `from_reader` と同じだが、読み込みエラーを返す
    pub fn try_from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut freq = TokenFrequency::new();
        let line_count = read_lines(reader, &mut freq)?;
        Ok(Self::from_frequency(freq, line_count))
    }

    /// `from_path` と同じだが、開けない場合や読み込みエラーを返す
    pub fn try_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = open(path.as_ref())?;
        Self::try_from_reader(file)
    }

    fn from_frequency(freq: TokenFrequency, line_count: usize) -> Self {
        let (counts, total_token_count) = freq.into_counts();
        debug!(
            lines = line_count,
            total = %total_token_count,
            distinct = counts.len(),
            "built document vector"
        );
        Self {
            counts,
            line_count,
            total_token_count,
        }
    }
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| SourceError::Unavailable {
        path: path.to_path_buf(),
        source,
    })
}

/// 読んだ行数を返す
/// reader はここで drop される
fn read_lines<R: Read>(reader: R, freq: &mut TokenFrequency) -> Result<usize> {
    let mut lines = 0;
    for line in Latin1Lines::new(BufReader::new(reader)) {
        let line = line.map_err(|source| SourceError::Read { lines, source })?;
        lines += 1;
        freq.add_text(&line);
    }
    Ok(lines)
}

impl From<&str> for DocumentVector {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl From<String> for DocumentVector {
    fn from(text: String) -> Self {
        Self::from_text(text.as_str())
    }
}

/// 統計情報
impl DocumentVector {
    /// 読み込んだ行数
    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// 重複を含む token の総数
    #[inline]
    pub fn total_token_count(&self) -> BigUint {
        self.total_token_count.clone()
    }

    /// token の種類数
    #[inline]
    pub fn distinct_token_count(&self) -> usize {
        self.counts.len()
    }

    /// ある token の出現回数
    pub fn token_count(&self, token: &str) -> BigUint {
        self.counts.get(token).cloned().unwrap_or_else(BigUint::zero)
    }

    #[inline]
    pub fn contains_token(&self, token: &str) -> bool {
        self.counts.contains_key(token)
    }

    /// 内部の頻度表への読み取り専用参照
    #[inline]
    pub fn counts(&self) -> &TermCounts {
        &self.counts
    }

    /// 頻度表のコピー
    /// 返した値を変更しても内部状態には影響しない
    pub fn expose_mapping(&self) -> TermCounts {
        self.counts.clone()
    }
}

/// ベクトル演算
impl DocumentVector {
    /// ユークリッドノルム
    /// 空なら 0.0
    pub fn euclidean_norm(&self) -> f64 {
        compare::euclidean_norm(&self.counts)
    }

    /// dot積
    ///
    /// 自分のキーのうち `other` にも存在するものだけ掛け合わせる。
    /// `other` が `None` か空なら 0.0。
    pub fn dot_product<'a>(&self, other: impl Into<Option<&'a TermCounts>>) -> f64 {
        match other.into() {
            Some(other) if !other.is_empty() => compare::to_f64(&compare::dot(&self.counts, other)),
            _ => 0.0,
        }
    }

    /// 角度距離 (radian)
    ///
    /// - `other` が `None` か空: π/2
    /// - `other` が自分の頻度表と等しい: 0.0
    /// - それ以外: acos(dot / (||self|| * ||other||))
    ///
    /// `other` のノルムは独立に計算する。分母が 0 になる入力
    /// (空の自分と非空の `other`、カウント 0 だけの手製の表など) は NaN を返すので
    /// 呼び出し側で確認すること。
    pub fn angular_distance<'a>(&self, other: impl Into<Option<&'a TermCounts>>) -> f64 {
        match other.into() {
            Some(other) => compare::angular_distance(&self.counts, other),
            None => std::f64::consts::FRAC_PI_2,
        }
    }

    /// 別の `DocumentVector` との角度距離
    pub fn angular_distance_to(&self, other: &DocumentVector) -> f64 {
        self.angular_distance(&other.counts)
    }

    /// コサイン類似度
    /// 空なら 0.0、等しければ 1.0
    pub fn cosine_similarity(&self, other: &DocumentVector) -> f64 {
        compare::cosine_similarity(&self.counts, &other.counts)
    }
}
