use std::sync::LazyLock;

use indexmap::IndexMap;
use num::{BigUint, One, Zero};
use regex::Regex;

/// token -> 出現回数
/// IndexMap の等価比較は挿入順に依存しない
pub type TermCounts = IndexMap<String, BigUint>;

/// 非単語文字 (ASCII英数字とアンダースコア以外) の連続
static NON_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^A-Za-z0-9_]+").expect("static pattern")
});

/// Tokenizer
/// 非単語文字で分割し、小文字化して `[a-z]+` に一致する断片だけを token とする
///
/// 数字やアンダースコアを含む断片は部分的に残さず丸ごと捨てる。
pub struct Tokenizer;

impl Tokenizer {
    /// text から受理された token を順に返す
    pub fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
        NON_WORD
            .split(text)
            .map(str::to_lowercase)
            .filter(|fragment| Self::is_token(fragment))
    }

    /// 小文字化済みの断片が token として受理されるか
    #[inline]
    pub fn is_token(fragment: &str) -> bool {
        !fragment.is_empty() && fragment.bytes().all(|b| b.is_ascii_lowercase())
    }
}

/// TokenFrequency 構造体
/// token の出現回数を多倍長整数で数える
///
/// `DocumentVector` の構築中だけ使われ、`into_counts` で確定する。
///
/// # Examples
/// ```
/// use doc_similarity::TokenFrequency;
/// let mut token_freq = TokenFrequency::new();
/// token_freq.add_text("Rust, rust and RUST");
/// assert_eq!(token_freq.token_num(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TokenFrequency {
    token_count: TermCounts,
    total_token_count: BigUint,
}

impl TokenFrequency {
    pub fn new() -> Self {
        TokenFrequency {
            token_count: IndexMap::new(),
            total_token_count: BigUint::zero(),
        }
    }

    /// token を追加する
    /// 正規化は呼び出し側の責任
    #[inline]
    pub fn add_token(&mut self, token: &str) -> &mut Self {
        match self.token_count.get_mut(token) {
            Some(count) => *count += 1u32,
            None => {
                self.token_count.insert(token.to_string(), BigUint::one());
            }
        }
        self.total_token_count += 1u32;
        self
    }

    /// token を n 回分追加する
    #[inline]
    pub fn add_token_n(&mut self, token: &str, n: impl Into<BigUint>) -> &mut Self {
        let n = n.into();
        if n.is_zero() {
            return self;
        }
        self.total_token_count += &n;
        *self.token_count.entry(token.to_string()).or_insert_with(BigUint::zero) += n;
        self
    }

    /// 複数の token を追加する
    #[inline]
    pub fn add_tokens<T>(&mut self, tokens: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for token in tokens {
            self.add_token(token.as_ref());
        }
        self
    }

    /// text を tokenize して追加する
    pub fn add_text(&mut self, text: &str) -> &mut Self {
        for token in Tokenizer::tokens(text) {
            self.add_token(&token);
        }
        self
    }

    /// 全 token のカウントの合計
    #[inline]
    pub fn total_token_count(&self) -> &BigUint {
        &self.total_token_count
    }

    /// 出現した token の種類数
    #[inline]
    pub fn token_num(&self) -> usize {
        self.token_count.len()
    }

    pub fn into_counts(self) -> (TermCounts, BigUint) {
        (self.token_count, self.total_token_count)
    }
}
