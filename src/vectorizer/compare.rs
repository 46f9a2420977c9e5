use std::f64::consts::FRAC_PI_2;

use num::{BigUint, ToPrimitive, Zero};

use super::token::TermCounts;

/// 二乗和
/// Σ(a_i^2) を多倍長整数のまま計算する
#[inline]
pub fn sum_of_squares(counts: &TermCounts) -> BigUint {
    counts
        .values()
        .fold(BigUint::zero(), |acc, count| acc + count * count)
}

/// ユークリッドノルム
/// ||a|| = sqrt(Σ(a_i^2))
///
/// 二乗和は整数で確定させてから f64 に変換する。
#[inline]
pub fn euclidean_norm(counts: &TermCounts) -> f64 {
    to_f64(&sum_of_squares(counts)).sqrt()
}

/// dot積
/// d(a, b) = Σ(a_i * b_i)
///
/// `vec` のキーを走査し `other` はハッシュ引きするので O(|vec|)。
#[inline]
pub fn dot(vec: &TermCounts, other: &TermCounts) -> BigUint {
    vec.iter()
        .filter_map(|(token, count)| other.get(token).map(|o| count * o))
        .fold(BigUint::zero(), |acc, prod| acc + prod)
}

/// コサイン類似度
/// cos(θ) = Σ(a_i * b_i) / (||a|| * ||b||)
///
/// 片方が空なら 0.0、両者が等しければ 1.0。
/// それ以外でノルムが 0 になる場合は NaN になる。
pub fn cosine_similarity(vec: &TermCounts, other: &TermCounts) -> f64 {
    if vec.is_empty() || other.is_empty() {
        return 0.0;
    }
    if vec == other {
        return 1.0;
    }
    cosine_ratio(vec, other)
}

/// 角度距離 (radian)
/// θ = acos(cos(θ))
///
/// `other` が空なら π/2、`vec` と等しければ 0.0。
pub fn angular_distance(vec: &TermCounts, other: &TermCounts) -> f64 {
    if other.is_empty() {
        return FRAC_PI_2;
    }
    if vec == other {
        return 0.0;
    }
    cosine_ratio(vec, other).acos()
}

/// dot / (||a|| * ||b||)
///
/// 分母は sqrt(Σa_i^2 * Σb_i^2) として整数の積から1回だけ sqrt を取る。
/// 分母が 0 なら NaN。それ以外は丸め誤差で ±1 を超えないよう [-1, 1] に収める
/// (比例関係にあるベクトルで 1.0000000000000002 などになり acos が NaN になる)。
#[inline]
fn cosine_ratio(vec: &TermCounts, other: &TermCounts) -> f64 {
    let denominator = to_f64(&(sum_of_squares(vec) * sum_of_squares(other))).sqrt();
    if denominator == 0.0 {
        return f64::NAN;
    }
    (to_f64(&dot(vec, other)) / denominator).clamp(-1.0, 1.0)
}

/// f64 の範囲を超える値は inf
#[inline]
pub(crate) fn to_f64(value: &BigUint) -> f64 {
    value.to_f64().unwrap_or(f64::INFINITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, u64)]) -> TermCounts {
        pairs
            .iter()
            .map(|&(token, n)| (token.to_string(), BigUint::from(n)))
            .collect()
    }

    #[test]
    fn norm_of_empty_is_zero() {
        assert_eq!(euclidean_norm(&TermCounts::new()), 0.0);
    }

    #[test]
    fn norm_three_four_five() {
        let v = counts(&[("a", 3), ("b", 4)]);
        assert_eq!(sum_of_squares(&v), BigUint::from(25u32));
        assert_eq!(euclidean_norm(&v), 5.0);
    }

    #[test]
    fn dot_ignores_unshared_keys() {
        let a = counts(&[("dog", 2), ("cat", 1), ("owl", 7)]);
        let b = counts(&[("dog", 1), ("cat", 2), ("eel", 9)]);
        assert_eq!(dot(&a, &b), BigUint::from(4u32));
        assert_eq!(dot(&b, &a), BigUint::from(4u32));
    }

    #[test]
    fn angle_fast_paths() {
        let a = counts(&[("x", 1)]);
        assert_eq!(angular_distance(&a, &TermCounts::new()), FRAC_PI_2);
        assert_eq!(angular_distance(&a, &a.clone()), 0.0);
        assert_eq!(cosine_similarity(&a, &a.clone()), 1.0);
        assert_eq!(cosine_similarity(&a, &TermCounts::new()), 0.0);
    }

    #[test]
    fn disjoint_vectors_are_orthogonal() {
        let a = counts(&[("x", 3)]);
        let b = counts(&[("y", 5)]);
        assert!((angular_distance(&a, &b) - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn proportional_vectors_are_zero_apart() {
        for n in 1..12u64 {
            let letters: Vec<String> = (0..n).map(|i| char::from(b'a' + i as u8).to_string()).collect();
            let base: TermCounts = letters.iter().map(|l| (l.clone(), BigUint::from(1u32))).collect();
            for k in 2..40u64 {
                let scaled: TermCounts = letters.iter().map(|l| (l.clone(), BigUint::from(k))).collect();
                assert_eq!(angular_distance(&base, &scaled), 0.0, "n={n} k={k}");
                assert_eq!(cosine_similarity(&base, &scaled), 1.0, "n={n} k={k}");
            }
        }
    }

    #[test]
    fn ratio_never_leaves_unit_interval() {
        let a = counts(&[("p", 7), ("q", 13), ("r", 29)]);
        let b = counts(&[("p", 14), ("q", 26), ("r", 58), ("s", 1)]);
        let cos = cosine_ratio(&a, &b);
        assert!((0.0..=1.0).contains(&cos));
        assert!(!angular_distance(&a, &b).is_nan());
    }

    #[test]
    fn degenerate_other_yields_nan() {
        let a = counts(&[("x", 1)]);
        let zero = counts(&[("x", 0)]);
        assert!(angular_distance(&a, &zero).is_nan());
    }

    #[test]
    fn huge_counts_stay_exact_until_conversion() {
        let big = BigUint::from(u64::MAX) * BigUint::from(u64::MAX);
        let mut v = TermCounts::new();
        v.insert("a".to_string(), big.clone());
        assert_eq!(sum_of_squares(&v), &big * &big);
        assert!(euclidean_norm(&v).is_finite());
    }
}
