//! 翻訳規則
//!
//! このモジュールは、原言語側パターンから目的言語側パターンへの翻訳規則を定義します。

use std::fmt;

use crate::feature_vector::FeatureVector;
use crate::ff::ScoringModel;

/// 翻訳規則
///
/// 原言語側パターンの終端記号は0以上、非終端記号は負の記号IDで表されます。
/// 目的言語側パターンでは、非終端記号は原言語側の何番目（1始まり）の非終端記号に
/// 対応するかを `-k` で表します。
///
/// 規則の内容は構築後に変更されません。推定コストだけは最初のソート時に一度計算され、
/// 以後は同じ値が使われます。
#[derive(Debug, Clone)]
pub struct Rule {
    lhs: i32,
    source: Vec<i32>,
    target: Vec<i32>,
    features: FeatureVector,
    arity: usize,
    owner: i32,
    alignment: Option<String>,
    oov: bool,
    estimated_cost: Option<f32>,
}

impl Rule {
    /// 新しい規則を作成します。
    ///
    /// 項数は原言語側パターンの非終端記号の数から求められます。
    ///
    /// # 引数
    ///
    /// * `lhs` - 左辺の非終端記号ID
    /// * `source` - 原言語側パターン
    /// * `target` - 目的言語側パターン
    /// * `features` - 規則の素性
    /// * `owner` - 素性に適用される重みの所有者ID
    pub fn new(
        lhs: i32,
        source: Vec<i32>,
        target: Vec<i32>,
        features: FeatureVector,
        owner: i32,
    ) -> Self {
        let arity = source.iter().filter(|&&sym| sym < 0).count();
        debug_assert_eq!(arity, target.iter().filter(|&&sym| sym < 0).count());
        Self {
            lhs,
            source,
            target,
            features,
            arity,
            owner,
            alignment: None,
            oov: false,
            estimated_cost: None,
        }
    }

    /// 単語アラインメント（`"0-0 1-2"` 形式）を設定します。
    pub fn with_alignment<S>(mut self, alignment: S) -> Self
    where
        S: Into<String>,
    {
        self.alignment = Some(alignment.into());
        self
    }

    /// OOV規則として印を付けます。
    pub fn into_oov(mut self) -> Self {
        self.oov = true;
        self
    }

    #[inline(always)]
    pub const fn lhs(&self) -> i32 {
        self.lhs
    }

    /// 原言語側パターン
    #[inline(always)]
    pub fn source(&self) -> &[i32] {
        &self.source
    }

    /// 目的言語側パターン
    #[inline(always)]
    pub fn target(&self) -> &[i32] {
        &self.target
    }

    #[inline(always)]
    pub const fn features(&self) -> &FeatureVector {
        &self.features
    }

    /// 非終端記号の数
    #[inline(always)]
    pub const fn arity(&self) -> usize {
        self.arity
    }

    #[inline(always)]
    pub const fn owner(&self) -> i32 {
        self.owner
    }

    pub fn alignment(&self) -> Option<&str> {
        self.alignment.as_deref()
    }

    /// OOV規則の合成で作られた規則かどうかを返します。
    #[inline(always)]
    pub const fn is_oov(&self) -> bool {
        self.oov
    }

    /// 目的言語側の終端記号の数を返します。
    #[inline(always)]
    pub fn num_target_words(&self) -> usize {
        self.target.len().saturating_sub(self.arity)
    }

    /// 計算済みの推定コストを返します。未計算の場合は`None`です。
    #[inline(always)]
    pub const fn estimated_cost(&self) -> Option<f32> {
        self.estimated_cost
    }

    /// 推定コストを計算して保持します。
    ///
    /// すでに計算済みの場合は保持している値をそのまま返します。
    ///
    /// # 引数
    ///
    /// * `model` - 素性関数と重み
    ///
    /// # 戻り値
    ///
    /// 推定コスト（小さいほど良い）
    pub fn estimate_cost(&mut self, model: &ScoringModel) -> f32 {
        match self.estimated_cost {
            Some(cost) => cost,
            None => {
                let cost = model.estimate_cost(self);
                self.estimated_cost = Some(cost);
                cost
            }
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ||| {:?} ||| {:?} ||| {} ||| ",
            self.lhs, self.source, self.target, self.features
        )?;
        match self.estimated_cost {
            Some(cost) => write!(f, "{cost}"),
            None => f.write_str("-"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::feature_vector::Weights;
    use crate::ff::{FeatureFunction, WordPenalty};

    #[test]
    fn test_arity() {
        let rule = Rule::new(-1, vec![-1, 5, -1], vec![-2, 6, -1], FeatureVector::new(), 0);
        assert_eq!(rule.arity(), 2);
        assert_eq!(rule.num_target_words(), 1);
        assert!(!rule.is_oov());
        assert_eq!(rule.estimated_cost(), None);
    }

    #[test]
    fn test_estimate_cost_is_cached() {
        let mut rule = Rule::new(-1, vec![5], vec![6, 7], FeatureVector::new(), 0);
        let model = ScoringModel::new(
            vec![FeatureFunction::stateless(WordPenalty::new())],
            Weights::new().with("WordPenalty", 1.0),
        );
        let cost = rule.estimate_cost(&model);
        assert_eq!(rule.estimated_cost(), Some(cost));

        let other = ScoringModel::new(vec![], Weights::new());
        assert_eq!(rule.estimate_cost(&other), cost);
    }

    #[test]
    fn test_display() {
        let rule = Rule::new(-1, vec![5], vec![6], "a=1".parse().unwrap(), 0);
        assert_eq!(rule.to_string(), "-1 ||| [5] ||| [6] ||| a=1 ||| -");
    }
}
