//! 素性関数
//!
//! このモジュールは、規則の適用を採点する素性関数の共通インターフェースと、
//! いくつかの具体的な素性を提供します。
//!
//! 素性関数は状態を持たないもの（[`StatelessFeature`]）と、導出の境界情報を
//! 状態として返すもの（[`StatefulFeature`]）の2種類に分かれ、[`FeatureFunction`]で
//! まとめて扱います。各素性は名前付きの値を[`Accumulator`]に加算するだけで、
//! 重み付けは累積器の側で行われます。

mod accumulator;
mod model;
mod oov_penalty;
mod phrase_model;
mod target_bigram;
mod word_penalty;

use std::fmt;

use crate::grammar::Rule;
use crate::hypergraph::{DpState, HgNode, Span};
use crate::lattice::SourcePath;

pub use crate::ff::accumulator::{Accumulator, FeatureAccumulator, ScoreAccumulator};
pub use crate::ff::model::ScoringModel;
pub use crate::ff::oov_penalty::OovPenalty;
pub use crate::ff::phrase_model::PhraseModel;
pub use crate::ff::target_bigram::TargetBigram;
pub use crate::ff::word_penalty::WordPenalty;

/// 特定の文に属さない採点（ソート時の推定など）で使う文ID
pub const NO_SENTENCE_ID: usize = usize::MAX;

/// 状態を持たない素性関数
pub trait StatelessFeature: Send + Sync {
    /// 素性の名前を返します。
    fn name(&self) -> &str;

    /// 規則の適用1回分の値を累積器に加算します。
    ///
    /// `rule`が`None`の場合（ゴールへの辺など、規則を伴わない辺）は何も加算しません。
    ///
    /// # 引数
    ///
    /// * `rule` - 適用された規則
    /// * `tail_nodes` - 解決済みの子ノード
    /// * `span` - 規則が覆う入力区間
    /// * `source_path` - 入力ラティス上の経路情報
    /// * `sentence_id` - 文ID
    /// * `acc` - 値を加算する累積器
    fn compute(
        &self,
        rule: Option<&Rule>,
        tail_nodes: &[HgNode],
        span: Span,
        source_path: &SourcePath,
        sentence_id: usize,
        acc: &mut dyn Accumulator,
    );

    /// 文脈なしで規則だけから値を見積もり、累積器に加算します。
    fn estimate(&self, rule: &Rule, sentence_id: usize, acc: &mut dyn Accumulator) {
        self.compute(
            Some(rule),
            &[],
            Span::default(),
            &SourcePath::default(),
            sentence_id,
            acc,
        );
    }
}

/// 導出の状態を返す素性関数
pub trait StatefulFeature: Send + Sync {
    /// 素性の名前を返します。
    fn name(&self) -> &str;

    /// [`HgNode`]上でこの素性の状態が格納される位置を返します。
    fn state_index(&self) -> usize;

    /// 規則の適用1回分の値を累積器に加算し、新しい導出の状態を返します。
    ///
    /// 引数は[`StatelessFeature::compute()`]と同じです。
    fn compute(
        &self,
        rule: Option<&Rule>,
        tail_nodes: &[HgNode],
        span: Span,
        source_path: &SourcePath,
        sentence_id: usize,
        acc: &mut dyn Accumulator,
    ) -> DpState;

    /// 文脈なしで規則だけから値を見積もり、累積器に加算します。
    fn estimate(&self, rule: &Rule, sentence_id: usize, acc: &mut dyn Accumulator) {
        self.compute(
            Some(rule),
            &[],
            Span::default(),
            &SourcePath::default(),
            sentence_id,
            acc,
        );
    }
}

/// 素性関数のラッパー列挙型
pub enum FeatureFunction {
    Stateless(Box<dyn StatelessFeature>),
    Stateful(Box<dyn StatefulFeature>),
}

impl FeatureFunction {
    pub fn stateless<F>(feature: F) -> Self
    where
        F: StatelessFeature + 'static,
    {
        Self::Stateless(Box::new(feature))
    }

    pub fn stateful<F>(feature: F) -> Self
    where
        F: StatefulFeature + 'static,
    {
        Self::Stateful(Box::new(feature))
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Stateless(f) => f.name(),
            Self::Stateful(f) => f.name(),
        }
    }

    #[inline(always)]
    pub const fn is_stateful(&self) -> bool {
        matches!(self, Self::Stateful(_))
    }

    /// 状態を持つ素性であれば、その状態インデックスを返します。
    pub fn state_index(&self) -> Option<usize> {
        match self {
            Self::Stateless(_) => None,
            Self::Stateful(f) => Some(f.state_index()),
        }
    }

    /// 規則の適用1回分の値を累積器に加算します。
    ///
    /// # 戻り値
    ///
    /// 状態を持つ素性の場合は新しい導出の状態、それ以外は`None`
    pub fn compute(
        &self,
        rule: Option<&Rule>,
        tail_nodes: &[HgNode],
        span: Span,
        source_path: &SourcePath,
        sentence_id: usize,
        acc: &mut dyn Accumulator,
    ) -> Option<DpState> {
        match self {
            Self::Stateless(f) => {
                f.compute(rule, tail_nodes, span, source_path, sentence_id, acc);
                None
            }
            Self::Stateful(f) => {
                Some(f.compute(rule, tail_nodes, span, source_path, sentence_id, acc))
            }
        }
    }

    /// 規則だけから値を見積もり、累積器に加算します。
    pub fn estimate_cost(&self, rule: &Rule, sentence_id: usize, acc: &mut dyn Accumulator) {
        match self {
            Self::Stateless(f) => f.estimate(rule, sentence_id, acc),
            Self::Stateful(f) => f.estimate(rule, sentence_id, acc),
        }
    }
}

impl fmt::Debug for FeatureFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stateless(ff) => f.debug_tuple("Stateless").field(&ff.name()).finish(),
            Self::Stateful(ff) => f
                .debug_tuple("Stateful")
                .field(&ff.name())
                .field(&ff.state_index())
                .finish(),
        }
    }
}
