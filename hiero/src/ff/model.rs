use crate::feature_vector::{FeatureVector, Weights};
use crate::ff::{FeatureAccumulator, FeatureFunction, NO_SENTENCE_ID, ScoreAccumulator};
use crate::grammar::Rule;
use crate::hypergraph::{DpState, HgNode, Span};
use crate::lattice::SourcePath;

/// 1回のデコードで使う素性関数と重みの組
///
/// 規則に保持される推定コストは、それを計算したモデルに対してのみ有効です。
#[derive(Debug)]
pub struct ScoringModel {
    features: Vec<FeatureFunction>,
    weights: Weights,
    num_states: usize,
}

impl ScoringModel {
    /// 新しいモデルを作成します。
    ///
    /// # 引数
    ///
    /// * `features` - 素性関数（呼び出し順）
    /// * `weights` - 素性の重み
    pub fn new(features: Vec<FeatureFunction>, weights: Weights) -> Self {
        let num_states = features
            .iter()
            .filter_map(FeatureFunction::state_index)
            .map(|idx| idx + 1)
            .max()
            .unwrap_or(0);
        Self {
            features,
            weights,
            num_states,
        }
    }

    #[inline(always)]
    pub fn features(&self) -> &[FeatureFunction] {
        &self.features
    }

    #[inline(always)]
    pub const fn weights(&self) -> &Weights {
        &self.weights
    }

    /// ノードが保持すべき状態の数を返します。
    #[inline(always)]
    pub const fn num_states(&self) -> usize {
        self.num_states
    }

    /// 文脈なしで規則の推定コストを計算します。
    ///
    /// モデルのスコアは大きいほど良いため、コストはその符号を反転したものです。
    pub fn estimate_cost(&self, rule: &Rule) -> f32 {
        let mut acc = ScoreAccumulator::new(&self.weights);
        for ff in &self.features {
            ff.estimate_cost(rule, NO_SENTENCE_ID, &mut acc);
        }
        -acc.score()
    }

    /// 文脈なしで規則の素性値を重み付けせずに集めます。
    pub fn estimate_features(&self, rule: &Rule) -> FeatureVector {
        let mut acc = FeatureAccumulator::new();
        for ff in &self.features {
            ff.estimate_cost(rule, NO_SENTENCE_ID, &mut acc);
        }
        acc.into_features()
    }

    /// 探索中の規則の適用1回分を採点します。
    ///
    /// # 戻り値
    ///
    /// 重み付きのスコアと、状態インデックスごとの新しい状態
    pub fn compute(
        &self,
        rule: Option<&Rule>,
        tail_nodes: &[HgNode],
        span: Span,
        source_path: &SourcePath,
        sentence_id: usize,
    ) -> (f32, Vec<Option<DpState>>) {
        let mut acc = ScoreAccumulator::new(&self.weights);
        let mut states = vec![None; self.num_states];
        for ff in &self.features {
            let state = ff.compute(rule, tail_nodes, span, source_path, sentence_id, &mut acc);
            if let (Some(idx), Some(state)) = (ff.state_index(), state) {
                states[idx] = Some(state);
            }
        }
        (acc.score(), states)
    }
}
