use crate::ff::{Accumulator, StatelessFeature};
use crate::grammar::Rule;
use crate::hypergraph::{HgNode, Span};
use crate::lattice::SourcePath;

/// 出力される目的言語の単語1つごとに一定の値を加える素性
///
/// 値は `ω × (目的言語側パターンの長さ − 項数)` です。
#[derive(Debug, Clone)]
pub struct WordPenalty {
    omega: f32,
}

impl WordPenalty {
    pub const NAME: &'static str = "WordPenalty";

    /// `ω`の既定値 `-log10(e)`
    pub const DEFAULT_OMEGA: f32 = -std::f32::consts::LOG10_E;

    pub const fn new() -> Self {
        Self::with_omega(Self::DEFAULT_OMEGA)
    }

    pub const fn with_omega(omega: f32) -> Self {
        Self { omega }
    }

    #[inline(always)]
    pub const fn omega(&self) -> f32 {
        self.omega
    }
}

impl Default for WordPenalty {
    fn default() -> Self {
        Self::new()
    }
}

impl StatelessFeature for WordPenalty {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn compute(
        &self,
        rule: Option<&Rule>,
        _tail_nodes: &[HgNode],
        _span: Span,
        _source_path: &SourcePath,
        _sentence_id: usize,
        acc: &mut dyn Accumulator,
    ) {
        if let Some(rule) = rule {
            acc.add(Self::NAME, self.omega * rule.num_target_words() as f32);
        }
    }
}
