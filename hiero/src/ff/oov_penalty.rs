use crate::ff::{Accumulator, StatelessFeature};
use crate::grammar::Rule;
use crate::hypergraph::{HgNode, Span};
use crate::lattice::SourcePath;

/// OOV規則の適用ごとに一定の値を加える素性
#[derive(Debug, Clone)]
pub struct OovPenalty {
    value: f32,
}

impl OovPenalty {
    pub const NAME: &'static str = "OOVPenalty";
    pub const DEFAULT_VALUE: f32 = -100.0;

    pub const fn new() -> Self {
        Self::with_value(Self::DEFAULT_VALUE)
    }

    pub const fn with_value(value: f32) -> Self {
        Self { value }
    }
}

impl Default for OovPenalty {
    fn default() -> Self {
        Self::new()
    }
}

impl StatelessFeature for OovPenalty {
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
        if rule.is_some_and(Rule::is_oov) {
            acc.add(Self::NAME, self.value);
        }
    }
}
