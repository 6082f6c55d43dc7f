use crate::ff::{Accumulator, StatelessFeature};
use crate::grammar::Rule;
use crate::hypergraph::{HgNode, Span};
use crate::lattice::SourcePath;

/// 規則自身が持つ素性値をそのまま出力する素性
///
/// 所有者IDが一致する規則についてのみ、各素性を `tm_<所有者ID>_<素性名>` という名前で
/// 加算します。文法ごとに独立した重みを与えるためのものです。
#[derive(Debug, Clone)]
pub struct PhraseModel {
    owner: i32,
    name: String,
}

impl PhraseModel {
    pub fn new(owner: i32) -> Self {
        Self {
            owner,
            name: format!("tm_{owner}"),
        }
    }

    #[inline(always)]
    pub const fn owner(&self) -> i32 {
        self.owner
    }

    /// 規則の素性`feature`に対応する重みの名前を返します。
    pub fn weight_name(&self, feature: &str) -> String {
        format!("{}_{feature}", self.name)
    }
}

impl StatelessFeature for PhraseModel {
    fn name(&self) -> &str {
        &self.name
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
        let Some(rule) = rule else {
            return;
        };
        if rule.owner() != self.owner {
            return;
        }
        for (feature, value) in rule.features().iter() {
            acc.add(&self.weight_name(feature), value);
        }
    }
}
