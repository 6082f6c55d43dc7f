use std::sync::Arc;

use crate::ff::{Accumulator, StatefulFeature};
use crate::grammar::Rule;
use crate::hypergraph::{DpState, HgNode, Span};
use crate::lattice::SourcePath;
use crate::vocab::Vocabulary;

/// 目的言語側の単語バイグラムを数える素性
///
/// 規則の内部で隣り合う単語の組に加え、子ノードとの境界で隣り合う単語の組にも
/// `TargetBigram_<a>_<b>` という名前で1を加算します。状態は導出の出力の
/// 左端と右端の単語の2つ組で、子ノードが状態を持たず端の単語が分からない場合は
/// その位置に[`TargetBigram::OPEN`]が入ります。
#[derive(Debug, Clone)]
pub struct TargetBigram {
    vocab: Arc<Vocabulary>,
    state_index: usize,
}

impl TargetBigram {
    pub const NAME: &'static str = "TargetBigram";

    /// 状態中の不明な端の単語
    pub const OPEN: i32 = -1;

    pub const fn new(vocab: Arc<Vocabulary>, state_index: usize) -> Self {
        Self { vocab, state_index }
    }

    fn fire(&self, left: i32, right: i32, acc: &mut dyn Accumulator) {
        let name = format!(
            "{}_{}_{}",
            Self::NAME,
            self.vocab.word(left).unwrap_or("<unk>"),
            self.vocab.word(right).unwrap_or("<unk>"),
        );
        acc.add(&name, 1.0);
    }
}

impl StatefulFeature for TargetBigram {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn state_index(&self) -> usize {
        self.state_index
    }

    fn compute(
        &self,
        rule: Option<&Rule>,
        tail_nodes: &[HgNode],
        _span: Span,
        _source_path: &SourcePath,
        _sentence_id: usize,
        acc: &mut dyn Accumulator,
    ) -> DpState {
        let Some(rule) = rule else {
            return tail_nodes
                .first()
                .and_then(|node| node.state(self.state_index))
                .cloned()
                .unwrap_or_default();
        };

        let mut leftmost = None;
        let mut prev = None;
        for &sym in rule.target() {
            let (first, last) = if sym >= 0 {
                (sym, sym)
            } else {
                let slot = usize::try_from(-i64::from(sym) - 1).unwrap_or(usize::MAX);
                let words = tail_nodes
                    .get(slot)
                    .and_then(|node| node.state(self.state_index))
                    .map(DpState::symbols);
                match words {
                    Some(&[first, last]) => (first, last),
                    Some(&[word]) => (word, word),
                    _ => (Self::OPEN, Self::OPEN),
                }
            };
            if let Some(p) = prev
                && p != Self::OPEN
                && first != Self::OPEN
            {
                self.fire(p, first, acc);
            }
            leftmost.get_or_insert(first);
            prev = Some(last);
        }

        match (leftmost, prev) {
            (Some(left), Some(right)) => DpState::new(vec![left, right]),
            _ => DpState::default(),
        }
    }
}
