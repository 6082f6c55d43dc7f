//! OOV規則の合成
//!
//! 入力文の単語のうち文法で覆えないものに対し、単語をそのまま出力する規則を
//! 1つずつ追加して、探索が必ず入力全体を覆えるようにします。

use hashbrown::HashSet;

use crate::errors::Result;
use crate::ff::ScoringModel;
use crate::grammar::Grammar;
use crate::lattice::Lattice;
use crate::vocab::SymbolTable;

/// ラティス中のOOV規則の候補となる単語IDを集めます。
///
/// 文頭・文末記号は含まれません。`only_true`が`true`の場合、記号表に登録されている
/// 単語も除かれます。
pub fn oov_candidates<V>(lattice: &Lattice, only_true: bool, vocab: &V) -> HashSet<i32>
where
    V: SymbolTable + ?Sized,
{
    let (start, stop) = (vocab.start_id(), vocab.stop_id());
    lattice
        .source_words()
        .filter(|&word| word != start && word != stop)
        .filter(|&word| !only_true || !vocab.has_id(word))
        .collect()
}

/// 入力ラティスの単語ごとにOOV規則を追加し、文法を並べ替え直します。
///
/// 候補となる単語ごとに[`Grammar::add_oov_rule()`]をちょうど1回呼び出した後、
/// [`Grammar::sort_grammar()`]を呼び出します。候補がない場合も並べ替えは行われます。
///
/// # 引数
///
/// * `grammar` - 規則を追加する文法
/// * `lattice` - 入力ラティス
/// * `model` - 追加した規則の推定コストの計算と並べ替えに使うモデル
/// * `only_true` - 記号表に登録されていない単語だけを対象にするかどうか
/// * `vocab` - 記号表
///
/// # 戻り値
///
/// 追加したOOV規則の数
///
/// # エラー
///
/// 文法がOOV規則を作成できない場合、[`HieroError`](crate::errors::HieroError)が返されます。
pub fn add_oov_rules<G, V>(
    grammar: &mut G,
    lattice: &Lattice,
    model: &ScoringModel,
    only_true: bool,
    vocab: &V,
) -> Result<usize>
where
    G: Grammar + ?Sized,
    V: SymbolTable + ?Sized,
{
    let mut words: Vec<i32> = oov_candidates(lattice, only_true, vocab).into_iter().collect();
    words.sort_unstable();
    for &word in &words {
        grammar.add_oov_rule(word, model)?;
    }
    log::debug!(
        "added {} OOV rules to grammar (owner {})",
        words.len(),
        grammar.owner()
    );
    grammar.sort_grammar(model);
    Ok(words.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::GrammarConfig;
    use crate::feature_vector::Weights;
    use crate::ff::{FeatureFunction, WordPenalty};
    use crate::grammar::HieroGrammar;
    use crate::vocab::{START_ID, STOP_ID, Vocabulary};

    struct Known(HashSet<i32>);

    impl SymbolTable for Known {
        fn has_id(&self, id: i32) -> bool {
            self.0.contains(&id)
        }
    }

    fn model() -> ScoringModel {
        ScoringModel::new(
            vec![FeatureFunction::stateless(WordPenalty::new())],
            Weights::new().with("WordPenalty", 1.0),
        )
    }

    fn lattice() -> Lattice {
        Lattice::from_words(&[START_ID, 5, 5, 7, STOP_ID])
    }

    #[test]
    fn test_candidates() {
        let known = Known([7].into_iter().collect());
        let all = oov_candidates(&lattice(), false, &known);
        assert_eq!(all, [5, 7].into_iter().collect::<HashSet<_>>());
        let unknown = oov_candidates(&lattice(), true, &known);
        assert_eq!(unknown, [5].into_iter().collect::<HashSet<_>>());
    }

    #[test]
    fn test_add_oov_rules() {
        let mut vocab = Vocabulary::new();
        let mut grammar = HieroGrammar::new(&GrammarConfig::new(), &mut vocab).unwrap();
        let known = Known(HashSet::new());

        let n = add_oov_rules(&mut grammar, &lattice(), &model(), false, &known).unwrap();
        assert_eq!(n, 2);
        assert_eq!(grammar.num_rules(), 2);
        assert!(grammar.is_sorted());

        let view = grammar.sorted().unwrap();
        for word in [5, 7] {
            let rules = view.sorted_rules(&[word]).unwrap();
            assert_eq!(rules.len(), 1);
            assert!(rules[0].is_oov());
            assert_eq!(rules[0].target(), &[word]);
        }
        assert!(view.sorted_rules(&[START_ID]).is_none());
        assert!(view.sorted_rules(&[STOP_ID]).is_none());
    }

    #[test]
    fn test_only_true() {
        let mut vocab = Vocabulary::new();
        let mut grammar = HieroGrammar::new(&GrammarConfig::new(), &mut vocab).unwrap();
        let known = Known([7].into_iter().collect());

        let n = add_oov_rules(&mut grammar, &lattice(), &model(), true, &known).unwrap();
        assert_eq!(n, 1);
        let root = grammar.trie_root();
        assert!(root.extension(5).is_some());
        assert!(root.extension(7).is_none());
    }

    #[test]
    fn test_empty_lattice_still_sorts() {
        let mut vocab = Vocabulary::new();
        let mut grammar = HieroGrammar::new(&GrammarConfig::new(), &mut vocab).unwrap();
        let n = add_oov_rules(&mut grammar, &Lattice::default(), &model(), false, &vocab).unwrap();
        assert_eq!(n, 0);
        assert!(grammar.is_sorted());
        assert!(!grammar.trie_root().has_extensions());
    }
}
