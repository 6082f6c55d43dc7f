use crate::feature_vector::Weights;
use crate::ff::{FeatureFunction, OovPenalty, PhraseModel, ScoringModel, WordPenalty};
use crate::grammar::{Grammar, HieroGrammar, PhraseTable};
use crate::lattice::Lattice;
use crate::oov::add_oov_rules;
use crate::vocab::{START_ID, STOP_ID};
use crate::{GrammarConfig, Vocabulary};

const GRAMMAR: &str = include_str!("./resources/grammar.hiero");

fn model() -> ScoringModel {
    ScoringModel::new(
        vec![
            FeatureFunction::stateless(WordPenalty::new()),
            FeatureFunction::stateless(PhraseModel::new(0)),
            FeatureFunction::stateless(OovPenalty::new()),
        ],
        Weights::new()
            .with("WordPenalty", 1.0)
            .with("tm_0_p", 1.0)
            .with("OOVPenalty", 1.0),
    )
}

fn setup() -> (HieroGrammar, Vocabulary, Lattice, i32) {
    let mut vocab = Vocabulary::new();
    let grammar =
        HieroGrammar::from_reader(GRAMMAR.as_bytes(), &mut vocab, &GrammarConfig::new()).unwrap();
    let le = vocab.get("le").unwrap();
    let chat = vocab.get("chat").unwrap();
    let unknown = i32::try_from(vocab.len()).unwrap() + 10;
    let lattice = Lattice::from_words(&[START_ID, le, chat, unknown, STOP_ID]);
    (grammar, vocab, lattice, unknown)
}

/// 記号表にない単語だけにOOV規則を追加するテスト
#[test]
fn test_only_true() {
    let (mut grammar, vocab, lattice, unknown) = setup();
    let n = add_oov_rules(&mut grammar, &lattice, &model(), true, &vocab).unwrap();
    assert_eq!(n, 1);
    assert_eq!(grammar.num_rules(), 13);

    let view = grammar.sorted().unwrap();
    let rules = view.sorted_rules(&[unknown]).unwrap();
    assert_eq!(rules.len(), 1);
    assert!(rules[0].is_oov());
    assert_eq!(rules[0].target(), &[unknown]);

    let le = vocab.get("le").unwrap();
    assert!(view.sorted_rules(&[le]).unwrap().iter().all(|r| !r.is_oov()));
}

/// すべての単語にOOV規則を追加し、既存の規則と一緒に並べ替えるテスト
#[test]
fn test_all_words() {
    let (mut grammar, vocab, lattice, unknown) = setup();
    let n = add_oov_rules(&mut grammar, &lattice, &model(), false, &vocab).unwrap();
    assert_eq!(n, 3);
    assert_eq!(grammar.num_rules(), 15);
    assert!(grammar.is_sorted());

    let view = grammar.sorted().unwrap();
    let le = vocab.get("le").unwrap();
    let rules = view.sorted_rules(&[le]).unwrap();
    assert_eq!(rules.len(), 3);
    assert!(rules[2].is_oov());
    assert!(rules[2].estimated_cost().unwrap() > 100.0);

    assert!(view.sorted_rules(&[START_ID]).is_none());
    assert!(view.sorted_rules(&[STOP_ID]).is_none());
    assert!(view.sorted_rules(&[unknown]).is_some());
}

/// 同じラティスで繰り返すと規則が重複して追加されるテスト
#[test]
fn test_repeated_synthesis_appends() {
    let (mut grammar, vocab, lattice, unknown) = setup();
    add_oov_rules(&mut grammar, &lattice, &model(), true, &vocab).unwrap();
    add_oov_rules(&mut grammar, &lattice, &model(), true, &vocab).unwrap();
    let view = grammar.sorted().unwrap();
    assert_eq!(view.sorted_rules(&[unknown]).unwrap().len(), 2);
}

/// 分岐のあるラティスのテスト
#[test]
fn test_branching_lattice() {
    let (mut grammar, vocab, _, unknown) = setup();
    let mut lattice = Lattice::new(4);
    lattice.add_arc(0, 1, 0.0, START_ID).unwrap();
    lattice.add_arc(1, 2, -0.5, unknown).unwrap();
    lattice.add_arc(1, 2, -0.7, unknown + 1).unwrap();
    lattice.add_arc(1, 3, -1.0, unknown + 2).unwrap();
    lattice.add_arc(2, 3, 0.0, STOP_ID).unwrap();

    let n = add_oov_rules(&mut grammar, &lattice, &model(), true, &vocab).unwrap();
    assert_eq!(n, 3);
    for word in unknown..unknown + 3 {
        assert!(grammar.trie_root().extension(word).unwrap().has_rules());
    }
}

/// フレーズテーブルに追加されるOOV規則の形のテスト
#[test]
fn test_phrase_table() {
    let mut vocab = Vocabulary::new();
    let mut table = PhraseTable::from_reader(
        "le chat ||| the cat ||| 0.5".as_bytes(),
        &mut vocab,
        &GrammarConfig::new(),
    )
    .unwrap();
    let le = vocab.get("le").unwrap();
    let chat = vocab.get("chat").unwrap();
    let lattice = Lattice::from_words(&[le, chat]);

    let n = add_oov_rules(&mut table, &lattice, &model(), false, &vocab).unwrap();
    assert_eq!(n, 2);
    let x = table.nonterminal();
    let view = table.sorted().unwrap();
    for word in [le, chat] {
        let rules = view.sorted_rules(&[x, word]).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].target(), &[-1, word]);
        assert_eq!(rules[0].arity(), 1);
    }
    assert_eq!(view.sorted_rules(&[x, le, chat]).unwrap().len(), 1);
    assert_eq!(view.max_source_phrase_length(), 2);
}
