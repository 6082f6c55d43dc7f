//! # hiero-grammar
//!
//! 階層的フレーズベース統計的機械翻訳デコーダのための、翻訳規則の格納と採点を行うライブラリです。
//!
//! ## 概要
//!
//! 翻訳文法は原言語側パターンの接頭辞トライとして保持されます。探索を始める前に、
//! トライの各ノードの規則を素性関数で見積もったコストの昇順に並べ替え、入力文の
//! 未知語（OOV）には単語をそのまま出力する規則を合成して補います。並べ替えが済んだ
//! 文法は読み取り専用のビューとして、探索を行う複数のスレッドで共有できます。
//!
//! ## 主な機能
//!
//! - **接頭辞トライ**: 原言語側パターンを共有する規則をまとめて格納
//! - **コスト順のソート**: 推定コストを規則ごとに一度だけ計算し、安定ソートで並べ替え
//! - **OOV規則の合成**: 入力ラティスの単語ごとにパススルー規則を追加
//! - **素性関数**: 状態を持たない素性と、導出の状態を返す素性の共通インターフェース
//! - **テキスト形式の読み込み**: 同期文脈自由文法とフレーズテーブル
//!
//! ## 使用例
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use hiero_grammar::ff::{FeatureFunction, PhraseModel, WordPenalty};
//! use hiero_grammar::{
//!     Grammar, GrammarConfig, HieroGrammar, Lattice, ScoringModel, Vocabulary, Weights,
//! };
//!
//! let rules = "[X] ||| le chat ||| the cat ||| p=-0.5
//! [X] ||| le chat ||| the cat there ||| p=-0.1
//! [X] ||| [X,1] noir ||| black [X,1] ||| p=-0.2";
//!
//! let mut vocab = Vocabulary::new();
//! let config = GrammarConfig::new().owner(0);
//! let mut grammar = HieroGrammar::from_reader(rules.as_bytes(), &mut vocab, &config)?;
//!
//! let model = ScoringModel::new(
//!     vec![
//!         FeatureFunction::stateless(WordPenalty::new()),
//!         FeatureFunction::stateless(PhraseModel::new(0)),
//!     ],
//!     Weights::new().with("WordPenalty", 1.0).with("tm_0_p", 1.0),
//! );
//!
//! let sentence = [vocab.id("le")?, vocab.id("chat")?, vocab.id("gris")?];
//! let lattice = Lattice::from_words(&sentence);
//! let n = hiero_grammar::oov::add_oov_rules(&mut grammar, &lattice, &model, false, &vocab)?;
//! assert_eq!(n, 3);
//!
//! let view = grammar.sorted().unwrap();
//! let cat = view.sorted_rules(&sentence[..2]).unwrap();
//! assert_eq!(cat.len(), 2);
//! assert_eq!(vocab.word(cat[0].target()[1]), Some("cat"));
//! # Ok(())
//! # }
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

/// 文法の構築オプション
pub mod config;

/// エラー型の定義
pub mod errors;

/// 疎な素性ベクトルと重み
pub mod feature_vector;

/// 素性関数と採点モデル
pub mod ff;

/// 翻訳文法
pub mod grammar;

/// 探索フェーズとのインターフェース
pub mod hypergraph;

/// 入力ラティス
pub mod lattice;

/// OOV規則の合成
pub mod oov;

/// 記号表
pub mod vocab;

#[cfg(test)]
mod test_utils;

// Re-exports
pub use config::GrammarConfig;
pub use feature_vector::{FeatureVector, Weights};
pub use ff::ScoringModel;
pub use grammar::{Grammar, HieroGrammar, PhraseTable, Rule, SortedGrammar};
pub use lattice::Lattice;
pub use vocab::{SymbolTable, Vocabulary};

/// このライブラリのバージョン番号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
