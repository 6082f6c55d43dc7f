//! フレーズテーブル
//!
//! フレーズテーブルの規則は、原言語側・目的言語側ともに暗黙の非終端記号で始まる
//! `[X] ||| [X] f ||| [X,1] e` の形で格納されます。探索は左から右へ1フレーズずつ
//! 仮説を伸ばしていくため、先頭の非終端記号がそれまでの仮説を表します。

use std::io::{BufRead, BufReader, Read};

use crate::config::GrammarConfig;
use crate::errors::Result;
use crate::feature_vector::FeatureVector;
use crate::ff::ScoringModel;
use crate::grammar::reader::parse_phrase_rule;
use crate::grammar::{Grammar, GrammarCore, Rule};
use crate::vocab::Vocabulary;

/// フレーズテーブル
#[derive(Debug)]
pub struct PhraseTable {
    core: GrammarCore,
    nonterminal: i32,
}

impl PhraseTable {
    /// 空のフレーズテーブルを作成します。
    ///
    /// 既定の非終端記号が、すべての規則の左辺と先頭の非終端記号になります。
    ///
    /// # エラー
    ///
    /// 記号表に非終端記号を登録できない場合、[`HieroError`](crate::errors::HieroError)が返されます。
    pub fn new(config: &GrammarConfig, vocab: &mut Vocabulary) -> Result<Self> {
        Ok(Self {
            core: GrammarCore::new(config.get_owner(), config.get_span_limit()),
            nonterminal: vocab.id(config.get_default_nonterminal())?,
        })
    }

    /// `原言語 ||| 目的言語 ||| 素性 [||| アラインメント]` 形式のフレーズテーブルを読み込みます。
    ///
    /// # エラー
    ///
    /// 読み込みに失敗した場合、または行の形式が不正な場合、
    /// [`HieroError`](crate::errors::HieroError)が返されます。
    pub fn from_reader<R>(rdr: R, vocab: &mut Vocabulary, config: &GrammarConfig) -> Result<Self>
    where
        R: Read,
    {
        let mut table = Self::new(config, vocab)?;
        let rdr = BufReader::new(rdr);
        for line in rdr.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let rule = parse_phrase_rule(&line, vocab, table.owner(), table.nonterminal)?;
            table.add_rule(rule);
        }
        log::info!(
            "loaded {} phrases (owner {}, max phrase length {})",
            table.num_rules(),
            table.owner(),
            table.max_source_phrase_length(),
        );
        Ok(table)
    }

    #[inline(always)]
    pub const fn nonterminal(&self) -> i32 {
        self.nonterminal
    }

    /// 原言語と目的言語の単語列からフレーズを追加します。
    ///
    /// 先頭の非終端記号は自動的に付加されます。
    pub fn add_phrase(&mut self, source: &[i32], target: &[i32], features: FeatureVector) {
        let rule = Rule::new(
            self.nonterminal,
            [&[self.nonterminal][..], source].concat(),
            [&[-1][..], target].concat(),
            features,
            self.owner(),
        );
        self.add_rule(rule);
    }
}

impl Grammar for PhraseTable {
    fn core(&self) -> &GrammarCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut GrammarCore {
        &mut self.core
    }

    /// 規則を追加します。最長パターン長には先頭の非終端記号を含めません。
    fn add_rule(&mut self, rule: Rule) {
        let len = rule.source().len().saturating_sub(1);
        self.core.insert(rule, len);
    }

    fn add_oov_rule(&mut self, word: i32, model: &ScoringModel) -> Result<()> {
        let mut rule = Rule::new(
            self.nonterminal,
            vec![self.nonterminal, word],
            vec![-1, word],
            FeatureVector::new(),
            self.owner(),
        )
        .with_alignment("0-0")
        .into_oov();
        rule.estimate_cost(model);
        self.add_rule(rule);
        Ok(())
    }
}
