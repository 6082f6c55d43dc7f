//! 同期文脈自由文法

use std::io::{BufRead, BufReader, Read};

use crate::config::GrammarConfig;
use crate::errors::Result;
use crate::feature_vector::FeatureVector;
use crate::ff::ScoringModel;
use crate::grammar::reader::parse_hiero_rule;
use crate::grammar::{Grammar, GrammarCore, Rule};
use crate::vocab::Vocabulary;

/// 同期文脈自由文法
///
/// OOV規則は、入力単語をそのまま出力する`[X] ||| w ||| w`です。
#[derive(Debug)]
pub struct HieroGrammar {
    core: GrammarCore,
    default_nonterminal: i32,
}

impl HieroGrammar {
    /// 空の文法を作成します。
    ///
    /// # 引数
    ///
    /// * `config` - 構築オプション
    /// * `vocab` - 既定の非終端記号を登録する記号表
    ///
    /// # エラー
    ///
    /// 記号表に非終端記号を登録できない場合、[`HieroError`](crate::errors::HieroError)が返されます。
    pub fn new(config: &GrammarConfig, vocab: &mut Vocabulary) -> Result<Self> {
        Ok(Self {
            core: GrammarCore::new(config.get_owner(), config.get_span_limit()),
            default_nonterminal: vocab.id(config.get_default_nonterminal())?,
        })
    }

    /// テキスト形式の規則を読み込んで文法を作成します。
    ///
    /// 空行と`#`で始まる行は無視されます。
    ///
    /// # 引数
    ///
    /// * `rdr` - 規則のリーダー
    /// * `vocab` - 記号を登録する記号表
    /// * `config` - 構築オプション
    ///
    /// # エラー
    ///
    /// 読み込みに失敗した場合、または規則の形式が不正な場合、
    /// [`HieroError`](crate::errors::HieroError)が返されます。
    pub fn from_reader<R>(rdr: R, vocab: &mut Vocabulary, config: &GrammarConfig) -> Result<Self>
    where
        R: Read,
    {
        let mut grammar = Self::new(config, vocab)?;
        let rdr = BufReader::new(rdr);
        for line in rdr.lines() {
            let line = line?;
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let rule = parse_hiero_rule(&line, vocab, grammar.owner())?;
            grammar.add_rule(rule);
        }
        log::info!(
            "loaded {} rules (owner {}, max source phrase length {})",
            grammar.num_rules(),
            grammar.owner(),
            grammar.max_source_phrase_length(),
        );
        Ok(grammar)
    }

    /// OOV規則の左辺に使う非終端記号のIDを返します。
    #[inline(always)]
    pub const fn default_nonterminal(&self) -> i32 {
        self.default_nonterminal
    }
}

impl Grammar for HieroGrammar {
    fn core(&self) -> &GrammarCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut GrammarCore {
        &mut self.core
    }

    fn add_oov_rule(&mut self, word: i32, model: &ScoringModel) -> Result<()> {
        let mut rule = Rule::new(
            self.default_nonterminal,
            vec![word],
            vec![word],
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
