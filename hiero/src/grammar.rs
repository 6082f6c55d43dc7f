//! 翻訳文法モジュール。
//!
//! このモジュールは、原言語側パターンの接頭辞トライとして表現された翻訳文法と、
//! トライ全体の規則を推定コスト順に並べ替える処理を提供します。
//!
//! # フェーズ分離
//!
//! 文法の構築、ソート、OOV規則の追加はすべて`&mut`を通じて単一スレッドで行います。
//! ソートが完了すると[`SortedGrammar`]が得られます。これは文法への共有参照のみを保持する
//! ビューで、探索を行う複数のスレッドにそのまま渡すことができます。ビューが存在する間は
//! 借用規則により文法を変更できないため、読み取り側に同期は必要ありません。
//!
//! # 文法の種類
//!
//! - [`HieroGrammar`]: 同期文脈自由文法。OOV規則は入力単語をそのまま出力する`[X] ||| w ||| w`
//! - [`PhraseTable`]: フレーズテーブル。規則は暗黙の非終端記号`[X]`で始まる
pub mod hiero;
pub mod phrase;
pub mod reader;
pub mod rule;
pub mod rule_collection;
pub mod trie;

use crate::errors::Result;
use crate::ff::ScoringModel;

pub use crate::grammar::hiero::HieroGrammar;
pub use crate::grammar::phrase::PhraseTable;
pub use crate::grammar::rule::Rule;
pub use crate::grammar::rule_collection::RuleCollection;
pub use crate::grammar::trie::Trie;

/// すべての文法が共有する状態。
///
/// 具体的な文法型はこの構造体を内部に持ち、[`Grammar`]トレイトを通じて公開します。
/// 規則の追加は必ず文法型を経由します。
///
/// ```compile_fail
/// use hiero_grammar::{Grammar, GrammarConfig, PhraseTable, Rule, FeatureVector, Vocabulary};
///
/// let mut vocab = Vocabulary::new();
/// let mut table = PhraseTable::new(&GrammarConfig::new(), &mut vocab).unwrap();
/// let x = table.nonterminal();
/// table.core_mut().add_rule(Rule::new(x, vec![x, 5], vec![-1, 5], FeatureVector::new(), 0));
/// ```
#[derive(Debug)]
pub struct GrammarCore {
    root: Trie,
    sorted: bool,
    owner: i32,
    span_limit: Option<usize>,
    max_source_phrase_length: i32,
    num_rules: usize,
}

impl GrammarCore {
    /// 空の未ソートの状態を作成します。
    ///
    /// # 引数
    ///
    /// * `owner` - 規則の素性に適用される重みの所有者ID
    /// * `span_limit` - 規則が覆うことのできる入力の最大スパン（`None`は無制限）
    pub fn new(owner: i32, span_limit: Option<usize>) -> Self {
        Self {
            root: Trie::new(),
            sorted: false,
            owner,
            span_limit,
            max_source_phrase_length: -1,
            num_rules: 0,
        }
    }

    #[inline(always)]
    pub const fn root(&self) -> &Trie {
        &self.root
    }

    #[inline(always)]
    pub const fn is_sorted(&self) -> bool {
        self.sorted
    }

    #[inline(always)]
    pub const fn owner(&self) -> i32 {
        self.owner
    }

    #[inline(always)]
    pub const fn span_limit(&self) -> Option<usize> {
        self.span_limit
    }

    /// これまでに追加された最長の原言語側パターンの長さ（終端記号と非終端記号の合計）。
    /// 規則がない場合は`-1`です。
    #[inline(always)]
    pub const fn max_source_phrase_length(&self) -> i32 {
        self.max_source_phrase_length
    }

    #[inline(always)]
    pub const fn num_rules(&self) -> usize {
        self.num_rules
    }

    /// 規則をトライに追加します。
    ///
    /// 最長パターン長の数え方は文法の種類ごとに異なるため、外部からは
    /// [`Grammar::add_rule()`]を使います。
    pub(crate) fn add_rule(&mut self, rule: Rule) {
        let len = rule.source().len();
        self.insert(rule, len);
    }

    /// 規則をトライに追加し、最長パターン長を`phrase_len`で更新します。
    pub(crate) fn insert(&mut self, rule: Rule, phrase_len: usize) {
        let phrase_len = i32::try_from(phrase_len).unwrap_or(i32::MAX);
        self.max_source_phrase_length = self.max_source_phrase_length.max(phrase_len);
        self.root.insert(rule);
        self.num_rules += 1;
        if self.sorted {
            self.set_sorted(false);
        }
    }

    fn set_sorted(&mut self, sorted: bool) {
        self.sorted = sorted;
        log::debug!(
            "grammar (owner {}) is now {}",
            self.owner,
            if sorted { "sorted" } else { "unsorted" }
        );
    }

    /// トライ全体を並べ替え、ソート済みの状態にします。
    fn sort(&mut self, model: &ScoringModel) {
        sort_trie(&mut self.root, model);
        self.set_sorted(true);
    }
}

/// 文法の能力を表すトレイト。
///
/// 実装する型は[`GrammarCore`]へのアクセスとOOV規則の形だけを定義します。ソート、
/// メタデータの取得などはデフォルト実装で提供されます。
pub trait Grammar {
    /// 共有状態への参照を返します。
    fn core(&self) -> &GrammarCore;

    /// 共有状態への可変参照を返します。
    fn core_mut(&mut self) -> &mut GrammarCore;

    /// 1つの原言語単語だけを覆うOOV規則を1つ追加します。
    ///
    /// 規則の形は文法の種類ごとに異なります。
    ///
    /// # 引数
    ///
    /// * `word` - OOV規則を作成する原言語単語のID
    /// * `model` - 追加した規則の推定コストを計算するためのモデル
    fn add_oov_rule(&mut self, word: i32, model: &ScoringModel) -> Result<()>;

    /// 規則を追加します。文法は未ソートの状態に戻ります。
    fn add_rule(&mut self, rule: Rule) {
        self.core_mut().add_rule(rule);
    }

    /// トライの根を返します。
    fn trie_root(&self) -> &Trie {
        self.core().root()
    }

    fn owner(&self) -> i32 {
        self.core().owner()
    }

    fn span_limit(&self) -> Option<usize> {
        self.core().span_limit()
    }

    /// 最長の原言語側パターンの長さを返します。規則がない場合は`-1`です。
    fn max_source_phrase_length(&self) -> i32 {
        self.core().max_source_phrase_length()
    }

    fn num_rules(&self) -> usize {
        self.core().num_rules()
    }

    /// 直近のソート以降に規則が追加されていなければ`true`を返します。
    fn is_sorted(&self) -> bool {
        self.core().is_sorted()
    }

    /// 長さ`path_length`の入力区間に規則を適用できるかどうかを返します。
    fn has_rule_for_span(&self, path_length: usize) -> bool {
        self.span_limit().is_none_or(|limit| path_length <= limit)
    }

    /// トライのすべての規則集合を推定コストの昇順に並べ替えます。
    ///
    /// 探索を並列に開始する前に呼び出す必要があります。計算済みの推定コストと並びは
    /// 再利用されるため、同じ規則とモデルで再度呼び出しても結果は変わりません。
    ///
    /// # 戻り値
    ///
    /// 探索フェーズに渡す読み取り専用のビュー
    fn sort_grammar(&mut self, model: &ScoringModel) -> SortedGrammar<'_> {
        self.core_mut().sort(model);
        SortedGrammar { core: self.core() }
    }

    /// ソート済みであれば読み取り専用のビューを返します。
    fn sorted(&self) -> Option<SortedGrammar<'_>> {
        let core = self.core();
        core.is_sorted().then_some(SortedGrammar { core })
    }
}

/// トライを先行順にたどり、規則を持つすべてのノードを並べ替えます。
///
/// 深い文法でもスタックを使い果たさないよう、再帰ではなく作業リストを使います。
fn sort_trie(root: &mut Trie, model: &ScoringModel) {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if let Some(rules) = node.rule_collection_mut() {
            log::debug!("Sorting node {:?}", rules.source_side());
            rules.sort(model);
            if log::log_enabled!(log::Level::Trace) {
                for rule in rules.rules() {
                    log::trace!("\t{rule}");
                }
            }
        }
        if node.has_extensions() {
            stack.extend(node.extensions_mut());
        }
    }
}

/// ソート済みの文法の読み取り専用ビュー。
///
/// [`Grammar::sort_grammar()`]または[`Grammar::sorted()`]でのみ作成されます。
/// 共有参照だけを保持するので`Copy`かつ`Send + Sync`で、探索の各ワーカーに
/// 自由に配ることができます。
#[derive(Debug, Clone, Copy)]
pub struct SortedGrammar<'a> {
    core: &'a GrammarCore,
}

impl<'a> SortedGrammar<'a> {
    #[inline(always)]
    pub const fn root(&self) -> &'a Trie {
        self.core.root()
    }

    #[inline(always)]
    pub const fn owner(&self) -> i32 {
        self.core.owner()
    }

    #[inline(always)]
    pub const fn span_limit(&self) -> Option<usize> {
        self.core.span_limit()
    }

    #[inline(always)]
    pub const fn num_rules(&self) -> usize {
        self.core.num_rules()
    }

    #[inline(always)]
    pub const fn max_source_phrase_length(&self) -> i32 {
        self.core.max_source_phrase_length()
    }

    /// パターン`pattern`の規則集合を返します。
    pub fn rule_collection(&self, pattern: &[i32]) -> Option<&'a RuleCollection> {
        self.core.root().match_path(pattern)?.rule_collection()
    }

    /// パターン`pattern`の規則を推定コストの昇順で返します。
    pub fn sorted_rules(&self, pattern: &[i32]) -> Option<&'a [Rule]> {
        self.rule_collection(pattern).map(RuleCollection::rules)
    }
}
