//! 原言語側パターンの接頭辞トライ
//!
//! 各ノードは次の原言語記号から子ノードへの対応を持ち、そのノードまでの経路を
//! パターンとする規則の集合を保持することがあります。

use hashbrown::HashMap;

use crate::grammar::rule::Rule;
use crate::grammar::rule_collection::RuleCollection;

/// トライのノード
///
/// 子ノードは親ノードが排他的に所有するため、構造は常に有限の深さの木になります。
/// 削除操作はありません。
#[derive(Debug, Default)]
pub struct Trie {
    rules: Option<RuleCollection>,
    extensions: HashMap<i32, Trie>,
}

impl Trie {
    /// 空のノードを作成します。
    pub fn new() -> Self {
        Self::default()
    }

    /// このノードが規則を保持しているかどうかを返します。
    #[inline(always)]
    pub const fn has_rules(&self) -> bool {
        self.rules.is_some()
    }

    /// このノードが子ノードを持つかどうかを返します。
    #[inline(always)]
    pub fn has_extensions(&self) -> bool {
        !self.extensions.is_empty()
    }

    #[inline(always)]
    pub const fn rule_collection(&self) -> Option<&RuleCollection> {
        self.rules.as_ref()
    }

    #[inline(always)]
    pub(crate) fn rule_collection_mut(&mut self) -> Option<&mut RuleCollection> {
        self.rules.as_mut()
    }

    /// 子ノードのイテレータを返します。順序は不定です。
    pub fn extensions(&self) -> impl Iterator<Item = &Trie> {
        self.extensions.values()
    }

    pub(crate) fn extensions_mut(&mut self) -> impl Iterator<Item = &mut Trie> {
        self.extensions.values_mut()
    }

    /// 子ノードの数を返します。
    #[inline(always)]
    pub fn num_extensions(&self) -> usize {
        self.extensions.len()
    }

    /// 記号`symbol`で遷移した先の子ノードを返します。
    #[inline(always)]
    pub fn extension(&self, symbol: i32) -> Option<&Trie> {
        self.extensions.get(&symbol)
    }

    /// 記号`symbol`で遷移した先の子ノードを返します。存在しない場合は作成します。
    pub fn extend_mut(&mut self, symbol: i32) -> &mut Trie {
        self.extensions.entry(symbol).or_default()
    }

    /// パターン`path`をたどった先のノードを返します。
    pub fn match_path(&self, path: &[i32]) -> Option<&Trie> {
        let mut node = self;
        for &symbol in path {
            node = node.extension(symbol)?;
        }
        Some(node)
    }

    /// 規則の原言語側パターンに沿ってノードを作成し、末端のノードに規則を追加します。
    pub fn insert(&mut self, rule: Rule) {
        let mut node = self;
        for &symbol in rule.source() {
            node = node.extend_mut(symbol);
        }
        let rules = node
            .rules
            .get_or_insert_with(|| RuleCollection::new(rule.source().to_vec()));
        rules.add_rule(rule);
    }

    /// このノードを根とする部分木のノードを先行順に返すイテレータを作成します。
    pub fn iter(&self) -> TrieIter<'_> {
        TrieIter { stack: vec![self] }
    }
}

impl Drop for Trie {
    // The default drop glue recurses once per level.
    fn drop(&mut self) {
        let mut stack: Vec<Trie> = self.extensions.drain().map(|(_, child)| child).collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.extensions.drain().map(|(_, child)| child));
        }
    }
}

/// [`Trie::iter()`]が返すイテレータ
///
/// 再帰を使わず、明示的なスタックで深さ優先にたどります。
pub struct TrieIter<'a> {
    stack: Vec<&'a Trie>,
}

impl<'a> Iterator for TrieIter<'a> {
    type Item = &'a Trie;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.extensions());
        Some(node)
    }
}
