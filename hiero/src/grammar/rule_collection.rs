//! 原言語側パターンを共有する規則の集合
//!
//! トライの各ノードは、そのノードまでの経路が表すパターンを持つ規則をまとめて保持します。

use crate::ff::ScoringModel;
use crate::grammar::rule::Rule;

/// 原言語側パターンを共有する規則の集合
///
/// 規則は推定コストの昇順に並べ替えられ、並べ替えた結果はそのまま保持されます。
/// 新しい規則が追加されるまで、同じ並びが再利用されます。
#[derive(Debug, Clone)]
pub struct RuleCollection {
    source: Vec<i32>,
    arity: usize,
    rules: Vec<Rule>,
    sorted: bool,
}

impl RuleCollection {
    /// 空の集合を作成します。
    ///
    /// # 引数
    ///
    /// * `source` - この集合の規則が共有する原言語側パターン
    pub fn new(source: Vec<i32>) -> Self {
        let arity = source.iter().filter(|&&sym| sym < 0).count();
        Self {
            source,
            arity,
            rules: vec![],
            sorted: false,
        }
    }

    /// 共有されている原言語側パターンを返します。
    #[inline(always)]
    pub fn source_side(&self) -> &[i32] {
        &self.source
    }

    /// パターン中の非終端記号の数を返します。
    #[inline(always)]
    pub const fn arity(&self) -> usize {
        self.arity
    }

    /// 規則を現在の並びのまま返します。
    ///
    /// [`is_sorted()`](Self::is_sorted)が`true`の場合、推定コストの昇順に並んでいます。
    #[inline(always)]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    #[inline(always)]
    pub const fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// 規則を追加します。保持している並びは無効になります。
    pub fn add_rule(&mut self, rule: Rule) {
        debug_assert_eq!(rule.source(), self.source.as_slice());
        self.rules.push(rule);
        self.sorted = false;
    }

    /// 規則を推定コストの昇順に並べ替えます。
    ///
    /// 推定コストが未計算の規則についてはここで計算します。並べ替えは安定で、
    /// コストが等しい規則は追加された順序を保ちます。コストが`NaN`の規則は末尾に置かれます。
    /// すでに並べ替え済みの場合は何もしません。
    pub fn sort(&mut self, model: &ScoringModel) {
        if self.sorted {
            return;
        }
        for rule in &mut self.rules {
            rule.estimate_cost(model);
        }
        self.rules.sort_by(|a, b| sort_key(a).total_cmp(&sort_key(b)));
        self.sorted = true;
    }

    /// 推定コストの昇順に並んだ規則を返します。
    ///
    /// 初回の呼び出しで並べ替え、以降は保持している並びを返します。
    pub fn sorted_rules(&mut self, model: &ScoringModel) -> &[Rule] {
        self.sort(model);
        &self.rules
    }
}

fn sort_key(rule: &Rule) -> f32 {
    match rule.estimated_cost() {
        Some(cost) if !cost.is_nan() => cost,
        _ => f32::INFINITY,
    }
}
