//! 探索フェーズとのインターフェースとなる型
//!
//! 素性関数は、探索中に解決済みの子ノード（[`HgNode`]）と入力区間（[`Span`]）を受け取り、
//! 状態を持つ素性は導出の境界情報（[`DpState`]）を返します。

/// 入力文上の区間 `[start, end)`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[inline(always)]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// 区間の長さを返します。
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 状態を持つ素性が導出ごとに生成する状態
///
/// 中身は素性ごとに決まる記号列で、探索側は等価性とハッシュ値だけを使って
/// 仮説の再結合を行います。
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DpState {
    symbols: Vec<i32>,
}

impl DpState {
    pub const fn new(symbols: Vec<i32>) -> Self {
        Self { symbols }
    }

    #[inline(always)]
    pub fn symbols(&self) -> &[i32] {
        &self.symbols
    }
}

/// ハイパーグラフのノード
///
/// ある区間をある非終端記号で覆う導出の集合を表し、状態を持つ素性ごとの状態を
/// 状態インデックスの位置に保持します。
#[derive(Clone, Debug, Default)]
pub struct HgNode {
    span: Span,
    lhs: i32,
    states: Vec<Option<DpState>>,
}

impl HgNode {
    pub const fn new(span: Span, lhs: i32, states: Vec<Option<DpState>>) -> Self {
        Self { span, lhs, states }
    }

    #[inline(always)]
    pub const fn span(&self) -> Span {
        self.span
    }

    #[inline(always)]
    pub const fn lhs(&self) -> i32 {
        self.lhs
    }

    /// 状態インデックス`index`の状態を返します。
    #[inline(always)]
    pub fn state(&self, index: usize) -> Option<&DpState> {
        self.states.get(index)?.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span() {
        let span = Span::new(2, 5);
        assert_eq!(span.len(), 3);
        assert!(!span.is_empty());
        assert!(Span::default().is_empty());
    }

    #[test]
    fn test_node_state() {
        let node = HgNode::new(
            Span::new(0, 1),
            -1,
            vec![None, Some(DpState::new(vec![4, 5]))],
        );
        assert!(node.state(0).is_none());
        assert_eq!(node.state(1).unwrap().symbols(), &[4, 5]);
        assert!(node.state(2).is_none());
        assert_eq!(node.lhs(), -1);
        assert_eq!(node.span(), Span::new(0, 1));
    }
}
