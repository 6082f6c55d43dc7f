//! 入力ラティス
//!
//! 入力文はノードと、ノード間を単語で結ぶ辺からなる非巡回グラフとして表されます。
//! ノードは位相順に番号付けされ、辺は常に番号の小さいノードから大きいノードへ向かいます。
//! 単純な単語列は、隣り合うノードを1本ずつの辺で結んだ直線状のラティスになります。

use crate::errors::{HieroError, Result};

/// 辺のラベル
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    word: i32,
}

impl Token {
    #[inline(always)]
    pub const fn new(word: i32) -> Self {
        Self { word }
    }

    /// 原言語単語のID
    #[inline(always)]
    pub const fn word(&self) -> i32 {
        self.word
    }
}

/// ノードから出る辺
#[derive(Clone, Debug)]
pub struct LatticeArc {
    head: usize,
    cost: f32,
    label: Token,
}

impl LatticeArc {
    /// 辺の行き先のノード番号
    #[inline(always)]
    pub const fn head(&self) -> usize {
        self.head
    }

    #[inline(always)]
    pub const fn cost(&self) -> f32 {
        self.cost
    }

    #[inline(always)]
    pub const fn label(&self) -> Token {
        self.label
    }
}

/// ラティスのノード
#[derive(Clone, Debug, Default)]
pub struct LatticeNode {
    id: usize,
    outgoing: Vec<LatticeArc>,
}

impl LatticeNode {
    #[inline(always)]
    pub const fn id(&self) -> usize {
        self.id
    }

    #[inline(always)]
    pub fn outgoing_arcs(&self) -> &[LatticeArc] {
        &self.outgoing
    }
}

/// 入力ラティス
#[derive(Clone, Debug, Default)]
pub struct Lattice {
    nodes: Vec<LatticeNode>,
}

impl Lattice {
    /// 辺のない`num_nodes`個のノードからなるラティスを作成します。
    pub fn new(num_nodes: usize) -> Self {
        Self {
            nodes: (0..num_nodes)
                .map(|id| LatticeNode {
                    id,
                    outgoing: vec![],
                })
                .collect(),
        }
    }

    /// 単語列から直線状のラティスを作成します。辺のコストはすべて0です。
    pub fn from_words(words: &[i32]) -> Self {
        let mut lattice = Self::new(words.len() + 1);
        for (i, &word) in words.iter().enumerate() {
            lattice.nodes[i].outgoing.push(LatticeArc {
                head: i + 1,
                cost: 0.0,
                label: Token::new(word),
            });
        }
        lattice
    }

    /// ノード`tail`からノード`head`への辺を追加します。
    ///
    /// # 引数
    ///
    /// * `tail` - 辺の出発ノード
    /// * `head` - 辺の行き先のノード
    /// * `cost` - 辺のコスト
    /// * `word` - 辺のラベルとなる原言語単語のID
    ///
    /// # エラー
    ///
    /// `tail < head < num_nodes()` を満たさない場合、[`HieroError`]が返されます。
    pub fn add_arc(&mut self, tail: usize, head: usize, cost: f32, word: i32) -> Result<()> {
        if head >= self.nodes.len() {
            return Err(HieroError::invalid_argument(
                "head",
                format!("node {head} is out of range ({} nodes)", self.nodes.len()),
            ));
        }
        if tail >= head {
            return Err(HieroError::invalid_argument(
                "tail",
                format!("arc {tail} -> {head} does not go forward"),
            ));
        }
        self.nodes[tail].outgoing.push(LatticeArc {
            head,
            cost,
            label: Token::new(word),
        });
        Ok(())
    }

    #[inline(always)]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline(always)]
    pub fn node(&self, id: usize) -> Option<&LatticeNode> {
        self.nodes.get(id)
    }

    /// ノードを位相順に返すイテレータを作成します。
    pub fn iter(&self) -> std::slice::Iter<'_, LatticeNode> {
        self.nodes.iter()
    }

    /// すべての辺のラベルの単語IDを返すイテレータを作成します。重複は除かれません。
    pub fn source_words(&self) -> impl Iterator<Item = i32> + '_ {
        self.nodes
            .iter()
            .flat_map(|node| node.outgoing.iter().map(|arc| arc.label.word()))
    }
}

impl<'a> IntoIterator for &'a Lattice {
    type Item = &'a LatticeNode;
    type IntoIter = std::slice::Iter<'a, LatticeNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// 入力ラティス上の経路に沿って累積した情報
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SourcePath {
    path_cost: f32,
}

impl SourcePath {
    #[inline(always)]
    pub const fn path_cost(&self) -> f32 {
        self.path_cost
    }

    /// 辺`arc`をたどった後の経路を返します。
    #[must_use]
    pub fn extend(&self, arc: &LatticeArc) -> Self {
        Self {
            path_cost: self.path_cost + arc.cost,
        }
    }
}
