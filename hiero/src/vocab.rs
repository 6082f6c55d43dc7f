//! 記号表（語彙）
//!
//! このモジュールは、原言語・目的言語の記号と密な整数IDとの双方向の対応を提供します。
//! 終端記号は0以上のID、非終端記号（`[X]`など）は負のIDを持ちます。

use hashbrown::HashMap;

use crate::errors::{HieroError, Result};

/// 未知語を表す予約記号
pub const UNKNOWN_SYM: &str = "<unk>";
/// 文頭を表す予約記号
pub const START_SYM: &str = "<s>";
/// 文末を表す予約記号
pub const STOP_SYM: &str = "</s>";

/// [`UNKNOWN_SYM`]のID
pub const UNKNOWN_ID: i32 = 0;
/// [`START_SYM`]のID
pub const START_ID: i32 = 1;
/// [`STOP_SYM`]のID
pub const STOP_ID: i32 = 2;

/// OOV規則の合成で参照される記号表のビュー
///
/// ラティス中の単語IDが既知かどうか、およびどのIDが文頭・文末記号かを問い合わせます。
pub trait SymbolTable {
    /// 指定されたIDが記号表に登録されているかどうかを返します。
    fn has_id(&self, id: i32) -> bool;

    /// 文頭記号のIDを返します。
    fn start_id(&self) -> i32 {
        START_ID
    }

    /// 文末記号のIDを返します。
    fn stop_id(&self) -> i32 {
        STOP_ID
    }
}

/// 記号表
///
/// 記号は登録順に密なIDを割り当てられます。非終端記号は`[`で始まり`]`で終わる記号で、
/// `-1, -2, ...` の順に割り当てられます。
#[derive(Debug, Clone)]
pub struct Vocabulary {
    ids: HashMap<String, i32>,
    terminals: Vec<String>,
    nonterminals: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
    }
}

impl Vocabulary {
    /// 予約記号のみを含む記号表を作成します。
    pub fn new() -> Self {
        let mut vocab = Self {
            ids: HashMap::new(),
            terminals: vec![],
            nonterminals: vec![],
        };
        for (sym, id) in [(UNKNOWN_SYM, UNKNOWN_ID), (START_SYM, START_ID), (STOP_SYM, STOP_ID)] {
            vocab.terminals.push(sym.to_string());
            vocab.ids.insert(sym.to_string(), id);
        }
        vocab
    }

    /// 記号が非終端記号の書式（`[...]`）かどうかを判定します。
    #[inline(always)]
    pub fn is_nonterminal_symbol(sym: &str) -> bool {
        sym.len() > 2 && sym.starts_with('[') && sym.ends_with(']')
    }

    /// IDが非終端記号を指すかどうかを判定します。
    #[inline(always)]
    pub const fn is_nonterminal(id: i32) -> bool {
        id < 0
    }

    /// 記号のIDを返します。未登録の場合は新しく登録します。
    ///
    /// # エラー
    ///
    /// IDの範囲を使い切った場合、[`HieroError`]が返されます。
    pub fn id(&mut self, sym: &str) -> Result<i32> {
        if let Some(&id) = self.ids.get(sym) {
            return Ok(id);
        }
        let id = if Self::is_nonterminal_symbol(sym) {
            self.nonterminals.push(sym.to_string());
            i32::try_from(self.nonterminals.len())
                .map(|n| -n)
                .map_err(|_| HieroError::invalid_state("vocabulary is full", sym))?
        } else {
            let id = i32::try_from(self.terminals.len())
                .map_err(|_| HieroError::invalid_state("vocabulary is full", sym))?;
            self.terminals.push(sym.to_string());
            id
        };
        self.ids.insert(sym.to_string(), id);
        Ok(id)
    }

    /// 登録済みの記号のIDを返します。記号表は変更しません。
    pub fn get(&self, sym: &str) -> Option<i32> {
        self.ids.get(sym).copied()
    }

    /// IDに対応する記号を返します。
    pub fn word(&self, id: i32) -> Option<&str> {
        if id < 0 {
            let idx = usize::try_from(-(i64::from(id)) - 1).ok()?;
            self.nonterminals.get(idx).map(String::as_str)
        } else {
            let idx = usize::try_from(id).ok()?;
            self.terminals.get(idx).map(String::as_str)
        }
    }

    /// 登録されている記号の総数を返します。
    pub fn len(&self) -> usize {
        self.terminals.len() + self.nonterminals.len()
    }

    /// 予約記号以外に何も登録されていないかどうかを返します。
    pub fn is_empty(&self) -> bool {
        self.nonterminals.is_empty() && self.terminals.len() <= 3
    }
}

impl SymbolTable for Vocabulary {
    fn has_id(&self, id: i32) -> bool {
        self.word(id).is_some()
    }
}
