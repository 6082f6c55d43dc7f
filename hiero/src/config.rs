//! 文法の構築オプション

use crate::errors::{HieroError, Result};
use crate::vocab::Vocabulary;

/// 文法の構築時に指定するオプション
///
/// # 例
///
/// ```
/// use hiero_grammar::GrammarConfig;
///
/// let config = GrammarConfig::new()
///     .owner(1)
///     .span_limit(0)
///     .default_nonterminal("[S]")?;
/// assert_eq!(config.get_span_limit(), None);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct GrammarConfig {
    owner: i32,
    span_limit: Option<usize>,
    default_nonterminal: String,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            owner: 0,
            span_limit: Some(Self::DEFAULT_SPAN_LIMIT),
            default_nonterminal: Self::DEFAULT_NONTERMINAL.to_string(),
        }
    }
}

impl GrammarConfig {
    /// 規則が覆うことのできる入力の最大スパンの既定値
    pub const DEFAULT_SPAN_LIMIT: usize = 20;

    /// OOV規則などの左辺に使う非終端記号の既定値
    pub const DEFAULT_NONTERMINAL: &'static str = "[X]";

    pub fn new() -> Self {
        Self::default()
    }

    /// 規則の素性に適用される重みの所有者IDを指定します。
    pub const fn owner(mut self, owner: i32) -> Self {
        self.owner = owner;
        self
    }

    /// 規則が覆うことのできる入力の最大スパンを指定します。
    ///
    /// # 引数
    ///
    /// * `span_limit` - 最大スパン。0は無制限を示します。
    pub const fn span_limit(mut self, span_limit: usize) -> Self {
        if span_limit != 0 {
            self.span_limit = Some(span_limit);
        } else {
            self.span_limit = None;
        }
        self
    }

    /// OOV規則などの左辺に使う非終端記号を指定します。
    ///
    /// # エラー
    ///
    /// `[`で始まり`]`で終わる記号でない場合、[`HieroError`]が返されます。
    pub fn default_nonterminal<S>(mut self, symbol: S) -> Result<Self>
    where
        S: Into<String>,
    {
        let symbol = symbol.into();
        if !Vocabulary::is_nonterminal_symbol(&symbol) {
            return Err(HieroError::invalid_argument(
                "default_nonterminal",
                format!("`{symbol}` is not a nonterminal symbol"),
            ));
        }
        self.default_nonterminal = symbol;
        Ok(self)
    }

    #[inline(always)]
    pub const fn get_owner(&self) -> i32 {
        self.owner
    }

    #[inline(always)]
    pub const fn get_span_limit(&self) -> Option<usize> {
        self.span_limit
    }

    #[inline(always)]
    pub fn get_default_nonterminal(&self) -> &str {
        &self.default_nonterminal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GrammarConfig::new();
        assert_eq!(config.get_owner(), 0);
        assert_eq!(config.get_span_limit(), Some(20));
        assert_eq!(config.get_default_nonterminal(), "[X]");
    }

    #[test]
    fn test_builder() {
        let config = GrammarConfig::new().owner(3).span_limit(7);
        assert_eq!(config.get_owner(), 3);
        assert_eq!(config.get_span_limit(), Some(7));
        assert_eq!(config.span_limit(0).get_span_limit(), None);
    }

    #[test]
    fn test_invalid_nonterminal() {
        assert!(GrammarConfig::new().default_nonterminal("X").is_err());
        assert!(GrammarConfig::new().default_nonterminal("[GOAL]").is_ok());
    }
}
