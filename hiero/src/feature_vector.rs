//! 疎な素性ベクトルと重み
//!
//! 規則が持つ素性値（名前 → 値）と、素性関数の寄与を結合する重み（名前 → 重み）を扱います。

use std::collections::BTreeMap;
use std::fmt;
use std::io::{BufRead, BufReader, Read};
use std::str::FromStr;

use hashbrown::HashMap;

use crate::errors::{HieroError, Result};

/// 疎な素性ベクトル
///
/// 値を持たない素性は0として扱われます。素性は名前順に保持されるため、
/// 走査や重み付き和の計算順序は実行ごとに変わりません。
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FeatureVector {
    values: BTreeMap<String, f32>,
}

impl FeatureVector {
    /// 空の素性ベクトルを作成します。
    pub fn new() -> Self {
        Self::default()
    }

    /// 素性の値を返します。未設定の素性は0です。
    #[inline(always)]
    pub fn get(&self, name: &str) -> f32 {
        self.values.get(name).copied().unwrap_or(0.0)
    }

    /// 素性の値を上書きします。
    pub fn set<S>(&mut self, name: S, value: f32)
    where
        S: Into<String>,
    {
        self.values.insert(name.into(), value);
    }

    /// 素性の値に加算します。
    pub fn add(&mut self, name: &str, value: f32) {
        if let Some(v) = self.values.get_mut(name) {
            *v += value;
        } else {
            self.values.insert(name.to_string(), value);
        }
    }

    /// 設定されている素性の数を返します。
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 素性が一つも設定されていないかどうかを返します。
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(名前, 値)` のイテレータを名前順に返します。
    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> + '_ {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// 重みとの内積を返します。
    pub fn dot(&self, weights: &Weights) -> f32 {
        self.iter().map(|(name, value)| weights.get(name) * value).sum()
    }
}

impl FromIterator<(String, f32)> for FeatureVector {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (String, f32)>,
    {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl FromStr for FeatureVector {
    type Err = HieroError;

    /// 空白区切りの素性列をパースします。
    ///
    /// `name=value` 形式の素性はその名前で、名前のない値は名前なしの値の中での
    /// 出現位置（`"0"`, `"1"`, ...）を名前として格納されます。
    fn from_str(s: &str) -> Result<Self> {
        let mut fv = Self::new();
        let mut unlabeled = 0usize;
        for token in s.split_whitespace() {
            if let Some((name, value)) = token.split_once('=') {
                if name.is_empty() {
                    return Err(HieroError::invalid_format(
                        "features",
                        format!("empty feature name in `{token}`"),
                    ));
                }
                fv.set(name, parse_value(token, value)?);
            } else {
                fv.set(unlabeled.to_string(), parse_value(token, token)?);
                unlabeled += 1;
            }
        }
        Ok(fv)
    }
}

fn parse_value(token: &str, value: &str) -> Result<f32> {
    let value: f32 = value.parse()?;
    if !value.is_finite() {
        return Err(HieroError::invalid_format(
            "features",
            format!("feature value must be finite, got `{token}`"),
        ));
    }
    Ok(value)
}

impl fmt::Display for FeatureVector {
    /// 名前順に `name=value` を空白区切りで出力します。
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.iter().enumerate() {
            if i != 0 {
                f.write_str(" ")?;
            }
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}

/// 素性関数の寄与を結合する重み
///
/// 重みが設定されていない素性の寄与は0になります。
#[derive(Debug, Default, Clone)]
pub struct Weights {
    weights: HashMap<String, f32>,
}

impl Weights {
    /// 空の重みを作成します。
    pub fn new() -> Self {
        Self::default()
    }

    /// 素性の重みを返します。
    #[inline(always)]
    pub fn get(&self, name: &str) -> f32 {
        self.weights.get(name).copied().unwrap_or(0.0)
    }

    /// 素性の重みを設定します。
    pub fn set<S>(&mut self, name: S, weight: f32)
    where
        S: Into<String>,
    {
        self.weights.insert(name.into(), weight);
    }

    /// 重みを設定した新しいインスタンスを返します。
    pub fn with<S>(mut self, name: S, weight: f32) -> Self
    where
        S: Into<String>,
    {
        self.set(name, weight);
        self
    }

    /// 設定されている重みの数を返します。
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// 重みが一つも設定されていないかどうかを返します。
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// `name value` 形式の行からなる重みファイルを読み込みます。
    ///
    /// 空行と `#` で始まる行は無視されます。
    ///
    /// # エラー
    ///
    /// 行の形式が不正な場合、[`HieroError`]が返されます。
    pub fn from_reader<R>(rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let reader = BufReader::new(rdr);
        let mut weights = Self::new();
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut spl = line.split_whitespace();
            match (spl.next(), spl.next(), spl.next()) {
                (Some(name), Some(value), None) => weights.set(name, value.parse()?),
                _ => {
                    return Err(HieroError::invalid_format(
                        "weights",
                        format!("expected `name value`, got `{line}`"),
                    ));
                }
            }
        }
        Ok(weights)
    }
}

impl FromIterator<(String, f32)> for Weights {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (String, f32)>,
    {
        Self {
            weights: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labeled_and_unlabeled() {
        let fv: FeatureVector = "0.5 lex=-1.25 2".parse().unwrap();
        assert_eq!(fv.len(), 3);
        assert_eq!(fv.get("0"), 0.5);
        assert_eq!(fv.get("1"), 2.0);
        assert_eq!(fv.get("lex"), -1.25);
        assert_eq!(fv.get("missing"), 0.0);
    }

    #[test]
    fn test_parse_empty() {
        let fv: FeatureVector = "   ".parse().unwrap();
        assert!(fv.is_empty());
    }

    #[test]
    fn test_parse_invalid() {
        assert!("abc".parse::<FeatureVector>().is_err());
        assert!("=1.0".parse::<FeatureVector>().is_err());
        assert!("x=y".parse::<FeatureVector>().is_err());
    }

    #[test]
    fn test_parse_non_finite() {
        for text in ["p=nan", "p=NaN", "p=inf", "-inf", "0.5 q=-infinity"] {
            assert!(text.parse::<FeatureVector>().is_err(), "{text}");
        }
    }

    #[test]
    fn test_display_is_sorted() {
        let fv: FeatureVector = "b=2 a=1".parse().unwrap();
        assert_eq!(fv.to_string(), "a=1 b=2");
    }

    #[test]
    fn test_add_and_dot() {
        let mut fv = FeatureVector::new();
        fv.add("x", 1.0);
        fv.add("x", 2.0);
        fv.set("y", 4.0);
        let weights = Weights::new().with("x", 0.5).with("z", 10.0);
        assert_eq!(fv.get("x"), 3.0);
        assert_eq!(fv.dot(&weights), 1.5);
    }

    #[test]
    fn test_weights_from_reader() {
        let data = "# weights\nWordPenalty -1\n\ntm_0_0 0.5\n";
        let weights = Weights::from_reader(data.as_bytes()).unwrap();
        assert_eq!(weights.len(), 2);
        assert_eq!(weights.get("WordPenalty"), -1.0);
        assert_eq!(weights.get("tm_0_0"), 0.5);
        assert_eq!(weights.get("lm_0"), 0.0);
    }

    #[test]
    fn test_weights_from_reader_invalid() {
        assert!(Weights::from_reader("WordPenalty".as_bytes()).is_err());
        assert!(Weights::from_reader("WordPenalty 1 2".as_bytes()).is_err());
        assert!(Weights::from_reader("WordPenalty one".as_bytes()).is_err());
    }
}
