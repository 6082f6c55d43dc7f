//! テキスト形式の規則の読み書き
//!
//! 同期文脈自由文法の規則は1行に1つ、次の形式で記述します。
//!
//! ```text
//! [X] ||| [X,1] de [X,2] ||| [X,2] of [X,1] ||| 0.5 p=-1.2 ||| 1-1
//! ```
//!
//! 左辺、原言語側、目的言語側、素性、（省略可能な）単語アラインメントを`|||`で区切ります。
//! 各欄の前後の空白は無視されるため、行末の`|||`の後に空白がなくても空の素性欄として読み込まれます。
//! 非終端記号は`[X,1]`のように番号付きで書くか、`[X]`のように番号なしで書きます。
//! 番号を省略した非終端記号には出現順に番号が振られます。
//!
//! フレーズテーブルの規則は左辺と非終端記号を持たず、次の形式で記述します。
//!
//! ```text
//! la maison ||| the house ||| 0.5 0.25 ||| 0-0 1-1
//! ```

use crate::errors::{HieroError, Result};
use crate::feature_vector::FeatureVector;
use crate::grammar::Rule;
use crate::vocab::Vocabulary;

/// 規則を書き出すときに各欄を区切る文字列
pub const FIELD_SEPARATOR: &str = " ||| ";

const FIELD_DELIMITER: &str = "|||";

/// `[X,1]`形式の非終端記号を、番号を除いた記号と番号に分解します。
///
/// 非終端記号でなければ`None`を返します。
fn split_nonterminal(token: &str) -> Option<(String, Option<usize>)> {
    let inner = token.strip_prefix('[')?.strip_suffix(']')?;
    if inner.is_empty() {
        return None;
    }
    if let Some((label, index)) = inner.rsplit_once(',')
        && !label.is_empty()
        && let Ok(index) = index.parse::<usize>()
    {
        return Some((format!("[{label}]"), Some(index)));
    }
    Some((token.to_string(), None))
}

fn split_fields<'a>(
    line: &'a str,
    name: &'static str,
    min: usize,
    max: usize,
) -> Result<Vec<&'a str>> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).map(str::trim).collect();
    if fields.len() < min || fields.len() > max {
        let msg = format!("expected {min} to {max} fields separated by `|||`, {line}");
        return Err(HieroError::invalid_format(name, msg));
    }
    Ok(fields)
}

/// 同期文脈自由文法の規則を1行パースします。
///
/// # 引数
///
/// * `line` - 規則の行
/// * `vocab` - 記号を登録する記号表
/// * `owner` - 規則の所有者ID
///
/// # エラー
///
/// 行の形式が不正な場合、または原言語側と目的言語側の非終端記号が対応しない場合、
/// [`HieroError`]が返されます。
pub fn parse_hiero_rule(line: &str, vocab: &mut Vocabulary, owner: i32) -> Result<Rule> {
    let fields = split_fields(line, "rule", 4, 5)?;
    let (lhs_str, source_str, target_str, features_str) =
        (fields[0], fields[1], fields[2], fields[3]);

    let lhs = match split_nonterminal(lhs_str) {
        Some((label, None)) => vocab.id(&label)?,
        _ => {
            let msg = format!("left-hand side must be an unnumbered nonterminal, {line}");
            return Err(HieroError::invalid_format("rule", msg));
        }
    };

    let mut source = vec![];
    let mut arity = 0;
    for token in source_str.split_whitespace() {
        if let Some((label, index)) = split_nonterminal(token) {
            arity += 1;
            if index.is_some_and(|index| index != arity) {
                let msg = format!("source nonterminals must be numbered 1, 2, ... in order, {line}");
                return Err(HieroError::invalid_format("rule", msg));
            }
            source.push(vocab.id(&label)?);
        } else {
            source.push(vocab.id(token)?);
        }
    }
    if source.is_empty() {
        return Err(HieroError::invalid_format("rule", format!("empty source side, {line}")));
    }

    let mut target = vec![];
    let mut used = vec![false; arity];
    let mut next_slot = 0;
    for token in target_str.split_whitespace() {
        if let Some((_, index)) = split_nonterminal(token) {
            let index = index.unwrap_or(next_slot + 1);
            next_slot = index;
            if index == 0 || index > arity || used[index - 1] {
                let msg = format!("target nonterminal `{token}` has no source counterpart, {line}");
                return Err(HieroError::invalid_format("rule", msg));
            }
            used[index - 1] = true;
            target.push(-i32::try_from(index)?);
        } else {
            target.push(vocab.id(token)?);
        }
    }
    if used.iter().any(|&u| !u) {
        let msg = format!("every source nonterminal must appear on the target side, {line}");
        return Err(HieroError::invalid_format("rule", msg));
    }

    let features: FeatureVector = features_str.parse()?;
    let rule = Rule::new(lhs, source, target, features, owner);
    Ok(match fields.get(4) {
        Some(alignment) => rule.with_alignment(*alignment),
        None => rule,
    })
}

/// フレーズテーブルの規則を1行パースします。
///
/// 規則の原言語側と目的言語側の先頭には、非終端記号`nonterminal`が暗黙に置かれます。
///
/// # 引数
///
/// * `line` - 規則の行
/// * `vocab` - 記号を登録する記号表
/// * `owner` - 規則の所有者ID
/// * `nonterminal` - 左辺および先頭の非終端記号のID
///
/// # エラー
///
/// 行の形式が不正な場合、[`HieroError`]が返されます。
pub fn parse_phrase_rule(
    line: &str,
    vocab: &mut Vocabulary,
    owner: i32,
    nonterminal: i32,
) -> Result<Rule> {
    let fields = split_fields(line, "phrase", 3, 4)?;
    let (source_str, target_str, features_str) = (fields[0], fields[1], fields[2]);

    let mut source = vec![nonterminal];
    let mut target = vec![-1];
    for (side, text) in [(&mut source, source_str), (&mut target, target_str)] {
        for token in text.split_whitespace() {
            if split_nonterminal(token).is_some() {
                let msg = format!("phrases cannot contain nonterminals, {line}");
                return Err(HieroError::invalid_format("phrase", msg));
            }
            side.push(vocab.id(token)?);
        }
    }
    if source.len() == 1 {
        return Err(HieroError::invalid_format("phrase", format!("empty source side, {line}")));
    }

    let features: FeatureVector = features_str.parse()?;
    let rule = Rule::new(nonterminal, source, target, features, owner);
    Ok(match fields.get(3) {
        Some(alignment) => rule.with_alignment(*alignment),
        None => rule,
    })
}

/// 規則を同期文脈自由文法のテキスト形式で書き出します。
///
/// 非終端記号には原言語側での出現順に番号が振られます。
///
/// # エラー
///
/// 記号表に登録されていない記号を含む場合、[`HieroError`]が返されます。
pub fn format_hiero_rule(rule: &Rule, vocab: &Vocabulary) -> Result<String> {
    let word = |id: i32| {
        vocab.word(id).ok_or_else(|| {
            HieroError::invalid_argument("rule", format!("symbol {id} is not in the vocabulary"))
        })
    };

    let mut labels = vec![];
    let mut source = vec![];
    for &sym in rule.source() {
        if Vocabulary::is_nonterminal(sym) {
            let label = word(sym)?;
            labels.push(label);
            source.push(numbered(label, labels.len()));
        } else {
            source.push(word(sym)?.to_string());
        }
    }

    let mut target = vec![];
    for &sym in rule.target() {
        if sym < 0 {
            let index = usize::try_from(-i64::from(sym))?;
            let label = labels.get(index - 1).ok_or_else(|| {
                HieroError::invalid_argument("rule", format!("nonterminal slot {index} is unbound"))
            })?;
            target.push(numbered(label, index));
        } else {
            target.push(word(sym)?.to_string());
        }
    }

    let mut line = [
        word(rule.lhs())?.to_string(),
        source.join(" "),
        target.join(" "),
        rule.features().to_string(),
    ]
    .join(FIELD_SEPARATOR);
    if let Some(alignment) = rule.alignment() {
        line.push_str(FIELD_SEPARATOR);
        line.push_str(alignment);
    }
    Ok(line)
}

fn numbered(label: &str, index: usize) -> String {
    let inner = label.strip_suffix(']').unwrap_or(label);
    format!("{inner},{index}]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_nonterminal() {
        assert_eq!(split_nonterminal("[X,2]"), Some(("[X]".to_string(), Some(2))));
        assert_eq!(split_nonterminal("[X]"), Some(("[X]".to_string(), None)));
        assert_eq!(split_nonterminal("[A,B]"), Some(("[A,B]".to_string(), None)));
        assert_eq!(split_nonterminal("[]"), None);
        assert_eq!(split_nonterminal("[,1]"), Some(("[,1]".to_string(), None)));
        assert_eq!(split_nonterminal("maison"), None);
    }

    #[test]
    fn test_parse_hiero_rule() {
        let mut vocab = Vocabulary::new();
        let rule = parse_hiero_rule(
            "[X] ||| [X,1] de [X,2] ||| [X,2] of [X,1] ||| 0.5 p=-1 ||| 1-1",
            &mut vocab,
            1,
        )
        .unwrap();
        let x = vocab.get("[X]").unwrap();
        let de = vocab.get("de").unwrap();
        let of = vocab.get("of").unwrap();
        assert_eq!(rule.lhs(), x);
        assert_eq!(rule.source(), &[x, de, x]);
        assert_eq!(rule.target(), &[-2, of, -1]);
        assert_eq!(rule.arity(), 2);
        assert_eq!(rule.owner(), 1);
        assert_eq!(rule.features().get("0"), 0.5);
        assert_eq!(rule.features().get("p"), -1.0);
        assert_eq!(rule.alignment(), Some("1-1"));
    }

    #[test]
    fn test_unnumbered_nonterminals() {
        let mut vocab = Vocabulary::new();
        let rule = parse_hiero_rule("[S] ||| [S] [X] ||| [S] [X] ||| ", &mut vocab, 0).unwrap();
        assert_eq!(rule.target(), &[-1, -2]);
        assert_eq!(rule.alignment(), None);
        assert!(rule.features().is_empty());
    }

    #[test]
    fn test_empty_trailing_feature_field() {
        let mut vocab = Vocabulary::new();
        let rule = parse_hiero_rule("[S] ||| [X,1] ||| [X,1] |||", &mut vocab, 0).unwrap();
        assert_eq!(rule.target(), &[-1]);
        assert!(rule.features().is_empty());

        let rule = parse_hiero_rule("[X]|||a|||b|||p=1", &mut vocab, 0).unwrap();
        assert_eq!(rule.features().get("p"), 1.0);

        let x = vocab.id("[X]").unwrap();
        let rule = parse_phrase_rule("la ||| the |||", &mut vocab, 0, x).unwrap();
        assert!(rule.features().is_empty());
    }

    #[test]
    fn test_invalid_hiero_rules() {
        let mut vocab = Vocabulary::new();
        for line in [
            "[X] ||| a ||| b",
            "X ||| a ||| b ||| 1",
            "[X] ||| [X,2] a ||| [X,2] b ||| 1",
            "[X] ||| [X,1] a ||| [X,2] b ||| 1",
            "[X] ||| [X,1] a ||| b ||| 1",
            "[X] ||| [X,1] a ||| [X,1] [X,1] ||| 1",
            "[X] ||| a ||| b ||| one",
            "[X] ||| a ||| b ||| p=nan",
            "[X] |||  ||| b ||| 1",
        ] {
            assert!(parse_hiero_rule(line, &mut vocab, 0).is_err(), "{line}");
        }
    }

    #[test]
    fn test_parse_phrase_rule() {
        let mut vocab = Vocabulary::new();
        let x = vocab.id("[X]").unwrap();
        let rule = parse_phrase_rule("la maison ||| the house ||| 0.5 0.25", &mut vocab, 2, x).unwrap();
        let la = vocab.get("la").unwrap();
        let the = vocab.get("the").unwrap();
        assert_eq!(rule.source()[..2], [x, la]);
        assert_eq!(rule.target()[..2], [-1, the]);
        assert_eq!(rule.arity(), 1);
        assert_eq!(rule.features().get("1"), 0.25);

        assert!(parse_phrase_rule("[X] a ||| b ||| 1", &mut vocab, 2, x).is_err());
        assert!(parse_phrase_rule("a ||| b", &mut vocab, 2, x).is_err());
    }

    #[test]
    fn test_format_round_trip() {
        let mut vocab = Vocabulary::new();
        let line = "[X] ||| [X,1] de [Y,2] ||| [Y,2] of [X,1] ||| a=0.5 ||| 1-1";
        let rule = parse_hiero_rule(line, &mut vocab, 0).unwrap();
        assert_eq!(format_hiero_rule(&rule, &vocab).unwrap(), line);

        let unnumbered = parse_hiero_rule("[X] ||| [X] de [Y] ||| [X] of [Y] ||| a=1", &mut vocab, 0).unwrap();
        assert_eq!(
            format_hiero_rule(&unnumbered, &vocab).unwrap(),
            "[X] ||| [X,1] de [Y,2] ||| [X,1] of [Y,2] ||| a=1",
        );
    }
}
