//! テスト用ユーティリティ
//!
//! テストコードで使用する便利なマクロや関数を提供します。

use crate::feature_vector::Weights;
use crate::ff::{FeatureFunction, ScoringModel, WordPenalty};

/// `name => value` の組から素性ベクトルを作成します。
macro_rules! features {
    ( $($k:expr => $v:expr,)* ) => {
        {
            #[allow(unused_mut)]
            let mut fv = $crate::feature_vector::FeatureVector::new();
            $(
                fv.set($k, $v);
            )*
            fv
        }
    };
    ( $($k:expr => $v:expr),* ) => {
        features![$( $k => $v, )*]
    };
}

pub(crate) use features;

/// 語数罰則だけを重み1で使うモデルを作成します。
pub(crate) fn word_penalty_model(omega: f32) -> ScoringModel {
    ScoringModel::new(
        vec![FeatureFunction::stateless(WordPenalty::with_omega(omega))],
        Weights::new().with(WordPenalty::NAME, 1.0),
    )
}

/// 浮動小数点数がほぼ等しいことを確認します。
pub(crate) fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() <= 1e-5 * expected.abs().max(1.0),
        "{actual} != {expected}",
    );
}
