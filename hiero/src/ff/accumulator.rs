use crate::feature_vector::{FeatureVector, Weights};

/// 素性関数の出力を受け取る累積器
pub trait Accumulator {
    /// 名前`name`の素性に値`value`を加算します。
    fn add(&mut self, name: &str, value: f32);
}

/// 素性の値に重みを掛けて合計する累積器
pub struct ScoreAccumulator<'a> {
    weights: &'a Weights,
    score: f32,
}

impl<'a> ScoreAccumulator<'a> {
    pub const fn new(weights: &'a Weights) -> Self {
        Self {
            weights,
            score: 0.0,
        }
    }

    /// これまでに加算された重み付きの合計を返します。
    #[inline(always)]
    pub const fn score(&self) -> f32 {
        self.score
    }
}

impl Accumulator for ScoreAccumulator<'_> {
    #[inline(always)]
    fn add(&mut self, name: &str, value: f32) {
        self.score += self.weights.get(name) * value;
    }
}

/// 素性の値を重み付けせずに集める累積器
///
/// 素性値の確認やチューニングに使います。
#[derive(Debug, Default)]
pub struct FeatureAccumulator {
    features: FeatureVector,
}

impl FeatureAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub const fn features(&self) -> &FeatureVector {
        &self.features
    }

    pub fn into_features(self) -> FeatureVector {
        self.features
    }
}

impl Accumulator for FeatureAccumulator {
    fn add(&mut self, name: &str, value: f32) {
        self.features.add(name, value);
    }
}
