//! SignalFusion: one conflict score from many detector signals.
//!
//! 1. Early decision: a fast detector above the early confidence and its
//!    kind's value cutoff lets the caller skip slower detectors.
//! 2. Weighted mean: `sum(value * weight * confidence) / sum(weight * confidence)`
//!    over signals whose confidence clears the floor.
//! 3. Threshold: `score > dynamic_threshold`.
//! 4. Band: qualitative label for the reasoning text only.

pub mod threshold;

pub use threshold::{dynamic_threshold, ThresholdContext};

use concord_core::config::{FusionConfig, ThresholdConfig};
use concord_core::models::{ConfidenceBand, FusedDecision, Signal};

pub struct SignalFusion {
    fusion: FusionConfig,
    threshold: ThresholdConfig,
}

impl SignalFusion {
    pub fn new(fusion: FusionConfig, threshold: ThresholdConfig) -> Self {
        Self { fusion, threshold }
    }

    pub fn config(&self) -> &FusionConfig {
        &self.fusion
    }

    /// First signal that justifies not waiting for slower detectors.
    pub fn early_decision<'a>(&self, signals: &'a [Signal]) -> Option<&'a Signal> {
        signals.iter().find(|s| {
            s.confidence > self.fusion.early_confidence
                && self
                    .fusion
                    .early_value_for(s.kind)
                    .is_some_and(|cutoff| s.value > cutoff)
        })
    }

    /// Confidence-weighted mean, or `None` when no signal clears the floor.
    pub fn weighted_score(&self, signals: &[Signal]) -> Option<f64> {
        let mut score = 0.0;
        let mut weight = 0.0;
        for s in signals.iter().filter(|s| s.confidence > self.fusion.confidence_floor) {
            let w = self.fusion.weight_for(s.kind) * s.confidence;
            score += s.value * w;
            weight += w;
        }
        (weight > 0.0).then(|| score / weight)
    }

    pub fn threshold_for(&self, ctx: &ThresholdContext) -> f64 {
        dynamic_threshold(&self.threshold, ctx)
    }

    /// Fuse against the base threshold.
    pub fn fuse(&self, signals: Vec<Signal>) -> FusedDecision {
        self.fuse_with_context(signals, &ThresholdContext::default())
    }

    /// Fuse into a partial decision. Pattern and strategy are left for later stages.
    pub fn fuse_with_context(&self, signals: Vec<Signal>, ctx: &ThresholdContext) -> FusedDecision {
        let early = self.early_decision(&signals).map(|s| s.kind);
        let threshold = self.threshold_for(ctx);

        let Some(score) = self.weighted_score(&signals) else {
            let mut decision = FusedDecision::silent(format!(
                "no usable signal from {} detector(s); staying silent",
                signals.len()
            ));
            decision.threshold = threshold;
            decision.signals = signals;
            return decision;
        };

        let provisional_urgency = 1 + (score * 4.0).floor() as i64;
        let mut decision = FusedDecision::new(score, provisional_urgency, threshold);
        decision.should_intervene = decision.conflict_score > decision.threshold;
        decision.early_decision = early.is_some();
        decision.reasoning = reasoning(&decision, &signals, early.map(|k| k.as_str()));
        decision.signals = signals;
        decision
    }
}

impl Default for SignalFusion {
    fn default() -> Self {
        Self::new(FusionConfig::default(), ThresholdConfig::default())
    }
}

fn reasoning(decision: &FusedDecision, signals: &[Signal], early: Option<&str>) -> String {
    let listed: Vec<String> = signals.iter().map(|s| s.to_string()).collect();
    let mut text = format!(
        "score {:.2} ({} confidence) vs threshold {:.2}: {}",
        decision.conflict_score,
        ConfidenceBand::from_score(decision.conflict_score),
        decision.threshold,
        listed.join("; ")
    );
    if let Some(kind) = early {
        text.push_str(&format!("; early decision on {kind}"));
    }
    text
}
