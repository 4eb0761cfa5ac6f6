use crate::domain::model::{ResonanceResult, SignalParameters};

/// Compares two readings by their harmonic values:
/// `score = max(0, 100 − 5·|self.arm − partner.arm|)`.
pub fn compare_resonance(
    self_params: &SignalParameters,
    partner: &SignalParameters,
) -> ResonanceResult {
    let difference = (self_params.arm - partner.arm).abs();
    let score = (100 - difference * 5).max(0);

    ResonanceResult {
        self_harmonic: self_params.arm,
        partner_harmonic: partner.arm,
        difference,
        score,
    }
}
