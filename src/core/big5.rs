use crate::domain::model::{SignalParameters, TraitScores};
use crate::utils::error::{Result, SpiralError};

/// Clamp to [0, 100] and round to 2 decimal places.
fn clamp_score(raw: f64) -> f64 {
    (raw.clamp(0.0, 100.0) * 100.0).round() / 100.0
}

/// Maps the signal triple into Big Five scores with the fixed formulas
/// carried over from the source readings. The formulas are the observable
/// contract; changing a constant changes every golden output.
pub fn compute_trait_scores(params: &SignalParameters) -> Result<TraitScores> {
    if params.n == 0 {
        return Err(SpiralError::DivisionByZero);
    }

    let n = params.n;
    let modulus = params.modulus;
    let arm = params.arm;

    let openness = 70.0 + (modulus % 7) as f64 * 4.0 + (n % 13) as f64 * 0.5;
    let conscientiousness =
        60.0 + (modulus - arm).rem_euclid(modulus) as f64 * 3.0 - (n % 10) as f64;
    let extraversion = 50.0 - (arm as f64 - modulus as f64 / 2.0).abs() * 5.0 + (n % 7) as f64;
    let agreeableness = 40.0 + (arm % 5) as f64 * 6.0 - (n % 9) as f64;
    let neuroticism = 30.0 + ((arm * 3) % 17) as f64 + 10000.0 / n as f64;

    Ok(TraitScores {
        openness: clamp_score(openness),
        conscientiousness: clamp_score(conscientiousness),
        extraversion: clamp_score(extraversion),
        agreeableness: clamp_score(agreeableness),
        neuroticism: clamp_score(neuroticism),
    })
}
