const EXPERIENCE_WEIGHT: f64 = 2.0;
const LANGUAGE_DIVISOR: f64 = 10.0;
const VERIFIED_DOCUMENTS_BONUS: f64 = 10.0;

/// Eligibility score: `experience * 2 + language_score / 10 + (verified ? 10 : 0)`.
///
/// Inputs are assumed to be range-checked upstream. Job minimums play no part here; they only
/// gate the eligibility decision.
pub fn calculate_eligibility_score(
    experience: u32,
    language_score: u8,
    documents_verified: bool,
) -> f64 {
    let bonus = if documents_verified {
        VERIFIED_DOCUMENTS_BONUS
    } else {
        0.0
    };

    f64::from(experience) * EXPERIENCE_WEIGHT + f64::from(language_score) / LANGUAGE_DIVISOR + bonus
}
