//! Player answer interpretation

/// Answers accepted as "yes" after trimming and lower-casing.
pub const AFFIRMATIVE_ANSWERS: [&str; 4] = ["y", "yes", "yup", "sure"];

/// True iff `input` is one of [`AFFIRMATIVE_ANSWERS`].
///
/// Everything else, including empty input, counts as "no".
pub fn is_affirmative(input: &str) -> bool {
    let normalized = input.trim().to_lowercase();
    AFFIRMATIVE_ANSWERS.contains(&normalized.as_str())
}
