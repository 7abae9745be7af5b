use rand::Rng;

/// Shuffles the letters of `word` with an unbiased Fisher-Yates pass.
///
/// The result is always a permutation of the input. It may come back in the
/// original order (always, for words shorter than two letters); callers that
/// need a visibly different puzzle must retry themselves.
pub fn scramble<R: Rng>(word: &str, rng: &mut R) -> String {
    let mut letters: Vec<char> = word.chars().collect();
    for i in (1..letters.len()).rev() {
        let j = rng.random_range(0..=i);
        letters.swap(i, j);
    }
    letters.into_iter().collect()
}
