/// Optimal Recognition Point for a word: the char the eye should fixate on.
///
/// Leading punctuation (quotes, brackets) is skipped so the fixation lands
/// inside the word itself.
pub fn orp_index(word: &str) -> usize {
    let lead = word.chars().take_while(|c| !c.is_alphanumeric()).count();
    let core_len = word
        .chars()
        .skip(lead)
        .filter(|c| c.is_alphanumeric())
        .count();

    let offset = match core_len {
        0..=1 => 0,
        2..=5 => 1,
        6..=9 => 2,
        10..=13 => 3,
        _ => 4,
    };

    if core_len == 0 {
        0
    } else {
        lead + offset
    }
}
