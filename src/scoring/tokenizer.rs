/// Normalizes an utterance into comparable word tokens.
///
/// Lowercases, strips punctuation outright (letters that were only separated
/// by punctuation become one token, e.g. "don't" -> "dont"), then splits on
/// whitespace runs and drops empty tokens. Empty input yields no tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .filter(|c| !is_punctuation(*c))
        .collect::<String>()
        .split_whitespace()
        .map(|word| word.to_string())
        .collect()
}

fn is_punctuation(c: char) -> bool {
    !c.is_alphanumeric() && !c.is_whitespace()
}
