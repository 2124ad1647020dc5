//! @ai:module:intent Character-level edit distance primitives
//! @ai:module:layer domain
//! @ai:module:public_api strip_spaces, char_len, levenshtein, normalized_edit_distance
//! @ai:module:stateless true

/// @ai:intent Remove every literal space character, leaving other whitespace intact
/// @ai:effects pure
pub fn strip_spaces(text: &str) -> String {
    text.chars().filter(|&c| c != ' ').collect()
}

/// @ai:intent Length of a string in characters
/// @ai:effects pure
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// @ai:intent Levenshtein distance over Unicode scalar values
/// @ai:effects pure
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two rows, sized by the shorter input.
    let (short, long) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
    let m = short.len();
    let mut prev: Vec<usize> = (0..=m).collect();
    let mut curr = vec![0usize; m + 1];

    for (i, lc) in long.iter().enumerate() {
        curr[0] = i + 1;
        for j in 1..=m {
            let cost = usize::from(*lc != short[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[m]
}

/// @ai:intent Edit distance divided by the longer length, floored at one
/// @ai:effects pure
pub fn normalized_edit_distance(a: &str, b: &str) -> f64 {
    let denom = char_len(a).max(char_len(b)).max(1);
    levenshtein(a, b) as f64 / denom as f64
}
