//! Edit distance between names.
//!
//! Characters are compared by Unicode scalar value (`char`), so a multi-byte
//! name such as "flabébé" counts "é" as one edit, not two. No case folding or
//! locale rules are applied here; callers normalize first.

/// Levenshtein distance: the fewest single-character insertions, deletions
/// and substitutions that turn `a` into `b`.
///
/// Only two rows of the DP table are kept alive.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut cur = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        cur[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            let delete = prev[j + 1] + 1;
            let insert = cur[j] + 1;
            let substitute = prev[j] + cost;
            cur[j + 1] = delete.min(insert).min(substitute);
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    prev[b.len()]
}
