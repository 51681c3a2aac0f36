use super::domain::tokenize;

/// Levenshtein distance over characters.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let n = b_chars.len();

    let mut previous: Vec<usize> = (0..=n).collect();
    let mut current = vec![0usize; n + 1];

    for (i, a_char) in a_chars.iter().enumerate() {
        current[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[n]
}

/// Word-order-insensitive similarity in `[0, 1]`.
///
/// Both texts are tokenized, sorted and re-joined before comparing, so
/// punctuation, casing and word order do not count against the speaker.
pub fn token_sort_similarity(spoken: &str, reference: &str) -> f64 {
    let left = sorted_tokens(spoken);
    let right = sorted_tokens(reference);

    let longest = left.chars().count().max(right.chars().count());
    if longest == 0 {
        return 1.0;
    }

    let distance = levenshtein_distance(&left, &right);
    (1.0 - distance as f64 / longest as f64).clamp(0.0, 1.0)
}

fn sorted_tokens(text: &str) -> String {
    let mut tokens = tokenize(text);
    tokens.sort_unstable();
    tokens.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levenshtein_basics() {
        assert_eq!(levenshtein_distance("hola", "hola"), 0);
        assert_eq!(levenshtein_distance("hola", "ola"), 1);
        assert_eq!(levenshtein_distance("casa", "cosa"), 1);
        assert_eq!(levenshtein_distance("", "día"), 3);
        assert_eq!(levenshtein_distance("abc", "xyz"), 3);
    }

    #[test]
    fn identical_phrases_ignore_case_and_punctuation() {
        let similarity = token_sort_similarity(
            "hola cómo estás espero que estés teniendo un buen día",
            "Hola, ¿cómo estás? Espero que estés teniendo un buen día.",
        );
        assert_eq!(similarity, 1.0);
    }

    #[test]
    fn word_order_does_not_matter() {
        assert_eq!(token_sort_similarity("días buenos", "buenos días"), 1.0);
    }

    #[test]
    fn unrelated_and_empty_inputs_stay_in_range() {
        let unrelated = token_sort_similarity("xyz", "Los bomberos llegaron");
        assert!((0.0..0.2).contains(&unrelated));
        assert_eq!(token_sort_similarity("", "Hola"), 0.0);
        assert_eq!(token_sort_similarity("", ""), 1.0);
    }
}
