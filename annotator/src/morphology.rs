//! Rule-based verb to gerund-label conversion.

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u'];

/// Prefixes tried by [`strip_prefixes`].
pub const PREFIXES: &[&str] = &[
    "un", "re", "in", "im", "dis", "non", "pre", "post", "mis", "over", "under", "sub", "super",
    "anti", "inter",
];

fn is_vowel(c: char) -> bool {
    VOWELS.contains(&c)
}

/// Turns a verb lemma into its capitalized gerund class name.
///
/// - `ie` becomes `ying` (`die` → `Dying`)
/// - a trailing `e` is dropped unless the word ends in `ee` (`slice` → `Slicing`)
/// - a final consonant-vowel-consonant doubles its last letter, except for
///   `w`, `x` and `y` (`cut` → `Cutting`, `mix` → `Mixing`)
/// - anything else takes `ing` (`pour` → `Pouring`)
///
/// A word that already ends in `ing` is only capitalized.
#[must_use]
pub fn to_participle(word: &str) -> String {
    let lemma = word.trim().to_lowercase();
    if lemma.is_empty() {
        return lemma;
    }
    if lemma.ends_with("ing") && lemma.len() > 4 {
        return capitalize(&lemma);
    }

    let chars: Vec<char> = lemma.chars().collect();
    let n = chars.len();
    let participle = if let Some(stem) = lemma.strip_suffix("ie") {
        format!("{stem}ying")
    } else if lemma.ends_with('e') && !lemma.ends_with("ee") {
        format!("{}ing", &lemma[..lemma.len() - 1])
    } else if n > 2
        && !is_vowel(chars[n - 1])
        && !matches!(chars[n - 1], 'w' | 'x' | 'y')
        && is_vowel(chars[n - 2])
        && !is_vowel(chars[n - 3])
    {
        format!("{lemma}{}ing", chars[n - 1])
    } else {
        format!("{lemma}ing")
    };
    capitalize(&participle)
}

/// Every remainder of `word` after one of the [`PREFIXES`], in table order.
///
/// Remainders shorter than three letters are dropped.
#[must_use]
pub fn strip_prefixes(word: &str) -> Vec<&str> {
    PREFIXES
        .iter()
        .filter_map(|prefix| word.strip_prefix(prefix))
        .filter(|rest| rest.len() >= 3)
        .collect()
}

/// Candidate lemmas for an inflected token, the token itself first.
///
/// `slices` yields `slices`, `slic` and `slice`; the caller keeps whichever
/// one lands in its lexicon.
#[must_use]
pub fn candidate_lemmas(token: &str) -> Vec<String> {
    let mut out = vec![token.to_owned()];
    let mut push = |stem: &str| {
        if stem.len() >= 2 && !out.iter().any(|c| c == stem) {
            out.push(stem.to_owned());
        }
    };
    if let Some(stem) = token.strip_suffix("ing") {
        push(stem);
        push(&format!("{stem}e"));
        if let Some(undoubled) = undouble(stem) {
            push(undoubled);
        }
    }
    if let Some(stem) = token.strip_suffix("ied") {
        push(&format!("{stem}y"));
    }
    if let Some(stem) = token.strip_suffix("ed") {
        push(stem);
        if let Some(undoubled) = undouble(stem) {
            push(undoubled);
        }
    }
    if let Some(stem) = token.strip_suffix('d') {
        push(stem);
    }
    if let Some(stem) = token.strip_suffix("es") {
        push(stem);
    }
    if let Some(stem) = token.strip_suffix('s') {
        push(stem);
    }
    out
}

/// `cutt` → `cut`: drops a doubled final consonant.
fn undouble(stem: &str) -> Option<&str> {
    let mut rev = stem.chars().rev();
    match (rev.next(), rev.next()) {
        (Some(a), Some(b)) if a == b && !is_vowel(a) => Some(&stem[..stem.len() - a.len_utf8()]),
        _ => None,
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn participle_rules() {
        assert_eq!(to_participle("die"), "Dying");
        assert_eq!(to_participle("slice"), "Slicing");
        assert_eq!(to_participle("free"), "Freeing");
        assert_eq!(to_participle("cut"), "Cutting");
        assert_eq!(to_participle("chop"), "Chopping");
        assert_eq!(to_participle("pour"), "Pouring");
        assert_eq!(to_participle("mix"), "Mixing");
        assert_eq!(to_participle("stew"), "Stewing");
        assert_eq!(to_participle("go"), "Going");
        assert_eq!(to_participle("Blend"), "Blending");
    }

    #[test]
    fn gerunds_are_only_capitalized() {
        assert_eq!(to_participle("slicing"), "Slicing");
        assert_eq!(to_participle("Mixing"), "Mixing");
    }

    #[test]
    fn prefixes() {
        assert_eq!(strip_prefixes("reheat"), vec!["heat"]);
        assert_eq!(strip_prefixes("premix"), vec!["mix"]);
        assert_eq!(strip_prefixes("undercut"), vec!["dercut", "cut"]);
        assert!(strip_prefixes("red").is_empty());
        assert!(strip_prefixes("slice").is_empty());
    }

    #[test]
    fn lemma_candidates() {
        assert!(candidate_lemmas("slices").contains(&"slice".to_owned()));
        assert!(candidate_lemmas("sliced").contains(&"slice".to_owned()));
        assert!(candidate_lemmas("chopped").contains(&"chop".to_owned()));
        assert!(candidate_lemmas("mixes").contains(&"mix".to_owned()));
        assert!(candidate_lemmas("cutting").contains(&"cut".to_owned()));
        assert!(candidate_lemmas("fried").contains(&"fry".to_owned()));
        assert_eq!(candidate_lemmas("cut"), vec!["cut".to_owned()]);
    }
}
