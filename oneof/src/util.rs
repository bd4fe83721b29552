//! Name suggestions for unknown identifiers

/// Levenshtein distance between `a` and `b`, counted in characters.
/// Keeps a single row of the edit matrix.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = diagonal + usize::from(ca != *cb);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(diagonal + 1);
        }
    }

    row[b.len()]
}

/// Candidate closest to `name` within `threshold` edits. Ties keep the
/// earliest candidate.
pub fn closest_name<'a>(
    name: &str,
    candidates: impl IntoIterator<Item = &'a str>,
    threshold: usize,
) -> Option<&'a str> {
    candidates
        .into_iter()
        .map(|candidate| (edit_distance(name, candidate), candidate))
        .filter(|(distance, _)| *distance <= threshold)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, candidate)| candidate)
}

/// `did you mean` line appended to an error message, empty without a
/// suggestion
pub fn suggestion_hint(suggestion: Option<&str>) -> String {
    suggestion
        .map(|name| format!("\n  hint: did you mean `{name}`?"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("Option", "Option"), 0);
        assert_eq!(edit_distance("Strng", "String"), 1);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("Int", "int"), 1);
    }

    #[test]
    fn test_edit_distance_empty() {
        assert_eq!(edit_distance("", ""), 0);
        assert_eq!(edit_distance("Bool", ""), 4);
        assert_eq!(edit_distance("", "Bool"), 4);
    }

    #[test]
    fn test_closest_name() {
        let names = ["Option", "Either", "String"];
        assert_eq!(closest_name("Optoin", names, 2), Some("Option"));
        assert_eq!(closest_name("Strin", names, 2), Some("String"));
        assert_eq!(closest_name("Pair", names, 2), None);
    }

    #[test]
    fn test_closest_name_prefers_first_on_tie() {
        assert_eq!(closest_name("Bat", ["Cat", "Hat"], 1), Some("Cat"));
    }

    #[test]
    fn test_suggestion_hint() {
        assert_eq!(
            suggestion_hint(Some("Color")),
            "\n  hint: did you mean `Color`?"
        );
        assert_eq!(suggestion_hint(None), "");
    }
}
