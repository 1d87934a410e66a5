/// Splits a `;`-separated field into trimmed, non-empty parts. An empty or
/// whitespace-only string normalizes to an empty `Vec`, never a one-element
/// vector holding `""`.
pub fn split_multivalue(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_yields_empty_vec() {
        assert!(split_multivalue("").is_empty());
        assert!(split_multivalue("   ").is_empty());
    }

    #[test]
    fn splits_and_trims_parts() {
        assert_eq!(
            split_multivalue("algemeen; cardio ;; neuro"),
            vec!["algemeen", "cardio", "neuro"]
        );
    }
}
