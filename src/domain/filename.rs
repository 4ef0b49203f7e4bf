//! File name sanitization for user-supplied set and file names

/// Characters that are not allowed in a file name on any supported platform
const INVALID_FILE_NAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Replace every character invalid in a file name with `_`
///
/// Control characters are treated as invalid. An empty name becomes `_` so the
/// result is always usable as a path component.
///
/// # Examples
///
/// ```
/// use setport::domain::filename::sanitize_file_name;
///
/// assert_eq!(sanitize_file_name("Unit A/B: Kitchen?"), "Unit A_B_ Kitchen_");
/// ```
pub fn sanitize_file_name(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_control() || INVALID_FILE_NAME_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect();

    if sanitized.is_empty() {
        "_".to_string()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Kitchen", "Kitchen" ; "plain name untouched")]
    #[test_case("A/B", "A_B" ; "forward slash")]
    #[test_case("A\\B", "A_B" ; "backslash")]
    #[test_case("Level 1: Bath", "Level 1_ Bath" ; "colon")]
    #[test_case("\"Q\"?*", "_Q___" ; "quotes and wildcards")]
    #[test_case("<tab>\t|", "_tab___" ; "angle brackets control and pipe")]
    #[test_case("", "_" ; "empty name")]
    fn test_sanitize_file_name(input: &str, expected: &str) {
        assert_eq!(sanitize_file_name(input), expected);
    }
}
