use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    static ref RE_NOT_SLUG: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SlugError {
    #[error("empty string not permitted")]
    EmptyInput,
    #[error("after replacing characters, slug length is zero")]
    EmptyResult,
}

/// Lowercases `s` and collapses every run of characters outside ASCII
/// `[a-z0-9]` into a single `-`. Non-ASCII letters are not transliterated.
pub fn slugify(s: &str) -> Result<String, SlugError> {
    if s.is_empty() {
        return Err(SlugError::EmptyInput);
    }

    let lowered = s.to_lowercase();
    let slug = RE_NOT_SLUG.replace_all(&lowered, "-");
    let slug = slug.trim_matches('-');

    if slug.is_empty() {
        return Err(SlugError::EmptyResult);
    }

    Ok(slug.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_cases() {
        let cases = [
            ("mary had a little lamb", Ok("mary-had-a-little-lamb")),
            ("", Err(SlugError::EmptyInput)),
            ("  Leading and trailing!  ", Ok("leading-and-trailing")),
            ("Now is the time for all GOOD men! + fish & such &^123", Ok("now-is-the-time-for-all-good-men-fish-such-123")),
            ("&^%$#@", Err(SlugError::EmptyResult)),
            ("Γειά σου Κόσμε", Err(SlugError::EmptyResult)),
            ("Hello Γειά σου Κόσμε World", Ok("hello-world")),
        ];

        for (input, expected) in cases {
            assert_eq!(
                slugify(input),
                expected.map(|s| s.to_string()),
                "input: {input:?}"
            );
        }
    }
}
