//! Slug derivation and validation shared by the domain crates

use crate::error::{Error, Result};

/// Maximum slug length (generated slugs are truncated to fit)
pub const MAX_SLUG_LENGTH: usize = 100;

/// Validate slug format: lowercase alphanumeric + hyphens, no
/// leading/trailing/consecutive hyphens
pub fn validate_slug(slug: &str) -> Result<()> {
    if slug.is_empty() || slug.len() > MAX_SLUG_LENGTH {
        return Err(Error::Validation(format!(
            "Slug must be 1-{} characters",
            MAX_SLUG_LENGTH
        )));
    }

    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(Error::Validation(
            "Slug must contain only lowercase letters, numbers, and hyphens".to_string(),
        ));
    }

    if slug.starts_with('-') || slug.ends_with('-') {
        return Err(Error::Validation(
            "Slug cannot start or end with a hyphen".to_string(),
        ));
    }

    if slug.contains("--") {
        return Err(Error::Validation(
            "Slug cannot contain consecutive hyphens".to_string(),
        ));
    }

    Ok(())
}

/// Derive a slug from free text: lowercase, non-alphanumerics to
/// hyphens, collapsed and trimmed, truncated to the slug limit
pub fn slugify(text: &str) -> Result<String> {
    let raw = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect::<String>();

    let mut slug = String::with_capacity(raw.len());
    let mut prev_hyphen = false;
    for ch in raw.chars() {
        if ch == '-' {
            if !prev_hyphen {
                slug.push(ch);
            }
            prev_hyphen = true;
        } else {
            slug.push(ch);
            prev_hyphen = false;
        }
    }
    let mut slug = slug.trim_matches('-').to_string();

    if slug.len() > MAX_SLUG_LENGTH {
        slug.truncate(MAX_SLUG_LENGTH);
        slug = slug.trim_end_matches('-').to_string();
    }

    if slug.is_empty() {
        return Err(Error::Validation(
            "Cannot derive a slug from the given text".to_string(),
        ));
    }

    validate_slug(&slug)?;
    Ok(slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Showreel 2025").unwrap(), "showreel-2025");
        assert_eq!(slugify("My  Awesome   Project!").unwrap(), "my-awesome-project");
    }

    #[test]
    fn test_slugify_collapses_and_trims_hyphens() {
        let slug = slugify("--a---b--").unwrap();
        assert_eq!(slug, "a-b");
    }

    #[test]
    fn test_slugify_rejects_unusable_text() {
        assert!(slugify("!!!").is_err());
        assert!(slugify("").is_err());
    }

    #[test]
    fn test_slugify_truncates_long_text() {
        let slug = slugify(&"word ".repeat(100)).unwrap();
        assert!(slug.len() <= MAX_SLUG_LENGTH);
        assert!(!slug.ends_with('-'));
        assert!(validate_slug(&slug).is_ok());
    }

    #[test]
    fn test_validate_slug_boundaries() {
        assert!(validate_slug("a").is_ok());
        assert!(validate_slug(&"a".repeat(MAX_SLUG_LENGTH)).is_ok());
        assert!(validate_slug(&"a".repeat(MAX_SLUG_LENGTH + 1)).is_err());
        assert!(validate_slug("").is_err());
    }

    #[test]
    fn test_validate_slug_format_rules() {
        assert!(validate_slug("showreel-2025").is_ok());
        assert!(validate_slug("UPPERCASE").is_err());
        assert!(validate_slug("with_underscore").is_err());
        assert!(validate_slug("-leading").is_err());
        assert!(validate_slug("trailing-").is_err());
        assert!(validate_slug("a--b").is_err());
    }

    #[test]
    fn test_validate_slug_hostile_input_rejected() {
        assert!(validate_slug("a; DROP TABLE projects").is_err());
        assert!(validate_slug("<script>alert(1)</script>").is_err());
        assert!(validate_slug("../etc/passwd").is_err());
    }
}
