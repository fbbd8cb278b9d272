/*!
 * Tests for language tag utilities
 */

use mdxlate::language_utils::{
    get_language_name, language_tags_match, split_language_tag, validate_language_tag,
};

/// Region subtags split off and normalize their case
#[test]
fn test_split_language_tag_withRegion_shouldNormalizeCase() {
    assert_eq!(
        split_language_tag("pt-br"),
        ("pt".to_string(), Some("BR".to_string()))
    );
    assert_eq!(
        split_language_tag("PT_BR"),
        ("pt".to_string(), Some("BR".to_string()))
    );
    assert_eq!(split_language_tag("fr"), ("fr".to_string(), None));
}

/// Known primary subtags validate, including three-letter codes
#[test]
fn test_validate_language_tag_withKnownTags_shouldPass() {
    for tag in ["pt-BR", "fr", "es", "deu", "en-US"] {
        assert!(validate_language_tag(tag).is_ok(), "'{}' should validate", tag);
    }
}

/// Unknown primary subtags are rejected
#[test]
fn test_validate_language_tag_withUnknownTags_shouldFail() {
    for tag in ["zz", "zz-ZZ", "", "p"] {
        assert!(validate_language_tag(tag).is_err(), "'{}' should be rejected", tag);
    }
}

/// Display names keep the region qualifier
#[test]
fn test_get_language_name_withRegion_shouldIncludeRegion() {
    assert_eq!(get_language_name("pt-BR").unwrap(), "Portuguese (BR)");
    assert_eq!(get_language_name("fr").unwrap(), "French");
}

/// Tags match on their primary language regardless of region
#[test]
fn test_language_tags_match_shouldIgnoreRegion() {
    assert!(language_tags_match("pt-BR", "pt"));
    assert!(language_tags_match("pt-BR", "pt-PT"));
    assert!(!language_tags_match("pt-BR", "es"));
    assert!(!language_tags_match("zz", "zz"));
}
