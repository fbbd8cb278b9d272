/*!
 * Tests for the length-parity validator
 */

use mdxlate::validation::LengthValidator;

/// Translations within the ratio band pass silently
#[test]
fn test_check_withParityInBand_shouldPass() {
    let validator = LengthValidator::new(0.6, 1.6);

    assert!(validator.check("hello world", "olá mundo!").is_none());
    assert!(validator.check("abc", "abc").is_none());
}

/// A drastically shorter translation is flagged
#[test]
fn test_check_withTruncatedTranslation_shouldFlag() {
    let validator = LengthValidator::new(0.6, 1.6);
    let source = "a".repeat(100);

    let issue = validator.check(&source, "ok").unwrap();
    assert_eq!(issue.source_len, 100);
    assert_eq!(issue.translated_len, 2);
    assert!(issue.ratio < 0.6);
}

/// A drastically longer translation is flagged
#[test]
fn test_check_withBloatedTranslation_shouldFlag() {
    let validator = LengthValidator::new(0.6, 1.6);
    let translated = "b".repeat(200);

    let issue = validator.check("short source text", &translated).unwrap();
    assert!(issue.ratio > 1.6);
}

/// Empty sources are never flagged
#[test]
fn test_check_withEmptySource_shouldPass() {
    let validator = LengthValidator::default();

    assert!(validator.check("", "anything at all").is_none());
}

/// Lengths count characters, not bytes
#[test]
fn test_check_withMultibyteContent_shouldCountChars() {
    let validator = LengthValidator::new(0.6, 1.6);

    // Equal char counts, different byte counts
    assert!(validator.check("aaaa", "éééé").is_none());
}
