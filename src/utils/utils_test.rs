use crate::util::obfuscate_string;

#[test]
fn test_obfuscate_string_keeps_short_input() {
    assert_eq!(obfuscate_string("", 4), "");
    assert_eq!(obfuscate_string("abcd", 4), "abcd");
    assert_eq!(obfuscate_string("abcdefgh", 4), "abcdefgh");
}

#[test]
fn test_obfuscate_string_masks_middle() {
    assert_eq!(obfuscate_string("abcdefghi", 4), "abcd....fghi");
    assert_eq!(
        obfuscate_string("0123456789abcdefghij", 4),
        "0123....ghij"
    );
    assert_eq!(obfuscate_string("abc", 1), "a....c");
}

#[test]
fn test_obfuscate_string_zero_visible() {
    assert_eq!(obfuscate_string("secret", 0), "....");
}

#[test]
fn test_obfuscate_string_measures_bytes() {
    // 6 characters but 12 bytes.
    assert_eq!(obfuscate_string("éééééé", 4), "éé....éé");
    assert_eq!(obfuscate_string("aéééééé", 4), "aé....éé");
    assert_eq!(obfuscate_string("ab→cdef→gh", 3), "ab....gh");
    assert_eq!(obfuscate_string("éé", 2), "éé");
}
