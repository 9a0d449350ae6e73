/// Hidden files and anything whose last character is `b` are not instances.
/// The `b` check is on the literal final character, not an extension.
pub fn is_instance_name(name: &str) -> bool {
    return !(name.starts_with('.') || name.ends_with('b'));
}

#[test]
fn test_instance_names() {
    assert!(!is_instance_name(".hidden"));
    assert!(!is_instance_name(".col"));
    assert!(!is_instance_name("graph3b"));
    assert!(!is_instance_name("queen5_5.b"));
    assert!(!is_instance_name("myciel3.col.b"));
    assert!(is_instance_name("graph3.col"));
    assert!(is_instance_name("graph3.B"));
    assert!(is_instance_name("bgraph"));
    assert!(is_instance_name("le450_5a.col"));
}
