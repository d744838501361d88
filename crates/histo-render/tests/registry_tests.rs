use histo_common::HistoError;
use histo_render::{StyleRegistry, STYLE_NAMES};

#[test]
fn test_all_registered_names_resolve() {
    let registry = StyleRegistry::new();
    for name in STYLE_NAMES {
        let style = registry.resolve(name).unwrap();
        assert_eq!(style.name(), name);
    }
}

#[test]
fn test_style_names_sorted_and_complete() {
    let registry = StyleRegistry::new();
    let names = registry.style_names();
    assert_eq!(names.len(), STYLE_NAMES.len());
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
    for name in STYLE_NAMES {
        assert!(names.contains(&name));
    }
}

#[test]
fn test_unknown_names_rejected() {
    let registry = StyleRegistry::new();
    for bad in ["NEON_GLOW", "Neon_Glow", "", "vaporwave", " tron", "tron "] {
        match registry.resolve(bad) {
            Err(HistoError::UnknownStyle(name)) => assert_eq!(name, bad),
            other => panic!("expected UnknownStyle for {bad:?}, got {other:?}"),
        }
    }
}
