//! Integration tests for the catalog parser

#[cfg(test)]
mod tests {
    use cyget_errors::{CatalogError, Error};
    use cyget_index::*;
    use cyget_types::CURRENT_SPEC;
    use proptest::prelude::*;

    const SAMPLE: &str = r#"# This file is automatically generated.
release: cygwin
arch: x86_64
setup-timestamp: 1700000000

@ bash
sdesc: "The GNU Bourne Again SHell"
ldesc: "Bash is an sh-compatible shell that incorporates useful
features from the Korn shell (ksh) and C shell (csh).

category: this line belongs to the description
Bash is intended to be a conformant implementation."
category: Base Shells
requires: cygwin libreadline7
version: 5.2.21-1
install: x86_64/release/bash/bash-5.2.21-1.tar.xz 1789012 a3f1c2d4e5b6a7980123456789abcdefa3f1c2d4e5b6a7980123456789abcdef
source: x86_64/release/bash/bash-5.2.21-1-src.tar.xz 10452312 0123456789abcdef0123456789abcdef
[prev]
version: 5.2.15-3
install: x86_64/release/bash/bash-5.2.15-3.tar.xz 1780000 ffffffffffffffffffffffffffffffff
[test]
version: 5.3.0-0.1

@ cygwin
sdesc: "The UNIX emulation engine"
ldesc: "The UNIX emulation engine"
category: Base
requires:
version: 3.5.0-1
install: x86_64/release/cygwin/cygwin-3.5.0-1.tar.xz 1300000 00112233445566778899aabbccddeeff
"#;

    #[test]
    fn test_parse_sample() {
        let catalog = parse_catalog(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 2);

        let bash = catalog.get("bash").unwrap();
        assert_eq!(bash.short_description.as_deref(), Some("The GNU Bourne Again SHell"));
        assert_eq!(
            bash.long_description.as_deref(),
            Some(
                "Bash is an sh-compatible shell that incorporates useful\n\
                 features from the Korn shell (ksh) and C shell (csh).\n\
                 \n\
                 category: this line belongs to the description\n\
                 Bash is intended to be a conformant implementation."
            )
        );
        assert!(bash.in_category("Base"));
        assert!(bash.in_category("Shells"));
        assert!(!bash.in_category("this"));
        assert_eq!(
            bash.requires.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["cygwin", "libreadline7"]
        );

        let current = &bash.specs[CURRENT_SPEC];
        assert_eq!(current.version.as_deref(), Some("5.2.21-1"));
        let binary = current.binary.as_ref().unwrap();
        assert_eq!(binary.path, "x86_64/release/bash/bash-5.2.21-1.tar.xz");
        assert_eq!(binary.size, 1_789_012);
        assert_eq!(current.source.as_ref().unwrap().size, 10_452_312);

        let prev = &bash.specs["prev"];
        assert_eq!(prev.version.as_deref(), Some("5.2.15-3"));
        assert!(prev.binary.is_some());

        let test = &bash.specs["test"];
        assert_eq!(test.version.as_deref(), Some("5.3.0-0.1"));
        assert!(test.binary.is_none());
    }

    #[test]
    fn test_empty_requires_is_empty_set() {
        let catalog = parse_catalog(SAMPLE).unwrap();
        let cygwin = catalog.get("cygwin").unwrap();
        assert!(cygwin.requires.is_empty());
        assert_eq!(cygwin.long_description.as_deref(), Some("The UNIX emulation engine"));
    }

    #[test]
    fn test_spec_section_overwrites() {
        let text = "@ a\n[test]\nversion: 1\n[test]\n";
        let catalog = parse_catalog(text).unwrap();
        assert!(catalog.get("a").unwrap().specs["test"].version.is_none());
    }

    #[test]
    fn test_directive_before_header_is_malformed() {
        let err = parse_catalog("release: cygwin\nversion: 1.0\n@ a\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Catalog(CatalogError::Malformed { line: 2, .. })
        ));
    }

    #[test]
    fn test_unknown_directives_ignored() {
        let catalog = parse_catalog("@ a\nmessage: a \"hello\"\nobsoletes: b\nversion: 2\n").unwrap();
        assert_eq!(
            catalog.get("a").unwrap().specs[CURRENT_SPEC].version.as_deref(),
            Some("2")
        );
    }

    proptest! {
        #[test]
        fn prop_every_header_becomes_a_package(names in proptest::collection::btree_set("[a-z][a-z0-9-]{0,12}", 1..20)) {
            let text: String = names.iter().map(|n| format!("@ {n}\nversion: 1.0\n\n")).collect();
            let catalog = parse_catalog(&text).unwrap();
            prop_assert_eq!(catalog.len(), names.len());
            for name in &names {
                prop_assert!(catalog.contains(name));
            }
        }
    }
}
