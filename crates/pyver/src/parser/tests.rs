use std::str::FromStr;

use insta::assert_snapshot;
use test_case::test_case;

use crate::{InvalidReason, LocalSegment, Prerelease, PrereleaseKind, Version, parse};

/// <https://github.com/pypa/packaging/blob/237ff3aa348486cf835a980592af3a59fccd6101/tests/test_version.py#L24-L81>
#[test]
fn packaging_versions() {
    let versions = [
        // Implicit epoch of 0
        "1.0.dev456",
        "1.0a1",
        "1.0a2.dev456",
        "1.0a12.dev456",
        "1.0a12",
        "1.0b1.dev456",
        "1.0b2",
        "1.0b2.post345.dev456",
        "1.0b2.post345",
        "1.0b2-346",
        "1.0c1.dev456",
        "1.0c1",
        "1.0rc2",
        "1.0c3",
        "1.0",
        "1.0.post456.dev34",
        "1.0.post456",
        "1.1.dev1",
        "1.2+123abc",
        "1.2+123abc456",
        "1.2+abc",
        "1.2+abc123",
        "1.2+abc123def",
        "1.2+1234.abc",
        "1.2+123456",
        "1.2.r32+123456",
        "1.2.rev33+123456",
        // Explicit epoch of 1
        "1!1.0.dev456",
        "1!1.0a1",
        "1!1.0b2-346",
        "1!1.0c3",
        "1!1.0.post456.dev34",
        "1!1.2+1234.abc",
        "1!1.2.rev33+123456",
    ];
    for version in versions {
        assert!(parse(version).is_ok(), "{version}");
    }
}

#[test]
fn fields() {
    let version = parse("2!3.4.5a1.post2.dev3+meta").unwrap();
    assert_eq!(version.epoch(), 2);
    assert_eq!(version.release(), &[3, 4, 5]);
    assert_eq!(
        version.pre(),
        Some(Prerelease {
            kind: PrereleaseKind::Alpha,
            number: 1
        })
    );
    assert_eq!(version.post(), Some(2));
    assert_eq!(version.dev(), Some(3));
    assert_eq!(
        version.local(),
        Some(&[LocalSegment::String("meta".to_string())][..])
    );

    let version = parse("1.0.0").unwrap();
    assert_eq!(version.epoch(), 0);
    assert_eq!(version.pre(), None);
    assert_eq!(version.post(), None);
    assert_eq!(version.dev(), None);
    assert_eq!(version.local(), None);
}

#[test]
fn local_segments_are_typed() {
    let version = parse("1.0+Ubuntu-007_abc.1a").unwrap();
    assert_eq!(
        version.local(),
        Some(
            &[
                LocalSegment::String("ubuntu".to_string()),
                LocalSegment::Number("7".to_string()),
                LocalSegment::String("abc".to_string()),
                LocalSegment::String("1a".to_string()),
            ][..]
        )
    );
}

#[test]
fn numbers_are_read_by_value() {
    let version = parse("0001!01.000.0020rc0003.post04.dev005+0006").unwrap();
    assert_eq!(version.epoch(), 1);
    assert_eq!(version.release(), &[1, 0, 20]);
    assert_eq!(version.pre().map(|pre| pre.number), Some(3));
    assert_eq!(version.post(), Some(4));
    assert_eq!(version.dev(), Some(5));
    assert_eq!(version.local(), Some(&[LocalSegment::Number("6".to_string())][..]));

    // Leading zeros don't count against the size limit.
    let version = parse("000000000000000000000000000000001.0").unwrap();
    assert_eq!(version.release(), &[1, 0]);
}

#[test_case("1.0a", PrereleaseKind::Alpha, 0)]
#[test_case("1.0alpha1", PrereleaseKind::Alpha, 1)]
#[test_case("1.0.ALPHA.2", PrereleaseKind::Alpha, 2)]
#[test_case("1.0-b", PrereleaseKind::Beta, 0)]
#[test_case("1.0_beta_3", PrereleaseKind::Beta, 3)]
#[test_case("1.0c", PrereleaseKind::Rc, 0)]
#[test_case("1.0rc4", PrereleaseKind::Rc, 4)]
#[test_case("1.0.pre5", PrereleaseKind::Rc, 5)]
#[test_case("1.0preview6", PrereleaseKind::Rc, 6)]
#[test_case("1.0-preview", PrereleaseKind::Rc, 0)]
fn prerelease_aliases(input: &str, kind: PrereleaseKind, number: u64) {
    assert_eq!(
        parse(input).unwrap().pre(),
        Some(Prerelease { kind, number })
    );
}

#[test_case("1.0-5", 5; "implicit")]
#[test_case("1.0post", 0; "post without number")]
#[test_case("1.0.post7", 7; "post")]
#[test_case("1.0-rev8", 8; "rev")]
#[test_case("1.0_r9", 9; "r")]
#[test_case("1.0.r.10", 10; "separator before number")]
fn post_aliases(input: &str, post: u64) {
    assert_eq!(parse(input).unwrap().post(), Some(post));
}

#[test_case("1.0dev", 0)]
#[test_case("1.0.dev", 0)]
#[test_case("1.0-dev-3", 3)]
#[test_case("1.0_DEV4", 4)]
fn dev_spellings(input: &str, dev: u64) {
    assert_eq!(parse(input).unwrap().dev(), Some(dev));
}

/// A separator right after a marker without a number is part of the marker.
#[test_case("1.0a.", "1.0a0")]
#[test_case("1.0.post-", "1.0.post0")]
#[test_case("1.0.dev_", "1.0.dev0")]
#[test_case("1.0rc.+abc", "1.0rc0+abc")]
#[test_case("1.0a-dev", "1.0a0.dev0")]
#[test_case("1.0a..dev1", "1.0a0.dev1")]
#[test_case("1.0a.-post1", "1.0a0.post1")]
#[test_case("1.0.post_.dev2", "1.0.post0.dev2")]
#[test_case("1.0rc-.dev0", "1.0rc0.dev0")]
#[test_case("1.0b_-3", "1.0b0.post3")]
fn trailing_marker_separator(input: &str, expected: &str) {
    assert_eq!(parse(input).unwrap().to_string(), expected);
}

#[test_case("1.0-1.dev2", "1.0.post1.dev2")]
#[test_case("1.0-1+abc", "1.0.post1+abc")]
#[test_case("1.0a1-2", "1.0a1.post2")]
fn implicit_post_combinations(input: &str, expected: &str) {
    assert_eq!(parse(input).unwrap().to_string(), expected);
}

/// `preview` must not stop at `pre`, `alpha` must not stop at `a`, and so on.
#[test]
fn longest_spelling_wins() {
    assert_eq!(parse("1.0preview1").unwrap().to_string(), "1.0rc1");
    assert_eq!(parse("1.0alpha1").unwrap().to_string(), "1.0a1");
    assert_eq!(parse("1.0beta1").unwrap().to_string(), "1.0b1");
    assert_eq!(parse("1.0rev1").unwrap().to_string(), "1.0.post1");
    assert_eq!(parse("1.0r1").unwrap().to_string(), "1.0.post1");
    assert_eq!(parse("1.0rc1").unwrap().to_string(), "1.0rc1");
}

#[test]
fn rejected() {
    let cases = [
        ("", InvalidReason::Empty),
        ("   ", InvalidReason::Empty),
        ("v", InvalidReason::Empty),
        ("1..0.0", InvalidReason::ReleaseShape),
        ("1.0.", InvalidReason::ReleaseShape),
        (".1.0.0", InvalidReason::ReleaseShape),
        ("1.0.0..1", InvalidReason::ReleaseShape),
        ("1.0.0..dev1", InvalidReason::ReleaseShape),
        ("-1.0.0", InvalidReason::ReleaseShape),
        ("1.0.-1", InvalidReason::ReleaseShape),
        ("1!1!1.0.0", InvalidReason::DuplicateMarker),
        ("1!!1.0", InvalidReason::DuplicateMarker),
        ("1.0.0++abc", InvalidReason::DuplicateMarker),
        ("1.0.0+abc+def", InvalidReason::DuplicateMarker),
        ("1.0+a+", InvalidReason::DuplicateMarker),
        ("1.0+1+1", InvalidReason::DuplicateMarker),
        ("1.0.0a1a2", InvalidReason::DuplicateMarker),
        ("1.0.0a1.beta2", InvalidReason::DuplicateMarker),
        ("1.0.0.post1.post2", InvalidReason::DuplicateMarker),
        ("1.0-1-2", InvalidReason::DuplicateMarker),
        ("1.0.0.dev1.dev2", InvalidReason::DuplicateMarker),
        ("1.0.0@abc", InvalidReason::BadCharacter),
        ("1.0.0#meta", InvalidReason::BadCharacter),
        ("1.0.0 dev1", InvalidReason::BadCharacter),
        ("french toast", InvalidReason::BadCharacter),
        ("1.0+foo&asd", InvalidReason::BadCharacter),
        ("1.0+é", InvalidReason::BadCharacter),
        ("1.0.*", InvalidReason::BadCharacter),
        ("1.0.0+", InvalidReason::BadLocal),
        ("1.0.0+abc..def", InvalidReason::BadLocal),
        ("1.0+_foobar", InvalidReason::BadLocal),
        ("1.0+foobar.", InvalidReason::BadLocal),
        ("1.0+foo!bar", InvalidReason::BadLocal),
        ("blergh", InvalidReason::Syntax),
        ("!1.0", InvalidReason::Syntax),
        ("1.0!", InvalidReason::Syntax),
        ("1.0a1-", InvalidReason::Syntax),
        ("1.0.dev1.post1", InvalidReason::Syntax),
        ("1.0.post1a1", InvalidReason::Syntax),
        ("1.0foo", InvalidReason::Syntax),
        ("1.0_1", InvalidReason::Syntax),
        ("18446744073709551616", InvalidReason::Syntax),
        ("1.0a..", InvalidReason::Syntax),
        ("1.0.post-_", InvalidReason::Syntax),
    ];
    for (input, reason) in cases {
        let err = parse(input).unwrap_err();
        assert_eq!(err.reason(), reason, "{err}");
        assert_eq!(err.input(), input);
    }
}

#[test]
fn largest_number() {
    let version = parse("18446744073709551615").unwrap();
    assert_eq!(version.release(), &[u64::MAX]);
}

/// Local numbers are kept as digits, so they may be longer than any integer type.
#[test]
fn long_local_number() {
    let version = parse("1.0+000123456789012345678901234.abc").unwrap();
    assert_eq!(
        version.local(),
        Some(
            &[
                LocalSegment::Number("123456789012345678901234".to_string()),
                LocalSegment::String("abc".to_string()),
            ][..]
        )
    );
    assert_eq!(version.to_string(), "1.0+123456789012345678901234.abc");
    assert_eq!(parse("1.0+0.000").unwrap().to_string(), "1.0+0.0");
}

#[test]
fn error_messages() {
    assert_snapshot!(
        parse("1..0.0").unwrap_err().to_string(),
        @"Invalid version `1..0.0`: found an empty release segment at position 2"
    );
    assert_snapshot!(
        parse("1.0.").unwrap_err().to_string(),
        @"Invalid version `1.0.`: the release must not end with a dot"
    );
    assert_snapshot!(
        parse("1.0.0a1a2").unwrap_err().to_string(),
        @"Invalid version `1.0.0a1a2`: found a second pre-release at position 7"
    );
    assert_snapshot!(
        parse("1.0.dev1.post1").unwrap_err().to_string(),
        @"Invalid version `1.0.dev1.post1`: found a post-release at position 8, which must come before the dev-release"
    );
    assert_snapshot!(
        parse("1.0.0@abc").unwrap_err().to_string(),
        @"Invalid version `1.0.0@abc`: character '@' at position 5 is not allowed in a version"
    );
    assert_snapshot!(
        parse("1.0+a+").unwrap_err().to_string(),
        @"Invalid version `1.0+a+`: found a second local version at position 5"
    );
    assert_snapshot!(
        parse("blergh").unwrap_err().to_string(),
        @"Invalid version `blergh`: expected a version to start with a number"
    );
    assert_snapshot!(
        parse("1.2.3.4foo").unwrap_err().to_string(),
        @"Invalid version `1.2.3.4foo`: after parsing `1.2.3.4`, found `foo`, which is not part of a valid version"
    );
    assert_snapshot!(
        parse("").unwrap_err().to_string(),
        @"Invalid version ``: expected a version, found an empty string"
    );
}

/// Errors carry the raw input, not the normalized one.
#[test]
fn error_keeps_raw_input() {
    let err = parse(" V1.0.0++abc ").unwrap_err();
    assert_eq!(err.input(), " V1.0.0++abc ");
    assert_eq!(err.reason(), InvalidReason::DuplicateMarker);
}

#[test]
fn from_str_matches_parse() {
    assert_eq!(
        Version::from_str("1.0-rc1").unwrap().to_string(),
        parse("1.0-rc1").unwrap().to_string()
    );
    assert_eq!(
        Version::from_str("1.0..0").unwrap_err(),
        parse("1.0..0").unwrap_err()
    );
}

#[test]
#[cfg(feature = "tracing")]
#[tracing_test::traced_test]
fn logs_rejection() {
    let _ = parse("1.0.0++abc");
    assert!(logs_contain(
        "Rejected version (duplicate_marker): Invalid version `1.0.0++abc`"
    ));
}
