use ipsearch::{check_ipv4, check_ipv6, find, Finder, Kind};
use proptest::prelude::*;

/// Text dense in address characters, so anchors and candidates are common.
fn addressy() -> impl Strategy<Value = String> {
    "[0-9a-fA-F.: x,]{0,64}"
}

proptest! {
    #[test]
    fn test_find_is_deterministic(text in addressy()) {
        prop_assert_eq!(find(&text), find(&text));
    }

    #[test]
    fn test_matches_are_ordered_and_disjoint(text in addressy()) {
        let ranges = find(&text);
        for range in &ranges {
            prop_assert!(range.start < range.end);
            prop_assert!(range.end <= text.len());
        }
        for pair in ranges.windows(2) {
            prop_assert!(pair[0].end <= pair[1].start);
            prop_assert!(pair[0].start < pair[1].start);
        }
    }

    #[test]
    fn test_every_match_validates_on_its_own(text in addressy()) {
        let haystack = text.as_bytes();
        for m in Finder::default().matches(haystack) {
            let span = m.as_bytes(haystack);
            let checked = match m.kind() {
                Kind::V4 => check_ipv4(span),
                Kind::V6 => check_ipv6(span),
            };
            prop_assert_eq!(checked, Some(span.len()), "span {:?}", String::from_utf8_lossy(span));
        }
    }

    #[test]
    fn test_ipv6_match_never_ends_in_single_colon(text in addressy()) {
        let haystack = text.as_bytes();
        for m in Finder::default().matches(haystack) {
            let span = m.as_bytes(haystack);
            if span.ends_with(b":") {
                prop_assert!(span.ends_with(b"::"), "span {:?}", String::from_utf8_lossy(span));
            }
        }
    }

    #[test]
    fn test_arbitrary_bytes_never_panic(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        let ranges = find(&bytes);
        prop_assert!(ranges.iter().all(|r| r.end <= bytes.len()));
    }

    #[test]
    fn test_formatted_addresses_are_found(
        a in any::<[u8; 4]>(),
        b in any::<[u16; 8]>(),
    ) {
        let v4 = std::net::Ipv4Addr::from(a).to_string();
        let v6 = std::net::Ipv6Addr::from(b).to_string();
        let text = format!("src {v4} dst {v6} end");
        let found: Vec<&str> = find(&text).into_iter().map(|r| &text[r]).collect();
        prop_assert_eq!(found, vec![v4.as_str(), v6.as_str()]);
    }
}
