use proptest::prelude::*;

use super::*;

// =============================================================
// validate_key
// =============================================================

#[test]
fn validate_accepts_alphanumerics() {
    assert!(validate_key("V").is_ok());
    assert!(validate_key("a1Z").is_ok());
}

#[test]
fn validate_rejects_empty() {
    assert_eq!(validate_key(""), Err(IndexError::Empty));
}

#[test]
fn validate_rejects_trailing_zero() {
    assert_eq!(validate_key("a0"), Err(IndexError::TrailingZero("a0".into())));
}

#[test]
fn validate_rejects_invalid_digit() {
    assert_eq!(validate_key("a-b"), Err(IndexError::InvalidDigit { key: "a-b".into(), digit: '-' }));
}

// =============================================================
// key_between
// =============================================================

#[test]
fn first_key_is_middle_digit() {
    assert_eq!(key_between(None, None).unwrap(), "V");
}

#[test]
fn after_increments_first_digit() {
    assert_eq!(key_after("V").unwrap(), "W");
    assert_eq!(key_after("a5").unwrap(), "b");
}

#[test]
fn after_max_digit_extends() {
    assert_eq!(key_after("z").unwrap(), "zV");
    assert_eq!(key_after("zz").unwrap(), "zzV");
    assert_eq!(key_after("zV").unwrap(), "zW");
}

#[test]
fn before_halves_toward_zero() {
    assert_eq!(key_before("V").unwrap(), "G");
    assert_eq!(key_before("1").unwrap(), "0V");
}

#[test]
fn between_adjacent_digits_extends() {
    let k = key_between(Some("V"), Some("W")).unwrap();
    assert!("V" < k.as_str() && k.as_str() < "W", "{k}");
}

#[test]
fn between_with_common_prefix() {
    let k = key_between(Some("a1"), Some("a3")).unwrap();
    assert_eq!(k, "a2");
}

#[test]
fn between_prefix_and_longer_key() {
    let k = key_between(Some("a"), Some("a1")).unwrap();
    assert!("a" < k.as_str() && k.as_str() < "a1", "{k}");
}

#[test]
fn between_rejects_out_of_order() {
    assert!(matches!(key_between(Some("b"), Some("a")), Err(IndexError::OutOfOrder { .. })));
    assert!(matches!(key_between(Some("b"), Some("b")), Err(IndexError::OutOfOrder { .. })));
}

#[test]
fn between_rejects_malformed_bound() {
    assert!(key_between(Some("a0"), None).is_err());
    assert!(key_between(None, Some("")).is_err());
}

#[test]
fn repeated_appends_stay_sorted_and_short() {
    let mut keys = vec![key_between(None, None).unwrap()];
    for _ in 0..200 {
        let next = key_after(keys.last().unwrap()).unwrap();
        keys.push(next);
    }
    assert!(keys.windows(2).all(|w| w[0] < w[1]));
    // Each extra digit buys another 31 appends.
    assert!(keys.iter().all(|k| k.len() <= 8), "longest {}", keys.iter().map(String::len).max().unwrap());
}

#[test]
fn repeated_inserts_at_front_stay_sorted() {
    let mut first = key_between(None, None).unwrap();
    for _ in 0..200 {
        let k = key_before(&first).unwrap();
        assert!(k < first);
        validate_key(&k).unwrap();
        first = k;
    }
}

// =============================================================
// Properties
// =============================================================

/// Build a sorted key list by random insertion positions.
fn build_keys(positions: &[usize]) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for &pos in positions {
        let at = if keys.is_empty() { 0 } else { pos % (keys.len() + 1) };
        let lower = if at == 0 { None } else { Some(keys[at - 1].as_str()) };
        let upper = keys.get(at).map(String::as_str);
        let k = key_between(lower, upper).unwrap();
        keys.insert(at, k);
    }
    keys
}

proptest! {
    #[test]
    fn prop_random_inserts_keep_strict_order(positions in prop::collection::vec(0usize..1000, 1..120)) {
        let keys = build_keys(&positions);
        prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
        for k in &keys {
            prop_assert!(validate_key(k).is_ok());
        }
    }
}

#[test]
fn first_key_is_open_midpoint() {
    assert_eq!(first_key(), "V");
    assert_eq!(key_between(None, None).unwrap(), first_key());
}
