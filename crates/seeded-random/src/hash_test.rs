use crate::hash::{hash_seeds, hashword2};

#[test]
fn test_empty_key_returns_initial_state() {
    assert_eq!(hashword2(&[], (0, 0)), (0xdead_beef, 0xdead_beef));
    assert_eq!(hash_seeds(&[]), 0xdead_beef_dead_beef);
}

#[test]
fn test_hash_depends_on_every_word_and_order() {
    let base = hash_seeds(&[10, 20, 30, 40, 50]);

    assert_ne!(base, hash_seeds(&[10, 20, 30, 40, 51]));
    assert_ne!(base, hash_seeds(&[11, 20, 30, 40, 50]));
    assert_ne!(base, hash_seeds(&[50, 40, 30, 20, 10]));
    assert_ne!(base, hash_seeds(&[10, 20, 30, 40]));
}

#[test]
fn test_length_is_part_of_the_hash() {
    assert_ne!(hash_seeds(&[0]), hash_seeds(&[0, 0]));
    assert_ne!(hash_seeds(&[0, 0, 0]), hash_seeds(&[0, 0, 0, 0]));
}
