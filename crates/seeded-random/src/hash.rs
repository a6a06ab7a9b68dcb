//! lookup3 `hashword2` folding of seed tuples.

#[inline]
fn mix(a: &mut u32, b: &mut u32, c: &mut u32) {
    *a = a.wrapping_sub(*c);
    *a ^= c.rotate_left(4);
    *c = c.wrapping_add(*b);
    *b = b.wrapping_sub(*a);
    *b ^= a.rotate_left(6);
    *a = a.wrapping_add(*c);
    *c = c.wrapping_sub(*b);
    *c ^= b.rotate_left(8);
    *b = b.wrapping_add(*a);
    *a = a.wrapping_sub(*c);
    *a ^= c.rotate_left(16);
    *c = c.wrapping_add(*b);
    *b = b.wrapping_sub(*a);
    *b ^= a.rotate_left(19);
    *a = a.wrapping_add(*c);
    *c = c.wrapping_sub(*b);
    *c ^= b.rotate_left(4);
    *b = b.wrapping_add(*a);
}

#[inline]
fn finalize(a: &mut u32, b: &mut u32, c: &mut u32) {
    *c ^= *b;
    *c = c.wrapping_sub(b.rotate_left(14));
    *a ^= *c;
    *a = a.wrapping_sub(c.rotate_left(11));
    *b ^= *a;
    *b = b.wrapping_sub(a.rotate_left(25));
    *c ^= *b;
    *c = c.wrapping_sub(b.rotate_left(16));
    *a ^= *c;
    *a = a.wrapping_sub(c.rotate_left(4));
    *b ^= *a;
    *b = b.wrapping_sub(a.rotate_left(14));
    *c ^= *b;
    *c = c.wrapping_sub(b.rotate_left(24));
}

/// Hashes a tuple of words into two 32-bit results `(c, b)`.
///
/// `init` supplies the two initial values, as lookup3's `hashword2` does.
pub fn hashword2(key: &[u32], init: (u32, u32)) -> (u32, u32) {
    let start = 0xdead_beef_u32
        .wrapping_add((key.len() as u32).wrapping_shl(2))
        .wrapping_add(init.0);
    let (mut a, mut b, mut c) = (start, start, start.wrapping_add(init.1));

    let mut rest = key;
    while rest.len() > 3 {
        a = a.wrapping_add(rest[0]);
        b = b.wrapping_add(rest[1]);
        c = c.wrapping_add(rest[2]);
        mix(&mut a, &mut b, &mut c);
        rest = &rest[3..];
    }

    match rest.len() {
        3 => {
            c = c.wrapping_add(rest[2]);
            b = b.wrapping_add(rest[1]);
            a = a.wrapping_add(rest[0]);
            finalize(&mut a, &mut b, &mut c);
        }
        2 => {
            b = b.wrapping_add(rest[1]);
            a = a.wrapping_add(rest[0]);
            finalize(&mut a, &mut b, &mut c);
        }
        1 => {
            a = a.wrapping_add(rest[0]);
            finalize(&mut a, &mut b, &mut c);
        }
        _ => {}
    }

    (c, b)
}

/// Folds an ordered seed tuple into a single 64-bit seed.
///
/// # Examples
///
/// ```
/// use seeded_random::hash_seeds;
///
/// assert_eq!(hash_seeds(&[1, 2, 3]), hash_seeds(&[1, 2, 3]));
/// assert_ne!(hash_seeds(&[1, 2, 3]), hash_seeds(&[3, 2, 1]));
/// ```
pub fn hash_seeds(seeds: &[u32]) -> u64 {
    let (c, b) = hashword2(seeds, (0, 0));
    ((c as u64) << 32) | b as u64
}
