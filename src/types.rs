use ibig::UBig;

///The anagram fingerprint: a product of one prime per letter. Products
///are commutative, so the value is invariant under any reordering of the
///letters, and unique factorization keeps distinct letter multisets apart.
pub type Fingerprint = UBig;

///The raw spellings of one anagram class
pub type WordGroup = Vec<String>;

///One prime per letter of the Latin alphabet, a → 2 up to z → 101.
pub const PRIMES: &[u32] = &[
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97, 101,
];
