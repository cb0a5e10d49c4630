use ibig::UBig;
use num_traits::{One, Zero};
use unicode_normalization::UnicodeNormalization;

use crate::types::*;

///Trait for objects that can be fingerprinted (string-like)
pub trait Fingerprintable {
    fn fingerprint(&self) -> Fingerprint;
    fn ascii_fold(&self) -> String;
    fn normalize_word(&self) -> String;
}

impl Fingerprintable for str {
    ///Compute the fingerprint for a given string: the product of the
    ///primes of its normalized letters. Characters outside a-z contribute
    ///nothing, so a string without any letters yields the empty product 1
    ///and all such strings share one anagram class.
    ///
    /// # Examples
    ///
    /// ```
    /// # use anadict::*;
    /// assert_eq!("listen".fingerprint(), "silent".fingerprint());
    /// assert_eq!("123!?".fingerprint(), Fingerprint::empty());
    /// ```
    fn fingerprint(&self) -> Fingerprint {
        let mut hash: Fingerprint = Fingerprint::empty();
        for byte in self.normalize_word().bytes() {
            if byte.is_ascii_lowercase() {
                let charvalue = Fingerprint::character((byte - b'a') as usize);
                hash = hash.insert(&charvalue);
            }
        }
        hash
    }

    ///Strip diacritics by compatibility decomposition, dropping whatever
    ///non-ASCII content remains. Case is preserved, the tagger needs it.
    fn ascii_fold(&self) -> String {
        self.nfkd().filter(|c| c.is_ascii()).collect()
    }

    ///Normalize a string to its comparable form: ascii-folded and lowercased
    fn normalize_word(&self) -> String {
        self.ascii_fold().to_lowercase()
    }
}

/// This trait can be applied to types
/// that can function as anagram fingerprints.
/// It can be implemented for integer types.
pub trait FingerprintOps: One + Zero {
    fn character(index: usize) -> Fingerprint;
    fn empty() -> Fingerprint;
    fn is_empty(&self) -> bool;
    fn insert(&self, value: &Fingerprint) -> Fingerprint;
}

impl FingerprintOps for Fingerprint {
    /// The prime value for the n'th letter of the alphabet
    fn character(index: usize) -> Fingerprint {
        UBig::from(PRIMES[index])
    }

    /// The value of an empty fingerprint (the empty product)
    fn empty() -> Fingerprint {
        Fingerprint::one()
    }

    fn is_empty(&self) -> bool {
        self == &Fingerprint::empty() || self == &Fingerprint::zero()
    }

    /// Insert the letters represented by the given fingerprint, returning the result
    ///
    /// # Examples
    ///
    /// ```
    /// # use anadict::*;
    /// let ab = "ab".fingerprint();
    /// let c = "c".fingerprint();
    /// assert_eq!(ab.insert(&c), "abc".fingerprint());
    /// ```
    fn insert(&self, value: &Fingerprint) -> Fingerprint {
        if self == &Fingerprint::zero() {
            value.clone()
        } else {
            self * value
        }
    }
}
