//! Prime number helpers used to size the bucket array.
//!
//! Double hashing only visits every slot when the step size is coprime to the
//! bucket count, so the table always allocates a prime number of buckets.

/// Returns true if `n` is prime.
///
/// Trial division by odd numbers up to `√n`. Only called on resize, so the
/// cost is irrelevant next to rehashing the entries.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }

    let mut divisor: usize = 3;
    // `divisor <= n / divisor` is `divisor² <= n` without overflow
    while divisor <= n / divisor {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

/// Returns the smallest prime `p >= n`.
///
/// Returns `None` when `n < 2` (no bucket count is derived from such a value)
/// or when no prime representable as `usize` exists above `n`.
#[must_use]
pub fn next_prime(n: usize) -> Option<usize> {
    if n < 2 {
        return None;
    }
    (n..=usize::MAX).find(|&candidate| is_prime(candidate))
}
