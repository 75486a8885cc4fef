//! Luhn checksum verification.
//!
//! The Luhn algorithm (also known as the "modulus 10" algorithm) is the
//! checksum carried by every payment card number. Verification here is purely
//! structural: a passing number is well-formed, not necessarily issued.

/// Lookup table for doubled digits: double the value, subtract 9 if >= 10.
/// Index is the digit (0-9), value is the transformed result.
const DOUBLE_TABLE: [u8; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Verifies the Luhn checksum of a normalized digit string.
///
/// Returns `false` for an empty string or for any character that is not an
/// ASCII decimal digit. Malformed input and checksum failure share the same
/// signal.
///
/// # Example
///
/// ```
/// use cardbrand::luhn::verify_checksum;
///
/// assert!(verify_checksum("4532015112830366"));
/// assert!(verify_checksum("0000000000000000"));
/// assert!(!verify_checksum("4532015112830367"));
/// assert!(!verify_checksum("4532 0151"));
/// assert!(!verify_checksum(""));
/// ```
pub fn verify_checksum(digits: &str) -> bool {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let values: Vec<u8> = digits.bytes().map(|b| b - b'0').collect();
    validate(&values)
}

/// Validates a slice of digit values (0-9) using the Luhn algorithm.
///
/// # Algorithm
///
/// 1. Starting from the rightmost digit (check digit), moving left
/// 2. Double every second digit
/// 3. If doubling results in a number > 9, subtract 9
/// 4. Sum all digits
/// 5. If the sum is divisible by 10, the number is valid
///
/// # Example
///
/// ```
/// use cardbrand::luhn::validate;
///
/// let digits = [3, 7, 8, 2, 8, 2, 2, 4, 6, 3, 1, 0, 0, 0, 5];
/// assert!(validate(&digits));
///
/// let invalid = [3, 7, 8, 2, 8, 2, 2, 4, 6, 3, 1, 0, 0, 0, 6];
/// assert!(!validate(&invalid));
/// ```
///
/// Returns `false` for an empty slice or any value above 9.
#[inline]
pub fn validate(digits: &[u8]) -> bool {
    if digits.is_empty() || digits.iter().any(|&d| d > 9) {
        return false;
    }

    compute_checksum(digits) % 10 == 0
}

/// Computes the Luhn sum (not reduced modulo 10) of a digit slice.
///
/// Every value goes through the same rule, so values above 9 are summed
/// as-is in plain positions and doubled minus 9 in doubled positions. Use
/// [`validate`] to reject them.
#[inline]
pub fn compute_checksum(digits: &[u8]) -> u32 {
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &digit)| {
            // Rightmost digit is position 0 and is never doubled.
            if i % 2 == 1 {
                doubled(digit)
            } else {
                u32::from(digit)
            }
        })
        .sum()
}

/// Doubles a value, subtracting 9 when the result exceeds 9.
#[inline]
fn doubled(digit: u8) -> u32 {
    match DOUBLE_TABLE.get(usize::from(digit)) {
        Some(&value) => u32::from(value),
        None => u32::from(digit) * 2 - 9,
    }
}

/// Generates the check digit for a partial card number.
///
/// Given digits without the check digit, returns the digit that makes the
/// full number pass Luhn validation.
///
/// # Example
///
/// ```
/// use cardbrand::luhn::generate_check_digit;
///
/// let partial = [4, 5, 3, 2, 0, 1, 5, 1, 1, 2, 8, 3, 0, 3, 6];
/// assert_eq!(generate_check_digit(&partial), 6);
/// ```
pub fn generate_check_digit(digits: &[u8]) -> u8 {
    // Every existing digit moves one position left once the check digit is
    // appended, so the doubling parity flips.
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &digit)| {
            if i % 2 == 0 {
                doubled(digit)
            } else {
                u32::from(digit)
            }
        })
        .sum();

    ((10 - (sum % 10)) % 10) as u8
}
