//! Numeric parameter accumulation
//!
//! A control sequence carries at most two decimal parameters. Digits are
//! folded in left to right; the first digit of a parameter replaces the
//! value outright so the reset value never leaks into the result.

/// Value both parameters take after a reset, and when omitted
pub const DEFAULT_PARAM: u16 = 1;

/// Maximum digits in a CSI parameter
pub const MAX_DIGITS: u8 = 4;

/// Maximum digits in a DEC private-mode parameter
pub const MAX_PRIVATE_DIGITS: u8 = 2;

/// The two parameters of the sequence being decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    pub n1: u16,
    pub n2: u16,
    /// Digits consumed for the parameter currently being built
    digits: u8,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            n1: DEFAULT_PARAM,
            n2: DEFAULT_PARAM,
            digits: 0,
        }
    }
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to defaults: both parameters 1, no digits seen
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Digits consumed for the current parameter
    pub fn digits(&self) -> u8 {
        self.digits
    }

    /// Whether at least one digit was given for the current parameter
    pub fn has_digits(&self) -> bool {
        self.digits > 0
    }

    /// Finish the first parameter and start counting digits for the second
    pub fn start_second(&mut self) {
        self.digits = 0;
    }

    /// Fold a digit into `n1`. Returns `false` once `max` digits are used.
    pub fn push_first(&mut self, digit: u8, max: u8) -> bool {
        accumulate(&mut self.n1, &mut self.digits, digit, max)
    }

    /// Fold a digit into `n2`. Returns `false` once `max` digits are used.
    pub fn push_second(&mut self, digit: u8, max: u8) -> bool {
        accumulate(&mut self.n2, &mut self.digits, digit, max)
    }
}

fn accumulate(value: &mut u16, digits: &mut u8, digit: u8, max: u8) -> bool {
    if *digits >= max {
        return false;
    }
    let digit = u16::from(digit);
    *value = if *digits == 0 {
        digit
    } else {
        value.saturating_mul(10).saturating_add(digit)
    };
    *digits += 1;
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_default() {
        let params = Params::new();
        assert_eq!(params.n1, 1);
        assert_eq!(params.n2, 1);
        assert!(!params.has_digits());
    }

    #[test]
    fn test_first_digit_replaces_default() {
        let mut params = Params::new();
        assert!(params.push_first(7, MAX_DIGITS));
        assert_eq!(params.n1, 7);

        let mut params = Params::new();
        assert!(params.push_first(0, MAX_DIGITS));
        assert_eq!(params.n1, 0);
        assert_eq!(params.digits(), 1);
    }

    #[test]
    fn test_accumulates_decimal() {
        let mut params = Params::new();
        for digit in [1, 2, 3, 4] {
            assert!(params.push_first(digit, MAX_DIGITS));
        }
        assert_eq!(params.n1, 1234);
        assert!(!params.push_first(5, MAX_DIGITS));
        assert_eq!(params.n1, 1234);
    }

    #[test]
    fn test_private_digit_limit() {
        let mut params = Params::new();
        assert!(params.push_first(2, MAX_PRIVATE_DIGITS));
        assert!(params.push_first(5, MAX_PRIVATE_DIGITS));
        assert!(!params.push_first(0, MAX_PRIVATE_DIGITS));
        assert_eq!(params.n1, 25);
    }

    #[test]
    fn test_second_param() {
        let mut params = Params::new();
        params.push_first(1, MAX_DIGITS);
        params.push_first(2, MAX_DIGITS);
        params.start_second();
        assert!(!params.has_digits());
        assert_eq!(params.n2, 1);

        params.push_second(3, MAX_DIGITS);
        params.push_second(4, MAX_DIGITS);
        assert_eq!((params.n1, params.n2), (12, 34));
    }

    #[test]
    fn test_reset() {
        let mut params = Params::new();
        params.push_first(9, MAX_DIGITS);
        params.start_second();
        params.push_second(9, MAX_DIGITS);
        params.reset();
        assert_eq!(params, Params::default());
    }
}
