//! size thresholds at which the kernels switch algorithms

/// operands shorter than this are never split by the recursive multiply and square
pub const RECURSION_FLOOR: usize = 4;
/// smallest block the divide and conquer division works with
pub const DIVIDE_FLOOR: usize = 2;

/// The operand sizes at which the kernels switch from the simple to the recursive algorithm.
///
/// All values are passed explicitly, so tests can lower them to force the recursive paths
/// on small inputs without affecting each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Thresholds {
    /// limbs of the shorter factor from which on Karatsuba is used
    pub multiply: usize,
    /// limbs from which on squaring splits the operand
    pub square: usize,
    /// limbs of the divisor and of the quotient from which on Burnikel-Ziegler is used
    pub divide: usize,
    /// decimal digits up to which parsing folds the digits one by one
    pub parse_naive_digits: usize,
    /// limbs below which formatting repeatedly divides by `10^9`
    pub format_naive_limbs: usize,
}

impl Thresholds {
    pub const DEFAULT: Self = Self {
        multiply: 32,
        square: 32,
        divide: 32,
        parse_naive_digits: 1233,
        format_naive_limbs: 32,
    };

    /// thresholds that push even tiny inputs through the recursive algorithms
    pub const fn forced_small() -> Self {
        Self {
            multiply: RECURSION_FLOOR,
            square: RECURSION_FLOOR,
            divide: DIVIDE_FLOOR,
            parse_naive_digits: 0,
            format_naive_limbs: 0,
        }
    }

    #[must_use]
    pub const fn with_multiply(mut self, limbs: usize) -> Self {
        self.multiply = limbs;
        self
    }
    #[must_use]
    pub const fn with_square(mut self, limbs: usize) -> Self {
        self.square = limbs;
        self
    }
    #[must_use]
    pub const fn with_divide(mut self, limbs: usize) -> Self {
        self.divide = limbs;
        self
    }
    #[must_use]
    pub const fn with_parse_naive_digits(mut self, digits: usize) -> Self {
        self.parse_naive_digits = digits;
        self
    }
    #[must_use]
    pub const fn with_format_naive_limbs(mut self, limbs: usize) -> Self {
        self.format_naive_limbs = limbs;
        self
    }

    pub(crate) const fn multiply_threshold(&self) -> usize {
        max(self.multiply, RECURSION_FLOOR)
    }
    pub(crate) const fn square_threshold(&self) -> usize {
        max(self.square, RECURSION_FLOOR)
    }
    pub(crate) const fn divide_threshold(&self) -> usize {
        max(self.divide, DIVIDE_FLOOR)
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

const fn max(a: usize, b: usize) -> usize {
    if a > b {
        a
    } else {
        b
    }
}
