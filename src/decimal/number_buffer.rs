use super::{ParseError, MAX_SCALE};

/// A scanned decimal number `0.d1d2d3... * 10^scale`.
///
/// Accepts surrounding whitespace, an optional sign, `_` between digits, a fractional part and an
/// exponent (`1.5e3`). Only the significant digits are kept, leading and trailing zeros are folded
/// into `scale`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberBuffer {
    digits: Vec<u8>,
    scale: isize,
    is_negative: bool,
    has_nonzero_tail: bool,
    last_digit_position: usize,
}

impl NumberBuffer {
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let offset = text.len() - text.trim_start().len();
        let trimmed = text.trim();
        require!(!trimmed.is_empty(), ParseError::Empty);
        let mut chars = trimmed
            .char_indices()
            .map(|(i, c)| (i + offset, c))
            .peekable();

        let is_negative = match chars.peek() {
            Some(&(_, sign @ ('-' | '+'))) => {
                chars.next();
                sign == '-'
            }
            _ => false,
        };
        let Some(&(first_position, first)) = chars.peek() else {
            return Err(ParseError::Empty);
        };

        let mut number = Self {
            digits: Vec::new(),
            scale: 0,
            is_negative,
            has_nonzero_tail: false,
            last_digit_position: 0,
        };
        let mut seen_digit = false;
        let mut in_fraction = false;
        let mut exponent = 0;
        while let Some((position, c)) = chars.next() {
            match c {
                '0'..='9' => {
                    seen_digit = true;
                    number.push_digit(c as u8, position, in_fraction);
                }
                '_' if seen_digit => {}
                '.' if !in_fraction => in_fraction = true,
                'e' | 'E' if seen_digit => {
                    exponent = parse_exponent(&mut chars, position, c)?;
                    break;
                }
                _ => return Err(ParseError::InvalidDigit { digit: c, position }),
            }
        }
        require!(
            seen_digit,
            ParseError::InvalidDigit {
                digit: first,
                position: first_position
            }
        );

        while number.digits.last() == Some(&b'0') {
            number.digits.pop();
        }
        if number.digits.is_empty() {
            number.scale = 0;
            return Ok(number);
        }

        let scale = i64::try_from(number.scale).map_or(i64::MAX, |it| it.saturating_add(exponent));
        require!(
            usize::try_from(scale).map_or(true, |it| it <= MAX_SCALE),
            ParseError::Overflow
        );
        // only very negative scales don't fit, those are all fractions anyway
        number.scale = isize::try_from(scale).unwrap_or(isize::MIN);
        number.has_nonzero_tail =
            usize::try_from(number.scale).map_or(true, |it| it < number.digit_count());
        Ok(number)
    }

    fn push_digit(&mut self, digit: u8, position: usize, in_fraction: bool) {
        if self.digits.is_empty() && digit == b'0' {
            if in_fraction {
                self.scale -= 1;
            }
            return;
        }
        if !in_fraction {
            self.scale += 1;
        }
        self.digits.push(digit);
        if digit != b'0' {
            self.last_digit_position = position;
        }
    }

    /// the significant digits as ascii, without leading or trailing zeros
    pub fn digits(&self) -> &[u8] {
        &self.digits
    }
    pub fn digit_count(&self) -> usize {
        self.digits.len()
    }
    /// number of digits in front of the decimal point
    pub const fn scale(&self) -> isize {
        self.scale
    }
    pub const fn is_negative(&self) -> bool {
        self.is_negative
    }
    pub fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }
    /// if some digit behind the decimal point isn't zero
    pub const fn has_nonzero_tail(&self) -> bool {
        self.has_nonzero_tail
    }
    /// position in the text of the last non zero digit
    pub const fn last_digit_position(&self) -> usize {
        self.last_digit_position
    }

    /// The digits in front of the decimal point, split into the significant ones and the number of
    /// zeros following them.
    ///
    /// # Panics
    /// if the number has a non zero fractional part
    pub fn integer_part(&self) -> (&[u8], usize) {
        assert!(!self.has_nonzero_tail, "number isn't an integer");
        if self.digits.is_empty() {
            return (&[], 0);
        }
        let scale = usize::try_from(self.scale).unwrap_or_default();
        (&self.digits, scale - self.digits.len())
    }
}

fn parse_exponent(
    chars: &mut impl Iterator<Item = (usize, char)>,
    e_position: usize,
    e: char,
) -> Result<i64, ParseError> {
    let mut is_negative = false;
    let mut seen_digit = false;
    let mut value = 0i64;
    for (i, (position, c)) in chars.enumerate() {
        match c {
            '+' | '-' if i == 0 => is_negative = c == '-',
            '0'..='9' => {
                seen_digit = true;
                value = value
                    .saturating_mul(10)
                    .saturating_add(i64::from(c as u8 - b'0'));
            }
            '_' if seen_digit => {}
            _ => return Err(ParseError::InvalidDigit { digit: c, position }),
        }
    }
    require!(
        seen_digit,
        ParseError::InvalidDigit {
            digit: e,
            position: e_position
        }
    );
    Ok(if is_negative { -value } else { value })
}
