/// A finite number held as its decimal digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Decimal {
    negative: bool,
    /// Integer digits followed by fraction digits, most significant first.
    digits: Vec<u8>,
    /// How many of `digits` sit after the decimal point.
    scale: usize,
}

impl Decimal {
    /// Captures the shortest decimal string that round-trips to `value`.
    /// Returns `None` for NaN and infinities.
    pub(crate) fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        // `Display` for f64 never switches to exponent notation.
        let text = value.abs().to_string();
        let (int_part, frac_part) = text.split_once('.').unwrap_or((&text, ""));
        let frac_part = frac_part.trim_end_matches('0');

        let digits = int_part
            .bytes()
            .chain(frac_part.bytes())
            .map(|b| b - b'0')
            .collect();
        Some(Self { negative: value < 0.0, digits, scale: frac_part.len() })
    }

    /// Multiplies by `10^places` by moving the decimal point.
    pub(crate) fn shift_left(mut self, places: usize) -> Self {
        if self.scale >= places {
            self.scale -= places;
        } else {
            let missing = places - self.scale;
            self.digits.extend(std::iter::repeat_n(0, missing));
            self.scale = 0;
        }
        self
    }

    fn fraction(&self) -> &[u8] {
        &self.digits[self.digits.len() - self.scale..]
    }

    fn integer(&self) -> &[u8] {
        &self.digits[..self.digits.len() - self.scale]
    }

    fn is_integral(&self) -> bool {
        self.fraction().iter().all(|d| *d == 0)
    }

    /// Integral values print bare; others are rounded half-up to two places.
    pub(crate) fn to_plain_string(&self) -> String {
        if self.is_integral() {
            let int: String = self
                .integer()
                .iter()
                .skip_while(|d| **d == 0)
                .map(|d| char::from(b'0' + d))
                .collect();
            return match (int.is_empty(), self.negative) {
                (true, _) => "0".to_string(),
                (false, true) => format!("-{}", int),
                (false, false) => int,
            };
        }
        self.round_to_cents()
    }

    fn round_to_cents(&self) -> String {
        let frac = self.fraction();
        let digit = |i: usize| u128::from(frac.get(i).copied().unwrap_or(0));

        // A non-integral f64 is below 2^53, so the scaled value fits easily.
        let mut scaled = self
            .integer()
            .iter()
            .fold(0u128, |acc, d| acc * 10 + u128::from(*d));
        scaled = scaled * 100 + digit(0) * 10 + digit(1);
        if digit(2) >= 5 {
            scaled += 1;
        }

        let sign = if self.negative && scaled != 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, scaled / 100, scaled % 100)
    }
}
