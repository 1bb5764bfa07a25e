//! Amount keypad state machine.
//!
//! Digits accumulate into a scaled integer (`integer_part / 10^scale`) so that
//! typing and chaining `+ - * /` never drifts the way binary floats do.

mod key;
mod value;

pub use key::{parse_keys, Key, Operator};
pub use value::{ArithmeticError, ScaledValue};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalculatorFault {
    DivisionByZero,
    Overflow,
}

impl From<ArithmeticError> for CalculatorFault {
    fn from(err: ArithmeticError) -> Self {
        match err {
            ArithmeticError::DivisionByZero => CalculatorFault::DivisionByZero,
            ArithmeticError::Overflow => CalculatorFault::Overflow,
        }
    }
}

/// One editing session of an entry amount.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Calculator {
    current: ScaledValue,
    previous: ScaledValue,
    pending: Option<Operator>,
    entering_fraction: bool,
    /// `current` is a quotient whose fractional digits were not typed; it
    /// counts as a whole number for further digit keys.
    #[serde(default)]
    quotient: bool,
    committed: ScaledValue,
    fault: Option<CalculatorFault>,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing entry amount, e.g. when editing an entry.
    pub fn with_amount(amount: f64) -> Self {
        let current = ScaledValue::from_f64(amount);
        Self {
            current,
            committed: current,
            ..Self::default()
        }
    }

    pub fn press(&mut self, key: Key) {
        match key {
            Key::Digit(d) => {
                self.fault = None;
                let next = if self.quotient {
                    self.current.shift_in_digit(d.min(9))
                } else {
                    self.current.push_digit(d.min(9), self.entering_fraction)
                };
                match next {
                    Some(next) => self.current = next,
                    None => debug!("digit {d} ignored, value is at its precision limit"),
                }
                self.follow_current();
            }
            Key::DoubleZero => {
                let next = if self.quotient {
                    self.current.shift_in_double_zero()
                } else {
                    self.current.push_double_zero()
                };
                if let Some(next) = next {
                    self.current = next;
                }
                self.follow_current();
            }
            Key::DecimalPoint => {
                // The quotient's digits become typed digits from here on.
                self.quotient = false;
                self.entering_fraction = true;
                self.follow_current();
            }
            Key::Backspace => {
                if self.quotient {
                    self.current = self.current.drop_whole_digit();
                    self.quotient = false;
                } else {
                    self.current = self.current.drop_digit();
                }
                self.follow_current();
            }
            Key::Clear => *self = Self::default(),
            Key::Operator(op) => {
                self.resolve();
                self.previous = self.current;
                self.pending = Some(op);
                self.current = ScaledValue::ZERO;
                self.quotient = false;
                self.committed = self.previous;
            }
            Key::Equals => {
                self.resolve();
                self.committed = self.current;
            }
        }
    }

    pub fn press_all<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = Key>,
    {
        for key in keys {
            self.press(key);
        }
    }

    /// The value currently on screen, without grouping separators.
    pub fn display(&self) -> String {
        self.current.to_string()
    }

    pub fn current(&self) -> ScaledValue {
        self.current
    }

    pub fn previous(&self) -> ScaledValue {
        self.previous
    }

    pub fn pending(&self) -> Option<Operator> {
        self.pending
    }

    pub fn is_entering_fraction(&self) -> bool {
        self.entering_fraction
    }

    /// The amount the surrounding form should store.
    pub fn committed(&self) -> ScaledValue {
        self.committed
    }

    pub fn committed_amount(&self) -> f64 {
        self.committed.to_f64()
    }

    pub fn fault(&self) -> Option<CalculatorFault> {
        self.fault
    }

    fn follow_current(&mut self) {
        if self.pending.is_none() {
            self.committed = self.current;
        }
    }

    /// True while the display shows a division result that further digits
    /// extend as a whole number.
    pub fn is_quotient(&self) -> bool {
        self.quotient
    }

    /// Applies `previous <pending> current` into `current` and leaves fraction mode.
    fn resolve(&mut self) {
        self.entering_fraction = false;
        let Some(op) = self.pending.take() else {
            return;
        };

        let lhs = self.previous;
        let rhs = self.current;
        let outcome = match op {
            Operator::Add => lhs.add(rhs),
            Operator::Subtract => lhs.subtract(rhs),
            Operator::Multiply => lhs.multiply(rhs),
            Operator::Divide => lhs.divide(rhs),
        };

        match outcome {
            Ok(result) => {
                self.current = result;
                self.quotient = op == Operator::Divide && result.scale() > 0;
            }
            Err(err) => {
                let fault = CalculatorFault::from(err);
                warn!("{lhs} {} {rhs} faulted: {fault:?}", op.symbol());
                self.current = ScaledValue::ZERO;
                self.quotient = false;
                self.fault = Some(fault);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(keys: &str) -> Calculator {
        let mut calc = Calculator::new();
        calc.press_all(parse_keys(keys).unwrap());
        calc
    }

    #[test]
    fn digits_and_point_keep_the_scale() {
        let calc = run("12.5");
        assert_eq!(calc.display(), "12.5");
        assert_eq!(calc.current().integer_part(), 125);
        assert_eq!(calc.current().scale_factor(), 10);
        assert_eq!(calc.committed_amount(), 12.5);
    }

    #[test]
    fn typed_trailing_zeros_are_shown() {
        assert_eq!(run("12.50").display(), "12.50");
        assert_eq!(run("0.0").display(), "0.0");
    }

    #[test]
    fn point_alone_does_not_change_the_display() {
        let calc = run("12.");
        assert_eq!(calc.display(), "12");
        assert!(calc.is_entering_fraction());
    }

    #[test]
    fn repeated_point_is_ignored() {
        assert_eq!(run("1..5").display(), run("1.5").display());
        assert_eq!(run("1.5.5").display(), "1.55");
    }

    #[test]
    fn operators_chain_left_to_right() {
        let calc = run("12+8*2=");
        assert_eq!(calc.display(), "40");
        assert_eq!(calc.committed_amount(), 40.0);
        assert_eq!(calc.pending(), None);
    }

    #[test]
    fn division_shows_exact_digits() {
        let calc = run("7/8=");
        assert_eq!(calc.display(), "0.875");
        assert_eq!(calc.fault(), None);
    }

    #[test]
    fn digits_after_a_quotient_extend_the_whole_number() {
        let calc = run("7/8=1");
        assert_eq!(calc.display(), "9.75");
        assert_eq!(calc.committed_amount(), 9.75);
        assert!(calc.is_quotient());
        assert_eq!(run("7/8=00").display(), "87.5");
    }

    #[test]
    fn backspace_after_a_quotient_drops_a_whole_digit() {
        let calc = run("7/8=<-");
        assert_eq!(calc.display(), "0");
        assert!(!calc.is_quotient());

        let mut calc = run("100/8=");
        assert_eq!(calc.display(), "12.5");
        calc.press(Key::Backspace);
        assert_eq!(calc.display(), "1");
        calc.press(Key::Digit(4));
        assert_eq!(calc.display(), "14");
    }

    #[test]
    fn point_after_a_quotient_continues_its_fraction() {
        let calc = run("7/8=.1");
        assert_eq!(calc.display(), "0.8751");
        assert!(!calc.is_quotient());
    }

    #[test]
    fn whole_quotients_behave_like_typed_numbers() {
        let calc = run("8/4=1");
        assert_eq!(calc.display(), "21");
        assert!(!calc.is_quotient());
        assert!(!run("7/8=+").is_quotient());
    }

    #[test]
    fn fraction_digits_beyond_the_precision_limit_are_ignored() {
        let typed = format!("0.{}", "9".repeat(40));
        let calc = run(&typed);
        assert_eq!(calc.display(), format!("0.{}", "9".repeat(28)));
        assert_eq!(calc.current().scale(), 28);
        assert_eq!(calc.fault(), None);
    }

    #[test]
    fn digits_beyond_the_mantissa_are_ignored() {
        let calc = run(&"9".repeat(40));
        assert_eq!(calc.display(), "9".repeat(28));
        assert_eq!(calc.fault(), None);
    }

    #[test]
    fn product_out_of_range_faults_with_overflow() {
        let keys = format!("{}*{}=", "9".repeat(28), "9".repeat(30));
        let calc = run(&keys);
        assert_eq!(calc.display(), "0");
        assert_eq!(calc.fault(), Some(CalculatorFault::Overflow));
        assert_eq!(calc.committed_amount(), 0.0);
    }

    #[test]
    fn decimal_addition_does_not_drift() {
        assert_eq!(run("0.1+0.2=").display(), "0.3");
        assert_eq!(run("1.25*4=").display(), "5.00");
    }

    #[test]
    fn backspace_on_zero_is_a_no_op() {
        let mut calc = Calculator::new();
        for _ in 0..5 {
            calc.press(Key::Backspace);
            assert_eq!(calc, Calculator::new());
        }
    }

    #[test]
    fn backspace_undoes_fraction_digits() {
        let mut calc = run("12.34");
        calc.press(Key::Backspace);
        assert_eq!(calc.display(), "12.3");
        calc.press(Key::Backspace);
        assert_eq!(calc.display(), "12");
        calc.press(Key::Backspace);
        assert_eq!(calc.display(), "1");
    }

    #[test]
    fn double_zero_multiplies_by_hundred() {
        let calc = run("5 00");
        assert_eq!(calc.display(), "500");
        assert_eq!(calc.committed_amount(), 500.0);
    }

    #[test]
    fn operator_commits_the_left_operand() {
        let calc = run("12+8");
        assert_eq!(calc.display(), "8");
        assert_eq!(calc.committed_amount(), 12.0);
        assert_eq!(calc.previous().to_string(), "12");
    }

    #[test]
    fn operator_before_digits_resolves_against_zero() {
        let calc = run("-5=");
        assert_eq!(calc.display(), "-5");
        assert_eq!(calc.committed_amount(), -5.0);
    }

    #[test]
    fn divide_by_zero_faults_without_panicking() {
        let calc = run("9/0=");
        assert_eq!(calc.display(), "0");
        assert_eq!(calc.fault(), Some(CalculatorFault::DivisionByZero));
        assert_eq!(calc.committed_amount(), 0.0);

        let mut calc = calc;
        calc.press(Key::Digit(4));
        assert_eq!(calc.fault(), None);
        assert_eq!(calc.display(), "4");
    }

    #[test]
    fn clear_resets_everything() {
        let mut calc = run("9/0=");
        calc.press(Key::Clear);
        assert_eq!(calc, Calculator::new());
        assert_eq!(calc.display(), "0");
    }

    #[test]
    fn editing_an_existing_amount() {
        let mut calc = Calculator::with_amount(12.5);
        assert_eq!(calc.display(), "12.5");
        calc.press(Key::Backspace);
        assert_eq!(calc.display(), "12");
        assert_eq!(calc.committed_amount(), 12.0);
    }
}
