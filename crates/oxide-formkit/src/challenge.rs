//! Arithmetic challenges shown by [`CaptchaWidget`](crate::widgets::CaptchaWidget).

use serde::Deserialize;
use tracing::warn;

/// An arithmetic operator a challenge may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Plus,
    Minus,
}

impl Operator {
    /// Returns the word used in the question.
    pub const fn word(self) -> &'static str {
        match self {
            Self::Plus => "plus",
            Self::Minus => "minus",
        }
    }
}

/// A question together with its expected answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    question: String,
    answer: i64,
}

impl Challenge {
    /// Creates a challenge.
    pub fn new(question: impl Into<String>, answer: i64) -> Self {
        Self {
            question: question.into(),
            answer,
        }
    }

    /// Returns the question, e.g. `7 plus 4`.
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Returns the expected answer.
    pub const fn answer(&self) -> i64 {
        self.answer
    }

    /// Returns whether a submitted answer is correct.
    pub fn check(&self, submitted: &str) -> bool {
        submitted
            .trim()
            .parse::<i64>()
            .is_ok_and(|answer| answer == self.answer)
    }
}

/// Generates random addition and subtraction questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathChallenge {
    min: i64,
    max: i64,
    operators: Vec<Operator>,
}

impl Default for MathChallenge {
    fn default() -> Self {
        Self {
            min: 1,
            max: 20,
            operators: vec![Operator::Plus, Operator::Minus],
        }
    }
}

impl MathChallenge {
    /// Creates a generator with operands between 1 and 20.
    pub fn new() -> Self {
        Self::default()
    }

    /// Changes the operand range and the operators.
    ///
    /// A non-positive `min`, a `max` not above the minimum, or an empty
    /// operator list leave the respective setting unchanged.
    pub fn set_limits(&mut self, min: i64, max: i64, operators: &[Operator]) {
        if min > 0 {
            self.min = min;
        } else {
            warn!(min, "ignoring non-positive challenge minimum");
        }
        if max > self.min {
            self.max = max;
        } else {
            warn!(max, min = self.min, "ignoring challenge maximum");
        }
        if !operators.is_empty() {
            self.operators = operators.to_vec();
        }
        if self.max < self.min {
            self.max = self.min;
        }
    }

    /// Returns the smallest operand.
    pub const fn min(&self) -> i64 {
        self.min
    }

    /// Returns the largest operand.
    pub const fn max(&self) -> i64 {
        self.max
    }

    /// Generates a new challenge.
    ///
    /// Subtractions are arranged so that the answer is never negative.
    pub fn generate(&self) -> Challenge {
        use rand::RngExt;
        let mut rng = rand::rng();

        let first = rng.random_range(self.min..=self.max);
        let second = rng.random_range(self.min..=self.max);
        let operator = self
            .operators
            .get(rng.random_range(0..self.operators.len().max(1)))
            .copied()
            .unwrap_or(Operator::Plus);

        match operator {
            Operator::Plus => Challenge::new(
                format!("{first} {} {second}", operator.word()),
                first + second,
            ),
            Operator::Minus => {
                let (high, low) = if second > first {
                    (second, first)
                } else {
                    (first, second)
                };
                Challenge::new(format!("{high} {} {low}", operator.word()), high - low)
            }
        }
    }
}
