//! Positional argument arity.

use crate::error::{Result, TrellisError};

/// How many positional arguments a command accepts.
///
/// Knows nothing about what the arguments mean; commands layer their own
/// checks on top.
///
/// # Example
///
/// ```
/// use trellis::cli::ArgumentPolicy;
///
/// let policy = ArgumentPolicy::new(1, 1);
/// assert!(policy.validate(&["development"]).is_ok());
/// assert!(policy.validate::<&str>(&[]).is_err());
/// assert!(policy.validate(&["development", "example.com", "extra"]).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgumentPolicy {
    /// Minimum number of positional arguments.
    pub required: usize,
    /// Additional positional arguments allowed beyond `required`.
    pub optional: usize,
}

impl ArgumentPolicy {
    /// Create a policy.
    pub const fn new(required: usize, optional: usize) -> Self {
        Self { required, optional }
    }

    /// Maximum number of positional arguments.
    pub const fn max(&self) -> usize {
        self.required + self.optional
    }

    /// Check that `args` has between `required` and `required + optional` entries.
    pub fn validate<S: AsRef<str>>(&self, args: &[S]) -> Result<()> {
        let got = args.len();

        if got < self.required {
            return Err(TrellisError::MissingArguments {
                expected: self.required,
                got,
            });
        }

        if got > self.max() {
            return Err(TrellisError::TooManyArguments {
                expected: self.max(),
                got,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("arg{}", i)).collect()
    }

    #[test]
    fn accepts_every_length_in_range() {
        for (required, optional) in [(0, 0), (1, 0), (1, 1), (2, 3)] {
            let policy = ArgumentPolicy::new(required, optional);
            for n in required..=required + optional {
                assert!(policy.validate(&args(n)).is_ok(), "{:?} rejected {}", policy, n);
            }
        }
    }

    #[test]
    fn rejects_too_few() {
        let policy = ArgumentPolicy::new(2, 1);
        for n in 0..2 {
            assert!(matches!(
                policy.validate(&args(n)),
                Err(TrellisError::MissingArguments { expected: 2, got }) if got == n
            ));
        }
    }

    #[test]
    fn rejects_too_many() {
        let policy = ArgumentPolicy::new(1, 1);
        for n in 3..6 {
            assert!(matches!(
                policy.validate(&args(n)),
                Err(TrellisError::TooManyArguments { expected: 2, got }) if got == n
            ));
        }
    }

    #[test]
    fn zero_policy_only_accepts_nothing() {
        let policy = ArgumentPolicy::new(0, 0);
        assert!(policy.validate(&args(0)).is_ok());
        let err = policy.validate(&args(1)).unwrap_err();
        assert_eq!(err.to_string(), "too many arguments (expected 0, got 1)");
    }

    #[test]
    fn policy_is_reusable() {
        let policy = ArgumentPolicy::new(1, 0);
        assert!(policy.validate(&args(0)).is_err());
        assert!(policy.validate(&args(1)).is_ok());
        assert!(policy.validate(&args(0)).is_err());
    }
}
