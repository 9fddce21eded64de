//! CPF value type
//!
//! A CPF (Cadastro de Pessoas Físicas) is the Brazilian individual taxpayer
//! registry number. The backend keys transaction creation on it, so the type
//! only normalizes formatting; it does not reject numbers that fail the
//! registry check digits.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A normalized CPF: exactly eleven ASCII digits.
///
/// Accepts the common punctuated form (`123.456.789-09`) as well as the
/// bare digit string, stripping dots, dashes and whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cpf(String);

impl Cpf {
    /// Creates a CPF from user input, normalizing punctuation.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidCpf` if the input does not reduce to
    /// eleven ASCII digits.
    pub fn new(input: impl AsRef<str>) -> DomainResult<Self> {
        let digits: String = input
            .as_ref()
            .chars()
            .filter(|c| !matches!(c, '.' | '-' | ' '))
            .collect();

        if digits.len() != 11 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::InvalidCpf(input.as_ref().to_string()));
        }

        Ok(Self(digits))
    }

    /// Returns the bare eleven-digit string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns a masked rendering safe for logs (`123.***.***-09`).
    #[must_use]
    pub fn masked(&self) -> String {
        format!("{}.***.***-{}", &self.0[..3], &self.0[9..])
    }

    /// Checks the two registry verification digits (módulo 11).
    ///
    /// The login flow deliberately does not enforce this; it exists so
    /// callers can warn the user before a round trip to the backend.
    #[must_use]
    pub fn has_valid_check_digits(&self) -> bool {
        let digits: Vec<u32> = self.0.bytes().map(|b| u32::from(b - b'0')).collect();

        // Repeated digits (000..., 111..., ...) pass módulo 11 but are
        // rejected by the registry.
        if digits.windows(2).all(|w| w[0] == w[1]) {
            return false;
        }

        let check = |len: usize| -> u32 {
            let sum: u32 = digits[..len]
                .iter()
                .enumerate()
                .map(|(i, d)| d * (len as u32 + 1 - i as u32))
                .sum();
            match (sum * 10) % 11 {
                10 => 0,
                r => r,
            }
        };

        check(9) == digits[9] && check(10) == digits[10]
    }
}

impl std::fmt::Display for Cpf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Cpf {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
