//! Monetary amounts that never travel without their currency.

// self
use crate::_prelude::*;

/// Errors raised when constructing [`Money`].
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum MoneyError {
	/// Amount was below zero.
	#[error("Amount must not be negative, got {amount}.")]
	Negative {
		/// Rejected amount.
		amount: Decimal,
	},
	/// Currency was not three uppercase ASCII letters.
	#[error("Currency must be a 3-letter ISO-4217 code, got `{currency}`.")]
	InvalidCurrency {
		/// Rejected currency code.
		currency: String,
	},
}

/// Non-negative amount paired with a 3-letter currency code.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "MoneyRepr", into = "MoneyRepr")]
pub struct Money {
	amount: Decimal,
	currency: String,
}
impl Money {
	/// Validates and pairs an amount with its currency.
	pub fn new(amount: Decimal, currency: impl AsRef<str>) -> Result<Self, MoneyError> {
		let currency = currency.as_ref();

		if amount.is_sign_negative() && !amount.is_zero() {
			return Err(MoneyError::Negative { amount });
		}
		if currency.len() != 3 || !currency.bytes().all(|b| b.is_ascii_uppercase()) {
			return Err(MoneyError::InvalidCurrency { currency: currency.to_owned() });
		}

		Ok(Self { amount, currency: currency.to_owned() })
	}

	/// Returns the amount.
	pub fn amount(&self) -> Decimal {
		self.amount
	}

	/// Returns the ISO-4217 currency code.
	pub fn currency(&self) -> &str {
		&self.currency
	}
}
impl Display for Money {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{} {}", self.amount, self.currency)
	}
}

#[derive(Serialize, Deserialize)]
struct MoneyRepr {
	amount: Decimal,
	currency: String,
}
impl TryFrom<MoneyRepr> for Money {
	type Error = MoneyError;

	fn try_from(repr: MoneyRepr) -> Result<Self, Self::Error> {
		Money::new(repr.amount, repr.currency)
	}
}
impl From<Money> for MoneyRepr {
	fn from(money: Money) -> Self {
		Self { amount: money.amount, currency: money.currency }
	}
}
