//! Result records

use std::fmt;

use crate::account::DerivedAddress;
use crate::crypto::keys::KeyType;
use crate::pricing::ExchangeRates;

/// Convert a base-unit amount to USD
///
/// `usd = base_units / divisor * rate`, with the divisor 1e8 for BTC and 1e18 for ETH.
pub fn to_usd(key_type: KeyType, base_units: u128, usd_per_coin: f64) -> f64 {
    base_units as f64 / key_type.unit_divisor() * usd_per_coin
}

/// Address, balance and USD value of one chain for one seed
#[derive(Debug, Clone, PartialEq)]
pub struct ChainHolding {
    /// The chain
    pub key_type: KeyType,
    /// Derived address, absent if derivation failed
    pub address: Option<DerivedAddress>,
    /// Balance in base units, absent if it could not be determined
    pub balance: Option<u128>,
    /// USD value of the balance, zero when absent
    pub usd: f64,
}

impl ChainHolding {
    /// Build a holding and value it at the current rates
    pub fn new(key_type: KeyType, address: Option<DerivedAddress>, balance: Option<u128>, rates: &ExchangeRates) -> Self {
        let usd = balance
            .map(|units| to_usd(key_type, units, rates.usd_per_coin(key_type)))
            .unwrap_or(0.0);

        Self {
            key_type,
            address,
            balance,
            usd,
        }
    }

    /// Whether the balance is known and strictly positive
    pub fn is_funded(&self) -> bool {
        self.balance.map_or(false, |units| units > 0)
    }

    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.key_type.name();
        match &self.address {
            Some(address) => writeln!(f, "{} Address: {}", name, address.as_str())?,
            None => writeln!(f, "{} Address: unavailable", name)?,
        }
        match self.balance {
            Some(units) => writeln!(f, "{} Balance: {} {} (${:.2} USD)", name, units, self.key_type.base_unit(), self.usd),
            None => writeln!(f, "{} Balance: unavailable {} (${:.2} USD)", name, self.key_type.base_unit(), self.usd),
        }
    }
}

/// Report entry for a seed holding funds on at least one chain
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    /// The seed phrase as read from input
    pub seed: String,
    /// Bitcoin holding
    pub bitcoin: ChainHolding,
    /// Ethereum holding
    pub ethereum: ChainHolding,
}

impl ResultRecord {
    /// Build a record, or `None` when neither chain holds a positive balance
    pub fn from_holdings(seed: &str, bitcoin: ChainHolding, ethereum: ChainHolding) -> Option<Self> {
        if !bitcoin.is_funded() && !ethereum.is_funded() {
            return None;
        }

        Some(Self {
            seed: seed.to_string(),
            bitcoin,
            ethereum,
        })
    }

    /// Combined USD value of both chains
    pub fn total_usd(&self) -> f64 {
        self.bitcoin.usd + self.ethereum.usd
    }
}

impl fmt::Display for ResultRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Seed Phrase: {}", self.seed)?;
        self.bitcoin.render(f)?;
        self.ethereum.render(f)?;
        writeln!(f, "Total USD Balance: ${:.2}", self.total_usd())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rates() -> ExchangeRates {
        ExchangeRates::new(60_000.0, 2_000.0).unwrap()
    }

    fn address(key_type: KeyType, address: &str) -> Option<DerivedAddress> {
        Some(DerivedAddress::new(address.to_string(), key_type, key_type.derivation_path().to_string()))
    }

    #[test]
    fn test_to_usd() {
        assert_eq!(to_usd(KeyType::Bitcoin, 100_000_000, 60_000.0), 60_000.0);
        assert_eq!(to_usd(KeyType::Bitcoin, 50_000, 60_000.0), 50_000.0 / 1e8 * 60_000.0);
        assert_eq!(to_usd(KeyType::Ethereum, 500_000_000_000_000_000, 2_000.0), 1_000.0);
        assert_eq!(to_usd(KeyType::Ethereum, 0, 2_000.0), 0.0);
    }

    #[test]
    fn test_to_usd_is_stable() {
        let first = to_usd(KeyType::Ethereum, 123_456_789_012_345_678, 3_150.25);
        let second = to_usd(KeyType::Ethereum, 123_456_789_012_345_678, 3_150.25);
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_absent_balance_is_worth_nothing() {
        let holding = ChainHolding::new(KeyType::Bitcoin, address(KeyType::Bitcoin, "1abc"), None, &rates());
        assert_eq!(holding.usd, 0.0);
        assert!(!holding.is_funded());
    }

    #[test]
    fn test_record_requires_a_funded_chain() {
        let rates = rates();
        let empty_btc = ChainHolding::new(KeyType::Bitcoin, address(KeyType::Bitcoin, "1abc"), Some(0), &rates);
        let empty_eth = ChainHolding::new(KeyType::Ethereum, address(KeyType::Ethereum, "0xabc"), None, &rates);

        assert!(ResultRecord::from_holdings("seed", empty_btc, empty_eth).is_none());
    }

    #[test]
    fn test_render_eth_only_record() {
        let rates = rates();
        let btc = ChainHolding::new(KeyType::Bitcoin, address(KeyType::Bitcoin, "1abc"), Some(0), &rates);
        let eth = ChainHolding::new(KeyType::Ethereum, address(KeyType::Ethereum, "0xabc"), Some(500_000_000_000_000_000), &rates);

        let record = ResultRecord::from_holdings("some seed words", btc, eth).unwrap();
        assert_eq!(record.total_usd(), 1_000.0);
        assert_eq!(
            record.to_string(),
            "Seed Phrase: some seed words\n\
             Bitcoin Address: 1abc\n\
             Bitcoin Balance: 0 satoshis ($0.00 USD)\n\
             Ethereum Address: 0xabc\n\
             Ethereum Balance: 500000000000000000 wei ($1000.00 USD)\n\
             Total USD Balance: $1000.00\n"
        );
    }

    #[test]
    fn test_render_unavailable_chain() {
        let rates = rates();
        let btc = ChainHolding::new(KeyType::Bitcoin, address(KeyType::Bitcoin, "1abc"), Some(25_000), &rates);
        let eth = ChainHolding::new(KeyType::Ethereum, None, None, &rates);

        let rendered = ResultRecord::from_holdings("s", btc, eth).unwrap().to_string();
        assert!(rendered.contains("Bitcoin Balance: 25000 satoshis ($15.00 USD)\n"));
        assert!(rendered.contains("Ethereum Address: unavailable\n"));
        assert!(rendered.contains("Ethereum Balance: unavailable wei ($0.00 USD)\n"));
        assert!(rendered.ends_with("Total USD Balance: $15.00\n"));
    }
}
