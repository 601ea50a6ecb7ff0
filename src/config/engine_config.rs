use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("initial_capital must be positive, got {0}")]
    NonPositiveCapital(f64),
    #[error("fee_rate must be within [0, 1), got {0}")]
    FeeRateOutOfRange(f64),
    #[error("trading_periods_per_year must be positive")]
    ZeroPeriods,
}

//immutable per-run engine configuration
//
//passed explicitly into each simulator call so concurrent runs with
//different parameters never interfere
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    //starting cash balance
    pub initial_capital: f64,

    //proportional fee applied symmetrically on entry and exit
    pub fee_rate: f64,

    //periods used for annualization (252 for daily bars)
    pub trading_periods_per_year: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            initial_capital: 1_000_000.0,
            fee_rate: 0.002,
            trading_periods_per_year: 252,
        }
    }
}

impl EngineConfig {
    //creates a validated configuration
    pub fn new(
        initial_capital: f64,
        fee_rate: f64,
        trading_periods_per_year: u32,
    ) -> Result<Self, ConfigError> {
        let config = EngineConfig {
            initial_capital,
            fee_rate,
            trading_periods_per_year,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.initial_capital > 0.0) {
            return Err(ConfigError::NonPositiveCapital(self.initial_capital));
        }
        if !(0.0..1.0).contains(&self.fee_rate) {
            return Err(ConfigError::FeeRateOutOfRange(self.fee_rate));
        }
        if self.trading_periods_per_year == 0 {
            return Err(ConfigError::ZeroPeriods);
        }
        Ok(())
    }

    //load configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config: EngineConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    //save configuration to a JSON file
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.initial_capital, 1_000_000.0);
        assert_eq!(config.fee_rate, 0.002);
        assert_eq!(config.trading_periods_per_year, 252);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_capital_rejected() {
        assert!(matches!(
            EngineConfig::new(0.0, 0.002, 252),
            Err(ConfigError::NonPositiveCapital(_))
        ));
    }

    #[test]
    fn test_fee_rate_bounds() {
        assert!(EngineConfig::new(1000.0, 0.0, 252).is_ok());
        assert!(matches!(
            EngineConfig::new(1000.0, 1.0, 252),
            Err(ConfigError::FeeRateOutOfRange(_))
        ));
        assert!(matches!(
            EngineConfig::new(1000.0, -0.1, 252),
            Err(ConfigError::FeeRateOutOfRange(_))
        ));
    }

    #[test]
    fn test_zero_periods_rejected() {
        assert!(matches!(
            EngineConfig::new(1000.0, 0.002, 0),
            Err(ConfigError::ZeroPeriods)
        ));
    }
}
