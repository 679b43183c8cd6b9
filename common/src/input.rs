//! Indicator input record

use serde::{Deserialize, Serialize};

/// Manually entered pre-open indicators for one evaluation.
///
/// Every field has a neutral default so a partially filled form (or a partial
/// TOML/JSON file) still yields a complete record. Percentages are already in
/// percentage points and flows are in ₹ crore; nothing is converted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorInput {
    /// Nifty 50 spot previous close
    #[serde(alias = "nifty_close")]
    pub spot_prev_close: f64,

    /// Nifty futures previous close
    #[serde(alias = "futures_close")]
    pub futures_prev_close: f64,

    /// GIFT/SGX Nifty value before the open
    #[serde(alias = "sgx_value")]
    pub reference_value: f64,

    /// Dow Jones overnight % change
    #[serde(alias = "dji_change")]
    pub dow_jones_change: f64,

    /// S&P 500 overnight % change
    pub sp500_change: f64,

    /// CBOE VIX overnight % change
    pub cboe_vix_change: f64,

    /// India VIX level
    #[serde(alias = "vix")]
    pub india_vix: f64,

    /// Nifty put/call ratio
    pub pcr: f64,

    /// Day-over-day change in the put/call ratio
    pub pcr_change: f64,

    /// Max-pain strike shift in index points
    pub max_pain_shift: f64,

    /// ATM implied volatility % change
    pub atm_iv_change: f64,

    /// FII net cash-market flow
    pub fii_net: f64,

    /// DII net cash-market flow
    pub dii_net: f64,

    /// DII were net buyers today
    #[serde(alias = "dii_buy")]
    pub dii_buying: bool,

    /// USD/INR overnight % change
    #[serde(alias = "usd_inr_chg")]
    pub usd_inr_change: f64,

    /// Brent crude overnight % change
    #[serde(alias = "crude_change")]
    pub brent_crude_change: f64,
}

impl Default for IndicatorInput {
    fn default() -> Self {
        Self {
            spot_prev_close: 0.0,
            futures_prev_close: 0.0,
            reference_value: 0.0,
            dow_jones_change: 0.0,
            sp500_change: 0.0,
            cboe_vix_change: 0.0,
            india_vix: 0.0,
            pcr: 1.0, // 1.0 is the neutral ratio
            pcr_change: 0.0,
            max_pain_shift: 0.0,
            atm_iv_change: 0.0,
            fii_net: 0.0,
            dii_net: 0.0,
            dii_buying: false,
            usd_inr_change: 0.0,
            brent_crude_change: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_neutral() {
        let input = IndicatorInput::default();
        assert_eq!(input.pcr, 1.0);
        assert_eq!(input.fii_net, 0.0);
        assert!(!input.dii_buying);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let input: IndicatorInput = toml::from_str(
            r#"
            spot_prev_close = 22000.0
            reference_value = 22100.0
            "#,
        )
        .unwrap();

        assert_eq!(input.spot_prev_close, 22000.0);
        assert_eq!(input.reference_value, 22100.0);
        assert_eq!(input.pcr, 1.0);
        assert_eq!(input.futures_prev_close, 0.0);
    }

    #[test]
    fn test_legacy_field_names() {
        let input: IndicatorInput = serde_json::from_str(
            r#"{
                "nifty_close": 22000.0,
                "futures_close": 22050.0,
                "sgx_value": 22100.0,
                "dji_change": 0.4,
                "vix": 16.2,
                "dii_buy": true,
                "crude_change": -2.5,
                "usd_inr_chg": 0.1
            }"#,
        )
        .unwrap();

        assert_eq!(input.spot_prev_close, 22000.0);
        assert_eq!(input.futures_prev_close, 22050.0);
        assert_eq!(input.reference_value, 22100.0);
        assert_eq!(input.dow_jones_change, 0.4);
        assert_eq!(input.india_vix, 16.2);
        assert!(input.dii_buying);
        assert_eq!(input.brent_crude_change, -2.5);
        assert_eq!(input.usd_inr_change, 0.1);
    }
}
