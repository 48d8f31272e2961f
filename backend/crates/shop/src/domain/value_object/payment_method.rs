//! Payment Method

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ShopError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[display("card")]
    Card,
    #[display("upi")]
    Upi,
    #[display("netbanking")]
    NetBanking,
    #[display("qrcode")]
    QrCode,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Upi => "upi",
            PaymentMethod::NetBanking => "netbanking",
            PaymentMethod::QrCode => "qrcode",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ShopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(PaymentMethod::Card),
            "upi" => Ok(PaymentMethod::Upi),
            "netbanking" => Ok(PaymentMethod::NetBanking),
            "qrcode" => Ok(PaymentMethod::QrCode),
            _ => Err(ShopError::validation("Valid payment method is required")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("upi".parse::<PaymentMethod>().unwrap(), PaymentMethod::Upi);
        assert_eq!("netbanking".parse::<PaymentMethod>().unwrap(), PaymentMethod::NetBanking);
        assert!("cash".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&PaymentMethod::QrCode).unwrap();
        assert_eq!(json, "\"qrcode\"");
        assert_eq!(PaymentMethod::QrCode.to_string(), "qrcode");
    }
}
