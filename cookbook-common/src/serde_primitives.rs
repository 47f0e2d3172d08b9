//! Serde helpers for amounts.
//!
//! Balances are arbitrary precision integers. They travel as decimal strings so that no
//! consumer ever has to squeeze them through a float.

/// (De)serializes a `BigUint` as a base 10 string.
pub mod biguint_string {
    use std::str::FromStr;

    use num_bigint::BigUint;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_str_radix(10))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BigUint, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        BigUint::from_str(s.trim()).map_err(serde::de::Error::custom)
    }
}

/// (De)serializes an `Option<BigUint>` as an optional base 10 string.
pub mod biguint_string_option {
    use std::str::FromStr;

    use num_bigint::BigUint;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<BigUint>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_some(&v.to_str_radix(10)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<BigUint>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|s| BigUint::from_str(s.trim()).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Wrapper {
        #[serde(with = "super::biguint_string")]
        amount: BigUint,
        #[serde(with = "super::biguint_string_option", default)]
        value: Option<BigUint>,
    }

    #[test]
    fn test_amounts_serialize_as_decimal_strings() {
        let wrapper = Wrapper {
            amount: BigUint::parse_bytes(b"340282366920938463463374607431768211457", 10).unwrap(),
            value: None,
        };

        let json = serde_json::to_string(&wrapper).unwrap();

        assert_eq!(json, r#"{"amount":"340282366920938463463374607431768211457","value":null}"#);
        assert_eq!(serde_json::from_str::<Wrapper>(&json).unwrap(), wrapper);
    }

    #[test]
    fn test_missing_optional_amount_defaults_to_none() {
        let wrapper: Wrapper = serde_json::from_str(r#"{"amount":"12"}"#).unwrap();

        assert_eq!(wrapper.value, None);
        assert_eq!(wrapper.amount, BigUint::from(12u32));
    }

    #[test]
    fn test_rejects_negative_amounts() {
        assert!(serde_json::from_str::<Wrapper>(r#"{"amount":"-1"}"#).is_err());
    }
}
