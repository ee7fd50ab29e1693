// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Deserializer, Serializer};

/// Accepts an identifier written either as a JSON string or as an integer
/// and canonicalizes it to the decimal string form.
pub mod flexible_id {
    use super::*;

    pub fn serialize<S>(value: &str, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
            Uint(u64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Ok(s),
            Raw::Int(n) => Ok(n.to_string()),
            Raw::Uint(n) => Ok(n.to_string()),
        }
    }
}

/// Accepts a field written either as a sequence of strings or as a single
/// bare string; both shapes come back as a `Vec<String>`. The source
/// pipeline emits either depending on how many reasons it found.
pub mod string_or_seq {
    use super::*;

    pub fn serialize<S>(value: &[String], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Seq(Vec<String>),
            One(String),
        }

        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(Vec::new()),
            Some(Raw::Seq(items)) => Ok(items),
            Some(Raw::One(single)) => Ok(vec![single]),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct IdHolder {
        #[serde(with = "super::flexible_id")]
        id: String,
    }

    #[derive(Deserialize)]
    struct ReasonsHolder {
        #[serde(default, with = "super::string_or_seq")]
        reasons: Vec<String>,
    }

    #[test]
    fn flexible_id_reads_string_or_integer() {
        let a: IdHolder = serde_json::from_str(r#"{"id": "A7"}"#).expect("string id");
        assert_eq!(a.id, "A7");
        let b: IdHolder = serde_json::from_str(r#"{"id": 42}"#).expect("int id");
        assert_eq!(b.id, "42");
    }

    #[test]
    fn reasons_reads_sequence_bare_string_or_null() {
        let seq: ReasonsHolder =
            serde_json::from_str(r#"{"reasons": ["Wear", "Corrosion"]}"#).expect("seq");
        assert_eq!(seq.reasons, vec!["Wear", "Corrosion"]);
        let one: ReasonsHolder = serde_json::from_str(r#"{"reasons": "Wear"}"#).expect("bare");
        assert_eq!(one.reasons, vec!["Wear"]);
        let none: ReasonsHolder = serde_json::from_str(r#"{"reasons": null}"#).expect("null");
        assert!(none.reasons.is_empty());
    }
}
