use chrono::{DateTime, Utc};
use serde::{self, Deserialize, Deserializer, Serializer};

pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_i64(dt.timestamp())
}

pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
    let secs = i64::deserialize(d)?;
    DateTime::<Utc>::from_timestamp(secs, 0)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid unix timestamp {}", secs)))
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Stamped {
        #[serde(with = "super")]
        at: DateTime<Utc>,
    }

    #[test]
    fn round_trips_unix_seconds() {
        let json = r#"{"at":1700000000}"#;
        let parsed: Stamped = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.at.timestamp(), 1700000000);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), json);
    }
}
