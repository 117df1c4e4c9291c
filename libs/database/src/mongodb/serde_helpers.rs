//! Field adapters for documents stored through the driver.

/// Stores a [`uuid::Uuid`] as its hyphenated string in every serializer.
///
/// `Uuid`'s own impl switches to raw bytes for non human-readable formats,
/// which is what the driver uses for inserts, while query documents built
/// with `doc!` hold strings. Pinning the string form keeps ids written and
/// ids queried identical.
///
/// ```ignore
/// #[derive(Serialize, Deserialize)]
/// struct Product {
///     #[serde(rename = "_id", with = "database::mongodb::serde_helpers::uuid_as_string")]
///     id: Uuid,
/// }
/// ```
pub mod uuid_as_string {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};
    use uuid::Uuid;

    pub fn serialize<S: Serializer>(id: &Uuid, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&id.hyphenated())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Uuid, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Uuid::parse_str(&raw).map_err(D::Error::custom)
    }
}
