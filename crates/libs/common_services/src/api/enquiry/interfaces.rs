use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;

/// An enquiry as submitted by a site visitor. Missing or `null` fields deserialize as empty,
/// so they are reported by validation instead of failing the request body.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnquiryRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub mobile: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub subject: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::EnquiryRequest;

    #[test]
    fn null_and_missing_fields_are_empty() {
        let request: EnquiryRequest = serde_json::from_str(
            r#"{"name":null,"mobile":"98450","email":"a@b.in","subject":null}"#,
        )
        .expect("deserializable");
        assert_eq!(request.name, "");
        assert_eq!(request.mobile, "98450");
        assert_eq!(request.subject, "");
        assert_eq!(request.message, "");
    }
}
