use crate::types::gem::GemsDocument;

pub fn to_json(document: &GemsDocument) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(document)
}
