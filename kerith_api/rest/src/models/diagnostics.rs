use serde::{ser::SerializeMap, Serialize, Serializer};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEmailReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<Vec<&'static str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_details: Option<String>,
    pub configured: ApiConfiguredSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip: Option<&'static str>,
}

/// Serialized as a JSON object, preserving the order of the settings.
pub struct ApiConfiguredSettings(pub Vec<(&'static str, bool)>);

impl Serialize for ApiConfiguredSettings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, set) in &self.0 {
            map.serialize_entry(name, set)?;
        }
        map.end()
    }
}

#[derive(Serialize)]
pub struct ApiHealth {
    pub http: bool,
    pub email: bool,
}
