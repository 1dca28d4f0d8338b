//! Wire types shared with the extraction service.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

// =============================================================================
// Document types
// =============================================================================

/// Classification tag selecting the field set the service extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentType {
    Sktt,
    Evln,
    Itas,
    Itk,
    Notifikasi,
    Dkptka,
}

impl DocumentType {
    /// Every supported type, in the order the service lists them.
    pub const ALL: [DocumentType; 6] = [
        DocumentType::Sktt,
        DocumentType::Evln,
        DocumentType::Itas,
        DocumentType::Itk,
        DocumentType::Notifikasi,
        DocumentType::Dkptka,
    ];

    /// Tag sent as the `document_type` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Sktt => "SKTT",
            DocumentType::Evln => "EVLN",
            DocumentType::Itas => "ITAS",
            DocumentType::Itk => "ITK",
            DocumentType::Notifikasi => "Notifikasi",
            DocumentType::Dkptka => "DKPTKA",
        }
    }

    pub fn full_name(&self) -> &'static str {
        match self {
            DocumentType::Sktt => "Surat Keterangan Tinggal Terbatas",
            DocumentType::Evln => "Exit Visa Luar Negeri",
            DocumentType::Itas => "Izin Tinggal Terbatas",
            DocumentType::Itk => "Izin Tinggal Kunjungan",
            DocumentType::Notifikasi => "Notifikasi TKA",
            DocumentType::Dkptka => "Dana Kompensasi Penggunaan TKA",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DocumentType::Sktt => "Indonesian temporary residence permit",
            DocumentType::Evln => "Exit visa for foreign nationals",
            DocumentType::Itas => "Limited stay permit",
            DocumentType::Itk => "Visit stay permit",
            DocumentType::Notifikasi => "Foreign worker notification",
            DocumentType::Dkptka => "Foreign worker compensation fund",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a tag does not name a supported document type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown document type: {0}")]
pub struct UnknownDocumentType(pub String);

impl FromStr for DocumentType {
    type Err = UnknownDocumentType;

    /// Case-insensitive: the service echoes `NOTIFIKASI` in upper case.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let tag = s.trim();
        DocumentType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(tag))
            .ok_or_else(|| UnknownDocumentType(tag.to_string()))
    }
}

impl Serialize for DocumentType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DocumentType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        tag.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Submission options
// =============================================================================

/// User-chosen options for one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionOptions {
    pub document_type: DocumentType,
    pub rename_enabled: bool,
    pub use_name_for_rename: bool,
    pub use_passport_for_rename: bool,
}

impl ExtractionOptions {
    /// Plain extraction of `document_type`, renaming off.
    pub fn new(document_type: DocumentType) -> Self {
        Self {
            document_type,
            rename_enabled: false,
            use_name_for_rename: true,
            use_passport_for_rename: true,
        }
    }

    /// Turn renaming on or off.
    pub fn with_rename(mut self, enabled: bool) -> Self {
        self.rename_enabled = enabled;
        self
    }

    pub fn with_name_for_rename(mut self, use_name: bool) -> Self {
        self.use_name_for_rename = use_name;
        self
    }

    pub fn with_passport_for_rename(mut self, use_passport: bool) -> Self {
        self.use_passport_for_rename = use_passport;
        self
    }
}

// =============================================================================
// Per-file field maps
// =============================================================================

/// Free-form field name → value mapping returned for one file.
///
/// Keys depend on the document template and service version, so nothing
/// here assumes a fixed key set. Insertion order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawFieldMap(IndexMap<String, Value>);

impl RawFieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a string field, returning `self` for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), Value::String(value.into()));
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Raw JSON value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Scalar text stored under `key`, trimmed.
    ///
    /// `null`, blank strings, arrays and objects count as absent. Numbers
    /// and booleans are rendered as text.
    pub fn text(&self, key: &str) -> Option<String> {
        let text = match self.0.get(key)? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null | Value::Array(_) | Value::Object(_) => return None,
        };
        (!text.is_empty()).then_some(text)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawFieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), Value::String(v.into())))
                .collect(),
        )
    }
}

// =============================================================================
// Per-file results
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Success,
    Error,
}

/// Outcome of extracting one submitted file.
///
/// `data` is present iff `status` is `Success`; `error` iff `Error`. Use the
/// constructors to keep that pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    pub filename: String,
    pub status: ResultStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<RawFieldMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResultItem {
    pub fn success(filename: impl Into<String>, data: RawFieldMap) -> Self {
        Self {
            filename: filename.into(),
            status: ResultStatus::Success,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(filename: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            status: ResultStatus::Error,
            data: None,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ResultStatus::Success
    }

    /// Field data, only for successful items that actually carry some.
    pub fn extracted(&self) -> Option<&RawFieldMap> {
        match self.status {
            ResultStatus::Success => self.data.as_ref(),
            ResultStatus::Error => None,
        }
    }
}

// =============================================================================
// Response shapes
// =============================================================================

/// Body of `POST /extract`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlainResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub total_files: usize,
    #[serde(default)]
    pub processed_files: usize,
    #[serde(default)]
    pub failed_files: usize,
    #[serde(default)]
    pub results: Vec<ResultItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renamed_files: Option<IndexMap<String, String>>,
}

/// Body of `POST /extract-with-rename`.
///
/// Carries one field map per processed file instead of per-file results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenameResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub total_files: usize,
    #[serde(default)]
    pub processed_files: usize,
    #[serde(default)]
    pub failed_files: usize,
    #[serde(default)]
    pub extraction_data: Vec<RawFieldMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renamed_files: Option<IndexMap<String, String>>,
}

/// Response of either extraction endpoint, tagged by which one answered.
#[derive(Debug, Clone, PartialEq)]
pub enum RawResponse {
    Plain(PlainResponse),
    Rename(RenameResponse),
}

impl RawResponse {
    pub fn is_rename(&self) -> bool {
        matches!(self, RawResponse::Rename(_))
    }
}

// =============================================================================
// Service catalogue
// =============================================================================

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceInfo {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub supported_documents: Vec<String>,
    #[serde(default)]
    pub description: String,
}

/// One entry of `GET /document-types`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTypeInfo {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl From<DocumentType> for DocumentTypeInfo {
    fn from(t: DocumentType) -> Self {
        Self {
            code: t.as_str().to_string(),
            name: t.full_name().to_string(),
            description: t.description().to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DocumentTypesResponse {
    #[serde(default)]
    pub supported_types: Vec<DocumentTypeInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_type_parse_is_case_insensitive() {
        assert_eq!("NOTIFIKASI".parse::<DocumentType>(), Ok(DocumentType::Notifikasi));
        assert_eq!("sktt".parse::<DocumentType>(), Ok(DocumentType::Sktt));
        assert_eq!(" DKPTKA ".parse::<DocumentType>(), Ok(DocumentType::Dkptka));
        assert!("PASSPORT".parse::<DocumentType>().is_err());
    }

    #[test]
    fn test_unknown_document_type_is_an_error() {
        let err = "PASSPORT".parse::<DocumentType>().unwrap_err();
        assert_eq!(err, UnknownDocumentType("PASSPORT".to_string()));
        assert_eq!(err.to_string(), "unknown document type: PASSPORT");

        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert_eq!(boxed.to_string(), "unknown document type: PASSPORT");
    }

    #[test]
    fn test_document_type_serializes_as_tag() {
        let v = serde_json::to_value(DocumentType::Notifikasi).unwrap();
        assert_eq!(v, json!("Notifikasi"));
        let back: DocumentType = serde_json::from_value(json!("itk")).unwrap();
        assert_eq!(back, DocumentType::Itk);
    }

    #[test]
    fn test_raw_field_map_text_treats_blank_and_null_as_absent() {
        let map: RawFieldMap = serde_json::from_value(json!({
            "Name": "  Alice  ",
            "NIK": 3171,
            "Address": "",
            "Guarantor": null,
            "Tags": ["a"]
        }))
        .unwrap();

        assert_eq!(map.text("Name").as_deref(), Some("Alice"));
        assert_eq!(map.text("NIK").as_deref(), Some("3171"));
        assert_eq!(map.text("Address"), None);
        assert_eq!(map.text("Guarantor"), None);
        assert_eq!(map.text("Tags"), None);
        assert_eq!(map.text("Missing"), None);
    }

    #[test]
    fn test_raw_field_map_preserves_key_order() {
        let map: RawFieldMap = serde_json::from_str(r#"{"Z": "1", "A": "2", "M": "3"}"#).unwrap();
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["Z", "A", "M"]);
    }

    #[test]
    fn test_result_item_wire_shape() {
        let ok: ResultItem = serde_json::from_value(json!({
            "filename": "a.pdf",
            "status": "success",
            "data": {"Name": "Alice"}
        }))
        .unwrap();
        assert!(ok.is_success());
        assert_eq!(ok.extracted().and_then(|d| d.text("Name")).as_deref(), Some("Alice"));

        let failed: ResultItem = serde_json::from_value(json!({
            "filename": "b.pdf",
            "status": "error",
            "error": "corrupt"
        }))
        .unwrap();
        assert!(!failed.is_success());
        assert!(failed.extracted().is_none());
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({"filename": "b.pdf", "status": "error", "error": "corrupt"})
        );
    }

    #[test]
    fn test_rename_response_defaults_missing_fields() {
        let resp: RenameResponse =
            serde_json::from_value(json!({"extraction_data": [{"Name": "X"}]})).unwrap();
        assert_eq!(resp.extraction_data.len(), 1);
        assert_eq!(resp.total_files, 0);
        assert!(resp.renamed_files.is_none());
    }
}
