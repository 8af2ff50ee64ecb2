//! Field mapper: raw rdata text to the structured `rdata` object.

use serde_json::Value;

use crate::error::{DynectError, Result};
use crate::schema::{RecordType, fields_for};
use crate::types::FieldMap;

/// Map a raw rdata string for the type tag `record_type`.
///
/// TXT keeps the whole string as its single field. Every other type is split on
/// whitespace and the tokens are zipped onto the schema fields in order; the
/// token count must match the field count exactly. Unknown tags have an empty
/// schema, so only an empty rdata string maps for them.
pub fn format(record_type: &str, rdata: &str) -> Result<FieldMap> {
    let fields = fields_for(record_type);

    if record_type
        .parse::<RecordType>()
        .is_ok_and(RecordType::is_free_text)
    {
        let mut map = FieldMap::new();
        if let Some(field) = fields.first() {
            map.insert((*field).to_string(), Value::String(rdata.to_string()));
        }
        return Ok(map);
    }

    let tokens: Vec<&str> = rdata.split_whitespace().collect();
    if tokens.len() != fields.len() {
        return Err(DynectError::FieldCountMismatch {
            record_type: record_type.trim().to_uppercase(),
            expected: fields.iter().map(|f| (*f).to_string()).collect(),
            given: tokens.iter().map(|t| (*t).to_string()).collect(),
        });
    }

    Ok(fields
        .iter()
        .zip(tokens)
        .map(|(field, token)| ((*field).to_string(), Value::String(token.to_string())))
        .collect())
}

/// [`format`] for an already validated type.
pub fn format_record(record_type: RecordType, rdata: &str) -> Result<FieldMap> {
    format(record_type.as_str(), rdata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn srv_maps_in_schema_order() {
        let map = format("SRV", "10 20 5061 sip.example.org.").unwrap();
        assert_eq!(
            Value::Object(map.clone()),
            json!({"priority": "10", "weight": "20", "port": "5061", "target": "sip.example.org."})
        );
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, ["priority", "weight", "port", "target"]);
    }

    #[test]
    fn extra_whitespace_is_ignored() {
        let map = format("mx", "  10\t mail.example.org. ").unwrap();
        assert_eq!(map["preference"], "10");
        assert_eq!(map["exchange"], "mail.example.org.");
    }

    #[test]
    fn mismatch_iff_token_count_differs() {
        let samples = ["", "a", "a b", "a b c", "a b c d", "a b c d e f g", "a b c d e f g h"];
        for record_type in RecordType::ALL.into_iter().filter(|t| !t.is_free_text()) {
            for rdata in samples {
                let tokens = rdata.split_whitespace().count();
                let result = format_record(record_type, rdata);
                if tokens == record_type.fields().len() {
                    assert!(result.is_ok(), "{record_type} {rdata:?}: {result:?}");
                } else {
                    assert!(
                        matches!(result, Err(DynectError::FieldCountMismatch { .. })),
                        "{record_type} {rdata:?}: {result:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn mismatch_reports_fields_and_tokens() {
        let err = format("A", "192.0.2.1 192.0.2.2");
        assert!(
            matches!(
                &err,
                Err(DynectError::FieldCountMismatch { record_type, expected, given })
                    if record_type == "A" && expected == &["address"] && given.len() == 2
            ),
            "unexpected result: {err:?}"
        );
    }

    #[test]
    fn txt_keeps_whole_string() {
        for rdata in ["", "v=spf1 -all", "  spaced   out  text ", "single"] {
            let map = format("TXT", rdata).unwrap();
            assert_eq!(map.len(), 1);
            assert_eq!(map["txtdata"], rdata);
        }
    }

    #[test]
    fn txt_tag_is_case_insensitive() {
        let map = format("txt", "hello world").unwrap();
        assert_eq!(map["txtdata"], "hello world");
    }

    #[test]
    fn unknown_type_has_empty_schema() {
        assert!(format("SPF", "").unwrap().is_empty());
        assert!(matches!(
            format("SPF", "v=spf1"),
            Err(DynectError::FieldCountMismatch { .. })
        ));
    }
}
