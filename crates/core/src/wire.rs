//! Client-side handling of a stats response body.

use crate::codec;
use crate::error::CoreError;
use crate::field_map::RawFieldMap;
use crate::stats::PlayerRecord;

/// Turns a fetched stats response into a record. Any non-2xx status is an
/// error carrying the body; a 2xx body must be a JSON field map.
pub fn decode_stats_response(status: u16, body: &str) -> Result<PlayerRecord, CoreError> {
    if !(200..300).contains(&status) {
        return Err(CoreError::UnexpectedStatus {
            status,
            body: body.to_string(),
        });
    }
    let raw = RawFieldMap::from_json(body)?;
    Ok(codec::decode(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Stat;

    #[test]
    fn ok_body_decodes() {
        let record =
            decode_stats_response(200, r#"{"UserId":"p1","Speed":"130","Armor":"oops"}"#)
                .unwrap();
        assert_eq!(record.get(Stat::Speed), 130);
        assert_eq!(record.get(Stat::Armor), 0);
    }

    #[test]
    fn error_status_is_surfaced() {
        let err = decode_stats_response(404, r#"{"error":{"code":"record_not_found"}}"#)
            .unwrap_err();
        assert!(matches!(err, CoreError::UnexpectedStatus { status: 404, .. }));
    }

    #[test]
    fn garbage_body_is_a_serialization_error() {
        let err = decode_stats_response(200, "<html>").unwrap_err();
        assert!(matches!(err, CoreError::Serialization(_)));
    }
}
