//! Election-file loading.
//!
//! Shape:
//! `{ "title"?: string, "method"?: string, "seats"?: int, "candidates": [..], "ballots": [[..], ..] }`
//!
//! The loader is lenient about the two lists so that structural problems are
//! reported by the ballot validator with its usual messages: a `candidates`
//! or `ballots` value that is missing or not an array decodes as an empty
//! list, and a ballot that is not an array of strings decodes as an empty
//! ballot. Optional scalar fields of the wrong type are hard errors.

use std::fs;

use camino::Utf8Path;
use rcv_core::{methods, Ballot, CandidateId, ElectionConfig};
use serde_json::{Map, Value};

use crate::{looks_like_url_strict, IoError, IoResult};

/// Read and decode an election file from a local path.
pub fn load_election(path: &Utf8Path) -> IoResult<ElectionConfig> {
    if looks_like_url_strict(path.as_str()) {
        return Err(IoError::Invalid(format!("URLs are not accepted: {path}")));
    }
    let text = fs::read_to_string(path).map_err(|e| IoError::Path(format!("read {path}: {e}")))?;
    parse_election(&text)
}

/// Decode an election document.
pub fn parse_election(text: &str) -> IoResult<ElectionConfig> {
    let root: Value = serde_json::from_str(text)?;
    let obj = root.as_object().ok_or_else(|| IoError::Json {
        pointer: "/".into(),
        msg: "expected an object".into(),
    })?;

    let title = optional_str(obj, "title")?;
    let method = optional_str(obj, "method")?.unwrap_or_else(|| methods::IRV.to_string());
    let seats = optional_seats(obj)?.unwrap_or(1);

    Ok(ElectionConfig {
        title,
        candidates: decode_candidates(obj.get("candidates")),
        ballots: decode_ballots(obj.get("ballots")),
        method,
        seats,
    })
}

fn optional_str(obj: &Map<String, Value>, key: &str) -> IoResult<Option<String>> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(IoError::Json {
            pointer: format!("/{key}"),
            msg: "expected a string".into(),
        }),
    }
}

fn optional_seats(obj: &Map<String, Value>) -> IoResult<Option<u32>> {
    let bad = || IoError::Json {
        pointer: "/seats".into(),
        msg: "expected a non-negative integer".into(),
    };
    match obj.get("seats") {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or_else(bad),
    }
}

/// Non-array or non-string entries yield an empty list.
fn decode_candidates(v: Option<&Value>) -> Vec<CandidateId> {
    v.and_then(string_list).unwrap_or_default()
}

fn decode_ballots(v: Option<&Value>) -> Vec<Ballot> {
    match v {
        Some(Value::Array(items)) => items
            .iter()
            .map(|b| string_list(b).map(Ballot::new).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    }
}

fn string_list(v: &Value) -> Option<Vec<CandidateId>> {
    v.as_array()?
        .iter()
        .map(|x| x.as_str().map(CandidateId::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn full_document() {
        let cfg = parse_election(
            r#"{"title":"Board","method":"borda","seats":2,
                "candidates":["A","B","C"],"ballots":[["A","B"],["C"]]}"#,
        )
        .unwrap();
        assert_eq!(cfg.title.as_deref(), Some("Board"));
        assert_eq!(cfg.method, "borda");
        assert_eq!(cfg.seats, 2);
        assert_eq!(cfg.candidates.len(), 3);
        assert_eq!(cfg.ballots[0].ranking(), &["A", "B"][..]);
    }

    #[test]
    fn defaults_apply() {
        let cfg = parse_election(r#"{"candidates":["A"],"ballots":[["A"]]}"#).unwrap();
        assert_eq!(cfg.method, "irv");
        assert_eq!(cfg.seats, 1);
        assert_eq!(cfg.title, None);
    }

    #[test]
    fn wrong_list_shapes_decode_empty() {
        let cfg = parse_election(r#"{"candidates":"A,B","ballots":[["A"],[1,"B"],"C",[]]}"#).unwrap();
        assert!(cfg.candidates.is_empty());
        assert_eq!(cfg.ballots.len(), 4);
        assert_eq!(cfg.ballots[0].len(), 1);
        assert!(cfg.ballots[1].is_empty());
        assert!(cfg.ballots[2].is_empty());
        assert!(cfg.ballots[3].is_empty());

        let missing = parse_election(r#"{}"#).unwrap();
        assert!(missing.candidates.is_empty() && missing.ballots.is_empty());
    }

    #[test]
    fn bad_scalars_are_errors() {
        match parse_election(r#"{"seats":-1,"candidates":[],"ballots":[]}"#) {
            Err(IoError::Json { pointer, .. }) => assert_eq!(pointer, "/seats"),
            other => panic!("unexpected: {other:?}"),
        }
        match parse_election(r#"{"method":3}"#) {
            Err(IoError::Json { pointer, .. }) => assert_eq!(pointer, "/method"),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(parse_election("[1,2]"), Err(IoError::Json { .. })));
        assert!(matches!(parse_election("{not json"), Err(IoError::Json { .. })));
    }

    #[test]
    fn loads_from_disk_and_refuses_urls() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"candidates":["A","B"],"ballots":[["B","A"]]}}"#).unwrap();
        let path = Utf8Path::from_path(f.path()).unwrap();
        let cfg = load_election(path).unwrap();
        assert_eq!(cfg.ballots[0].ranking()[0], "B");

        let url = Utf8Path::new("https://example.org/e.json");
        assert!(matches!(load_election(url), Err(IoError::Invalid(_))));
    }
}
