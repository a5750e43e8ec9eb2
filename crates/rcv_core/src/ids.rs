//! crates/rcv_core/src/ids.rs
//! Candidate identifiers and the result fingerprint id.
//! Candidates are opaque strings; output ids keep a strict ASCII shape.

use core::borrow::Borrow;
use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors returned when validating or parsing output IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdError {
    NonAscii,
    TooLong,
    BadShape,
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdError::NonAscii => f.write_str("id must be ASCII without NUL"),
            IdError::TooLong => f.write_str("id too long"),
            IdError::BadShape => f.write_str("id has the wrong shape"),
        }
    }
}

impl std::error::Error for IdError {}

const MAX_ID_LEN: usize = 256;
const HEX64_LEN: usize = 64;
const RES_PREFIX: &str = "RES:";

#[inline]
fn is_ascii_no_nul(s: &str) -> bool {
    !s.as_bytes().iter().any(|&b| b == 0 || b > 0x7F)
}

/// Lowercase hex (length must be exactly 64).
#[inline]
pub fn is_valid_sha256(s: &str) -> bool {
    if s.len() != HEX64_LEN || !is_ascii_no_nul(s) {
        return false;
    }
    s.as_bytes()
        .iter()
        .all(|&b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

macro_rules! simple_string_newtype {
    ($(#[$m:meta])* $name:ident) => {
        $(#[$m])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(String);

        impl $name {
            #[inline] pub fn as_str(&self) -> &str { &self.0 }
        }

        impl fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
        }
    }
}

simple_string_newtype!(
    /// Opaque candidate identifier, unique within one election.
    /// Any string is accepted; uniqueness and membership are validator concerns.
    CandidateId
);

impl From<&str> for CandidateId {
    #[inline]
    fn from(s: &str) -> Self {
        CandidateId(s.to_owned())
    }
}

impl From<String> for CandidateId {
    #[inline]
    fn from(s: String) -> Self {
        CandidateId(s)
    }
}

impl Borrow<str> for CandidateId {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for CandidateId {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CandidateId {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

simple_string_newtype!(
    /// "RES:" + 64-hex lowercase fingerprint of a result's canonical content.
    ResultId
);

#[inline]
fn is_res_shape(s: &str) -> bool {
    s.len() == RES_PREFIX.len() + HEX64_LEN
        && s.starts_with(RES_PREFIX)
        && is_valid_sha256(&s[RES_PREFIX.len()..])
}

impl FromStr for ResultId {
    type Err = IdError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_ascii_no_nul(s) { return Err(IdError::NonAscii); }
        if s.len() > MAX_ID_LEN { return Err(IdError::TooLong); }
        if !is_res_shape(s) { return Err(IdError::BadShape); }
        Ok(ResultId(s.to_owned()))
    }
}

impl ResultId {
    /// Build from a 64-hex digest.
    pub fn from_hex(hex64: &str) -> Result<Self, IdError> {
        format!("{RES_PREFIX}{hex64}").parse()
    }

    #[inline] pub fn as_hex(&self) -> &str { &self.0[RES_PREFIX.len()..] }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEX: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    #[test]
    fn candidate_ids_are_opaque() {
        for s in ["A", "Alice Smith", "VP 1", "Zoë", ""] {
            let c = CandidateId::from(s);
            assert_eq!(c.as_str(), s);
            assert_eq!(c.to_string(), s);
        }
        assert_eq!(CandidateId::from("A"), "A");
    }

    #[test]
    fn result_id_shape() {
        let id: ResultId = format!("RES:{HEX}").parse().unwrap();
        assert_eq!(id.as_hex(), HEX);
        assert_eq!(ResultId::from_hex(HEX).unwrap(), id);

        assert_eq!("RES:DEADBEEF".parse::<ResultId>(), Err(IdError::BadShape));
        assert_eq!(format!("FR:{HEX}").parse::<ResultId>(), Err(IdError::BadShape));
        assert_eq!("RES:é".parse::<ResultId>(), Err(IdError::NonAscii));
        assert!(ResultId::from_hex(&HEX.to_uppercase()).is_err());
    }
}
