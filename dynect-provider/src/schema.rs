//! Record schema table: the ordered rdata field names for every supported type.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DynectError;

/// Supported DNS record types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// DNSSEC public key record.
    Dnskey,
    /// Legacy key record, same layout as DNSKEY.
    Key,
    /// Delegation signer record.
    Ds,
    /// Geographic location record.
    Loc,
    /// Mail exchange record.
    Mx,
    /// Name server record.
    Ns,
    /// Reverse pointer record.
    Ptr,
    /// Responsible person record.
    Rp,
    /// Start of authority record.
    Soa,
    /// Service locator record.
    Srv,
    /// Text record.
    Txt,
}

impl RecordType {
    pub const ALL: [Self; 14] = [
        Self::A,
        Self::Aaaa,
        Self::Cname,
        Self::Dnskey,
        Self::Key,
        Self::Ds,
        Self::Loc,
        Self::Mx,
        Self::Ns,
        Self::Ptr,
        Self::Rp,
        Self::Soa,
        Self::Srv,
        Self::Txt,
    ];

    /// Upper-case type tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Dnskey => "DNSKEY",
            Self::Key => "KEY",
            Self::Ds => "DS",
            Self::Loc => "LOC",
            Self::Mx => "MX",
            Self::Ns => "NS",
            Self::Ptr => "PTR",
            Self::Rp => "RP",
            Self::Soa => "SOA",
            Self::Srv => "SRV",
            Self::Txt => "TXT",
        }
    }

    /// Ordered rdata field names.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Self::A | Self::Aaaa => &["address"],
            Self::Cname => &["cname"],
            Self::Dnskey | Self::Key => &["flags", "protocol", "algorithm", "public_key"],
            Self::Ds => &["keytag", "algorithm", "digtype", "digest"],
            Self::Loc => &[
                "version",
                "size",
                "horiz_pre",
                "vert_pre",
                "latitude",
                "longitude",
                "altitude",
            ],
            Self::Mx => &["preference", "exchange"],
            Self::Ns => &["nsdname"],
            Self::Ptr => &["ptrdname"],
            Self::Rp => &["mbox", "txtdname"],
            Self::Soa => &["rname"],
            Self::Srv => &["priority", "weight", "port", "target"],
            Self::Txt => &["txtdata"],
        }
    }

    /// Whether the rdata is one opaque free-text value instead of whitespace-separated fields.
    pub fn is_free_text(self) -> bool {
        matches!(self, Self::Txt)
    }

    /// REST resource name, e.g. `AAAARecord`.
    pub fn resource_name(self) -> String {
        format!("{}Record", self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = DynectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == tag)
            .ok_or_else(|| DynectError::UnsupportedRecordType {
                record_type: s.to_string(),
            })
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field list for a raw type tag. Unknown tags have no fields.
pub fn fields_for(tag: &str) -> &'static [&'static str] {
    tag.parse::<RecordType>()
        .map(RecordType::fields)
        .unwrap_or_default()
}
