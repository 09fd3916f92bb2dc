//! Mapping between dotted attribute-type OIDs and their mnemonic names.


#[cfg(feature = "tracing")] use tracing::{instrument, trace};

#[cfg(not(feature = "tracing"))] use crate::no_trace as trace;


/// Known attribute types as pairs of (mnemonic, dotted OID), ordered by OID.
///
/// The first entry is not an OID at all: it displays the state-or-province key `ST` as `SP`.
pub const OID_NAMES: &[(&str, &str)] = &[
    ("SP", "ST"),
    ("NameDistinguisher", "0.2.262.1.10.7.20"),
    ("EMAIL", "1.2.840.113549.1.9.1"),
    ("CN", "2.5.4.3"),
    ("SN", "2.5.4.4"),
    ("SerialNumber", "2.5.4.5"),
    ("T", "2.5.4.12"),
    ("D", "2.5.4.13"),
    ("BC", "2.5.4.15"),
    ("ADDR", "2.5.4.16"),
    ("PC", "2.5.4.17"),
    ("GN", "2.5.4.42"),
    ("Pseudo", "2.5.4.65"),
];

const OID_PREFIX: &str = "OID.";


/// Returns the mnemonic for the attribute type with the given OID, if it is known.
///
/// An `OID.` prefix (in any letter case) is ignored.
#[cfg_attr(feature = "tracing", instrument(skip_all))]
pub fn attribute_name_for_oid(oid: &str) -> Option<&'static str> {
    trace!("oid is {:?}", oid);
    let has_prefix = oid.get(..OID_PREFIX.len())
        .map(|prefix| prefix.eq_ignore_ascii_case(OID_PREFIX))
        .unwrap_or(false);
    let oid = if has_prefix {
        &oid[OID_PREFIX.len()..]
    } else {
        oid
    };

    OID_NAMES.iter()
        .find(|(_name, known_oid)| *known_oid == oid)
        .map(|(name, _oid)| *name)
}
