//! Fully-qualified identifiers.
//!
//! An fqid scopes a local id to a company (or chain): `<bcid>-<local id>`.

/// Separator between the company part and the local part.
pub const FQID_SEPARATOR: char = '-';

/// Concatenate a company bcid and a local id, company first.
pub fn concat_fqid(company_bcid: &str, local_id: &str) -> String {
    let mut fqid = String::with_capacity(company_bcid.len() + 1 + local_id.len());
    fqid.push_str(company_bcid);
    fqid.push(FQID_SEPARATOR);
    fqid.push_str(local_id);
    fqid
}

/// Company part of an fqid: everything before the first separator.
///
/// Returns `None` when the input has no separator.
pub fn company_of(fqid: &str) -> Option<&str> {
    fqid.split_once(FQID_SEPARATOR).map(|(company, _)| company)
}
