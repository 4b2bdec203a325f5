use chrono::{DateTime, Utc};

/// Length of the random suffix after the date.
pub const SUFFIX_LEN: usize = 8;

/// Generate a transaction reference: `TXN-<YYYYMMDD>-<8 uppercase hex>`.
///
/// The suffix is the head of a v4 UUID (32 bits from the OS CSPRNG). No
/// collision check is made against references already in the queue.
pub fn generate_reference(now: DateTime<Utc>) -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!(
        "TXN-{}-{}",
        now.format("%Y%m%d"),
        id[..SUFFIX_LEN].to_ascii_uppercase()
    )
}

/// Whether `s` has the shape produced by [`generate_reference`].
pub fn is_well_formed(s: &str) -> bool {
    let Some(rest) = s.strip_prefix("TXN-") else {
        return false;
    };
    let Some((date, suffix)) = rest.split_once('-') else {
        return false;
    };
    date.len() == 8
        && date.bytes().all(|b| b.is_ascii_digit())
        && suffix.len() == SUFFIX_LEN
        && suffix
            .bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase())
}
