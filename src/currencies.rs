//! Built-in allow-list of supported currency codes.
//!
//! Codes are stored lowercase and compared case-insensitively; display is
//! always upper-case. Only codes in this list are ever accepted as
//! convertible, regardless of what the upstream feed carries.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Supported three-letter currency codes, lowercase.
pub static ALLOWED_CODES: &[&str] = &[
    "aed", "afn", "all", "amd", "ang", "aoa", "ars", "aud", "awg", "azn",
    "bam", "bbd", "bdt", "bgn", "bhd", "bif", "bmd", "bnd", "bob", "brl",
    "bsd", "btn", "bwp", "byn", "bzd", "cad", "cdf", "chf", "clp", "cny",
    "cop", "crc", "cuc", "cup", "cve", "czk", "djf", "dkk", "dop", "dzd",
    "egp", "ern", "etb", "eur", "fjd", "fkp", "gbp", "gel", "ggp", "ghs",
    "gip", "gmd", "gnf", "gtq", "gyd", "hkd", "hnl", "hrk", "htg", "huf",
    "idr", "ils", "imp", "inr", "iqd", "irr", "isk", "jep", "jmd", "jod",
    "jpy", "kes", "kgs", "khr", "kmf", "kpw", "krw", "kwd", "kyd", "kzt",
    "lak", "lbp", "lkr", "lrd", "lsl", "lyd", "mad", "mdl", "mga", "mkd",
    "mmk", "mnt", "mop", "mru", "mur", "mvr", "mwk", "mxn", "myr", "mzn",
    "nad", "ngn", "nio", "nok", "npr", "nzd", "omr", "pab", "pen", "pgk",
    "php", "pkr", "pln", "pyg", "qar", "ron", "rsd", "rub", "rwf", "sar",
    "sbd", "scr", "sdg", "sek", "sgd", "shp", "sll", "sos", "spl", "srd",
    "stn", "svc", "syp", "szl", "thb", "tjs", "tmt", "tnd", "top", "try",
    "ttd", "tvd", "twd", "tzs", "uah", "ugx", "usd", "uyu", "uzs", "vef",
    "vnd", "vuv", "wst", "xaf", "xcd", "xdr", "xof", "xpf", "yer", "zar",
    "zmw", "zwd",
];

static ALLOWED_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ALLOWED_CODES.iter().copied().collect());

/// Check whether a code is in the allow-list (case-insensitive).
pub fn is_allowed(code: &str) -> bool {
    ALLOWED_SET.contains(code.to_lowercase().as_str())
}

/// The full allow-list, upper-cased and sorted ascending.
pub fn all_upper_sorted() -> Vec<String> {
    let mut codes: Vec<String> = ALLOWED_CODES.iter().map(|c| c.to_uppercase()).collect();
    codes.sort();
    codes
}
