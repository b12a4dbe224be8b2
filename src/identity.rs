//! Client label classification and canonicalization.

use std::sync::OnceLock;

use regex::Regex;

use crate::grid::Cell;
use crate::model::{ClientId, SkipReason};

/// Currency tag a label must carry to be reported.
pub const CURRENCY_TAG: &str = "rmb";

const PLACEHOLDER_LABEL: &str = "nan";

/// Decides whether a label cell denotes an RMB client and, if so, returns its
/// canonical identifier.
///
/// Empty labels and the `nan` placeholder are [`SkipReason::InvalidClient`];
/// labels without the tag are [`SkipReason::NoRmb`]; a label that is nothing
/// but the tag is also [`SkipReason::InvalidClient`].
pub fn classify_label(cell: Option<&Cell>) -> Result<ClientId, SkipReason> {
    let Some(cell) = cell else {
        return Err(SkipReason::InvalidClient);
    };
    let normalized = cell.normalized();
    if normalized.is_empty() || normalized == PLACEHOLDER_LABEL {
        return Err(SkipReason::InvalidClient);
    }
    if !normalized.contains(CURRENCY_TAG) {
        return Err(SkipReason::NoRmb);
    }

    let canonical = canonicalize_client(&cell.to_string());
    if canonical.is_empty() {
        return Err(SkipReason::InvalidClient);
    }
    Ok(canonical)
}

/// Strips the `(RMB)` tag and every other `rmb` occurrence, ignoring case,
/// then trims the result.
pub fn canonicalize_client(label: &str) -> String {
    let mut canonical = label.to_string();
    loop {
        let stripped = parenthesized_tag_re().replace_all(&canonical, "");
        let stripped = currency_tag_re().replace_all(&stripped, "").into_owned();
        // Removing one occurrence can splice a new one together ("rrmbmb").
        if stripped == canonical {
            break;
        }
        canonical = stripped;
    }
    canonical.trim().to_string()
}

/// Canonical client name for a credit-limit row label such as
/// `"ClientA RMB Credit Limit"`.
pub fn canonicalize_credit_label(label: &str) -> String {
    canonicalize_client(&strip_credit_limit_phrase(label))
}

/// Removes every "credit limit" phrase, tolerating any whitespace between the
/// two words.
pub fn strip_credit_limit_phrase(label: &str) -> String {
    credit_limit_re().replace_all(label, "").into_owned()
}

/// Matches the credit-limit annotation. Row detection and label stripping
/// share it so a row is only treated as a credit row when its key can be
/// recovered.
pub fn credit_limit_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)credit\s*limit").expect("invalid credit limit regex"))
}

fn parenthesized_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\(rmb\)").expect("invalid parenthesized tag regex"))
}

fn currency_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)rmb").expect("invalid currency tag regex"))
}
