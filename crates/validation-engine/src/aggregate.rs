//! Overall-status aggregation with fixed precedence
//!
//! Precedence is exact and must not be reordered:
//! fail > warning > pass > absence-is-fail. `NotChecked` entries are
//! excluded before precedence applies; if nothing remains, the document
//! fails rather than silently passing.

use shared_types::{CheckResult, CheckStatus, OverallStatus};

/// Combine core check statuses into the overall verdict
pub fn overall_status(statuses: &[CheckStatus]) -> OverallStatus {
    let mut any_warning = false;
    let mut any_checked = false;

    for status in statuses {
        match status {
            CheckStatus::Fail => return OverallStatus::Fail,
            CheckStatus::Warning => {
                any_warning = true;
                any_checked = true;
            }
            CheckStatus::Pass => any_checked = true,
            CheckStatus::NotChecked => {}
        }
    }

    if !any_checked {
        OverallStatus::Fail
    } else if any_warning {
        OverallStatus::Warning
    } else {
        OverallStatus::Pass
    }
}

/// Aggregate from full check results, excluding informational categories
pub fn overall_from_checks(checks: &[CheckResult]) -> OverallStatus {
    let statuses: Vec<CheckStatus> = checks
        .iter()
        .filter(|check| check.counts_toward_overall())
        .map(|check| check.status())
        .collect();
    overall_status(&statuses)
}
