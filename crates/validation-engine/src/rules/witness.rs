//! Witness count and disqualification validation

use shared_types::{CheckStatus, WitnessCheck};
use std::collections::HashSet;
use tracing::debug;

use crate::patterns::{PROHIBITED_WITNESS_MARKERS, WITNESS_NAME};

/// Witnesses required by the modeled jurisdiction
pub const REQUIRED_WITNESSES: usize = 2;

/// Count witness mentions and flag disqualifying relationships.
///
/// Names are deduplicated, but the line matching is deliberately broad and
/// fragments following "Witness" can still count as distinct witnesses
/// (known limitation).
pub fn check_witnesses(text: &str) -> WitnessCheck {
    let mut issues = Vec::new();
    let mut witness_names: Vec<String> = Vec::new();
    let mut seen = HashSet::new();
    let mut prohibited: Vec<(String, &str)> = Vec::new();

    for line in text.lines() {
        let line_lower = line.to_lowercase();
        if !line_lower.contains("witness") {
            continue;
        }

        for caps in WITNESS_NAME.captures_iter(line) {
            let name = caps[1].trim().to_string();
            if seen.insert(name.to_lowercase()) {
                witness_names.push(name.clone());
            }
            // Fires even when the count requirement is satisfied
            if let Some(marker) = PROHIBITED_WITNESS_MARKERS
                .iter()
                .copied()
                .find(|marker| line_lower.contains(marker))
            {
                prohibited.push((name, marker));
            }
        }
    }

    let witness_count = witness_names.len();

    if witness_count < REQUIRED_WITNESSES {
        issues.push(format!(
            "Insufficient witnesses found. Required: {}, Found: {}",
            REQUIRED_WITNESSES, witness_count
        ));
    }
    for (name, marker) in &prohibited {
        issues.push(format!(
            "Prohibited witness: {} matches disqualifying relationship '{}'",
            name, marker
        ));
    }

    let status = if witness_count < REQUIRED_WITNESSES {
        CheckStatus::Fail
    } else if !prohibited.is_empty() {
        CheckStatus::Warning
    } else {
        CheckStatus::Pass
    };

    debug!(?status, witness_count, "Witness check complete");

    WitnessCheck {
        status,
        issues,
        witness_count,
        required_witnesses: REQUIRED_WITNESSES,
        witness_names,
    }
}
