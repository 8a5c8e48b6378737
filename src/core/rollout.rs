//! Rollout step parsing and the decision over a track's releases

use crate::api::models::{ReleaseStatus, TrackInfo};
use crate::error::RolloutError;

/// Parse and validate a rollout step string (e.g. "1,20,50,100").
///
/// All values must be comma-separated integers between 0 and 100, each
/// strictly greater than the previous one. Valid percentages come back
/// as fractions for the console API (20 -> 0.2).
pub fn parse_rollout_steps(raw: &str) -> Result<Vec<f64>, RolloutError> {
    if raw.trim().is_empty() {
        return Err(RolloutError::Empty);
    }

    let mut steps = Vec::new();
    for part in raw.split(',') {
        let value: i64 = part
            .trim()
            .parse()
            .map_err(|_| RolloutError::NotNumeric {
                value: part.trim().to_string(),
            })?;
        steps.push(value);
    }

    for &step in &steps {
        if !(0..=100).contains(&step) {
            return Err(RolloutError::OutOfRange { value: step });
        }
    }

    for pair in steps.windows(2) {
        if pair[0] >= pair[1] {
            return Err(RolloutError::NotIncreasing {
                prev: pair[0],
                next: pair[1],
            });
        }
    }

    Ok(steps.iter().map(|&step| step as f64 / 100.0).collect())
}

/// First configured fraction strictly greater than the current one
pub fn next_fraction(current: f64, steps: &[f64]) -> Option<f64> {
    steps.iter().copied().find(|&step| step > current)
}

/// What the current track state asks of us
#[derive(Debug, Clone, PartialEq)]
pub enum RolloutDecision {
    /// Track has no releases at all
    NoReleases,
    /// Release is fully rolled out; nothing left to announce
    AlreadyComplete,
    /// Release was halted; stay quiet
    Halted,
    /// Rollout is staged and a higher configured step exists
    Advance { current: f64, next: f64 },
    /// Rollout is staged but already at or above the last configured step
    AtMaximum { current: f64 },
    /// No release on the track is in a staged rollout (drafts only, or
    /// an in-progress release without a user fraction)
    NothingInProgress,
}

/// Walk the track's releases and decide whether an increase is coming.
///
/// A completed or halted release ends the scan immediately: the staged
/// rollout is over and no message should go out. Drafts and releases
/// without a user fraction are skipped.
pub fn decide(track: &TrackInfo, steps: &[f64]) -> RolloutDecision {
    if track.releases.is_empty() {
        return RolloutDecision::NoReleases;
    }

    for release in &track.releases {
        match release.status {
            ReleaseStatus::Completed => return RolloutDecision::AlreadyComplete,
            ReleaseStatus::Halted => return RolloutDecision::Halted,
            ReleaseStatus::InProgress => {
                let Some(current) = release.user_fraction else {
                    continue;
                };
                return match next_fraction(current, steps) {
                    Some(next) => RolloutDecision::Advance { current, next },
                    None => RolloutDecision::AtMaximum { current },
                };
            }
            ReleaseStatus::Draft | ReleaseStatus::Unspecified | ReleaseStatus::Unknown => continue,
        }
    }

    RolloutDecision::NothingInProgress
}
