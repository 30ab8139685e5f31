//! Test fakes for the wearable-sync and mining-leaderboard surfaces.
//!
//! Neither has real backing logic: device readings are drawn from the host
//! PRNG and the leaderboard is permanently empty. Use them to seed tests, not
//! as production code paths.

use std::vec::Vec;

use common::{AgeBanding, HealthMetrics};
use soroban_sdk::{Address, Env};

const SECONDS_PER_WEEK: u64 = 7 * 24 * 60 * 60;

/// Kinds of reading a wearable can report. Fractional quantities are scaled
/// to integers (see [`ReadingKind::unit`]).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReadingKind {
    HeartRate,
    Steps,
    BloodPressure,
    Sleep,
    Weight,
    Calories,
    BloodOxygen,
}

impl ReadingKind {
    pub fn unit(self) -> &'static str {
        match self {
            ReadingKind::HeartRate => "bpm",
            ReadingKind::Steps => "steps",
            ReadingKind::BloodPressure => "mmHg",
            ReadingKind::Sleep => "minutes",
            ReadingKind::Weight => "hg",
            ReadingKind::Calories => "cal",
            ReadingKind::BloodOxygen => "%",
        }
    }

    /// Plausible inclusive value range for this kind
    pub fn plausible_range(self) -> (u64, u64) {
        match self {
            ReadingKind::HeartRate => (60, 100),
            ReadingKind::Steps => (2_000, 10_000),
            ReadingKind::BloodPressure => (110, 150),
            ReadingKind::Sleep => (360, 540),
            ReadingKind::Weight => (600, 800),
            ReadingKind::Calories => (1_500, 2_500),
            ReadingKind::BloodOxygen => (94, 100),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DeviceProfile {
    pub name: &'static str,
    pub capabilities: &'static [ReadingKind],
}

pub const APPLE_HEALTH: DeviceProfile = DeviceProfile {
    name: "Apple Health",
    capabilities: &[
        ReadingKind::HeartRate,
        ReadingKind::Steps,
        ReadingKind::Sleep,
        ReadingKind::BloodPressure,
        ReadingKind::Weight,
    ],
};

pub const FITBIT: DeviceProfile = DeviceProfile {
    name: "Fitbit",
    capabilities: &[
        ReadingKind::Steps,
        ReadingKind::HeartRate,
        ReadingKind::Sleep,
        ReadingKind::Calories,
    ],
};

pub const SAMSUNG_HEALTH: DeviceProfile = DeviceProfile {
    name: "Samsung Health",
    capabilities: &[
        ReadingKind::HeartRate,
        ReadingKind::Steps,
        ReadingKind::Sleep,
        ReadingKind::BloodOxygen,
    ],
};

pub const GOOGLE_FIT: DeviceProfile = DeviceProfile {
    name: "Google Fit",
    capabilities: &[
        ReadingKind::HeartRate,
        ReadingKind::Sleep,
        ReadingKind::Weight,
    ],
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SyncedReading {
    pub device: &'static str,
    pub kind: ReadingKind,
    pub value: u64,
    pub recorded_at: u64,
}

/// Simulate one sync of `profile`: 3 to 8 readings of kinds the device
/// supports, each stamped somewhere in the week before the current ledger
/// time.
///
/// The host PRNG is only reachable from a contract frame, so generation runs
/// as `contract`. A profile with no capabilities yields no readings.
pub fn sync_device(env: &Env, contract: &Address, profile: &DeviceProfile) -> Vec<SyncedReading> {
    if profile.capabilities.is_empty() {
        return Vec::new();
    }

    env.as_contract(contract, || {
        let now = env.ledger().timestamp();
        let count = env.prng().gen_range::<u64>(3..=8);
        let kinds = profile.capabilities.len() as u64;

        (0..count)
            .map(|_| {
                let kind = profile.capabilities[env.prng().gen_range::<u64>(0..kinds) as usize];
                let (low, high) = kind.plausible_range();
                SyncedReading {
                    device: profile.name,
                    kind,
                    value: env.prng().gen_range::<u64>(low..=high),
                    recorded_at: now
                        .saturating_sub(env.prng().gen_range::<u64>(0..=SECONDS_PER_WEEK)),
                }
            })
            .collect()
    })
}

/// Random in-range metrics for `banding`, as the upload page produces after
/// a sync.
pub fn draft_metrics(env: &Env, contract: &Address, banding: AgeBanding) -> HealthMetrics {
    env.as_contract(contract, || HealthMetrics {
        health_score: env.prng().gen_range::<u64>(1..=100) as u32,
        risk_factor: env.prng().gen_range::<u64>(1..=10) as u32,
        age_group: env.prng().gen_range::<u64>(1..=banding.max_group() as u64) as u32,
    })
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MiningStats {
    pub points: u64,
    pub streak: u32,
    pub uploads: u32,
    pub quality: u32,
    pub rank: u32,
}

/// Leaderboard stand-in. Every query answers as if nobody has mined yet.
#[derive(Clone, Copy, Debug, Default)]
pub struct MiningLeaderboard;

impl MiningLeaderboard {
    pub fn user_stats(&self, _miner: &Address) -> MiningStats {
        MiningStats::default()
    }

    /// Parallel address and point lists, best first
    pub fn top_miners(&self, _count: u32) -> (Vec<Address>, Vec<u64>) {
        (Vec::new(), Vec::new())
    }

    pub fn size(&self) -> u32 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HealthVaultContract;
    use common::descriptors::{quality_level, streak_level};
    use soroban_sdk::testutils::{Address as _, Ledger};

    fn setup() -> (Env, Address) {
        let env = Env::default();
        env.ledger().with_mut(|li| li.timestamp = 1_700_000_000);
        let contract_id = env.register(HealthVaultContract, ());
        (env, contract_id)
    }

    #[test]
    fn test_sync_device_readings_are_plausible() {
        let (env, contract_id) = setup();
        let now = env.ledger().timestamp();

        for profile in [APPLE_HEALTH, FITBIT, SAMSUNG_HEALTH, GOOGLE_FIT] {
            let readings = sync_device(&env, &contract_id, &profile);
            assert!((3..=8).contains(&readings.len()));

            for reading in readings {
                assert_eq!(reading.device, profile.name);
                assert!(profile.capabilities.contains(&reading.kind));

                let (low, high) = reading.kind.plausible_range();
                assert!((low..=high).contains(&reading.value));
                assert!(reading.recorded_at <= now);
                assert!(reading.recorded_at >= now - SECONDS_PER_WEEK);
            }
        }
    }

    #[test]
    fn test_sync_device_without_capabilities() {
        let (env, contract_id) = setup();
        let bare = DeviceProfile {
            name: "Bare Band",
            capabilities: &[],
        };

        assert!(sync_device(&env, &contract_id, &bare).is_empty());
    }

    #[test]
    fn test_draft_metrics_respect_banding() {
        let (env, contract_id) = setup();

        for _ in 0..20 {
            let metrics = draft_metrics(&env, &contract_id, AgeBanding::Five);
            assert_eq!(common::validate_metrics(&metrics, AgeBanding::Five), Ok(()));
        }
    }

    #[test]
    fn test_leaderboard_is_empty() {
        let env = Env::default();
        let miner = Address::generate(&env);
        let board = MiningLeaderboard;

        let stats = board.user_stats(&miner);
        assert_eq!(stats, MiningStats::default());
        assert_eq!(quality_level(stats.quality), "Poor");
        assert_eq!(streak_level(stats.streak), "Cold");

        let (miners, points) = board.top_miners(10);
        assert!(miners.is_empty());
        assert!(points.is_empty());
        assert_eq!(board.size(), 0);
    }
}
