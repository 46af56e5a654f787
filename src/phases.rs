//! # Sun Phase Thresholds
//!
//! The named sunlight phases are defined purely as data: each entry pairs a
//! morning event and an evening event that share one target altitude of the
//! sun's centre. The event solver walks this table and knows nothing about
//! individual phases.
//!
//! | Angle    | Morning           | Evening         |
//! |----------|-------------------|-----------------|
//! | -0.833°  | `sunrise`         | `sunset`        |
//! | -0.3°    | `sunrise_end`     | `sunset_start`  |
//! | -6°      | `dawn`            | `dusk`          |
//! | -12°     | `nautical_dawn`   | `nautical_dusk` |
//! | -18°     | `night_end`       | `night`         |
//! | 6°       | `golden_hour_end` | `golden_hour`   |
//!
//! `solar_noon` and `nadir` are not altitude thresholds; they come from the
//! meridian transit itself.
//!
//! ## Observer height
//! An elevated observer sees a horizon depressed below the astronomical
//! one. Only the sunrise/sunset pair is shifted by that dip; twilight and
//! golden-hour thresholds are defined against the astronomical horizon.

use serde::{Deserialize, Serialize};

/// Event name of the meridian transit.
pub const SOLAR_NOON: &str = "solar_noon";

/// Event name of the anti-transit, half a day before solar noon.
pub const NADIR: &str = "nadir";

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// One morning/evening pair sharing a target altitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunPhase {
    /// Target altitude of the sun's centre, degrees
    pub angle_deg: f64,
    /// Name of the morning crossing
    pub rise: &'static str,
    /// Name of the evening crossing
    pub set: &'static str,
    /// Whether the observer's horizon dip shifts this threshold
    pub height_corrected: bool,
}

/// The standard phase table.
pub static SUN_PHASES: &[SunPhase] = &[
    SunPhase {
        angle_deg: -0.833,
        rise: "sunrise",
        set: "sunset",
        height_corrected: true,
    },
    SunPhase {
        angle_deg: -0.3,
        rise: "sunrise_end",
        set: "sunset_start",
        height_corrected: false,
    },
    SunPhase {
        angle_deg: -6.0,
        rise: "dawn",
        set: "dusk",
        height_corrected: false,
    },
    SunPhase {
        angle_deg: -12.0,
        rise: "nautical_dawn",
        set: "nautical_dusk",
        height_corrected: false,
    },
    SunPhase {
        angle_deg: -18.0,
        rise: "night_end",
        set: "night",
        height_corrected: false,
    },
    SunPhase {
        angle_deg: 6.0,
        rise: "golden_hour_end",
        set: "golden_hour",
        height_corrected: false,
    },
];

/// How observer height lowers the apparent horizon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizonDip {
    /// Empirical dip including terrestrial refraction: `2.076′ · √h`.
    #[default]
    Refracted,
    /// Pure geometric dip `acos(R / (R + h))`.
    Geometric,
}

impl HorizonDip {
    /// Signed altitude offset in degrees for an observer `height_m` metres
    /// up. Always ≤ 0 for non-negative heights.
    pub fn angle_deg(self, height_m: f64) -> f64 {
        match self {
            Self::Refracted => -2.076 * height_m.sqrt() / 60.0,
            Self::Geometric => -(EARTH_RADIUS_M / (EARTH_RADIUS_M + height_m))
                .acos()
                .to_degrees(),
        }
    }
}

/// A phase table together with the dip model applied to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseTable {
    pub phases: &'static [SunPhase],
    pub dip: HorizonDip,
}

impl Default for PhaseTable {
    fn default() -> Self {
        Self {
            phases: SUN_PHASES,
            dip: HorizonDip::default(),
        }
    }
}

impl PhaseTable {
    /// Standard phases with the given dip model.
    pub fn with_dip(dip: HorizonDip) -> Self {
        Self {
            dip,
            ..Self::default()
        }
    }

    /// Every event name this table produces, in output order.
    pub fn event_names(&self) -> Vec<&'static str> {
        let mut names = Vec::with_capacity(2 + self.phases.len() * 2);
        names.push(SOLAR_NOON);
        names.push(NADIR);
        for phase in self.phases {
            names.push(phase.rise);
            names.push(phase.set);
        }
        names
    }

    /// Target altitude for `phase`, in degrees, after the height correction.
    pub fn target_altitude_deg(&self, phase: &SunPhase, height_m: f64) -> f64 {
        if phase.height_corrected {
            phase.angle_deg + self.dip.angle_deg(height_m)
        } else {
            phase.angle_deg
        }
    }
}
