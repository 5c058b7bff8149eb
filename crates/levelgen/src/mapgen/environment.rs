//! Morality-driven environment theme selection and per-theme tuning.

use serde::{Deserialize, Serialize};

use crate::config::ThemeThresholds;

use super::model::Morality;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EnvironmentTheme {
    ImperialShrine,
    ChaosTemple,
    NeutralRuins,
    HiveCity,
    SpaceHulk,
    Battlefield,
    DaemonRealm,
}

/// Layout family used when a theme dresses arenas and chambers with cover.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoverStyle {
    PillarCross,
    RadialCluster,
    BarricadePairs,
}

impl EnvironmentTheme {
    /// Inclusive `(min, max)` edge length for randomly placed obstacles.
    pub fn obstacle_size_range(self) -> (f32, f32) {
        match self {
            Self::ImperialShrine => (40.0, 80.0),
            Self::ChaosTemple => (30.0, 100.0),
            Self::NeutralRuins => (40.0, 90.0),
            Self::HiveCity => (50.0, 120.0),
            Self::SpaceHulk => (60.0, 140.0),
            Self::Battlefield => (30.0, 70.0),
            Self::DaemonRealm => (50.0, 150.0),
        }
    }

    pub fn cover_style(self) -> CoverStyle {
        match self {
            Self::ImperialShrine | Self::HiveCity => CoverStyle::PillarCross,
            Self::ChaosTemple | Self::DaemonRealm => CoverStyle::RadialCluster,
            Self::Battlefield | Self::NeutralRuins | Self::SpaceHulk => CoverStyle::BarricadePairs,
        }
    }
}

pub fn select_environment(
    morality: Option<Morality>,
    thresholds: &ThemeThresholds,
) -> EnvironmentTheme {
    let Some(Morality { faith, corruption }) = morality else {
        return EnvironmentTheme::NeutralRuins;
    };
    debug_assert!(faith >= 0.0 && corruption >= 0.0, "morality values are non-negative");
    if faith <= 0.0 && corruption <= 0.0 {
        return EnvironmentTheme::NeutralRuins;
    }

    if faith >= thresholds.imperial_faith {
        EnvironmentTheme::ImperialShrine
    } else if faith >= thresholds.hive_faith {
        EnvironmentTheme::HiveCity
    } else if corruption >= thresholds.daemon_corruption {
        EnvironmentTheme::DaemonRealm
    } else if corruption >= thresholds.chaos_corruption {
        EnvironmentTheme::ChaosTemple
    } else if corruption >= thresholds.hulk_corruption {
        EnvironmentTheme::SpaceHulk
    } else {
        EnvironmentTheme::Battlefield
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select(faith: f32, corruption: f32) -> EnvironmentTheme {
        select_environment(Some(Morality::new(faith, corruption)), &ThemeThresholds::default())
    }

    #[test]
    fn high_faith_selects_imperial_shrine() {
        assert_eq!(select(85.0, 0.0), EnvironmentTheme::ImperialShrine);
    }

    #[test]
    fn high_corruption_selects_daemon_realm() {
        assert_eq!(select(0.0, 95.0), EnvironmentTheme::DaemonRealm);
    }

    #[test]
    fn missing_or_zero_morality_selects_neutral_ruins() {
        assert_eq!(
            select_environment(None, &ThemeThresholds::default()),
            EnvironmentTheme::NeutralRuins
        );
        assert_eq!(select(0.0, 0.0), EnvironmentTheme::NeutralRuins);
    }

    #[test]
    fn weak_signal_falls_back_to_battlefield() {
        assert_eq!(select(10.0, 5.0), EnvironmentTheme::Battlefield);
    }

    #[test]
    fn faith_thresholds_are_checked_before_corruption() {
        assert_eq!(select(90.0, 90.0), EnvironmentTheme::ImperialShrine);
        assert_eq!(select(60.0, 90.0), EnvironmentTheme::HiveCity);
        assert_eq!(select(20.0, 60.0), EnvironmentTheme::ChaosTemple);
        assert_eq!(select(20.0, 35.0), EnvironmentTheme::SpaceHulk);
    }

    #[test]
    fn selection_is_stable_for_identical_inputs() {
        for (faith, corruption) in [(0.0, 0.0), (45.0, 12.0), (85.0, 3.0), (1.0, 99.0)] {
            assert_eq!(select(faith, corruption), select(faith, corruption));
        }
    }

    #[test]
    fn every_theme_has_a_usable_size_range() {
        for theme in [
            EnvironmentTheme::ImperialShrine,
            EnvironmentTheme::ChaosTemple,
            EnvironmentTheme::NeutralRuins,
            EnvironmentTheme::HiveCity,
            EnvironmentTheme::SpaceHulk,
            EnvironmentTheme::Battlefield,
            EnvironmentTheme::DaemonRealm,
        ] {
            let (min, max) = theme.obstacle_size_range();
            assert!(min > 0.0 && min < max, "{theme:?} has range {min}..{max}");
        }
    }
}
