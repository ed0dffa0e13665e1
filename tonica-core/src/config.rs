use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::midi::ImportOptions;
use crate::ranking::RankingParams;
use crate::scale::INSTANCE_COUNT;
use crate::scoring::ScoringParams;
use crate::session::EngineParams;
use crate::weighting::WeightingParams;

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    scoring: ScoringConfig,
    #[serde(default)]
    weighting: WeightingConfig,
    #[serde(default)]
    ranking: RankingConfig,
    #[serde(default)]
    history: HistoryConfig,
    #[serde(default)]
    import: ImportConfig,
}

#[derive(Deserialize, Default)]
struct ScoringConfig {
    tonic: Option<f64>,
    dominant: Option<f64>,
    subdominant: Option<f64>,
    third: Option<f64>,
    outside: Option<f64>,
    wrong_third: Option<f64>,
}

#[derive(Deserialize, Default)]
struct WeightingConfig {
    baseline_fraction: Option<f64>,
    min_synthetic_weight: Option<f64>,
}

#[derive(Deserialize, Default)]
struct RankingConfig {
    fallback_candidates: Option<usize>,
}

#[derive(Deserialize, Default)]
struct HistoryConfig {
    max_entries: Option<usize>,
}

#[derive(Deserialize, Default)]
struct ImportConfig {
    include_percussion: Option<bool>,
}

pub struct Config {
    scoring: ScoringConfig,
    weighting: WeightingConfig,
    ranking: RankingConfig,
    history: HistoryConfig,
    import: ImportConfig,
}

impl Config {
    /// Embedded defaults merged with `~/.config/tonica/config.toml`, if any.
    pub fn load() -> Self {
        match user_config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::embedded(),
        }
    }

    /// Embedded defaults merged with the file at `path`. A missing file is
    /// not an error; a malformed or unreadable one is logged and ignored.
    pub fn load_from(path: &Path) -> Self {
        let mut base = parse_embedded();

        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                    Ok(user) => {
                        log::debug!(target: "config", "loaded {}", path.display());
                        merge(&mut base, user);
                    }
                    Err(e) => {
                        log::warn!(target: "config", "ignoring malformed config {}: {}", path.display(), e)
                    }
                },
                Err(e) => {
                    log::warn!(target: "config", "could not read config {}: {}", path.display(), e)
                }
            }
        }

        Self::from_file(base)
    }

    /// Embedded defaults only.
    pub fn embedded() -> Self {
        Self::from_file(parse_embedded())
    }

    fn from_file(file: ConfigFile) -> Self {
        Config {
            scoring: file.scoring,
            weighting: file.weighting,
            ranking: file.ranking,
            history: file.history,
            import: file.import,
        }
    }

    pub fn scoring(&self) -> ScoringParams {
        let fallback = ScoringParams::default();
        let pick = |value: Option<f64>, default: f64| value.filter(|v| v.is_finite()).unwrap_or(default);
        ScoringParams {
            tonic: pick(self.scoring.tonic, fallback.tonic),
            dominant: pick(self.scoring.dominant, fallback.dominant),
            subdominant: pick(self.scoring.subdominant, fallback.subdominant),
            third: pick(self.scoring.third, fallback.third),
            outside: pick(self.scoring.outside, fallback.outside),
            wrong_third: pick(self.scoring.wrong_third, fallback.wrong_third),
        }
    }

    pub fn weighting(&self) -> WeightingParams {
        let fallback = WeightingParams::default();
        WeightingParams {
            baseline_fraction: self
                .weighting
                .baseline_fraction
                .filter(|f| f.is_finite() && *f >= 0.0)
                .unwrap_or(fallback.baseline_fraction),
            min_synthetic_weight: self
                .weighting
                .min_synthetic_weight
                .filter(|w| w.is_finite() && *w >= 0.0)
                .unwrap_or(fallback.min_synthetic_weight),
        }
    }

    /// Fallback list size, clamped to 1..=24.
    pub fn ranking(&self) -> RankingParams {
        let fallback = RankingParams::default();
        RankingParams {
            fallback_candidates: self
                .ranking
                .fallback_candidates
                .unwrap_or(fallback.fallback_candidates)
                .clamp(1, INSTANCE_COUNT),
        }
    }

    /// Selection history length. `0` in the file means unbounded.
    pub fn history_limit(&self) -> Option<usize> {
        match self.history.max_entries {
            Some(0) | None => None,
            Some(n) => Some(n),
        }
    }

    pub fn import_options(&self) -> ImportOptions {
        ImportOptions {
            include_percussion: self.import.include_percussion.unwrap_or(false),
        }
    }

    pub fn engine_params(&self) -> EngineParams {
        EngineParams {
            scoring: self.scoring(),
            weighting: self.weighting(),
            ranking: self.ranking(),
            history_limit: self.history_limit(),
        }
    }
}

fn parse_embedded() -> ConfigFile {
    toml::from_str(DEFAULT_CONFIG).expect("Failed to parse embedded config.toml")
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tonica").join("config.toml"))
}

fn merge(base: &mut ConfigFile, user: ConfigFile) {
    merge_scoring(&mut base.scoring, user.scoring);
    merge_weighting(&mut base.weighting, user.weighting);
    if user.ranking.fallback_candidates.is_some() {
        base.ranking.fallback_candidates = user.ranking.fallback_candidates;
    }
    if user.history.max_entries.is_some() {
        base.history.max_entries = user.history.max_entries;
    }
    if user.import.include_percussion.is_some() {
        base.import.include_percussion = user.import.include_percussion;
    }
}

fn merge_scoring(base: &mut ScoringConfig, user: ScoringConfig) {
    if user.tonic.is_some() {
        base.tonic = user.tonic;
    }
    if user.dominant.is_some() {
        base.dominant = user.dominant;
    }
    if user.subdominant.is_some() {
        base.subdominant = user.subdominant;
    }
    if user.third.is_some() {
        base.third = user.third;
    }
    if user.outside.is_some() {
        base.outside = user.outside;
    }
    if user.wrong_third.is_some() {
        base.wrong_third = user.wrong_third;
    }
}

fn merge_weighting(base: &mut WeightingConfig, user: WeightingConfig) {
    if user.baseline_fraction.is_some() {
        base.baseline_fraction = user.baseline_fraction;
    }
    if user.min_synthetic_weight.is_some() {
        base.min_synthetic_weight = user.min_synthetic_weight;
    }
}
