//! Gallery State
//! The single store shared by every view: settings, datasets and live feeds.

use crate::charts::ChartKind;
use crate::config::AppConfig;
use crate::data::generator::{self, next_candle, next_weather};
use crate::data::{Candle, Datasets, LiveSeries, WeatherSample};
use crate::layout::Rotation;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;
use tracing::{debug, info};

pub struct GalleryStore {
    pub config: AppConfig,
    pub datasets: Datasets,
    pub stocks: LiveSeries<Candle>,
    pub weather: LiveSeries<WeatherSample>,
    pub selected: ChartKind,
    pub rotation: Rotation,
    /// Number of timer ticks since the last regeneration
    pub ticks: u64,
    /// Generated datasets with the live feeds swapped in
    view: Datasets,
    rng: StdRng,
    last_tick: Instant,
}

impl GalleryStore {
    pub fn new(config: AppConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy(), Instant::now())
    }

    pub fn with_rng(config: AppConfig, mut rng: StdRng, now: Instant) -> Self {
        let datasets = Datasets::generate(&mut rng, &config.samples);
        let stocks = LiveSeries::from_samples(datasets.candles.iter().cloned(), config.live_capacity);
        let weather =
            LiveSeries::from_samples(datasets.weather.iter().cloned(), config.live_capacity);
        let view = Datasets {
            candles: stocks.to_vec(),
            weather: weather.to_vec(),
            ..datasets.clone()
        };
        Self {
            config,
            datasets,
            stocks,
            weather,
            selected: ChartKind::default(),
            rotation: Rotation::new(0.6, 0.35, 0.0),
            ticks: 0,
            view,
            rng,
            last_tick: now,
        }
    }

    /// Rebuild every dataset and restart the live feeds.
    pub fn regenerate(&mut self) {
        self.datasets = Datasets::generate(&mut self.rng, &self.config.samples);
        self.stocks = LiveSeries::from_samples(
            self.datasets.candles.iter().cloned(),
            self.config.live_capacity,
        );
        self.weather = LiveSeries::from_samples(
            self.datasets.weather.iter().cloned(),
            self.config.live_capacity,
        );
        self.ticks = 0;
        self.view = Datasets {
            candles: self.stocks.to_vec(),
            weather: self.weather.to_vec(),
            ..self.datasets.clone()
        };
        info!(
            candles = self.stocks.len(),
            weather = self.weather.len(),
            "Regenerated datasets"
        );
    }

    /// Append one live sample to each feed when auto-refresh is due.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.config.auto_refresh {
            return false;
        }
        if now.saturating_duration_since(self.last_tick) < self.config.refresh_interval() {
            return false;
        }
        self.last_tick = now;
        self.advance();
        true
    }

    /// Append one live sample to each feed unconditionally.
    pub fn advance(&mut self) {
        let candle = match self.stocks.last() {
            Some(prev) => next_candle(&mut self.rng, prev),
            None => generator::candles(&mut self.rng, 1, 100.0).remove(0),
        };
        let sample = match self.weather.last() {
            Some(prev) => next_weather(&mut self.rng, prev),
            None => generator::weather(&mut self.rng, 1).remove(0),
        };
        let dropped = self.stocks.push(candle) + self.weather.push(sample);
        self.ticks += 1;
        self.refresh_live_view();
        debug!(
            tick = self.ticks,
            dropped,
            capacity = self.stocks.capacity(),
            "Live feeds advanced"
        );
    }

    pub fn select(&mut self, kind: ChartKind) {
        if self.selected != kind {
            debug!(chart = kind.title(), "Selected chart");
            self.selected = kind;
        }
    }

    /// Adopt new settings; regenerates when the sample sizes changed.
    pub fn apply_config(&mut self, config: AppConfig) {
        let resample = config.samples != self.config.samples;
        self.stocks.set_capacity(config.live_capacity);
        self.weather.set_capacity(config.live_capacity);
        self.config = config;
        if resample {
            self.regenerate();
        } else {
            self.refresh_live_view();
        }
    }

    fn refresh_live_view(&mut self) {
        self.view.candles = self.stocks.to_vec();
        self.view.weather = self.weather.to_vec();
    }

    /// Datasets as drawn: the generated series with the live feeds in place.
    pub fn view_datasets(&self) -> &Datasets {
        &self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn store(config: AppConfig) -> (GalleryStore, Instant) {
        let now = Instant::now();
        (GalleryStore::with_rng(config, StdRng::seed_from_u64(3), now), now)
    }

    fn small_config() -> AppConfig {
        let mut config = AppConfig {
            live_capacity: 5,
            ..AppConfig::default()
        };
        config.samples.candles = 3;
        config.samples.weather_hours = 10;
        config
    }

    #[test]
    fn live_feeds_start_capped() {
        let (store, _) = store(small_config());
        assert_eq!(store.stocks.len(), 3);
        assert_eq!(store.weather.len(), 5);
        assert_eq!(store.weather.last(), store.datasets.weather.last());
    }

    #[test]
    fn tick_waits_for_interval() {
        let (mut store, start) = store(small_config());
        assert!(!store.tick(start + Duration::from_millis(500)));
        assert!(store.tick(start + Duration::from_millis(1000)));
        assert!(!store.tick(start + Duration::from_millis(1500)));
        assert!(store.tick(start + Duration::from_millis(2100)));
        assert_eq!(store.ticks, 2);
        assert_eq!(store.stocks.len(), 5);
    }

    #[test]
    fn tick_appends_continuation_and_trims() {
        let (mut store, start) = store(small_config());
        let last_close = store.stocks.last().unwrap().close;
        store.tick(start + Duration::from_secs(1));
        assert_eq!(store.stocks.last().unwrap().open, last_close);

        for i in 2..10 {
            store.tick(start + Duration::from_secs(i));
        }
        assert_eq!(store.stocks.len(), 5);
        assert_eq!(store.weather.len(), 5);
        let times: Vec<_> = store.weather.iter().map(|w| w.time).collect();
        assert!(times.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn paused_store_does_not_tick() {
        let config = AppConfig {
            auto_refresh: false,
            ..small_config()
        };
        let (mut store, start) = store(config);
        assert!(!store.tick(start + Duration::from_secs(60)));
        assert_eq!(store.ticks, 0);
    }

    #[test]
    fn apply_config_recaps_and_regenerates_on_new_sizes() {
        let (mut store, _) = store(small_config());
        let mut config = store.config.clone();
        config.live_capacity = 2;
        store.apply_config(config.clone());
        assert_eq!(store.weather.len(), 2);
        assert_eq!(store.datasets.categories.len(), 8);

        config.samples.categories = 4;
        store.apply_config(config);
        assert_eq!(store.datasets.categories.len(), 4);
    }

    #[test]
    fn view_datasets_uses_live_feeds() {
        let (mut store, _) = store(small_config());
        store.advance();
        let view = store.view_datasets();
        assert_eq!(view.candles.len(), store.stocks.len());
        assert_eq!(view.candles.last(), store.stocks.last());
        assert_eq!(view.categories, store.datasets.categories);
    }

    #[test]
    fn view_follows_every_change() {
        let (mut store, start) = store(small_config());
        assert_eq!(store.view_datasets().weather, store.weather.to_vec());

        for i in 1..4 {
            assert!(store.tick(start + Duration::from_secs(i)));
            assert_eq!(store.view_datasets().candles, store.stocks.to_vec());
            assert_eq!(store.view_datasets().weather, store.weather.to_vec());
        }

        let mut config = store.config.clone();
        config.live_capacity = 2;
        store.apply_config(config.clone());
        assert_eq!(store.view_datasets().weather.len(), 2);

        config.samples.categories = 3;
        store.apply_config(config);
        assert_eq!(store.view_datasets().categories, store.datasets.categories);
        assert_eq!(store.view_datasets().categories.len(), 3);
        assert_eq!(store.view_datasets().candles, store.stocks.to_vec());
    }
}
