use crate::application::readiness::ReadinessTimings;
use crate::domain::chart::{AreaStyle, ChartStyle, Legend, Slider, XAxis};
use crate::domain::palette::{self, Palette};
use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub upstream: UpstreamSettings,
    pub readiness: ReadinessSettings,
    pub palette: PaletteSettings,
    pub chart: ChartSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct UpstreamSettings {
    pub base_url: String,
    pub graphs_path: String,
    pub timeout_secs: u64,
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            graphs_path: "/api/graphs".to_string(),
            timeout_secs: 10,
        }
    }
}

impl UpstreamSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ReadinessSettings {
    pub remount_delay_ms: u64,
    pub loading_delay_ms: u64,
}

impl Default for ReadinessSettings {
    fn default() -> Self {
        Self {
            remount_delay_ms: 100,
            loading_delay_ms: 1000,
        }
    }
}

impl ReadinessSettings {
    pub fn timings(&self) -> ReadinessTimings {
        ReadinessTimings {
            remount_delay: Duration::from_millis(self.remount_delay_ms),
            loading_delay: Duration::from_millis(self.loading_delay_ms),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PaletteSettings {
    pub categories: Vec<String>,
    pub colors: Vec<String>,
    pub fallback: String,
}

impl Default for PaletteSettings {
    fn default() -> Self {
        Self {
            categories: palette::DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            colors: palette::DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
            fallback: palette::DEFAULT_FALLBACK_COLOR.to_string(),
        }
    }
}

impl PaletteSettings {
    pub fn palette(&self) -> Palette {
        Palette::new(
            self.categories.clone(),
            self.colors.clone(),
            self.fallback.clone(),
        )
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ChartSettings {
    pub x_axis_range: [f64; 2],
    pub tick_count: u32,
    pub fill_opacity: f64,
    pub legend_position: String,
    pub smooth: bool,
    pub slider_start: f64,
    pub slider_end: f64,
}

impl Default for ChartSettings {
    fn default() -> Self {
        let style = ChartStyle::default();
        Self {
            x_axis_range: style.x_axis.range,
            tick_count: style.x_axis.tick_count,
            fill_opacity: style.area_style.fill_opacity,
            legend_position: style.legend.position,
            smooth: style.smooth,
            slider_start: style.slider.start,
            slider_end: style.slider.end,
        }
    }
}

impl ChartSettings {
    pub fn style(&self) -> ChartStyle {
        ChartStyle {
            x_axis: XAxis {
                range: self.x_axis_range,
                tick_count: self.tick_count,
            },
            area_style: AreaStyle {
                fill_opacity: self.fill_opacity,
            },
            legend: Legend {
                position: self.legend_position.clone(),
            },
            smooth: self.smooth,
            slider: Slider {
                start: self.slider_start,
                end: self.slider_end,
            },
        }
    }
}

/// Load `config/dashboard.{toml,yaml,json}` if present, then apply
/// `EIP_DASHBOARD_<SECTION>__<KEY>` environment overrides.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("EIP_DASHBOARD")
                .prefix_separator("_")
                .separator("__"),
        );

    build_app_config(builder)
}

fn build_app_config(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<AppConfig> {
    let settings = builder.build()?;
    Ok(settings.try_deserialize()?)
}
