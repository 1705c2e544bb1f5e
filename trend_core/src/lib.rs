pub mod analyzer;
pub mod common;
pub mod config;
pub mod fit;
pub mod kline;
pub mod math;

pub use analyzer::rolling::{RollingAnalyzer, SlopeSeries, TrendChannels};
pub use config::fit_config::FitConfig;
pub use fit::fitter::{TrendLineFitter, TrendLinePair};
pub use kline::candle::Candle;
pub use math::line_fit::Line;
