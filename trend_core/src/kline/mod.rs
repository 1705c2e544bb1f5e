pub mod candle;
pub mod price_window;
