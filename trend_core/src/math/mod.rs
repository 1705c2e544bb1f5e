pub mod line_fit;
