pub mod fit_config;
