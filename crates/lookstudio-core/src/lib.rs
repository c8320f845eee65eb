pub mod capability;
pub mod config;
pub mod consts;
pub mod controller;
pub mod data_uri;
pub mod error;
pub mod intake;
pub mod presets;
pub mod session;
