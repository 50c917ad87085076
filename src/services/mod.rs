//! Chart pipeline services: decode, map, style, decimate and assemble

pub mod chart_service;
pub mod decimation_service;
pub mod payload_service;
pub mod series_service;
pub mod style_service;
