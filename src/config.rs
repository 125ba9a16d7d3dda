//! Process-wide settings read from the environment.
//!
//! Each value is parsed on first use and cached for the life of the process.
//! Unparseable values fall back to the default.

use crate::models::ECLevel;
use crate::render::MAX_RENDER_SIZE;
use std::sync::OnceLock;

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn parse_env_u32(name: &str, default: u32) -> u32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

fn parse_env_level(name: &str, default: ECLevel) -> ECLevel {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<ECLevel>().ok())
        .unwrap_or(default)
}

static DEFAULT_EC_LEVEL: OnceLock<ECLevel> = OnceLock::new();

/// Error correction level used when the caller does not pick one (`QR_EC_LEVEL`, default M)
pub fn default_ec_level() -> ECLevel {
    *DEFAULT_EC_LEVEL.get_or_init(|| parse_env_level("QR_EC_LEVEL", ECLevel::M))
}

static PARALLEL_MIN_BATCH: OnceLock<usize> = OnceLock::new();

/// Smallest batch that `encode_batch` hands to rayon (`QR_PARALLEL_MIN_BATCH`, default 8)
pub fn parallel_min_batch() -> usize {
    *PARALLEL_MIN_BATCH.get_or_init(|| parse_env_usize("QR_PARALLEL_MIN_BATCH", 8).max(1))
}

static DEFAULT_RENDER_SIZE: OnceLock<u32> = OnceLock::new();

/// Default edge length in pixels for rendered images (`QR_RENDER_SIZE`, default 300)
pub fn default_render_size() -> u32 {
    *DEFAULT_RENDER_SIZE
        .get_or_init(|| parse_env_u32("QR_RENDER_SIZE", 300).clamp(21, MAX_RENDER_SIZE))
}
