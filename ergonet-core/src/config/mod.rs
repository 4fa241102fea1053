//! Configuration parsing and model binding.
//!
//! A run is described by a small keyword/brace language: scalar options
//! (`name = value`) and effect lists (`name = { Effect, Effect(arg), ... }`).
//! Parsing and binding are separate stages so the effect lists can be
//! resolved against the loaded graph's attribute tables.

mod binder;
mod error;
mod parser;

pub use self::{
    binder::{EffectCategory, Model, SamplerChoice, Settings, bind_model},
    error::{ConfigError, ConfigErrorCode},
    parser::{ConfigFile, EffectSpec, Setting, SettingValue, parse_config},
};

#[cfg(test)]
mod tests;
