//! File formats: Pajek networks, attribute tables, and output writers.

mod attributes;
mod error;
mod output;
mod pajek;

pub use self::{
    attributes::{
        read_binary_attributes, read_categorical_attributes, read_continuous_attributes,
        read_set_attributes, read_terms, read_zones,
    },
    error::{InputError, InputErrorCode, OutputError},
    output::{TrajectoryWriter, write_observed_stats, write_snapshot},
    pajek::{parse_network, read_network, render_network, write_network},
};

#[cfg(test)]
mod tests;
