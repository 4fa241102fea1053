//! Assembles a run: network, attributes, overlays and the bound model.

use tracing::info;

use crate::{
    config::{Model, Settings, bind_model},
    error::ErgonetError,
    graph::{AttributeStore, Graph},
    io,
};

/// Loads every input file named by the settings and binds the model.
///
/// Order matters: the network fixes the node count, attribute tables are
/// validated against it, overlays are validated against the ties, and
/// only then can effect names be resolved.
///
/// # Errors
/// Returns the underlying [`ErgonetError`] for unreadable or malformed
/// files, overlay violations, or an unbindable model.
pub fn load_run(settings: &Settings) -> Result<(Graph, Model), ErgonetError> {
    let mut graph = io::read_network(&settings.network_file)?;
    let node_count = graph.node_count();

    let mut attributes = AttributeStore::default();
    if let Some(path) = &settings.binary_attribute_file {
        for column in io::read_binary_attributes(path, node_count)? {
            attributes.push_binary(column);
        }
    }
    if let Some(path) = &settings.categorical_attribute_file {
        for column in io::read_categorical_attributes(path, node_count)? {
            attributes.push_categorical(column);
        }
    }
    if let Some(path) = &settings.continuous_attribute_file {
        for column in io::read_continuous_attributes(path, node_count)? {
            attributes.push_continuous(column);
        }
    }
    if let Some(path) = &settings.set_attribute_file {
        for column in io::read_set_attributes(path, node_count)? {
            attributes.push_set(column);
        }
    }
    graph.set_attributes(attributes);

    if let Some(path) = &settings.zone_file {
        let zones = io::read_zones(path, node_count)?;
        graph.set_zones(zones).map_err(ErgonetError::from)?;
    }
    if let Some(path) = &settings.term_file {
        graph.set_terms(io::read_terms(path, node_count)?);
    }

    let model = bind_model(settings, &graph)?;
    info!(
        nodes = node_count,
        ties = graph.tie_count(),
        effects = model.len(),
        mode = graph.mode().as_str(),
        "run loaded"
    );
    Ok((graph, model))
}
