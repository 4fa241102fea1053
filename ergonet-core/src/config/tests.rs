//! Parser and binder tests: grammar, the option table, effect
//! resolution, and filter enforcement.

use rstest::rstest;

use crate::{
    graph::{AttributeColumn, AttributeStore, Graph},
    sampler::{Conditioning, SamplerKind},
    stats::Effect,
};

use super::{
    ConfigError, SamplerChoice, Settings, SettingValue, bind_model, parse_config,
};

fn directed_with_attrs() -> Graph {
    let mut graph = Graph::directed(4);
    let mut attrs = AttributeStore::default();
    attrs.push_binary(AttributeColumn::new("smoker", vec![Some(true); 4]));
    attrs.push_categorical(AttributeColumn::new("region", vec![Some(0); 4]));
    attrs.push_continuous(AttributeColumn::new("lat", vec![0.0; 4]));
    attrs.push_continuous(AttributeColumn::new("lon", vec![0.0; 4]));
    graph.set_attributes(attrs);
    graph
}

fn settings_for(text: &str) -> Result<Settings, ConfigError> {
    Settings::from_config(&parse_config(text)?)
}

#[test]
fn parses_scalars_comments_and_effect_lists() {
    let text = "\
# estimation setup
networkFile = nets/sample.net   # the observed network
Sampler = tnt
iterations = 5000
structuralParams = { Arc, Reciprocity,
                     AltInStars(2.0) }
attrParams = { Sender(smoker) }
";
    let config = parse_config(text).expect("grammar is valid");
    assert_eq!(config.settings.len(), 5);
    let effects = config
        .settings
        .iter()
        .find(|s| s.name == "structuralParams")
        .expect("list present");
    let SettingValue::Effects(items) = &effects.value else {
        panic!("expected an effect list");
    };
    assert_eq!(items.len(), 3);
    assert_eq!(items[2].name, "AltInStars");
    assert_eq!(items[2].args, vec!["2.0".to_owned()]);
}

#[test]
fn option_names_are_case_insensitive_and_paths_verbatim() {
    let settings = settings_for("NETWORKFILE = Nets/Sample.NET\n").expect("valid");
    assert_eq!(settings.network_file.to_str(), Some("Nets/Sample.NET"));
}

#[test]
fn simulation_items_carry_coefficients() {
    let text = "\
networkFile = a.net
structuralParams = { Arc = -2.5, AltInStars(2.0) = 0.75 }
";
    let settings = settings_for(text).expect("valid");
    let graph = directed_with_attrs();
    let model = bind_model(&settings, &graph).expect("bind must succeed");
    assert_eq!(model.theta(), &[-2.5, 0.75]);
    assert_eq!(model.effects()[0], Effect::Arc);
}

#[rstest]
#[case("networkFile = a.net\nnoSuchOption = 1\n")]
#[case("networkFile = a.net\nstructuralParams = 3\n")]
fn unknown_or_malformed_options_are_fatal(#[case] text: &str) {
    assert!(matches!(
        settings_for(text),
        Err(ConfigError::UnknownOption { .. } | ConfigError::InvalidValue { .. })
    ));
}

#[test]
fn duplicate_options_are_fatal() {
    let text = "networkFile = a.net\nseed = 1\nSEED = 2\n";
    assert!(matches!(
        settings_for(text),
        Err(ConfigError::DuplicateOption { .. })
    ));
}

#[test]
fn missing_network_file_is_fatal() {
    assert!(matches!(
        settings_for("seed = 1\n"),
        Err(ConfigError::MissingOption { name: "networkFile" })
    ));
}

#[test]
fn conflicting_conditioning_files_are_fatal() {
    let text = "networkFile = a.net\nzoneFile = z.txt\ntermFile = t.txt\n";
    assert!(matches!(
        settings_for(text),
        Err(ConfigError::ConflictingConditioning)
    ));
}

#[test]
fn sampler_and_conditioning_settings_round_trip() {
    let text = "networkFile = a.net\nsampler = ifd\nifdK = 0.25\nzoneFile = z.txt\n";
    let settings = settings_for(text).expect("valid");
    assert_eq!(settings.sampler, SamplerChoice::Ifd);
    assert_eq!(settings.sampler_kind(), SamplerKind::Ifd { gain: 0.25 });
    assert_eq!(settings.conditioning(), Conditioning::Snowball);
}

#[test]
fn unterminated_effect_list_reports_the_opening_line() {
    let text = "networkFile = a.net\nstructuralParams = { Arc,\nReciprocity\n";
    let error = parse_config(text).expect_err("unterminated brace");
    assert!(matches!(error, ConfigError::Syntax { line: 2, .. }));
}

#[test]
fn effect_names_are_case_insensitive() {
    let text = "networkFile = a.net\nstructuralParams = { arc, RECIPROCITY }\n";
    let settings = settings_for(text).expect("valid");
    let model = bind_model(&settings, &directed_with_attrs()).expect("bind must succeed");
    assert_eq!(model.effects(), &[Effect::Arc, Effect::Reciprocity]);
}

#[test]
fn unknown_effects_are_rejected_with_their_line() {
    let text = "networkFile = a.net\nstructuralParams = { Arc, NoSuchEffect }\n";
    let settings = settings_for(text).expect("parse is fine");
    let error = bind_model(&settings, &directed_with_attrs()).expect_err("unknown effect");
    assert!(matches!(error, ConfigError::UnknownEffect { line: 2, .. }));
}

#[rstest]
#[case("AltInStars")]
#[case("AltInStars(1.0)")]
#[case("AltInStars(0.5)")]
#[case("AltInStars(nope)")]
fn decay_parameters_must_exceed_one(#[case] item: &str) {
    let text = format!("networkFile = a.net\nstructuralParams = {{ {item} }}\n");
    let settings = settings_for(&text).expect("parse is fine");
    assert!(matches!(
        bind_model(&settings, &directed_with_attrs()),
        Err(ConfigError::EffectArguments { .. } | ConfigError::InvalidParameter { .. })
    ));
}

#[test]
fn attribute_effects_resolve_names_case_insensitively() {
    let text = "networkFile = a.net\nattrParams = { Sender(SMOKER), Matching(region) }\n";
    let settings = settings_for(text).expect("valid");
    let model = bind_model(&settings, &directed_with_attrs()).expect("bind must succeed");
    assert_eq!(
        model.effects(),
        &[Effect::Sender { attr: 0 }, Effect::Matching { attr: 0 }]
    );
}

#[test]
fn unknown_attributes_are_rejected() {
    let text = "networkFile = a.net\nattrParams = { Sender(height) }\n";
    let settings = settings_for(text).expect("valid");
    assert!(matches!(
        bind_model(&settings, &directed_with_attrs()),
        Err(ConfigError::UnknownAttribute { .. })
    ));
}

#[test]
fn wrong_kind_attributes_do_not_resolve() {
    // `region` exists, but as a categorical attribute, not binary.
    let text = "networkFile = a.net\nattrParams = { Sender(region) }\n";
    let settings = settings_for(text).expect("valid");
    assert!(matches!(
        bind_model(&settings, &directed_with_attrs()),
        Err(ConfigError::UnknownAttribute { .. })
    ));
}

#[test]
fn directed_effects_refuse_undirected_graphs() {
    let text = "networkFile = a.net\nstructuralParams = { Arc }\n";
    let settings = settings_for(text).expect("valid");
    let graph = Graph::undirected(4);
    assert!(matches!(
        bind_model(&settings, &graph),
        Err(ConfigError::EffectScope { .. })
    ));
}

#[test]
fn undirected_effects_refuse_directed_graphs() {
    let text = "networkFile = a.net\nstructuralParams = { Triangles }\n";
    let settings = settings_for(text).expect("valid");
    assert!(matches!(
        bind_model(&settings, &directed_with_attrs()),
        Err(ConfigError::EffectScope { .. })
    ));
}

#[test]
fn dyadic_covariates_bind_coordinate_tuples() {
    let text = "networkFile = a.net\ndyadicParams = { GeoDistance(lat, lon) }\n";
    let settings = settings_for(text).expect("valid");
    let model = bind_model(&settings, &directed_with_attrs()).expect("bind must succeed");
    assert_eq!(model.effects(), &[Effect::GeoDistance { lat: 0, lon: 1 }]);
}

#[test]
fn theta_layout_concatenates_the_four_categories() {
    let text = "\
networkFile = a.net
interactionParams = { BinaryPairInteraction(smoker, smoker) }
structuralParams = { Arc }
attrParams = { Sender(smoker) }
";
    let settings = settings_for(text).expect("valid");
    let model = bind_model(&settings, &directed_with_attrs()).expect("bind must succeed");
    // Structural, then attribute, then dyadic, then interaction,
    // regardless of file order.
    assert_eq!(model.names(), vec!["Arc", "Sender", "BinaryPairInteraction"]);
}
