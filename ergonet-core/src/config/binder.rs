//! Binding of parsed configuration to run settings and a model.
//!
//! Binding happens in two stages because the effect lists cannot be
//! resolved until the graph and its attribute tables are loaded:
//! [`Settings::from_config`] checks the option table (unknown and
//! duplicate options are fatal) and extracts scalars and effect
//! specifications; [`bind_model`] then resolves every effect name,
//! validates its arguments and filters, and lays out the coefficient
//! vector as the concatenation of the structural, attribute, dyadic and
//! interaction lists.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::{
    graph::{AttributeKind, Graph},
    sampler::{Conditioning, SamplerKind},
    stats::Effect,
};

use super::{
    error::ConfigError,
    parser::{ConfigFile, EffectSpec, SettingValue},
};

/// Which set-valued option an effect specification came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EffectCategory {
    /// `structuralParams`.
    Structural,
    /// `attrParams`.
    Attribute,
    /// `dyadicParams`.
    Dyadic,
    /// `interactionParams`.
    Interaction,
}

/// The proposal scheme requested by the `sampler` option.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SamplerChoice {
    /// Uniform dyad proposals.
    #[default]
    Basic,
    /// Improved fixed density.
    Ifd,
    /// Tie/no-tie.
    Tnt,
}

/// Scalar options and effect specifications extracted from a parsed
/// configuration file.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// Pajek network file (required).
    pub network_file: PathBuf,
    /// Binary attribute file.
    pub binary_attribute_file: Option<PathBuf>,
    /// Categorical attribute file.
    pub categorical_attribute_file: Option<PathBuf>,
    /// Continuous attribute file.
    pub continuous_attribute_file: Option<PathBuf>,
    /// Set attribute file.
    pub set_attribute_file: Option<PathBuf>,
    /// Snowball zone file; enables snowball conditioning.
    pub zone_file: Option<PathBuf>,
    /// Citation term file; enables citation conditioning.
    pub term_file: Option<PathBuf>,
    /// Output path for the coefficient trajectory.
    pub theta_file: Option<PathBuf>,
    /// Output path for the statistic-drift trajectory.
    pub dz_file: Option<PathBuf>,
    /// Output path for the observed sufficient statistics.
    pub observed_stats_file: Option<PathBuf>,
    /// Output path for the simulated-statistics trajectory.
    pub stats_file: Option<PathBuf>,
    /// Prefix for simulated-network Pajek snapshots.
    pub sim_net_file_prefix: Option<String>,
    /// Proposal scheme.
    pub sampler: SamplerChoice,
    /// Proposals per sampler run.
    pub iterations: u64,
    /// Outer estimation iterations.
    pub outer_iterations: u64,
    /// Proposals discarded before simulation snapshots start.
    pub burn_in: u64,
    /// Proposals between simulation snapshots.
    pub interval: u64,
    /// RNG seed.
    pub seed: u64,
    /// Gain of the fixed-density auxiliary update.
    pub ifd_gain: f64,
    /// Equilibrium-expectation learning rate.
    pub learning_rate: f64,
    /// Basic-sampler option rejecting reciprocated additions.
    pub forbid_reciprocity: bool,
    structural: Vec<EffectSpec>,
    attribute: Vec<EffectSpec>,
    dyadic: Vec<EffectSpec>,
    interaction: Vec<EffectSpec>,
}

impl Settings {
    /// Extracts and validates settings from a parsed configuration file.
    ///
    /// # Errors
    /// Fails on unknown options, duplicate options, malformed values, a
    /// missing `networkFile`, or both conditioning files at once.
    pub fn from_config(config: &ConfigFile) -> Result<Self, ConfigError> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut network_file = None;
        let mut settings = Self {
            network_file: PathBuf::new(),
            binary_attribute_file: None,
            categorical_attribute_file: None,
            continuous_attribute_file: None,
            set_attribute_file: None,
            zone_file: None,
            term_file: None,
            theta_file: None,
            dz_file: None,
            observed_stats_file: None,
            stats_file: None,
            sim_net_file_prefix: None,
            sampler: SamplerChoice::default(),
            iterations: 10_000,
            outer_iterations: 100,
            burn_in: 0,
            interval: 1_000,
            seed: 1,
            ifd_gain: 0.1,
            learning_rate: 0.001,
            forbid_reciprocity: false,
            structural: Vec::new(),
            attribute: Vec::new(),
            dyadic: Vec::new(),
            interaction: Vec::new(),
        };

        for setting in &config.settings {
            let key = setting.name.to_ascii_lowercase();
            if !seen.insert(key.clone()) {
                return Err(ConfigError::DuplicateOption {
                    name: setting.name.clone(),
                    line: setting.line,
                });
            }
            match (key.as_str(), &setting.value) {
                ("networkfile", SettingValue::Scalar(value)) => {
                    network_file = Some(PathBuf::from(value));
                }
                ("binaryattributefile", SettingValue::Scalar(value)) => {
                    settings.binary_attribute_file = Some(PathBuf::from(value));
                }
                ("categoricalattributefile", SettingValue::Scalar(value)) => {
                    settings.categorical_attribute_file = Some(PathBuf::from(value));
                }
                ("continuousattributefile", SettingValue::Scalar(value)) => {
                    settings.continuous_attribute_file = Some(PathBuf::from(value));
                }
                ("setattributefile", SettingValue::Scalar(value)) => {
                    settings.set_attribute_file = Some(PathBuf::from(value));
                }
                ("zonefile", SettingValue::Scalar(value)) => {
                    settings.zone_file = Some(PathBuf::from(value));
                }
                ("termfile", SettingValue::Scalar(value)) => {
                    settings.term_file = Some(PathBuf::from(value));
                }
                ("thetafile", SettingValue::Scalar(value)) => {
                    settings.theta_file = Some(PathBuf::from(value));
                }
                ("dzafile", SettingValue::Scalar(value)) => {
                    settings.dz_file = Some(PathBuf::from(value));
                }
                ("observedstatsfile", SettingValue::Scalar(value)) => {
                    settings.observed_stats_file = Some(PathBuf::from(value));
                }
                ("statsfile", SettingValue::Scalar(value)) => {
                    settings.stats_file = Some(PathBuf::from(value));
                }
                ("simnetfileprefix", SettingValue::Scalar(value)) => {
                    settings.sim_net_file_prefix = Some(value.clone());
                }
                ("sampler", SettingValue::Scalar(value)) => {
                    settings.sampler = match value.to_ascii_lowercase().as_str() {
                        "basic" => SamplerChoice::Basic,
                        "ifd" => SamplerChoice::Ifd,
                        "tnt" => SamplerChoice::Tnt,
                        _ => {
                            return Err(invalid(setting, value, "`basic`, `ifd` or `tnt`"));
                        }
                    };
                }
                ("iterations", SettingValue::Scalar(value)) => {
                    settings.iterations = parse_scalar(setting, value, "a positive integer")?;
                }
                ("outeriterations", SettingValue::Scalar(value)) => {
                    settings.outer_iterations = parse_scalar(setting, value, "a positive integer")?;
                }
                ("burnin", SettingValue::Scalar(value)) => {
                    settings.burn_in = parse_scalar(setting, value, "a non-negative integer")?;
                }
                ("interval", SettingValue::Scalar(value)) => {
                    settings.interval = parse_scalar(setting, value, "a positive integer")?;
                }
                ("seed", SettingValue::Scalar(value)) => {
                    settings.seed = parse_scalar(setting, value, "a non-negative integer")?;
                }
                ("ifdk", SettingValue::Scalar(value)) => {
                    settings.ifd_gain = parse_scalar(setting, value, "a real gain")?;
                }
                ("learningrate", SettingValue::Scalar(value)) => {
                    settings.learning_rate = parse_scalar(setting, value, "a real learning rate")?;
                }
                ("forbidreciprocity", SettingValue::Scalar(value)) => {
                    settings.forbid_reciprocity = match value.to_ascii_lowercase().as_str() {
                        "true" | "yes" | "1" => true,
                        "false" | "no" | "0" => false,
                        _ => return Err(invalid(setting, value, "`true` or `false`")),
                    };
                }
                ("structuralparams", SettingValue::Effects(items)) => {
                    settings.structural.clone_from(items);
                }
                ("attrparams", SettingValue::Effects(items)) => {
                    settings.attribute.clone_from(items);
                }
                ("dyadicparams", SettingValue::Effects(items)) => {
                    settings.dyadic.clone_from(items);
                }
                ("interactionparams", SettingValue::Effects(items)) => {
                    settings.interaction.clone_from(items);
                }
                (
                    "structuralparams" | "attrparams" | "dyadicparams" | "interactionparams",
                    SettingValue::Scalar(value),
                ) => {
                    return Err(invalid(setting, value, "a `{ ... }` effect list"));
                }
                (_, SettingValue::Effects(_)) => {
                    return Err(ConfigError::UnknownOption {
                        name: setting.name.clone(),
                        line: setting.line,
                    });
                }
                _ => {
                    return Err(ConfigError::UnknownOption {
                        name: setting.name.clone(),
                        line: setting.line,
                    });
                }
            }
        }

        settings.network_file = network_file.ok_or(ConfigError::MissingOption {
            name: "networkFile",
        })?;
        if settings.zone_file.is_some() && settings.term_file.is_some() {
            return Err(ConfigError::ConflictingConditioning);
        }
        Ok(settings)
    }

    /// The conditioning implied by the loaded overlays.
    #[must_use]
    pub fn conditioning(&self) -> Conditioning {
        if self.zone_file.is_some() {
            Conditioning::Snowball
        } else if self.term_file.is_some() {
            Conditioning::Citation
        } else {
            Conditioning::Free
        }
    }

    /// The sampler kind with its parameters filled in.
    #[must_use]
    pub fn sampler_kind(&self) -> SamplerKind {
        match self.sampler {
            SamplerChoice::Basic => SamplerKind::Basic {
                forbid_reciprocity: self.forbid_reciprocity,
            },
            SamplerChoice::Ifd => SamplerKind::Ifd {
                gain: self.ifd_gain,
            },
            SamplerChoice::Tnt => SamplerKind::Tnt,
        }
    }

    /// Every effect specification with its category, in coefficient order.
    pub(crate) fn effect_specs(&self) -> impl Iterator<Item = (EffectCategory, &EffectSpec)> {
        self.structural
            .iter()
            .map(|spec| (EffectCategory::Structural, spec))
            .chain(
                self.attribute
                    .iter()
                    .map(|spec| (EffectCategory::Attribute, spec)),
            )
            .chain(self.dyadic.iter().map(|spec| (EffectCategory::Dyadic, spec)))
            .chain(
                self.interaction
                    .iter()
                    .map(|spec| (EffectCategory::Interaction, spec)),
            )
    }
}

fn invalid(setting: &super::parser::Setting, value: &str, expected: &'static str) -> ConfigError {
    ConfigError::InvalidValue {
        option: setting.name.clone(),
        value: value.to_owned(),
        expected,
        line: setting.line,
    }
}

fn parse_scalar<T: std::str::FromStr>(
    setting: &super::parser::Setting,
    value: &str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    value.parse().map_err(|_| invalid(setting, value, expected))
}

/// A bound model: the effect list and its coefficient vector, laid out
/// identically.
#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    effects: Vec<Effect>,
    theta: Vec<f64>,
}

impl Model {
    /// Builds a model from parallel effect and coefficient lists.
    #[must_use]
    pub fn new(effects: Vec<Effect>, theta: Vec<f64>) -> Self {
        debug_assert_eq!(effects.len(), theta.len(), "theta layout must match effects");
        Self { effects, theta }
    }

    /// The configured effects, in coefficient order.
    #[must_use]
    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    /// The coefficient vector.
    #[must_use]
    pub fn theta(&self) -> &[f64] {
        &self.theta
    }

    /// Mutable coefficient vector, for the outer estimation loops.
    pub fn theta_mut(&mut self) -> &mut [f64] {
        &mut self.theta
    }

    /// Effect names in coefficient order, for output headers.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.effects.iter().map(Effect::name).collect()
    }

    /// Number of effects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Whether the model has no effects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

/// Resolves every configured effect against the loaded graph.
///
/// # Errors
/// Fails on an unknown effect name, wrong argument count, an attribute
/// that is not loaded, an out-of-range decay or exponent, or an effect
/// whose filters reject the graph.
pub fn bind_model(settings: &Settings, graph: &Graph) -> Result<Model, ConfigError> {
    let mut effects = Vec::new();
    let mut theta = Vec::new();
    for (category, spec) in settings.effect_specs() {
        let effect = bind_effect(category, spec, graph)?;
        if !effect.scope().accepts(graph) {
            return Err(ConfigError::EffectScope {
                effect: spec.name.clone(),
                mode: graph.mode().as_str(),
                line: spec.line,
            });
        }
        effects.push(effect);
        theta.push(spec.coefficient.unwrap_or(0.0));
    }
    Ok(Model::new(effects, theta))
}

fn bind_effect(
    category: EffectCategory,
    spec: &EffectSpec,
    graph: &Graph,
) -> Result<Effect, ConfigError> {
    match category {
        EffectCategory::Structural => bind_structural(spec),
        EffectCategory::Attribute => bind_attribute(spec, graph),
        EffectCategory::Dyadic => bind_dyadic(spec, graph),
        EffectCategory::Interaction => bind_interaction(spec, graph),
    }
}

fn bind_structural(spec: &EffectSpec) -> Result<Effect, ConfigError> {
    let name = spec.name.to_ascii_lowercase();
    let plain = |effect: Effect| {
        if spec.args.is_empty() {
            Ok(effect)
        } else {
            Err(ConfigError::EffectArguments {
                effect: spec.name.clone(),
                expected: "no arguments",
                got: spec.args.len(),
                line: spec.line,
            })
        }
    };
    let with_lambda = |make: &dyn Fn(f64) -> Effect| {
        let lambda = decay(spec)?;
        Ok(make(lambda))
    };
    match name.as_str() {
        "arc" => plain(Effect::Arc),
        "edge" => plain(Effect::Edge),
        "reciprocity" => plain(Effect::Reciprocity),
        "sink" => plain(Effect::Sink),
        "source" => plain(Effect::Source),
        "isolates" => plain(Effect::Isolates),
        "intwostars" => plain(Effect::InTwoStars),
        "outtwostars" => plain(Effect::OutTwoStars),
        "twopaths" => plain(Effect::TwoPaths),
        "transitivetriangles" => plain(Effect::TransitiveTriangles),
        "cyclictriangles" => plain(Effect::CyclicTriangles),
        "twostars" => plain(Effect::TwoStars),
        "triangles" => plain(Effect::Triangles),
        "fourcycles" => plain(Effect::FourCycles),
        "bipartitetwostarsa" => plain(Effect::BipartiteTwoStarsA),
        "bipartitetwostarsb" => plain(Effect::BipartiteTwoStarsB),
        "altinstars" => with_lambda(&|lambda| Effect::AltInStars { lambda }),
        "altoutstars" => with_lambda(&|lambda| Effect::AltOutStars { lambda }),
        "altktrianglest" => with_lambda(&|lambda| Effect::AltKTrianglesT { lambda }),
        "altktrianglesc" => with_lambda(&|lambda| Effect::AltKTrianglesC { lambda }),
        "altktrianglesd" => with_lambda(&|lambda| Effect::AltKTrianglesD { lambda }),
        "altktrianglesu" => with_lambda(&|lambda| Effect::AltKTrianglesU { lambda }),
        "alttwopathst" => with_lambda(&|lambda| Effect::AltTwoPathsT { lambda }),
        "alttwopathsd" => with_lambda(&|lambda| Effect::AltTwoPathsD { lambda }),
        "alttwopathsu" => with_lambda(&|lambda| Effect::AltTwoPathsU { lambda }),
        "alttwopathstd" => with_lambda(&|lambda| Effect::AltTwoPathsTD { lambda }),
        "altstars" => with_lambda(&|lambda| Effect::AltStars { lambda }),
        "altktriangles" => with_lambda(&|lambda| Effect::AltKTriangles { lambda }),
        "alttwopaths" => with_lambda(&|lambda| Effect::AltTwoPaths { lambda }),
        "bipartitealtstarsa" => with_lambda(&|lambda| Effect::BipartiteAltStarsA { lambda }),
        "bipartitealtstarsb" => with_lambda(&|lambda| Effect::BipartiteAltStarsB { lambda }),
        "bipartitealtkcyclesa" => with_lambda(&|lambda| Effect::BipartiteAltKCyclesA { lambda }),
        "bipartitealtkcyclesb" => with_lambda(&|lambda| Effect::BipartiteAltKCyclesB { lambda }),
        "bipartitealtk4cyclesa" => with_lambda(&|lambda| Effect::BipartiteAltK4CyclesA { lambda }),
        "bipartitealtk4cyclesb" => with_lambda(&|lambda| Effect::BipartiteAltK4CyclesB { lambda }),
        "bipartitefourcyclesnodepower" => {
            let alpha = exponent(spec)?;
            Ok(Effect::BipartiteFourCyclesNodePower { alpha })
        }
        _ => Err(unknown(spec)),
    }
}

fn bind_attribute(spec: &EffectSpec, graph: &Graph) -> Result<Effect, ConfigError> {
    let name = spec.name.to_ascii_lowercase();
    let binary = |make: &dyn Fn(usize) -> Effect| {
        expect_args(spec, 1, "one binary attribute name")?;
        Ok(make(attr_index(spec, graph, AttributeKind::Binary, 0)?))
    };
    let categorical = |make: &dyn Fn(usize) -> Effect| {
        expect_args(spec, 1, "one categorical attribute name")?;
        Ok(make(attr_index(spec, graph, AttributeKind::Categorical, 0)?))
    };
    let continuous = |make: &dyn Fn(usize) -> Effect| {
        expect_args(spec, 1, "one continuous attribute name")?;
        Ok(make(attr_index(spec, graph, AttributeKind::Continuous, 0)?))
    };
    match name.as_str() {
        "sender" => binary(&|attr| Effect::Sender { attr }),
        "receiver" => binary(&|attr| Effect::Receiver { attr }),
        "interaction" => binary(&|attr| Effect::Interaction { attr }),
        "activity" => binary(&|attr| Effect::Activity { attr }),
        "bipartiteactivitya" => binary(&|attr| Effect::BipartiteActivityA { attr }),
        "bipartiteactivityb" => binary(&|attr| Effect::BipartiteActivityB { attr }),
        "matching" => categorical(&|attr| Effect::Matching { attr }),
        "matchingreciprocity" => categorical(&|attr| Effect::MatchingReciprocity { attr }),
        "mismatching" => categorical(&|attr| Effect::Mismatching { attr }),
        "mismatchingreciprocity" => categorical(&|attr| Effect::MismatchingReciprocity { attr }),
        "continuoussender" => continuous(&|attr| Effect::ContinuousSender { attr }),
        "continuousreceiver" => continuous(&|attr| Effect::ContinuousReceiver { attr }),
        "diff" => continuous(&|attr| Effect::Diff { attr }),
        "sum" => continuous(&|attr| Effect::Sum { attr }),
        "diffreciprocity" => continuous(&|attr| Effect::DiffReciprocity { attr }),
        "diffsign" => continuous(&|attr| Effect::DiffSign { attr }),
        "diffdirectionalsr" => continuous(&|attr| Effect::DiffDirectionalSR { attr }),
        "diffdirectionalrs" => continuous(&|attr| Effect::DiffDirectionalRS { attr }),
        "jaccardsimilarity" => {
            expect_args(spec, 1, "one set attribute name")?;
            Ok(Effect::JaccardSimilarity {
                attr: attr_index(spec, graph, AttributeKind::Set, 0)?,
            })
        }
        "bipartitetwopathsuma" => continuous(&|attr| Effect::BipartiteTwoPathSumA { attr }),
        "bipartitetwopathsumb" => continuous(&|attr| Effect::BipartiteTwoPathSumB { attr }),
        "bipartitetwopathdiffa" => continuous(&|attr| Effect::BipartiteTwoPathDiffA { attr }),
        "bipartitetwopathdiffb" => continuous(&|attr| Effect::BipartiteTwoPathDiffB { attr }),
        "bipartitetwopathmatchinga" => {
            categorical(&|attr| Effect::BipartiteTwoPathMatchingA { attr })
        }
        "bipartitetwopathmatchingb" => {
            categorical(&|attr| Effect::BipartiteTwoPathMatchingB { attr })
        }
        "bipartitenodematchalphaa" => {
            expect_args(spec, 2, "an attribute name and an exponent")?;
            let attr = attr_index(spec, graph, AttributeKind::Categorical, 0)?;
            let alpha = exponent_arg(spec, 1)?;
            Ok(Effect::BipartiteNodematchAlphaA { attr, alpha })
        }
        "bipartitenodematchalphab" => {
            expect_args(spec, 2, "an attribute name and an exponent")?;
            let attr = attr_index(spec, graph, AttributeKind::Categorical, 0)?;
            let alpha = exponent_arg(spec, 1)?;
            Ok(Effect::BipartiteNodematchAlphaB { attr, alpha })
        }
        "bipartitenodematchbetaa" => {
            expect_args(spec, 2, "an attribute name and an exponent")?;
            let attr = attr_index(spec, graph, AttributeKind::Categorical, 0)?;
            let beta = exponent_arg(spec, 1)?;
            Ok(Effect::BipartiteNodematchBetaA { attr, beta })
        }
        "bipartitenodematchbetab" => {
            expect_args(spec, 2, "an attribute name and an exponent")?;
            let attr = attr_index(spec, graph, AttributeKind::Categorical, 0)?;
            let beta = exponent_arg(spec, 1)?;
            Ok(Effect::BipartiteNodematchBetaB { attr, beta })
        }
        _ => Err(unknown(spec)),
    }
}

fn bind_dyadic(spec: &EffectSpec, graph: &Graph) -> Result<Effect, ConfigError> {
    let name = spec.name.to_ascii_lowercase();
    match name.as_str() {
        "geodistance" | "loggeodistance" => {
            expect_args(spec, 2, "two continuous attribute names")?;
            let lat = attr_index(spec, graph, AttributeKind::Continuous, 0)?;
            let lon = attr_index(spec, graph, AttributeKind::Continuous, 1)?;
            if name == "geodistance" {
                Ok(Effect::GeoDistance { lat, lon })
            } else {
                Ok(Effect::LogGeoDistance { lat, lon })
            }
        }
        "euclideandistance" => {
            expect_args(spec, 3, "three continuous attribute names")?;
            Ok(Effect::EuclideanDistance {
                x: attr_index(spec, graph, AttributeKind::Continuous, 0)?,
                y: attr_index(spec, graph, AttributeKind::Continuous, 1)?,
                z: attr_index(spec, graph, AttributeKind::Continuous, 2)?,
            })
        }
        _ => Err(unknown(spec)),
    }
}

fn bind_interaction(spec: &EffectSpec, graph: &Graph) -> Result<Effect, ConfigError> {
    match spec.name.to_ascii_lowercase().as_str() {
        "binarypairinteraction" => {
            expect_args(spec, 2, "two binary attribute names")?;
            Ok(Effect::BinaryPairInteraction {
                attr_first: attr_index(spec, graph, AttributeKind::Binary, 0)?,
                attr_second: attr_index(spec, graph, AttributeKind::Binary, 1)?,
            })
        }
        _ => Err(unknown(spec)),
    }
}

fn unknown(spec: &EffectSpec) -> ConfigError {
    ConfigError::UnknownEffect {
        name: spec.name.clone(),
        line: spec.line,
    }
}

fn expect_args(spec: &EffectSpec, count: usize, expected: &'static str) -> Result<(), ConfigError> {
    if spec.args.len() == count {
        Ok(())
    } else {
        Err(ConfigError::EffectArguments {
            effect: spec.name.clone(),
            expected,
            got: spec.args.len(),
            line: spec.line,
        })
    }
}

fn decay(spec: &EffectSpec) -> Result<f64, ConfigError> {
    expect_args(spec, 1, "one decay parameter")?;
    let value: f64 = spec.args[0].parse().map_err(|_| ConfigError::InvalidParameter {
        effect: spec.name.clone(),
        detail: "decay parameter must be a real number",
        line: spec.line,
    })?;
    if value > 1.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidParameter {
            effect: spec.name.clone(),
            detail: "decay parameter must be greater than one",
            line: spec.line,
        })
    }
}

fn exponent(spec: &EffectSpec) -> Result<f64, ConfigError> {
    expect_args(spec, 1, "one exponent")?;
    exponent_arg(spec, 0)
}

fn exponent_arg(spec: &EffectSpec, index: usize) -> Result<f64, ConfigError> {
    let Some(raw) = spec.args.get(index) else {
        return Err(ConfigError::EffectArguments {
            effect: spec.name.clone(),
            expected: "an attribute name and an exponent",
            got: spec.args.len(),
            line: spec.line,
        });
    };
    let value: f64 = raw.parse().map_err(|_| ConfigError::InvalidParameter {
        effect: spec.name.clone(),
        detail: "exponent must be a real number",
        line: spec.line,
    })?;
    if value > 0.0 && value <= 1.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidParameter {
            effect: spec.name.clone(),
            detail: "exponent must lie in (0, 1]",
            line: spec.line,
        })
    }
}

fn attr_index(
    spec: &EffectSpec,
    graph: &Graph,
    kind: AttributeKind,
    position: usize,
) -> Result<usize, ConfigError> {
    let Some(name) = spec.args.get(position) else {
        return Err(ConfigError::EffectArguments {
            effect: spec.name.clone(),
            expected: "an attribute name",
            got: spec.args.len(),
            line: spec.line,
        });
    };
    graph
        .attributes()
        .find(kind, name)
        .ok_or_else(|| ConfigError::UnknownAttribute {
            effect: spec.name.clone(),
            kind: kind.as_str(),
            name: name.clone(),
            line: spec.line,
        })
}
