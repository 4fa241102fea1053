//! Parser for the keyword/brace configuration mini-language.
//!
//! The grammar is line-oriented with one extension: a set-valued option
//! `name = { item, item, ... }` may span multiple lines until its closing
//! brace. `#` starts a comment anywhere; option and effect names are
//! case-insensitive, values (such as file paths) are taken verbatim.
//!
//! ```text
//! # three structural effects and one attribute effect
//! networkFile = nets/sample.net
//! structuralParams = { Arc, Reciprocity, AltInStars(2.0) }
//! attrParams = { Sender(smoker) }
//! ```

use super::error::ConfigError;

/// One effect item inside a set-valued option.
#[derive(Clone, Debug, PartialEq)]
pub struct EffectSpec {
    /// Effect name as written (case preserved for diagnostics).
    pub name: String,
    /// Parenthesised arguments, verbatim.
    pub args: Vec<String>,
    /// Trailing `= value` coefficient, for simulation runs.
    pub coefficient: Option<f64>,
    /// 1-based line the item started on.
    pub line: usize,
}

/// The value side of one `name = ...` setting.
#[derive(Clone, Debug, PartialEq)]
pub enum SettingValue {
    /// A plain scalar: everything after `=`, trimmed.
    Scalar(String),
    /// A brace-delimited list of effect specifications.
    Effects(Vec<EffectSpec>),
}

/// One parsed `name = value` pair.
#[derive(Clone, Debug, PartialEq)]
pub struct Setting {
    /// Option name as written.
    pub name: String,
    /// Parsed value.
    pub value: SettingValue,
    /// 1-based line number of the option name.
    pub line: usize,
}

/// A parsed configuration file, in file order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConfigFile {
    /// Every setting, in order of appearance.
    pub settings: Vec<Setting>,
}

/// Parses configuration text.
///
/// # Errors
/// Returns [`ConfigError::Syntax`] with the offending line number for any
/// grammar violation: a missing `=`, an unterminated brace list, or a
/// malformed effect item.
pub fn parse_config(text: &str) -> Result<ConfigFile, ConfigError> {
    let mut settings = Vec::new();
    let mut lines = text.lines().enumerate();
    while let Some((index, raw)) = lines.next() {
        let line_no = index + 1;
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }
        let Some((name, rest)) = line.split_once('=') else {
            return Err(ConfigError::Syntax {
                line: line_no,
                message: format!("expected `name = value`, got `{line}`"),
            });
        };
        let name = name.trim();
        if name.is_empty() || !is_identifier(name) {
            return Err(ConfigError::Syntax {
                line: line_no,
                message: format!("`{name}` is not a valid option name"),
            });
        }
        let rest = rest.trim();
        let value = if let Some(body) = rest.strip_prefix('{') {
            // Gather lines until the closing brace, then split into items.
            let mut body = body.to_owned();
            let mut closed = body.contains('}');
            while !closed {
                let Some((_, continuation)) = lines.next() else {
                    return Err(ConfigError::Syntax {
                        line: line_no,
                        message: format!("unterminated `{{` in option `{name}`"),
                    });
                };
                body.push('\n');
                body.push_str(strip_comment(continuation));
                closed = body.contains('}');
            }
            let Some((inner, trailing)) = body.split_once('}') else {
                return Err(ConfigError::Syntax {
                    line: line_no,
                    message: format!("unterminated `{{` in option `{name}`"),
                });
            };
            if !trailing.trim().is_empty() {
                return Err(ConfigError::Syntax {
                    line: line_no,
                    message: format!("unexpected `{}` after `}}`", trailing.trim()),
                });
            }
            SettingValue::Effects(parse_items(inner, line_no)?)
        } else {
            if rest.is_empty() {
                return Err(ConfigError::Syntax {
                    line: line_no,
                    message: format!("option `{name}` has no value"),
                });
            }
            SettingValue::Scalar(rest.to_owned())
        };
        settings.push(Setting {
            name: name.to_owned(),
            value,
            line: line_no,
        });
    }
    Ok(ConfigFile { settings })
}

fn strip_comment(line: &str) -> &str {
    line.split_once('#').map_or(line, |(head, _)| head)
}

fn is_identifier(name: &str) -> bool {
    name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Splits a brace body into comma-separated effect items, honouring
/// parentheses so `Effect(a, b)` stays one item.
fn parse_items(body: &str, start_line: usize) -> Result<Vec<EffectSpec>, ConfigError> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    let mut line = start_line;
    let mut item_line = start_line;
    for c in body.chars() {
        match c {
            '\n' => {
                line += 1;
                current.push(' ');
            }
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.checked_sub(1).ok_or_else(|| ConfigError::Syntax {
                    line,
                    message: "unmatched `)`".to_owned(),
                })?;
                current.push(c);
            }
            ',' if depth == 0 => {
                push_item(&mut items, &current, item_line)?;
                current.clear();
                item_line = line;
            }
            _ => {
                if current.trim().is_empty() && !c.is_whitespace() {
                    item_line = line;
                }
                current.push(c);
            }
        }
    }
    if depth != 0 {
        return Err(ConfigError::Syntax {
            line,
            message: "unmatched `(`".to_owned(),
        });
    }
    push_item(&mut items, &current, item_line)?;
    Ok(items)
}

fn push_item(
    items: &mut Vec<EffectSpec>,
    text: &str,
    line: usize,
) -> Result<(), ConfigError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(());
    }
    // Optional trailing coefficient: `Effect(...) = value`.
    let (head, coefficient) = match text.rsplit_once('=') {
        Some((head, value)) if !head.trim_end().ends_with(['(', ',']) => {
            let value = value.trim();
            let parsed = value.parse::<f64>().map_err(|_| ConfigError::Syntax {
                line,
                message: format!("`{value}` is not a valid coefficient"),
            })?;
            (head.trim(), Some(parsed))
        }
        _ => (text, None),
    };
    let (name, args) = match head.split_once('(') {
        Some((name, rest)) => {
            let Some(inner) = rest.trim_end().strip_suffix(')') else {
                return Err(ConfigError::Syntax {
                    line,
                    message: format!("effect `{}` has an unterminated argument list", name.trim()),
                });
            };
            let args = inner
                .split(',')
                .map(str::trim)
                .filter(|arg| !arg.is_empty())
                .map(str::to_owned)
                .collect();
            (name.trim(), args)
        }
        None => (head, Vec::new()),
    };
    if name.is_empty() || !is_identifier(name) {
        return Err(ConfigError::Syntax {
            line,
            message: format!("`{name}` is not a valid effect name"),
        });
    }
    items.push(EffectSpec {
        name: name.to_owned(),
        args,
        coefficient,
        line,
    });
    Ok(())
}
