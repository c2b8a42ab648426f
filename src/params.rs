//! Typed configuration in place of the source's string-keyed parameter
//! maps. Each algorithm family gets an enum; `from_param_map` is kept only
//! as a compatibility shim for callers still passing
//! `HashMap<String, String>` in from a textual or FFI boundary, mirroring
//! §6.2 while following §9's redesign note ("prefer a tagged-variant
//! configuration struct... validate once at entry").

use std::collections::HashMap;

use crate::Error;

fn require_key<'a>(map: &'a HashMap<String, String>, key: &str) -> Result<&'a str, Error> {
    map.get(key)
        .map(|s| s.as_str())
        .ok_or_else(|| Error::InvalidParameter {
            key: key.to_string(),
            reason: "required key missing".to_string(),
        })
}

fn invalid_value(key: &str, value: &str) -> Error {
    Error::InvalidParameter {
        key: key.to_string(),
        reason: format!("unrecognized value {value:?}"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComplementAlgorithm {
    #[default]
    Classical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComplementParams {
    pub algorithm: ComplementAlgorithm,
    pub minimize: bool,
}

impl ComplementParams {
    pub fn from_param_map(map: &HashMap<String, String>) -> Result<Self, Error> {
        let algorithm = match require_key(map, "algorithm")? {
            "classical" => ComplementAlgorithm::Classical,
            other => return Err(invalid_value("algorithm", other)),
        };
        let minimize = match map.get("minimize").map(|s| s.as_str()) {
            None => false,
            Some("true") => true,
            Some("false") => false,
            Some(other) => return Err(invalid_value("minimize", other)),
        };
        Ok(ComplementParams {
            algorithm,
            minimize,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MinimizeAlgorithm {
    #[default]
    Brzozowski,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MinimizeParams {
    pub algorithm: MinimizeAlgorithm,
}

impl MinimizeParams {
    pub fn from_param_map(map: &HashMap<String, String>) -> Result<Self, Error> {
        let algorithm = match require_key(map, "algorithm")? {
            "brzozowski" => MinimizeAlgorithm::Brzozowski,
            other => return Err(invalid_value("algorithm", other)),
        };
        Ok(MinimizeParams { algorithm })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InclusionAlgorithm {
    Naive,
    Antichains,
}

impl Default for InclusionAlgorithm {
    fn default() -> Self {
        InclusionAlgorithm::Antichains
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InclusionParams {
    pub algorithm: InclusionAlgorithm,
}

impl InclusionParams {
    pub fn from_param_map(map: &HashMap<String, String>) -> Result<Self, Error> {
        let algorithm = match map.get("algorithm").map(|s| s.as_str()) {
            None => InclusionAlgorithm::Antichains,
            Some("naive") => InclusionAlgorithm::Naive,
            Some("antichains") => InclusionAlgorithm::Antichains,
            Some(other) => return Err(invalid_value("algorithm", other)),
        };
        Ok(InclusionParams { algorithm })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReductionDirection {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceAlgorithm {
    Simulation,
    Residual {
        reduce_after: bool,
        direction: ReductionDirection,
    },
}

impl Default for ReduceAlgorithm {
    fn default() -> Self {
        ReduceAlgorithm::Simulation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReduceParams {
    pub algorithm: ReduceAlgorithm,
}

impl ReduceParams {
    pub fn from_param_map(map: &HashMap<String, String>) -> Result<Self, Error> {
        let algorithm = match map.get("algorithm").map(|s| s.as_str()) {
            None | Some("simulation") => ReduceAlgorithm::Simulation,
            Some("residual") => {
                let reduce_after = match map.get("type").map(|s| s.as_str()) {
                    Some("after") => true,
                    Some("with") => false,
                    Some(other) => return Err(invalid_value("type", other)),
                    None => {
                        return Err(Error::InvalidParameter {
                            key: "type".to_string(),
                            reason: "required for residual reduction".to_string(),
                        })
                    }
                };
                let direction = match map.get("direction").map(|s| s.as_str()) {
                    Some("forward") | None => ReductionDirection::Forward,
                    Some("backward") => ReductionDirection::Backward,
                    Some(other) => return Err(invalid_value("direction", other)),
                };
                ReduceAlgorithm::Residual {
                    reduce_after,
                    direction,
                }
            }
            Some(other) => return Err(invalid_value("algorithm", other)),
        };
        Ok(ReduceParams { algorithm })
    }
}

/// `JumpMode` controls how a jump transition's symbol is reinterpreted
/// when levels are collapsed (projection) or inserted (level insertion,
/// composition's self-loops, identity insertion).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpMode {
    /// Repeat the original symbol at every vanished/inserted position.
    RepeatSymbol,
    /// Keep the original symbol once, pad the rest with `DONT_CARE`.
    AppendDontCares,
}

impl Default for JumpMode {
    fn default() -> Self {
        JumpMode::RepeatSymbol
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevertStrategy {
    /// Add each reversed transition one at a time. Default: robust to
    /// sparse, large symbol ranges.
    Simple,
    /// Bucket transitions by symbol into arrays sized `max_symbol + 1`;
    /// faster when symbols are dense and small, wasteful otherwise.
    Fragile,
}

impl Default for RevertStrategy {
    fn default() -> Self {
        RevertStrategy::Simple
    }
}
