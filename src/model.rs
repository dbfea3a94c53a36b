use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::{
    core::{NodeColor, Point, Size},
    error::{PlugroupError, PlugroupResult},
};

/// A single value assignable to one dimension of a host parameter.
///
/// Choice parameters accept either an option index (`Int`) or an option name
/// (`Text`); numeric parameters accept `Double` or `Int`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Double(f64),
    Text(String),
}

impl ParamValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Double(_) => "double",
            Self::Text(_) => "text",
        }
    }
}

/// Storage kind of a host parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ParamKind {
    Boolean,
    Choice,
    Double,
    Color,
    Text,
}

impl ParamKind {
    pub fn accepts(self, value: &ParamValue) -> bool {
        matches!(
            (self, value),
            (Self::Boolean, ParamValue::Bool(_))
                | (Self::Choice, ParamValue::Int(_) | ParamValue::Text(_))
                | (
                    Self::Double | Self::Color,
                    ParamValue::Double(_) | ParamValue::Int(_)
                )
                | (Self::Text, ParamValue::Text(_))
        )
    }
}

/// A fixed value applied to one dimension of an internal node's parameter
/// right after the node is created.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParamOverride {
    pub param: String,
    #[serde(default)]
    pub dimension: usize,
    pub value: ParamValue,
}

/// One internal node of the group: host type, socket count, display
/// metadata, and parameter overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NodeSpec {
    pub name: String,
    pub label: String,
    pub type_id: String,
    pub inputs: u32,
    pub position: Point,
    pub size: Size,
    pub color: NodeColor,
    #[serde(default)]
    pub overrides: Vec<ParamOverride>,
}

/// A connection from an upstream node into a numbered input socket.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EdgeSpec {
    pub node: String,
    pub socket: u32,
    pub source: String,
}

/// A parameter page on the group node.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageSpec {
    pub name: String,
    pub label: String,
}

/// Hard bounds and display bounds for one numeric dimension.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DimRange {
    pub min: f64,
    pub max: f64,
    pub display_min: f64,
    pub display_max: f64,
}

impl DimRange {
    /// [0,1] bounds, [0,1] display.
    pub const fn unit() -> Self {
        Self {
            min: 0.0,
            max: 1.0,
            display_min: 0.0,
            display_max: 1.0,
        }
    }

    /// Effectively unbounded storage with a [0,1] display slider.
    pub const fn unbounded() -> Self {
        Self {
            min: -2147483648.0,
            max: 2147483647.0,
            display_min: 0.0,
            display_max: 1.0,
        }
    }

    pub fn validate(&self) -> PlugroupResult<()> {
        if self.min > self.max {
            return Err(PlugroupError::validation("DimRange min must be <= max"));
        }
        if self.display_min > self.display_max {
            return Err(PlugroupError::validation(
                "DimRange display_min must be <= display_max",
            ));
        }
        Ok(())
    }
}

/// Kind and constraints of an externally visible group control.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum UserParamKind {
    Color { ranges: Vec<DimRange>, default: Vec<f64> },
    Choice { default: usize },
    Boolean { default: bool },
    Double { range: DimRange, default: f64 },
}

impl UserParamKind {
    pub fn dims(&self) -> usize {
        match self {
            Self::Color { ranges, .. } => ranges.len(),
            _ => 1,
        }
    }

    pub fn param_kind(&self) -> ParamKind {
        match self {
            Self::Color { .. } => ParamKind::Color,
            Self::Choice { .. } => ParamKind::Choice,
            Self::Boolean { .. } => ParamKind::Boolean,
            Self::Double { .. } => ParamKind::Double,
        }
    }
}

/// An externally visible control on the group node.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UserParamSpec {
    pub name: String,
    pub label: String,
    pub page: String,
    pub kind: UserParamKind,
    pub add_new_line: bool,
    pub animates: bool,
}

/// Forwarding binding: edits of the group parameter act on
/// `node`'s parameter `target`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AliasSpec {
    pub param: String,
    pub node: String,
    pub target: String,
}

/// The full declarative description of a group: node table, edge table,
/// group controls, and alias bindings. Interpreted by
/// [`crate::build::create_instance`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GroupDescriptor {
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
    #[serde(default)]
    pub pages: Vec<PageSpec>,
    #[serde(default)]
    pub user_params: Vec<UserParamSpec>,
    #[serde(default)]
    pub aliases: Vec<AliasSpec>,
    #[serde(default)]
    pub pages_order: Vec<String>,
}

impl GroupDescriptor {
    /// Checks every structural invariant the loader relies on. Runs before
    /// any host call so a bad descriptor never half-populates a group.
    pub fn validate(&self) -> PlugroupResult<()> {
        let mut node_inputs: BTreeMap<&str, u32> = BTreeMap::new();
        for node in &self.nodes {
            if node.name.trim().is_empty() {
                return Err(PlugroupError::validation("node name must be non-empty"));
            }
            if node.type_id.trim().is_empty() {
                return Err(PlugroupError::validation(format!(
                    "node '{}' has an empty type id",
                    node.name
                )));
            }
            if !node.color.is_displayable() {
                return Err(PlugroupError::validation(format!(
                    "node '{}' has a display color outside [0,1]",
                    node.name
                )));
            }
            if node_inputs.insert(node.name.as_str(), node.inputs).is_some() {
                return Err(PlugroupError::validation(format!(
                    "duplicate node name '{}'",
                    node.name
                )));
            }
        }

        let mut sockets_seen: BTreeSet<(&str, u32)> = BTreeSet::new();
        for edge in &self.edges {
            let Some(&inputs) = node_inputs.get(edge.node.as_str()) else {
                return Err(PlugroupError::validation(format!(
                    "edge references undeclared node '{}'",
                    edge.node
                )));
            };
            if !node_inputs.contains_key(edge.source.as_str()) {
                return Err(PlugroupError::validation(format!(
                    "edge references undeclared source '{}'",
                    edge.source
                )));
            }
            if edge.node == edge.source {
                return Err(PlugroupError::validation(format!(
                    "node '{}' cannot connect to itself",
                    edge.node
                )));
            }
            if edge.socket >= inputs {
                return Err(PlugroupError::validation(format!(
                    "edge targets socket {} but node '{}' declares {} inputs",
                    edge.socket, edge.node, inputs
                )));
            }
            if !sockets_seen.insert((edge.node.as_str(), edge.socket)) {
                return Err(PlugroupError::validation(format!(
                    "socket {} of node '{}' is wired twice",
                    edge.socket, edge.node
                )));
            }
        }
        self.check_acyclic(&node_inputs)?;

        let mut pages: BTreeSet<&str> = BTreeSet::new();
        for page in &self.pages {
            if page.name.trim().is_empty() {
                return Err(PlugroupError::validation("page name must be non-empty"));
            }
            if !pages.insert(page.name.as_str()) {
                return Err(PlugroupError::validation(format!(
                    "duplicate page '{}'",
                    page.name
                )));
            }
        }
        // The order list may also name host-builtin pages, but every page
        // declared here has to appear in it.
        for page in &self.pages {
            if !self.pages_order.iter().any(|p| p == &page.name) {
                return Err(PlugroupError::validation(format!(
                    "page '{}' is missing from pages_order",
                    page.name
                )));
            }
        }

        let mut params: BTreeSet<&str> = BTreeSet::new();
        for param in &self.user_params {
            if param.name.trim().is_empty() {
                return Err(PlugroupError::validation("user parameter name must be non-empty"));
            }
            if !params.insert(param.name.as_str()) {
                return Err(PlugroupError::validation(format!(
                    "duplicate user parameter '{}'",
                    param.name
                )));
            }
            if !pages.contains(param.page.as_str()) {
                return Err(PlugroupError::validation(format!(
                    "user parameter '{}' references undeclared page '{}'",
                    param.name, param.page
                )));
            }
            match &param.kind {
                UserParamKind::Color { ranges, default } => {
                    if ranges.is_empty() || ranges.len() > 4 {
                        return Err(PlugroupError::validation(format!(
                            "color parameter '{}' must have 1..=4 dimensions",
                            param.name
                        )));
                    }
                    if ranges.len() != default.len() {
                        return Err(PlugroupError::validation(format!(
                            "color parameter '{}' has {} ranges but {} defaults",
                            param.name,
                            ranges.len(),
                            default.len()
                        )));
                    }
                    for range in ranges {
                        range.validate()?;
                    }
                }
                UserParamKind::Double { range, default } => {
                    range.validate()?;
                    if !(range.min..=range.max).contains(default) {
                        return Err(PlugroupError::validation(format!(
                            "default of '{}' lies outside its bounds",
                            param.name
                        )));
                    }
                }
                UserParamKind::Choice { .. } | UserParamKind::Boolean { .. } => {}
            }
        }

        let mut aliased: BTreeSet<&str> = BTreeSet::new();
        for alias in &self.aliases {
            if !params.contains(alias.param.as_str()) {
                return Err(PlugroupError::validation(format!(
                    "alias references undeclared user parameter '{}'",
                    alias.param
                )));
            }
            if !node_inputs.contains_key(alias.node.as_str()) {
                return Err(PlugroupError::validation(format!(
                    "alias references undeclared node '{}'",
                    alias.node
                )));
            }
            if alias.target.trim().is_empty() {
                return Err(PlugroupError::validation(format!(
                    "alias for '{}' has an empty target parameter",
                    alias.param
                )));
            }
            if !aliased.insert(alias.param.as_str()) {
                return Err(PlugroupError::validation(format!(
                    "user parameter '{}' is aliased twice",
                    alias.param
                )));
            }
        }

        Ok(())
    }

    // Kahn's algorithm over the edge table. The descriptor is a static DAG;
    // a leftover node means a cycle.
    fn check_acyclic(&self, node_inputs: &BTreeMap<&str, u32>) -> PlugroupResult<()> {
        let mut indegree: BTreeMap<&str, usize> =
            node_inputs.keys().map(|&n| (n, 0)).collect();
        let mut downstream: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for edge in &self.edges {
            *indegree.entry(edge.node.as_str()).or_default() += 1;
            downstream
                .entry(edge.source.as_str())
                .or_default()
                .push(edge.node.as_str());
        }

        let mut queue: VecDeque<&str> = indegree
            .iter()
            .filter(|&(_, &d)| d == 0)
            .map(|(&n, _)| n)
            .collect();
        let mut visited = 0usize;
        while let Some(node) = queue.pop_front() {
            visited += 1;
            for &next in downstream.get(node).into_iter().flatten() {
                let d = indegree
                    .get_mut(next)
                    .ok_or_else(|| PlugroupError::graph(format!("unknown node '{next}'")))?;
                *d -= 1;
                if *d == 0 {
                    queue.push_back(next);
                }
            }
        }
        if visited != node_inputs.len() {
            return Err(PlugroupError::validation("edge table contains a cycle"));
        }
        Ok(())
    }
}
