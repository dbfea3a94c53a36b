use crate::{
    core::{NodeColor, Point, Size},
    error::{PlugroupError, PlugroupResult},
    host::HostApp,
    model::{DimRange, PageSpec, ParamKind, ParamValue, UserParamKind, UserParamSpec},
    registry,
};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct NodeId(pub u64);

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ParamId {
    pub node: NodeId,
    pub slot: usize,
}

/// One parameter instance living on a scene node.
#[derive(Clone, Debug, serde::Serialize)]
pub struct SceneParam {
    pub name: String,
    pub label: String,
    pub kind: ParamKind,
    /// Current value, one entry per dimension.
    pub values: Vec<ParamValue>,
    pub defaults: Vec<ParamValue>,
    pub ranges: Vec<DimRange>,
    /// Page membership; only user parameters on a group carry one.
    pub page: Option<String>,
    pub add_new_line: bool,
    pub animates: bool,
    pub user: bool,
    pub alias_of: Option<ParamId>,
}

/// A node owned by the scene: type, display metadata, input sockets, and
/// parameters.
#[derive(Clone, Debug, serde::Serialize)]
pub struct SceneNode {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub type_id: String,
    pub script_name: String,
    pub label: String,
    pub position: Point,
    pub size: Size,
    pub color: NodeColor,
    pub inputs: Vec<Option<NodeId>>,
    pub params: Vec<SceneParam>,
    pub pages: Vec<PageSpec>,
    pub pages_order: Vec<String>,
}

impl SceneNode {
    pub fn param(&self, name: &str) -> Option<&SceneParam> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn input(&self, socket: u32) -> Option<NodeId> {
        self.inputs.get(socket as usize).copied().flatten()
    }

    pub fn user_params(&self) -> impl Iterator<Item = &SceneParam> {
        self.params.iter().filter(|p| p.user)
    }
}

/// In-memory scene graph implementing [`HostApp`]. Stands in for a real
/// compositing application: it stores nodes, sockets, and parameter values
/// (including alias forwarding), but performs no image processing.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Scene {
    nodes: Vec<SceneNode>,
    root: NodeId,
}

impl Scene {
    /// A scene seeded with one empty group node, ready for instantiation.
    pub fn new() -> Self {
        let root = SceneNode {
            id: NodeId(0),
            parent: None,
            type_id: "fr.inria.built-in.Group".to_string(),
            script_name: "Group1".to_string(),
            label: "Group".to_string(),
            position: Point::ZERO,
            size: Size::new(104.0, 34.0),
            color: NodeColor::default(),
            inputs: Vec::new(),
            params: Vec::new(),
            pages: Vec::new(),
            pages_order: Vec::new(),
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0 as usize)
    }

    pub fn children(&self, group: NodeId) -> impl Iterator<Item = &SceneNode> {
        self.nodes.iter().filter(move |n| n.parent == Some(group))
    }

    pub fn child_by_name(&self, group: NodeId, name: &str) -> Option<&SceneNode> {
        self.children(group).find(|n| n.script_name == name)
    }

    pub fn param(&self, id: ParamId) -> Option<&SceneParam> {
        self.get(id.node).and_then(|n| n.params.get(id.slot))
    }

    /// Graphviz rendering of a group's internal DAG.
    pub fn to_dot(&self, group: NodeId) -> PlugroupResult<String> {
        use std::fmt::Write as _;

        let group_node = self.node_ref(group)?;
        let mut out = String::new();
        let _ = writeln!(out, "digraph \"{}\" {{", group_node.script_name);
        let _ = writeln!(out, "  rankdir=TB;");
        for node in self.children(group) {
            let _ = writeln!(
                out,
                "  \"{}\" [label=\"{}\\n{}\"];",
                node.script_name, node.label, node.type_id
            );
        }
        for node in self.children(group) {
            for (socket, input) in node.inputs.iter().enumerate() {
                if let Some(source) = input {
                    let source = self.node_ref(*source)?;
                    let _ = writeln!(
                        out,
                        "  \"{}\" -> \"{}\" [label=\"{}\"];",
                        source.script_name, node.script_name, socket
                    );
                }
            }
        }
        let _ = writeln!(out, "}}");
        Ok(out)
    }

    fn node_ref(&self, id: NodeId) -> PlugroupResult<&SceneNode> {
        self.get(id)
            .ok_or_else(|| PlugroupError::graph(format!("no node with id {}", id.0)))
    }

    fn node_mut(&mut self, id: NodeId) -> PlugroupResult<&mut SceneNode> {
        self.nodes
            .get_mut(id.0 as usize)
            .ok_or_else(|| PlugroupError::graph(format!("no node with id {}", id.0)))
    }

    fn param_mut(&mut self, id: ParamId) -> PlugroupResult<&mut SceneParam> {
        self.node_mut(id.node)?
            .params
            .get_mut(id.slot)
            .ok_or_else(|| PlugroupError::graph(format!("stale parameter handle {id:?}")))
    }

    // Writes one dimension without following aliases.
    fn write_param(
        &mut self,
        id: ParamId,
        dimension: usize,
        value: &ParamValue,
    ) -> PlugroupResult<()> {
        let param = self.param_mut(id)?;
        if dimension >= param.values.len() {
            return Err(PlugroupError::param(format!(
                "parameter '{}' has {} dimensions, got index {}",
                param.name,
                param.values.len(),
                dimension
            )));
        }
        if !param.kind.accepts(value) {
            return Err(PlugroupError::param(format!(
                "parameter '{}' ({:?}) does not accept a {} value",
                param.name,
                param.kind,
                value.kind_name()
            )));
        }
        param.values[dimension] = value.clone();
        Ok(())
    }

    // True if `from` is reachable from `start` walking upstream over inputs.
    fn reaches(&self, start: NodeId, from: NodeId) -> bool {
        let mut stack = vec![start];
        let mut seen = vec![false; self.nodes.len()];
        while let Some(id) = stack.pop() {
            if id == from {
                return true;
            }
            let idx = id.0 as usize;
            if idx >= seen.len() || seen[idx] {
                continue;
            }
            seen[idx] = true;
            if let Some(node) = self.get(id) {
                stack.extend(node.inputs.iter().flatten().copied());
            }
        }
        false
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl HostApp for Scene {
    type NodeHandle = NodeId;
    type ParamHandle = ParamId;

    fn create_node(
        &mut self,
        type_id: &str,
        inputs: u32,
        parent: NodeId,
    ) -> PlugroupResult<NodeId> {
        let def = registry::lookup(type_id)
            .ok_or_else(|| PlugroupError::UnknownType(type_id.to_string()))?;
        self.node_ref(parent)?;

        let id = NodeId(self.nodes.len() as u64);
        let params = def
            .params
            .iter()
            .map(|p| SceneParam {
                name: p.name.to_string(),
                label: p.label.to_string(),
                kind: p.kind,
                values: p.default_values(),
                defaults: p.default_values(),
                ranges: Vec::new(),
                page: None,
                add_new_line: true,
                animates: true,
                user: false,
                alias_of: None,
            })
            .collect();
        self.nodes.push(SceneNode {
            id,
            parent: Some(parent),
            type_id: def.id.to_string(),
            script_name: format!("{}{}", def.label, id.0),
            label: def.label.to_string(),
            position: Point::ZERO,
            size: Size::new(104.0, 34.0),
            color: NodeColor::default(),
            inputs: vec![None; inputs as usize],
            params,
            pages: Vec::new(),
            pages_order: Vec::new(),
        });
        Ok(id)
    }

    fn set_script_name(&mut self, node: NodeId, name: &str) -> PlugroupResult<()> {
        if name.trim().is_empty() {
            return Err(PlugroupError::graph("script name must be non-empty"));
        }
        let parent = self.node_ref(node)?.parent;
        if let Some(parent) = parent {
            let taken = self
                .children(parent)
                .any(|n| n.id != node && n.script_name == name);
            if taken {
                return Err(PlugroupError::graph(format!(
                    "script name '{name}' is already used in this group"
                )));
            }
        }
        self.node_mut(node)?.script_name = name.to_string();
        Ok(())
    }

    fn set_label(&mut self, node: NodeId, label: &str) -> PlugroupResult<()> {
        self.node_mut(node)?.label = label.to_string();
        Ok(())
    }

    fn set_position(&mut self, node: NodeId, position: Point) -> PlugroupResult<()> {
        self.node_mut(node)?.position = position;
        Ok(())
    }

    fn set_size(&mut self, node: NodeId, size: Size) -> PlugroupResult<()> {
        self.node_mut(node)?.size = size;
        Ok(())
    }

    fn set_color(&mut self, node: NodeId, color: NodeColor) -> PlugroupResult<()> {
        self.node_mut(node)?.color = color;
        Ok(())
    }

    fn find_param(&self, node: NodeId, name: &str) -> Option<ParamId> {
        let node = self.get(node)?;
        node.params
            .iter()
            .position(|p| p.name == name)
            .map(|slot| ParamId { node: node.id, slot })
    }

    fn set_param_value(
        &mut self,
        param: ParamId,
        dimension: usize,
        value: &ParamValue,
    ) -> PlugroupResult<()> {
        self.write_param(param, dimension, value)?;
        let target = self
            .param(param)
            .ok_or_else(|| PlugroupError::graph(format!("stale parameter handle {param:?}")))?
            .alias_of;
        if let Some(target) = target {
            self.write_param(target, dimension, value)?;
        }
        Ok(())
    }

    fn connect_input(&mut self, node: NodeId, socket: u32, source: NodeId) -> PlugroupResult<()> {
        self.node_ref(source)?;
        let node_ref = self.node_ref(node)?;
        if socket as usize >= node_ref.inputs.len() {
            return Err(PlugroupError::Socket {
                node: node_ref.script_name.clone(),
                socket,
            });
        }
        if node == source || self.reaches(source, node) {
            return Err(PlugroupError::graph(format!(
                "connecting '{}' into socket {} would create a cycle",
                self.node_ref(source)?.script_name,
                socket
            )));
        }
        self.node_mut(node)?.inputs[socket as usize] = Some(source);
        Ok(())
    }

    fn create_page(&mut self, group: NodeId, page: &PageSpec) -> PlugroupResult<()> {
        let node = self.node_mut(group)?;
        if node.pages.iter().any(|p| p.name == page.name) {
            return Err(PlugroupError::param(format!(
                "page '{}' already exists on '{}'",
                page.name, node.script_name
            )));
        }
        node.pages.push(page.clone());
        Ok(())
    }

    fn create_user_param(
        &mut self,
        group: NodeId,
        spec: &UserParamSpec,
    ) -> PlugroupResult<ParamId> {
        let node = self.node_mut(group)?;
        if node.params.iter().any(|p| p.name == spec.name) {
            return Err(PlugroupError::param(format!(
                "parameter '{}' already exists on '{}'",
                spec.name, node.script_name
            )));
        }

        let (values, ranges) = match &spec.kind {
            UserParamKind::Color { ranges, default } => (
                default.iter().map(|&v| ParamValue::Double(v)).collect(),
                ranges.clone(),
            ),
            UserParamKind::Choice { default } => {
                (vec![ParamValue::Int(*default as i64)], Vec::new())
            }
            UserParamKind::Boolean { default } => (vec![ParamValue::Bool(*default)], Vec::new()),
            UserParamKind::Double { range, default } => {
                (vec![ParamValue::Double(*default)], vec![*range])
            }
        };

        let slot = node.params.len();
        node.params.push(SceneParam {
            name: spec.name.clone(),
            label: spec.label.clone(),
            kind: spec.kind.param_kind(),
            defaults: values.clone(),
            values,
            ranges,
            page: Some(spec.page.clone()),
            add_new_line: spec.add_new_line,
            animates: spec.animates,
            user: true,
            alias_of: None,
        });
        Ok(ParamId { node: group, slot })
    }

    fn set_pages_order(&mut self, group: NodeId, order: &[String]) -> PlugroupResult<()> {
        self.node_mut(group)?.pages_order = order.to_vec();
        Ok(())
    }

    fn refresh_user_params(&mut self, group: NodeId) -> PlugroupResult<()> {
        // Nothing to rebuild headless; validate the handle and move on.
        self.node_ref(group)?;
        tracing::debug!(group = group.0, "user parameter GUI refresh requested");
        Ok(())
    }

    fn set_as_alias(&mut self, group_param: ParamId, target: ParamId) -> PlugroupResult<()> {
        if group_param == target {
            return Err(PlugroupError::param("a parameter cannot alias itself"));
        }
        self.param(target)
            .ok_or_else(|| PlugroupError::graph(format!("stale parameter handle {target:?}")))?;
        let param = self.param_mut(group_param)?;
        param.alias_of = Some(target);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_node_rejects_unknown_types() {
        let mut scene = Scene::new();
        let root = scene.root();
        let err = scene
            .create_node("net.sf.openfx.DoesNotExist", 1, root)
            .unwrap_err();
        assert!(matches!(err, PlugroupError::UnknownType(_)));
    }

    #[test]
    fn connect_rejects_out_of_range_socket() {
        let mut scene = Scene::new();
        let root = scene.root();
        let dot = scene.create_node("fr.inria.built-in.Dot", 1, root).unwrap();
        let input = scene
            .create_node("fr.inria.built-in.Input", 0, root)
            .unwrap();
        let err = scene.connect_input(dot, 1, input).unwrap_err();
        assert!(matches!(err, PlugroupError::Socket { socket: 1, .. }));
    }

    #[test]
    fn connect_rejects_cycles() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = scene.create_node("fr.inria.built-in.Dot", 1, root).unwrap();
        let b = scene.create_node("fr.inria.built-in.Dot", 1, root).unwrap();
        scene.connect_input(b, 0, a).unwrap();
        assert!(scene.connect_input(a, 0, b).is_err());
        assert!(scene.connect_input(a, 0, a).is_err());
    }

    #[test]
    fn set_param_value_checks_kind_and_dimension() {
        let mut scene = Scene::new();
        let root = scene.root();
        let merge = scene
            .create_node("net.sf.openfx.MergePlugin", 3, root)
            .unwrap();

        let mix = scene.find_param(merge, "mix").unwrap();
        scene.set_param_value(mix, 0, &ParamValue::Double(0.5)).unwrap();
        assert!(
            scene
                .set_param_value(mix, 0, &ParamValue::Bool(true))
                .is_err()
        );
        assert!(
            scene
                .set_param_value(mix, 1, &ParamValue::Double(0.5))
                .is_err()
        );

        // Choices take an index or an option name.
        let op = scene.find_param(merge, "operation").unwrap();
        scene.set_param_value(op, 0, &ParamValue::Int(28)).unwrap();
        scene
            .set_param_value(op, 0, &ParamValue::Text("over".to_string()))
            .unwrap();
    }

    #[test]
    fn alias_forwards_edits_to_the_target() {
        let mut scene = Scene::new();
        let root = scene.root();
        let solid = scene.create_node("net.sf.openfx.Solid", 0, root).unwrap();
        let color = scene.find_param(solid, "color").unwrap();

        let group_param = scene
            .create_user_param(
                root,
                &UserParamSpec {
                    name: "Solid1color".to_string(),
                    label: "Color".to_string(),
                    page: "controls".to_string(),
                    kind: UserParamKind::Color {
                        ranges: vec![DimRange::unbounded(); 3],
                        default: vec![1.0, 0.0, 0.0],
                    },
                    add_new_line: true,
                    animates: true,
                },
            )
            .unwrap();
        scene.set_as_alias(group_param, color).unwrap();

        scene
            .set_param_value(group_param, 2, &ParamValue::Double(0.75))
            .unwrap();
        let solid_color = scene.param(color).unwrap();
        assert_eq!(solid_color.values[2], ParamValue::Double(0.75));
    }

    #[test]
    fn script_names_are_unique_within_a_group() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = scene.create_node("fr.inria.built-in.Dot", 1, root).unwrap();
        let b = scene.create_node("fr.inria.built-in.Dot", 1, root).unwrap();
        scene.set_script_name(a, "Dot1").unwrap();
        assert!(scene.set_script_name(b, "Dot1").is_err());
        scene.set_script_name(b, "Dot2").unwrap();
    }
}
