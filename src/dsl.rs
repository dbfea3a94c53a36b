use crate::{
    core::{NodeColor, Point, Size},
    error::PlugroupResult,
    model::{
        AliasSpec, EdgeSpec, GroupDescriptor, NodeSpec, PageSpec, ParamOverride, ParamValue,
        UserParamKind, UserParamSpec,
    },
};

/// Builder for a [`GroupDescriptor`]. `build()` runs full validation, so a
/// descriptor obtained here is safe to hand to the loader.
pub struct GroupDescriptorBuilder {
    nodes: Vec<NodeSpec>,
    edges: Vec<EdgeSpec>,
    pages: Vec<PageSpec>,
    user_params: Vec<UserParamSpec>,
    aliases: Vec<AliasSpec>,
    pages_order: Vec<String>,
}

impl GroupDescriptorBuilder {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            pages: Vec::new(),
            user_params: Vec::new(),
            aliases: Vec::new(),
            pages_order: Vec::new(),
        }
    }

    pub fn node(mut self, node: NodeSpec) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn edge(mut self, node: impl Into<String>, socket: u32, source: impl Into<String>) -> Self {
        self.edges.push(EdgeSpec {
            node: node.into(),
            socket,
            source: source.into(),
        });
        self
    }

    pub fn page(mut self, name: impl Into<String>, label: impl Into<String>) -> Self {
        self.pages.push(PageSpec {
            name: name.into(),
            label: label.into(),
        });
        self
    }

    pub fn user_param(mut self, param: UserParamSpec) -> Self {
        self.user_params.push(param);
        self
    }

    pub fn alias(
        mut self,
        param: impl Into<String>,
        node: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        self.aliases.push(AliasSpec {
            param: param.into(),
            node: node.into(),
            target: target.into(),
        });
        self
    }

    pub fn pages_order<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pages_order = order.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> PlugroupResult<GroupDescriptor> {
        let desc = GroupDescriptor {
            nodes: self.nodes,
            edges: self.edges,
            pages: self.pages,
            user_params: self.user_params,
            aliases: self.aliases,
            pages_order: self.pages_order,
        };
        desc.validate()?;
        Ok(desc)
    }
}

impl Default for GroupDescriptorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for one internal node.
pub struct NodeSpecBuilder {
    name: String,
    label: Option<String>,
    type_id: String,
    inputs: u32,
    position: Point,
    size: Size,
    color: NodeColor,
    overrides: Vec<ParamOverride>,
}

impl NodeSpecBuilder {
    pub fn new(name: impl Into<String>, type_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            type_id: type_id.into(),
            inputs: 0,
            position: Point::ZERO,
            size: Size::new(104.0, 34.0),
            color: NodeColor::default(),
            overrides: Vec::new(),
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn inputs(mut self, inputs: u32) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn position(mut self, x: f64, y: f64) -> Self {
        self.position = Point::new(x, y);
        self
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.size = Size::new(width, height);
        self
    }

    pub fn color(mut self, r: f64, g: f64, b: f64) -> Self {
        self.color = NodeColor::new(r, g, b);
        self
    }

    /// Override one dimension of a parameter after creation.
    pub fn set(mut self, param: impl Into<String>, dimension: usize, value: ParamValue) -> Self {
        self.overrides.push(ParamOverride {
            param: param.into(),
            dimension,
            value,
        });
        self
    }

    pub fn build(self) -> NodeSpec {
        let label = self.label.unwrap_or_else(|| self.name.clone());
        NodeSpec {
            name: self.name,
            label,
            type_id: self.type_id,
            inputs: self.inputs,
            position: self.position,
            size: self.size,
            color: self.color,
            overrides: self.overrides,
        }
    }
}

/// Builder for one group control. Defaults to the `controls` page, a new
/// layout line, and animation enabled.
pub struct UserParamBuilder {
    name: String,
    label: String,
    page: String,
    kind: UserParamKind,
    add_new_line: bool,
    animates: bool,
}

impl UserParamBuilder {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: UserParamKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            page: "controls".to_string(),
            kind,
            add_new_line: true,
            animates: true,
        }
    }

    pub fn page(mut self, page: impl Into<String>) -> Self {
        self.page = page.into();
        self
    }

    /// Lay this control out on the same line as the previous one.
    pub fn same_line(mut self) -> Self {
        self.add_new_line = false;
        self
    }

    pub fn animates(mut self, animates: bool) -> Self {
        self.animates = animates;
        self
    }

    pub fn build(self) -> UserParamSpec {
        UserParamSpec {
            name: self.name,
            label: self.label,
            page: self.page,
            kind: self.kind,
            add_new_line: self.add_new_line,
            animates: self.animates,
        }
    }
}
