use std::fmt::Debug;
use std::hash::Hash;

use crate::{
    core::{NodeColor, Point, Size},
    error::PlugroupResult,
    model::{PageSpec, ParamValue, UserParamSpec},
};

/// The node-graph API surface a compositing host exposes to group plugins.
///
/// Handles are lightweight ids; the host owns every node and parameter, and
/// all mutation goes through `&mut self`. [`crate::scene::Scene`] is the
/// in-memory reference implementation; a binding to a real application
/// implements the same trait.
pub trait HostApp {
    type NodeHandle: Copy + Eq + Hash + Debug;
    type ParamHandle: Copy + Eq + Hash + Debug;

    /// Create a node of a built-in type with `inputs` input sockets inside
    /// `parent`. Fails with `UnknownType` if the host has no such type.
    fn create_node(
        &mut self,
        type_id: &str,
        inputs: u32,
        parent: Self::NodeHandle,
    ) -> PlugroupResult<Self::NodeHandle>;

    fn set_script_name(&mut self, node: Self::NodeHandle, name: &str) -> PlugroupResult<()>;
    fn set_label(&mut self, node: Self::NodeHandle, label: &str) -> PlugroupResult<()>;
    fn set_position(&mut self, node: Self::NodeHandle, position: Point) -> PlugroupResult<()>;
    fn set_size(&mut self, node: Self::NodeHandle, size: Size) -> PlugroupResult<()>;
    fn set_color(&mut self, node: Self::NodeHandle, color: NodeColor) -> PlugroupResult<()>;

    /// Look up a parameter by name. Absence is a plain `None`, never an
    /// error: node type definitions evolve, and callers decide whether a
    /// missing parameter matters.
    fn find_param(&self, node: Self::NodeHandle, name: &str) -> Option<Self::ParamHandle>;

    fn set_param_value(
        &mut self,
        param: Self::ParamHandle,
        dimension: usize,
        value: &ParamValue,
    ) -> PlugroupResult<()>;

    /// Connect `source`'s output into `node`'s numbered input socket.
    fn connect_input(
        &mut self,
        node: Self::NodeHandle,
        socket: u32,
        source: Self::NodeHandle,
    ) -> PlugroupResult<()>;

    fn create_page(&mut self, group: Self::NodeHandle, page: &PageSpec) -> PlugroupResult<()>;

    fn create_user_param(
        &mut self,
        group: Self::NodeHandle,
        spec: &UserParamSpec,
    ) -> PlugroupResult<Self::ParamHandle>;

    fn set_pages_order(&mut self, group: Self::NodeHandle, order: &[String]) -> PlugroupResult<()>;

    /// Rebuild the group's parameter GUI after user parameters changed.
    fn refresh_user_params(&mut self, group: Self::NodeHandle) -> PlugroupResult<()>;

    /// Make `group_param` a forwarding alias of `target`: every subsequent
    /// edit of the group parameter acts on the target parameter.
    fn set_as_alias(
        &mut self,
        group_param: Self::ParamHandle,
        target: Self::ParamHandle,
    ) -> PlugroupResult<()>;
}
