use std::collections::BTreeMap;

use crate::{
    error::{PlugroupError, PlugroupResult},
    host::HostApp,
    model::GroupDescriptor,
};

/// Post-build hook invoked once with the same `(app, group)` arguments the
/// loader received, after all base wiring completes. Replaces the
/// extension-module-by-name lookup of script-based hosts with an injected
/// callback.
pub type ExtHook<'a, H> =
    dyn FnMut(&mut H, <H as HostApp>::NodeHandle) -> PlugroupResult<()> + 'a;

/// Populates an empty `group` from a declarative descriptor.
///
/// The sequence is fixed: create nodes with their display metadata and
/// parameter overrides, create the group's pages and user parameters, wire
/// the edges, bind the aliases, then run the extension hook if one was
/// injected. On return the group matches the descriptor exactly; the
/// procedure is deterministic against a fresh empty group and must not be
/// re-run against a partially populated one.
///
/// A parameter override or alias whose target parameter does not exist on
/// the freshly created node is skipped silently: built-in node definitions
/// evolve between host versions, and a stale parameter name must not break
/// instantiation. Unknown node types and out-of-range sockets fail hard.
#[tracing::instrument(skip(app, desc, ext))]
pub fn create_instance<H: HostApp>(
    app: &mut H,
    group: H::NodeHandle,
    desc: &GroupDescriptor,
    ext: Option<&mut ExtHook<'_, H>>,
) -> PlugroupResult<()> {
    desc.validate()?;

    let mut nodes: BTreeMap<&str, H::NodeHandle> = BTreeMap::new();
    for spec in &desc.nodes {
        let node = app.create_node(&spec.type_id, spec.inputs, group)?;
        app.set_script_name(node, &spec.name)?;
        app.set_label(node, &spec.label)?;
        app.set_position(node, spec.position)?;
        app.set_size(node, spec.size)?;
        app.set_color(node, spec.color)?;

        for ov in &spec.overrides {
            match app.find_param(node, &ov.param) {
                Some(param) => app.set_param_value(param, ov.dimension, &ov.value)?,
                None => tracing::debug!(
                    node = %spec.name,
                    param = %ov.param,
                    "override target does not exist, skipped"
                ),
            }
        }

        nodes.insert(spec.name.as_str(), node);
    }

    for page in &desc.pages {
        app.create_page(group, page)?;
    }
    let mut group_params: BTreeMap<&str, H::ParamHandle> = BTreeMap::new();
    for spec in &desc.user_params {
        let param = app.create_user_param(group, spec)?;
        group_params.insert(spec.name.as_str(), param);
    }
    if !desc.pages_order.is_empty() {
        app.set_pages_order(group, &desc.pages_order)?;
    }
    app.refresh_user_params(group)?;

    for edge in &desc.edges {
        let node = declared(&nodes, &edge.node)?;
        let source = declared(&nodes, &edge.source)?;
        app.connect_input(node, edge.socket, source)?;
    }

    for alias in &desc.aliases {
        let node = declared(&nodes, &alias.node)?;
        match app.find_param(node, &alias.target) {
            Some(target) => {
                let param = declared(&group_params, &alias.param)?;
                app.set_as_alias(param, target)?;
            }
            None => tracing::warn!(
                node = %alias.node,
                param = %alias.target,
                "alias target does not exist, skipped"
            ),
        }
    }

    if let Some(hook) = ext {
        hook(app, group)?;
    }

    Ok(())
}

// Every name was checked by validate(), so a miss here is a loader bug, not
// a descriptor bug.
fn declared<T: Copy>(map: &BTreeMap<&str, T>, name: &str) -> PlugroupResult<T> {
    map.get(name)
        .copied()
        .ok_or_else(|| PlugroupError::graph(format!("undeclared name '{name}'")))
}
