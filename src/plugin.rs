use crate::{
    build::{ExtHook, create_instance},
    error::PlugroupResult,
    host::HostApp,
    model::GroupDescriptor,
};

/// Identity surface queried by the host's plugin registry before a group is
/// ever instantiated.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PluginManifest {
    pub id: String,
    pub label: String,
    pub version: u32,
    pub grouping: String,
    pub description: String,
}

/// A group plugin: its registry identity plus the descriptor that populates
/// an instance.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GroupPlugin {
    pub manifest: PluginManifest,
    pub descriptor: GroupDescriptor,
}

impl GroupPlugin {
    /// Populate `group` on `app` from this plugin's descriptor. See
    /// [`create_instance`] for the exact sequence and failure behavior.
    pub fn instantiate<H: HostApp>(
        &self,
        app: &mut H,
        group: H::NodeHandle,
        ext: Option<&mut ExtHook<'_, H>>,
    ) -> PlugroupResult<()> {
        create_instance(app, group, &self.descriptor, ext)
    }
}
