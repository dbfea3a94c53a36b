#![forbid(unsafe_code)]

pub mod build;
pub mod core;
pub mod dsl;
pub mod error;
pub mod fill;
pub mod host;
pub mod model;
pub mod plugin;
pub mod registry;
pub mod scene;

pub use build::{ExtHook, create_instance};
pub use self::core::{NodeColor, Point, Size};
pub use error::{PlugroupError, PlugroupResult};
pub use host::HostApp;
pub use model::{
    AliasSpec, DimRange, EdgeSpec, GroupDescriptor, NodeSpec, PageSpec, ParamKind, ParamOverride,
    ParamValue, UserParamKind, UserParamSpec,
};
pub use plugin::{GroupPlugin, PluginManifest};
pub use scene::{NodeId, ParamId, Scene, SceneNode, SceneParam};
