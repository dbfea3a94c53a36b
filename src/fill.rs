//! The Fill group: a constant color blended over the source image wherever
//! its alpha is not zero, with operator and mix controls forwarded from the
//! wrapper group.

use crate::{
    dsl::{GroupDescriptorBuilder, NodeSpecBuilder, UserParamBuilder},
    error::PlugroupResult,
    model::{DimRange, ParamValue, UserParamKind},
    plugin::{GroupPlugin, PluginManifest},
};

pub const FILL_PLUGIN_ID: &str = "fr.inria.Fill";
pub const FILL_VERSION: u32 = 1;

const MERGE_LABEL_RICH_TEXT: &str = "<font size=\"6\" color=\"#000000\" face=\"Droid Sans\"><Natron>(over)</Natron></font>";

/// Builds the Fill plugin from its node/edge/parameter tables.
pub fn fill() -> PlugroupResult<GroupPlugin> {
    let manifest = PluginManifest {
        id: FILL_PLUGIN_ID.to_string(),
        label: "Fill".to_string(),
        version: FILL_VERSION,
        grouping: "Filter".to_string(),
        description: "Add a constant color on the source image where the alpha channel not 0. \
                      You can control the blending between the original image and the constant \
                      color with the operator and the mix factor."
            .to_string(),
    };

    let descriptor = GroupDescriptorBuilder::new()
        .node(
            NodeSpecBuilder::new("Dot1", "fr.inria.built-in.Dot")
                .inputs(1)
                .position(809.0, 199.0)
                .size(15.0, 15.0)
                .color(0.7, 0.7, 0.7)
                .build(),
        )
        .node(
            NodeSpecBuilder::new("Unpremult1", "net.sf.openfx.Unpremult")
                .inputs(1)
                .position(1036.0, 185.0)
                .size(104.0, 34.0)
                .color(0.3, 0.37, 0.776)
                .set("NatronOfxParamProcessA", 0, ParamValue::Bool(true))
                .build(),
        )
        .node(
            NodeSpecBuilder::new("Merge1", "net.sf.openfx.MergePlugin")
                .inputs(3)
                .position(1036.0, 302.0)
                .size(104.0, 51.0)
                .color(0.3, 0.37, 0.776)
                .set("userTextArea", 0, ParamValue::Text(MERGE_LABEL_RICH_TEXT.to_string()))
                .build(),
        )
        .node(
            NodeSpecBuilder::new("Solid1", "net.sf.openfx.Solid")
                .position(1261.0, 187.0)
                .size(80.0, 34.0)
                .color(0.3, 0.5, 0.2)
                .set("size", 0, ParamValue::Double(1920.0))
                .set("size", 1, ParamValue::Double(1080.0))
                .set("color", 0, ParamValue::Double(1.0))
                .set("NatronOfxParamProcessA", 0, ParamValue::Bool(true))
                .build(),
        )
        .node(
            NodeSpecBuilder::new("Shuffle1", "net.sf.openfx.ShufflePlugin")
                .inputs(2)
                .position(764.0, 314.0)
                .size(104.0, 34.0)
                .color(0.6, 0.24, 0.39)
                .set("outputChannelsChoice", 0, ParamValue::Text("RGBA".to_string()))
                .set("outputRChoice", 0, ParamValue::Text("A.r".to_string()))
                .set("outputGChoice", 0, ParamValue::Text("A.g".to_string()))
                .set("outputBChoice", 0, ParamValue::Text("A.b".to_string()))
                .set("outputAChoice", 0, ParamValue::Text("B.a".to_string()))
                .build(),
        )
        .node(
            NodeSpecBuilder::new("Premult1", "net.sf.openfx.Premult")
                .inputs(1)
                .position(584.0, 314.0)
                .size(104.0, 34.0)
                .color(0.3, 0.37, 0.776)
                .set("NatronOfxParamProcessA", 0, ParamValue::Bool(true))
                .build(),
        )
        .node(
            NodeSpecBuilder::new("Input1", "fr.inria.built-in.Input")
                .label("Source")
                .position(764.0, 73.0)
                .size(104.0, 34.0)
                .color(0.3, 0.5, 0.2)
                .build(),
        )
        .node(
            NodeSpecBuilder::new("Output1", "fr.inria.built-in.Output")
                .inputs(1)
                .position(584.0, 442.0)
                .size(104.0, 34.0)
                .color(0.7, 0.7, 0.7)
                .build(),
        )
        .node(
            NodeSpecBuilder::new("Input2", "fr.inria.built-in.Input")
                .label("Mask")
                .position(1227.0, 314.0)
                .size(104.0, 34.0)
                .color(0.3, 0.5, 0.2)
                .set("optional", 0, ParamValue::Bool(true))
                .set("isMask", 0, ParamValue::Bool(true))
                .build(),
        )
        .page("controls", "Controls")
        .user_param(
            UserParamBuilder::new(
                "Solid1color",
                "Color",
                UserParamKind::Color {
                    ranges: vec![DimRange::unbounded(); 3],
                    default: vec![1.0, 0.0, 0.0],
                },
            )
            .build(),
        )
        .user_param(
            UserParamBuilder::new(
                "Merge1operation",
                "Operation",
                UserParamKind::Choice { default: 28 },
            )
            .build(),
        )
        .user_param(
            UserParamBuilder::new(
                "Merge1enableMask_Mask",
                "Mask",
                UserParamKind::Boolean { default: false },
            )
            .same_line()
            .animates(false)
            .build(),
        )
        .user_param(
            UserParamBuilder::new(
                "Merge1maskInvert",
                "Invert Mask",
                UserParamKind::Boolean { default: false },
            )
            .animates(false)
            .build(),
        )
        .user_param(
            UserParamBuilder::new(
                "Merge1mix",
                "Mix",
                UserParamKind::Double {
                    range: DimRange::unit(),
                    default: 1.0,
                },
            )
            .same_line()
            .build(),
        )
        .pages_order(["controls", "Node", "Info"])
        .edge("Dot1", 0, "Input1")
        .edge("Unpremult1", 0, "Dot1")
        .edge("Merge1", 0, "Unpremult1")
        .edge("Merge1", 1, "Solid1")
        .edge("Merge1", 2, "Input2")
        .edge("Shuffle1", 0, "Dot1")
        .edge("Shuffle1", 1, "Merge1")
        .edge("Premult1", 0, "Shuffle1")
        .edge("Output1", 0, "Premult1")
        .alias("Solid1color", "Solid1", "color")
        .alias("Merge1operation", "Merge1", "operation")
        .alias("Merge1enableMask_Mask", "Merge1", "enableMask_Mask")
        .alias("Merge1maskInvert", "Merge1", "maskInvert")
        .alias("Merge1mix", "Merge1", "mix")
        .build()?;

    Ok(GroupPlugin {
        manifest,
        descriptor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_shape_matches_the_plugin() {
        let plugin = fill().unwrap();
        assert_eq!(plugin.manifest.id, FILL_PLUGIN_ID);
        assert_eq!(plugin.manifest.grouping, "Filter");
        assert_eq!(plugin.descriptor.nodes.len(), 9);
        assert_eq!(plugin.descriptor.edges.len(), 9);
        assert_eq!(plugin.descriptor.user_params.len(), 5);
        assert_eq!(plugin.descriptor.aliases.len(), 5);
    }

    #[test]
    fn every_alias_forwards_to_a_registered_builtin_param() {
        let plugin = fill().unwrap();
        for alias in &plugin.descriptor.aliases {
            let node = plugin
                .descriptor
                .nodes
                .iter()
                .find(|n| n.name == alias.node)
                .unwrap();
            let def = crate::registry::lookup(&node.type_id).unwrap();
            assert!(
                def.params.iter().any(|p| p.name == alias.target),
                "alias '{}' targets unknown parameter '{}'",
                alias.param,
                alias.target
            );
        }
    }
}
