use plugroup::{GroupDescriptor, HostApp, ParamValue, Scene, create_instance};

#[test]
fn json_fixture_validates() {
    let s = include_str!("data/custom_group.json");
    let desc: GroupDescriptor = serde_json::from_str(s).unwrap();
    desc.validate().unwrap();
}

#[test]
fn json_fixture_instantiates() {
    let s = include_str!("data/custom_group.json");
    let desc: GroupDescriptor = serde_json::from_str(s).unwrap();

    let mut scene = Scene::new();
    let root = scene.root();
    create_instance(&mut scene, root, &desc, None).unwrap();

    assert_eq!(scene.children(root).count(), 4);

    let solid = scene.child_by_name(root, "Solid1").unwrap();
    assert_eq!(
        solid.param("color").unwrap().values[0],
        ParamValue::Double(0.25)
    );

    // The aliased mix control drives the merge node.
    let mix = scene.find_param(root, "Merge1mix").unwrap();
    scene.set_param_value(mix, 0, &ParamValue::Double(0.5)).unwrap();
    let merge = scene.child_by_name(root, "Merge1").unwrap();
    assert_eq!(
        merge.param("mix").unwrap().values,
        vec![ParamValue::Double(0.5)]
    );
}

#[test]
fn descriptor_roundtrips_through_json() {
    let plugin = plugroup::fill::fill().unwrap();
    let encoded = serde_json::to_string_pretty(&plugin.descriptor).unwrap();
    let decoded: GroupDescriptor = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, plugin.descriptor);
}
