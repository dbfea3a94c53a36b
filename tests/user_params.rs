use plugroup::{HostApp, NodeId, ParamValue, Scene, model::ParamKind};

fn build_fill() -> (Scene, NodeId) {
    let plugin = plugroup::fill::fill().unwrap();
    let mut scene = Scene::new();
    let root = scene.root();
    plugin.instantiate(&mut scene, root, None).unwrap();
    (scene, root)
}

#[test]
fn group_exposes_exactly_the_declared_controls() {
    let (scene, root) = build_fill();
    let group = scene.get(root).unwrap();

    let names: Vec<&str> = group.user_params().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Solid1color",
            "Merge1operation",
            "Merge1enableMask_Mask",
            "Merge1maskInvert",
            "Merge1mix",
        ]
    );

    let color = group.param("Solid1color").unwrap();
    assert_eq!(color.kind, ParamKind::Color);
    assert_eq!(
        color.values,
        vec![
            ParamValue::Double(1.0),
            ParamValue::Double(0.0),
            ParamValue::Double(0.0)
        ]
    );
    assert_eq!(color.ranges.len(), 3);
    for range in &color.ranges {
        assert_eq!(range.display_min, 0.0);
        assert_eq!(range.display_max, 1.0);
    }

    let operation = group.param("Merge1operation").unwrap();
    assert_eq!(operation.kind, ParamKind::Choice);
    assert_eq!(operation.values, vec![ParamValue::Int(28)]);

    let mix = group.param("Merge1mix").unwrap();
    assert_eq!(mix.kind, ParamKind::Double);
    assert_eq!(mix.values, vec![ParamValue::Double(1.0)]);
    assert_eq!(mix.ranges[0].min, 0.0);
    assert_eq!(mix.ranges[0].max, 1.0);

    for name in ["Merge1enableMask_Mask", "Merge1maskInvert"] {
        let param = group.param(name).unwrap();
        assert_eq!(param.kind, ParamKind::Boolean, "{name}");
        assert_eq!(param.values, vec![ParamValue::Bool(false)], "{name}");
    }
}

#[test]
fn layout_and_animation_flags_match_the_declaration() {
    let (scene, root) = build_fill();
    let group = scene.get(root).unwrap();

    let expected = [
        ("Solid1color", true, true),
        ("Merge1operation", true, true),
        ("Merge1enableMask_Mask", false, false),
        ("Merge1maskInvert", true, false),
        ("Merge1mix", false, true),
    ];
    for (name, add_new_line, animates) in expected {
        let param = group.param(name).unwrap();
        assert_eq!(param.add_new_line, add_new_line, "{name} layout");
        assert_eq!(param.animates, animates, "{name} animation");
        assert_eq!(param.page.as_deref(), Some("controls"), "{name} page");
    }
}

#[test]
fn pages_are_created_and_ordered() {
    let (scene, root) = build_fill();
    let group = scene.get(root).unwrap();

    assert_eq!(group.pages.len(), 1);
    assert_eq!(group.pages[0].name, "controls");
    assert_eq!(group.pages[0].label, "Controls");
    assert_eq!(group.pages_order, vec!["controls", "Node", "Info"]);
}

#[test]
fn every_control_is_aliased_to_its_internal_parameter() {
    let (scene, root) = build_fill();
    let group = scene.get(root).unwrap();

    let mut bindings: Vec<(String, String, String)> = group
        .user_params()
        .map(|p| {
            let target = p.alias_of.expect("unaliased group parameter");
            let node = scene.get(target.node).unwrap();
            (
                p.name.clone(),
                node.script_name.clone(),
                node.params[target.slot].name.clone(),
            )
        })
        .collect();
    bindings.sort();

    let mut expected: Vec<(String, String, String)> = [
        ("Solid1color", "Solid1", "color"),
        ("Merge1operation", "Merge1", "operation"),
        ("Merge1enableMask_Mask", "Merge1", "enableMask_Mask"),
        ("Merge1maskInvert", "Merge1", "maskInvert"),
        ("Merge1mix", "Merge1", "mix"),
    ]
    .into_iter()
    .map(|(a, b, c)| (a.to_string(), b.to_string(), c.to_string()))
    .collect();
    expected.sort();

    assert_eq!(bindings, expected);
}

#[test]
fn editing_the_group_color_edits_the_solid_color() {
    let (mut scene, root) = build_fill();

    let group_color = scene.find_param(root, "Solid1color").unwrap();
    scene
        .set_param_value(group_color, 1, &ParamValue::Double(0.5))
        .unwrap();

    let solid = scene.child_by_name(root, "Solid1").unwrap();
    assert_eq!(
        solid.param("color").unwrap().values,
        vec![
            ParamValue::Double(1.0),
            ParamValue::Double(0.5),
            ParamValue::Double(0.0)
        ]
    );
}

#[test]
fn editing_the_group_mix_and_operation_edits_the_merge() {
    let (mut scene, root) = build_fill();

    let mix = scene.find_param(root, "Merge1mix").unwrap();
    scene.set_param_value(mix, 0, &ParamValue::Double(0.25)).unwrap();

    let operation = scene.find_param(root, "Merge1operation").unwrap();
    scene.set_param_value(operation, 0, &ParamValue::Int(3)).unwrap();

    let merge = scene.child_by_name(root, "Merge1").unwrap();
    assert_eq!(
        merge.param("mix").unwrap().values,
        vec![ParamValue::Double(0.25)]
    );
    assert_eq!(
        merge.param("operation").unwrap().values,
        vec![ParamValue::Int(3)]
    );
}
