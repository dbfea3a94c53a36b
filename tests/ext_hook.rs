use plugroup::{NodeId, PlugroupError, PlugroupResult, Scene};

#[test]
fn hook_runs_once_after_all_wiring() {
    let plugin = plugroup::fill::fill().unwrap();
    let mut scene = Scene::new();
    let root = scene.root();

    let mut calls = 0u32;
    let mut seen_group = None;
    let mut hook = |app: &mut Scene, group: NodeId| -> PlugroupResult<()> {
        calls += 1;
        seen_group = Some(group);

        // The base graph must be complete before the hook runs.
        assert_eq!(app.children(group).count(), 9);
        let output = app.child_by_name(group, "Output1").unwrap();
        assert!(output.input(0).is_some());
        let color = app.get(group).unwrap().param("Solid1color").unwrap();
        assert!(color.alias_of.is_some());
        Ok(())
    };

    plugin
        .instantiate(&mut scene, root, Some(&mut hook))
        .unwrap();

    assert_eq!(calls, 1);
    assert_eq!(seen_group, Some(root));
}

#[test]
fn hook_may_extend_the_group() {
    let plugin = plugroup::fill::fill().unwrap();
    let mut scene = Scene::new();
    let root = scene.root();

    let mut hook = |app: &mut Scene, group: NodeId| -> PlugroupResult<()> {
        use plugroup::HostApp as _;
        let dot = app.create_node("fr.inria.built-in.Dot", 1, group)?;
        app.set_script_name(dot, "ExtDot1")?;
        Ok(())
    };

    plugin
        .instantiate(&mut scene, root, Some(&mut hook))
        .unwrap();

    assert_eq!(scene.children(root).count(), 10);
    assert!(scene.child_by_name(root, "ExtDot1").is_some());
}

#[test]
fn hook_error_fails_instantiation() {
    let plugin = plugroup::fill::fill().unwrap();
    let mut scene = Scene::new();
    let root = scene.root();

    let mut hook = |_app: &mut Scene, _group: NodeId| -> PlugroupResult<()> {
        Err(PlugroupError::validation("extension refused"))
    };

    let err = plugin
        .instantiate(&mut scene, root, Some(&mut hook))
        .unwrap_err();
    assert!(err.to_string().contains("extension refused"));
}

#[test]
fn absent_hook_is_not_an_error() {
    let plugin = plugroup::fill::fill().unwrap();
    let mut scene = Scene::new();
    let root = scene.root();
    plugin.instantiate(&mut scene, root, None).unwrap();
    assert_eq!(scene.children(root).count(), 9);
}
