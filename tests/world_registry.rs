mod common;

use common::ServerFixture;
use worldhub::world::{ImportRequest, WorldCreationError, WorldEnvironment, WorldManager, WorldRegistry};

#[tokio::test]
async fn empty_registry_when_file_missing() {
    let fx = ServerFixture::new();
    let registry = fx.registry(&[]).await;
    assert_eq!(registry.worlds().count(), 0);
    assert!(fx.data_dir().is_dir(), "open creates the data directory");
    assert!(!fx.registry_file().exists());
}

#[tokio::test]
async fn potential_worlds_only_lists_world_data() {
    let fx = ServerFixture::new();
    fx.add_world_folder("zeta");
    fx.add_world_folder("alpha");
    fx.add_plain_folder("plugins");
    std::fs::write(fx.world_container().join("server.properties"), "motd=hi").unwrap();

    let registry = fx.registry(&[]).await;
    assert_eq!(registry.potential_worlds(), vec!["alpha".to_string(), "zeta".to_string()]);
}

#[tokio::test]
async fn potential_worlds_empty_when_container_missing() {
    let fx = ServerFixture::new();
    let registry = WorldRegistry::open(fx.root.path().join("nowhere"), fx.data_dir(), Vec::new())
        .await
        .unwrap();
    assert!(registry.potential_worlds().is_empty());
}

#[tokio::test]
async fn imported_world_survives_reopen() {
    let fx = ServerFixture::new();
    fx.add_world_folder("gargamel");
    {
        let mut registry = fx.registry(&[]).await;
        let mut request = ImportRequest::new("gargamel", WorldEnvironment::Nether);
        request.adjust_spawn = false;
        let world = registry.add_world(&request).unwrap();
        assert_eq!(world.name, "gargamel");
        assert!(fx.registry_file().is_file());
    }

    let registry = fx.registry(&[]).await;
    let world = registry.get("gargamel").expect("persisted world");
    assert_eq!(world.environment, WorldEnvironment::Nether);
    assert!(!world.adjust_spawn);
    assert_eq!(world.generator, None);
}

#[tokio::test]
async fn managed_lookup_ignores_case() {
    let fx = ServerFixture::new();
    fx.add_world_folder("Creative");
    let mut registry = fx.registry(&[]).await;
    registry
        .add_world(&ImportRequest::new("Creative", WorldEnvironment::Normal))
        .unwrap();

    assert!(registry.is_managed("creative"));
    assert!(registry.is_managed("CREATIVE"));
    assert_eq!(registry.get("creative").map(|w| w.name.as_str()), Some("Creative"));
    assert_eq!(
        registry.add_world(&ImportRequest::new("creative", WorldEnvironment::Normal)),
        Err(WorldCreationError::AlreadyExists("creative".into()))
    );
}

#[tokio::test]
async fn missing_folder_is_refused() {
    let fx = ServerFixture::new();
    let mut registry = fx.registry(&[]).await;
    assert_eq!(
        registry.add_world(&ImportRequest::new("ghost", WorldEnvironment::Normal)),
        Err(WorldCreationError::FolderMissing("ghost".into()))
    );
    assert!(!fx.registry_file().exists());
}

#[tokio::test]
async fn folder_without_level_dat_still_imports() {
    let fx = ServerFixture::new();
    fx.add_plain_folder("blank");
    let mut registry = fx.registry(&[]).await;
    assert!(registry
        .add_world(&ImportRequest::new("blank", WorldEnvironment::TheEnd))
        .is_ok());
    // Still not a candidate: candidates need level.dat.
    assert!(registry.potential_worlds().is_empty());
}

#[tokio::test]
async fn path_traversal_names_are_rejected() {
    let fx = ServerFixture::new();
    fx.add_world_folder("inner");
    let mut registry = fx.registry(&[]).await;
    for name in ["../inner", "a/b", "", "con"] {
        let err = registry
            .add_world(&ImportRequest::new(name, WorldEnvironment::Normal))
            .unwrap_err();
        assert!(
            matches!(err, WorldCreationError::InvalidName { .. }),
            "{:?} gave {:?}",
            name,
            err
        );
    }
    assert_eq!(registry.worlds().count(), 0);
}

#[tokio::test]
async fn generator_must_be_installed() {
    let fx = ServerFixture::new();
    fx.add_world_folder("space");
    let mut registry = fx.registry(&["CleanroomGenerator"]).await;

    let mut request = ImportRequest::new("space", WorldEnvironment::Normal);
    request.generator = Some("cleanroomgenerator".into());
    assert_eq!(
        registry.add_world(&request),
        Err(WorldCreationError::GeneratorNotFound("cleanroomgenerator".into()))
    );

    request.generator = Some(":id".into());
    assert_eq!(
        registry.add_world(&request),
        Err(WorldCreationError::InvalidGenerator(":id".into()))
    );

    request.generator = Some("CleanroomGenerator:.".into());
    let world = registry.add_world(&request).unwrap();
    assert_eq!(world.generator.as_deref(), Some("CleanroomGenerator:."));
}

#[tokio::test]
async fn corrupt_registry_file_is_an_error() {
    let fx = ServerFixture::new();
    std::fs::create_dir_all(fx.data_dir()).unwrap();
    std::fs::write(fx.registry_file(), "{not json").unwrap();
    let result = WorldRegistry::open(fx.world_container(), fx.data_dir(), Vec::new()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn blank_registry_file_is_empty() {
    let fx = ServerFixture::new();
    std::fs::create_dir_all(fx.data_dir()).unwrap();
    std::fs::write(fx.registry_file(), "\n").unwrap();
    let registry = fx.registry(&[]).await;
    assert_eq!(registry.worlds().count(), 0);
}

#[tokio::test]
async fn concurrent_registries_keep_each_others_imports() {
    let fx = ServerFixture::new();
    fx.add_world_folder("a");
    fx.add_world_folder("b");
    let mut first = fx.registry(&[]).await;
    let mut second = fx.registry(&[]).await;

    first.add_world(&ImportRequest::new("a", WorldEnvironment::Normal)).unwrap();
    second.add_world(&ImportRequest::new("b", WorldEnvironment::Nether)).unwrap();
    assert!(second.is_managed("a"), "import picks up worlds saved by others");

    let reopened = fx.registry(&[]).await;
    assert!(reopened.is_managed("a"));
    assert!(reopened.is_managed("b"));
}

#[tokio::test]
async fn import_seen_by_stale_registry_is_refused() {
    let fx = ServerFixture::new();
    fx.add_world_folder("shared");
    let mut first = fx.registry(&[]).await;
    let mut second = fx.registry(&[]).await;

    first
        .add_world(&ImportRequest::new("shared", WorldEnvironment::Normal))
        .unwrap();
    assert_eq!(
        second.add_world(&ImportRequest::new("shared", WorldEnvironment::TheEnd)),
        Err(WorldCreationError::AlreadyExists("shared".into()))
    );
    let reopened = fx.registry(&[]).await;
    assert_eq!(reopened.get("shared").map(|w| w.environment), Some(WorldEnvironment::Normal));
}

#[tokio::test]
async fn names_differing_only_in_case_are_not_dropped() {
    let fx = ServerFixture::new();
    fx.add_world_folder("World");
    let mut registry = fx.registry(&[]).await;
    registry
        .add_world(&ImportRequest::new("World", WorldEnvironment::Normal))
        .unwrap();
    drop(registry);

    // Hand-edit the file into a second entry that only differs in case.
    let content = std::fs::read_to_string(fx.registry_file()).unwrap();
    let mut json: serde_json::Value = serde_json::from_str(&content).unwrap();
    let worlds = json["worlds"].as_array_mut().unwrap();
    let mut twin = worlds[0].clone();
    twin["name"] = serde_json::Value::String("world".into());
    worlds.push(twin);
    let edited = serde_json::to_string_pretty(&json).unwrap();
    std::fs::write(fx.registry_file(), &edited).unwrap();

    let err = WorldRegistry::open(fx.world_container(), fx.data_dir(), Vec::new())
        .await
        .err()
        .expect("case collision must be reported");
    assert!(err.to_string().contains("differ only in case"), "{}", err);
    assert_eq!(std::fs::read_to_string(fx.registry_file()).unwrap(), edited);
}

#[tokio::test]
async fn failed_save_rolls_back() {
    let fx = ServerFixture::new();
    fx.add_world_folder("gargamel");
    let mut registry = fx.registry(&[]).await;

    // A directory where the registry file should be makes the import fail.
    std::fs::create_dir_all(fx.registry_file()).unwrap();
    let err = registry
        .add_world(&ImportRequest::new("gargamel", WorldEnvironment::Normal))
        .unwrap_err();
    assert!(matches!(err, WorldCreationError::Persist { .. }), "{:?}", err);
    assert!(!registry.is_managed("gargamel"));
    assert!(registry.get("gargamel").is_none());

    std::fs::remove_dir(fx.registry_file()).unwrap();
    registry
        .add_world(&ImportRequest::new("gargamel", WorldEnvironment::Normal))
        .unwrap();
    assert!(registry.is_managed("gargamel"));
}
