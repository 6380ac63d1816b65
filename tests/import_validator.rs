mod common;

use common::ServerFixture;
use worldhub::world::{
    ImportArgs, ImportOutcome, ImportRequest, ImportValidator, WorldCreationError, WorldEnvironment, WorldManager,
};

#[tokio::test]
async fn import_gargamel_normal() {
    let fx = ServerFixture::new();
    fx.add_world_folder("gargamel");
    let mut registry = fx.registry(&[]).await;
    let validator = ImportValidator::new(fx.world_container());

    let outcome = validator.evaluate(&registry, &ImportArgs::new("gargamel").environment("normal"));
    let ImportOutcome::ReadyToImport(request) = outcome else {
        panic!("expected ReadyToImport, got {:?}", outcome);
    };
    assert_eq!(request, ImportRequest::new("gargamel", WorldEnvironment::Normal));

    match validator.complete(&mut registry, &request) {
        ImportOutcome::ImportSucceeded(world) => assert_eq!(world.name, "gargamel"),
        other => panic!("expected ImportSucceeded, got {:?}", other),
    }
    assert!(registry.is_managed("gargamel"));
}

#[tokio::test]
async fn import_name_with_space_and_no_spawn_adjust() {
    let fx = ServerFixture::new();
    fx.add_world_folder("hell world");
    let registry = fx.registry(&[]).await;
    let validator = ImportValidator::new(fx.world_container());

    let args = ImportArgs::new("hell world").environment("nether").no_spawn_adjust();
    assert_eq!(
        validator.evaluate(&registry, &args),
        ImportOutcome::ReadyToImport(ImportRequest {
            world_name: "hell world".into(),
            environment: WorldEnvironment::Nether,
            generator: None,
            adjust_spawn: false,
        })
    );
}

#[tokio::test]
async fn generator_value_passes_through_unchanged() {
    let fx = ServerFixture::new();
    fx.add_world_folder("space");
    let registry = fx.registry(&["CleanroomGenerator"]).await;
    let validator = ImportValidator::new(fx.world_container());

    let args = ImportArgs::new("space").environment("normal").generator("CleanroomGenerator:.");
    match validator.evaluate(&registry, &args) {
        ImportOutcome::ReadyToImport(request) => {
            assert_eq!(request.generator.as_deref(), Some("CleanroomGenerator:."));
            assert!(request.adjust_spawn);
        }
        other => panic!("expected ReadyToImport, got {:?}", other),
    }
}

#[tokio::test]
async fn list_excludes_managed_worlds() {
    let fx = ServerFixture::new();
    for name in ["world", "creative", "old_map"] {
        fx.add_world_folder(name);
    }
    let mut registry = fx.registry(&[]).await;
    registry
        .add_world(&ImportRequest::new("world", WorldEnvironment::Normal))
        .unwrap();
    let validator = ImportValidator::new(fx.world_container());

    assert_eq!(
        validator.evaluate(&registry, &ImportArgs::new("--list")),
        ImportOutcome::ListCandidates(vec!["creative".into(), "old_map".into()])
    );
}

#[tokio::test]
async fn list_with_no_candidates_is_empty() {
    let fx = ServerFixture::new();
    let registry = fx.registry(&[]).await;
    let validator = ImportValidator::new(fx.world_container());
    assert_eq!(
        validator.evaluate(&registry, &ImportArgs::new("-l")),
        ImportOutcome::ListCandidates(Vec::new())
    );
}

#[tokio::test]
async fn already_managed_name_ignores_case_and_environment() {
    let fx = ServerFixture::new();
    fx.add_world_folder("world");
    let mut registry = fx.registry(&[]).await;
    registry
        .add_world(&ImportRequest::new("world", WorldEnvironment::Normal))
        .unwrap();
    let validator = ImportValidator::new(fx.world_container());

    assert_eq!(
        validator.evaluate(&registry, &ImportArgs::new("WORLD").environment("bogus")),
        ImportOutcome::AlreadyManaged("WORLD".into())
    );
}

#[tokio::test]
async fn environment_aliases_are_accepted() {
    let fx = ServerFixture::new();
    fx.add_world_folder("fire");
    let registry = fx.registry(&[]).await;
    let validator = ImportValidator::new(fx.world_container());

    for (token, expected) in [
        ("HELL", WorldEnvironment::Nether),
        ("the_end", WorldEnvironment::TheEnd),
        ("Starfield", WorldEnvironment::TheEnd),
        ("NORMAL", WorldEnvironment::Normal),
    ] {
        match validator.evaluate(&registry, &ImportArgs::new("fire").environment(token)) {
            ImportOutcome::ReadyToImport(request) => assert_eq!(request.environment, expected, "{}", token),
            other => panic!("{}: expected ReadyToImport, got {:?}", token, other),
        }
    }
}

#[tokio::test]
async fn missing_folder_suggests_candidates() {
    let fx = ServerFixture::new();
    fx.add_world_folder("survival");
    let registry = fx.registry(&[]).await;
    let validator = ImportValidator::new(fx.world_container());

    assert_eq!(
        validator.evaluate(&registry, &ImportArgs::new("survivl").environment("normal")),
        ImportOutcome::NonExistentFolder(vec!["survival".into()])
    );
}

#[tokio::test]
async fn uninstalled_generator_fails_at_registration() {
    let fx = ServerFixture::new();
    fx.add_world_folder("space");
    let mut registry = fx.registry(&[]).await;
    let validator = ImportValidator::new(fx.world_container());

    let args = ImportArgs::new("space").environment("normal").generator("Terra");
    let ImportOutcome::ReadyToImport(request) = validator.evaluate(&registry, &args) else {
        panic!("generator is not checked during evaluation");
    };
    assert_eq!(
        validator.complete(&mut registry, &request),
        ImportOutcome::ImportFailed(WorldCreationError::GeneratorNotFound("Terra".into()))
    );
    assert!(!registry.is_managed("space"));
}

#[tokio::test]
async fn evaluate_does_not_mutate_registry() {
    let fx = ServerFixture::new();
    fx.add_world_folder("gargamel");
    let registry = fx.registry(&[]).await;
    let validator = ImportValidator::new(fx.world_container());

    let _ = validator.evaluate(&registry, &ImportArgs::new("gargamel").environment("normal"));
    assert!(!registry.is_managed("gargamel"));
    assert!(!fx.registry_file().exists());
}

#[tokio::test]
async fn absolute_name_never_leaves_the_container() {
    let fx = ServerFixture::new();
    fx.add_world_folder("survival");
    let elsewhere = tempfile::tempdir().unwrap();
    std::fs::write(elsewhere.path().join("level.dat"), b"\x0a\x00\x00").unwrap();
    let registry = fx.registry(&[]).await;
    let validator = ImportValidator::new(fx.world_container());

    let name = elsewhere.path().to_string_lossy().into_owned();
    assert_eq!(
        validator.evaluate(&registry, &ImportArgs::new(name).environment("normal")),
        ImportOutcome::NonExistentFolder(vec!["survival".into()])
    );
    assert_eq!(
        validator.evaluate(&registry, &ImportArgs::new("../worlds/survival").environment("normal")),
        ImportOutcome::NonExistentFolder(vec!["survival".into()])
    );
}

#[tokio::test]
async fn empty_name_is_usage_error() {
    let fx = ServerFixture::new();
    let registry = fx.registry(&[]).await;
    let validator = ImportValidator::new(fx.world_container());
    assert_eq!(
        validator.evaluate(&registry, &ImportArgs::new("").environment("normal")),
        ImportOutcome::UsageError
    );
}
