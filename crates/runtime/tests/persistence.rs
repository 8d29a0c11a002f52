use std::path::Path;
use std::sync::Arc;

use game_content::ContentFactory;
use game_core::{ActionRequest, CombatStatus, ErrorKind, GameError};
use runtime::{
    CombatRecord, CombatRepository, CombatService, Encounter, FileCombatRepository,
    InMemoryRewardSink, RepositoryError, RuntimeConfig,
};

fn data_dir() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

fn service_over(store: &Path) -> CombatService {
    let bundle = ContentFactory::new(data_dir())
        .load_bundle()
        .expect("shipped content should load");
    let config = RuntimeConfig {
        fixed_seed: Some(11),
        store_dir: Some(store.to_path_buf()),
        ..RuntimeConfig::new(bundle.config.clone())
    };

    CombatService::builder()
        .config(config)
        .content(&bundle)
        .rewards(Arc::new(InMemoryRewardSink::new()))
        .build()
        .expect("service should build")
}

#[tokio::test]
async fn combats_survive_a_restart() {
    let store = tempfile::tempdir().unwrap();

    let id = {
        let service = service_over(store.path());
        let Encounter::Created(view) = service.create_encounter("alice", "char-ayla").await.unwrap()
        else {
            panic!("expected a new combat");
        };
        service
            .submit_action(view.id, "alice", ActionRequest::Wait)
            .await
            .unwrap();
        view.id
    };

    let restarted = service_over(store.path());
    let view = restarted.get_combat(id, "alice").await.unwrap();
    assert_eq!(view.status, CombatStatus::Active);
    assert_eq!(view.round, 2);

    match restarted.create_encounter("alice", "char-ayla").await.unwrap() {
        Encounter::Existing(existing) => assert_eq!(existing.id, id),
        other => panic!("expected the stored combat, got {other:?}"),
    }
}

#[tokio::test]
async fn file_repository_checks_versions() {
    let store = tempfile::tempdir().unwrap();
    let service = service_over(store.path());
    let Encounter::Created(view) = service.create_encounter("bob", "char-borin").await.unwrap()
    else {
        panic!("expected a new combat");
    };

    let repository = FileCombatRepository::new(store.path()).unwrap();
    let stored: CombatRecord = repository.load(view.id).unwrap().unwrap();
    assert_eq!(stored.version, 0);
    assert_eq!(stored.owner, "bob");

    assert_eq!(repository.update(&stored).unwrap(), 1);
    let error = repository.update(&stored).unwrap_err();
    assert!(matches!(error, RepositoryError::VersionConflict { .. }));
    assert_eq!(error.kind(), ErrorKind::Conflict);

    let duplicate = repository.create(&stored).unwrap_err();
    assert!(matches!(duplicate, RepositoryError::AlreadyExists(_)));
    assert_eq!(repository.list_ids().unwrap(), vec![view.id]);
}
