use flow::{DirectoryFlow, Flow, FlowError, NameDecorator, RefDecorator, TimestampNameDecorator, TokenDecorator,
           MANIFEST_FILE};

#[tokio::test]
async fn writes_one_file_per_reference() {
  let dir = tempfile::tempdir().unwrap();
  let flow = DirectoryFlow::create(dir.path(), "txt").await.unwrap();
  let r = flow.set("contenido".into(), &[]).await.unwrap();

  // {YYYYMMDDTHHMMSS}-{mmm}-{id}.txt
  let name = r.location();
  assert!(name.ends_with(&format!("-{}.txt", r.id())), "nombre inesperado: {}", name);
  assert_eq!(&name[8..9], "T");
  assert_eq!(&name[15..16], "-");

  let on_disk = std::fs::read_to_string(dir.path().join(name)).unwrap();
  assert_eq!(on_disk, "contenido");
  assert_eq!(flow.get(&r).await.as_deref(), Some("contenido"));
  assert_eq!(flow.path_of(&r).unwrap(), dir.path().join(name));
}

#[tokio::test]
async fn token_names_file_with_timestamp_decorator() {
  let dir = tempfile::tempdir().unwrap();
  let flow = DirectoryFlow::create(dir.path(), "txt").await.unwrap();
  let decorators = vec![TokenDecorator::new("diff").boxed(), TimestampNameDecorator::new("patch").boxed()];
  let r = flow.set("+line".into(), &decorators).await.unwrap();
  assert!(r.location().ends_with("-diff.patch"));
  assert_eq!(flow.token("diff").as_deref(), Some("+line"));
}

#[tokio::test]
async fn deleted_file_is_a_soft_miss() {
  let dir = tempfile::tempdir().unwrap();
  let flow = DirectoryFlow::create(dir.path(), "txt").await.unwrap();
  let r = flow.set("bye".into(), &[TokenDecorator::new("gone").boxed()]).await.unwrap();
  std::fs::remove_file(dir.path().join(r.location())).unwrap();
  assert!(flow.get(&r).await.is_none());
  assert!(flow.token("gone").is_none());
  // el índice sigue apuntando a la referencia
  assert_eq!(flow.token_ref("gone").unwrap().id(), r.id());
}

#[tokio::test]
async fn nested_locations_create_directories() {
  let dir = tempfile::tempdir().unwrap();
  let flow = DirectoryFlow::create(dir.path(), "txt").await.unwrap();
  let r = flow.set("x".into(), &[NameDecorator::new("reviews/today/out.md").boxed()]).await.unwrap();
  assert!(dir.path().join("reviews/today/out.md").is_file());
  assert_eq!(flow.get(&r).await.as_deref(), Some("x"));
}

#[tokio::test]
async fn escaping_locations_are_rejected() {
  let dir = tempfile::tempdir().unwrap();
  let flow = DirectoryFlow::create(dir.path().join("root"), "txt").await.unwrap();
  for bad in ["../outside.txt", "/etc/passwd", "", "."] {
    let err = flow.set("x".into(), &[NameDecorator::new(bad).boxed()]).await.unwrap_err();
    assert!(matches!(err, FlowError::Validation(_)), "{} -> {:?}", bad, err);
  }
  assert!(flow.is_empty());
  assert!(!dir.path().join("outside.txt").exists());
}

#[tokio::test]
async fn existing_file_is_never_overwritten() {
  let dir = tempfile::tempdir().unwrap();
  let flow = DirectoryFlow::create(dir.path(), "txt").await.unwrap();
  flow.set("first".into(), &[NameDecorator::new("same.txt").boxed()]).await.unwrap();
  let err = flow.set("second".into(), &[NameDecorator::new("same.txt").boxed()]).await.unwrap_err();
  assert!(matches!(err, FlowError::LocationInUse(_)));
  assert_eq!(std::fs::read_to_string(dir.path().join("same.txt")).unwrap(), "first");

  let err = flow.set("x".into(), &[NameDecorator::new(MANIFEST_FILE).boxed()]).await.unwrap_err();
  assert!(matches!(err, FlowError::LocationInUse(_)));
}

#[tokio::test]
async fn no_temporary_files_left_behind() {
  let dir = tempfile::tempdir().unwrap();
  let flow = DirectoryFlow::create(dir.path(), "txt").await.unwrap();
  for i in 0..3 {
    flow.set(format!("v{}", i), &[]).await.unwrap();
  }
  let leftovers: Vec<_> = std::fs::read_dir(dir.path()).unwrap()
                                                       .filter_map(|e| e.ok())
                                                       .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
                                                       .collect();
  assert!(leftovers.is_empty());
}

#[tokio::test]
async fn reopen_rebuilds_index_from_manifest() {
  let dir = tempfile::tempdir().unwrap();
  let (first, second) = {
    let flow = DirectoryFlow::create(dir.path(), "txt").await.unwrap();
    let a = flow.set("v1".into(), &[TokenDecorator::new("x").boxed()]).await.unwrap();
    let b = flow.set("v2".into(), &[TokenDecorator::new("x").boxed()]).await.unwrap();
    (a, b)
  };
  // línea corrupta: se ignora
  let manifest = dir.path().join(MANIFEST_FILE);
  let mut text = std::fs::read_to_string(&manifest).unwrap();
  text.push_str("{not json}\n");
  std::fs::write(&manifest, text).unwrap();

  let reopened = DirectoryFlow::open(dir.path(), "txt").await.unwrap();
  assert_eq!(reopened.len(), 2);
  assert_eq!(reopened.token("x").as_deref(), Some("v2"));
  assert_eq!(reopened.token_ref("x").unwrap().id(), second.id());
  let old = reopened.resolve(&first.id()).unwrap();
  assert_eq!(reopened.get(&old).await.as_deref(), Some("v1"));
}

#[tokio::test]
async fn open_without_manifest_is_empty() {
  let dir = tempfile::tempdir().unwrap();
  let flow = DirectoryFlow::open(dir.path().join("fresh"), "log").await.unwrap();
  assert!(flow.is_empty());
  assert_eq!(flow.extension(), "log");
  assert!(flow.root().is_dir());
}

#[tokio::test]
async fn failed_manifest_append_leaves_no_file() {
  let dir = tempfile::tempdir().unwrap();
  let flow = DirectoryFlow::create(dir.path(), "txt").await.unwrap();
  // un directorio en lugar del manifiesto hace fallar el append
  std::fs::create_dir(dir.path().join("refs.jsonl")).unwrap();

  let err = flow.set("payload".into(), &[NameDecorator::new("out.txt").boxed()]).await.unwrap_err();
  assert!(matches!(err, FlowError::Storage { .. }), "{:?}", err);
  assert!(!dir.path().join("out.txt").exists());
  assert!(flow.is_empty());

  std::fs::remove_dir(dir.path().join("refs.jsonl")).unwrap();
  let reference = flow.set("payload".into(), &[NameDecorator::new("out.txt").boxed()]).await.unwrap();
  assert_eq!(flow.get(&reference).await.as_deref(), Some("payload"));
}
