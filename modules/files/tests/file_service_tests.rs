#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for the file service over in-memory sqlite and a
//! temporary filesystem object store.

use std::sync::Arc;

use bytes::Bytes;
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

use propdesk_auth::AuthUser;
use propdesk_files::domain::model::FileQuery;
use propdesk_files::{FileError, FileService, FilesMigrator, FsObjectStore, SeaOrmFileRepository};

async fn service(dir: &tempfile::TempDir) -> FileService<SeaOrmFileRepository> {
    // One connection: every pooled connection to sqlite::memory: would
    // otherwise see its own empty database.
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);
    let db = Database::connect(options).await.expect("connect");
    FilesMigrator::up(&db, None).await.expect("migrate");
    FileService::new(
        Arc::new(SeaOrmFileRepository::new(db)),
        Arc::new(FsObjectStore::new(dir.path(), "http://localhost:8080/files")),
    )
}

fn user(name: &str) -> AuthUser {
    AuthUser {
        subject: name.to_owned(),
        role: "agent".to_owned(),
    }
}

#[tokio::test]
async fn upload_list_get_delete_flow() {
    let dir = tempfile::tempdir().expect("tempdir");
    let svc = service(&dir).await;
    let ops = user("ops");

    let record = svc
        .upload(&ops, "brochure.pdf", "application/pdf", Bytes::from_static(b"%PDF-"))
        .await
        .expect("upload");
    assert_eq!(record.uploaded_by, "ops");
    assert!(record.url.ends_with("brochure.pdf"));
    assert!(dir.path().join(&record.storage_key).exists());

    let page = svc.list(FileQuery::default()).await.expect("list");
    assert_eq!(page.pagination.total, 1);

    let fetched = svc.get(record.id).await.expect("get");
    assert_eq!(fetched, record);

    svc.delete(&ops, record.id).await.expect("delete");
    assert!(!dir.path().join(&record.storage_key).exists());
    assert!(matches!(
        svc.get(record.id).await.expect_err("gone"),
        FileError::NotFound(_)
    ));
}

#[tokio::test]
async fn only_the_uploader_may_delete() {
    let dir = tempfile::tempdir().expect("tempdir");
    let svc = service(&dir).await;

    let record = svc
        .upload(
            &user("ops"),
            "plan.png",
            "image/png",
            Bytes::from_static(b"png"),
        )
        .await
        .expect("upload");

    let err = svc
        .delete(&user("intruder"), record.id)
        .await
        .expect_err("non-owner delete");
    assert!(matches!(err, FileError::Forbidden(_)));

    // The file is untouched.
    assert!(svc.get(record.id).await.is_ok());
}

#[tokio::test]
async fn listing_filters_by_uploader() {
    let dir = tempfile::tempdir().expect("tempdir");
    let svc = service(&dir).await;

    for (who, name) in [("alice", "a.txt"), ("alice", "b.txt"), ("bob", "c.txt")] {
        svc.upload(&user(who), name, "text/plain", Bytes::from_static(b"x"))
            .await
            .expect("upload");
    }

    let alice_files = svc
        .list(FileQuery {
            uploaded_by: Some("alice".to_owned()),
            ..FileQuery::default()
        })
        .await
        .expect("list");
    assert_eq!(alice_files.pagination.total, 2);
    assert!(alice_files.records.iter().all(|f| f.uploaded_by == "alice"));
}

#[tokio::test]
async fn empty_uploads_are_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let svc = service(&dir).await;

    let err = svc
        .upload(&user("ops"), "empty.bin", "application/octet-stream", Bytes::new())
        .await
        .expect_err("empty file");
    assert!(matches!(err, FileError::Validation { .. }));

    let err = svc
        .delete(&user("ops"), Uuid::now_v7())
        .await
        .expect_err("unknown id");
    assert!(matches!(err, FileError::NotFound(_)));
}
