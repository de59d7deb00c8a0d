mod common;

use common::{mixed_art, BoxedError};
use frame_art_runner::{ArtController, ArtError};
use frame_art_sdk::{
    sdk_test::{ArtCall, ArtOperation, MockArtClient},
    ArtItem, ServiceError, UploadOptions,
};
use std::sync::Arc;

fn controller(tv: &Arc<MockArtClient>) -> ArtController {
    ArtController::new(tv.clone())
}

#[tokio::test]
async fn clean_old_art_deletes_only_script_owned_entries() -> Result<(), BoxedError> {
    let tv = Arc::new(MockArtClient::with_items(mixed_art()));

    let deleted = controller(&tv).clean_old_art().await?;

    assert_eq!(deleted, 2);
    assert_eq!(tv.deleted(), vec!["MY001", "MY002"]);
    let remaining: Vec<String> = tv.items().into_iter().map(|item| item.content_id).collect();
    assert_eq!(remaining, vec!["SAM-S0700", "USER-photo"]);
    Ok(())
}

#[tokio::test]
async fn clean_old_art_continues_after_a_failed_delete() -> Result<(), BoxedError> {
    let tv = Arc::new(MockArtClient::with_items(mixed_art()));
    tv.fail_next(ArtOperation::Delete, ServiceError::Device("busy".to_string()));

    let deleted = controller(&tv).clean_old_art().await?;

    assert_eq!(deleted, 1);
    assert_eq!(tv.deleted(), vec!["MY001", "MY002"]);
    assert!(tv.items().iter().any(|item| item.content_id == "MY001"));
    Ok(())
}

#[tokio::test]
async fn clean_old_art_aborts_when_listing_fails() {
    let tv = Arc::new(MockArtClient::with_items(mixed_art()));
    tv.fail_next(
        ArtOperation::Available,
        ServiceError::Timeout("get_content_list".to_string()),
    );

    let result = controller(&tv).clean_old_art().await;

    assert!(matches!(
        result,
        Err(ArtError::Service(ServiceError::Timeout(_)))
    ));
    assert!(tv.deleted().is_empty());
}

#[tokio::test]
async fn clean_old_art_with_nothing_to_delete() -> Result<(), BoxedError> {
    let tv = Arc::new(MockArtClient::with_items([ArtItem::new("SAM-S0700")]));

    assert_eq!(controller(&tv).clean_old_art().await?, 0);
    assert_eq!(tv.calls(), vec![ArtCall::Available]);
    Ok(())
}

#[tokio::test]
async fn set_latest_art_selects_greatest_script_owned_id() -> Result<(), BoxedError> {
    let tv = Arc::new(MockArtClient::with_items(mixed_art()));

    let selected = controller(&tv).set_latest_art().await?;

    assert_eq!(selected.as_deref(), Some("MY002"));
    assert_eq!(tv.selected(), vec!["MY002"]);
    assert_eq!(tv.current().as_deref(), Some("MY002"));
    Ok(())
}

#[tokio::test]
async fn set_latest_art_compares_ids_as_strings() -> Result<(), BoxedError> {
    let tv = Arc::new(MockArtClient::with_items([
        ArtItem::new("MY-F0010"),
        ArtItem::new("MY-F9"),
        ArtItem::new("MY-F0100"),
    ]));

    let selected = controller(&tv).set_latest_art().await?;

    assert_eq!(selected.as_deref(), Some("MY-F9"));
    Ok(())
}

#[tokio::test]
async fn set_latest_art_without_script_owned_art_selects_nothing() -> Result<(), BoxedError> {
    let tv = Arc::new(MockArtClient::with_items([
        ArtItem::new("SAM-S0700"),
        ArtItem::new("USER-photo"),
    ]));

    let selected = controller(&tv).set_latest_art().await?;

    assert_eq!(selected, None);
    assert!(tv.selected().is_empty());
    Ok(())
}

#[tokio::test]
async fn check_art_mode_support_reports_false_on_error() {
    let tv = Arc::new(MockArtClient::new());
    tv.fail_next(
        ArtOperation::Supported,
        ServiceError::Device("unreachable".to_string()),
    );
    let controller = controller(&tv);

    assert!(!controller.check_art_mode_support().await);
    assert!(controller.check_art_mode_support().await);

    tv.set_supported(false);
    assert!(!controller.check_art_mode_support().await);
}

#[tokio::test]
async fn upload_image_enables_art_mode_and_returns_content_id() -> Result<(), BoxedError> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("sunset.png");
    tokio::fs::write(&path, common::PNG_BYTES).await?;
    let tv = Arc::new(MockArtClient::new());

    let content_id = controller(&tv)
        .with_matte("modern_apricot")
        .upload_image(&path)
        .await?;

    assert_eq!(content_id, "MY-F0001");
    assert!(tv.art_mode());
    assert_eq!(
        tv.calls(),
        vec![
            ArtCall::SetArtmode(true),
            ArtCall::Upload {
                size: common::PNG_BYTES.len(),
                options: UploadOptions {
                    matte: "modern_apricot".to_string(),
                    ..Default::default()
                },
            },
        ]
    );
    Ok(())
}

#[tokio::test]
async fn upload_image_with_missing_file_never_uploads() -> Result<(), BoxedError> {
    let dir = tempfile::tempdir()?;
    let tv = Arc::new(MockArtClient::new());

    let result = controller(&tv)
        .upload_image(dir.path().join("missing.png"))
        .await;

    assert!(matches!(result, Err(ArtError::Io { .. })));
    assert!(!tv
        .calls()
        .iter()
        .any(|call| matches!(call, ArtCall::Upload { .. })));
    Ok(())
}

#[tokio::test]
async fn delete_art_surfaces_device_errors() {
    let tv = Arc::new(MockArtClient::new());

    let result = controller(&tv).delete_art("MY404").await;

    assert!(matches!(
        result,
        Err(ArtError::Service(ServiceError::Device(_)))
    ));
    assert_eq!(tv.deleted(), vec!["MY404"]);
}

#[tokio::test]
async fn current_art_content_id_comes_from_the_descriptor() -> Result<(), BoxedError> {
    let tv = Arc::new(MockArtClient::with_items(mixed_art()));
    let controller = controller(&tv);

    assert_eq!(controller.get_current_art_content_id().await?, None);

    tv.set_current(Some("MY001"));
    assert_eq!(
        controller.get_current_art_content_id().await?.as_deref(),
        Some("MY001")
    );
    Ok(())
}

#[tokio::test]
async fn set_art_mode_and_list_art_pass_through() -> Result<(), BoxedError> {
    let tv = Arc::new(MockArtClient::with_items(mixed_art()));
    let controller = controller(&tv);

    controller.set_art_mode(true).await?;
    assert!(tv.art_mode());
    controller.set_art_mode(false).await?;
    assert!(!tv.art_mode());

    assert_eq!(controller.list_art().await?, mixed_art());
    Ok(())
}
