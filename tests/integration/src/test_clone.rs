//! End-to-end clone tests.

#[cfg(test)]
mod tests {
    use bucket_cloner_core::CloneError;

    use crate::{
        cleanup_bucket, create_test_bucket, local_cloner, put_objects, read_object, s3_client,
        test_bucket_name,
    };

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_clone_all_objects() {
        let client = s3_client();
        let source = create_test_bucket(&client, "clonesrc").await;
        let destination = create_test_bucket(&client, "clonedst").await;
        put_objects(
            &client,
            &source,
            &[
                ("root.txt", "root"),
                ("docs/readme.md", "readme"),
                ("photos/summer 2024/beach+sun.jpg", "jpeg"),
            ],
        )
        .await;

        let report = local_cloner(&source, &destination)
            .clone_bucket()
            .await
            .expect("clone_bucket");

        assert_eq!(report.listed, 3);
        assert_eq!(report.copied.len(), 3);
        assert!(report.failed.is_empty());
        assert!(report.policy_revoked);

        assert_eq!(read_object(&client, &destination, "root.txt").await, "root");
        assert_eq!(
            read_object(&client, &destination, "docs/readme.md").await,
            "readme"
        );
        assert_eq!(
            read_object(&client, &destination, "photos/summer 2024/beach+sun.jpg").await,
            "jpeg"
        );

        cleanup_bucket(&client, &source).await;
        cleanup_bucket(&client, &destination).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_remove_policy_after_clone() {
        let client = s3_client();
        let source = create_test_bucket(&client, "policysrc").await;
        let destination = create_test_bucket(&client, "policydst").await;
        put_objects(&client, &source, &[("a.txt", "a")]).await;

        local_cloner(&source, &destination)
            .clone_bucket()
            .await
            .expect("clone_bucket");

        let policy = client.get_bucket_policy().bucket(&source).send().await;
        assert!(policy.is_err(), "policy should be deleted after clone");

        cleanup_bucket(&client, &source).await;
        cleanup_bucket(&client, &destination).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_report_copy_failures_for_missing_destination() {
        let client = s3_client();
        let source = create_test_bucket(&client, "nodstsrc").await;
        let destination = test_bucket_name("ghost");
        put_objects(&client, &source, &[("a.txt", "a"), ("b.txt", "b")]).await;

        let report = local_cloner(&source, &destination)
            .clone_bucket()
            .await
            .expect("copy failures are not fatal");

        assert_eq!(report.listed, 2);
        assert!(report.copied.is_empty());
        assert_eq!(report.failed.len(), 2);
        assert!(report.policy_revoked);

        cleanup_bucket(&client, &source).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_fail_grant_for_missing_source() {
        let client = s3_client();
        let source = test_bucket_name("nosrc");
        let destination = create_test_bucket(&client, "nosrcdst").await;

        let result = local_cloner(&source, &destination).clone_bucket().await;

        assert!(
            matches!(result, Err(CloneError::PolicyGrant { .. })),
            "expected grant failure, got {result:?}"
        );

        cleanup_bucket(&client, &destination).await;
    }
}
