//! Tests for the built-in checks running against cached checkouts

use repo_analyzer::checks::CheckRegistry;
use repo_analyzer::core::models::{
    CheckOptions, CheckResult, Payload, Repository, SupportTier, Version,
};
use repo_analyzer::core::services::summarize;

use super::common::{SeededCache, repo};

async fn run(cache: &SeededCache, check: &str, slug: &str, options: CheckOptions) -> CheckResult {
    let registry = CheckRegistry::builtin(&cache.context(Some(Version::new(19, 1, 0))));
    registry
        .get(check)
        .unwrap()
        .run(&repo(slug), options)
        .await
        .expect("built-in checks always report")
}

#[tokio::test]
async fn test_aws_sdk_on_cached_checkout() {
    let cache = SeededCache::new();
    cache.add_file(
        "billing",
        "package.json",
        r#"{"dependencies": {"aws-sdk": "^2.1400.0", "@aws-sdk/client-s3": "^3.450.0"}}"#,
    );

    let result = run(&cache, "aws-sdk", "billing", CheckOptions::default()).await;
    assert_eq!(result.display_form(), "billing: AWS SDK v2 | AWS SDK v3");
    assert_eq!(result.slug(), Some("billing"));
}

#[tokio::test]
async fn test_react_version_uses_pinned_latest() {
    let cache = SeededCache::new();
    cache.add_file(
        "storefront",
        "package.json",
        r#"{"dependencies": {"react": "^17.0.2", "react-dom": "^17.0.2"}}"#,
    );

    let result = run(&cache, "react-version", "storefront", CheckOptions::default()).await;
    assert_eq!(
        result.payload(),
        Some(&Payload::React {
            version: Some("^17.0.2".to_string()),
            outdated: true,
            support: SupportTier::Deprecated,
        })
    );
}

#[tokio::test]
async fn test_react_version_deep_scan() {
    let cache = SeededCache::new();
    cache.add_file("portal", "web/package.json", r#"{"dependencies": {"react": "18.2.0"}}"#);

    let shallow = run(&cache, "react-version", "portal", CheckOptions::default()).await;
    assert_eq!(shallow.display_form(), "portal has no package.json");

    let deep = run(
        &cache,
        "react-version",
        "portal",
        CheckOptions {
            deep_scan: true,
            ..CheckOptions::default()
        },
    )
    .await;
    assert!(matches!(
        deep.payload(),
        Some(Payload::React {
            support: SupportTier::Active,
            ..
        })
    ));
}

#[tokio::test]
async fn test_react_native_version() {
    let cache = SeededCache::new();
    cache.add_file("mobile", "app/package.json", r#"{"dependencies": {"react-native": "0.68.2"}}"#);

    let result = run(&cache, "react-native-version", "mobile", CheckOptions::default()).await;
    assert_eq!(result.display_form(), "mobile: react-native: 0.68.2 | support: legacy");
}

#[tokio::test]
async fn test_keyword_requires_a_keyword() {
    let cache = SeededCache::new();

    // The repository is not cached; a missing keyword must not try to clone it
    let result = run(&cache, "keyword", "never-cloned", CheckOptions::default()).await;
    assert_eq!(result.display_form(), "No keyword provided for check");
    assert!(!cache.path().join("never-cloned").exists());
}

#[tokio::test]
async fn test_keyword_search() {
    let cache = SeededCache::new();
    cache.add_file("docs", "guide/setup.md", "Configure the Datadog agent");
    cache.add_file("docs", "build/setup.md", "Configure the Datadog agent");

    let result = run(
        &cache,
        "keyword",
        "docs",
        CheckOptions {
            keyword: Some("DATADOG".to_string()),
            ..CheckOptions::default()
        },
    )
    .await;
    assert_eq!(
        result.payload(),
        Some(&Payload::Keyword {
            keyword: "datadog".to_string(),
            matches: vec!["guide/setup.md".to_string()],
        })
    );
}

#[tokio::test]
async fn test_secrets_scan() {
    let cache = SeededCache::new();
    cache.add_file("infra", "deploy/id_rsa", "not really a key");
    cache.add_file("infra", "config/app.yml", "api_key = abc123");

    let result = run(&cache, "secrets", "infra", CheckOptions::default()).await;
    assert_eq!(
        result.payload(),
        Some(&Payload::Secrets {
            hits: vec![
                "config/app.yml matches API key assignment".to_string(),
                "Sensitive file: deploy/id_rsa".to_string(),
            ],
        })
    );
}

#[tokio::test]
async fn test_uncloneable_repository_is_reported_not_fatal() {
    let cache = SeededCache::new();
    let registry = CheckRegistry::builtin(&cache.context(None));
    let bare = Repository::new("Bare", "bare", "acme/bare");

    let result = registry
        .get("secrets")
        .unwrap()
        .run(&bare, CheckOptions::default())
        .await
        .unwrap();
    assert_eq!(result.display_form(), "Failed to clone bare: no https clone link");
}

#[tokio::test]
async fn test_results_feed_the_summary() {
    let cache = SeededCache::new();
    cache.add_file("a", "package.json", r#"{"dependencies": {"aws-sdk": "2"}}"#);
    cache.add_file(
        "b",
        "package.json",
        r#"{"dependencies": {"aws-sdk": "2", "@aws-sdk/client-sqs": "3"}}"#,
    );
    cache.add_file("c", "README.md", "# no manifest here");

    let mut results = Vec::new();
    for slug in ["a", "b", "c"] {
        results.push(run(&cache, "aws-sdk", slug, CheckOptions::default()).await);
    }

    let summary = summarize("aws-sdk", &results);
    assert_eq!(
        summary,
        vec![
            "Total: 3",
            "Mixed v2 + v3: 1",
            "AWS SDK v2 only: 1",
            "AWS SDK v3 only: 0",
            "Not using AWS SDK: 0",
            "Other (no manifest, errors): 1",
        ]
    );
}
