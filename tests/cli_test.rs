// End-to-end tests for the inspect and resolve commands

use opensearch_description::{build_cli, run};

mod common;

async fn run_args(args: &[&str]) -> anyhow::Result<String> {
    let mut argv = vec!["opensearch"];
    argv.extend_from_slice(args);
    let matches = build_cli().try_get_matches_from(argv)?;
    run(&matches).await
}

#[tokio::test]
async fn test_inspect_prints_canonical_xml() {
    let doc = common::write_temp(common::MINIMAL_DOCUMENT, ".xml");
    let path = doc.path().to_str().unwrap();

    let output = run_args(&["inspect", path]).await.unwrap();
    assert!(output.contains("<LongName>Web Search</LongName>"));
    assert!(output.contains("<Language>*</Language>"));
}

#[tokio::test]
async fn test_inspect_json() {
    let doc = common::write_temp(common::FULL_DOCUMENT, ".xml");
    let path = doc.path().to_str().unwrap();

    let output = run_args(&["inspect", path, "--format", "json"]).await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["short_name"], "Web Search");
    assert_eq!(value["urls"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_resolve_with_set_values() {
    let doc = common::write_temp(common::FULL_DOCUMENT, ".xml");
    let path = doc.path().to_str().unwrap();

    let output = run_args(&[
        "resolve", path, "--type", "text/html", "--set", "searchTerms=cats", "--set", "language=fr",
    ])
    .await
    .unwrap();
    assert_eq!(output, "http://example.com/fr/search/cats");
}

#[tokio::test]
async fn test_resolve_with_profile_and_override() {
    let doc = common::write_temp(common::FULL_DOCUMENT, ".xml");
    let profile = common::write_temp(
        "type: application/rss+xml\ndefaults: true\nvalues:\n  searchTerms: dogs\n",
        ".yml",
    );

    let output = run_args(&[
        "resolve",
        doc.path().to_str().unwrap(),
        "--profile",
        profile.path().to_str().unwrap(),
        "-s",
        "searchTerms=birds",
    ])
    .await
    .unwrap();
    assert_eq!(output, "http://example.com/?q=birds&start=0&format=rss");
}

#[tokio::test]
async fn test_resolve_example_query() {
    let doc = common::write_temp(common::FULL_DOCUMENT, ".xml");
    let output = run_args(&["resolve", doc.path().to_str().unwrap(), "--example"])
        .await
        .unwrap();
    assert_eq!(output, "http://example.com/?q=cat&format=atom");
}

#[tokio::test]
async fn test_resolve_errors() {
    let doc = common::write_temp(common::FULL_DOCUMENT, ".xml");
    let path = doc.path().to_str().unwrap();

    let unbound = run_args(&["resolve", path]).await.unwrap_err();
    assert!(unbound.to_string().contains("'q'"));

    let no_endpoint = run_args(&["resolve", path, "--role", "self"]).await.unwrap_err();
    assert!(no_endpoint.to_string().contains("No self endpoint"));

    let bad_name = run_args(&["resolve", path, "--set", "query=x"]).await;
    assert!(bad_name.is_err());

    let missing = run_args(&["inspect", "/no/such/file.xml"]).await.unwrap_err();
    assert!(missing.to_string().contains("Failed to load"));
}
