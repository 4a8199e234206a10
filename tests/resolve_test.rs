// Integration tests for resolving endpoints into request URLs

use opensearch_description::domain::description::{UrlEndpoint, UrlRole};
use opensearch_description::domain::template::{
    Parameter, SearchValues, TemplateParameter, TemplateResolver,
};
use opensearch_description::DescriptionError;

mod common;

#[test]
fn test_catalog_tokens_round_trip() {
    for kind in TemplateParameter::ALL {
        assert_eq!(TemplateParameter::from_token(kind.token()).unwrap(), kind);
    }
    assert_eq!(
        TemplateParameter::from_token("{geo:locationString}").unwrap().token(),
        "{geo:name}"
    );
    assert!(matches!(
        TemplateParameter::from_token("{search}"),
        Err(DescriptionError::UnknownTemplateToken(_))
    ));
}

#[test]
fn test_optional_parameter_is_omitted() {
    let endpoint =
        UrlEndpoint::from_template("http://example.com/search?q={searchTerms}&c={count?}").unwrap();
    let values = SearchValues::new().with(TemplateParameter::SearchTerms, "cat");

    assert_eq!(endpoint.resolve(&values).unwrap(), "http://example.com/search?q=cat");
}

#[test]
fn test_required_parameter_must_be_bound() {
    let endpoint = UrlEndpoint::from_template("http://example.com/search?q={searchTerms}").unwrap();
    assert_eq!(
        endpoint.resolve(&SearchValues::new()).unwrap_err(),
        DescriptionError::UnboundRequiredParameter("q".to_string())
    );
}

#[test]
fn test_repeat_bounds() {
    let endpoint = UrlEndpoint::from_template("http://example.com/search")
        .unwrap()
        .with_parameter(Parameter::bind("t", "{searchTerms?}").with_cardinality(0, 3));

    for supplied in 0..5 {
        let mut values = SearchValues::new();
        for i in 0..supplied {
            values.push(TemplateParameter::SearchTerms, format!("v{}", i));
        }
        let url = endpoint.resolve(&values).unwrap();
        assert_eq!(url.matches("t=").count(), supplied.min(3));
    }
}

#[test]
fn test_resolution_leaves_template_unbound() {
    let raw = "http://example.com/search?q={searchTerms}&c={count?}&format=rss";
    let endpoint = UrlEndpoint::from_template(raw).unwrap();
    let before = endpoint.clone();

    let values = SearchValues::new()
        .with(TemplateParameter::SearchTerms, "cat")
        .with(TemplateParameter::Count, "5");
    let resolver = TemplateResolver::new();
    let first = resolver.resolve(&endpoint, &values).unwrap();
    let second = resolver.resolve(&endpoint, &values).unwrap();

    assert_eq!(first, "http://example.com/search?q=cat&c=5&format=rss");
    assert_eq!(first, second);
    assert_eq!(endpoint, before);
    assert_eq!(endpoint.template_text(), raw);
}

#[test]
fn test_resolve_document_endpoints() {
    let doc = common::full_document();
    let values = SearchValues::new()
        .with(TemplateParameter::SearchTerms, "new york")
        .with(TemplateParameter::Language, "en-us");

    let html = doc.find_endpoint(UrlRole::Results, Some("text/html")).unwrap();
    assert_eq!(
        html.resolve(&values).unwrap(),
        "http://example.com/en-us/search/new york"
    );

    let rss = doc
        .find_endpoint(UrlRole::Results, Some("application/rss+xml"))
        .unwrap();
    let with_defaults = values.clone().with_endpoint_defaults(rss);
    assert_eq!(
        rss.resolve(&with_defaults).unwrap(),
        "http://example.com/?q=new%20york&start=0&format=rss"
    );

    let geo = doc.find_endpoint(UrlRole::Collection, None).unwrap();
    let mut geo_values = values.clone();
    geo_values
        .push(TemplateParameter::GeoBox, "-10,-10,10,10")
        .push(TemplateParameter::GeoBox, "0,0,1,1");
    assert_eq!(
        geo.resolve(&geo_values).unwrap(),
        "http://example.com/geo?q=new%20york&box=-10%2C-10%2C10%2C10&box=0%2C0%2C1%2C1"
    );
}

#[test]
fn test_resolve_example_query() {
    let doc = common::full_document();
    let example = doc.example_queries().next().unwrap();
    let values = SearchValues::from_query(example);

    let atom = doc.find_endpoint(UrlRole::Results, None).unwrap();
    assert_eq!(
        atom.resolve(&values).unwrap(),
        "http://example.com/?q=cat&format=atom"
    );
}

#[test]
fn test_unknown_required_placeholder_fails() {
    let endpoint = UrlEndpoint::from_template("http://example.com/{custom:area}/search").unwrap();
    assert_eq!(
        endpoint.resolve(&SearchValues::new()).unwrap_err(),
        DescriptionError::UnknownTemplateToken("{custom:area}".to_string())
    );
}

#[test]
fn test_missing_values_report() {
    let doc = common::full_document();
    let html = doc.find_endpoint(UrlRole::Results, Some("text/html")).unwrap();
    let missing = TemplateResolver::new().missing_values(html, &SearchValues::new());
    assert_eq!(missing, vec!["language".to_string(), "searchTerms".to_string()]);
}
