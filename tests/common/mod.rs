// Common fixtures shared across test files

use std::io::Write;

use opensearch_description::domain::description::{DescriptionDocument, DescriptionParser};

/// A description document using most of the OpenSearch 1.1 vocabulary
#[allow(dead_code)]
pub const FULL_DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<OpenSearchDescription xmlns="http://a9.com/-/spec/opensearch/1.1/"
                       xmlns:parameters="http://a9.com/-/spec/opensearch/extensions/parameters/1.0/">
  <ShortName>Web Search</ShortName>
  <Description>Use Example.com to search the Web.</Description>
  <Tags>example web</Tags>
  <Contact>admin@example.com</Contact>
  <Url type="application/atom+xml"
       template="http://example.com/?q={searchTerms}&amp;pw={startPage?}&amp;format=atom"/>
  <Url type="application/rss+xml" indexOffset="0"
       template="http://example.com/?q={searchTerms}&amp;start={startIndex?}&amp;format=rss"/>
  <Url type="text/html" rel="results"
       template="http://example.com/{language}/search/{searchTerms}?pw={startPage?}"/>
  <Url type="application/x-suggestions+json" rel="suggestions"
       template="http://example.com/suggest?q={searchTerms}"/>
  <Url type="application/atom+xml" rel="collection" parameters:method="GET"
       template="http://example.com/geo">
    <parameters:Parameter name="q" value="{searchTerms}"/>
    <parameters:Parameter name="where" value="{geo:locationString?}"/>
    <parameters:Parameter name="box" value="{geo:box?}" minimum="0" maximum="*"/>
  </Url>
  <LongName>Example.com Web Search</LongName>
  <Image height="64" width="64" type="image/png">http://example.com/websearch.png</Image>
  <Image height="16" width="16" type="image/x-icon">http://example.com/websearch.ico</Image>
  <Query role="example" searchTerms="cat" />
  <Developer>Example.com Development Team</Developer>
  <Attribution>Search data Copyright 2005, Example.com, Inc., All Rights Reserved</Attribution>
  <SyndicationRight>open</SyndicationRight>
  <AdultContent>false</AdultContent>
  <Language>en-us</Language>
  <OutputEncoding>UTF-8</OutputEncoding>
  <InputEncoding>UTF-8</InputEncoding>
</OpenSearchDescription>
"#;

/// The smallest valid document
#[allow(dead_code)]
pub const MINIMAL_DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<OpenSearchDescription xmlns="http://a9.com/-/spec/opensearch/1.1/">
  <ShortName>Web Search</ShortName>
  <Description>Use Example.com to search the Web.</Description>
  <Url type="text/html" template="http://example.com/?q={searchTerms}"/>
</OpenSearchDescription>
"#;

#[allow(dead_code)]
pub fn parse(text: &str) -> DescriptionDocument {
    DescriptionParser::new()
        .parse(text)
        .expect("fixture should parse")
}

#[allow(dead_code)]
pub fn full_document() -> DescriptionDocument {
    parse(FULL_DOCUMENT)
}

/// Write contents to a temp file that lives as long as the returned handle
#[allow(dead_code)]
pub fn write_temp(contents: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp file");
    file
}
