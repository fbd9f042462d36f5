use http::{Method, Request};
use tracing::debug;

use crate::builder::{
    DEFAULT_VERSION, IntoUri, MessageBuilder, MessageFields, RequestBuilder, RequestFields, method_constructors,
};
use crate::protocol::{BuildError, RequestHeader};

/// Builder for [`RequestHeader`] values.
///
/// Parameters are form-urlencoded with the builder charset and appended to the
/// query of the target URI.
#[derive(Debug, Clone)]
pub struct BasicRequestBuilder {
    fields: RequestFields,
}

impl BasicRequestBuilder {
    pub fn new(method: Method) -> Self {
        Self { fields: RequestFields::new(method, None) }
    }

    /// Creates a builder with a target URI; a malformed URI string fails here, not at build time.
    pub fn with_uri<U: IntoUri>(method: Method, uri: U) -> Result<Self, BuildError> {
        Ok(Self { fields: RequestFields::new(method, Some(uri.into_uri()?)) })
    }

    /// Starts from the method, URI, version and headers of an existing request.
    pub fn copy(request: &RequestHeader) -> Self {
        Self { fields: RequestFields::from_request(request) }
    }

    method_constructors! {
        get => GET,
        head => HEAD,
        post => POST,
        put => PUT,
        delete => DELETE,
        patch => PATCH,
        options => OPTIONS,
        trace => TRACE,
    }
}

impl MessageBuilder for BasicRequestBuilder {
    fn message_fields(&self) -> &MessageFields {
        self.fields.message()
    }

    fn message_fields_mut(&mut self) -> &mut MessageFields {
        self.fields.message_mut()
    }
}

impl RequestBuilder for BasicRequestBuilder {
    type Output = RequestHeader;

    fn request_fields(&self) -> &RequestFields {
        &self.fields
    }

    fn request_fields_mut(&mut self) -> &mut RequestFields {
        &mut self.fields
    }

    fn build(&self) -> Result<RequestHeader, BuildError> {
        let uri = self.fields.target_uri_with_parameters()?;
        debug!(method = %self.fields.method(), uri = %uri, "build request");

        let mut request = Request::new(());
        *request.method_mut() = self.fields.method().clone();
        *request.uri_mut() = uri;
        *request.version_mut() = self.fields.message().version().unwrap_or(DEFAULT_VERSION);
        *request.headers_mut() = self.fields.message().to_header_map();
        Ok(request.into())
    }
}

#[cfg(test)]
mod tests {
    use http::header::{ACCEPT, HOST};
    use http::{HeaderValue, Uri, Version};
    use tracing_test::traced_test;

    use super::*;
    use crate::builder::NameValuePair;

    fn values<'a>(builder: &'a BasicRequestBuilder, name: &str) -> Vec<&'a str> {
        builder.headers_named(name).into_iter().map(|h| h.value().to_str().unwrap()).collect()
    }

    #[test]
    fn fresh_builder_has_no_parameters() {
        let builder = BasicRequestBuilder::new(Method::GET);
        assert_eq!(builder.parameters(), None);
        assert_eq!(builder.uri(), None);
        assert_eq!(builder.charset(), None);
        assert_eq!(builder.version(), None);
        assert!(builder.headers().is_empty());
    }

    #[test]
    fn add_single_parameter() {
        let mut builder = BasicRequestBuilder::new(Method::GET);
        builder.add_parameter_pair("n", "v");
        assert_eq!(builder.parameters(), Some(vec![NameValuePair::new("n", "v")]));
    }

    #[test]
    fn parameters_are_copied_on_read() {
        let mut builder = BasicRequestBuilder::new(Method::GET);
        builder.add_parameter_pair("n", "v");

        let mut copy = builder.parameters().unwrap();
        copy.push(NameValuePair::new("extra", "1"));
        copy[0] = NameValuePair::new("changed", "2");

        assert_eq!(builder.parameters(), Some(vec![NameValuePair::new("n", "v")]));
    }

    #[test]
    fn absent_parameter_is_ignored() {
        let mut builder = BasicRequestBuilder::new(Method::GET);
        builder.add_parameter(None::<NameValuePair>);
        assert_eq!(builder.parameters(), None);

        builder.add_parameter_pair("a", "1");
        let before = builder.parameters();
        builder.add_parameter(None::<NameValuePair>);
        assert_eq!(builder.parameters(), before);

        builder.add_parameters([None, Some(NameValuePair::new("b", "2")), None]);
        assert_eq!(builder.parameters(), Some(vec![NameValuePair::new("a", "1"), NameValuePair::new("b", "2")]));
    }

    #[test]
    fn duplicate_parameters_keep_order() {
        let mut builder = BasicRequestBuilder::with_uri(Method::GET, "http://example.org/search").unwrap();
        builder.add_parameter_pair("q", "cats").add_parameter_pair("q", "dogs");

        assert_eq!(builder.parameters(), Some(vec![NameValuePair::new("q", "cats"), NameValuePair::new("q", "dogs")]));
    }

    #[test]
    fn set_uri_parses_eagerly() {
        let mut builder = BasicRequestBuilder::new(Method::GET);
        builder.set_uri("http://x/y").unwrap();
        assert_eq!(builder.uri(), Some(&"http://x/y".parse::<Uri>().unwrap()));

        let result = builder.set_uri("not a uri");
        assert!(matches!(result, Err(BuildError::UriSyntax { .. })));
        assert_eq!(builder.uri(), Some(&Uri::from_static("http://x/y")));

        builder.set_uri(Uri::from_static("/other")).unwrap();
        assert_eq!(builder.uri(), Some(&Uri::from_static("/other")));
    }

    #[test]
    fn invalid_uri_fails_at_construction() {
        assert!(matches!(BasicRequestBuilder::with_uri(Method::GET, "not a uri"), Err(BuildError::UriSyntax { .. })));
        assert!(matches!(BasicRequestBuilder::post(String::from("a b")), Err(BuildError::UriSyntax { .. })));
    }

    #[test]
    fn set_header_replaces_add_header_appends() {
        let mut builder = BasicRequestBuilder::new(Method::GET);
        builder.set_header("X", "1").unwrap().set_header("X", "2").unwrap();
        assert_eq!(values(&builder, "x"), ["2"]);

        let mut builder = BasicRequestBuilder::new(Method::GET);
        builder.add_header("X", "1").unwrap().add_header("X", "2").unwrap();
        assert_eq!(values(&builder, "x"), ["1", "2"]);

        let request = builder.build().unwrap();
        assert_eq!(request.headers().get_all("x").iter().collect::<Vec<_>>(), ["1", "2"]);
    }

    #[test]
    fn header_removal() {
        let mut builder = BasicRequestBuilder::new(Method::GET);
        builder.add_header(ACCEPT, "text/html").unwrap().add_header(HOST, "h").unwrap().add_header(ACCEPT, "*/*").unwrap();

        let first = builder.first_header("accept").unwrap().clone();
        builder.remove_header(&first);
        assert_eq!(values(&builder, "accept"), ["*/*"]);
        assert_eq!(builder.last_header("Accept").map(|h| h.value().clone()), Some(HeaderValue::from_static("*/*")));

        builder.remove_headers("ACCEPT");
        assert!(!builder.contains_header("accept"));
        assert!(builder.contains_header("host"));

        builder.set_headers(Vec::new());
        assert!(builder.headers().is_empty());
    }

    #[test]
    fn invalid_header_is_reported() {
        let mut builder = BasicRequestBuilder::new(Method::GET);
        assert!(matches!(builder.add_header("bad name", "v"), Err(BuildError::InvalidHeader { .. })));
        assert!(builder.headers().is_empty());
    }

    #[test]
    #[traced_test]
    fn build_snapshot() {
        let mut builder = BasicRequestBuilder::get("http://example.org/search?lang=en").unwrap();
        builder
            .set_version(Version::HTTP_10)
            .set_charset(encoding_rs::WINDOWS_1252)
            .add_parameter_pair("q", "café")
            .add_parameter(NameValuePair::name_only("exact"));
        builder.set_header(HOST, "example.org").unwrap();

        let first = builder.build().unwrap();
        assert_eq!(first.method(), &Method::GET);
        assert_eq!(first.version(), Version::HTTP_10);
        assert_eq!(first.uri(), "http://example.org/search?lang=en&q=caf%E9&exact");
        assert_eq!(first.headers().get(HOST), Some(&HeaderValue::from_static("example.org")));
        assert!(logs_contain("build request"));

        builder.add_parameter_pair("page", "2");
        let second = builder.build().unwrap();
        assert_eq!(second.query(), Some("lang=en&q=caf%E9&exact&page=2"));
        assert_eq!(first.query(), Some("lang=en&q=caf%E9&exact"));
    }

    #[test]
    fn build_defaults() {
        let request = BasicRequestBuilder::new(Method::OPTIONS).build().unwrap();
        assert_eq!(request.uri(), "/");
        assert_eq!(request.version(), DEFAULT_VERSION);
        assert!(request.headers().is_empty());

        let mut builder = BasicRequestBuilder::new(Method::GET);
        builder.add_parameter_pair("a", "b");
        assert_eq!(builder.build().unwrap().uri(), "/?a=b");
    }

    #[test]
    fn copy_existing_request() {
        let mut original = BasicRequestBuilder::put("http://example.org/items/1").unwrap();
        original.set_version(Version::HTTP_2).add_header(ACCEPT, "application/json").unwrap();
        let request = original.build().unwrap();

        let mut copy = BasicRequestBuilder::copy(&request);
        assert_eq!(copy.method(), &Method::PUT);
        assert_eq!(copy.uri(), Some(&Uri::from_static("http://example.org/items/1")));
        assert_eq!(copy.version(), Some(Version::HTTP_2));
        assert_eq!(values(&copy, "accept"), ["application/json"]);
        assert_eq!(copy.parameters(), None);

        copy.add_parameter_pair("v", "1");
        assert_eq!(copy.build().unwrap().query(), Some("v=1"));
    }
}
