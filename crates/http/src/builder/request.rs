use std::borrow::Cow;
use std::fmt;

use encoding_rs::Encoding;
use http::{Method, Uri};
use url::form_urlencoded;

use crate::builder::{Header, MessageBuilder, MessageFields};
use crate::protocol::{BuildError, RequestHeader};

/// Charset used to encode parameters when none was set.
pub const DEFAULT_CHARSET: &Encoding = encoding_rs::UTF_8;

/// Request target used when a builder never had a URI set.
pub const DEFAULT_PATH: &str = "/";

/// A query or form parameter. The value is optional: `name` alone encodes as `name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameValuePair {
    name: String,
    value: Option<String>,
}

impl NameValuePair {
    pub fn new<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Self { name: name.into(), value: Some(value.into()) }
    }

    pub fn name_only<N: Into<String>>(name: N) -> Self {
        Self { name: name.into(), value: None }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl<N: Into<String>, V: Into<String>> From<(N, V)> for NameValuePair {
    fn from((name, value): (N, V)) -> Self {
        Self::new(name, value)
    }
}

impl fmt::Display for NameValuePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}={}", self.name, value),
            None => f.write_str(&self.name),
        }
    }
}

/// Anything a builder accepts as a request target.
///
/// String forms are parsed eagerly; a malformed string is a [`BuildError::UriSyntax`].
pub trait IntoUri {
    fn into_uri(self) -> Result<Uri, BuildError>;
}

impl IntoUri for Uri {
    fn into_uri(self) -> Result<Uri, BuildError> {
        Ok(self)
    }
}

impl IntoUri for &Uri {
    fn into_uri(self) -> Result<Uri, BuildError> {
        Ok(self.clone())
    }
}

impl IntoUri for &str {
    fn into_uri(self) -> Result<Uri, BuildError> {
        self.parse::<Uri>().map_err(|e| BuildError::uri_syntax(self, e))
    }
}

impl IntoUri for String {
    fn into_uri(self) -> Result<Uri, BuildError> {
        self.as_str().into_uri()
    }
}

impl IntoUri for &String {
    fn into_uri(self) -> Result<Uri, BuildError> {
        self.as_str().into_uri()
    }
}

/// Form-urlencodes `parameters`, encoding names and values with `charset` first.
///
/// Characters the charset cannot represent are replaced the way `encoding_rs` does
/// for form submission (numeric character references).
pub fn encode_parameters(parameters: &[NameValuePair], charset: &'static Encoding) -> String {
    let encode: &dyn Fn(&str) -> Cow<'_, [u8]> = &|s| charset.encode(s).0;
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    serializer.encoding_override(Some(encode));
    for parameter in parameters {
        match parameter.value() {
            Some(value) => serializer.append_pair(parameter.name(), value),
            None => serializer.append_key_only(parameter.name()),
        };
    }
    serializer.finish()
}

/// Appends an already encoded query fragment to `uri`, after any existing query.
pub(crate) fn append_query(uri: Uri, encoded: &str) -> Result<Uri, BuildError> {
    let mut parts = uri.into_parts();
    let path_and_query = match parts.path_and_query.as_ref() {
        Some(pq) => match pq.query() {
            Some(query) if !query.is_empty() => format!("{}?{}&{}", pq.path(), query, encoded),
            _ => format!("{}?{}", pq.path(), encoded),
        },
        None => format!("{DEFAULT_PATH}?{encoded}"),
    };
    parts.path_and_query = Some(path_and_query.parse().map_err(|e| BuildError::uri_syntax(&path_and_query, e))?);
    Uri::from_parts(parts).map_err(|e| http::Error::from(e).into())
}

/// State owned by a request builder on top of the message-builder base.
#[derive(Debug, Clone)]
pub struct RequestFields {
    method: Method,
    uri: Option<Uri>,
    charset: Option<&'static Encoding>,
    parameters: Option<Vec<NameValuePair>>,
    message: MessageFields,
}

impl RequestFields {
    pub fn new(method: Method, uri: Option<Uri>) -> Self {
        Self { method, uri, charset: None, parameters: None, message: MessageFields::default() }
    }

    /// Seeds the fields from an existing request: method, URI, version and headers.
    pub fn from_request(request: &RequestHeader) -> Self {
        let mut fields = Self::new(request.method().clone(), Some(request.uri().clone()));
        fields.message.set_version(request.version());
        for (name, value) in request.headers() {
            fields.message.add_header(Header::new(name.clone(), value.clone()));
        }
        fields
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> Option<&Uri> {
        self.uri.as_ref()
    }

    pub fn set_uri(&mut self, uri: Uri) {
        self.uri = Some(uri);
    }

    pub fn charset(&self) -> Option<&'static Encoding> {
        self.charset
    }

    pub fn set_charset(&mut self, charset: &'static Encoding) {
        self.charset = Some(charset);
    }

    pub fn charset_or_default(&self) -> &'static Encoding {
        self.charset.unwrap_or(DEFAULT_CHARSET)
    }

    pub fn parameters(&self) -> Option<&[NameValuePair]> {
        self.parameters.as_deref()
    }

    pub fn add_parameter(&mut self, parameter: NameValuePair) {
        self.parameters.get_or_insert_with(Vec::new).push(parameter);
    }

    pub fn message(&self) -> &MessageFields {
        &self.message
    }

    pub fn message_mut(&mut self) -> &mut MessageFields {
        &mut self.message
    }

    /// The configured URI, or [`DEFAULT_PATH`].
    pub fn target_uri(&self) -> Uri {
        self.uri.clone().unwrap_or_else(|| Uri::from_static(DEFAULT_PATH))
    }

    /// The parameters encoded with the configured charset, `None` if there are none.
    pub fn encoded_parameters(&self) -> Option<String> {
        self.parameters
            .as_deref()
            .filter(|parameters| !parameters.is_empty())
            .map(|parameters| encode_parameters(parameters, self.charset_or_default()))
    }

    /// The target URI with the encoded parameters appended to its query.
    pub fn target_uri_with_parameters(&self) -> Result<Uri, BuildError> {
        let uri = self.target_uri();
        match self.encoded_parameters() {
            Some(encoded) => append_query(uri, &encoded),
            None => Ok(uri),
        }
    }
}

/// Fluent access to [`RequestFields`], layered on [`MessageBuilder`].
///
/// Concrete builders implement the accessors and `build`; every setter returns
/// the concrete builder. `build` takes `&self`, so a builder may be built again
/// and each call snapshots the current state.
pub trait RequestBuilder: MessageBuilder {
    type Output;

    fn request_fields(&self) -> &RequestFields;

    fn request_fields_mut(&mut self) -> &mut RequestFields;

    fn build(&self) -> Result<Self::Output, BuildError>;

    fn method(&self) -> &Method {
        self.request_fields().method()
    }

    fn uri(&self) -> Option<&Uri> {
        self.request_fields().uri()
    }

    /// Sets the request target; on a parse error the builder is left unchanged.
    fn set_uri<U: IntoUri>(&mut self, uri: U) -> Result<&mut Self, BuildError> {
        let uri = uri.into_uri()?;
        self.request_fields_mut().set_uri(uri);
        Ok(self)
    }

    fn charset(&self) -> Option<&'static Encoding> {
        self.request_fields().charset()
    }

    fn set_charset(&mut self, charset: &'static Encoding) -> &mut Self {
        self.request_fields_mut().set_charset(charset);
        self
    }

    /// Returns a copy of the parameters, or `None` if none were ever added.
    fn parameters(&self) -> Option<Vec<NameValuePair>> {
        self.request_fields().parameters().map(<[NameValuePair]>::to_vec)
    }

    /// Appends a parameter; `None` is ignored.
    fn add_parameter<P: Into<Option<NameValuePair>>>(&mut self, parameter: P) -> &mut Self {
        if let Some(parameter) = parameter.into() {
            self.request_fields_mut().add_parameter(parameter);
        }
        self
    }

    fn add_parameter_pair<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) -> &mut Self {
        self.add_parameter(NameValuePair::new(name, value))
    }

    fn add_parameters<I, P>(&mut self, parameters: I) -> &mut Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Option<NameValuePair>>,
    {
        for parameter in parameters {
            self.add_parameter(parameter);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_utf8_and_name_only() {
        let parameters = [
            NameValuePair::new("q", "cats & dogs"),
            NameValuePair::name_only("flag"),
            NameValuePair::new("city", "Zürich"),
        ];
        assert_eq!(encode_parameters(&parameters, DEFAULT_CHARSET), "q=cats+%26+dogs&flag&city=Z%C3%BCrich");
    }

    #[test]
    fn encode_with_single_byte_charset() {
        let parameters = [NameValuePair::new("name", "café")];
        assert_eq!(encode_parameters(&parameters, encoding_rs::WINDOWS_1252), "name=caf%E9");
    }

    #[test]
    fn append_to_existing_query() {
        let uri = Uri::from_static("http://example.org/search?lang=en");
        assert_eq!(append_query(uri, "q=cats").unwrap(), "http://example.org/search?lang=en&q=cats");

        let uri = Uri::from_static("http://example.org");
        assert_eq!(append_query(uri, "q=cats").unwrap(), "http://example.org/?q=cats");

        let uri = Uri::from_static("/search?");
        assert_eq!(append_query(uri, "q=cats").unwrap(), "/search?q=cats");
    }

    #[test]
    fn into_uri_forms() {
        let parsed: Uri = "http://x/y".parse().unwrap();
        assert_eq!("http://x/y".into_uri().unwrap(), parsed);
        assert_eq!(String::from("http://x/y").into_uri().unwrap(), parsed);
        assert_eq!((&parsed).into_uri().unwrap(), parsed);
        assert!(matches!("not a uri".into_uri(), Err(BuildError::UriSyntax { .. })));
    }

    #[test]
    fn pair_from_tuple() {
        let pair: NameValuePair = ("a", String::from("1")).into();
        assert_eq!(pair, NameValuePair::new("a", "1"));
        assert_eq!(pair.to_string(), "a=1");
        assert_eq!(NameValuePair::name_only("b").to_string(), "b");
    }
}
