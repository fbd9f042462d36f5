use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderValue, Method, Request};
use http_body_util::Full;
use tracing::debug;

use crate::builder::{
    DEFAULT_VERSION, IntoUri, MessageBuilder, MessageFields, RequestBuilder, RequestFields, method_constructors,
};
use crate::protocol::{BuildError, RequestHeader};

/// Builder for requests with an in-memory body.
///
/// When the request has parameters, no body of its own and a `POST` or `PUT`
/// method, the parameters are sent as an `application/x-www-form-urlencoded`
/// body. In every other case they are appended to the query like
/// [`BasicRequestBuilder`](crate::builder::BasicRequestBuilder) does.
#[derive(Debug, Clone)]
pub struct ClassicRequestBuilder {
    fields: RequestFields,
    body: Option<Bytes>,
}

impl ClassicRequestBuilder {
    pub fn new(method: Method) -> Self {
        Self { fields: RequestFields::new(method, None), body: None }
    }

    pub fn with_uri<U: IntoUri>(method: Method, uri: U) -> Result<Self, BuildError> {
        Ok(Self { fields: RequestFields::new(method, Some(uri.into_uri()?)), body: None })
    }

    /// Starts from the method, URI, version and headers of an existing request; no body.
    pub fn copy(request: &RequestHeader) -> Self {
        Self { fields: RequestFields::from_request(request), body: None }
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

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    pub fn set_body<B: Into<Bytes>>(&mut self, body: B) -> &mut Self {
        self.body = Some(body.into());
        self
    }

    /// The encoded parameters if they are to be sent as a form body.
    fn form_body(&self) -> Option<String> {
        if self.body.is_some() || !matches!(*self.fields.method(), Method::POST | Method::PUT) {
            return None;
        }
        self.fields.encoded_parameters()
    }
}

impl MessageBuilder for ClassicRequestBuilder {
    fn message_fields(&self) -> &MessageFields {
        self.fields.message()
    }

    fn message_fields_mut(&mut self) -> &mut MessageFields {
        self.fields.message_mut()
    }
}

impl RequestBuilder for ClassicRequestBuilder {
    type Output = Request<Full<Bytes>>;

    fn request_fields(&self) -> &RequestFields {
        &self.fields
    }

    fn request_fields_mut(&mut self) -> &mut RequestFields {
        &mut self.fields
    }

    fn build(&self) -> Result<Request<Full<Bytes>>, BuildError> {
        let mut headers = self.fields.message().to_header_map();

        let (uri, body) = match self.form_body() {
            Some(form) => {
                if !headers.contains_key(CONTENT_TYPE) {
                    let content_type = format!(
                        "{}; charset={}",
                        mime::APPLICATION_WWW_FORM_URLENCODED,
                        self.fields.charset_or_default().name()
                    );
                    headers.insert(CONTENT_TYPE, HeaderValue::try_from(content_type)?);
                }
                (self.fields.target_uri(), Bytes::from(form))
            }
            None => (self.fields.target_uri_with_parameters()?, self.body.clone().unwrap_or_default()),
        };
        debug!(method = %self.fields.method(), uri = %uri, body_len = body.len(), "build request");

        let mut request = Request::new(Full::new(body));
        *request.method_mut() = self.fields.method().clone();
        *request.uri_mut() = uri;
        *request.version_mut() = self.fields.message().version().unwrap_or(DEFAULT_VERSION);
        *request.headers_mut() = headers;
        Ok(request)
    }
}
