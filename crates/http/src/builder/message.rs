//! Header and protocol-version accumulation shared by every builder.

use std::fmt;

use http::{HeaderMap, HeaderName, HeaderValue, Version};

use crate::protocol::BuildError;

/// Protocol version used when a builder never had one set.
pub const DEFAULT_VERSION: Version = Version::HTTP_11;

/// A single header field, kept in the order it was added.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Header {
    name: HeaderName,
    value: HeaderValue,
}

impl Header {
    pub fn new(name: HeaderName, value: HeaderValue) -> Self {
        Self { name, value }
    }

    /// Creates a header from anything convertible into a name and a value.
    ///
    /// Fails with [`BuildError::InvalidHeader`] if the `http` crate rejects either part.
    pub fn try_new<K, V>(name: K, value: V) -> Result<Self, BuildError>
    where
        K: TryInto<HeaderName>,
        V: TryInto<HeaderValue>,
        BuildError: From<K::Error> + From<V::Error>,
    {
        Ok(Self { name: name.try_into()?, value: value.try_into()? })
    }

    pub fn name(&self) -> &HeaderName {
        &self.name
    }

    pub fn value(&self) -> &HeaderValue {
        &self.value
    }

    /// Case-insensitive name comparison.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.as_str().eq_ignore_ascii_case(name)
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, String::from_utf8_lossy(self.value.as_bytes()))
    }
}

/// State owned by the message-builder base: protocol version and the ordered header list.
#[derive(Debug, Clone, Default)]
pub struct MessageFields {
    version: Option<Version>,
    headers: Vec<Header>,
}

impl MessageFields {
    pub fn version(&self) -> Option<Version> {
        self.version
    }

    pub fn set_version(&mut self, version: Version) {
        self.version = Some(version);
    }

    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    pub fn add_header(&mut self, header: Header) {
        self.headers.push(header);
    }

    /// Replaces every header named like `header` with `header` itself.
    ///
    /// The replacement takes the position of the first match; without a match it is appended.
    pub fn set_header(&mut self, header: Header) {
        match self.headers.iter().position(|h| h.name == header.name) {
            Some(first) => {
                let name = header.name.clone();
                self.headers[first] = header;
                let mut index = 0;
                self.headers.retain(|h| {
                    let keep = index <= first || h.name != name;
                    index += 1;
                    keep
                });
            }
            None => self.headers.push(header),
        }
    }

    /// Removes the first header equal to `header` in both name and value.
    pub fn remove_header(&mut self, header: &Header) {
        if let Some(index) = self.headers.iter().position(|h| h == header) {
            self.headers.remove(index);
        }
    }

    pub fn remove_headers(&mut self, name: &str) {
        self.headers.retain(|h| !h.is_named(name));
    }

    pub fn set_headers<I: IntoIterator<Item = Header>>(&mut self, headers: I) {
        self.headers = headers.into_iter().collect();
    }

    /// Collects the headers into a `HeaderMap`, repeated names appended in order.
    pub fn to_header_map(&self) -> HeaderMap {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for header in &self.headers {
            map.append(header.name.clone(), header.value.clone());
        }
        map
    }
}

/// Fluent access to [`MessageFields`].
///
/// Concrete builders expose their fields and inherit every method, each
/// returning the concrete builder so calls chain.
pub trait MessageBuilder: Sized {
    fn message_fields(&self) -> &MessageFields;

    fn message_fields_mut(&mut self) -> &mut MessageFields;

    fn version(&self) -> Option<Version> {
        self.message_fields().version()
    }

    fn set_version(&mut self, version: Version) -> &mut Self {
        self.message_fields_mut().set_version(version);
        self
    }

    fn headers(&self) -> &[Header] {
        self.message_fields().headers()
    }

    fn first_header(&self, name: &str) -> Option<&Header> {
        self.headers().iter().find(|h| h.is_named(name))
    }

    fn last_header(&self, name: &str) -> Option<&Header> {
        self.headers().iter().rev().find(|h| h.is_named(name))
    }

    fn headers_named(&self, name: &str) -> Vec<&Header> {
        self.headers().iter().filter(|h| h.is_named(name)).collect()
    }

    fn contains_header(&self, name: &str) -> bool {
        self.first_header(name).is_some()
    }

    /// Appends a header, keeping any existing ones with the same name.
    fn add_header<K, V>(&mut self, name: K, value: V) -> Result<&mut Self, BuildError>
    where
        K: TryInto<HeaderName>,
        V: TryInto<HeaderValue>,
        BuildError: From<K::Error> + From<V::Error>,
    {
        Ok(self.add_header_entry(Header::try_new(name, value)?))
    }

    fn add_header_entry(&mut self, header: Header) -> &mut Self {
        self.message_fields_mut().add_header(header);
        self
    }

    /// Sets a header, replacing all existing ones with the same name.
    fn set_header<K, V>(&mut self, name: K, value: V) -> Result<&mut Self, BuildError>
    where
        K: TryInto<HeaderName>,
        V: TryInto<HeaderValue>,
        BuildError: From<K::Error> + From<V::Error>,
    {
        Ok(self.set_header_entry(Header::try_new(name, value)?))
    }

    fn set_header_entry(&mut self, header: Header) -> &mut Self {
        self.message_fields_mut().set_header(header);
        self
    }

    fn remove_header(&mut self, header: &Header) -> &mut Self {
        self.message_fields_mut().remove_header(header);
        self
    }

    fn remove_headers(&mut self, name: &str) -> &mut Self {
        self.message_fields_mut().remove_headers(name);
        self
    }

    fn set_headers<I: IntoIterator<Item = Header>>(&mut self, headers: I) -> &mut Self {
        self.message_fields_mut().set_headers(headers);
        self
    }
}
