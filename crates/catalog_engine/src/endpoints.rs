use url::Url;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EndpointError {
    #[error("invalid api base url '{url}': {message}")]
    InvalidBase { url: String, message: String },
    #[error("api base url '{0}' cannot carry paths")]
    NotABase(String),
}

/// URLs of the catalog API, all relative to one base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    base: Url,
}

impl ApiEndpoints {
    /// `base` may include a path prefix (`https://host/catalog`); a trailing
    /// slash is optional.
    pub fn new(base: &str) -> Result<Self, EndpointError> {
        let mut parsed = Url::parse(base.trim()).map_err(|err| EndpointError::InvalidBase {
            url: base.to_string(),
            message: err.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(EndpointError::NotABase(base.to_string()));
        }
        if !parsed.path().ends_with('/') {
            let path = format!("{}/", parsed.path());
            parsed.set_path(&path);
        }
        parsed.set_query(None);
        parsed.set_fragment(None);
        Ok(Self { base: parsed })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// `GET` target returning the whole collection.
    pub fn collection_url(&self) -> String {
        self.join("api/comics")
    }

    /// `GET` target returning a single comic.
    pub fn record_url(&self, id: &str) -> String {
        self.join(&format!("api/comics/{}", urlencoding::encode(id)))
    }

    /// Image proxy URL for an original image; the original is percent-encoded
    /// into the `url` query parameter.
    pub fn proxy_image_url(&self, picture: &str) -> String {
        format!(
            "{}?url={}",
            self.join("api/proxy-image"),
            urlencoding::encode(picture)
        )
    }

    fn join(&self, path: &str) -> String {
        let mut url = self.base.to_string();
        url.push_str(path);
        url
    }
}
