//! Pagination envelope shared by list endpoints
//!
//! List responses carry `links.pages.{first,prev,next,last}` and `meta.total`
//! next to the resource array. They are decoded once per response by the
//! transport and surfaced through [`Response`].

use crate::error::{RegistryError, Result};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use url::Url;

/// Page selection for list endpoints. Zero means "server default".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOptions {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
}

impl ListOptions {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }
    }

    /// Append `page`/`per_page` to `url`, skipping zero values
    pub(crate) fn apply(&self, url: &mut Url) {
        let mut pairs = Vec::new();
        if self.page != 0 {
            pairs.push(("page", self.page.to_string()));
        }
        if self.per_page != 0 {
            pairs.push(("per_page", self.per_page.to_string()));
        }

        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<Pages>,
}

/// Absolute URLs of neighbouring pages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pages {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
}

impl Links {
    /// Page number this response belongs to, derived from the `prev` link
    pub fn current_page(&self) -> Result<u32> {
        match self.pages.as_ref().and_then(|p| p.prev.as_deref()) {
            Some(prev) => Ok(page_for_url(prev)? + 1),
            None => Ok(1),
        }
    }

    pub fn is_last_page(&self) -> bool {
        self.pages.as_ref().and_then(|p| p.next.as_ref()).is_none()
    }

    /// Options selecting the page after this one, or `None` on the last page
    pub fn next_page_options(&self, per_page: u32) -> Result<Option<ListOptions>> {
        match self.pages.as_ref().and_then(|p| p.next.as_deref()) {
            Some(next) => Ok(Some(ListOptions::new(page_for_url(next)?, per_page))),
            None => Ok(None),
        }
    }
}

fn page_for_url(link: &str) -> Result<u32> {
    let url = Url::parse(link)?;
    let page = url
        .query_pairs()
        .find(|(key, _)| key == "page")
        .map(|(_, value)| value.into_owned())
        .ok_or_else(|| RegistryError::Url(format!("no page parameter in link '{}'", link)))?;

    page.parse()
        .map_err(|_| RegistryError::Url(format!("invalid page '{}' in link '{}'", page, link)))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub total: u64,
}

/// Top-level pagination fields of a response body; everything else is ignored
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Envelope {
    #[serde(default)]
    pub links: Option<Links>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

impl Envelope {
    /// Bodies that are empty or not JSON objects have no envelope
    pub(crate) fn from_body(body: &[u8]) -> Self {
        Self::decode(body).unwrap_or_default()
    }

    /// Decode the envelope of a JSON entity body. A malformed `links` or
    /// `meta` is an error.
    pub(crate) fn decode(body: &[u8]) -> Result<Self> {
        if body.is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_slice(body)?)
    }
}

/// Response metadata returned alongside every decoded result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: StatusCode,
    pub links: Option<Links>,
    pub meta: Option<Meta>,
}
