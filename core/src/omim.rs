//! Client for the OMIM API.
//!
//! # Design
//! Every endpoint is described by a static `Endpoint`: its handler path and
//! the parameters it cannot do without. `build_*` methods validate against
//! that description and produce an `HttpRequest`; the same-named methods
//! without the prefix also execute it through the client's `Transport`.
//! Parameters the client does not know about are passed through untouched.
//!
//! See <https://omim.org/help/api> for the parameters each handler accepts.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, ResponseStream};
use crate::params::Params;
use crate::transport::Transport;

pub const US_API_HOST: &str = "http://api.omim.org";
pub const EU_API_HOST: &str = "http://api.europe.omim.org";

pub const API_KEY_PARAM: &str = "apiKey";
pub const MIM_NUMBER_PARAM: &str = "mimNumber";
pub const SEARCH_PARAM: &str = "search";

/// Which OMIM host to talk to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum OmimHost {
    #[default]
    Us,
    Europe,
    /// Any other base URL, e.g. a proxy or a local mock.
    Custom(String),
}

impl OmimHost {
    pub fn base_url(&self) -> &str {
        match self {
            OmimHost::Us => US_API_HOST,
            OmimHost::Europe => EU_API_HOST,
            OmimHost::Custom(url) => url.trim_end_matches('/'),
        }
    }
}

impl From<String> for OmimHost {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "us" => OmimHost::Us,
            "eu" | "europe" => OmimHost::Europe,
            _ => OmimHost::Custom(value.trim().to_string()),
        }
    }
}

/// Handler path plus the parameters the handler requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub handler: &'static str,
    pub required: &'static [&'static str],
}

pub const ENTRY: Endpoint = Endpoint {
    handler: "entry",
    required: &[MIM_NUMBER_PARAM],
};
pub const CLINICAL_SYNOPSIS: Endpoint = Endpoint {
    handler: "clinicalSynopsis",
    required: &[MIM_NUMBER_PARAM],
};
pub const SEARCH_ENTRY: Endpoint = Endpoint {
    handler: "search/entry",
    required: &[SEARCH_PARAM],
};
pub const SEARCH_GENE_MAP: Endpoint = Endpoint {
    handler: "search/geneMap",
    required: &[SEARCH_PARAM],
};
pub const SEARCH_CLINICAL_SYNOPSIS: Endpoint = Endpoint {
    handler: "search/clinicalSynopsis",
    required: &[SEARCH_PARAM],
};
/// OMIM caps gene map listings at 100 records per request.
pub const GENE_MAP: Endpoint = Endpoint {
    handler: "genemap",
    required: &[],
};
pub const ALLELIC_VARIANT_LIST: Endpoint = Endpoint {
    handler: "entry/allelicVariantList",
    required: &[MIM_NUMBER_PARAM],
};
pub const REFERENCE_LIST: Endpoint = Endpoint {
    handler: "entry/referenceList",
    required: &[MIM_NUMBER_PARAM],
};

/// The record type a search runs against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchTarget {
    #[default]
    Entry,
    GeneMap,
    ClinicalSynopsis,
}

impl SearchTarget {
    pub fn endpoint(self) -> Endpoint {
        match self {
            SearchTarget::Entry => SEARCH_ENTRY,
            SearchTarget::GeneMap => SEARCH_GENE_MAP,
            SearchTarget::ClinicalSynopsis => SEARCH_CLINICAL_SYNOPSIS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SearchTarget::Entry => "entry",
            SearchTarget::GeneMap => "geneMap",
            SearchTarget::ClinicalSynopsis => "clinicalSynopsis",
        }
    }
}

impl fmt::Display for SearchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchTarget {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "entry" => Ok(SearchTarget::Entry),
            "geneMap" => Ok(SearchTarget::GeneMap),
            "clinicalSynopsis" => Ok(SearchTarget::ClinicalSynopsis),
            other => Err(ApiError::UnknownSearchTarget(other.to_string())),
        }
    }
}

/// Rate-limited client for the OMIM API.
#[derive(Debug, Clone)]
pub struct OmimClient {
    base_url: String,
    api_key: Option<String>,
    transport: Transport,
}

impl OmimClient {
    pub fn new(host: OmimHost) -> Self {
        Self {
            base_url: host.base_url().to_string(),
            api_key: None,
            transport: Transport::default(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            base_url: config.omim_host.base_url().to_string(),
            api_key: config.omim_api_key.clone(),
            transport: Transport::new(config.timeout()),
        }
    }

    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    pub fn with_transport(mut self, transport: Transport) -> Self {
        self.transport = transport;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Validate `params` against `endpoint` and build the GET request.
    ///
    /// The configured API key is added when `params` has none of its own.
    pub fn build(&self, endpoint: Endpoint, mut params: Params) -> Result<HttpRequest, ApiError> {
        for key in endpoint.required {
            params.require(key)?;
        }
        if !params.contains(API_KEY_PARAM) {
            let key = self.api_key.as_deref().ok_or(ApiError::MissingApiKey)?;
            params.insert(API_KEY_PARAM, key);
        }
        let url = format!("{}/api/{}/?{}", self.base_url, endpoint.handler, params.encode());
        Ok(HttpRequest::get(url))
    }

    /// Build and execute a request against `endpoint`.
    pub fn fetch(&self, endpoint: Endpoint, params: Params) -> Result<ResponseStream, ApiError> {
        let req = self.build(endpoint, params)?;
        self.transport.execute(req)
    }

    pub fn build_entry(&self, params: Params) -> Result<HttpRequest, ApiError> {
        self.build(ENTRY, params)
    }

    pub fn build_clinical_synopsis(&self, params: Params) -> Result<HttpRequest, ApiError> {
        self.build(CLINICAL_SYNOPSIS, params)
    }

    pub fn build_search(&self, target: SearchTarget, params: Params) -> Result<HttpRequest, ApiError> {
        self.build(target.endpoint(), params)
    }

    pub fn build_gene_map(&self, params: Params) -> Result<HttpRequest, ApiError> {
        self.build(GENE_MAP, params)
    }

    pub fn build_allelic_variant_list(&self, params: Params) -> Result<HttpRequest, ApiError> {
        self.build(ALLELIC_VARIANT_LIST, params)
    }

    pub fn build_reference_list(&self, params: Params) -> Result<HttpRequest, ApiError> {
        self.build(REFERENCE_LIST, params)
    }

    /// Entries by MIM number. Requires `mimNumber`.
    pub fn entry(&self, params: Params) -> Result<ResponseStream, ApiError> {
        self.fetch(ENTRY, params)
    }

    /// Clinical synopsis for a MIM number. Requires `mimNumber`.
    pub fn clinical_synopsis(&self, params: Params) -> Result<ResponseStream, ApiError> {
        self.fetch(CLINICAL_SYNOPSIS, params)
    }

    /// Search entries, gene map or clinical synopses. Requires `search`.
    pub fn search(&self, target: SearchTarget, params: Params) -> Result<ResponseStream, ApiError> {
        self.fetch(target.endpoint(), params)
    }

    pub fn gene_map(&self, params: Params) -> Result<ResponseStream, ApiError> {
        self.fetch(GENE_MAP, params)
    }

    pub fn allelic_variant_list(&self, params: Params) -> Result<ResponseStream, ApiError> {
        self.fetch(ALLELIC_VARIANT_LIST, params)
    }

    pub fn reference_list(&self, params: Params) -> Result<ResponseStream, ApiError> {
        self.fetch(REFERENCE_LIST, params)
    }
}
