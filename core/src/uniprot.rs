//! Client for the UniProt web services.
//!
//! # Design
//! Requests go to `{host}/{dataset}/{id}{.format}`. Parameters never travel in
//! the query string: a request without parameters is a plain GET, anything
//! else is POSTed as a form body. Each request carries a `User-Agent` that
//! names a contact when one is known, as UniProt asks of programmatic users.

use std::fmt;
use std::str::FromStr;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, ResponseStream};
use crate::params::{ParamValue, Params};
use crate::transport::Transport;

pub const DEFAULT_UNIPROT_HOST: &str = "http://www.uniprot.org";

pub const ENTRY_DATASET: &str = "uniprot";
pub const MAPPING_DATASET: &str = "mapping";

pub const CONTACT_PARAM: &str = "contact";

const USER_AGENT: &str = concat!("bioquery/", env!("CARGO_PKG_VERSION"));

/// File formats an entry can be retrieved in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryFormat {
    Html,
    Tab,
    Xls,
    Fasta,
    Gff,
    Txt,
    Xml,
    Rdf,
    List,
    Rss,
}

impl EntryFormat {
    pub fn extension(self) -> &'static str {
        match self {
            EntryFormat::Html => "html",
            EntryFormat::Tab => "tab",
            EntryFormat::Xls => "xls",
            EntryFormat::Fasta => "fasta",
            EntryFormat::Gff => "gff",
            EntryFormat::Txt => "txt",
            EntryFormat::Xml => "xml",
            EntryFormat::Rdf => "rdf",
            EntryFormat::List => "list",
            EntryFormat::Rss => "rss",
        }
    }
}

impl fmt::Display for EntryFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for EntryFormat {
    type Err = ApiError;

    /// Accepts the bare name or the extension with its leading dot.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_prefix('.').unwrap_or(s);
        let format = match name.to_ascii_lowercase().as_str() {
            "html" => EntryFormat::Html,
            "tab" => EntryFormat::Tab,
            "xls" => EntryFormat::Xls,
            "fasta" => EntryFormat::Fasta,
            "gff" => EntryFormat::Gff,
            "txt" => EntryFormat::Txt,
            "xml" => EntryFormat::Xml,
            "rdf" => EntryFormat::Rdf,
            "list" => EntryFormat::List,
            "rss" => EntryFormat::Rss,
            _ => return Err(ApiError::UnknownFormat(s.to_string())),
        };
        Ok(format)
    }
}

/// Rate-limited client for UniProt.
#[derive(Debug, Clone)]
pub struct UniprotClient {
    base_url: String,
    contact: Option<String>,
    transport: Transport,
}

impl Default for UniprotClient {
    fn default() -> Self {
        Self::new(DEFAULT_UNIPROT_HOST)
    }
}

impl UniprotClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            contact: None,
            transport: Transport::default(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            base_url: config.uniprot_host.trim_end_matches('/').to_string(),
            contact: config.contact.clone(),
            transport: Transport::new(config.timeout()),
        }
    }

    pub fn with_contact(mut self, contact: &str) -> Self {
        self.contact = Some(contact.to_string());
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

    /// Build a request for `{dataset}/{id}{.format}` carrying `params`.
    pub fn build(
        &self,
        dataset: &str,
        id: &str,
        format: Option<EntryFormat>,
        params: Params,
    ) -> Result<HttpRequest, ApiError> {
        let suffix = match format {
            Some(_) if id.is_empty() => return Err(ApiError::FormatWithoutId),
            Some(format) => format!(".{format}"),
            None => String::new(),
        };
        let url = format!("{}/{}/{}{}", self.base_url, dataset, urlencoding::encode(id), suffix);
        let user_agent = self.user_agent(&params);

        let req = if params.is_empty() {
            HttpRequest::get(url)
        } else {
            HttpRequest::post_form(url, params.encode())
        };
        Ok(req.with_header("user-agent", &user_agent))
    }

    fn user_agent(&self, params: &Params) -> String {
        match params.get(CONTACT_PARAM).or(self.contact.as_deref()) {
            Some(contact) => format!("{USER_AGENT} ({contact})"),
            None => USER_AGENT.to_string(),
        }
    }

    pub fn build_entry(
        &self,
        id: &str,
        format: Option<EntryFormat>,
        params: Params,
    ) -> Result<HttpRequest, ApiError> {
        self.build(ENTRY_DATASET, id, format, params)
    }

    pub fn build_query(&self, query: &str, params: Params) -> Result<HttpRequest, ApiError> {
        self.build(ENTRY_DATASET, "", None, params.with("query", query))
    }

    /// `ids` may be one space-delimited string or a collection of identifiers.
    pub fn build_mapping(
        &self,
        from: &str,
        to: &str,
        ids: impl Into<ParamValue>,
        params: Params,
    ) -> Result<HttpRequest, ApiError> {
        let params = params.with("from", from).with("to", to).with("query", ids);
        self.build(MAPPING_DATASET, "", None, params)
    }

    /// Retrieve one entry by accession, in `format` or the server default.
    pub fn entry(
        &self,
        id: &str,
        format: Option<EntryFormat>,
        params: Params,
    ) -> Result<ResponseStream, ApiError> {
        let req = self.build_entry(id, format, params)?;
        self.transport.execute(req)
    }

    /// Search UniProtKB.
    pub fn query(&self, query: &str, params: Params) -> Result<ResponseStream, ApiError> {
        let req = self.build_query(query, params)?;
        self.transport.execute(req)
    }

    /// Map identifiers between databases, e.g. `ACC` to `MIM_ID`.
    pub fn mapping(
        &self,
        from: &str,
        to: &str,
        ids: impl Into<ParamValue>,
        params: Params,
    ) -> Result<ResponseStream, ApiError> {
        let req = self.build_mapping(from, to, ids, params)?;
        self.transport.execute(req)
    }
}
