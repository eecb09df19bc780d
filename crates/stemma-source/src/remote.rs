/*
 * remote.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Sections fetched from a Stemmarest repository over HTTP.
//!
//! Endpoints, relative to `<repository>/tradition/<id>/section/<id>`:
//!
//! - `lemmareadings?final=true`: the edited text
//! - `variants?<options>`: the variant list
//! - `annotations`: all annotations on the section

use std::io::Read;

use serde::de::DeserializeOwned;
use stemma_apparatus::{Annotation, Reading, VariantList};
use tracing::debug;

use crate::config::{Credentials, QueryOption, RemoteConfig};
use crate::error::{Result, SourceError};
use crate::{EditionSource, parse_json};

pub struct RemoteRepository {
    section_url: String,
    credentials: Option<Credentials>,
    variant_options: Vec<QueryOption>,
    agent: ureq::Agent,
}

impl RemoteRepository {
    pub fn new(config: RemoteConfig) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(config.timeout).build();
        RemoteRepository {
            section_url: config.section_url(),
            credentials: config.credentials,
            variant_options: config.variant_options,
            agent,
        }
    }

    pub fn section_url(&self) -> &str {
        &self.section_url
    }

    fn get<T: DeserializeOwned>(
        &self,
        list: &'static str,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}/{}", self.section_url, endpoint);
        let mut request = self.agent.get(&url).set("Accept", "application/json");
        if let Some(credentials) = &self.credentials {
            request = request.set("Authorization", &credentials.authorization());
        }
        for (name, value) in query {
            request = request.query(name, value);
        }

        debug!(url = %url, "Fetching {}", list);
        let response = request.call().map_err(|e| match e {
            ureq::Error::Status(status, _) => SourceError::Status {
                url: url.clone(),
                status,
            },
            ureq::Error::Transport(transport) => SourceError::Transport {
                url: url.clone(),
                message: transport.to_string(),
            },
        })?;

        let mut body = String::new();
        response
            .into_reader()
            .read_to_string(&mut body)
            .map_err(|e| SourceError::Transport {
                url: url.clone(),
                message: format!("failed to read response body: {}", e),
            })?;
        parse_json(list, &url, &body)
    }
}

impl EditionSource for RemoteRepository {
    fn base_readings(&self) -> Result<Vec<Reading>> {
        self.get("base readings", "lemmareadings", &[("final", "true")])
    }

    fn variant_list(&self) -> Result<VariantList> {
        let query: Vec<(&str, &str)> = self
            .variant_options
            .iter()
            .map(|option| (option.name.as_str(), option.value.as_str()))
            .collect();
        self.get("variant list", "variants", &query)
    }

    fn annotations(&self) -> Result<Vec<Annotation>> {
        self.get("annotations", "annotations", &[])
    }
}
