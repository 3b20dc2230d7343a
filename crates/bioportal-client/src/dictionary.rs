//! [`BioPortalDictionary`]: the three public dictionary operations.
//!
//! Each operation validates nothing further (an [`Options`] is already
//! well-formed), builds its request group, waits on the [`Dispatcher`] join
//! barrier, and hands the slots to the matching pipeline finalizer.

use std::sync::Arc;

use bioportal_core::config::ClientConfig;
use bioportal_core::error::DictionaryResult;
use bioportal_core::mapper::{map_to_dict_infos, map_to_entries, map_to_matches};
use bioportal_core::options::Options;
use bioportal_core::pipeline;
use bioportal_core::types::{DictInfo, EntryRecord, Items, MatchRecord};
use bioportal_core::url::{Endpoint, RequestUrl, UrlBuilder};
use tracing::{debug, info};

use crate::fanout::Dispatcher;
use crate::transport::{HyperTransport, Transport};

/// A BioPortal-backed dictionary. Cheap to clone; holds no per-query state.
#[derive(Clone)]
pub struct BioPortalDictionary {
    config: Arc<ClientConfig>,
    urls: UrlBuilder,
    dispatcher: Dispatcher,
}

impl BioPortalDictionary {
    /// Client over the bundled plain-HTTP transport.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, Arc::new(HyperTransport::new()))
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        let urls = UrlBuilder::new(config.endpoints());
        let dispatcher = Dispatcher::new(transport, config.authorization(), config.log);
        Self {
            config: Arc::new(config),
            urls,
            dispatcher,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Free-text search. An empty query returns no items without any request.
    pub async fn get_matches_for_string(&self, query: &str, options: &Options) -> DictionaryResult<Items<MatchRecord>> {
        if query.is_empty() {
            return Ok(Items::empty());
        }

        let (urls, endpoints) = split_requests(self.urls.match_urls(query, options));
        let query = query.to_string();
        let slots = self
            .dispatcher
            .run(urls, move |i, body| map_to_matches(body, endpoints[i], &query))
            .await?;

        Ok(Items::new(pipeline::finalize_matches(slots, options, &self.config.limits)))
    }

    /// Entries by exact id (`filter.id`), or a bulk listing when no id is
    /// given.
    pub async fn get_entries(&self, options: &Options) -> DictionaryResult<Items<EntryRecord>> {
        let options = match pipeline::get_all_results(options, &self.config.limits) {
            Some(overridden) => {
                info!(
                    page = ?overridden.page,
                    per_page = ?overridden.per_page,
                    "getAllResults: fetching every dictionary for the requested ids"
                );
                overridden
            }
            None => options.clone(),
        };

        let (urls, endpoints) = split_requests(self.urls.entry_urls(&options));
        let mapping_options = options.clone();
        let slots = self
            .dispatcher
            .run(urls, move |i, body| map_to_entries(body, endpoints[i], &mapping_options))
            .await?;

        Ok(Items::new(pipeline::finalize_entries(slots, &options, &self.config.limits)))
    }

    /// Information about the dictionaries in `filter.id`, or about every
    /// dictionary BioPortal knows.
    pub async fn get_dict_infos(&self, options: &Options) -> DictionaryResult<Items<DictInfo>> {
        let urls = self.urls.dict_info_urls(options);
        if pipeline::dict_infos_past_end(urls.len(), options, &self.config.limits) {
            debug!(urls = urls.len(), page = ?options.page, "requested page lies past the last dictionary");
            return Ok(Items::empty());
        }

        let slots = self.dispatcher.run(urls, |_, body| map_to_dict_infos(body)).await?;
        let infos = slots.into_iter().flatten().collect();

        Ok(Items::new(pipeline::paginate_dict_infos(infos, options, &self.config.limits)))
    }
}

fn split_requests(requests: Vec<RequestUrl>) -> (Vec<String>, Vec<Endpoint>) {
    requests.into_iter().map(|r| (r.url, r.endpoint)).unzip()
}
