//! Catalog lookup interface and the in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use talentpo_core::{DomainError, DomainResult};

use crate::ids::{ClientId, ReqId};
use crate::model::{Client, ReqCatalogEntry, TalentCatalogEntry};

/// Read-only access to client / REQ / talent reference data.
///
/// Lookups never fail: unknown identifiers yield empty lists or `None`.
pub trait CatalogLookup {
    /// All clients, in catalog order.
    fn clients(&self) -> &[Client];

    /// Talents eligible for `req`, in catalog order.
    ///
    /// REQ ids are only unique per client; when two clients share one, this
    /// answers for the first. Use [`find_req`](Self::find_req) for a REQ of a
    /// known client.
    fn talents_for_req(&self, req: &ReqId) -> &[TalentCatalogEntry];

    fn client(&self, id: &ClientId) -> Option<&Client> {
        self.clients().iter().find(|c| &c.id == id)
    }

    /// REQs open for `client`, in catalog order.
    fn reqs_for_client(&self, client: &ClientId) -> &[ReqCatalogEntry] {
        self.client(client).map(|c| c.reqs.as_slice()).unwrap_or(&[])
    }

    /// A REQ, but only if it belongs to `client`.
    fn find_req(&self, client: &ClientId, req: &ReqId) -> Option<&ReqCatalogEntry> {
        self.reqs_for_client(client).iter().find(|r| &r.id == req)
    }
}

impl<T: CatalogLookup + ?Sized> CatalogLookup for &T {
    fn clients(&self) -> &[Client] {
        (**self).clients()
    }

    fn talents_for_req(&self, req: &ReqId) -> &[TalentCatalogEntry] {
        (**self).talents_for_req(req)
    }
}

impl<T: CatalogLookup + ?Sized> CatalogLookup for Arc<T> {
    fn clients(&self) -> &[Client] {
        (**self).clients()
    }

    fn talents_for_req(&self, req: &ReqId) -> &[TalentCatalogEntry] {
        (**self).talents_for_req(req)
    }
}

/// Catalog held fully in memory, indexed by REQ id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticCatalog {
    clients: Vec<Client>,
    // req id -> (client index, req index); first occurrence wins
    req_index: HashMap<ReqId, (usize, usize)>,
}

impl StaticCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_clients(clients: Vec<Client>) -> Self {
        let mut req_index = HashMap::new();
        for (ci, client) in clients.iter().enumerate() {
            for (ri, req) in client.reqs.iter().enumerate() {
                if req_index.contains_key(&req.id) {
                    tracing::warn!(req_id = %req.id, client_id = %client.id, "duplicate REQ id in catalog; keeping first");
                    continue;
                }
                req_index.insert(req.id.clone(), (ci, ri));
            }
        }

        tracing::debug!(
            clients = clients.len(),
            reqs = req_index.len(),
            "catalog loaded"
        );

        Self { clients, req_index }
    }

    /// Parse the JSON client list (`[{id, name, reqs: [...]}, ...]`).
    pub fn from_json(json: &str) -> DomainResult<Self> {
        let clients: Vec<Client> = serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("catalog JSON: {e}")))?;
        Ok(Self::from_clients(clients))
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

impl CatalogLookup for StaticCatalog {
    fn clients(&self) -> &[Client] {
        &self.clients
    }

    fn talents_for_req(&self, req: &ReqId) -> &[TalentCatalogEntry] {
        match self.req_index.get(req) {
            Some(&(ci, ri)) => &self.clients[ci].reqs[ri].talents,
            None => &[],
        }
    }
}
