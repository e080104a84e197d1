//! Shared fixtures for unit tests.

use talentpo_catalog::{Client, ClientId, ReqCatalogEntry, ReqId, StaticCatalog, TalentCatalogEntry, TalentId};

pub(crate) fn talent(id: &str) -> TalentCatalogEntry {
    TalentCatalogEntry {
        id: TalentId::new(id),
        name: format!("Talent {id}"),
        email: format!("{}@example.com", id.to_lowercase()),
        role: None,
    }
}

/// Two clients:
/// - `acme`: REQ `A` (T1, T2, T3), REQ `B` (T4, T5), REQ `BROKEN` (duplicate ids)
/// - `globex`: REQ `G` (T9)
pub(crate) fn catalog() -> StaticCatalog {
    StaticCatalog::from_clients(vec![
        Client {
            id: ClientId::new("acme"),
            name: "Acme Corp".to_string(),
            reqs: vec![
                ReqCatalogEntry {
                    id: ReqId::new("A"),
                    title: "Backend Engineer".to_string(),
                    talents: vec![talent("T1"), talent("T2"), talent("T3")],
                },
                ReqCatalogEntry {
                    id: ReqId::new("B"),
                    title: "Data Analyst".to_string(),
                    talents: vec![talent("T4"), talent("T5")],
                },
                ReqCatalogEntry {
                    id: ReqId::new("BROKEN"),
                    title: "Broken".to_string(),
                    talents: vec![talent("T6"), talent("T6")],
                },
            ],
        },
        Client {
            id: ClientId::new("globex"),
            name: "Globex".to_string(),
            reqs: vec![ReqCatalogEntry {
                id: ReqId::new("G"),
                title: "Designer".to_string(),
                talents: vec![talent("T9")],
            }],
        },
    ])
}
