#![allow(dead_code)]

use std::sync::Arc;

use talentpo_catalog::StaticCatalog;
use talentpo_core::SectionId;
use talentpo_purchasing::{FormSession, HeaderField, PoType};

pub const CATALOG_JSON: &str = r#"[
    {
        "id": 1,
        "name": "Acme Corp",
        "reqs": [
            {
                "id": "REQ-1",
                "title": "Backend Engineer",
                "talents": [
                    {"id": "T1", "name": "Asha Rao", "email": "asha@example.com", "role": "Senior Engineer"},
                    {"id": "T2", "name": "Ben Ode", "email": "ben@example.com"},
                    {"id": "T3", "name": "Chen Li", "email": "chen@example.com", "role": "Engineer"}
                ]
            },
            {
                "id": "REQ-2",
                "title": "Data Analyst",
                "talents": [
                    {"id": "T4", "name": "Dana Fox", "email": "dana@example.com"}
                ]
            }
        ]
    },
    {
        "id": 2,
        "name": "Globex",
        "reqs": [
            {"id": "REQ-9", "title": "Designer", "talents": [{"id": 90, "name": "Eve", "email": "eve@example.com"}]},
            {"id": "REQ-1", "title": "Design Lead", "talents": [
                {"id": 91, "name": "Fay", "email": "fay@example.com"},
                {"id": 92, "name": "Gus", "email": "gus@example.com"}
            ]}
        ]
    }
]"#;

pub fn catalog() -> Arc<StaticCatalog> {
    Arc::new(StaticCatalog::from_json(CATALOG_JSON).expect("fixture catalog parses"))
}

pub fn session() -> FormSession<Arc<StaticCatalog>> {
    FormSession::new(catalog())
}

/// Client chosen and every header field valid; REQ sections untouched.
pub fn filled_session(po_type: PoType) -> FormSession<Arc<StaticCatalog>> {
    let mut s = session();
    s.select_client("1");
    s.set_po_type(Some(po_type));
    for (field, value) in [
        (HeaderField::PoNumber, "PO-2024/17"),
        (HeaderField::ReceivedOn, "2024-01-03"),
        (HeaderField::ReceivedFromName, "Priya Nair"),
        (HeaderField::ReceivedFromEmail, "priya@acme.example"),
        (HeaderField::PoStartDate, "2024-01-01"),
        (HeaderField::PoEndDate, "2024-12-31"),
        (HeaderField::Budget, "45000"),
    ] {
        s.set_field(field, value).expect("valid header input");
    }
    s
}

pub fn first_section(s: &FormSession<Arc<StaticCatalog>>) -> SectionId {
    s.form().req_sections()[0].section_id()
}
