//! Catalog integration tests.

use bookscape::catalog::{count_placeholders, QueryCatalog, QueryKind};
use bookscape::db::DatabaseBackend;

#[test]
fn test_all_twenty_analytics_resolve_by_label() {
    let catalog = QueryCatalog::load().unwrap();
    let labels: Vec<&str> = catalog.analytics().map(|def| def.label).collect();
    assert_eq!(labels.len(), 20);

    for (index, label) in labels.iter().enumerate() {
        let def = catalog.lookup(label).unwrap();
        assert_eq!(def.kind, QueryKind::Analytic(index as u8 + 1));
        assert!(label.starts_with(&format!("{}. ", index + 1)));

        for backend in [DatabaseBackend::MySql, DatabaseBackend::Sqlite] {
            let placeholders = count_placeholders(def.template_for(backend)).unwrap();
            assert_eq!(placeholders > 0, def.requires_param, "{label}");
        }
    }
}

#[test]
fn test_templates_only_read() {
    let catalog = QueryCatalog::load().unwrap();
    for def in catalog.iter() {
        let upper = def.template.to_uppercase();
        assert!(upper.trim_start().starts_with("SELECT"), "{}", def.label);
        assert!(upper.contains("FROM HISTORY_BOOK"), "{}", def.label);
    }
}

#[test]
fn test_keyword_definitions() {
    let catalog = QueryCatalog::load().unwrap();
    let search = catalog.explore_search();
    assert!(search.template.contains("LIKE ?"));

    let titled = catalog
        .lookup("14. Books with a Specific Keyword in the Title")
        .unwrap();
    assert!(titled.requires_param);
    assert!(titled.template.contains("LIKE ?"));
}
