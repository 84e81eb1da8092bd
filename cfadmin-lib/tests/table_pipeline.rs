//! Search, filter and sort behaviour of the table engine.

use std::sync::{Arc, Mutex};

use cfadmin_lib::config::{EngineConfig, SearchScope};
use cfadmin_lib::model::{Row, Value};
use cfadmin_lib::table::{Column, Direction, FilterDescriptor, RowHooks, SortState, TableEngine};

fn names(engine: &TableEngine, key: &str) -> Vec<String> {
    engine
        .view()
        .rows
        .iter()
        .map(|row| row.get(key).map(|v| v.to_string()).unwrap_or_default())
        .collect()
}

fn store_rows() -> Vec<Row> {
    vec![
        Row::new().set("id", 1).set("name", "Acme").set("status", "active").set("uf", "SP"),
        Row::new().set("id", 2).set("name", "Beta").set("status", "active").set("uf", "RJ"),
        Row::new().set("id", 3).set("name", "Gama").set("status", "inactive").set("uf", "SP"),
    ]
}

fn store_columns() -> Vec<Column> {
    vec![
        Column::new("name", "Nome"),
        Column::new("status", "Status"),
        Column::new("uf", "UF"),
    ]
}

#[test]
fn test_search_is_case_insensitive_substring() {
    let mut engine = TableEngine::new(vec![Column::new("name", "Nome")], vec![
        Row::new().set("name", "Acme"),
        Row::new().set("name", "Beta"),
    ]);

    engine.set_query("cm");
    assert_eq!(names(&engine, "name"), vec!["Acme"]);

    engine.set_query("CM");
    assert_eq!(names(&engine, "name"), vec!["Acme"]);

    engine.set_query("");
    assert_eq!(engine.view().total_count, 2);
}

#[test]
fn test_search_matches_any_column() {
    let mut engine = TableEngine::new(store_columns(), store_rows());
    engine.set_query("rj");
    assert_eq!(names(&engine, "name"), vec!["Beta"]);
}

#[test]
fn test_search_scope_columns_ignores_undeclared_fields() {
    let rows = vec![
        Row::new().set("name", "Acme").set("notes", "parceiro antigo"),
        Row::new().set("name", "Beta"),
    ];

    let mut engine = TableEngine::new(vec![Column::new("name", "Nome")], rows.clone());
    engine.set_query("antigo");
    assert_eq!(engine.view().total_count, 0);

    let mut engine = TableEngine::new(vec![Column::new("name", "Nome")], rows)
        .with_config(EngineConfig::default().with_search_scope(SearchScope::AllFields));
    engine.set_query("antigo");
    assert_eq!(names(&engine, "name"), vec!["Acme"]);
}

#[test]
fn test_search_without_columns_uses_every_field() {
    let mut engine = TableEngine::new(Vec::new(), vec![
        Row::new().set("name", "Acme").set("families", 120),
        Row::new().set("name", "Beta").set("families", 8),
    ]);
    engine.set_query("12");
    assert_eq!(names(&engine, "name"), vec!["Acme"]);
}

#[test]
fn test_filters_compose_with_and() {
    let rows = vec![
        Row::new().set("status", "active").set("uf", "SP"),
        Row::new().set("status", "active").set("uf", "RJ"),
        Row::new().set("status", "inactive").set("uf", "SP"),
    ];
    let columns = vec![Column::new("status", "Status"), Column::new("uf", "UF")];

    let mut both = TableEngine::new(columns.clone(), rows.clone());
    both.filter_by("status", "active");
    both.filter_by("uf", "SP");
    let both: Vec<Row> = both.view().rows.into_iter().cloned().collect();

    let mut status_only = TableEngine::new(columns.clone(), rows.clone());
    status_only.filter_by("status", "active");
    let mut uf_only = TableEngine::new(columns, rows);
    uf_only.filter_by("uf", "SP");

    let status_rows: Vec<Row> = status_only.view().rows.into_iter().cloned().collect();
    let intersection: Vec<Row> = uf_only
        .view()
        .rows
        .into_iter()
        .filter(|row| status_rows.contains(row))
        .cloned()
        .collect();

    assert_eq!(both.len(), 1);
    assert_eq!(both, intersection);
    assert_eq!(both[0].get_string("uf").unwrap(), Some("SP"));
}

#[test]
fn test_switch_filter_compares_booleans() {
    let mut engine = TableEngine::new(vec![Column::new("name", "Nome")], vec![
        Row::new().set("name", "Acme").set("featured", true),
        Row::new().set("name", "Beta").set("featured", false),
        Row::new().set("name", "Gama"),
    ])
    .with_filters([FilterDescriptor::switch("featured", "Destaque")]);

    engine.filter_by("featured", true);
    assert_eq!(names(&engine, "name"), vec!["Acme"]);

    engine.filter_by("featured", false);
    assert_eq!(names(&engine, "name"), vec!["Beta"]);
}

#[test]
fn test_empty_string_filter_clears_axis() {
    let mut engine = TableEngine::new(store_columns(), store_rows());
    engine.filter_by("uf", "SP");
    assert_eq!(engine.view().total_count, 2);

    engine.set_filter("uf", Some(Value::from("")));
    assert_eq!(engine.view().total_count, 3);
    assert!(engine.state().filters.is_empty());

    engine.filter_by("uf", "RJ");
    engine.set_filter("uf", None);
    assert_eq!(engine.view().total_count, 3);
}

#[test]
fn test_filter_reads_through_column_accessor() {
    let column = Column::new("storeName", "Loja").with_accessor(|row| {
        row.get_path("store.name").unwrap_or_default()
    });
    let mut engine = TableEngine::new(vec![column], vec![
        Row::new().set("store", Value::Json(serde_json::json!({"name": "Acme"}))),
        Row::new().set("store", Value::Json(serde_json::json!({"name": "Beta"}))),
    ]);

    engine.filter_by("storeName", "Beta");
    let view = engine.view();
    assert_eq!(view.total_count, 1);
    assert_eq!(view.rows[0].get_path("store.name"), Some(Value::from("Beta")));
}

#[test]
fn test_sort_is_stable() {
    let mut engine = TableEngine::new(vec![Column::new("n", "N")], vec![
        Row::new().set("n", 1).set("id", "a"),
        Row::new().set("n", 1).set("id", "b"),
        Row::new().set("n", 0).set("id", "c"),
    ]);

    engine.set_sort("n");
    assert_eq!(names(&engine, "id"), vec!["c", "a", "b"]);

    engine.set_sort("n");
    assert_eq!(names(&engine, "id"), vec!["a", "b", "c"]);
}

#[test]
fn test_sort_toggle_and_reset() {
    let rows = vec![
        Row::new().set("n", 2).set("m", "b"),
        Row::new().set("n", 3).set("m", "a"),
        Row::new().set("n", 1).set("m", "c"),
    ];
    let mut engine = TableEngine::new(vec![Column::new("n", "N"), Column::new("m", "M")], rows);

    engine.set_sort("n");
    assert_eq!(engine.state().sort, Some(SortState::asc("n")));
    assert_eq!(names(&engine, "n"), vec!["1", "2", "3"]);

    engine.set_sort("n");
    assert_eq!(engine.state().sort.as_ref().map(|s| s.direction), Some(Direction::Desc));
    assert_eq!(names(&engine, "n"), vec!["3", "2", "1"]);

    engine.set_sort("m");
    assert_eq!(engine.state().sort, Some(SortState::asc("m")));
    assert_eq!(names(&engine, "m"), vec!["a", "b", "c"]);

    engine.clear_sort();
    assert_eq!(names(&engine, "n"), vec!["2", "3", "1"]);
}

#[test]
fn test_sort_ignores_unsortable_and_unknown_columns() {
    let mut engine = TableEngine::new(
        vec![Column::new("name", "Nome"), Column::new("cnpj", "CNPJ").unsortable()],
        store_rows(),
    );

    engine.set_sort("cnpj");
    assert_eq!(engine.state().sort, None);

    engine.set_sort("name");
    engine.set_sort("cnpj");
    engine.set_sort("nope");
    assert_eq!(engine.state().sort, Some(SortState::asc("name")));
}

#[test]
fn test_sort_orders_by_type() {
    let date = |s: &str| Value::from_json(serde_json::json!(s));
    let mut engine = TableEngine::new(
        vec![Column::new("n", "N"), Column::new("name", "Nome"), Column::new("at", "Em")],
        vec![
            Row::new().set("n", 10).set("name", "beta").set("at", date("2024-02-01")),
            Row::new().set("n", 9).set("name", "Alfa").set("at", date("2023-12-31")),
            Row::new().set("n", 100).set("name", "Gama").set("at", date("2024-01-15")),
        ],
    );

    engine.set_sort("n");
    assert_eq!(names(&engine, "n"), vec!["9", "10", "100"]);

    engine.set_sort("name");
    assert_eq!(names(&engine, "name"), vec!["Alfa", "beta", "Gama"]);

    engine.set_sort("at");
    assert_eq!(names(&engine, "name"), vec!["Alfa", "Gama", "beta"]);
}

#[test]
fn test_sort_puts_nulls_last() {
    let mut engine = TableEngine::new(vec![Column::new("n", "N")], vec![
        Row::new().set("id", "none"),
        Row::new().set("id", "two").set("n", 2),
        Row::new().set("id", "one").set("n", 1),
    ]);

    engine.set_sort("n");
    assert_eq!(names(&engine, "id"), vec!["one", "two", "none"]);
    engine.set_sort("n");
    assert_eq!(names(&engine, "id"), vec!["two", "one", "none"]);
}

#[test]
fn test_query_keeps_filters_and_sort() {
    let mut engine = TableEngine::new(store_columns(), store_rows());
    engine.filter_by("uf", "SP");
    engine.set_sort("name");
    engine.set_query("a");

    assert_eq!(engine.state().filters.len(), 1);
    assert!(engine.state().sort.is_some());
    assert_eq!(names(&engine, "name"), vec!["Acme", "Gama"]);
}

#[test]
fn test_view_is_idempotent() {
    let mut engine = TableEngine::new(store_columns(), store_rows());
    engine.set_sort("name");
    engine.set_page_size(2);

    assert_eq!(engine.view(), engine.view());
}

#[test]
fn test_view_follows_replaced_rows() {
    let mut engine = TableEngine::new(store_columns(), store_rows());
    engine.set_query("acme");
    assert_eq!(engine.view().total_count, 1);

    engine.set_rows(vec![Row::new().set("name", "Acme Atacado"), Row::new().set("name", "Acme")]);
    let view = engine.view();
    assert_eq!(view.total_count, 2);
    assert_eq!(view.unfiltered_count, 2);
}

#[test]
fn test_cells_and_headers() {
    let engine = TableEngine::new(
        vec![
            Column::new("name", "Nome"),
            Column::new("active", "Status").with_render(|value, _| match value {
                Value::Bool(true) => "Ativo".to_string(),
                _ => "Inativo".to_string(),
            }),
            Column::new("note", "Obs"),
        ],
        Vec::new(),
    );

    assert_eq!(engine.headers(), vec!["Nome", "Status", "Obs"]);
    let row = Row::new().set("name", "Acme").set("active", true);
    assert_eq!(engine.cells(&row), vec!["Acme", "Ativo", ""]);
}

#[test]
fn test_row_hooks_receive_requests() {
    let calls: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    let edits = Arc::clone(&calls);
    let deletes = Arc::clone(&calls);
    let toggles = Arc::clone(&calls);
    let hooks = RowHooks::new()
        .on_edit(move |row| {
            edits.lock().unwrap().push(format!("edit {}", row.get("id").unwrap()));
        })
        .on_delete(move |id| deletes.lock().unwrap().push(format!("delete {}", id)))
        .on_toggle(move |id, field, value| {
            toggles.lock().unwrap().push(format!("toggle {} {} {}", id, field, value));
        });

    let engine = TableEngine::new(store_columns(), Vec::new()).with_hooks(hooks);
    let row = Row::new().set("id", 7).set("active", true).set("name", "Acme");

    assert!(engine.request_edit(&row));
    assert!(engine.request_delete(&row));
    assert!(engine.request_toggle(&row, "active"));
    assert!(!engine.request_toggle(&row, "name"));
    assert!(!engine.request_delete(&Row::new().set("name", "no id")));

    assert_eq!(
        *calls.lock().unwrap(),
        vec!["edit 7", "delete 7", "toggle 7 active false"]
    );
}

#[test]
fn test_requests_without_hooks_are_dropped() {
    let engine = TableEngine::new(store_columns(), Vec::new());
    let row = Row::new().set("id", 1).set("active", Value::Null);
    assert!(!engine.request_edit(&row));
    assert!(!engine.request_toggle(&row, "active"));
}

#[test]
fn test_sort_by_sets_direction_explicitly() {
    let mut engine = TableEngine::new(
        vec![Column::new("name", "Nome"), Column::new("cnpj", "CNPJ").unsortable()],
        store_rows(),
    );

    assert!(engine.sort_by("name", Direction::Desc));
    assert_eq!(names(&engine, "name"), vec!["Gama", "Beta", "Acme"]);
    assert!(engine.sort_by("name", Direction::Desc));
    assert_eq!(engine.state().sort, Some(SortState::desc("name")));

    assert!(!engine.sort_by("cnpj", Direction::Asc));
    assert!(!engine.sort_by("nope", Direction::Asc));
    assert_eq!(engine.state().sort, Some(SortState::desc("name")));
}

#[test]
fn test_search_matches_promoted_dates_by_payload_text() {
    let rows = cfadmin_lib::model::Row::list_from_json_str(
        r#"[
            {"title": "Natal", "start_date": "2024-03-01T22:30:00-03:00"},
            {"title": "Páscoa", "start_date": "2024-03-02T09:00:00-03:00"}
        ]"#,
        cfadmin_lib::model::KeyCase::Camel,
    )
    .unwrap();
    let mut engine = TableEngine::new(
        vec![Column::new("title", "Campanha"), Column::new("startDate", "Início")],
        rows,
    );

    engine.set_query("22:30");
    assert_eq!(names(&engine, "title"), vec!["Natal"]);

    engine.set_query("2024-03-01");
    assert_eq!(names(&engine, "title"), vec!["Natal"]);

    engine.set_query("");
    engine.set_sort("startDate");
    engine.set_sort("startDate");
    assert_eq!(names(&engine, "title"), vec!["Páscoa", "Natal"]);
}
