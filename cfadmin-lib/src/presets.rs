//! Table declarations for the dashboard's entities.
//!
//! Each function returns the columns, filters and initial sort of one admin
//! table. Field names follow the camelCase view models, so rows should be
//! built with [`KeyCase::Camel`](crate::model::KeyCase::Camel) when they
//! come straight from the snake_case API.

use crate::model::Row;
use crate::model::Value;
use crate::table::Column;
use crate::table::FilterDescriptor;
use crate::table::FilterOption;
use crate::table::SortState;
use crate::table::TableSpec;

/// Brazilian federative units, as used by the `uf` filters.
pub const UFS: [&str; 27] = [
    "AC", "AL", "AM", "AP", "BA", "CE", "DF", "ES", "GO", "MA", "MG", "MS", "MT", "PA", "PB", "PE",
    "PI", "PR", "RJ", "RN", "RO", "RR", "RS", "SC", "SE", "SP", "TO",
];

/// Names of every preset, in menu order.
pub const NAMES: [&str; 5] = ["stores", "oscs", "partnerships", "campaigns", "external_stores"];

/// Looks a preset up by name.
pub fn by_name(name: &str) -> Option<TableSpec> {
    match name {
        "stores" => Some(stores()),
        "oscs" => Some(oscs()),
        "partnerships" => Some(partnerships()),
        "campaigns" => Some(campaigns()),
        "external_stores" => Some(external_stores()),
        _ => None,
    }
}

/// Stores (supermarkets and retailers donating food).
pub fn stores() -> TableSpec {
    let status = status_filter(&[("active", "Ativo"), ("inactive", "Inativo")]);
    TableSpec::new(
        "stores",
        vec![
            Column::new("name", "Nome"),
            Column::new("cnpj", "CNPJ").unsortable(),
            Column::new("city", "Cidade"),
            Column::new("uf", "UF"),
            option_column("status", "Status", &status),
            date_column("createdAt", "Criado em"),
        ],
    )
    .with_filters(vec![status, uf_filter()])
    .with_default_sort(SortState::asc("name"))
}

/// Civil-society organizations receiving donations.
pub fn oscs() -> TableSpec {
    let status = status_filter(&[("active", "Ativo"), ("inactive", "Inativo")]);
    TableSpec::new(
        "oscs",
        vec![
            Column::new("name", "Nome"),
            Column::new("cnpj", "CNPJ").unsortable(),
            Column::new("responsible", "Responsável"),
            Column::new("city", "Cidade"),
            Column::new("uf", "UF"),
            option_column("status", "Status", &status),
        ],
    )
    .with_filters(vec![status, uf_filter()])
    .with_default_sort(SortState::asc("name"))
}

/// Store-OSC partnerships. Store and OSC names come from the nested objects
/// the API embeds in each partnership.
pub fn partnerships() -> TableSpec {
    let status = status_filter(&[
        ("active", "Ativa"),
        ("pending", "Pendente"),
        ("inactive", "Encerrada"),
    ]);
    TableSpec::new(
        "partnerships",
        vec![
            Column::new("storeName", "Loja").with_accessor(|row| nested_name(row, "store")),
            Column::new("oscName", "OSC").with_accessor(|row| nested_name(row, "osc")),
            option_column("status", "Status", &status),
            date_column("startDate", "Início"),
            date_column("endDate", "Fim"),
        ],
    )
    .with_filters(vec![status])
    .with_default_sort(SortState::desc("startDate"))
}

/// Donation campaigns.
pub fn campaigns() -> TableSpec {
    let status = status_filter(&[
        ("draft", "Rascunho"),
        ("active", "Ativa"),
        ("finished", "Finalizada"),
    ]);
    TableSpec::new(
        "campaigns",
        vec![
            Column::new("title", "Campanha"),
            option_column("status", "Status", &status),
            date_column("startDate", "Início"),
            date_column("endDate", "Fim"),
            Column::new("goal", "Meta").with_render(|value, _| money(value)),
            Column::new("featured", "Destaque").with_render(|value, _| yes_no(value)),
        ],
    )
    .with_filters(vec![status, FilterDescriptor::switch("featured", "Destaque")])
    .with_default_sort(SortState::desc("startDate"))
}

/// Stores imported from partner retail networks, enabled one by one.
pub fn external_stores() -> TableSpec {
    TableSpec::new(
        "external_stores",
        vec![
            Column::new("name", "Nome"),
            Column::new("cnpj", "CNPJ").unsortable(),
            Column::new("network", "Rede"),
            Column::new("uf", "UF"),
            Column::new("enabled", "Habilitada").with_render(|value, _| yes_no(value)),
        ],
    )
    .with_filters(vec![
        uf_filter(),
        FilterDescriptor::switch("enabled", "Habilitada"),
    ])
    .with_default_sort(SortState::asc("name"))
}

// =============================================================================
// Shared declarations
// =============================================================================

fn status_filter(options: &[(&str, &str)]) -> FilterDescriptor {
    FilterDescriptor::select(
        "status",
        "Status",
        options
            .iter()
            .map(|(value, label)| FilterOption::new(*value, *label)),
    )
}

fn uf_filter() -> FilterDescriptor {
    FilterDescriptor::select("uf", "UF", UFS.iter().map(|uf| FilterOption::new(*uf, *uf)))
}

/// A column showing the label of the filter option matching its value.
fn option_column(key: &str, label: &str, filter: &FilterDescriptor) -> Column {
    let filter = filter.clone();
    Column::new(key, label).with_render(move |value, _| match filter.label_for(value) {
        Some(label) => label.to_string(),
        None => value.to_string(),
    })
}

fn date_column(key: &str, label: &str) -> Column {
    Column::new(key, label).with_render(|value, _| match value {
        Value::DateTime(dt) => dt.format("%d/%m/%Y").to_string(),
        other => other.to_string(),
    })
}

fn nested_name(row: &Row, entity: &str) -> Value {
    row.get_path(&format!("{}.name", entity))
        .or_else(|| row.get(&format!("{}Name", entity)).cloned())
        .unwrap_or_default()
}

fn yes_no(value: &Value) -> String {
    match value {
        Value::Bool(true) => "Sim".to_string(),
        Value::Bool(false) => "Não".to_string(),
        other => other.to_string(),
    }
}

fn money(value: &Value) -> String {
    let amount = match value {
        Value::Decimal(d) => format!("{:.2}", d),
        Value::Int(n) => format!("{}.00", n),
        Value::Float(f) => format!("{:.2}", f),
        other => return other.to_string(),
    };
    format!("R$ {}", amount.replace('.', ","))
}
