//! The table engine: search, filter, sort and paginate over in-memory rows.

use crate::config::EngineConfig;
use crate::config::SearchScope;
use crate::model::Row;
use crate::model::Value;

use super::ActiveFilters;
use super::Column;
use super::Direction;
use super::FilterDescriptor;
use super::FilterOption;
use super::RowHooks;
use super::SortState;
use super::TableSpec;
use super::View;

/// The mutable configuration of one table instance.
///
/// Only [`TableEngine`] operations change it; every transition leaves
/// `current_page` within `[1, max(1, total_pages)]`.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineState {
    /// Free-text search query.
    pub query: String,
    /// Filter entries in force.
    pub filters: ActiveFilters,
    /// Active sort, if any.
    pub sort: Option<SortState>,
    /// 1-based page number.
    pub current_page: usize,
    /// Rows per page, always greater than zero.
    pub page_size: usize,
}

/// Filter + sort + paginate engine over a caller-owned row list.
///
/// The pipeline runs in a fixed order on every [`view`](Self::view):
/// search, filters, sort, page window. Nothing derived is cached, so the
/// engine can be handed a completely different row list at any time.
///
/// The engine never fails and never performs I/O. Edit/delete/toggle
/// requests are forwarded to the [`RowHooks`] supplied by the caller.
///
/// # Example
///
/// ```
/// use cfadmin_lib::model::Row;
/// use cfadmin_lib::table::{Column, TableEngine};
///
/// let rows = (1..=25).map(|n| Row::new().set("n", n)).collect();
/// let mut engine = TableEngine::new(vec![Column::new("n", "N")], rows);
///
/// engine.go_to_page(3);
/// let view = engine.view();
/// assert_eq!(view.current_page, 3);
/// assert_eq!(view.rows.len(), 5);
///
/// engine.go_to_page(4);
/// assert_eq!(engine.view().current_page, 3);
/// ```
#[derive(Debug)]
pub struct TableEngine {
    columns: Vec<Column>,
    filters: Vec<FilterDescriptor>,
    hooks: RowHooks,
    config: EngineConfig,
    rows: Vec<Row>,
    state: EngineState,
}

impl TableEngine {
    /// Creates an engine over `rows` with the default configuration.
    pub fn new(columns: Vec<Column>, rows: Vec<Row>) -> Self {
        let config = EngineConfig::default();
        Self {
            columns,
            filters: Vec::new(),
            hooks: RowHooks::default(),
            rows,
            state: EngineState {
                query: String::new(),
                filters: ActiveFilters::new(),
                sort: None,
                current_page: 1,
                page_size: config.page_size,
            },
            config,
        }
    }

    /// Creates an empty engine from a declarative table spec.
    pub fn from_spec(spec: TableSpec, config: EngineConfig) -> Self {
        let mut engine = Self::new(spec.columns, Vec::new())
            .with_filters(spec.filters)
            .with_config(config);
        engine.state.sort = spec.default_sort;
        engine
    }

    /// Applies a configuration. Resets the page to 1.
    ///
    /// A zero `page_size` in the config keeps the current page size.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        if config.page_size > 0 {
            self.state.page_size = config.page_size;
        } else {
            log::debug!("ignoring configured page size 0");
        }
        self.state.current_page = 1;
        self.config = config.normalized();
        self
    }

    /// Declares the filters offered by this table.
    pub fn with_filters(mut self, filters: impl IntoIterator<Item = FilterDescriptor>) -> Self {
        self.filters = filters.into_iter().collect();
        self
    }

    /// Installs the row action callbacks.
    pub fn with_hooks(mut self, hooks: RowHooks) -> Self {
        self.hooks = hooks;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Column declarations.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The column declared with `key`.
    pub fn column(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Filter declarations.
    pub fn filters(&self) -> &[FilterDescriptor] {
        &self.filters
    }

    /// The filter declared with `key`.
    pub fn filter(&self, key: &str) -> Option<&FilterDescriptor> {
        self.filters.iter().find(|f| f.key == key)
    }

    /// Options of the `select` filter declared with `key`.
    pub fn filter_options(&self, key: &str) -> &[FilterOption] {
        self.filter(key).map(|f| f.options()).unwrap_or(&[])
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Page sizes offered by the page-size selector, ascending.
    pub fn page_size_options(&self) -> &[usize] {
        &self.config.page_size_options
    }

    /// Returns `true` if `size` is one of the offered page sizes. An empty
    /// option list offers every positive size.
    pub fn offers_page_size(&self, size: usize) -> bool {
        let options = &self.config.page_size_options;
        size > 0 && (options.is_empty() || options.contains(&size))
    }

    /// Current engine state.
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// The row list the engine currently derives from.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Column headers, in display order.
    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label.as_str()).collect()
    }

    /// The identifier of `row`, read from the configured id field.
    pub fn row_id<'r>(&self, row: &'r Row) -> Option<&'r Value> {
        row.get(&self.config.id_field).filter(|id| !id.is_null())
    }

    // =========================================================================
    // State transitions
    // =========================================================================

    /// Replaces the row list and re-clamps the page.
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        self.clamp_page();
    }

    /// Updates the free-text query. Keeps filters and sort; resets the page.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.state.query = query.into();
        self.state.current_page = 1;
    }

    /// Sets or clears one filter axis and resets the page.
    ///
    /// `None`, `Some(Value::Null)` and `Some(Value::String(""))` clear it.
    pub fn set_filter(&mut self, key: &str, value: Option<Value>) {
        if !self.filters.is_empty() && self.filter(key).is_none() {
            log::debug!("filtering on undeclared key '{}'", key);
        }
        self.state.filters.set(key, value);
        self.state.current_page = 1;
    }

    /// Shorthand for `set_filter(key, Some(value.into()))`.
    pub fn filter_by(&mut self, key: &str, value: impl Into<Value>) {
        self.set_filter(key, Some(value.into()));
    }

    /// Clears one filter axis and resets the page.
    pub fn clear_filter(&mut self, key: &str) {
        self.set_filter(key, None);
    }

    /// Clears every filter and resets the page.
    pub fn clear_filters(&mut self) {
        self.state.filters.clear();
        self.state.current_page = 1;
    }

    /// Toggles the sort on `key`.
    ///
    /// The same key flips the direction; another key starts ascending.
    /// Unknown and unsortable columns are ignored. The page is kept.
    pub fn set_sort(&mut self, key: &str) {
        if !self.can_sort(key) {
            return;
        }

        self.state.sort = Some(match self.state.sort.take() {
            Some(current) if current.key == key => SortState {
                direction: current.direction.toggled(),
                key: current.key,
            },
            _ => SortState::asc(key),
        });
    }

    /// Sorts on `key` in `direction`, whatever the current sort is.
    ///
    /// Returns `false` and leaves the sort alone for unknown and unsortable
    /// columns.
    pub fn sort_by(&mut self, key: &str, direction: Direction) -> bool {
        if !self.can_sort(key) {
            return false;
        }
        self.state.sort = Some(SortState {
            key: key.to_string(),
            direction,
        });
        true
    }

    /// Returns to input order.
    pub fn clear_sort(&mut self) {
        self.state.sort = None;
    }

    /// Sets the page size and resets the page. Zero is ignored.
    pub fn set_page_size(&mut self, page_size: usize) {
        if page_size == 0 {
            log::debug!("rejecting page size 0, keeping {}", self.state.page_size);
            return;
        }
        self.state.page_size = page_size;
        self.state.current_page = 1;
        self.clamp_page();
    }

    /// Moves to `page`, clamped into `[1, max(1, total_pages)]`.
    pub fn go_to_page(&mut self, page: usize) {
        self.state.current_page = page;
        self.clamp_page();
    }

    /// Moves one page forward, staying on the last page.
    pub fn next_page(&mut self) {
        self.go_to_page(self.state.current_page.saturating_add(1));
    }

    /// Moves one page back, staying on the first page.
    pub fn previous_page(&mut self) {
        self.go_to_page(self.state.current_page.saturating_sub(1));
    }

    /// Moves to the first page.
    pub fn first_page(&mut self) {
        self.go_to_page(1);
    }

    /// Moves to the last page.
    pub fn last_page(&mut self) {
        self.go_to_page(usize::MAX);
    }

    // =========================================================================
    // Derived reads
    // =========================================================================

    /// Runs the pipeline against the current state and rows.
    pub fn view(&self) -> View<'_> {
        let matching = self.matching();
        let total_count = matching.len();
        let total_pages = self.total_pages(total_count);
        let current_page = self.state.current_page.clamp(1, total_pages.max(1));
        let page_size = self.state.page_size;

        let rows: Vec<&Row> = self
            .sort_rows(matching)
            .into_iter()
            .skip((current_page - 1) * page_size)
            .take(page_size)
            .collect();

        log::trace!(
            "view: page {}/{} with {} of {} rows",
            current_page,
            total_pages,
            rows.len(),
            total_count
        );

        View {
            rows,
            total_count,
            total_pages,
            current_page,
            page_size,
            unfiltered_count: self.rows.len(),
        }
    }

    /// Renders `row` through every column.
    pub fn cells(&self, row: &Row) -> Vec<String> {
        self.columns.iter().map(|c| c.render(row)).collect()
    }

    // =========================================================================
    // Row actions
    // =========================================================================

    /// Forwards an edit request. Returns `true` if a hook received it.
    pub fn request_edit(&self, row: &Row) -> bool {
        self.hooks.edit(row)
    }

    /// Forwards a delete request with the row's id.
    ///
    /// Rows without an id are not forwarded.
    pub fn request_delete(&self, row: &Row) -> bool {
        match self.row_id(row) {
            Some(id) => self.hooks.delete(id),
            None => {
                log::debug!("delete ignored: row has no '{}'", self.config.id_field);
                false
            }
        }
    }

    /// Forwards a toggle of the boolean `field` with its negated value.
    ///
    /// A null field counts as `false`. Rows without an id and fields that
    /// are missing or not boolean are not forwarded.
    pub fn request_toggle(&self, row: &Row, field: &str) -> bool {
        let Some(id) = self.row_id(row) else {
            log::debug!("toggle ignored: row has no '{}'", self.config.id_field);
            return false;
        };
        match row.get_bool(field) {
            Ok(current) => self.hooks.toggle(id, field, !current.unwrap_or(false)),
            Err(err) => {
                log::debug!("toggle ignored: {}", err);
                false
            }
        }
    }

    // =========================================================================
    // Pipeline
    // =========================================================================

    fn matching(&self) -> Vec<&Row> {
        let needle = self.state.query.to_lowercase();
        self.rows
            .iter()
            .filter(|row| self.matches_query(row, &needle))
            .filter(|row| self.state.filters.matches(row, &self.columns))
            .collect()
    }

    fn matches_query(&self, row: &Row, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        let contains = |value: &Value| value.to_string().to_lowercase().contains(needle);
        match self.config.search_scope {
            SearchScope::Columns if !self.columns.is_empty() => {
                self.columns.iter().any(|c| contains(&c.value(row)))
            }
            _ => row.fields().values().any(contains),
        }
    }

    fn can_sort(&self, key: &str) -> bool {
        match self.column(key) {
            Some(column) if column.sortable => true,
            Some(_) => {
                log::debug!("ignoring sort on unsortable column '{}'", key);
                false
            }
            None => {
                log::debug!("ignoring sort on undeclared column '{}'", key);
                false
            }
        }
    }

    fn sort_rows<'a>(&self, rows: Vec<&'a Row>) -> Vec<&'a Row> {
        let Some(sort) = &self.state.sort else {
            return rows;
        };
        let Some(column) = self.column(&sort.key) else {
            return rows;
        };

        let mut keyed: Vec<(Value, &Row)> = rows.into_iter().map(|row| (column.value(row), row)).collect();
        // sort_by is stable: equal keys keep their filtered order.
        keyed.sort_by(|a, b| sort.compare(&a.0, &b.0));
        keyed.into_iter().map(|(_, row)| row).collect()
    }

    fn total_pages(&self, total_count: usize) -> usize {
        total_count.div_ceil(self.state.page_size)
    }

    fn clamp_page(&mut self) {
        let total_pages = self.total_pages(self.matching().len());
        self.state.current_page = self.state.current_page.clamp(1, total_pages.max(1));
    }
}
