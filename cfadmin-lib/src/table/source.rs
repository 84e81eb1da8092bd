//! Generation-guarded holder for the caller's row list.

use crate::model::Row;

/// Identifies one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchToken(u64);

impl FetchToken {
    /// The generation number this token was issued with.
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Holds the latest row list and discards superseded fetch results.
///
/// Every refetch takes a token from [`RowSource::begin_fetch`]. When
/// responses arrive out of order, only the most recently issued token is
/// accepted; older results are dropped.
///
/// # Example
///
/// ```
/// use cfadmin_lib::model::Row;
/// use cfadmin_lib::table::RowSource;
///
/// let mut source = RowSource::new();
/// let first = source.begin_fetch();
/// let second = source.begin_fetch();
///
/// assert!(source.complete(second, vec![Row::new().set("name", "fresh")]));
/// assert!(!source.complete(first, vec![Row::new().set("name", "stale")]));
/// assert_eq!(source.rows().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RowSource {
    rows: Vec<Row>,
    /// Generation of the rows currently held.
    generation: u64,
    /// Generation of the latest issued fetch or replacement.
    issued: u64,
}

impl RowSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source already holding `rows`.
    pub fn with_rows(rows: Vec<Row>) -> Self {
        Self {
            rows,
            generation: 0,
            issued: 0,
        }
    }

    /// Issues a token for a new fetch, superseding any in flight.
    pub fn begin_fetch(&mut self) -> FetchToken {
        self.issued += 1;
        FetchToken(self.issued)
    }

    /// Accepts the result of a fetch if `token` is the latest issued.
    ///
    /// Returns `false` and leaves the rows untouched for superseded tokens.
    pub fn complete(&mut self, token: FetchToken, rows: Vec<Row>) -> bool {
        if token.0 != self.issued {
            log::debug!(
                "discarding stale fetch result (generation {}, latest {})",
                token.0,
                self.issued
            );
            return false;
        }
        self.rows = rows;
        self.generation = token.0;
        true
    }

    /// Replaces the rows outright, superseding any fetch in flight.
    pub fn replace(&mut self, rows: Vec<Row>) {
        self.issued += 1;
        self.generation = self.issued;
        self.rows = rows;
    }

    /// Returns `true` while the latest issued fetch has not completed.
    pub fn is_fetching(&self) -> bool {
        self.issued != self.generation
    }

    /// Generation of the rows currently held.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The current rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}
