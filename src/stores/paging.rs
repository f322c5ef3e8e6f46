/// Shared paging and free-text search primitives for grid endpoints
///
/// Matching follows the grid UI contract: the query and each searchable
/// field are lowercased with hyphens and spaces stripped, then compared by
/// substring containment.

const DEFAULT_PAGE_SIZE: u64 = 10;

/// A page request as it arrives from a grid: offset, page size and an
/// optional free-text query. Absent or negative values fall back to the
/// defaults.
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    pub skip: Option<i64>,
    pub take: Option<i64>,
    pub query: Option<String>,
}

impl PageRequest {
    pub fn new(skip: Option<i64>, take: Option<i64>, query: Option<String>) -> Self {
        Self { skip, take, query }
    }

    /// Number of rows to skip; negative values clamp to zero
    pub fn offset(&self) -> u64 {
        self.skip.unwrap_or(0).max(0) as u64
    }

    /// Page size; absent defaults to 10, negative values clamp to zero
    pub fn limit(&self) -> u64 {
        match self.take {
            Some(take) => take.max(0) as u64,
            None => DEFAULT_PAGE_SIZE,
        }
    }

    /// The normalized query, or None when there is nothing to filter by
    pub fn normalized_query(&self) -> Option<String> {
        self.query
            .as_deref()
            .map(normalize)
            .filter(|q| !q.is_empty())
    }
}

/// A filtered slice of rows plus the total match count before pagination
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub total_matching: u64,
}

/// Lowercase and strip hyphens and spaces
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| *c != '-' && *c != ' ')
        .collect()
}

/// Substring containment of an already-normalized query in a raw field
pub fn field_matches(field: &str, normalized_query: &str) -> bool {
    normalize(field).contains(normalized_query)
}

/// Filter, count, then slice out the requested page
pub fn paginate<T, F>(items: Vec<T>, request: &PageRequest, matches: F) -> Page<T>
where
    F: Fn(&T, &str) -> bool,
{
    let filtered: Vec<T> = match request.normalized_query() {
        Some(query) => items.into_iter().filter(|item| matches(item, &query)).collect(),
        None => items,
    };

    let total_matching = filtered.len() as u64;
    let rows = filtered
        .into_iter()
        .skip(request.offset() as usize)
        .take(request.limit() as usize)
        .collect();

    Page {
        rows,
        total_matching,
    }
}
