use rusqlite::types::Value;

pub(crate) const LINK_COLUMNS: &str = "id, link_name, destination_url, utm_source, utm_medium, utm_campaign, utm_term, utm_content, custom_params, final_url, created_at, updated_at";

/// Saved-link listing. Searching is done on decoded rows with
/// `UtmLink::matches_search`, so a search query reads every row and the
/// limit is applied after filtering.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LinkQuery {
    pub search: Option<String>,
    pub limit: Option<i64>,
}

pub struct SqlQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

impl LinkQuery {
    pub fn search(mut self, needle: impl Into<String>) -> Self {
        self.search = Some(needle.into());
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// The search text, or `None` when it is missing or blank.
    pub fn needle(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|needle| !needle.is_empty())
    }

    /// Row cap after filtering, clamped at zero.
    pub fn row_limit(&self) -> Option<usize> {
        self.limit
            .map(|limit| usize::try_from(limit.max(0)).unwrap_or(usize::MAX))
    }

    pub fn to_sql(&self) -> SqlQuery {
        let mut sql = format!("SELECT {LINK_COLUMNS} FROM utm_links ORDER BY created_at DESC, rowid DESC");
        let mut params: Vec<Value> = Vec::new();

        if self.needle().is_none() {
            if let Some(limit) = self.limit {
                sql.push_str(" LIMIT ?");
                params.push(Value::from(limit.max(0)));
            }
        }

        sql.push(';');
        SqlQuery { sql, params }
    }
}
