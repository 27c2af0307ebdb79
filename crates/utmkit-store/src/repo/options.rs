use crate::error::{Result, StoreError};
use rusqlite::{params, Connection, OptionalExtension};
use std::str::FromStr;
use utmkit_core::domain::{OptionId, OptionKind, UtmOption};
use utmkit_core::rules::{derive_option_value, next_display_order, normalize_option_label};
use utmkit_core::CoreError;

const OPTION_COLUMNS: &str = "id, kind, value, label, active, display_order, requires_keyword, requires_location_event, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct OptionNew {
    pub kind: OptionKind,
    pub label: String,
    pub value: Option<String>,
    pub requires_keyword: bool,
    pub requires_location_event: bool,
}

impl OptionNew {
    pub fn new(kind: OptionKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            value: None,
            requires_keyword: false,
            requires_location_event: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct OptionUpdate {
    pub label: Option<String>,
    pub value: Option<String>,
    pub active: Option<bool>,
    pub requires_keyword: Option<bool>,
    pub requires_location_event: Option<bool>,
}

impl OptionUpdate {
    pub fn is_empty(&self) -> bool {
        self.label.is_none()
            && self.value.is_none()
            && self.active.is_none()
            && self.requires_keyword.is_none()
            && self.requires_location_event.is_none()
    }
}

pub struct OptionsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> OptionsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn add(&self, now_utc: i64, input: OptionNew) -> Result<UtmOption> {
        if self.conn.is_autocommit() {
            let tx = self.conn.unchecked_transaction()?;
            let option = add_inner(&tx, now_utc, input)?;
            tx.commit()?;
            Ok(option)
        } else {
            add_inner(self.conn, now_utc, input)
        }
    }

    pub fn get(&self, id: OptionId) -> Result<Option<UtmOption>> {
        get_inner(self.conn, id)
    }

    /// Options ordered by display order; inactive ones only when asked for.
    pub fn list(&self, kind: Option<OptionKind>, include_inactive: bool) -> Result<Vec<UtmOption>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {OPTION_COLUMNS} FROM utm_options
             WHERE (?1 IS NULL OR kind = ?1) AND (?2 = 1 OR active = 1)
             ORDER BY kind ASC, display_order ASC, label ASC;"
        ))?;
        let mut rows = stmt.query(params![kind.map(OptionKind::as_str), include_inactive])?;
        let mut options = Vec::new();
        while let Some(row) = rows.next()? {
            options.push(option_from_row(row)?);
        }
        Ok(options)
    }

    pub fn find_by_value(&self, kind: OptionKind, value: &str) -> Result<Option<UtmOption>> {
        find_by_value_inner(self.conn, kind, value)
    }

    pub fn update(&self, now_utc: i64, id: OptionId, update: OptionUpdate) -> Result<UtmOption> {
        if update.is_empty() {
            return Err(StoreError::EmptyUpdate);
        }
        if self.conn.is_autocommit() {
            let tx = self.conn.unchecked_transaction()?;
            let option = update_inner(&tx, now_utc, id, update)?;
            tx.commit()?;
            Ok(option)
        } else {
            update_inner(self.conn, now_utc, id, update)
        }
    }

    pub fn delete(&self, id: OptionId) -> Result<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM utm_options WHERE id = ?1;", [id.to_string()])?;
        if deleted == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    /// Records a campaign value used by a saved link, labelled with the
    /// campaign text as typed. Returns the new option, or `None` when the
    /// value is blank or already known.
    pub fn ensure_campaign(
        &self,
        now_utc: i64,
        label: &str,
        value: &str,
    ) -> Result<Option<UtmOption>> {
        let value = value.trim();
        if value.is_empty() || self.find_by_value(OptionKind::Campaign, value)?.is_some() {
            return Ok(None);
        }
        let label = if label.trim().is_empty() { value } else { label };
        let mut input = OptionNew::new(OptionKind::Campaign, label);
        input.value = Some(value.to_string());
        self.add(now_utc, input).map(Some)
    }
}

fn add_inner(conn: &Connection, now_utc: i64, input: OptionNew) -> Result<UtmOption> {
    let label = normalize_option_label(&input.label)?;
    let value = derive_option_value(&label, input.value.as_deref())?;

    if find_by_value_inner(conn, input.kind, &value)?.is_some() {
        return Err(StoreError::DuplicateOption {
            kind: input.kind.to_string(),
            value,
        });
    }

    let current_max: Option<i64> = conn.query_row(
        "SELECT MAX(display_order) FROM utm_options WHERE kind = ?1;",
        [input.kind.as_str()],
        |row| row.get(0),
    )?;

    let option = UtmOption {
        id: OptionId::new(),
        kind: input.kind,
        value,
        label,
        active: true,
        display_order: next_display_order(current_max),
        requires_keyword: input.requires_keyword,
        requires_location_event: input.requires_location_event,
        created_at: now_utc,
        updated_at: now_utc,
    };
    option.validate()?;

    conn.execute(
        "INSERT INTO utm_options (id, kind, value, label, active, display_order, requires_keyword, requires_location_event, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
        params![
            option.id.to_string(),
            option.kind.as_str(),
            option.value,
            option.label,
            option.active,
            option.display_order,
            option.requires_keyword,
            option.requires_location_event,
            option.created_at,
            option.updated_at,
        ],
    )?;

    Ok(option)
}

fn update_inner(
    conn: &Connection,
    now_utc: i64,
    id: OptionId,
    update: OptionUpdate,
) -> Result<UtmOption> {
    let existing = get_inner(conn, id)?.ok_or_else(|| StoreError::NotFound(id.to_string()))?;
    let id_str = id.to_string();

    if let Some(label) = update.label {
        let label = normalize_option_label(&label)?;
        conn.execute(
            "UPDATE utm_options SET label = ?1 WHERE id = ?2;",
            params![label, id_str],
        )?;
    }

    if let Some(value) = update.value {
        let value = value.trim().to_string();
        if value.is_empty() {
            return Err(CoreError::InvalidOptionValue(value).into());
        }
        if let Some(other) = find_by_value_inner(conn, existing.kind, &value)? {
            if other.id != id {
                return Err(StoreError::DuplicateOption {
                    kind: existing.kind.to_string(),
                    value,
                });
            }
        }
        conn.execute(
            "UPDATE utm_options SET value = ?1 WHERE id = ?2;",
            params![value, id_str],
        )?;
    }

    if let Some(active) = update.active {
        conn.execute(
            "UPDATE utm_options SET active = ?1 WHERE id = ?2;",
            params![active, id_str],
        )?;
    }

    if let Some(requires_keyword) = update.requires_keyword {
        conn.execute(
            "UPDATE utm_options SET requires_keyword = ?1 WHERE id = ?2;",
            params![requires_keyword, id_str],
        )?;
    }

    if let Some(requires_location_event) = update.requires_location_event {
        conn.execute(
            "UPDATE utm_options SET requires_location_event = ?1 WHERE id = ?2;",
            params![requires_location_event, id_str],
        )?;
    }

    conn.execute(
        "UPDATE utm_options SET updated_at = ?1 WHERE id = ?2;",
        params![now_utc, id_str],
    )?;

    get_inner(conn, id)?.ok_or_else(|| StoreError::NotFound(id_str))
}

fn get_inner(conn: &Connection, id: OptionId) -> Result<Option<UtmOption>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {OPTION_COLUMNS} FROM utm_options WHERE id = ?1;"
    ))?;
    let mut rows = stmt.query([id.to_string()])?;
    if let Some(row) = rows.next()? {
        Ok(Some(option_from_row(row)?))
    } else {
        Ok(None)
    }
}

fn find_by_value_inner(
    conn: &Connection,
    kind: OptionKind,
    value: &str,
) -> Result<Option<UtmOption>> {
    let id: Option<String> = conn
        .query_row(
            "SELECT id FROM utm_options WHERE kind = ?1 AND value = ?2;",
            params![kind.as_str(), value],
            |row| row.get(0),
        )
        .optional()?;
    match id {
        Some(id_str) => {
            let id = OptionId::from_str(&id_str).map_err(|_| StoreError::InvalidId(id_str))?;
            get_inner(conn, id)
        }
        None => Ok(None),
    }
}

fn option_from_row(row: &rusqlite::Row<'_>) -> Result<UtmOption> {
    let id_str: String = row.get(0)?;
    let id = OptionId::from_str(&id_str).map_err(|_| StoreError::InvalidId(id_str.clone()))?;
    let kind_str: String = row.get(1)?;
    let kind = OptionKind::from_str(&kind_str)?;

    Ok(UtmOption {
        id,
        kind,
        value: row.get(2)?,
        label: row.get(3)?,
        active: row.get(4)?,
        display_order: row.get(5)?,
        requires_keyword: row.get(6)?,
        requires_location_event: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}
