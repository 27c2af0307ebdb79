use crate::error::{Result, StoreError};
use crate::query::{LinkQuery, LINK_COLUMNS};
use rusqlite::{params, params_from_iter, Connection};
use std::str::FromStr;
use utmkit_core::domain::{CustomParam, LinkId, UtmLink};
use utmkit_core::rules::{LinkDraft, ResolvedLink};

/// A link ready to persist: values are already normalized.
#[derive(Debug, Clone)]
pub struct LinkNew {
    pub link_name: String,
    pub destination_url: String,
    pub utm_source: String,
    pub utm_medium: String,
    pub utm_campaign: String,
    pub utm_term: Option<String>,
    pub utm_content: Option<String>,
    pub custom_params: Vec<CustomParam>,
    pub final_url: String,
}

impl LinkNew {
    pub fn from_resolved(draft: &LinkDraft, resolved: ResolvedLink) -> Self {
        let ResolvedLink { utm, final_url } = resolved;
        Self {
            link_name: draft.link_name.trim().to_string(),
            destination_url: draft.fields.destination_url.trim().to_string(),
            utm_source: utm.source,
            utm_medium: utm.medium,
            utm_campaign: utm.campaign,
            utm_term: utm.term,
            utm_content: utm.content,
            custom_params: draft.fields.custom_params.clone(),
            final_url,
        }
    }
}

pub struct LinksRepo<'a> {
    conn: &'a Connection,
}

impl<'a> LinksRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn create(&self, now_utc: i64, input: LinkNew) -> Result<UtmLink> {
        let link = UtmLink {
            id: LinkId::new(),
            link_name: input.link_name,
            destination_url: input.destination_url,
            utm_source: input.utm_source,
            utm_medium: input.utm_medium,
            utm_campaign: input.utm_campaign,
            utm_term: input.utm_term,
            utm_content: input.utm_content,
            custom_params: input.custom_params,
            final_url: input.final_url,
            created_at: now_utc,
            updated_at: now_utc,
        };
        let custom_params = serde_json::to_string(&link.custom_params)?;

        self.conn.execute(
            "INSERT INTO utm_links (id, link_name, destination_url, utm_source, utm_medium, utm_campaign, utm_term, utm_content, custom_params, final_url, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12);",
            params![
                link.id.to_string(),
                link.link_name,
                link.destination_url,
                link.utm_source,
                link.utm_medium,
                link.utm_campaign,
                link.utm_term,
                link.utm_content,
                custom_params,
                link.final_url,
                link.created_at,
                link.updated_at,
            ],
        )?;

        Ok(link)
    }

    pub fn get(&self, id: LinkId) -> Result<Option<UtmLink>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {LINK_COLUMNS} FROM utm_links WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            Ok(Some(link_from_row(row)?))
        } else {
            Ok(None)
        }
    }

    pub fn list(&self, query: &LinkQuery) -> Result<Vec<UtmLink>> {
        let sql = query.to_sql();
        let mut stmt = self.conn.prepare(&sql.sql)?;
        let mut rows = stmt.query(params_from_iter(sql.params))?;
        let needle = query.needle();
        let limit = query.row_limit();
        let mut links = Vec::new();
        while let Some(row) = rows.next()? {
            if limit.is_some_and(|limit| links.len() >= limit) {
                break;
            }
            let link = link_from_row(row)?;
            if needle.map_or(true, |needle| link.matches_search(needle)) {
                links.push(link);
            }
        }
        Ok(links)
    }

    pub fn delete(&self, id: LinkId) -> Result<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM utm_links WHERE id = ?1;", [id.to_string()])?;
        if deleted == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

fn link_from_row(row: &rusqlite::Row<'_>) -> Result<UtmLink> {
    let id_str: String = row.get(0)?;
    let id = LinkId::from_str(&id_str).map_err(|_| StoreError::InvalidId(id_str.clone()))?;
    let custom_params: String = row.get(8)?;
    let custom_params: Vec<CustomParam> = serde_json::from_str(&custom_params)?;

    Ok(UtmLink {
        id,
        link_name: row.get(1)?,
        destination_url: row.get(2)?,
        utm_source: row.get(3)?,
        utm_medium: row.get(4)?,
        utm_campaign: row.get(5)?,
        utm_term: row.get(6)?,
        utm_content: row.get(7)?,
        custom_params,
        final_url: row.get(9)?,
        created_at: row.get(10)?,
        updated_at: row.get(11)?,
    })
}
