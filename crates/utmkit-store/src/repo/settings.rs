use crate::error::{Result, StoreError};
use rusqlite::{params, Connection, OptionalExtension};
use utmkit_core::domain::{NormalizationConfig, SettingKey, Settings};

pub struct SettingsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> SettingsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn get(&self) -> Result<Option<Settings>> {
        let settings = self
            .conn
            .query_row(
                "SELECT normalize_values, lowercase_values, replace_spaces, updated_at
                 FROM utm_settings WHERE id = 1;",
                [],
                |row| {
                    Ok(Settings {
                        normalization: NormalizationConfig {
                            normalize_values: row.get(0)?,
                            lowercase_values: row.get(1)?,
                            replace_spaces: row.get(2)?,
                        },
                        updated_at: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(settings)
    }

    /// Returns the stored settings, seeding the row from `defaults` the
    /// first time.
    pub fn get_or_init(&self, now_utc: i64, defaults: NormalizationConfig) -> Result<Settings> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO utm_settings (id, normalize_values, lowercase_values, replace_spaces, updated_at)
             VALUES (1, ?1, ?2, ?3, ?4);",
            params![
                defaults.normalize_values,
                defaults.lowercase_values,
                defaults.replace_spaces,
                now_utc,
            ],
        )?;
        if inserted > 0 {
            tracing::debug!("seeded settings row");
        }
        self.get()?
            .ok_or_else(|| StoreError::NotFound("settings".to_string()))
    }

    /// Updates a single switch. The statement is chosen from the key, never
    /// built from caller input.
    pub fn set(&self, now_utc: i64, key: SettingKey, value: bool) -> Result<Settings> {
        let sql = match key {
            SettingKey::NormalizeValues => {
                "UPDATE utm_settings SET normalize_values = ?1, updated_at = ?2 WHERE id = 1;"
            }
            SettingKey::LowercaseValues => {
                "UPDATE utm_settings SET lowercase_values = ?1, updated_at = ?2 WHERE id = 1;"
            }
            SettingKey::ReplaceSpaces => {
                "UPDATE utm_settings SET replace_spaces = ?1, updated_at = ?2 WHERE id = 1;"
            }
        };
        let updated = self.conn.execute(sql, params![value, now_utc])?;
        if updated == 0 {
            return Err(StoreError::NotFound("settings".to_string()));
        }
        self.get()?
            .ok_or_else(|| StoreError::NotFound("settings".to_string()))
    }
}
