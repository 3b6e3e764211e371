//! [`SqliteStore`] — the SQLite implementation of [`ContactStore`].

use std::{collections::BTreeSet, path::Path, sync::Arc};

use chrono::Utc;
use roster_core::{
  Error as CoreError,
  contact::{
    AuditInfo, CategoryId, CompanyId, CompanyInfo, ContactId, ContactView,
    CountryId, LinkTypeId, NewContact, StateId, UserId, normalize_fk,
  },
  event::{ContactEvent, ContactListener},
  links::{ElementKind, LinkSource, MailingStatus, RefCounts},
  status::Status,
  store::ContactStore,
};
use rusqlite::{OptionalExtension as _, params};

use crate::{
  Error, Result,
  encode::{
    ContactColumns, RawAudit, RawContactRow, encode_date, encode_dt,
  },
  schema::SCHEMA,
};

// ─── Options ─────────────────────────────────────────────────────────────────

/// Installation-level store behavior, passed in explicitly rather than read
/// from ambient configuration.
#[derive(Debug, Clone)]
pub struct StoreOptions {
  /// Tenant id stamped on every created contact.
  pub entity:          i64,
  /// Capitalize each word of first/last names on creation.
  pub uppercase_names: bool,
}

impl Default for StoreOptions {
  fn default() -> Self {
    Self {
      entity:          1,
      uppercase_names: false,
    }
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A roster contact store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted and the
/// listener list is shared by `Arc`.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
  options:         StoreOptions,
  listeners:       Vec<Arc<dyn ContactListener>>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self {
      conn,
      options: StoreOptions::default(),
      listeners: Vec::new(),
    };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self {
      conn,
      options: StoreOptions::default(),
      listeners: Vec::new(),
    };
    store.init_schema().await?;
    Ok(store)
  }

  pub fn with_options(mut self, options: StoreOptions) -> Self {
    self.options = options;
    self
  }

  /// Register a mutation listener. Listeners run synchronously inside the
  /// mutation's transaction; an error from any of them rolls it back.
  pub fn with_listener(mut self, listener: Arc<dyn ContactListener>) -> Self {
    self.listeners.push(listener);
    self
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Listener dispatch ───────────────────────────────────────────────────────

fn fire(
  listeners: &[Arc<dyn ContactListener>],
  event: &ContactEvent,
) -> Result<()> {
  for listener in listeners {
    if let Err(e) = listener.on_event(event) {
      return Err(Error::Core(CoreError::ListenerAbort {
        event:  event.name(),
        reason: e.to_string(),
      }));
    }
  }
  Ok(())
}

// ─── Row mapping ─────────────────────────────────────────────────────────────

const BASE_SELECT: &str = "
  SELECT
    c.contact_id, c.company_id, c.civility, c.lastname, c.firstname,
    c.position, c.address, c.zip, c.town, c.country_id, c.state_id,
    c.email, c.phone_work, c.phone_home, c.phone_mobile, c.fax,
    c.im_jabber, c.im_skype, c.photo, c.note_private, c.note_public,
    c.visibility, c.status, c.birthday, c.default_lang, c.no_email,
    c.canvas, c.entity, c.external_ref, c.import_key,
    c.created_at, c.updated_at, c.created_by, c.updated_by,
    co.code, co.label, st.code, st.label,
    s.name, s.customer, s.supplier
  FROM contacts c
  LEFT JOIN countries co ON co.country_id = c.country_id
  LEFT JOIN states    st ON st.state_id   = c.state_id
  LEFT JOIN companies s  ON s.company_id  = c.company_id";

fn map_contact_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawContactRow> {
  Ok(RawContactRow {
    contact_id:       row.get(0)?,
    company_id:       row.get(1)?,
    civility:         row.get(2)?,
    lastname:         row.get(3)?,
    firstname:        row.get(4)?,
    position:         row.get(5)?,
    address:          row.get(6)?,
    zip:              row.get(7)?,
    town:             row.get(8)?,
    country_id:       row.get(9)?,
    state_id:         row.get(10)?,
    email:            row.get(11)?,
    phone_work:       row.get(12)?,
    phone_home:       row.get(13)?,
    phone_mobile:     row.get(14)?,
    fax:              row.get(15)?,
    im_jabber:        row.get(16)?,
    im_skype:         row.get(17)?,
    photo:            row.get(18)?,
    note_private:     row.get(19)?,
    note_public:      row.get(20)?,
    visibility:       row.get(21)?,
    status:           row.get(22)?,
    birthday:         row.get(23)?,
    default_lang:     row.get(24)?,
    no_email:         row.get(25)?,
    canvas:           row.get(26)?,
    entity:           row.get(27)?,
    external_ref:     row.get(28)?,
    import_key:       row.get(29)?,
    created_at:       row.get(30)?,
    updated_at:       row.get(31)?,
    created_by:       row.get(32)?,
    updated_by:       row.get(33)?,
    country_code:     row.get(34)?,
    country:          row.get(35)?,
    state_code:       row.get(36)?,
    state:            row.get(37)?,
    company_name:     row.get(38)?,
    company_customer: row.get(39)?,
    company_supplier: row.get(40)?,
    linked_user:      None,
    birthday_alert:   false,
    attributes:       Vec::new(),
  })
}

// ─── Write helpers ───────────────────────────────────────────────────────────

/// Overwrite every mutable column of `id` with the bundle. Returns the
/// number of rows touched (0 means the contact does not exist).
fn write_fields(
  tx: &rusqlite::Transaction<'_>,
  id: ContactId,
  cols: &ContactColumns,
  actor: UserId,
  now: &str,
) -> rusqlite::Result<usize> {
  tx.execute(
    "UPDATE contacts SET
       company_id = ?1, civility = ?2, lastname = ?3, firstname = ?4,
       position = ?5, address = ?6, zip = ?7, town = ?8,
       country_id = ?9, state_id = ?10,
       email = ?11, phone_work = ?12, phone_home = ?13, phone_mobile = ?14,
       fax = ?15, im_jabber = ?16, im_skype = ?17, photo = ?18,
       note_private = ?19, note_public = ?20,
       visibility = ?21, status = ?22,
       default_lang = ?23, no_email = ?24,
       updated_by = ?25, updated_at = ?26
     WHERE contact_id = ?27",
    params![
      cols.company_id,
      cols.civility,
      cols.lastname,
      cols.firstname,
      cols.position,
      cols.address,
      cols.zip,
      cols.town,
      cols.country_id,
      cols.state_id,
      cols.email,
      cols.phone_work,
      cols.phone_home,
      cols.phone_mobile,
      cols.fax,
      cols.im_jabber,
      cols.im_skype,
      cols.photo,
      cols.note_private,
      cols.note_public,
      cols.visibility,
      cols.status,
      cols.default_lang,
      cols.no_email,
      normalize_fk(Some(actor)),
      now,
      id,
    ],
  )
}

/// Update the birthday column and reconcile the actor's alert subscription.
fn write_personal(
  tx: &rusqlite::Transaction<'_>,
  id: ContactId,
  birthday: Option<&str>,
  actor: UserId,
  alert: bool,
  now: &str,
) -> rusqlite::Result<usize> {
  let touched = tx.execute(
    "UPDATE contacts SET birthday = ?1, updated_by = ?2, updated_at = ?3
     WHERE contact_id = ?4",
    params![birthday, normalize_fk(Some(actor)), now, id],
  )?;

  if alert {
    tx.execute(
      "INSERT OR IGNORE INTO birthday_alerts (contact_id, user_id)
       VALUES (?1, ?2)",
      params![id, actor],
    )?;
  } else {
    tx.execute(
      "DELETE FROM birthday_alerts WHERE contact_id = ?1 AND user_id = ?2",
      params![id, actor],
    )?;
  }

  Ok(touched)
}

/// Replace the extended-attribute rows of `id` with the given pairs.
fn save_attributes(
  tx: &rusqlite::Transaction<'_>,
  id: ContactId,
  attributes: &[(String, String)],
) -> rusqlite::Result<()> {
  tx.execute(
    "DELETE FROM contact_attributes WHERE contact_id = ?1",
    [id],
  )?;
  for (name, value) in attributes {
    tx.execute(
      "INSERT INTO contact_attributes (contact_id, name, value)
       VALUES (?1, ?2, ?3)",
      params![id, name, value],
    )?;
  }
  Ok(())
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  type Error = Error;

  // ── Lifecycle ─────────────────────────────────────────────────────────────

  async fn create(&self, draft: NewContact, actor: UserId) -> Result<ContactId> {
    let cols = ContactColumns::from_draft(&draft, self.options.uppercase_names)?;
    if cols.lastname.is_empty() {
      return Err(Error::Core(CoreError::MissingName));
    }

    let now = encode_dt(Utc::now());
    let entity = self.options.entity;
    let canvas = draft.canvas.clone();
    let external_ref = draft.external_ref.clone();
    let import_key = draft.import_key.clone();
    let birthday = draft.birthday.map(encode_date);
    let alert = draft.birthday_alert;
    let listeners = self.listeners.clone();

    let id = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        // The insert covers only the minimal column subset; the shared
        // update routine fills in the rest below.
        tx.execute(
          "INSERT INTO contacts (
             created_at, company_id, lastname, firstname, created_by,
             visibility, status, canvas, entity, external_ref, import_key
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
          params![
            now,
            cols.company_id,
            cols.lastname,
            cols.firstname,
            normalize_fk(Some(actor)),
            cols.visibility,
            cols.status,
            canvas,
            entity,
            external_ref,
            import_key,
          ],
        )?;
        let id = tx.last_insert_rowid();

        write_fields(&tx, id, &cols, actor, &now)?;
        write_personal(&tx, id, birthday.as_deref(), actor, alert, &now)?;
        save_attributes(&tx, id, &cols.attributes)?;

        let event = ContactEvent::Created { id, actor };
        if let Err(e) = fire(&listeners, &event) {
          return Ok(Err(e));
        }

        tx.commit()?;
        Ok(Ok(id))
      })
      .await??;

    tracing::debug!(id, "contact created");
    Ok(id)
  }

  async fn update(
    &self,
    id: ContactId,
    draft: &NewContact,
    actor: UserId,
    silent: bool,
  ) -> Result<()> {
    let cols = ContactColumns::from_draft(draft, false)?;
    let now = encode_dt(Utc::now());
    let listeners = self.listeners.clone();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let touched = write_fields(&tx, id, &cols, actor, &now)?;
        if touched == 0 {
          return Ok(Err(Error::Core(CoreError::ContactNotFound(id))));
        }
        save_attributes(&tx, id, &cols.attributes)?;

        if !silent {
          let event = ContactEvent::Modified { id, actor };
          if let Err(e) = fire(&listeners, &event) {
            return Ok(Err(e));
          }
        }

        tx.commit()?;
        Ok(Ok(()))
      })
      .await??;

    tracing::debug!(id, "contact updated");
    Ok(())
  }

  async fn update_personal(
    &self,
    id: ContactId,
    actor: UserId,
    birthday: Option<chrono::NaiveDate>,
    birthday_alert: bool,
  ) -> Result<()> {
    let birthday = birthday.map(encode_date);
    let now = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let touched = write_personal(
          &tx,
          id,
          birthday.as_deref(),
          actor,
          birthday_alert,
          &now,
        )?;
        if touched == 0 {
          return Ok(Err(Error::Core(CoreError::ContactNotFound(id))));
        }
        tx.commit()?;
        Ok(Ok(()))
      })
      .await??;

    Ok(())
  }

  async fn delete(&self, id: ContactId, actor: UserId, silent: bool) -> Result<()> {
    // Capture the record before touching anything: the deleted event hands
    // the prior field values to audit consumers.
    let prior = match self.fetch(Some(id), None, None).await? {
      Some(view) => Box::new(view.contact),
      None => return Err(Error::Core(CoreError::ContactNotFound(id))),
    };

    let listeners = self.listeners.clone();
    let external = LinkSource::External.code();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        // External-sourced polymorphic links go first, one row at a time;
        // the first failure aborts the whole cascade.
        let link_ids: Vec<i64> = {
          let mut stmt = tx.prepare(
            "SELECT l.link_id
             FROM element_links l
             JOIN element_link_types t ON t.type_id = l.type_id
             WHERE l.contact_id = ?1 AND t.source = ?2",
          )?;
          stmt
            .query_map(params![id, external], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        for link_id in link_ids {
          tx.execute("DELETE FROM element_links WHERE link_id = ?1", [link_id])?;
        }

        tx.execute("DELETE FROM category_links WHERE contact_id = ?1", [id])?;
        tx.execute("DELETE FROM birthday_alerts WHERE contact_id = ?1", [id])?;
        tx.execute("DELETE FROM contact_attributes WHERE contact_id = ?1", [id])?;
        tx.execute("DELETE FROM contacts WHERE contact_id = ?1", [id])?;

        if !silent {
          let event = ContactEvent::Deleted { contact: prior, actor };
          if let Err(e) = fire(&listeners, &event) {
            return Ok(Err(e));
          }
        }

        tx.commit()?;
        Ok(Ok(()))
      })
      .await??;

    tracing::debug!(id, "contact deleted");
    Ok(())
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn fetch(
    &self,
    id: Option<ContactId>,
    external_ref: Option<&str>,
    subscriber: Option<UserId>,
  ) -> Result<Option<ContactView>> {
    if id.is_none() && external_ref.is_none() {
      return Err(Error::Core(CoreError::MissingLookupKey));
    }
    let external_ref = external_ref.map(str::to_owned);

    let raw: Option<RawContactRow> = self
      .conn
      .call(move |conn| {
        let mut row = if let Some(id) = id {
          conn
            .query_row(
              &format!("{BASE_SELECT} WHERE c.contact_id = ?1"),
              params![id],
              map_contact_row,
            )
            .optional()?
        } else {
          let ext = external_ref.unwrap_or_default();
          conn
            .query_row(
              &format!("{BASE_SELECT} WHERE c.external_ref = ?1"),
              params![ext],
              map_contact_row,
            )
            .optional()?
        };

        if let Some(raw) = row.as_mut() {
          // A contact may back a login account.
          raw.linked_user = conn
            .query_row(
              "SELECT user_id, login FROM users WHERE contact_id = ?1",
              [raw.contact_id],
              |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .optional()?;

          if let Some(subscriber) = subscriber {
            raw.birthday_alert = conn
              .query_row(
                "SELECT 1 FROM birthday_alerts
                 WHERE contact_id = ?1 AND user_id = ?2",
                params![raw.contact_id, subscriber],
                |_| Ok(true),
              )
              .optional()?
              .unwrap_or(false);
          }

          let mut stmt = conn.prepare(
            "SELECT name, value FROM contact_attributes
             WHERE contact_id = ?1 ORDER BY name",
          )?;
          raw.attributes = stmt
            .query_map([raw.contact_id], |r| Ok((r.get(0)?, r.get(1)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        }

        Ok(row)
      })
      .await?;

    raw.map(RawContactRow::into_view).transpose()
  }

  async fn ref_counts(&self, id: ContactId) -> Result<RefCounts> {
    let rows: Vec<(String, i64)> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT t.element, COUNT(l.link_id)
           FROM element_links l
           JOIN element_link_types t ON t.type_id = l.type_id
           WHERE l.contact_id = ?1
           GROUP BY t.element",
        )?;
        let rows = stmt
          .query_map([id], |r| Ok((r.get(0)?, r.get(1)?)))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let mut counts = RefCounts::default();
    for (element, nb) in rows {
      // Unknown element kinds are simply not counted.
      if let Ok(kind) = ElementKind::from_code(&element) {
        match kind {
          ElementKind::Invoice => counts.invoices = nb as u64,
          ElementKind::Contract => counts.contracts = nb as u64,
          ElementKind::Order => counts.orders = nb as u64,
          ElementKind::Proposal => counts.proposals = nb as u64,
        }
      }
    }
    Ok(counts)
  }

  async fn audit_info(&self, id: ContactId) -> Result<Option<AuditInfo>> {
    let raw: Option<RawAudit> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT created_at, created_by, updated_at, updated_by
               FROM contacts WHERE contact_id = ?1",
              [id],
              |r| {
                Ok(RawAudit {
                  created_at: r.get(0)?,
                  created_by: r.get(1)?,
                  updated_at: r.get(2)?,
                  updated_by: r.get(3)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawAudit::into_audit).transpose()
  }

  // ── Status ────────────────────────────────────────────────────────────────

  async fn set_status(
    &self,
    id: ContactId,
    status: Status,
    actor: UserId,
  ) -> Result<bool> {
    let now = encode_dt(Utc::now());
    let listeners = self.listeners.clone();

    let changed = self
      .conn
      .call(move |conn| {
        let current: Option<i64> = conn
          .query_row(
            "SELECT status FROM contacts WHERE contact_id = ?1",
            [id],
            |r| r.get(0),
          )
          .optional()?;
        let Some(current) = current else {
          return Ok(Err(Error::Core(CoreError::ContactNotFound(id))));
        };
        let current = match Status::from_code(current) {
          Ok(s) => s,
          Err(e) => return Ok(Err(Error::Core(e))),
        };
        if current == status {
          return Ok(Ok(false));
        }

        let tx = conn.transaction()?;
        tx.execute(
          "UPDATE contacts SET status = ?1, updated_by = ?2, updated_at = ?3
           WHERE contact_id = ?4",
          params![status.code(), normalize_fk(Some(actor)), now, id],
        )?;

        let event = ContactEvent::StatusChanged { id, status, actor };
        if let Err(e) = fire(&listeners, &event) {
          return Ok(Err(e));
        }

        tx.commit()?;
        Ok(Ok(true))
      })
      .await??;

    if changed {
      tracing::debug!(id, "contact status changed");
    }
    Ok(changed)
  }

  // ── Categories ────────────────────────────────────────────────────────────

  async fn set_categories(
    &self,
    id: ContactId,
    desired: &[CategoryId],
  ) -> Result<()> {
    let desired: BTreeSet<CategoryId> = desired.iter().copied().collect();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let current: BTreeSet<CategoryId> = {
          let mut stmt = tx.prepare(
            "SELECT category_id FROM category_links WHERE contact_id = ?1",
          )?;
          stmt
            .query_map([id], |r| r.get(0))?
            .collect::<rusqlite::Result<_>>()?
        };

        for category in current.difference(&desired) {
          tx.execute(
            "DELETE FROM category_links
             WHERE category_id = ?1 AND contact_id = ?2",
            params![category, id],
          )?;
        }
        // Adds only categories that actually exist; the intersection is
        // left untouched.
        for category in desired.difference(&current) {
          tx.execute(
            "INSERT INTO category_links (category_id, contact_id)
             SELECT category_id, ?2 FROM categories WHERE category_id = ?1",
            params![category, id],
          )?;
        }

        tx.commit()?;
        Ok(())
      })
      .await?;

    Ok(())
  }

  async fn categories_of(&self, id: ContactId) -> Result<Vec<CategoryId>> {
    let categories = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT category_id FROM category_links
           WHERE contact_id = ?1 ORDER BY category_id",
        )?;
        let rows = stmt
          .query_map([id], |r| r.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(categories)
  }

  // ── Reporting ─────────────────────────────────────────────────────────────

  async fn mailing_count(&self, email: &str) -> Result<u64> {
    let email = email.to_owned();
    let count: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT COUNT(*) FROM mailing_targets
           WHERE email = ?1 AND status NOT IN (?2, ?3)",
          params![
            email,
            MailingStatus::Errored.code(),
            MailingStatus::Pending.code(),
          ],
          |r| r.get(0),
        )?)
      })
      .await?;
    Ok(count as u64)
  }

  async fn replace_company(
    &self,
    origin: CompanyId,
    dest: CompanyId,
  ) -> Result<u64> {
    let touched = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE contacts SET company_id = ?2 WHERE company_id = ?1",
          params![origin, dest],
        )?)
      })
      .await?;
    Ok(touched as u64)
  }
}

// ─── Reference data ──────────────────────────────────────────────────────────

/// Minimal management of the satellite tables the contact record joins
/// against. Enough to bootstrap an installation or a test fixture; a full
/// ERP would grow these into entities of their own.
impl SqliteStore {
  pub async fn add_company(&self, company: &CompanyInfo) -> Result<CompanyId> {
    let name = company.name.clone();
    let customer: i64 = if company.prospect {
      2
    } else {
      i64::from(company.customer)
    };
    let supplier = i64::from(company.supplier);
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO companies (name, customer, supplier) VALUES (?1, ?2, ?3)",
          params![name, customer, supplier],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;
    Ok(id)
  }

  pub async fn add_country(&self, code: &str, label: &str) -> Result<CountryId> {
    let code = code.to_owned();
    let label = label.to_owned();
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO countries (code, label) VALUES (?1, ?2)",
          params![code, label],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;
    Ok(id)
  }

  pub async fn add_state(
    &self,
    country_id: CountryId,
    code: &str,
    label: &str,
  ) -> Result<StateId> {
    let code = code.to_owned();
    let label = label.to_owned();
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO states (country_id, code, label) VALUES (?1, ?2, ?3)",
          params![country_id, code, label],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;
    Ok(id)
  }

  pub async fn add_user(
    &self,
    login: &str,
    contact_id: Option<ContactId>,
  ) -> Result<UserId> {
    let login = login.to_owned();
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (login, contact_id) VALUES (?1, ?2)",
          params![login, contact_id],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;
    Ok(id)
  }

  pub async fn add_category(&self, label: &str) -> Result<CategoryId> {
    let label = label.to_owned();
    let id = self
      .conn
      .call(move |conn| {
        conn.execute("INSERT INTO categories (label) VALUES (?1)", [label])?;
        Ok(conn.last_insert_rowid())
      })
      .await?;
    Ok(id)
  }

  pub async fn add_link_type(
    &self,
    kind: ElementKind,
    source: LinkSource,
  ) -> Result<LinkTypeId> {
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO element_link_types (element, source) VALUES (?1, ?2)",
          params![kind.code(), source.code()],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;
    Ok(id)
  }

  pub async fn add_element_link(
    &self,
    contact_id: ContactId,
    type_id: LinkTypeId,
    element_id: i64,
  ) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO element_links (contact_id, type_id, element_id)
           VALUES (?1, ?2, ?3)",
          params![contact_id, type_id, element_id],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  pub async fn add_mailing_target(
    &self,
    email: &str,
    status: MailingStatus,
  ) -> Result<()> {
    let email = email.to_owned();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO mailing_targets (email, status) VALUES (?1, ?2)",
          params![email, status.code()],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
