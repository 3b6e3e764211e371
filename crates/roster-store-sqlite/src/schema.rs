//! SQL schema for the roster SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! the `PRAGMA user_version` number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS companies (
    company_id INTEGER PRIMARY KEY,
    name       TEXT NOT NULL,
    customer   INTEGER NOT NULL DEFAULT 0,   -- 0 none | 1 customer | 2 prospect
    supplier   INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS countries (
    country_id INTEGER PRIMARY KEY,
    code       TEXT NOT NULL,
    label      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS states (
    state_id   INTEGER PRIMARY KEY,
    country_id INTEGER REFERENCES countries(country_id),
    code       TEXT NOT NULL,
    label      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS contacts (
    contact_id   INTEGER PRIMARY KEY,
    company_id   INTEGER REFERENCES companies(company_id),
    civility     TEXT,
    lastname     TEXT NOT NULL,
    firstname    TEXT NOT NULL DEFAULT '',
    position     TEXT NOT NULL DEFAULT '',
    address      TEXT NOT NULL DEFAULT '',
    zip          TEXT NOT NULL DEFAULT '',
    town         TEXT NOT NULL DEFAULT '',
    country_id   INTEGER REFERENCES countries(country_id),
    state_id     INTEGER REFERENCES states(state_id),
    email        TEXT NOT NULL DEFAULT '',
    phone_work   TEXT NOT NULL DEFAULT '',
    phone_home   TEXT NOT NULL DEFAULT '',
    phone_mobile TEXT NOT NULL DEFAULT '',
    fax          TEXT NOT NULL DEFAULT '',
    im_jabber    TEXT NOT NULL DEFAULT '',
    im_skype     TEXT NOT NULL DEFAULT '',
    photo        TEXT NOT NULL DEFAULT '',
    note_private TEXT,
    note_public  TEXT,
    visibility   INTEGER NOT NULL DEFAULT 0,  -- 0 shared | 1 private
    status       INTEGER NOT NULL DEFAULT 1,  -- 0/5 disabled | 1/4 enabled (4 and 5 are legacy read aliases)
    birthday     TEXT,
    default_lang TEXT,
    no_email     INTEGER NOT NULL DEFAULT 0,
    canvas       TEXT,
    entity       INTEGER NOT NULL DEFAULT 1,
    external_ref TEXT,
    import_key   TEXT,
    created_at   TEXT NOT NULL,               -- ISO 8601 UTC; store-assigned
    updated_at   TEXT,
    created_by   INTEGER,
    updated_by   INTEGER
);

-- Login accounts. contact_id is a soft link: a login may outlive the
-- contact card that backed it.
CREATE TABLE IF NOT EXISTS users (
    user_id    INTEGER PRIMARY KEY,
    login      TEXT NOT NULL UNIQUE,
    contact_id INTEGER
);

CREATE TABLE IF NOT EXISTS birthday_alerts (
    contact_id INTEGER NOT NULL REFERENCES contacts(contact_id),
    user_id    INTEGER NOT NULL,
    UNIQUE (contact_id, user_id)
);

CREATE TABLE IF NOT EXISTS categories (
    category_id INTEGER PRIMARY KEY,
    label       TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS category_links (
    category_id INTEGER NOT NULL REFERENCES categories(category_id),
    contact_id  INTEGER NOT NULL REFERENCES contacts(contact_id),
    UNIQUE (category_id, contact_id)
);

-- Polymorphic links between contacts and other elements. contact_id is not
-- a foreign key: rows of internal-sourced types reference login users.
CREATE TABLE IF NOT EXISTS element_link_types (
    type_id INTEGER PRIMARY KEY,
    element TEXT NOT NULL,                    -- 'invoice' | 'contract' | 'order' | 'proposal'
    source  TEXT NOT NULL DEFAULT 'external'  -- 'internal' | 'external'
);

CREATE TABLE IF NOT EXISTS element_links (
    link_id    INTEGER PRIMARY KEY,
    contact_id INTEGER NOT NULL,
    type_id    INTEGER NOT NULL REFERENCES element_link_types(type_id),
    element_id INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS mailing_targets (
    target_id INTEGER PRIMARY KEY,
    email     TEXT NOT NULL,
    status    INTEGER NOT NULL DEFAULT 0      -- -1 error | 0 pending | 1 sent
);

CREATE TABLE IF NOT EXISTS contact_attributes (
    contact_id INTEGER NOT NULL REFERENCES contacts(contact_id),
    name       TEXT NOT NULL,
    value      TEXT NOT NULL,                 -- JSON
    UNIQUE (contact_id, name)
);

CREATE INDEX IF NOT EXISTS contacts_company_idx      ON contacts(company_id);
CREATE INDEX IF NOT EXISTS contacts_external_ref_idx ON contacts(external_ref);
CREATE INDEX IF NOT EXISTS element_links_contact_idx ON element_links(contact_id);
CREATE INDEX IF NOT EXISTS category_links_contact_idx ON category_links(contact_id);
CREATE INDEX IF NOT EXISTS mailing_targets_email_idx ON mailing_targets(email);

PRAGMA user_version = 1;
";
