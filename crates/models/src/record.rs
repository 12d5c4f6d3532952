//! Closed set of entity kinds and the tagged value that carries one of them
//! through the request pipeline.

use std::fmt;
use std::str::FromStr;

use crate::client::Client;
use crate::errors::ModelError;
use crate::market::Market;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Client,
    Market,
}

impl EntityKind {
    pub const ALL: [EntityKind; 2] = [EntityKind::Client, EntityKind::Market];

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Client => "client",
            EntityKind::Market => "market",
        }
    }

    /// Backing table name.
    pub fn table(self) -> &'static str {
        match self {
            EntityKind::Client => "clients",
            EntityKind::Market => "markets",
        }
    }

    /// Attribute a list request filters on.
    pub fn filter_field(self) -> &'static str {
        match self {
            EntityKind::Client => "last_name",
            EntityKind::Market => "name",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(EntityKind::Client),
            "market" => Ok(EntityKind::Market),
            other => Err(format!("unknown entity kind '{other}'")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    List,
    Create,
    Update,
    Delete,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::List, Action::Create, Action::Update, Action::Delete];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::List => "list",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "list" => Ok(Action::List),
            "create" => Ok(Action::Create),
            "update" => Ok(Action::Update),
            "delete" => Ok(Action::Delete),
            other => Err(format!("unknown action '{other}'")),
        }
    }
}

/// One entity value of any supported kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Record {
    Client(Client),
    Market(Market),
}

impl Record {
    /// Decode a request body into the shape of `kind`.
    ///
    /// Missing fields decode to their defaults; presence is the validator's job.
    pub fn decode(kind: EntityKind, bytes: &[u8]) -> Result<Self, ModelError> {
        let decoded = match kind {
            EntityKind::Client => serde_json::from_slice(bytes).map(Record::Client),
            EntityKind::Market => serde_json::from_slice(bytes).map(Record::Market),
        };
        decoded.map_err(|e| ModelError::Decode(e.to_string()))
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Record::Client(_) => EntityKind::Client,
            Record::Market(_) => EntityKind::Market,
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Record::Client(c) => c.id.as_deref(),
            Record::Market(m) => m.id.as_deref(),
        }
    }

    /// Value of the filter field (see [`EntityKind::filter_field`]).
    pub fn filter_value(&self) -> &str {
        match self {
            Record::Client(c) => &c.last_name,
            Record::Market(m) => &m.name,
        }
    }

    pub fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        match self {
            Record::Client(c) => serde_json::to_vec(c),
            Record::Market(m) => serde_json::to_vec(m),
        }
    }
}

impl From<Client> for Record {
    fn from(c: Client) -> Self { Record::Client(c) }
}

impl From<Market> for Record {
    fn from(m: Market) -> Self { Record::Market(m) }
}
